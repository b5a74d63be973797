//! Writes `sample_breweries.json` and `sample_breweries.csv` for offline use.
//!
//! Output is deterministic: the same seed always yields the same catalog.

use anyhow::{Context, Result};

use brewery_dashboard::data::model::{Brewery, BreweryType};

const PREFIXES: &[&str] = &[
    "Oak", "Hill", "River", "Copper", "Iron", "Lone Pine", "Red Barn", "Granite", "Old Mill",
    "Blue Heron",
];
const SUFFIXES: &[&str] = &[
    "Brewing Co", "Brewery", "Beer Works", "Ales", "Brewhouse", "Taproom", "Fermentation",
];
const PLACES: &[(&str, &str)] = &[
    ("Austin", "Texas"),
    ("Houston", "Texas"),
    ("Denver", "Colorado"),
    ("Boulder", "Colorado"),
    ("Portland", "Oregon"),
    ("Bend", "Oregon"),
    ("San Diego", "California"),
    ("Asheville", "North Carolina"),
];
const TYPES: &[&str] = &[
    "micro", "micro", "micro", "brewpub", "brewpub", "regional", "contract", "nano", "planning",
    "large",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn generate(n: usize, seed: u64) -> Vec<Brewery> {
    let mut rng = SimpleRng::new(seed);
    (0..n)
        .map(|i| {
            let (city, state) = *rng.pick(PLACES);
            let name = format!("{} {}", rng.pick(PREFIXES), rng.pick(SUFFIXES));
            Brewery {
                id: format!("sample-{i:04}-{:08x}", rng.next_u64() as u32),
                name,
                brewery_type: BreweryType::from(*rng.pick(TYPES)),
                city: city.to_string(),
                state: state.to_string(),
            }
        })
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();

    let breweries = generate(50, 42);

    let json_path = "sample_breweries.json";
    let json = serde_json::to_string_pretty(&breweries).context("encoding JSON")?;
    std::fs::write(json_path, json).with_context(|| format!("writing {json_path}"))?;

    let csv_path = "sample_breweries.csv";
    let mut writer = csv::Writer::from_path(csv_path).context("opening CSV")?;
    for b in &breweries {
        writer.serialize(b).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;

    log::info!("Wrote {} breweries", breweries.len());
    println!("Wrote {} breweries to {json_path} and {csv_path}", breweries.len());
    Ok(())
}
