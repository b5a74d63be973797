use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// BreweryType – the categorical "brewery_type" column
// ---------------------------------------------------------------------------

/// Category reported by the catalog for each brewery.
///
/// The catalog documents a fixed set of values but may emit others; those are
/// kept verbatim in [`BreweryType::Other`] so they still filter and count.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BreweryType {
    Micro,
    Nano,
    Regional,
    Brewpub,
    Large,
    Planning,
    Bar,
    Contract,
    Proprietor,
    Taproom,
    Beergarden,
    Closed,
    Other(String),
}

impl BreweryType {
    /// The four types offered in the filter dropdown even before data arrives.
    pub const COMMON: [BreweryType; 4] = [
        BreweryType::Micro,
        BreweryType::Regional,
        BreweryType::Brewpub,
        BreweryType::Contract,
    ];

    /// Wire name, as used by the catalog's `brewery_type` field.
    pub fn as_str(&self) -> &str {
        match self {
            BreweryType::Micro => "micro",
            BreweryType::Nano => "nano",
            BreweryType::Regional => "regional",
            BreweryType::Brewpub => "brewpub",
            BreweryType::Large => "large",
            BreweryType::Planning => "planning",
            BreweryType::Bar => "bar",
            BreweryType::Contract => "contract",
            BreweryType::Proprietor => "proprietor",
            BreweryType::Taproom => "taproom",
            BreweryType::Beergarden => "beergarden",
            BreweryType::Closed => "closed",
            BreweryType::Other(s) => s,
        }
    }

    /// Human-facing label ("Micro", "Brewpub", ...).
    pub fn label(&self) -> String {
        let raw = self.as_str();
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => "Unknown".to_string(),
        }
    }
}

impl Default for BreweryType {
    fn default() -> Self {
        BreweryType::Other(String::new())
    }
}

impl From<String> for BreweryType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "micro" => BreweryType::Micro,
            "nano" => BreweryType::Nano,
            "regional" => BreweryType::Regional,
            "brewpub" => BreweryType::Brewpub,
            "large" => BreweryType::Large,
            "planning" => BreweryType::Planning,
            "bar" => BreweryType::Bar,
            "contract" => BreweryType::Contract,
            "proprietor" => BreweryType::Proprietor,
            "taproom" => BreweryType::Taproom,
            "beergarden" => BreweryType::Beergarden,
            "closed" => BreweryType::Closed,
            _ => BreweryType::Other(s),
        }
    }
}

impl From<&str> for BreweryType {
    fn from(s: &str) -> Self {
        BreweryType::from(s.to_string())
    }
}

impl From<BreweryType> for String {
    fn from(t: BreweryType) -> Self {
        match t {
            BreweryType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for BreweryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Brewery – one catalog record
// ---------------------------------------------------------------------------

/// A single catalog record. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brewery {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub brewery_type: BreweryType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: String,
}

/// The catalog sends `null` for unknown cities/states.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Snapshot – the immutable collection for one session
// ---------------------------------------------------------------------------

/// Where a snapshot was loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SnapshotSource {
    #[default]
    Empty,
    Remote(String),
    File(PathBuf),
}

impl fmt::Display for SnapshotSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotSource::Empty => write!(f, "nothing loaded"),
            SnapshotSource::Remote(url) => write!(f, "{url}"),
            SnapshotSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Breweries in catalog order, plus the distinct values the filter
/// dropdowns offer.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    breweries: Vec<Brewery>,
    /// Sorted distinct brewery types present in the snapshot.
    pub types: BTreeSet<BreweryType>,
    /// Sorted distinct non-empty states present in the snapshot.
    pub states: BTreeSet<String>,
    pub source: SnapshotSource,
}

impl Snapshot {
    /// Build the dropdown indices from the loaded breweries.
    pub fn from_breweries(breweries: Vec<Brewery>, source: SnapshotSource) -> Self {
        let mut types = BTreeSet::new();
        let mut states = BTreeSet::new();
        for b in &breweries {
            types.insert(b.brewery_type.clone());
            if !b.state.is_empty() {
                states.insert(b.state.clone());
            }
        }
        Snapshot {
            breweries,
            types,
            states,
            source,
        }
    }

    pub fn breweries(&self) -> &[Brewery] {
        &self.breweries
    }

    pub fn len(&self) -> usize {
        self.breweries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breweries.is_empty()
    }

    /// Types to offer in the type dropdown: the common four plus anything
    /// else the snapshot contains, sorted.
    pub fn type_options(&self) -> Vec<BreweryType> {
        let mut all: BTreeSet<BreweryType> = BreweryType::COMMON.iter().cloned().collect();
        all.extend(self.types.iter().filter(|t| t.as_str() != "").cloned());
        all.into_iter().collect()
    }
}

#[cfg(test)]
pub(crate) fn brewery(name: &str, brewery_type: &str, city: &str, state: &str) -> Brewery {
    Brewery {
        id: name.to_lowercase().replace(' ', "-"),
        name: name.to_string(),
        brewery_type: BreweryType::from(brewery_type),
        city: city.to_string(),
        state: state.to_string(),
    }
}
