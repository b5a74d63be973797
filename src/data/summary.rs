use std::collections::HashMap;
use std::hash::Hash;

use super::model::{Brewery, BreweryType};

/// Shown in place of a most-common value when there is nothing to count.
pub const NOT_AVAILABLE: &str = "N/A";

// ---------------------------------------------------------------------------
// Frequency table with a fixed tie-break
// ---------------------------------------------------------------------------

/// Value → occurrence count, remembering the order values were first seen.
///
/// Ties on count are always broken in favour of the value seen first, so the
/// same input sequence always produces the same mode and ranking.
#[derive(Debug, Clone)]
pub struct FrequencyTable<K> {
    entries: Vec<(K, usize)>,
    position: HashMap<K, usize>,
}

impl<K: Eq + Hash + Clone> FrequencyTable<K> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            position: HashMap::new(),
        }
    }

    pub fn record(&mut self, key: K) {
        match self.position.get(&key) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.position.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    #[cfg(test)]
    fn count(&self, key: &K) -> usize {
        self.position.get(key).map_or(0, |&i| self.entries[i].1)
    }

    /// The value with the highest count; earliest first occurrence wins ties.
    pub fn mode(&self) -> Option<&K> {
        let mut best: Option<&(K, usize)> = None;
        for entry in &self.entries {
            // Strictly greater: an equal count never displaces an earlier value.
            match best {
                Some(b) if entry.1 <= b.1 => {}
                _ => best = Some(entry),
            }
        }
        best.map(|(k, _)| k)
    }

    /// All values by count descending, ties in first-seen order.
    pub fn ranked(&self) -> Vec<(K, usize)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

impl<K: Eq + Hash + Clone> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone> FromIterator<K> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut table = Self::new();
        for key in iter {
            table.record(key);
        }
        table
    }
}

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

/// Statistics over a filtered result, rebuilt from scratch on every change.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStatistics {
    pub total: usize,
    pub most_common_city: String,
    pub most_common_state: String,
    pub most_common_type: String,
    /// Mean name length in characters; 0 for an empty result.
    pub average_name_length: f64,
    /// Count per brewery type, largest first.
    pub type_breakdown: Vec<(BreweryType, usize)>,
}

impl Default for SummaryStatistics {
    fn default() -> Self {
        summarize(std::iter::empty())
    }
}

/// A missing mode, or one that landed on a blank value, shows as N/A.
fn mode_or_na(mode: Option<&str>) -> String {
    mode.filter(|m| !m.is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

/// Compute summary statistics over `results`.
///
/// Defined for every input: an empty result gives `total == 0`,
/// [`NOT_AVAILABLE`] for each most-common field and an average of 0.
pub fn summarize<'a, I>(results: I) -> SummaryStatistics
where
    I: IntoIterator<Item = &'a Brewery>,
{
    let mut cities: FrequencyTable<&str> = FrequencyTable::new();
    let mut states: FrequencyTable<&str> = FrequencyTable::new();
    let mut types: FrequencyTable<&BreweryType> = FrequencyTable::new();
    let mut total = 0usize;
    let mut name_chars = 0usize;

    for b in results {
        total += 1;
        name_chars += b.name.chars().count();
        cities.record(b.city.as_str());
        states.record(b.state.as_str());
        types.record(&b.brewery_type);
    }

    SummaryStatistics {
        total,
        most_common_city: mode_or_na(cities.mode().copied()),
        most_common_state: mode_or_na(states.mode().copied()),
        most_common_type: mode_or_na(types.mode().map(|t| t.as_str())),
        average_name_length: name_chars as f64 / total.max(1) as f64,
        type_breakdown: types
            .ranked()
            .into_iter()
            .map(|(t, n)| (t.clone(), n))
            .collect(),
    }
}
