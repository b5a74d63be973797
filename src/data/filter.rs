use std::fmt;

use super::model::{Brewery, BreweryType};

// ---------------------------------------------------------------------------
// Criteria: the user's current filter selections
// ---------------------------------------------------------------------------

/// A categorical filter: either no constraint or one required value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    /// `All` matches everything; `Only(v)` matches exactly `v`.
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => write!(f, "All"),
            Selection::Only(v) => write!(f, "{v}"),
        }
    }
}

/// Search text plus the two dropdown filters.
///
/// The default value (empty search, `All`, `All`) constrains nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Criteria {
    /// Case-insensitive substring matched against the brewery name.
    pub search_text: String,
    pub type_filter: Selection<BreweryType>,
    pub state_filter: Selection<String>,
}

impl Criteria {
    /// True when no criterion is active.
    pub fn is_default(&self) -> bool {
        self.search_text.is_empty() && self.type_filter.is_all() && self.state_filter.is_all()
    }

    /// Whether a single brewery passes every active criterion.
    pub fn matches(&self, brewery: &Brewery) -> bool {
        Matcher::new(self).matches(brewery)
    }
}

/// Criteria with the search needle folded once per pass instead of per row.
struct Matcher<'c> {
    needle: Option<String>,
    criteria: &'c Criteria,
}

impl<'c> Matcher<'c> {
    fn new(criteria: &'c Criteria) -> Self {
        let needle = (!criteria.search_text.is_empty())
            .then(|| criteria.search_text.to_lowercase());
        Matcher { needle, criteria }
    }

    fn matches(&self, brewery: &Brewery) -> bool {
        let name_ok = match &self.needle {
            Some(needle) => brewery.name.to_lowercase().contains(needle.as_str()),
            None => true,
        };
        name_ok
            && self.criteria.type_filter.matches(&brewery.brewery_type)
            && self.criteria.state_filter.matches(&brewery.state)
    }
}

// ---------------------------------------------------------------------------
// Filter pass
// ---------------------------------------------------------------------------

/// Return indices of breweries that pass all active criteria, in snapshot
/// order.
///
/// A brewery passes when:
/// * its name contains the search text, ignoring case (or the text is empty)
/// * its type equals the selected type (or the selection is `All`)
/// * its state equals the selected state (or the selection is `All`)
pub fn filtered_indices(breweries: &[Brewery], criteria: &Criteria) -> Vec<usize> {
    let matcher = Matcher::new(criteria);
    breweries
        .iter()
        .enumerate()
        .filter(|(_, b)| matcher.matches(b))
        .map(|(i, _)| i)
        .collect()
}

/// Return the breweries that pass all active criteria, preserving input order.
///
/// Accepts any iterator of borrowed breweries, so an already-filtered result
/// can be filtered again.
pub fn filter<'a, I>(breweries: I, criteria: &Criteria) -> Vec<&'a Brewery>
where
    I: IntoIterator<Item = &'a Brewery>,
{
    let matcher = Matcher::new(criteria);
    breweries.into_iter().filter(|b| matcher.matches(b)).collect()
}
