use anyhow::Result;

use crate::data::filter::{filtered_indices, Criteria, Selection};
use crate::data::model::{Brewery, BreweryType, Snapshot};
use crate::data::summary::{summarize, SummaryStatistics};

// ---------------------------------------------------------------------------
// Criterion change events
// ---------------------------------------------------------------------------

/// A new value for exactly one criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CriterionChange {
    SearchText(String),
    Type(Selection<BreweryType>),
    State(Selection<String>),
}

/// Identifies one load request. Only the most recently issued ticket may
/// install its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// The full dashboard state, independent of rendering.
///
/// Owns the snapshot and criteria; the filtered indices and summary are
/// recomputed from scratch after every change, so readers never observe a
/// summary that disagrees with the filtered rows.
#[derive(Debug, Default)]
pub struct Session {
    snapshot: Snapshot,
    criteria: Criteria,

    /// Indices into the snapshot of breweries passing the criteria.
    visible_indices: Vec<usize>,
    summary: SummaryStatistics,

    /// Last ticket handed out by [`Session::begin_load`].
    latest_ticket: u64,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a load is in flight.
    pub loading: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        let mut session = Self::default();
        session.replace_snapshot(snapshot);
        session
    }

    // -- Accessors -----------------------------------------------------------

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn summary(&self) -> &SummaryStatistics {
        &self.summary
    }

    pub fn visible_indices(&self) -> &[usize] {
        &self.visible_indices
    }

    /// Breweries passing the current criteria, in snapshot order.
    pub fn filtered(&self) -> impl Iterator<Item = &Brewery> + '_ {
        let all = self.snapshot.breweries();
        self.visible_indices.iter().map(move |&i| &all[i])
    }

    /// The first `limit` filtered breweries, for the results table.
    pub fn display_rows(&self, limit: usize) -> Vec<&Brewery> {
        self.filtered().take(limit).collect()
    }

    // -- Mutations -----------------------------------------------------------

    /// Install a new snapshot and recompute. Criteria are kept as they are.
    pub fn replace_snapshot(&mut self, snapshot: Snapshot) {
        self.snapshot = snapshot;
        self.recompute();
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.apply(CriterionChange::SearchText(text.into()));
    }

    pub fn set_type_filter(&mut self, selection: Selection<BreweryType>) {
        self.apply(CriterionChange::Type(selection));
    }

    pub fn set_state_filter(&mut self, selection: Selection<String>) {
        self.apply(CriterionChange::State(selection));
    }

    /// Apply one criterion change and recompute against the full criteria.
    pub fn apply(&mut self, change: CriterionChange) {
        match change {
            CriterionChange::SearchText(text) => self.criteria.search_text = text,
            CriterionChange::Type(sel) => self.criteria.type_filter = sel,
            CriterionChange::State(sel) => self.criteria.state_filter = sel,
        }
        self.recompute();
    }

    /// Clear every criterion.
    pub fn reset_criteria(&mut self) {
        self.criteria = Criteria::default();
        self.recompute();
    }

    /// Filter, then summarise the filtered rows. Always a full pass.
    fn recompute(&mut self) {
        self.visible_indices = filtered_indices(self.snapshot.breweries(), &self.criteria);
        self.summary = summarize(self.filtered());
        log::debug!(
            "Recomputed: {} of {} breweries match {:?}",
            self.visible_indices.len(),
            self.snapshot.len(),
            self.criteria
        );
    }

    // -- Loading -------------------------------------------------------------

    /// Start a load. Any ticket issued earlier becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_ticket += 1;
        self.loading = true;
        LoadTicket(self.latest_ticket)
    }

    /// Install the outcome of a load if `ticket` is still the latest one.
    ///
    /// A failed load leaves an empty snapshot and a status message. Returns
    /// `false` when the outcome was stale and discarded.
    pub fn finish_load(&mut self, ticket: LoadTicket, outcome: Result<Snapshot>) -> bool {
        if ticket.0 != self.latest_ticket {
            log::debug!("Discarding stale load result {ticket:?}");
            return false;
        }
        self.loading = false;
        match outcome {
            Ok(snapshot) => {
                log::info!(
                    "Loaded {} breweries from {}",
                    snapshot.len(),
                    snapshot.source
                );
                self.status_message = None;
                self.replace_snapshot(snapshot);
            }
            Err(e) => {
                log::error!("Failed to load breweries: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
                self.replace_snapshot(Snapshot::default());
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;
    use crate::data::model::{brewery, SnapshotSource};
    use crate::data::summary::NOT_AVAILABLE;

    fn scenario_session() -> Session {
        Session::with_snapshot(Snapshot::from_breweries(
            vec![
                brewery("Oak St", "micro", "Austin", "Texas"),
                brewery("Oak Barrel", "micro", "Austin", "Texas"),
                brewery("Hill Brew", "regional", "Denver", "Colorado"),
            ],
            SnapshotSource::Empty,
        ))
    }

    fn assert_consistent(session: &Session) {
        assert_eq!(session.summary().total, session.filtered().count());
        assert_eq!(session.summary(), &summarize(session.filtered()));
    }

    #[test]
    fn fresh_session_has_sentinel_summary() {
        let session = Session::new();
        assert_eq!(session.summary().total, 0);
        assert_eq!(session.summary().most_common_city, NOT_AVAILABLE);
        assert!(session.display_rows(10).is_empty());
    }

    #[test]
    fn every_criterion_change_recomputes() {
        let mut session = scenario_session();
        assert_eq!(session.summary().total, 3);
        assert_consistent(&session);

        session.set_search_text("oak");
        assert_eq!(session.summary().total, 2);
        assert_eq!(session.summary().most_common_city, "Austin");
        assert_consistent(&session);

        session.set_state_filter(Selection::Only("Colorado".into()));
        assert_eq!(session.summary().total, 0);
        assert_eq!(session.summary().most_common_type, NOT_AVAILABLE);
        assert_consistent(&session);

        session.apply(CriterionChange::SearchText(String::new()));
        assert_eq!(session.visible_indices(), &[2]);
        assert_eq!(session.summary().most_common_city, "Denver");
        assert_consistent(&session);

        session.reset_criteria();
        assert_eq!(session.criteria(), &Criteria::default());
        assert_eq!(session.visible_indices(), &[0, 1, 2]);
    }

    #[test]
    fn type_change_keeps_other_criteria() {
        let mut session = scenario_session();
        session.set_search_text("b");
        session.set_type_filter(Selection::Only(BreweryType::Regional));
        assert_eq!(session.criteria().search_text, "b");
        let names: Vec<&str> = session.filtered().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Hill Brew"]);
    }

    #[test]
    fn snapshot_replacement_reapplies_criteria() {
        let mut session = scenario_session();
        session.set_type_filter(Selection::Only(BreweryType::Micro));
        session.replace_snapshot(Snapshot::from_breweries(
            vec![
                brewery("Tiny", "nano", "Bend", "Oregon"),
                brewery("Big Micro", "micro", "Bend", "Oregon"),
            ],
            SnapshotSource::Empty,
        ));
        assert_eq!(session.visible_indices(), &[1]);
        assert_eq!(session.summary().most_common_city, "Bend");
        assert_consistent(&session);
    }

    #[test]
    fn display_rows_caps_without_touching_summary() {
        let breweries = (0..15)
            .map(|i| brewery(&format!("Brewery {i}"), "micro", "Austin", "Texas"))
            .collect();
        let session = Session::with_snapshot(Snapshot::from_breweries(breweries, SnapshotSource::Empty));
        let rows = session.display_rows(10);
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0].name, "Brewery 0");
        assert_eq!(session.summary().total, 15);
    }

    #[test]
    fn failed_load_leaves_empty_snapshot_and_message() {
        let mut session = scenario_session();
        let ticket = session.begin_load();
        assert!(session.loading);
        assert!(session.finish_load(ticket, Err(anyhow!("connection refused"))));
        assert!(!session.loading);
        assert!(session.snapshot().is_empty());
        assert_eq!(session.summary().total, 0);
        assert_eq!(session.summary().most_common_city, NOT_AVAILABLE);
        assert!(session
            .status_message
            .as_deref()
            .is_some_and(|m| m.contains("connection refused")));
    }

    #[test]
    fn stale_load_is_discarded() {
        let mut session = Session::new();
        let first = session.begin_load();
        let second = session.begin_load();

        let newer = Snapshot::from_breweries(
            vec![brewery("From File", "brewpub", "Reno", "Nevada")],
            SnapshotSource::Empty,
        );
        assert!(session.finish_load(second, Ok(newer)));

        let older = Snapshot::from_breweries(
            vec![brewery("From Network", "micro", "Austin", "Texas")],
            SnapshotSource::Empty,
        );
        assert!(!session.finish_load(first, Ok(older)));

        let names: Vec<&str> = session.filtered().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["From File"]);
        assert!(first < second);
    }
}
