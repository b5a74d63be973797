/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  HTTP catalog / .json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  decode records → Snapshot
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Snapshot  │  Vec<Brewery>, distinct types/states
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  search + type + state predicates → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  summary  │  totals, most-common values, type breakdown
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;
