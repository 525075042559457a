/// Data layer: core types, loading, facets, filtering and export.
///
/// Architecture:
/// ```text
///        sdgs.csv
///           │
///           ▼
///    ┌──────────────┐
///    │    loader    │  parse CSV → SdgDataset (worker thread)
///    └──────────────┘
///           │
///           ▼
///    ┌──────────────┐
///    │  SdgDataset  │  Vec<Record> + Facets (years, regions, targets)
///    └──────────────┘
///           │
///           ▼
///    ┌──────────────┐
///    │    filter    │  search + facet predicates → filtered indices
///    └──────────────┘
///           │
///           ▼
///    ┌──────────────┐
///    │    export    │  filtered records → sdg_initiatives.csv
///    └──────────────┘
/// ```

pub mod export;
pub mod facets;
pub mod filter;
pub mod loader;
pub mod model;
