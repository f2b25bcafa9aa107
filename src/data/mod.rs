/// Data layer: CSV loading, column resolution, and series extraction.
///
/// ```text
///  results .csv
///       │
///       ▼
///  ┌─────────┐
///  │ loader  │  semicolon CSV → RawTable (header + string rows)
///  └─────────┘
///       │
///       ▼
///  ┌───────────┐
///  │ HeaderMap │  logical column → header index
///  └───────────┘
///       │
///       ▼
///  ┌─────────┐
///  │ extract │  rows → per-technique series + baseline error
///  └─────────┘
/// ```

pub mod extract;
pub mod loader;
pub mod model;
