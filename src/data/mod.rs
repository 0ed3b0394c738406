/// Data layer: parsing, normalization and the metadata join.
///
/// Architecture:
/// ```text
///  The_trials.csv              uv-vis sample description.csv
///        │                                   │
///        ▼                                   ▼
///   ┌──────────┐                       ┌──────────┐
///   │  header   │  preamble → table     │ metadata  │  rows − blanks − exclusions
///   └──────────┘                       └──────────┘
///        │                                   │
///        ▼                                   │
///   ┌───────────┐                            │
///   │ normalize  │  A-1_a → A1_a              │
///   └───────────┘                            │
///        │                                   │
///        └──────────────┬────────────────────┘
///                       ▼
///                 ┌──────────┐
///                 │   join    │  matrix + wavelengths + sample records
///                 └──────────┘
/// ```

pub mod header;
pub mod join;
pub mod metadata;
pub mod model;
pub mod normalize;
