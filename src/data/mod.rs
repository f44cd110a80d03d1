/// Data layer: core types, loading, and the EW transform.
///
/// Architecture:
/// ```text
///  grid .tsv / continuum.cont
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LineTable / Continuum
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ transform │  coerce → floor at 1 → normalize → log10 → Field
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod transform;
