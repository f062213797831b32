/// Data layer: loading, cleaning, caching, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawTable
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐   ┌─────────┐   ┌────────┐
///   │ normalize  │ → │ quality │ → │ region │   (pipeline)
///   └───────────┘   └─────────┘   └────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  Arc<Catalog>, loaded once
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  user ranges → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  per-region stats for the treemap
///   └───────────┘
/// ```

pub mod aggregate;
pub mod cache;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod quality;
pub mod region;
