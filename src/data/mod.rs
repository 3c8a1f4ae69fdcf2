/// Data layer: station records, loading, narrowing and aggregation.
///
/// Architecture:
/// ```text
///  .xlsx / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file, check schema → StationTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ StationTable  │  Vec<StationRecord>, immutable
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  narrow by opening year → new StationTable
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  count / mean / top-N per key
///   └───────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
