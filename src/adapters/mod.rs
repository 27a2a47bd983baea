// Adapters layer: concrete implementations for external systems (word files, storage, export).

pub mod export;
pub mod storage;
pub mod tsv;
