pub mod cache_store;
pub mod export_xlsx;
pub mod normalize_records;
