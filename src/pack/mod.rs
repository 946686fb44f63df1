//! Data-file ("pack") loading and write-back.
//!
//! A pack is either a single JSON array of records or newline-delimited JSON
//! with one record per line. The detected format is kept alongside the
//! records so a save reproduces the original serialization style.
pub mod record;
pub mod store;

pub use record::RecordView;
pub use store::{list_data_files, Pack, PackFormat};
