pub mod assemble;
pub mod config;
pub mod tables;

pub use assemble::{assemble, assemble_default, Bundle, BundleMap};
pub use config::NotifyFileConfig;
pub use tables::{NotifyTables, UserRecord, DEFAULT_ROUTING};
