pub mod store;
pub mod types;

pub use store::Catalog;
pub use types::ServerRecord;
