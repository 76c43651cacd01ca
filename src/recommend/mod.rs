pub mod engine;
pub mod scoring;
pub mod types;

pub use engine::{dispatch, recommend};
pub use types::{Category, Recommendation};
