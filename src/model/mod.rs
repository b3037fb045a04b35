pub mod error;
pub mod metrics;
pub mod rows;
pub mod weights;
