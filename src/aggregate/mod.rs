pub mod conformation;
pub mod protein;
