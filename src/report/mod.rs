pub mod json;
pub mod tables;
pub mod text;
