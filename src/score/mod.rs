pub mod composite;
pub mod normalize;
