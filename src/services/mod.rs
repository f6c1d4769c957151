pub mod display;
pub mod metadata_gateway;
