pub mod adapters;
pub mod config;
pub mod networks;
pub mod qos;
