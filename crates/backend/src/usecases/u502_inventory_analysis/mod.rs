pub mod analysis;
pub mod service;
