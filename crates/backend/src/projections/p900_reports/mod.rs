pub mod row_builder;
pub mod service;
