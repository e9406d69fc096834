pub mod cart;
pub mod csv;
pub mod date_range;
pub mod format;
pub mod stock_item;
