pub mod u501_marketplace_sync;
pub mod u502_inventory_analysis;
