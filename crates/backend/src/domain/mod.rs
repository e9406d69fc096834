pub mod a001_supplier;
pub mod a002_sales_channel;
pub mod a003_raw_material;
pub mod a004_manufactured_product;
pub mod a005_resale_product;
pub mod a006_product_variant;
pub mod a007_bill_of_materials;
pub mod a008_production_order;
pub mod a009_purchase_order;
pub mod a010_sales_order;
