pub mod u501_catalog_ingestion;
pub mod u502_order_intake;
