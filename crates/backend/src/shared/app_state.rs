use std::sync::Arc;

use crate::usecases::u501_catalog_ingestion::CatalogCache;
use crate::usecases::u502_order_intake::OrderService;

/// Services shared by all handlers, built once in `main`
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogCache>,
    pub orders: Arc<OrderService>,
}
