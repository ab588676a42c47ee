pub mod aggregate;

pub use aggregate::{Customer, OrderLine, OrderRequest, OrderResponse};
