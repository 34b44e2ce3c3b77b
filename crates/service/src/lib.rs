//! Service layer owning the product catalog.
//! - Keeps all mutation rules (id allocation, merge, removal) behind one store type.
//! - Reuses entity definitions from the `models` crate.
//! - Surfaces a single not-found error to the transport layer.

pub mod errors;
pub mod products;
pub mod seed;

pub use errors::ServiceError;
pub use products::ProductStore;
