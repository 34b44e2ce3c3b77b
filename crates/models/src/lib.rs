//! Catalog entity definitions shared by the service and transport layers.

pub mod product;

pub use product::{NewProduct, Product, ProductPatch};
