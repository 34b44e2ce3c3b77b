//! Starter catalog loaded when the store is constructed with seeding enabled.

use models::NewProduct;

/// Default starter set, in insertion order; ids are assigned 1..=n.
pub fn default_products() -> Vec<NewProduct> {
    vec![
        NewProduct::new("Laptop", 1000.0, 5),
        NewProduct::new("Smartphone", 500.0, 10),
        NewProduct::new("Headphones", 150.0, 25),
    ]
}
