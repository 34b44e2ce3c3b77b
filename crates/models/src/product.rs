use serde::{Deserialize, Deserializer, Serialize};

/// 商品记录：id 由存储分配，创建后不可变
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub price: f64,
    pub stock: u32,
}

/// Create input. Carries no `id`; one supplied by a client body is dropped during deserialization.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub stock: u32,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: f64, stock: u32) -> Self {
        Self { name: name.into(), price, stock }
    }
}

/// Partial update input.
///
/// Each field is either absent (`None`, key omitted) or present with a value.
/// None of the product fields are nullable, so an explicit `null` is rejected
/// instead of being read as "omitted".
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductPatch {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
}

/// Only invoked when the key exists, so a `null` value reaches `T` and fails there.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.stock.is_none()
    }
}

impl Product {
    pub fn from_new(id: u64, input: NewProduct) -> Self {
        Self {
            id,
            name: input.name,
            price: input.price,
            stock: input.stock,
        }
    }

    /// Field-level merge: present fields overwrite, absent fields keep their values.
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
    }
}
