use models::{NewProduct, Product, ProductPatch};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::{errors::ServiceError, seed};

/// Records in insertion order plus the highest id ever issued.
/// Both live under one lock so allocate-and-append is a single critical section.
#[derive(Debug, Default)]
struct Catalog {
    products: Vec<Product>,
    last_id: u64,
}

impl Catalog {
    fn position(&self, id: u64) -> Option<usize> {
        self.products.iter().position(|p| p.id == id)
    }

    fn push(&mut self, input: NewProduct) -> Product {
        self.last_id += 1;
        let product = Product::from_new(self.last_id, input);
        self.products.push(product.clone());
        product
    }
}

/// 内存商品存储：进程内唯一实例，由调用方包进 `Arc` 在请求处理器之间共享
#[derive(Debug, Default)]
pub struct ProductStore {
    inner: RwLock<Catalog>,
}

impl ProductStore {
    /// Empty store; the first created product gets id 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with `products`, assigned ids 1..=n in order.
    pub fn with_seed(products: Vec<NewProduct>) -> Self {
        let mut catalog = Catalog::default();
        for input in products {
            catalog.push(input);
        }
        Self { inner: RwLock::new(catalog) }
    }

    /// Store preloaded with the default starter catalog.
    pub fn seeded() -> Self {
        Self::with_seed(seed::default_products())
    }

    /// 列出全部商品（按插入顺序，返回副本）
    pub async fn list(&self) -> Vec<Product> {
        let catalog = self.inner.read().await;
        catalog.products.clone()
    }

    /// 根据 id 获取
    pub async fn get(&self, id: u64) -> Result<Product, ServiceError> {
        let catalog = self.inner.read().await;
        catalog
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    /// 创建商品；id 单调递增，删除后不回收
    pub async fn create(&self, input: NewProduct) -> Product {
        let mut catalog = self.inner.write().await;
        let product = catalog.push(input);
        info!(id = product.id, name = %product.name, "product created");
        product
    }

    /// Merge `patch` into the product with `id` and return its full post-merge state.
    /// Nothing is touched when the id is unknown.
    pub async fn update(&self, id: u64, patch: ProductPatch) -> Result<Product, ServiceError> {
        let mut catalog = self.inner.write().await;
        let idx = catalog.position(id).ok_or_else(|| not_found(id))?;
        let product = &mut catalog.products[idx];
        product.apply(patch);
        info!(id, "product updated");
        Ok(product.clone())
    }

    /// Remove the product with `id`, returning the removed record.
    pub async fn delete(&self, id: u64) -> Result<Product, ServiceError> {
        let mut catalog = self.inner.write().await;
        let idx = catalog.position(id).ok_or_else(|| not_found(id))?;
        let removed = catalog.products.remove(idx);
        info!(id, "product deleted");
        Ok(removed)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.products.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.products.is_empty()
    }
}

fn not_found(id: u64) -> ServiceError {
    warn!(id, "product not found");
    ServiceError::not_found(id)
}
