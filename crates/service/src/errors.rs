use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("product {0} not found")]
    NotFound(u64),
}

impl ServiceError {
    pub fn not_found(id: u64) -> Self { Self::NotFound(id) }
}
