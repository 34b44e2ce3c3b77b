use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MessageResponse { pub message: String }

#[derive(ToSchema)]
pub struct ProductDoc { pub id: u64, pub name: String, pub price: f64, pub stock: u32 }

#[derive(ToSchema)]
pub struct NewProductDoc { pub name: String, pub price: f64, pub stock: u32 }

/// Every field optional; omitted fields keep their current value.
#[derive(ToSchema)]
pub struct ProductPatchDoc {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<u32>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::products::list,
        crate::routes::products::create,
        crate::routes::products::get,
        crate::routes::products::update,
        crate::routes::products::patch,
        crate::routes::products::delete,
    ),
    components(
        schemas(
            HealthResponse,
            MessageResponse,
            ProductDoc,
            NewProductDoc,
            ProductPatchDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "products")
    )
)]
pub struct ApiDoc;
