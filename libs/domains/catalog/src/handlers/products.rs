use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    IdPath, JsonBody, QueryParams,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse, UnsupportedMediaTypeResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::context::{ProductAction, RequestContext};
use crate::entity::product;
use crate::error::CatalogResult;
use crate::models::{CreateProduct, ProductFilter, ProductView, UpdateProduct};
use crate::repository::{CategoryRepository, ProductRepository};
use crate::service::ProductService;

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        retrieve_product,
        update_product,
        partial_update_product,
        destroy_product,
    ),
    components(
        schemas(ProductView, CreateProduct, UpdateProduct, ProductFilter),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            UnsupportedMediaTypeResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = product::Model::TAG, description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the product router with all HTTP endpoints
pub fn router<P, C>(service: ProductService<P, C>) -> Router
where
    P: ProductRepository + 'static,
    C: CategoryRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(retrieve_product)
                .put(update_product)
                .patch(partial_update_product)
                .delete(destroy_product),
        )
        .with_state(shared_service)
}

#[utoipa::path(
    get,
    path = "",
    tag = product::Model::TAG,
    summary = "List all products",
    description = "Returns a list of all products. Supports filtering by category title using `?category=Apparel`.",
    params(ProductFilter),
    responses(
        (status = 200, description = "Products, newest first", body = Vec<ProductView>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<P: ProductRepository, C: CategoryRepository>(
    State(service): State<Arc<ProductService<P, C>>>,
    QueryParams(filter): QueryParams<ProductFilter>,
) -> CatalogResult<Json<Vec<ProductView>>> {
    let ctx = RequestContext::new(ProductAction::List);
    let products = service.list_products(&ctx, filter).await?;
    Ok(Json(products.into_iter().map(ProductView::from).collect()))
}

#[utoipa::path(
    post,
    path = "",
    tag = product::Model::TAG,
    summary = "Create a new product",
    description = "Creates a new product. Requires all product fields, including category id.",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = ProductView),
        (status = 400, response = BadRequestValidationResponse),
        (status = 415, response = UnsupportedMediaTypeResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<P: ProductRepository, C: CategoryRepository>(
    State(service): State<Arc<ProductService<P, C>>>,
    JsonBody(input): JsonBody<CreateProduct>,
) -> CatalogResult<impl IntoResponse> {
    let ctx = RequestContext::new(ProductAction::Create);
    let product = service.create_product(&ctx, input).await?;
    Ok((StatusCode::CREATED, Json(ProductView::from(product))))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = product::Model::TAG,
    summary = "Retrieve a single product",
    description = "Returns detailed information about a product by its ID.",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductView),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn retrieve_product<P: ProductRepository, C: CategoryRepository>(
    State(service): State<Arc<ProductService<P, C>>>,
    IdPath(id): IdPath,
) -> CatalogResult<Json<ProductView>> {
    let ctx = RequestContext::new(ProductAction::Retrieve);
    let product = service.get_product(&ctx, id).await?;
    Ok(Json(product.into()))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = product::Model::TAG,
    summary = "Replace a product",
    description = "Replaces every field of an existing product. Requires the same body as create.",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = CreateProduct,
    responses(
        (status = 200, description = "Product updated", body = ProductView),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<P: ProductRepository, C: CategoryRepository>(
    State(service): State<Arc<ProductService<P, C>>>,
    IdPath(id): IdPath,
    JsonBody(input): JsonBody<CreateProduct>,
) -> CatalogResult<Json<ProductView>> {
    let ctx = RequestContext::new(ProductAction::Update);
    let product = service.update_product(&ctx, id, input).await?;
    Ok(Json(product.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = product::Model::TAG,
    summary = "Partially update a product",
    description = "Updates only the supplied fields. Supplied fields follow the same rules as create.",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = ProductView),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn partial_update_product<P: ProductRepository, C: CategoryRepository>(
    State(service): State<Arc<ProductService<P, C>>>,
    IdPath(id): IdPath,
    JsonBody(input): JsonBody<UpdateProduct>,
) -> CatalogResult<Json<ProductView>> {
    let ctx = RequestContext::new(ProductAction::PartialUpdate);
    let product = service.patch_product(&ctx, id, input).await?;
    Ok(Json(product.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = product::Model::TAG,
    summary = "Delete a product",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn destroy_product<P: ProductRepository, C: CategoryRepository>(
    State(service): State<Arc<ProductService<P, C>>>,
    IdPath(id): IdPath,
) -> CatalogResult<StatusCode> {
    let ctx = RequestContext::new(ProductAction::Destroy);
    service.delete_product(&ctx, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
