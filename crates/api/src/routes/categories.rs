//! Category routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use fintrack_core::category::{CategoryFilter, CategoryPatch, CategoryPayload, CategoryRecord, CategoryService};
use fintrack_db::CategoryRepository;
use fintrack_shared::CategoryId;
use tracing::info;

use crate::{
    AppState,
    error::ApiResult,
    extractors::{ApiJson, ApiPath, ApiQuery},
    middleware::AuthUser,
};

/// Creates the category routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category)
                .put(replace_category)
                .patch(update_category)
                .delete(delete_category),
        )
}

fn service(state: &AppState) -> CategoryService<CategoryRepository> {
    CategoryService::new(CategoryRepository::new((*state.db).clone()))
}

/// GET /categories
async fn list_categories(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(filter): ApiQuery<CategoryFilter>,
) -> ApiResult<Json<Vec<CategoryRecord>>> {
    let categories = service(&state).list(auth.user_id(), &filter).await?;
    Ok(Json(categories))
}

/// POST /categories
async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<CategoryPayload>,
) -> ApiResult<(StatusCode, Json<CategoryRecord>)> {
    let created = service(&state).create(auth.user_id(), payload).await?;
    info!(user_id = %auth.user_id(), category_id = %created.id, "Category created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /categories/{id}
async fn get_category(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<CategoryId>,
) -> ApiResult<Json<CategoryRecord>> {
    Ok(Json(service(&state).retrieve(auth.user_id(), id).await?))
}

/// PUT /categories/{id}
async fn replace_category(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<CategoryId>,
    ApiJson(payload): ApiJson<CategoryPayload>,
) -> ApiResult<Json<CategoryRecord>> {
    apply(&state, &auth, id, payload.into()).await
}

/// PATCH /categories/{id}
async fn update_category(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<CategoryId>,
    ApiJson(patch): ApiJson<CategoryPatch>,
) -> ApiResult<Json<CategoryRecord>> {
    apply(&state, &auth, id, patch).await
}

async fn apply(
    state: &AppState,
    auth: &AuthUser,
    id: CategoryId,
    changes: CategoryPatch,
) -> ApiResult<Json<CategoryRecord>> {
    let updated = service(state).update(auth.user_id(), id, changes).await?;
    info!(user_id = %auth.user_id(), category_id = %id, "Category updated");
    Ok(Json(updated))
}

/// DELETE /categories/{id}
async fn delete_category(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<CategoryId>,
) -> ApiResult<StatusCode> {
    service(&state).delete(auth.user_id(), id).await?;
    info!(user_id = %auth.user_id(), category_id = %id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}
