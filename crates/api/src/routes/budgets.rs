//! Budget routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use fintrack_core::budget::{BudgetFilter, BudgetPatch, BudgetPayload, BudgetRecord, BudgetService};
use fintrack_db::BudgetRepository;
use fintrack_shared::BudgetId;
use tracing::info;

use crate::{
    AppState,
    error::ApiResult,
    extractors::{ApiJson, ApiPath, ApiQuery},
    middleware::AuthUser,
};

/// Creates the budget routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budgets", get(list_budgets).post(create_budget))
        .route(
            "/budgets/{id}",
            get(get_budget)
                .put(replace_budget)
                .patch(update_budget)
                .delete(delete_budget),
        )
}

fn service(state: &AppState) -> BudgetService<BudgetRepository> {
    BudgetService::new(BudgetRepository::new((*state.db).clone()))
}

/// GET /budgets
async fn list_budgets(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(filter): ApiQuery<BudgetFilter>,
) -> ApiResult<Json<Vec<BudgetRecord>>> {
    Ok(Json(service(&state).list(auth.user_id(), &filter).await?))
}

/// POST /budgets
async fn create_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<BudgetPayload>,
) -> ApiResult<(StatusCode, Json<BudgetRecord>)> {
    let created = service(&state).create(auth.user_id(), payload).await?;
    info!(
        user_id = %auth.user_id(),
        budget_id = %created.id,
        year = created.year,
        month = created.month,
        "Budget created"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /budgets/{id}
async fn get_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<BudgetId>,
) -> ApiResult<Json<BudgetRecord>> {
    Ok(Json(service(&state).retrieve(auth.user_id(), id).await?))
}

/// PUT /budgets/{id}
async fn replace_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<BudgetId>,
    ApiJson(payload): ApiJson<BudgetPayload>,
) -> ApiResult<Json<BudgetRecord>> {
    apply(&state, &auth, id, payload.into()).await
}

/// PATCH /budgets/{id}
async fn update_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<BudgetId>,
    ApiJson(patch): ApiJson<BudgetPatch>,
) -> ApiResult<Json<BudgetRecord>> {
    apply(&state, &auth, id, patch).await
}

async fn apply(
    state: &AppState,
    auth: &AuthUser,
    id: BudgetId,
    changes: BudgetPatch,
) -> ApiResult<Json<BudgetRecord>> {
    let updated = service(state).update(auth.user_id(), id, changes).await?;
    info!(user_id = %auth.user_id(), budget_id = %id, "Budget updated");
    Ok(Json(updated))
}

/// DELETE /budgets/{id}
async fn delete_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<BudgetId>,
) -> ApiResult<StatusCode> {
    service(&state).delete(auth.user_id(), id).await?;
    info!(user_id = %auth.user_id(), budget_id = %id, "Budget deleted");
    Ok(StatusCode::NO_CONTENT)
}
