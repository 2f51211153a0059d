//! Transaction routes, including the summary report.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use fintrack_core::transaction::{
    Summary, TransactionPatch, TransactionPayload, TransactionQuery, TransactionRecord,
    SummaryPeriod, TransactionService, YearMonthError,
};
use fintrack_db::{CategoryRepository, TransactionRepository};
use fintrack_shared::TransactionId;
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    AppState,
    error::ApiResult,
    extractors::{ApiJson, ApiPath, ApiQuery},
    middleware::AuthUser,
};

/// Creates the transaction routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route("/transactions/summary", get(summary))
        .route(
            "/transactions/{id}",
            get(get_transaction)
                .put(replace_transaction)
                .patch(update_transaction)
                .delete(delete_transaction),
        )
}

fn service(state: &AppState) -> TransactionService<TransactionRepository, CategoryRepository> {
    let db = (*state.db).clone();
    TransactionService::new(
        TransactionRepository::new(db.clone()),
        CategoryRepository::new(db),
    )
}

/// Query parameters for the summary endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    /// Month as `YYYY-MM`.
    pub month: Option<String>,
}

impl SummaryQuery {
    /// The period to summarize.
    ///
    /// A numeric month that is not on the calendar, such as `2024-13`,
    /// selects nothing. Any other unparsable value is ignored and the summary
    /// covers all transactions.
    fn period(&self) -> SummaryPeriod {
        let Some(raw) = self.month.as_deref().filter(|m| !m.is_empty()) else {
            return SummaryPeriod::AllTime;
        };
        match raw.parse() {
            Ok(month) => SummaryPeriod::Month(month),
            Err(YearMonthError::OutOfRange(_)) => SummaryPeriod::OffCalendar,
            Err(e) => {
                warn!(month = raw, error = %e, "ignoring malformed summary month");
                SummaryPeriod::AllTime
            }
        }
    }
}

/// GET /transactions
async fn list_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<TransactionQuery>,
) -> ApiResult<Json<Vec<TransactionRecord>>> {
    let (filter, ordering) = query.into_parts();
    let rows = service(&state)
        .list(auth.user_id(), &filter, ordering)
        .await?;
    Ok(Json(rows))
}

/// POST /transactions
async fn create_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<TransactionPayload>,
) -> ApiResult<(StatusCode, Json<TransactionRecord>)> {
    let created = service(&state).create(auth.user_id(), payload).await?;
    info!(
        user_id = %auth.user_id(),
        transaction_id = %created.id,
        category_id = %created.category,
        amount = %created.amount,
        "Transaction created"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /transactions/summary
async fn summary(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<SummaryQuery>,
) -> ApiResult<Json<Summary>> {
    let summary = service(&state)
        .summary(auth.user_id(), query.period())
        .await?;
    Ok(Json(summary))
}

/// GET /transactions/{id}
async fn get_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<TransactionId>,
) -> ApiResult<Json<TransactionRecord>> {
    Ok(Json(service(&state).retrieve(auth.user_id(), id).await?))
}

/// PUT /transactions/{id}
async fn replace_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<TransactionId>,
    ApiJson(payload): ApiJson<TransactionPayload>,
) -> ApiResult<Json<TransactionRecord>> {
    apply(&state, &auth, id, payload.into()).await
}

/// PATCH /transactions/{id}
async fn update_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<TransactionId>,
    ApiJson(patch): ApiJson<TransactionPatch>,
) -> ApiResult<Json<TransactionRecord>> {
    apply(&state, &auth, id, patch).await
}

async fn apply(
    state: &AppState,
    auth: &AuthUser,
    id: TransactionId,
    changes: TransactionPatch,
) -> ApiResult<Json<TransactionRecord>> {
    let updated = service(state).update(auth.user_id(), id, changes).await?;
    info!(user_id = %auth.user_id(), transaction_id = %id, "Transaction updated");
    Ok(Json(updated))
}

/// DELETE /transactions/{id}
async fn delete_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<TransactionId>,
) -> ApiResult<StatusCode> {
    service(&state).delete(auth.user_id(), id).await?;
    info!(user_id = %auth.user_id(), transaction_id = %id, "Transaction deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(month: &str) -> SummaryQuery {
        SummaryQuery {
            month: Some(month.to_string()),
        }
    }

    #[test]
    fn test_summary_month_parses_calendar_months() {
        let january = "2024-01".parse().unwrap();
        assert_eq!(query("2024-01").period(), SummaryPeriod::Month(january));
    }

    #[test]
    fn test_summary_month_off_calendar_selects_nothing() {
        assert_eq!(query("2024-13").period(), SummaryPeriod::OffCalendar);
        assert_eq!(query("2024-00").period(), SummaryPeriod::OffCalendar);
    }

    #[test]
    fn test_summary_month_ignores_malformed_values() {
        assert_eq!(query("January").period(), SummaryPeriod::AllTime);
        assert_eq!(query("2024-xx").period(), SummaryPeriod::AllTime);
        assert_eq!(query("").period(), SummaryPeriod::AllTime);
        assert_eq!(SummaryQuery::default().period(), SummaryPeriod::AllTime);
    }
}
