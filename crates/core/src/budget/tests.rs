//! Service tests for budgets.

use fintrack_shared::{NON_FIELD_ERRORS, UserId};
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::error::FinanceError;
use crate::testing::MemoryStore;

fn payload(year: i32, month: i32, amount: Decimal) -> BudgetPayload {
    BudgetPayload {
        year,
        month,
        amount,
    }
}

#[tokio::test]
async fn test_create_and_list_newest_first() {
    let service = BudgetService::new(MemoryStore::new());
    let alice = UserId::new();
    service.create(alice, payload(2023, 12, dec!(100))).await.unwrap();
    service.create(alice, payload(2024, 2, dec!(300))).await.unwrap();
    service.create(alice, payload(2024, 1, dec!(200))).await.unwrap();

    let periods: Vec<_> = service
        .list(alice, &BudgetFilter::default())
        .await
        .unwrap()
        .into_iter()
        .map(|b| (b.year, b.month))
        .collect();
    assert_eq!(periods, [(2024, 2), (2024, 1), (2023, 12)]);

    let january = service
        .list(
            alice,
            &BudgetFilter {
                year: Some(2024),
                month: Some(1),
            },
        )
        .await
        .unwrap();
    assert_eq!(january.len(), 1);
    assert_eq!(january[0].amount.to_string(), "200.00");
}

#[tokio::test]
async fn test_duplicate_period_is_rejected_on_create() {
    let service = BudgetService::new(MemoryStore::new());
    let alice = UserId::new();
    let first = service.create(alice, payload(2024, 1, dec!(500))).await.unwrap();

    let err = service
        .create(alice, payload(2024, 1, dec!(600)))
        .await
        .unwrap_err();
    match err {
        FinanceError::Validation(errors) => assert_eq!(
            errors.get(NON_FIELD_ERRORS).unwrap()[0],
            "Budget for 2024-01 already exists. Please update the existing budget instead."
        ),
        other => panic!("expected validation error, got {other:?}"),
    }

    // Updating the existing budget for the same period succeeds.
    let updated = service
        .update(alice, first.id, payload(2024, 1, dec!(650)).into())
        .await
        .unwrap();
    assert_eq!(updated.amount, dec!(650));

    // Another user may budget the same period.
    service
        .create(UserId::new(), payload(2024, 1, dec!(10)))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_update_onto_taken_period_is_a_conflict() {
    let service = BudgetService::new(MemoryStore::new());
    let alice = UserId::new();
    service.create(alice, payload(2024, 1, dec!(1))).await.unwrap();
    let feb = service.create(alice, payload(2024, 2, dec!(1))).await.unwrap();

    let err = service
        .update(
            alice,
            feb.id,
            BudgetPatch {
                month: Some(1),
                ..BudgetPatch::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, FinanceError::Conflict(_)));
}

#[rstest]
#[case(0)]
#[case(13)]
#[case(-1)]
#[tokio::test]
async fn test_month_out_of_range_is_rejected(#[case] month: i32) {
    let service = BudgetService::new(MemoryStore::new());
    let err = service
        .create(UserId::new(), payload(2024, month, dec!(1)))
        .await
        .unwrap_err();
    match err {
        FinanceError::Validation(errors) => assert!(errors.get("month").is_some()),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_other_users_budget_reads_as_not_found() {
    let service = BudgetService::new(MemoryStore::new());
    let alice = UserId::new();
    let bob = UserId::new();
    let budget = service.create(alice, payload(2024, 5, dec!(80))).await.unwrap();

    assert!(matches!(
        service.retrieve(bob, budget.id).await,
        Err(FinanceError::NotFound { .. })
    ));
    assert!(matches!(
        service.update(bob, budget.id, BudgetPatch::default()).await,
        Err(FinanceError::NotFound { .. })
    ));
    assert!(matches!(
        service.delete(bob, budget.id).await,
        Err(FinanceError::NotFound { .. })
    ));
    assert_eq!(service.retrieve(alice, budget.id).await.unwrap().amount, dec!(80));

    service.delete(alice, budget.id).await.unwrap();
    assert!(service.list(alice, &BudgetFilter::default()).await.unwrap().is_empty());
}
