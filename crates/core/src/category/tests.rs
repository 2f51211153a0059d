//! Service tests for categories.

use fintrack_shared::{CategoryId, NON_FIELD_ERRORS, UserId};
use rust_decimal_macros::dec;

use super::*;
use crate::error::FinanceError;
use crate::repository::TransactionStore;
use crate::testing::MemoryStore;
use crate::transaction::NewTransaction;

fn payload(name: &str, category_type: CategoryType) -> CategoryPayload {
    CategoryPayload {
        name: name.to_string(),
        category_type,
    }
}

#[tokio::test]
async fn test_create_assigns_caller_as_owner() {
    let store = MemoryStore::new();
    let service = CategoryService::new(store.clone());
    let alice = UserId::new();

    let created = service
        .create(alice, payload("  Food ", CategoryType::Expense))
        .await
        .unwrap();
    assert_eq!(created.name, "Food");
    assert_eq!(created.category_type, CategoryType::Expense);

    let listed = service.list(alice, &CategoryFilter::default()).await.unwrap();
    assert_eq!(listed, vec![created]);
    assert!(
        service
            .list(UserId::new(), &CategoryFilter::default())
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_create_rejects_blank_name() {
    let service = CategoryService::new(MemoryStore::new());
    let err = service
        .create(UserId::new(), payload("   ", CategoryType::Income))
        .await
        .unwrap_err();
    match err {
        FinanceError::Validation(errors) => assert!(errors.get("name").is_some()),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_duplicate_name_and_type_is_rejected() {
    let service = CategoryService::new(MemoryStore::new());
    let alice = UserId::new();
    service
        .create(alice, payload("Salary", CategoryType::Income))
        .await
        .unwrap();

    let err = service
        .create(alice, payload("Salary", CategoryType::Income))
        .await
        .unwrap_err();
    match err {
        FinanceError::Validation(errors) => assert_eq!(
            errors.get(NON_FIELD_ERRORS).unwrap()[0],
            "A income category named \"Salary\" already exists."
        ),
        other => panic!("expected validation error, got {other:?}"),
    }

    // Same name with the other type, or for another user, is fine.
    service
        .create(alice, payload("Salary", CategoryType::Expense))
        .await
        .unwrap();
    service
        .create(UserId::new(), payload("Salary", CategoryType::Income))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_list_filters_by_type_and_sorts_by_name() {
    let service = CategoryService::new(MemoryStore::new());
    let alice = UserId::new();
    for (name, kind) in [
        ("Rent", CategoryType::Expense),
        ("Bonus", CategoryType::Income),
        ("Food", CategoryType::Expense),
    ] {
        service.create(alice, payload(name, kind)).await.unwrap();
    }

    let expenses = service
        .list(
            alice,
            &CategoryFilter {
                category_type: Some(CategoryType::Expense),
            },
        )
        .await
        .unwrap();
    let names: Vec<_> = expenses.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Food", "Rent"]);
}

#[tokio::test]
async fn test_other_users_category_reads_as_not_found() {
    let service = CategoryService::new(MemoryStore::new());
    let alice = UserId::new();
    let bob = UserId::new();
    let created = service
        .create(alice, payload("Food", CategoryType::Expense))
        .await
        .unwrap();

    assert!(matches!(
        service.retrieve(bob, created.id).await,
        Err(FinanceError::NotFound { .. })
    ));
    assert!(matches!(
        service
            .update(bob, created.id, payload("Mine", CategoryType::Income).into())
            .await,
        Err(FinanceError::NotFound { .. })
    ));
    assert!(matches!(
        service.delete(bob, created.id).await,
        Err(FinanceError::NotFound { .. })
    ));
    assert!(matches!(
        service.retrieve(alice, CategoryId::new()).await,
        Err(FinanceError::NotFound { .. })
    ));

    let unchanged = service.retrieve(alice, created.id).await.unwrap();
    assert_eq!(unchanged.name, "Food");
    assert_eq!(unchanged.category_type, CategoryType::Expense);
}

#[tokio::test]
async fn test_patch_keeps_unspecified_fields() {
    let service = CategoryService::new(MemoryStore::new());
    let alice = UserId::new();
    let created = service
        .create(alice, payload("Food", CategoryType::Expense))
        .await
        .unwrap();

    let updated = service
        .update(
            alice,
            created.id,
            CategoryPatch {
                name: Some("Groceries".to_string()),
                category_type: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Groceries");
    assert_eq!(updated.category_type, CategoryType::Expense);

    // Renaming to its own current name does not clash with itself.
    service
        .update(alice, created.id, payload("Groceries", CategoryType::Expense).into())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_referenced_category_is_a_conflict() {
    let store = MemoryStore::new();
    let service = CategoryService::new(store.clone());
    let alice = UserId::new();
    let food = service
        .create(alice, payload("Food", CategoryType::Expense))
        .await
        .unwrap();
    let spare = service
        .create(alice, payload("Spare", CategoryType::Expense))
        .await
        .unwrap();

    TransactionStore::insert(
        &store,
        NewTransaction {
            user_id: alice,
            category_id: food.id,
            amount: dec!(12.00),
            date: chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            description: String::new(),
        },
    )
    .await
    .unwrap();

    let err = service.delete(alice, food.id).await.unwrap_err();
    match err {
        FinanceError::Conflict(message) => assert_eq!(
            message,
            "Cannot delete category \"Food\" because it is referenced by existing transactions."
        ),
        other => panic!("expected conflict, got {other:?}"),
    }

    service.delete(alice, spare.id).await.unwrap();
    assert!(matches!(
        service.retrieve(alice, spare.id).await,
        Err(FinanceError::NotFound { .. })
    ));
}
