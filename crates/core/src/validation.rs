//! Field-level validation rules shared by the representation layer.

use fintrack_shared::FieldErrors;
use rust_decimal::Decimal;

/// Maximum number of digits stored for an amount.
pub const AMOUNT_MAX_DIGITS: u32 = 12;

/// Maximum number of decimal places stored for an amount.
pub const AMOUNT_DECIMAL_PLACES: u32 = 2;

/// Maximum length of a category name.
pub const CATEGORY_NAME_MAX_LEN: usize = 100;

/// Checks that `amount` fits a `NUMERIC(12, 2)` column.
pub fn check_amount(errors: &mut FieldErrors, field: &str, amount: Decimal) {
    let normalized = amount.normalize();
    if normalized.scale() > AMOUNT_DECIMAL_PLACES {
        errors.add(
            field,
            format!("Ensure that there are no more than {AMOUNT_DECIMAL_PLACES} decimal places."),
        );
        return;
    }

    let whole_digits = AMOUNT_MAX_DIGITS - AMOUNT_DECIMAL_PLACES;
    let limit = Decimal::from(10_i64.pow(whole_digits));
    if normalized.abs() >= limit {
        errors.add(
            field,
            format!("Ensure that there are no more than {AMOUNT_MAX_DIGITS} digits in total."),
        );
    }
}

/// Returns `amount` with exactly two decimal places, as it is stored.
#[must_use]
pub fn with_cents(amount: Decimal) -> Decimal {
    let mut scaled = amount.round_dp(AMOUNT_DECIMAL_PLACES);
    scaled.rescale(AMOUNT_DECIMAL_PLACES);
    scaled
}

/// Checks a required, length-limited text field and returns it trimmed.
pub fn check_text(errors: &mut FieldErrors, field: &str, value: &str, max_len: usize) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, "This field may not be blank.");
    } else if trimmed.chars().count() > max_len {
        errors.add(
            field,
            format!("Ensure this field has no more than {max_len} characters."),
        );
    }
    trimmed.to_string()
}

/// Checks that `month` is a calendar month number.
pub fn check_month(errors: &mut FieldErrors, field: &str, month: i32) {
    if !(1..=12).contains(&month) {
        errors.add(field, "Ensure this value is between 1 and 12.");
    }
}
