//! Stateless field validators for transfers and deposits.
//!
//! Each validator takes the raw input (plus "today" where relevant) and returns
//! either the accepted value or the `DomainError` kind for its field.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use rust_decimal::Decimal;

use moneyflow_core::{DomainError, DomainResult};

/// Inclusive bounds on the transfer amount.
pub const MIN_TRANSFER_AMOUNT: Decimal = Decimal::from_parts(1000, 0, 0, false, 2);
pub const MAX_TRANSFER_AMOUNT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 2);

/// Inclusive bounds on the transfer date year.
pub const MIN_TRANSFER_YEAR: i32 = 2025;
pub const MAX_TRANSFER_YEAR: i32 = 2050;

/// Inclusive bounds on the concept length, in characters.
pub const CONCEPT_LEN: core::ops::RangeInclusive<usize> = 10..=30;

pub const DATE_FORMAT: &str = "%d/%m/%Y";

static CONCEPT_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+( [A-Za-z]+)+$").expect("concept pattern is valid"));

static DATE_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-2][0-9]|3[01])/(0[0-9]|1[0-2])/[0-9]{4}$").expect("date pattern is valid")
});

static DEPOSIT_AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^EUR [0-9]{4}\.[0-9]{2}$").expect("deposit pattern is valid"));

/// Transfer concept: 10–30 characters, at least two alphabetic words separated by
/// single spaces.
pub fn validate_concept(concept: &str) -> DomainResult<&str> {
    if !CONCEPT_LEN.contains(&concept.chars().count()) {
        return Err(DomainError::invalid_concept(format!(
            "{concept:?} must be between {} and {} characters",
            CONCEPT_LEN.start(),
            CONCEPT_LEN.end()
        )));
    }
    if !CONCEPT_WORDS.is_match(concept) {
        return Err(DomainError::invalid_concept(format!(
            "{concept:?} must be at least two words of letters separated by single spaces"
        )));
    }
    Ok(concept)
}

/// Transfer date in `DD/MM/YYYY`, not before `today`, year within
/// [`MIN_TRANSFER_YEAR`, `MAX_TRANSFER_YEAR`].
pub fn validate_transfer_date(raw: &str, today: NaiveDate) -> DomainResult<NaiveDate> {
    if !DATE_SHAPE.is_match(raw) {
        return Err(DomainError::invalid_date(format!("invalid date format {raw:?}")));
    }

    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| DomainError::invalid_date(format!("invalid date format {raw:?}: {e}")))?;

    if date < today {
        return Err(DomainError::invalid_date(format!(
            "transfer date {raw} must be today or later"
        )));
    }

    if !(MIN_TRANSFER_YEAR..=MAX_TRANSFER_YEAR).contains(&date.year()) {
        return Err(DomainError::invalid_date(format!(
            "year of {raw} must be between {MIN_TRANSFER_YEAR} and {MAX_TRANSFER_YEAR}"
        )));
    }

    Ok(date)
}

/// Parse a textual amount without rounding.
pub fn parse_amount(raw: &str) -> DomainResult<Decimal> {
    Decimal::from_str_exact(raw.trim())
        .map_err(|e| DomainError::invalid_amount(format!("{raw:?} is not a decimal amount: {e}")))
}

/// Transfer amount: at most 2 fractional digits, within the inclusive bounds.
pub fn validate_amount(amount: Decimal) -> DomainResult<Decimal> {
    if amount.normalize().scale() > 2 {
        return Err(DomainError::invalid_amount(format!(
            "{amount} has more than 2 decimal places"
        )));
    }
    if amount < MIN_TRANSFER_AMOUNT || amount > MAX_TRANSFER_AMOUNT {
        return Err(DomainError::invalid_amount(format!(
            "{amount} must be between {MIN_TRANSFER_AMOUNT} and {MAX_TRANSFER_AMOUNT}"
        )));
    }
    Ok(amount)
}

/// Deposit amount in the form `EUR DDDD.DD`, strictly positive.
pub fn validate_deposit_amount(raw: &str) -> DomainResult<Decimal> {
    if !DEPOSIT_AMOUNT.is_match(raw) {
        return Err(DomainError::invalid_deposit_amount(format!(
            "{raw:?} must look like \"EUR 0000.00\""
        )));
    }

    let value = Decimal::from_str_exact(&raw[4..])
        .map_err(|e| DomainError::invalid_deposit_amount(format!("{raw:?}: {e}")))?;

    if value <= Decimal::ZERO {
        return Err(DomainError::invalid_deposit_amount(
            "deposit must be greater than 0",
        ));
    }
    Ok(value)
}
