//! Domain error model.

use thiserror::Error;

/// Result type used across the workspace.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// A closed set of failure kinds: one per field validator, plus the store and
/// lifecycle failures. Every variant carries a human-readable reason. All of them
/// abort the current operation; nothing is retried or downgraded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// IBAN does not match `ES` followed by 22 digits.
    #[error("invalid IBAN format: {0}")]
    InvalidFormat(String),

    /// IBAN control digits do not match the mod-97 computation.
    #[error("invalid IBAN control digit: declared {declared:02}, expected {expected:02}")]
    InvalidChecksum { declared: u32, expected: u32 },

    #[error("invalid concept format: {0}")]
    InvalidConcept(String),

    #[error("invalid transfer type: {0}")]
    InvalidType(String),

    #[error("invalid transfer date: {0}")]
    InvalidDate(String),

    #[error("invalid transfer amount: {0}")]
    InvalidAmount(String),

    #[error("invalid deposit amount: {0}")]
    InvalidDepositAmount(String),

    /// A store that must pre-exist is missing (or its directory is).
    #[error("store not found: {0}")]
    StoreNotFound(String),

    /// A store file exists but does not decode as an array of records.
    #[error("store corrupt: {0}")]
    StoreCorrupt(String),

    /// Any other read/write failure on a store file.
    #[error("store I/O error: {0}")]
    StoreIo(String),

    /// An identical field tuple is already stored.
    #[error("duplicated transfer in transfer list: {0}")]
    DuplicateRequest(String),

    #[error("IBAN not found: {0}")]
    IbanNotFound(String),

    /// The external deposit submission is missing, malformed or lacks keys.
    #[error("invalid deposit input: {0}")]
    DepositInputInvalid(String),
}

impl DomainError {
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        Self::InvalidFormat(msg.into())
    }

    pub fn invalid_concept(msg: impl Into<String>) -> Self {
        Self::InvalidConcept(msg.into())
    }

    pub fn invalid_type(msg: impl Into<String>) -> Self {
        Self::InvalidType(msg.into())
    }

    pub fn invalid_date(msg: impl Into<String>) -> Self {
        Self::InvalidDate(msg.into())
    }

    pub fn invalid_amount(msg: impl Into<String>) -> Self {
        Self::InvalidAmount(msg.into())
    }

    pub fn invalid_deposit_amount(msg: impl Into<String>) -> Self {
        Self::InvalidDepositAmount(msg.into())
    }

    pub fn store_not_found(msg: impl Into<String>) -> Self {
        Self::StoreNotFound(msg.into())
    }

    pub fn store_corrupt(msg: impl Into<String>) -> Self {
        Self::StoreCorrupt(msg.into())
    }

    pub fn store_io(msg: impl Into<String>) -> Self {
        Self::StoreIo(msg.into())
    }

    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::DuplicateRequest(msg.into())
    }

    pub fn iban_not_found(msg: impl Into<String>) -> Self {
        Self::IbanNotFound(msg.into())
    }

    pub fn deposit_input(msg: impl Into<String>) -> Self {
        Self::DepositInputInvalid(msg.into())
    }

    /// True for the per-field validation kinds (as opposed to store/lifecycle ones).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidFormat(_)
                | Self::InvalidChecksum { .. }
                | Self::InvalidConcept(_)
                | Self::InvalidType(_)
                | Self::InvalidDate(_)
                | Self::InvalidAmount(_)
                | Self::InvalidDepositAmount(_)
        )
    }
}
