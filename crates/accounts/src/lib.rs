//! Accounts domain: IBAN validation, transfer requests, deposits and balances.
//!
//! Pure domain logic only: no IO, no persistence concerns. Stores and the
//! service facade live in `moneyflow-infra`.

pub mod balance;
pub mod deposit;
pub mod iban;
pub mod transfer;
pub mod validation;

pub use balance::{BalanceSnapshot, Transaction, sum_for_iban};
pub use deposit::{AccountDeposit, DepositInput};
pub use iban::{Iban, check_digits_for, validate_iban};
pub use transfer::{TransferRequest, TransferRequestBuilder, TransferType};
pub use validation::{
    parse_amount, validate_amount, validate_concept, validate_deposit_amount,
    validate_transfer_date,
};
