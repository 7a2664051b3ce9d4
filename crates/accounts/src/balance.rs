//! Balance snapshots computed from the transaction log.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use moneyflow_core::{Clock, DomainError, DomainResult, epoch_seconds};

use crate::iban::Iban;

/// One entry of the transaction log. Extra keys in the log are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "IBAN")]
    pub iban: String,
    /// Signed amount; accepted as a JSON string or number.
    pub amount: Decimal,
}

/// Point-in-time balance of one account, as stored in the balances store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    #[serde(rename = "IBAN")]
    iban: Iban,
    /// UTC epoch seconds at computation.
    time: f64,
    #[serde(rename = "BALANCE", with = "rust_decimal::serde::float")]
    balance: Decimal,
}

impl BalanceSnapshot {
    /// Sum every log entry for `iban` and stamp the result with the clock.
    pub fn compute(
        iban: &Iban,
        transactions: &[Transaction],
        clock: &dyn Clock,
    ) -> DomainResult<Self> {
        Ok(Self {
            iban: iban.clone(),
            time: epoch_seconds(clock.now()),
            balance: sum_for_iban(transactions, iban)?,
        })
    }

    pub fn iban(&self) -> &Iban {
        &self.iban
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }
}

/// Sum of all amounts booked against `iban`; `IbanNotFound` when there are none.
///
/// A sum that leaves the `Decimal` range means the log cannot be trusted and is
/// reported as `StoreCorrupt`.
pub fn sum_for_iban(transactions: &[Transaction], iban: &Iban) -> DomainResult<Decimal> {
    let mut matched = transactions
        .iter()
        .filter(|t| t.iban == iban.as_str())
        .map(|t| t.amount)
        .peekable();

    if matched.peek().is_none() {
        return Err(DomainError::iban_not_found(iban.as_str()));
    }
    matched.try_fold(Decimal::ZERO, |acc, amount| {
        acc.checked_add(amount).ok_or_else(|| {
            DomainError::store_corrupt(format!("balance of {iban} overflows"))
        })
    })
}
