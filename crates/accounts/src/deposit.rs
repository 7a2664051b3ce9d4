//! Account deposits submitted as single-record JSON files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, error::Category};

use moneyflow_core::{Clock, DepositSignature, DomainError, DomainResult, Entity, epoch_seconds};

use crate::iban::{Iban, validate_iban};
use crate::validation::validate_deposit_amount;

const SIGNATURE_ALG: &str = "SHA-256";
const DEPOSIT_TYP: &str = "DEPOSIT";

/// External deposit submission: `{"IBAN": "...", "AMOUNT": "EUR DDDD.DD"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositInput {
    #[serde(rename = "IBAN")]
    pub iban: String,
    #[serde(rename = "AMOUNT")]
    pub amount: String,
}

impl DepositInput {
    /// Decode a submission. Syntax errors and missing/mistyped keys are reported
    /// with distinct reasons.
    pub fn from_json(raw: &str) -> DomainResult<Self> {
        serde_json::from_str(raw).map_err(|e| match e.classify() {
            Category::Data => DomainError::deposit_input(format!("invalid key in JSON: {e}")),
            Category::Syntax | Category::Eof | Category::Io => {
                DomainError::deposit_input(format!("wrong JSON format: {e}"))
            }
        })
    }
}

/// A deposit into an account, as stored in the deposits store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountDeposit {
    alg: String,
    typ: String,
    to_iban: Iban,
    #[serde(with = "rust_decimal::serde::float")]
    deposit_amount: Decimal,
    /// UTC epoch seconds at construction.
    deposit_date: f64,
    deposit_signature: DepositSignature,
}

impl AccountDeposit {
    /// Build a deposit from already validated parts.
    pub fn new(to_iban: Iban, deposit_amount: Decimal, clock: &dyn Clock) -> Self {
        let deposit_date = epoch_seconds(clock.now());
        let deposit_signature =
            DepositSignature::derive(&canonical_form(&to_iban, deposit_amount, deposit_date));
        Self {
            alg: SIGNATURE_ALG.to_string(),
            typ: DEPOSIT_TYP.to_string(),
            to_iban,
            deposit_amount,
            deposit_date,
            deposit_signature,
        }
    }

    /// Validate a submission (IBAN first, then amount) and build the deposit.
    pub fn from_input(input: &DepositInput, clock: &dyn Clock) -> DomainResult<Self> {
        let iban = validate_iban(&input.iban)?;
        let amount = validate_deposit_amount(&input.amount)?;
        Ok(Self::new(iban, amount, clock))
    }

    pub fn to_iban(&self) -> &Iban {
        &self.to_iban
    }

    pub fn deposit_amount(&self) -> Decimal {
        self.deposit_amount
    }

    pub fn deposit_date(&self) -> f64 {
        self.deposit_date
    }

    pub fn deposit_signature(&self) -> &DepositSignature {
        &self.deposit_signature
    }

    pub fn verify_signature(&self) -> bool {
        DepositSignature::derive(&canonical_form(
            &self.to_iban,
            self.deposit_amount,
            self.deposit_date,
        )) == self.deposit_signature
    }
}

impl Entity for AccountDeposit {
    type Id = DepositSignature;

    const KIND: &'static str = "deposit";

    fn id(&self) -> &Self::Id {
        &self.deposit_signature
    }
}

fn canonical_form(to_iban: &Iban, amount: Decimal, deposit_date: f64) -> String {
    json!({
        "alg": SIGNATURE_ALG,
        "typ": DEPOSIT_TYP,
        "iban": to_iban.as_str(),
        "amount": amount.normalize().to_string(),
        "deposit_date": deposit_date,
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use moneyflow_core::FixedClock;

    const IBAN: &str = "ES9121000418450200051332";

    fn clock() -> FixedClock {
        FixedClock::at_date(2026, 10, 16).unwrap()
    }

    fn input(amount: &str) -> DepositInput {
        DepositInput {
            iban: IBAN.to_string(),
            amount: amount.to_string(),
        }
    }

    #[test]
    fn valid_submission_builds_signed_deposit() {
        let deposit = AccountDeposit::from_input(&input("EUR 0250.00"), &clock()).unwrap();
        assert_eq!(deposit.to_iban().as_str(), IBAN);
        assert_eq!(deposit.deposit_amount(), Decimal::new(250, 0));
        assert!(deposit.verify_signature());
        assert_eq!(deposit.id().as_str().len(), 64);
    }

    #[test]
    fn zero_amount_is_rejected() {
        let err = AccountDeposit::from_input(&input("EUR 0000.00"), &clock()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidDepositAmount(_)));
        assert!(err.to_string().contains("must be greater than 0"));
    }

    #[test]
    fn iban_is_checked_before_amount() {
        let bad = DepositInput {
            iban: "ES0021000418450200051332".to_string(),
            amount: "bogus".to_string(),
        };
        assert!(matches!(
            AccountDeposit::from_input(&bad, &clock()),
            Err(DomainError::InvalidChecksum { .. })
        ));
    }

    #[test]
    fn input_decoding_errors() {
        let parsed =
            DepositInput::from_json(r#"{"IBAN": "ES9121000418450200051332", "AMOUNT": "EUR 0010.00"}"#)
                .unwrap();
        assert_eq!(parsed.amount, "EUR 0010.00");

        let err = DepositInput::from_json(r#"{"IBAN": "ES9121000418450200051332"}"#).unwrap_err();
        assert!(err.to_string().contains("invalid key"), "{err}");

        let err = DepositInput::from_json(r#"{"IBAN": "ES91"#).unwrap_err();
        assert!(err.to_string().contains("wrong JSON format"), "{err}");

        let err = DepositInput::from_json(r#"{"IBAN": 12, "AMOUNT": "EUR 0010.00"}"#).unwrap_err();
        assert!(matches!(err, DomainError::DepositInputInvalid(_)));
    }

    #[test]
    fn stored_layout() {
        let deposit = AccountDeposit::from_input(&input("EUR 0012.50"), &clock()).unwrap();
        let json = serde_json::to_value(&deposit).unwrap();
        assert_eq!(json["alg"], "SHA-256");
        assert_eq!(json["typ"], "DEPOSIT");
        assert_eq!(json["deposit_amount"], serde_json::json!(12.5));

        let back: AccountDeposit = serde_json::from_value(json).unwrap();
        assert_eq!(back, deposit);
        assert!(back.verify_signature());
    }
}
