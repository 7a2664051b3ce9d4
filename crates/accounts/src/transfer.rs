use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use moneyflow_core::{
    Clock, DomainError, DomainResult, Entity, TransferCode, ValueObject, epoch_seconds,
};

use crate::iban::{Iban, validate_iban};
use crate::validation::{validate_amount, validate_concept, validate_transfer_date};

/// Transfer type.
///
/// Matching on input is exact against the canonical spellings. Records written
/// with the legacy `INMEDIATE` spelling still load, as `Immediate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransferType {
    Ordinary,
    #[serde(alias = "INMEDIATE")]
    Immediate,
    Urgent,
}

impl TransferType {
    pub const ALL: [TransferType; 3] = [Self::Ordinary, Self::Immediate, Self::Urgent];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ordinary => "ORDINARY",
            Self::Immediate => "IMMEDIATE",
            Self::Urgent => "URGENT",
        }
    }
}

impl ValueObject for TransferType {}

impl core::fmt::Display for TransferType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for TransferType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                DomainError::invalid_type(format!(
                    "{s:?} is not one of ORDINARY, IMMEDIATE, URGENT"
                ))
            })
    }
}

/// Every stored transfer field except the code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct TransferFields {
    from_iban: Iban,
    to_iban: Iban,
    transfer_type: TransferType,
    #[serde(with = "rust_decimal::serde::float")]
    transfer_amount: Decimal,
    transfer_concept: String,
    /// `DD/MM/YYYY`, as submitted.
    transfer_date: String,
    /// UTC epoch seconds at construction.
    time_stamp: f64,
}

impl TransferFields {
    /// Stable serialization hashed into the transfer code.
    ///
    /// Keys are emitted sorted and the amount in its normalized decimal text, so
    /// `10.5` and `10.50` hash alike.
    fn canonical_form(&self) -> String {
        json!({
            "from_iban": self.from_iban.as_str(),
            "to_iban": self.to_iban.as_str(),
            "transfer_type": self.transfer_type.as_str(),
            "transfer_amount": self.transfer_amount.normalize().to_string(),
            "transfer_concept": self.transfer_concept,
            "transfer_date": self.transfer_date,
            "time_stamp": self.time_stamp,
        })
        .to_string()
    }

    fn code(&self) -> TransferCode {
        TransferCode::derive(&self.canonical_form())
    }
}

/// A validated transfer request, as stored in the transfers store.
///
/// Immutable: the only way to obtain one is [`TransferRequestBuilder::build`] (or
/// loading a stored record). Stored keys are the fields in declaration order
/// followed by `transfer_code`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRequest {
    #[serde(flatten)]
    fields: TransferFields,
    transfer_code: TransferCode,
}

impl TransferRequest {
    pub fn builder() -> TransferRequestBuilder {
        TransferRequestBuilder::default()
    }

    fn seal(fields: TransferFields) -> Self {
        let transfer_code = fields.code();
        Self {
            fields,
            transfer_code,
        }
    }

    pub fn from_iban(&self) -> &Iban {
        &self.fields.from_iban
    }

    pub fn to_iban(&self) -> &Iban {
        &self.fields.to_iban
    }

    pub fn transfer_type(&self) -> TransferType {
        self.fields.transfer_type
    }

    pub fn transfer_amount(&self) -> Decimal {
        self.fields.transfer_amount
    }

    pub fn transfer_concept(&self) -> &str {
        &self.fields.transfer_concept
    }

    pub fn transfer_date(&self) -> &str {
        &self.fields.transfer_date
    }

    pub fn time_stamp(&self) -> f64 {
        self.fields.time_stamp
    }

    pub fn transfer_code(&self) -> &TransferCode {
        &self.transfer_code
    }

    /// True when both requests carry the same (from, to, date, amount, concept,
    /// type) tuple. Time stamp and code are not compared.
    pub fn same_fields_as(&self, other: &TransferRequest) -> bool {
        let (a, b) = (&self.fields, &other.fields);
        a.from_iban == b.from_iban
            && a.to_iban == b.to_iban
            && a.transfer_date == b.transfer_date
            && a.transfer_amount == b.transfer_amount
            && a.transfer_concept == b.transfer_concept
            && a.transfer_type == b.transfer_type
    }

    /// Recompute the code from the stored fields and compare.
    pub fn verify_code(&self) -> bool {
        self.fields.code() == self.transfer_code
    }
}

impl Entity for TransferRequest {
    type Id = TransferCode;

    const KIND: &'static str = "transfer";

    fn id(&self) -> &Self::Id {
        &self.transfer_code
    }
}

/// Collects raw transfer fields; [`build`](Self::build) validates them in order
/// (from IBAN, to IBAN, concept, type, date, amount) and stops at the first failure.
#[derive(Debug, Clone, Default)]
pub struct TransferRequestBuilder {
    from_iban: Option<String>,
    to_iban: Option<String>,
    concept: Option<String>,
    transfer_type: Option<String>,
    date: Option<String>,
    amount: Option<Decimal>,
}

impl TransferRequestBuilder {
    pub fn from_iban(mut self, iban: impl Into<String>) -> Self {
        self.from_iban = Some(iban.into());
        self
    }

    pub fn to_iban(mut self, iban: impl Into<String>) -> Self {
        self.to_iban = Some(iban.into());
        self
    }

    pub fn concept(mut self, concept: impl Into<String>) -> Self {
        self.concept = Some(concept.into());
        self
    }

    pub fn transfer_type(mut self, transfer_type: impl Into<String>) -> Self {
        self.transfer_type = Some(transfer_type.into());
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn build(self, clock: &dyn Clock) -> DomainResult<TransferRequest> {
        let from_iban = validate_iban(self.from_iban.as_deref().unwrap_or_default())?;
        let to_iban = validate_iban(self.to_iban.as_deref().unwrap_or_default())?;
        let concept = validate_concept(self.concept.as_deref().unwrap_or_default())?.to_string();
        let transfer_type: TransferType = self.transfer_type.as_deref().unwrap_or_default().parse()?;

        let now = clock.now();
        let date = self.date.unwrap_or_default();
        validate_transfer_date(&date, now.date_naive())?;

        let amount = self
            .amount
            .ok_or_else(|| DomainError::invalid_amount("amount is required"))
            .and_then(validate_amount)?;

        Ok(TransferRequest::seal(TransferFields {
            from_iban,
            to_iban,
            transfer_type,
            transfer_amount: amount,
            transfer_concept: concept,
            transfer_date: date,
            time_stamp: epoch_seconds(now),
        }))
    }
}
