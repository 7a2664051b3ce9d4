//! Spanish IBAN value object and the ISO 7064 mod-97 check.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use moneyflow_core::{DomainError, DomainResult, ValueObject};

const COUNTRY: &str = "ES";

static IBAN_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ES[0-9]{22}$").expect("IBAN pattern is valid"));

/// A validated Spanish IBAN (`ES` + 2 check digits + 20-digit BBAN).
///
/// Only obtainable through [`validate_iban`] (or deserialization, which runs the
/// same check), so holding an `Iban` means the checksum matched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Iban(String);

impl Iban {
    /// The normalized `ES…` form, used for storage and matching.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The two declared check digits.
    pub fn check_digits(&self) -> &str {
        &self.0[2..4]
    }

    /// The 20-digit basic bank account number.
    pub fn bban(&self) -> &str {
        &self.0[4..]
    }

    /// Numeric mod-97 transform (BBAN + country digits + `00`).
    pub fn numeric_form(&self) -> String {
        numeric_transform(&self.0)
    }
}

impl ValueObject for Iban {}

impl core::fmt::Display for Iban {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Iban {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_iban(&value)
    }
}

impl From<Iban> for String {
    fn from(value: Iban) -> Self {
        value.0
    }
}

impl core::str::FromStr for Iban {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_iban(s)
    }
}

/// Validate a Spanish IBAN: format first, then the mod-97 control digits.
pub fn validate_iban(raw: &str) -> DomainResult<Iban> {
    if !IBAN_FORMAT.is_match(raw) {
        return Err(DomainError::invalid_format(raw));
    }

    let declared: u32 = raw[2..4]
        .parse()
        .map_err(|_| DomainError::invalid_format(raw))?;
    let expected = 98 - mod97(&numeric_transform(raw));

    if declared != expected {
        return Err(DomainError::InvalidChecksum { declared, expected });
    }

    Ok(Iban(raw.to_string()))
}

/// Control digits a Spanish IBAN with this BBAN must carry.
///
/// `bban` is expected to be 20 ASCII digits; letters are mapped like in
/// [`Iban::numeric_form`].
pub fn check_digits_for(bban: &str) -> u32 {
    let zeroed = format!("{COUNTRY}00{bban}");
    98 - mod97(&numeric_transform(&zeroed))
}

/// Zero the check digits, move the first four characters to the end and map
/// letters to their two-digit codes (A=10 … Z=35) in one pass.
fn numeric_transform(iban: &str) -> String {
    let (head, bban) = iban.split_at(4.min(iban.len()));
    let country = &head[..2.min(head.len())];

    let mut out = String::with_capacity(iban.len() + 4);
    for c in bban.chars().chain(country.chars()).chain("00".chars()) {
        match c {
            '0'..='9' => out.push(c),
            'A'..='Z' => {
                let code = c as u32 - 'A' as u32 + 10;
                out.push_str(&code.to_string());
            }
            _ => {}
        }
    }
    out
}

/// Remainder of a decimal digit string modulo 97, computed piecewise.
fn mod97(digits: &str) -> u32 {
    digits
        .bytes()
        .filter(u8::is_ascii_digit)
        .fold(0u32, |rem, b| (rem * 10 + u32::from(b - b'0')) % 97)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const VALID: &str = "ES9121000418450200051332";

    #[test]
    fn known_iban_is_valid() {
        let iban = validate_iban(VALID).unwrap();
        assert_eq!(iban.as_str(), VALID);
        assert_eq!(iban.check_digits(), "91");
        assert_eq!(iban.numeric_form(), "21000418450200051332142800");
    }

    #[test]
    fn wrong_control_digits_are_rejected() {
        let err = validate_iban("ES0021000418450200051332").unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidChecksum {
                declared: 0,
                expected: 91
            }
        );
    }

    #[test]
    fn malformed_ibans_fail_format_check() {
        for raw in [
            "",
            "ES912100041845020005133",
            "ES91210004184502000513321",
            "FR9121000418450200051332",
            "es9121000418450200051332",
            "ES91 2100 0418 4502 0005 1332",
            "ES9121000418450200O51332",
        ] {
            assert!(
                matches!(validate_iban(raw), Err(DomainError::InvalidFormat(_))),
                "expected format error for {raw:?}"
            );
        }
    }

    #[test]
    fn letters_map_to_two_digit_codes() {
        assert_eq!(numeric_transform("ES00"), "142800");
        assert_eq!(numeric_transform("ZA00AZ"), "1035351000");
    }

    #[test]
    fn mod97_matches_integer_arithmetic() {
        let digits = "21000418450200051332142800";
        let n: u128 = digits.parse().unwrap();
        assert_eq!(u128::from(mod97(digits)), n % 97);
    }

    #[test]
    fn deserialization_runs_the_checksum() {
        let ok: Iban = serde_json::from_str(&format!("\"{VALID}\"")).unwrap();
        assert_eq!(ok.as_str(), VALID);
        assert!(serde_json::from_str::<Iban>("\"ES0021000418450200051332\"").is_err());
    }

    proptest! {
        #[test]
        fn generated_ibans_validate(bban in "[0-9]{20}") {
            let raw = format!("ES{:02}{bban}", check_digits_for(&bban));
            let iban = validate_iban(&raw).unwrap();
            prop_assert_eq!(iban.bban(), bban.as_str());
        }

        #[test]
        fn any_checksum_mutation_is_rejected(
            bban in "[0-9]{20}",
            position in 0usize..2,
            delta in 1u32..10,
        ) {
            let check = format!("{:02}", check_digits_for(&bban));
            let mut digits: Vec<u32> = check.chars().filter_map(|c| c.to_digit(10)).collect();
            digits[position] = (digits[position] + delta) % 10;
            let mutated = format!("ES{}{}{bban}", digits[0], digits[1]);

            let is_checksum_error = matches!(
                validate_iban(&mutated),
                Err(DomainError::InvalidChecksum { .. })
            );
            prop_assert!(is_checksum_error);
        }
    }
}
