//! Validation utilities for pacs.008 parameters
//!
//! This module provides validation functions for the identifiers a credit
//! transfer carries: BIC, IBAN, currency codes, amounts and ISO 20022 text
//! lengths. None of these run during building.

use crate::builder::format_amount;
use crate::error::{Error, Result};
use iso_currency::Currency;
use regex::Regex;
use std::sync::OnceLock;

/// Maximum length of an ISO 20022 `Max35Text` identifier
pub const MAX_ID_LENGTH: usize = 35;

/// Maximum length of an ISO 20022 `Max140Text` name
pub const MAX_NAME_LENGTH: usize = 140;

/// Regex for BIC validation (8 or 11 alphanumeric characters)
static BIC_REGEX: OnceLock<Regex> = OnceLock::new();

/// Regex for the IBAN shape: country, check digits, BBAN
static IBAN_REGEX: OnceLock<Regex> = OnceLock::new();

/// Get or create the BIC validation regex
fn bic_regex() -> &'static Regex {
    BIC_REGEX.get_or_init(|| Regex::new(r"^[A-Z]{4}[A-Z]{2}[A-Z0-9]{2}([A-Z0-9]{3})?$").unwrap())
}

fn iban_regex() -> &'static Regex {
    IBAN_REGEX.get_or_init(|| Regex::new(r"^[A-Z]{2}[0-9]{2}[A-Z0-9]{11,30}$").unwrap())
}

/// Validate a Business Identifier Code (BIC)
pub fn validate_bic(bic: &str) -> Result<()> {
    if !bic_regex().is_match(bic) {
        return Err(Error::InvalidBic(format!("Invalid BIC format: {}", bic)));
    }

    Ok(())
}

/// Validate an International Bank Account Number (ISO 13616)
///
/// Spaces are ignored. The shape is checked first, then the mod-97
/// checksum over the rearranged, letter-expanded account number.
pub fn validate_iban(iban: &str) -> Result<()> {
    let compact: String = iban.chars().filter(|c| !c.is_whitespace()).collect();

    if !iban_regex().is_match(&compact) {
        return Err(Error::InvalidIban(format!("Invalid IBAN format: {}", iban)));
    }

    if iban_checksum(&compact) != 1 {
        return Err(Error::InvalidIban(format!("IBAN checksum mismatch: {}", iban)));
    }

    Ok(())
}

/// Mod-97 remainder of an IBAN moved to `BBAN + country + check digits`
fn iban_checksum(compact: &str) -> u32 {
    let (head, tail) = compact.split_at(4);
    tail.chars()
        .chain(head.chars())
        .fold(0u32, |acc, c| match c.to_digit(36) {
            // letters expand to two digits (A = 10 .. Z = 35)
            Some(v) if v >= 10 => (acc * 100 + v) % 97,
            Some(v) => (acc * 10 + v) % 97,
            None => acc,
        })
}

/// Validate an ISO 4217 currency code
pub fn validate_currency_code(code: &str) -> Result<()> {
    if code.len() != 3 {
        return Err(Error::InvalidCurrencyCode(format!(
            "Currency code must be 3 characters: {}",
            code
        )));
    }

    if Currency::from_code(code).is_none() {
        return Err(Error::InvalidCurrencyCode(format!(
            "Invalid ISO 4217 currency code: {}",
            code
        )));
    }

    Ok(())
}

/// Validate a settlement amount
pub fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() {
        return Err(Error::InvalidAmount(format!(
            "Amount must be a finite number: {}",
            amount
        )));
    }

    if amount <= 0.0 {
        return Err(Error::InvalidAmount(format!(
            "Amount must be positive: {}",
            amount
        )));
    }

    // the message carries the amount rounded to two decimals
    let rendered = format_amount(amount);
    if rendered.parse::<f64>().map_or(true, |value| value <= 0.0) {
        return Err(Error::InvalidAmount(format!(
            "Amount rounds to {} at two decimals: {}",
            rendered, amount
        )));
    }

    Ok(())
}

/// Validate a message identifier (`Max35Text`)
pub fn validate_message_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(Error::InvalidMessageId("Message id cannot be empty".to_string()));
    }

    if id.chars().count() > MAX_ID_LENGTH {
        return Err(Error::InvalidMessageId(format!(
            "Message id exceeds {} characters: {}",
            MAX_ID_LENGTH, id
        )));
    }

    Ok(())
}

/// Validate a party name (`Max140Text`)
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidName("Name cannot be empty".to_string()));
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(Error::InvalidName(format!(
            "Name exceeds {} characters",
            MAX_NAME_LENGTH
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_currency_code() {
        assert!(validate_currency_code("USD").is_ok());
        assert!(validate_currency_code("EUR").is_ok());
        assert!(validate_currency_code("JPY").is_ok());

        assert!(validate_currency_code("US").is_err());
        assert!(validate_currency_code("USDT").is_err());
        assert!(validate_currency_code("QQQ").is_err());
    }

    #[test]
    fn test_validate_bic() {
        assert!(validate_bic("DEUTDEDD").is_ok()); // 8 chars
        assert!(validate_bic("DEUTDEFFXXX").is_ok()); // 11 chars

        assert!(validate_bic("DEUT").is_err()); // Too short
        assert!(validate_bic("DEUTDEFFXX").is_err()); // Wrong length
        assert!(validate_bic("deutdeff").is_err()); // Lowercase
    }

    #[test]
    fn test_validate_iban() {
        assert!(validate_iban("GB82WEST12345698765432").is_ok());
        assert!(validate_iban("DE89370400440532013000").is_ok());
        assert!(validate_iban("DE89 3704 0044 0532 0130 00").is_ok());

        assert!(validate_iban("GB83WEST12345698765432").is_err()); // Bad check digits
        assert!(validate_iban("GB82").is_err()); // Too short
        assert!(validate_iban("gb82west12345698765432").is_err()); // Lowercase
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(100.0).is_ok());
        assert!(validate_amount(0.01).is_ok());

        assert!(validate_amount(0.006).is_ok());

        assert!(validate_amount(0.0).is_err());
        assert!(validate_amount(0.004).is_err());
        assert!(validate_amount(0.0049).is_err());
        assert!(validate_amount(-5.0).is_err());
        assert!(validate_amount(f64::NAN).is_err());
        assert!(validate_amount(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_message_id() {
        assert!(validate_message_id("MSG-2024-0001").is_ok());
        assert!(validate_message_id("").is_err());
        assert!(validate_message_id(&"X".repeat(36)).is_err());
    }
}
