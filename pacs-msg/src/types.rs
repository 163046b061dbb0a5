//! Code lists used by the pacs.008 credit transfer
//!
//! This module implements the external code sets the message builder
//! embeds verbatim: the settlement method of the group header and the
//! charge bearer of each transaction.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Business Identifier Code (BIC) - 8 or 11 character code
pub type BicCode = String;

/// International Bank Account Number
pub type IbanCode = String;

/// ISO 4217 currency code
pub type CurrencyCode = String;

/// Settlement method enumeration (`SttlmMtd`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettlementMethod {
    /// Settled through a clearing system
    #[default]
    #[serde(rename = "CLRG")]
    Clearing,
    /// Instructed agent's account, debited by the instructed agent
    #[serde(rename = "INDA")]
    InstructedAgent,
    /// Instructing agent's account, credited by the instructing agent
    #[serde(rename = "INGA")]
    InstructingAgent,
    /// Settled through a cover payment
    #[serde(rename = "COVE")]
    Cover,
}

impl SettlementMethod {
    /// ISO 20022 code for this settlement method
    pub fn code(&self) -> &'static str {
        match self {
            Self::Clearing => "CLRG",
            Self::InstructedAgent => "INDA",
            Self::InstructingAgent => "INGA",
            Self::Cover => "COVE",
        }
    }
}

impl fmt::Display for SettlementMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SettlementMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CLRG" => Ok(Self::Clearing),
            "INDA" => Ok(Self::InstructedAgent),
            "INGA" => Ok(Self::InstructingAgent),
            "COVE" => Ok(Self::Cover),
            _ => Err(Error::InvalidEnumValue {
                field: "settlement method".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Charge bearer enumeration (`ChrgBr`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChargeBearer {
    /// Charges shared between debtor and creditor
    #[default]
    #[serde(rename = "SHAR")]
    Shared,
    /// All charges borne by the creditor
    #[serde(rename = "CRED")]
    Creditor,
    /// All charges borne by the debtor
    #[serde(rename = "DEBT")]
    Debtor,
    /// Charges follow the service level agreement
    #[serde(rename = "SLEV")]
    ServiceLevel,
}

impl ChargeBearer {
    /// ISO 20022 code for this charge bearer
    pub fn code(&self) -> &'static str {
        match self {
            Self::Shared => "SHAR",
            Self::Creditor => "CRED",
            Self::Debtor => "DEBT",
            Self::ServiceLevel => "SLEV",
        }
    }
}

impl fmt::Display for ChargeBearer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ChargeBearer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SHAR" => Ok(Self::Shared),
            "CRED" => Ok(Self::Creditor),
            "DEBT" => Ok(Self::Debtor),
            "SLEV" => Ok(Self::ServiceLevel),
            _ => Err(Error::InvalidEnumValue {
                field: "charge bearer".to_string(),
                value: s.to_string(),
            }),
        }
    }
}
