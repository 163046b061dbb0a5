//! pacs.008 message data structures
//!
//! This module implements the caller-supplied parameter record and the
//! generated message produced from it.

use crate::error::{Error, Result};
use crate::types::*;
use crate::validation::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Parameters for a single-transaction pacs.008 credit transfer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageParameters {
    /// Message identifier (`MsgId`), unique per sender
    pub message_id: String,
    /// BIC of the creditor agent
    pub creditor_bic: BicCode,
    /// BIC of the debtor agent
    pub debtor_bic: BicCode,
    /// Interbank settlement amount
    pub amount: f64,
    /// ISO 4217 currency of the amount
    pub currency: CurrencyCode,
    /// Creditor display name
    pub creditor_name: String,
    /// Debtor display name
    pub debtor_name: String,
    /// Creditor account IBAN
    pub creditor_iban: IbanCode,
    /// Debtor account IBAN
    pub debtor_iban: IbanCode,
    /// Settlement method of the group header
    #[serde(default)]
    pub settlement_method: SettlementMethod,
    /// Which party bears the charges
    #[serde(default)]
    pub charge_bearer: ChargeBearer,
    /// Unstructured remittance text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MessageParameters {
    /// Strictly validate the parameters.
    ///
    /// Building never calls this; it exists for callers that want to reject
    /// implausible BICs, IBANs, currencies or amounts before a message is
    /// produced. Every check runs and all issues are reported together.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            validate_message_id(&self.message_id),
            validate_bic(&self.creditor_bic),
            validate_bic(&self.debtor_bic),
            validate_amount(self.amount),
            validate_currency_code(&self.currency),
            validate_name(&self.creditor_name),
            validate_name(&self.debtor_name),
            validate_iban(&self.creditor_iban),
            validate_iban(&self.debtor_iban),
        ];

        let issues: Vec<String> = checks
            .into_iter()
            .filter_map(|check| check.err().map(|e| e.to_string()))
            .collect();

        if issues.is_empty() {
            Ok(())
        } else {
            Err(Error::ValidationFailed { issues })
        }
    }

    /// Parse parameters from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize parameters to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A serialized pacs.008 document and the values generated while building it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedMessage {
    /// The XML document text
    pub xml: String,
    /// Creation instant embedded as `CreDtTm`
    pub creation_time: DateTime<Utc>,
    /// Unique end-to-end transaction reference embedded as `UETR`
    pub uetr: Uuid,
    /// Instruction identifier embedded as `InstrId`
    pub instruction_id: String,
    /// End-to-end identifier embedded as `EndToEndId`
    pub end_to_end_id: String,
}

impl GeneratedMessage {
    /// The XML document text
    pub fn as_str(&self) -> &str {
        &self.xml
    }

    /// Consume the message, returning the XML document text
    pub fn into_xml(self) -> String {
        self.xml
    }
}

impl AsRef<str> for GeneratedMessage {
    fn as_ref(&self) -> &str {
        &self.xml
    }
}
