//! Builders for pacs.008 parameters and documents
//!
//! [`MessageParametersBuilder`] assembles a [`MessageParameters`] record and
//! [`build`] renders it into the fixed pacs.008.001.08 document shape.
//! Neither inspects the content of the values it is given; use
//! [`MessageParameters::validate`] for that.

use crate::error::{Error, Result};
use crate::message::*;
use crate::types::*;
use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::escape::escape;
use tracing::debug;
use uuid::Uuid;

/// XML declaration every document starts with
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Namespace of the pacs.008.001.08 schema
pub const PACS008_NAMESPACE: &str = "urn:iso:std:iso:20022:tech:xsd:pacs.008.001.08";

/// Purpose code embedded in every transaction
pub const PURPOSE_CODE: &str = "TRAD";

/// Remittance text used when no description is supplied
pub const DEFAULT_REMITTANCE_INFO: &str = "Payment for goods and services";

/// Prefix of the generated `InstrId`
pub const INSTRUCTION_ID_PREFIX: &str = "INSTR-";

/// Prefix of the generated `EndToEndId`
pub const END_TO_END_ID_PREFIX: &str = "E2E-";

/// Builder for message parameters
pub struct MessageParametersBuilder {
    message_id: Option<String>,
    creditor_bic: Option<BicCode>,
    debtor_bic: Option<BicCode>,
    amount: Option<f64>,
    currency: Option<CurrencyCode>,
    creditor_name: Option<String>,
    debtor_name: Option<String>,
    creditor_iban: Option<IbanCode>,
    debtor_iban: Option<IbanCode>,
    settlement_method: SettlementMethod,
    charge_bearer: ChargeBearer,
    description: Option<String>,
}

impl Default for MessageParametersBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageParametersBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            message_id: None,
            creditor_bic: None,
            debtor_bic: None,
            amount: None,
            currency: None,
            creditor_name: None,
            debtor_name: None,
            creditor_iban: None,
            debtor_iban: None,
            settlement_method: SettlementMethod::default(),
            charge_bearer: ChargeBearer::default(),
            description: None,
        }
    }

    /// Set the message identifier
    pub fn message_id(mut self, id: impl Into<String>) -> Self {
        self.message_id = Some(id.into());
        self
    }

    /// Set the interbank settlement amount and its currency
    pub fn amount(mut self, amount: f64, currency: impl Into<String>) -> Self {
        self.amount = Some(amount);
        self.currency = Some(currency.into());
        self
    }

    /// Set the debtor name, account IBAN and agent BIC
    pub fn debtor(
        mut self,
        name: impl Into<String>,
        iban: impl Into<String>,
        bic: impl Into<String>,
    ) -> Self {
        self.debtor_name = Some(name.into());
        self.debtor_iban = Some(iban.into());
        self.debtor_bic = Some(bic.into());
        self
    }

    /// Set the creditor name, account IBAN and agent BIC
    pub fn creditor(
        mut self,
        name: impl Into<String>,
        iban: impl Into<String>,
        bic: impl Into<String>,
    ) -> Self {
        self.creditor_name = Some(name.into());
        self.creditor_iban = Some(iban.into());
        self.creditor_bic = Some(bic.into());
        self
    }

    /// Set the settlement method (defaults to `CLRG`)
    pub fn settlement_method(mut self, method: SettlementMethod) -> Self {
        self.settlement_method = method;
        self
    }

    /// Set the charge bearer (defaults to `SHAR`)
    pub fn charge_bearer(mut self, bearer: ChargeBearer) -> Self {
        self.charge_bearer = bearer;
        self
    }

    /// Set the unstructured remittance text
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Build the parameters
    ///
    /// Only the presence of required fields is checked.
    pub fn build(self) -> Result<MessageParameters> {
        fn required<T>(value: Option<T>, field: &str) -> Result<T> {
            value.ok_or_else(|| Error::MissingRequiredField(format!("{} is required", field)))
        }

        Ok(MessageParameters {
            message_id: required(self.message_id, "Message id")?,
            creditor_bic: required(self.creditor_bic, "Creditor BIC")?,
            debtor_bic: required(self.debtor_bic, "Debtor BIC")?,
            amount: required(self.amount, "Amount")?,
            currency: required(self.currency, "Currency")?,
            creditor_name: required(self.creditor_name, "Creditor name")?,
            debtor_name: required(self.debtor_name, "Debtor name")?,
            creditor_iban: required(self.creditor_iban, "Creditor IBAN")?,
            debtor_iban: required(self.debtor_iban, "Debtor IBAN")?,
            settlement_method: self.settlement_method,
            charge_bearer: self.charge_bearer,
            description: self.description,
        })
    }
}

/// Format an amount with exactly two decimal places
///
/// Non-finite values pass through as their textual form (`NaN`, `inf`).
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Build a pacs.008 document stamped with the current instant and a fresh
/// random UETR
pub fn build(params: &MessageParameters) -> GeneratedMessage {
    build_with(params, Utc::now(), Uuid::new_v4())
}

/// Build a pacs.008 document from an explicit creation instant and UETR
///
/// The instruction and end-to-end ids derive from the instant's Unix
/// milliseconds, so two messages created within the same millisecond share
/// them. Only the UETR is unique.
pub fn build_with(
    params: &MessageParameters,
    created_at: DateTime<Utc>,
    uetr: Uuid,
) -> GeneratedMessage {
    let millis = created_at.timestamp_millis();
    let instruction_id = format!("{}{}", INSTRUCTION_ID_PREFIX, millis);
    let end_to_end_id = format!("{}{}", END_TO_END_ID_PREFIX, millis);
    let creation_time = created_at.to_rfc3339_opts(SecondsFormat::Millis, true);
    let amount = format_amount(params.amount);
    let remittance = params
        .description
        .as_deref()
        .unwrap_or(DEFAULT_REMITTANCE_INFO);

    let xml = format!(
        r#"{declaration}
<Document xmlns="{namespace}" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <FIToFICstmrCdtTrf>
    <GrpHdr>
      <MsgId>{message_id}</MsgId>
      <CreDtTm>{creation_time}</CreDtTm>
      <NbOfTxs>1</NbOfTxs>
      <CtrlSum>{amount}</CtrlSum>
      <InitgPty>
        <Id>
          <OrgId>
            <AnyBIC>{debtor_bic}</AnyBIC>
          </OrgId>
        </Id>
      </InitgPty>
      <SttlmInf>
        <SttlmMtd>{settlement_method}</SttlmMtd>
      </SttlmInf>
    </GrpHdr>
    <CdtTrfTxInf>
      <PmtId>
        <InstrId>{instruction_id}</InstrId>
        <EndToEndId>{end_to_end_id}</EndToEndId>
        <UETR>{uetr}</UETR>
      </PmtId>
      <IntrBkSttlmAmt Ccy="{currency}">{amount}</IntrBkSttlmAmt>
      <ChrgBr>{charge_bearer}</ChrgBr>
      <Dbtr>
        <Nm>{debtor_name}</Nm>
{debtor_id}
      </Dbtr>
      <DbtrAgt>
        <FinInstnId>
          <BICFI>{debtor_bic}</BICFI>
        </FinInstnId>
      </DbtrAgt>
      <CdtrAgt>
        <FinInstnId>
          <BICFI>{creditor_bic}</BICFI>
        </FinInstnId>
      </CdtrAgt>
      <Cdtr>
        <Nm>{creditor_name}</Nm>
{creditor_id}
      </Cdtr>
      <CdtrAcct>
        <Id>
          <IBAN>{creditor_iban}</IBAN>
        </Id>
      </CdtrAcct>
      <Purp>
        <Cd>{purpose}</Cd>
      </Purp>
      <RmtInf>
        <Ustrd>{remittance}</Ustrd>
      </RmtInf>
    </CdtTrfTxInf>
  </FIToFICstmrCdtTrf>
</Document>
"#,
        declaration = XML_DECLARATION,
        namespace = PACS008_NAMESPACE,
        message_id = escape(params.message_id.as_str()),
        creation_time = creation_time,
        amount = amount,
        debtor_bic = escape(params.debtor_bic.as_str()),
        creditor_bic = escape(params.creditor_bic.as_str()),
        settlement_method = params.settlement_method,
        instruction_id = instruction_id,
        end_to_end_id = end_to_end_id,
        uetr = uetr.hyphenated(),
        currency = escape(params.currency.as_str()),
        charge_bearer = params.charge_bearer,
        debtor_name = escape(params.debtor_name.as_str()),
        debtor_id = iban_private_id(&params.debtor_iban),
        creditor_name = escape(params.creditor_name.as_str()),
        creditor_id = iban_private_id(&params.creditor_iban),
        creditor_iban = escape(params.creditor_iban.as_str()),
        purpose = PURPOSE_CODE,
        remittance = escape(remittance),
    );

    debug!(
        message_id = %params.message_id,
        uetr = %uetr,
        "Built pacs.008 message"
    );

    GeneratedMessage {
        xml,
        creation_time: created_at,
        uetr,
        instruction_id,
        end_to_end_id,
    }
}

/// Party `Id` block carrying the IBAN as a private identification
fn iban_private_id(iban: &str) -> String {
    format!(
        r#"        <Id>
          <PrvtId>
            <Othr>
              <Id>{iban}</Id>
              <SchmeNm>
                <Prtry>IBAN</Prtry>
              </SchmeNm>
            </Othr>
          </PrvtId>
        </Id>"#,
        iban = escape(iban)
    )
}
