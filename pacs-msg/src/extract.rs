//! Field extraction from pacs.008 text
//!
//! Each field is matched independently, so a missing or malformed tag
//! blanks that field alone. Works on text that failed [`crate::checker::validate`].

use quick_xml::escape::unescape;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Fields projected out of a pacs.008 document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedFields {
    pub message_id: Option<String>,
    pub uetr: Option<String>,
    /// Settlement amount exactly as written in the document
    pub amount: Option<String>,
    pub currency: Option<String>,
    pub debtor_name: Option<String>,
    pub creditor_name: Option<String>,
    pub creation_time: Option<String>,
}

impl ExtractedFields {
    /// True when no field could be extracted
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

struct FieldPatterns {
    message_id: Regex,
    uetr: Regex,
    amount: Regex,
    debtor_name: Regex,
    creditor_name: Regex,
    creation_time: Regex,
}

static PATTERNS: OnceLock<FieldPatterns> = OnceLock::new();

fn patterns() -> &'static FieldPatterns {
    PATTERNS.get_or_init(|| FieldPatterns {
        message_id: Regex::new(r"<MsgId>([^<]*)</MsgId>").unwrap(),
        uetr: Regex::new(r"<UETR>([^<]*)</UETR>").unwrap(),
        amount: Regex::new(r#"<IntrBkSttlmAmt Ccy="([^"]*)">([^<]*)</IntrBkSttlmAmt>"#).unwrap(),
        debtor_name: Regex::new(r"<Dbtr>\s*<Nm>([^<]*)</Nm>").unwrap(),
        creditor_name: Regex::new(r"<Cdtr>\s*<Nm>([^<]*)</Nm>").unwrap(),
        creation_time: Regex::new(r"<CreDtTm>([^<]*)</CreDtTm>").unwrap(),
    })
}

/// Extract the display fields from pacs.008 text
pub fn extract(xml: &str) -> ExtractedFields {
    let p = patterns();
    let amount = p.amount.captures(xml);

    ExtractedFields {
        message_id: capture(&p.message_id, xml),
        uetr: capture(&p.uetr, xml),
        amount: amount.as_ref().and_then(|c| text(c.get(2)?.as_str())),
        currency: amount.as_ref().and_then(|c| text(c.get(1)?.as_str())),
        debtor_name: capture(&p.debtor_name, xml),
        creditor_name: capture(&p.creditor_name, xml),
        creation_time: capture(&p.creation_time, xml),
    }
}

fn capture(regex: &Regex, xml: &str) -> Option<String> {
    text(regex.captures(xml)?.get(1)?.as_str())
}

/// Unescape captured text; empty or badly escaped text counts as absent
fn text(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        return None;
    }
    unescape(raw).ok().map(|s| s.into_owned())
}
