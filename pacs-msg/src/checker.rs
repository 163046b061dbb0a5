//! Checks for generated pacs.008 text
//!
//! [`validate`] is a fast smoke test: substring and regex checks for the
//! declaration, namespace, required opening tags, settlement amount and
//! UETR. It does not look at nesting, so a tag in the wrong place or a
//! self-closing required tag goes unnoticed.
//!
//! [`check_structure`] parses the document with a streaming reader and
//! checks well-formedness, element paths, empty leaves and the transaction
//! count. Neither is schema validation.

use crate::builder::{PACS008_NAMESPACE, XML_DECLARATION};
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::debug;

/// Opening tags that must appear in every message, in check order
pub const REQUIRED_TAGS: [&str; 9] = [
    "<FIToFICstmrCdtTrf>",
    "<GrpHdr>",
    "<MsgId>",
    "<CreDtTm>",
    "<CdtTrfTxInf>",
    "<IntrBkSttlmAmt",
    "<UETR>",
    "<Dbtr>",
    "<Cdtr>",
];

/// Element paths the structural check requires, relative to the root
const REQUIRED_PATHS: [&str; 8] = [
    "Document/FIToFICstmrCdtTrf/GrpHdr/MsgId",
    "Document/FIToFICstmrCdtTrf/GrpHdr/CreDtTm",
    "Document/FIToFICstmrCdtTrf/GrpHdr/NbOfTxs",
    "Document/FIToFICstmrCdtTrf/CdtTrfTxInf/PmtId/UETR",
    "Document/FIToFICstmrCdtTrf/CdtTrfTxInf/IntrBkSttlmAmt",
    "Document/FIToFICstmrCdtTrf/CdtTrfTxInf/Dbtr",
    "Document/FIToFICstmrCdtTrf/CdtTrfTxInf/Cdtr",
    "Document/FIToFICstmrCdtTrf/CdtTrfTxInf/ChrgBr",
];

/// Leaf elements that must carry text
const NON_EMPTY_LEAVES: [&str; 5] = ["MsgId", "CreDtTm", "NbOfTxs", "UETR", "IntrBkSttlmAmt"];

static AMOUNT_REGEX: OnceLock<Regex> = OnceLock::new();
static UETR_REGEX: OnceLock<Regex> = OnceLock::new();

fn amount_regex() -> &'static Regex {
    AMOUNT_REGEX.get_or_init(|| {
        Regex::new(r#"<IntrBkSttlmAmt Ccy="[A-Z]{3}">\d+(\.\d+)?</IntrBkSttlmAmt>"#).unwrap()
    })
}

fn uetr_regex() -> &'static Regex {
    UETR_REGEX.get_or_init(|| {
        Regex::new(r"(?i)<UETR>[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}</UETR>")
            .unwrap()
    })
}

/// Outcome of a check; valid exactly when there are no errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether every check passed
    pub valid: bool,
    /// Human-readable failures, in check order
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Build a result from the collected errors
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Append the errors of another result
    pub fn merge(mut self, other: ValidationResult) -> Self {
        self.errors.extend(other.errors);
        self.valid = self.errors.is_empty();
        self
    }
}

/// Smoke-test pacs.008 text
///
/// Every check runs regardless of earlier failures. Never panics, for any
/// input.
pub fn validate(xml: &str) -> ValidationResult {
    let mut errors = Vec::new();

    if !xml.contains(XML_DECLARATION) {
        errors.push("Missing or invalid XML declaration".to_string());
    }

    if !xml.contains(PACS008_NAMESPACE) {
        errors.push(format!("Missing or invalid namespace: {}", PACS008_NAMESPACE));
    }

    for tag in REQUIRED_TAGS {
        if !xml.contains(tag) {
            errors.push(format!("Missing required element: {}", tag));
        }
    }

    if !amount_regex().is_match(xml) {
        errors.push("Invalid amount format or missing currency".to_string());
    }

    if !uetr_regex().is_match(xml) {
        errors.push("Invalid UETR format".to_string());
    }

    debug!(error_count = errors.len(), "Checked pacs.008 text");
    ValidationResult::from_errors(errors)
}

/// Structurally check pacs.008 text with a streaming XML parser
///
/// A parse error stops the walk; the path, empty-leaf and count checks then
/// run over whatever was read before it.
pub fn check_structure(xml: &str) -> ValidationResult {
    let mut errors = Vec::new();
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<String> = Vec::new();
    let mut seen_paths: Vec<String> = Vec::new();
    let mut empty_leaves: Vec<String> = Vec::new();
    let mut root: Option<String> = None;
    let mut transactions = 0usize;
    let mut declared_transactions: Option<String> = None;
    let mut leaf_has_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                open_element(&mut stack, &mut seen_paths, &mut root, &mut transactions, name);
                leaf_has_text = false;
            }
            Ok(Event::Empty(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                open_element(&mut stack, &mut seen_paths, &mut root, &mut transactions, name);
                if let Some(name) = stack.pop() {
                    if NON_EMPTY_LEAVES.contains(&name.as_str()) {
                        empty_leaves.push(name);
                    }
                }
            }
            Ok(Event::Text(t)) => {
                record_text(&t, &stack, &mut leaf_has_text, &mut declared_transactions);
            }
            Ok(Event::CData(c)) => {
                record_text(&c, &stack, &mut leaf_has_text, &mut declared_transactions);
            }
            Ok(Event::End(_)) => {
                if let Some(name) = stack.pop() {
                    if NON_EMPTY_LEAVES.contains(&name.as_str()) && !leaf_has_text {
                        empty_leaves.push(name);
                    }
                }
                leaf_has_text = false;
            }
            Ok(Event::Eof) => {
                if !stack.is_empty() {
                    errors.push(format!("Unclosed elements at end of document: {}", stack.join("/")));
                }
                break;
            }
            Ok(_) => {}
            Err(e) => {
                errors.push(format!(
                    "XML is not well-formed at position {}: {}",
                    reader.buffer_position(),
                    e
                ));
                break;
            }
        }
    }

    match root.as_deref() {
        None => errors.push("Document has no root element".to_string()),
        Some("Document") => {}
        Some(other) => errors.push(format!("Unexpected root element: {}", other)),
    }

    for path in REQUIRED_PATHS {
        if !seen_paths.iter().any(|seen| seen == path) {
            errors.push(format!("Missing element at path: {}", path));
        }
    }

    for leaf in empty_leaves {
        errors.push(format!("Element is empty: {}", leaf));
    }

    if let Some(declared) = declared_transactions {
        if declared.parse::<usize>().ok() != Some(transactions) {
            errors.push(format!(
                "NbOfTxs is {} but the document contains {} transaction(s)",
                declared, transactions
            ));
        }
    }

    debug!(error_count = errors.len(), "Structurally checked pacs.008 text");
    ValidationResult::from_errors(errors)
}

fn record_text(
    raw: &[u8],
    stack: &[String],
    leaf_has_text: &mut bool,
    declared_transactions: &mut Option<String>,
) {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return;
    }
    *leaf_has_text = true;
    if stack.last().map(String::as_str) == Some("NbOfTxs") {
        *declared_transactions = Some(String::from_utf8_lossy(raw).trim().to_string());
    }
}

fn open_element(
    stack: &mut Vec<String>,
    seen_paths: &mut Vec<String>,
    root: &mut Option<String>,
    transactions: &mut usize,
    name: String,
) {
    if stack.is_empty() && root.is_none() {
        *root = Some(name.clone());
    }
    if name == "CdtTrfTxInf" {
        *transactions += 1;
    }
    stack.push(name);
    seen_paths.push(stack.join("/"));
}
