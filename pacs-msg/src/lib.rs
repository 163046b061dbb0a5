//! # ISO 20022 pacs.008 Message Toolkit
//!
//! This crate builds single-transaction FI-to-FI customer credit transfer
//! messages (pacs.008.001.08), checks the generated text, projects fields
//! back out of it and exports it to files or the clipboard.
//!
//! ## Features
//!
//! - Fixed pacs.008 document shape with a fresh UETR per message
//! - Escaping of every interpolated value
//! - Regex smoke test plus a streaming structural check
//! - Null-safe field extraction
//! - Opt-in strict validation of BIC, IBAN, currency and amount
//! - SHA-256 export metadata, file persistence and clipboard copy
//!
//! ## Example Usage
//!
//! ```rust
//! use pacs_msg::builder::*;
//! use pacs_msg::types::*;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let params = MessageParametersBuilder::new()
//!     .message_id("MSG-20240115-001")
//!     .amount(100000.04, "USD")
//!     .debtor("Deutsche Kunde GmbH", "DE89370400440532013000", "DEUTDEDD")
//!     .creditor("Digital Commerce Ltd", "GB82WEST12345698765432", "DIGCGB2L")
//!     .settlement_method(SettlementMethod::Clearing)
//!     .charge_bearer(ChargeBearer::Shared)
//!     .build()?;
//!
//! params.validate()?;
//!
//! let message = pacs_msg::build(&params);
//! let result = pacs_msg::validate(&message.xml);
//! assert!(result.valid);
//!
//! let fields = pacs_msg::extract(&message.xml);
//! assert_eq!(fields.amount.as_deref(), Some("100000.04"));
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod checker;
pub mod error;
pub mod export;
pub mod extract;
pub mod message;
pub mod types;
pub mod validation;

// Re-export main types for convenience
pub use builder::{build, build_with, MessageParametersBuilder};
pub use checker::{check_structure, validate, ValidationResult};
pub use error::{Error, Result};
pub use export::{Clipboard, ExportMetadata, MemoryClipboard, SystemClipboard};
pub use extract::{extract, ExtractedFields};
pub use message::{GeneratedMessage, MessageParameters};
pub use types::{ChargeBearer, SettlementMethod};
