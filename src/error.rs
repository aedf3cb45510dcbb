//! Error types for the CIF client.
//!
//! This module defines all error types that can occur while talking to the
//! CIF web services. All errors implement the standard [`std::error::Error`]
//! trait via [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Caller errors** ([`CifError::InvalidArgument`], [`CifError::InvalidBarcode`],
//!   [`CifError::InvalidConfiguration`]): the request could never succeed as
//!   given; fix the input and retry.
//! - **Remote errors** ([`CifError::Vendor`], [`CifError::ServiceDown`]): the
//!   service received the request and rejected it, or reported itself
//!   unavailable.
//! - **Transport/decode errors** ([`CifError::Http`], [`CifError::Json`],
//!   [`CifError::Xml`], [`CifError::XmlWrite`], [`CifError::UnexpectedResponse`]):
//!   the exchange itself failed or produced something unreadable.
//!
//! No failure is retried or suppressed internally; every error propagates to
//! the caller immediately.

use thiserror::Error;

/// Result type alias for CIF operations.
///
/// All fallible functions in this crate return this type.
pub type Result<T> = std::result::Result<T, CifError>;

/// A single error record from a CIF error block.
///
/// The remote service reports failures as a list of
/// (description, message, numeric code) triples; each one becomes one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    /// Human-readable description of the failed element.
    pub description: Option<String>,
    /// The error message proper.
    pub message: Option<String>,
    /// Numeric CIF error code (0 when the service omitted it).
    pub code: i64,
}

/// A vendor fault carrying one or more [`ErrorRecord`]s.
///
/// The first record supplies the primary message and code, matching call
/// sites that only look at a single error; the full list stays available
/// through [`records`](Self::records).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorFault {
    records: Vec<ErrorRecord>,
}

impl VendorFault {
    /// Creates a fault from the records extracted out of an error block.
    #[must_use]
    pub fn new(records: Vec<ErrorRecord>) -> Self {
        Self { records }
    }

    /// All error records, in the order the service returned them.
    #[must_use]
    pub fn records(&self) -> &[ErrorRecord] {
        &self.records
    }

    /// The first record's message, if any.
    #[must_use]
    pub fn primary_message(&self) -> Option<&str> {
        self.records.first().and_then(|r| r.message.as_deref())
    }

    /// The first record's numeric code (0 when absent).
    #[must_use]
    pub fn primary_code(&self) -> i64 {
        self.records.first().map_or(0, |r| r.code)
    }
}

impl std::fmt::Display for VendorFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.primary_message() {
            Some(message) => write!(f, "{message} (code {})", self.primary_code()),
            None => write!(f, "unspecified CIF error (code {})", self.primary_code()),
        }
    }
}

/// Errors that can occur while using the CIF client.
///
/// All variants include contextual information about what went wrong.
/// Callers recover by matching on the variant; there is no degraded or
/// partial-success return path.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum CifError {
    /// Malformed caller input, such as an empty overflow-field name or an
    /// unrecognized mode value.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Unsupported barcode type or unresolvable barcode range/series.
    #[error("invalid barcode: {0}")]
    InvalidBarcode(String),

    /// The client configuration is missing something an operation requires,
    /// e.g. the GlobalPack fields for a cross-border barcode.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The service accepted the request and returned one or more CIF error
    /// records.
    #[error("CIF error: {0}")]
    Vendor(VendorFault),

    /// A top-level fault indicating broad unavailability rather than a
    /// specific business error. Detected before vendor-fault extraction.
    #[error("CIF service down: {0}")]
    ServiceDown(String),

    /// HTTP request failed (timeout, connection refused, DNS, TLS).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A REST response body was not valid JSON, or did not match the
    /// expected shape.
    #[error("JSON decode failed: {0}")]
    Json(#[from] serde_json::Error),

    /// A SOAP response body was not well-formed XML.
    #[error("XML parse failed: {0}")]
    Xml(#[from] xmltree::ParseError),

    /// Writing a SOAP envelope failed. Only reachable through an I/O error
    /// on the output sink.
    #[error("XML write failed: {0}")]
    XmlWrite(#[from] xmltree::Error),

    /// The response validated cleanly but lacked the field the operation
    /// promises (e.g. no `Barcode` element in a barcode response).
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fault() -> VendorFault {
        VendorFault::new(vec![
            ErrorRecord {
                description: Some("Shipment 1".to_owned()),
                message: Some("Invalid zipcode".to_owned()),
                code: 13,
            },
            ErrorRecord { description: None, message: Some("Second error".to_owned()), code: 42 },
        ])
    }

    #[test]
    fn test_vendor_fault_primary_record() {
        let fault = sample_fault();
        assert_eq!(fault.primary_message(), Some("Invalid zipcode"));
        assert_eq!(fault.primary_code(), 13);
        assert_eq!(fault.records().len(), 2);
    }

    #[test]
    fn test_vendor_fault_display() {
        let error = CifError::Vendor(sample_fault());
        assert_eq!(error.to_string(), "CIF error: Invalid zipcode (code 13)");
    }

    #[test]
    fn test_vendor_fault_empty_records() {
        let fault = VendorFault::new(vec![]);
        assert_eq!(fault.primary_message(), None);
        assert_eq!(fault.primary_code(), 0);
        assert!(fault.to_string().contains("unspecified"));
    }

    #[test]
    fn test_service_down_display() {
        let error = CifError::ServiceDown("planned maintenance".to_owned());
        assert_eq!(error.to_string(), "CIF service down: planned maintenance");
    }

    #[test]
    fn test_invalid_barcode_display() {
        let error = CifError::InvalidBarcode("Invalid range".to_owned());
        assert!(error.to_string().contains("Invalid range"));
    }
}
