//! Service dispatchers for the CIF web services.
//!
//! Each operation family (barcode, labelling, confirming) has one service
//! struct. A public entry point per operation selects the wire channel from
//! the configured [`Mode`](crate::Mode) and delegates to the REST or SOAP
//! path; there is no automatic fallback between channels.
//!
//! This module holds the plumbing the dispatchers share: the HTTP client,
//! endpoint resolution, and response validation for both channels.
//! Validation checks the broad-unavailability fault first, then extracts
//! CIF error records, so a service-down condition is never misreported as a
//! business error.

use std::{sync::LazyLock, time::Duration};

use reqwest::Client;
use url::Url;
use xmltree::{Element, XMLNode};

use crate::error::{CifError, ErrorRecord, Result, VendorFault};

pub mod barcode;
pub mod confirming;
pub mod labelling;

pub use barcode::BarcodeService;
pub use confirming::ConfirmingService;
pub use labelling::LabellingService;

/// Timeout for the entire request-response cycle in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Timeout for connection establishment in seconds.
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Shared HTTP client with connection pooling enabled.
///
/// A singleton avoids recreating the client per service instance, so all
/// services of all clients in the process share one connection pool.
static HTTP_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .build()
        .expect("failed to create HTTP client")
});

/// Handle to the shared HTTP client.
pub(crate) fn http_client() -> Client {
    HTTP_CLIENT.clone()
}

/// Endpoint set of one service family.
///
/// The fields are public so tests and proxies can redirect a service to a
/// different host.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Live REST/SOAP endpoint.
    pub live: String,
    /// Sandbox REST/SOAP endpoint.
    pub sandbox: String,
    /// Live endpoint of the legacy SOAP API.
    pub legacy_live: String,
    /// Sandbox endpoint of the legacy SOAP API.
    pub legacy_sandbox: String,
}

impl Endpoints {
    /// Picks the endpoint for the given sandbox/legacy combination.
    #[must_use]
    pub fn resolve(&self, sandbox: bool, legacy: bool) -> &str {
        match (sandbox, legacy) {
            (false, false) => &self.live,
            (true, false) => &self.sandbox,
            (false, true) => &self.legacy_live,
            (true, true) => &self.legacy_sandbox,
        }
    }

    /// Checks that every endpoint is a parseable URL.
    ///
    /// # Errors
    ///
    /// Returns [`CifError::InvalidConfiguration`] naming the offending
    /// endpoint.
    pub fn validate(&self) -> Result<()> {
        for (name, endpoint) in [
            ("live", &self.live),
            ("sandbox", &self.sandbox),
            ("legacy_live", &self.legacy_live),
            ("legacy_sandbox", &self.legacy_sandbox),
        ] {
            Url::parse(endpoint).map_err(|e| {
                CifError::InvalidConfiguration(format!("invalid {name} endpoint '{endpoint}': {e}"))
            })?;
        }
        Ok(())
    }
}

/// Validates a decoded REST response body.
///
/// The fault-reason check runs before error extraction: a response carrying
/// both raises [`CifError::ServiceDown`].
pub(crate) fn validate_rest_response(value: &serde_json::Value) -> Result<()> {
    if let Some(text) = value.pointer("/Envelope/Body/Fault/Reason/Text") {
        // The reason text is either a plain string or keyed under an
        // empty-string language attribute.
        let reason = text
            .as_str()
            .map(str::to_owned)
            .or_else(|| text.get("").and_then(|t| t.as_str()).map(str::to_owned));
        if let Some(reason) = reason {
            return Err(CifError::ServiceDown(reason));
        }
    }

    if let Some(errors) = value.pointer("/Errors/Error").and_then(serde_json::Value::as_array) {
        if !errors.is_empty() {
            let records = errors
                .iter()
                .map(|error| ErrorRecord {
                    description: error
                        .get("Description")
                        .and_then(serde_json::Value::as_str)
                        .map(str::to_owned),
                    message: error
                        .get("ErrorMsg")
                        .and_then(serde_json::Value::as_str)
                        .map(str::to_owned),
                    code: error.get("ErrorNumber").map_or(0, json_error_number),
                })
                .collect();
            return Err(CifError::Vendor(VendorFault::new(records)));
        }
    }

    Ok(())
}

/// Error numbers arrive as JSON numbers or as strings, depending on the
/// service generation.
fn json_error_number(value: &serde_json::Value) -> i64 {
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
        .unwrap_or(0)
}

/// Validates a parsed SOAP response document.
///
/// A top-level fault reason wins over CIF error extraction.
pub(crate) fn validate_soap_response(root: &Element) -> Result<()> {
    if let Some(fault) = descendant(root, "Fault") {
        if let Some(reason) = descendant(fault, "Reason")
            .and_then(|r| descendant(r, "Text"))
            .and_then(|t| t.get_text())
        {
            return Err(CifError::ServiceDown(reason.into_owned()));
        }
    }

    if let Some(exception) = descendant(root, "CifException") {
        let mut records = Vec::new();
        if let Some(errors) = descendant(exception, "Errors") {
            for data in children_named(errors, "ExceptionData") {
                records.push(ErrorRecord {
                    description: descendant_text(data, "Description"),
                    message: descendant_text(data, "ErrorMsg"),
                    code: descendant_text(data, "ErrorNumber")
                        .and_then(|n| n.parse().ok())
                        .unwrap_or(0),
                });
            }
        }
        if !records.is_empty() {
            return Err(CifError::Vendor(VendorFault::new(records)));
        }
    }

    Ok(())
}

/// First descendant element with the given local name, depth first.
pub(crate) fn descendant<'a>(element: &'a Element, name: &str) -> Option<&'a Element> {
    for child in element.children.iter().filter_map(XMLNode::as_element) {
        if child.name == name {
            return Some(child);
        }
        if let Some(found) = descendant(child, name) {
            return Some(found);
        }
    }
    None
}

/// Text content of the first descendant with the given local name.
pub(crate) fn descendant_text(element: &Element, name: &str) -> Option<String> {
    descendant(element, name).and_then(|e| e.get_text()).map(|t| t.into_owned())
}

/// Direct children with the given local name.
fn children_named<'a>(
    element: &'a Element,
    name: &'a str,
) -> impl Iterator<Item = &'a Element> + 'a {
    element
        .children
        .iter()
        .filter_map(XMLNode::as_element)
        .filter(move |child| child.name == name)
}

/// POSTs a SOAP envelope and parses the response document.
///
/// SOAP faults arrive with non-success status codes, so the body is parsed
/// regardless of status and fault handling is left to
/// [`validate_soap_response`].
pub(crate) async fn soap_post(
    client: &Client,
    endpoint: &str,
    action: &str,
    envelope: String,
) -> Result<Element> {
    let response = client
        .post(endpoint)
        .header("SOAPAction", format!("\"{action}\""))
        .header("Content-Type", "text/xml")
        .header("Accept", "text/xml")
        .body(envelope)
        .send()
        .await?;

    let body = response.bytes().await?;
    Ok(Element::parse(body.as_ref())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> Endpoints {
        Endpoints {
            live: "https://api.example.com/v1/thing".to_owned(),
            sandbox: "https://api-sandbox.example.com/v1/thing".to_owned(),
            legacy_live: "https://service.example.com/Thing.svc".to_owned(),
            legacy_sandbox: "https://testservice.example.com/Thing.svc".to_owned(),
        }
    }

    #[test]
    fn test_endpoint_resolution() {
        let endpoints = endpoints();
        assert_eq!(endpoints.resolve(false, false), endpoints.live);
        assert_eq!(endpoints.resolve(true, false), endpoints.sandbox);
        assert_eq!(endpoints.resolve(false, true), endpoints.legacy_live);
        assert_eq!(endpoints.resolve(true, true), endpoints.legacy_sandbox);
    }

    #[test]
    fn test_endpoint_validation_rejects_garbage() {
        let mut endpoints = endpoints();
        endpoints.legacy_live = "not a url".to_owned();
        let result = endpoints.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("legacy_live"));
    }

    #[test]
    fn test_rest_validation_passes_clean_response() {
        let value = serde_json::json!({"Barcode": "3SDEVC816223392"});
        assert!(validate_rest_response(&value).is_ok());
    }

    #[test]
    fn test_rest_validation_extracts_error_records() {
        let value = serde_json::json!({
            "Errors": {
                "Error": [
                    {"Description": "Shipment 1", "ErrorMsg": "Invalid zipcode", "ErrorNumber": 13},
                    {"Description": "Shipment 2", "ErrorMsg": "Invalid country", "ErrorNumber": "21"}
                ]
            }
        });

        let error = validate_rest_response(&value).unwrap_err();
        let CifError::Vendor(fault) = error else { panic!("expected vendor fault") };
        assert_eq!(fault.records().len(), 2);
        assert_eq!(fault.records()[0].message.as_deref(), Some("Invalid zipcode"));
        assert_eq!(fault.records()[0].code, 13);
        // Stringly-typed error number is still extracted
        assert_eq!(fault.records()[1].code, 21);
    }

    #[test]
    fn test_rest_validation_empty_error_list_is_clean() {
        let value = serde_json::json!({"Errors": {"Error": []}});
        assert!(validate_rest_response(&value).is_ok());
    }

    #[test]
    fn test_rest_validation_fault_reason_precedes_errors() {
        let value = serde_json::json!({
            "Envelope": {"Body": {"Fault": {"Reason": {"Text": {"": "service unavailable"}}}}},
            "Errors": {"Error": [{"ErrorMsg": "ignored", "ErrorNumber": 1}]}
        });

        let error = validate_rest_response(&value).unwrap_err();
        assert!(matches!(error, CifError::ServiceDown(ref text) if text == "service unavailable"));
    }

    #[test]
    fn test_soap_validation_passes_clean_response() {
        let xml = br#"<?xml version="1.0"?>
            <Envelope xmlns="http://schemas.xmlsoap.org/soap/envelope/">
              <Body><GenerateBarcodeResponse><Barcode>3SDEVC1</Barcode></GenerateBarcodeResponse></Body>
            </Envelope>"#;
        let root = Element::parse(xml.as_slice()).unwrap();
        assert!(validate_soap_response(&root).is_ok());
        assert_eq!(descendant_text(&root, "Barcode").as_deref(), Some("3SDEVC1"));
    }

    #[test]
    fn test_soap_validation_fault_reason() {
        let xml = br#"<?xml version="1.0"?>
            <env:Envelope xmlns:env="http://schemas.xmlsoap.org/soap/envelope/">
              <env:Body>
                <env:Fault>
                  <env:Reason><env:Text>CIF is down for maintenance</env:Text></env:Reason>
                </env:Fault>
              </env:Body>
            </env:Envelope>"#;
        let root = Element::parse(xml.as_slice()).unwrap();
        let error = validate_soap_response(&root).unwrap_err();
        assert!(
            matches!(error, CifError::ServiceDown(ref text) if text == "CIF is down for maintenance")
        );
    }

    #[test]
    fn test_soap_validation_cif_exception_records() {
        let xml = br#"<?xml version="1.0"?>
            <env:Envelope xmlns:env="http://schemas.xmlsoap.org/soap/envelope/"
                          xmlns:common="http://postnl.nl/cif/services/common/">
              <env:Body>
                <common:CifException>
                  <common:Errors>
                    <common:ExceptionData>
                      <common:Description>Check Customer</common:Description>
                      <common:ErrorMsg>Customer number is invalid</common:ErrorMsg>
                      <common:ErrorNumber>8</common:ErrorNumber>
                    </common:ExceptionData>
                    <common:ExceptionData>
                      <common:ErrorMsg>Second problem</common:ErrorMsg>
                      <common:ErrorNumber>9</common:ErrorNumber>
                    </common:ExceptionData>
                  </common:Errors>
                </common:CifException>
              </env:Body>
            </env:Envelope>"#;
        let root = Element::parse(xml.as_slice()).unwrap();
        let error = validate_soap_response(&root).unwrap_err();
        let CifError::Vendor(fault) = error else { panic!("expected vendor fault") };
        assert_eq!(fault.records().len(), 2);
        assert_eq!(fault.primary_message(), Some("Customer number is invalid"));
        assert_eq!(fault.primary_code(), 8);
        assert_eq!(fault.records()[1].code, 9);
    }

    #[test]
    fn test_soap_validation_fault_precedes_cif_exception() {
        let xml = br#"<?xml version="1.0"?>
            <env:Envelope xmlns:env="http://schemas.xmlsoap.org/soap/envelope/"
                          xmlns:common="http://postnl.nl/cif/services/common/">
              <env:Body>
                <env:Fault><env:Reason><env:Text>down</env:Text></env:Reason></env:Fault>
                <common:CifException>
                  <common:Errors>
                    <common:ExceptionData><common:ErrorNumber>8</common:ErrorNumber></common:ExceptionData>
                  </common:Errors>
                </common:CifException>
              </env:Body>
            </env:Envelope>"#;
        let root = Element::parse(xml.as_slice()).unwrap();
        assert!(matches!(validate_soap_response(&root).unwrap_err(), CifError::ServiceDown(_)));
    }
}
