//! Barcode web service dispatcher.

use std::sync::Arc;

use indexmap::IndexMap;
use reqwest::Client;
use tracing::{info, instrument};

use super::{Endpoints, http_client, soap_post, validate_rest_response, validate_soap_response};
use crate::{
    config::{ClientConfig, Mode},
    entity::{request::GenerateBarcode, response::GenerateBarcodeResponse, soap::{Security, UsernameToken}},
    error::{CifError, Result},
    markup::{SoapService, write_envelope},
};

/// Dispatcher for the barcode web service.
///
/// Generates track-and-trace barcodes over the channel the configuration
/// selects.
#[derive(Debug, Clone)]
pub struct BarcodeService {
    config: Arc<ClientConfig>,
    client: Client,
    /// Endpoint set; overridable for tests or proxies.
    pub endpoints: Endpoints,
}

impl BarcodeService {
    /// API version implemented by this dispatcher.
    pub const VERSION: &'static str = "1.1";
    /// Live REST/SOAP endpoint.
    pub const LIVE_ENDPOINT: &'static str = "https://api.postnl.nl/shipment/v1_1/barcode";
    /// Sandbox REST/SOAP endpoint.
    pub const SANDBOX_ENDPOINT: &'static str = "https://api-sandbox.postnl.nl/shipment/v1_1/barcode";
    /// Live endpoint of the legacy SOAP API.
    pub const LEGACY_LIVE_ENDPOINT: &'static str =
        "https://service.postnl.com/CIF_SB/BarcodeWebService/1_1/BarcodeWebService.svc";
    /// Sandbox endpoint of the legacy SOAP API.
    pub const LEGACY_SANDBOX_ENDPOINT: &'static str =
        "https://testservice.postnl.com/CIF_SB/BarcodeWebService/1_1/BarcodeWebService.svc";
    /// SOAP action of the generate-barcode operation.
    pub const SOAP_ACTION: &'static str =
        "http://postnl.nl/cif/services/BarcodeWebService/IBarcodeWebService/GenerateBarcode";

    /// Creates a dispatcher over the shared HTTP client.
    #[must_use]
    pub fn new(config: Arc<ClientConfig>) -> Self {
        Self {
            config,
            client: http_client(),
            endpoints: Endpoints {
                live: Self::LIVE_ENDPOINT.to_owned(),
                sandbox: Self::SANDBOX_ENDPOINT.to_owned(),
                legacy_live: Self::LEGACY_LIVE_ENDPOINT.to_owned(),
                legacy_sandbox: Self::LEGACY_SANDBOX_ENDPOINT.to_owned(),
            },
        }
    }

    /// Generates a single barcode.
    ///
    /// # Errors
    ///
    /// Returns [`CifError::Vendor`] or [`CifError::ServiceDown`] when the
    /// service rejects the request, and transport/decode errors otherwise.
    #[instrument(skip(self, request), fields(mode = ?self.config.mode, sandbox = self.config.sandbox))]
    pub async fn generate_barcode(&self, request: &GenerateBarcode) -> Result<String> {
        info!("generating barcode");
        let barcode = match self.config.mode {
            Mode::Rest => self.generate_barcode_rest(request).await?,
            Mode::Soap | Mode::Legacy => self.generate_barcode_soap(request).await?,
        };
        info!(barcode = %barcode, "barcode generated");
        Ok(barcode)
    }

    /// Generates many barcodes sequentially, keyed by each request's
    /// correlation identifier. A failure propagates immediately.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`generate_barcode`](Self::generate_barcode).
    pub async fn generate_barcodes(
        &self,
        requests: &[GenerateBarcode],
    ) -> Result<IndexMap<String, String>> {
        let mut barcodes = IndexMap::with_capacity(requests.len());
        for request in requests {
            let barcode = self.generate_barcode(request).await?;
            barcodes.insert(request.id.to_string(), barcode);
        }
        Ok(barcodes)
    }

    async fn generate_barcode_rest(&self, request: &GenerateBarcode) -> Result<String> {
        let barcode_type = request
            .barcode
            .barcode_type
            .ok_or_else(|| CifError::InvalidArgument("barcode type is missing".to_owned()))?;
        let serie = request
            .barcode
            .serie
            .as_deref()
            .ok_or_else(|| CifError::InvalidArgument("barcode serie is missing".to_owned()))?;
        let customer_code = request.customer.customer_code.as_deref().unwrap_or_default();
        let customer_number = request.customer.customer_number.as_deref().unwrap_or_default();

        let response = self
            .client
            .get(self.endpoints.resolve(self.config.sandbox, false))
            .header("apikey", &self.config.credentials.password)
            .header("Accept", "application/json")
            .query(&[
                ("CustomerCode", customer_code),
                ("CustomerNumber", customer_number),
                ("Type", barcode_type.as_str()),
                ("Serie", serie),
            ])
            .send()
            .await?;

        let value: serde_json::Value = serde_json::from_slice(&response.bytes().await?)?;
        validate_rest_response(&value)?;

        let parsed: GenerateBarcodeResponse = serde_json::from_value(value)?;
        parsed
            .barcode
            .ok_or_else(|| CifError::UnexpectedResponse("no Barcode field in response".to_owned()))
    }

    async fn generate_barcode_soap(&self, request: &GenerateBarcode) -> Result<String> {
        let security = Security::new(UsernameToken::from_credentials(
            &self.config.credentials,
            self.config.uses_legacy(),
        ));
        let envelope = write_envelope(SoapService::Barcode, "GenerateBarcode", request, &security)?;

        let endpoint =
            self.endpoints.resolve(self.config.sandbox, self.config.mode == Mode::Legacy);
        let root = soap_post(&self.client, endpoint, Self::SOAP_ACTION, envelope).await?;
        validate_soap_response(&root)?;

        super::descendant_text(&root, "Barcode")
            .ok_or_else(|| CifError::UnexpectedResponse("no Barcode element in response".to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Barcode, BarcodeType, Customer};

    fn service(mode: Mode) -> BarcodeService {
        let config = ClientConfig::new(
            Customer::new("11223344", "DEVC", "123456"),
            "test-key",
            true,
            mode,
        );
        BarcodeService::new(Arc::new(config))
    }

    #[test]
    fn test_default_endpoints_are_valid_urls() {
        assert!(service(Mode::Rest).endpoints.validate().is_ok());
    }

    #[test]
    fn test_endpoint_selection_by_mode() {
        let service = service(Mode::Legacy);
        assert_eq!(
            service.endpoints.resolve(true, true),
            BarcodeService::LEGACY_SANDBOX_ENDPOINT
        );
        assert_eq!(service.endpoints.resolve(false, false), BarcodeService::LIVE_ENDPOINT);
    }

    #[tokio::test]
    async fn test_rest_requires_barcode_type() {
        let service = service(Mode::Rest);
        let request = GenerateBarcode::new(
            Barcode { barcode_type: None, ..Default::default() },
            Customer::new("11223344", "DEVC", "123456"),
        );

        let result = service.generate_barcode(&request).await;
        assert!(matches!(result.unwrap_err(), CifError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_rest_requires_serie() {
        let service = service(Mode::Rest);
        let request = GenerateBarcode::new(
            Barcode { barcode_type: Some(BarcodeType::ThreeS), ..Default::default() },
            Customer::new("11223344", "DEVC", "123456"),
        );

        let result = service.generate_barcode(&request).await;
        assert!(matches!(result.unwrap_err(), CifError::InvalidArgument(_)));
    }
}
