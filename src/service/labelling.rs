//! Labelling web service dispatcher.

use std::sync::Arc;

use indexmap::IndexMap;
use reqwest::Client;
use tracing::{info, instrument};

use super::{
    Endpoints, descendant_text, http_client, soap_post, validate_rest_response,
    validate_soap_response,
};
use crate::{
    config::{ClientConfig, Mode},
    entity::{
        Label,
        request::GenerateLabel,
        response::{GenerateLabelResponse, ResponseShipment},
        soap::{Security, UsernameToken},
    },
    error::{CifError, Result},
    markup::{SoapService, write_envelope},
};

/// Dispatcher for the labelling web service.
#[derive(Debug, Clone)]
pub struct LabellingService {
    config: Arc<ClientConfig>,
    client: Client,
    /// Endpoint set; overridable for tests or proxies.
    pub endpoints: Endpoints,
}

impl LabellingService {
    /// API version implemented by this dispatcher.
    pub const VERSION: &'static str = "2.1";
    /// Live REST/SOAP endpoint.
    pub const LIVE_ENDPOINT: &'static str = "https://api.postnl.nl/shipment/v2_1/label";
    /// Sandbox REST/SOAP endpoint.
    pub const SANDBOX_ENDPOINT: &'static str = "https://api-sandbox.postnl.nl/shipment/v2_1/label";
    /// Live endpoint of the legacy SOAP API.
    pub const LEGACY_LIVE_ENDPOINT: &'static str =
        "https://service.postnl.com/CIF_SB/LabellingWebService/2_1/LabellingWebService.svc";
    /// Sandbox endpoint of the legacy SOAP API.
    pub const LEGACY_SANDBOX_ENDPOINT: &'static str =
        "https://testservice.postnl.com/CIF_SB/LabellingWebService/2_1/LabellingWebService.svc";
    /// SOAP action of the generate-label operation.
    pub const SOAP_ACTION: &'static str =
        "http://postnl.nl/cif/services/LabellingWebService/ILabellingWebService/GenerateLabel";

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

    /// Generates labels for the shipments of one request envelope.
    ///
    /// `confirm` asks the service to pre-alert (confirm) the shipments in
    /// the same call.
    ///
    /// # Errors
    ///
    /// Returns [`CifError::Vendor`] or [`CifError::ServiceDown`] when the
    /// service rejects the request, and transport/decode errors otherwise.
    #[instrument(skip(self, request), fields(mode = ?self.config.mode, shipments = request.shipments.len()))]
    pub async fn generate_label(
        &self,
        request: &GenerateLabel,
        confirm: bool,
    ) -> Result<GenerateLabelResponse> {
        info!(confirm, "generating label");
        let response = match self.config.mode {
            Mode::Rest => self.generate_label_rest(request, confirm).await?,
            Mode::Soap | Mode::Legacy => self.generate_label_soap(request).await?,
        };
        info!("label generated");
        Ok(response)
    }

    /// Generates labels for many request envelopes sequentially, keyed by
    /// each request's correlation identifier. A failure propagates
    /// immediately.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`generate_label`](Self::generate_label).
    pub async fn generate_labels(
        &self,
        requests: &[GenerateLabel],
        confirm: bool,
    ) -> Result<IndexMap<String, GenerateLabelResponse>> {
        let mut responses = IndexMap::with_capacity(requests.len());
        for request in requests {
            let response = self.generate_label(request, confirm).await?;
            responses.insert(request.id.to_string(), response);
        }
        Ok(responses)
    }

    async fn generate_label_rest(
        &self,
        request: &GenerateLabel,
        confirm: bool,
    ) -> Result<GenerateLabelResponse> {
        let response = self
            .client
            .post(self.endpoints.resolve(self.config.sandbox, false))
            .header("apikey", &self.config.credentials.password)
            .header("Accept", "application/json")
            .query(&[("confirm", confirm)])
            .json(request)
            .send()
            .await?;

        let value: serde_json::Value = serde_json::from_slice(&response.bytes().await?)?;
        validate_rest_response(&value)?;

        Ok(serde_json::from_value(value)?)
    }

    async fn generate_label_soap(&self, request: &GenerateLabel) -> Result<GenerateLabelResponse> {
        let security = Security::new(UsernameToken::from_credentials(
            &self.config.credentials,
            self.config.uses_legacy(),
        ));
        let envelope =
            write_envelope(SoapService::Labelling, "GenerateLabel", request, &security)?;

        let endpoint =
            self.endpoints.resolve(self.config.sandbox, self.config.mode == Mode::Legacy);
        let root = soap_post(&self.client, endpoint, Self::SOAP_ACTION, envelope).await?;
        validate_soap_response(&root)?;

        // The SOAP response carries the label as a single Content element;
        // shape it like the REST response so callers see one type.
        let content = descendant_text(&root, "Content").ok_or_else(|| {
            CifError::UnexpectedResponse("no Content element in response".to_owned())
        })?;
        let barcode = descendant_text(&root, "Barcode");

        Ok(GenerateLabelResponse {
            response_shipments: Some(vec![ResponseShipment {
                barcode,
                labels: Some(vec![Label { content: Some(content), ..Default::default() }]),
                ..Default::default()
            }]),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Customer;

    #[test]
    fn test_default_endpoints_are_valid_urls() {
        let config = ClientConfig::new(
            Customer::new("11223344", "DEVC", "123456"),
            "test-key",
            false,
            Mode::Rest,
        );
        let service = LabellingService::new(Arc::new(config));
        assert!(service.endpoints.validate().is_ok());
        assert!(service.endpoints.legacy_sandbox.contains("testservice"));
    }
}
