//! Confirming (pre-alert) web service dispatcher.

use std::sync::Arc;

use reqwest::Client;
use tracing::{info, instrument};

use super::{Endpoints, http_client, soap_post, validate_rest_response, validate_soap_response};
use crate::{
    config::{ClientConfig, Mode},
    entity::{
        request::Confirming,
        soap::{Security, UsernameToken},
    },
    error::Result,
    markup::{SoapService, write_envelope},
};

/// Dispatcher for the confirming web service.
///
/// Confirming pre-alerts the carrier that a shipment is coming; a confirmed
/// shipment is expected at the collection location the same day.
#[derive(Debug, Clone)]
pub struct ConfirmingService {
    config: Arc<ClientConfig>,
    client: Client,
    /// Endpoint set; overridable for tests or proxies.
    pub endpoints: Endpoints,
}

impl ConfirmingService {
    /// API version implemented by this dispatcher.
    pub const VERSION: &'static str = "1.10";
    /// Live REST/SOAP endpoint.
    pub const LIVE_ENDPOINT: &'static str = "https://api.postnl.nl/shipment/v1_10/confirm";
    /// Sandbox REST/SOAP endpoint.
    pub const SANDBOX_ENDPOINT: &'static str =
        "https://api-sandbox.postnl.nl/shipment/v1_10/confirm";
    /// Live endpoint of the legacy SOAP API.
    pub const LEGACY_LIVE_ENDPOINT: &'static str =
        "https://service.postnl.com/CIF_SB/ConfirmingWebService/1_10/ConfirmingWebService.svc";
    /// Sandbox endpoint of the legacy SOAP API.
    pub const LEGACY_SANDBOX_ENDPOINT: &'static str =
        "https://testservice.postnl.com/CIF_SB/ConfirmingWebService/1_10/ConfirmingWebService.svc";
    /// SOAP action of the confirming operation.
    pub const SOAP_ACTION: &'static str =
        "http://postnl.nl/cif/services/ConfirmingWebService/IConfirmingWebService/Confirming";

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

    /// Confirms the shipments of one request envelope.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CifError::Vendor`] or [`crate::CifError::ServiceDown`]
    /// when the service rejects the request, and transport/decode errors
    /// otherwise.
    #[instrument(skip(self, request), fields(mode = ?self.config.mode, shipments = request.shipments.len()))]
    pub async fn confirm(&self, request: &Confirming) -> Result<()> {
        info!("confirming shipment");
        match self.config.mode {
            Mode::Rest => self.confirm_rest(request).await?,
            Mode::Soap | Mode::Legacy => self.confirm_soap(request).await?,
        }
        info!("shipment confirmed");
        Ok(())
    }

    /// Confirms many request envelopes sequentially. A failure propagates
    /// immediately; already confirmed shipments stay confirmed.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`confirm`](Self::confirm).
    pub async fn confirm_shipments(&self, requests: &[Confirming]) -> Result<()> {
        for request in requests {
            self.confirm(request).await?;
        }
        Ok(())
    }

    async fn confirm_rest(&self, request: &Confirming) -> Result<()> {
        let response = self
            .client
            .post(self.endpoints.resolve(self.config.sandbox, false))
            .header("apikey", &self.config.credentials.password)
            .header("Accept", "application/json")
            .json(request)
            .send()
            .await?;

        let value: serde_json::Value = serde_json::from_slice(&response.bytes().await?)?;
        validate_rest_response(&value)
    }

    async fn confirm_soap(&self, request: &Confirming) -> Result<()> {
        let security = Security::new(UsernameToken::from_credentials(
            &self.config.credentials,
            self.config.uses_legacy(),
        ));
        let envelope = write_envelope(SoapService::Confirming, "Confirming", request, &security)?;

        let endpoint =
            self.endpoints.resolve(self.config.sandbox, self.config.mode == Mode::Legacy);
        let root = soap_post(&self.client, endpoint, Self::SOAP_ACTION, envelope).await?;
        validate_soap_response(&root)
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
        let service = ConfirmingService::new(Arc::new(config));
        assert!(service.endpoints.validate().is_ok());
        assert!(service.endpoints.live.ends_with("/confirm"));
    }
}
