//! The client facade.
//!
//! [`Client`] holds the configuration and one lazily-constructed service
//! per operation family, and exposes the convenience operations most
//! integrations need: generate one or many barcodes (optionally derived
//! from a destination country), generate labels, and confirm shipments.
//!
//! Bulk operations tag each request envelope with a caller-supplied
//! correlation identifier so the results can be demultiplexed back to the
//! caller's keys. They run as sequential loops over single-item calls; the
//! first failure propagates and aborts the remainder.

use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;

use crate::{
    config::ClientConfig,
    entity::{
        Barcode, BarcodeType, LabellingMessage, Shipment,
        request::{Confirming, GenerateBarcode, GenerateLabel},
        response::GenerateLabelResponse,
    },
    error::{CifError, Result},
    service::{BarcodeService, ConfirmingService, LabellingService},
};

/// Destination countries that take a `3S` barcode.
///
/// The domestic-equivalent country list is a fixed business rule of the
/// barcode scheme, not configuration.
pub const THREE_S_COUNTRIES: &[&str] = &[
    "NL", "BE", "AT", "BG", "CZ", "DK", "EE", "FI", "FR", "DE", "GB", "GR", "HU", "IE", "IT",
    "LV", "LT", "LU", "PL", "PT", "RO", "SK", "SI", "ES", "SE", "MC", "AL", "AD", "BA", "IC",
    "FO", "GI", "GL", "GG", "IS", "JE", "HR", "LI", "MK", "MD", "ME", "NO", "UA", "SM", "RS",
    "TR", "VA", "BY", "CH",
];

/// Whether a destination country takes a `3S` barcode.
#[must_use]
pub fn is_three_s_destination(iso: &str) -> bool {
    let iso = iso.to_uppercase();
    THREE_S_COUNTRIES.contains(&iso.as_str())
}

/// Resolves the barcode series for a type/range/EPS combination.
///
/// The mapping is a fixed decision table of the barcode scheme:
///
/// | type  | EPS | range length | series                    |
/// |-------|-----|--------------|---------------------------|
/// | `2S`  | any | any          | `0000000-9999999`         |
/// | `3S`  | yes | 4            | `0000000-9999999`         |
/// | `3S`  | yes | 3            | `10000000-20000000`       |
/// | `3S`  | yes | 1            | `5210500000-5210600000`   |
/// | `3S`  | yes | other        | error                     |
/// | `3S`  | no  | 4            | `987000000-987600000`     |
/// | `3S`  | no  | other        | `0000000-9999999`         |
/// | other | any | any          | `0000-9999`               |
///
/// # Errors
///
/// Returns [`CifError::InvalidBarcode`] for an EPS `3S` range whose length
/// has no assigned series.
pub fn barcode_series(barcode_type: BarcodeType, range: &str, eps: bool) -> Result<String> {
    let series = match barcode_type {
        BarcodeType::TwoS => "0000000-9999999",
        BarcodeType::ThreeS => {
            if eps {
                match range.len() {
                    4 => "0000000-9999999",
                    3 => "10000000-20000000",
                    1 => "5210500000-5210600000",
                    _ => return Err(CifError::InvalidBarcode("Invalid range".to_owned())),
                }
            } else if range.len() == 4 {
                "987000000-987600000"
            } else {
                "0000000-9999999"
            }
        }
        // GlobalPack
        _ => "0000-9999",
    };

    Ok(series.to_owned())
}

/// Client for the CIF shipment web services.
///
/// ```no_run
/// use postnl_cif::{Client, ClientConfig, Mode, entity::{BarcodeType, Customer}};
///
/// # async fn example() -> postnl_cif::Result<()> {
/// let customer = Customer::new("11223344", "DEVC", "123456");
/// let config = ClientConfig::new(customer, "my-api-key", true, Mode::Rest);
/// let client = Client::new(config);
///
/// let barcode = client.generate_barcode(BarcodeType::ThreeS, None, None, false).await?;
/// println!("barcode: {barcode}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Client {
    config: Arc<ClientConfig>,
    barcode: OnceLock<BarcodeService>,
    labelling: OnceLock<LabellingService>,
    confirming: OnceLock<ConfirmingService>,
}

impl Client {
    /// Creates a client from a configuration.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config: Arc::new(config),
            barcode: OnceLock::new(),
            labelling: OnceLock::new(),
            confirming: OnceLock::new(),
        }
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The barcode service, constructed on first access.
    pub fn barcode_service(&self) -> &BarcodeService {
        self.barcode.get_or_init(|| BarcodeService::new(self.config.clone()))
    }

    /// Replaces the barcode service, e.g. one with redirected endpoints.
    pub fn set_barcode_service(&mut self, service: BarcodeService) {
        self.barcode = OnceLock::from(service);
    }

    /// The labelling service, constructed on first access.
    pub fn labelling_service(&self) -> &LabellingService {
        self.labelling.get_or_init(|| LabellingService::new(self.config.clone()))
    }

    /// Replaces the labelling service.
    pub fn set_labelling_service(&mut self, service: LabellingService) {
        self.labelling = OnceLock::from(service);
    }

    /// The confirming service, constructed on first access.
    pub fn confirming_service(&self) -> &ConfirmingService {
        self.confirming.get_or_init(|| ConfirmingService::new(self.config.clone()))
    }

    /// Replaces the confirming service.
    pub fn set_confirming_service(&mut self, service: ConfirmingService) {
        self.confirming = OnceLock::from(service);
    }

    /// Generates a single barcode.
    ///
    /// When `range` is absent it defaults to the customer code (`2S`/`3S`)
    /// or the GlobalPack customer code (other types); when `series` is
    /// absent it is resolved through [`barcode_series`]. `eps` marks a
    /// cross-border European shipment.
    ///
    /// # Errors
    ///
    /// Returns [`CifError::InvalidBarcode`] when no range can be found or
    /// the series is unresolvable, plus the dispatcher's failure modes.
    pub async fn generate_barcode(
        &self,
        barcode_type: BarcodeType,
        range: Option<&str>,
        series: Option<&str>,
        eps: bool,
    ) -> Result<String> {
        let customer = &self.config.customer;
        let range = match range {
            Some(range) => Some(range.to_owned()),
            None if !barcode_type.is_global_pack() => customer.customer_code.clone(),
            None => customer.global_pack_customer_code.clone(),
        };
        let range = range
            .filter(|r| !r.is_empty())
            .ok_or_else(|| CifError::InvalidBarcode("Unable to find a valid range".to_owned()))?;

        let series = match series {
            Some(series) => series.to_owned(),
            None => barcode_series(barcode_type, &range, eps)?,
        };

        let request =
            GenerateBarcode::new(Barcode::new(barcode_type, range, series), customer.clone());
        self.barcode_service().generate_barcode(&request).await
    }

    /// Generates a single barcode for a destination country.
    ///
    /// Destinations on the 3S list get a `3S` barcode drawn from the
    /// customer code; everything else uses the customer's GlobalPack
    /// type and range.
    ///
    /// # Errors
    ///
    /// Returns [`CifError::InvalidConfiguration`] when the customer lacks
    /// the fields the destination requires, plus the dispatcher's failure
    /// modes.
    pub async fn generate_barcode_by_country(&self, iso: &str) -> Result<String> {
        let (barcode_type, range) = self.barcode_parameters_for_country(iso)?;
        let eps = is_eps_destination(iso);
        let series = barcode_series(barcode_type, &range, eps)?;

        let request = GenerateBarcode::new(
            Barcode::new(barcode_type, range, series),
            self.config.customer.clone(),
        );
        self.barcode_service().generate_barcode(&request).await
    }

    /// Generates barcodes for several destination countries at once.
    ///
    /// `quantities` maps an ISO country code to the number of barcodes
    /// wanted. The result maps each country back to its barcodes, in
    /// request order.
    ///
    /// # Errors
    ///
    /// Same failure modes as
    /// [`generate_barcode_by_country`](Self::generate_barcode_by_country);
    /// the first failing request aborts the remainder.
    pub async fn generate_barcodes_by_country(
        &self,
        quantities: &IndexMap<String, usize>,
    ) -> Result<IndexMap<String, Vec<String>>> {
        let mut requests = Vec::new();
        let mut index = 0usize;
        for (iso, quantity) in quantities {
            let (barcode_type, range) = self.barcode_parameters_for_country(iso)?;
            let series = barcode_series(barcode_type, &range, is_eps_destination(iso))?;

            for _ in 0..*quantity {
                requests.push(
                    GenerateBarcode::new(
                        Barcode::new(barcode_type, range.clone(), series.clone()),
                        self.config.customer.clone(),
                    )
                    .with_id(format!("{iso}-{index}")),
                );
                index += 1;
            }
        }

        let results = self.barcode_service().generate_barcodes(&requests).await?;

        let mut barcodes: IndexMap<String, Vec<String>> = IndexMap::new();
        for (id, barcode) in results {
            let iso = id.split_once('-').map_or(id.as_str(), |(iso, _)| iso).to_owned();
            barcodes.entry(iso).or_default().push(barcode);
        }
        Ok(barcodes)
    }

    /// Generates a label for a single shipment.
    ///
    /// # Errors
    ///
    /// Propagates the labelling dispatcher's failure modes unchanged.
    pub async fn generate_label(
        &self,
        shipment: Shipment,
        printer_type: &str,
        confirm: bool,
    ) -> Result<GenerateLabelResponse> {
        let request = GenerateLabel::new(
            vec![shipment],
            LabellingMessage::new(printer_type),
            self.config.customer.clone(),
        );
        self.labelling_service().generate_label(&request, confirm).await
    }

    /// Generates labels for several shipments, keyed by caller-supplied
    /// correlation identifiers.
    ///
    /// # Errors
    ///
    /// The first failing request aborts the remainder.
    pub async fn generate_labels(
        &self,
        shipments: IndexMap<String, Shipment>,
        printer_type: &str,
        confirm: bool,
    ) -> Result<IndexMap<String, GenerateLabelResponse>> {
        let requests: Vec<GenerateLabel> = shipments
            .into_iter()
            .map(|(key, shipment)| {
                GenerateLabel::new(
                    vec![shipment],
                    LabellingMessage::new(printer_type),
                    self.config.customer.clone(),
                )
                .with_id(key)
            })
            .collect();

        self.labelling_service().generate_labels(&requests, confirm).await
    }

    /// Confirms (pre-alerts) a single shipment.
    ///
    /// # Errors
    ///
    /// Propagates the confirming dispatcher's failure modes unchanged.
    pub async fn confirm_shipment(&self, shipment: Shipment) -> Result<()> {
        let request = Confirming::new(vec![shipment], self.config.customer.clone());
        self.confirming_service().confirm(&request).await
    }

    /// Confirms several shipments sequentially.
    ///
    /// # Errors
    ///
    /// The first failing request aborts the remainder; shipments confirmed
    /// before the failure stay confirmed.
    pub async fn confirm_shipments(
        &self,
        shipments: IndexMap<String, Shipment>,
    ) -> Result<()> {
        let requests: Vec<Confirming> = shipments
            .into_iter()
            .map(|(key, shipment)| {
                Confirming::new(vec![shipment], self.config.customer.clone()).with_id(key)
            })
            .collect();

        self.confirming_service().confirm_shipments(&requests).await
    }

    /// Barcode type and range for a destination country.
    fn barcode_parameters_for_country(&self, iso: &str) -> Result<(BarcodeType, String)> {
        let customer = &self.config.customer;
        if is_three_s_destination(iso) {
            let range = customer.customer_code.clone().ok_or_else(|| {
                CifError::InvalidConfiguration(
                    "customer code has not been set for the current customer".to_owned(),
                )
            })?;
            return Ok((BarcodeType::ThreeS, range));
        }

        let range = customer.global_pack_customer_code.clone().ok_or_else(|| {
            CifError::InvalidConfiguration(
                "GlobalPack customer code has not been set for the current customer".to_owned(),
            )
        })?;
        let barcode_type = customer
            .global_pack_barcode_type
            .as_deref()
            .ok_or_else(|| {
                CifError::InvalidConfiguration(
                    "GlobalPack barcode type has not been set for the current customer".to_owned(),
                )
            })?
            .parse()?;
        Ok((barcode_type, range))
    }
}

/// Cross-border European shipments draw from the EPS series.
fn is_eps_destination(iso: &str) -> bool {
    !iso.eq_ignore_ascii_case("NL") && is_three_s_destination(iso)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mode, entity::Customer};

    fn client_with(customer: Customer) -> Client {
        Client::new(ClientConfig::new(customer, "test-key", true, Mode::Rest))
    }

    #[test]
    fn test_three_s_destination_classification() {
        assert!(is_three_s_destination("NL"));
        assert!(is_three_s_destination("be"));
        assert!(is_three_s_destination("CH"));
        assert!(!is_three_s_destination("US"));
        assert!(!is_three_s_destination("CN"));
    }

    #[test]
    fn test_eps_excludes_domestic() {
        assert!(!is_eps_destination("NL"));
        assert!(is_eps_destination("DE"));
        assert!(!is_eps_destination("US"));
    }

    #[test]
    fn test_series_two_s() {
        assert_eq!(barcode_series(BarcodeType::TwoS, "DEVC", false).unwrap(), "0000000-9999999");
        // Range length does not matter for 2S
        assert_eq!(barcode_series(BarcodeType::TwoS, "X", true).unwrap(), "0000000-9999999");
    }

    #[test]
    fn test_series_three_s_domestic() {
        assert_eq!(
            barcode_series(BarcodeType::ThreeS, "DEVC", false).unwrap(),
            "987000000-987600000"
        );
        assert_eq!(
            barcode_series(BarcodeType::ThreeS, "123456", false).unwrap(),
            "0000000-9999999"
        );
    }

    #[test]
    fn test_series_three_s_eps() {
        assert_eq!(barcode_series(BarcodeType::ThreeS, "DEVC", true).unwrap(), "0000000-9999999");
        assert_eq!(barcode_series(BarcodeType::ThreeS, "123", true).unwrap(), "10000000-20000000");
        assert_eq!(
            barcode_series(BarcodeType::ThreeS, "1", true).unwrap(),
            "5210500000-5210600000"
        );
    }

    #[test]
    fn test_series_three_s_eps_invalid_range_length() {
        let result = barcode_series(BarcodeType::ThreeS, "12", true);
        assert!(matches!(result.unwrap_err(), CifError::InvalidBarcode(_)));
    }

    #[test]
    fn test_series_global_pack() {
        assert_eq!(barcode_series(BarcodeType::Cd, "1234", false).unwrap(), "0000-9999");
        assert_eq!(barcode_series(BarcodeType::Cx, "1234", true).unwrap(), "0000-9999");
    }

    #[test]
    fn test_barcode_parameters_for_three_s_country() {
        let client = client_with(Customer::new("11223344", "DEVC", "123456"));
        let (barcode_type, range) = client.barcode_parameters_for_country("BE").unwrap();
        assert_eq!(barcode_type, BarcodeType::ThreeS);
        assert_eq!(range, "DEVC");
    }

    #[test]
    fn test_barcode_parameters_global_pack_unconfigured() {
        let client = client_with(Customer::new("11223344", "DEVC", "123456"));
        let result = client.barcode_parameters_for_country("US");
        assert!(matches!(result.unwrap_err(), CifError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_barcode_parameters_global_pack_configured() {
        let customer = Customer {
            global_pack_customer_code: Some("1234".to_owned()),
            global_pack_barcode_type: Some("CD".to_owned()),
            ..Customer::new("11223344", "DEVC", "123456")
        };
        let client = client_with(customer);

        let (barcode_type, range) = client.barcode_parameters_for_country("US").unwrap();
        assert_eq!(barcode_type, BarcodeType::Cd);
        assert_eq!(range, "1234");
    }

    #[test]
    fn test_barcode_parameters_global_pack_missing_type() {
        let customer = Customer {
            global_pack_customer_code: Some("1234".to_owned()),
            ..Customer::new("11223344", "DEVC", "123456")
        };
        let client = client_with(customer);

        let result = client.barcode_parameters_for_country("US");
        assert!(
            matches!(result.unwrap_err(), CifError::InvalidConfiguration(ref m) if m.contains("barcode type"))
        );
    }

    #[test]
    fn test_services_are_cached() {
        let client = client_with(Customer::new("11223344", "DEVC", "123456"));
        let first = client.barcode_service() as *const _;
        let second = client.barcode_service() as *const _;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_generate_barcode_without_any_range() {
        let client = client_with(Customer::default());
        let result = client.generate_barcode(BarcodeType::ThreeS, None, None, false).await;
        assert!(
            matches!(result.unwrap_err(), CifError::InvalidBarcode(ref m) if m.contains("valid range"))
        );
    }

    #[tokio::test]
    async fn test_generate_barcode_global_pack_needs_global_pack_range() {
        let client = client_with(Customer::new("11223344", "DEVC", "123456"));
        // CD without a GlobalPack customer code cannot derive a range
        let result = client.generate_barcode(BarcodeType::Cd, None, None, false).await;
        assert!(matches!(result.unwrap_err(), CifError::InvalidBarcode(_)));
    }
}
