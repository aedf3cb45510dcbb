//! Integration tests for the SOAP channel, driven against a local mock of
//! the CIF endpoints.

use std::sync::Arc;

use postnl_cif::{
    CifError, ClientConfig, Credentials, Mode,
    entity::{
        Barcode, BarcodeType, Customer, LabellingMessage, Shipment,
        request::{Confirming, GenerateBarcode, GenerateLabel},
    },
    service::{BarcodeService, ConfirmingService, LabellingService},
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string_contains, header, method, path},
};

fn test_customer() -> Customer {
    Customer::new("11223344", "DEVC", "123456")
}

fn soap_config() -> Arc<ClientConfig> {
    Arc::new(ClientConfig::new(test_customer(), "test-key", true, Mode::Soap))
}

fn legacy_config() -> Arc<ClientConfig> {
    Arc::new(ClientConfig::new(
        test_customer(),
        Credentials::username_token(Some("devc"), "secret", true),
        true,
        Mode::Legacy,
    ))
}

fn barcode_request() -> GenerateBarcode {
    GenerateBarcode::new(
        Barcode::new(BarcodeType::ThreeS, "DEVC", "987000000-987600000"),
        test_customer(),
    )
}

fn barcode_response_xml() -> &'static str {
    r#"<?xml version="1.0"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
  <s:Body>
    <GenerateBarcodeResponse xmlns="http://postnl.nl/cif/services/BarcodeWebService/">
      <Barcode xmlns="http://postnl.nl/cif/domain/BarcodeWebService/">3SDEVC816223392</Barcode>
    </GenerateBarcodeResponse>
  </s:Body>
</s:Envelope>"#
}

#[tokio::test]
async fn soap_barcode_happy_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/CIF_SB/BarcodeWebService/1_1/BarcodeWebService.svc"))
        .and(header("Content-Type", "text/xml"))
        .and(header(
            "SOAPAction",
            "\"http://postnl.nl/cif/services/BarcodeWebService/IBarcodeWebService/GenerateBarcode\"",
        ))
        .and(body_string_contains("GenerateBarcode"))
        .and(body_string_contains("CustomerNumber"))
        .and(body_string_contains("987000000-987600000"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(barcode_response_xml(), "text/xml"))
        .expect(1)
        .mount(&server)
        .await;

    let mut service = BarcodeService::new(soap_config());
    service.endpoints.sandbox =
        format!("{}/CIF_SB/BarcodeWebService/1_1/BarcodeWebService.svc", server.uri());

    let barcode = service.generate_barcode(&barcode_request()).await.unwrap();
    assert_eq!(barcode, "3SDEVC816223392");
}

#[tokio::test]
async fn soap_envelope_carries_plaintext_password() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("<wsse:Password>test-key</wsse:Password>"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(barcode_response_xml(), "text/xml"))
        .expect(1)
        .mount(&server)
        .await;

    let mut service = BarcodeService::new(soap_config());
    service.endpoints.sandbox = server.uri();

    service.generate_barcode(&barcode_request()).await.unwrap();
}

#[tokio::test]
async fn legacy_envelope_carries_hashed_password() {
    let server = MockServer::start().await;
    // sha1("secret")
    Mock::given(method("POST"))
        .and(body_string_contains(
            "<wsse:Password>e5e9fa1ba31ecd1ae84f75caaa474f3a663f05f4</wsse:Password>",
        ))
        .and(body_string_contains("<wsse:Username>devc</wsse:Username>"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(barcode_response_xml(), "text/xml"))
        .expect(1)
        .mount(&server)
        .await;

    let mut service = BarcodeService::new(legacy_config());
    // Legacy mode resolves to the legacy endpoints
    service.endpoints.legacy_sandbox = server.uri();

    let barcode = service.generate_barcode(&barcode_request()).await.unwrap();
    assert_eq!(barcode, "3SDEVC816223392");
}

#[tokio::test]
async fn soap_cif_exception_maps_to_vendor_fault() {
    let server = MockServer::start().await;
    let fault_xml = r#"<?xml version="1.0"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/"
            xmlns:common="http://postnl.nl/cif/services/common/">
  <s:Body>
    <common:CifException>
      <common:Errors>
        <common:ExceptionData>
          <common:Description>Check Customer</common:Description>
          <common:ErrorMsg>Customer number is invalid</common:ErrorMsg>
          <common:ErrorNumber>8</common:ErrorNumber>
        </common:ExceptionData>
      </common:Errors>
    </common:CifException>
  </s:Body>
</s:Envelope>"#;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_raw(fault_xml, "text/xml"))
        .mount(&server)
        .await;

    let mut service = BarcodeService::new(soap_config());
    service.endpoints.sandbox = server.uri();

    let error = service.generate_barcode(&barcode_request()).await.unwrap_err();
    let CifError::Vendor(fault) = error else { panic!("expected vendor fault, got {error}") };
    assert_eq!(fault.primary_message(), Some("Customer number is invalid"));
    assert_eq!(fault.primary_code(), 8);
}

#[tokio::test]
async fn soap_fault_reason_maps_to_service_down() {
    let server = MockServer::start().await;
    let fault_xml = r#"<?xml version="1.0"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
  <s:Body>
    <s:Fault>
      <s:Reason><s:Text>CIF is down for maintenance</s:Text></s:Reason>
    </s:Fault>
  </s:Body>
</s:Envelope>"#;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_raw(fault_xml, "text/xml"))
        .mount(&server)
        .await;

    let mut service = BarcodeService::new(soap_config());
    service.endpoints.sandbox = server.uri();

    let error = service.generate_barcode(&barcode_request()).await.unwrap_err();
    assert!(
        matches!(error, CifError::ServiceDown(ref text) if text == "CIF is down for maintenance")
    );
}

#[tokio::test]
async fn soap_label_wraps_content_in_typed_response() {
    let server = MockServer::start().await;
    let label_xml = r#"<?xml version="1.0"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
  <s:Body>
    <GenerateLabelResponse xmlns="http://postnl.nl/cif/services/LabellingWebService/">
      <ResponseShipments xmlns="http://postnl.nl/cif/domain/LabellingWebService/">
        <ResponseShipment>
          <Barcode>3SDEVC201611210</Barcode>
          <Labels><Label><Content>aGVsbG8=</Content></Label></Labels>
        </ResponseShipment>
      </ResponseShipments>
    </GenerateLabelResponse>
  </s:Body>
</s:Envelope>"#;
    Mock::given(method("POST"))
        .and(header(
            "SOAPAction",
            "\"http://postnl.nl/cif/services/LabellingWebService/ILabellingWebService/GenerateLabel\"",
        ))
        .and(body_string_contains("<bar:GenerateLabel>"))
        .and(body_string_contains("<bar1:Shipments>"))
        .and(body_string_contains("<bar1:Shipment>"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(label_xml, "text/xml"))
        .expect(1)
        .mount(&server)
        .await;

    let mut service = LabellingService::new(soap_config());
    service.endpoints.sandbox = server.uri();

    let shipment = Shipment::builder().barcode("3SDEVC201611210").build();
    let request =
        GenerateLabel::new(vec![shipment], LabellingMessage::default(), test_customer());

    let response = service.generate_label(&request, false).await.unwrap();
    let shipments = response.response_shipments.unwrap();
    assert_eq!(shipments[0].barcode.as_deref(), Some("3SDEVC201611210"));
    assert_eq!(
        shipments[0].labels.as_ref().unwrap()[0].content.as_deref(),
        Some("aGVsbG8=")
    );
}

#[tokio::test]
async fn soap_confirm_happy_path() {
    let server = MockServer::start().await;
    let confirm_xml = r#"<?xml version="1.0"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
  <s:Body>
    <ConfirmingResponseShipment xmlns="http://postnl.nl/cif/domain/ConfirmingWebService/">
      <Barcode>3SDEVC201611210</Barcode>
    </ConfirmingResponseShipment>
  </s:Body>
</s:Envelope>"#;
    Mock::given(method("POST"))
        .and(header(
            "SOAPAction",
            "\"http://postnl.nl/cif/services/ConfirmingWebService/IConfirmingWebService/Confirming\"",
        ))
        .and(body_string_contains("<bar:Confirming>"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(confirm_xml, "text/xml"))
        .expect(1)
        .mount(&server)
        .await;

    let mut service = ConfirmingService::new(soap_config());
    service.endpoints.sandbox = server.uri();

    let shipment = Shipment::builder().barcode("3SDEVC201611210").build();
    let request = Confirming::new(vec![shipment], test_customer());
    service.confirm(&request).await.unwrap();
}
