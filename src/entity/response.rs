//! Typed response entities.

use serde::{Deserialize, Serialize};

use super::{EntityId, Extras, Label};

/// Response of the `GenerateBarcode` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GenerateBarcodeResponse {
    /// Correlation identifier; not part of the wire schema.
    #[serde(skip)]
    pub id: EntityId,
    /// The generated barcode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    /// Overflow fields outside the declared schema.
    #[serde(flatten)]
    pub extras: Extras,
}

/// Response of the `GenerateLabel` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GenerateLabelResponse {
    /// Correlation identifier; not part of the wire schema.
    #[serde(skip)]
    pub id: EntityId,
    /// Labels merged across shipments, when merged output was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merged_labels: Option<Vec<MergedLabel>>,
    /// One entry per shipment in the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_shipments: Option<Vec<ResponseShipment>>,
    /// Overflow fields outside the declared schema.
    #[serde(flatten)]
    pub extras: Extras,
}

/// A label merged across several shipments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MergedLabel {
    /// Correlation identifier; not part of the wire schema.
    #[serde(skip)]
    pub id: EntityId,
    /// Barcodes of the shipments covered by this label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcodes: Option<Vec<String>>,
    /// The merged labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<Label>>,
    /// Overflow fields outside the declared schema.
    #[serde(flatten)]
    pub extras: Extras,
}

/// Per-shipment block of a label response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseShipment {
    /// Correlation identifier; not part of the wire schema.
    #[serde(skip)]
    pub id: EntityId,
    /// Barcode of the shipment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    /// Product code the label was generated for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_code_delivery: Option<String>,
    /// Generated labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<Label>>,
    /// Warnings raised while generating.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<Warning>>,
    /// Overflow fields outside the declared schema.
    #[serde(flatten)]
    pub extras: Extras,
}

/// A non-fatal warning attached to a response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Warning {
    /// Correlation identifier; not part of the wire schema.
    #[serde(skip)]
    pub id: EntityId,
    /// Warning code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Warning description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Overflow fields outside the declared schema.
    #[serde(flatten)]
    pub extras: Extras,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_barcode_response_deserializes() {
        let raw = r#"{"Barcode":"3SDEVC816223392"}"#;
        let response: GenerateBarcodeResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.barcode.as_deref(), Some("3SDEVC816223392"));
    }

    #[test]
    fn test_label_response_deserializes() {
        let raw = r#"{
            "ResponseShipments": [{
                "Barcode": "3SDEVC201611210",
                "ProductCodeDelivery": "3085",
                "Labels": [{"Content": "aGVsbG8=", "Labeltype": "Label"}],
                "Warnings": [{"Code": "01", "Description": "deprecated product code"}]
            }]
        }"#;

        let response: GenerateLabelResponse = serde_json::from_str(raw).unwrap();
        let shipments = response.response_shipments.unwrap();
        assert_eq!(shipments.len(), 1);
        assert_eq!(shipments[0].barcode.as_deref(), Some("3SDEVC201611210"));
        let labels = shipments[0].labels.as_ref().unwrap();
        assert_eq!(labels[0].content.as_deref(), Some("aGVsbG8="));
        let warnings = shipments[0].warnings.as_ref().unwrap();
        assert_eq!(warnings[0].code.as_deref(), Some("01"));
    }

    #[test]
    fn test_unknown_response_fields_land_in_extras() {
        let raw = r#"{"Barcode":"3SDEVC1","NextBarcode":"3SDEVC2"}"#;
        let response: GenerateBarcodeResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.extras.get("NextBarcode").and_then(|v| v.as_str()), Some("3SDEVC2"));
    }
}
