//! Customs declaration entities for cross-border shipments.

use serde::{Deserialize, Serialize};

use super::{EntityId, Extras};
use crate::markup::{FieldDef, MarkupEntity, MarkupValue, NsBinding, text};

/// Customs declaration attached to a GlobalPack shipment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Customs {
    /// Correlation identifier; not part of the wire schema.
    #[serde(skip)]
    pub id: EntityId,
    /// Whether a certificate accompanies the shipment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,
    /// Certificate number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_nr: Option<String>,
    /// Declared content lines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<CustomsContent>>,
    /// ISO 4217 currency code of the declared values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Whether an undeliverable shipment may be treated as abandoned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle_as_non_deliverable: Option<String>,
    /// Whether an invoice accompanies the shipment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice: Option<String>,
    /// Invoice number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_nr: Option<String>,
    /// Whether a license accompanies the shipment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// License number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_nr: Option<String>,
    /// Shipment type: `Gift`, `Documents`, `Commercial Goods`,
    /// `Commercial Sample` or `Returned Goods`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipment_type: Option<String>,
    /// Overflow fields outside the declared schema.
    #[serde(flatten)]
    pub extras: Extras,
}

impl MarkupEntity for Customs {
    fn schema() -> &'static [FieldDef<Self>] {
        const SCHEMA: &[FieldDef<Customs>] = &[
            FieldDef { tag: "Certificate", binding: NsBinding::Domain, value: |e, _| text(&e.certificate) },
            FieldDef { tag: "CertificateNr", binding: NsBinding::Domain, value: |e, _| text(&e.certificate_nr) },
            FieldDef {
                tag: "Content",
                binding: NsBinding::Domain,
                value: |e, s| {
                    e.content.as_ref().map(|lines| MarkupValue::List {
                        item_tag: "Content",
                        items: lines.iter().map(|l| l.markup_children(s)).collect(),
                    })
                },
            },
            FieldDef { tag: "Currency", binding: NsBinding::Domain, value: |e, _| text(&e.currency) },
            FieldDef { tag: "HandleAsNonDeliverable", binding: NsBinding::Domain, value: |e, _| text(&e.handle_as_non_deliverable) },
            FieldDef { tag: "Invoice", binding: NsBinding::Domain, value: |e, _| text(&e.invoice) },
            FieldDef { tag: "InvoiceNr", binding: NsBinding::Domain, value: |e, _| text(&e.invoice_nr) },
            FieldDef { tag: "License", binding: NsBinding::Domain, value: |e, _| text(&e.license) },
            FieldDef { tag: "LicenseNr", binding: NsBinding::Domain, value: |e, _| text(&e.license_nr) },
            FieldDef { tag: "ShipmentType", binding: NsBinding::Domain, value: |e, _| text(&e.shipment_type) },
        ];
        SCHEMA
    }
}

/// One declared content line of a customs declaration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomsContent {
    /// Correlation identifier; not part of the wire schema.
    #[serde(skip)]
    pub id: EntityId,
    /// Country of origin, ISO 3166-1 alpha-2.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_of_origin: Option<String>,
    /// Description of the goods.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Harmonized System tariff number.
    #[serde(rename = "HSTariffNr", skip_serializing_if = "Option::is_none")]
    pub hs_tariff_nr: Option<String>,
    /// Quantity of items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    /// Declared value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Weight in grams.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    /// Overflow fields outside the declared schema.
    #[serde(flatten)]
    pub extras: Extras,
}

impl MarkupEntity for CustomsContent {
    fn schema() -> &'static [FieldDef<Self>] {
        const SCHEMA: &[FieldDef<CustomsContent>] = &[
            FieldDef { tag: "CountryOfOrigin", binding: NsBinding::Domain, value: |e, _| text(&e.country_of_origin) },
            FieldDef { tag: "Description", binding: NsBinding::Domain, value: |e, _| text(&e.description) },
            FieldDef { tag: "HSTariffNr", binding: NsBinding::Domain, value: |e, _| text(&e.hs_tariff_nr) },
            FieldDef { tag: "Quantity", binding: NsBinding::Domain, value: |e, _| text(&e.quantity) },
            FieldDef { tag: "Value", binding: NsBinding::Domain, value: |e, _| text(&e.value) },
            FieldDef { tag: "Weight", binding: NsBinding::Domain, value: |e, _| text(&e.weight) },
        ];
        SCHEMA
    }
}
