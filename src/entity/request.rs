//! Request envelopes, one per remote operation.
//!
//! An envelope bundles the message metadata block, the acting customer and
//! the operation payload into the exact shape the operation expects. On the
//! SOAP channel a shipment collection serializes as repeated `<Shipment>`
//! children under a single `<Shipments>` parent.

use serde::Serialize;

use super::{Barcode, Customer, EntityId, LabellingMessage, Message, Shipment};
use crate::markup::{FieldDef, MarkupEntity, MarkupValue, NsBinding};

/// Request envelope of the `GenerateBarcode` operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GenerateBarcode {
    /// Correlation identifier; not part of the wire schema.
    #[serde(skip)]
    pub id: EntityId,
    /// Message metadata.
    pub message: Message,
    /// The acting customer.
    pub customer: Customer,
    /// Barcode triple to generate from.
    pub barcode: Barcode,
}

impl GenerateBarcode {
    /// Assembles a barcode request.
    #[must_use]
    pub fn new(barcode: Barcode, customer: Customer) -> Self {
        Self { id: EntityId::new(), message: Message::new(), customer, barcode }
    }

    /// Replaces the correlation identifier, for bulk demultiplexing.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<EntityId>) -> Self {
        self.id = id.into();
        self
    }
}

impl MarkupEntity for GenerateBarcode {
    fn schema() -> &'static [FieldDef<Self>] {
        const SCHEMA: &[FieldDef<GenerateBarcode>] = &[
            FieldDef {
                tag: "Message",
                binding: NsBinding::Domain,
                value: |e, s| Some(MarkupValue::Entity(e.message.markup_children(s))),
            },
            FieldDef {
                tag: "Customer",
                binding: NsBinding::Domain,
                value: |e, s| Some(MarkupValue::Entity(e.customer.markup_children(s))),
            },
            FieldDef {
                tag: "Barcode",
                binding: NsBinding::Domain,
                value: |e, s| Some(MarkupValue::Entity(e.barcode.markup_children(s))),
            },
        ];
        SCHEMA
    }
}

/// Request envelope of the `GenerateLabel` operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GenerateLabel {
    /// Correlation identifier; not part of the wire schema.
    #[serde(skip)]
    pub id: EntityId,
    /// The acting customer.
    pub customer: Customer,
    /// Message metadata, including the requested printer output.
    pub message: LabellingMessage,
    /// Shipments to generate labels for.
    pub shipments: Vec<Shipment>,
}

impl GenerateLabel {
    /// Assembles a label request.
    #[must_use]
    pub fn new(shipments: Vec<Shipment>, message: LabellingMessage, customer: Customer) -> Self {
        Self { id: EntityId::new(), customer, message, shipments }
    }

    /// Replaces the correlation identifier, for bulk demultiplexing.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<EntityId>) -> Self {
        self.id = id.into();
        self
    }
}

impl MarkupEntity for GenerateLabel {
    fn schema() -> &'static [FieldDef<Self>] {
        const SCHEMA: &[FieldDef<GenerateLabel>] = &[
            FieldDef {
                tag: "Customer",
                binding: NsBinding::Domain,
                value: |e, s| Some(MarkupValue::Entity(e.customer.markup_children(s))),
            },
            FieldDef {
                tag: "Message",
                binding: NsBinding::Domain,
                value: |e, s| Some(MarkupValue::Entity(e.message.markup_children(s))),
            },
            FieldDef {
                tag: "Shipments",
                binding: NsBinding::Domain,
                value: |e, s| {
                    Some(MarkupValue::List {
                        item_tag: "Shipment",
                        items: e.shipments.iter().map(|sh| sh.markup_children(s)).collect(),
                    })
                },
            },
        ];
        SCHEMA
    }
}

/// Request envelope of the `Confirming` (pre-alert) operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Confirming {
    /// Correlation identifier; not part of the wire schema.
    #[serde(skip)]
    pub id: EntityId,
    /// The acting customer.
    pub customer: Customer,
    /// Message metadata.
    pub message: Message,
    /// Shipments to confirm.
    pub shipments: Vec<Shipment>,
}

impl Confirming {
    /// Assembles a confirm request.
    #[must_use]
    pub fn new(shipments: Vec<Shipment>, customer: Customer) -> Self {
        Self { id: EntityId::new(), customer, message: Message::new(), shipments }
    }

    /// Replaces the correlation identifier, for bulk demultiplexing.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<EntityId>) -> Self {
        self.id = id.into();
        self
    }
}

impl MarkupEntity for Confirming {
    fn schema() -> &'static [FieldDef<Self>] {
        const SCHEMA: &[FieldDef<Confirming>] = &[
            FieldDef {
                tag: "Customer",
                binding: NsBinding::Domain,
                value: |e, s| Some(MarkupValue::Entity(e.customer.markup_children(s))),
            },
            FieldDef {
                tag: "Message",
                binding: NsBinding::Domain,
                value: |e, s| Some(MarkupValue::Entity(e.message.markup_children(s))),
            },
            FieldDef {
                tag: "Shipments",
                binding: NsBinding::Domain,
                value: |e, s| {
                    Some(MarkupValue::List {
                        item_tag: "Shipment",
                        items: e.shipments.iter().map(|sh| sh.markup_children(s)).collect(),
                    })
                },
            },
        ];
        SCHEMA
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        entity::BarcodeType,
        markup::SoapService,
    };

    fn test_customer() -> Customer {
        Customer::new("11223344", "DEVC", "123456")
    }

    #[test]
    fn test_generate_barcode_markup_structure() {
        let request = GenerateBarcode::new(
            Barcode::new(BarcodeType::ThreeS, "DEVC", "987000000-987600000"),
            test_customer(),
        );

        let children = request.markup_children(SoapService::Barcode);
        let names: Vec<&str> = children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Message", "Customer", "Barcode"]);
    }

    #[test]
    fn test_generate_label_shipments_nest_one_level() {
        let request = GenerateLabel::new(
            vec![Shipment::builder().barcode("3SDEVC1".to_owned()).build(),
                 Shipment::builder().barcode("3SDEVC2".to_owned()).build()],
            LabellingMessage::default(),
            test_customer(),
        );

        let children = request.markup_children(SoapService::Labelling);
        let shipments = children.iter().find(|c| c.name == "Shipments").unwrap();
        assert_eq!(shipments.children.len(), 2);
        let first = shipments.children[0].as_element().unwrap();
        assert_eq!(first.name, "Shipment");
        assert_eq!(first.get_child("Barcode").unwrap().get_text().as_deref(), Some("3SDEVC1"));
    }

    #[test]
    fn test_generate_label_json_shape() {
        let request = GenerateLabel::new(
            vec![Shipment::builder().barcode("3SDEVC1").build()],
            LabellingMessage::default(),
            test_customer(),
        );

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("Customer").is_some());
        assert_eq!(json["Message"]["Printertype"], "GraphicFile|PDF");
        assert_eq!(json["Shipments"].as_array().unwrap().len(), 1);
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_with_id_sets_correlation_key() {
        let request =
            Confirming::new(vec![], test_customer()).with_id("NL-0");
        assert_eq!(request.id.as_str(), "NL-0");
    }
}
