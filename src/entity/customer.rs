//! Customer entity.

use serde::{Deserialize, Serialize};

use super::{Address, EntityId, Extras};
use crate::markup::{FieldDef, MarkupEntity, MarkupValue, NsBinding, text};

/// The acting customer, sent with every request envelope.
///
/// The GlobalPack fields configure cross-border barcode generation on the
/// client side; they are not part of the wire schema and never serialize.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Customer {
    /// Correlation identifier; not part of the wire schema.
    #[serde(skip)]
    pub id: EntityId,
    /// Customer address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    /// Code of the location where shipments are collected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_location: Option<String>,
    /// Contact person.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    /// Customer code as assigned by the carrier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_code: Option<String>,
    /// Customer number as assigned by the carrier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_number: Option<String>,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Customer name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// GlobalPack customer code (client-side configuration).
    #[serde(skip)]
    pub global_pack_customer_code: Option<String>,
    /// GlobalPack barcode type (client-side configuration).
    #[serde(skip)]
    pub global_pack_barcode_type: Option<String>,
    /// Overflow fields outside the declared schema.
    #[serde(flatten)]
    pub extras: Extras,
}

impl Customer {
    /// Creates a customer from the fields every request requires.
    #[must_use]
    pub fn new(
        customer_number: impl Into<String>,
        customer_code: impl Into<String>,
        collection_location: impl Into<String>,
    ) -> Self {
        Self {
            customer_number: Some(customer_number.into()),
            customer_code: Some(customer_code.into()),
            collection_location: Some(collection_location.into()),
            ..Default::default()
        }
    }
}

impl MarkupEntity for Customer {
    fn schema() -> &'static [FieldDef<Self>] {
        const SCHEMA: &[FieldDef<Customer>] = &[
            FieldDef {
                tag: "Address",
                binding: NsBinding::Domain,
                value: |e, s| e.address.as_ref().map(|a| MarkupValue::Entity(a.markup_children(s))),
            },
            FieldDef { tag: "CollectionLocation", binding: NsBinding::Domain, value: |e, _| text(&e.collection_location) },
            FieldDef { tag: "ContactPerson", binding: NsBinding::Domain, value: |e, _| text(&e.contact_person) },
            FieldDef { tag: "CustomerCode", binding: NsBinding::Domain, value: |e, _| text(&e.customer_code) },
            FieldDef { tag: "CustomerNumber", binding: NsBinding::Domain, value: |e, _| text(&e.customer_number) },
            FieldDef { tag: "Email", binding: NsBinding::Domain, value: |e, _| text(&e.email) },
            FieldDef { tag: "Name", binding: NsBinding::Domain, value: |e, _| text(&e.name) },
        ];
        SCHEMA
    }
}
