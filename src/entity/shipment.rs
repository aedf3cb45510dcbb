//! Shipment entity and its sub-structures.

use serde::{Deserialize, Serialize};

use super::{Address, Amount, Contact, Customs, Dimension, EntityId, Extras};
use crate::markup::{FieldDef, MarkupEntity, MarkupValue, NsBinding, text};

/// A single shipment.
///
/// Most fields are optional; which ones a request needs depends on the
/// product code. [`Shipment::builder`] gives a fluent way to assemble the
/// common subset:
///
/// ```
/// use postnl_cif::entity::{Address, Dimension, Shipment};
///
/// let shipment = Shipment::builder()
///     .barcode("3SDEVC201611210")
///     .product_code_delivery("3085")
///     .dimension(Dimension::new("2000"))
///     .address(Address {
///         address_type: Some("01".to_owned()),
///         zipcode: Some("3521VA".to_owned()),
///         ..Default::default()
///     })
///     .build();
/// assert_eq!(shipment.barcode.as_deref(), Some("3SDEVC201611210"));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Shipment {
    /// Correlation identifier; not part of the wire schema.
    #[serde(skip)]
    pub id: EntityId,
    /// Sender, receiver and other role addresses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<Address>>,
    /// Shipment barcode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    /// Physical dimensions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension: Option<Dimension>,
    /// Delivery product code, e.g. `3085`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_code_delivery: Option<String>,
    /// Monetary amounts (COD, insured value).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amounts: Option<Vec<Amount>>,
    /// End of the collection window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_time_stamp_end: Option<String>,
    /// Start of the collection window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_time_stamp_start: Option<String>,
    /// Notification contacts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacts: Option<Vec<Contact>>,
    /// Content description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Cost center.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_center: Option<String>,
    /// Order number of the customer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_order_number: Option<String>,
    /// Customs declaration for cross-border shipments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customs: Option<Customs>,
    /// Pickup-location delivery address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    /// Requested delivery date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<String>,
    /// Barcode of the down partner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub down_partner_barcode: Option<String>,
    /// Identifier of the down partner.
    #[serde(rename = "DownPartnerID", skip_serializing_if = "Option::is_none")]
    pub down_partner_id: Option<String>,
    /// Location code of the down partner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub down_partner_location: Option<String>,
    /// Multi-collo group memberships.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<Group>>,
    /// Expiration date of the presented ID document.
    #[serde(rename = "IDExpiration", skip_serializing_if = "Option::is_none")]
    pub id_expiration: Option<String>,
    /// Number of the presented ID document.
    #[serde(rename = "IDNumber", skip_serializing_if = "Option::is_none")]
    pub id_number: Option<String>,
    /// Type of the presented ID document.
    #[serde(rename = "IDType", skip_serializing_if = "Option::is_none")]
    pub id_type: Option<String>,
    /// Collect product code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_code_collect: Option<String>,
    /// Selected product options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_options: Option<Vec<ProductOption>>,
    /// Receiver date of birth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_date_of_birth: Option<String>,
    /// Shipment reference, printed on the label for some products.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Collect reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_collect: Option<String>,
    /// Remark.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    /// Barcode of the return shipment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_barcode: Option<String>,
    /// Reference of the return shipment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_reference: Option<String>,
    /// Overflow fields outside the declared schema.
    #[serde(flatten)]
    pub extras: Extras,
}

impl Shipment {
    /// Starts building a shipment.
    #[must_use]
    pub fn builder() -> ShipmentBuilder {
        ShipmentBuilder::default()
    }
}

impl MarkupEntity for Shipment {
    fn schema() -> &'static [FieldDef<Self>] {
        const SCHEMA: &[FieldDef<Shipment>] = &[
            FieldDef {
                tag: "Addresses",
                binding: NsBinding::Domain,
                value: |e, s| {
                    e.addresses.as_ref().map(|items| MarkupValue::List {
                        item_tag: "Address",
                        items: items.iter().map(|a| a.markup_children(s)).collect(),
                    })
                },
            },
            FieldDef { tag: "Barcode", binding: NsBinding::Domain, value: |e, _| text(&e.barcode) },
            FieldDef {
                tag: "Dimension",
                binding: NsBinding::Domain,
                value: |e, s| e.dimension.as_ref().map(|d| MarkupValue::Entity(d.markup_children(s))),
            },
            FieldDef { tag: "ProductCodeDelivery", binding: NsBinding::Domain, value: |e, _| text(&e.product_code_delivery) },
            FieldDef {
                tag: "Amounts",
                binding: NsBinding::Domain,
                value: |e, s| {
                    e.amounts.as_ref().map(|items| MarkupValue::List {
                        item_tag: "Amount",
                        items: items.iter().map(|a| a.markup_children(s)).collect(),
                    })
                },
            },
            FieldDef { tag: "CollectionTimeStampEnd", binding: NsBinding::Domain, value: |e, _| text(&e.collection_time_stamp_end) },
            FieldDef { tag: "CollectionTimeStampStart", binding: NsBinding::Domain, value: |e, _| text(&e.collection_time_stamp_start) },
            FieldDef {
                tag: "Contacts",
                binding: NsBinding::Domain,
                value: |e, s| {
                    e.contacts.as_ref().map(|items| MarkupValue::List {
                        item_tag: "Contact",
                        items: items.iter().map(|c| c.markup_children(s)).collect(),
                    })
                },
            },
            FieldDef { tag: "Content", binding: NsBinding::Domain, value: |e, _| text(&e.content) },
            FieldDef { tag: "CostCenter", binding: NsBinding::Domain, value: |e, _| text(&e.cost_center) },
            FieldDef { tag: "CustomerOrderNumber", binding: NsBinding::Domain, value: |e, _| text(&e.customer_order_number) },
            FieldDef {
                tag: "Customs",
                binding: NsBinding::Domain,
                value: |e, s| e.customs.as_ref().map(|c| MarkupValue::Entity(c.markup_children(s))),
            },
            FieldDef { tag: "DeliveryAddress", binding: NsBinding::Domain, value: |e, _| text(&e.delivery_address) },
            FieldDef { tag: "DeliveryDate", binding: NsBinding::Domain, value: |e, _| text(&e.delivery_date) },
            FieldDef { tag: "DownPartnerBarcode", binding: NsBinding::Domain, value: |e, _| text(&e.down_partner_barcode) },
            FieldDef { tag: "DownPartnerID", binding: NsBinding::Domain, value: |e, _| text(&e.down_partner_id) },
            FieldDef { tag: "DownPartnerLocation", binding: NsBinding::Domain, value: |e, _| text(&e.down_partner_location) },
            FieldDef {
                tag: "Groups",
                binding: NsBinding::Domain,
                value: |e, s| {
                    e.groups.as_ref().map(|items| MarkupValue::List {
                        item_tag: "Group",
                        items: items.iter().map(|g| g.markup_children(s)).collect(),
                    })
                },
            },
            FieldDef { tag: "IDExpiration", binding: NsBinding::Domain, value: |e, _| text(&e.id_expiration) },
            FieldDef { tag: "IDNumber", binding: NsBinding::Domain, value: |e, _| text(&e.id_number) },
            FieldDef { tag: "IDType", binding: NsBinding::Domain, value: |e, _| text(&e.id_type) },
            FieldDef { tag: "ProductCodeCollect", binding: NsBinding::Domain, value: |e, _| text(&e.product_code_collect) },
            FieldDef {
                tag: "ProductOptions",
                binding: NsBinding::Domain,
                value: |e, s| {
                    e.product_options.as_ref().map(|items| MarkupValue::List {
                        item_tag: "ProductOption",
                        items: items.iter().map(|o| o.markup_children(s)).collect(),
                    })
                },
            },
            FieldDef { tag: "ReceiverDateOfBirth", binding: NsBinding::Domain, value: |e, _| text(&e.receiver_date_of_birth) },
            FieldDef { tag: "Reference", binding: NsBinding::Domain, value: |e, _| text(&e.reference) },
            FieldDef { tag: "ReferenceCollect", binding: NsBinding::Domain, value: |e, _| text(&e.reference_collect) },
            FieldDef { tag: "Remark", binding: NsBinding::Domain, value: |e, _| text(&e.remark) },
            FieldDef { tag: "ReturnBarcode", binding: NsBinding::Domain, value: |e, _| text(&e.return_barcode) },
            FieldDef { tag: "ReturnReference", binding: NsBinding::Domain, value: |e, _| text(&e.return_reference) },
        ];
        SCHEMA
    }
}

/// Fluent builder for [`Shipment`], covering the commonly used fields.
/// Anything it does not cover can be set on the built value directly.
#[derive(Debug, Clone, Default)]
pub struct ShipmentBuilder {
    shipment: Shipment,
}

impl ShipmentBuilder {
    /// Adds one address to the shipment.
    #[must_use]
    pub fn address(mut self, address: Address) -> Self {
        self.shipment.addresses.get_or_insert_with(Vec::new).push(address);
        self
    }

    /// Sets the shipment barcode.
    #[must_use]
    pub fn barcode(mut self, barcode: impl Into<String>) -> Self {
        self.shipment.barcode = Some(barcode.into());
        self
    }

    /// Sets the shipment dimensions.
    #[must_use]
    pub fn dimension(mut self, dimension: Dimension) -> Self {
        self.shipment.dimension = Some(dimension);
        self
    }

    /// Sets the delivery product code.
    #[must_use]
    pub fn product_code_delivery(mut self, code: impl Into<String>) -> Self {
        self.shipment.product_code_delivery = Some(code.into());
        self
    }

    /// Adds one notification contact.
    #[must_use]
    pub fn contact(mut self, contact: Contact) -> Self {
        self.shipment.contacts.get_or_insert_with(Vec::new).push(contact);
        self
    }

    /// Sets the customs declaration.
    #[must_use]
    pub fn customs(mut self, customs: Customs) -> Self {
        self.shipment.customs = Some(customs);
        self
    }

    /// Sets the requested delivery date.
    #[must_use]
    pub fn delivery_date(mut self, date: impl Into<String>) -> Self {
        self.shipment.delivery_date = Some(date.into());
        self
    }

    /// Sets the shipment reference.
    #[must_use]
    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.shipment.reference = Some(reference.into());
        self
    }

    /// Sets the remark.
    #[must_use]
    pub fn remark(mut self, remark: impl Into<String>) -> Self {
        self.shipment.remark = Some(remark.into());
        self
    }

    /// Finishes building, leaving untouched fields absent.
    #[must_use]
    pub fn build(self) -> Shipment {
        self.shipment
    }
}

/// Multi-collo group membership of a shipment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Group {
    /// Correlation identifier; not part of the wire schema.
    #[serde(skip)]
    pub id: EntityId,
    /// Total number of colli in the group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_count: Option<String>,
    /// Sequence number of this collo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_sequence: Option<String>,
    /// Group type, e.g. `03` for multi-collo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_type: Option<String>,
    /// Barcode of the main shipment of the group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_barcode: Option<String>,
    /// Overflow fields outside the declared schema.
    #[serde(flatten)]
    pub extras: Extras,
}

impl MarkupEntity for Group {
    fn schema() -> &'static [FieldDef<Self>] {
        const SCHEMA: &[FieldDef<Group>] = &[
            FieldDef { tag: "GroupCount", binding: NsBinding::Domain, value: |e, _| text(&e.group_count) },
            FieldDef { tag: "GroupSequence", binding: NsBinding::Domain, value: |e, _| text(&e.group_sequence) },
            FieldDef { tag: "GroupType", binding: NsBinding::Domain, value: |e, _| text(&e.group_type) },
            FieldDef { tag: "MainBarcode", binding: NsBinding::Domain, value: |e, _| text(&e.main_barcode) },
        ];
        SCHEMA
    }
}

/// A product option selected for a shipment, e.g. evening delivery.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductOption {
    /// Correlation identifier; not part of the wire schema.
    #[serde(skip)]
    pub id: EntityId,
    /// Option characteristic, e.g. `118`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub characteristic: Option<String>,
    /// Option value within the characteristic, e.g. `006`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option: Option<String>,
    /// Overflow fields outside the declared schema.
    #[serde(flatten)]
    pub extras: Extras,
}

impl MarkupEntity for ProductOption {
    fn schema() -> &'static [FieldDef<Self>] {
        const SCHEMA: &[FieldDef<ProductOption>] = &[
            FieldDef { tag: "Characteristic", binding: NsBinding::Domain, value: |e, _| text(&e.characteristic) },
            FieldDef { tag: "Option", binding: NsBinding::Domain, value: |e, _| text(&e.option) },
        ];
        SCHEMA
    }
}
