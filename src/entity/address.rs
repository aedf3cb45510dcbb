//! Postal address entity.

use serde::{Deserialize, Serialize};

use super::{EntityId, Extras};
use crate::markup::{FieldDef, MarkupEntity, NsBinding, text};

/// A postal address attached to a shipment or customer.
///
/// `address_type` selects the role of the address on the shipment:
/// `01` receiver, `02` sender, `03` alternative sender, `04` collection,
/// `08` return, `09` delivery address for pickup locations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Address {
    /// Correlation identifier; not part of the wire schema.
    #[serde(skip)]
    pub id: EntityId,
    /// Address role code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_type: Option<String>,
    /// Area designation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    /// Building name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buildingname: Option<String>,
    /// City.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Company name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countrycode: Option<String>,
    /// Department.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Door access code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doorcode: Option<String>,
    /// First name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Floor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,
    /// House number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_nr: Option<String>,
    /// House number extension.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_nr_ext: Option<String>,
    /// Last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Region.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Remark.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    /// Street name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    /// Postal code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
    /// Overflow fields outside the declared schema.
    #[serde(flatten)]
    pub extras: Extras,
}

impl MarkupEntity for Address {
    fn schema() -> &'static [FieldDef<Self>] {
        const SCHEMA: &[FieldDef<Address>] = &[
            FieldDef { tag: "AddressType", binding: NsBinding::Domain, value: |e, _| text(&e.address_type) },
            FieldDef { tag: "Area", binding: NsBinding::Domain, value: |e, _| text(&e.area) },
            FieldDef { tag: "Buildingname", binding: NsBinding::Domain, value: |e, _| text(&e.buildingname) },
            FieldDef { tag: "City", binding: NsBinding::Domain, value: |e, _| text(&e.city) },
            FieldDef { tag: "CompanyName", binding: NsBinding::Domain, value: |e, _| text(&e.company_name) },
            FieldDef { tag: "Countrycode", binding: NsBinding::Domain, value: |e, _| text(&e.countrycode) },
            FieldDef { tag: "Department", binding: NsBinding::Domain, value: |e, _| text(&e.department) },
            FieldDef { tag: "Doorcode", binding: NsBinding::Domain, value: |e, _| text(&e.doorcode) },
            FieldDef { tag: "FirstName", binding: NsBinding::Domain, value: |e, _| text(&e.first_name) },
            FieldDef { tag: "Floor", binding: NsBinding::Domain, value: |e, _| text(&e.floor) },
            FieldDef { tag: "HouseNr", binding: NsBinding::Domain, value: |e, _| text(&e.house_nr) },
            FieldDef { tag: "HouseNrExt", binding: NsBinding::Domain, value: |e, _| text(&e.house_nr_ext) },
            FieldDef { tag: "Name", binding: NsBinding::Domain, value: |e, _| text(&e.name) },
            FieldDef { tag: "Region", binding: NsBinding::Domain, value: |e, _| text(&e.region) },
            FieldDef { tag: "Remark", binding: NsBinding::Domain, value: |e, _| text(&e.remark) },
            FieldDef { tag: "Street", binding: NsBinding::Domain, value: |e, _| text(&e.street) },
            FieldDef { tag: "Zipcode", binding: NsBinding::Domain, value: |e, _| text(&e.zipcode) },
        ];
        SCHEMA
    }
}
