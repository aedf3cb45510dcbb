//! Contact entity.

use serde::{Deserialize, Serialize};

use super::{EntityId, Extras};
use crate::markup::{FieldDef, MarkupEntity, NsBinding, text};

/// A contact for shipment notifications. `contact_type` is `01` for the
/// receiver and `02` for the sender.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Contact {
    /// Correlation identifier; not part of the wire schema.
    #[serde(skip)]
    pub id: EntityId,
    /// Contact role code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_type: Option<String>,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Mobile number for SMS notifications.
    #[serde(rename = "SMSNr", skip_serializing_if = "Option::is_none")]
    pub sms_nr: Option<String>,
    /// Telephone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tel_nr: Option<String>,
    /// Overflow fields outside the declared schema.
    #[serde(flatten)]
    pub extras: Extras,
}

impl Contact {
    /// Creates a contact with the given role code.
    #[must_use]
    pub fn new(contact_type: impl Into<String>) -> Self {
        Self { contact_type: Some(contact_type.into()), ..Default::default() }
    }
}

impl MarkupEntity for Contact {
    fn schema() -> &'static [FieldDef<Self>] {
        const SCHEMA: &[FieldDef<Contact>] = &[
            FieldDef { tag: "ContactType", binding: NsBinding::Domain, value: |e, _| text(&e.contact_type) },
            FieldDef { tag: "Email", binding: NsBinding::Domain, value: |e, _| text(&e.email) },
            FieldDef { tag: "SMSNr", binding: NsBinding::Domain, value: |e, _| text(&e.sms_nr) },
            FieldDef { tag: "TelNr", binding: NsBinding::Domain, value: |e, _| text(&e.tel_nr) },
        ];
        SCHEMA
    }
}
