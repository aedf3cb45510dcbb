//! Monetary amount entity.

use serde::{Deserialize, Serialize};

use super::{EntityId, Extras};
use crate::markup::{FieldDef, MarkupEntity, NsBinding, text};

/// A monetary amount attached to a shipment, e.g. a COD or insured value.
///
/// `amount_type` is `01` for cash on delivery and `02` for insured value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Amount {
    /// Correlation identifier; not part of the wire schema.
    #[serde(skip)]
    pub id: EntityId,
    /// Bank account holder name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    /// Amount type code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_type: Option<String>,
    /// BIC of the receiving account.
    #[serde(rename = "BIC", skip_serializing_if = "Option::is_none")]
    pub bic: Option<String>,
    /// ISO 4217 currency code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// IBAN of the receiving account.
    #[serde(rename = "IBAN", skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
    /// Payment reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Transaction number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_number: Option<String>,
    /// The amount value, formatted with two decimals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Overflow fields outside the declared schema.
    #[serde(flatten)]
    pub extras: Extras,
}

impl MarkupEntity for Amount {
    fn schema() -> &'static [FieldDef<Self>] {
        const SCHEMA: &[FieldDef<Amount>] = &[
            FieldDef { tag: "AccountName", binding: NsBinding::Domain, value: |e, _| text(&e.account_name) },
            FieldDef { tag: "AmountType", binding: NsBinding::Domain, value: |e, _| text(&e.amount_type) },
            FieldDef { tag: "BIC", binding: NsBinding::Domain, value: |e, _| text(&e.bic) },
            FieldDef { tag: "Currency", binding: NsBinding::Domain, value: |e, _| text(&e.currency) },
            FieldDef { tag: "IBAN", binding: NsBinding::Domain, value: |e, _| text(&e.iban) },
            FieldDef { tag: "Reference", binding: NsBinding::Domain, value: |e, _| text(&e.reference) },
            FieldDef { tag: "TransactionNumber", binding: NsBinding::Domain, value: |e, _| text(&e.transaction_number) },
            FieldDef { tag: "Value", binding: NsBinding::Domain, value: |e, _| text(&e.value) },
        ];
        SCHEMA
    }
}
