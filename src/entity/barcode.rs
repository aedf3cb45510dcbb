//! Barcode entity and barcode type codes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{EntityId, Extras};
use crate::{
    error::CifError,
    markup::{FieldDef, MarkupEntity, MarkupValue, NsBinding, text},
};

/// Barcode type code.
///
/// `2S` and `3S` are domestic/EU parcel types; the remaining codes are
/// GlobalPack (rest-of-world) product types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarcodeType {
    /// Domestic mailbox parcel.
    #[serde(rename = "2S")]
    TwoS,
    /// Domestic/EU parcel.
    #[serde(rename = "3S")]
    ThreeS,
    /// GlobalPack combi-label.
    #[serde(rename = "CC")]
    Cc,
    /// GlobalPack.
    #[serde(rename = "CD")]
    Cd,
    /// GlobalPack.
    #[serde(rename = "CF")]
    Cf,
    /// GlobalPack.
    #[serde(rename = "CP")]
    Cp,
    /// GlobalPack.
    #[serde(rename = "CX")]
    Cx,
}

impl BarcodeType {
    /// The wire representation of the type code.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TwoS => "2S",
            Self::ThreeS => "3S",
            Self::Cc => "CC",
            Self::Cd => "CD",
            Self::Cf => "CF",
            Self::Cp => "CP",
            Self::Cx => "CX",
        }
    }

    /// Whether this is a GlobalPack (rest-of-world) type.
    #[must_use]
    pub fn is_global_pack(self) -> bool {
        !matches!(self, Self::TwoS | Self::ThreeS)
    }
}

impl std::fmt::Display for BarcodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BarcodeType {
    type Err = CifError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2S" => Ok(Self::TwoS),
            "3S" => Ok(Self::ThreeS),
            "CC" => Ok(Self::Cc),
            "CD" => Ok(Self::Cd),
            "CF" => Ok(Self::Cf),
            "CP" => Ok(Self::Cp),
            "CX" => Ok(Self::Cx),
            other => Err(CifError::InvalidBarcode(format!("Barcode type `{other}` is invalid"))),
        }
    }
}

/// The barcode triple sent to the barcode web service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Barcode {
    /// Correlation identifier; not part of the wire schema.
    #[serde(skip)]
    pub id: EntityId,
    /// Barcode type code.
    #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
    pub barcode_type: Option<BarcodeType>,
    /// Customer-specific range, usually the customer code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    /// Series (number pool) to draw the barcode from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serie: Option<String>,
    /// Overflow fields outside the declared schema.
    #[serde(flatten)]
    pub extras: Extras,
}

impl Barcode {
    /// Creates a barcode triple.
    #[must_use]
    pub fn new(
        barcode_type: BarcodeType,
        range: impl Into<String>,
        serie: impl Into<String>,
    ) -> Self {
        Self {
            barcode_type: Some(barcode_type),
            range: Some(range.into()),
            serie: Some(serie.into()),
            ..Default::default()
        }
    }
}

impl MarkupEntity for Barcode {
    fn schema() -> &'static [FieldDef<Self>] {
        const SCHEMA: &[FieldDef<Barcode>] = &[
            FieldDef {
                tag: "Type",
                binding: NsBinding::Domain,
                value: |e, _| e.barcode_type.map(|t| MarkupValue::Text(t.to_string())),
            },
            FieldDef { tag: "Range", binding: NsBinding::Domain, value: |e, _| text(&e.range) },
            FieldDef { tag: "Serie", binding: NsBinding::Domain, value: |e, _| text(&e.serie) },
        ];
        SCHEMA
    }
}
