//! Shipment dimension entity.

use serde::{Deserialize, Serialize};

use super::{EntityId, Extras};
use crate::markup::{FieldDef, MarkupEntity, NsBinding, text};

/// Physical dimensions of a shipment. Weight is in grams, sizes in
/// millimeters, volume in cubic centimeters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Dimension {
    /// Correlation identifier; not part of the wire schema.
    #[serde(skip)]
    pub id: EntityId,
    /// Height in mm.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    /// Length in mm.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
    /// Volume in cm³.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    /// Weight in grams.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    /// Width in mm.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    /// Overflow fields outside the declared schema.
    #[serde(flatten)]
    pub extras: Extras,
}

impl Dimension {
    /// Creates a dimension from the required weight.
    #[must_use]
    pub fn new(weight: impl Into<String>) -> Self {
        Self { weight: Some(weight.into()), ..Default::default() }
    }
}

impl MarkupEntity for Dimension {
    fn schema() -> &'static [FieldDef<Self>] {
        const SCHEMA: &[FieldDef<Dimension>] = &[
            FieldDef { tag: "Height", binding: NsBinding::Domain, value: |e, _| text(&e.height) },
            FieldDef { tag: "Length", binding: NsBinding::Domain, value: |e, _| text(&e.length) },
            FieldDef { tag: "Volume", binding: NsBinding::Domain, value: |e, _| text(&e.volume) },
            FieldDef { tag: "Weight", binding: NsBinding::Domain, value: |e, _| text(&e.weight) },
            FieldDef { tag: "Width", binding: NsBinding::Domain, value: |e, _| text(&e.width) },
        ];
        SCHEMA
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_new_sets_only_weight() {
        let dimension = Dimension::new("2000");
        assert_eq!(dimension.weight.as_deref(), Some("2000"));
        let json = serde_json::to_value(dimension).unwrap();
        assert_eq!(json, serde_json::json!({"Weight": "2000"}));
    }
}
