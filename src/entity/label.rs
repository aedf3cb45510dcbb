//! Label entity.

use serde::{Deserialize, Serialize};

use super::{EntityId, Extras};

/// A generated shipping label.
///
/// `content` carries the label bytes base64-encoded; `labeltype` names the
/// part of the shipment the label belongs to (e.g. `Label`, `Return Label`,
/// `CN23`, `CP71`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Label {
    /// Correlation identifier; not part of the wire schema.
    #[serde(skip)]
    pub id: EntityId,
    /// Base64-encoded label content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Label type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labeltype: Option<String>,
    /// Overflow fields outside the declared schema.
    #[serde(flatten)]
    pub extras: Extras,
}

impl Label {
    /// A4 output format.
    pub const FORMAT_A4: u8 = 1;
    /// A6 output format.
    pub const FORMAT_A6: u8 = 2;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_deserializes_from_response_shape() {
        let raw = r#"{"Content":"aGVsbG8=","Labeltype":"Label"}"#;
        let label: Label = serde_json::from_str(raw).unwrap();
        assert_eq!(label.content.as_deref(), Some("aGVsbG8="));
        assert_eq!(label.labeltype.as_deref(), Some("Label"));
    }
}
