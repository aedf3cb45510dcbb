//! Message metadata entities.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{EntityId, Extras};
use crate::markup::{FieldDef, MarkupEntity, NsBinding, text};

/// Timestamp format the CIF services expect.
const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Message metadata block present in every request envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Message {
    /// Correlation identifier; not part of the wire schema.
    #[serde(skip)]
    pub id: EntityId,
    /// Message identifier within the request.
    #[serde(rename = "MessageID", skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Creation timestamp, `dd-mm-yyyy hh:mm:ss`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_time_stamp: Option<String>,
    /// Overflow fields outside the declared schema.
    #[serde(flatten)]
    pub extras: Extras,
}

impl Message {
    /// Creates a message block with id `1` and the current timestamp.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: EntityId::new(),
            message_id: Some("1".to_owned()),
            message_time_stamp: Some(Utc::now().format(TIMESTAMP_FORMAT).to_string()),
            extras: Extras::default(),
        }
    }
}

impl Default for Message {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupEntity for Message {
    fn schema() -> &'static [FieldDef<Self>] {
        const SCHEMA: &[FieldDef<Message>] = &[
            FieldDef { tag: "MessageID", binding: NsBinding::Domain, value: |e, _| text(&e.message_id) },
            FieldDef { tag: "MessageTimeStamp", binding: NsBinding::Domain, value: |e, _| text(&e.message_time_stamp) },
        ];
        SCHEMA
    }
}

/// Message metadata block for label requests, which additionally names the
/// requested printer output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LabellingMessage {
    /// Correlation identifier; not part of the wire schema.
    #[serde(skip)]
    pub id: EntityId,
    /// Message identifier within the request.
    #[serde(rename = "MessageID", skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Creation timestamp, `dd-mm-yyyy hh:mm:ss`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_time_stamp: Option<String>,
    /// Requested printer output, e.g. `GraphicFile|PDF`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub printertype: Option<String>,
    /// Overflow fields outside the declared schema.
    #[serde(flatten)]
    pub extras: Extras,
}

impl LabellingMessage {
    /// Creates a labelling message for the given printer type.
    #[must_use]
    pub fn new(printertype: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            message_id: Some("1".to_owned()),
            message_time_stamp: Some(Utc::now().format(TIMESTAMP_FORMAT).to_string()),
            printertype: Some(printertype.into()),
            extras: Extras::default(),
        }
    }
}

impl Default for LabellingMessage {
    fn default() -> Self {
        Self::new("GraphicFile|PDF")
    }
}

impl MarkupEntity for LabellingMessage {
    fn schema() -> &'static [FieldDef<Self>] {
        const SCHEMA: &[FieldDef<LabellingMessage>] = &[
            FieldDef { tag: "MessageID", binding: NsBinding::Domain, value: |e, _| text(&e.message_id) },
            FieldDef { tag: "MessageTimeStamp", binding: NsBinding::Domain, value: |e, _| text(&e.message_time_stamp) },
            FieldDef { tag: "Printertype", binding: NsBinding::Domain, value: |e, _| text(&e.printertype) },
        ];
        SCHEMA
    }
}
