//! Typed wire entities mirroring the CIF schemas.
//!
//! Every entity is a plain struct with optional, PascalCase-serialized
//! fields. Unset fields are omitted from both the JSON and the markup
//! output. Each entity also carries:
//!
//! - an [`EntityId`], assigned at construction and independent of any
//!   business identity; bulk operations use it as a correlation key;
//! - an [`Extras`] overflow bag for fields outside the declared schema.
//!   Overflow entries serialize to JSON after the declared fields, in
//!   insertion order, and are deliberately excluded from markup output
//!   (the SOAP schema is fixed).
//!
//! Entities with many optional fields implement [`Default`], so partial
//! construction uses struct-update syntax:
//!
//! ```
//! use postnl_cif::entity::Address;
//!
//! let address = Address {
//!     address_type: Some("01".to_owned()),
//!     city: Some("Hoofddorp".to_owned()),
//!     ..Default::default()
//! };
//! assert!(address.street.is_none());
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CifError, Result};

mod address;
mod amount;
mod barcode;
mod contact;
mod customer;
mod customs;
mod dimension;
mod label;
mod message;
pub mod request;
pub mod response;
pub mod soap;
mod shipment;

pub use address::Address;
pub use amount::Amount;
pub use barcode::{Barcode, BarcodeType};
pub use contact::Contact;
pub use customer::Customer;
pub use customs::{Customs, CustomsContent};
pub use dimension::Dimension;
pub use label::Label;
pub use message::{LabellingMessage, Message};
pub use shipment::{Group, ProductOption, Shipment, ShipmentBuilder};

/// Stable identifier assigned to every entity at construction.
///
/// Defaults to a fresh UUID; bulk operations overwrite it with a
/// caller-supplied correlation key so results can be demultiplexed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(String);

impl EntityId {
    /// A fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Insertion-ordered overflow bag for fields outside an entity's declared
/// schema.
///
/// Values assigned to names the entity does not declare land here instead of
/// being dropped, and unknown fields of a response deserialize into it.
/// Overflow entries appear in JSON output after the declared fields; markup
/// output never includes them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Extras {
    entries: IndexMap<String, serde_json::Value>,
}

impl Extras {
    /// Sets an overflow field, extending the bag when the name is new.
    ///
    /// # Errors
    ///
    /// Returns [`CifError::InvalidArgument`] when the name is empty.
    pub fn set(
        &mut self,
        name: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Result<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(CifError::InvalidArgument("overflow field name is empty".to_owned()));
        }
        self.entries.insert(name, value.into());
        Ok(())
    }

    /// Looks up an overflow field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.entries.get(name)
    }

    /// Whether the bag holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries in the bag.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &serde_json::Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
