//! Async client SDK for the PostNL CIF shipment web services.
//!
//! This crate exposes typed entities mirroring the CIF wire schemas plus
//! thin per-operation services that build a request envelope, serialize it
//! to JSON (REST) or a SOAP envelope (current/legacy SOAP), issue one HTTP
//! call, and parse the response back into typed values, or into a typed
//! error when the service returns a fault.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                       Client                         │
//! │  holds ClientConfig, derives barcode series, builds  │
//! │  request envelopes, demultiplexes bulk results       │
//! └──────────┬───────────────────────────────────────────┘
//!            │
//! ┌──────────▼───────────────────────────────────────────┐
//! │   BarcodeService / LabellingService / Confirming...  │
//! │  pick REST or SOAP from the configured mode, send    │
//! │  one HTTP call, validate + parse the response        │
//! └──────────┬───────────────────────────────────────────┘
//!            │
//! ┌──────────▼───────────────────────────────────────────┐
//! │              entity + markup layers                  │
//! │  serde (JSON) and schema-table driven XML rendering  │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```no_run
//! use postnl_cif::{
//!     Client, ClientConfig, Mode,
//!     entity::{Address, BarcodeType, Customer, Dimension, Shipment},
//! };
//!
//! # async fn example() -> postnl_cif::Result<()> {
//! let customer = Customer {
//!     address: Some(Address {
//!         address_type: Some("02".to_owned()),
//!         city: Some("Hoofddorp".to_owned()),
//!         company_name: Some("PostNL".to_owned()),
//!         house_nr: Some("42".to_owned()),
//!         street: Some("Siriusdreef".to_owned()),
//!         zipcode: Some("2132WT".to_owned()),
//!         ..Default::default()
//!     }),
//!     ..Customer::new("11223344", "DEVC", "123456")
//! };
//! let client = Client::new(ClientConfig::new(customer, "my-api-key", true, Mode::Rest));
//!
//! // Generate a domestic barcode
//! let barcode = client.generate_barcode(BarcodeType::ThreeS, None, None, false).await?;
//!
//! // Generate a label for a shipment carrying that barcode
//! let shipment = Shipment::builder()
//!     .barcode(&barcode)
//!     .product_code_delivery("3085")
//!     .dimension(Dimension::new("2000"))
//!     .address(Address {
//!         address_type: Some("01".to_owned()),
//!         first_name: Some("Peter".to_owned()),
//!         name: Some("de Ruiter".to_owned()),
//!         street: Some("Bilderdijkstraat".to_owned()),
//!         house_nr: Some("9".to_owned()),
//!         zipcode: Some("3521VA".to_owned()),
//!         city: Some("Utrecht".to_owned()),
//!         countrycode: Some("NL".to_owned()),
//!         ..Default::default()
//!     })
//!     .build();
//! let label = client.generate_label(shipment, "GraphicFile|PDF", false).await?;
//! println!("{label:?}");
//! # Ok(())
//! # }
//! ```
//!
//! # Channels
//!
//! Every operation is exposed over the REST channel and the SOAP channel
//! (with a legacy SOAP endpoint variant). [`Mode`] selects the channel for
//! the whole client; there is no automatic failover between channels. On
//! the legacy channel the security header carries the password as a SHA-1
//! digest, as the old API requires.
//!
//! # Error Handling
//!
//! All operations return [`Result<T>`](Result). Service-reported failures
//! surface as [`CifError::Vendor`] carrying every error record the service
//! returned, or [`CifError::ServiceDown`] when the service signals broad
//! unavailability. Nothing is retried internally.
//!
//! # Module Organization
//!
//! - [`client`]: the facade with convenience operations and bulk helpers
//! - [`service`]: per-operation dispatchers and channel selection
//! - [`entity`]: typed wire entities, request envelopes, responses
//! - [`markup`]: schema-table driven SOAP serialization
//! - [`config`]: credentials, mode, customer context
//! - [`error`]: the error taxonomy

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod client;
pub mod config;
pub mod entity;
pub mod error;
pub mod markup;
pub mod service;

pub use client::{Client, THREE_S_COUNTRIES, barcode_series, is_three_s_destination};
pub use config::{ClientConfig, Credentials, Mode};
pub use error::{CifError, ErrorRecord, Result, VendorFault};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify public API is accessible
        let _ = std::marker::PhantomData::<CifError>;
        let _ = std::marker::PhantomData::<Client>;
    }
}
