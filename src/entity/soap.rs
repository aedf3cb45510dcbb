//! WS-Security header entities.
//!
//! These entities only exist on the SOAP channel; they never serialize to
//! JSON and carry no overflow bag.

use sha1::{Digest, Sha1};

use crate::{
    config::Credentials,
    markup::{FieldDef, MarkupEntity, MarkupValue, NsBinding, text},
};

/// The `Security` header block wrapping a [`UsernameToken`].
#[derive(Debug, Clone)]
pub struct Security {
    /// The credential token carried by the header.
    pub username_token: UsernameToken,
}

impl Security {
    /// Wraps a token in a security header.
    #[must_use]
    pub fn new(username_token: UsernameToken) -> Self {
        Self { username_token }
    }
}

impl MarkupEntity for Security {
    fn schema() -> &'static [FieldDef<Self>] {
        const SCHEMA: &[FieldDef<Security>] = &[FieldDef {
            tag: "UsernameToken",
            binding: NsBinding::Domain,
            value: |e, s| Some(MarkupValue::Entity(e.username_token.markup_children(s))),
        }];
        SCHEMA
    }
}

/// The WS-Security username token.
///
/// On the legacy channel the password is emitted as its lowercase hex SHA-1
/// digest; the newer channel carries it in the clear. Which behavior applies
/// is fixed by the channel, not negotiated.
#[derive(Debug, Clone)]
pub struct UsernameToken {
    /// Username; absent on the newer API.
    pub username: Option<String>,
    /// Plaintext password. Digested at serialization time when `legacy`.
    pub password: Option<String>,
    /// Emit the password as a SHA-1 digest.
    pub legacy: bool,
}

impl UsernameToken {
    /// Builds the wire token for the given credentials and channel.
    #[must_use]
    pub fn from_credentials(credentials: &Credentials, legacy: bool) -> Self {
        Self {
            username: credentials.username.clone(),
            password: Some(credentials.password.clone()),
            legacy,
        }
    }
}

impl MarkupEntity for UsernameToken {
    fn schema() -> &'static [FieldDef<Self>] {
        const SCHEMA: &[FieldDef<UsernameToken>] = &[
            FieldDef { tag: "Username", binding: NsBinding::Security, value: |e, _| text(&e.username) },
            FieldDef {
                tag: "Password",
                binding: NsBinding::Security,
                value: |e, _| {
                    e.password.as_ref().map(|p| {
                        MarkupValue::Text(if e.legacy { sha1_hex(p) } else { p.clone() })
                    })
                },
            },
        ];
        SCHEMA
    }
}

/// Lowercase hex SHA-1 digest, the legacy API's password form.
fn sha1_hex(input: &str) -> String {
    hex::encode(Sha1::digest(input.as_bytes()))
}
