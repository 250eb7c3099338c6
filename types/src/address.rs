//! Account address type with `tdl_` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A TIDAL account address, always prefixed with `tdl_`.
///
/// The body of the address is the hex encoding of the account's Ed25519
/// public key, so the verifying key is recoverable from the address alone
/// (see `tidal-crypto::address`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    /// The standard prefix for all TIDAL account addresses.
    pub const PREFIX: &'static str = "tdl_";

    /// Create an address from a raw string.
    ///
    /// # Panics
    /// Panics if the string does not start with `tdl_`. Use [`Address::parse`]
    /// for untrusted input.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(s.starts_with(Self::PREFIX), "address must start with tdl_");
        Self(s)
    }

    /// Create an address from untrusted input, checking the prefix.
    pub fn parse(raw: impl Into<String>) -> Option<Self> {
        let s = raw.into();
        if s.starts_with(Self::PREFIX) && s.len() > Self::PREFIX.len() {
            Some(Self(s))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part of the address after the prefix.
    pub fn body(&self) -> &str {
        &self.0[Self::PREFIX.len()..]
    }

    pub fn is_valid(&self) -> bool {
        self.0.starts_with(Self::PREFIX) && self.0.len() > Self::PREFIX.len()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Address {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
