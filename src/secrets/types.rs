//! Secret-holding types and masking helpers.
//!
//! Masking is applied independently at every boundary that renders a secret:
//! the startup log uses [`mask_password`], property diagnostics and the Vault
//! probe use [`MASK`] for any key that [`is_sensitive_key`], and the HTTP layer
//! never reads the password at all.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Replacement shown for a fully redacted value.
pub const MASK: &str = "***";

/// Partially redact a password for display.
///
/// - empty -> `***`
/// - up to 4 characters -> one `*` per character
/// - longer -> first 2 characters, `*` for the middle, last 2 characters
///
/// Lengths are counted in characters, not bytes.
pub fn mask_password(password: &str) -> String {
    let chars: Vec<char> = password.chars().collect();
    match chars.len() {
        0 => MASK.to_string(),
        len if len <= 4 => "*".repeat(len),
        len => {
            let head: String = chars[..2].iter().collect();
            let tail: String = chars[len - 2..].iter().collect();
            format!("{}{}{}", head, "*".repeat(len - 4), tail)
        }
    }
}

/// Whether a property or secret key names a password.
pub fn is_sensitive_key(key: &str) -> bool {
    key.to_lowercase().contains("password")
}

/// A string wrapper that redacts its contents in Debug, Display, and serialization.
///
/// Used for the database password and the Vault token. The value can only be
/// read through [`SecretString::expose_secret`] or rendered through
/// [`SecretString::masked`]. Memory is zeroed on drop.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct SecretString(String);

impl SecretString {
    /// Wraps a secret value.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Exposes the underlying value. Never log the result.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// Partially redacted rendering, see [`mask_password`].
    pub fn masked(&self) -> String {
        mask_password(&self.0)
    }
}

impl Serialize for SecretString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(MASK)
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretString)
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretString({})", MASK)
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for SecretString {}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
