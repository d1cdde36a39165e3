//! Secret handling for the download signing key
//!
//! The signing secret is wrapped in [`secrecy::Secret`] so it is zeroed on
//! drop and never shows up in `Debug` output or logs. Reading it requires an
//! explicit `expose_secret()`.
//!
//! ```rust
//! use course_archive::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let secret = secret_string("a-long-signing-secret".to_string());
//! assert_eq!(secret.expose_secret().as_ref(), "a-long-signing-secret");
//! println!("{secret:?}"); // Secret([REDACTED ...])
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// String that can live inside a [`Secret`]
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    /// Length in characters
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    /// Raw bytes, for feeding into a hash
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Secret string: zeroed on drop, redacted in `Debug`
pub type SecretString = Secret<SecretValue>;

/// Wrap a string as a [`SecretString`]
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_secret_string_creation() {
        let secret = secret_string("signing-secret".to_string());
        assert_eq!(secret.expose_secret(), "signing-secret");
        assert_eq!(secret.expose_secret().char_count(), 14);
    }

    #[test]
    fn test_secret_debug_redacted() {
        let secret = secret_string("sensitive-data".to_string());
        let debug_output = format!("{secret:?}");
        assert!(!debug_output.contains("sensitive-data"));
    }

    #[test]
    fn test_secret_from_toml() {
        #[derive(Deserialize)]
        struct Section {
            secret: SecretString,
        }

        let section: Section = toml::from_str(r#"secret = "abc123""#).unwrap();
        assert_eq!(section.secret.expose_secret().as_bytes(), b"abc123");
    }
}
