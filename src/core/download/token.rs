//! Signed, time-limited download tokens
//!
//! A token binds a course, a user and the issue time:
//!
//! ```text
//! {course_id}_{user_id}_{issued_at}_{sha256-hex}
//! ```
//!
//! The signature is SHA-256 over `{course_id}_{user_id}_{issued_at}`
//! followed by the signing secret. Tokens are not stored anywhere; the
//! string plus the secret is all that is needed to check one.
//!
//! Verification runs these checks in order and stops at the first failure:
//! format, age, administrator status, signature, archive existence.

use crate::adapters::traits::{AdminDirectory, ArchiveStore, StoredArchive};
use crate::config::SecretString;
use crate::core::clock::Clock;
use crate::domain::ids::{CourseId, UserId};
use crate::domain::{Result, TokenError};
use chrono::{DateTime, Utc};
use regex::Regex;
use secrecy::ExposeSecret;
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};
use subtle::ConstantTimeEq;

/// How long a token stays valid after issue, in seconds
pub const LINK_EXPIRY_SECS: i64 = 4 * 60 * 60;

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([0-9]+)_([0-9]+)_([0-9]+)_([0-9a-f]+)$").expect("token pattern is valid")
    })
}

/// Parsed download token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadToken {
    /// Course whose archive may be downloaded
    pub course_id: CourseId,

    /// User the token was issued to
    pub user_id: UserId,

    /// Issue time, unix seconds
    pub issued_at: i64,

    /// Hex SHA-256 signature
    pub signature: String,
}

impl DownloadToken {
    /// The signed part of the token
    pub fn payload(&self) -> String {
        payload(self.course_id, self.user_id, self.issued_at)
    }
}

fn payload(course_id: CourseId, user_id: UserId, issued_at: i64) -> String {
    format!("{course_id}_{user_id}_{issued_at}")
}

impl FromStr for DownloadToken {
    type Err = TokenError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let captures = token_pattern().captures(s).ok_or(TokenError::Malformed)?;
        Ok(Self {
            course_id: captures[1].parse().map_err(|_| TokenError::Malformed)?,
            user_id: captures[2].parse().map_err(|_| TokenError::Malformed)?,
            issued_at: captures[3].parse().map_err(|_| TokenError::Malformed)?,
            signature: captures[4].to_string(),
        })
    }
}

impl fmt::Display for DownloadToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.payload(), self.signature)
    }
}

/// Token service configuration
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Signing secret
    pub secret: SecretString,
}

/// Issues and verifies download tokens
pub struct TokenService {
    config: TokenConfig,
    admins: Arc<dyn AdminDirectory>,
    store: Arc<dyn ArchiveStore>,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// Create a token service
    pub fn new(
        config: TokenConfig,
        admins: Arc<dyn AdminDirectory>,
        store: Arc<dyn ArchiveStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            admins,
            store,
            clock,
        }
    }

    fn sign(&self, payload: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(payload.as_bytes());
        hasher.update(self.config.secret.expose_secret().as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Issue a token at an explicit time
    pub fn issue_at(&self, course_id: CourseId, user_id: UserId, issued_at: i64) -> DownloadToken {
        DownloadToken {
            course_id,
            user_id,
            issued_at,
            signature: self.sign(&payload(course_id, user_id, issued_at)),
        }
    }

    /// Issue a token now
    pub fn issue(&self, course_id: CourseId, user_id: UserId) -> DownloadToken {
        self.issue_at(course_id, user_id, self.clock.now().timestamp())
    }

    /// When a token issued at `issued_at` stops working
    pub fn expires_at(issued_at: i64) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(issued_at.saturating_add(LINK_EXPIRY_SECS), 0)
    }

    /// Check a token and return the archive it unlocks
    ///
    /// # Errors
    ///
    /// Returns [`TokenError`] for the first failed check, or a storage
    /// error if the archive lookup itself fails.
    pub async fn verify(&self, token_str: &str) -> Result<(DownloadToken, StoredArchive)> {
        let token: DownloadToken = token_str.parse()?;

        let age = self.clock.now().timestamp().saturating_sub(token.issued_at);
        if !(0..=LINK_EXPIRY_SECS).contains(&age) {
            return Err(TokenError::Expired.into());
        }

        if !self.admins.is_admin(token.user_id) {
            return Err(TokenError::NotAdmin.into());
        }

        // Whole-string comparison, so a re-encoded id such as `01` fails too
        let expected = self
            .issue_at(token.course_id, token.user_id, token.issued_at)
            .to_string();
        if expected.as_bytes().ct_eq(token_str.as_bytes()).unwrap_u8() == 0 {
            return Err(TokenError::InvalidToken.into());
        }

        let archive = self
            .store
            .get(token.course_id)
            .await?
            .ok_or(TokenError::NoFile)?;

        Ok((token, archive))
    }
}
