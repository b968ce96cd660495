//! Access key credentials.

use crate::error::{OpenSearchError, Result};
use std::fmt;

/// Environment variable holding the access key id.
pub const ACCESS_KEY_ID_ENV: &str = "OPENSEARCH_ACCESS_KEY_ID";
/// Environment variable holding the access key secret.
pub const ACCESS_KEY_SECRET_ENV: &str = "OPENSEARCH_ACCESS_KEY_SECRET";

/// An access key pair used to sign every request.
///
/// The secret never shows up in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key_id: String,
    access_key_secret: String,
}

impl Credentials {
    /// Create credentials from an access key id and secret.
    ///
    /// # Errors
    ///
    /// Returns [`OpenSearchError::Config`] if either value is empty.
    ///
    /// # Example
    ///
    /// ```rust
    /// use aliyun_opensearch::Credentials;
    ///
    /// let creds = Credentials::new("LTAIxxxx", "secret").unwrap();
    /// assert_eq!(creds.access_key_id(), "LTAIxxxx");
    /// ```
    pub fn new(
        access_key_id: impl Into<String>,
        access_key_secret: impl Into<String>,
    ) -> Result<Self> {
        let access_key_id = access_key_id.into();
        let access_key_secret = access_key_secret.into();

        if access_key_id.trim().is_empty() {
            return Err(OpenSearchError::Config(
                "access key id must not be empty".to_string(),
            ));
        }
        if access_key_secret.is_empty() {
            return Err(OpenSearchError::Config(
                "access key secret must not be empty".to_string(),
            ));
        }

        Ok(Self {
            access_key_id,
            access_key_secret,
        })
    }

    /// Load credentials from `OPENSEARCH_ACCESS_KEY_ID` and
    /// `OPENSEARCH_ACCESS_KEY_SECRET`.
    pub fn from_env() -> Result<Self> {
        let id = std::env::var(ACCESS_KEY_ID_ENV)
            .map_err(|e| OpenSearchError::Config(format!("{}: {}", ACCESS_KEY_ID_ENV, e)))?;
        let secret = std::env::var(ACCESS_KEY_SECRET_ENV)
            .map_err(|e| OpenSearchError::Config(format!("{}: {}", ACCESS_KEY_SECRET_ENV, e)))?;
        Self::new(id, secret)
    }

    /// The access key id, sent as `AccessKeyId`.
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub(crate) fn access_key_secret(&self) -> &str {
        &self.access_key_secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("access_key_secret", &"***")
            .finish()
    }
}
