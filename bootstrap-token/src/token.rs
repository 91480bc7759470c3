use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

/// The textual form of a bootstrap token, `<token-id>.<token-secret>`
pub const BOOTSTRAP_TOKEN_PATTERN: &str = r"^([a-z0-9]{6})\.([a-z0-9]{16})$";

pub const BOOTSTRAP_TOKEN_ID_LEN: usize = 6;
pub const BOOTSTRAP_TOKEN_SECRET_LEN: usize = 16;

/// Every secret holding a bootstrap token must be named with this prefix followed by the token ID
pub const BOOTSTRAP_TOKEN_SECRET_PREFIX: &str = "bootstrap-token-";

lazy_static! {
    static ref BOOTSTRAP_TOKEN_REGEX: Regex = Regex::new(BOOTSTRAP_TOKEN_PATTERN).unwrap();
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("the bootstrap token {token:?} was not in the form {pattern:?}")]
pub struct TokenFormatError {
    pub token: String,
    pub pattern: &'static str,
}

/// A bootstrap token which has been checked against [`BOOTSTRAP_TOKEN_PATTERN`].
///
/// The only way to get hold of one is by parsing, so anything accepting a `BootstrapToken`
/// can rely on the ID and secret having the right length and character set.
#[derive(Clone, PartialEq, Eq)]
pub struct BootstrapToken {
    id: String,
    secret: String,
}

impl BootstrapToken {
    pub fn parse(token: &str) -> Result<Self, TokenFormatError> {
        let captures = BOOTSTRAP_TOKEN_REGEX
            .captures(token)
            .ok_or_else(|| TokenFormatError {
                token: token.to_owned(),
                pattern: BOOTSTRAP_TOKEN_PATTERN,
            })?;

        // Both groups are mandatory in the pattern so a match always has them
        let (Some(id), Some(secret)) = (captures.get(1), captures.get(2)) else {
            return Err(TokenFormatError {
                token: token.to_owned(),
                pattern: BOOTSTRAP_TOKEN_PATTERN,
            });
        };

        Ok(Self {
            id: id.as_str().to_owned(),
            secret: secret.as_str().to_owned(),
        })
    }

    /// The public part of the token, safe to log
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn secret_name(&self) -> String {
        bootstrap_token_secret_name(&self.id)
    }
}

impl FromStr for BootstrapToken {
    type Err = TokenFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BootstrapToken::parse(s)
    }
}

impl Display for BootstrapToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&token_from_id_and_secret(&self.id, &self.secret))
    }
}

// Keep the secret half out of debug output
impl fmt::Debug for BootstrapToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapToken")
            .field("id", &self.id)
            .field("secret", &"<REDACTED>")
            .finish()
    }
}

pub fn token_from_id_and_secret(id: &str, secret: &str) -> String {
    format!("{id}.{secret}")
}

pub fn bootstrap_token_secret_name(id: &str) -> String {
    format!("{BOOTSTRAP_TOKEN_SECRET_PREFIX}{id}")
}
