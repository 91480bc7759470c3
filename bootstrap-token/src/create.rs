use chrono::{DateTime, Duration, Utc};
use common::time;
use k8s_openapi::api::core::v1::Secret;
use thiserror::Error;

use crate::{
    generator::TokenGenerator,
    secret::{
        build_token_secret, secret_data_str, BOOTSTRAP_TOKEN_ID_KEY, BOOTSTRAP_TOKEN_SECRET_KEY,
    },
    store::SecretStore,
    token::{BootstrapToken, TokenFormatError},
};

#[derive(Error, Debug)]
pub enum CreateTokenError<G, P> {
    #[error("failed to generate bootstrap token")]
    Generation(#[source] G),
    #[error("failed to persist bootstrap token secret")]
    Persistence(#[source] P),
    #[error("generated bootstrap token was invalid, there might be a bug in the token generator")]
    GeneratedTokenInvalid(#[source] TokenFormatError),
    #[error("token expiration {now} + {ttl} is outside the supported date range")]
    ExpirationOutOfRange { now: DateTime<Utc>, ttl: Duration },
    #[error("bootstrap token secret is missing its '{0}' entry")]
    IncompleteSecret(&'static str),
}

/// The token ID and secret as they are recorded in the secret's data
fn stored_token_parts(secret: &Secret) -> Result<(&str, &str), &'static str> {
    let id = secret_data_str(secret, BOOTSTRAP_TOKEN_ID_KEY).ok_or(BOOTSTRAP_TOKEN_ID_KEY)?;
    let token_secret =
        secret_data_str(secret, BOOTSTRAP_TOKEN_SECRET_KEY).ok_or(BOOTSTRAP_TOKEN_SECRET_KEY)?;

    Ok((id, token_secret))
}

/// Create a new bootstrap token which is valid for `ttl` from `now`, store it as a secret and
/// return the full token.
///
/// Nothing is written to the store unless the token has been generated and validated, so an
/// error means no secret was created.
pub async fn create_bootstrap_token<G, S>(
    generator: &G,
    store: &S,
    ttl: Duration,
    now: DateTime<Utc>,
) -> Result<String, CreateTokenError<G::Error, S::Error>>
where
    G: TokenGenerator,
    S: SecretStore + Sync,
{
    let token = generator
        .generate()
        .map_err(CreateTokenError::Generation)?;

    let expiration = now
        .checked_add_signed(ttl)
        .ok_or(CreateTokenError::ExpirationOutOfRange { now, ttl })?;

    let token = BootstrapToken::parse(&token).map_err(|e| {
        tracing::error!("Token generator produced a malformed bootstrap token: {}", e);
        CreateTokenError::GeneratedTokenInvalid(e)
    })?;

    let secret = build_token_secret(&token, expiration);

    tracing::info!(
        "Creating bootstrap token {} expiring at {}",
        token.id(),
        expiration
    );

    // Checked before the write so that a malformed secret is never persisted
    let (id, token_secret) = stored_token_parts(&secret).map_err(|key| {
        tracing::error!("Built bootstrap token secret is missing '{}'", key);
        CreateTokenError::IncompleteSecret(key)
    })?;

    store
        .create(&secret)
        .await
        .map_err(CreateTokenError::Persistence)?;

    Ok(generator.compose(id, token_secret))
}

/// As [`create_bootstrap_token`] using the current time
pub async fn create_bootstrap_token_now<G, S>(
    generator: &G,
    store: &S,
    ttl: Duration,
) -> Result<String, CreateTokenError<G::Error, S::Error>>
where
    G: TokenGenerator,
    S: SecretStore + Sync,
{
    create_bootstrap_token(generator, store, ttl, time::now()).await
}
