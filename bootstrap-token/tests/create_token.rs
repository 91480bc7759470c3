use std::{convert::Infallible, io, sync::Mutex};

use async_trait::async_trait;
use bootstrap_token::{
    create_bootstrap_token, secret::secret_data_str, BootstrapToken, SecretStore, TokenGenerator,
};
use chrono::{Duration, TimeZone, Utc};
use k8s_openapi::api::core::v1::Secret;

#[derive(Default)]
struct InMemorySecretStore {
    secrets: Mutex<Vec<Secret>>,
}

#[async_trait]
impl SecretStore for InMemorySecretStore {
    type Error = Infallible;

    async fn create(&self, secret: &Secret) -> Result<(), Self::Error> {
        self.secrets.lock().unwrap().push(secret.clone());
        Ok(())
    }
}

/// Hands out tokens from a list and upper-cases whatever it composes
struct ListTokenGenerator {
    tokens: Mutex<Vec<&'static str>>,
}

impl TokenGenerator for ListTokenGenerator {
    type Error = io::Error;

    fn generate(&self) -> Result<String, Self::Error> {
        self.tokens
            .lock()
            .unwrap()
            .pop()
            .map(str::to_owned)
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "out of tokens"))
    }

    fn compose(&self, id: &str, secret: &str) -> String {
        format!("{id}.{secret}").to_uppercase()
    }
}

#[tokio::test]
async fn each_call_creates_one_secret_and_uses_the_generators_composer() -> anyhow::Result<()> {
    let generator = ListTokenGenerator {
        tokens: Mutex::new(vec!["zzzzzz.yyyyyyyyyyyyyyyy", "abcdef.0123456789abcdef"]),
    };
    let store = InMemorySecretStore::default();
    let now = Utc.with_ymd_and_hms(2025, 2, 28, 23, 30, 0).unwrap();

    let first = create_bootstrap_token(&generator, &store, Duration::hours(1), now).await?;
    let second = create_bootstrap_token(&generator, &store, Duration::days(1), now).await?;

    assert_eq!(first, "ABCDEF.0123456789ABCDEF");
    assert_eq!(second, "ZZZZZZ.YYYYYYYYYYYYYYYY");

    let secrets = store.secrets.lock().unwrap();
    assert_eq!(secrets.len(), 2);

    let names = secrets
        .iter()
        .map(|s| s.metadata.name.clone().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["bootstrap-token-abcdef", "bootstrap-token-zzzzzz"]);

    assert_eq!(
        secret_data_str(&secrets[0], "expiration"),
        Some("2025-03-01T00:30:00Z")
    );
    assert_eq!(
        secret_data_str(&secrets[1], "expiration"),
        Some("2025-03-01T23:30:00Z")
    );

    Ok(())
}

#[tokio::test]
async fn exhausted_generator_reports_its_error() {
    let generator = ListTokenGenerator {
        tokens: Mutex::new(vec![]),
    };
    let store = InMemorySecretStore::default();

    let err = create_bootstrap_token(&generator, &store, Duration::hours(1), Utc::now())
        .await
        .unwrap_err();

    let err = anyhow::Error::from(err);
    assert_eq!(format!("{err:#}"), "failed to generate bootstrap token: out of tokens");
    assert!(store.secrets.lock().unwrap().is_empty());
}

#[test]
fn bootstrap_token_round_trips_through_display() {
    let token: BootstrapToken = "abcdef.0123456789abcdef".parse().unwrap();
    assert_eq!(token.to_string(), "abcdef.0123456789abcdef");
    assert_eq!(token.secret_name(), "bootstrap-token-abcdef");
}
