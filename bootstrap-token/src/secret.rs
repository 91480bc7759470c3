//! Building the `Secret` which backs a bootstrap token.
//!
//! The layout follows the kubeadm bootstrap token secrets so that the API server's bootstrap
//! authenticator and the token cleaner controller pick it up without any further configuration.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use k8s_openapi::{api::core::v1::Secret, ByteString};
use kube::api::ObjectMeta;

use crate::token::BootstrapToken;

/// Bootstrap token secrets must live in this namespace to be considered by the API server
pub const SYSTEM_NAMESPACE: &str = "kube-system";

pub const SECRET_TYPE_BOOTSTRAP_TOKEN: &str = "bootstrap.kubernetes.io/token";

pub const BOOTSTRAP_TOKEN_ID_KEY: &str = "token-id";
pub const BOOTSTRAP_TOKEN_SECRET_KEY: &str = "token-secret";
pub const BOOTSTRAP_TOKEN_EXPIRATION_KEY: &str = "expiration";
pub const BOOTSTRAP_TOKEN_USAGE_AUTHENTICATION_KEY: &str = "usage-bootstrap-authentication";
pub const BOOTSTRAP_TOKEN_USAGE_SIGNING_KEY: &str = "usage-bootstrap-signing";
pub const BOOTSTRAP_TOKEN_EXTRA_GROUPS_KEY: &str = "auth-extra-groups";
pub const BOOTSTRAP_TOKEN_DESCRIPTION_KEY: &str = "description";

pub const DEFAULT_NODE_TOKEN_GROUP: &str = "system:bootstrappers:kubeadm:default-node-token";
pub const BOOTSTRAP_TOKEN_DESCRIPTION: &str =
    "bootstrap token generated by cluster-api-provider-openstack";

/// Create the secret for a bootstrap token which expires at `expiration`.
///
/// The secret is usable for both authentication and signing, and grants membership of the
/// default kubeadm node token group.
pub fn build_token_secret(token: &BootstrapToken, expiration: DateTime<Utc>) -> Secret {
    let expiration = expiration.to_rfc3339_opts(SecondsFormat::Secs, true);

    let data = [
        (BOOTSTRAP_TOKEN_ID_KEY, token.id()),
        (BOOTSTRAP_TOKEN_SECRET_KEY, token.secret()),
        (BOOTSTRAP_TOKEN_EXPIRATION_KEY, expiration.as_str()),
        (BOOTSTRAP_TOKEN_USAGE_AUTHENTICATION_KEY, "true"),
        (BOOTSTRAP_TOKEN_USAGE_SIGNING_KEY, "true"),
        (BOOTSTRAP_TOKEN_EXTRA_GROUPS_KEY, DEFAULT_NODE_TOKEN_GROUP),
        (BOOTSTRAP_TOKEN_DESCRIPTION_KEY, BOOTSTRAP_TOKEN_DESCRIPTION),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_owned(), ByteString(value.as_bytes().to_vec())))
    .collect::<BTreeMap<_, _>>();

    Secret {
        metadata: ObjectMeta {
            name: Some(token.secret_name()),
            namespace: Some(SYSTEM_NAMESPACE.to_owned()),
            ..Default::default()
        },
        type_: Some(SECRET_TYPE_BOOTSTRAP_TOKEN.to_owned()),
        data: Some(data),
        ..Default::default()
    }
}

/// Read a single value out of a secret's data as a string.
///
/// Returns `None` if the key is missing or the value is not valid UTF-8.
pub fn secret_data_str<'a>(secret: &'a Secret, key: &str) -> Option<&'a str> {
    secret
        .data
        .as_ref()?
        .get(key)
        .and_then(|value| std::str::from_utf8(&value.0).ok())
}
