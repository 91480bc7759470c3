//! Creates kubeadm-style bootstrap tokens for joining new nodes to a cluster.
//!
//! A token is stored as a `bootstrap.kubernetes.io/token` secret in `kube-system`, and the
//! full `<token-id>.<token-secret>` string is handed back to the caller so it can be passed
//! on to the joining node.

pub mod cli;
pub mod create;
pub mod generator;
pub mod secret;
pub mod store;
pub mod token;

pub use create::{create_bootstrap_token, create_bootstrap_token_now, CreateTokenError};
pub use generator::{RandomTokenGenerator, TokenGenerator};
pub use secret::build_token_secret;
pub use store::{BootstrapTokenClient, SecretStore};
pub use token::{BootstrapToken, TokenFormatError};
