use std::{env::set_var, path::Path};

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use kube::{api::PostParams, Api, Client};

use crate::secret::SYSTEM_NAMESPACE;

/// Somewhere a bootstrap token secret can be written to
#[async_trait]
pub trait SecretStore {
    type Error;

    async fn create(&self, secret: &Secret) -> Result<(), Self::Error>;
}

#[async_trait]
impl SecretStore for Api<Secret> {
    type Error = kube::Error;

    async fn create(&self, secret: &Secret) -> Result<(), Self::Error> {
        // The inherent `Api::create` takes precedence over this trait method
        let created = Api::create(self, &PostParams::default(), secret).await?;

        tracing::debug!(
            "Created secret {:?} in namespace {:?}",
            created.metadata.name,
            created.metadata.namespace
        );

        Ok(())
    }
}

/// A kubernetes client scoped to the namespace that bootstrap token secrets live in
pub struct BootstrapTokenClient {
    pub secrets: Api<Secret>,
}

impl BootstrapTokenClient {
    pub async fn new(kubeconfig_path: &Option<impl AsRef<Path>>) -> anyhow::Result<Self> {
        if let Some(kubeconfig_path) = kubeconfig_path {
            set_var("KUBECONFIG", kubeconfig_path.as_ref().as_os_str());
        }

        let client = Client::try_default().await?;

        Ok(Self::from_client(client))
    }

    pub fn from_client(client: Client) -> Self {
        Self {
            secrets: Api::namespaced(client, SYSTEM_NAMESPACE),
        }
    }
}

#[async_trait]
impl SecretStore for BootstrapTokenClient {
    type Error = kube::Error;

    async fn create(&self, secret: &Secret) -> Result<(), Self::Error> {
        SecretStore::create(&self.secrets, secret).await
    }
}
