use bootstrap_token::{
    cli::Cli, create_bootstrap_token_now, BootstrapTokenClient, RandomTokenGenerator,
};
use clap::Parser;
use common::tracing::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.rust_log);

    tracing::debug!("kubeconfig={:?}, token_ttl={}", cli.kubeconfig, cli.token_ttl);

    let client = BootstrapTokenClient::new(&cli.kubeconfig).await?;
    let generator = RandomTokenGenerator::new();

    let token = create_bootstrap_token_now(&generator, &client, cli.token_ttl).await?;

    // The token is the only thing written to stdout so it can be captured by the caller
    println!("{token}");

    Ok(())
}
