use std::path::PathBuf;

use chrono::Duration;
use clap::Parser;
use common::clap::parse_duration;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
pub struct Cli {
    /// Path to the kubeconfig used to reach the cluster. If not provided the usual kubeconfig
    /// resolution is used, including in-cluster configuration.
    #[clap(long, env = "KUBECONFIG_PATH")]
    pub kubeconfig: Option<PathBuf>,
    /// How long the token is valid for, e.g. `30m`, `1h` or `2d`
    #[clap(long, env = "BOOTSTRAP_TOKEN_TTL", default_value = "60m", value_parser = parse_duration)]
    pub token_ttl: Duration,
    /// Default log level, ignored if RUST_LOG is set
    #[clap(long, default_value = "info")]
    pub rust_log: String,
}
