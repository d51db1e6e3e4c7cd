use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::anonymizer::{HostnamePolicy, ScrubConfig, DEFAULT_DOMAIN_SUFFIX};

/// Scrubs IPv4 addresses and organization hostnames from .log and .xml
/// files, writing each file's anonymized copy alongside the original.
#[derive(Debug, Parser)]
#[command(name = "log_anonymizer", version, about)]
pub struct Cli {
    /// Directory to scan recursively
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Hostname matching policy
    #[arg(long, value_enum, default_value = "domain")]
    pub policy: PolicyArg,

    /// Organizational domain suffix retained by the domain policy
    #[arg(long, default_value = DEFAULT_DOMAIN_SUFFIX)]
    pub domain: String,

    /// RNG seed; substitute values become reproducible
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Rewrite any hostname-shaped token as a whole
    Generic,
    /// Rewrite only subdomains of the configured domain, label by label
    Domain,
}

impl Cli {
    pub fn into_config(self) -> ScrubConfig {
        let policy = match self.policy {
            PolicyArg::Generic => HostnamePolicy::Generic,
            PolicyArg::Domain => HostnamePolicy::DomainScoped {
                suffix: self.domain,
            },
        };
        ScrubConfig {
            root: self.root,
            policy,
            seed: self.seed,
            ..ScrubConfig::default()
        }
    }
}
