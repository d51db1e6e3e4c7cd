use std::path::PathBuf;

/// File extensions (without the dot) eligible for processing.
pub const DEFAULT_EXTENSIONS: [&str; 2] = ["log", "xml"];

/// Organizational suffix the domain-scoped policy retains.
pub const DEFAULT_DOMAIN_SUFFIX: &str = "example.org";

/// Which tokens the hostname pass rewrites. Chosen once at startup; the two
/// policies keep separate mapping granularity and are never combined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostnamePolicy {
    /// Any hostname-shaped token, mapped whole to a single random token.
    /// Deliberately broad: plain words and version strings match too.
    Generic,

    /// Only tokens ending in the given organizational suffix. The suffix is
    /// kept; each subdomain label in front of it is mapped separately, so
    /// identical labels map identically across hostnames.
    DomainScoped { suffix: String },
}

/// Startup-fixed configuration for one anonymization run.
#[derive(Debug, Clone)]
pub struct ScrubConfig {
    /// Directory whose tree is scanned for eligible files
    pub root: PathBuf,

    /// Extensions a file must carry to be processed
    pub extensions: Vec<String>,

    /// Hostname matching policy
    pub policy: HostnamePolicy,

    /// Seed for the substitution RNG; None draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for ScrubConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            policy: HostnamePolicy::DomainScoped {
                suffix: DEFAULT_DOMAIN_SUFFIX.to_string(),
            },
            seed: None,
        }
    }
}
