use once_cell::sync::Lazy;
use regex::Regex;

/// Dotted-quad tokens. Octet values are not range-checked, so a token like
/// `999.999.999.999` matches and gets rewritten like any other address.
pub static IP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:\d{1,3}\.){3}\d{1,3}\b").unwrap()
});

/// Broad hostname-shaped tokens: alphanumeric at both ends, hyphens and dots
/// only in the interior. Also matches bare words and version strings, which
/// is why the address pass must run before this rule is applied.
pub static HOSTNAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[a-zA-Z0-9][-a-zA-Z0-9.]*[a-zA-Z0-9]\b").unwrap()
});

/// Builds the matcher for hostnames under `suffix`: one or more
/// alphanumeric/hyphen labels followed by the exact suffix. Anything not
/// ending in the suffix is ignored by this rule.
pub fn domain_hostname_regex(suffix: &str) -> Regex {
    let suffix = suffix.trim_start_matches('.');
    Regex::new(&format!(r"\b(?:[A-Za-z0-9-]+\.)+{}\b", regex::escape(suffix)))
        .expect("escaped suffix yields a valid pattern")
}
