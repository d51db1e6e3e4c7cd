use rand::rngs::StdRng;
use rand::SeedableRng;
use regex::Regex;
use tracing::debug;

use super::config::{HostnamePolicy, ScrubConfig};
use super::generators::{generate_address, generate_label, GENERIC_LABEL_LEN, SCOPED_LABEL_LEN};
use super::patterns::{domain_hostname_regex, HOSTNAME_REGEX, IP_REGEX};
use super::store::MappingStore;

/// The anonymization engine. Owns the mapping store and the RNG, so two
/// calls with the same input yield the same output for the lifetime of the
/// instance, and independent instances share nothing.
pub struct Anonymizer {
    policy: HostnamePolicy,
    hostname_rule: Regex,
    store: MappingStore,
    rng: StdRng,
    ip_occurrences: u64,
    hostname_occurrences: u64,
}

impl Anonymizer {
    pub fn new(config: &ScrubConfig) -> Self {
        let hostname_rule = match &config.policy {
            HostnamePolicy::Generic => HOSTNAME_REGEX.clone(),
            HostnamePolicy::DomainScoped { suffix } => domain_hostname_regex(suffix),
        };
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            policy: config.policy.clone(),
            hostname_rule,
            store: MappingStore::new(),
            rng,
            ip_occurrences: 0,
            hostname_occurrences: 0,
        }
    }

    /// Rewrites `content`, replacing every address token and then every
    /// hostname token with its run-consistent substitute. Bytes not matched
    /// by either rule are copied through untouched.
    ///
    /// The address pass runs first so the hostname rule scans text whose
    /// address tokens are already rewritten.
    pub fn anonymize(&mut self, content: &str) -> String {
        let Self {
            policy,
            hostname_rule,
            store,
            rng,
            ip_occurrences,
            hostname_occurrences,
        } = self;

        let after_addresses = rewrite_all(&IP_REGEX, content, |token| {
            *ip_occurrences += 1;
            store.resolve_ip(token, || generate_address(&mut *rng).to_string())
        });

        let rewritten = match &*policy {
            HostnamePolicy::Generic => rewrite_all(hostname_rule, &after_addresses, |token| {
                *hostname_occurrences += 1;
                store.resolve_hostname(token, || generate_label(&mut *rng, GENERIC_LABEL_LEN))
            }),
            HostnamePolicy::DomainScoped { suffix } => {
                let suffix = suffix.trim_start_matches('.');
                rewrite_all(hostname_rule, &after_addresses, |token| {
                    *hostname_occurrences += 1;
                    if let Some(existing) = store.cached_hostname(token) {
                        return existing;
                    }
                    let bare = token
                        .strip_suffix(suffix)
                        .and_then(|rest| rest.strip_suffix('.'))
                        .unwrap_or(token);
                    let mut labels = Vec::new();
                    for label in bare.split('.') {
                        labels.push(store.resolve_label(label, || {
                            generate_label(&mut *rng, SCOPED_LABEL_LEN)
                        }));
                    }
                    let substitute = format!("{}.{}", labels.join("."), suffix);
                    debug!("New hostname mapping: {} -> {}", token, substitute);
                    store.record_hostname(token, substitute)
                })
            }
        };

        rewritten
    }

    pub fn store(&self) -> &MappingStore {
        &self.store
    }

    /// Total address replacements performed, counting every occurrence.
    pub fn ip_occurrences(&self) -> u64 {
        self.ip_occurrences
    }

    /// Total hostname replacements performed, counting every occurrence.
    pub fn hostname_occurrences(&self) -> u64 {
        self.hostname_occurrences
    }
}

/// Finds all non-overlapping matches of `rule` in `text`, left to right, and
/// splices in the replacement computed for each, copying unmatched spans
/// verbatim.
fn rewrite_all(rule: &Regex, text: &str, mut replacement: impl FnMut(&str) -> String) -> String {
    let mut out = String::with_capacity(text.len());
    let mut tail = 0;
    for found in rule.find_iter(text) {
        out.push_str(&text[tail..found.start()]);
        out.push_str(&replacement(found.as_str()));
        tail = found.end();
    }
    out.push_str(&text[tail..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn scoped_engine(seed: u64) -> Anonymizer {
        Anonymizer::new(&ScrubConfig {
            seed: Some(seed),
            ..ScrubConfig::default()
        })
    }

    fn generic_engine(seed: u64) -> Anonymizer {
        Anonymizer::new(&ScrubConfig {
            policy: HostnamePolicy::Generic,
            seed: Some(seed),
            ..ScrubConfig::default()
        })
    }

    #[test]
    fn test_same_address_maps_consistently() {
        let mut engine = scoped_engine(1);
        let out = engine.anonymize("from 10.1.2.3 to 10.1.2.3");
        let replaced: Vec<_> = out.split_whitespace().collect();
        assert_eq!(replaced[1], replaced[3]);
        assert_ne!(replaced[1], "10.1.2.3");
        assert!(replaced[1].parse::<Ipv4Addr>().is_ok());
    }

    #[test]
    fn test_consistency_spans_calls() {
        let mut engine = scoped_engine(2);
        let first = engine.anonymize("gateway 192.0.2.77 up");
        let second = engine.anonymize("gateway 192.0.2.77 up");
        assert_eq!(first, second);
    }

    #[test]
    fn test_lenient_octets_are_rewritten() {
        let mut engine = scoped_engine(3);
        let out = engine.anonymize("bogus 999.999.999.999 seen");
        assert!(!out.contains("999.999.999.999"));
    }

    #[test]
    fn test_untouched_bytes_survive() {
        let mut engine = scoped_engine(4);
        let input = "<event level=\"warn\">nothing sensitive here</event>\n";
        assert_eq!(engine.anonymize(input), input);
    }

    #[test]
    fn test_scoped_policy_preserves_suffix_and_structure() {
        let mut engine = scoped_engine(5);
        let out = engine.anonymize("ping db1.internal.example.org now");
        let token = out.split_whitespace().nth(1).unwrap();
        assert!(token.ends_with(".example.org"));
        let bare = token.strip_suffix(".example.org").unwrap();
        let labels: Vec<_> = bare.split('.').collect();
        assert_eq!(labels.len(), 2);
        for label in labels {
            assert_eq!(label.len(), SCOPED_LABEL_LEN);
            assert!(label
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_scoped_policy_reuses_labels_across_hostnames() {
        let mut engine = scoped_engine(6);
        let out = engine.anonymize("web.shared.example.org db.shared.example.org");
        let tokens: Vec<_> = out.split_whitespace().collect();
        let tail = |t: &str| t.split('.').nth(1).unwrap().to_string();
        assert_eq!(tail(tokens[0]), tail(tokens[1]));
        assert_ne!(tokens[0], tokens[1]);
        assert_eq!(engine.store().distinct_labels(), 3);
    }

    #[test]
    fn test_scoped_policy_ignores_foreign_suffix() {
        let mut engine = scoped_engine(7);
        let out = engine.anonymize("keep mail.example.com as is");
        assert_eq!(out, "keep mail.example.com as is");
        assert_eq!(engine.store().distinct_hostnames(), 0);
    }

    #[test]
    fn test_generic_policy_rewrites_whole_tokens() {
        let mut engine = generic_engine(8);
        let out = engine.anonymize("node-3.corp");
        assert_eq!(out.len(), GENERIC_LABEL_LEN);
        assert!(out
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_counters_track_distinct_and_occurrences() {
        let mut engine = scoped_engine(9);
        engine.anonymize("10.0.0.1 10.0.0.1 10.0.0.1 10.0.0.2");
        assert_eq!(engine.store().distinct_ips(), 2);
        assert_eq!(engine.ip_occurrences(), 4);
    }

    #[test]
    fn test_worked_example_runs_twice() {
        let input = "Connect from 10.1.2.3 to 10.1.2.3 and host1.example.org";
        let mut engine = scoped_engine(10);
        let first = engine.anonymize(input);
        let second = engine.anonymize(input);
        assert_eq!(first, second);

        let tokens: Vec<_> = first.split_whitespace().collect();
        assert_eq!(tokens[2], tokens[4]);
        assert!(tokens[2].parse::<Ipv4Addr>().is_ok());

        let host = tokens[6];
        assert!(host.ends_with(".example.org"));
        let label = host.strip_suffix(".example.org").unwrap();
        assert_eq!(label.len(), SCOPED_LABEL_LEN);
        assert!(label
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }
}
