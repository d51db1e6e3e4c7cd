use std::collections::HashMap;

/// Run-scoped consistency tables consulted before any substitute is
/// generated. Once a value has been seen, every later occurrence of the same
/// byte-for-byte key resolves to the same substitute, across all files of the
/// run. Distinct originals may collide on a generated substitute; no
/// uniqueness check is performed.
///
/// The store belongs to one engine instance. Independent runs and tests each
/// build their own.
#[derive(Debug, Default)]
pub struct MappingStore {
    ip_map: HashMap<String, String>,
    hostname_map: HashMap<String, String>,
    label_map: HashMap<String, String>,
    distinct_ips: u64,
    distinct_hostnames: u64,
}

impl MappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves an address token, calling `generate` only on first sight.
    /// The distinct counter moves exactly once per new key.
    pub fn resolve_ip(&mut self, original: &str, generate: impl FnOnce() -> String) -> String {
        if let Some(existing) = self.ip_map.get(original) {
            return existing.clone();
        }
        let substitute = generate();
        self.ip_map.insert(original.to_string(), substitute.clone());
        self.distinct_ips += 1;
        substitute
    }

    /// Resolves a whole hostname token, calling `generate` only on first
    /// sight.
    pub fn resolve_hostname(&mut self, original: &str, generate: impl FnOnce() -> String) -> String {
        if let Some(existing) = self.cached_hostname(original) {
            return existing;
        }
        let substitute = generate();
        self.record_hostname(original, substitute)
    }

    /// Previously recorded substitute for a hostname, if any.
    pub fn cached_hostname(&self, original: &str) -> Option<String> {
        self.hostname_map.get(original).cloned()
    }

    /// Records a composed hostname substitute and bumps the distinct
    /// counter. Used by the per-label policy, which assembles the substitute
    /// from label lookups before storing it whole.
    pub fn record_hostname(&mut self, original: &str, substitute: String) -> String {
        self.hostname_map.insert(original.to_string(), substitute.clone());
        self.distinct_hostnames += 1;
        substitute
    }

    /// Resolves a single subdomain label. Labels have their own table so the
    /// same label reappearing in any hostname of the run maps identically;
    /// they do not count as hostnames.
    pub fn resolve_label(&mut self, original: &str, generate: impl FnOnce() -> String) -> String {
        if let Some(existing) = self.label_map.get(original) {
            return existing.clone();
        }
        let substitute = generate();
        self.label_map.insert(original.to_string(), substitute.clone());
        substitute
    }

    pub fn distinct_ips(&self) -> u64 {
        self.distinct_ips
    }

    pub fn distinct_hostnames(&self) -> u64 {
        self.distinct_hostnames
    }

    pub fn distinct_labels(&self) -> u64 {
        self.label_map.len() as u64
    }

    /// Up to `limit` original to substitute hostname pairs, sorted by
    /// original so summary output is stable.
    pub fn sample_hostname_pairs(&self, limit: usize) -> Vec<(&str, &str)> {
        let mut pairs: Vec<_> = self
            .hostname_map
            .iter()
            .map(|(original, substitute)| (original.as_str(), substitute.as_str()))
            .collect();
        pairs.sort();
        pairs.truncate(limit);
        pairs
    }
}
