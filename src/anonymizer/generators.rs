use rand::seq::SliceRandom;
use rand::Rng;
use std::net::Ipv4Addr;

/// Reserved ranges substitute addresses are drawn from, as inclusive
/// (network, broadcast) bounds: 10.0.0.0/8, 172.16.0.0/12, 192.168.0.0/16.
const PRIVATE_RANGES: [(u32, u32); 3] = [
    (0x0A00_0000, 0x0AFF_FFFF),
    (0xAC10_0000, 0xAC1F_FFFF),
    (0xC0A8_0000, 0xC0A8_FFFF),
];

const LABEL_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Label length used when a whole hostname collapses to a single token.
pub const GENERIC_LABEL_LEN: usize = 8;

/// Label length used when subdomain labels are rewritten one by one.
pub const SCOPED_LABEL_LEN: usize = 6;

/// Picks one of the private ranges, then a uniform address within it.
/// Network and broadcast addresses are not excluded.
pub fn generate_address<R: Rng>(rng: &mut R) -> Ipv4Addr {
    let (lo, hi) = PRIVATE_RANGES.choose(rng).copied().unwrap_or(PRIVATE_RANGES[0]);
    Ipv4Addr::from(rng.gen_range(lo..=hi))
}

/// Random `[a-z0-9]` token of exactly `len` characters, drawn uniformly
/// with replacement.
pub fn generate_label<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| *LABEL_ALPHABET.choose(rng).unwrap_or(&b'a') as char)
        .collect()
}
