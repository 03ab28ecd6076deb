//! Deterministic frame colors.
//!
//! A frame's color depends on its label only, through 64-bit FNV-1a, so
//! the same group gets the same color everywhere in a diagram and across
//! runs and platforms.

const FNV1A_OFFSET: u64 = 0xcbf29ce484222325;
const FNV1A_PRIME: u64 = 0x100000001b3;

/// Warm flamegraph palette
pub const PALETTE: [&str; 12] = [
    "rgb(227, 91, 47)",
    "rgb(240, 126, 48)",
    "rgb(245, 160, 60)",
    "rgb(250, 190, 75)",
    "rgb(236, 108, 72)",
    "rgb(219, 70, 55)",
    "rgb(247, 142, 86)",
    "rgb(252, 205, 100)",
    "rgb(232, 120, 35)",
    "rgb(210, 85, 40)",
    "rgb(244, 175, 110)",
    "rgb(238, 150, 30)",
];

/// 64-bit FNV-1a hash
pub fn fnv1a64(bytes: &[u8]) -> u64 {
    let mut h = FNV1A_OFFSET;
    for &b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(FNV1A_PRIME);
    }
    h
}

/// Fill color for a frame label
pub fn get_node_color(label: &str) -> &'static str {
    let idx = fnv1a64(label.as_bytes()) % PALETTE.len() as u64;
    PALETTE[idx as usize]
}
