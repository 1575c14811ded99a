//! Deterministic marker colors.
//!
//! Volume markers are tinted by the named volume (the part of the volume
//! string before the first `:`), so the same volume shows the same color
//! on every node and every run.

use serde::{Deserialize, Serialize};

/// RGB color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_tuple(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

const PALETTE: [Color; 12] = [
    Color::rgb(0x1f, 0x77, 0xb4),
    Color::rgb(0xff, 0x7f, 0x0e),
    Color::rgb(0x2c, 0xa0, 0x2c),
    Color::rgb(0xd6, 0x27, 0x28),
    Color::rgb(0x94, 0x67, 0xbd),
    Color::rgb(0x8c, 0x56, 0x4b),
    Color::rgb(0xe3, 0x77, 0xc2),
    Color::rgb(0x7f, 0x7f, 0x7f),
    Color::rgb(0xbc, 0xbd, 0x22),
    Color::rgb(0x17, 0xbe, 0xcf),
    Color::rgb(0xaa, 0x40, 0x69),
    Color::rgb(0x66, 0x99, 0x33),
];

/// FNV-1a, 64-bit. Stable across platforms, which is all the palette
/// lookup needs; collisions merely reuse a tint.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = OFFSET_BASIS;
    for &byte in bytes {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

/// Color for a volume string. Hashes the substring before the first `:`
/// (the named-volume part), or the whole string when there is none.
pub fn volume_color(volume: &str) -> Color {
    let key = volume.split(':').next().unwrap_or(volume);
    let index = (fnv1a(key.as_bytes()) % PALETTE.len() as u64) as usize;
    PALETTE[index]
}
