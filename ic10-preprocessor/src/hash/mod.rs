//! String hashing as done by the game
//!
//! Device types and network channels are addressed at runtime by the CRC-32
//! of their name. `HASH("...")` values in directives are folded to that
//! number before the program is pasted into a chip.

use serde::{Deserialize, Serialize};

/// Reflected CRC-32 polynomial (IEEE 802.3)
const POLYNOMIAL: u32 = 0xEDB8_8320;

const TABLE: [u32; 256] = build_table();

const fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ POLYNOMIAL
            } else {
                crc >> 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// CRC-32 of a byte sequence
pub fn crc32(bytes: &[u8]) -> u32 {
    !bytes.iter().fold(!0u32, |crc, &byte| {
        TABLE[((crc ^ byte as u32) & 0xFF) as usize] ^ (crc >> 8)
    })
}

/// Hash of a string's UTF-8 encoding
pub fn hash(text: &str) -> u32 {
    crc32(text.as_bytes())
}

/// How a hash is written back into the program text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashFormat {
    /// 0 ..= 4294967295
    #[default]
    Unsigned,
    /// Two's-complement, the form the in-game `HASH()` displays
    Signed,
}

impl HashFormat {
    pub fn render(self, value: u32) -> String {
        match self {
            HashFormat::Unsigned => value.to_string(),
            HashFormat::Signed => (value as i32).to_string(),
        }
    }
}
