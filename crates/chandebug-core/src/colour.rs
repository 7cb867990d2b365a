//! Channel colour allocation and ANSI escape rendering.

use parking_lot::Mutex;
use std::str::FromStr;

use crate::error::DebugError;

/// Control sequence introducer.
pub const CSI: &str = "\x1b[";

/// Default palette, chosen to stay readable on dark and light terminals.
pub const DEFAULT_PALETTE: [u8; 17] = [
    20, 46, 165, 226, 81, 160, 27, 28, 90, 214, 51, 1, 2, 3, 4, 5, 6,
];

/// A colour code together with its rendered escape sequences.
///
/// The sequences are derived from the code on construction and cannot be
/// set independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Colour {
    code: u8,
    start: String,
    end: String,
}

impl Colour {
    pub fn new(code: u8) -> Self {
        let start = if code < 8 {
            format!("{}{};1m", CSI, code + 30)
        } else {
            format!("{}38;5;{};1m", CSI, code)
        };
        Self {
            code,
            start,
            end: format!("{}39;22m", CSI),
        }
    }

    pub fn code(&self) -> u8 {
        self.code
    }

    /// Bold foreground sequence for this colour.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Resets foreground and boldness.
    pub fn end(&self) -> &str {
        &self.end
    }
}

/// How a palette entry is picked for a new channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColourStrategy {
    /// Walk the palette in channel creation order
    #[default]
    RoundRobin,
    /// Hash the channel name, stable regardless of creation order
    NameHash,
}

impl FromStr for ColourStrategy {
    type Err = DebugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "round-robin" | "roundrobin" => Ok(Self::RoundRobin),
            "hash" | "name-hash" => Ok(Self::NameHash),
            other => Err(DebugError::Config(format!(
                "unknown colour strategy '{}'. Must be one of: round-robin, hash",
                other
            ))),
        }
    }
}

/// Hands out palette entries to channels.
#[derive(Debug)]
pub struct ColourAllocator {
    palette: Vec<u8>,
    strategy: ColourStrategy,
    /// Index of the last entry handed out, `None` before the first call
    cursor: Mutex<Option<usize>>,
}

impl ColourAllocator {
    pub fn new(palette: Vec<u8>, strategy: ColourStrategy) -> Self {
        Self {
            palette,
            strategy,
            cursor: Mutex::new(None),
        }
    }

    pub fn palette(&self) -> &[u8] {
        &self.palette
    }

    /// Pick the colour for the next channel.
    ///
    /// Returns `None` only when the palette is empty.
    pub fn next(&self, name: &str) -> Option<Colour> {
        if self.palette.is_empty() {
            return None;
        }
        let index = match self.strategy {
            ColourStrategy::RoundRobin => self.advance(),
            ColourStrategy::NameHash => self.hash_index(name),
        };
        Some(Colour::new(self.palette[index]))
    }

    fn advance(&self) -> usize {
        let mut cursor = self.cursor.lock();
        let index = match *cursor {
            None => 0,
            Some(last) => (last + 1) % self.palette.len(),
        };
        *cursor = Some(index);
        index
    }

    fn hash_index(&self, name: &str) -> usize {
        let hash = blake3::hash(name.as_bytes());
        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&hash.as_bytes()[..8]);
        (u64::from_le_bytes(prefix) % self.palette.len() as u64) as usize
    }
}

impl Default for ColourAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_PALETTE.to_vec(), ColourStrategy::default())
    }
}
