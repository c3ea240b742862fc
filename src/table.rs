use std::fmt;
use std::num::NonZeroU32;

use crate::error::ConfigError;
use crate::window::Window;

/// Decoded value reserved for windows that cannot be decoded.
pub const MISS: u16 = u16::MAX;

/// One table slot: the decoded value and how many bits its codeword takes.
///
/// `len == 0` exactly when `value == MISS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub value: u16,
    pub len: u8,
}

impl Entry {
    pub const MISS: Entry = Entry { value: MISS, len: 0 };

    pub fn is_miss(&self) -> bool {
        self.len == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Code {
    Unary,
    Gamma,
    Zeta(NonZeroU32),
}

impl Code {
    pub fn zeta(k: u32) -> Result<Self, ConfigError> {
        NonZeroU32::new(k)
            .map(Code::Zeta)
            .ok_or(ConfigError::ZetaParameter)
    }

    /// Name of the generated constant, without the `_TABLE` suffix.
    pub fn const_name(&self) -> String {
        match self {
            Code::Unary => "UNARY".to_string(),
            Code::Gamma => "GAMMA".to_string(),
            Code::Zeta(k) => format!("ZETA{}_M2L", k),
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Code::Unary => write!(f, "unary"),
            Code::Gamma => write!(f, "gamma"),
            Code::Zeta(k) => write!(f, "zeta{}", k),
        }
    }
}

/// Decode table for one code, one entry per window index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    pub(crate) code: Code,
    pub(crate) window: Window,
    pub(crate) entries: Vec<Entry>,
}

impl CodeTable {
    pub fn code(&self) -> Code {
        self.code
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Entry {
        self.entries[index]
    }

    /// Looks up the next `window.bits()` bits of a stream. `None` means the
    /// codeword does not complete within the window.
    #[inline]
    pub fn decode(&self, index: usize) -> Option<(u16, u8)> {
        let entry = self.entries[index];
        if entry.is_miss() {
            None
        } else {
            Some((entry.value, entry.len))
        }
    }

    pub fn misses(&self) -> usize {
        self.entries.iter().filter(|e| e.is_miss()).count()
    }
}
