use crate::error::ConfigError;

pub const DEFAULT_WINDOW_BITS: u8 = 8;

/// Widest window a table can be built for. Keeps every decodable value
/// strictly below the `u16` miss sentinel.
pub const MAX_WINDOW_BITS: u8 = 16;

/// The first `bits` bits of a bitstream, read most significant bit first.
///
/// A window index `i` in `0..size()` is the integer those bits spell out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
    bits: u8,
}

impl Window {
    pub fn new(bits: u8) -> Result<Self, ConfigError> {
        if bits == 0 || bits > MAX_WINDOW_BITS {
            return Err(ConfigError::WindowWidth(bits));
        }
        Ok(Self { bits })
    }

    pub fn bits(&self) -> u32 {
        self.bits as u32
    }

    /// Number of distinct windows, `2^bits`.
    pub fn size(&self) -> usize {
        1 << self.bits
    }

    /// Zero-padded binary representation, always exactly `bits` characters.
    pub fn pad(&self, index: u32) -> String {
        format!("{:0width$b}", index, width = self.bits as usize)
    }

    /// Count of zero bits before the first set bit. An all-zero window
    /// yields `bits`: the run may continue past the window.
    pub fn leading_zeros(&self, index: u32) -> u32 {
        index.leading_zeros() - (u32::BITS - self.bits())
    }

    /// `len` bits starting `start` bits into the window, as an integer.
    pub fn extract(&self, index: u32, start: u32, len: u32) -> u32 {
        debug_assert!(start + len <= self.bits());
        if len == 0 {
            return 0;
        }
        (index >> (self.bits() - start - len)) & ((1 << len) - 1)
    }
}

impl Default for Window {
    fn default() -> Self {
        Self {
            bits: DEFAULT_WINDOW_BITS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_rejects_bad_widths() {
        assert_eq!(Window::new(0), Err(ConfigError::WindowWidth(0)));
        assert_eq!(Window::new(17), Err(ConfigError::WindowWidth(17)));
        assert!(Window::new(1).is_ok());
        assert!(Window::new(16).is_ok());
    }

    #[test]
    fn it_pads_to_window_width() {
        let window = Window::default();
        assert_eq!(window.size(), 256);
        assert_eq!(window.pad(0), "00000000");
        assert_eq!(window.pad(5), "00000101");
        assert_eq!(window.pad(255), "11111111");

        let narrow = Window::new(3).unwrap();
        assert_eq!(narrow.pad(1), "001");
    }

    #[test]
    fn it_counts_leading_zeros() {
        let window = Window::default();
        for i in 0..window.size() as u32 {
            let expected = (window.pad(i) + "1").find('1').unwrap() as u32;
            assert_eq!(window.leading_zeros(i), expected, "index {}", i);
        }
        assert_eq!(window.leading_zeros(0), 8);
        assert_eq!(window.leading_zeros(0b0001_0000), 3);
    }

    #[test]
    fn it_extracts_bits() {
        let window = Window::default();
        assert_eq!(window.extract(0b0110_0000, 2, 1), 1);
        assert_eq!(window.extract(0b0110_0000, 0, 3), 0b011);
        assert_eq!(window.extract(0b1010_1010, 4, 4), 0b1010);
        assert_eq!(window.extract(0b1111_1111, 8, 0), 0);
        assert_eq!(window.extract(0b1111_1111, 0, 8), 0xff);
    }
}
