mod error;
pub mod packed;
pub mod render;
mod table;
mod table_gen;
mod window;

pub use error::{ConfigError, PackedError};
pub use table::{Code, CodeTable, Entry, MISS};
pub use table_gen::{gamma, minimal_binary, unary, zeta};
pub use window::{Window, DEFAULT_WINDOW_BITS, MAX_WINDOW_BITS};

use log::info;
use std::default::Default;

pub const DEFAULT_ZETA_K: u32 = 3;

/// Unary and gamma plus this many zeta tables fill a packed file's `u8` count.
pub const MAX_ZETA_TABLES: usize = u8::MAX as usize - 2;

#[derive(Debug, Clone)]
pub struct TableOptions {
    pub window_bits: u8,
    pub zeta_ks: Vec<u32>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            window_bits: DEFAULT_WINDOW_BITS,
            zeta_ks: vec![DEFAULT_ZETA_K],
        }
    }
}

/// Unary, gamma and zeta decode tables sharing one window width.
#[derive(Debug, Clone)]
pub struct Tables {
    window: Window,
    unary: CodeTable,
    gamma: CodeTable,
    zeta: Vec<CodeTable>,
}

impl Tables {
    pub fn new(options: &TableOptions) -> Result<Self, ConfigError> {
        let window = Window::new(options.window_bits)?;
        if options.zeta_ks.len() > MAX_ZETA_TABLES {
            return Err(ConfigError::TooManyTables(options.zeta_ks.len()));
        }

        let mut codes = Vec::with_capacity(options.zeta_ks.len());
        for &k in &options.zeta_ks {
            let code = Code::zeta(k)?;
            if codes.contains(&code) {
                return Err(ConfigError::DuplicateZeta(k));
            }
            codes.push(code);
        }

        let tables = Self {
            window,
            unary: CodeTable::new(Code::Unary, window),
            gamma: CodeTable::new(Code::Gamma, window),
            zeta: codes
                .into_iter()
                .map(|code| CodeTable::new(code, window))
                .collect(),
        };
        info!(
            "built {} tables for {}-bit window",
            tables.iter().count(),
            window.bits()
        );
        Ok(tables)
    }

    pub(crate) fn from_parts(
        window: Window,
        unary: CodeTable,
        gamma: CodeTable,
        zeta: Vec<CodeTable>,
    ) -> Self {
        Self {
            window,
            unary,
            gamma,
            zeta,
        }
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn unary(&self) -> &CodeTable {
        &self.unary
    }

    pub fn gamma(&self) -> &CodeTable {
        &self.gamma
    }

    pub fn zeta(&self, k: u32) -> Option<&CodeTable> {
        self.zeta
            .iter()
            .find(|table| matches!(table.code(), Code::Zeta(z) if z.get() == k))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CodeTable> {
        [&self.unary, &self.gamma]
            .into_iter()
            .chain(self.zeta.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_builds_default_tables() {
        let tables = Tables::new(&TableOptions::default()).unwrap();
        assert_eq!(tables.window().bits(), 8);

        let codes: Vec<String> = tables.iter().map(|t| t.code().to_string()).collect();
        assert_eq!(codes, ["unary", "gamma", "zeta3"]);
        for table in tables.iter() {
            assert_eq!(table.len(), 256);
            assert_eq!(table.decode(0), None);
        }

        assert_eq!(tables.unary().decode(0b0001_0000), Some((3, 4)));
        assert_eq!(tables.gamma().decode(0b0110_0000), Some((2, 3)));
        assert_eq!(tables.zeta(3).unwrap().decode(0b1000_0000), Some((0, 3)));
        assert!(tables.zeta(2).is_none());
    }

    #[test]
    fn it_keeps_zeta_tables_independent() {
        let tables = Tables::new(&TableOptions {
            window_bits: 8,
            zeta_ks: vec![4, 1, 3, 2],
        })
        .unwrap();

        let codes: Vec<String> = tables.iter().map(|t| t.code().to_string()).collect();
        assert_eq!(codes, ["unary", "gamma", "zeta4", "zeta1", "zeta3", "zeta2"]);

        for k in 1..=4 {
            let alone = CodeTable::new(Code::zeta(k).unwrap(), tables.window());
            assert_eq!(tables.zeta(k).unwrap(), &alone);
        }
    }

    #[test]
    fn it_supports_several_widths_at_once() {
        let narrow = Tables::new(&TableOptions {
            window_bits: 4,
            ..TableOptions::default()
        })
        .unwrap();
        let wide = Tables::new(&TableOptions {
            window_bits: 10,
            ..TableOptions::default()
        })
        .unwrap();

        assert_eq!(narrow.unary().len(), 16);
        assert_eq!(wide.unary().len(), 1024);
        assert_eq!(narrow.unary().decode(0b0001), Some((3, 4)));
        assert_eq!(wide.unary().decode(0b00_0000_0001), Some((9, 10)));
    }

    #[test]
    fn it_rejects_bad_options() {
        let bad_width = TableOptions {
            window_bits: 0,
            ..TableOptions::default()
        };
        assert_eq!(
            Tables::new(&bad_width).unwrap_err(),
            ConfigError::WindowWidth(0)
        );

        let bad_k = TableOptions {
            zeta_ks: vec![3, 0],
            ..TableOptions::default()
        };
        assert_eq!(Tables::new(&bad_k).unwrap_err(), ConfigError::ZetaParameter);

        let duplicate = TableOptions {
            zeta_ks: vec![2, 3, 2],
            ..TableOptions::default()
        };
        assert_eq!(
            Tables::new(&duplicate).unwrap_err(),
            ConfigError::DuplicateZeta(2)
        );

        let too_many = TableOptions {
            window_bits: 2,
            zeta_ks: (1..=300).collect(),
        };
        assert_eq!(
            Tables::new(&too_many).unwrap_err(),
            ConfigError::TooManyTables(300)
        );

        let most = TableOptions {
            window_bits: 2,
            zeta_ks: (1..=MAX_ZETA_TABLES as u32).collect(),
        };
        assert_eq!(Tables::new(&most).unwrap().iter().count(), 255);
    }
}
