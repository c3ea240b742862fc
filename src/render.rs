//! Rust source rendering of decode tables.
//!
//! Each table becomes a `pub const {NAME}_TABLE: [(V, u8); N]` with one
//! `(value, length)` row per window index, annotated with the index bits.

use crate::{CodeTable, Tables, Window, MISS};
use std::io::{self, Write};

/// Narrowest value type that holds every entry of a `window` table,
/// sentinel included.
pub fn value_type(window: Window) -> &'static str {
    if window.bits() <= 8 {
        "u8"
    } else {
        "u16"
    }
}

/// The sentinel as rendered, the max of [`value_type`].
pub fn miss_value(window: Window) -> u16 {
    if window.bits() <= 8 {
        u8::MAX as u16
    } else {
        MISS
    }
}

pub fn write_rust_source<W: Write>(out: &mut W, tables: &Tables) -> io::Result<()> {
    let window = tables.window();
    writeln!(out, "// Generated by code-tables, do not edit.")?;
    writeln!(out)?;
    writeln!(out, "pub const TABLE_BITS: usize = {};", window.bits())?;
    writeln!(
        out,
        "pub const MISS_VALUE: {} = {};",
        value_type(window),
        miss_value(window)
    )?;
    writeln!(out)?;

    for table in tables.iter() {
        write_table(out, table)?;
    }
    Ok(())
}

fn write_table<W: Write>(out: &mut W, table: &CodeTable) -> io::Result<()> {
    let window = table.window();
    let miss = miss_value(window);

    writeln!(
        out,
        "pub const {}_TABLE: [({}, u8); {}] = [",
        table.code().const_name(),
        value_type(window),
        table.len()
    )?;
    for (i, e) in table.entries().iter().enumerate() {
        let value = if e.is_miss() { miss } else { e.value };
        writeln!(out, "\t({}, {}),    // {}", value, e.len, window.pad(i as u32))?;
    }
    writeln!(out, "];")?;
    writeln!(out)
}
