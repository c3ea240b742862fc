//! Little-endian binary form of a [`Tables`] bundle.
//!
//! ```text
//! magic      b"UCT\x01"
//! bits       u8
//! count      u8
//! count * {
//!   tag      u8        0 unary, 1 gamma, 2 zeta
//!   k        u32       0 unless zeta
//!   2^bits * { value u16, len u8 }
//! }
//! ```

use crate::error::PackedError;
use crate::{Code, CodeTable, Entry, Tables, Window, MISS};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

pub const MAGIC: [u8; 4] = *b"UCT\x01";

const TAG_UNARY: u8 = 0;
const TAG_GAMMA: u8 = 1;
const TAG_ZETA: u8 = 2;

pub fn write_packed<W: Write>(out: &mut W, tables: &Tables) -> io::Result<()> {
    out.write_all(&MAGIC)?;
    out.write_u8(tables.window().bits() as u8)?;
    let count = u8::try_from(tables.iter().count()).map_err(|_| {
        io::Error::new(io::ErrorKind::InvalidInput, "too many tables for one file")
    })?;
    out.write_u8(count)?;

    for table in tables.iter() {
        let (tag, k) = match table.code() {
            Code::Unary => (TAG_UNARY, 0),
            Code::Gamma => (TAG_GAMMA, 0),
            Code::Zeta(k) => (TAG_ZETA, k.get()),
        };
        out.write_u8(tag)?;
        out.write_u32::<LittleEndian>(k)?;
        write_entries(out, table)?;
    }
    Ok(())
}

/// Entries only, no header. Also what table digests are computed over.
pub fn write_entries<W: Write>(out: &mut W, table: &CodeTable) -> io::Result<()> {
    for e in table.entries() {
        out.write_u16::<LittleEndian>(e.value)?;
        out.write_u8(e.len)?;
    }
    Ok(())
}

pub fn read_packed<R: Read>(input: &mut R) -> Result<Tables, PackedError> {
    let mut magic = [0; 4];
    input.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(PackedError::BadMagic);
    }

    let window = Window::new(input.read_u8()?)?;
    let count = input.read_u8()?;

    let mut unary = None;
    let mut gamma = None;
    let mut zeta: Vec<CodeTable> = Vec::new();
    for _ in 0..count {
        let tag = input.read_u8()?;
        let k = input.read_u32::<LittleEndian>()?;
        let code = match tag {
            TAG_UNARY => Code::Unary,
            TAG_GAMMA => Code::Gamma,
            TAG_ZETA => Code::zeta(k)?,
            _ => return Err(PackedError::UnknownCode(tag)),
        };
        let table = read_entries(input, code, window)?;
        let slot = match code {
            Code::Unary => &mut unary,
            Code::Gamma => &mut gamma,
            Code::Zeta(_) => {
                if zeta.iter().any(|t| t.code() == code) {
                    return Err(PackedError::DuplicateTable(code.to_string()));
                }
                zeta.push(table);
                continue;
            }
        };
        if slot.is_some() {
            return Err(PackedError::DuplicateTable(code.to_string()));
        }
        *slot = Some(table);
    }

    if input.read(&mut [0; 1])? != 0 {
        return Err(PackedError::TrailingData);
    }

    let unary = unary.ok_or_else(|| PackedError::MissingTable(Code::Unary.to_string()))?;
    let gamma = gamma.ok_or_else(|| PackedError::MissingTable(Code::Gamma.to_string()))?;
    Ok(Tables::from_parts(window, unary, gamma, zeta))
}

fn read_entries<R: Read>(
    input: &mut R,
    code: Code,
    window: Window,
) -> Result<CodeTable, PackedError> {
    let mut entries = Vec::with_capacity(window.size());
    for index in 0..window.size() {
        let value = input.read_u16::<LittleEndian>()?;
        let len = input.read_u8()?;
        if (len == 0) != (value == MISS) || len as u32 > window.bits() {
            return Err(PackedError::BadEntry {
                code: code.to_string(),
                index,
                value,
                len,
            });
        }
        entries.push(Entry { value, len });
    }

    // Entries must be exactly what this code decodes to.
    let expected = CodeTable::new(code, window);
    if let Some(index) = (0..entries.len()).find(|&i| entries[i] != expected.get(i)) {
        return Err(PackedError::BadEntry {
            code: code.to_string(),
            index,
            value: entries[index].value,
            len: entries[index].len,
        });
    }
    Ok(expected)
}
