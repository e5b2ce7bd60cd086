//! Diagnostic hex rendering.

use std::io;

use redb::{TableDefinition, TableHandle};

use crate::error::Result;

/// Walks every table in the store, rendering keys and values.
pub(crate) fn dump_store(store: &redb::Database, wr: &mut impl io::Write) -> Result<()> {
    let txn = store.begin_read()?;
    let mut names: Vec<String> = txn
        .list_tables()?
        .map(|handle| handle.name().to_string())
        .collect();
    names.sort();
    for name in names {
        writeln!(wr, "Table \"{name}\"")?;
        let def = TableDefinition::<&[u8], &[u8]>::new(&name);
        let table = txn.open_table(def)?;
        for entry in table.range::<&[u8]>(..)? {
            let (key, value) = entry?;
            hexdump(wr, key.value(), "Key", 1, 2)?;
            hexdump(wr, value.value(), "Data", 1, 2)?;
        }
    }
    Ok(())
}

/// Renders a byte slice in canonical sixteen-bytes-per-row form: offset,
/// hex columns split eight and eight, then an ASCII gutter. The gutter is
/// padded so it lines up across indentation levels.
///
/// ```text
/// 00000000  42 5a 68 39 31 41 59 26  53 59 c9 f4 b8 1a 02 62   |BZh91AY&SY.....b|
/// ```
fn hexdump(
    wr: &mut impl io::Write,
    sl: &[u8],
    header: &str,
    indent: usize,
    max_indent: usize,
) -> io::Result<()> {
    let indent_str = "  ".repeat(indent);
    let mut pad = "  ".repeat(max_indent.saturating_sub(indent));
    pad.push_str(" |");
    if !header.is_empty() {
        writeln!(wr, "{indent_str}{header}")?;
    }
    let rows = sl.len().div_ceil(16);
    for row in 0..rows {
        write!(wr, "{indent_str}{:08x}  ", row * 16)?;
        let mut ascii = [b' '; 16];
        for (j, slot) in ascii.iter_mut().enumerate() {
            let pos = row * 16 + j;
            if pos < sl.len() {
                let val = sl[pos];
                write!(wr, "{val:02x} ")?;
                *slot = if (32..127).contains(&val) { val } else { b'.' };
            } else {
                write!(wr, "   ")?;
            }
            if j == 7 {
                write!(wr, " ")?;
            }
        }
        wr.write_all(pad.as_bytes())?;
        wr.write_all(&ascii)?;
        writeln!(wr, "|")?;
    }
    Ok(())
}
