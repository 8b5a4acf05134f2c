/*
** This file is a part of driverxml (ASCII XML parser and tree library)
** Copyright (C) 2016-2025 Gurer Ozen
**
** driverxml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::fmt::Display;
use std::fmt::Write;

use crate::chars::printable;

const BYTES_PER_LINE: usize = 16;

/// Classic hex dump of a byte buffer, sixteen bytes per line.
///
/// ```
/// use driverxml::HexDump;
///
/// assert_eq!(
///     HexDump(b"<a/>").to_string(),
///     "00000000: 3C 61 2F 3E                                     \"<a/>            \"\n"
/// );
/// ```
pub struct HexDump<'a>(pub &'a [u8]);

impl Display for HexDump<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (line, bytes) in self.0.chunks(BYTES_PER_LINE).enumerate() {
            write!(f, "{:07X}0: ", line)?;
            for c in bytes {
                write!(f, "{:02X} ", c)?;
            }
            for _ in bytes.len()..BYTES_PER_LINE {
                f.write_str("   ")?;
            }
            f.write_char('"')?;
            for c in bytes {
                f.write_char(printable(*c))?;
            }
            for _ in bytes.len()..BYTES_PER_LINE {
                f.write_char(' ')?;
            }
            f.write_str("\"\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        assert_eq!(HexDump(b"").to_string(), "");
    }

    #[test]
    fn full_and_partial_lines() {
        let data: Vec<u8> = (0u8..20).map(|i| b'a' + i).chain([b'\n']).collect();
        let dump = HexDump(&data).to_string();
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "00000000: 61 62 63 64 65 66 67 68 69 6A 6B 6C 6D 6E 6F 70 \"abcdefghijklmnop\""
        );
        assert_eq!(
            lines[1],
            "00000010: 71 72 73 74 0A                                  \"qrst.           \""
        );
    }

    #[test]
    fn exact_multiple_has_no_trailing_line() {
        let dump = HexDump(&[0xffu8; 32]).to_string();
        assert_eq!(dump.lines().count(), 2);
        assert!(dump.ends_with("\"................\"\n"));
    }
}
