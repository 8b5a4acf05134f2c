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

/// A position in the parsed document.
///
/// This is returned from the
/// [location()](crate::DocumentParser::location) method and points at the
/// start of the chunk the parser was working on when it stopped.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Location {
    /// Byte offset from the start of the document.
    pub bytes: usize,
    /// How many newline characters precede the position.
    pub lines: usize,
    /// How many bytes after the last newline character.
    pub column: usize,
}

impl Location {
    pub fn new() -> Self {
        Location::default()
    }

    /// Computes the location of `offset` within `document`.
    ///
    /// Offsets past the end are clamped to the document length.
    pub fn from_offset(document: &[u8], offset: usize) -> Self {
        let mut location = Location::new();
        for c in &document[..offset.min(document.len())] {
            location.advance(*c);
        }
        location
    }

    fn advance(&mut self, c: u8) {
        self.bytes += 1;
        if c == b'\n' {
            self.lines += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "byte: {}, line: {}, column: {}",
            self.bytes, self.lines, self.column
        )
    }
}
