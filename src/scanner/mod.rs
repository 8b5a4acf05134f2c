/*
** This file is a part of driverxml (ASCII XML parser and tree library)
** Copyright (C) 2016-2025 Gurer Ozen
**
** driverxml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod location;
mod markup;

use memchr::memchr;
use memchr::memmem;

use crate::XmlError;
use crate::chars::is_whitespace;
use crate::chars::looks_like_close_tag;
use crate::chars::looks_like_comment;
use crate::chars::looks_like_declaration;
use crate::chars::looks_like_empty_tag;
use crate::chars::looks_like_open_or_close_tag;
use crate::chars::looks_like_pi;
use crate::error::description;

pub use location::Location;
pub use markup::AttributeScanner;

/// Classification of a lexical chunk.
///
/// Only some of these end up in the document tree. Close tags drive the
/// tree builder, comments and declarations are dropped.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChunkKind {
    Comment,
    ProcessingInstruction,
    Declaration,
    Tag,
    EmptyTag,
    CloseTag,
    CharData,
}

/// One lexical unit of the document, borrowed from the input buffer.
///
/// Markup chunks include their delimiters, e.g. a tag chunk runs from the
/// `<` up to and including the `>`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Chunk<'a> {
    kind: ChunkKind,
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Chunk<'a> {
    pub fn kind(&self) -> ChunkKind {
        self.kind
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Byte offset of the chunk in the document.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Cursor over a complete in-memory document which splits it into chunks.
///
/// # Examples
///
/// ```
/// use driverxml::{ChunkKind, Scanner};
///
/// let mut scanner = Scanner::new(b"<a>text</a>");
/// let mut kinds = Vec::new();
/// while let Some(chunk) = scanner.next_chunk()? {
///     kinds.push(chunk.kind());
/// }
/// assert_eq!(kinds, [ChunkKind::Tag, ChunkKind::CharData, ChunkKind::CloseTag]);
/// # Ok::<(), driverxml::XmlError>(())
/// ```
pub struct Scanner<'a> {
    document: &'a [u8],
    position: usize,
    chunk_start: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(document: &'a [u8]) -> Scanner<'a> {
        Scanner {
            document,
            position: 0,
            chunk_start: 0,
        }
    }

    pub fn document(&self) -> &'a [u8] {
        self.document
    }

    /// Current cursor position, always within `0..=document.len()`.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Start of the most recently attempted chunk.
    ///
    /// After a failed [next_chunk()](Scanner::next_chunk) this points at
    /// the markup which could not be extracted.
    pub fn chunk_start(&self) -> usize {
        self.chunk_start
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.document.len()
    }

    /// Extracts the next chunk and moves the cursor past it.
    ///
    /// Whitespace in front of markup is skipped, whitespace in front of
    /// text is kept as part of the character data. Returns `Ok(None)` when
    /// only whitespace is left. A markup chunk without its terminator is an
    /// [UnexpectedEof](XmlError::UnexpectedEof) error.
    pub fn next_chunk(&mut self) -> Result<Option<Chunk<'a>>, XmlError> {
        let rest = &self.document[self.position..];
        let Some(skip) = rest.iter().position(|c| !is_whitespace(*c)) else {
            self.position = self.document.len();
            self.chunk_start = self.position;
            return Ok(None);
        };

        if rest[skip] != b'<' {
            self.chunk_start = self.position;
            let end = match memchr(b'<', &rest[skip..]) {
                Some(i) => self.position + skip + i,
                None => self.document.len(),
            };
            return Ok(Some(self.take(ChunkKind::CharData, end)));
        }

        self.position += skip;
        self.chunk_start = self.position;
        let rest = &self.document[self.position..];

        let chunk = if looks_like_comment(rest) {
            self.extract(
                ChunkKind::Comment,
                4,
                b"-->",
                description::COMMENT_MISSING_END,
            )?
        } else if looks_like_pi(rest) {
            self.extract(
                ChunkKind::ProcessingInstruction,
                2,
                b"?>",
                description::PI_MISSING_END,
            )?
        } else if looks_like_declaration(rest) {
            if rest[2] == b'[' {
                self.extract(
                    ChunkKind::Declaration,
                    3,
                    b"]]>",
                    description::BOXED_MISSING_END,
                )?
            } else {
                self.extract(
                    ChunkKind::Declaration,
                    2,
                    b">",
                    description::DECLARATION_MISSING_END,
                )?
            }
        } else if looks_like_open_or_close_tag(rest) {
            let mut chunk =
                self.extract(ChunkKind::Tag, 1, b">", description::TAG_MISSING_END)?;
            if looks_like_close_tag(chunk.bytes) {
                chunk.kind = ChunkKind::CloseTag;
            } else if looks_like_empty_tag(chunk.bytes) {
                chunk.kind = ChunkKind::EmptyTag;
            }
            chunk
        } else {
            return Err(XmlError::MalformedMarkup(
                description::MARKUP_UNRECOGNIZED,
            ));
        };

        Ok(Some(chunk))
    }

    // Scans for the terminator starting `skip` bytes into the markup. The
    // cursor stays on the markup start if the terminator is missing.
    fn extract(
        &mut self,
        kind: ChunkKind,
        skip: usize,
        terminator: &[u8],
        missing: &'static str,
    ) -> Result<Chunk<'a>, XmlError> {
        let rest = &self.document[self.position..];
        match memmem::find(&rest[skip..], terminator) {
            Some(i) => {
                let end = self.position + skip + i + terminator.len();
                Ok(self.take(kind, end))
            }
            None => Err(XmlError::UnexpectedEof(missing)),
        }
    }

    fn take(&mut self, kind: ChunkKind, end: usize) -> Chunk<'a> {
        let chunk = Chunk {
            kind,
            bytes: &self.document[self.position..end],
            offset: self.position,
        };
        self.position = end;
        chunk
    }
}
