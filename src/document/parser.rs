/*
** This file is a part of driverxml (ASCII XML parser and tree library)
** Copyright (C) 2016-2025 Gurer Ozen
**
** driverxml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use log::debug;
use log::trace;
use log::warn;

use crate::Chunk;
use crate::ChunkKind;
use crate::Location;
use crate::Scanner;
use crate::XmlError;
use crate::error::description;

use super::Attribute;
use super::AttributeList;
use super::Document;
use super::EmptyTag;
use super::ProcessingInstruction;
use super::ROOT_TAG_NAME;
use super::Tag;

/// Limits applied while building the tree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParserOptions {
    /// Maximum element nesting. Each open tag consumes one level of the
    /// parser's call stack.
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions { max_depth: 1024 }
    }
}

/// Builds a [Document] tree from a complete in-memory document.
///
/// The whole input must be available in one buffer. A failed parse does not
/// return a partial tree, but [location()](DocumentParser::location) tells
/// where the parser stopped.
///
/// ```
/// use driverxml::{DocumentParser, XmlError};
///
/// let mut parser = DocumentParser::new();
/// let err = parser.parse_bytes(b"<a>\n  <b></c>\n</a>").unwrap_err();
/// assert_eq!(
///     err,
///     XmlError::TagMismatch { expected: "b".into(), found: "c".into() }
/// );
/// assert_eq!(parser.location().lines, 1);
/// assert_eq!(parser.location().column, 5);
/// ```
pub struct DocumentParser {
    options: ParserOptions,
    location: Location,
}

impl DocumentParser {
    pub fn new() -> DocumentParser {
        DocumentParser::with_options(ParserOptions::default())
    }

    pub fn with_options(options: ParserOptions) -> DocumentParser {
        DocumentParser {
            options,
            location: Location::new(),
        }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn parse_bytes(&mut self, bytes: &[u8]) -> Result<Document, XmlError> {
        let mut scanner = Scanner::new(bytes);
        let mut root = Tag::new_unchecked(ROOT_TAG_NAME);
        let mut result = Ok(());
        while result.is_ok() && !scanner.is_at_end() {
            result = self.parse_branch(&mut scanner, &mut root, 0);
        }
        self.location = Location::from_offset(bytes, scanner.chunk_start());
        result?;
        Ok(Document::from_root(root))
    }

    /// Position of the chunk the last parse stopped at.
    pub fn location(&self) -> Location {
        self.location
    }

    // Parses chunks into `parent` until its close tag, or the end of the
    // document. Only the root level may end at the end of the document.
    fn parse_branch(
        &self,
        scanner: &mut Scanner<'_>,
        parent: &mut Tag,
        depth: usize,
    ) -> Result<(), XmlError> {
        while let Some(chunk) = scanner.next_chunk()? {
            match chunk.kind() {
                ChunkKind::ProcessingInstruction => {
                    let (target, data) = chunk.pi_parts()?;
                    parent
                        .children_mut()
                        .push(ProcessingInstruction::new_unchecked(target, data));
                }
                ChunkKind::Declaration | ChunkKind::Comment => {
                    trace!("skipped {:?} at byte {}", chunk.kind(), chunk.offset());
                }
                ChunkKind::CharData => {
                    parent.children_mut().push_char_data(chunk.bytes());
                }
                ChunkKind::Tag => {
                    if depth >= self.options.max_depth {
                        return Err(XmlError::NestingTooDeep);
                    }
                    let mut tag = Tag::new_unchecked(chunk.tag_name()?);
                    let attributes = collect_attributes(&chunk, tag.attributes_mut());
                    self.parse_branch(scanner, &mut tag, depth + 1)?;
                    if keep_element(attributes, tag.name(), &chunk)? {
                        parent.children_mut().push(tag);
                    }
                }
                ChunkKind::EmptyTag => {
                    let mut tag = EmptyTag::new_unchecked(chunk.tag_name()?);
                    let attributes = collect_attributes(&chunk, tag.attributes_mut());
                    if keep_element(attributes, tag.name(), &chunk)? {
                        parent.children_mut().push(tag);
                    }
                }
                ChunkKind::CloseTag => {
                    let name = chunk.close_tag_name()?;
                    if depth > 0 && name == parent.name() {
                        return Ok(());
                    }
                    debug!(
                        "close tag '{}' at byte {} does not match '{}'",
                        name,
                        chunk.offset(),
                        parent.name()
                    );
                    return Err(XmlError::TagMismatch {
                        expected: parent.name().to_string(),
                        found: name.to_string(),
                    });
                }
            }
        }

        if depth > 0 {
            debug!("document ended inside '{}'", parent.name());
            return Err(XmlError::UnexpectedEof(description::UNCLOSED_TAG));
        }
        debug!("document ended with {} top level nodes", parent.children().len());
        Ok(())
    }
}

impl Default for DocumentParser {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_attributes(chunk: &Chunk<'_>, list: &mut AttributeList) -> Result<(), XmlError> {
    let mut attributes = chunk.attributes()?;
    while let Some((name, value)) = attributes.next_attribute()? {
        list.push(Attribute::new_unchecked(name, Some(value)));
    }
    Ok(())
}

// A malformed attribute list drops the element but not the parse.
fn keep_element(
    attributes: Result<(), XmlError>,
    name: &str,
    chunk: &Chunk<'_>,
) -> Result<bool, XmlError> {
    match attributes {
        Ok(()) => Ok(true),
        Err(XmlError::MalformedMarkup(msg)) => {
            warn!(
                "dropped element '{}' at byte {}: {}",
                name,
                chunk.offset(),
                msg
            );
            Ok(false)
        }
        Err(err) => Err(err),
    }
}

/// Parses a complete document with the default options.
///
/// ```
/// let doc = driverxml::parse(b"<a><b></b></a>")?;
/// let a = doc.children().get(0).unwrap();
/// assert_eq!(a.name(), Some("a"));
/// assert_eq!(a.children().unwrap().get(0).unwrap().name(), Some("b"));
/// # Ok::<(), driverxml::XmlError>(())
/// ```
pub fn parse(bytes: &[u8]) -> Result<Document, XmlError> {
    DocumentParser::new().parse_bytes(bytes)
}
