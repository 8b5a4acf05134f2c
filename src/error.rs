/*
** This file is a part of driverxml (ASCII XML parser and tree library)
** Copyright (C) 2016-2025 Gurer Ozen
**
** driverxml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::error::Error;
use std::fmt::Display;

/// Type of the error returned from parsing, tree editing, and writing.
///
/// Syntax problems carry a short static description of what was wrong.
/// The position of a parse error is available via
/// [location()](crate::DocumentParser::location).
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum XmlError {
    /// The output buffer could not be grown.
    OutOfMemory,

    /// A chunk of the document could not be classified or taken apart,
    /// for example a bad tag name or broken attribute quoting.
    MalformedMarkup(&'static str),

    /// The document ended while an element was still open, or before the
    /// terminator of a chunk was found.
    UnexpectedEof(&'static str),

    /// A close tag does not match the currently open tag.
    TagMismatch { expected: String, found: String },

    /// Elements are nested deeper than
    /// [ParserOptions::max_depth](crate::ParserOptions::max_depth).
    NestingTooDeep,

    /// A removal by name did not find anything to remove.
    NotFound,

    /// A tree edit was given a bad name, value, or index.
    InvalidArgument(&'static str),
}

impl Display for XmlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            XmlError::OutOfMemory => write!(f, "not enough memory"),
            XmlError::MalformedMarkup(msg) => write!(f, "malformed markup: {}", msg),
            XmlError::UnexpectedEof(msg) => write!(f, "unexpected end of file: {}", msg),
            XmlError::TagMismatch { expected, found } => write!(
                f,
                "close tag mismatch: expected '{}', found '{}'",
                expected, found
            ),
            XmlError::NestingTooDeep => write!(f, "elements are nested too deep"),
            XmlError::NotFound => write!(f, "not found"),
            XmlError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
        }
    }
}

impl Error for XmlError {}

pub(crate) mod description {
    pub(crate) const MARKUP_UNRECOGNIZED: &str =
        "'<' does not start a tag, comment, declaration, or processing instruction";
    pub(crate) const TAG_BAD_NAME_START: &str = "tag name must start with a letter, '_' or ':'";
    pub(crate) const TAG_BAD_NAME_CHAR: &str = "invalid character in tag name";
    pub(crate) const TAG_END_TAG_ATTRIBUTES: &str = "close tag cannot have attributes";
    pub(crate) const ATTRIBUTE_BAD_NAME: &str = "attribute name is not a valid name";
    pub(crate) const ATTRIBUTE_WITHOUT_EQUAL: &str = "attribute must have '=' before the value";
    pub(crate) const ATTRIBUTE_WITHOUT_QUOTE: &str =
        "attribute value must be in double or single quotes";
    pub(crate) const ATTRIBUTE_UNTERMINATED_VALUE: &str = "attribute value has no closing quote";
    pub(crate) const ATTRIBUTE_MISSING_SEPARATOR: &str =
        "attribute value must be followed by whitespace or the end of the tag";
    pub(crate) const PI_BAD_TARGET: &str = "processing instruction target is not a valid name";
    pub(crate) const PI_BAD_DATA: &str = "processing instruction data has an invalid character";

    pub(crate) const COMMENT_MISSING_END: &str = "comment has no '-->'";
    pub(crate) const BOXED_MISSING_END: &str = "bracketed declaration has no ']]>'";
    pub(crate) const PI_MISSING_END: &str = "processing instruction has no '?>'";
    pub(crate) const DECLARATION_MISSING_END: &str = "declaration has no '>'";
    pub(crate) const TAG_MISSING_END: &str = "tag has no '>'";
    pub(crate) const UNCLOSED_TAG: &str = "document has unclosed tags";

    pub(crate) const BAD_NAME: &str = "not a valid XML name";
    pub(crate) const BAD_ATTRIBUTE_VALUE: &str =
        "attribute value cannot contain both kinds of quotes";
    pub(crate) const CHAR_DATA_MARKUP: &str = "character data cannot contain '<'";
    pub(crate) const PI_BAD_CONTENT: &str =
        "processing instruction data cannot contain '?>' or non-XML characters";
    pub(crate) const INDEX_OUT_OF_RANGE: &str = "no node at the given index";
}
