/*
** This file is a part of driverxml (ASCII XML parser and tree library)
** Copyright (C) 2016-2025 Gurer Ozen
**
** driverxml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use memchr::memchr;

use super::Chunk;
use crate::XmlError;
use crate::chars::is_name;
use crate::chars::is_name_char;
use crate::chars::is_name_start_char;
use crate::chars::is_tag_terminator;
use crate::chars::is_whitespace;
use crate::chars::is_xml_char;
use crate::chars::whitespace;
use crate::error::description;

fn skip_whitespace(s: &[u8]) -> &[u8] {
    let n = s.iter().take_while(|c| is_whitespace(**c)).count();
    &s[n..]
}

fn ascii_name<'a>(s: &'a [u8], what: &'static str) -> Result<&'a str, XmlError> {
    std::str::from_utf8(s).map_err(|_| XmlError::MalformedMarkup(what))
}

// Splits "<name ...>" or "</name ...>" into the name and whatever follows it.
fn split_tag_name(chunk: &[u8]) -> Result<(&str, &[u8]), XmlError> {
    let s = chunk.strip_prefix(b"<").unwrap_or(chunk);
    let s = s.strip_prefix(b"/").unwrap_or(s);
    match s.first() {
        Some(c) if is_name_start_char(*c) => (),
        _ => return Err(XmlError::MalformedMarkup(description::TAG_BAD_NAME_START)),
    }
    let len = s.iter().take_while(|c| is_name_char(**c)).count();
    let (name, rest) = s.split_at(len);
    match rest.first() {
        Some(whitespace!()) => (),
        _ if is_tag_terminator(rest) => (),
        _ => return Err(XmlError::MalformedMarkup(description::TAG_BAD_NAME_CHAR)),
    }
    Ok((ascii_name(name, description::TAG_BAD_NAME_CHAR)?, rest))
}

impl<'a> Chunk<'a> {
    /// Name of an open, empty, or close tag chunk.
    pub fn tag_name(&self) -> Result<&'a str, XmlError> {
        Ok(split_tag_name(self.bytes)?.0)
    }

    /// Name of a close tag chunk. Anything other than whitespace between
    /// the name and the `>` is an error.
    pub fn close_tag_name(&self) -> Result<&'a str, XmlError> {
        let (name, rest) = split_tag_name(self.bytes)?;
        if skip_whitespace(rest) != b">" {
            return Err(XmlError::MalformedMarkup(
                description::TAG_END_TAG_ATTRIBUTES,
            ));
        }
        Ok(name)
    }

    /// Returns a scanner over the attributes of an open or empty tag chunk.
    pub fn attributes(&self) -> Result<AttributeScanner<'a>, XmlError> {
        let (_, rest) = split_tag_name(self.bytes)?;
        Ok(AttributeScanner::new(rest))
    }

    /// Splits a processing instruction chunk into its target and data.
    ///
    /// The data starts after the whitespace which follows the target and
    /// runs up to the `?>`. It is `None` when nothing is left.
    pub fn pi_parts(&self) -> Result<(&'a str, Option<&'a [u8]>), XmlError> {
        let inner = self
            .bytes
            .strip_prefix(b"<?")
            .and_then(|s| s.strip_suffix(b"?>"))
            .ok_or(XmlError::MalformedMarkup(description::PI_BAD_TARGET))?;
        let len = inner.iter().take_while(|c| is_name_char(**c)).count();
        let (target, rest) = inner.split_at(len);
        if !is_name(target) {
            return Err(XmlError::MalformedMarkup(description::PI_BAD_TARGET));
        }
        if let Some(c) = rest.first()
            && !is_whitespace(*c)
        {
            return Err(XmlError::MalformedMarkup(description::PI_BAD_TARGET));
        }
        let data = skip_whitespace(rest);
        if !data.iter().all(|c| is_xml_char(*c)) {
            return Err(XmlError::MalformedMarkup(description::PI_BAD_DATA));
        }
        let target = ascii_name(target, description::PI_BAD_TARGET)?;
        Ok((target, if data.is_empty() { None } else { Some(data) }))
    }
}

/// Walks over the `name="value"` pairs of a tag.
///
/// Values are returned without their quotes and without any processing.
/// A value of `""` is an empty slice, which is different from a missing
/// attribute.
///
/// # Examples
///
/// ```
/// use driverxml::Scanner;
///
/// let mut scanner = Scanner::new(b"<a x='1' y = \"2\"/>");
/// let chunk = scanner.next_chunk()?.unwrap();
/// let mut attributes = chunk.attributes()?;
/// assert_eq!(attributes.next_attribute()?, Some(("x", &b"1"[..])));
/// assert_eq!(attributes.next_attribute()?, Some(("y", &b"2"[..])));
/// assert_eq!(attributes.next_attribute()?, None);
/// # Ok::<(), driverxml::XmlError>(())
/// ```
pub struct AttributeScanner<'a> {
    rest: &'a [u8],
    failed: bool,
}

impl<'a> AttributeScanner<'a> {
    pub(crate) fn new(rest: &'a [u8]) -> AttributeScanner<'a> {
        AttributeScanner {
            rest,
            failed: false,
        }
    }

    /// Extracts the next attribute, or returns `Ok(None)` when the tag
    /// terminator is reached.
    pub fn next_attribute(&mut self) -> Result<Option<(&'a str, &'a [u8])>, XmlError> {
        let s = skip_whitespace(self.rest);
        if s.is_empty() || is_tag_terminator(s) {
            self.rest = s;
            return Ok(None);
        }

        let mut len = 0;
        while len < s.len()
            && s[len] != b'='
            && !is_whitespace(s[len])
            && !is_tag_terminator(&s[len..])
        {
            len += 1;
        }
        let (name, s) = s.split_at(len);
        if !is_name(name) {
            return Err(XmlError::MalformedMarkup(description::ATTRIBUTE_BAD_NAME));
        }

        let s = match skip_whitespace(s).split_first() {
            Some((b'=', s)) => skip_whitespace(s),
            _ => {
                return Err(XmlError::MalformedMarkup(
                    description::ATTRIBUTE_WITHOUT_EQUAL,
                ));
            }
        };
        let (quote, s) = match s.split_first() {
            Some((&c, s)) if c == b'"' || c == b'\'' => (c, s),
            _ => {
                return Err(XmlError::MalformedMarkup(
                    description::ATTRIBUTE_WITHOUT_QUOTE,
                ));
            }
        };
        let Some(end) = memchr(quote, s) else {
            return Err(XmlError::MalformedMarkup(
                description::ATTRIBUTE_UNTERMINATED_VALUE,
            ));
        };
        let (value, s) = (&s[..end], &s[end + 1..]);
        match s.first() {
            Some(whitespace!()) => (),
            _ if is_tag_terminator(s) => (),
            _ => {
                return Err(XmlError::MalformedMarkup(
                    description::ATTRIBUTE_MISSING_SEPARATOR,
                ));
            }
        }

        self.rest = s;
        let name = ascii_name(name, description::ATTRIBUTE_BAD_NAME)?;
        Ok(Some((name, value)))
    }
}

impl<'a> Iterator for AttributeScanner<'a> {
    type Item = Result<(&'a str, &'a [u8]), XmlError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_attribute() {
            Ok(Some(attribute)) => Some(Ok(attribute)),
            Ok(None) => None,
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}
