/*
** This file is a part of driverxml (ASCII XML parser and tree library)
** Copyright (C) 2016-2025 Gurer Ozen
**
** driverxml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

//! Canonical and debug renderings of the tree.
//!
//! The canonical form adds no whitespace and no escaping. Parsing it back
//! yields the same tree.

mod debug;

use memchr::memchr;

use crate::Attribute;
use crate::AttributeList;
use crate::Node;
use crate::XmlError;

pub use debug::DebugPrinter;
pub use debug::DebugSink;
pub use debug::IoSink;
pub use debug::LogSink;
pub use debug::debug_lines;

/// Settings of the canonical writer's output buffer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WriterOptions {
    /// Capacity reserved before the first write.
    pub initial_capacity: usize,
    /// How much a full buffer grows for writes smaller than this.
    pub grow_step: usize,
}

impl Default for WriterOptions {
    fn default() -> Self {
        WriterOptions {
            initial_capacity: 0,
            grow_step: 512,
        }
    }
}

/// Growable byte buffer used by the canonical writer.
///
/// When a write does not fit, the capacity grows by the configured step if
/// the write is smaller than the step, or by the size of the write plus one
/// otherwise. Existing content is kept across growth.
pub struct OutputBuffer {
    buf: Vec<u8>,
    grow_step: usize,
}

impl OutputBuffer {
    pub fn new() -> Result<OutputBuffer, XmlError> {
        OutputBuffer::with_options(&WriterOptions::default())
    }

    pub fn with_options(options: &WriterOptions) -> Result<OutputBuffer, XmlError> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(options.initial_capacity)
            .map_err(|_| XmlError::OutOfMemory)?;
        Ok(OutputBuffer {
            buf,
            grow_step: options.grow_step,
        })
    }

    pub fn write(&mut self, bytes: &[u8]) -> Result<(), XmlError> {
        if self.buf.len() + bytes.len() > self.buf.capacity() {
            let grow = if bytes.len() < self.grow_step {
                self.grow_step
            } else {
                bytes.len() + 1
            };
            // Grow from the current capacity, not from the current length.
            let spare = self.buf.capacity() - self.buf.len();
            self.buf
                .try_reserve_exact(spare + grow)
                .map_err(|_| XmlError::OutOfMemory)?;
        }
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

fn quote_for(value: &[u8]) -> &'static [u8] {
    if memchr(b'"', value).is_some() {
        b"'"
    } else {
        b"\""
    }
}

fn write_attributes(out: &mut OutputBuffer, attributes: &AttributeList) -> Result<(), XmlError> {
    for attribute in attributes {
        write_attribute(out, attribute)?;
    }
    Ok(())
}

fn write_attribute(out: &mut OutputBuffer, attribute: &Attribute) -> Result<(), XmlError> {
    let value = attribute.value().unwrap_or_default();
    let quote = quote_for(value);
    out.write(b" ")?;
    out.write(attribute.name().as_bytes())?;
    out.write(b"=")?;
    out.write(quote)?;
    out.write(value)?;
    out.write(quote)
}

pub(crate) fn write_node(out: &mut OutputBuffer, node: &Node) -> Result<(), XmlError> {
    match node {
        Node::Tag(tag) => {
            out.write(b"<")?;
            out.write(tag.name().as_bytes())?;
            write_attributes(out, tag.attributes())?;
            out.write(b">")?;
            for child in tag.children() {
                write_node(out, child)?;
            }
            out.write(b"</")?;
            out.write(tag.name().as_bytes())?;
            out.write(b">")
        }
        Node::EmptyTag(tag) => {
            out.write(b"<")?;
            out.write(tag.name().as_bytes())?;
            write_attributes(out, tag.attributes())?;
            out.write(b"/>")
        }
        Node::CharData(cdata) => out.write(cdata.bytes()),
        Node::ProcessingInstruction(pi) => {
            out.write(b"<?")?;
            out.write(pi.target().as_bytes())?;
            if let Some(data) = pi.data() {
                out.write(b" ")?;
                out.write(data)?;
            }
            out.write(b"?>")
        }
    }
}

/// Canonical serialization of a node and its descendants.
pub fn serialize(node: &Node) -> Result<Vec<u8>, XmlError> {
    serialize_with(node, &WriterOptions::default())
}

pub fn serialize_with(node: &Node, options: &WriterOptions) -> Result<Vec<u8>, XmlError> {
    let mut out = OutputBuffer::with_options(options)?;
    write_node(&mut out, node)?;
    Ok(out.into_bytes())
}

fn attributes_len(attributes: &AttributeList) -> usize {
    attributes
        .iter()
        .map(|attribute| attribute.name().len() + attribute.value().map_or(0, |v| v.len()) + 4)
        .sum()
}

/// Length of [serialize()] output, computed without writing anything.
pub fn serialized_len(node: &Node) -> usize {
    match node {
        Node::Tag(tag) => {
            let children: usize = tag.children().iter().map(serialized_len).sum();
            2 * tag.name().len() + 5 + attributes_len(tag.attributes()) + children
        }
        Node::EmptyTag(tag) => tag.name().len() + 3 + attributes_len(tag.attributes()),
        Node::CharData(cdata) => cdata.len(),
        Node::ProcessingInstruction(pi) => {
            pi.target().len() + 4 + pi.data().map_or(0, |d| d.len() + 1)
        }
    }
}
