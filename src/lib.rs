/*
** This file is a part of driverxml (ASCII XML parser and tree library)
** Copyright (C) 2016-2025 Gurer Ozen
**
** driverxml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

//! A small parser for the ASCII subset of XML, with an owned tree and
//! canonical, debug, and hex dump renderings.
//!
//! Comments and declarations are skipped, entities are not expanded, and
//! a document may have several top level elements.

pub mod chars;
mod document;
mod error;
mod hexdump;
mod scanner;
mod writer;

pub use error::XmlError;

pub use scanner::AttributeScanner;
pub use scanner::Chunk;
pub use scanner::ChunkKind;
pub use scanner::Location;
pub use scanner::Scanner;

pub use document::Attribute;
pub use document::AttributeList;
pub use document::CharData;
pub use document::Descendants;
pub use document::Document;
pub use document::DocumentParser;
pub use document::EmptyTag;
pub use document::Node;
pub use document::NodeKind;
pub use document::NodeList;
pub use document::ParserOptions;
pub use document::ProcessingInstruction;
pub use document::ROOT_TAG_NAME;
pub use document::Tag;
pub use document::parse;

pub use writer::DebugPrinter;
pub use writer::DebugSink;
pub use writer::IoSink;
pub use writer::LogSink;
pub use writer::OutputBuffer;
pub use writer::WriterOptions;
pub use writer::debug_lines;
pub use writer::serialize;
pub use writer::serialize_with;
pub use writer::serialized_len;

pub use hexdump::HexDump;
