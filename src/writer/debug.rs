/*
** This file is a part of driverxml (ASCII XML parser and tree library)
** Copyright (C) 2016-2025 Gurer Ozen
**
** driverxml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::io::Write;

use crate::AttributeList;
use crate::Node;
use crate::Tag;
use crate::chars::push_printable;

/// Receives the lines of a debug rendering, without line terminators.
pub trait DebugSink {
    fn write_line(&mut self, line: &str) -> std::io::Result<()>;
}

impl DebugSink for Vec<String> {
    fn write_line(&mut self, line: &str) -> std::io::Result<()> {
        self.push(line.to_string());
        Ok(())
    }
}

/// Sends each line to the `log` facade at debug level.
pub struct LogSink;

impl DebugSink for LogSink {
    fn write_line(&mut self, line: &str) -> std::io::Result<()> {
        log::debug!("{}", line);
        Ok(())
    }
}

/// Writes newline terminated lines to any writer.
pub struct IoSink<W: Write>(pub W);

impl<W: Write> DebugSink for IoSink<W> {
    fn write_line(&mut self, line: &str) -> std::io::Result<()> {
        writeln!(self.0, "{}", line)
    }
}

/// Renders a tree one line per node, indented two spaces per level.
///
/// Bytes outside of printable ASCII are shown as `.`.
///
/// ```
/// use driverxml::DebugPrinter;
///
/// let doc: driverxml::Document = "<a x='1'>hi<b/></a>".parse()?;
/// let mut lines: Vec<String> = Vec::new();
/// DebugPrinter::new(&mut lines).print_nodes(doc.children())?;
/// assert_eq!(lines, ["<a x=\"1\">", "  hi", "  <b/>", "</a>"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct DebugPrinter<'a, S: DebugSink + ?Sized> {
    sink: &'a mut S,
    line: String,
}

impl<'a, S: DebugSink + ?Sized> DebugPrinter<'a, S> {
    pub fn new(sink: &'a mut S) -> Self {
        DebugPrinter {
            sink,
            line: String::new(),
        }
    }

    pub fn print(&mut self, node: &Node) -> std::io::Result<()> {
        self.node(node, 0)
    }

    pub fn print_tag(&mut self, tag: &Tag) -> std::io::Result<()> {
        self.tag(tag, 0)
    }

    pub fn print_nodes<'n>(
        &mut self,
        nodes: impl IntoIterator<Item = &'n Node>,
    ) -> std::io::Result<()> {
        for node in nodes {
            self.node(node, 0)?;
        }
        Ok(())
    }

    fn start(&mut self, level: usize) {
        self.line.clear();
        for _ in 0..level {
            self.line.push_str("  ");
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.sink.write_line(&self.line)
    }

    fn attributes(&mut self, attributes: &AttributeList) {
        for attribute in attributes {
            self.line.push(' ');
            self.line.push_str(attribute.name());
            self.line.push_str("=\"");
            push_printable(attribute.value().unwrap_or_default(), &mut self.line);
            self.line.push('"');
        }
    }

    fn tag(&mut self, tag: &Tag, level: usize) -> std::io::Result<()> {
        self.start(level);
        self.line.push('<');
        self.line.push_str(tag.name());
        self.attributes(tag.attributes());
        self.line.push('>');
        self.flush()?;
        for child in tag.children() {
            self.node(child, level + 1)?;
        }
        self.start(level);
        self.line.push_str("</");
        self.line.push_str(tag.name());
        self.line.push('>');
        self.flush()
    }

    fn node(&mut self, node: &Node, level: usize) -> std::io::Result<()> {
        match node {
            Node::Tag(tag) => return self.tag(tag, level),
            Node::EmptyTag(tag) => {
                self.start(level);
                self.line.push('<');
                self.line.push_str(tag.name());
                self.attributes(tag.attributes());
                self.line.push_str("/>");
            }
            Node::CharData(cdata) => {
                self.start(level);
                push_printable(cdata.bytes(), &mut self.line);
            }
            Node::ProcessingInstruction(pi) => {
                self.start(level);
                self.line.push_str("<?");
                self.line.push_str(pi.target());
                if let Some(data) = pi.data() {
                    self.line.push(' ');
                    push_printable(data, &mut self.line);
                }
                self.line.push_str("?>");
            }
        }
        self.flush()
    }
}

/// Collects the debug rendering of a node into lines.
pub fn debug_lines(node: &Node) -> std::io::Result<Vec<String>> {
    let mut lines = Vec::new();
    DebugPrinter::new(&mut lines).print(node)?;
    Ok(lines)
}
