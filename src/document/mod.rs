/*
** This file is a part of driverxml (ASCII XML parser and tree library)
** Copyright (C) 2016-2025 Gurer Ozen
**
** driverxml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod iterators;
mod parser;

use std::fmt::Display;
use std::str::FromStr;

use memchr::memchr;
use memchr::memmem;

use crate::XmlError;
use crate::chars::is_name;
use crate::chars::is_xml_char;
use crate::error::description;
use crate::writer;
use crate::writer::DebugPrinter;
use crate::writer::DebugSink;
use crate::writer::OutputBuffer;
use crate::writer::WriterOptions;

pub use iterators::Descendants;
pub use parser::DocumentParser;
pub use parser::ParserOptions;
pub use parser::parse;

/// Name of the synthetic tag which holds the top level nodes of a document.
pub const ROOT_TAG_NAME: &str = "Root";

fn check_name(name: &str) -> Result<(), XmlError> {
    if !is_name(name.as_bytes()) {
        return Err(XmlError::InvalidArgument(description::BAD_NAME));
    }
    Ok(())
}

/// Kind of a node stored in the tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NodeKind {
    Tag,
    EmptyTag,
    CharData,
    ProcessingInstruction,
}

/// A node of the document tree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Node {
    /// An element with separate open and close tags.
    Tag(Tag),
    /// A self-closing element, never has children.
    EmptyTag(EmptyTag),
    CharData(CharData),
    ProcessingInstruction(ProcessingInstruction),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Tag(_) => NodeKind::Tag,
            Node::EmptyTag(_) => NodeKind::EmptyTag,
            Node::CharData(_) => NodeKind::CharData,
            Node::ProcessingInstruction(_) => NodeKind::ProcessingInstruction,
        }
    }

    /// True for both kinds of elements.
    pub fn is_tag(&self) -> bool {
        matches!(self, Node::Tag(_) | Node::EmptyTag(_))
    }

    /// Element name, `None` for text and processing instructions.
    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Tag(tag) => Some(tag.name()),
            Node::EmptyTag(tag) => Some(tag.name()),
            _ => None,
        }
    }

    pub fn attributes(&self) -> Option<&AttributeList> {
        match self {
            Node::Tag(tag) => Some(tag.attributes()),
            Node::EmptyTag(tag) => Some(tag.attributes()),
            _ => None,
        }
    }

    /// Child list of a [Tag] node. Empty tags have none.
    pub fn children(&self) -> Option<&NodeList> {
        match self {
            Node::Tag(tag) => Some(tag.children()),
            _ => None,
        }
    }

    /// Value of the named attribute of an element.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes()?.find(name)
    }

    /// Iterates over this node and everything below it in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants::from_node(self)
    }

    pub fn as_tag(&self) -> Option<&Tag> {
        match self {
            Node::Tag(tag) => Some(tag),
            _ => None,
        }
    }

    pub fn as_char_data(&self) -> Option<&CharData> {
        match self {
            Node::CharData(cdata) => Some(cdata),
            _ => None,
        }
    }

    pub fn as_processing_instruction(&self) -> Option<&ProcessingInstruction> {
        match self {
            Node::ProcessingInstruction(pi) => Some(pi),
            _ => None,
        }
    }

    /// Exact size of the canonical serialization of this node.
    pub fn serialized_len(&self) -> usize {
        writer::serialized_len(self)
    }

    /// Canonical serialization of this node.
    pub fn to_bytes(&self) -> Result<Vec<u8>, XmlError> {
        writer::serialize(self)
    }
}

impl From<Tag> for Node {
    fn from(tag: Tag) -> Self {
        Node::Tag(tag)
    }
}

impl From<EmptyTag> for Node {
    fn from(tag: EmptyTag) -> Self {
        Node::EmptyTag(tag)
    }
}

impl From<CharData> for Node {
    fn from(cdata: CharData) -> Self {
        Node::CharData(cdata)
    }
}

impl From<ProcessingInstruction> for Node {
    fn from(pi: ProcessingInstruction) -> Self {
        Node::ProcessingInstruction(pi)
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bytes = self.to_bytes().map_err(|_| std::fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&bytes))
    }
}

/// An element with an open and a close tag.
///
/// The tag keeps its explicit close tag when serialized even if it has no
/// children, `<a></a>` does not turn into `<a/>`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tag {
    name: String,
    // Declared before the children so attributes are dropped first.
    attributes: AttributeList,
    children: NodeList,
}

impl Tag {
    /// Creates a tag with no attributes and no children.
    ///
    /// # Errors
    ///
    /// Returns [InvalidArgument](XmlError::InvalidArgument) if the name is
    /// not a valid XML name.
    pub fn new(name: &str) -> Result<Tag, XmlError> {
        check_name(name)?;
        Ok(Tag::new_unchecked(name))
    }

    pub(crate) fn new_unchecked(name: &str) -> Tag {
        Tag {
            name: name.to_string(),
            attributes: AttributeList::new(),
            children: NodeList::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &AttributeList {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut AttributeList {
        &mut self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.find(name)
    }

    pub fn children(&self) -> &NodeList {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut NodeList {
        &mut self.children
    }
}

/// A self-closing element like `<br/>`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmptyTag {
    name: String,
    attributes: AttributeList,
}

impl EmptyTag {
    pub fn new(name: &str) -> Result<EmptyTag, XmlError> {
        check_name(name)?;
        Ok(EmptyTag::new_unchecked(name))
    }

    pub(crate) fn new_unchecked(name: &str) -> EmptyTag {
        EmptyTag {
            name: name.to_string(),
            attributes: AttributeList::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &AttributeList {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut AttributeList {
        &mut self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.find(name)
    }
}

/// A `name="value"` pair of an element.
///
/// An empty quoted value (`name=""`) is stored as an absent value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Attribute {
    name: String,
    value: Option<Vec<u8>>,
}

impl Attribute {
    /// Creates an attribute.
    ///
    /// # Errors
    ///
    /// Returns [InvalidArgument](XmlError::InvalidArgument) if the name is
    /// not a valid XML name, or the value contains both quote characters.
    /// Such a value could not be quoted when serialized.
    pub fn new(name: &str, value: Option<&[u8]>) -> Result<Attribute, XmlError> {
        check_name(name)?;
        if let Some(value) = value
            && memchr(b'"', value).is_some()
            && memchr(b'\'', value).is_some()
        {
            return Err(XmlError::InvalidArgument(description::BAD_ATTRIBUTE_VALUE));
        }
        Ok(Attribute::new_unchecked(name, value))
    }

    pub(crate) fn new_unchecked(name: &str, value: Option<&[u8]>) -> Attribute {
        Attribute {
            name: name.to_string(),
            value: value.filter(|v| !v.is_empty()).map(|v| v.to_vec()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&[u8]> {
        self.value.as_deref()
    }

    /// Value as a string slice, if present and valid UTF-8.
    pub fn value_str(&self) -> Option<&str> {
        std::str::from_utf8(self.value()?).ok()
    }
}

/// A run of text between markup.
///
/// Bytes are kept verbatim, including whitespace and any non-ASCII bytes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CharData {
    bytes: Vec<u8>,
}

impl CharData {
    /// Creates a text node. Text cannot contain `<`.
    pub fn new(bytes: &[u8]) -> Result<CharData, XmlError> {
        if memchr(b'<', bytes).is_some() {
            return Err(XmlError::InvalidArgument(description::CHAR_DATA_MARKUP));
        }
        Ok(CharData::new_unchecked(bytes))
    }

    pub(crate) fn new_unchecked(bytes: &[u8]) -> CharData {
        CharData {
            bytes: bytes.to_vec(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A `<?target data?>` node.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProcessingInstruction {
    target: String,
    data: Option<Vec<u8>>,
}

impl ProcessingInstruction {
    pub fn new(target: &str, data: Option<&[u8]>) -> Result<ProcessingInstruction, XmlError> {
        check_name(target)?;
        if let Some(data) = data
            && (memmem::find(data, b"?>").is_some() || !data.iter().all(|c| is_xml_char(*c)))
        {
            return Err(XmlError::InvalidArgument(description::PI_BAD_CONTENT));
        }
        Ok(ProcessingInstruction::new_unchecked(target, data))
    }

    pub(crate) fn new_unchecked(target: &str, data: Option<&[u8]>) -> ProcessingInstruction {
        ProcessingInstruction {
            target: target.to_string(),
            data: data.filter(|d| !d.is_empty()).map(|d| d.to_vec()),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }
}

/// Ordered children of a tag.
///
/// Insertion order is kept and nothing is de-duplicated. Removing a node
/// moves it out of the list, so it cannot be removed twice.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NodeList(Vec<Node>);

impl NodeList {
    pub fn new() -> NodeList {
        NodeList(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.0.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.0.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.0.get_mut(index)
    }

    /// Appends a node after the existing children.
    pub fn push(&mut self, node: impl Into<Node>) {
        self.0.push(node.into());
    }

    // Text right after text joins the previous run, as it would on output.
    pub(crate) fn push_char_data(&mut self, bytes: &[u8]) {
        match self.0.last_mut() {
            Some(Node::CharData(last)) => last.bytes.extend_from_slice(bytes),
            _ => self.0.push(Node::CharData(CharData::new_unchecked(bytes))),
        }
    }

    /// Steps through the list one node at a time.
    ///
    /// Pass `None` to get the first node, or the index of the current node
    /// to get the one after it. Returns `None` at the end of the list.
    pub fn next_sibling(&self, current: Option<usize>) -> Option<(usize, &Node)> {
        let index = match current {
            None => 0,
            Some(i) => i.checked_add(1)?,
        };
        self.0.get(index).map(|node| (index, node))
    }

    /// Iterates over every node of the list and their descendants in
    /// document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants::from_list(self)
    }

    /// Finds the first element with the given name in a depth-first walk
    /// over all siblings and their descendants.
    ///
    /// ```
    /// let doc: driverxml::Document = "<a><b><c/></b><c id='2'/></a>".parse()?;
    /// let c = doc.find_tag("c").unwrap();
    /// assert!(c.attribute("id").is_none());
    /// # Ok::<(), driverxml::XmlError>(())
    /// ```
    pub fn find_tag(&self, name: &str) -> Option<&Node> {
        self.descendants().find(|node| node.name() == Some(name))
    }

    /// Removes and returns the node at `index`.
    pub fn remove(&mut self, index: usize) -> Result<Node, XmlError> {
        if index >= self.0.len() {
            return Err(XmlError::InvalidArgument(description::INDEX_OUT_OF_RANGE));
        }
        Ok(self.0.remove(index))
    }

    /// Removes and returns the first direct child element with the given
    /// name. Descendants are not searched.
    pub fn remove_tag(&mut self, name: &str) -> Result<Node, XmlError> {
        match self.0.iter().position(|node| node.name() == Some(name)) {
            Some(index) => Ok(self.0.remove(index)),
            None => Err(XmlError::NotFound),
        }
    }
}

impl<'a> IntoIterator for &'a NodeList {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Ordered attributes of an element.
///
/// Duplicate names are allowed, lookups return the first match.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AttributeList(Vec<Attribute>);

impl AttributeList {
    pub fn new() -> AttributeList {
        AttributeList(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.0.iter()
    }

    pub fn push(&mut self, attribute: Attribute) {
        self.0.push(attribute);
    }

    /// Case sensitive lookup, first match wins.
    pub fn find(&self, name: &str) -> Option<&Attribute> {
        self.0.iter().find(|attribute| attribute.name == name)
    }

    /// Removes the first attribute with the given name.
    pub fn remove(&mut self, name: &str) -> Result<Attribute, XmlError> {
        match self.0.iter().position(|attribute| attribute.name == name) {
            Some(index) => Ok(self.0.remove(index)),
            None => Err(XmlError::NotFound),
        }
    }
}

impl<'a> IntoIterator for &'a AttributeList {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A parsed document.
///
/// The top level nodes live under a synthetic tag named
/// [ROOT_TAG_NAME]. That tag never appears in the serialized form.
///
/// ```
/// use driverxml::Document;
///
/// let doc: Document = "<?xml version='1.0'?><a x='1'><b>text</b></a>".parse()?;
/// assert_eq!(doc.children().len(), 2);
/// assert_eq!(doc.find_tag("b").unwrap().to_string(), "<b>text</b>");
/// assert_eq!(doc.to_string(), "<?xml version='1.0'?><a x=\"1\"><b>text</b></a>");
/// # Ok::<(), driverxml::XmlError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Document {
    root: Tag,
}

impl Document {
    /// Creates a document with nothing under the root.
    pub fn new() -> Document {
        Document {
            root: Tag::new_unchecked(ROOT_TAG_NAME),
        }
    }

    pub(crate) fn from_root(root: Tag) -> Document {
        Document { root }
    }

    pub fn root(&self) -> &Tag {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Tag {
        &mut self.root
    }

    /// Top level nodes.
    pub fn children(&self) -> &NodeList {
        self.root.children()
    }

    pub fn children_mut(&mut self) -> &mut NodeList {
        self.root.children_mut()
    }

    pub fn find_tag(&self, name: &str) -> Option<&Node> {
        self.root.children().find_tag(name)
    }

    pub fn serialized_len(&self) -> usize {
        self.children().iter().map(writer::serialized_len).sum()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, XmlError> {
        self.to_bytes_with(&WriterOptions::default())
    }

    /// Canonical serialization of all top level nodes.
    pub fn to_bytes_with(&self, options: &WriterOptions) -> Result<Vec<u8>, XmlError> {
        let mut out = OutputBuffer::with_options(options)?;
        for node in self.children() {
            writer::write_node(&mut out, node)?;
        }
        Ok(out.into_bytes())
    }

    /// Writes the indented debug rendering of the whole tree, including
    /// the root tag.
    pub fn debug_print<S: DebugSink + ?Sized>(&self, sink: &mut S) -> std::io::Result<()> {
        DebugPrinter::new(sink).print_tag(&self.root)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bytes = self.to_bytes().map_err(|_| std::fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&bytes))
    }
}

impl FromStr for Document {
    type Err = XmlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s.as_bytes())
    }
}
