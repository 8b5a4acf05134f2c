/*
** This file is a part of driverxml (ASCII XML parser and tree library)
** Copyright (C) 2016-2025 Gurer Ozen
**
** driverxml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::slice::Iter;

use super::Node;
use super::NodeList;

/// Pre-order walk over a subtree.
///
/// Uses an explicit stack of child iterators, so deep trees do not
/// recurse on the call stack.
pub struct Descendants<'a> {
    pending: Option<&'a Node>,
    stack: Vec<Iter<'a, Node>>,
}

impl<'a> Descendants<'a> {
    pub(crate) fn from_node(node: &'a Node) -> Self {
        Descendants {
            pending: Some(node),
            stack: Vec::new(),
        }
    }

    pub(crate) fn from_list(list: &'a NodeList) -> Self {
        Descendants {
            pending: None,
            stack: vec![list.iter()],
        }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = match self.pending.take() {
            Some(node) => node,
            None => loop {
                let top = self.stack.last_mut()?;
                match top.next() {
                    Some(node) => break node,
                    None => {
                        self.stack.pop();
                    }
                }
            },
        };
        if let Node::Tag(tag) = node {
            self.stack.push(tag.children().iter());
        }
        Some(node)
    }
}
