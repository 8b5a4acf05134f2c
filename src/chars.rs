/*
** This file is a part of driverxml (ASCII XML parser and tree library)
** Copyright (C) 2016-2025 Gurer Ozen
**
** driverxml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

//! Byte classification for the ASCII subset of XML.
//!
//! All shape detectors take the remaining input as a slice and check its
//! length before looking at any byte, so they never read past the buffer.

macro_rules! whitespace {
    () => {
        b' ' | b'\t' | b'\r' | b'\n'
    };
}

pub(crate) use whitespace;

/// `S ::= (#x20 | #x9 | #xD | #xA)+`
pub fn is_whitespace(c: u8) -> bool {
    matches!(c, whitespace!())
}

/// `NameStartChar ::= ":" | [A-Z] | "_" | [a-z]` (ASCII part only).
pub fn is_name_start_char(c: u8) -> bool {
    matches!(c, b'A'..=b'Z' | b'a'..=b'z' | b'_' | b':')
}

/// `NameChar ::= NameStartChar | "-" | "." | [0-9]` (ASCII part only).
pub fn is_name_char(c: u8) -> bool {
    is_name_start_char(c) || matches!(c, b'0'..=b'9' | b'-' | b'.')
}

/// Tab, carriage return, line feed and the printable range.
pub fn is_xml_char(c: u8) -> bool {
    matches!(c, b'\t' | b'\n' | b'\r' | 0x20..=0x7e)
}

/// Checks that the whole slice is a valid name.
pub fn is_name(s: &[u8]) -> bool {
    match s.split_first() {
        Some((first, rest)) => is_name_start_char(*first) && rest.iter().all(|c| is_name_char(*c)),
        None => false,
    }
}

/// Open tags (`<a`) and close tags (`</a`), judged by the first name byte.
/// A `</` cut off by the end of input still counts as a close tag.
pub fn looks_like_open_or_close_tag(s: &[u8]) -> bool {
    match s {
        [b'<', b'/'] => true,
        [b'<', b'/', c, ..] => is_name_start_char(*c),
        [b'<', c, ..] => is_name_start_char(*c),
        _ => false,
    }
}

pub fn looks_like_close_tag(s: &[u8]) -> bool {
    s.len() >= 3 && s[0] == b'<' && s[1] == b'/' && is_name_start_char(s[2])
}

/// Works on a complete tag chunk: `<a/>` is the shortest empty tag.
pub fn looks_like_empty_tag(s: &[u8]) -> bool {
    s.len() >= 4 && s.ends_with(b"/>")
}

pub fn looks_like_comment(s: &[u8]) -> bool {
    s.starts_with(b"<!--")
}

pub fn looks_like_pi(s: &[u8]) -> bool {
    s.starts_with(b"<?")
}

/// Anything starting with `<!` that is not a comment, such as DOCTYPE or
/// CDATA sections.
pub fn looks_like_declaration(s: &[u8]) -> bool {
    s.len() >= 3 && s[0] == b'<' && s[1] == b'!' && s[2] != b'-'
}

/// `>` or `/>` at the start of the slice.
pub fn is_tag_terminator(s: &[u8]) -> bool {
    s.starts_with(b">") || s.starts_with(b"/>")
}

/// Renders a byte for human eyes, replacing anything outside of the
/// printable ASCII range with a period.
pub fn printable(c: u8) -> char {
    if (0x20..=0x7e).contains(&c) {
        c as char
    } else {
        '.'
    }
}

pub(crate) fn push_printable(bytes: &[u8], out: &mut String) {
    out.extend(bytes.iter().map(|c| printable(*c)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_bytes() {
        for c in [b' ', b'\t', b'\r', b'\n'] {
            assert!(is_whitespace(c));
            assert!(is_xml_char(c));
        }
        assert!(!is_whitespace(b'a'));
        assert!(!is_whitespace(0x0b));

        assert!(is_name_start_char(b'_'));
        assert!(is_name_start_char(b':'));
        assert!(is_name_start_char(b'Z'));
        assert!(!is_name_start_char(b'1'));
        assert!(!is_name_start_char(b'-'));
        assert!(is_name_char(b'1'));
        assert!(is_name_char(b'-'));
        assert!(is_name_char(b'.'));
        assert!(!is_name_char(b'/'));
        assert!(!is_name_char(b'>'));

        assert!(is_xml_char(b'~'));
        assert!(!is_xml_char(0x7f));
        assert!(!is_xml_char(0x00));
        assert!(!is_xml_char(0xc3));
    }

    #[test]
    fn names() {
        assert!(is_name(b"a"));
        assert!(is_name(b"ns:tag-1.x"));
        assert!(!is_name(b""));
        assert!(!is_name(b"1a"));
        assert!(!is_name(b"a b"));
    }

    #[test]
    fn markup_shapes() {
        assert!(looks_like_open_or_close_tag(b"<a>"));
        assert!(looks_like_open_or_close_tag(b"</a>"));
        assert!(!looks_like_open_or_close_tag(b"<1>"));
        assert!(!looks_like_open_or_close_tag(b"< a>"));
        assert!(!looks_like_open_or_close_tag(&b"<a"[..1]));
        assert!(looks_like_open_or_close_tag(b"<a"));
        assert!(looks_like_open_or_close_tag(b"</"));
        assert!(!looks_like_open_or_close_tag(b"</1"));

        assert!(looks_like_close_tag(b"</a>"));
        assert!(!looks_like_close_tag(b"<a>"));
        assert!(!looks_like_close_tag(b"</"));

        assert!(looks_like_empty_tag(b"<a/>"));
        assert!(looks_like_empty_tag(b"<a x='1'/>"));
        assert!(!looks_like_empty_tag(b"/>"));
        assert!(!looks_like_empty_tag(b"<a>"));

        assert!(looks_like_comment(b"<!-- x -->"));
        assert!(!looks_like_comment(b"<!-"));
        assert!(looks_like_pi(b"<?xml?>"));
        assert!(!looks_like_pi(b"<"));

        assert!(looks_like_declaration(b"<!DOCTYPE a>"));
        assert!(looks_like_declaration(b"<![CDATA[x]]>"));
        assert!(!looks_like_declaration(b"<!-- x -->"));
        assert!(!looks_like_declaration(b"<!"));

        assert!(is_tag_terminator(b">"));
        assert!(is_tag_terminator(b"/>"));
        assert!(!is_tag_terminator(b"/"));
        assert!(!is_tag_terminator(b""));
    }

    #[test]
    fn printable_filter() {
        let mut s = String::new();
        push_printable(b"a\tb\x7f~\n", &mut s);
        assert_eq!(s, "a.b.~.");
        assert_eq!(printable(b' '), ' ');
        assert_eq!(printable(0xff), '.');
    }
}
