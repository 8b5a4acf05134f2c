/*
** This file is a part of driverxml (ASCII XML parser and tree library)
** Copyright (C) 2016-2025 Gurer Ozen
**
** driverxml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

//! Property tests for parsing and canonical output.

use proptest::prelude::*;

use driverxml::Document;
use driverxml::HexDump;
use driverxml::Scanner;
use driverxml::parse;

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 100,
        max_shrink_iters: 100,
        ..ProptestConfig::default()
    }
}

fn name() -> impl Strategy<Value = String> {
    "[a-zA-Z_:][a-zA-Z0-9_.:-]{0,6}"
}

fn text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 \n\t&;>=\"']{1,12}"
}

fn attributes() -> impl Strategy<Value = String> {
    prop::collection::vec((name(), "[a-z0-9 \"=]{0,6}"), 0..3).prop_map(|pairs| {
        pairs
            .iter()
            .map(|(name, value)| format!(" {}='{}'", name, value))
            .collect()
    })
}

fn element() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        (name(), attributes()).prop_map(|(name, attrs)| format!("<{}{}/>", name, attrs)),
        text(),
        (name(), "[a-z =]{0,6}").prop_map(|(target, data)| format!("<?{} {}?>", target, data)),
        "[a-z ]{0,8}".prop_map(|comment| format!("<!--{}-->", comment)),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        (name(), attributes(), prop::collection::vec(inner, 0..4)).prop_map(
            |(name, attrs, children)| format!("<{}{}>{}</{}>", name, attrs, children.concat(), name),
        )
    })
}

// Text runs split by markup the parser drops.
fn split_text() -> impl Strategy<Value = String> {
    let skipped = prop_oneof![
        "[a-z ]{0,8}".prop_map(|comment| format!("<!--{}-->", comment)),
        name().prop_map(|name| format!("<!DOCTYPE {}>", name)),
        "[a-z <>]{0,8}".prop_map(|data| format!("<![CDATA[{}]]>", data)),
        name().prop_map(|name| format!("<{} x></{}>", name, name)),
    ];
    (name(), prop::collection::vec((text(), skipped), 1..4), text()).prop_map(
        |(name, parts, tail)| {
            let inner: String = parts
                .iter()
                .map(|(text, skipped)| format!("{}{}", text, skipped))
                .collect();
            format!("<{}>{}{}</{}>", name, inner, tail, name)
        },
    )
}

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(element(), 0..4).prop_map(|parts| parts.join("\n"))
}

proptest! {
    #![proptest_config(config())]

    #[test]
    fn generated_documents_parse(xml in document()) {
        prop_assert!(parse(xml.as_bytes()).is_ok(), "failed on {:?}", xml);
    }

    #[test]
    fn canonical_output_round_trips(xml in document()) {
        let doc = parse(xml.as_bytes()).unwrap();
        let bytes = doc.to_bytes().unwrap();
        prop_assert_eq!(bytes.len(), doc.serialized_len());

        let again = parse(&bytes).unwrap();
        prop_assert_eq!(&again, &doc);
        prop_assert_eq!(again.to_bytes().unwrap(), bytes);
    }

    #[test]
    fn split_text_round_trips(xml in split_text()) {
        let doc = parse(xml.as_bytes()).unwrap();
        let element = doc.children().get(0).unwrap();
        // Whitespace-only runs in front of markup are not kept at all.
        prop_assert!(element.children().unwrap().len() <= 1, "split text in {:?}", xml);

        let again = parse(&doc.to_bytes().unwrap()).unwrap();
        prop_assert_eq!(&again, &doc);
    }

    #[test]
    fn parser_never_panics(input in prop::collection::vec(any::<u8>(), 0..1000)) {
        let _ = parse(&input);
    }

    #[test]
    fn parser_never_panics_markup(input in "[<>/?!=a-c '\"\\-\\[\\] \n]{0,300}") {
        let _ = input.parse::<Document>();
    }

    #[test]
    fn chunks_cover_the_input(input in "[<>/?!=a-c '\"\\- \n]{0,200}") {
        let mut scanner = Scanner::new(input.as_bytes());
        let mut last = 0;
        while let Ok(Some(chunk)) = scanner.next_chunk() {
            prop_assert!(chunk.offset() >= last);
            prop_assert!(!chunk.is_empty());
            last = chunk.offset() + chunk.len();
            prop_assert_eq!(scanner.position(), last);
        }
    }

    #[test]
    fn hex_dump_line_count(input in prop::collection::vec(any::<u8>(), 0..200)) {
        let dump = HexDump(&input).to_string();
        prop_assert_eq!(dump.lines().count(), input.len().div_ceil(16));
    }
}
