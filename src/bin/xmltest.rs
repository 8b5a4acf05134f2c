/*
** This file is a part of driverxml (ASCII XML parser and tree library)
** Copyright (C) 2016-2025 Gurer Ozen
**
** driverxml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::env;
use std::fs::File;
use std::io::Read;
use std::io::stdin;
use std::io::stdout;
use std::process::ExitCode;

use log::LevelFilter;
use log::Metadata;
use log::Record;

use driverxml::DocumentParser;
use driverxml::HexDump;
use driverxml::IoSink;
use driverxml::ParserOptions;
use driverxml::WriterOptions;
use driverxml::XmlError;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_version() {
    println!("xmltest (driverxml) v{}", VERSION);
}

fn print_usage() {
    let defaults = WriterOptions::default();
    println!(
        concat!(
            "Usage: xmltest [OPTIONS] [FILE.xml...]\n",
            "Parses ASCII XML documents and prints them back.\n",
            "Without -t, -o, or -x all three outputs are printed.\n",
            "Options:\n",
            "  -t, --tree            Print the indented tree\n",
            "  -o, --output          Print the canonical serialization\n",
            "  -x, --hex             Print a hex dump of the canonical serialization\n",
            "  -b, --buffer <SIZE>   Initial output buffer size in bytes (default: {})\n",
            "  -d, --max-depth <N>   Maximum element nesting (default: {})\n",
            "      --verbose         Log parser diagnostics to stderr\n",
            "  -h, --help            Display this help message and exit\n",
            "  -v, --version         Display the version and exit"
        ),
        defaults.initial_capacity,
        ParserOptions::default().max_depth,
    );
}

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        eprintln!("[{}] {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

enum TestError {
    IoError(std::io::Error),
    XmlError(XmlError),
}

impl From<std::io::Error> for TestError {
    fn from(err: std::io::Error) -> Self {
        TestError::IoError(err)
    }
}

impl From<XmlError> for TestError {
    fn from(err: XmlError) -> Self {
        TestError::XmlError(err)
    }
}

struct Tester {
    do_tree: bool,
    do_output: bool,
    do_hex: bool,
    parser: DocumentParser,
    writer_options: WriterOptions,
}

impl Tester {
    fn read_file(file: &str, is_stream: bool) -> std::io::Result<Vec<u8>> {
        let mut f: Box<dyn Read> = if is_stream {
            Box::new(stdin())
        } else {
            Box::new(File::open(file)?)
        };
        let mut bytes = Vec::new();
        f.read_to_end(&mut bytes)?;
        Ok(bytes)
    }

    fn run_file(&mut self, file: &str, is_stream: bool) -> Result<(), TestError> {
        let bytes = Tester::read_file(file, is_stream)?;
        let doc = self.parser.parse_bytes(&bytes)?;
        if self.do_tree {
            doc.debug_print(&mut IoSink(stdout().lock()))?;
        }
        if self.do_output || self.do_hex {
            let output = doc.to_bytes_with(&self.writer_options)?;
            if self.do_output {
                println!("{}", String::from_utf8_lossy(&output));
            }
            if self.do_hex {
                print!("{}", HexDump(&output));
            }
        }
        Ok(())
    }

    fn test_file(&mut self, file: &str, is_stream: bool) -> bool {
        match self.run_file(file, is_stream) {
            Ok(()) => true,
            Err(TestError::IoError(e)) => {
                eprintln!("Error reading file '{}': {}", file, e);
                false
            }
            Err(TestError::XmlError(XmlError::OutOfMemory)) => {
                eprintln!("Memory allocation failed while writing '{}'", file);
                false
            }
            Err(TestError::XmlError(e)) => {
                let location = self.parser.location();
                eprintln!(
                    "Error in file '{}' at line {} column {}: {}",
                    file,
                    location.lines + 1,
                    location.column + 1,
                    e
                );
                false
            }
        }
    }
}

fn parse_number(value: Option<String>, what: &str) -> Result<usize, ExitCode> {
    match value {
        Some(value) => value.parse::<usize>().map_err(|_| {
            eprintln!("Invalid {}", what);
            ExitCode::FAILURE
        }),
        None => {
            eprintln!("Missing {}", what);
            Err(ExitCode::FAILURE)
        }
    }
}

fn main() -> ExitCode {
    let mut args = env::args();

    let mut files = Vec::new();
    let mut do_tree = false;
    let mut do_output = false;
    let mut do_hex = false;
    let mut verbose = false;
    let mut writer_options = WriterOptions::default();
    let mut parser_options = ParserOptions::default();

    // Skip the first argument (program name)
    args.next();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-t" | "--tree" => {
                do_tree = true;
            }
            "-o" | "--output" => {
                do_output = true;
            }
            "-x" | "--hex" => {
                do_hex = true;
            }
            "-b" | "--buffer" => match parse_number(args.next(), "buffer size") {
                Ok(size) => writer_options.initial_capacity = size,
                Err(code) => return code,
            },
            "-d" | "--max-depth" => match parse_number(args.next(), "maximum depth") {
                Ok(depth) => parser_options.max_depth = depth,
                Err(code) => return code,
            },
            "--verbose" => {
                verbose = true;
            }
            "-h" | "--help" => {
                print_usage();
                return ExitCode::SUCCESS;
            }
            "-v" | "--version" => {
                print_version();
                return ExitCode::SUCCESS;
            }
            _ => {
                files.push(arg);
            }
        }
    }

    if verbose && log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Trace);
    }

    if !(do_tree || do_output || do_hex) {
        do_tree = true;
        do_output = true;
        do_hex = true;
    }

    let mut tester = Tester {
        do_tree,
        do_output,
        do_hex,
        parser: DocumentParser::with_options(parser_options),
        writer_options,
    };
    if files.is_empty() {
        if !tester.test_file("stdin", true) {
            return ExitCode::FAILURE;
        }
    } else {
        for file in files {
            if !tester.test_file(&file, false) {
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
