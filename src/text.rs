//! Input text gathering and line layout.

use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use textwrap::{wrap, Options, WordSeparator, WrapAlgorithm};

use crate::error::{BidetError, Result};

/// Where the text to render comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    /// Standard input, for no arguments or a lone `-`.
    Stdin,
    /// A single argument naming an existing file.
    File(String),
    /// The arguments themselves, one line each.
    Args(Vec<String>),
}

impl TextSource {
    /// Classify positional arguments.
    pub fn from_args(args: &[String]) -> Self {
        match args {
            [] => TextSource::Stdin,
            [first, ..] if first == "-" => TextSource::Stdin,
            [single] if Path::new(single).is_file() => TextSource::File(single.clone()),
            _ => TextSource::Args(args.to_vec()),
        }
    }

    /// Read the raw input lines, using `stdin` when the source is standard input.
    pub fn read_lines(&self, stdin: impl Read) -> Result<Vec<String>> {
        match self {
            TextSource::Stdin => read_all_lines(stdin),
            TextSource::File(path) => {
                let file = std::fs::File::open(path).map_err(|e| BidetError::Io {
                    path: path.into(),
                    message: format!("Failed to read text: {}", e),
                })?;
                read_all_lines(file)
            }
            TextSource::Args(args) => Ok(args.clone()),
        }
    }
}

fn read_all_lines(reader: impl Read) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in BufReader::new(reader).lines() {
        lines.push(line?);
    }
    Ok(lines)
}

/// Arrange input lines for rendering.
///
/// With `preserve` the lines are kept as given (minus line endings).
/// Otherwise they are joined with single spaces and refilled to `width`
/// columns greedily, breaking words longer than a line.
pub fn layout_lines(lines: &[String], width: usize, preserve: bool) -> Vec<String> {
    if preserve {
        return lines
            .iter()
            .map(|l| l.trim_end_matches(['\r', '\n']).to_string())
            .collect();
    }

    let joined = lines.iter().map(|l| l.trim()).collect::<Vec<_>>().join(" ");
    let options = Options::new(width.max(1))
        .word_separator(WordSeparator::AsciiSpace)
        .wrap_algorithm(WrapAlgorithm::FirstFit)
        .break_words(true);

    wrap(joined.trim(), options)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

/// Check if any line contains non-ASCII characters.
pub fn needs_latin1(lines: &[String]) -> bool {
    lines.iter().any(|line| !line.is_ascii())
}
