//! # Lexer
//!
//! Splits chord-sheet text into lines of [`LocatedToken`]s.
//!
//! ## Algorithm
//! Each line is split with a delimiter regex. The delimiter matches are kept
//! as pieces of their own, interleaved with the words around them. Words that
//! are non-empty after trimming are *meaningful*. A line is a chord line when
//! it has at least one meaningful word and the share of meaningful words that
//! parse as chords reaches the chord ratio threshold.
//!
//! On chord lines every chord word becomes a [`Token::Chord`]. Everything else
//! is merged into the surrounding [`Token::Text`]. Lyric lines become a single
//! text token, so a lyric like "A day in the life" keeps its "A".
//!
//! ## Offsets
//! Offsets count characters from the start of the whole text. Each line break
//! counts as one character.
//!
//! ## Example
//! ```rust
//! use transposer::lexer::{Lexer, Token};
//!
//! let lexer = Lexer::new(true, false, 0.5);
//! let lines = lexer.tokenize("Am   C\nA day in the life");
//!
//! assert_eq!(lines.len(), 2);
//! assert_eq!(lines[0].tokens.len(), 3);
//! assert!(matches!(lines[0].tokens[0].token, Token::Chord(_)));
//! assert_eq!(lines[0].tokens[1].offset, 2);
//! assert_eq!(lines[1].tokens.len(), 1);
//! assert_eq!(lines[1].tokens[0].offset, 7);
//! ```

use crate::chord::{is_chord, is_nashville_chord, parse_chord, parse_nashville_chord, Chord};
use crate::config::TransposeOptions;
use crate::error::Result;
use lazy_static::lazy_static;
use log::trace;
use regex::Regex;
use std::fmt;

lazy_static! {
    static ref DEFAULT_DELIMITER: Regex =
        Regex::new(r"(?:\s|[^\p{L}\p{N}#/])+").expect("default delimiter is a valid regex");
}

/// Token types of a chord sheet
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Chord(Chord),
    Text(String),
}

impl Token {
    pub fn is_chord(&self) -> bool {
        matches!(self, Token::Chord(_))
    }

    pub fn char_len(&self) -> usize {
        match self {
            Token::Chord(chord) => chord.char_len(),
            Token::Text(text) => text.chars().count(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Chord(chord) => write!(f, "{}", chord),
            Token::Text(text) => f.write_str(text),
        }
    }
}

/// A token with its character offset in the source
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedToken {
    pub token: Token,
    pub offset: usize,
}

/// One source line
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Line {
    pub tokens: Vec<LocatedToken>,
}

impl Line {
    pub fn chords(&self) -> impl Iterator<Item = &Chord> {
        self.tokens.iter().filter_map(|located| match &located.token {
            Token::Chord(chord) => Some(chord),
            Token::Text(_) => None,
        })
    }

    pub fn has_chords(&self) -> bool {
        self.chords().next().is_some()
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for located in &self.tokens {
            write!(f, "{}", located.token)?;
        }
        Ok(())
    }
}

/// Build the delimiter regex for a set of extra delimiter symbols.
///
/// With no symbols this is the default delimiter. Otherwise it is runs of
/// whitespace or any one of the symbols, matched literally.
pub fn delimiter_pattern(symbols: &[String]) -> Result<Regex> {
    let symbols: Vec<&String> = symbols.iter().filter(|s| !s.is_empty()).collect();
    if symbols.is_empty() {
        return Ok(DEFAULT_DELIMITER.clone());
    }

    let mut alternatives = vec![r"\s+".to_string()];
    alternatives.extend(symbols.iter().map(|s| regex::escape(s)));
    Ok(Regex::new(&format!("(?:{})", alternatives.join("|")))?)
}

/// A slice of a line, either a delimiter match or the text between two.
struct Piece<'a> {
    text: &'a str,
    is_delimiter: bool,
}

fn split_keeping_delimiters<'a>(line: &'a str, delimiter: &Regex) -> Vec<Piece<'a>> {
    let mut pieces = Vec::new();
    let mut position = 0;

    for m in delimiter.find_iter(line) {
        if m.start() > position {
            pieces.push(Piece {
                text: &line[position..m.start()],
                is_delimiter: false,
            });
        }
        if !m.as_str().is_empty() {
            pieces.push(Piece {
                text: m.as_str(),
                is_delimiter: true,
            });
        }
        position = m.end();
    }

    if position < line.len() {
        pieces.push(Piece {
            text: &line[position..],
            is_delimiter: false,
        });
    }

    pieces
}

/// Tokenizer for chord sheets
#[derive(Debug, Clone)]
pub struct Lexer {
    accept_standard: bool,
    accept_nashville: bool,
    delimiter: Regex,
    chord_ratio_threshold: f64,
}

impl Lexer {
    /// Lexer with the default delimiter.
    pub fn new(accept_standard: bool, accept_nashville: bool, chord_ratio_threshold: f64) -> Self {
        Self::with_delimiter(
            accept_standard,
            accept_nashville,
            DEFAULT_DELIMITER.clone(),
            chord_ratio_threshold,
        )
    }

    pub fn with_delimiter(
        accept_standard: bool,
        accept_nashville: bool,
        delimiter: Regex,
        chord_ratio_threshold: f64,
    ) -> Self {
        Self {
            accept_standard,
            accept_nashville,
            delimiter,
            chord_ratio_threshold,
        }
    }

    pub fn from_options(
        accept_standard: bool,
        accept_nashville: bool,
        options: &TransposeOptions,
    ) -> Result<Self> {
        options.validate()?;
        let delimiter = delimiter_pattern(&options.delimiter_symbols)?;
        Ok(Self::with_delimiter(
            accept_standard,
            accept_nashville,
            delimiter,
            options.chord_ratio_threshold,
        ))
    }

    fn accepts(&self, word: &str) -> bool {
        (self.accept_standard && is_chord(word)) || (self.accept_nashville && is_nashville_chord(word))
    }

    fn parse(&self, word: &str) -> Option<Chord> {
        if self.accept_standard {
            if let Ok(chord) = parse_chord(word) {
                return Some(chord);
            }
        }
        if self.accept_nashville {
            if let Ok(chord) = parse_nashville_chord(word) {
                return Some(chord);
            }
        }
        None
    }

    fn is_chord_line(&self, pieces: &[Piece<'_>]) -> bool {
        let mut meaningful = 0usize;
        let mut chords = 0usize;

        for piece in pieces {
            if piece.is_delimiter || piece.text.trim().is_empty() {
                continue;
            }
            meaningful += 1;
            if self.accepts(piece.text) {
                chords += 1;
            }
        }

        meaningful > 0 && chords as f64 / meaningful as f64 >= self.chord_ratio_threshold
    }

    pub fn tokenize(&self, text: &str) -> Vec<Line> {
        let mut lines = Vec::new();
        let mut offset = 0usize;

        for (line_number, source) in text.split('\n').enumerate() {
            let pieces = split_keeping_delimiters(source, &self.delimiter);
            let chord_line = self.is_chord_line(&pieces);
            trace!("line {}: chord line = {}", line_number + 1, chord_line);

            let mut line = Line::default();
            if chord_line {
                for piece in &pieces {
                    let chord = if piece.is_delimiter {
                        None
                    } else {
                        self.parse(piece.text)
                    };
                    push_piece(&mut line, piece.text, chord, offset);
                    offset += piece.text.chars().count();
                }
            } else if !source.is_empty() {
                line.tokens.push(LocatedToken {
                    token: Token::Text(source.to_string()),
                    offset,
                });
                offset += source.chars().count();
            }

            lines.push(line);
            offset += 1;
        }

        lines
    }
}

fn push_piece(line: &mut Line, text: &str, chord: Option<Chord>, offset: usize) {
    match chord {
        Some(chord) => line.tokens.push(LocatedToken {
            token: Token::Chord(chord),
            offset,
        }),
        None => match line.tokens.last_mut() {
            Some(LocatedToken {
                token: Token::Text(previous),
                ..
            }) => previous.push_str(text),
            _ => line.tokens.push(LocatedToken {
                token: Token::Text(text.to_string()),
                offset,
            }),
        },
    }
}
