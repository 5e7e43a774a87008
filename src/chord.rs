//! Chord symbol grammar
//!
//! Splits a chord token into root, suffix and optional bass, for letter chords
//! (`C#m7/G#`) and Nashville-degree chords (`b7sus/1`).
//!
//! # Grammar
//! ```text
//! chord     := root suffix bass?
//! root      := [A-H С Е А В Н] ('#' | 'b')?        Nashville: ('#' | 'b')? [1-7]
//! suffix    := '('? triad? added* ')'?
//! triad     := M | maj | major | m | min | minor | dim | sus | dom | aug | + | -
//! added     := ('/' | '.' | '+' | 'add')? ('#' | 'b')? digit+ ('+' | '-')?
//! bass      := '/' root
//! ```
//!
//! Nashville added tones do not take `/` as a separator, so `5/7` always reads
//! as a slash chord. Matching is anchored and case-sensitive, and alternatives
//! are tried leftmost-first: `Cmajor7` is `maj` + `or7` only if that leaves
//! nothing over, otherwise `major` + `7`.

use crate::error::{Result, TransposeError};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

const ROOT_PATTERN: &str = r"(?P<root>[A-HСЕАВН][#b]?)";
const TRIAD_PATTERN: &str = r"(?:M|maj|major|m|min|minor|dim|sus|dom|aug|\+|-)";
const ADDED_TONE_PATTERN: &str = r"(?:(?:[/.+]|add)?[#b]?[0-9]+[+-]?)";
const BASS_PATTERN: &str = r"(?:/(?P<bass>[A-HСЕАВН][#b]?))?";

const NASHVILLE_ROOT_PATTERN: &str = r"(?P<root>[#b]?[1-7])";
const NASHVILLE_ADDED_TONE_PATTERN: &str = r"(?:(?:[.+]|add)?[#b]?[0-9]+[+-]?)";
const NASHVILLE_BASS_PATTERN: &str = r"(?:/(?P<bass>[#b]?[1-7]))?";

const MINOR_MARKERS: [&str; 3] = ["minor", "min", "m"];
const MAJOR_MARKERS: [&str; 4] = ["maj", "M", "(maj", "(M"];

fn suffix_pattern(added_tone: &str) -> String {
    format!(r"(?P<suffix>\(?{}?{}*\)?)", TRIAD_PATTERN, added_tone)
}

lazy_static! {
    static ref CHORD_RE: Regex = Regex::new(&format!(
        "^{}{}{}$",
        ROOT_PATTERN,
        suffix_pattern(ADDED_TONE_PATTERN),
        BASS_PATTERN
    ))
    .expect("chord grammar is a valid regex");
    static ref NASHVILLE_CHORD_RE: Regex = Regex::new(&format!(
        "^{}{}{}$",
        NASHVILLE_ROOT_PATTERN,
        suffix_pattern(NASHVILLE_ADDED_TONE_PATTERN),
        NASHVILLE_BASS_PATTERN
    ))
    .expect("nashville chord grammar is a valid regex");
}

/// A chord symbol, e.g. `Am7/G` is root `A`, suffix `m7`, bass `G`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    pub root: String,
    pub suffix: String,
    pub bass: Option<String>,
}

impl Chord {
    pub fn new(root: impl Into<String>, suffix: impl Into<String>, bass: Option<String>) -> Self {
        Self {
            root: root.into(),
            suffix: suffix.into(),
            bass,
        }
    }

    /// Whether the suffix marks a minor triad.
    ///
    /// The suffix must open with `m`, `min` or `minor`, and the minor marker
    /// must not be followed by a major one. `m7` and `min` are minor;
    /// `maj7`, `M`, `mM7` and `m(maj7)` are not.
    pub fn is_minor(&self) -> bool {
        let suffix = self.suffix.as_str();
        if suffix.starts_with("maj") {
            return false;
        }

        match MINOR_MARKERS
            .iter()
            .find_map(|marker| suffix.strip_prefix(marker))
        {
            Some(rest) => !MAJOR_MARKERS.iter().any(|marker| rest.starts_with(marker)),
            None => false,
        }
    }

    /// Rendered length in characters.
    pub fn char_len(&self) -> usize {
        self.root.chars().count()
            + self.suffix.chars().count()
            + self.bass.as_ref().map_or(0, |bass| bass.chars().count() + 1)
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.bass {
            Some(bass) => write!(f, "{}{}/{}", self.root, self.suffix, bass),
            None => write!(f, "{}{}", self.root, self.suffix),
        }
    }
}

fn parse_with(re: &Regex, token: &str) -> Result<Chord> {
    let caps = re
        .captures(token)
        .ok_or_else(|| TransposeError::NotAChord(token.to_string()))?;

    let group = |name: &str| caps.name(name).map(|m| m.as_str().to_string());
    Ok(Chord {
        root: group("root").unwrap_or_default(),
        suffix: group("suffix").unwrap_or_default(),
        bass: group("bass"),
    })
}

pub fn is_chord(token: &str) -> bool {
    CHORD_RE.is_match(token)
}

/// Parse a letter chord such as `F#m7b5/E`.
///
/// ```
/// use transposer::parse_chord;
///
/// let chord = parse_chord("Dm7/F")?;
/// assert_eq!(chord.root, "D");
/// assert_eq!(chord.suffix, "m7");
/// assert_eq!(chord.bass.as_deref(), Some("F"));
/// assert!(chord.is_minor());
/// # Ok::<(), transposer::TransposeError>(())
/// ```
pub fn parse_chord(token: &str) -> Result<Chord> {
    parse_with(&CHORD_RE, token)
}

pub fn is_nashville_chord(token: &str) -> bool {
    NASHVILLE_CHORD_RE.is_match(token)
}

/// Parse a Nashville-degree chord such as `6m7` or `5/7`.
pub fn parse_nashville_chord(token: &str) -> Result<Chord> {
    parse_with(&NASHVILLE_CHORD_RE, token)
}
