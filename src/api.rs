//! # Public API
//!
//! Entry points of the transposer library.
//!
//! ## Transposition Functions
//!
//! - [`transpose_to_key()`] - Rewrite chords into another key
//! - [`transpose_to_nashville()`] - Rewrite chords as Nashville degrees
//! - [`transpose_from_nashville()`] - Rewrite Nashville degrees as chords in a key
//! - [`transpose_by()`] - Shift chords by a number of semitones
//! - [`guess_key()`] - Key implied by the first chord of a text
//! - [`tokenize()`] - The token structure the functions above work on
//!
//! ## Pipeline
//! 1. Tokenize the text into chord lines and lyric lines
//! 2. Resolve the source key, guessing it from the first chord when needed
//! 3. Build the transposition map for the destination
//! 4. Rewrite chord tokens, reflowing the text between them
//! 5. Join the lines back together
//!
//! ## Typical Usage
//!
//! ```rust
//! use transposer::{transpose_to_key, TransposeOptions};
//!
//! let sheet = "G        C           Am7\nSaying I love you";
//! let options = TransposeOptions::default().with_threshold(0.5);
//!
//! let transposed = transpose_to_key(sheet, "G", "F", &options)?;
//! assert_eq!(transposed, "F        Bb          Gm7\nSaying I love you");
//! # Ok::<(), transposer::TransposeError>(())
//! ```

use crate::config::TransposeOptions;
use crate::error::{Result, TransposeError};
use crate::key::{KeyRegistry, KeySignature};
use crate::lexer::{Lexer, Line};
use crate::rewrite::rewrite;
use crate::transpose::TranspositionMap;
use log::debug;

/// Tokenize text into lines of chord and text tokens.
///
/// `accept_standard` recognizes letter chords, `accept_nashville` recognizes
/// Nashville degrees. Rendering the lines with [`render_lines`] gives back the
/// input exactly.
pub fn tokenize(
    text: &str,
    accept_standard: bool,
    accept_nashville: bool,
    options: &TransposeOptions,
) -> Result<Vec<Line>> {
    let lexer = Lexer::from_options(accept_standard, accept_nashville, options)?;
    Ok(lexer.tokenize(text))
}

/// Join lines back into text.
pub fn render_lines(lines: &[Line]) -> String {
    lines
        .iter()
        .map(|line| line.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn has_chords(lines: &[Line]) -> bool {
    lines.iter().any(Line::has_chords)
}

/// Key implied by the first chord of already-tokenized lines.
pub fn guess_key_from_lines(lines: &[Line]) -> Result<&'static KeySignature> {
    let registry = KeyRegistry::standard();
    let chord = lines
        .iter()
        .flat_map(|line| line.chords())
        .next()
        .ok_or(TransposeError::NoChordsFound)?;

    registry
        .key_for_chord(chord)
        .ok_or(TransposeError::NoChordsFound)
}

/// Guess the key of a text from its first chord.
///
/// A minor first chord names its relative major:
///
/// ```rust
/// use transposer::{guess_key, TransposeOptions};
///
/// let key = guess_key("Am  F  C  G", &TransposeOptions::default())?;
/// assert_eq!(key.major, "C");
/// # Ok::<(), transposer::TransposeError>(())
/// ```
pub fn guess_key(text: &str, options: &TransposeOptions) -> Result<&'static KeySignature> {
    let lines = tokenize(text, true, false, options)?;
    guess_key_from_lines(&lines)
}

fn resolve_source_key(from_key: &str, lines: &[Line]) -> Result<&'static KeySignature> {
    match KeyRegistry::standard().source_key(from_key) {
        Ok(key) => Ok(key),
        Err(err) => {
            debug!("{}, guessing from the first chord", err);
            let key = guess_key_from_lines(lines)?;
            debug!("guessed source key {}", key);
            Ok(key)
        }
    }
}

/// Transpose tokenized lines from `from_key` (guessed when invalid) to `to_key`.
pub fn transpose_lines_to_key(lines: &[Line], from_key: &str, to_key: &str) -> Result<String> {
    if !has_chords(lines) {
        return Err(TransposeError::NoChordsFound);
    }

    let from = resolve_source_key(from_key, lines)?;
    let to = KeyRegistry::standard().target_key(to_key)?;
    let map = TranspositionMap::between_keys(from, to);
    Ok(render_lines(&rewrite(lines, &map)?))
}

/// Transpose tokenized lines to Nashville degrees relative to `from_key`.
pub fn transpose_lines_to_nashville(lines: &[Line], from_key: &str) -> Result<String> {
    if !has_chords(lines) {
        return Err(TransposeError::NoChordsFound);
    }

    let from = resolve_source_key(from_key, lines)?;
    let map = TranspositionMap::to_nashville(from);
    Ok(render_lines(&rewrite(lines, &map)?))
}

/// Transpose Nashville-tokenized lines into `to_key`.
pub fn transpose_lines_from_nashville(lines: &[Line], to_key: &str) -> Result<String> {
    if !has_chords(lines) {
        return Err(TransposeError::NoChordsFound);
    }

    let to = KeyRegistry::standard().target_key(to_key)?;
    let map = TranspositionMap::from_nashville(to);
    Ok(render_lines(&rewrite(lines, &map)?))
}

/// Transpose the chords of `text` from `from_key` to `to_key`.
///
/// When `from_key` is empty or invalid the source key is guessed from the
/// first chord.
///
/// # Errors
/// - [`TransposeError::NoChordsFound`] if the text has no chord line
/// - [`TransposeError::InvalidTargetKey`] if `to_key` names no key
pub fn transpose_to_key(
    text: &str,
    from_key: &str,
    to_key: &str,
    options: &TransposeOptions,
) -> Result<String> {
    let lines = tokenize(text, true, false, options)?;
    transpose_lines_to_key(&lines, from_key, to_key)
}

/// Rewrite the chords of `text` as Nashville degrees.
///
/// ```rust
/// use transposer::{transpose_to_nashville, TransposeOptions};
///
/// let nashville = transpose_to_nashville("G  Em7  C2  D/F#", "G", &TransposeOptions::default())?;
/// assert_eq!(nashville, "1  6m7  42  5/7");
/// # Ok::<(), transposer::TransposeError>(())
/// ```
pub fn transpose_to_nashville(text: &str, from_key: &str, options: &TransposeOptions) -> Result<String> {
    let lines = tokenize(text, true, false, options)?;
    transpose_lines_to_nashville(&lines, from_key)
}

/// Rewrite Nashville degrees in `text` as chords in `to_key`.
///
/// The key is required: Nashville degrees carry no key of their own.
pub fn transpose_from_nashville(text: &str, to_key: &str, options: &TransposeOptions) -> Result<String> {
    let lines = tokenize(text, false, true, options)?;
    transpose_lines_from_nashville(&lines, to_key)
}

/// Shift the chords of `text` by `semitones`, up when positive.
///
/// Chords are spelled in the conventional key reached by the shift
/// (Db rather than C#, Gb rather than F#).
pub fn transpose_by(
    text: &str,
    from_key: &str,
    semitones: i32,
    options: &TransposeOptions,
) -> Result<String> {
    let lines = tokenize(text, true, false, options)?;
    if !has_chords(&lines) {
        return Err(TransposeError::NoChordsFound);
    }

    let registry = KeyRegistry::standard();
    let from = resolve_source_key(from_key, &lines)?;
    let to = registry.transpose_key(from, semitones);
    debug!("shifting {} by {} semitones to {}", from, semitones, to);

    let map = TranspositionMap::between_keys(from, to);
    Ok(render_lines(&rewrite(&lines, &map)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> TransposeOptions {
        TransposeOptions::default()
    }

    #[test]
    fn test_guess_key() {
        assert_eq!(guess_key("Bm G D A", &opts()).unwrap().major, "D");
        assert_eq!(guess_key("Cmaj7 Am", &opts()).unwrap().major, "C");
        assert_eq!(guess_key("title\nEbm Gb", &opts()).unwrap().major, "Gb");
        assert!(matches!(guess_key("no chords here", &opts()), Err(TransposeError::NoChordsFound)));
    }

    #[test]
    fn test_source_key_is_guessed_when_invalid() {
        assert_eq!(transpose_to_key("D Bm G A7", "", "A", &opts()).unwrap(), "A F#m D E7");
        assert_eq!(transpose_to_key("D Bm G A7", "nope", "A", &opts()).unwrap(), "A F#m D E7");
    }

    #[test]
    fn test_invalid_target_key() {
        let err = transpose_to_key("C G Am", "C", "X", &opts()).unwrap_err();
        assert!(matches!(err, TransposeError::InvalidTargetKey(name) if name == "X"));
        let err = transpose_from_nashville("1 4 5", "", &opts()).unwrap_err();
        assert!(matches!(err, TransposeError::InvalidTargetKey(_)));
    }

    #[test]
    fn test_no_chords() {
        assert!(matches!(
            transpose_to_key("hello world", "C", "D", &opts()),
            Err(TransposeError::NoChordsFound)
        ));
        assert!(matches!(
            transpose_to_nashville("hello world", "C", &opts()),
            Err(TransposeError::NoChordsFound)
        ));
        assert!(matches!(
            transpose_from_nashville("hello world", "C", &opts()),
            Err(TransposeError::NoChordsFound)
        ));
        assert!(matches!(transpose_by("", "C", 2, &opts()), Err(TransposeError::NoChordsFound)));
    }

    #[test]
    fn test_invalid_options() {
        let options = opts().with_threshold(2.0);
        assert!(matches!(
            transpose_to_key("C", "C", "D", &options),
            Err(TransposeError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_transpose_by() {
        assert_eq!(transpose_by("C F G", "C", 2, &opts()).unwrap(), "D G A");
        assert_eq!(
            transpose_by("G        C           Am7", "G", 7, &opts()).unwrap(),
            "D        G           Em7"
        );
        assert_eq!(transpose_by("D G A", "D", -2, &opts()).unwrap(), "C F G");
        assert_eq!(transpose_by("D Bm G A7", "D", 12, &opts()).unwrap(), "D Bm G A7");
        assert_eq!(transpose_by("D Bm G A7", "D", -12, &opts()).unwrap(), "D Bm G A7");
        assert_eq!(transpose_by("G C D", "G", i32::MAX, &opts()).unwrap(), "D G A");
        assert_eq!(transpose_by("G C D", "G", i32::MIN, &opts()).unwrap(), "B E F#");
    }

    #[test]
    fn test_tokenize_entry_point() {
        let lines = tokenize("C G\nlyrics", true, false, &opts()).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(render_lines(&lines), "C G\nlyrics");
    }

    #[test]
    fn test_token_level_entry_points() {
        let lines = tokenize("Am F C G", true, false, &opts()).unwrap();
        assert_eq!(transpose_lines_to_key(&lines, "Am", "Em").unwrap(), "Em C G D");
        assert_eq!(transpose_lines_to_nashville(&lines, "C").unwrap(), "6m 4 1 5");
    }
}
