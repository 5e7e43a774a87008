//! # Token Rewriting
//!
//! Applies a [`TranspositionMap`] to tokenized lines while keeping the
//! columns of the following text where they were.
//!
//! ## Space Debt
//! A rewritten chord can be shorter or longer than the original:
//! - **Shorter** (`C#m` → `Dm`): the chord is followed by padding spaces for
//!   the difference, unless it ends the line.
//! - **Longer** (`C` → `Bb`): the difference becomes *space debt*. The next
//!   text token pays it by giving up leading whitespace. It never gives up
//!   its last character. The debt is reset after that one token, even when it
//!   could not be paid in full.
//!
//! Debt still owed at the end of a line is dropped, and that line grows a
//! little instead.
//!
//! ```text
//! G        C           Am7      (G -> F)
//! F        Bb          Gm7
//!           ^ one space taken back from the gap after Bb
//! ```

use crate::chord::Chord;
use crate::error::{Result, TransposeError};
use crate::lexer::{Line, LocatedToken, Token};
use crate::transpose::TranspositionMap;
use log::debug;

/// Rewrite every chord of every line through `map`.
pub fn rewrite(lines: &[Line], map: &TranspositionMap) -> Result<Vec<Line>> {
    lines.iter().map(|line| rewrite_line(line, map)).collect()
}

fn map_spelling(spelling: &str, chord: &Chord, map: &TranspositionMap) -> Result<String> {
    map.get(spelling)
        .map(str::to_string)
        .ok_or_else(|| TransposeError::UnmappableChord(chord.to_string()))
}

/// Map a chord's root and bass, keeping its suffix.
pub fn map_chord(chord: &Chord, map: &TranspositionMap) -> Result<Chord> {
    let root = map_spelling(&chord.root, chord, map)?;
    let bass = chord
        .bass
        .as_deref()
        .map(|bass| map_spelling(bass, chord, map))
        .transpose()?;

    Ok(Chord {
        root,
        suffix: chord.suffix.clone(),
        bass,
    })
}

pub fn rewrite_line(line: &Line, map: &TranspositionMap) -> Result<Line> {
    let mut tokens: Vec<LocatedToken> = Vec::with_capacity(line.tokens.len());
    let mut space_debt = 0usize;
    let last = line.tokens.len().saturating_sub(1);

    for (idx, located) in line.tokens.iter().enumerate() {
        match &located.token {
            Token::Chord(chord) => {
                let mapped = map_chord(chord, map)?;
                let original_len = located.token.char_len();
                let mapped_len = mapped.char_len();

                tokens.push(LocatedToken {
                    token: Token::Chord(mapped),
                    offset: located.offset,
                });

                if mapped_len < original_len && idx < last {
                    tokens.push(LocatedToken {
                        token: Token::Text(" ".repeat(original_len - mapped_len)),
                        offset: located.offset + mapped_len,
                    });
                } else if mapped_len > original_len {
                    space_debt += mapped_len - original_len;
                }
            }
            Token::Text(text) if space_debt > 0 => {
                let leading = text.chars().take_while(|c| c.is_whitespace()).count();
                let taken = space_debt
                    .min(leading)
                    .min(text.chars().count().saturating_sub(1));

                tokens.push(LocatedToken {
                    token: Token::Text(text.chars().skip(taken).collect()),
                    offset: located.offset + taken,
                });
                space_debt = 0;
            }
            Token::Text(text) => match tokens.last_mut() {
                Some(LocatedToken {
                    token: Token::Text(previous),
                    ..
                }) => previous.push_str(text),
                _ => tokens.push(located.clone()),
            },
        }
    }

    if space_debt > 0 {
        debug!("dropping {} columns of space debt at end of line", space_debt);
    }

    Ok(Line { tokens })
}
