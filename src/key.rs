//! # Pitch Ranks and Key Signatures
//!
//! Static tables describing the twelve pitch classes and the named major keys.
//!
//! ## Pitch Ranks
//! Every accepted root spelling has a rank: its distance in semitones from C,
//! in `0..=11`. Spellings are a letter plus an optional `#` or `b`. The letters
//! are Latin `A`-`G`, the Germanic `H` (B natural), and the Cyrillic
//! homographs `А В С Е Н` that show up in chord sheets typed on Cyrillic
//! keyboards. Homographs rank as their Latin look-alike.
//!
//! ```text
//! C  C#/Db  D  D#/Eb  E/Fb  E#/F  F#/Gb  G  G#/Ab  A  A#/Bb  B/Cb/H
//! 0    1    2    3     4     5     6     7    8    9    10     11
//! ```
//!
//! ## Key Signatures
//! A [`KeySignature`] is a major key with its relative minor, its accidental
//! preference, and the chromatic spelling used when writing in that key.
//! F#, C#, Gb and Cb use irregular scales containing E#, B#, Cb or Fb.
//! The keys C#, Cb, D# and G# are unconventional. D# and G# have no
//! relative-minor name but can still be named directly.
//!
//! The [`KeyRegistry`] is built once and shared read-only through
//! [`KeyRegistry::standard`].

use crate::chord::{parse_chord, Chord};
use crate::error::{Result, TransposeError};
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt;

/// Number of pitch classes
pub const N_KEYS: usize = 12;

/// Root letters accepted by the chord grammar, Latin first.
pub const ROOT_LETTERS: [char; 13] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', // Latin
    'А', 'В', 'С', 'Е', 'Н', // Cyrillic
];

const SHARP_SCALE: [&str; N_KEYS] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];
const F_SHARP_SCALE: [&str; N_KEYS] = ["C", "C#", "D", "D#", "E", "E#", "F#", "G", "G#", "A", "A#", "B"];
const C_SHARP_SCALE: [&str; N_KEYS] = ["B#", "C#", "D", "D#", "E", "E#", "F#", "G", "G#", "A", "A#", "B"];
const FLAT_SCALE: [&str; N_KEYS] = ["C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B"];
const G_FLAT_SCALE: [&str; N_KEYS] = ["C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "Cb"];
const C_FLAT_SCALE: [&str; N_KEYS] = ["C", "Db", "D", "Eb", "Fb", "F", "Gb", "G", "Ab", "A", "Bb", "Cb"];

/// Accidental preference of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accidental {
    Flat,
    Sharp,
}

/// Map a root letter to its Latin equivalent (`H` and Cyrillic `Н` are B natural).
pub fn latin_letter(letter: char) -> Option<char> {
    match letter {
        'A'..='G' => Some(letter),
        'H' | 'Н' => Some('B'),
        'А' => Some('A'),
        'В' => Some('B'),
        'С' => Some('C'),
        'Е' => Some('E'),
        _ => None,
    }
}

/// Split a spelling into its letter and accidental offset.
fn split_spelling(spelling: &str) -> Option<(char, i8)> {
    let mut chars = spelling.chars();
    let letter = chars.next()?;
    let offset = match chars.as_str() {
        "" => 0,
        "#" => 1,
        "b" => -1,
        _ => return None,
    };
    Some((letter, offset))
}

/// Semitone rank of a root spelling, or `None` for anything outside the alphabet.
///
/// ```
/// use transposer::key::rank;
///
/// assert_eq!(rank("C"), Some(0));
/// assert_eq!(rank("Db"), Some(1));
/// assert_eq!(rank("B#"), Some(0));
/// assert_eq!(rank("H"), Some(11));
/// assert_eq!(rank("X"), None);
/// ```
pub fn rank(spelling: &str) -> Option<u8> {
    let (letter, offset) = split_spelling(spelling)?;
    let base: i8 = match latin_letter(letter)? {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };
    Some((base + offset).rem_euclid(N_KEYS as i8) as u8)
}

/// Rewrite localized letters to their Latin spelling (`Н#` becomes `B#`).
pub fn normalize_spelling(spelling: &str) -> Option<String> {
    let (letter, _) = split_spelling(spelling)?;
    let latin = latin_letter(letter)?;
    Some(format!("{}{}", latin, &spelling[letter.len_utf8()..]))
}

/// Every root spelling the grammar accepts, localized aliases included.
pub fn accepted_spellings() -> impl Iterator<Item = String> {
    ROOT_LETTERS.iter().flat_map(|letter| {
        ["", "#", "b"]
            .iter()
            .map(move |accidental| format!("{}{}", letter, accidental))
    })
}

/// A named major key and its canonical chromatic spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySignature {
    pub major: &'static str,
    /// Empty for the unconventional keys without a relative minor
    pub relative_minor: &'static str,
    pub accidental: Accidental,
    pub rank: u8,
    pub chromatic_scale: [&'static str; N_KEYS],
}

impl KeySignature {
    /// Canonical spelling of the pitch `rank` semitones above C in this key.
    pub fn spell(&self, rank: usize) -> &'static str {
        self.chromatic_scale[rank % N_KEYS]
    }

    /// Signed semitone distance from this key's tonic to `other`'s.
    pub fn semitones_to(&self, other: &KeySignature) -> i32 {
        other.rank as i32 - self.rank as i32
    }

    pub fn contains(&self, spelling: &str) -> bool {
        self.chromatic_scale.contains(&spelling)
    }
}

impl fmt::Display for KeySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.major)
    }
}

const fn key(
    major: &'static str,
    relative_minor: &'static str,
    accidental: Accidental,
    rank: u8,
    chromatic_scale: [&'static str; N_KEYS],
) -> KeySignature {
    KeySignature {
        major,
        relative_minor,
        accidental,
        rank,
        chromatic_scale,
    }
}

/// Read-only lookup tables over all known key signatures.
#[derive(Debug)]
pub struct KeyRegistry {
    keys: Vec<KeySignature>,
    by_name: HashMap<&'static str, usize>,
    by_rank: [usize; N_KEYS],
}

lazy_static! {
    static ref STANDARD_REGISTRY: KeyRegistry = KeyRegistry::new(vec![
        key("C", "Am", Accidental::Sharp, 0, SHARP_SCALE),
        key("Db", "Bbm", Accidental::Flat, 1, FLAT_SCALE),
        key("D", "Bm", Accidental::Sharp, 2, SHARP_SCALE),
        key("Eb", "Cm", Accidental::Flat, 3, FLAT_SCALE),
        key("E", "C#m", Accidental::Sharp, 4, SHARP_SCALE),
        key("F", "Dm", Accidental::Flat, 5, FLAT_SCALE),
        key("Gb", "Ebm", Accidental::Flat, 6, G_FLAT_SCALE),
        key("F#", "D#m", Accidental::Sharp, 6, F_SHARP_SCALE),
        key("G", "Em", Accidental::Sharp, 7, SHARP_SCALE),
        key("Ab", "Fm", Accidental::Flat, 8, FLAT_SCALE),
        key("A", "F#m", Accidental::Sharp, 9, SHARP_SCALE),
        key("Bb", "Gm", Accidental::Flat, 10, FLAT_SCALE),
        key("B", "G#m", Accidental::Sharp, 11, SHARP_SCALE),
        // Unconventional
        key("C#", "A#m", Accidental::Sharp, 1, C_SHARP_SCALE),
        key("Cb", "Abm", Accidental::Flat, 11, C_FLAT_SCALE),
        key("D#", "", Accidental::Sharp, 3, SHARP_SCALE),
        key("G#", "", Accidental::Sharp, 8, SHARP_SCALE),
    ]);
}

impl KeyRegistry {
    /// Build a registry from a key list.
    ///
    /// The first key listed for a rank becomes that rank's preferred key.
    /// Every rank must be covered.
    pub fn new(keys: Vec<KeySignature>) -> Self {
        let mut by_name = HashMap::new();
        let mut by_rank = [usize::MAX; N_KEYS];

        for (idx, key) in keys.iter().enumerate() {
            by_name.entry(key.major).or_insert(idx);
            if !key.relative_minor.is_empty() {
                by_name.entry(key.relative_minor).or_insert(idx);
            }
            let slot = &mut by_rank[key.rank as usize % N_KEYS];
            if *slot == usize::MAX {
                *slot = idx;
            }
        }

        debug_assert!(by_rank.iter().all(|&idx| idx != usize::MAX));

        Self {
            keys,
            by_name,
            by_rank,
        }
    }

    /// The process-wide registry of the seventeen standard key signatures.
    pub fn standard() -> &'static KeyRegistry {
        &STANDARD_REGISTRY
    }

    pub fn keys(&self) -> &[KeySignature] {
        &self.keys
    }

    /// Exact lookup by major name (`"Bb"`) or relative-minor name (`"Gm"`).
    pub fn get(&self, name: &str) -> Option<&KeySignature> {
        self.by_name.get(name).map(|&idx| &self.keys[idx])
    }

    /// Preferred key signature for a rank: Db over C#, Gb over F#, B over Cb.
    pub fn for_rank(&self, rank: usize) -> &KeySignature {
        &self.keys[self.by_rank[rank % N_KEYS]]
    }

    /// Key reached by moving `key` up (or down, when negative) by `semitones`.
    pub fn transpose_key(&self, key: &KeySignature, semitones: i32) -> &KeySignature {
        let shift = semitones.rem_euclid(N_KEYS as i32);
        let rank = (key.rank as i32 + shift) % N_KEYS as i32;
        self.for_rank(rank as usize)
    }

    /// Resolve the key a chord implies.
    ///
    /// A minor chord names its relative major (`Bm` gives D). When no key
    /// carries the exact name, the first key whose chromatic scale spells the
    /// root is used instead.
    pub fn key_for_chord(&self, chord: &Chord) -> Option<&KeySignature> {
        let root = normalize_spelling(&chord.root)?;
        let name = if chord.is_minor() {
            format!("{}m", root)
        } else {
            root.clone()
        };

        self.get(&name)
            .or_else(|| self.keys.iter().find(|key| key.contains(&root)))
    }

    /// Resolve a key name. Anything that parses as a chord symbol is
    /// accepted, so `"Dm"` and `"Am7"` name F and C.
    pub fn parse_key(&self, name: &str) -> Option<&KeySignature> {
        let chord = parse_chord(name.trim()).ok()?;
        self.key_for_chord(&chord)
    }

    pub fn source_key(&self, name: &str) -> Result<&KeySignature> {
        self.parse_key(name)
            .ok_or_else(|| TransposeError::InvalidSourceKey(name.to_string()))
    }

    pub fn target_key(&self, name: &str) -> Result<&KeySignature> {
        self.parse_key(name)
            .ok_or_else(|| TransposeError::InvalidTargetKey(name.to_string()))
    }
}
