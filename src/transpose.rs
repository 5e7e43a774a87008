//! # Transposition Maps
//!
//! A [`TranspositionMap`] sends every accepted root spelling to its rewritten
//! spelling. Three kinds are built:
//! - **Key to key**: shift by the distance between the keys, spelled the way
//!   the target key writes it.
//! - **Key to Nashville**: the degree above the source tonic, with `#` or `b`
//!   following the key's accidental preference.
//! - **Nashville to key**: every degree form (`1`..`7`, optionally `#`/`b`)
//!   spelled in the target key.

use crate::key::{accepted_spellings, rank, Accidental, KeySignature, N_KEYS};
use log::debug;
use std::collections::HashMap;

/// Nashville degree for each semitone above the tonic, sharp-leaning
pub const SHARP_DEGREES: [&str; N_KEYS] = ["1", "#1", "2", "#2", "3", "4", "#4", "5", "#5", "6", "#6", "7"];

/// Nashville degree for each semitone above the tonic, flat-leaning
pub const FLAT_DEGREES: [&str; N_KEYS] = ["1", "b2", "2", "b3", "3", "4", "b5", "5", "b6", "6", "b7", "7"];

/// Semitones above the tonic of the major-scale degrees 1 through 7
const MAJOR_SCALE: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Every accidental-prefixed degree the Nashville grammar accepts, with its
/// semitone interval above the tonic.
fn nashville_degrees() -> impl Iterator<Item = (String, usize)> {
    MAJOR_SCALE.iter().enumerate().flat_map(|(idx, &semitones)| {
        [("", 0), ("#", 1), ("b", -1)].into_iter().map(move |(accidental, shift)| {
            let interval = (semitones + shift).rem_euclid(N_KEYS as i32) as usize;
            (format!("{}{}", accidental, idx + 1), interval)
        })
    })
}

/// A total mapping from every accepted spelling to its rewritten spelling.
///
/// Maps are built fresh for each transposition and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranspositionMap {
    entries: HashMap<String, String>,
}

impl TranspositionMap {
    /// Re-spell every pitch for `to`, shifted by the distance between the keys.
    pub fn between_keys(from: &KeySignature, to: &KeySignature) -> Self {
        let delta = from.semitones_to(to).rem_euclid(N_KEYS as i32) as usize;
        debug!("building {} -> {} map ({} semitones)", from, to, delta);

        let entries = spelled_ranks()
            .map(|(spelling, r)| (spelling, to.spell(r + delta).to_string()))
            .collect();
        Self { entries }
    }

    /// Map every pitch to its Nashville degree relative to `from`.
    pub fn to_nashville(from: &KeySignature) -> Self {
        let degrees = match from.accidental {
            Accidental::Sharp => &SHARP_DEGREES,
            Accidental::Flat => &FLAT_DEGREES,
        };
        debug!("building {} -> Nashville map", from);

        let entries = spelled_ranks()
            .map(|(spelling, r)| {
                let interval = (r + N_KEYS - from.rank as usize) % N_KEYS;
                (spelling, degrees[interval].to_string())
            })
            .collect();
        Self { entries }
    }

    /// Map every Nashville degree to its pitch in `to`.
    ///
    /// Sharp and flat forms of the same interval (`#1` and `b2`) resolve to
    /// the one spelling `to` uses at that rank.
    pub fn from_nashville(to: &KeySignature) -> Self {
        debug!("building Nashville -> {} map", to);

        let entries = nashville_degrees()
            .map(|(degree, interval)| {
                let spelling = to.spell(to.rank as usize + interval);
                (degree, spelling.to_string())
            })
            .collect();
        Self { entries }
    }

    /// Map every spelling, letter and Nashville, to itself.
    pub fn identity() -> Self {
        let entries = accepted_spellings()
            .chain(nashville_degrees().map(|(degree, _)| degree))
            .map(|spelling| (spelling.clone(), spelling))
            .collect();
        Self { entries }
    }

    pub fn get(&self, spelling: &str) -> Option<&str> {
        self.entries.get(spelling).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for TranspositionMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

fn spelled_ranks() -> impl Iterator<Item = (String, usize)> {
    accepted_spellings().filter_map(|spelling| {
        let r = rank(&spelling)? as usize;
        Some((spelling, r))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyRegistry;

    fn key(name: &str) -> &'static KeySignature {
        KeyRegistry::standard().get(name).unwrap()
    }

    fn assert_pairs(map: &TranspositionMap, pairs: &[(&str, &str)]) {
        for (from, to) in pairs {
            assert_eq!(map.get(from), Some(*to), "mapping for {}", from);
        }
    }

    #[test]
    fn test_between_keys() {
        assert_pairs(
            &TranspositionMap::between_keys(key("C"), key("G")),
            &[("C", "G"), ("F", "C"), ("A", "E")],
        );
        assert_pairs(
            &TranspositionMap::between_keys(key("G"), key("F")),
            &[("G", "F"), ("D", "C"), ("B", "A"), ("C", "Bb")],
        );
        assert_pairs(
            &TranspositionMap::between_keys(key("D"), key("A")),
            &[("D", "A"), ("F#", "C#"), ("G", "D")],
        );
    }

    #[test]
    fn test_map_is_total() {
        let map = TranspositionMap::between_keys(key("E"), key("Bb"));
        for spelling in accepted_spellings() {
            assert!(map.get(&spelling).is_some(), "missing {}", spelling);
        }
        assert_eq!(map.len(), 39);
    }

    #[test]
    fn test_enharmonic_respelling() {
        // D# lands on Eb in a flat key
        let map = TranspositionMap::between_keys(key("C"), key("F"));
        assert_eq!(map.get("A#"), Some("Eb"));
        let map = TranspositionMap::between_keys(key("C"), key("C"));
        assert_eq!(map.get("Eb"), Some("D#"));
        assert_eq!(map.get("H"), Some("B"));
        assert_eq!(map.get("С#"), Some("C#"));
    }

    #[test]
    fn test_irregular_scales() {
        let map = TranspositionMap::between_keys(key("C"), key("F#"));
        assert_eq!(map.get("B"), Some("E#"));
        let map = TranspositionMap::between_keys(key("C"), key("Cb"));
        assert_eq!(map.get("F"), Some("Fb"));
        assert_eq!(map.get("C"), Some("Cb"));
    }

    #[test]
    fn test_to_nashville_sharp_key() {
        let map = TranspositionMap::to_nashville(key("G"));
        assert_pairs(
            &map,
            &[("G", "1"), ("D", "5"), ("F#", "7"), ("E", "6"), ("C", "4"), ("Bb", "#2"), ("Gb", "7")],
        );
    }

    #[test]
    fn test_to_nashville_flat_key() {
        let map = TranspositionMap::to_nashville(key("F"));
        assert_pairs(&map, &[("F", "1"), ("Bb", "4"), ("Eb", "b7"), ("Ab", "b3"), ("B", "b5")]);
    }

    #[test]
    fn test_from_nashville() {
        let map = TranspositionMap::from_nashville(key("G"));
        assert_pairs(
            &map,
            &[("1", "G"), ("5", "D"), ("7", "F#"), ("6", "E"), ("4", "C"), ("#1", "G#"), ("b2", "G#")],
        );

        let map = TranspositionMap::from_nashville(key("Eb"));
        assert_pairs(&map, &[("1", "Eb"), ("b7", "Db"), ("#6", "Db"), ("b3", "Gb"), ("3", "G")]);
    }

    #[test]
    fn test_from_nashville_is_total() {
        let map = TranspositionMap::from_nashville(key("D"));
        assert_eq!(map.len(), 21);
        assert_eq!(map.get("b1"), Some("C#"));
        assert_eq!(map.get("#7"), Some("D"));
        assert_eq!(map.get("#3"), Some("G"));
        assert_eq!(map.get("8"), None);
    }

    #[test]
    fn test_identity() {
        let map = TranspositionMap::identity();
        assert_eq!(map.len(), 39 + 21);
        assert_eq!(map.get("Вb"), Some("Вb"));
        assert_eq!(map.get("b7"), Some("b7"));
    }
}
