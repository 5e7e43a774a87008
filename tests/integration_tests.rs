use std::io::Write;

use transposer::{
    guess_key, render_lines, tokenize, transpose_by, transpose_from_nashville, transpose_to_key,
    transpose_to_nashville, TransposeError, TransposeOptions,
};

const SHEET: &str = "G        C           Am7            C        D7       G\n\
Saying I love you is not the words I want to hear from you";

fn sheet_options() -> TransposeOptions {
    TransposeOptions::default().with_threshold(0.5)
}

#[test]
fn test_sheet_to_flat_key_keeps_columns() {
    let result = transpose_to_key(SHEET, "G", "F", &sheet_options()).unwrap();
    assert_eq!(
        result,
        "F        Bb          Gm7            Bb       C7       F\n\
Saying I love you is not the words I want to hear from you"
    );
}

#[test]
fn test_sheet_shifted_up_a_fifth() {
    let result = transpose_by(SHEET, "G", 7, &sheet_options()).unwrap();
    assert_eq!(
        result,
        "D        G           Em7            G        A7       D\n\
Saying I love you is not the words I want to hear from you"
    );
}

#[test]
fn test_sheet_shifted_down_a_third() {
    let result = transpose_by(SHEET, "G", -4, &sheet_options()).unwrap();
    assert_eq!(
        result,
        "Eb       Ab          Fm7            Ab       Bb7      Eb\n\
Saying I love you is not the words I want to hear from you"
    );
}

#[test]
fn test_mixed_suffixes_with_guessed_key() {
    let text = "A Bmaj CM Dm/F E7/G# Gsus4";
    assert_eq!(guess_key(text, &TransposeOptions::default()).unwrap().major, "A");

    let result = transpose_to_key(text, "", "F", &TransposeOptions::default()).unwrap();
    assert_eq!(result, "F Gmaj AbM Bbm/Db C7/E  Ebsus4");
}

#[test]
fn test_wide_spacing_is_preserved() {
    let result = transpose_to_key("C      G         Am          F", "C", "G", &TransposeOptions::default()).unwrap();
    assert_eq!(result, "G      D         Em          C");
}

#[test]
fn test_chord_density_gates_lyric_lines() {
    let text = "Am   C\nA day in the life";

    let gated = transpose_to_key(text, "C", "D", &sheet_options()).unwrap();
    assert_eq!(gated, "Bm   D\nA day in the life");

    let ungated = transpose_to_key(text, "C", "D", &TransposeOptions::default()).unwrap();
    assert_eq!(ungated, "Bm   D\nB day in the life");
}

#[test]
fn test_nashville_round_trip() {
    let text = "| G | D/F# | Em7 | C2 |";
    let options = TransposeOptions::default();

    let nashville = transpose_to_nashville(text, "G", &options).unwrap();
    assert_eq!(nashville, "| 1 | 5/7  | 6m7 | 42 |");

    let restored = transpose_from_nashville(&nashville, "G", &options).unwrap();
    assert_eq!(restored, text);
}

#[test]
fn test_nashville_into_another_key() {
    let options = TransposeOptions::default();
    let result = transpose_from_nashville("1 4 5/7 6m", "D", &options).unwrap();
    assert_eq!(result, "D G A/C# Bm");
}

#[test]
fn test_slash_chords_move_both_pitches() {
    let result = transpose_to_key("C/E  G/B  Am/G", "C", "D", &TransposeOptions::default()).unwrap();
    assert_eq!(result, "D/F# A/C# Bm/A");
}

#[test]
fn test_text_without_chords_is_an_error() {
    let options = TransposeOptions::default();
    let err = transpose_to_key("just some words\nand more", "C", "D", &options).unwrap_err();
    assert!(matches!(err, TransposeError::NoChordsFound));
    assert_eq!(err.to_string(), "text has no chords");
}

#[test]
fn test_shifts_compose() {
    let text = "C    F    G";
    let options = TransposeOptions::default();

    let up_three = transpose_by(text, "C", 3, &options).unwrap();
    assert_eq!(up_three, "Eb   Ab   Bb");

    let then_four = transpose_by(&up_three, "Eb", 4, &options).unwrap();
    let at_once = transpose_by(text, "C", 7, &options).unwrap();
    assert_eq!(then_four, at_once);
    assert_eq!(at_once, "G    C    D");
}

#[test]
fn test_octave_shift_is_identity() {
    let options = sheet_options();
    assert_eq!(transpose_by(SHEET, "G", 12, &options).unwrap(), SHEET);
    assert_eq!(transpose_by(SHEET, "G", -24, &options).unwrap(), SHEET);
    assert_eq!(transpose_by(SHEET, "G", 0, &options).unwrap(), SHEET);
}

#[test]
fn test_tokenize_and_render_are_lossless() {
    let text = "Intro: C#m7 | Bb  H7/F# |\n\n  lyrics, with punctuation!\n";
    let lines = tokenize(text, true, false, &TransposeOptions::default()).unwrap();
    assert_eq!(lines.len(), 4);
    assert_eq!(render_lines(&lines), text);
}

#[test]
fn test_custom_delimiters_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "chord-ratio-threshold: 0.5").unwrap();
    writeln!(file, "delimiter-symbols: ['*']").unwrap();

    let options = TransposeOptions::load(file.path()).unwrap();
    let result = transpose_to_key("C*G*Am", "C", "D", &options).unwrap();
    assert_eq!(result, "D*A*Bm");
}

#[test]
fn test_custom_delimiters_built_in_code() {
    let options = TransposeOptions::default().with_delimiters(["*", ""]);
    assert_eq!(options.delimiter_symbols, vec!["*".to_string(), String::new()]);

    let result = transpose_to_key("Am*F*C*G", "C", "G", &options).unwrap();
    assert_eq!(result, "Em*C*G*D");
}

#[test]
fn test_sparse_line_stays_a_single_literal() {
    let lines = tokenize("Verse 1 C G: text", true, false, &sheet_options()).unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].tokens.len(), 1);
    assert!(!lines[0].has_chords());
    assert_eq!(lines[0].to_string(), "Verse 1 C G: text");
}
