pub mod api;
pub mod chord;
pub mod config;
pub mod error;
pub mod key;
pub mod lexer;
pub mod rewrite;
pub mod transpose;

pub use api::{
    guess_key, guess_key_from_lines, render_lines, tokenize, transpose_by, transpose_from_nashville,
    transpose_lines_from_nashville, transpose_lines_to_key, transpose_lines_to_nashville,
    transpose_to_key, transpose_to_nashville,
};
pub use chord::{is_chord, is_nashville_chord, parse_chord, parse_nashville_chord, Chord};
pub use config::TransposeOptions;
pub use error::{Result, TransposeError};
pub use key::{Accidental, KeyRegistry, KeySignature};
pub use lexer::{Lexer, Line, LocatedToken, Token};
pub use rewrite::rewrite;
pub use transpose::TranspositionMap;
