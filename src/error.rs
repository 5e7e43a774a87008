//! # Error Types
//!
//! All fallible operations in the transposer return [`TransposeError`].
//!
//! ## Error Types
//! - `NotAChord` - a token handed to the chord parser does not match the grammar
//! - `NoChordsFound` - the text has no recognizable chord to transpose or guess a key from
//! - `InvalidSourceKey` / `InvalidTargetKey` - a key name resolves to no key signature
//! - `UnmappableChord` - a chord's root or bass has no entry in the transposition map
//! - `InvalidOptions` / `InvalidDelimiter` / `Config` - bad caller configuration
//!
//! ## Usage
//! ```rust
//! use transposer::{transpose_to_key, TransposeError, TransposeOptions};
//!
//! match transpose_to_key("hello world", "C", "D", &TransposeOptions::default()) {
//!     Ok(text) => println!("{}", text),
//!     Err(TransposeError::NoChordsFound) => eprintln!("nothing to transpose"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

/// Result type alias for transposer operations
pub type Result<T> = std::result::Result<T, TransposeError>;

#[derive(Error, Debug)]
pub enum TransposeError {
    /// A token presented for parsing is not a chord symbol.
    ///
    /// # Example
    /// ```
    /// # use transposer::TransposeError;
    /// let err = TransposeError::NotAChord("hello".to_string());
    /// assert_eq!(err.to_string(), "'hello' is not a valid chord");
    /// ```
    #[error("'{0}' is not a valid chord")]
    NotAChord(String),

    /// The input text contains no chord line.
    #[error("text has no chords")]
    NoChordsFound,

    #[error("'{0}' is not a valid source key")]
    InvalidSourceKey(String),

    /// A target key is mandatory; it is never guessed.
    #[error("'{0}' is not a valid target key")]
    InvalidTargetKey(String),

    /// A chord whose root or bass spelling is missing from the map.
    #[error("chord '{0}' cannot be mapped")]
    UnmappableChord(String),

    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("Invalid delimiter pattern: {0}")]
    InvalidDelimiter(#[from] regex::Error),

    /// An options file could not be read.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
