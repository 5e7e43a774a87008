//! Transposition options
//!
//! Options can be built in code or loaded from a YAML file:
//!
//! ```yaml
//! chord-ratio-threshold: 0.5
//! delimiter-symbols: ["|", "-"]
//! ```

use crate::error::{Result, TransposeError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Options shared by every transposition entry point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TransposeOptions {
    /// Extra literal delimiters. When empty, any run of whitespace or of
    /// characters other than letters, digits, `#` and `/` delimits tokens.
    pub delimiter_symbols: Vec<String>,
    /// Minimum share of a line's words that must be chords for the line to
    /// be rewritten, in `[0, 1]`. `0.0` treats any line holding a chord as a
    /// chord line.
    pub chord_ratio_threshold: f64,
}

impl Default for TransposeOptions {
    fn default() -> Self {
        Self {
            delimiter_symbols: Vec::new(),
            chord_ratio_threshold: 0.0,
        }
    }
}

impl TransposeOptions {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.chord_ratio_threshold = threshold;
        self
    }

    pub fn with_delimiters<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.delimiter_symbols = symbols.into_iter().map(Into::into).collect();
        self
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let options: TransposeOptions = serde_yaml::from_str(yaml)?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| TransposeError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_yaml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.chord_ratio_threshold) {
            return Err(TransposeError::InvalidOptions(format!(
                "chord-ratio-threshold must be between 0 and 1, got {}",
                self.chord_ratio_threshold
            )));
        }
        Ok(())
    }
}
