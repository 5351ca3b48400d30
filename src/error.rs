//! # Error Types
//!
//! The engine itself never fails: lookups return `Option` or an empty
//! collection. `UkuleleError` is used by the outer surfaces that want an
//! error value to report, such as config loading, the consent record, and the
//! strict chord lookup used by the CLI and the wasm bindings.
//!
//! ## Error Types
//! - `UnknownNote` - Note text whose letter is not A-G
//! - `UnrecognizedChord` - Chord symbol whose root or quality does not resolve
//! - `EmptyInput` - Blank chord input (shown as a prompt, not an error)
//! - `ConfigError` - Invalid YAML widget configuration
//! - `ConsentError` - Consent record that cannot be read or written
//!
//! ## Usage
//! ```rust
//! use ukulele::{resolve_chord, UkuleleError};
//!
//! match resolve_chord("Zx") {
//!     Ok(parsed) => println!("{}", parsed.label),
//!     Err(UkuleleError::EmptyInput) => println!("Select a chord"),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UkuleleError {
    /// Note text that does not start with a letter A-G.
    ///
    /// # Example
    /// ```
    /// # use ukulele::UkuleleError;
    /// let err = UkuleleError::UnknownNote("H".to_string());
    /// assert_eq!(err.to_string(), "Unknown note: H");
    /// ```
    #[error("Unknown note: {0}")]
    UnknownNote(String),

    /// Chord symbol that could not be resolved to a root and a quality.
    ///
    /// # Example
    /// ```
    /// # use ukulele::UkuleleError;
    /// let err = UkuleleError::UnrecognizedChord("Cxyz".to_string());
    /// assert_eq!(err.to_string(), "Cxyz is not recognized");
    /// ```
    #[error("{0} is not recognized")]
    UnrecognizedChord(String),

    /// Blank input. Callers show a neutral prompt for this one.
    #[error("Select a chord")]
    EmptyInput,

    /// Invalid widget configuration.
    ///
    /// # Example
    /// ```
    /// # use ukulele::UkuleleError;
    /// let err = UkuleleError::ConfigError("unknown scale: lydian".to_string());
    /// assert_eq!(err.to_string(), "Invalid config: unknown scale: lydian");
    /// ```
    #[error("Invalid config: {0}")]
    ConfigError(String),

    /// Consent record that failed to parse or persist.
    #[error("Cookie consent: {0}")]
    ConsentError(String),
}
