//! Error types for the identifier codec and injected capabilities.
//!
//! None of these ever escape the public entry points: the normalizer turns a
//! codec error into "leave the field alone" and the sanitizer turns a
//! capability error into the conservative decision for that call site.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UuidCodecError {
    #[error("expected {expected} elements, got {got}")]
    WrongArity { expected: usize, got: usize },

    #[error("element {index} is not a number")]
    NotNumeric { index: usize },

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("field `{0}` is not a 64-bit integer")]
    FieldNotNumeric(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapabilityError {
    #[error("capability unavailable: {0}")]
    Unavailable(String),

    #[error("{0} lock poisoned")]
    Poisoned(&'static str),

    #[error("invalid position: {0}")]
    InvalidPosition(String),
}
