//! Errors surfaced by the knowledge base, the rule-file decoder and the
//! command parser. The inference engine itself never fails.

use crate::Atom;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KbError {
    /// Not of the form `[A-Za-z_][A-Za-z0-9_]*`
    #[error("\"{0}\" is not a valid atom")]
    InvalidAtom(String),

    /// A batch of facts with no items in it
    #[error("at least one atom is required")]
    EmptyBatch,

    #[error("rule for \"{head}\" has no conditions")]
    EmptyBody { head: Atom },
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("could not open file")]
    Io(#[from] std::io::Error),

    /// 1-based line number and the trimmed offending text
    #[error("line {line} is not a valid rule: {text:?}")]
    InvalidRule { line: usize, text: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command \"{0}\"")]
    UnknownCommand(String),

    #[error("{0} needs an argument")]
    MissingArgument(&'static str),
}
