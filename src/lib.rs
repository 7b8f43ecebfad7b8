pub mod config;
pub mod debug;
pub mod error;
pub mod infer;
pub mod kb;
pub mod lang_misc;
pub mod parse;
pub mod pretty;
pub mod session;
pub mod util;

#[cfg(test)]
pub mod test;

pub use error::{CommandError, KbError, LoadError};
pub use infer::{Closure, InferenceEngine};
pub use kb::KnowledgeBase;
pub use session::{Flow, Session};

use indexmap::IndexMap;

/// A propositional fact. Always matches `[A-Za-z_][A-Za-z0-9_]*`.
#[derive(Hash, PartialOrd, Ord, Eq, PartialEq, Clone)]
pub struct Atom(String);

/// `head <-- body[0] & body[1] & ...`. The body is never empty.
#[derive(Hash, Clone, Eq, PartialEq)]
pub struct Rule {
    pub(crate) head: Atom,
    pub(crate) body: Vec<Atom>,
}

/// Rules keyed by head, in first-insertion order. A repeated head replaces
/// the earlier body in place.
#[derive(Default, Clone, Eq, PartialEq)]
pub struct RuleSet {
    rules: IndexMap<Atom, Vec<Atom>>,
}
