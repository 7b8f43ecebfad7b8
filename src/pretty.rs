//! Console rendering in the interpreter's fixed layout.

use crate::{Atom, Rule, RuleSet};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::io::{Result as IoResult, Write};

const INDENT: &str = "   ";
const LIST_INDENT: &str = "      ";

/// Items joined by `sep`, or `<none>`.
pub(crate) struct Listing<'a, T> {
    pub(crate) t: &'a [T],
    pub(crate) sep: &'a str,
}

/// `head <-- a & b` without needing an owned [`Rule`].
pub(crate) struct RuleLine<'a> {
    pub(crate) head: &'a Atom,
    pub(crate) body: &'a [Atom],
}

impl Display for Atom {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        RuleLine { head: &self.head, body: &self.body }.fmt(f)
    }
}

impl Display for RuleLine<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} <-- {}", self.head, Listing { t: self.body, sep: " & " })
    }
}

impl<T: Display> Display for Listing<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.t.is_empty() {
            return write!(f, "<none>");
        }
        for (i, item) in self.t.iter().enumerate() {
            if i > 0 {
                f.write_str(self.sep)?;
            }
            write!(f, "{}", item)?;
        }
        Ok(())
    }
}

pub fn atom_added(out: &mut impl Write, atom: &Atom) -> IoResult<()> {
    writeln!(out, "{INDENT}atom \"{atom}\" added to kb")
}

pub fn rules_loaded(out: &mut impl Write, rules: &RuleSet, lines: usize) -> IoResult<()> {
    for (head, body) in rules.iter() {
        writeln!(out, "{INDENT}{}", RuleLine { head, body })?;
    }
    writeln!(out)?;
    writeln!(out, "{INDENT}{lines} new rule(s) added")
}

pub fn inference(out: &mut impl Write, derived: &[Atom], known: &[Atom]) -> IoResult<()> {
    writeln!(out, "{INDENT}Newly inferred atoms:")?;
    writeln!(out, "{LIST_INDENT}{}", Listing { t: derived, sep: " " })?;
    writeln!(out, "{INDENT}Atoms already know to be true:")?;
    writeln!(out, "{LIST_INDENT}{}", Listing { t: known, sep: ", " })
}

pub fn error(out: &mut impl Write, message: impl Display) -> IoResult<()> {
    writeln!(out, "Error: {message}")
}
