use crate::{Atom, Rule, RuleSet};
use std::fmt::{Debug, Formatter, Result as FmtResult};

impl Debug for Atom {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

impl Debug for Rule {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{:?} <-- ", self.head)?;
        for (i, atom) in self.body.iter().enumerate() {
            if i > 0 {
                write!(f, " & ")?;
            }
            write!(f, "{:?}", atom)?;
        }
        Ok(())
    }
}

impl Debug for RuleSet {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.debug_map().entries(self.iter()).finish()
    }
}
