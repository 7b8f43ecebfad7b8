use crate::{error::KbError, parse, Atom, Rule, RuleSet};
use core::str::FromStr;

/////////////////////

impl Atom {
    pub fn new(s: &str) -> Result<Self, KbError> {
        if parse::is_atom(s) {
            Ok(Self(s.to_owned()))
        } else {
            Err(KbError::InvalidAtom(s.to_owned()))
        }
    }
    /// Caller guarantees `s` was recognised by [`parse::atom`].
    pub(crate) fn from_parsed(s: &str) -> Self {
        debug_assert!(parse::is_atom(s));
        Self(s.to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Atom {
    type Err = KbError;
    fn from_str(s: &str) -> Result<Self, KbError> {
        Self::new(s)
    }
}

impl AsRef<str> for Atom {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Rule {
    pub fn new(head: Atom, body: Vec<Atom>) -> Result<Self, KbError> {
        if body.is_empty() {
            return Err(KbError::EmptyBody { head });
        }
        Ok(Self { head, body })
    }
    pub fn head(&self) -> &Atom {
        &self.head
    }
    pub fn body(&self) -> &[Atom] {
        &self.body
    }
}

impl RuleSet {
    /// Returns the body this rule replaced, if its head was already present.
    pub fn insert(&mut self, rule: Rule) -> Option<Vec<Atom>> {
        let Rule { head, body } = rule;
        self.rules.insert(head, body)
    }
    pub fn get(&self, head: &Atom) -> Option<&[Atom]> {
        self.rules.get(head).map(Vec::as_slice)
    }
    pub fn iter(&self) -> impl Iterator<Item = (&Atom, &[Atom])> + '_ {
        self.rules.iter().map(|(head, body)| (head, body.as_slice()))
    }
    pub fn heads(&self) -> impl Iterator<Item = &Atom> + '_ {
        self.rules.keys()
    }
    pub fn len(&self) -> usize {
        self.rules.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        let mut rs = RuleSet::default();
        for rule in iter {
            rs.insert(rule);
        }
        rs
    }
}
