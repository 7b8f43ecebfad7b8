use crate::{error::KbError, util::VecSet, Atom, RuleSet};
use tracing::{debug, info};

/// Known facts plus the rules currently loaded.
///
/// Facts only grow through [`add_facts`](Self::add_facts) and
/// [`absorb`](Self::absorb). Loading a rule set replaces the rules wholesale;
/// every load after the first also forgets all facts, treating the new rules
/// as a fresh problem.
#[derive(Debug, Default, Clone)]
pub struct KnowledgeBase {
    facts: VecSet<Atom>,
    rules: RuleSet,
    loaded: bool,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn facts(&self) -> &VecSet<Atom> {
        &self.facts
    }
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
    /// Whether a rule set has been loaded at least once.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
    pub fn knows(&self, atom: &Atom) -> bool {
        self.facts.contains(atom)
    }

    /// Validates the whole batch before touching `facts`: on error nothing
    /// is added. Returns the batch in order, duplicates within it collapsed.
    /// Atoms that are already known are accepted and left where they are.
    pub fn add_facts<I, S>(&mut self, items: I) -> Result<Vec<Atom>, KbError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut batch = VecSet::default();
        for item in items {
            batch.insert(Atom::new(item.as_ref())?);
        }
        if batch.is_empty() {
            return Err(KbError::EmptyBatch);
        }
        let fresh = self.facts.extend(batch.iter().cloned());
        debug!(batch = batch.len(), fresh, "facts added");
        Ok(batch.into_vec())
    }

    pub fn load_rules(&mut self, rules: RuleSet) {
        if self.loaded {
            debug!(forgotten = self.facts.len(), "reload clears facts");
            self.facts.clear();
        }
        info!(rules = rules.len(), "rule set loaded");
        self.rules = rules;
        self.loaded = true;
    }

    /// Merges derived atoms into the facts. Returns how many were new.
    pub fn absorb(&mut self, derived: impl IntoIterator<Item = Atom>) -> usize {
        let fresh = self.facts.extend(derived);
        debug!(fresh, total = self.facts.len(), "derived atoms absorbed");
        fresh
    }
}
