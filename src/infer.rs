use crate::{kb::KnowledgeBase, util::VecSet, Atom, RuleSet};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Scan the rules of each round with rayon once there are at least this
    /// many. `None` always scans sequentially.
    pub parallel_threshold: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self { parallel_threshold: Some(4096) }
    }
}

/// Forward chaining to a fixpoint. Holds no state between calls.
#[derive(Debug, Default, Clone)]
pub struct InferenceEngine {
    config: Config,
}

/// Atoms derived beyond the initial facts, grouped by the round that
/// derived them.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Closure {
    layers: Vec<Vec<Atom>>,
    support: HashMap<Atom, Vec<Atom>>,
}

type Candidate<'a> = (&'a Atom, &'a [Atom]);

impl Closure {
    pub fn layers(&self) -> &[Vec<Atom>] {
        &self.layers
    }
    /// Rounds that derived at least one atom.
    pub fn rounds(&self) -> usize {
        self.layers.len()
    }
    /// First-derived first.
    pub fn derived(&self) -> impl Iterator<Item = &Atom> + '_ {
        self.layers.iter().flatten()
    }
    pub fn into_derived(self) -> Vec<Atom> {
        self.layers.into_iter().flatten().collect()
    }
    pub fn contains(&self, atom: &Atom) -> bool {
        self.support.contains_key(atom)
    }
    /// The body of the rule that derived `atom`.
    pub fn explain(&self, atom: &Atom) -> Option<&[Atom]> {
        self.support.get(atom).map(Vec::as_slice)
    }
    pub fn len(&self) -> usize {
        self.support.len()
    }
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
    fn commit(&mut self, fired: Vec<Candidate>) {
        let mut layer = Vec::with_capacity(fired.len());
        for (head, body) in fired {
            self.support.insert(head.clone(), body.to_vec());
            layer.push(head.clone());
        }
        self.layers.push(layer);
    }
}

fn fires(known: &HashSet<&Atom>, &(head, body): &Candidate) -> bool {
    !known.contains(head) && body.iter().all(|atom| known.contains(atom))
}

impl InferenceEngine {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
    pub fn config(&self) -> Config {
        self.config
    }

    pub fn closure(&self, kb: &KnowledgeBase) -> Closure {
        self.closure_of(kb.facts(), kb.rules())
    }

    /// Layer-synchronous: a round only sees atoms known when it started, and
    /// everything it fires is committed together before the next round.
    pub fn closure_of(&self, facts: &VecSet<Atom>, rules: &RuleSet) -> Closure {
        let candidates: Vec<Candidate> = rules.iter().collect();
        let parallel = matches!(self.config.parallel_threshold, Some(t) if candidates.len() >= t);
        let mut known: HashSet<&Atom> = facts.iter().collect();
        let mut closure = Closure::default();
        loop {
            let fired: Vec<Candidate> = if parallel {
                candidates.par_iter().copied().filter(|c| fires(&known, c)).collect()
            } else {
                candidates.iter().copied().filter(|c| fires(&known, c)).collect()
            };
            if fired.is_empty() {
                break;
            }
            debug!(round = closure.rounds() + 1, fired = fired.len(), "round");
            known.extend(fired.iter().map(|&(head, _)| head));
            closure.commit(fired);
        }
        info!(derived = closure.len(), rounds = closure.rounds(), parallel, "fixpoint reached");
        closure
    }
}
