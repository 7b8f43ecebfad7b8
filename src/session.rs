//! The interactive interpreter: one knowledge base, driven line by line.
//!
//! Every outcome of a command, user errors included, is reported on the
//! writer handed to [`Session::execute`]. Only failures to write propagate.

use crate::{
    config::RunConfig,
    error::{KbError, LoadError},
    infer::InferenceEngine,
    kb::KnowledgeBase,
    parse::{self, Command},
    pretty,
    util::timed,
    Atom, RuleSet,
};
use std::io::{Result as IoResult, Write};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug, Default)]
pub struct Session {
    kb: KnowledgeBase,
    engine: InferenceEngine,
}

impl Session {
    pub fn new(config: &RunConfig) -> Self {
        Self { kb: KnowledgeBase::new(), engine: InferenceEngine::new(config.engine) }
    }
    pub fn kb(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// Runs one input line. Non-blank lines other than `exit`/`quit` are
    /// followed by an empty line.
    pub fn execute(&mut self, line: &str, out: &mut impl Write) -> IoResult<Flow> {
        match parse::command(line) {
            Ok(None) => return Ok(Flow::Continue),
            Ok(Some(Command::Exit)) => return Ok(Flow::Exit),
            Ok(Some(Command::Tell(items))) => self.tell(&items, out)?,
            Ok(Some(Command::Load(path))) => self.load(&path, out)?,
            Ok(Some(Command::InferAll)) => self.infer_all(out)?,
            Err(err) => {
                warn!(%err, "rejected command");
                pretty::error(out, err)?
            }
        }
        writeln!(out)?;
        Ok(Flow::Continue)
    }

    pub fn tell(&mut self, items: &[String], out: &mut impl Write) -> IoResult<()> {
        match self.kb.add_facts(items) {
            Ok(added) => {
                for atom in &added {
                    pretty::atom_added(out, atom)?;
                }
                Ok(())
            }
            Err(KbError::EmptyBatch) => pretty::error(out, "tell needs at least one atom"),
            Err(err) => {
                warn!(%err, "tell rejected");
                pretty::error(out, err)
            }
        }
    }

    pub fn load(&mut self, path: &Path, out: &mut impl Write) -> IoResult<()> {
        let rules = match parse::load_rule_file(path) {
            Ok(rules) => rules,
            Err(err @ LoadError::Io(_)) => {
                warn!(path = %path.display(), %err, "rule file unreadable");
                return pretty::error(out, "could not open file");
            }
            Err(err @ LoadError::InvalidRule { .. }) => {
                warn!(path = %path.display(), %err, "rule file rejected");
                return pretty::error(
                    out,
                    format_args!("{} is not a valid knowledge base", path.display()),
                );
            }
        };
        let lines = rules.len();
        let rules: RuleSet = rules.into_iter().collect();
        pretty::rules_loaded(out, &rules, lines)?;
        self.kb.load_rules(rules);
        Ok(())
    }

    pub fn infer_all(&mut self, out: &mut impl Write) -> IoResult<()> {
        let (dur, closure) = timed(|| self.engine.closure(&self.kb));
        debug!(?dur, rounds = closure.rounds(), "closure computed");
        for atom in closure.derived() {
            if let Some(body) = closure.explain(atom) {
                debug!(%atom, because = ?body, "derived");
            }
        }
        let derived: Vec<Atom> = closure.into_derived();
        pretty::inference(out, &derived, self.kb.facts().as_slice())?;
        self.kb.absorb(derived);
        Ok(())
    }
}
