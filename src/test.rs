use crate::{
    infer::{self, InferenceEngine},
    parse::{self, Command},
    util::VecSet,
    Atom, KbError, KnowledgeBase, LoadError, Rule, RuleSet,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::collections::HashSet;
use std::path::PathBuf;

fn a(s: &str) -> Atom {
    Atom::new(s).unwrap()
}

fn atoms(names: &[&str]) -> Vec<Atom> {
    names.iter().copied().map(a).collect()
}

fn rule(head: &str, body: &[&str]) -> Rule {
    Rule::new(a(head), atoms(body)).unwrap()
}

fn kb(facts: &[&str], rules: Vec<Rule>) -> KnowledgeBase {
    let mut kb = KnowledgeBase::new();
    kb.load_rules(rules.into_iter().collect());
    if !facts.is_empty() {
        kb.add_facts(facts).unwrap();
    }
    kb
}

fn derived(kb: &KnowledgeBase) -> Vec<Atom> {
    InferenceEngine::default().closure(kb).into_derived()
}

#[test]
fn conjunction_fires() {
    let kb = kb(&["p", "q"], vec![rule("r", &["p", "q"])]);
    assert_eq!(derived(&kb), atoms(&["r"]));
}

#[test]
fn missing_condition_never_fires() {
    let kb = kb(&["p"], vec![rule("r", &["p", "q"])]);
    assert_eq!(derived(&kb), vec![]);
}

#[test]
fn chain_takes_two_rounds() {
    let kb = kb(&["p"], vec![rule("q", &["p"]), rule("r", &["q"])]);
    let closure = InferenceEngine::default().closure(&kb);
    assert_eq!(closure.layers(), &[atoms(&["q"]), atoms(&["r"])]);
    assert_eq!(closure.rounds(), 2);
    assert_eq!(closure.explain(&a("r")), Some(&atoms(&["q"])[..]));
}

#[test]
fn round_only_sees_atoms_known_at_its_start() {
    // `r` is scanned before `q` fires, so it waits for the next round
    let kb = kb(&["p"], vec![rule("r", &["q"]), rule("q", &["p"])]);
    let closure = InferenceEngine::default().closure(&kb);
    assert_eq!(closure.layers(), &[atoms(&["q"]), atoms(&["r"])]);
}

#[test]
fn known_facts_are_not_rederived() {
    let kb = kb(&["p", "q"], vec![rule("q", &["p"]), rule("r", &["q", "q"])]);
    assert_eq!(derived(&kb), atoms(&["r"]));
}

#[test]
fn empty_rules_derive_nothing() {
    let mut kb = KnowledgeBase::new();
    kb.add_facts(["p"]).unwrap();
    let closure = InferenceEngine::default().closure(&kb);
    assert!(closure.is_empty());
    assert_eq!(closure.rounds(), 0);
}

#[test]
fn reload_clears_facts() {
    let mut kb = kb(&["p"], vec![rule("q", &["p"])]);
    assert_eq!(kb.facts().as_slice(), &atoms(&["p"])[..]);
    kb.load_rules(vec![rule("q", &["p"])].into_iter().collect());
    assert!(kb.facts().is_empty());
    assert_eq!(derived(&kb), vec![]);
}

#[test]
fn first_load_keeps_facts() {
    let mut kb = KnowledgeBase::new();
    kb.add_facts(["p"]).unwrap();
    assert!(!kb.is_loaded());
    kb.load_rules(vec![rule("q", &["p"])].into_iter().collect());
    assert!(kb.is_loaded());
    assert!(kb.knows(&a("p")));
}

#[test]
fn invalid_atom_rejects_whole_batch() {
    let mut kb = KnowledgeBase::new();
    kb.add_facts(["p"]).unwrap();
    assert_eq!(kb.add_facts(["q", "1bad"]), Err(KbError::InvalidAtom("1bad".into())));
    assert_eq!(kb.facts().as_slice(), &atoms(&["p"])[..]);
}

#[test]
fn empty_batch_is_an_error() {
    let mut kb = KnowledgeBase::new();
    assert_eq!(kb.add_facts(Vec::<String>::new()), Err(KbError::EmptyBatch));
}

#[test]
fn duplicates_collapse() {
    let mut kb = KnowledgeBase::new();
    assert_eq!(kb.add_facts(["p", "q", "p"]).unwrap(), atoms(&["p", "q"]));
    kb.add_facts(["q", "r"]).unwrap();
    assert_eq!(kb.facts().as_slice(), &atoms(&["p", "q", "r"])[..]);
    assert_eq!(kb.absorb(atoms(&["r", "s"])), 1);
}

#[test]
fn rule_needs_a_body() {
    assert_eq!(Rule::new(a("p"), vec![]), Err(KbError::EmptyBody { head: a("p") }));
}

#[test]
fn repeated_head_last_wins_in_first_position() {
    let rules: RuleSet =
        vec![rule("x", &["a"]), rule("y", &["b"]), rule("x", &["c"])].into_iter().collect();
    assert_eq!(rules.len(), 2);
    assert_eq!(rules.heads().collect::<Vec<_>>(), vec![&a("x"), &a("y")]);
    assert_eq!(rules.get(&a("x")), Some(&atoms(&["c"])[..]));
}

#[test]
fn atom_validation() {
    for ok in ["p", "_", "_x1", "Rain", "a_B_9"] {
        assert!(parse::is_atom(ok), "{ok}");
    }
    for bad in ["", "1bad", "a-b", "a b", "é", "x!", "a²"] {
        assert!(!parse::is_atom(bad), "{bad}");
        assert_eq!(bad.parse::<Atom>(), Err(KbError::InvalidAtom(bad.into())));
    }
}

#[test]
fn rule_lines() {
    let (_, r) = parse::ended(parse::rule)("  r <-- p &q&  s ").unwrap();
    assert_eq!(r, rule("r", &["p", "q", "s"]));
    let (_, r) = parse::ended(parse::rule)("r<--p").unwrap();
    assert_eq!(r, rule("r", &["p"]));
    for bad in ["r <--", "<-- p", "r p", "r <-- p &", "r <-- p & & q", "r <-- p <-- q", "1r <-- p"] {
        assert!(parse::ended(parse::rule)(bad).is_err(), "{bad}");
    }
}

#[test]
fn rule_file_skips_blank_lines() {
    let rules = parse::rule_file("\nq <-- p\n   \r\nr <-- q & p\r\n").unwrap();
    assert_eq!(rules, vec![rule("q", &["p"]), rule("r", &["q", "p"])]);
}

#[test]
fn rule_file_reports_first_bad_line() {
    match parse::rule_file("q <-- p\n\nr <-- q &\ns <-- 9") {
        Err(LoadError::InvalidRule { line, text }) => {
            assert_eq!(line, 3);
            assert_eq!(text, "r <-- q &");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn commands() {
    assert_eq!(parse::command("   "), Ok(None));
    assert_eq!(
        parse::command(" tell  p\tq "),
        Ok(Some(Command::Tell(vec!["p".into(), "q".into()])))
    );
    assert_eq!(parse::command("tell"), Ok(Some(Command::Tell(vec![]))));
    assert_eq!(
        parse::command("load rules.txt extra"),
        Ok(Some(Command::Load(PathBuf::from("rules.txt"))))
    );
    assert_eq!(parse::command("infer_all"), Ok(Some(Command::InferAll)));
    assert_eq!(parse::command("quit"), Ok(Some(Command::Exit)));
    assert_eq!(parse::command("exit now"), Ok(Some(Command::Exit)));
    assert_eq!(parse::command("load"), Err(crate::CommandError::MissingArgument("load")));
    assert_eq!(parse::command("ask p"), Err(crate::CommandError::UnknownCommand("ask".into())));
}

/////////////////////////////////////////////
// properties

const UNIVERSE: usize = 8;

fn name(i: usize) -> Atom {
    a(&format!("a{i}"))
}

fn rules_strategy() -> impl Strategy<Value = Vec<(usize, Vec<usize>)>> {
    prop::collection::vec(
        (0..UNIVERSE, prop::collection::vec(0..UNIVERSE, 1..4)),
        0..12,
    )
}

fn facts_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0..UNIVERSE, 0..4)
}

fn build(rules: &[(usize, Vec<usize>)]) -> RuleSet {
    rules
        .iter()
        .map(|(head, body)| Rule::new(name(*head), body.iter().copied().map(name).collect()).unwrap())
        .collect()
}

fn fact_set(facts: &[usize]) -> VecSet<Atom> {
    facts.iter().copied().map(name).collect()
}

/// Least model by firing one rule at a time until nothing changes.
fn least_model(facts: &VecSet<Atom>, rules: &RuleSet) -> HashSet<Atom> {
    let mut model: HashSet<Atom> = facts.iter().cloned().collect();
    let mut changed = true;
    while changed {
        changed = false;
        for (head, body) in rules.iter() {
            if body.iter().all(|atom| model.contains(atom)) && model.insert(head.clone()) {
                changed = true;
            }
        }
    }
    model
}

proptest! {
    #[test]
    fn closure_is_the_least_model(rules in rules_strategy(), facts in facts_strategy()) {
        let rules = build(&rules);
        let facts = fact_set(&facts);
        let closure = InferenceEngine::default().closure_of(&facts, &rules);

        let mut total: HashSet<Atom> = facts.iter().cloned().collect();
        for atom in closure.derived() {
            prop_assert!(!facts.contains(atom));
            prop_assert!(total.insert(atom.clone()), "{atom:?} derived twice");
        }
        prop_assert_eq!(total, least_model(&facts, &rules));
    }

    #[test]
    fn closure_is_idempotent(rules in rules_strategy(), facts in facts_strategy()) {
        let rules = build(&rules);
        let mut facts = fact_set(&facts);
        let engine = InferenceEngine::default();
        let before = facts.clone();
        facts.extend(engine.closure_of(&facts, &rules).into_derived());
        prop_assert!(before.iter().all(|atom| facts.contains(atom)));
        prop_assert!(engine.closure_of(&facts, &rules).is_empty());
    }

    #[test]
    fn result_set_ignores_rule_order(
        (rules, shuffled) in rules_strategy()
            .prop_map(|rules| build(&rules).iter()
                .map(|(head, body)| Rule::new(head.clone(), body.to_vec()).unwrap())
                .collect::<Vec<_>>())
            .prop_flat_map(|rules| (Just(rules.clone()), Just(rules).prop_shuffle())),
        facts in facts_strategy(),
    ) {
        let facts = fact_set(&facts);
        let engine = InferenceEngine::default();
        let left: HashSet<Atom> =
            engine.closure_of(&facts, &rules.into_iter().collect()).into_derived().into_iter().collect();
        let right: HashSet<Atom> =
            engine.closure_of(&facts, &shuffled.into_iter().collect()).into_derived().into_iter().collect();
        prop_assert_eq!(left, right);
    }

    #[test]
    fn parallel_scan_matches_sequential(rules in rules_strategy(), facts in facts_strategy()) {
        let rules = build(&rules);
        let facts = fact_set(&facts);
        let sequential = InferenceEngine::new(infer::Config { parallel_threshold: None });
        let parallel = InferenceEngine::new(infer::Config { parallel_threshold: Some(0) });
        prop_assert_eq!(
            sequential.closure_of(&facts, &rules),
            parallel.closure_of(&facts, &rules)
        );
    }
}
