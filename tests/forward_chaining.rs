//! Forward Chaining Tests
//!
//! Saturation to a fixed point over a knowledge-base snapshot.

use std::sync::Arc;

use expert_shell::inference::ForwardChainer;
use expert_shell::knowledge::{Condition, KnowledgeBase, Rule};
use serde_json::json;

fn rule(name: &str, when: (&str, &str), then: (&str, &str)) -> Rule {
    Rule::new(
        name,
        vec![Condition::equals(when.0, when.1)],
        vec![Condition::equals(then.0, then.1)],
    )
}

/// A=1 derives B=2 and nothing else.
#[test]
fn test_single_rule_saturates() {
    let kb = KnowledgeBase::new()
        .with_rule(rule("R1", ("A", "1"), ("B", "2")))
        .unwrap();
    let mut engine = ForwardChainer::new(Arc::new(kb));
    engine.add_fact("A", json!("1"));

    let outcome = engine.run_to_fixed_point();
    assert_eq!(outcome.facts.get("A"), Some(&json!("1")));
    assert_eq!(outcome.facts.get("B"), Some(&json!("2")));
    assert_eq!(outcome.facts.len(), 2);
    assert_eq!(outcome.fired_rules, vec!["R1".to_string()]);
}

/// Rules declared before their inputs exist fire on a later pass.
#[test]
fn test_chain_declared_backwards() {
    let kb = KnowledgeBase::new()
        .with_rule(rule("R2", ("B", "2"), ("C", "3")))
        .unwrap()
        .with_rule(rule("R1", ("A", "1"), ("B", "2")))
        .unwrap()
        .with_fact("A", "1");
    let mut engine = ForwardChainer::new(Arc::new(kb));

    let outcome = engine.run_to_fixed_point();
    assert_eq!(outcome.facts.get("C"), Some(&json!("3")));
    assert_eq!(outcome.fired_rules, vec!["R1".to_string(), "R2".to_string()]);
}

/// Two rules that only reinforce each other stop once nothing changes.
#[test]
fn test_mutual_rules_reach_fixed_point() {
    let kb = KnowledgeBase::new()
        .with_rule(rule("R1", ("A", "1"), ("B", "1")))
        .unwrap()
        .with_rule(rule("R2", ("B", "1"), ("A", "1")))
        .unwrap()
        .with_fact("A", "1");
    let mut engine = ForwardChainer::new(Arc::new(kb));

    let outcome = engine.run_to_fixed_point();
    assert_eq!(outcome.fired_rules, vec!["R1".to_string()]);

    // A second run over a saturated set is a no-op
    let again = engine.run_to_fixed_point();
    assert_eq!(again.facts, outcome.facts);
    assert_eq!(again.fired_rules, outcome.fired_rules);
}

/// Ordering operators compare numerically, even for numeric strings.
#[test]
fn test_numeric_thresholds() {
    let kb = KnowledgeBase::new()
        .with_rule(Rule::new(
            "Febre alta",
            vec![Condition::new("Temperatura", ">=", 38.5)],
            vec![Condition::equals("Febre", "sim")],
        ))
        .unwrap();
    let mut engine = ForwardChainer::new(Arc::new(kb));
    engine.add_fact("Temperatura", json!("39.1"));

    let outcome = engine.run_to_fixed_point();
    assert_eq!(outcome.facts.get("Febre"), Some(&json!("sim")));
}

/// Missing antecedents never fire and never ask.
#[test]
fn test_missing_facts_do_not_fire() {
    let kb = KnowledgeBase::new()
        .with_rule(rule("R1", ("A", "1"), ("B", "2")))
        .unwrap();
    let mut engine = ForwardChainer::new(Arc::new(kb));

    let outcome = engine.run_to_fixed_point();
    assert!(outcome.facts.is_empty());
    assert!(outcome.fired_rules.is_empty());
}

/// Competing diagnoses for the same symptom still reach a fixed point.
#[test]
fn test_competing_conclusions_terminate() {
    let kb = KnowledgeBase::new()
        .with_rule(rule("R1", ("Febre", "sim"), ("Diagnostico", "Gripe")))
        .unwrap()
        .with_rule(rule("R2", ("Febre", "sim"), ("Diagnostico", "Dengue")))
        .unwrap()
        .with_fact("Febre", "sim");
    let kb = Arc::new(kb);

    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let mut engine = ForwardChainer::new(kb);
        let _ = tx.send(engine.run_to_fixed_point());
    });

    let outcome = rx
        .recv_timeout(std::time::Duration::from_secs(5))
        .expect("forward chaining did not settle");
    assert_eq!(outcome.facts.get("Diagnostico"), Some(&json!("Dengue")));
    assert_eq!(outcome.facts.len(), 2);
}
