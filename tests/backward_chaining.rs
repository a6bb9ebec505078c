//! Backward Chaining Tests
//!
//! Consultation behaviour end to end:
//! - A variable nothing can derive produces a question
//! - Answers resume the remembered goal
//! - Corroborating rules combine their confidence
//! - Derived facts are memoized across proofs
//! - Cycles resolve to unknown instead of recursing forever

use std::sync::Arc;

use expert_shell::inference::{BackwardChainer, ProofState, QueryOutcome};
use expert_shell::knowledge::{Condition, KnowledgeBase, Rule, Variable};
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn engine(kb: KnowledgeBase) -> BackwardChainer {
    BackwardChainer::new(Arc::new(kb))
}

fn expect_result(outcome: QueryOutcome) -> (Option<Value>, f64, Vec<String>) {
    match outcome {
        QueryOutcome::Result {
            value,
            confidence,
            fired_rules,
            ..
        } => (value, confidence, fired_rules),
        other => panic!("expected a result, got {:?}", other),
    }
}

fn flu_rule(name: &str, cf: f64) -> Rule {
    Rule::new(
        name,
        vec![Condition::equals("Febre", "sim")],
        vec![Condition::equals("Diagnostico", "Gripe").with_cf(cf)],
    )
}

// =============================================================================
// Question / Answer Tests
// =============================================================================

/// Declared variable with no rules is asked, then echoed back.
#[test]
fn test_undeclared_goal_is_asked_then_answered() {
    let kb = KnowledgeBase::new()
        .with_variable(Variable::categorical("Febre", &["sim", "nao"]))
        .unwrap();
    let mut engine = engine(kb);

    let outcome = engine.prove_goal("Febre");
    let question = outcome.question().expect("question");
    assert_eq!(question.variable, "Febre");
    assert_eq!(engine.state(), ProofState::AwaitingAnswer);

    let (value, confidence, trail) =
        expect_result(engine.supply_answer("Febre", json!("sim")).unwrap());
    assert_eq!(value, Some(json!("sim")));
    assert_eq!(confidence, 1.0);
    assert!(trail.is_empty());
    assert_eq!(engine.state(), ProofState::Resolved);
}

/// Asking for an antecedent, then firing the rule with its cf.
#[test]
fn test_rule_fires_after_antecedent_is_answered() {
    let kb = KnowledgeBase::new().with_rule(flu_rule("R1", 0.8)).unwrap();
    let mut engine = engine(kb);

    let outcome = engine.prove_goal("Diagnostico");
    let question = outcome.question().expect("question");
    assert_eq!(question.variable, "Febre");
    assert_eq!(question.context_rule.as_deref(), Some("R1"));

    let (value, confidence, trail) =
        expect_result(engine.supply_answer("Febre", json!("sim")).unwrap());
    assert_eq!(value, Some(json!("Gripe")));
    assert!((confidence - 0.8).abs() < 1e-9);
    assert_eq!(trail, vec!["R1".to_string()]);
}

/// A negative answer leaves the goal underivable, so it is asked for.
#[test]
fn test_failed_rule_asks_for_goal() {
    let kb = KnowledgeBase::new().with_rule(flu_rule("R1", 0.8)).unwrap();
    let mut engine = engine(kb);

    engine.prove_goal("Diagnostico");
    let outcome = engine.supply_answer("Febre", json!("nao")).unwrap();
    assert_eq!(outcome.question().map(|q| q.variable.as_str()), Some("Diagnostico"));
    assert!(engine.fired_rules().is_empty());
}

// =============================================================================
// Confidence Tests
// =============================================================================

/// Two rules concluding the same value combine 0.6 and 0.5 into 0.8.
#[test]
fn test_corroborating_rules_combine() {
    let kb = KnowledgeBase::new()
        .with_rule(flu_rule("R1", 0.6))
        .unwrap()
        .with_rule(flu_rule("R2", 0.5))
        .unwrap()
        .with_fact("Febre", "sim");
    let mut engine = engine(kb);

    let (value, confidence, trail) = expect_result(engine.prove_goal("Diagnostico"));
    assert_eq!(value, Some(json!("Gripe")));
    assert!((confidence - 0.8).abs() < 1e-9);
    assert_eq!(trail, vec!["R1".to_string(), "R2".to_string()]);
}

/// Premise confidence is the weakest antecedent.
#[test]
fn test_premise_uses_weakest_antecedent() {
    let kb = KnowledgeBase::new()
        .with_rule(Rule::new(
            "R1",
            vec![Condition::equals("A", "1")],
            vec![Condition::equals("B", "1").with_cf(0.5)],
        ))
        .unwrap()
        .with_rule(Rule::new(
            "R2",
            vec![Condition::equals("B", "1"), Condition::equals("C", "1")],
            vec![Condition::equals("Goal", "yes").with_cf(0.8)],
        ))
        .unwrap()
        .with_fact("A", "1")
        .with_fact("C", "1");
    let mut engine = engine(kb);

    let (value, confidence, trail) = expect_result(engine.prove_goal("Goal"));
    assert_eq!(value, Some(json!("yes")));
    assert!((confidence - 0.4).abs() < 1e-9);
    assert_eq!(trail, vec!["R1".to_string(), "R2".to_string()]);
}

// =============================================================================
// Memoization and Cycle Tests
// =============================================================================

/// Proving the same goal twice does not fire rules again.
#[test]
fn test_derived_facts_are_memoized() {
    let kb = KnowledgeBase::new()
        .with_rule(flu_rule("R1", 0.8))
        .unwrap()
        .with_fact("Febre", "sim");
    let mut engine = engine(kb);

    expect_result(engine.prove_goal("Diagnostico"));
    let trail_len = engine.fired_rules().len();
    expect_result(engine.prove_goal("Diagnostico"));
    assert_eq!(engine.fired_rules().len(), trail_len);
}

/// X and Y depend on each other; Z breaks the tie through R3.
#[test]
fn test_mutual_dependency_terminates() {
    let kb = KnowledgeBase::new()
        .with_rule(Rule::new(
            "R1",
            vec![Condition::equals("Y", 1)],
            vec![Condition::equals("X", 1)],
        ))
        .unwrap()
        .with_rule(Rule::new(
            "R2",
            vec![Condition::equals("X", 1)],
            vec![Condition::equals("Y", 1)],
        ))
        .unwrap()
        .with_rule(Rule::new(
            "R3",
            vec![Condition::equals("Z", 1)],
            vec![Condition::equals("Y", 1)],
        ))
        .unwrap()
        .with_fact("Z", 1);
    let mut engine = engine(kb);

    let (value, confidence, trail) = expect_result(engine.prove_goal("X"));
    assert_eq!(value, Some(json!(1)));
    assert_eq!(confidence, 1.0);
    assert_eq!(trail, vec!["R3".to_string(), "R1".to_string()]);
}

/// Answers accumulate across several questions in one consultation.
#[test]
fn test_answers_accumulate_until_resolved() {
    let kb = KnowledgeBase::new()
        .with_rule(Rule::new(
            "R1",
            vec![
                Condition::equals("Febre", "sim"),
                Condition::new("Idade", ">", 60),
            ],
            vec![Condition::equals("Risco", "alto").with_cf(0.9)],
        ))
        .unwrap();
    let mut engine = engine(kb);

    let first = engine.prove_goal("Risco");
    assert_eq!(first.question().map(|q| q.variable.as_str()), Some("Febre"));

    let second = engine.supply_answer("Febre", json!("sim")).unwrap();
    assert_eq!(second.question().map(|q| q.variable.as_str()), Some("Idade"));

    let (value, confidence, _) =
        expect_result(engine.supply_answer("Idade", json!("72")).unwrap());
    assert_eq!(value, Some(json!("alto")));
    assert!((confidence - 0.9).abs() < 1e-9);
    assert_eq!(engine.facts().len(), 3);
}
