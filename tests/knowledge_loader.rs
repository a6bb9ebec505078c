//! Knowledge Loader Tests
//!
//! Loading variables.json, rules.json and facts.json from a directory.

use std::fs;
use std::sync::Arc;

use expert_shell::inference::{BackwardChainer, QueryOutcome};
use expert_shell::knowledge::{
    KnowledgeError, KnowledgeLoader, Operator, VariableKind, FACTS_FILE, RULES_FILE,
    VARIABLES_FILE,
};
use serde_json::json;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn write(dir: &TempDir, file: &str, value: serde_json::Value) {
    fs::write(dir.path().join(file), value.to_string()).unwrap();
}

fn setup_triage_dir() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write(
        &tmp,
        VARIABLES_FILE,
        json!([
            {
                "name": "Febre",
                "kind": "single_valued",
                "allowed_values": ["sim", "nao"],
                "question": "O paciente tem febre?"
            },
            {
                "name": "Temperatura",
                "kind": "numeric",
                "min_value": 30.0,
                "max_value": 45.0
            }
        ]),
    );
    write(
        &tmp,
        RULES_FILE,
        json!([
            {
                "name": "R1",
                "conditions": [
                    {"variable": "Temperatura", "operator": ">=", "value": 38}
                ],
                "conclusions": [
                    {"variable": "Febre", "operator": "==", "value": "sim", "cf": 0.9}
                ]
            }
        ]),
    );
    write(&tmp, FACTS_FILE, json!({"Temperatura": 39}));
    tmp
}

// =============================================================================
// Loading Tests
// =============================================================================

#[test]
fn test_load_full_directory() {
    let tmp = setup_triage_dir();
    let kb = KnowledgeLoader::new(tmp.path()).load().unwrap();

    assert_eq!(kb.variables().len(), 2);
    assert_eq!(kb.variable("Temperatura").unwrap().kind, VariableKind::Numeric);
    assert_eq!(kb.rules().len(), 1);
    assert_eq!(kb.rules()[0].conditions[0].operator, Operator::Ge);
    assert_eq!(kb.facts().get("Temperatura"), Some(&json!(39)));
}

#[test]
fn test_loaded_base_drives_consultation() {
    let tmp = setup_triage_dir();
    let kb = Arc::new(KnowledgeLoader::new(tmp.path()).load().unwrap());
    let mut engine = BackwardChainer::new(kb);

    match engine.prove_goal("Febre") {
        QueryOutcome::Result {
            value, confidence, ..
        } => {
            assert_eq!(value, Some(json!("sim")));
            assert!((confidence - 0.9).abs() < 1e-9);
        }
        other => panic!("expected a result, got {:?}", other),
    }
}

#[test]
fn test_empty_directory_is_empty_base() {
    let tmp = TempDir::new().unwrap();
    let kb = KnowledgeLoader::new(tmp.path()).load().unwrap();
    assert!(kb.rules().is_empty());
    assert!(kb.variables().is_empty());
    assert!(kb.facts().is_empty());
}

// =============================================================================
// Error Tests
// =============================================================================

#[test]
fn test_malformed_json_names_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(RULES_FILE), "[{").unwrap();

    let err = KnowledgeLoader::new(tmp.path()).load().unwrap_err();
    match err {
        KnowledgeError::Json { path, .. } => assert!(path.ends_with(RULES_FILE)),
        other => panic!("expected JSON error, got {:?}", other),
    }
}

#[test]
fn test_duplicate_rule_names_rejected() {
    let tmp = TempDir::new().unwrap();
    let rule = json!({
        "name": "R1",
        "conditions": [],
        "conclusions": [{"variable": "A", "operator": "==", "value": 1}]
    });
    write(&tmp, RULES_FILE, json!([rule.clone(), rule]));

    let err = KnowledgeLoader::new(tmp.path()).load().unwrap_err();
    assert!(matches!(err, KnowledgeError::DuplicateRule(ref name) if name == "R1"));
    assert_eq!(err.status_code(), 409);
}

#[test]
fn test_unknown_operator_loads_but_never_holds() {
    let tmp = TempDir::new().unwrap();
    write(
        &tmp,
        RULES_FILE,
        json!([{
            "name": "R1",
            "conditions": [{"variable": "A", "operator": "~=", "value": 1}],
            "conclusions": [{"variable": "B", "operator": "==", "value": 2}]
        }]),
    );
    write(&tmp, FACTS_FILE, json!({"A": 1}));

    let kb = Arc::new(KnowledgeLoader::new(tmp.path()).load().unwrap());
    assert_eq!(
        kb.rules()[0].conditions[0].operator,
        Operator::Other("~=".into())
    );

    let mut engine = BackwardChainer::new(kb);
    assert!(engine.prove_goal("B").is_question());
}
