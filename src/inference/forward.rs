//! Forward chaining
//!
//! Data-driven saturation: every rule whose antecedents all hold writes its
//! conclusions, and passes repeat until one makes no change. A write that
//! leaves a fact at the value it already had is not progress, which is what
//! lets the loop reach a fixed point.
//!
//! Forward chaining never asks for input. A missing or `null` fact simply
//! makes a rule inapplicable.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use super::condition::evaluate;
use crate::knowledge::{KnowledgeBase, Rule};
use crate::observability::Event;

/// Final facts and the rules fired to reach them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForwardOutcome {
    pub facts: BTreeMap<String, Value>,
    /// Rule names in firing order, one entry per written conclusion
    pub fired_rules: Vec<String>,
}

/// Forward-chaining engine over a knowledge-base snapshot
pub struct ForwardChainer {
    kb: Arc<KnowledgeBase>,
    facts: BTreeMap<String, Value>,
    fired_rules: Vec<String>,
}

impl ForwardChainer {
    /// Creates an engine seeded with the knowledge base's initial facts.
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        let facts = kb.facts().clone();
        Self {
            kb,
            facts,
            fired_rules: Vec::new(),
        }
    }

    /// Inserts or overwrites a fact. No validation against the variable's
    /// declared kind is performed.
    pub fn add_fact(&mut self, variable: impl Into<String>, value: Value) {
        self.facts.insert(variable.into(), value);
    }

    pub fn facts(&self) -> &BTreeMap<String, Value> {
        &self.facts
    }

    pub fn fired_rules(&self) -> &[String] {
        &self.fired_rules
    }

    /// Applies rules in declaration order until a full pass leaves the fact
    /// map as it found it.
    pub fn run_to_fixed_point(&mut self) -> ForwardOutcome {
        let kb = Arc::clone(&self.kb);
        let fired_before = self.fired_rules.len();
        let mut passes = 0usize;

        loop {
            passes += 1;
            let before = self.facts.clone();

            for rule in kb.rules() {
                if !self.antecedents_hold(rule) {
                    continue;
                }
                for conclusion in &rule.conclusions {
                    let current = self.facts.get(&conclusion.variable).unwrap_or(&Value::Null);
                    if current == &conclusion.value {
                        continue;
                    }
                    debug!(
                        event = %Event::RuleFired,
                        rule = %rule.name,
                        variable = %conclusion.variable,
                        value = %conclusion.value,
                        "forward rule fired"
                    );
                    self.facts
                        .insert(conclusion.variable.clone(), conclusion.value.clone());
                    self.fired_rules.push(rule.name.clone());
                }
            }

            // a pass that ends where it started is a fixed point
            if self.facts == before {
                break;
            }
        }

        info!(
            event = %Event::FixedPointReached,
            passes,
            fired = self.fired_rules.len() - fired_before,
            facts = self.facts.len(),
            "forward chaining saturated"
        );

        ForwardOutcome {
            facts: self.facts.clone(),
            fired_rules: self.fired_rules.clone(),
        }
    }

    fn antecedents_hold(&self, rule: &Rule) -> bool {
        rule.conditions.iter().all(|cond| match self.facts.get(&cond.variable) {
            Some(value) if !value.is_null() => evaluate(cond, value),
            _ => false,
        })
    }
}
