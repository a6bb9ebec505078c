//! Backward chaining
//!
//! Goal-directed resolution with certainty factors.
//!
//! # Resolution of a target variable
//!
//! 1. A fact already in working memory is returned as is
//! 2. A variable already on the resolution stack resolves to unknown
//! 3. Every rule concluding the target is tried in declaration order;
//!    premise confidence is the weakest antecedent, contribution is
//!    premise times the conclusion's own cf
//! 4. If no rule produced a fact, the proof suspends with a question
//!
//! A suspension unwinds the whole proof attempt. Nothing is kept on the
//! call stack: derived facts stay in working memory, so proving the same
//! goal again after an answer walks the rule graph without re-deriving
//! anything already known.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, trace};

use super::certainty::{combine, CERTAIN, UNKNOWN};
use super::condition::evaluate;
use super::errors::{InferenceError, InferenceResult};
use super::outcome::{ProofState, QueryOutcome, Question, SessionFact, Suspension};
use crate::knowledge::{KnowledgeBase, Rule};
use crate::observability::Event;

/// Variables currently being resolved on the active call stack.
///
/// Scoped to a single `prove_goal` invocation.
type ResolutionStack = HashSet<String>;

/// Backward-chaining engine for one consultation
pub struct BackwardChainer {
    kb: Arc<KnowledgeBase>,
    facts: BTreeMap<String, SessionFact>,
    fired_rules: Vec<String>,
    goal: Option<String>,
    state: ProofState,
}

impl BackwardChainer {
    /// Creates an engine whose working memory holds the knowledge base's
    /// initial facts at full confidence.
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        let facts = kb
            .facts()
            .iter()
            .map(|(name, value)| (name.clone(), SessionFact::certain(value.clone())))
            .collect();
        Self {
            kb,
            facts,
            fired_rules: Vec::new(),
            goal: None,
            state: ProofState::Idle,
        }
    }

    /// Remembers `goal` and tries to resolve it.
    pub fn prove_goal(&mut self, goal: &str) -> QueryOutcome {
        self.goal = Some(goal.to_string());
        self.state = ProofState::Proving;

        let mut stack = ResolutionStack::new();
        match self.resolve(goal, &mut stack) {
            Ok(fact) => {
                self.state = ProofState::Resolved;
                let (value, confidence) = match fact {
                    Some(fact) => (Some(fact.value), fact.cf),
                    None => (None, UNKNOWN),
                };
                info!(
                    event = %Event::GoalResolved,
                    goal,
                    confidence,
                    fired = self.fired_rules.len(),
                    "goal resolved"
                );
                QueryOutcome::Result {
                    goal: goal.to_string(),
                    value,
                    confidence,
                    fired_rules: self.fired_rules.clone(),
                }
            }
            Err(Suspension { question }) => {
                self.state = ProofState::AwaitingAnswer;
                info!(
                    event = %Event::QuestionRaised,
                    goal,
                    variable = %question.variable,
                    context_rule = question.context_rule.as_deref().unwrap_or(""),
                    "proof suspended"
                );
                QueryOutcome::Question(question)
            }
        }
    }

    /// Records a user answer as a certain fact and proves the remembered
    /// goal again.
    pub fn supply_answer(&mut self, variable: &str, value: Value) -> InferenceResult<QueryOutcome> {
        let goal = self
            .goal
            .clone()
            .ok_or_else(|| InferenceError::NoActiveProof {
                variable: variable.to_string(),
            })?;

        debug!(event = %Event::AnswerSupplied, variable, value = %value, "answer recorded");
        self.facts
            .insert(variable.to_string(), SessionFact::certain(value));
        Ok(self.prove_goal(&goal))
    }

    /// The goal of the current proof, if one was started
    pub fn goal(&self) -> Option<&str> {
        self.goal.as_deref()
    }

    pub fn state(&self) -> ProofState {
        self.state
    }

    /// Working memory
    pub fn facts(&self) -> &BTreeMap<String, SessionFact> {
        &self.facts
    }

    /// Fired rule names in firing order
    pub fn fired_rules(&self) -> &[String] {
        &self.fired_rules
    }

    /// Resolves `target`. `Ok(None)` means unknown because of a cycle.
    fn resolve(
        &mut self,
        target: &str,
        stack: &mut ResolutionStack,
    ) -> Result<Option<SessionFact>, Suspension> {
        if let Some(fact) = self.facts.get(target) {
            return Ok(Some(fact.clone()));
        }

        if stack.contains(target) {
            trace!(event = %Event::CycleDetected, variable = target, "revisited on resolution stack");
            return Ok(None);
        }
        stack.insert(target.to_string());

        let kb = Arc::clone(&self.kb);
        for rule in kb.rules_concluding(target) {
            let premise = self.premise_confidence(rule, stack)?;
            if premise > UNKNOWN {
                self.fire(rule, premise);
            }
        }

        stack.remove(target);
        if let Some(fact) = self.facts.get(target) {
            return Ok(Some(fact.clone()));
        }

        Err(self.suspend(target))
    }

    /// Weakest-link confidence of the rule's antecedents, or zero as soon
    /// as one of them does not hold.
    fn premise_confidence(
        &mut self,
        rule: &Rule,
        stack: &mut ResolutionStack,
    ) -> Result<f64, Suspension> {
        let mut premise = CERTAIN;
        for condition in &rule.conditions {
            match self.resolve(&condition.variable, stack)? {
                Some(fact) if evaluate(condition, &fact.value) => {
                    premise = premise.min(fact.cf);
                }
                _ => return Ok(UNKNOWN),
            }
        }
        Ok(premise)
    }

    fn fire(&mut self, rule: &Rule, premise: f64) {
        for conclusion in &rule.conclusions {
            let contribution = premise * conclusion.cf;
            let cf = match self.facts.get(&conclusion.variable) {
                Some(existing) if existing.value == conclusion.value => {
                    combine(existing.cf, contribution)
                }
                // absent, or a different value which is overwritten
                _ => contribution,
            };
            debug!(
                event = %Event::RuleFired,
                rule = %rule.name,
                variable = %conclusion.variable,
                value = %conclusion.value,
                cf,
                "backward rule fired"
            );
            self.facts.insert(
                conclusion.variable.clone(),
                SessionFact::new(conclusion.value.clone(), cf),
            );
            self.fired_rules.push(rule.name.clone());
        }
    }

    fn suspend(&self, variable: &str) -> Suspension {
        let declared = self.kb.variable(variable);
        let question = declared
            .map(|v| v.question.trim())
            .filter(|q| !q.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Provide a value for '{}'", variable));
        let explanation = declared.map(|v| v.explanation.clone()).unwrap_or_default();
        let context_rule = self
            .kb
            .first_rule_depending_on(variable)
            .map(|r| r.name.clone());

        Suspension {
            question: Question {
                variable: variable.to_string(),
                question,
                explanation,
                context_rule,
            },
        }
    }
}
