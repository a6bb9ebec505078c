//! Knowledge-base snapshot
//!
//! A `KnowledgeBase` is an immutable value. Engines hold it behind an
//! `Arc` for the whole consultation; edits produce a new snapshot and
//! never touch the one an engine is reading.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use super::errors::{KnowledgeError, KnowledgeResult};
use super::types::{Rule, Variable};

/// Variables, rules in declaration order, and initial facts
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KnowledgeBase {
    variables: BTreeMap<String, Variable>,
    rules: Vec<Rule>,
    facts: BTreeMap<String, Value>,
}

impl KnowledgeBase {
    /// Creates an empty knowledge base
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles a knowledge base, validating names and structure.
    pub fn from_parts(
        variables: Vec<Variable>,
        rules: Vec<Rule>,
        facts: BTreeMap<String, Value>,
    ) -> KnowledgeResult<Self> {
        let mut kb = Self {
            variables: BTreeMap::new(),
            rules: Vec::with_capacity(rules.len()),
            facts,
        };
        for variable in variables {
            kb.insert_variable(variable)?;
        }
        for rule in rules {
            kb.push_rule(rule)?;
        }
        Ok(kb)
    }

    /// Rules in declaration order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Declared variables by name
    pub fn variables(&self) -> &BTreeMap<String, Variable> {
        &self.variables
    }

    /// Initial facts
    pub fn facts(&self) -> &BTreeMap<String, Value> {
        &self.facts
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name == name)
    }

    /// Rules whose conclusions set `variable`, in declaration order
    pub fn rules_concluding<'a>(&'a self, variable: &'a str) -> impl Iterator<Item = &'a Rule> + 'a {
        self.rules.iter().filter(move |r| r.concludes(variable))
    }

    /// First rule, in declaration order, whose antecedents read `variable`
    pub fn first_rule_depending_on(&self, variable: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.depends_on(variable))
    }

    /// Returns a copy with `rule` appended.
    pub fn with_rule(&self, rule: Rule) -> KnowledgeResult<Self> {
        let mut next = self.clone();
        next.push_rule(rule)?;
        Ok(next)
    }

    /// Returns a copy without the rule called `name`.
    pub fn without_rule(&self, name: &str) -> KnowledgeResult<Self> {
        let mut next = self.clone();
        let index = next
            .rules
            .iter()
            .position(|r| r.name == name)
            .ok_or_else(|| KnowledgeError::RuleNotFound(name.to_string()))?;
        next.rules.remove(index);
        Ok(next)
    }

    /// Returns a copy where the rule called `name` is replaced by `rule`.
    ///
    /// The replacement keeps the original position, so declaration order
    /// is preserved. `rule` may carry a new name as long as it is unused.
    pub fn replacing_rule(&self, name: &str, rule: Rule) -> KnowledgeResult<Self> {
        rule.validate_structure().map_err(KnowledgeError::Malformed)?;
        let mut next = self.clone();
        let index = next
            .rules
            .iter()
            .position(|r| r.name == name)
            .ok_or_else(|| KnowledgeError::RuleNotFound(name.to_string()))?;
        if rule.name != name && next.rule(&rule.name).is_some() {
            return Err(KnowledgeError::DuplicateRule(rule.name));
        }
        next.rules[index] = rule;
        Ok(next)
    }

    /// Returns a copy with `variable` declared.
    pub fn with_variable(&self, variable: Variable) -> KnowledgeResult<Self> {
        let mut next = self.clone();
        next.insert_variable(variable)?;
        Ok(next)
    }

    /// Returns a copy without the variable called `name`.
    ///
    /// Rules may keep referring to the name; the engines only need the
    /// declaration for question text.
    pub fn without_variable(&self, name: &str) -> KnowledgeResult<Self> {
        let mut next = self.clone();
        next.variables
            .remove(name)
            .ok_or_else(|| KnowledgeError::VariableNotFound(name.to_string()))?;
        Ok(next)
    }

    /// Returns a copy with an initial fact set.
    pub fn with_fact(&self, variable: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut next = self.clone();
        next.facts.insert(variable.into(), value.into());
        next
    }

    fn push_rule(&mut self, rule: Rule) -> KnowledgeResult<()> {
        rule.validate_structure().map_err(KnowledgeError::Malformed)?;
        if self.rule(&rule.name).is_some() {
            return Err(KnowledgeError::DuplicateRule(rule.name));
        }
        self.rules.push(rule);
        Ok(())
    }

    fn insert_variable(&mut self, variable: Variable) -> KnowledgeResult<()> {
        variable
            .validate_structure()
            .map_err(KnowledgeError::Malformed)?;
        if self.variables.contains_key(&variable.name) {
            return Err(KnowledgeError::DuplicateVariable(variable.name));
        }
        self.variables.insert(variable.name.clone(), variable);
        Ok(())
    }
}
