//! Knowledge-base type definitions
//!
//! Variables, conditions and rules are plain templates. They never carry
//! runtime state; facts derived during a consultation live in the engine.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of value a variable holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableKind {
    /// One value out of `allowed_values`
    #[default]
    SingleValued,
    /// Several values out of `allowed_values`
    MultiValued,
    /// A number within optional bounds
    Numeric,
}

impl VariableKind {
    /// Returns the kind name used in JSON and messages
    pub fn as_str(&self) -> &'static str {
        match self {
            VariableKind::SingleValued => "single_valued",
            VariableKind::MultiValued => "multi_valued",
            VariableKind::Numeric => "numeric",
        }
    }

    /// Whether the kind is categorical (backed by an allowed value set)
    pub fn is_categorical(&self) -> bool {
        !matches!(self, VariableKind::Numeric)
    }
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A declared variable of the knowledge base
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    /// Unique name
    pub name: String,

    #[serde(default)]
    pub kind: VariableKind,

    /// Allowed values for categorical kinds
    #[serde(default)]
    pub allowed_values: Vec<String>,

    /// Lower bound for numeric kind
    #[serde(default)]
    pub min_value: Option<f64>,

    /// Upper bound for numeric kind
    #[serde(default)]
    pub max_value: Option<f64>,

    /// Question shown when the value has to be asked
    #[serde(default)]
    pub question: String,

    /// Why the question is being asked
    #[serde(default)]
    pub explanation: String,
}

impl Variable {
    /// Creates a single-valued categorical variable
    pub fn categorical(name: impl Into<String>, allowed_values: &[&str]) -> Self {
        Self {
            name: name.into(),
            kind: VariableKind::SingleValued,
            allowed_values: allowed_values.iter().map(|v| v.to_string()).collect(),
            min_value: None,
            max_value: None,
            question: String::new(),
            explanation: String::new(),
        }
    }

    /// Creates a numeric variable with optional bounds
    pub fn numeric(name: impl Into<String>, min_value: Option<f64>, max_value: Option<f64>) -> Self {
        Self {
            name: name.into(),
            kind: VariableKind::Numeric,
            allowed_values: Vec::new(),
            min_value,
            max_value,
            question: String::new(),
            explanation: String::new(),
        }
    }

    /// Sets the question text
    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.question = question.into();
        self
    }

    /// Sets the explanation text
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    /// Checks the structural rules of a variable definition
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("variable name must not be empty".to_string());
        }
        if let (Some(min), Some(max)) = (self.min_value, self.max_value) {
            if min > max {
                return Err(format!(
                    "variable '{}' has min_value {} greater than max_value {}",
                    self.name, min, max
                ));
            }
        }
        Ok(())
    }
}

/// Comparison operator of a condition
///
/// Tokens that are not recognised are kept verbatim in `Other` and
/// evaluate to false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
    Other(String),
}

impl Operator {
    /// Returns the operator token
    pub fn as_str(&self) -> &str {
        match self {
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Ge => ">=",
            Operator::Le => "<=",
            Operator::Other(token) => token,
        }
    }

    /// Whether the token was recognised
    pub fn is_known(&self) -> bool {
        !matches!(self, Operator::Other(_))
    }
}

impl From<&str> for Operator {
    fn from(token: &str) -> Self {
        match token.trim() {
            "==" => Operator::Eq,
            "!=" => Operator::Ne,
            ">" => Operator::Gt,
            "<" => Operator::Lt,
            ">=" => Operator::Ge,
            "<=" => Operator::Le,
            _ => Operator::Other(token.to_string()),
        }
    }
}

impl From<String> for Operator {
    fn from(token: String) -> Self {
        Operator::from(token.as_str())
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.as_str().to_string()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn default_cf() -> f64 {
    1.0
}

/// A `(variable, operator, value)` triple
///
/// `cf` is only used when the condition is a rule conclusion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub variable: String,
    pub operator: Operator,
    pub value: Value,
    #[serde(default = "default_cf")]
    pub cf: f64,
}

impl Condition {
    /// Creates a condition with confidence 1.0
    pub fn new(variable: impl Into<String>, operator: impl Into<Operator>, value: impl Into<Value>) -> Self {
        Self {
            variable: variable.into(),
            operator: operator.into(),
            value: value.into(),
            cf: default_cf(),
        }
    }

    /// Equality condition, the usual shape of a conclusion
    pub fn equals(variable: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(variable, Operator::Eq, value)
    }

    /// Sets the confidence factor attached to a conclusion
    pub fn with_cf(mut self, cf: f64) -> Self {
        self.cf = cf;
        self
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.variable, self.operator, self.value)
    }
}

/// A production rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Unique name within a knowledge base
    pub name: String,
    /// Antecedents ("if")
    #[serde(default)]
    pub conditions: Vec<Condition>,
    /// Consequents ("then")
    #[serde(default)]
    pub conclusions: Vec<Condition>,
}

impl Rule {
    pub fn new(name: impl Into<String>, conditions: Vec<Condition>, conclusions: Vec<Condition>) -> Self {
        Self {
            name: name.into(),
            conditions,
            conclusions,
        }
    }

    /// Whether one of the conclusions sets `variable`
    pub fn concludes(&self, variable: &str) -> bool {
        self.conclusions.iter().any(|c| c.variable == variable)
    }

    /// Whether one of the antecedents reads `variable`
    pub fn depends_on(&self, variable: &str) -> bool {
        self.conditions.iter().any(|c| c.variable == variable)
    }

    /// Checks the structural rules of a rule definition
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("rule name must not be empty".to_string());
        }
        if self.conclusions.is_empty() {
            return Err(format!("rule '{}' has no conclusions", self.name));
        }
        for cond in self.conditions.iter().chain(self.conclusions.iter()) {
            if cond.variable.trim().is_empty() {
                return Err(format!(
                    "rule '{}' has a condition without a variable",
                    self.name
                ));
            }
            if !cond.cf.is_finite() {
                return Err(format!(
                    "rule '{}' has a non-finite confidence factor on '{}'",
                    self.name, cond.variable
                ));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |conds: &[Condition]| {
            conds
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" AND ")
        };
        write!(
            f,
            "RULE {}: IF ({}) THEN ({})",
            self.name,
            join(&self.conditions),
            join(&self.conclusions)
        )
    }
}
