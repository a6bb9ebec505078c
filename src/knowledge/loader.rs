//! Knowledge-base loader
//!
//! Reads a knowledge directory:
//! - `variables.json`: array of variable definitions
//! - `rules.json`: array of rules, in declaration order
//! - `facts.json`: object of initial facts (optional)
//!
//! A missing file is treated as empty. A file that exists but cannot be
//! parsed is an error.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::base::KnowledgeBase;
use super::errors::{KnowledgeError, KnowledgeResult};
use super::types::{Rule, Variable};

pub const VARIABLES_FILE: &str = "variables.json";
pub const RULES_FILE: &str = "rules.json";
pub const FACTS_FILE: &str = "facts.json";

/// Loads a knowledge base snapshot from disk.
pub struct KnowledgeLoader {
    dir: PathBuf,
}

impl KnowledgeLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Reads and validates all knowledge files.
    pub fn load(&self) -> KnowledgeResult<KnowledgeBase> {
        let variables: Vec<Variable> = self.read_or_default(VARIABLES_FILE)?;
        let rules: Vec<Rule> = self.read_or_default(RULES_FILE)?;
        let facts: BTreeMap<String, Value> = self.read_or_default(FACTS_FILE)?;

        for rule in &rules {
            for cond in rule.conditions.iter().chain(rule.conclusions.iter()) {
                if !cond.operator.is_known() {
                    warn!(
                        rule = %rule.name,
                        operator = %cond.operator,
                        "unknown operator; condition will never hold"
                    );
                }
            }
        }

        KnowledgeBase::from_parts(variables, rules, facts)
    }

    fn read_or_default<T: DeserializeOwned + Default>(&self, file: &str) -> KnowledgeResult<T> {
        let path = self.dir.join(file);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "knowledge file absent, starting empty");
                return Ok(T::default());
            }
            Err(source) => {
                return Err(KnowledgeError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        };

        serde_json::from_str(&content).map_err(|source| KnowledgeError::Json {
            path: path.display().to_string(),
            source,
        })
    }
}
