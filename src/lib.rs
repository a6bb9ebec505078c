//! expert-shell - a rule-based expert-system shell
//!
//! Knowledge bases of variables, IF/THEN rules and initial facts are
//! consulted by backward chaining (one goal, asking the user for what it
//! cannot derive) or saturated by forward chaining. Conclusions carry
//! MYCIN-style certainty factors.

pub mod cli;
pub mod http_server;
pub mod inference;
pub mod knowledge;
pub mod observability;
pub mod session;
