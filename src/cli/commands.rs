//! CLI command implementations
//!
//! Every command follows the same boot order: read config, install the
//! log subscriber, load the knowledge base, then do its work.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{parse_answer, parse_facts, read_answer, write_json, write_question};
use crate::http_server::HttpServer;
use crate::inference::{BackwardChainer, ForwardChainer, ForwardOutcome, QueryOutcome};
use crate::knowledge::{KnowledgeBase, KnowledgeLoader};
use crate::observability::{self, Event};

/// Run a CLI command
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(&config, port),
        Command::Ask { config, goal } => ask(&config, &goal),
        Command::Forward { config, facts } => forward(&config, &facts),
    }
}

/// Boot sequence shared by all commands
fn boot(config_path: &Path) -> CliResult<(Config, KnowledgeBase)> {
    let config = Config::load_or_default(config_path)?;
    observability::init(config.log_filter.as_deref());
    info!(
        event = %Event::ConfigLoaded,
        path = %config_path.display(),
        knowledge_dir = %config.knowledge_dir,
        "configuration loaded"
    );

    let kb = KnowledgeLoader::new(config.knowledge_path()).load()?;
    info!(
        event = %Event::KnowledgeLoaded,
        rules = kb.rules().len(),
        variables = kb.variables().len(),
        facts = kb.facts().len(),
        "knowledge base loaded"
    );

    Ok((config, kb))
}

/// Serve consultations over HTTP until the process is stopped
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let (mut config, kb) = boot(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    let server = HttpServer::with_config(config.http, kb);
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to start runtime: {}", e)))?;

    rt.block_on(server.start()).map_err(|e| {
        tracing::error!(event = %Event::BootFailed, error = %e, "server stopped");
        CliError::boot_failed(format!("HTTP server failed: {}", e))
    })
}

/// Interactive consultation on stdin/stdout
pub fn ask(config_path: &Path, goal: &str) -> CliResult<()> {
    let (_, kb) = boot(config_path)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let outcome = consult(Arc::new(kb), goal, &mut stdin.lock(), &mut stdout.lock())?;
    write_json(&outcome)
}

/// Drives a backward-chaining consultation until it produces a result,
/// reading one answer per question from `input`.
pub fn consult<R: BufRead, W: Write>(
    kb: Arc<KnowledgeBase>,
    goal: &str,
    input: &mut R,
    output: &mut W,
) -> CliResult<QueryOutcome> {
    let mut engine = BackwardChainer::new(Arc::clone(&kb));
    let mut outcome = engine.prove_goal(goal);

    while let QueryOutcome::Question(question) = &outcome {
        let variable = kb.variable(&question.variable);
        write_question(output, question, variable)?;
        let raw = read_answer(input, &question.variable)?;
        let value = parse_answer(&raw, variable);
        let name = question.variable.clone();
        outcome = engine.supply_answer(&name, value)?;
    }

    Ok(outcome)
}

/// One-shot forward chaining
pub fn forward(config_path: &Path, facts: &str) -> CliResult<()> {
    let facts = parse_facts(facts)?;
    let (_, kb) = boot(config_path)?;
    let outcome = saturate(Arc::new(kb), facts);
    write_json(&outcome)
}

/// Seeds a forward chainer with `facts` on top of the knowledge base's own
/// facts and runs it to a fixed point.
pub fn saturate(
    kb: Arc<KnowledgeBase>,
    facts: serde_json::Map<String, serde_json::Value>,
) -> ForwardOutcome {
    let mut engine = ForwardChainer::new(kb);
    for (variable, value) in facts {
        engine.add_fact(variable, value);
    }
    engine.run_to_fixed_point()
}
