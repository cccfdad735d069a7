use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};

use karyotype_check::config::Config;
use karyotype_check::validation::{RuleEngine, ValidationVerdict};

/// Every input validated
const EXIT_VALID: u8 = 0;
/// At least one input failed
const EXIT_INVALID: u8 = 1;
/// Bad configuration or nothing to check
const EXIT_USAGE: u8 = 2;

fn main() -> ExitCode {
    let config = match Config::from_args_and_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::from(EXIT_USAGE);
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    match run(&config) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(EXIT_USAGE)
        }
    }
}

fn run(config: &Config) -> Result<u8> {
    let engine = RuleEngine::new(config.catalog()?);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if config.list_rules {
        for rule in engine.catalog().rules() {
            writeln!(out, "{}\t{}", rule.id, rule.description)?;
        }
        return Ok(EXIT_VALID);
    }

    let inputs = if config.karyotypes.is_empty() {
        read_stdin()?
    } else {
        config.karyotypes.clone()
    };
    if inputs.is_empty() {
        anyhow::bail!("no karyotypes given on the command line or stdin");
    }

    let mut all_valid = true;
    for input in &inputs {
        let verdict = engine.validate_str(input);
        log::info!(
            "{}: {}",
            input,
            if verdict.valid { "valid" } else { "invalid" }
        );
        all_valid &= verdict.valid;
        writeln!(out, "{}", render(&verdict, config.pretty)?)?;
    }

    Ok(if all_valid { EXIT_VALID } else { EXIT_INVALID })
}

/// One karyotype per non-empty line
fn read_stdin() -> Result<Vec<String>> {
    let mut inputs = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read stdin")?;
        let line = line.trim();
        if !line.is_empty() {
            inputs.push(line.to_string());
        }
    }
    Ok(inputs)
}

fn render(verdict: &ValidationVerdict, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(verdict)
    } else {
        serde_json::to_string(verdict)
    };
    json.context("Failed to serialize verdict")
}
