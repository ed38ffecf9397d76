//! Command handlers - Glue between parsed arguments, config and the engine

use anyhow::{Context, Result};
use colored::Colorize;
use rayon::prelude::*;
use tracing::info;

use super::{CheckArgs, ConfigArgs, CrackArgs, HashArgs, OutputFormat};
use crate::config::{generate_sample_config, Config};
use crate::engine::{
    AlgorithmChoice, CharsetPreset, RunResult, SearchOrchestrator, SearchProgress, SearchRequest,
};
use crate::spinner::{
    format_count, format_duration, print_error, print_header, print_info, print_kv,
    print_success, print_warning, KeySpinner,
};
use crate::strength::{StrengthEvaluator, StrengthReport};

/// Build the search request from flags, falling back to config values
pub fn build_request(args: &CrackArgs, config: &Config) -> Result<SearchRequest> {
    let algorithm: AlgorithmChoice = args.algorithm.into();

    let (target, plaintext) = if args.hashed {
        let digest_alg = algorithm
            .digest_algorithm()
            .context("--hashed needs a digest algorithm (sha256, sha1, md5 or blake3)")?;
        (digest_alg.hex_digest(args.target.as_bytes()), Some(args.target.as_str()))
    } else if algorithm == AlgorithmChoice::Plain {
        (args.target.clone(), Some(args.target.as_str()))
    } else {
        (args.target.clone(), None)
    };

    let charset: Vec<char> = match &args.custom_charset {
        Some(custom) => custom.chars().collect(),
        None => {
            let preset: CharsetPreset = args
                .charset
                .map(Into::into)
                .unwrap_or(config.search.charset);
            preset.chars(plaintext)
        }
    };

    Ok(SearchRequest {
        target,
        algorithm,
        min_length: args.min_length.unwrap_or(config.search.min_length),
        max_length: args.max_length.unwrap_or(config.search.max_length),
        charset,
        worker_budget: args.workers.unwrap_or_else(|| config.search.workers()),
        max_attempts: args.max_attempts.or_else(|| config.search.max_attempts()),
    })
}

/// `keydrill crack`
pub fn run_crack(args: &CrackArgs, config: &Config, output: OutputFormat) -> Result<()> {
    let request = build_request(args, config)?;

    let mut orchestrator = SearchOrchestrator::new(&request)
        .context("Invalid search configuration")?
        .with_policy(config.dispatch.clone());
    if let Some(limit) = args.time_limit.or_else(|| config.search.time_limit()) {
        orchestrator = orchestrator.with_time_limit(limit);
    }

    if output == OutputFormat::Json {
        let result = orchestrator.run()?;
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_header("Keydrill Brute Force");
    print_kv("Algorithm", request.algorithm.name());
    print_kv("Charset size", &request.charset.len().to_string());
    print_kv(
        "Length range",
        &format!("{} to {}", request.min_length, request.max_length),
    );
    print_kv("Workers", &request.worker_budget.to_string());
    println!();

    let spinner = KeySpinner::new("Preparing search");
    let result = orchestrator.run_with_progress(|progress| match progress {
        SearchProgress::LengthStarted {
            length,
            space_size,
            workers,
            mode,
            ..
        } => spinner.set_message(&format!(
            "Trying length {} ({} combinations, {:?}, {} worker{})",
            length,
            format_count(space_size),
            mode,
            workers,
            if workers == 1 { "" } else { "s" }
        )),
        SearchProgress::LengthFinished { length, attempts } => {
            info!(length, attempts, "Length exhausted");
        }
        SearchProgress::Found { .. } => spinner.set_message("Match found"),
    });
    spinner.finish();

    print_run_result(&result?);
    Ok(())
}

fn print_run_result(result: &RunResult) {
    match &result.password {
        Some(password) if result.success => {
            print_warning(&format!("Password cracked: {}", password.bold()));
        }
        _ => print_success(&format!("Password not cracked ({:?})", result.outcome)),
    }
    print_kv("Time taken", &format_duration(result.elapsed));
    print_kv("Attempts", &format_count(result.total_attempts as u128));
    print_kv(
        "Candidates tried",
        &format_count(result.attempts_enumerated as u128),
    );
    print_kv("Algorithm", result.algorithm.name());
}

/// `keydrill check`
pub fn run_check(args: &CheckArgs, config: &Config, output: OutputFormat) -> Result<()> {
    let evaluator = StrengthEvaluator::new(config.strength.clone());

    let reports: Vec<(String, Result<StrengthReport, String>)> = args
        .passwords
        .par_iter()
        .map(|pw| (pw.clone(), evaluator.evaluate(pw).map_err(|e| e.to_string())))
        .collect();

    if output == OutputFormat::Json {
        let json: Vec<serde_json::Value> = reports
            .iter()
            .map(|(pw, report)| match report {
                Ok(r) => serde_json::json!({ "password": pw, "report": r }),
                Err(e) => serde_json::json!({ "password": pw, "error": e }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    for (password, report) in &reports {
        print_header(&format!("Strength: {}", password));
        match report {
            Ok(r) => print_strength_report(r),
            Err(e) => print_error(e),
        }
    }
    Ok(())
}

fn print_strength_report(r: &StrengthReport) {
    let score = format!("{}/4 ({})", r.score, r.strength_text);
    let score = match r.score {
        0 | 1 => score.red(),
        2 => score.yellow(),
        _ => score.green(),
    };
    println!("  {}: {}", "Score".bright_black(), score);
    print_kv("Length", &r.length.to_string());
    print_kv("Uppercase", &r.has_upper.to_string());
    print_kv("Lowercase", &r.has_lower.to_string());
    print_kv("Digits", &r.has_digit.to_string());
    print_kv("Symbols", &r.has_symbol.to_string());
    print_kv("Estimated crack time", &r.crack_time_display);
    for suggestion in &r.suggestions {
        print_info(suggestion);
    }
}

/// `keydrill hash`
pub fn run_hash(args: &HashArgs) -> Result<()> {
    let algorithm = AlgorithmChoice::from(args.algorithm)
        .digest_algorithm()
        .context("plain is not a digest algorithm")?;
    println!("{}", algorithm.hex_digest(args.password.as_bytes()));
    Ok(())
}

/// `keydrill config`
pub fn run_config(args: &ConfigArgs, config: &Config) -> Result<()> {
    if let Some(path) = &args.export {
        config.save_to(path)?;
        print_success(&format!("Config written to {}", path.display()));
    } else if args.init {
        let path = Config::ensure_exists()?;
        print_success(&format!("Config at {}", path.display()));
    } else {
        print!("{}", generate_sample_config());
    }
    Ok(())
}
