//! screen-runner: headless watch-list screening for names.
//!
//! Usage:
//!   screen-runner --name "Ali Hassan" --watchlist list.json
//!   screen-runner --name "Ali Hassan" --watchlist list.csv
//!   screen-runner --name "Ali Hassan" --db aml.db --table aml_watchlist --audit-db audit.db
//!   screen-runner --watchlist list.json --stdin-mode
//!   screen-runner --generate 1000 --seed 42 --out list.json

use amlscreen_core::{
    audit::{AuditSink, LogSink},
    name_generator::WatchlistGenerator,
    store::{ScreenStore, DEFAULT_WATCHLIST_TABLE},
    watchlist::{load_watchlist_csv, load_watchlist_json},
    ScreeningConfig, ScreeningReport, Screener, WatchlistEntry,
};
use anyhow::{bail, Result};
use std::env;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

/// Columns shown for a match when the record carries them.
const DISPLAY_COLUMNS: [&str; 4] = ["Risk Category", "Source", "Risk Type", "Notes"];

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    Screen { name: String },
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let stdin_mode = args.iter().any(|a| a == "--stdin-mode");

    if let Some(count) = parse_opt::<usize>(&args, "--generate") {
        let seed = parse_arg(&args, "--seed", 42u64);
        let out = arg_value(&args, "--out").unwrap_or("watchlist.json");
        return generate(count, seed, out);
    }

    let config = match arg_value(&args, "--data-dir") {
        Some(dir) => ScreeningConfig::load(dir)?,
        None => ScreeningConfig::default(),
    };

    let entries = load_entries(&args)?;

    let sink: Arc<dyn AuditSink> = match arg_value(&args, "--audit-db") {
        Some(path) => {
            let store = ScreenStore::open(path)?;
            store.migrate()?;
            Arc::new(store)
        }
        None => Arc::new(LogSink),
    };
    let screener = Screener::new(&config, sink);

    if stdin_mode {
        return run_stdin_loop(&screener, &entries);
    }

    let Some(name) = arg_value(&args, "--name") else {
        bail!("--name is required unless --stdin-mode or --generate is given");
    };
    println!("Name to check: '{name}'");
    let report = screener.screen(name, &entries);
    print_report(&report);
    Ok(())
}

fn load_entries(args: &[String]) -> Result<Vec<WatchlistEntry>> {
    if let Some(path) = arg_value(args, "--watchlist") {
        if path.ends_with(".csv") {
            return Ok(load_watchlist_csv(path)?);
        }
        return Ok(load_watchlist_json(path)?);
    }
    if let Some(db) = arg_value(args, "--db") {
        let table = arg_value(args, "--table").unwrap_or(DEFAULT_WATCHLIST_TABLE);
        let store = ScreenStore::open(db)?;
        return Ok(store.load_watchlist(table)?);
    }
    bail!("no watch-list given: use --watchlist <file.json|file.csv> or --db <path>")
}

fn run_stdin_loop(screener: &Screener, entries: &[WatchlistEntry]) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::Screen { name } => {
                let report = screener.screen(&name, entries);
                writeln!(stdout, "{}", serde_json::to_string(&report)?)?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn print_report(report: &ScreeningReport) {
    println!("  screening_id: {}", report.screening_id);
    println!("  normalized:   '{}'", report.candidate_norm);
    println!("  scanned:      {}", report.scanned);
    println!("  skipped:      {}", report.skipped);
    println!();

    if !report.is_hit() {
        println!("No match found.");
        return;
    }

    println!("=== WATCH-LIST MATCHES ({}) ===", report.matches.len());
    for m in &report.matches {
        println!(
            "  {} | jaro={:.3} lev={} soundex={} inversion={}",
            m.entry.full_name.as_deref().unwrap_or_default(),
            m.decision.jaro,
            m.decision.levenshtein,
            m.decision.soundex_match,
            m.decision.word_inversion
        );
        for column in DISPLAY_COLUMNS {
            if let Some(value) = m.entry.attribute(column) {
                let text = value.as_str().map(str::to_string).unwrap_or_else(|| value.to_string());
                println!("      {column}: {text}");
            }
        }
    }
}

fn generate(count: usize, seed: u64, out: &str) -> Result<()> {
    let entries = WatchlistGenerator::new(seed).generate(count);
    let json = serde_json::to_string_pretty(&entries)?;
    std::fs::write(out, json).map_err(|e| anyhow::anyhow!("Cannot write {out}: {e}"))?;
    println!("Generated {count} synthetic records (seed {seed}) into {out}");
    Ok(())
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_opt<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    arg_value(args, flag).and_then(|v| v.parse().ok())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    parse_opt(args, flag).unwrap_or(default)
}
