//! # CLI Command Implementations
//!
//! Each `cmd_*` function builds what it needs, computes a serializable
//! report through a `run_*` function and prints it as text or JSON.

use super::QueryMode;
use crate::config::{AppConfig, ThrashConfig};
use crate::error::CliError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use seadawg_core::{GraphMetrics, GraphSnapshot, SeaDawg, SeaDawgConfig, Sink};
use serde::Serialize;
use std::collections::BTreeSet;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use std::time::Instant;

// =============================================================================
// FILE HANDLING
// =============================================================================

/// Maximum word list size (100 MB).
const MAX_WORDS_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), CliError> {
    let metadata = std::fs::metadata(path).map_err(|e| CliError::io(path, e))?;

    if !metadata.is_file() {
        return Err(CliError::InvalidInput(format!(
            "'{}' is not a regular file",
            path.display()
        )));
    }
    if metadata.len() > max_size {
        return Err(CliError::InvalidInput(format!(
            "file size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Resolve an output path against its canonical parent directory.
fn validate_output_path(path: &Path) -> Result<PathBuf, CliError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| CliError::io(parent, e))?;

    if !canonical_parent.is_dir() {
        return Err(CliError::InvalidInput(format!(
            "output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| CliError::InvalidInput("output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Read a word list: a JSON array for `.json` files, otherwise one word
/// per non-empty line.
pub fn load_words(path: &Path) -> Result<Vec<String>, CliError> {
    validate_file_size(path, MAX_WORDS_FILE_SIZE)?;
    let content = std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;

    if is_json(path) {
        return Ok(serde_json::from_str(&content)?);
    }
    Ok(content
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// =============================================================================
// INDEX
// =============================================================================

/// Index `words`; each sink carries the position of the word's last
/// occurrence in the list.
pub fn build_index(
    config: &SeaDawgConfig,
    words: &[String],
) -> Result<SeaDawg<char, usize>, CliError> {
    let mut index = SeaDawg::with_config(config.clone())?;
    for (position, word) in words.iter().enumerate() {
        index.add_str(word, Sink::new(position))?;
    }
    tracing::debug!(words = words.len(), texts = index.len(), "index built");
    Ok(index)
}

fn open_index(
    config: &AppConfig,
    words: Option<&Path>,
) -> Result<(Vec<String>, SeaDawg<char, usize>), CliError> {
    let words = match words {
        Some(path) => load_words(path)?,
        None => Vec::new(),
    };
    let index = build_index(&config.engine, &words)?;
    Ok((words, index))
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    /// Words read from the list, duplicates included.
    pub words_read: usize,
    pub metrics: GraphMetrics,
}

pub fn run_status(words_read: usize, index: &SeaDawg<char, usize>) -> StatusReport {
    StatusReport {
        words_read,
        metrics: index.metrics(),
    }
}

/// Show index metrics.
pub fn cmd_status(config: &AppConfig, words: Option<&Path>, json_mode: bool) -> Result<(), CliError> {
    let (list, index) = open_index(config, words)?;
    let report = run_status(list.len(), &index);

    if json_mode {
        return print_json(&report);
    }

    let metrics = report.metrics;
    println!("SeaDawg Index Status");
    println!("====================");
    println!("Words read:      {}", report.words_read);
    println!("Texts:           {}", metrics.text_count);
    println!("Nodes:           {}", metrics.node_count);
    println!("Edges:           {}", metrics.edge_count);
    println!("Open edges:      {}", metrics.open_edge_count);
    println!("Max node length: {}", metrics.max_node_length);

    Ok(())
}

// =============================================================================
// QUERY COMMAND
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryHit {
    pub text: String,
    /// Position of the word in the list.
    pub position: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryReport {
    pub mode: &'static str,
    pub query: String,
    pub hits: Vec<QueryHit>,
}

pub fn run_query(
    index: &SeaDawg<char, usize>,
    mode: QueryMode,
    query: &str,
) -> Result<QueryReport, CliError> {
    let hits = match mode {
        QueryMode::Exact => index
            .find_exact_str(query)?
            .map(|sink| QueryHit {
                text: query.to_string(),
                position: sink.payload().copied(),
            })
            .into_iter()
            .collect(),
        QueryMode::Prefix => index
            .find_with_prefix_str(query)?
            .iter()
            .map(|hit| QueryHit {
                text: hit.text_string(),
                position: hit.payload().copied(),
            })
            .collect(),
        QueryMode::Substring => index
            .find_with_substring_str(query)?
            .iter()
            .map(|hit| QueryHit {
                text: hit.text_string(),
                position: hit.payload().copied(),
            })
            .collect(),
    };

    Ok(QueryReport {
        mode: mode.as_str(),
        query: query.to_string(),
        hits,
    })
}

/// Look up `text` in the index.
pub fn cmd_query(
    config: &AppConfig,
    words: Option<&Path>,
    json_mode: bool,
    mode: QueryMode,
    text: &str,
) -> Result<(), CliError> {
    let (_, index) = open_index(config, words)?;
    let report = run_query(&index, mode, text)?;

    if json_mode {
        return print_json(&report);
    }

    println!("{} query '{}': {} hit(s)", report.mode, report.query, report.hits.len());
    for hit in &report.hits {
        match hit.position {
            Some(position) => println!("  [{}] {}", position, hit.text),
            None => println!("  {}", hit.text),
        }
    }

    Ok(())
}

// =============================================================================
// DELETE COMMAND
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteReport {
    pub deleted: Vec<String>,
    /// Requested words that were not indexed.
    pub missing: Vec<String>,
    pub metrics: GraphMetrics,
}

/// Delete `texts` and verify the graph that remains.
pub fn run_delete(
    index: &mut SeaDawg<char, usize>,
    texts: &[String],
) -> Result<DeleteReport, CliError> {
    let mut deleted = Vec::new();
    let mut missing = Vec::new();
    for text in texts {
        if index.delete_str(text)? {
            deleted.push(text.clone());
        } else {
            missing.push(text.clone());
        }
    }
    index.check_invariants()?;

    Ok(DeleteReport {
        deleted,
        missing,
        metrics: index.metrics(),
    })
}

/// Delete words from the index, then show what remains.
pub fn cmd_delete(
    config: &AppConfig,
    words: Option<&Path>,
    json_mode: bool,
    texts: &[String],
) -> Result<(), CliError> {
    let (_, mut index) = open_index(config, words)?;
    let report = run_delete(&mut index, texts)?;

    if json_mode {
        return print_json(&report);
    }

    println!("Deleted: {}", report.deleted.len());
    for text in &report.missing {
        println!("  not indexed: {}", text);
    }
    println!("Texts remaining: {}", report.metrics.text_count);
    println!("Nodes:           {}", report.metrics.node_count);
    println!("Edges:           {}", report.metrics.edge_count);
    println!("Invariants:      ok");

    Ok(())
}

// =============================================================================
// DUMP COMMAND
// =============================================================================

pub fn run_dump(index: &SeaDawg<char, usize>) -> Result<GraphSnapshot, CliError> {
    Ok(index.snapshot()?)
}

/// Write the graph snapshot as JSON to `output`, or to stdout.
pub fn cmd_dump(config: &AppConfig, words: Option<&Path>, output: Option<&Path>) -> Result<(), CliError> {
    let (_, index) = open_index(config, words)?;
    let snapshot = run_dump(&index)?;

    let Some(output) = output else {
        return print_json(&snapshot);
    };

    let validated = validate_output_path(output)?;
    let content = serde_json::to_string_pretty(&snapshot)?;
    std::fs::write(&validated, content).map_err(|e| CliError::io(&validated, e))?;
    tracing::info!(path = %validated.display(), nodes = snapshot.nodes.len(), "graph dumped");

    Ok(())
}

// =============================================================================
// THRASH COMMAND
// =============================================================================

/// The word list of `round`, derived from the configured seed.
pub fn generate_words(config: &ThrashConfig, round: usize) -> Vec<String> {
    let alphabet: Vec<char> = config.alphabet.chars().collect();
    if alphabet.is_empty() {
        return Vec::new();
    }
    let mut rng = StdRng::seed_from_u64(config.seed ^ round as u64);
    (0..config.words_per_round)
        .map(|_| {
            (0..config.word_length)
                .map(|_| alphabet[rng.random_range(0..alphabet.len())])
                .collect()
        })
        .collect()
}

/// Build an index from `words` and check that every word is found, that the
/// graph is sound, and, with `delete_half`, that deleting every other word
/// leaves exactly the rest.
fn exercise(engine: &SeaDawgConfig, words: &[String], delete_half: bool) -> Result<(), CliError> {
    let mut index = build_index(engine, words)?;
    index.check_invariants()?;

    let distinct: BTreeSet<&String> = words.iter().collect();
    if index.len() != distinct.len() {
        return Err(CliError::InvalidInput(format!(
            "index holds {} texts, expected {}",
            index.len(),
            distinct.len()
        )));
    }
    for word in &distinct {
        if index.find_exact_str(word)?.is_none() {
            return Err(CliError::InvalidInput(format!("'{}' not found after add", word)));
        }
    }

    if !delete_half {
        return Ok(());
    }

    let doomed: BTreeSet<&String> = distinct.iter().copied().step_by(2).collect();
    for word in &doomed {
        if !index.delete_str(word)? {
            return Err(CliError::InvalidInput(format!("'{}' not deleted", word)));
        }
    }
    index.check_invariants()?;

    for word in &distinct {
        let found = index.find_exact_str(word)?.is_some();
        if found == doomed.contains(word) {
            return Err(CliError::InvalidInput(format!(
                "'{}' {} after deleting half",
                word,
                if found { "still found" } else { "lost" }
            )));
        }
    }
    let listed = index.find_with_prefix_str("")?.len();
    if listed != distinct.len() - doomed.len() {
        return Err(CliError::InvalidInput(format!(
            "prefix scan lists {} texts, expected {}",
            listed,
            distinct.len() - doomed.len()
        )));
    }

    Ok(())
}

/// Run [`exercise`], turning a panic into a failure description.
fn exercise_guarded(
    engine: &SeaDawgConfig,
    words: &[String],
    delete_half: bool,
) -> Result<(), String> {
    match std::panic::catch_unwind(AssertUnwindSafe(|| exercise(engine, words, delete_half))) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(e.to_string()),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(format!("panicked: {}", message))
        }
    }
}

/// Write a failing word list where `replay` will find it.
fn save_failure(dir: &Path, name: &str, words: &[String]) -> Result<PathBuf, CliError> {
    std::fs::create_dir_all(dir).map_err(|e| CliError::io(dir, e))?;
    let path = dir.join(name);
    let content = serde_json::to_string_pretty(words)?;
    std::fs::write(&path, content).map_err(|e| CliError::io(&path, e))?;
    Ok(path)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundReport {
    pub round: usize,
    pub words: usize,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThrashReport {
    pub seed: u64,
    pub rounds: Vec<RoundReport>,
}

/// Run every configured round, stopping at the first failure.
pub fn run_thrash(config: &AppConfig) -> Result<ThrashReport, CliError> {
    let thrash = &config.thrash;
    thrash.validate()?;
    let mut rounds = Vec::with_capacity(thrash.rounds);

    for round in 0..thrash.rounds {
        let words = generate_words(thrash, round);
        let started = Instant::now();

        if let Err(detail) = exercise_guarded(&config.engine, &words, thrash.delete_half) {
            let name = format!("thrash_{:x}_round_{}.json", thrash.seed, round);
            let saved = save_failure(&thrash.failure_dir, &name, &words)?;
            return Err(CliError::ThrashFailure {
                round,
                detail,
                saved,
            });
        }

        let elapsed_ms = started.elapsed().as_millis() as u64;
        tracing::info!(round, words = words.len(), elapsed_ms, "thrash round complete");
        rounds.push(RoundReport {
            round,
            words: words.len(),
            elapsed_ms,
        });
    }

    Ok(ThrashReport {
        seed: thrash.seed,
        rounds,
    })
}

/// Stress the engine with randomized word lists.
pub fn cmd_thrash(config: &AppConfig, json_mode: bool) -> Result<(), CliError> {
    let report = run_thrash(config)?;

    if json_mode {
        return print_json(&report);
    }

    println!(
        "Completed {} round(s) with seed {:#x}",
        report.rounds.len(),
        report.seed
    );
    for round in &report.rounds {
        println!("  round {:>3}: {} words in {} ms", round.round, round.words, round.elapsed_ms);
    }

    Ok(())
}

// =============================================================================
// REPLAY COMMAND
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    /// Word lists that ran clean, in name order.
    pub passed: Vec<String>,
}

/// Re-run every `.json` word list in `dir`, stopping at the first failure.
pub fn run_replay(config: &AppConfig, dir: &Path) -> Result<ReplayReport, CliError> {
    let entries = std::fs::read_dir(dir).map_err(|e| CliError::io(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| CliError::io(dir, e))?.path();
        if path.is_file() && is_json(&path) {
            files.push(path);
        }
    }
    files.sort();

    let mut passed = Vec::with_capacity(files.len());
    for path in files {
        let words = load_words(&path)?;
        tracing::debug!(path = %path.display(), words = words.len(), "replaying");
        if let Err(detail) = exercise_guarded(&config.engine, &words, config.thrash.delete_half) {
            return Err(CliError::ReplayFailure { path, detail });
        }
        passed.push(path.display().to_string());
    }

    Ok(ReplayReport { passed })
}

/// Re-run captured failing word lists.
pub fn cmd_replay(config: &AppConfig, json_mode: bool, dir: &Path) -> Result<(), CliError> {
    let report = run_replay(config, dir)?;

    if json_mode {
        return print_json(&report);
    }

    for path in &report.passed {
        println!("  ok  {}", path);
    }
    println!("Replayed {} word list(s)", report.passed.len());

    Ok(())
}
