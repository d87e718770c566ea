//! The flattening pipeline
//!
//! Runs the three steps strictly in order:
//!
//! 1. Extract: stage every top-level jar and all jars nested in it.
//! 2. Strip: remove nested jars and their declaration from every staged jar.
//! 3. Select: keep one jar per mod id and copy it to the output directory.
//!
//! Any fatal error aborts the run. Jars already copied to the output stay
//! there; the staging directory is always removed.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::archive::{self, rewrite};
use crate::config::{EXCLUDE_MARKER_ENTRY, FlattenConfig};
use crate::error::{FlattenError, Result};
use crate::extract::{Candidate, Extractor};
use crate::progress::ProgressDisplay;
use crate::report::Summary;
use crate::resolver;
use crate::run::Run;
use crate::{temp, ui};

/// Flatten the jars of `config.input_dir` into `config.output_dir`
pub fn flatten(config: &FlattenConfig) -> Result<Summary> {
    if config.output_dir.exists() {
        return Err(FlattenError::OutputExists {
            path: config.output_dir.display().to_string(),
        });
    }
    if !config.input_dir.is_dir() {
        return Err(FlattenError::InputNotFound {
            path: config.input_dir.display().to_string(),
        });
    }

    let staging = temp::create_staging_dir(&config.staging_base)?;
    fs::create_dir_all(&config.output_dir).map_err(|e| FlattenError::OutputWriteFailed {
        path: config.output_dir.display().to_string(),
        reason: e.to_string(),
    })?;
    log::debug!("Staging jars in {}", staging.path().display());

    let mut run = Run::new();
    log::debug!("Run token {}", run.token());

    ui::step("Step 1: Extracting Jars");
    let (candidates, top_level_names) = extract_inputs(config, &mut run, staging.path())?;

    ui::step("Step 2: Clearing JIJ Status");
    strip_candidates(&candidates)?;

    ui::step("Step 3: Selecting Jars");
    let groups = group_by_identifier(candidates);
    for (identifier, members) in &groups {
        if members.iter().all(Candidate::is_unidentified) {
            for candidate in members {
                emit(&mut run, candidate, &config.output_dir)?;
            }
            continue;
        }
        let selection = resolver::select(&mut run, identifier, members, &top_level_names);
        ui::selection(&selection);
        log::debug!("Resolved {}: {:?}", selection.identifier, selection.decision);
        if let Some(winner) = selection.winner {
            emit(&mut run, winner, &config.output_dir)?;
        }
    }

    let summary = Summary::collect(&groups, &run);
    summary.print();
    Ok(summary)
}

/// Top-level jars of the input directory, in file name order
fn list_inputs(input_dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut inputs = Vec::new();
    for entry in WalkDir::new(input_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| FlattenError::IoError {
            message: e.to_string(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            log::warn!("Skipping non UTF-8 file name {}", entry.path().display());
            continue;
        };
        if FlattenConfig::is_jar_name(name) {
            inputs.push((name.to_string(), entry.path().to_path_buf()));
        }
    }
    Ok(inputs)
}

/// Step 1: stage every non-excluded top-level jar and its nested jars
fn extract_inputs(
    config: &FlattenConfig,
    run: &mut Run,
    staging_dir: &Path,
) -> Result<(Vec<Candidate>, BTreeSet<String>)> {
    let mut candidates = Vec::new();
    let mut top_level_names = BTreeSet::new();

    for (name, path) in list_inputs(&config.input_dir)? {
        let malformed = |reason: String| FlattenError::MalformedArchive {
            name: name.clone(),
            reason,
        };
        let bytes = fs::read(&path).map_err(|e| malformed(e.to_string()))?;
        let excluded = archive::contains_entry(&bytes, EXCLUDE_MARKER_ENTRY)
            .map_err(|e| malformed(e.to_string()))?;
        if excluded {
            ui::info(&format!("Skipping excluded jar -> {name}"));
            continue;
        }

        ui::info(&format!("Extracting Jar -> {name}"));
        run.add_input_size(bytes.len() as u64);
        let staged =
            Extractor::new(run, staging_dir).stage_input(&name, &bytes, file_timestamp(&path))?;
        candidates.extend(staged);
        top_level_names.insert(name);
    }
    Ok((candidates, top_level_names))
}

/// Step 2: strip every staged jar, selected or not
fn strip_candidates(candidates: &[Candidate]) -> Result<()> {
    let progress = ProgressDisplay::new(candidates.len() as u64);
    for candidate in candidates {
        progress.update_jar(&candidate.lineage_display());
        if let Err(e) = rewrite::strip_nested_jars(&candidate.path) {
            progress.abandon();
            return Err(e);
        }
        progress.inc_jar();
    }
    progress.finish();
    Ok(())
}

/// Group candidates by mod id, keeping staging order within each group
fn group_by_identifier(candidates: Vec<Candidate>) -> BTreeMap<String, Vec<Candidate>> {
    let mut groups: BTreeMap<String, Vec<Candidate>> = BTreeMap::new();
    for candidate in candidates {
        groups
            .entry(candidate.identifier.clone())
            .or_default()
            .push(candidate);
    }
    groups
}

/// Copy a selected jar into the output directory.
///
/// The output name is the staged name without its lineage. An existing file
/// is never overwritten; the copy gets the next free `name (N).jar` instead.
fn emit(run: &mut Run, candidate: &Candidate, output_dir: &Path) -> Result<PathBuf> {
    let staged_name = candidate
        .path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(&candidate.file_name);
    let file_name = run.strip_lineage(staged_name).to_string();
    let depth = run.depth_of(staged_name);

    let mut target = output_dir.join(&file_name);
    if target.exists() {
        target = free_name(output_dir, &file_name);
        let message = format!(
            "{file_name} already exists in the output, {} from {} was written as {}",
            candidate.display_name(),
            candidate.identifier,
            target
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default()
        );
        ui::warn(&message);
        run.warn(message);
    }

    let bytes = fs::copy(&candidate.path, &target).map_err(|e| FlattenError::OutputWriteFailed {
        path: target.display().to_string(),
        reason: e.to_string(),
    })?;
    run.add_output_size(bytes);
    log::debug!(
        "Copied {file_name} (depth {depth}, times {}/{}) to {}",
        candidate.container_time,
        candidate.entry_time,
        target.display()
    );
    Ok(target)
}

/// First `stem (N).ext` in `dir` that does not exist yet
fn free_name(dir: &Path, file_name: &str) -> PathBuf {
    let (stem, extension) = match file_name.rsplit_once('.') {
        Some((stem, extension)) => (stem, format!(".{extension}")),
        None => (file_name, String::new()),
    };
    let mut counter = 1;
    loop {
        let candidate = dir.join(format!("{stem} ({counter}){extension}"));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Modification time of a file in Unix seconds, 0 when unavailable
fn file_timestamp(path: &Path) -> i64 {
    fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .map(|time| chrono::DateTime::<chrono::Utc>::from(time).timestamp())
        .unwrap_or(0)
}
