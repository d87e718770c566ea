//! Winner selection per mod id
//!
//! All candidates staged under one mod id compete for a single slot in the
//! output. The policy, in order:
//!
//! 1. A candidate whose file name matches a top-level input wins outright.
//! 2. Otherwise versions are compared. A unique highest semantic version wins.
//! 3. If versions are missing, not semantic, or the highest version is shared,
//!    the shallowest candidate is selected and the run records one warning.
//!
//! Selection depends only on candidate order, which is staging order.

pub mod version;

use std::collections::{BTreeSet, HashSet};

use crate::extract::Candidate;
use crate::run::Run;

pub use version::{ParsedVersion, VersionKey};

/// Why the selection was ambiguous
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ambiguity {
    /// Candidates without any version
    MissingVersions(Vec<String>),
    /// Candidates whose version is not semantic, as `name [raw]`
    NonSemanticVersions(Vec<String>),
    /// Several distinct candidates share the highest version
    DuplicateEntries(Vec<String>),
}

impl Ambiguity {
    fn describe(&self, identifier: &str) -> String {
        match self {
            Ambiguity::MissingVersions(names) => {
                format!("{identifier} has invalid version(s): {}", names.join(", "))
            }
            Ambiguity::NonSemanticVersions(names) => format!(
                "{identifier} has invalid semantic version(s): {}",
                names.join(", ")
            ),
            Ambiguity::DuplicateEntries(names) => {
                format!("{identifier} has duplicate entries: {}", names.join(", "))
            }
        }
    }
}

/// How the winner of a group was chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// A standalone top-level copy exists
    DepthZero,
    /// Only one version exists
    OnlyVersion { version: String },
    /// The highest version beat the listed alternatives
    Latest { version: String, against: Vec<String> },
    /// Versions could not decide; the shallowest candidate was taken
    Forced { reason: Ambiguity },
    /// The group had no candidates
    NoCandidates,
}

/// Outcome of resolving one mod id
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    pub identifier: String,
    pub winner: Option<&'a Candidate>,
    pub decision: Decision,
    /// Human-readable account of the decision
    pub message: String,
}

impl Selection<'_> {
    /// Whether the decision was recorded as a warning
    pub fn is_warning(&self) -> bool {
        matches!(self.decision, Decision::Forced { .. })
    }
}

/// A candidate with its parsed version
struct Versioned<'a> {
    candidate: &'a Candidate,
    raw: Option<&'a str>,
    parsed: ParsedVersion,
}

/// Select the winner among `candidates`, all staged under `identifier`.
///
/// `top_level_names` are the file names of the top-level inputs. Forced
/// selections append exactly one warning to the run.
pub fn select<'a>(
    run: &mut Run,
    identifier: &str,
    candidates: &'a [Candidate],
    top_level_names: &BTreeSet<String>,
) -> Selection<'a> {
    let selection = |winner: Option<&'a Candidate>, decision: Decision, message: String| {
        Selection {
            identifier: identifier.to_string(),
            winner,
            decision,
            message,
        }
    };

    let standalone = candidates
        .iter()
        .filter(|c| top_level_names.contains(&c.file_name))
        .min_by_key(|c| c.depth());
    if let Some(winner) = standalone {
        let message = format!(
            "Selected {} from {identifier} as depth 0 mod",
            winner.display_name()
        );
        return selection(Some(winner), Decision::DepthZero, message);
    }

    if candidates.is_empty() {
        return selection(
            None,
            Decision::NoCandidates,
            format!("{identifier} has no entries!"),
        );
    }

    let versioned: Vec<Versioned<'a>> = candidates
        .iter()
        .map(|candidate| {
            let raw = candidate.descriptor.version.as_deref();
            Versioned {
                candidate,
                raw,
                parsed: ParsedVersion::parse(raw),
            }
        })
        .collect();

    // Candidates sharing a raw version are the same release; keep the first.
    // Candidates without a version are never considered duplicates.
    let mut seen = HashSet::new();
    let distinct: Vec<&Versioned<'a>> = versioned
        .iter()
        .filter(|v| v.raw.is_none_or(|raw| seen.insert(raw)))
        .collect();

    let mut groups: Vec<(VersionKey, Vec<&Versioned<'a>>)> = Vec::new();
    for &entry in &distinct {
        let key = entry.parsed.key();
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(entry),
            None => groups.push((key, vec![entry])),
        }
    }
    groups.sort_by(|(a, _), (b, _)| a.cmp(b));

    let Some((top_key, top_group)) = groups.last() else {
        return selection(
            None,
            Decision::NoCandidates,
            format!("{identifier} has no entries!"),
        );
    };

    let several = versioned.len() > 1;
    let ambiguity = if several && versioned.iter().any(|v| v.raw.is_none()) {
        Some(Ambiguity::MissingVersions(
            versioned
                .iter()
                .filter(|v| v.raw.is_none())
                .map(|v| v.candidate.display_name())
                .collect(),
        ))
    } else if several && versioned.iter().any(|v| v.parsed.semantic().is_none()) {
        Some(Ambiguity::NonSemanticVersions(
            versioned
                .iter()
                .filter(|v| matches!(v.parsed, ParsedVersion::Unparseable(_)))
                .map(|v| {
                    format!(
                        "{} [{}]",
                        v.candidate.display_name(),
                        v.raw.unwrap_or_default()
                    )
                })
                .collect(),
        ))
    } else if top_group.len() > 1 {
        Some(Ambiguity::DuplicateEntries(
            top_group
                .iter()
                .map(|v| v.candidate.display_name())
                .collect(),
        ))
    } else {
        None
    };

    if let Some(reason) = ambiguity {
        return force_select(run, identifier, candidates, reason);
    }

    let winner = top_group[0];
    let version = winner
        .raw
        .map_or_else(|| top_key.to_string(), str::to_string);
    // Alternatives are listed in staging order, one per distinct version
    let mut against: Vec<String> = Vec::new();
    let mut beaten: Vec<VersionKey> = Vec::new();
    for entry in &distinct {
        let key = entry.parsed.key();
        if key != *top_key && !beaten.contains(&key) {
            against.push(entry.raw.map_or_else(|| key.to_string(), str::to_string));
            beaten.push(key);
        }
    }

    if against.is_empty() {
        let message = format!(
            "Selected {} ({version}) from {identifier} as the only version",
            winner.candidate.display_name()
        );
        selection(
            Some(winner.candidate),
            Decision::OnlyVersion { version },
            message,
        )
    } else {
        let message = format!(
            "Selected {} ({version}) from {identifier} as the latest version against {}",
            winner.candidate.display_name(),
            against.join(", ")
        );
        selection(
            Some(winner.candidate),
            Decision::Latest { version, against },
            message,
        )
    }
}

/// Take the first candidate of the shallowest depth, in staging order
fn force_select<'a>(
    run: &mut Run,
    identifier: &str,
    candidates: &'a [Candidate],
    reason: Ambiguity,
) -> Selection<'a> {
    let winner = candidates.iter().min_by_key(|c| c.depth());
    let message = match winner {
        Some(winner) => format!(
            "{}; forcefully selected {}",
            reason.describe(identifier),
            winner.display_name()
        ),
        None => reason.describe(identifier),
    };
    run.warn(message.clone());
    Selection {
        identifier: identifier.to_string(),
        winner,
        decision: Decision::Forced { reason },
        message,
    }
}
