//! Choice matching for conversational and CLI input.
//!
//! Users pick statuses, skills, projects and fields by typing a name.
//! Resolution is three-tier: exact match → case-insensitive match (plus
//! synonym lookup for statuses) → error carrying the valid options and,
//! when one is close enough, a suggestion.

use crate::error::Error;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Shorthand names for the seeded statuses, keyed in lowercase.
pub static STATUS_SYNONYMS: LazyLock<HashMap<&str, &str>> = LazyLock::new(|| {
    [
        ("proto", "Prototyping"),
        ("prototype", "Prototyping"),
        ("idea", "Prototyping"),
        ("dev", "In Development"),
        ("wip", "In Development"),
        ("in progress", "In Development"),
        ("in_progress", "In Development"),
        ("development", "In Development"),
        ("done", "Completed"),
        ("complete", "Completed"),
        ("finished", "Completed"),
        ("update", "Updated"),
        ("abandoned", "Abandoned/Not supported"),
        ("not supported", "Abandoned/Not supported"),
        ("dropped", "Abandoned/Not supported"),
        ("dead", "Abandoned/Not supported"),
    ]
    .into_iter()
    .collect()
});

/// Match `input` against `options`: exact first, then ignoring case and
/// surrounding whitespace.
#[must_use]
pub fn resolve_choice(input: &str, options: &[String]) -> Option<String> {
    let trimmed = input.trim();
    if let Some(exact) = options.iter().find(|o| o.as_str() == trimmed) {
        return Some(exact.clone());
    }

    let lower = trimmed.to_lowercase();
    options.iter().find(|o| o.to_lowercase() == lower).cloned()
}

/// Resolve a status name, accepting synonyms such as `wip` or `done`.
///
/// # Errors
///
/// Returns `InvalidChoice` listing the valid statuses.
pub fn resolve_status(input: &str, statuses: &[String]) -> Result<String, Error> {
    if let Some(found) = resolve_choice(input, statuses) {
        return Ok(found);
    }

    let lower = input.trim().to_lowercase();
    if let Some(&canonical) = STATUS_SYNONYMS.get(lower.as_str()) {
        if let Some(found) = resolve_choice(canonical, statuses) {
            return Ok(found);
        }
    }

    Err(invalid("status", input, statuses))
}

/// Resolve a skill name.
///
/// # Errors
///
/// Returns `InvalidChoice` listing the valid skills.
pub fn resolve_skill(input: &str, skills: &[String]) -> Result<String, Error> {
    resolve_choice(input, skills).ok_or_else(|| invalid("skill", input, skills))
}

/// Resolve one of the user's project names.
///
/// # Errors
///
/// Returns `InvalidChoice` listing the user's projects.
pub fn resolve_project(input: &str, projects: &[String]) -> Result<String, Error> {
    resolve_choice(input, projects).ok_or_else(|| invalid("project", input, projects))
}

fn invalid(kind: &'static str, input: &str, valid: &[String]) -> Error {
    Error::InvalidChoice {
        kind,
        value: input.to_string(),
        valid: valid.to_vec(),
    }
}

/// Closest option within edit distance 3, compared case-insensitively.
#[must_use]
pub fn suggest(input: &str, options: &[String]) -> Option<String> {
    let lower = input.trim().to_lowercase();
    options
        .iter()
        .map(|o| (levenshtein_distance(&lower, &o.to_lowercase()), o))
        .filter(|(dist, _)| *dist <= 3)
        .min_by_key(|(dist, _)| *dist)
        .map(|(_, o)| o.clone())
}

// ── Levenshtein distance ─────────────────────────────────────

/// Compute the Levenshtein edit distance between two strings.
#[must_use]
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
