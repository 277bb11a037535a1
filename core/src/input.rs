use std::collections::HashMap;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, TimeZone};

use crate::model::category::CategoryId;
use crate::model::task::{Priority, TaskDraft};
use crate::time::parse_due_input;

pub const METADATA_KEYS: [&str; 4] = ["due", "category", "priority", "description"];

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub title: String,
    pub metadata: HashMap<String, String>,
}

/// Splits command-line words into a title and `key:value` metadata.
///
/// Only alphabetic keys count as metadata, so "standup 10:30" keeps the time
/// in the title.
pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut title_parts = Vec::new();
    let mut metadata = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() && key.chars().all(|c| c.is_ascii_alphabetic()) {
                metadata.insert(key.to_lowercase(), value.to_string());
                continue;
            }
        }
        title_parts.push(arg.as_str());
    }

    ParsedInput {
        title: title_parts.join(" "),
        metadata,
    }
}

/// Resolves an abbreviated key against `candidates` by exact or unique prefix match.
pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

impl ParsedInput {
    /// Builds a draft from the title and metadata. Unknown or ambiguous keys
    /// are returned as warnings rather than failing the whole input; a bad
    /// priority or category value is an error.
    pub fn into_draft<Tz: TimeZone>(self, now: &DateTime<Tz>) -> Result<(TaskDraft, Vec<String>)> {
        let mut draft = TaskDraft::new(self.title);
        let mut warnings = Vec::new();

        // sorted so warnings come out in a stable order
        let mut entries: Vec<(String, String)> = self.metadata.into_iter().collect();
        entries.sort();

        for (key, value) in entries {
            let key = match expand_key(&key, &METADATA_KEYS) {
                Ok(key) => key,
                Err(e) => {
                    warnings.push(e.to_string());
                    continue;
                }
            };
            match key.as_str() {
                "due" => match parse_due_input(&value, now) {
                    Some(due) => draft.due_date = Some(due),
                    None => warnings.push(format!("Invalid due date '{}'", value)),
                },
                "category" => {
                    let id: CategoryId = value
                        .parse()
                        .with_context(|| format!("category must be a numeric id, got '{}'", value))?;
                    draft.category_id = Some(id);
                }
                "priority" => draft.priority = value.parse::<Priority>()?,
                "description" => draft.description = value,
                _ => unreachable!("expand_key only returns METADATA_KEYS"),
            }
        }

        Ok((draft, warnings))
    }
}
