use std::fmt::Display;

use serde::Serialize;

use super::types::TaskOutcome;

/// Serializable summary of one or more outcome lists.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CascadeReport {
    pub entries: Vec<ReportEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub name: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CascadeReport {
    pub fn from_outcomes<T: Display, E: Display>(outcomes: &[TaskOutcome<T, E>]) -> Self {
        let mut report = Self::default();
        report.extend(outcomes);
        report
    }

    pub fn extend<T: Display, E: Display>(&mut self, outcomes: &[TaskOutcome<T, E>]) {
        self.entries.extend(outcomes.iter().map(|outcome| match &outcome.result {
            Ok(value) => ReportEntry {
                name: outcome.name.clone(),
                ok: true,
                output: Some(value.to_string()),
                error: None,
            },
            Err(err) => ReportEntry {
                name: outcome.name.clone(),
                ok: false,
                output: None,
                error: Some(err.to_string()),
            },
        }));
    }

    pub fn is_success(&self) -> bool {
        self.entries.iter().all(|entry| entry.ok)
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|entry| entry.ok)
            .map(|entry| entry.name.as_str())
    }

    pub fn failed(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|entry| !entry.ok)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
