use crate::error::FocusError;
use std::collections::BTreeMap;
use tracing::debug;

/// Lines starting with this are ignored
pub const COMMENT_MARKER: &str = "//";
/// Lines starting with this open a new field, e.g. `@title:`
pub const FIELD_MARKER: char = '@';

/// Draft field identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DraftField {
    Title,
    Body,
    Milestone,
    Labels,
    Assignee,
}

impl DraftField {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::Title => "title",
            DraftField::Body => "body",
            DraftField::Milestone => "milestone",
            DraftField::Labels => "labels",
            DraftField::Assignee => "assignee",
        }
    }

    /// Get all draft fields, in template order
    pub fn all() -> &'static [DraftField] {
        &[
            DraftField::Title,
            DraftField::Body,
            DraftField::Milestone,
            DraftField::Labels,
            DraftField::Assignee,
        ]
    }

    pub fn from_name(name: &str) -> Option<DraftField> {
        DraftField::all()
            .iter()
            .copied()
            .find(|field| field.as_str() == name)
    }
}

/// Parsed draft content. Every field is always present; unopened fields are empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftRecord {
    fields: BTreeMap<DraftField, String>,
}

impl Default for DraftRecord {
    fn default() -> Self {
        DraftRecord {
            fields: DraftField::all()
                .iter()
                .map(|field| (*field, String::new()))
                .collect(),
        }
    }
}

impl DraftRecord {
    pub fn get(&self, field: DraftField) -> &str {
        self.fields.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: DraftField, content: impl Into<String>) {
        self.fields.insert(field, content.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (DraftField, &str)> {
        self.fields.iter().map(|(field, text)| (*field, text.as_str()))
    }

    /// True when no field holds any non-whitespace content
    pub fn is_blank(&self) -> bool {
        self.fields.values().all(|text| text.trim().is_empty())
    }

    /// Builds the payload handed to the issue submission client.
    ///
    /// Title and body are required. Labels and assignees are comma separated.
    pub fn to_new_issue(&self) -> Result<NewIssue, FocusError> {
        let title = self.get(DraftField::Title).trim();
        let body = self.get(DraftField::Body).trim();
        if title.is_empty() || body.is_empty() {
            return Err(FocusError::InvalidArgs(
                "cannot create issue without title or body".to_string(),
            ));
        }

        let milestone = Some(self.get(DraftField::Milestone).trim())
            .filter(|m| !m.is_empty())
            .map(str::to_string);

        Ok(NewIssue {
            title: title.to_string(),
            body: body.to_string(),
            milestone,
            labels: split_list(self.get(DraftField::Labels)),
            assignees: split_list(self.get(DraftField::Assignee)),
        })
    }
}

/// Issue creation request derived from a draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssue {
    pub title: String,
    pub body: String,
    pub milestone: Option<String>,
    pub labels: Vec<String>,
    pub assignees: Vec<String>,
}

/// True when `text` can sit under a marker and parse back unchanged: no line
/// may start with a field or comment marker.
pub fn is_plain_content(text: &str) -> bool {
    text.lines()
        .all(|line| !line.starts_with(FIELD_MARKER) && !line.starts_with(COMMENT_MARKER))
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses draft text into a [`DraftRecord`].
///
/// - Blank lines and `//` comments are skipped.
/// - `@name:` opens a field and commits the previous one. Text after the colon
///   is the first line of the new field.
/// - Other lines are appended, newline terminated, to the open field. Lines
///   before the first marker are discarded.
/// - The last open field is committed at end of input.
///
/// An unknown or malformed marker fails immediately. The error carries the
/// fields committed so far.
pub fn parse_draft(content: &str) -> Result<DraftRecord, FocusError> {
    let normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    let mut record = DraftRecord::default();
    let mut open: Option<(DraftField, String)> = None;

    for (idx, line) in normalized.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() || line.starts_with(COMMENT_MARKER) {
            continue;
        }

        let Some(marker) = line.strip_prefix(FIELD_MARKER) else {
            if let Some((_, buffer)) = open.as_mut() {
                buffer.push_str(line);
                buffer.push('\n');
            }
            continue;
        };

        if let Some((field, buffer)) = open.take() {
            record.set(field, buffer);
        }

        let Some((name, inline)) = marker.split_once(':') else {
            return Err(FocusError::MalformedMarker {
                line: line_no,
                text: line.to_string(),
                partial: record,
            });
        };

        let name = name.trim();
        let Some(field) = DraftField::from_name(name) else {
            debug!(field = name, line = line_no, "unknown draft field");
            return Err(FocusError::UnknownField {
                field: name.to_string(),
                line: line_no,
                partial: record,
            });
        };

        let mut buffer = String::new();
        let inline = inline.trim();
        if !inline.is_empty() {
            buffer.push_str(inline);
            buffer.push('\n');
        }
        open = Some((field, buffer));
    }

    if let Some((field, buffer)) = open {
        record.set(field, buffer);
    }

    Ok(record)
}
