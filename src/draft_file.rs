use crate::draft_parser::{self, DraftField, DraftRecord};
use crate::error::FocusError;
use std::fs;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

/// File name of the draft inside the focus home directory
pub const DRAFT_FILENAME: &str = "FocusFile";

/// Comment shown above each marker in a fresh draft
fn field_hint(field: DraftField) -> &'static str {
    match field {
        DraftField::Title => "// one line summary of the issue",
        DraftField::Body => "// full description, as many lines as needed",
        DraftField::Milestone => "// milestone to attach the issue to (optional)",
        DraftField::Labels => "// comma separated labels (optional)",
        DraftField::Assignee => "// login of the person to assign (optional)",
    }
}

/// Renders the draft skeleton with `record`'s content under each marker.
pub fn render_template(record: &DraftRecord) -> String {
    let mut out = String::from("// lines starting with // are ignored\n\n");
    for field in DraftField::all() {
        out.push_str(field_hint(*field));
        out.push('\n');
        out.push(draft_parser::FIELD_MARKER);
        out.push_str(field.as_str());
        out.push_str(":\n");
        let content = record.get(*field).trim_end();
        if !content.is_empty() {
            out.push_str(content);
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

/// Writes an empty draft to `path`.
///
/// Any existing file at `path` is overwritten without merging. Its content is lost.
pub fn create_template(path: &Path) -> Result<(), FocusError> {
    create_template_with(path, &DraftRecord::default())
}

/// Same as [`create_template`], with fields prefilled from `record`.
///
/// Content with lines starting with `@` or `//` is rejected, since it would
/// not parse back into the same field.
pub fn create_template_with(path: &Path, record: &DraftRecord) -> Result<(), FocusError> {
    if let Some((field, _)) = record
        .iter()
        .find(|(_, text)| !draft_parser::is_plain_content(text))
    {
        return Err(FocusError::InvalidArgs(format!(
            "prefilled {} contains a marker line",
            field.as_str()
        )));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render_template(record))?;
    info!(path = %path.display(), "draft template written");
    Ok(())
}

/// Deletes the draft (if any) and writes a fresh template.
pub fn reset(path: &Path) -> Result<(), FocusError> {
    match fs::remove_file(path) {
        Ok(()) => debug!(path = %path.display(), "removed previous draft"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    create_template(path)
}

/// Reads and parses the draft at `path`.
pub fn load_draft(path: &Path) -> Result<DraftRecord, FocusError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(FocusError::NotFound(format!(
                "no draft at {}; run `focus create` first",
                path.display()
            )));
        }
        Err(e) => return Err(e.into()),
    };
    draft_parser::parse_draft(&content)
}

/// Opens `path` in the editor and waits for it to exit.
///
/// `editor_command` may carry arguments, e.g. `code --wait`.
pub fn open_in_editor(path: &Path, editor_command: &str) -> Result<(), FocusError> {
    let mut parts = editor_command.split_whitespace();
    let program = parts.next().ok_or_else(|| {
        FocusError::InvalidArgs(
            "editor command is empty; set it with `focus config editor <cmd>`".to_string(),
        )
    })?;

    debug!(editor = editor_command, path = %path.display(), "launching editor");
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| FocusError::Editor {
            command: editor_command.to_string(),
            reason: e.to_string(),
        })?;

    if !status.success() {
        return Err(FocusError::Editor {
            command: editor_command.to_string(),
            reason: format!("exited with {status}"),
        });
    }
    Ok(())
}
