use crate::cli::parser::{self, Command};
use crate::config::Paths;
use crate::draft_file;
use crate::draft_parser::{DraftField, DraftRecord};
use crate::error::FocusError;
use crate::output;
use crate::repo::{GitRemoteResolver, RepoResolver};
use crate::state::{IssueState, RepoKey};
use crate::storage::{FileStateStorage, StateStorage};
use crate::todo;
use anyhow::Context;
use tracing::info;

const USAGE: &str = "focus - drafts and todos for the repository you are in

COMMANDS:
  create                 start a new issue draft and open it in the editor
  edit                   reopen the current draft
  show                   print the fields of the current draft
  reset                  discard the current draft
  issues                 list the cached issues of this repository
  todo [list]            list todos of this repository
  todo add <text>        add a todo
  todo done <number>     remove a todo
  config <key> [value]   read or set a preference (editor, milestone)";

/// Overrides for where a run keeps its files and which repository it acts on.
/// Unset fields are resolved from the environment.
#[derive(Debug, Clone, Default)]
pub struct RunEnv {
    pub paths: Option<Paths>,
    pub repo: Option<RepoKey>,
}

impl RunEnv {
    fn repo_key(&self) -> anyhow::Result<RepoKey> {
        match &self.repo {
            Some(repo) => Ok(repo.clone()),
            None => Ok(GitRemoteResolver::default().resolve()?),
        }
    }
}

pub fn run(
    args: Vec<String>,
    mut stdout_additional: Option<&mut dyn std::io::Write>,
    env: Option<RunEnv>,
) -> anyhow::Result<()> {
    let env = env.unwrap_or_default();
    let paths = match &env.paths {
        Some(paths) => paths.clone(),
        None => Paths::from_env()?,
    };
    let storage = FileStateStorage::new(&paths.state_file);

    let command = parser::parse_args(&args);
    info!(?command, home = %paths.home.display(), "running command");

    match command {
        Command::Create => {
            let state = storage.load().context("Failed to load state")?;
            let mut seed = DraftRecord::default();
            if let Some(milestone) = &state.current_milestone {
                seed.set(DraftField::Milestone, milestone.clone());
            }
            draft_file::create_template_with(&paths.draft_file, &seed)
                .context("Failed to write draft")?;
            output::println(
                &format!("Draft created at {}", paths.draft_file.display()),
                &mut stdout_additional,
            )?;
            draft_file::open_in_editor(&paths.draft_file, &state.editor)?;
        }
        Command::Edit => {
            if !paths.draft_file.exists() {
                return Err(FocusError::NotFound(
                    "no draft to edit; run `focus create` first".to_string(),
                )
                .into());
            }
            let state = storage.load().context("Failed to load state")?;
            draft_file::open_in_editor(&paths.draft_file, &state.editor)?;
        }
        Command::Show => {
            let record = draft_file::load_draft(&paths.draft_file)?;
            if record.is_blank() {
                output::println("Draft is empty", &mut stdout_additional)?;
                return Ok(());
            }
            for (field, text) in record.iter().filter(|(_, t)| !t.trim().is_empty()) {
                output::println(
                    &format!("{}: {}", field.as_str(), text.trim_end()),
                    &mut stdout_additional,
                )?;
            }
            match record.to_new_issue() {
                Ok(_) => output::println("Ready to submit", &mut stdout_additional)?,
                Err(err) => output::println(
                    &format!("Not ready to submit: {err}"),
                    &mut stdout_additional,
                )?,
            }
        }
        Command::Reset => {
            draft_file::reset(&paths.draft_file).context("Failed to reset draft")?;
            output::println("Draft reset", &mut stdout_additional)?;
        }
        Command::Issues => {
            let repo = env.repo_key()?;
            let state = storage.load().context("Failed to load state")?;
            let issues = state.cached_issues(&repo);
            if issues.is_empty() {
                output::println("no cached issues", &mut stdout_additional)?;
            }
            for issue in issues {
                let closed = if issue.state == IssueState::Closed {
                    " (closed)"
                } else {
                    ""
                };
                output::println(
                    &format!("#{} {}{}", issue.number, issue.title, closed),
                    &mut stdout_additional,
                )?;
            }
            if let Some(open) = state.open_issue_count(&repo) {
                output::println(&format!("{open} open"), &mut stdout_additional)?;
            }
        }
        Command::TodoList => {
            let repo = env.repo_key()?;
            let state = storage.load().context("Failed to load state")?;
            let entries = todo::list(&state, &repo);
            if entries.is_empty() {
                output::println("no todos to list!", &mut stdout_additional)?;
            }
            for entry in entries {
                output::println(
                    &format!("{}. {}", entry.index, entry.text),
                    &mut stdout_additional,
                )?;
            }
        }
        Command::TodoAdd { text } => {
            let repo = env.repo_key()?;
            let index = storage.update(|state| todo::append(state, &repo, &text))?;
            output::println(&format!("added #{index}"), &mut stdout_additional)?;
        }
        Command::TodoDone { index } => {
            let repo = env.repo_key()?;
            let removed = storage.update(|state| todo::remove_at(state, &repo, index))?;
            output::println(&format!("removed: {removed}"), &mut stdout_additional)?;
        }
        Command::ConfigGet { key } => {
            let state = storage.load().context("Failed to load state")?;
            let value = key.get(&state).unwrap_or_else(|| "(not set)".to_string());
            output::println(&value, &mut stdout_additional)?;
        }
        Command::ConfigSet { key, value } => {
            let current = storage.update(|state| {
                key.set(state, &value)?;
                Ok(key.get(state))
            })?;
            let message = match current {
                Some(value) => format!("{} set to {}", key.as_str(), value),
                None => format!("{} cleared", key.as_str()),
            };
            output::println(&message, &mut stdout_additional)?;
        }
        Command::Help => {
            output::println(USAGE, &mut stdout_additional)?;
        }
        Command::Unknown(reason) => {
            output::println(&reason, &mut stdout_additional)?;
            output::println(
                "Invalid command or arguments. Use help for usage.",
                &mut stdout_additional,
            )?;
        }
    }
    Ok(())
}
