use crate::error::FocusError;
use crate::state::{ApplicationState, RepoKey};
use tracing::debug;

/// A todo as listed: its current 1-based position and text
#[derive(Debug, Clone, PartialEq)]
pub struct TodoEntry {
    pub index: usize,
    pub text: String,
}

/// Appends `text` to the todos of `repo` and returns its index.
pub fn append(
    state: &mut ApplicationState,
    repo: &RepoKey,
    text: &str,
) -> Result<usize, FocusError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(FocusError::InvalidArgs("todo text is empty".to_string()));
    }

    let todos = state.todos.entry(repo.clone()).or_default();
    todos.push(text.to_string());
    debug!(repo = %repo, index = todos.len(), "todo appended");
    Ok(todos.len())
}

pub fn list(state: &ApplicationState, repo: &RepoKey) -> Vec<TodoEntry> {
    state
        .todos
        .get(repo)
        .map(|todos| {
            todos
                .iter()
                .enumerate()
                .map(|(i, text)| TodoEntry {
                    index: i + 1,
                    text: text.clone(),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Removes the todo at the 1-based `index` and returns its text.
///
/// Later todos shift down by one. `0` is invalid and an index past the end is
/// not found; in both cases the state is left untouched.
pub fn remove_at(
    state: &mut ApplicationState,
    repo: &RepoKey,
    index: usize,
) -> Result<String, FocusError> {
    if index == 0 {
        return Err(FocusError::InvalidArgs("todo indices start at 1".to_string()));
    }

    let todos = state
        .todos
        .get_mut(repo)
        .filter(|todos| index <= todos.len())
        .ok_or_else(|| FocusError::NotFound(format!("no todo #{index} for {repo}")))?;

    let removed = todos.remove(index - 1);
    if todos.is_empty() {
        state.todos.remove(repo);
    }
    debug!(repo = %repo, index, "todo removed");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(entries: &[TodoEntry]) -> Vec<(usize, &str)> {
        entries.iter().map(|e| (e.index, e.text.as_str())).collect()
    }

    #[test]
    fn test_append_list_remove_lifecycle() {
        let mut state = ApplicationState::default();
        let repo = RepoKey::from("repoA");

        append(&mut state, &repo, "buy milk").unwrap();
        append(&mut state, &repo, "write tests").unwrap();
        assert_eq!(
            texts(&list(&state, &repo)),
            vec![(1, "buy milk"), (2, "write tests")]
        );

        let removed = remove_at(&mut state, &repo, 1).unwrap();

        assert_eq!(removed, "buy milk");
        assert_eq!(texts(&list(&state, &repo)), vec![(1, "write tests")]);
    }

    #[test]
    fn test_repos_are_isolated() {
        let mut state = ApplicationState::default();
        let repo_a = RepoKey::from("repoA");
        let repo_b = RepoKey::from("repoB");
        append(&mut state, &repo_b, "b stays").unwrap();

        append(&mut state, &repo_a, "a1").unwrap();
        append(&mut state, &repo_a, "a2").unwrap();
        remove_at(&mut state, &repo_a, 2).unwrap();

        assert_eq!(texts(&list(&state, &repo_b)), vec![(1, "b stays")]);
        assert_eq!(texts(&list(&state, &repo_a)), vec![(1, "a1")]);
    }

    #[test]
    fn test_unknown_repo_lists_empty() {
        let state = ApplicationState::default();

        assert!(list(&state, &RepoKey::from("nowhere")).is_empty());
    }

    #[test]
    fn test_append_returns_index_and_trims() {
        let mut state = ApplicationState::default();
        let repo = RepoKey::from("repoA");

        assert_eq!(append(&mut state, &repo, "  first ").unwrap(), 1);
        assert_eq!(append(&mut state, &repo, "second").unwrap(), 2);
        assert_eq!(list(&state, &repo)[0].text, "first");
    }

    #[test]
    fn test_blank_text_rejected() {
        let mut state = ApplicationState::default();

        let err = append(&mut state, &RepoKey::from("repoA"), "   ").unwrap_err();

        assert!(matches!(err, FocusError::InvalidArgs(_)));
        assert!(state.todos.is_empty());
    }

    #[test]
    fn test_remove_out_of_range_is_not_found() {
        let mut state = ApplicationState::default();
        let repo = RepoKey::from("repoA");
        append(&mut state, &repo, "only").unwrap();
        let before = state.clone();

        let err = remove_at(&mut state, &repo, 2).unwrap_err();

        assert!(matches!(err, FocusError::NotFound(_)));
        assert_eq!(state, before);
    }

    #[test]
    fn test_remove_zero_is_invalid() {
        let mut state = ApplicationState::default();
        let repo = RepoKey::from("repoA");
        append(&mut state, &repo, "only").unwrap();

        let err = remove_at(&mut state, &repo, 0).unwrap_err();

        assert!(matches!(err, FocusError::InvalidArgs(_)));
        assert_eq!(list(&state, &repo).len(), 1);
    }

    #[test]
    fn test_remove_from_unknown_repo_is_not_found() {
        let mut state = ApplicationState::default();

        let err = remove_at(&mut state, &RepoKey::from("nowhere"), 1).unwrap_err();

        assert!(matches!(err, FocusError::NotFound(_)));
    }

    #[test]
    fn test_removing_last_todo_drops_repo_entry() {
        let mut state = ApplicationState::default();
        let repo = RepoKey::from("repoA");
        append(&mut state, &repo, "only").unwrap();

        remove_at(&mut state, &repo, 1).unwrap();

        assert!(!state.todos.contains_key(&repo));
    }
}
