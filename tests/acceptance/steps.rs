use crate::FocusWorld;
use cucumber::gherkin::Step;
use cucumber::{given, then, when};
use focus::config::Paths;
use focus::error::{ErrorKind, FocusError};
use focus::run::RunEnv;
use focus::state::RepoKey;
use std::path::PathBuf;

fn focus_home(world: &mut FocusWorld) -> PathBuf {
    world
        .home
        .get_or_insert_with(|| tempfile::tempdir().expect("Failed to create focus home"))
        .path()
        .to_path_buf()
}

fn paths(world: &mut FocusWorld) -> Paths {
    Paths::under(focus_home(world))
}

fn docstring(step: &Step) -> String {
    step.docstring
        .as_ref()
        .expect("Expected docstring")
        .trim()
        .to_string()
}

fn captured(world: &FocusWorld) -> String {
    String::from_utf8(world.captured_output.clone()).expect("Invalid UTF-8")
}

#[given(regex = r#"^I am working in repository "([^"]*)"$"#)]
async fn given_repository(world: &mut FocusWorld, repo: String) {
    focus_home(world);
    world.repo = Some(repo);
}

#[given("the draft file contains:")]
async fn given_draft_file_contains(world: &mut FocusWorld, step: &Step) {
    let path = paths(world).draft_file;
    std::fs::write(&path, docstring(step))
        .unwrap_or_else(|e| panic!("Failed to write draft {:?}: {}", path, e));
}

#[given("the state file contains:")]
async fn given_state_file_contains(world: &mut FocusWorld, step: &Step) {
    let path = paths(world).state_file;
    std::fs::write(&path, docstring(step))
        .unwrap_or_else(|e| panic!("Failed to write state {:?}: {}", path, e));
}

#[when(regex = r"^I run `focus(.*)`$")]
async fn when_run_focus(world: &mut FocusWorld, command_line: String) {
    let args: Vec<String> = std::iter::once("focus")
        .chain(command_line.split_whitespace())
        .map(str::to_string)
        .collect();
    let env = RunEnv {
        paths: Some(paths(world)),
        repo: world.repo.clone().map(RepoKey::new),
    };

    let mut buffer: Vec<u8> = Vec::new();
    let writer_option: Option<&mut dyn std::io::Write> = Some(&mut buffer);
    let result = focus::run::run(args, writer_option, Some(env));

    world.captured_output = buffer;
    world.run_result = Some(result);
}

fn assert_succeeded(world: &FocusWorld) {
    match &world.run_result {
        Some(Ok(())) => {}
        Some(Err(err)) => panic!("Command failed: {err:#}"),
        None => panic!("No command was run"),
    }
}

#[then(regex = r#"^the output should be "(.*)"$"#)]
async fn then_output_should_be(world: &mut FocusWorld, expected_output: String) {
    assert_succeeded(world);
    let output = captured(world);
    assert_eq!(
        output.trim_end(),
        expected_output,
        "Expected output '{}', but got:\n---\n{}\n---",
        expected_output,
        output.trim_end()
    );
}

#[then("the output should be:")]
async fn then_output_should_be_block(world: &mut FocusWorld, step: &Step) {
    assert_succeeded(world);
    let expected = docstring(step);
    let output = captured(world);
    assert_eq!(
        output.trim_end(),
        expected,
        "Expected output:\n---\n{}\n---\nbut got:\n---\n{}\n---",
        expected,
        output.trim_end()
    );
}

#[then(regex = r"^the output should match '(.*)'$")]
async fn then_output_should_match(world: &mut FocusWorld, pattern: String) {
    assert_succeeded(world);
    let re = regex::Regex::new(&pattern).expect("Invalid pattern in feature file");
    let output = captured(world);
    assert!(
        re.is_match(&output),
        "Pattern '{}' not found in output:\n{}",
        pattern,
        output
    );
}

#[then(regex = r"^the command should fail with a (validation|not found|io) error$")]
async fn then_command_should_fail(world: &mut FocusWorld, kind: String) {
    let expected = match kind.as_str() {
        "validation" => ErrorKind::Validation,
        "not found" => ErrorKind::NotFound,
        _ => ErrorKind::Io,
    };
    let err = match world.run_result.take() {
        Some(Err(err)) => err,
        Some(Ok(())) => panic!("Command should have failed but succeeded"),
        None => panic!("No command was run"),
    };
    let focus_err = err
        .downcast_ref::<FocusError>()
        .unwrap_or_else(|| panic!("Expected a focus error, got: {err:#}"));
    assert_eq!(focus_err.kind(), expected, "Unexpected error: {focus_err}");
}

#[then(regex = r#"^the draft file should contain "(.*)"$"#)]
async fn then_draft_should_contain(world: &mut FocusWorld, expected: String) {
    let path = paths(world).draft_file;
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read draft {:?}: {}", path, e));
    assert!(
        content.contains(&expected),
        "Expected draft to contain '{}', but got:\n---\n{}\n---",
        expected,
        content
    );
}

#[then(regex = r#"^repository "([^"]*)" should have (\d+) todos? stored$"#)]
async fn then_repository_should_have_todos(world: &mut FocusWorld, repo: String, count: usize) {
    let path = paths(world).state_file;
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read state {:?}: {}", path, e));
    let state: focus::state::ApplicationState =
        serde_json::from_str(&content).expect("State file should be valid JSON");
    let stored = state
        .todos
        .get(&RepoKey::new(repo.clone()))
        .map(Vec::len)
        .unwrap_or(0);
    assert_eq!(stored, count, "Unexpected todo count for {repo}");
}
