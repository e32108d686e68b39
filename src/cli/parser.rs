use crate::config::ConfigKey;

/// Enum representing CLI commands
#[derive(Debug, PartialEq)]
pub enum Command {
    Create,
    Edit,
    Show,
    Reset,
    Issues,
    TodoList,
    TodoAdd { text: String },
    TodoDone { index: usize },
    ConfigGet { key: ConfigKey },
    ConfigSet { key: ConfigKey, value: String },
    Help,
    Unknown(String),
}

/// Valid todo subcommands
const VALID_TODO_SUBCOMMANDS: &[&str] = &["list", "add", "done"];

/// Parse command line arguments and return a Command
///
/// # Arguments
/// * `args` - Command line arguments (including program name)
///
/// # Returns
/// * `Command` - The parsed command
pub fn parse_args(args: &[String]) -> Command {
    let words: Vec<&str> = args.iter().skip(1).map(String::as_str).collect();
    match words.as_slice() {
        [] | ["help"] => Command::Help,
        ["create"] => Command::Create,
        ["edit"] => Command::Edit,
        ["show"] => Command::Show,
        ["reset"] => Command::Reset,
        ["issues"] => Command::Issues,
        ["todo"] | ["todo", "list"] => Command::TodoList,
        ["todo", "add"] => Command::Unknown(
            "Missing todo text. Usage: focus todo add <text>".to_string(),
        ),
        ["todo", "add", text @ ..] => Command::TodoAdd {
            text: text.join(" "),
        },
        ["todo", "done"] => Command::Unknown(
            "Missing todo number. Usage: focus todo done <number>".to_string(),
        ),
        ["todo", "done", number] => match number.parse::<usize>() {
            Ok(index) => Command::TodoDone { index },
            Err(_) => Command::Unknown(format!("Invalid todo number: {number}")),
        },
        ["todo", sub_cmd, ..] if !VALID_TODO_SUBCOMMANDS.contains(sub_cmd) => {
            Command::Unknown(format!("todo {sub_cmd}"))
        }
        ["config", name, rest @ ..] if rest.len() <= 1 => match ConfigKey::from_name(name) {
            Some(key) => match rest.first() {
                Some(value) => Command::ConfigSet {
                    key,
                    value: value.to_string(),
                },
                None => Command::ConfigGet { key },
            },
            None => Command::Unknown(format!(
                "Unknown config key: {name}. Valid keys: {}",
                ConfigKey::all()
                    .iter()
                    .map(ConfigKey::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        },
        [cmd, ..] => Command::Unknown(cmd.to_string()),
    }
}
