use inquire::autocompletion::{Autocomplete, Replacement};

// Available slash commands: (command, description)
const SLASH_COMMANDS: &[(&str, &str)] = &[
    ("/select", "Highlight a passage in the page"),
    ("/clear", "Clear the selected passage"),
    ("/lang", "Show or change the preferred language"),
    ("/translate", "Translate an answer to the preferred language"),
    ("/original", "Show an answer's original text"),
    ("/history", "Show the conversation"),
    ("/config", "Show current configuration"),
    ("/help", "Show available commands"),
    ("/quit", "Exit chat mode"),
];

/// Slash command autocompleter
#[derive(Clone, Default)]
pub struct SlashCommandCompleter;

impl Autocomplete for SlashCommandCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, inquire::CustomUserError> {
        // Only the command word is completed; arguments are free text
        if !input.starts_with('/') || input.contains(char::is_whitespace) {
            return Ok(vec![]);
        }

        let suggestions: Vec<String> = SLASH_COMMANDS
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(input))
            .map(|(cmd, desc)| format!("{cmd}  {desc}"))
            .collect();

        Ok(suggestions)
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, inquire::CustomUserError> {
        let replacement =
            highlighted_suggestion.map(|s| s.split_whitespace().next().unwrap_or("").to_string());
        Ok(replacement)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    /// Highlight the given passage inside the document content.
    Select(String),
    Clear,
    /// Change the preferred language, or show it when no code is given.
    Lang(Option<String>),
    /// Translate message `n`, or the latest translatable answer.
    Translate(Option<usize>),
    /// Show the original text of message `n`, or the latest translated answer.
    Original(Option<usize>),
    History,
    Config,
    Help,
    Quit,
    /// A known command with unusable arguments, carrying its usage line.
    Usage(&'static str),
    Unknown(String),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Text(String),
    Command(SlashCommand),
    Empty,
}

pub fn parse_input(input: &str) -> Input {
    let input = input.trim();

    if input.is_empty() {
        return Input::Empty;
    }

    input
        .strip_prefix('/')
        .map_or_else(|| Input::Text(input.to_string()), parse_slash_command)
}

fn parse_slash_command(cmd: &str) -> Input {
    let (name, rest) = cmd
        .split_once(char::is_whitespace)
        .map_or((cmd, ""), |(name, rest)| (name, rest.trim()));

    let command = match name {
        "select" if rest.is_empty() => SlashCommand::Usage("/select <passage>"),
        "select" => SlashCommand::Select(rest.to_string()),
        "clear" => SlashCommand::Clear,
        "lang" => SlashCommand::Lang((!rest.is_empty()).then(|| rest.to_string())),
        "translate" => parse_index(rest)
            .map_or(SlashCommand::Usage("/translate [message number]"), SlashCommand::Translate),
        "original" => parse_index(rest)
            .map_or(SlashCommand::Usage("/original [message number]"), SlashCommand::Original),
        "history" => SlashCommand::History,
        "config" => SlashCommand::Config,
        "help" => SlashCommand::Help,
        "quit" | "exit" | "q" => SlashCommand::Quit,
        _ => SlashCommand::Unknown(cmd.to_string()),
    };

    Input::Command(command)
}

/// `Some(None)` for no argument, `None` for an argument that is not a number.
fn parse_index(arg: &str) -> Option<Option<usize>> {
    if arg.is_empty() {
        return Some(None);
    }
    arg.parse().ok().map(Some)
}
