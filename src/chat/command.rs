use inquire::autocompletion::{Autocomplete, Replacement};

// (command, description)
pub const SLASH_COMMANDS: &[(&str, &str)] = &[
    ("/from", "Set the language the topic is about"),
    ("/to", "Set the language of the answer"),
    ("/swap", "Swap source and target languages"),
    ("/copy", "Copy the last answer to the clipboard"),
    ("/save", "Save the last answer to a file"),
    ("/config", "Show current configuration"),
    ("/help", "Show available commands"),
    ("/quit", "Exit chat mode"),
];

#[derive(Clone, Default)]
pub struct SlashCommandCompleter;

impl Autocomplete for SlashCommandCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, inquire::CustomUserError> {
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
    From(Option<String>),
    To(Option<String>),
    Swap,
    Copy,
    Save(Option<String>),
    Config,
    Help,
    Quit,
    Unknown(String),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    /// Anything that is not a slash command, including an empty line.
    Topic(String),
    Command(SlashCommand),
}

/// Classifies one line of chat input.
///
/// Topics are passed through untouched; only slash commands are trimmed.
pub fn parse_input(line: &str) -> Input {
    line.trim()
        .strip_prefix('/')
        .map_or_else(|| Input::Topic(line.to_string()), parse_slash_command)
}

fn parse_slash_command(cmd: &str) -> Input {
    let (name, rest) = cmd
        .split_once(char::is_whitespace)
        .map_or((cmd, ""), |(name, rest)| (name, rest.trim()));
    let arg = (!rest.is_empty()).then(|| rest.to_string());

    let command = match name {
        "from" => SlashCommand::From(arg),
        "to" => SlashCommand::To(arg),
        "swap" => SlashCommand::Swap,
        "copy" => SlashCommand::Copy,
        "save" => SlashCommand::Save(arg),
        "config" => SlashCommand::Config,
        "help" | "?" => SlashCommand::Help,
        "quit" | "exit" | "q" => SlashCommand::Quit,
        _ => SlashCommand::Unknown(cmd.to_string()),
    };
    Input::Command(command)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_line_is_empty_topic() {
        assert_eq!(parse_input(""), Input::Topic(String::new()));
        assert_eq!(parse_input("   "), Input::Topic("   ".to_string()));
    }

    #[test]
    fn test_parse_topic_is_verbatim() {
        assert_eq!(
            parse_input("  French cuisine "),
            Input::Topic("  French cuisine ".to_string())
        );
    }

    #[test]
    fn test_parse_language_commands() {
        assert_eq!(
            parse_input("/from French"),
            Input::Command(SlashCommand::From(Some("French".to_string())))
        );
        assert_eq!(
            parse_input("/to   ja  "),
            Input::Command(SlashCommand::To(Some("ja".to_string())))
        );
        assert_eq!(parse_input("/to"), Input::Command(SlashCommand::To(None)));
        assert_eq!(parse_input("/swap"), Input::Command(SlashCommand::Swap));
    }

    #[test]
    fn test_parse_language_name_with_space() {
        assert_eq!(
            parse_input("/to Chinese (Traditional)"),
            Input::Command(SlashCommand::To(Some("Chinese (Traditional)".to_string())))
        );
    }

    #[test]
    fn test_parse_result_commands() {
        assert_eq!(parse_input("/copy"), Input::Command(SlashCommand::Copy));
        assert_eq!(
            parse_input("/save notes/answer.md"),
            Input::Command(SlashCommand::Save(Some("notes/answer.md".to_string())))
        );
        assert_eq!(parse_input("/save"), Input::Command(SlashCommand::Save(None)));
    }

    #[test]
    fn test_parse_quit_aliases() {
        for line in ["/quit", "/exit", "/q", "  /quit  "] {
            assert_eq!(parse_input(line), Input::Command(SlashCommand::Quit));
        }
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(
            parse_input("/unknown thing"),
            Input::Command(SlashCommand::Unknown("unknown thing".to_string()))
        );
    }

    #[test]
    fn test_completer_no_suggestions_for_topics() {
        let mut completer = SlashCommandCompleter;
        assert!(completer.get_suggestions("subjunctive").unwrap().is_empty());
        assert!(completer.get_suggestions("/to ja").unwrap().is_empty());
    }

    #[test]
    fn test_completer_suggests_all_for_slash() {
        let mut completer = SlashCommandCompleter;
        let suggestions = completer.get_suggestions("/").unwrap();
        assert_eq!(suggestions.len(), SLASH_COMMANDS.len());
    }

    #[test]
    fn test_completer_filters_by_prefix() {
        let mut completer = SlashCommandCompleter;

        let suggestions = completer.get_suggestions("/s").unwrap();
        assert_eq!(suggestions.len(), 2);
        assert!(suggestions[0].starts_with("/swap"));
        assert!(suggestions[1].starts_with("/save"));

        let suggestions = completer.get_suggestions("/f").unwrap();
        assert_eq!(suggestions.len(), 1);
        assert!(suggestions[0].starts_with("/from"));
    }

    #[test]
    fn test_completer_completion() {
        let mut completer = SlashCommandCompleter;
        let suggestion = "/swap  Swap source and target languages".to_string();
        let completion = completer.get_completion("/sw", Some(suggestion)).unwrap();
        assert_eq!(completion, Some("/swap".to_string()));
        assert!(completer.get_completion("/x", None).unwrap().is_none());
    }
}
