use anyhow::Result;
use inquire::Text;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};
use std::path::Path;

use super::command::{Input, SlashCommand, SlashCommandCompleter, parse_input};
use super::ui;
use crate::assistant::{Session, SubmitOutcome, validate_language};
use crate::clipboard::copy_to_clipboard;
use crate::error::AssistError;
use crate::ui::{CtrlCCancel, Style, TerminalView};

/// An interactive assistant session.
///
/// Owns the [`Session`] for the lifetime of the REPL, so languages and the
/// last answer carry over between topics.
pub struct ChatSession {
    session: Session,
}

impl ChatSession {
    pub const fn new(session: Session) -> Self {
        Self { session }
    }

    pub const fn session(&self) -> &Session {
        &self.session
    }

    pub async fn run(&mut self) -> Result<()> {
        ui::print_header(self.session.state());

        let prompt_style = Styled::new("❯")
            .with_fg(Color::LightBlue)
            .with_attr(Attributes::BOLD);
        let mut render_config = RenderConfig::default()
            .with_prompt_prefix(prompt_style)
            .with_answered_prompt_prefix(prompt_style);
        render_config.option = StyleSheet::new().with_fg(Color::Grey);
        render_config.selected_option = Some(StyleSheet::new().with_fg(Color::DarkMagenta));

        loop {
            // No prompt is shown while an answer streams; submit() returns first.
            let input = Text::new("")
                .with_render_config(render_config)
                .with_autocomplete(SlashCommandCompleter)
                .with_help_message("Type a topic, /help for commands, Ctrl+C to quit")
                .prompt();

            match input {
                Ok(line) => match parse_input(&line) {
                    Input::Command(cmd) => {
                        if !self.handle_command(cmd) {
                            break;
                        }
                    }
                    Input::Topic(topic) => self.ask(topic).await,
                },
                Err(
                    inquire::InquireError::OperationCanceled
                    | inquire::InquireError::OperationInterrupted,
                ) => {
                    println!();
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        ui::print_goodbye();
        Ok(())
    }

    /// Submits one topic. Request failures are reported and the REPL continues.
    async fn ask(&mut self, topic: String) {
        self.session.set_topic(topic);

        let interrupt = CtrlCCancel::arm();
        let mut view = TerminalView::new();
        let result = self.session.submit(&mut view, interrupt.token()).await;
        drop(interrupt);

        match result {
            Ok(SubmitOutcome::Completed { .. }) => println!(),
            Ok(SubmitOutcome::Cancelled { .. }) => {
                crate::status!("{}\n", Style::warning("Cancelled."));
            }
            Ok(SubmitOutcome::NeedsTopic | SubmitOutcome::Busy) => {}
            Err(e @ AssistError::Stream(_)) => {
                ui::print_error(&format!("{e}. The answer above is incomplete."));
            }
            Err(e) => ui::print_error(&e.to_string()),
        }
    }

    /// Returns `false` when the session should end.
    fn handle_command(&mut self, cmd: SlashCommand) -> bool {
        match cmd {
            SlashCommand::From(value) => self.set_language(value.as_deref(), true),
            SlashCommand::To(value) => self.set_language(value.as_deref(), false),
            SlashCommand::Swap => {
                self.session.swap_languages();
                let state = self.session.state();
                ui::print_success(&format!(
                    "Now {} → {}",
                    Style::value(state.source_language.name),
                    Style::value(state.target_language.name)
                ));
            }
            SlashCommand::Copy => match copy_to_clipboard(&self.session.state().result_text) {
                Ok(()) => ui::print_success("Copied to clipboard"),
                Err(e) => ui::print_error(&format!("{e:#}")),
            },
            SlashCommand::Save(None) => ui::print_error("Usage: /save <file>"),
            SlashCommand::Save(Some(path)) => self.save(Path::new(&path)),
            SlashCommand::Config => {
                ui::print_config(self.session.state(), &self.session.transport().describe());
            }
            SlashCommand::Help => ui::print_help(),
            SlashCommand::Quit => return false,
            SlashCommand::Unknown(cmd) => {
                ui::print_error(&format!("Unknown command: /{cmd}"));
            }
        }
        true
    }

    fn set_language(&mut self, value: Option<&str>, source: bool) {
        let usage = if source { "/from" } else { "/to" };
        let Some(input) = value else {
            ui::print_error(&format!("Usage: {usage} <language>"));
            return;
        };

        let language = match validate_language(input) {
            Ok(language) => language,
            Err(e) => {
                ui::print_error(&e.to_string());
                return;
            }
        };

        if source {
            self.session.set_source_language(language);
            ui::print_success(&format!("Source language set to {}", Style::value(language)));
        } else {
            self.session.set_target_language(language);
            ui::print_success(&format!("Target language set to {}", Style::value(language)));
        }
    }

    fn save(&self, path: &Path) {
        let text = &self.session.state().result_text;
        if text.is_empty() {
            ui::print_error("Nothing to save yet");
            return;
        }

        match crate::fs::save_result(path, text) {
            Ok(()) => ui::print_success(&format!("Saved to {}", Style::value(path.display()))),
            Err(e) => ui::print_error(&format!("{e:#}")),
        }
    }
}
