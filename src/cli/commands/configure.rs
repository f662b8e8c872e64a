//! Configure command handler for editing default settings.

use anyhow::Result;
use inquire::{Select, Text};

use crate::assistant::{DEFAULT_SOURCE, DEFAULT_TARGET, LANGUAGES, Language, find_language};
use crate::config::{AssistConfig, ConfigFile, ConfigManager};
use crate::ui::{Style, handle_prompt_cancellation};

const NONE_OPTION: &str = "(none)";

/// Interactively sets the default provider, model and languages.
pub fn run_configure() -> Result<()> {
    handle_prompt_cancellation(run_configure_inner)
}

fn run_configure_inner() -> Result<()> {
    let manager = ConfigManager::new()?;
    let mut config = manager.load_or_default()?;

    print_current_defaults(&config);

    let mut provider_names: Vec<String> = config.providers.keys().cloned().collect();
    provider_names.sort_unstable();

    let (provider, model) = if provider_names.is_empty() {
        crate::status!(
            "{}\n",
            Style::hint("No providers configured; only languages can be set here.")
        );
        (config.assist.provider.clone(), config.assist.model.clone())
    } else {
        let provider = select_provider(&provider_names, config.assist.provider.as_deref())?;
        let available_models = config
            .providers
            .get(&provider)
            .map(|p| p.models.clone())
            .unwrap_or_default();
        let model = select_model(&available_models, config.assist.model.as_deref())?;
        (Some(provider), model)
    };

    let from = select_language(
        "Default source language:",
        config.assist.from.as_deref(),
        DEFAULT_SOURCE,
    )?;
    let to = select_language(
        "Default target language:",
        config.assist.to.as_deref(),
        DEFAULT_TARGET,
    )?;

    config.assist = AssistConfig {
        provider,
        model,
        from: Some(from.code.to_string()),
        to: Some(to.code.to_string()),
        endpoint: config.assist.endpoint.take(),
    };

    manager.save(&config)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        Style::success("✓"),
        Style::secondary(manager.config_path().display())
    );

    Ok(())
}

fn print_current_defaults(config: &ConfigFile) {
    let show =
        |value: Option<&str>| value.map_or_else(|| Style::secondary("(not set)"), Style::value);

    println!("{}", Style::header("Current defaults"));
    println!(
        "  {}  {}",
        Style::label("provider"),
        show(config.assist.provider.as_deref())
    );
    println!(
        "  {}     {}",
        Style::label("model"),
        show(config.assist.model.as_deref())
    );
    println!(
        "  {}      {}",
        Style::label("from"),
        show(config.assist.from.as_deref())
    );
    println!(
        "  {}        {}",
        Style::label("to"),
        show(config.assist.to.as_deref())
    );
    if let Some(endpoint) = &config.assist.endpoint {
        println!("  {}  {}", Style::label("endpoint"), Style::secondary(endpoint));
    }
    println!();
}

fn select_provider(providers: &[String], default: Option<&str>) -> Result<String> {
    let default_index = default
        .and_then(|d| providers.iter().position(|p| p == d))
        .unwrap_or(0);

    let selection = Select::new("Default provider:", providers.to_vec())
        .with_starting_cursor(default_index)
        .prompt()?;

    Ok(selection)
}

/// Picks a model from the provider's list, or asks for a name when none are listed.
///
/// An empty answer leaves the model unset so the provider's first model is used.
fn select_model(available_models: &[String], default: Option<&str>) -> Result<Option<String>> {
    if available_models.is_empty() {
        let mut prompt = Text::new("Default model:").with_help_message("Enter the model name");
        if let Some(d) = default {
            prompt = prompt.with_default(d);
        }

        let model = prompt.prompt()?;
        let model = model.trim();
        return Ok((!model.is_empty()).then(|| model.to_string()));
    }

    let mut options = vec![NONE_OPTION.to_string()];
    options.extend(available_models.iter().cloned());

    let default_index = default
        .and_then(|d| available_models.iter().position(|m| m == d))
        .map_or(0, |i| i + 1);

    let selection = Select::new("Default model:", options)
        .with_starting_cursor(default_index)
        .with_help_message("(none) uses the provider's first model")
        .prompt()?;

    Ok((selection != NONE_OPTION).then_some(selection))
}

fn select_language(message: &str, current: Option<&str>, fallback: Language) -> Result<Language> {
    let options: Vec<String> = LANGUAGES.iter().map(language_option).collect();

    let current = current.and_then(find_language).unwrap_or(fallback);
    let default_index = LANGUAGES.iter().position(|l| *l == current).unwrap_or(0);

    let selection = Select::new(message, options)
        .with_starting_cursor(default_index)
        .prompt()?;

    // Options are built from LANGUAGES, so the code always resolves.
    let code = selection.split(" - ").next().unwrap_or(&selection);
    Ok(find_language(code).unwrap_or(fallback))
}

fn language_option(language: &Language) -> String {
    format!("{} - {}", language.code, language.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_options_round_trip_to_codes() {
        for language in LANGUAGES {
            let option = language_option(language);
            let code = option.split(" - ").next().unwrap_or(&option);
            assert_eq!(find_language(code), Some(*language));
        }
    }
}
