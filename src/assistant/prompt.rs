pub const PROMPT_TEMPLATE: &str = "Hi ChatGPT, I need your help with a translation and explanation \
     about a specific topic from the language {source}. The topic is {topic}, \
     and I need a thorough explanation in {target}.";

/// Fills the prompt template with the user's topic and language names.
///
/// Values are substituted verbatim: the topic is neither trimmed nor escaped.
#[allow(clippy::literal_string_with_formatting_args)]
pub fn build_prompt(topic: &str, source: &str, target: &str) -> String {
    // {source}/{topic}/{target} are placeholders for string replacement, not format arguments.
    // Languages are substituted before the topic so that a topic containing a
    // placeholder is left as the user typed it.
    let (head, tail) = PROMPT_TEMPLATE
        .split_once("{topic}")
        .unwrap_or((PROMPT_TEMPLATE, ""));

    let mut prompt = head.replace("{source}", source).replace("{target}", target);
    if !tail.is_empty() {
        prompt.push_str(topic);
        prompt.push_str(&tail.replace("{source}", source).replace("{target}", target));
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_prompt_exact_text() {
        let prompt = build_prompt("French cuisine", "Spanish", "English");
        assert_eq!(
            prompt,
            "Hi ChatGPT, I need your help with a translation and explanation about a specific \
             topic from the language Spanish. The topic is French cuisine, and I need a thorough \
             explanation in English."
        );
    }

    #[test]
    fn test_build_prompt_keeps_topic_verbatim() {
        let prompt = build_prompt("  tapas, \"pintxos\"\n", "Spanish", "Japanese");
        assert!(prompt.contains("The topic is   tapas, \"pintxos\"\n, and"));
        assert!(prompt.ends_with("explanation in Japanese."));
    }

    #[test]
    fn test_build_prompt_does_not_expand_placeholders_in_topic() {
        let prompt = build_prompt("{target}", "German", "French");
        assert!(prompt.contains("The topic is {target}, and"));
        assert!(prompt.contains("from the language German."));
    }

    #[test]
    fn test_prompt_template_has_placeholders() {
        assert!(PROMPT_TEMPLATE.contains("{topic}"));
        assert!(PROMPT_TEMPLATE.contains("{source}"));
        assert!(PROMPT_TEMPLATE.contains("{target}"));
    }
}
