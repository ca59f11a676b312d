use crate::llm::ChatMessage;

const HEADLINE_SYSTEM: &str = "You are a journalist writing a news headline. \
Include only content, no explanation. Include subtle random biases and opinions. \
Do not ask follow-up questions or include annotations or parentheses.";

const DESCRIPTION_SYSTEM: &str = "You are a journalist writing a news description based off of a headline. \
Include only content, no explanation. Include subtle random biases and opinions. \
Do not ask follow-up questions or include annotations or parentheses.";

/// Conversation asking for one headline about `seed`.
pub fn headline_prompt(seed: &str) -> Vec<ChatMessage> {
    let seed = seed.trim();
    let request = if seed.is_empty() {
        "generate a single random news headline?".to_string()
    } else {
        format!("generate a single random {} news headline?", seed)
    };
    vec![ChatMessage::system(HEADLINE_SYSTEM), ChatMessage::user(request)]
}

/// Conversation asking for a story to go with `headline`.
pub fn description_prompt(headline: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(DESCRIPTION_SYSTEM),
        ChatMessage::user(format!(
            "generate a single random news story based on the headline \"{}\"?",
            headline
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;

    #[test]
    fn headline_prompt_mentions_seed() {
        let messages = headline_prompt("space");
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].content, "generate a single random space news headline?");
        assert_eq!(headline_prompt(" ")[1].content, "generate a single random news headline?");
    }

    #[test]
    fn description_prompt_quotes_headline() {
        let messages = description_prompt("Rover finds water");
        assert!(messages[1].content.contains("\"Rover finds water\""));
    }
}
