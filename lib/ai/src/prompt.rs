//! Prompt templates for study material generation.
//!
//! Each mode has a template with a system prompt and a user prompt;
//! `{{variable}}` placeholders are filled in by [`PromptTemplate::render`].

use std::collections::HashMap;
use study_assistant_core::StudyMode;

const DEFAULT_SYSTEM: &str =
    "Return JSON only. Use only keys: status, topic, summary, quiz, studyTip.";

const DEFAULT_USER: &str = r#"Topic: "{{topic}}"
Here is topic text: "{{source_text}}"
Task: Create:
- summary: array of 3 short bullets (<=20 words each) covering different aspects of the topic
- quiz: array of 3 diverse MCQs that test different aspects of the topic. Each question should be unique, specific to the topic content, and test understanding rather than just recognition. Format: {id:int, question:string (specific to topic), choices:[4 strings where only one is correct and others are plausible distractors], answerIndex:int (0-3)}
- studyTip: one short sentence (<=15 words)

IMPORTANT: Questions must be diverse and topic-specific. Avoid generic template questions. Base questions on actual content from the topic text.
Return valid JSON only."#;

const MATH_SYSTEM: &str = "Return JSON only. Use keys: status, topic, mathQuestion.";

const MATH_USER: &str = r#"Topic: "{{topic}}"
Here is topic text: "{{source_text}}"
Task: Create a single math/logic question relevant to the topic with {question:string, answer:string, explanation:string (step-by-step)}
Return valid JSON only."#;

/// A system/user prompt pair ready to send to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPrompt {
    pub system: String,
    pub user: String,
}

/// A prompt template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    /// System prompt; may contain placeholders.
    pub system_prompt: &'static str,
    /// User prompt with placeholders.
    pub content: &'static str,
}

impl PromptTemplate {
    /// Returns the template for a mode.
    #[must_use]
    pub const fn for_mode(mode: StudyMode) -> Self {
        match mode {
            StudyMode::Default => Self {
                system_prompt: DEFAULT_SYSTEM,
                content: DEFAULT_USER,
            },
            StudyMode::Math => Self {
                system_prompt: MATH_SYSTEM,
                content: MATH_USER,
            },
        }
    }

    /// Renders both prompts with the given variables.
    ///
    /// Variables are substituted using `{{variable_name}}` syntax. Values
    /// are inserted verbatim and never re-scanned for placeholders.
    #[must_use]
    pub fn render(&self, variables: &HashMap<&str, &str>) -> GenerationPrompt {
        GenerationPrompt {
            system: substitute(self.system_prompt, variables),
            user: substitute(self.content, variables),
        }
    }
}

fn substitute(template: &str, variables: &HashMap<&str, &str>) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        result.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        match after_open.find("}}") {
            Some(end) => {
                let name = &after_open[..end];
                match variables.get(name) {
                    Some(value) => result.push_str(value),
                    None => {
                        result.push_str("{{");
                        result.push_str(name);
                        result.push_str("}}");
                    }
                }
                rest = &after_open[end + 2..];
            }
            None => {
                result.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    result.push_str(rest);
    result
}

/// Builds the prompt pair for a study request.
///
/// Pure: identical inputs always produce identical prompts. The source text
/// is embedded trimmed but otherwise verbatim.
#[must_use]
pub fn build_prompt(mode: StudyMode, topic: &str, source_text: &str) -> GenerationPrompt {
    let variables = HashMap::from([("topic", topic.trim()), ("source_text", source_text.trim())]);
    PromptTemplate::for_mode(mode).render(&variables)
}
