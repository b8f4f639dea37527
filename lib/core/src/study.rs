//! Study requests and the payloads produced for them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which kind of study material to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyMode {
    /// Summary bullets, a three-question quiz and a study tip.
    #[default]
    Default,
    /// A single math word problem.
    Math,
}

impl StudyMode {
    /// Returns the wire name of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Math => "math",
        }
    }
}

impl fmt::Display for StudyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unknown mode name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseModeError {
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown study mode '{}'", self.input)
    }
}

impl std::error::Error for ParseModeError {}

impl FromStr for StudyMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "math" => Ok(Self::Math),
            other => Err(ParseModeError {
                input: other.to_string(),
            }),
        }
    }
}

/// A request to turn encyclopedia text into study material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyRequest {
    /// Trimmed topic name.
    pub topic: String,
    /// Requested mode.
    pub mode: StudyMode,
    /// Encyclopedia-derived source text.
    pub source_text: String,
}

impl StudyRequest {
    /// Creates a request, trimming the topic.
    #[must_use]
    pub fn new(topic: &str, mode: StudyMode, source_text: impl Into<String>) -> Self {
        Self {
            topic: topic.trim().to_string(),
            mode,
            source_text: source_text.into(),
        }
    }
}

/// One multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizItem {
    pub id: i64,
    pub question: String,
    pub choices: [String; 4],
    /// Index of the correct choice, always in `0..=3`.
    pub answer_index: u8,
}

/// Payload for [`StudyMode::Default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultPayload {
    pub summary: [String; 3],
    pub quiz: [QuizItem; 3],
    pub study_tip: String,
}

/// A worked math problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathQuestion {
    pub question: String,
    pub answer: String,
    pub explanation: String,
}

/// Payload for [`StudyMode::Math`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MathPayload {
    pub math_question: MathQuestion,
}

/// Study material for either mode.
///
/// Serializes as the bare payload fields so it can be flattened into a
/// response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StudyContent {
    Default(DefaultPayload),
    Math(MathPayload),
}

impl From<DefaultPayload> for StudyContent {
    fn from(payload: DefaultPayload) -> Self {
        Self::Default(payload)
    }
}

impl From<MathPayload> for StudyContent {
    fn from(payload: MathPayload) -> Self {
        Self::Math(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn quiz_item(id: i64) -> QuizItem {
        QuizItem {
            id,
            question: format!("Question {id}?"),
            choices: ["a".into(), "b".into(), "c".into(), "d".into()],
            answer_index: 2,
        }
    }

    #[test]
    fn mode_parses_known_names() {
        assert_eq!("default".parse::<StudyMode>(), Ok(StudyMode::Default));
        assert_eq!("math".parse::<StudyMode>(), Ok(StudyMode::Math));
        assert!("Math".parse::<StudyMode>().is_err());
        assert!("history".parse::<StudyMode>().is_err());
    }

    #[test]
    fn request_trims_topic() {
        let request = StudyRequest::new("  Photosynthesis \n", StudyMode::Default, "text");
        assert_eq!(request.topic, "Photosynthesis");
    }

    #[test]
    fn default_payload_uses_camel_case_keys() {
        let content = StudyContent::from(DefaultPayload {
            summary: ["one".into(), "two".into(), "three".into()],
            quiz: [quiz_item(1), quiz_item(2), quiz_item(3)],
            study_tip: "Review daily.".into(),
        });

        let value = serde_json::to_value(&content).expect("serialize");
        assert_eq!(value["studyTip"], json!("Review daily."));
        assert_eq!(value["quiz"][0]["answerIndex"], json!(2));
        assert_eq!(value["summary"].as_array().map(Vec::len), Some(3));
        assert!(value.get("mathQuestion").is_none());
    }

    #[test]
    fn math_payload_serializes_bare_fields() {
        let content = StudyContent::from(MathPayload {
            math_question: MathQuestion {
                question: "1 + 1?".into(),
                answer: "2".into(),
                explanation: "Add them.".into(),
            },
        });

        let value = serde_json::to_value(&content).expect("serialize");
        assert_eq!(value["mathQuestion"]["answer"], json!("2"));
        assert!(value.get("summary").is_none());
    }
}
