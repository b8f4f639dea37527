//! Strict validation of model output.
//!
//! Model JSON is untrusted. Validation rejects on the first mismatch and
//! never coerces: a numeric string is not a number, a fractional number is
//! not an integer. Whole-valued decimals such as `2.0` do count as integers.
//! Keys the schema does not name are dropped.

use crate::error::SchemaViolation;
use serde_json::Value as JsonValue;
use study_assistant_core::{
    DefaultPayload, MathPayload, MathQuestion, QuizItem, StudyContent, StudyMode,
};

/// Validates parsed model output for a mode and returns the typed payload.
///
/// # Errors
///
/// Returns the first [`SchemaViolation`] found.
pub fn validate(mode: StudyMode, value: &JsonValue) -> Result<StudyContent, SchemaViolation> {
    match mode {
        StudyMode::Default => validate_default(value).map(StudyContent::Default),
        StudyMode::Math => validate_math(value).map(StudyContent::Math),
    }
}

fn validate_default(value: &JsonValue) -> Result<DefaultPayload, SchemaViolation> {
    let summary = string_array::<3>(value.get("summary"), "summary")?;

    let quiz = value
        .get("quiz")
        .and_then(JsonValue::as_array)
        .filter(|items| items.len() == 3)
        .ok_or_else(|| SchemaViolation::new("quiz", "an array of exactly 3 items"))?;
    let quiz = [
        quiz_item(&quiz[0], 0)?,
        quiz_item(&quiz[1], 1)?,
        quiz_item(&quiz[2], 2)?,
    ];

    let study_tip = value
        .get("studyTip")
        .and_then(JsonValue::as_str)
        .filter(|tip| !tip.trim().is_empty())
        .ok_or_else(|| SchemaViolation::new("studyTip", "a non-empty string"))?;

    Ok(DefaultPayload {
        summary,
        quiz,
        study_tip: study_tip.to_string(),
    })
}

fn quiz_item(value: &JsonValue, index: usize) -> Result<QuizItem, SchemaViolation> {
    let field = |name: &str| format!("quiz[{index}].{name}");

    if !value.is_object() {
        return Err(SchemaViolation::new(format!("quiz[{index}]"), "an object"));
    }

    let id = whole_number(value.get("id"))
        .ok_or_else(|| SchemaViolation::new(field("id"), "an integer"))?;

    let question = value
        .get("question")
        .and_then(JsonValue::as_str)
        .ok_or_else(|| SchemaViolation::new(field("question"), "a string"))?;

    let choices = string_array::<4>(value.get("choices"), &field("choices"))?;

    let answer_index = whole_number(value.get("answerIndex"))
        .filter(|index| (0..=3).contains(index))
        .and_then(|index| u8::try_from(index).ok())
        .ok_or_else(|| SchemaViolation::new(field("answerIndex"), "an integer in 0..=3"))?;

    Ok(QuizItem {
        id,
        question: question.to_string(),
        choices,
        answer_index,
    })
}

fn validate_math(value: &JsonValue) -> Result<MathPayload, SchemaViolation> {
    let math_question = value
        .get("mathQuestion")
        .filter(|question| question.is_object())
        .ok_or_else(|| SchemaViolation::new("mathQuestion", "an object"))?;

    let text = |name: &str| {
        math_question
            .get(name)
            .and_then(JsonValue::as_str)
            .map(str::to_string)
            .ok_or_else(|| SchemaViolation::new(format!("mathQuestion.{name}"), "a string"))
    };

    Ok(MathPayload {
        math_question: MathQuestion {
            question: text("question")?,
            answer: text("answer")?,
            explanation: text("explanation")?,
        },
    })
}

/// Reads a JSON number with no fractional part, so `2` and `2.0` both count.
fn whole_number(value: Option<&JsonValue>) -> Option<i64> {
    let value = value?;
    if let Some(number) = value.as_i64() {
        return Some(number);
    }

    let number = value.as_f64()?;
    let in_range = number >= i64::MIN as f64 && number < i64::MAX as f64;
    (number.fract() == 0.0 && in_range).then_some(number as i64)
}

fn string_array<const N: usize>(
    value: Option<&JsonValue>,
    field: &str,
) -> Result<[String; N], SchemaViolation> {
    const EXPECTED: [&str; 5] = [
        "an empty array",
        "an array of exactly 1 string",
        "an array of exactly 2 strings",
        "an array of exactly 3 strings",
        "an array of exactly 4 strings",
    ];
    let violation = || {
        SchemaViolation::new(
            field,
            EXPECTED.get(N).copied().unwrap_or("an array of strings"),
        )
    };

    let items = value
        .and_then(JsonValue::as_array)
        .filter(|items| items.len() == N)
        .ok_or_else(violation)?;

    let strings: Vec<String> = items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect::<Option<_>>()
        .ok_or_else(violation)?;

    strings.try_into().map_err(|_| violation())
}
