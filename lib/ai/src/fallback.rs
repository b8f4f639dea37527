//! Offline study material synthesized from the source text alone.
//!
//! Used whenever the model cannot deliver. Never fails and never calls the
//! model; the only randomness is the order of filler distractors.

use rand::Rng;
use rand::seq::SliceRandom;
use regex::Regex;
use std::sync::LazyLock;
use study_assistant_core::{
    DefaultPayload, MathPayload, MathQuestion, QuizItem, StudyContent, StudyMode,
};

/// Bullet used when the source text has fewer than three sentences.
pub const FILLER_BULLET: &str = "Explore core ideas and definitions.";

/// Longest summary bullet, in words, before truncation.
pub const MAX_BULLET_WORDS: usize = 20;

const ELLIPSIS: &str = "\u{2026}";

const DISTRACTOR_POOL: [&str; 4] = [
    "It is a fundamental concept in mathematics.",
    "It relates to historical events and timelines.",
    "It involves scientific principles and experiments.",
    "It focuses on artistic expression and creativity.",
];

static TEMPLATE_SUBSTITUTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{[^}]+\}").expect("template pattern is valid"));

/// Strips `${...}` sequences from a topic before it is echoed back.
///
/// Falls back to the trimmed original if nothing else is left.
#[must_use]
pub fn sanitize_topic(raw: &str) -> String {
    let cleaned = TEMPLATE_SUBSTITUTION.replace_all(raw, "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        raw.trim().to_string()
    } else {
        cleaned.to_string()
    }
}

/// Builds fallback content using the thread-local RNG for distractor order.
#[must_use]
pub fn build_fallback(topic: &str, source_text: &str, mode: StudyMode) -> StudyContent {
    build_fallback_with_rng(topic, source_text, mode, &mut rand::thread_rng())
}

/// Builds fallback content with a caller-supplied RNG.
#[must_use]
pub fn build_fallback_with_rng<R: Rng + ?Sized>(
    topic: &str,
    source_text: &str,
    mode: StudyMode,
    rng: &mut R,
) -> StudyContent {
    let topic = sanitize_topic(topic);

    match mode {
        StudyMode::Math => StudyContent::Math(MathPayload {
            math_question: math_question(&topic),
        }),
        StudyMode::Default => {
            let summary = summary(source_text);
            let quiz = quiz(&topic, &summary, rng);
            StudyContent::Default(DefaultPayload {
                summary,
                quiz,
                study_tip: format!("Review the main definitions of {topic} twice today."),
            })
        }
    }
}

/// Splits text after `.`, `!` or `?` when followed by whitespace.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((_, ch)) = chars.next() {
        if matches!(ch, '.' | '!' | '?')
            && let Some(&(next_index, next)) = chars.peek()
            && next.is_whitespace()
        {
            sentences.push(&text[start..next_index]);
            start = next_index;
        }
    }
    sentences.push(&text[start..]);

    sentences
        .into_iter()
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .collect()
}

fn trim_to_words(text: &str, max_words: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max_words {
        return text.trim().to_string();
    }
    format!("{}{ELLIPSIS}", words[..max_words].join(" "))
}

fn summary(source_text: &str) -> [String; 3] {
    let mut bullets = split_sentences(source_text)
        .into_iter()
        .take(3)
        .map(|sentence| trim_to_words(sentence, MAX_BULLET_WORDS));

    std::array::from_fn(|_| bullets.next().unwrap_or_else(|| FILLER_BULLET.to_string()))
}

fn distractors<R: Rng + ?Sized>(rng: &mut R) -> [String; 3] {
    let mut pool = DISTRACTOR_POOL;
    pool.shuffle(rng);
    std::array::from_fn(|i| pool[i].to_string())
}

const QUESTION_TEMPLATES: [&str; 3] = [
    "Based on the information provided, which statement accurately describes {topic}?",
    "What is a key characteristic or aspect of {topic}?",
    "Which of the following is most relevant to understanding {topic}?",
];

fn quiz<R: Rng + ?Sized>(topic: &str, summary: &[String; 3], rng: &mut R) -> [QuizItem; 3] {
    std::array::from_fn(|i| {
        let [first, second, third] = distractors(rng);
        QuizItem {
            id: i as i64 + 1,
            question: QUESTION_TEMPLATES[i].replace("{topic}", topic),
            choices: [summary[i].clone(), first, second, third],
            answer_index: 0,
        }
    })
}

fn math_question(topic: &str) -> MathQuestion {
    MathQuestion {
        question: format!(
            "You plan to review 3 sections on {topic}, each taking 15 minutes. How long will the study session take?"
        ),
        answer: "45 minutes".to_string(),
        explanation: "Multiply the number of sections (3) by the time per section (15 minutes) to get 45 minutes total.".to_string(),
    }
}
