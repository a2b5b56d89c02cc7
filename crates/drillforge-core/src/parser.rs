//! Section-tag output parser.
//!
//! Generator responses follow a bracketed-label protocol imposed by the
//! prompt templates: `[QUESTION] ... [HINT] ... [ANSWER] ... [EXPLANATION]`
//! for generation and `[STATUS] ... [FEEDBACK]` for grading, in that fixed
//! order with no nesting. Either every required section parses or the whole
//! call fails with `MalformedOutput`; there is no partial-success mode and
//! no automatic retry.

use crate::error::CoreError;
use crate::model::{EvalStatus, Evaluation, NewQuestion};

/// Section tags for the question-generation response, in wire order.
pub const GENERATION_TAGS: [&str; 4] = ["QUESTION", "HINT", "ANSWER", "EXPLANATION"];

/// Section tags for the grading response, in wire order.
pub const EVALUATION_TAGS: [&str; 2] = ["STATUS", "FEEDBACK"];

/// Extract the body of each tag from `raw`, in the order given.
///
/// Each body is the trimmed text between a tag marker and the next tag
/// marker; the final tag captures to end-of-text. A missing tag, or a tag
/// appearing before the previous one, fails the whole call.
pub fn parse_sections(raw: &str, tags: &[&str]) -> Result<Vec<String>, CoreError> {
    let mut bodies = Vec::with_capacity(tags.len());
    let mut cursor = 0usize;
    let mut body_start = 0usize;

    for (i, tag) in tags.iter().enumerate() {
        let marker = format!("[{tag}]");
        let found = raw[cursor..]
            .find(&marker)
            .map(|pos| cursor + pos)
            .ok_or_else(|| {
                CoreError::malformed(format!("section [{tag}] missing or out of order"))
            })?;

        if i > 0 {
            bodies.push(raw[body_start..found].trim().to_string());
        }
        cursor = found + marker.len();
        body_start = cursor;
    }

    bodies.push(raw[body_start..].trim().to_string());
    Ok(bodies)
}

/// Parse a question-generation response into a `NewQuestion`.
pub fn parse_question(raw: &str, topic: &str, course: &str) -> Result<NewQuestion, CoreError> {
    let sections = parse_sections(raw, &GENERATION_TAGS)?;
    let [question_text, hint, correct_answer, explanation]: [String; 4] = sections
        .try_into()
        .expect("parse_sections returns one body per tag");

    Ok(NewQuestion {
        topic: topic.to_string(),
        course: course.to_string(),
        question_text,
        hint: if hint.is_empty() { None } else { Some(hint) },
        correct_answer,
        explanation,
    })
}

/// Parse a grading response into an `Evaluation`.
///
/// The STATUS body must match CORRECT, INCORRECT, or PARTIAL
/// case-insensitively; anything else is `MalformedOutput`. Surrendered
/// never comes over the wire; the orchestrator sets it locally.
pub fn parse_evaluation(raw: &str) -> Result<Evaluation, CoreError> {
    let sections = parse_sections(raw, &EVALUATION_TAGS)?;
    let [status_body, feedback]: [String; 2] = sections
        .try_into()
        .expect("parse_sections returns one body per tag");

    let status: EvalStatus = status_body
        .parse()
        .map_err(|_| CoreError::malformed(format!("unexpected STATUS value: {status_body:?}")))?;

    if status == EvalStatus::Surrendered {
        return Err(CoreError::malformed(
            "STATUS must be CORRECT, INCORRECT, or PARTIAL",
        ));
    }

    Ok(Evaluation { status, feedback })
}
