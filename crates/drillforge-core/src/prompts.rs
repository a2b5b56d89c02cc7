//! Prompt templates for question generation and grading.
//!
//! The templates instruct the model to emit the exact bracketed-label
//! sections the parser expects; the section-tag protocol lives entirely in
//! prompt design, never in the provider wire format.

/// Default system prompt for tutoring backends.
pub const SYSTEM_PROMPT: &str = "You are an expert exam tutor. Follow the requested output format EXACTLY, using the bracketed section labels given in the prompt. Do not use JSON or markdown code fences.";

/// Human-readable persona per course identifier.
fn course_persona(course: &str) -> String {
    match course {
        "IB" => "an expert IB Math AA SL teacher".to_string(),
        "SAT" => "an expert SAT Math tutor".to_string(),
        other => format!("an expert {other} teacher"),
    }
}

/// Difficulty guidance per course identifier.
fn course_difficulty(course: &str) -> &'static str {
    match course {
        "IB" => "The difficulty should be appropriate for IB Math AA SL (Level 4-6).",
        "SAT" => "The difficulty should match a medium-to-hard SAT Math question.",
        _ => "The difficulty should suit a standard exam for this course.",
    }
}

/// Render the question-generation prompt for a topic.
pub fn generation_prompt(topic: &str, course: &str) -> String {
    format!(
        r#"Act as {persona}.
Generate a standard exam-style practice question for: "{topic}".
{difficulty}

Output format (STRICTLY follow this, do not use JSON):

[QUESTION]
Write the full question text here. Use $...$ for inline math.

[HINT]
Write a helpful hint that nudges the student in the right direction without giving away the answer.

[ANSWER]
Write the final short answer here (e.g. "x = 5").

[EXPLANATION]
Write the detailed step-by-step solution here. Use LaTeX freely.
"#,
        persona = course_persona(course),
        difficulty = course_difficulty(course),
    )
}

/// Render the grading prompt for a submitted answer.
pub fn grading_prompt(question_text: &str, user_answer: &str, course: &str) -> String {
    format!(
        r#"You are grading a {course} answer.
Question: "{question_text}"
Student Answer: "{user_answer}"

Output format (STRICTLY follow this):

[STATUS]
CORRECT or INCORRECT or PARTIAL

[FEEDBACK]
Write your feedback here. Use LaTeX freely.
"#
    )
}
