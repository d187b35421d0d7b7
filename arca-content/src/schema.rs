//! Response shapes and their validation.
//!
//! The schemas are sent along with each request so the provider is asked for
//! the right JSON shape. The provider's answer is still checked here field by
//! field before it becomes a typed value: a provider that ignores the schema,
//! drops a field or returns two questions instead of three is rejected with a
//! [`ProviderError::SchemaValidation`] naming the offending path.

use serde_json::{Map, Value, json};

use arca_core::types::{QuizData, QuizQuestion, StoryResponse};

use crate::error::ProviderError;

/// Questions per quiz.
pub const QUIZ_LENGTH: usize = 3;

/// Answer options per question.
pub const OPTION_COUNT: usize = 4;

/// Longest slice of raw text quoted in a parse error.
const PREVIEW_CHARS: usize = 200;

// ---------------------------------------------------------------------------
// Schema literals
// ---------------------------------------------------------------------------

/// JSON schema for a story: `title`, `content` and `moral`, all required.
#[must_use]
pub fn story_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "title": { "type": "string" },
            "content": { "type": "string" },
            "moral": { "type": "string" }
        },
        "required": ["title", "content", "moral"]
    })
}

/// JSON schema for a quiz of exactly [`QUIZ_LENGTH`] questions.
#[must_use]
pub fn quiz_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "questions": {
                "type": "array",
                "minItems": QUIZ_LENGTH,
                "maxItems": QUIZ_LENGTH,
                "items": {
                    "type": "object",
                    "properties": {
                        "question": { "type": "string" },
                        "options": {
                            "type": "array",
                            "minItems": OPTION_COUNT,
                            "maxItems": OPTION_COUNT,
                            "items": { "type": "string" }
                        },
                        "correctAnswer": { "type": "integer" },
                        "explanation": { "type": "string" }
                    },
                    "required": ["question", "options", "correctAnswer", "explanation"]
                }
            }
        },
        "required": ["questions"]
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Parse and check a story response.
///
/// # Errors
///
/// `EmptyResponse` for blank text, `ParseError` for non-JSON text, and
/// `SchemaValidation` when a field is missing, not a string, or blank.
pub fn validate_story(text: &str) -> Result<StoryResponse, ProviderError> {
    let obj = parse_object(text)?;
    Ok(StoryResponse {
        title: required_text(&obj, "title", "")?,
        content: required_text(&obj, "content", "")?,
        moral: required_text(&obj, "moral", "")?,
    })
}

/// Parse and check a quiz response.
///
/// # Errors
///
/// `EmptyResponse` for blank text, `ParseError` for non-JSON text, and
/// `SchemaValidation` unless there are exactly [`QUIZ_LENGTH`] questions,
/// each with non-blank text, [`OPTION_COUNT`] non-blank options, an
/// in-range `correctAnswer` and an explanation.
pub fn validate_quiz(text: &str) -> Result<QuizData, ProviderError> {
    let obj = parse_object(text)?;
    let items = required_array(&obj, "questions", "")?;
    if items.len() != QUIZ_LENGTH {
        return Err(schema_error(format!(
            "questions: expected {QUIZ_LENGTH} items, got {}",
            items.len()
        )));
    }

    let questions = items
        .iter()
        .enumerate()
        .map(|(i, item)| validate_question(item, &format!("questions[{i}]")))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(QuizData { questions })
}

fn validate_question(item: &Value, path: &str) -> Result<QuizQuestion, ProviderError> {
    let Value::Object(obj) = item else {
        return Err(schema_error(format!("{path}: expected object, got {}", kind_of(item))));
    };

    let question = required_text(obj, "question", path)?;

    let raw_options = required_array(obj, "options", path)?;
    if raw_options.len() != OPTION_COUNT {
        return Err(schema_error(format!(
            "{path}.options: expected {OPTION_COUNT} items, got {}",
            raw_options.len()
        )));
    }
    let options = raw_options
        .iter()
        .enumerate()
        .map(|(j, option)| match option {
            Value::String(s) if !s.trim().is_empty() => Ok(s.clone()),
            Value::String(_) => Err(schema_error(format!("{path}.options[{j}]: blank"))),
            other => Err(schema_error(format!(
                "{path}.options[{j}]: expected string, got {}",
                kind_of(other)
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let correct_answer = match obj.get("correctAnswer") {
        None => return Err(schema_error(format!("{path}.correctAnswer: missing"))),
        Some(value) => value.as_u64().ok_or_else(|| {
            schema_error(format!(
                "{path}.correctAnswer: expected non-negative integer, got {value}"
            ))
        })?,
    };
    let correct_answer = usize::try_from(correct_answer)
        .ok()
        .filter(|&index| index < OPTION_COUNT)
        .ok_or_else(|| {
            schema_error(format!(
                "{path}.correctAnswer: {correct_answer} out of range 0..={}",
                OPTION_COUNT - 1
            ))
        })?;

    let explanation = required_text(obj, "explanation", path)?;

    Ok(QuizQuestion {
        question,
        options,
        correct_answer,
        explanation,
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_object(text: &str) -> Result<Map<String, Value>, ProviderError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ProviderError::EmptyResponse);
    }

    let value: Value = serde_json::from_str(trimmed).map_err(|e| {
        let preview: String = trimmed.chars().take(PREVIEW_CHARS).collect();
        ProviderError::ParseError(format!("{e} (raw text: '{preview}')"))
    })?;

    match value {
        Value::Object(obj) => Ok(obj),
        other => Err(schema_error(format!("expected a JSON object, got {}", kind_of(&other)))),
    }
}

fn required_text(obj: &Map<String, Value>, field: &str, path: &str) -> Result<String, ProviderError> {
    let at = join(path, field);
    match obj.get(field) {
        None | Some(Value::Null) => Err(schema_error(format!("{at}: missing"))),
        Some(Value::String(s)) if s.trim().is_empty() => Err(schema_error(format!("{at}: blank"))),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(schema_error(format!("{at}: expected string, got {}", kind_of(other)))),
    }
}

fn required_array<'a>(
    obj: &'a Map<String, Value>,
    field: &str,
    path: &str,
) -> Result<&'a Vec<Value>, ProviderError> {
    let at = join(path, field);
    match obj.get(field) {
        None | Some(Value::Null) => Err(schema_error(format!("{at}: missing"))),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(schema_error(format!("{at}: expected array, got {}", kind_of(other)))),
    }
}

fn join(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{path}.{field}")
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn schema_error(message: String) -> ProviderError {
    ProviderError::SchemaValidation(message)
}
