// src/models/import.rs

use serde_json::{Map, Value};
use validator::Validate;

use crate::{
    error::ValidationError,
    models::assessment::{AssessmentPayload, Question},
};

const MAX_TITLE_CHARS: usize = 200;
const MAX_DESCRIPTION_CHARS: usize = 5000;
const MAX_QUESTIONS: usize = 500;
const MAX_QUESTION_TEXT_CHARS: usize = 2000;
const MAX_OPTIONS: usize = 26;
const MAX_OPTION_CHARS: usize = 500;

/// Validates an untyped assessment payload and builds a typed one.
///
/// Checks run in document order and stop at the first failure, which is
/// reported with its field path. Only `title`, `description` and `questions`
/// are read; `id`, `createdAt` and any other field in the input are ignored
/// so an import can never pick its own id or timestamp.
pub fn validate_import(raw: &Value) -> Result<AssessmentPayload, ValidationError> {
    let root = raw
        .as_object()
        .ok_or_else(|| ValidationError::new("payload", "must be a JSON object"))?;

    let title = required_text(root, "title", "title")?.trim();
    max_chars(title, MAX_TITLE_CHARS, "title")?;
    let description = required_text(root, "description", "description")?.trim();
    max_chars(description, MAX_DESCRIPTION_CHARS, "description")?;

    let questions = match root.get("questions") {
        Some(Value::Array(items)) if !items.is_empty() => items,
        Some(Value::Array(_)) => {
            return Err(ValidationError::new("questions", "must contain at least one question"));
        }
        Some(_) => return Err(ValidationError::new("questions", "must be an array")),
        None => return Err(ValidationError::new("questions", "is required")),
    };
    if questions.len() > MAX_QUESTIONS {
        return Err(ValidationError::new(
            "questions",
            format!("must contain at most {} questions", MAX_QUESTIONS),
        ));
    }

    let questions = questions
        .iter()
        .enumerate()
        .map(|(i, q)| parse_question(i, q))
        .collect::<Result<Vec<_>, _>>()?;

    let payload = AssessmentPayload {
        title: title.to_string(),
        description: description.to_string(),
        questions,
    };

    // The model's own limits must agree with the checks above.
    payload.validate().map_err(|e| {
        tracing::warn!("Payload passed import checks but failed model validation: {}", e);
        ValidationError::new("payload", "exceeds size limits")
    })?;

    Ok(payload)
}

fn required_text<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<&'a str, ValidationError> {
    match obj.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.as_str()),
        Some(Value::String(_)) => Err(ValidationError::new(path, "must not be empty")),
        Some(_) => Err(ValidationError::new(path, "must be a string")),
        None => Err(ValidationError::new(path, "is required")),
    }
}

/// Limits count characters, not bytes.
fn max_chars(value: &str, max: usize, path: &str) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::new(
            path,
            format!("must be at most {} characters", max),
        ));
    }
    Ok(())
}

fn parse_question(index: usize, raw: &Value) -> Result<Question, ValidationError> {
    let base = format!("questions[{}]", index);
    let obj = raw
        .as_object()
        .ok_or_else(|| ValidationError::new(&base, "must be an object"))?;

    let text_path = format!("{}.text", base);
    let text = required_text(obj, "text", &text_path)?;
    max_chars(text, MAX_QUESTION_TEXT_CHARS, &text_path)?;

    let options_path = format!("{}.options", base);
    let options = match obj.get("options") {
        Some(Value::Array(items)) => items,
        Some(_) => return Err(ValidationError::new(&options_path, "must be an array")),
        None => return Err(ValidationError::new(&options_path, "is required")),
    };
    if options.len() < 2 {
        return Err(ValidationError::new(&options_path, "must have at least 2 options"));
    }
    if options.len() > MAX_OPTIONS {
        return Err(ValidationError::new(
            &options_path,
            format!("must have at most {} options", MAX_OPTIONS),
        ));
    }
    let options = options
        .iter()
        .enumerate()
        .map(|(j, opt)| {
            let path = format!("{}[{}]", options_path, j);
            let opt = opt
                .as_str()
                .ok_or_else(|| ValidationError::new(&path, "must be a string"))?;
            max_chars(opt, MAX_OPTION_CHARS, &path)?;
            Ok(opt.to_string())
        })
        .collect::<Result<Vec<_>, ValidationError>>()?;

    let key_path = format!("{}.correctAnswerIndex", base);
    let correct_answer_index = match obj.get("correctAnswerIndex") {
        Some(v) => v
            .as_i64()
            .ok_or_else(|| ValidationError::new(&key_path, "must be an integer"))?,
        None => return Err(ValidationError::new(&key_path, "is required")),
    };
    if correct_answer_index < 0 || correct_answer_index >= options.len() as i64 {
        return Err(ValidationError::new(
            &key_path,
            format!("must be between 0 and {}", options.len() - 1),
        ));
    }

    Ok(Question {
        text: text.to_string(),
        options,
        correct_answer_index,
    })
}
