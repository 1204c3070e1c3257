// src/grading/scoring.rs

use crate::{error::ValidationError, models::assessment::Question};

/// Marker for a question the respondent left blank.
pub const UNANSWERED: i64 = -1;

/// Outcome of scoring one answer vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreReport {
    /// Number of questions answered correctly.
    pub score: usize,
    /// Correctness per question, in question order.
    pub per_question_correct: Vec<bool>,
}

/// Scores `answers` against the answer key of `questions`.
///
/// One point per exact match, no partial credit. Fails without scoring
/// anything when the answer count does not match the question count.
pub fn score_answers(questions: &[Question], answers: &[i64]) -> Result<ScoreReport, ValidationError> {
    if answers.len() != questions.len() {
        return Err(answer_count_mismatch(questions.len(), answers.len()));
    }

    let per_question_correct: Vec<bool> = questions
        .iter()
        .zip(answers)
        .map(|(q, &ans)| ans == q.correct_answer_index)
        .collect();
    let score = per_question_correct.iter().filter(|&&ok| ok).count();

    Ok(ScoreReport {
        score,
        per_question_correct,
    })
}

/// Submission policy: every question must be answered with a valid option.
///
/// Blank answers (`-1`) are rejected rather than scored as wrong.
pub fn validate_answers(questions: &[Question], answers: &[i64]) -> Result<(), ValidationError> {
    if answers.len() != questions.len() {
        return Err(answer_count_mismatch(questions.len(), answers.len()));
    }

    for (i, (q, &ans)) in questions.iter().zip(answers).enumerate() {
        let field = format!("answers[{}]", i);
        if ans == UNANSWERED {
            return Err(ValidationError::new(
                field,
                format!("question {} is unanswered", i + 1),
            ));
        }
        if ans < 0 || ans >= q.options.len() as i64 {
            return Err(ValidationError::new(
                field,
                format!("option {} does not exist for question {}", ans, i + 1),
            ));
        }
    }

    Ok(())
}

fn answer_count_mismatch(expected: usize, got: usize) -> ValidationError {
    ValidationError::new(
        "answers",
        format!("answer count mismatch: expected {}, got {}", expected, got),
    )
}
