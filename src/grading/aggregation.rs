// src/grading/aggregation.rs

use serde::{Serialize, Serializer};

use crate::models::{assessment::Question, response::ResponseRecord};

/// Summary statistics over all responses to one assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub count: usize,

    /// Mean score. Kept at full precision; rounded to 2 decimals on output.
    #[serde(serialize_with = "round_two")]
    pub average_score: f64,

    /// Share of responses that pass, in `[0, 1]`.
    pub pass_rate: f64,

    /// Share of correct answers per question, in `[0, 1]`.
    pub per_question_accuracy: Vec<f64>,
}

fn round_two<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64((value * 100.0).round() / 100.0)
}

/// A response passes when its score is strictly greater than half the
/// question count (5 questions: 3 passes, 2 fails).
pub fn passes(score: i64, question_count: usize) -> bool {
    score.saturating_mul(2) > question_count as i64
}

/// Aggregates `responses` against the current answer key in `questions`.
///
/// Responses recorded against an older, shorter version of the assessment
/// only count towards the question indices their answer vector covers.
pub fn aggregate(questions: &[Question], responses: &[ResponseRecord]) -> Summary {
    let count = responses.len();
    if count == 0 {
        return Summary {
            count: 0,
            average_score: 0.0,
            pass_rate: 0.0,
            per_question_accuracy: vec![0.0; questions.len()],
        };
    }

    let total_score: i64 = responses.iter().map(|r| i64::from(r.score)).sum();
    let passing = responses
        .iter()
        .filter(|r| passes(i64::from(r.score), questions.len()))
        .count();

    let per_question_accuracy = questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let (answered, correct) = responses
                .iter()
                .filter_map(|r| r.answers.get(i))
                .fold((0usize, 0usize), |(answered, correct), &ans| {
                    let hit = usize::from(ans == q.correct_answer_index);
                    (answered + 1, correct + hit)
                });
            if answered == 0 {
                0.0
            } else {
                correct as f64 / answered as f64
            }
        })
        .collect();

    Summary {
        count,
        average_score: total_score as f64 / count as f64,
        pass_rate: passing as f64 / count as f64,
        per_question_accuracy,
    }
}
