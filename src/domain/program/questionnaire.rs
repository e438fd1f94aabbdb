//! Intake questionnaire: twelve questions, each answered with a value 0..=3.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::ValidationError;

/// Number of questions in the intake questionnaire.
pub const QUESTION_COUNT: u8 = 12;

/// Highest value an answer can take.
pub const MAX_ANSWER_VALUE: u8 = 3;

/// Questionnaire being filled in, one answer at a time.
///
/// Answering the same question again overwrites the earlier value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Questionnaire {
    answers: BTreeMap<u8, u8>,
}

impl Questionnaire {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the answer for `question_id` (1..=12) with `value` (0..=3).
    pub fn answer(&mut self, question_id: u8, value: u8) -> Result<(), ValidationError> {
        validate_answer(question_id, value)?;
        self.answers.insert(question_id, value);
        Ok(())
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Lowest question id that still has no answer.
    pub fn next_unanswered(&self) -> Option<u8> {
        (1..=QUESTION_COUNT).find(|id| !self.answers.contains_key(id))
    }

    /// Share of questions answered, in percent.
    pub fn progress_percent(&self) -> u8 {
        (self.answers.len() * 100 / QUESTION_COUNT as usize) as u8
    }

    /// Seals the questionnaire once every question has an answer.
    pub fn finish(self) -> Result<QuestionnaireAnswers, ValidationError> {
        QuestionnaireAnswers::try_from(self.answers)
    }
}

/// A fully answered questionnaire.
///
/// Serializes as `{"1": 2, "2": 0, ...}`, the shape stored in the
/// questionnaire audit table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<u8, u8>", into = "BTreeMap<u8, u8>")]
pub struct QuestionnaireAnswers(BTreeMap<u8, u8>);

impl QuestionnaireAnswers {
    pub fn get(&self, question_id: u8) -> Option<u8> {
        self.0.get(&question_id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all answer values.
    pub fn total(&self) -> u32 {
        self.0.values().map(|v| u32::from(*v)).sum()
    }

    /// Mean answer value, for display. Scoring uses exact arithmetic instead.
    pub fn average_score(&self) -> f64 {
        f64::from(self.total()) / self.0.len() as f64
    }
}

impl TryFrom<BTreeMap<u8, u8>> for QuestionnaireAnswers {
    type Error = ValidationError;

    fn try_from(answers: BTreeMap<u8, u8>) -> Result<Self, Self::Error> {
        for (question_id, value) in &answers {
            validate_answer(*question_id, *value)?;
        }
        if answers.len() != QUESTION_COUNT as usize {
            return Err(ValidationError::out_of_range(
                "answers",
                QUESTION_COUNT as i64,
                QUESTION_COUNT as i64,
                answers.len() as i64,
            ));
        }
        Ok(Self(answers))
    }
}

impl From<QuestionnaireAnswers> for BTreeMap<u8, u8> {
    fn from(answers: QuestionnaireAnswers) -> Self {
        answers.0
    }
}

fn validate_answer(question_id: u8, value: u8) -> Result<(), ValidationError> {
    if !(1..=QUESTION_COUNT).contains(&question_id) {
        return Err(ValidationError::out_of_range(
            "question_id",
            1,
            QUESTION_COUNT as i64,
            question_id as i64,
        ));
    }
    if value > MAX_ANSWER_VALUE {
        return Err(ValidationError::out_of_range(
            "answer",
            0,
            MAX_ANSWER_VALUE as i64,
            value as i64,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(value: u8) -> Questionnaire {
        let mut q = Questionnaire::new();
        for id in 1..=QUESTION_COUNT {
            q.answer(id, value).unwrap();
        }
        q
    }

    #[test]
    fn answer_rejects_unknown_question() {
        let mut q = Questionnaire::new();
        assert!(q.answer(0, 1).is_err());
        assert!(q.answer(13, 1).is_err());
        assert_eq!(q.answered_count(), 0);
    }

    #[test]
    fn answer_rejects_value_above_three() {
        let mut q = Questionnaire::new();
        let err = q.answer(1, 4).unwrap_err();
        assert_eq!(err.field(), "answer");
    }

    #[test]
    fn reanswering_overwrites() {
        let mut q = Questionnaire::new();
        q.answer(3, 1).unwrap();
        q.answer(3, 2).unwrap();
        assert_eq!(q.answered_count(), 1);

        for id in (1..=QUESTION_COUNT).filter(|id| *id != 3) {
            q.answer(id, 0).unwrap();
        }
        let answers = q.finish().unwrap();
        assert_eq!(answers.get(3), Some(2));
        assert_eq!(answers.total(), 2);
    }

    #[test]
    fn next_unanswered_skips_answered_questions() {
        let mut q = Questionnaire::new();
        q.answer(1, 0).unwrap();
        q.answer(2, 0).unwrap();
        q.answer(4, 0).unwrap();
        assert_eq!(q.next_unanswered(), Some(3));
        assert_eq!(filled(0).next_unanswered(), None);
    }

    #[test]
    fn finish_requires_all_twelve() {
        let mut q = Questionnaire::new();
        for id in 1..QUESTION_COUNT {
            q.answer(id, 2).unwrap();
        }
        assert_eq!(q.next_unanswered(), Some(QUESTION_COUNT));
        assert_eq!(q.progress_percent(), 91);
        assert!(q.clone().finish().is_err());

        q.answer(QUESTION_COUNT, 2).unwrap();
        let answers = q.finish().unwrap();
        assert_eq!(answers.len(), 12);
        assert_eq!(answers.total(), 24);
        assert!((answers.average_score() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn answers_serialize_with_string_keys() {
        let answers = filled(1).finish().unwrap();
        let json = serde_json::to_value(&answers).unwrap();
        assert_eq!(json["1"], 1);
        assert_eq!(json["12"], 1);
    }

    #[test]
    fn answers_deserialization_checks_completeness() {
        let partial = r#"{"1": 0, "2": 3}"#;
        assert!(serde_json::from_str::<QuestionnaireAnswers>(partial).is_err());

        let answers = filled(3).finish().unwrap();
        let json = serde_json::to_string(&answers).unwrap();
        let back: QuestionnaireAnswers = serde_json::from_str(&json).unwrap();
        assert_eq!(back, answers);
    }
}
