//! Program module - the 28-day curriculum and intake scoring.
//!
//! - `questionnaire` - twelve-question intake, answered one question at a time
//! - `level` - fitness level scoring from the questionnaire average
//! - `day` - program days and weeks
//! - `checklist` - the five daily micro-tasks
//! - `exercise` - the rotating daily exercise catalog

mod checklist;
mod day;
mod exercise;
mod level;
mod questionnaire;

pub use checklist::{ChecklistItem, ChecklistProgress};
pub use day::{ProgramDay, DAYS_PER_WEEK, PROGRAM_DAYS, PROGRAM_WEEKS};
pub use exercise::{exercise_for_day, Exercise, EXERCISES};
pub use level::{compute_level, FitnessLevel, ProgramLevel};
pub use questionnaire::{Questionnaire, QuestionnaireAnswers, MAX_ANSWER_VALUE, QUESTION_COUNT};
