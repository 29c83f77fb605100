//! Quiz grading.
//!
//! A [`QuizRun`] takes a snapshot of one module's questions when it starts
//! and walks them once, in order. Later edits to the bank are not seen by a
//! run already in progress.

use std::fmt;

use crate::catalog::questions_in;
use crate::model::{percentage, ModuleKey, Question};

/// Parse a 1-based answer number into a zero-based option index.
///
/// Anything that is not a number in `1..=option_count` yields `None`, which
/// never equals a stored answer.
pub fn parse_answer(input: &str, option_count: usize) -> Option<usize> {
    let n: usize = input.trim().parse().ok()?;
    (1..=option_count).contains(&n).then(|| n - 1)
}

/// Result of answering one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub correct: bool,
    /// Text of the right option, shown after a wrong answer.
    pub correct_option: Option<String>,
}

/// An in-progress pass over one module.
#[derive(Debug, Clone)]
pub struct QuizRun {
    key: ModuleKey,
    questions: Vec<Question>,
    position: usize,
    correct: u32,
}

impl QuizRun {
    /// Snapshot the module's questions from `bank`.
    pub fn start(bank: &[Question], key: ModuleKey) -> Self {
        let questions = questions_in(bank, &key.category, &key.module);
        Self {
            key,
            questions,
            position: 0,
            correct: 0,
        }
    }

    pub fn key(&self) -> &ModuleKey {
        &self.key
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// 0-based index of the question awaiting an answer.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The question awaiting an answer, `None` once finished.
    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.position)
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.questions.len()
    }

    /// Grade raw input against the current question and advance.
    pub fn submit(&mut self, input: &str) -> Option<AnswerFeedback> {
        let question = self.questions.get(self.position)?;
        let correct = parse_answer(input, question.options.len()) == Some(question.answer);
        let feedback = AnswerFeedback {
            correct,
            correct_option: question.correct_option().map(str::to_string),
        };
        if correct {
            self.correct += 1;
        }
        self.position += 1;
        Some(feedback)
    }

    pub fn outcome(&self) -> QuizOutcome {
        QuizOutcome {
            correct: self.correct,
            total: self.questions.len() as u32,
        }
    }
}

/// Grade a whole module against a list of answers, one per question.
pub fn grade(bank: &[Question], key: ModuleKey, answers: &[&str]) -> QuizOutcome {
    let mut run = QuizRun::start(bank, key);
    for answer in answers {
        if run.submit(answer).is_none() {
            break;
        }
    }
    run.outcome()
}

/// Final tally of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizOutcome {
    pub correct: u32,
    pub total: u32,
}

impl QuizOutcome {
    pub fn percentage(&self) -> f64 {
        percentage(self.correct, self.total)
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_percentage(self.percentage())
    }
}

/// Feedback tier for a percentage: `>= 80`, `60..80`, `< 60`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Praise,
    Neutral,
    Discouraging,
}

impl ScoreBand {
    pub fn from_percentage(pct: f64) -> Self {
        if pct >= 80.0 {
            ScoreBand::Praise
        } else if pct >= 60.0 {
            ScoreBand::Neutral
        } else {
            ScoreBand::Discouraging
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ScoreBand::Praise => "Excellent work!",
            ScoreBand::Neutral => "Good job, keep practicing.",
            ScoreBand::Discouraging => "Keep studying and try again.",
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreBand::Praise => write!(f, "excellent"),
            ScoreBand::Neutral => write!(f, "good"),
            ScoreBand::Discouraging => write!(f, "needs work"),
        }
    }
}
