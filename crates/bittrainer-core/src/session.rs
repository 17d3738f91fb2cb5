//! Caller-owned practice session state.
//!
//! The engine never keeps a score. A front end that wants one records each
//! evaluated attempt here and reads the running totals back.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::OperationKind;
use crate::model::{EvaluationResult, Question};

/// One answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    pub question: Question,
    pub result: EvaluationResult,
}

/// Correct/total counts for one operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub correct: u32,
    pub total: u32,
}

impl Tally {
    /// Fraction of correct answers; 0.0 when nothing was answered.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

/// Running score and history of a practice session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    history: Vec<Attempt>,
    overall: Tally,
    streak: u32,
    best_streak: u32,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an evaluated attempt.
    pub fn record(&mut self, question: Question, result: EvaluationResult) -> &Attempt {
        self.overall.total += 1;
        if result.is_correct {
            self.overall.correct += 1;
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
        } else {
            self.streak = 0;
        }
        self.history.push(Attempt { question, result });
        &self.history[self.history.len() - 1]
    }

    pub fn correct(&self) -> u32 {
        self.overall.correct
    }

    pub fn total(&self) -> u32 {
        self.overall.total
    }

    /// `correct / total`, or 0.0 for an empty session.
    pub fn accuracy(&self) -> f64 {
        self.overall.accuracy()
    }

    /// Consecutive correct answers ending with the latest attempt.
    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    /// Attempts whose answer could not be parsed.
    pub fn unparsed(&self) -> usize {
        self.history
            .iter()
            .filter(|a| !a.result.was_parsed())
            .count()
    }

    pub fn history(&self) -> &[Attempt] {
        &self.history
    }

    pub fn last(&self) -> Option<&Attempt> {
        self.history.last()
    }

    /// Tallies per operation, in catalog order.
    pub fn per_operation(&self) -> BTreeMap<OperationKind, Tally> {
        let mut tallies: BTreeMap<OperationKind, Tally> = BTreeMap::new();
        for attempt in &self.history {
            let tally = tallies.entry(attempt.question.operation()).or_default();
            tally.total += 1;
            if attempt.result.is_correct {
                tally.correct += 1;
            }
        }
        tallies
    }
}
