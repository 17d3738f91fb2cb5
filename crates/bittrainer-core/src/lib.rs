//! bittrainer-core: the bitwise exercise engine.
//!
//! This crate holds the operation catalog, randomized question generation,
//! answer evaluation with explanations, and number formatting. It keeps no
//! session state of its own; callers that want a running score use
//! [`session::Session`].

pub mod catalog;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod format;
pub mod generator;
pub mod model;
pub mod session;

pub use catalog::{Arity, Operand2Domain, OperationInfo, OperationKind, CATALOG};
pub use error::{EngineError, ParseFailure};
pub use evaluator::{evaluate, explain};
pub use format::{format_value, parse_value};
pub use generator::{next_question, GeneratorConfig, QuestionGenerator};
pub use model::{BitWidth, EvaluationResult, NumberBase, Question};
pub use session::{Attempt, Session, Tally};
