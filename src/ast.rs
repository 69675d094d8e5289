//! # Sift Condition Language - Grammar Atoms
//!
//! This module defines the atomic units of the Sift condition language,
//! a small expression language for checking conditions against JSON
//! documents without handing the expression text to a general-purpose
//! interpreter.
//!
//! ## Architecture Overview
//!
//! The grammar module is organized into focused submodules:
//!
//! - **[tokens]** - Lexical tokens produced by the tokenizer
//! - **[operators]** - The closed operator set with precedence and arity
//!
//! ## Core Concepts
//!
//! ### Expressions
//!
//! Every input is a single infix expression over literals and dotted
//! field references:
//!
//! ```text
//! user.age > 18 && user.status == 'active'
//! ```
//!
//! There are no statements, assignments, or function calls. The operator
//! set is closed; expressions can only read the document they are
//! evaluated against.
//!
//! ### Evaluation
//!
//! Tokens are consumed left to right by a dual-stack engine that resolves
//! pending operators by precedence, so no syntax tree is ever built. See
//! [`crate::evaluator`].

pub mod operators;
pub mod tokens;

pub use operators::Op;
pub use tokens::Token;
