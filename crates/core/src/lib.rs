//! advisor-core: the knowledge-base language behind the advisor wizards.
//!
//! Loads a `.kb` source into an immutable [`KnowledgeBase`]: a relation
//! table of conjunctive alternatives plus the catalogs, questions and
//! effect texts the wizards render.
//!
//! # Public API
//!
//! - [`load()`] / [`load_str()`]: run the full pipeline
//! - [`builtin()`]: the knowledge bases embedded in the binary
//! - [`KnowledgeBase`], [`Relation`], [`Alternative`], [`Label`]
//! - [`LoadError`]: the single error type of every stage

pub mod ast;
pub mod build;
pub mod builtin;
pub mod error;
pub mod index;
pub mod kb;
pub mod label;
pub mod lexer;
pub mod load;
pub mod parser;
pub mod source;
pub mod validate;

pub use builtin::{builtin, BUILTIN_NAMES};
pub use error::LoadError;
pub use kb::{Alternative, Catalog, Effect, KnowledgeBase, Question, Relation, StepTemplate, Wizard};
pub use label::Label;
pub use load::{check_str, load, load_str, load_with_provider};
pub use source::{FileSystemProvider, InMemoryProvider, SourceProvider};
