//! Knowledge-base loader: source text -> immutable [`KnowledgeBase`].
//!
//! Thin orchestrator over the pipeline stages:
//! lex + parse, index, validate, build. Any failure aborts the load with
//! the first [`LoadError`]; there is no partial knowledge base.

use crate::build;
use crate::error::LoadError;
use crate::index;
use crate::kb::KnowledgeBase;
use crate::lexer;
use crate::parser;
use crate::source::{FileSystemProvider, SourceProvider};
use crate::validate;
use std::path::Path;

/// Load and validate the knowledge base at `path`.
pub fn load(path: &Path) -> Result<KnowledgeBase, LoadError> {
    load_with_provider(path, &FileSystemProvider)
}

/// Load through an explicit [`SourceProvider`].
pub fn load_with_provider(
    path: &Path,
    provider: &dyn SourceProvider,
) -> Result<KnowledgeBase, LoadError> {
    let filename = path.display().to_string();
    let src = provider
        .read_source(path)
        .map_err(|e| LoadError::io(&filename, &e))?;
    let kb_id = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("knowledge_base");
    load_str(&src, &filename, kb_id)
}

/// Load from source text. `filename` is used for error reporting only.
pub fn load_str(src: &str, filename: &str, kb_id: &str) -> Result<KnowledgeBase, LoadError> {
    let tokens = lexer::lex(src, filename)?;
    let constructs = parser::parse(&tokens, filename)?;
    let idx = index::build_index(&constructs)?;
    validate::validate(&constructs, &idx)?;
    let kb = build::build(&constructs, kb_id);
    tracing::debug!(
        kb = %kb.id,
        file = filename,
        relations = kb.relations.len(),
        catalogs = kb.catalogs.len(),
        questions = kb.questions.len(),
        "knowledge base loaded"
    );
    Ok(kb)
}

/// Parse with error recovery and run the remaining stages only when the
/// parse was clean. Returns every error found, for `check`-style reporting.
pub fn check_str(src: &str, filename: &str, max_errors: usize) -> Vec<LoadError> {
    let tokens = match lexer::lex(src, filename) {
        Ok(t) => t,
        Err(e) => return vec![e],
    };
    let (constructs, errors) = parser::parse_recovering(&tokens, filename, max_errors);
    if !errors.is_empty() {
        return errors;
    }
    let result = index::build_index(&constructs)
        .and_then(|idx| validate::validate(&constructs, &idx));
    match result {
        Ok(()) => Vec::new(),
        Err(e) => vec![e],
    }
}
