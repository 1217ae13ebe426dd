use serde::{Deserialize, Serialize};
use std::fmt;

// Load pipeline stages, recorded in `LoadError::stage`.
pub const STAGE_PARSE: u8 = 0;
pub const STAGE_INDEX: u8 = 1;
pub const STAGE_VALIDATE: u8 = 2;

/// A knowledge-base load error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoadError {
    pub stage: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub construct_kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub construct_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub file: String,
    pub line: u32,
    pub message: String,
}

impl LoadError {
    pub fn new(
        stage: u8,
        construct_kind: Option<&str>,
        construct_id: Option<&str>,
        field: Option<&str>,
        file: &str,
        line: u32,
        message: impl Into<String>,
    ) -> Self {
        LoadError {
            stage,
            construct_kind: construct_kind.map(str::to_owned),
            construct_id: construct_id.map(str::to_owned),
            field: field.map(str::to_owned),
            file: file.to_owned(),
            line,
            message: message.into(),
        }
    }

    pub fn lex(file: &str, line: u32, message: impl Into<String>) -> Self {
        LoadError::new(STAGE_PARSE, None, None, None, file, line, message)
    }

    pub fn parse(file: &str, line: u32, message: impl Into<String>) -> Self {
        LoadError::new(STAGE_PARSE, None, None, None, file, line, message)
    }

    /// The rule source could not be read at all.
    pub fn io(file: &str, err: &std::io::Error) -> Self {
        LoadError::new(
            STAGE_PARSE,
            None,
            None,
            None,
            file,
            0,
            format!("cannot read knowledge base: {}", err),
        )
    }

    /// Serialize with every field present (null when absent).
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "construct_id":   self.construct_id,
            "construct_kind": self.construct_kind,
            "field":          self.field,
            "file":           self.file,
            "line":           self.line,
            "message":        self.message,
            "stage":          self.stage,
        })
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: ", self.file, self.line)?;
        if let (Some(kind), Some(id)) = (&self.construct_kind, &self.construct_id) {
            write!(f, "{} '{}': ", kind, id)?;
        }
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for LoadError {}
