//! Knowledge bases shipped with the binary.

use crate::error::LoadError;
use crate::kb::KnowledgeBase;
use crate::load::load_str;

pub const HEALTH_SRC: &str = include_str!("../../../kb/health.kb");
pub const PIZZA_SRC: &str = include_str!("../../../kb/pizza.kb");

/// Names accepted by [`builtin`].
pub const BUILTIN_NAMES: &[&str] = &["health", "pizza"];

/// Source text of a built-in knowledge base, if `name` is one.
pub fn builtin_source(name: &str) -> Option<&'static str> {
    match name {
        "health" => Some(HEALTH_SRC),
        "pizza" => Some(PIZZA_SRC),
        _ => None,
    }
}

/// Load a built-in knowledge base by name. `None` if `name` is not built in.
pub fn builtin(name: &str) -> Option<Result<KnowledgeBase, LoadError>> {
    builtin_source(name).map(|src| load_str(src, &format!("<builtin>/{}.kb", name), name))
}
