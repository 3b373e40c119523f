//! Pipeline orchestrator: parse -> interpret -> transform.
//!
//! A thin entry point that runs the three phases in order. Each invocation
//! allocates its own parse tree, tuple maps, and bundle; nothing is shared
//! across calls except the constant registry tables.

use crate::interpret::{self, Diagnostics};
use crate::parser;
use crate::transform;
use osydata_interchange::CaseBundle;

/// Output of a full conversion run.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub bundle: CaseBundle,
    pub diagnostics: Diagnostics,
    /// True when the source contained no set or param declarations at all.
    /// The pipeline itself never fails; callers decide whether an empty
    /// input is a user-facing error.
    pub empty_input: bool,
}

/// Run the full pipeline over data-file content.
pub fn convert_str(text: &str) -> Conversion {
    let parsed = parser::parse_str(text);
    let interp = interpret::interpret(&parsed);
    let bundle = transform::transform(&parsed, &interp);
    Conversion {
        bundle,
        diagnostics: interp.diagnostics,
        empty_input: parsed.is_empty(),
    }
}
