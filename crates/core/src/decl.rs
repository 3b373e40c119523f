//! Parse-tree types for GMPL data files.
//!
//! Produced by the parser and consumed by the interpreter and transformer.
//! Purely syntactic: no renaming, no dimension knowledge, no identifier
//! generation -- header tokens, wildcards, and row keys are verbatim.

use std::collections::BTreeMap;

/// A single data row inside a slice block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowEntry {
    /// Row label (left-most token).
    pub key: String,
    /// Raw value tokens. Bounded by the column count when columns exist;
    /// a short row truncates, it is not an error.
    pub values: Vec<String>,
}

/// One tabular sub-region of a parameter body.
///
/// `header: None` marks a headerless block: bare key/value rows, or a
/// column table introduced by a bare `:`. Wildcards in a header are the
/// literal token `*`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SliceBlock {
    pub header: Option<Vec<String>>,
    pub column_labels: Vec<String>,
    pub rows: Vec<RowEntry>,
}

/// A `param` declaration with its default value and slice data.
/// Zero slices is legal (declaration-only or default-only statements).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedParam {
    pub name: String,
    /// Raw default token, not yet coerced to a number.
    pub default: Option<String>,
    pub slices: Vec<SliceBlock>,
}

/// Complete parse result for one data file. Immutable once produced.
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    /// Set name -> members in declaration order. Re-declaring a set merges
    /// its members (union).
    pub sets: BTreeMap<String, Vec<String>>,
    /// Parameters in file order.
    pub params: Vec<ParsedParam>,
}

impl ParseResult {
    /// True when the source contained no recognizable declarations at all.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty() && self.params.is_empty()
    }
}
