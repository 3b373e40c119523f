//! Phase 2: semantic interpretation.
//!
//! Expands raw parse results into normalized `{param -> {tuple -> value}}`
//! maps. Tuple components are raw set-member strings in registry dimension
//! order; identifier generation happens later, in the transformer.
//!
//! The phase is tolerant by construction: unknown parameters, unresolvable
//! blocks, bad value tokens, and arity mismatches are skipped and counted
//! in [`Diagnostics`], never raised.

use crate::decl::{ParseResult, SliceBlock};
use crate::registry;
use crate::shape::{self, AxisOrder, SliceShape};
use crate::value::Num;
use serde::Serialize;
use std::collections::BTreeMap;

/// Normalized data for one parameter: fully-qualified dimension tuple to
/// numeric value. Sparse: tuples carrying the declared default are elided.
pub type TupleMap = BTreeMap<Vec<String>, Num>;

/// Counters for everything the pipeline skipped or repaired. Exposed so
/// callers can report data quality; none of these fail a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    /// Parameters with no dimension-registry entry.
    pub unknown_params: usize,
    /// Slice blocks whose shape could not be resolved.
    pub skipped_blocks: usize,
    /// Value tokens that did not parse as numbers (tuple dropped).
    pub coercion_failures: usize,
    /// Headerless tables whose axis roles fell back to positional order.
    pub ambiguous_slices: usize,
    /// Tuples dropped for an unresolved component or arity mismatch.
    pub dropped_tuples: usize,
}

/// Output of phase 2.
#[derive(Debug, Clone, Default)]
pub struct Interpretation {
    pub params: BTreeMap<String, TupleMap>,
    pub diagnostics: Diagnostics,
}

/// Interpret all parameters in `parsed`.
pub fn interpret(parsed: &ParseResult) -> Interpretation {
    let mut result = Interpretation::default();
    for param in &parsed.params {
        let Some(dims) = registry::dimensions(&param.name) else {
            result.diagnostics.unknown_params += 1;
            continue;
        };
        if dims.is_empty() {
            // Dimensionless settings are not tabular data.
            continue;
        }
        let default = param.default.as_deref().and_then(Num::parse);

        let mut out = TupleMap::new();
        for block in &param.slices {
            expand_block(
                dims,
                default,
                block,
                &parsed.sets,
                &mut out,
                &mut result.diagnostics,
            );
        }
        let out = finalize(dims, out, &parsed.sets, &mut result.diagnostics);
        if !out.is_empty() {
            result.params.insert(param.name.clone(), out);
        }
    }
    result
}

// ── dispatch ────────────────────────────────────────────────────────

fn expand_block(
    dims: &'static [&'static str],
    default: Option<Num>,
    block: &SliceBlock,
    sets: &BTreeMap<String, Vec<String>>,
    out: &mut TupleMap,
    diag: &mut Diagnostics,
) {
    let n = dims.len();
    let header: &[String] = block.header.as_deref().unwrap_or(&[]);
    match shape::classify(block, n) {
        SliceShape::Scalar => expand_key_value(block, default, out, diag),
        SliceShape::HeaderlessSingleAxis => expand_single_axis(block, default, out, diag),
        SliceShape::HeaderlessTwoAxis => expand_two_axis(dims, block, default, sets, out, diag),
        SliceShape::AllFixed => expand_all_fixed(n, header, block, default, out, diag),
        SliceShape::OneWildcard => expand_one_wildcard(n, header, block, default, out, diag),
        SliceShape::TwoWildcards => expand_two_wildcards(n, header, block, default, out, diag),
        SliceShape::OversizedHeader => {
            expand_oversized(dims, header, block, default, sets, out, diag);
        }
        SliceShape::Unresolvable => diag.skipped_blocks += 1,
    }
}

/// Final gate for every candidate fact: no unresolved components, numeric
/// value, default elided. Arity is settled afterwards in [`finalize`],
/// where region padding may still complete a short tuple.
fn emit(
    tuple: Vec<String>,
    raw: &str,
    default: Option<Num>,
    out: &mut TupleMap,
    diag: &mut Diagnostics,
) {
    if tuple.iter().any(|c| c == "*" || c.is_empty()) {
        diag.dropped_tuples += 1;
        return;
    }
    let Some(value) = Num::parse(raw) else {
        diag.coercion_failures += 1;
        return;
    };
    if default.is_some_and(|d| d == value) {
        // Sparse encoding: only non-default facts materialize.
        return;
    }
    out.insert(tuple, value);
}

// ── headerless blocks ───────────────────────────────────────────────

/// Bare key/value rows (or a scalar assignment): each row is a single-axis
/// fact. Short tuples are completed by region padding in [`finalize`].
fn expand_key_value(
    block: &SliceBlock,
    default: Option<Num>,
    out: &mut TupleMap,
    diag: &mut Diagnostics,
) {
    for row in &block.rows {
        if let Some(v) = row.values.first() {
            emit(vec![row.key.clone()], v, default, out, diag);
        }
    }
}

/// One-dimensional column table: each column label is itself the sole
/// dimension value.
fn expand_single_axis(
    block: &SliceBlock,
    default: Option<Num>,
    out: &mut TupleMap,
    diag: &mut Diagnostics,
) {
    for row in &block.rows {
        for (ci, col) in block.column_labels.iter().enumerate() {
            if let Some(v) = row.values.get(ci) {
                emit(vec![col.clone()], v, default, out, diag);
            }
        }
    }
}

/// Headerless two-axis table. The open axes are the trailing dimensions;
/// a single missing leading REGION is recovered by the padding pass.
fn expand_two_axis(
    dims: &'static [&'static str],
    block: &SliceBlock,
    default: Option<Num>,
    sets: &BTreeMap<String, Vec<String>>,
    out: &mut TupleMap,
    diag: &mut Diagnostics,
) {
    let n = dims.len();
    let (row_dim, col_dim) = (dims[n - 2], dims[n - 1]);
    let (order, ambiguous) = shape::axis_roles(block, row_dim, col_dim, sets);
    if ambiguous {
        diag.ambiguous_slices += 1;
    }
    for row in &block.rows {
        for (ci, col) in block.column_labels.iter().enumerate() {
            if let Some(v) = row.values.get(ci) {
                let tuple = match order {
                    AxisOrder::RowsFirst => vec![row.key.clone(), col.clone()],
                    AxisOrder::Swapped => vec![col.clone(), row.key.clone()],
                };
                emit(tuple, v, default, out, diag);
            }
        }
    }
}

// ── headed blocks ───────────────────────────────────────────────────

/// Fully fixed header: rows pair `(header.., key)` or
/// `(header.., key, column)` when columns are present.
fn expand_all_fixed(
    n: usize,
    header: &[String],
    block: &SliceBlock,
    default: Option<Num>,
    out: &mut TupleMap,
    diag: &mut Diagnostics,
) {
    for row in &block.rows {
        if block.column_labels.is_empty() {
            if let Some(v) = row.values.first() {
                let mut t = header.to_vec();
                t.push(row.key.clone());
                t.truncate(n);
                emit(t, v, default, out, diag);
            }
        } else {
            for (ci, col) in block.column_labels.iter().enumerate() {
                if let Some(v) = row.values.get(ci) {
                    let mut t = header.to_vec();
                    t.push(row.key.clone());
                    t.push(col.clone());
                    t.truncate(n);
                    emit(t, v, default, out, diag);
                }
            }
        }
    }
}

/// Single wildcard: filled by the row key, with the column label taking a
/// remaining open trailing dimension. When the header already names every
/// dimension, the column label fills the wildcard instead.
fn expand_one_wildcard(
    n: usize,
    header: &[String],
    block: &SliceBlock,
    default: Option<Num>,
    out: &mut TupleMap,
    diag: &mut Diagnostics,
) {
    let Some(wc) = header.iter().position(|t| t == "*") else {
        diag.skipped_blocks += 1;
        return;
    };
    if block.column_labels.is_empty() {
        for row in &block.rows {
            if let Some(v) = row.values.first() {
                let mut t = header.to_vec();
                t[wc] = row.key.clone();
                t.truncate(n);
                emit(t, v, default, out, diag);
            }
        }
        return;
    }
    for row in &block.rows {
        for (ci, col) in block.column_labels.iter().enumerate() {
            if let Some(v) = row.values.get(ci) {
                let mut t = header.to_vec();
                if header.len() >= n {
                    t[wc] = col.clone();
                } else {
                    t[wc] = row.key.clone();
                    t.push(col.clone());
                }
                t.truncate(n);
                emit(t, v, default, out, diag);
            }
        }
    }
}

/// Two (or more) wildcards: the first takes the row key, the second the
/// column label. Wildcards past the second also take the column label --
/// the last value the table can resolve. Without columns only the first
/// wildcard resolves; leftovers are rejected at emission.
fn expand_two_wildcards(
    n: usize,
    header: &[String],
    block: &SliceBlock,
    default: Option<Num>,
    out: &mut TupleMap,
    diag: &mut Diagnostics,
) {
    let wcs: Vec<usize> = header
        .iter()
        .enumerate()
        .filter(|(_, t)| *t == "*")
        .map(|(i, _)| i)
        .collect();
    if wcs.is_empty() {
        diag.skipped_blocks += 1;
        return;
    }
    if block.column_labels.is_empty() {
        for row in &block.rows {
            if let Some(v) = row.values.first() {
                let mut t = header.to_vec();
                t[wcs[0]] = row.key.clone();
                t.truncate(n);
                emit(t, v, default, out, diag);
            }
        }
        return;
    }
    for row in &block.rows {
        for (ci, col) in block.column_labels.iter().enumerate() {
            if let Some(v) = row.values.get(ci) {
                let mut t = header.to_vec();
                t[wcs[0]] = row.key.clone();
                for &w in &wcs[1..] {
                    t[w] = col.clone();
                }
                t.truncate(n);
                emit(t, v, default, out, diag);
            }
        }
    }
}

/// Header longer than the dimension list: exactly one slot only anchors
/// the column layout. Fixed tokens bind to dimensions by set membership;
/// the open dimensions are filled, in order, by the row key then the
/// column label.
fn expand_oversized(
    dims: &'static [&'static str],
    header: &[String],
    block: &SliceBlock,
    default: Option<Num>,
    sets: &BTreeMap<String, Vec<String>>,
    out: &mut TupleMap,
    diag: &mut Diagnostics,
) {
    let n = dims.len();
    let mut assigned: Vec<Option<String>> = vec![None; n];
    for tok in header.iter().filter(|t| *t != "*") {
        for (d, dim) in dims.iter().enumerate() {
            if assigned[d].is_some() {
                continue;
            }
            if shape::set_members(sets, dim).is_some_and(|m| m.iter().any(|x| x == tok)) {
                assigned[d] = Some(tok.clone());
                break;
            }
        }
    }
    let open: Vec<usize> = (0..n).filter(|&d| assigned[d].is_none()).collect();
    if open.len() > 2 || (open.len() == 2 && block.column_labels.is_empty()) {
        diag.skipped_blocks += 1;
        return;
    }

    for row in &block.rows {
        if block.column_labels.is_empty() {
            if let Some(v) = row.values.first() {
                let mut t = assigned.clone();
                if let Some(&d) = open.first() {
                    t[d] = Some(row.key.clone());
                }
                emit_resolved(t, v, default, out, diag);
            }
        } else {
            for (ci, col) in block.column_labels.iter().enumerate() {
                if let Some(v) = row.values.get(ci) {
                    let mut t = assigned.clone();
                    if let Some(&d) = open.first() {
                        t[d] = Some(row.key.clone());
                    }
                    if let Some(&d) = open.get(1) {
                        t[d] = Some(col.clone());
                    }
                    emit_resolved(t, v, default, out, diag);
                }
            }
        }
    }
}

fn emit_resolved(
    slots: Vec<Option<String>>,
    raw: &str,
    default: Option<Num>,
    out: &mut TupleMap,
    diag: &mut Diagnostics,
) {
    if slots.iter().any(Option::is_none) {
        diag.dropped_tuples += 1;
        return;
    }
    emit(slots.into_iter().flatten().collect(), raw, default, out, diag);
}

// ── arity enforcement ───────────────────────────────────────────────

/// Region padding plus the arity guarantee. Tuples short by exactly the
/// leading REGION dimension are completed when the model declares a single
/// region; everything else of the wrong arity is dropped. Every surviving
/// tuple has exactly `dims.len()` components.
fn finalize(
    dims: &'static [&'static str],
    out: TupleMap,
    sets: &BTreeMap<String, Vec<String>>,
    diag: &mut Diagnostics,
) -> TupleMap {
    let n = dims.len();
    let region = match sets.get("REGION") {
        Some(r) if r.len() == 1 && dims.first() == Some(&"REGION") => Some(r[0].clone()),
        _ => None,
    };

    let mut fixed = TupleMap::new();
    for (mut tuple, value) in out {
        if tuple.len() == n - 1 {
            if let Some(r) = &region {
                tuple.insert(0, r.clone());
            }
        }
        if tuple.len() == n {
            fixed.insert(tuple, value);
        } else {
            diag.dropped_tuples += 1;
        }
    }
    fixed
}
