//! Phase 1: declaration parsing.
//!
//! Classifies each statement as a `set` or `param` declaration and extracts
//! its raw syntactic shape: set members, or parameter default plus slice
//! blocks (header / column labels / data rows). Unknown keywords are
//! ignored and malformed statements degrade to declaration-only entries --
//! nothing in this phase fails.

use crate::decl::{ParseResult, ParsedParam, RowEntry, SliceBlock};
use crate::statements::{split_statements, split_tokens};

/// Parse data-file content into sets and parameters.
pub fn parse_str(text: &str) -> ParseResult {
    let mut result = ParseResult::default();
    for stmt in split_statements(text) {
        let tokens = split_tokens(&stmt);
        let Some(first) = tokens.first() else { continue };
        match first.to_lowercase().as_str() {
            "set" => handle_set(&tokens, &mut result),
            "param" => handle_param(&tokens, &mut result),
            "end" => break,
            _ => {}
        }
    }
    result
}

// ── set statements ──────────────────────────────────────────────────

/// `set NAME := m1 m2 ...` -- a missing `:=` is tolerated (members are
/// everything after the name), and `:` `=` as two tokens is accepted.
fn handle_set(tokens: &[String], result: &mut ParseResult) {
    if tokens.len() < 2 {
        return;
    }
    let name = tokens[1].clone();

    let mut members: &[String] = &tokens[2..];
    for i in 2..tokens.len() {
        if tokens[i] == ":=" {
            members = &tokens[i + 1..];
            break;
        }
        if tokens[i] == ":" && tokens.get(i + 1).map(String::as_str) == Some("=") {
            members = &tokens[i + 2..];
            break;
        }
    }

    let entry = result.sets.entry(name).or_default();
    for m in members {
        if !entry.contains(m) {
            entry.push(m.clone());
        }
    }
}

// ── param statements ────────────────────────────────────────────────

/// Parse a full param statement:
///
/// - `param Name default V :=`            (declaration-only)
/// - `param Name := value`                (scalar assignment)
/// - `param Name : c1 c2 ... := rows`     (headerless table)
/// - `param Name := [a,*,...]: cols := rows [b,*,...] ...` (headed slices)
fn handle_param(tokens: &[String], result: &mut ParseResult) {
    if tokens.len() < 2 {
        return;
    }
    let name = tokens[1].clone();

    let mut default = None;
    let mut assign_idx = None;
    let mut assign_len = 1;
    let mut bare_colon_idx = None;
    let mut i = 2;
    while i < tokens.len() {
        let tok = &tokens[i];
        if tok.eq_ignore_ascii_case("default") {
            match tokens.get(i + 1) {
                Some(next) if next != ":=" => {
                    default = Some(next.clone());
                    i += 2;
                }
                _ => i += 1,
            }
            continue;
        }
        if tok == ":=" {
            assign_idx = Some(i);
            break;
        }
        if tok == ":" {
            if tokens.get(i + 1).map(String::as_str) == Some("=") {
                assign_idx = Some(i);
                assign_len = 2;
                break;
            }
            if bare_colon_idx.is_none() {
                bare_colon_idx = Some(i);
            }
        }
        i += 1;
    }

    let mut param = ParsedParam {
        name: name.clone(),
        default,
        slices: Vec::new(),
    };

    let Some(assign) = assign_idx else {
        // No ':=' at all: record as declaration-only, never raise.
        result.params.push(param);
        return;
    };
    let body = &tokens[assign + assign_len..];

    // A bare ':' before ':=' introduces column labels for a headerless
    // table (e.g. `param YearSplit : 1990 1995 := ...`).
    if let Some(colon) = bare_colon_idx {
        let labels: Vec<String> = tokens[colon + 1..assign]
            .iter()
            .filter(|t| *t != "=" && *t != ":")
            .cloned()
            .collect();
        if !labels.is_empty() {
            let mut block = SliceBlock {
                header: None,
                column_labels: labels,
                rows: Vec::new(),
            };
            parse_data_rows(body, 0, &mut block);
            param.slices.push(block);
            result.params.push(param);
            return;
        }
    }

    if body.is_empty() {
        result.params.push(param);
        return;
    }

    // Scalar assignment, e.g. `param ResultsPath := CSV`.
    if body.len() == 1 && !body[0].starts_with('[') {
        param.slices.push(SliceBlock {
            header: None,
            column_labels: Vec::new(),
            rows: vec![RowEntry {
                key: name,
                values: vec![body[0].clone()],
            }],
        });
        result.params.push(param);
        return;
    }

    parse_param_body(body, &mut param);
    result.params.push(param);
}

/// Walk a param body: `[...]` bracket groups open headed slices, a
/// following `: c1 c2 ... :=` run supplies column labels, and everything
/// else is data rows for the most recent slice.
fn parse_param_body(body: &[String], param: &mut ParsedParam) {
    let mut i = 0;
    let mut columns_pending = false;

    while i < body.len() {
        let tok = &body[i];

        if tok.starts_with('[') {
            // Slice header, possibly spread over several tokens.
            let mut header_str = tok.clone();
            while !header_str.contains(']') && i + 1 < body.len() {
                i += 1;
                header_str.push(' ');
                header_str.push_str(&body[i]);
            }
            let trimmed =
                header_str.trim_matches(|c| c == '[' || c == ']' || c == ':' || c == ' ');
            let parts: Vec<String> = trimmed.split(',').map(|p| p.trim().to_owned()).collect();
            param.slices.push(SliceBlock {
                header: Some(parts),
                column_labels: Vec::new(),
                rows: Vec::new(),
            });
            columns_pending = true;
            i += 1;
            continue;
        }

        if columns_pending {
            columns_pending = false;
            if let Some((labels, next)) = scan_column_labels(body, i) {
                if let Some(block) = param.slices.last_mut() {
                    block.column_labels = labels;
                }
                i = next;
                continue;
            }
            // No ':=' before the next bracket: key/value rows, fall through.
        }

        match param.slices.last_mut() {
            Some(block) => {
                parse_data_rows(body, i, block);
                i = next_slice_or_end(body, i);
            }
            None => {
                // No header seen yet: either an implicit headerless column
                // table (labels terminated by ':='), or bare key/value rows.
                if let Some((labels, next)) = scan_column_labels(body, i) {
                    param.slices.push(SliceBlock {
                        header: None,
                        column_labels: labels,
                        rows: Vec::new(),
                    });
                    i = next;
                } else {
                    let mut block = SliceBlock::default();
                    parse_data_rows(body, i, &mut block);
                    i = next_slice_or_end(body, i);
                    param.slices.push(block);
                }
            }
        }
    }
}

/// Scan forward for column labels terminated by `:=`. Returns the labels
/// and the index just past the `:=`, or None if a bracket or the end of
/// the body arrives first (the tokens were data rows, not labels).
fn scan_column_labels(body: &[String], start: usize) -> Option<(Vec<String>, usize)> {
    let mut labels = Vec::new();
    let mut j = start;
    while j < body.len() {
        let t = &body[j];
        if t.starts_with('[') {
            return None;
        }
        if t == ":=" {
            return Some((labels, j + 1));
        }
        if t != ":" {
            labels.push(t.clone());
        }
        j += 1;
    }
    None
}

/// Parse data rows starting at `start` until a new slice header or the end
/// of the body. With column labels, each row takes up to one value per
/// column; without, values are consumed greedily while they look numeric.
fn parse_data_rows(body: &[String], start: usize, block: &mut SliceBlock) {
    let num_cols = block.column_labels.len();
    let mut i = start;
    while i < body.len() {
        let tok = &body[i];
        if tok.starts_with('[') {
            break;
        }
        let key = tok.clone();
        let mut values = Vec::new();
        let mut j = i + 1;
        while j < body.len() {
            let t = &body[j];
            if t.starts_with('[') || t == ":=" {
                break;
            }
            if num_cols > 0 {
                if values.len() >= num_cols {
                    break;
                }
            } else if !looks_numeric(t) {
                break;
            }
            values.push(t.clone());
            j += 1;
        }
        if !values.is_empty() {
            block.rows.push(RowEntry { key, values });
        }
        i = j;
    }
}

fn looks_numeric(tok: &str) -> bool {
    tok.parse::<f64>().is_ok()
}

fn next_slice_or_end(body: &[String], start: usize) -> usize {
    body[start..]
        .iter()
        .position(|t| t.starts_with('['))
        .map_or(body.len(), |p| start + p)
}
