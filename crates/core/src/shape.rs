//! Slice-shape classification and axis-role disambiguation.
//!
//! Every slice block is classified exactly once by [`classify`] and then
//! dispatched with an exhaustive match in the interpreter. Headerless
//! tables additionally need [`axis_roles`] to decide which declared axis
//! the rows belong to.

use crate::decl::SliceBlock;
use std::collections::BTreeMap;

/// The resolved layout of one slice block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceShape {
    /// Headerless, no column labels: a scalar assignment or bare
    /// key/value rows.
    Scalar,
    /// Headerless column table for a one-dimensional parameter; each
    /// column label is itself the dimension value.
    HeaderlessSingleAxis,
    /// Headerless column table: rows and columns supply the two open
    /// trailing axes.
    HeaderlessTwoAxis,
    /// Every header slot is a literal value; rows (and columns, when
    /// present) extend the fixed prefix.
    AllFixed,
    /// One `*` slot, filled by the row key -- or by the column label when
    /// the header already names every dimension.
    OneWildcard,
    /// First `*` is filled by the row key, second by the column label.
    /// The left-to-right convention is load-bearing: swapping it
    /// transposes data silently.
    TwoWildcards,
    /// Header longer than the dimension list; one slot is layout-only and
    /// fixed tokens are bound to dimensions by set membership.
    OversizedHeader,
    /// Cannot be expanded without emitting partial tuples; skipped.
    Unresolvable,
}

/// Classify a slice block against a parameter's dimension count.
/// Pure: looks only at the block's own header, columns, and rows.
pub fn classify(block: &SliceBlock, n_dims: usize) -> SliceShape {
    match &block.header {
        None if block.column_labels.is_empty() => SliceShape::Scalar,
        None if n_dims == 1 => SliceShape::HeaderlessSingleAxis,
        None => SliceShape::HeaderlessTwoAxis,
        Some(header) => {
            let wildcards = header.iter().filter(|t| *t == "*").count();
            if header.len() > n_dims && wildcards >= 2 {
                return SliceShape::OversizedHeader;
            }
            match wildcards {
                0 => SliceShape::AllFixed,
                1 => SliceShape::OneWildcard,
                2 => SliceShape::TwoWildcards,
                // 3+ without columns leaves slots no table axis can fill.
                _ if block.column_labels.is_empty() => SliceShape::Unresolvable,
                _ => SliceShape::TwoWildcards,
            }
        }
    }
}

/// Which declared axis the rows of a headerless table belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrder {
    /// Rows supply the first open dimension, columns the second.
    RowsFirst,
    /// Rows supply the second open dimension, columns the first.
    Swapped,
}

/// Decide row/column roles for a headerless two-axis table: the side whose
/// tokens are all members of the corresponding declared set wins. Ties and
/// inconclusive evidence fall back to `RowsFirst` (rows = first declared
/// dimension); the second return value flags that fallback.
pub fn axis_roles(
    block: &SliceBlock,
    row_dim: &str,
    col_dim: &str,
    sets: &BTreeMap<String, Vec<String>>,
) -> (AxisOrder, bool) {
    let rows: Vec<&str> = block.rows.iter().map(|r| r.key.as_str()).collect();
    let cols: Vec<&str> = block.column_labels.iter().map(String::as_str).collect();

    let straight = all_members(&rows, row_dim, sets) && all_members(&cols, col_dim, sets);
    let swapped = all_members(&rows, col_dim, sets) && all_members(&cols, row_dim, sets);

    match (straight, swapped) {
        (true, false) => (AxisOrder::RowsFirst, false),
        (false, true) => (AxisOrder::Swapped, false),
        _ => (AxisOrder::RowsFirst, true),
    }
}

fn all_members(tokens: &[&str], dim: &str, sets: &BTreeMap<String, Vec<String>>) -> bool {
    let Some(members) = set_members(sets, dim) else {
        return false;
    };
    !tokens.is_empty() && tokens.iter().all(|t| members.iter().any(|m| m == t))
}

/// Declared members for a dimension, resolving the FUEL/COMMODITY synonymy.
pub(crate) fn set_members<'a>(
    sets: &'a BTreeMap<String, Vec<String>>,
    dim: &str,
) -> Option<&'a [String]> {
    if let Some(m) = sets.get(dim) {
        return Some(m.as_slice());
    }
    match dim {
        "FUEL" => sets.get("COMMODITY").map(Vec::as_slice),
        "COMMODITY" => sets.get("FUEL").map(Vec::as_slice),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::RowEntry;

    fn block(header: Option<&[&str]>, cols: &[&str], row_keys: &[&str]) -> SliceBlock {
        SliceBlock {
            header: header.map(|h| h.iter().map(|s| (*s).to_owned()).collect()),
            column_labels: cols.iter().map(|s| (*s).to_owned()).collect(),
            rows: row_keys
                .iter()
                .map(|k| RowEntry {
                    key: (*k).to_owned(),
                    values: vec!["1".to_owned()],
                })
                .collect(),
        }
    }

    fn sets(pairs: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
        pairs
            .iter()
            .map(|(name, members)| {
                (
                    (*name).to_owned(),
                    members.iter().map(|m| (*m).to_owned()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn classifies_every_layout() {
        assert_eq!(classify(&block(None, &[], &["x"]), 1), SliceShape::Scalar);
        assert_eq!(
            classify(&block(None, &["UTOPIA"], &["x"]), 1),
            SliceShape::HeaderlessSingleAxis
        );
        assert_eq!(
            classify(&block(None, &["1990"], &["ID"]), 2),
            SliceShape::HeaderlessTwoAxis
        );
        assert_eq!(
            classify(&block(Some(&["UTOPIA"]), &[], &["E01"]), 2),
            SliceShape::AllFixed
        );
        assert_eq!(
            classify(&block(Some(&["UTOPIA", "*"]), &[], &["E01"]), 2),
            SliceShape::OneWildcard
        );
        assert_eq!(
            classify(&block(Some(&["UTOPIA", "*", "*"]), &["1990"], &["E01"]), 3),
            SliceShape::TwoWildcards
        );
        assert_eq!(
            classify(&block(Some(&["UTOPIA", "X", "*", "*"]), &["1990"], &["E01"]), 3),
            SliceShape::OversizedHeader
        );
        assert_eq!(
            classify(&block(Some(&["*", "*", "*"]), &[], &["E01"]), 3),
            SliceShape::Unresolvable
        );
        // 3+ wildcards with columns stays expandable, best effort
        assert_eq!(
            classify(&block(Some(&["*", "*", "*"]), &["1990"], &["E01"]), 3),
            SliceShape::TwoWildcards
        );
    }

    #[test]
    fn axis_roles_follow_set_membership() {
        let sets = sets(&[
            ("TIMESLICE", &["ID", "IN"]),
            ("YEAR", &["1990", "1995"]),
        ]);

        // Rows are timeslices, columns are years.
        let straight = block(None, &["1990", "1995"], &["ID", "IN"]);
        assert_eq!(
            axis_roles(&straight, "TIMESLICE", "YEAR", &sets),
            (AxisOrder::RowsFirst, false)
        );

        // Transposed table: rows are years, columns are timeslices.
        let transposed = block(None, &["ID"], &["1990", "1995"]);
        assert_eq!(
            axis_roles(&transposed, "TIMESLICE", "YEAR", &sets),
            (AxisOrder::Swapped, false)
        );
    }

    #[test]
    fn inconclusive_membership_falls_back_to_rows_first() {
        let sets = sets(&[("REGION", &["UTOPIA"])]);
        let b = block(None, &["1990"], &["XX"]);
        assert_eq!(
            axis_roles(&b, "REGION", "YEAR", &sets),
            (AxisOrder::RowsFirst, true)
        );
    }

    #[test]
    fn fuel_and_commodity_are_synonyms_for_membership() {
        let sets = sets(&[("COMMODITY", &["DSL", "ELC"])]);
        assert_eq!(
            set_members(&sets, "FUEL").map(<[String]>::len),
            Some(2)
        );
    }
}
