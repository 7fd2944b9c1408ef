//! Sequence alignment on top of the `similar` crate.
//!
//! Everything above this module consumes [`Opcode`]s and never calls into
//! `similar` directly.

use std::hash::Hash;
use std::ops::Range;

use log::trace;
use similar::{capture_diff_slices, Algorithm, DiffTag};

use crate::error::{DiffError, Result};

/// A tagged pair of half-open ranges relating a stretch of the old
/// sequence to a stretch of the new one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opcode {
    /// How the two ranges relate
    pub tag: DiffTag,

    /// Range in the old sequence
    pub old: Range<usize>,

    /// Range in the new sequence
    pub new: Range<usize>,
}

impl Opcode {
    /// Create a new opcode
    pub fn new(tag: DiffTag, old: Range<usize>, new: Range<usize>) -> Self {
        Self { tag, old, new }
    }
}

/// Align two sequences and return the opcodes partitioning them.
///
/// The returned opcodes are contiguous and cover both sequences exactly
/// once; anything else is reported as
/// [`DiffError::AlignmentContractViolation`].
pub fn align<T: Hash + Eq + Ord>(old: &[T], new: &[T], algorithm: Algorithm) -> Result<Vec<Opcode>> {
    let mut old_pos = 0;
    let mut new_pos = 0;
    let mut opcodes = Vec::new();

    for op in capture_diff_slices(algorithm, old, new) {
        let (tag, old_range, new_range) = op.as_tag_tuple();

        // `similar` does not keep the untouched side of a delete or insert
        // up to date, so edits are placed at the cursors by length
        let opcode = match tag {
            DiffTag::Equal => Opcode::new(tag, old_range, new_range),
            DiffTag::Delete => Opcode::new(tag, old_pos..old_pos + old_range.len(), new_pos..new_pos),
            DiffTag::Insert => Opcode::new(tag, old_pos..old_pos, new_pos..new_pos + new_range.len()),
            DiffTag::Replace => Opcode::new(
                tag,
                old_pos..old_pos + old_range.len(),
                new_pos..new_pos + new_range.len(),
            ),
        };
        old_pos = opcode.old.end;
        new_pos = opcode.new.end;
        opcodes.push(opcode);
    }

    check_opcodes(&opcodes, old.len(), new.len())?;
    trace!(
        "aligned {} x {} items into {} opcodes",
        old.len(),
        new.len(),
        opcodes.len()
    );

    Ok(opcodes)
}

/// Align two strings character by character.
///
/// Opcode ranges index characters, not bytes.
pub fn align_chars(old: &str, new: &str, algorithm: Algorithm) -> Result<Vec<Opcode>> {
    let old: Vec<char> = old.chars().collect();
    let new: Vec<char> = new.chars().collect();
    align(&old, &new, algorithm)
}

/// Verify that opcodes partition `0..old_len` and `0..new_len` in order and
/// that each tag agrees with the shape of its ranges.
pub(crate) fn check_opcodes(opcodes: &[Opcode], old_len: usize, new_len: usize) -> Result<()> {
    let mut old_pos = 0;
    let mut new_pos = 0;

    for (idx, op) in opcodes.iter().enumerate() {
        if op.old.start != old_pos || op.new.start != new_pos {
            return Err(DiffError::contract(format!(
                "opcode {idx} starts at ({}, {}), expected ({old_pos}, {new_pos})",
                op.old.start, op.new.start
            )));
        }
        if op.old.end < op.old.start || op.new.end < op.new.start {
            return Err(DiffError::contract(format!("opcode {idx} has a reversed range")));
        }

        let shape_ok = match op.tag {
            DiffTag::Equal => op.old.len() == op.new.len(),
            DiffTag::Delete => op.new.is_empty(),
            DiffTag::Insert => op.old.is_empty(),
            DiffTag::Replace => true,
        };
        if !shape_ok {
            return Err(DiffError::contract(format!(
                "opcode {idx} tagged {:?} spans {:?} and {:?}",
                op.tag, op.old, op.new
            )));
        }

        old_pos = op.old.end;
        new_pos = op.new.end;
    }

    if old_pos != old_len || new_pos != new_len {
        return Err(DiffError::contract(format!(
            "opcodes cover ({old_pos}, {new_pos}) of ({old_len}, {new_len})"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_line_alignment() {
        let old = ["a", "b", "c"];
        let new = ["a", "x", "c"];
        let opcodes = align(&old, &new, Algorithm::Myers).unwrap();

        assert_eq!(
            opcodes,
            vec![
                Opcode::new(DiffTag::Equal, 0..1, 0..1),
                Opcode::new(DiffTag::Replace, 1..2, 1..2),
                Opcode::new(DiffTag::Equal, 2..3, 2..3),
            ]
        );
    }

    #[test]
    fn test_empty_inputs_have_no_opcodes() {
        let empty: [&str; 0] = [];
        assert!(align(&empty, &empty, Algorithm::Myers).unwrap().is_empty());
    }

    #[test]
    fn test_one_sided_inputs() {
        let empty: [&str; 0] = [];
        let lines = ["a", "b"];

        let inserted = align(&empty, &lines, Algorithm::Myers).unwrap();
        assert_eq!(inserted, vec![Opcode::new(DiffTag::Insert, 0..0, 0..2)]);

        let deleted = align(&lines, &empty, Algorithm::Myers).unwrap();
        assert_eq!(deleted, vec![Opcode::new(DiffTag::Delete, 0..2, 0..0)]);
    }

    #[test]
    fn test_char_ranges_count_characters() {
        let opcodes = align_chars("héllo", "hallo", Algorithm::Myers).unwrap();
        let replaced: Vec<_> = opcodes
            .iter()
            .filter(|op| op.tag != DiffTag::Equal)
            .collect();

        assert_eq!(replaced.len(), 1);
        assert_eq!(replaced[0].old, 1..2);
        assert_eq!(replaced[0].new, 1..2);
    }

    #[test]
    fn test_every_algorithm_honours_the_contract() {
        let old = ["fn main() {", "    a();", "    b();", "}"];
        let new = ["fn main() {", "    b();", "    c();", "    a();", "}"];
        for algorithm in [Algorithm::Myers, Algorithm::Patience, Algorithm::Lcs] {
            assert!(align(&old, &new, algorithm).is_ok());
        }
    }

    #[test]
    fn test_stale_side_indices_are_pinned_to_the_cursor() {
        let opcodes = align_chars("a ", "  ", Algorithm::Myers).unwrap();
        check_opcodes(&opcodes, 2, 2).unwrap();

        let removed: Vec<_> = opcodes
            .iter()
            .filter(|op| matches!(op.tag, DiffTag::Delete | DiffTag::Replace))
            .map(|op| op.old.clone())
            .collect();
        assert_eq!(removed, vec![0..1]);

        let added: usize = opcodes
            .iter()
            .filter(|op| matches!(op.tag, DiffTag::Insert | DiffTag::Replace))
            .map(|op| op.new.len())
            .sum();
        assert_eq!(added, 1);
    }

    #[test]
    fn test_mixed_edits_stay_contiguous() {
        let pairs = [
            ("a ", "  "),
            ("ab", "ba"),
            ("abcabba", "cbabac"),
            ("\n\na\n\na ", "\n \n\n  "),
            ("xay", "ayz"),
        ];
        for (old, new) in pairs {
            for algorithm in [Algorithm::Myers, Algorithm::Patience, Algorithm::Lcs] {
                let opcodes = align_chars(old, new, algorithm).unwrap();
                let old_len = old.chars().count();
                let new_len = new.chars().count();
                check_opcodes(&opcodes, old_len, new_len).unwrap();
            }
        }
    }

    #[test]
    fn test_gap_is_a_contract_violation() {
        let opcodes = vec![
            Opcode::new(DiffTag::Equal, 0..1, 0..1),
            Opcode::new(DiffTag::Equal, 2..3, 2..3),
        ];
        let err = check_opcodes(&opcodes, 3, 3).unwrap_err();
        assert!(matches!(err, DiffError::AlignmentContractViolation { .. }));
    }

    #[test]
    fn test_short_coverage_is_a_contract_violation() {
        let opcodes = vec![Opcode::new(DiffTag::Equal, 0..1, 0..1)];
        assert!(check_opcodes(&opcodes, 2, 1).is_err());
    }

    #[test]
    fn test_mismatched_tag_shape_is_a_contract_violation() {
        let opcodes = vec![Opcode::new(DiffTag::Insert, 0..1, 0..1)];
        assert!(check_opcodes(&opcodes, 1, 1).is_err());

        let opcodes = vec![Opcode::new(DiffTag::Equal, 0..1, 0..2)];
        assert!(check_opcodes(&opcodes, 1, 2).is_err());
    }
}
