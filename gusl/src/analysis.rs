//! Structural analysis of GusL programs.
//!
//! Programs are never parsed into an explicit tree. Instead, the tree rooted at
//! the last atom is recovered by scanning right to left and counting how many
//! operand slots are still unfilled. [`simplify`] uses that scan to find the
//! suffix that actually contributes to the result, and [`ProgramFilter`]
//! combines it with a few cheap syntactic checks to discard candidates that
//! are not worth interpreting.
use strum::EnumIs;
use thiserror::Error;

use crate::atom::Atom;

/// Operator pairs that are either meaningless or nasty: pairs that cancel out,
/// pairs dominated by a shorter equivalent, and pairs that mostly underflow.
///
/// Entries that are not valid atom pairs never match and are kept as is.
pub const DEFAULT_DENYLIST: &[&str] = &[
    "po", "to", "eo", "ro", "do", "mo", "cp", "ct", "cr", "cd", //
    "cm", "cp", "cw", "wp", "wt", "ww", "no", "nn", "Po", "PP", //
    "PF", "Fe", "Fr", "Fo", "FP", "FF", "It", "le", "lr", "Id", //
    "lc", "lo", "1P", "1F", "11", "12", "13", "14", "15", "2c", //
    "2o", "2P", "2F", "3c", "3o", "3P", "3F", "4c", "4o", "5c", //
    "5o", ":c", ":o", ":e", "eP",
];

/// Why a candidate program was not admitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIs, Error)]
pub enum Rejection {
    #[error("The program is empty.")]
    Empty,

    #[error("`{found}` at position {position} is not a GusL atom.")]
    UnknownAtom { found: char, position: usize },

    /// Ending on a constant only ever predicts that constant.
    #[error("The program ends with the literal `{literal}`.")]
    TrailingLiteral { literal: char },

    #[error("The program contains the denied pair `{pair}`.")]
    DeniedPair { pair: String },

    /// Some leading atoms are unreachable from the last atom.
    #[error("Only the suffix `{simplified}` contributes to the result.")]
    UnreachablePrefix { simplified: String },
}

/// Strip the leading atoms that the implicit tree rooted at the last atom
/// never reaches.
///
/// Starting from `arity(last)` pending operand slots, every atom further left
/// fills one slot and opens `arity(atom)` new ones; swap and discard only
/// reorder values and leave the count unchanged. The scan stops as soon as no
/// slot is pending, and the scanned suffix is returned. When the start of the
/// program is reached first, the remaining slots are filled from the stack
/// and the whole program is kept.
///
/// Characters that are not atoms are treated as leaves.
///
/// ```
/// assert_eq!(gusl::simplify("ppp28:tnm"), "8:tnm");
/// assert_eq!(gusl::simplify("2p"), "2p");
/// ```
pub fn simplify(program: &str) -> &str {
    let mut symbols = program.char_indices().rev();
    let Some((mut start, last)) = symbols.next() else {
        return program;
    };

    let mut pending = arity_of(last);
    while pending > 0 {
        let Some((offset, symbol)) = symbols.next() else {
            break;
        };
        start = offset;

        match Atom::from_char(symbol) {
            Some(atom) if atom.is_tree_neutral() => {}
            _ => pending = pending - 1 + arity_of(symbol),
        }
    }

    &program[start..]
}

fn arity_of(symbol: char) -> usize {
    Atom::from_char(symbol).map_or(0, Atom::arity)
}

/// Admissibility filter applied to every enumerated hypothesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramFilter {
    denylist: Vec<String>,
}

impl Default for ProgramFilter {
    fn default() -> Self {
        Self::new(DEFAULT_DENYLIST.iter().copied())
    }
}

impl ProgramFilter {
    pub fn new<I, S>(denylist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            denylist: denylist.into_iter().map(Into::into).collect(),
        }
    }

    pub fn denylist(&self) -> &[String] {
        &self.denylist
    }

    /// Returns `true` when the program is worth interpreting.
    pub fn is_admissible(&self, program: &str) -> bool {
        self.check(program).is_ok()
    }

    /// Like [`ProgramFilter::is_admissible`] but reports the first failed check.
    pub fn check(&self, program: &str) -> Result<(), Rejection> {
        check_with(program, self.denylist.iter().map(String::as_str))
    }
}

/// [`ProgramFilter::is_admissible`] with the [`DEFAULT_DENYLIST`].
pub fn is_admissible(program: &str) -> bool {
    check_with(program, DEFAULT_DENYLIST.iter().copied()).is_ok()
}

fn check_with<'a>(program: &str, mut denylist: impl Iterator<Item = &'a str>) -> Result<(), Rejection> {
    let mut last = None;
    for (position, found) in program.chars().enumerate() {
        match Atom::from_char(found) {
            Some(atom) => last = Some(atom),
            None => return Err(Rejection::UnknownAtom { found, position }),
        }
    }

    let Some(last) = last else {
        return Err(Rejection::Empty);
    };

    if program.len() > 1 && last.is_literal() {
        return Err(Rejection::TrailingLiteral {
            literal: last.to_char(),
        });
    }

    if let Some(pair) = denylist.find(|pair| !pair.is_empty() && program.contains(pair)) {
        return Err(Rejection::DeniedPair {
            pair: pair.to_string(),
        });
    }

    let simplified = simplify(program);
    if simplified != program {
        return Err(Rejection::UnreachablePrefix {
            simplified: simplified.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simplify_keeps_programs_reading_history() {
        assert_eq!(simplify("p"), "p");
        assert_eq!(simplify("1p"), "1p");
        assert_eq!(simplify("wm"), "wm");
        assert_eq!(simplify("ww"), "ww");
        assert_eq!(simplify(""), "");
    }

    #[test]
    fn simplify_drops_unreachable_prefix() {
        assert_eq!(simplify("ppp28:tnm"), "8:tnm");
        assert_eq!(simplify("12"), "2");
        assert_eq!(simplify("34p"), "34p");
        assert_eq!(simplify("934p"), "34p");
        assert_eq!(simplify("5n"), "n");
    }

    #[test]
    fn swap_and_discard_do_not_fill_slots() {
        // `w` is skipped, so both literals are still needed by `m`.
        assert_eq!(simplify("12wm"), "12wm");
        // Once the slots are filled, a leading `o` is unreachable.
        assert_eq!(simplify("o12m"), "12m");
    }

    #[test]
    fn default_denylist_is_literal() {
        assert_eq!(DEFAULT_DENYLIST.len(), 55);
        assert_eq!(DEFAULT_DENYLIST.first(), Some(&"po"));
        assert_eq!(DEFAULT_DENYLIST.last(), Some(&"eP"));
    }

    #[test]
    fn check_reports_first_failure() {
        let filter = ProgramFilter::default();
        assert_eq!(filter.check(""), Err(Rejection::Empty));
        assert!(filter.check("p2").unwrap_err().is_trailing_literal());
        assert_eq!(
            filter.check("1cp"),
            Err(Rejection::DeniedPair {
                pair: "cp".to_string()
            })
        );
        assert_eq!(
            filter.check("73n"),
            Err(Rejection::UnreachablePrefix {
                simplified: "n".to_string()
            })
        );
        assert_eq!(
            filter.check("1x"),
            Err(Rejection::UnknownAtom {
                found: 'x',
                position: 1
            })
        );
        assert_eq!(filter.check("2p"), Ok(()));
    }

    #[test]
    fn custom_denylist() {
        let filter = ProgramFilter::new(["2p"]);
        assert!(!filter.is_admissible("2p"));
        assert!(filter.is_admissible("cp"));
        assert_eq!(filter.denylist(), &["2p".to_string()]);
    }
}
