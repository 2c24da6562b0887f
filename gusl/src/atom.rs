//! Atoms of the GusL language
//!
//! Every atom is a single ASCII character. The literal atoms occupy the
//! contiguous range `'1'..='@'` and push the values `1..=16`.
use smallvec::SmallVec;
use strum::{EnumDiscriminants, EnumIs, EnumIter, IntoEnumIterator};

use crate::utils::Error;

/// Every atom symbol, in canonical order.
pub const ALPHABET: &str = "pmtdrwcoe123456789:;<=>?@PFn";

/// A single GusL operator symbol.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, EnumIs, EnumDiscriminants)]
#[strum_discriminants(name(AtomKind))]
#[strum_discriminants(derive(Hash, EnumIter))]
pub enum Atom {
    /// `p`: `b a` becomes `b + a`
    Add,
    /// `m`: `b a` becomes `b - a`
    Sub,
    /// `t`: `b a` becomes `b * a`
    Mul,
    /// `d`: `b a` becomes `b / a`, truncated toward zero
    Div,
    /// `r`: `b a` becomes `b % a`, with the sign of `b`
    Rem,
    /// `w`: `b a` becomes `a b`
    Swap,
    /// `c`: `a` becomes `a a`
    Dup,
    /// `o`: `a` is discarded
    Drop,
    /// `e`: `b a` becomes `b ^ a`
    Pow,
    /// `1`..`@`: pushes a constant in `1..=16`
    Literal(u8),
    /// `P`: `n` becomes the `n`th prime
    Prime,
    /// `F`: `n` becomes `n!`
    Factorial,
    /// `n`: pushes the 1-based position of the term being predicted
    Ordinal,
}

impl Atom {
    /// Number of atoms in the alphabet.
    pub const COUNT: usize = 28;

    /// Largest value pushed by a literal atom.
    pub const MAX_LITERAL: u8 = 16;

    /// Decode an atom from its symbol.
    pub fn from_char(symbol: char) -> Option<Self> {
        let atom = match symbol {
            'p' => Atom::Add,
            'm' => Atom::Sub,
            't' => Atom::Mul,
            'd' => Atom::Div,
            'r' => Atom::Rem,
            'w' => Atom::Swap,
            'c' => Atom::Dup,
            'o' => Atom::Drop,
            'e' => Atom::Pow,
            '1'..='@' => Atom::Literal(symbol as u8 - b'0'),
            'P' => Atom::Prime,
            'F' => Atom::Factorial,
            'n' => Atom::Ordinal,
            _ => return None,
        };
        Some(atom)
    }

    /// Returns the symbol of this atom.
    pub fn to_char(self) -> char {
        match self {
            Atom::Add => 'p',
            Atom::Sub => 'm',
            Atom::Mul => 't',
            Atom::Div => 'd',
            Atom::Rem => 'r',
            Atom::Swap => 'w',
            Atom::Dup => 'c',
            Atom::Drop => 'o',
            Atom::Pow => 'e',
            Atom::Literal(value) => (b'0' + value) as char,
            Atom::Prime => 'P',
            Atom::Factorial => 'F',
            Atom::Ordinal => 'n',
        }
    }

    /// Iterate over the whole alphabet in canonical order.
    pub fn iter() -> impl Iterator<Item = Atom> {
        ALPHABET.chars().filter_map(Atom::from_char)
    }

    /// Number of stack values consumed by this atom.
    pub fn arity(self) -> usize {
        match self {
            Atom::Literal(_) | Atom::Ordinal => 0,
            Atom::Dup | Atom::Drop | Atom::Prime | Atom::Factorial => 1,
            Atom::Add | Atom::Sub | Atom::Mul | Atom::Div | Atom::Rem | Atom::Pow | Atom::Swap => {
                2
            }
        }
    }

    /// Leaves of the implicit expression tree.
    pub fn is_leaf(self) -> bool {
        self.arity() == 0
    }

    /// Stack-shape atoms that do not introduce a node of their own in the
    /// implicit tree (they only reorder or drop existing values).
    pub fn is_tree_neutral(self) -> bool {
        matches!(self, Atom::Swap | Atom::Drop)
    }

    pub fn kind(self) -> AtomKind {
        self.into()
    }
}

impl std::fmt::Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl AtomKind {
    /// Human readable name of the operation.
    pub fn to_str(&self) -> &'static str {
        match self {
            AtomKind::Add => "plus",
            AtomKind::Sub => "minus",
            AtomKind::Mul => "times",
            AtomKind::Div => "divide",
            AtomKind::Rem => "remainder",
            AtomKind::Swap => "swap",
            AtomKind::Dup => "copy",
            AtomKind::Drop => "pop",
            AtomKind::Pow => "exp",
            AtomKind::Literal => "literal",
            AtomKind::Prime => "prime",
            AtomKind::Factorial => "factorial",
            AtomKind::Ordinal => "number",
        }
    }

    /// Parse an operation from its name.
    pub fn from_str(s: &str) -> Option<Self> {
        AtomKind::iter().find(|kind| kind.to_str() == s)
    }
}

impl std::fmt::Display for AtomKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

/// Decode a whole program, reporting the first character that is not an atom.
pub fn parse_atoms(program: &str) -> Result<SmallVec<Atom, 16>, Error> {
    program
        .chars()
        .enumerate()
        .map(|(position, found)| Atom::from_char(found).ok_or(Error::UnknownAtom { found, position }))
        .collect()
}

/// Encode a sequence of atoms back into program text.
pub fn to_program(atoms: &[Atom]) -> String {
    atoms.iter().map(|atom| atom.to_char()).collect()
}
