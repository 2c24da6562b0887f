use strum::EnumIs;
use thiserror::Error;

use crate::atom::ALPHABET;

#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIs, Error)]
pub enum Error {
    /// A program contains a character outside of the GusL alphabet.
    #[error(
        "`{found}` at position {position} is not a GusL atom. Only the following atoms are allowed: {alphabet}",
        alphabet = ALPHABET
    )]
    UnknownAtom { found: char, position: usize },

    /// A program is too long to be put into words.
    #[error("Cannot describe a program of {len} atoms, the limit is {max}")]
    ProgramTooLong { len: usize, max: usize },
}
