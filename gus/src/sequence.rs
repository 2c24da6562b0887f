//! Parsing of user-supplied integer sequences.
use std::ops::Range;

use chumsky::{prelude::*, text::digits};
use thiserror::Error;

use crate::utils::error::{GusError, GusResult};

/// One problem found while parsing a sequence, located by byte offsets into
/// the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (at {}..{})", .span.start, .span.end)]
pub struct SequenceDiagnostic {
    pub message: String,
    pub span: Range<usize>,
}

impl SequenceDiagnostic {
    fn from_rich(error: &Rich<'_, char>) -> Self {
        let span = error.span();
        Self {
            message: error.to_string(),
            span: span.start..span.end,
        }
    }
}

/// A signed decimal literal fitting in an `i32`.
pub fn integer_parser<'src>()
-> impl Parser<'src, &'src str, i32, extra::Err<Rich<'src, char>>> + Clone {
    one_of("+-")
        .or_not()
        .then(digits(10).at_least(1))
        .to_slice()
        .try_map(|literal: &str, span| {
            literal.parse::<i32>().map_err(|_| {
                Rich::custom(
                    span,
                    format!("`{literal}` does not fit in a 32-bit signed integer"),
                )
            })
        })
        .labelled("integer")
}

/// Integers separated by commas and/or whitespace, spanning the whole input.
pub fn sequence_parser<'src>()
-> impl Parser<'src, &'src str, Vec<i32>, extra::Err<Rich<'src, char>>> + Clone {
    let separator = one_of(", \t\r\n").repeated().at_least(1);

    integer_parser()
        .separated_by(separator)
        .allow_leading()
        .allow_trailing()
        .collect::<Vec<_>>()
        .then_ignore(end())
}

/// Parse a sequence such as `"1, 2, 3, 5, 8"`.
///
/// ```
/// assert_eq!(gus::sequence::parse_sequence("2 4, 6,8").unwrap(), vec![2, 4, 6, 8]);
/// ```
pub fn parse_sequence(text: &str) -> GusResult<Vec<i32>> {
    let sequence = sequence_parser()
        .parse(text)
        .into_result()
        .map_err(|errors| GusError::InvalidSequence {
            errors: errors.iter().map(SequenceDiagnostic::from_rich).collect(),
        })?;

    if sequence.is_empty() {
        return Err(GusError::EmptySequence);
    }
    Ok(sequence)
}
