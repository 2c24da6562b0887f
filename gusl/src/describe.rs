//! English rendering of GusL programs.
//!
//! The program is prefixed with [`HISTORY_DEPTH`] sentinel tokens standing for
//! the most recent terms of the sequence (the last one closest to the
//! program), so that references to the stack resolve to a phrase such as
//! "the penultimate term". The description is produced by walking the token
//! array from the right with a cursor: `value(cursor, depth)` names the value
//! found `depth` places below the top of the stack once the tokens before
//! `cursor` have run.
use std::collections::HashMap;

use crate::{
    atom::{Atom, parse_atoms},
    utils::Error,
};

/// Number of historical terms that can be named.
pub const HISTORY_DEPTH: usize = 16;

/// Longest program [`describe`] accepts. The walk recurses once per token
/// and every `ct` pair doubles the sentence.
pub const MAX_DESCRIBED_LEN: usize = 32;

const NUMBERS: [&str; 16] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve", "thirteen", "fourteen", "fifteen", "sixteen",
];

/// Describe a program as a complete sentence.
///
/// ```
/// assert_eq!(
///     gusl::describe("wm").unwrap(),
///     "each new term is the difference between the last term and the penultimate term."
/// );
/// ```
pub fn describe(program: &str) -> Result<String, Error> {
    Ok(format!("each new term is {}.", describe_expression(program)?))
}

/// Describe the value a program leaves on top of the stack.
pub fn describe_expression(program: &str) -> Result<String, Error> {
    let atoms = parse_atoms(program)?;
    if atoms.len() > MAX_DESCRIBED_LEN {
        return Err(Error::ProgramTooLong {
            len: atoms.len(),
            max: MAX_DESCRIBED_LEN,
        });
    }

    let tokens: Vec<Token> = (0..HISTORY_DEPTH)
        .rev()
        .map(Token::History)
        .chain(atoms.iter().copied().map(Token::Atom))
        .collect();

    let mut walker = Walker {
        tokens: &tokens,
        memo: HashMap::new(),
    };
    Ok(walker.value(tokens.len(), 0))
}

/// Phrase naming the term `back` places before the newest one.
pub fn term_phrase(back: usize) -> String {
    match back {
        0 => "the last term".to_string(),
        1 => "the penultimate term".to_string(),
        _ => format!("the {}penultimate term", "ante-".repeat(back - 1)),
    }
}

#[derive(Debug, Clone, Copy)]
enum Token {
    /// Sentinel for the term `n` places before the last one.
    History(usize),
    Atom(Atom),
}

struct Walker<'t> {
    tokens: &'t [Token],
    memo: HashMap<(usize, usize), String>,
}

impl Walker<'_> {
    /// Name the value `depth` places below the top of the stack after the
    /// tokens in `..cursor` have been evaluated.
    fn value(&mut self, cursor: usize, depth: usize) -> String {
        if let Some(text) = self.memo.get(&(cursor, depth)) {
            return text.clone();
        }

        let text = match cursor.checked_sub(1).map(|at| self.tokens[at]) {
            None => "an earlier term".to_string(),
            Some(token) => self.token_value(token, cursor - 1, depth),
        };

        self.memo.insert((cursor, depth), text.clone());
        text
    }

    fn token_value(&mut self, token: Token, below: usize, depth: usize) -> String {
        let atom = match token {
            Token::History(back) if depth == 0 => return term_phrase(back),
            Token::History(_) => return self.value(below, depth - 1),
            Token::Atom(atom) => atom,
        };

        match atom {
            Atom::Literal(_) | Atom::Ordinal if depth > 0 => self.value(below, depth - 1),
            Atom::Literal(value) => NUMBERS[usize::from(value) - 1].to_string(),
            Atom::Ordinal => "the number of the new term".to_string(),

            // `b a` -> one value: deeper values shift up by one.
            Atom::Add | Atom::Sub | Atom::Mul | Atom::Div | Atom::Rem | Atom::Pow if depth > 0 => {
                self.value(below, depth + 1)
            }
            Atom::Add | Atom::Sub | Atom::Mul | Atom::Div | Atom::Rem | Atom::Pow => {
                let a = self.value(below, 0);
                let b = self.value(below, 1);
                match atom {
                    Atom::Add => format!("the sum of {a} and {b}"),
                    Atom::Sub => format!("the difference between {b} and {a}"),
                    Atom::Mul => format!("the product of {a} with {b}"),
                    Atom::Div => {
                        format!("the integer part of the quotient when {b} is divided by {a}")
                    }
                    Atom::Rem => format!("the remainder when {b} is divided by {a}"),
                    _ => format!("the result of raising {b} to the power of {a}"),
                }
            }

            Atom::Prime | Atom::Factorial if depth > 0 => self.value(below, depth),
            Atom::Prime => format!(
                "the prime whose position in the sequence of primes is {}",
                self.value(below, 0)
            ),
            Atom::Factorial => format!("the factorial of {}", self.value(below, 0)),

            // Both copies name the same subtree; its tokens are only walked once.
            Atom::Dup if depth <= 1 => self.value(below, 0),
            Atom::Dup => self.value(below, depth - 1),

            Atom::Drop => self.value(below, depth + 1),

            Atom::Swap => match depth {
                0 => self.value(below, 1),
                1 => self.value(below, 0),
                _ => self.value(below, depth),
            },
        }
    }
}
