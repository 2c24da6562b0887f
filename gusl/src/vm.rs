//! GusL interpreter
//!
//! [`interpret`] runs a program against a caller-owned stack. Binary atoms pop
//! `a` (the top) and then `b`, and push `f(b, a)`; every arithmetic step is
//! checked, so an overflow is reported as an error instead of wrapping.
//!
//! The outcome of a run is a tri-state [`Status`]:
//! - [`Status::Ok`] carries the value left on top of the stack,
//! - [`Status::Underflow`] means an atom needed more operands than were
//!   available (inconclusive rather than wrong),
//! - [`Status::Error`] carries the [`EvalError`] that stopped evaluation.
use log::debug;
use strum::EnumIs;
use thiserror::Error;

use crate::{
    atom::{Atom, AtomKind},
    math::{MAX_FACTORIAL, MAX_PRIME_INDEX, factorial, nth_prime},
    utils,
};

/// Slack added to the logarithmic overflow estimate of `b ^ a`.
pub const POW_OVERFLOW_EPSILON: f64 = 1e-10;

/// Reasons for a run to stop with [`Status::Error`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIs, Error)]
pub enum EvalError {
    /// Division or remainder with a zero divisor.
    #[error("Division by zero ({op})")]
    DivisionByZero { op: AtomKind },

    /// `0 ^ a` with `a <= 0`.
    #[error("Invalid exp {base} ^ {exponent}")]
    InvalidPower { base: i32, exponent: i32 },

    /// The result of an operation does not fit in an `i32`.
    #[error("Operation `{op}` caused overflow")]
    Overflow { op: AtomKind },

    #[error("Attempted prime number {index}, expected a position between 1 and {max}")]
    PrimeOutOfRange { index: i32, max: i32 },

    #[error("Attempted factorial of {n}, which is greater than {max}")]
    FactorialOutOfRange { n: i32, max: i32 },

    #[error(transparent)]
    UnknownAtom(#[from] utils::Error),

    /// The program consumed every value and produced none.
    #[error("The stack was empty after processing.")]
    EmptyResult,
}

/// Outcome of a single interpreter run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIs)]
pub enum Status {
    /// Evaluation completed; the value on top of the stack.
    Ok(i32),
    /// `atom` (at `position` in the program) needed more operands than the
    /// stack held. Nothing was popped for that atom.
    Underflow { atom: Atom, position: usize },
    /// Evaluation stopped on an ill-defined or overflowing operation.
    Error(EvalError),
}

impl Status {
    /// The produced value, if the run succeeded.
    pub fn value(&self) -> Option<i32> {
        match self {
            Status::Ok(value) => Some(*value),
            _ => None,
        }
    }
}

enum Halt {
    Underflow,
    Error(EvalError),
}

impl From<EvalError> for Halt {
    fn from(error: EvalError) -> Self {
        Halt::Error(error)
    }
}

/// Run `program` against `stack`.
///
/// The stack is mutated in place: operands are consumed from the top and
/// results pushed back. The ordinal atom `n` pushes `stack.len() + 1` as
/// measured when the call starts. When `verbose` is set the stack is logged
/// after every atom.
pub fn interpret(stack: &mut Vec<i32>, program: &str, verbose: bool) -> Status {
    Machine::new(stack, verbose).run(program)
}

struct Machine<'a> {
    stack: &'a mut Vec<i32>,
    initial_len: usize,
    verbose: bool,
}

impl<'a> Machine<'a> {
    fn new(stack: &'a mut Vec<i32>, verbose: bool) -> Self {
        let initial_len = stack.len();
        Self {
            stack,
            initial_len,
            verbose,
        }
    }

    fn run(mut self, program: &str) -> Status {
        if self.verbose {
            debug!("GusL: {}", program);
            debug!("Stack: {:?}", self.stack);
        }

        for (position, symbol) in program.chars().enumerate() {
            let Some(atom) = Atom::from_char(symbol) else {
                return Status::Error(
                    utils::Error::UnknownAtom {
                        found: symbol,
                        position,
                    }
                    .into(),
                );
            };

            let outcome = self.step(atom);
            if self.verbose {
                debug!("Evaluated `{}`: {:?}", atom, self.stack);
            }

            match outcome {
                Ok(()) => {}
                Err(Halt::Underflow) => return Status::Underflow { atom, position },
                Err(Halt::Error(error)) => return Status::Error(error),
            }
        }

        match self.stack.last() {
            Some(&top) => Status::Ok(top),
            None => Status::Error(EvalError::EmptyResult),
        }
    }

    fn step(&mut self, atom: Atom) -> Result<(), Halt> {
        if self.stack.len() < atom.arity() {
            return Err(Halt::Underflow);
        }

        match atom {
            Atom::Literal(value) => self.stack.push(i32::from(value)),
            Atom::Ordinal => {
                let ordinal = i32::try_from(self.initial_len + 1).map_err(|_| EvalError::Overflow {
                    op: AtomKind::Ordinal,
                })?;
                self.stack.push(ordinal);
            }
            Atom::Add => self.binary(|b, a| checked(AtomKind::Add, b.checked_add(a)))?,
            Atom::Sub => self.binary(|b, a| checked(AtomKind::Sub, b.checked_sub(a)))?,
            Atom::Mul => self.binary(|b, a| checked(AtomKind::Mul, b.checked_mul(a)))?,
            Atom::Div => self.binary(|b, a| {
                if a == 0 {
                    return Err(EvalError::DivisionByZero { op: AtomKind::Div });
                }
                checked(AtomKind::Div, b.checked_div(a))
            })?,
            Atom::Rem => self.binary(|b, a| {
                if a == 0 {
                    return Err(EvalError::DivisionByZero { op: AtomKind::Rem });
                }
                checked(AtomKind::Rem, b.checked_rem(a))
            })?,
            Atom::Pow => self.binary(power)?,
            Atom::Swap => {
                let len = self.stack.len();
                self.stack.swap(len - 1, len - 2);
            }
            Atom::Dup => {
                let top = self.pop()?;
                self.stack.push(top);
                self.stack.push(top);
            }
            Atom::Drop => {
                self.pop()?;
            }
            Atom::Prime => self.unary(|n| {
                nth_prime(n).ok_or(EvalError::PrimeOutOfRange {
                    index: n,
                    max: MAX_PRIME_INDEX,
                })
            })?,
            Atom::Factorial => self.unary(|n| {
                factorial(n).ok_or(EvalError::FactorialOutOfRange {
                    n,
                    max: MAX_FACTORIAL,
                })
            })?,
        }

        Ok(())
    }

    fn pop(&mut self) -> Result<i32, Halt> {
        self.stack.pop().ok_or(Halt::Underflow)
    }

    fn unary(&mut self, op: impl FnOnce(i32) -> Result<i32, EvalError>) -> Result<(), Halt> {
        let n = self.pop()?;
        self.stack.push(op(n)?);
        Ok(())
    }

    fn binary(&mut self, op: impl FnOnce(i32, i32) -> Result<i32, EvalError>) -> Result<(), Halt> {
        let a = self.pop()?;
        let b = self.pop()?;
        self.stack.push(op(b, a)?);
        Ok(())
    }
}

#[inline]
fn checked(op: AtomKind, value: Option<i32>) -> Result<i32, EvalError> {
    value.ok_or(EvalError::Overflow { op })
}

/// `base ^ exponent` with the domain and overflow checks of the `e` atom.
pub fn power(base: i32, exponent: i32) -> Result<i32, EvalError> {
    if base == 0 && exponent <= 0 {
        return Err(EvalError::InvalidPower { base, exponent });
    }

    if exponent < 0 {
        // The fraction truncates toward zero for every base but 1 and -1.
        return Ok(match base {
            1 => 1,
            -1 if exponent % 2 == 0 => 1,
            -1 => -1,
            _ => 0,
        });
    }

    let magnitude = f64::from(base.unsigned_abs());
    if f64::from(exponent) * magnitude.ln() + POW_OVERFLOW_EPSILON > f64::from(i32::MAX).ln() {
        return Err(EvalError::Overflow { op: AtomKind::Pow });
    }

    checked(AtomKind::Pow, base.checked_pow(exponent as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_domain() {
        assert_eq!(power(2, 10), Ok(1024));
        assert_eq!(power(0, 3), Ok(0));
        assert_eq!(power(-3, 3), Ok(-27));
        assert_eq!(power(7, 0), Ok(1));
        assert!(power(0, 0).unwrap_err().is_invalid_power());
        assert!(power(0, -2).unwrap_err().is_invalid_power());
        assert_eq!(power(2, -1), Ok(0));
        assert_eq!(power(-3, -2), Ok(0));
        assert_eq!(power(i32::MIN, -1), Ok(0));
        assert_eq!(power(1, -5), Ok(1));
        assert_eq!(power(-1, -3), Ok(-1));
        assert_eq!(power(-1, -4), Ok(1));
    }

    #[test]
    fn power_overflow_is_detected_before_computing() {
        assert!(power(3, 20).unwrap_err().is_overflow());
        assert!(power(2, 31).unwrap_err().is_overflow());
        assert!(power(i32::MIN, 2).unwrap_err().is_overflow());
        assert_eq!(power(10, 9), Ok(1_000_000_000));
        assert_eq!(power(2, 30), Ok(1 << 30));
    }

    #[test]
    fn value_accessor() {
        assert_eq!(Status::Ok(4).value(), Some(4));
        assert_eq!(Status::Error(EvalError::EmptyResult).value(), None);
    }
}
