//! GusL: a tiny postfix language for describing integer sequences.
//!
//! A GusL program is a string of single-character atoms evaluated left to
//! right against a stack of `i32` values. The atoms of a program also define
//! an implicit expression tree (each atom consumes `arity` sub-trees to its
//! left), which is what the analysis and description passes walk.
//!
//! - [`atom`]: the closed alphabet of 28 atoms and their arities.
//! - [`vm`]: the overflow-checked interpreter.
//! - [`math`]: memoized prime table and factorial.
//! - [`analysis`]: tree-based simplification and the admissibility filter.
//! - [`describe`]: English rendering of a program.
//!
//! ```
//! use gusl::vm::{Status, interpret};
//!
//! let mut stack = vec![2, 4, 6];
//! assert_eq!(interpret(&mut stack, "2p", false), Status::Ok(8));
//! assert_eq!(gusl::describe("2p").unwrap(), "each new term is the sum of two and the last term.");
//! ```
pub mod analysis;
pub mod atom;
pub mod describe;
pub mod math;
pub mod utils;
pub mod vm;

pub use analysis::{DEFAULT_DENYLIST, ProgramFilter, Rejection, is_admissible, simplify};
pub use atom::{Atom, AtomKind};
pub use describe::describe;
pub use vm::{EvalError, Status, interpret};
