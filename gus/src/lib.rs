//! Search engine of the GUS sequence guesser.
//!
//! Given a finite integer sequence, [`engine::Gus`] enumerates GusL programs
//! built from its [`memory::Memory`] in increasing length, discards the ones
//! rejected by the [`gusl::ProgramFilter`], and backtests the others against
//! shorter and shorter prefixes of the sequence. Programs confirmed by the
//! caller teach the memory new two-atom fragments, which makes later searches
//! reach similar rules sooner.
//!
//! ```no_run
//! use gus::{engine::Gus, utils::conf::GusConfig};
//!
//! let mut gus = Gus::new(GusConfig::default()).unwrap();
//! let found = gus
//!     .guess_sequence(&[2, 4, 6, 8], |event| event.accepted = event.prediction == 10)
//!     .unwrap();
//! assert!(found.is_some());
//! ```

pub mod engine;
pub mod magic;
pub mod memory;
pub mod search;
pub mod sequence;
pub mod utils;

pub extern crate gusl;
