//! Hypothesis testing and the guessing loop.
use std::time::{Duration, Instant};

use gusl::{
    Atom, ProgramFilter,
    math::prewarm_primes,
    vm::{EvalError, Status, interpret},
};
use log::{debug, info};
use strum::EnumIs;
use thiserror::Error;

use crate::{
    memory::Memory,
    search::Hypotheses,
    utils::{
        conf::GusConfig,
        error::{GusError, GusResult},
    },
};

/// Why a program was rejected as the rule of a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BacktestFailure {
    #[error("Predicted {predicted} for term #{index}, expected {expected}")]
    Mismatch {
        index: usize,
        expected: i32,
        predicted: i32,
    },

    #[error("{0}")]
    Fault(EvalError),

    /// Every backtest underflowed before a single term was reproduced.
    #[error("No term of the sequence was reproduced")]
    NeverMatched,

    #[error("Atom `{atom}` at position {position} underflowed on the whole sequence")]
    FinalUnderflow { atom: Atom, position: usize },
}

/// Outcome of [`test_hypothesis`].
#[derive(Debug, Clone, PartialEq, Eq, EnumIs)]
pub enum Backtest {
    /// The program reproduced the sequence and predicts its next term.
    Accepted { prediction: i32 },
    Rejected(BacktestFailure),
}

impl Backtest {
    pub fn prediction(&self) -> Option<i32> {
        match self {
            Backtest::Accepted { prediction } => Some(*prediction),
            Backtest::Rejected(_) => None,
        }
    }
}

/// Run `program` on a stack holding `prefix`, oldest term at the bottom.
pub fn try_make_prediction(prefix: &[i32], program: &str, verbose: bool) -> Status {
    let mut stack = prefix.to_vec();
    interpret(&mut stack, program, verbose)
}

/// Check whether `program` generates `sequence`, and predict the next term.
///
/// The program is run on every prefix `sequence[..i]`, longest first, and
/// must produce `sequence[i]`. An underflow ends the backtest without
/// verdict: the prefixes left are too short to feed the program. Any error
/// or wrong value rejects the program, and so does a backtest that never
/// reproduced a single term. A surviving program is then run on the whole
/// sequence to obtain the prediction.
pub fn test_hypothesis(sequence: &[i32], program: &str, verbose: bool) -> Backtest {
    if verbose {
        debug!("Testing hypothesis `{}`.", program);
    }

    let mut matched = false;
    for index in (0..sequence.len()).rev() {
        let expected = sequence[index];
        match try_make_prediction(&sequence[..index], program, verbose) {
            Status::Underflow { .. } => {
                if verbose {
                    debug!("Hypothesis caused underflow on term #{}", index);
                }
                break;
            }
            Status::Error(error) => {
                if verbose {
                    debug!("Hypothesis failed with error: {}", error);
                }
                return Backtest::Rejected(BacktestFailure::Fault(error));
            }
            Status::Ok(predicted) if predicted != expected => {
                if verbose {
                    debug!("Hypothesis failed with incorrect prediction: {}", predicted);
                }
                return Backtest::Rejected(BacktestFailure::Mismatch {
                    index,
                    expected,
                    predicted,
                });
            }
            Status::Ok(predicted) => {
                if verbose {
                    debug!("Hypothesis succeeded with correct prediction: {}", predicted);
                }
                matched = true;
            }
        }
    }

    if !matched {
        return Backtest::Rejected(BacktestFailure::NeverMatched);
    }

    match try_make_prediction(sequence, program, verbose) {
        Status::Ok(prediction) => {
            if verbose {
                debug!("Hypothesis predicting: {}", prediction);
            }
            Backtest::Accepted { prediction }
        }
        Status::Underflow { atom, position } => {
            Backtest::Rejected(BacktestFailure::FinalUnderflow { atom, position })
        }
        Status::Error(error) => Backtest::Rejected(BacktestFailure::Fault(error)),
    }
}

/// A candidate rule offered to the caller of [`Gus::guess_sequence`].
#[derive(Debug, Clone)]
pub struct GuessEvent {
    /// Time spent since the search started or the previous guess was refused.
    pub elapsed: Duration,
    /// Next term of the sequence according to `hypothesis`.
    pub prediction: i32,
    pub hypothesis: String,
    /// Admissible candidates backtested so far, this one included.
    pub tested: u64,
    /// Set by the caller to confirm the guess and end the search.
    pub accepted: bool,
    /// Set by the caller to end the search without confirming anything.
    pub abandoned: bool,
}

/// The sequence guesser: configuration, admissibility filter and learned
/// vocabulary.
///
/// The vocabulary outlives a single search, so rules confirmed for one
/// sequence help with the next one.
#[derive(Debug, Clone)]
pub struct Gus {
    config: GusConfig,
    filter: ProgramFilter,
    memory: Memory,
}

impl Gus {
    pub fn new(config: GusConfig) -> GusResult<Self> {
        config.validate()?;
        let filter = config.filter();
        Ok(Self {
            config,
            filter,
            memory: Memory::default(),
        })
    }

    pub fn config(&self) -> &GusConfig {
        &self.config
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn filter(&self) -> &ProgramFilter {
        &self.filter
    }

    /// Admissible programs over the current vocabulary, shortest first.
    pub fn hypothesize(&self) -> Hypotheses<'_> {
        Hypotheses::new(self.memory.fragments(), &self.filter)
    }

    pub fn test_hypothesis(&self, sequence: &[i32], program: &str, verbose: bool) -> Backtest {
        test_hypothesis(sequence, program, verbose)
    }

    /// Learn the fragments of a confirmed program.
    pub fn remember(&mut self, program: &str) -> usize {
        self.memory.remember(program)
    }

    /// Search for the rule generating `sequence`.
    ///
    /// Every accepted candidate is passed to `on_guess`, in enumeration
    /// order. The search stops when the callback sets
    /// [`GuessEvent::accepted`], in which case the program is learned and
    /// returned. It returns `None` when the callback sets
    /// [`GuessEvent::abandoned`] or after `max_hypotheses` enumerated
    /// candidates, counting those the filter rejects.
    ///
    /// With more than one worker, candidates are backtested in batches on
    /// scoped threads; the offers and their order are the same as with a
    /// single worker.
    pub fn guess_sequence<F>(&mut self, sequence: &[i32], mut on_guess: F) -> GusResult<Option<String>>
    where
        F: FnMut(&mut GuessEvent),
    {
        if sequence.is_empty() {
            return Err(GusError::EmptySequence);
        }

        let workers = self.config.workers;
        let batch_len = if workers > 1 {
            prewarm_primes();
            self.config.batch_size
        } else {
            1
        };
        info!(
            "Guessing {:?} with {} fragments and {} worker(s)",
            sequence,
            self.memory.len(),
            workers
        );

        // Learned fragments only take part in later searches.
        let fragments = self.memory.fragments().to_vec();
        let mut candidates = Hypotheses::new(&fragments, &self.filter);
        if let Some(limit) = self.config.max_hypotheses {
            candidates = candidates.with_limit(limit);
        }

        let mut timer = Instant::now();
        let mut tested = 0u64;
        let mut found = None;

        'search: loop {
            let batch: Vec<String> = candidates.by_ref().take(batch_len).collect();
            if batch.is_empty() {
                break;
            }

            let outcomes = backtest_batch(sequence, &batch, workers);
            for (hypothesis, outcome) in batch.into_iter().zip(outcomes) {
                tested += 1;
                let Backtest::Accepted { prediction } = outcome else {
                    continue;
                };

                let mut event = GuessEvent {
                    elapsed: timer.elapsed(),
                    prediction,
                    hypothesis,
                    tested,
                    accepted: false,
                    abandoned: false,
                };
                info!(
                    "Offering `{}` predicting {} after {} candidates",
                    event.hypothesis, event.prediction, event.tested
                );
                on_guess(&mut event);

                if event.accepted {
                    found = Some(event.hypothesis);
                    break 'search;
                }
                if event.abandoned {
                    info!("Search abandoned after {} candidates", tested);
                    break 'search;
                }
                timer = Instant::now();
            }
        }

        match &found {
            Some(program) => {
                self.memory.remember(program);
            }
            None => debug!("No rule accepted after {} candidates", tested),
        }
        Ok(found)
    }
}

fn backtest_batch(sequence: &[i32], batch: &[String], workers: usize) -> Vec<Backtest> {
    if workers <= 1 || batch.len() < 2 {
        return batch
            .iter()
            .map(|program| test_hypothesis(sequence, program, false))
            .collect();
    }

    let chunk_len = batch.len().div_ceil(workers);
    crossbeam::scope(|scope| {
        let handles: Vec<_> = batch
            .chunks(chunk_len)
            .map(|chunk| {
                scope.spawn(move |_| {
                    chunk
                        .iter()
                        .map(|program| test_hypothesis(sequence, program, false))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
            })
            .collect()
    })
    .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
}
