//! Enumeration of candidate programs.
use gusl::ProgramFilter;
use log::trace;

/// Lazy, infinite iterator over the admissible programs built from a
/// vocabulary.
///
/// Tier `n` yields every concatenation of `n` fragments, ordered like an
/// odometer: the first position varies slowest, the last one fastest, each
/// in vocabulary order. Candidates rejected by the filter are skipped. Once a
/// tier is exhausted the next one starts, so the iterator never ends for a
/// non-empty vocabulary unless a limit is set with
/// [`Hypotheses::with_limit`].
pub struct Hypotheses<'a> {
    fragments: &'a [String],
    filter: &'a ProgramFilter,
    digits: Vec<usize>,
    remaining: Option<u64>,
}

impl<'a> Hypotheses<'a> {
    pub fn new(fragments: &'a [String], filter: &'a ProgramFilter) -> Self {
        Self {
            fragments,
            filter,
            digits: vec![0],
            remaining: None,
        }
    }

    /// Stop after `limit` enumerated candidates, rejected ones included.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.remaining = Some(limit);
        self
    }

    /// Number of fragments in the candidates currently being enumerated.
    pub fn tier(&self) -> usize {
        self.digits.len()
    }

    fn current(&self) -> String {
        self.digits
            .iter()
            .map(|&digit| self.fragments[digit].as_str())
            .collect()
    }

    fn advance(&mut self) {
        for digit in self.digits.iter_mut().rev() {
            *digit += 1;
            if *digit < self.fragments.len() {
                return;
            }
            *digit = 0;
        }

        // Every position wrapped: move on to the next tier.
        self.digits.push(0);
        trace!("Searching tier {}", self.digits.len());
    }
}

impl Iterator for Hypotheses<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fragments.is_empty() {
            return None;
        }

        loop {
            if let Some(remaining) = self.remaining.as_mut() {
                if *remaining == 0 {
                    return None;
                }
                *remaining -= 1;
            }

            let candidate = self.current();
            self.advance();
            if self.filter.is_admissible(&candidate) {
                return Some(candidate);
            }
        }
    }
}
