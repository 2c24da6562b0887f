//! Vocabulary the search enumerates programs from.
use gusl::atom::ALPHABET;
use log::info;

/// Ordered set of program fragments.
///
/// Starts with every atom in canonical order and only ever grows: learned
/// fragments are appended in discovery order and duplicates are ignored. The
/// order is the enumeration order of [`crate::search::Hypotheses`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    fragments: Vec<String>,
}

impl Default for Memory {
    fn default() -> Self {
        Self {
            fragments: ALPHABET.chars().map(String::from).collect(),
        }
    }
}

impl Memory {
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn contains(&self, fragment: &str) -> bool {
        self.fragments.iter().any(|known| known == fragment)
    }

    /// Learn every two-atom window of `program` that is not known yet.
    ///
    /// Returns the number of fragments added.
    pub fn remember(&mut self, program: &str) -> usize {
        let symbols: Vec<char> = program.chars().collect();
        let mut added = 0;

        for window in symbols.windows(2) {
            let fragment: String = window.iter().collect();
            if !self.contains(&fragment) {
                info!("Learned factoid `{}`", fragment);
                self.fragments.push(fragment);
                added += 1;
            }
        }

        added
    }
}
