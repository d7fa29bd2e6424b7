//! Measurement results.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Bitstring histogram for one classical register.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create empty counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build counts from `(bitstring, count)` pairs.
    pub fn from_pairs<S: Into<String>>(pairs: impl IntoIterator<Item = (S, u64)>) -> Self {
        let mut counts = Self::new();
        for (bitstring, count) in pairs {
            counts.insert(bitstring, count);
        }
        counts
    }

    /// Set the count for a bitstring, replacing any previous value.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        self.counts.insert(bitstring.into(), count);
    }

    /// Increment a bitstring's count by one.
    pub fn record(&mut self, bitstring: impl Into<String>) {
        *self.counts.entry(bitstring.into()).or_insert(0) += 1;
    }

    /// Count for a bitstring, `None` if it was never observed.
    pub fn lookup(&self, bitstring: &str) -> Option<u64> {
        self.counts.get(bitstring).copied()
    }

    /// Sum of all counts.
    pub fn total_shots(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Sampler output: one histogram per named classical register.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplerOutput {
    registers: FxHashMap<String, Counts>,
}

impl SamplerOutput {
    /// Create an empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach counts for a register.
    pub fn with_register(mut self, name: impl Into<String>, counts: Counts) -> Self {
        self.insert(name, counts);
        self
    }

    /// Attach counts for a register in place.
    pub fn insert(&mut self, name: impl Into<String>, counts: Counts) {
        self.registers.insert(name.into(), counts);
    }

    /// Counts of a register by name.
    pub fn register(&self, name: &str) -> Option<&Counts> {
        self.registers.get(name)
    }

    /// First register present among `candidates`, tried in order.
    pub fn first_register<'a>(&self, candidates: &'a [String]) -> Option<(&'a str, &Counts)> {
        candidates
            .iter()
            .find_map(|name| self.register(name).map(|counts| (name.as_str(), counts)))
    }

    /// Register names, sorted.
    pub fn register_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.registers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
