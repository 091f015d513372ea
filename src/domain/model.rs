use crate::utils::error::{BenchError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_LIMIT: i64 = 100_000;
pub const MAX_LIMIT: i64 = 10_000_000;

/// 範圍上界是否包含 N 本身
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    #[default]
    Inclusive,
    Exclusive,
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Boundary::Inclusive => write!(f, "inclusive"),
            Boundary::Exclusive => write!(f, "exclusive"),
        }
    }
}

/// Candidates scanned are `[1, limit]` or `[1, limit)` depending on `boundary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeBound {
    pub limit: i64,
    pub boundary: Boundary,
}

impl RangeBound {
    pub fn new(limit: i64, boundary: Boundary) -> Self {
        Self { limit, boundary }
    }

    pub fn inclusive(limit: i64) -> Self {
        Self::new(limit, Boundary::Inclusive)
    }

    pub fn exclusive(limit: i64) -> Self {
        Self::new(limit, Boundary::Exclusive)
    }

    /// Largest candidate the scan will test, if any.
    pub fn last_candidate(&self) -> i64 {
        match self.boundary {
            Boundary::Inclusive => self.limit,
            Boundary::Exclusive => self.limit.saturating_sub(1),
        }
    }

    pub fn candidates(&self) -> std::ops::RangeInclusive<i64> {
        1..=self.last_candidate()
    }
}

impl Default for RangeBound {
    fn default() -> Self {
        Self::inclusive(DEFAULT_LIMIT)
    }
}

impl fmt::Display for RangeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.boundary {
            Boundary::Inclusive => write!(f, "[1, {}]", self.limit),
            Boundary::Exclusive => write!(f, "[1, {})", self.limit),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum CheckerKind {
    Naive,
    Bounded,
    Sieve,
}

impl CheckerKind {
    pub fn label(&self) -> &'static str {
        match self {
            CheckerKind::Naive => "Naive",
            CheckerKind::Bounded => "Bounded",
            CheckerKind::Sieve => "Sieve",
        }
    }
}

impl fmt::Display for CheckerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckerKind::Naive => write!(f, "naive"),
            CheckerKind::Bounded => write!(f, "bounded"),
            CheckerKind::Sieve => write!(f, "sieve"),
        }
    }
}

/// Append-only, strictly increasing list of primes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PrimeSequence {
    primes: Vec<i64>,
}

impl PrimeSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, candidate: i64) -> Result<()> {
        if let Some(&last) = self.primes.last() {
            if candidate <= last {
                return Err(BenchError::SequenceOrderError { last, candidate });
            }
        }
        self.primes.push(candidate);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.primes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }

    pub fn last(&self) -> Option<i64> {
        self.primes.last().copied()
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.primes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, i64> {
        self.primes.iter()
    }
}

impl<'a> IntoIterator for &'a PrimeSequence {
    type Item = &'a i64;
    type IntoIter = std::slice::Iter<'a, i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.primes.iter()
    }
}

/// One checker's pass over the range.
#[derive(Debug, Clone, Serialize)]
pub struct CheckerRun {
    pub label: String,
    pub checker: CheckerKind,
    pub prime_count: usize,
    #[serde(serialize_with = "serialize_secs")]
    pub elapsed: Duration,
    #[serde(skip)]
    pub primes: PrimeSequence,
}

/// Where the time of a profiled scan went.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileBreakdown {
    pub checker: CheckerKind,
    #[serde(serialize_with = "serialize_secs")]
    pub is_prime: Duration,
    #[serde(serialize_with = "serialize_secs")]
    pub append: Duration,
    #[serde(serialize_with = "serialize_secs")]
    pub clock: Duration,
    #[serde(serialize_with = "serialize_secs")]
    pub other: Duration,
}

impl ProfileBreakdown {
    pub fn total(&self) -> Duration {
        self.is_prime + self.append + self.clock + self.other
    }

    /// `(label, percent)` pairs in a fixed order; percents sum to 100 unless the total is zero.
    pub fn slices(&self) -> Vec<(&'static str, f64)> {
        let total = self.total().as_secs_f64();
        let pct = |d: Duration| {
            if total > 0.0 {
                d.as_secs_f64() / total * 100.0
            } else {
                0.0
            }
        };
        vec![
            ("is_prime()", pct(self.is_prime)),
            ("append()", pct(self.append)),
            ("clock()", pct(self.clock)),
            ("other", pct(self.other)),
        ]
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    pub generated_at: DateTime<Utc>,
    pub bound: RangeBound,
    pub runs: Vec<CheckerRun>,
    pub profile: Option<ProfileBreakdown>,
}

impl BenchReport {
    pub fn timings(&self) -> Vec<(&str, Duration)> {
        self.runs
            .iter()
            .map(|run| (run.label.as_str(), run.elapsed))
            .collect()
    }
}

fn serialize_secs<S: serde::Serializer>(
    duration: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prime_sequence_rejects_out_of_order() {
        let mut seq = PrimeSequence::new();
        seq.push(2).unwrap();
        seq.push(3).unwrap();
        assert!(matches!(
            seq.push(3),
            Err(BenchError::SequenceOrderError {
                last: 3,
                candidate: 3
            })
        ));
        assert!(seq.push(2).is_err());
        assert_eq!(seq.as_slice(), &[2, 3]);
    }

    #[test]
    fn test_range_bound_candidates() {
        assert_eq!(RangeBound::inclusive(4).candidates().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(RangeBound::exclusive(4).candidates().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(RangeBound::exclusive(1).candidates().count(), 0);
        assert_eq!(RangeBound::inclusive(7).to_string(), "[1, 7]");
        assert_eq!(RangeBound::exclusive(7).to_string(), "[1, 7)");
    }

    #[test]
    fn test_exclusive_minimum_limit_does_not_overflow() {
        let bound = RangeBound::exclusive(i64::MIN);
        assert_eq!(bound.last_candidate(), i64::MIN);
        assert_eq!(bound.candidates().count(), 0);
    }

    #[test]
    fn test_profile_slices_sum_to_hundred() {
        let profile = ProfileBreakdown {
            checker: CheckerKind::Naive,
            is_prime: Duration::from_millis(920),
            append: Duration::from_millis(50),
            clock: Duration::from_millis(10),
            other: Duration::from_millis(20),
        };
        let slices = profile.slices();
        let sum: f64 = slices.iter().map(|(_, p)| p).sum();
        assert!((sum - 100.0).abs() < 1e-9);
        assert_eq!(slices[0].0, "is_prime()");
        assert!((slices[0].1 - 92.0).abs() < 1e-9);
    }

    #[test]
    fn test_boundary_deserializes_lowercase() {
        let bound: RangeBound =
            serde_json::from_str(r#"{"limit": 10, "boundary": "exclusive"}"#).unwrap();
        assert_eq!(bound, RangeBound::exclusive(10));
    }
}
