use crate::core::{PrimalityTest, PrimeSequence, Result};
use crate::domain::model::{CheckerKind, ProfileBreakdown, RangeBound};
use std::time::{Duration, Instant};

const CLOCK_CALIBRATION_SAMPLES: u32 = 10_000;

/// Tests every candidate of a [`RangeBound`] in ascending order.
#[derive(Debug, Clone, Copy)]
pub struct RangeScanner {
    bound: RangeBound,
}

impl RangeScanner {
    pub fn new(bound: RangeBound) -> Self {
        Self { bound }
    }

    pub fn bound(&self) -> RangeBound {
        self.bound
    }

    pub fn scan<T: PrimalityTest + ?Sized>(&self, test: &T) -> Result<PrimeSequence> {
        let mut primes = PrimeSequence::new();
        for candidate in self.bound.candidates() {
            if test.is_prime(candidate) {
                primes.push(candidate)?;
            }
        }
        Ok(primes)
    }

    /// Same output as [`scan`](Self::scan), plus a breakdown of where the time went.
    ///
    /// Each primality call and each append is timed individually. The cost of
    /// reading the clock is calibrated up front and reported separately;
    /// `other` is whatever the wall clock saw that none of the slices did.
    pub fn scan_profiled<T: PrimalityTest + ?Sized>(
        &self,
        test: &T,
        checker: CheckerKind,
    ) -> Result<(PrimeSequence, ProfileBreakdown)> {
        let per_read = calibrate_clock();
        let mut samples = ProfileSamples::default();
        let mut primes = PrimeSequence::new();

        let started = Instant::now();
        for candidate in self.bound.candidates() {
            let t0 = Instant::now();
            let is_prime = test.is_prime(candidate);
            samples.test_time += t0.elapsed();
            samples.test_samples += 1;

            if is_prime {
                let a0 = Instant::now();
                primes.push(candidate)?;
                samples.append_time += a0.elapsed();
                samples.append_samples += 1;
            }
        }
        let total = started.elapsed();

        tracing::debug!(
            "Profiled {} over {}: {} tests, {} appends, {:?} per clock read",
            checker,
            self.bound,
            samples.test_samples,
            samples.append_samples,
            per_read
        );

        Ok((primes, samples.breakdown(checker, per_read, total)))
    }
}

/// Raw timings collected by a profiled scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileSamples {
    pub test_time: Duration,
    pub test_samples: u32,
    pub append_time: Duration,
    pub append_samples: u32,
}

impl ProfileSamples {
    /// Splits `total` into slices given the calibrated cost of one clock read.
    ///
    /// Every sample takes two clock reads and one of them lands inside the
    /// measured interval, so each slice loses one read per sample.
    pub fn breakdown(
        &self,
        checker: CheckerKind,
        per_read: Duration,
        total: Duration,
    ) -> ProfileBreakdown {
        let is_prime = self.test_time.saturating_sub(per_read * self.test_samples);
        let append = self.append_time.saturating_sub(per_read * self.append_samples);
        let clock = per_read * 2 * (self.test_samples + self.append_samples);

        let accounted = is_prime + append + clock;
        if accounted > total {
            tracing::debug!(
                "Profile slices exceed wall clock by {:?}, clamping other to zero",
                accounted - total
            );
        }

        ProfileBreakdown {
            checker,
            is_prime,
            append,
            clock,
            other: total.saturating_sub(accounted),
        }
    }
}

/// Average cost of one `Instant::now()` call.
fn calibrate_clock() -> Duration {
    let started = Instant::now();
    for _ in 0..CLOCK_CALIBRATION_SAMPLES {
        std::hint::black_box(Instant::now());
    }
    started.elapsed() / CLOCK_CALIBRATION_SAMPLES
}
