use crate::core::PrimalityTest;
use crate::domain::model::CheckerKind;

/// Trial division by every integer in `2..n`.
pub fn is_prime_naive(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    for i in 2..n {
        if n % i == 0 {
            return false;
        }
    }
    true
}

/// Trial division by `2..=isqrt(n)`, checking the whole divisor batch at once.
///
/// Remainders are computed into a buffer in one pass and then scanned for a
/// zero, so the inner loop has no early exit and stays vectorizable.
pub fn is_prime_bounded(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    let limit = integer_sqrt(n);
    let divisors: Vec<i64> = (2..=limit).collect();
    let remainders: Vec<i64> = divisors.iter().map(|d| n % d).collect();
    !remainders.contains(&0)
}

/// `floor(sqrt(n))` for non-negative `n`, exact for the whole `i64` range.
pub fn integer_sqrt(n: i64) -> i64 {
    if n < 2 {
        return n.max(0);
    }
    // f64 只是初始估計，之後用整數校正
    let mut root = (n as f64).sqrt() as i64;
    while root > 0 && root.checked_mul(root).map_or(true, |sq| sq > n) {
        root -= 1;
    }
    while (root + 1).checked_mul(root + 1).is_some_and(|sq| sq <= n) {
        root += 1;
    }
    root
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveChecker;

impl PrimalityTest for NaiveChecker {
    fn is_prime(&self, n: i64) -> bool {
        is_prime_naive(n)
    }

    fn name(&self) -> &str {
        "naive"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BoundedChecker;

impl PrimalityTest for BoundedChecker {
    fn is_prime(&self, n: i64) -> bool {
        is_prime_bounded(n)
    }

    fn name(&self) -> &str {
        "bounded"
    }
}

/// Sieve of Eratosthenes table over `[0, limit]`.
///
/// Lookups past the table fall back to [`is_prime_bounded`].
#[derive(Debug, Clone)]
pub struct SieveChecker {
    table: Vec<bool>,
}

impl SieveChecker {
    pub fn new(limit: i64) -> Self {
        let size = usize::try_from(limit.max(0)).unwrap_or(0) + 1;
        let mut table = vec![true; size];
        table[0] = false;
        if size > 1 {
            table[1] = false;
        }

        let mut candidate = 2;
        while candidate * candidate < size {
            if table[candidate] {
                let mut composite = candidate * candidate;
                while composite < size {
                    table[composite] = false;
                    composite += candidate;
                }
            }
            candidate += 1;
        }

        Self { table }
    }

    pub fn limit(&self) -> i64 {
        self.table.len() as i64 - 1
    }
}

impl PrimalityTest for SieveChecker {
    fn is_prime(&self, n: i64) -> bool {
        if n < 2 {
            return false;
        }
        match usize::try_from(n).ok().and_then(|i| self.table.get(i)) {
            Some(&is_prime) => is_prime,
            None => is_prime_bounded(n),
        }
    }

    fn name(&self) -> &str {
        "sieve"
    }
}

/// Owned checker picked at runtime from configuration.
#[derive(Debug, Clone)]
pub enum Checker {
    Naive(NaiveChecker),
    Bounded(BoundedChecker),
    Sieve(SieveChecker),
}

impl Checker {
    /// `limit` sizes the sieve table; the trial division checkers ignore it.
    pub fn for_kind(kind: CheckerKind, limit: i64) -> Self {
        match kind {
            CheckerKind::Naive => Checker::Naive(NaiveChecker),
            CheckerKind::Bounded => Checker::Bounded(BoundedChecker),
            CheckerKind::Sieve => Checker::Sieve(SieveChecker::new(limit)),
        }
    }

    pub fn kind(&self) -> CheckerKind {
        match self {
            Checker::Naive(_) => CheckerKind::Naive,
            Checker::Bounded(_) => CheckerKind::Bounded,
            Checker::Sieve(_) => CheckerKind::Sieve,
        }
    }
}

impl PrimalityTest for Checker {
    fn is_prime(&self, n: i64) -> bool {
        match self {
            Checker::Naive(c) => c.is_prime(n),
            Checker::Bounded(c) => c.is_prime(n),
            Checker::Sieve(c) => c.is_prime(n),
        }
    }

    fn name(&self) -> &str {
        match self {
            Checker::Naive(c) => c.name(),
            Checker::Bounded(c) => c.name(),
            Checker::Sieve(c) => c.name(),
        }
    }
}
