use rand::Rng;
use std::ops::RangeInclusive;
use tracing::debug;
use uuid::Uuid;

/// Numeric suffixes appended to a taken display name
pub const SUFFIX_RANGE: RangeInclusive<u32> = 1..=100;

const TOKEN_LEN: usize = 8;

/// Picks a display name that no current member holds.
///
/// A taken name gets a random numeric suffix from `SUFFIX_RANGE`. After
/// `max_attempts` collisions it switches to a random token suffix, so the
/// search ends even when every numbered variant is in use.
#[derive(Debug, Clone)]
pub struct NameDeduplicator {
    max_attempts: usize,
}

impl NameDeduplicator {
    pub fn new(max_attempts: usize) -> Self {
        Self { max_attempts }
    }

    pub fn dedupe<F>(&self, candidate: &str, is_taken: F) -> String
    where
        F: Fn(&str) -> bool,
    {
        self.dedupe_with_rng(candidate, is_taken, &mut rand::rng())
    }

    pub fn dedupe_with_rng<F, R>(&self, candidate: &str, is_taken: F, rng: &mut R) -> String
    where
        F: Fn(&str) -> bool,
        R: Rng,
    {
        if !is_taken(candidate) {
            return candidate.to_string();
        }

        for attempt in 1..=self.max_attempts {
            let suffixed = format!("{}{}", candidate, rng.random_range(SUFFIX_RANGE));
            if !is_taken(&suffixed) {
                debug!(candidate = %candidate, name = %suffixed, attempt, "Deduplicated name");
                return suffixed;
            }
        }

        debug!(
            candidate = %candidate,
            attempts = self.max_attempts,
            "Numeric suffixes exhausted, using token suffix"
        );
        loop {
            let token = Uuid::new_v4().simple().to_string();
            let suffixed = format!("{}-{}", candidate, &token[..TOKEN_LEN]);
            if !is_taken(&suffixed) {
                return suffixed;
            }
        }
    }
}
