//! Verdict policies.
//!
//! The verdict is currently a placeholder: [`RandomVerdict`] answers yes or
//! no with equal probability regardless of the answers. Anything that decides
//! eligibility plugs in through [`VerdictPolicy`] without touching validation.

use crate::models::SurveyInput;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;

/// Outcome returned to the respondent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Yes,
    No,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Yes => "yes",
            Verdict::No => "no",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" => Ok(Verdict::Yes),
            "no" => Ok(Verdict::No),
            other => Err(format!("expected 'yes' or 'no', got '{}'", other)),
        }
    }
}

/// Decides the verdict for a validated submission.
pub trait VerdictPolicy: Send + Sync {
    fn decide(&self, input: &SurveyInput) -> Verdict;
}

/// Coin flip, independent of the submission.
#[derive(Debug)]
pub struct RandomVerdict {
    rng: Mutex<StdRng>,
}

impl RandomVerdict {
    /// Create a policy seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Create a reproducible policy.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomVerdict {
    fn default() -> Self {
        Self::new()
    }
}

impl VerdictPolicy for RandomVerdict {
    fn decide(&self, _input: &SurveyInput) -> Verdict {
        // A poisoned lock still holds a usable generator.
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if rng.gen_bool(0.5) {
            Verdict::Yes
        } else {
            Verdict::No
        }
    }
}

/// Always returns the same verdict.
#[derive(Debug, Clone, Copy)]
pub struct FixedVerdict(pub Verdict);

impl VerdictPolicy for FixedVerdict {
    fn decide(&self, _input: &SurveyInput) -> Verdict {
        self.0
    }
}
