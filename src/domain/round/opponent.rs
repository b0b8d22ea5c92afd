use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::rules::Choice;

/// Where the computer's move comes from. Injected into the session so
/// rounds can be replayed deterministically.
pub trait ChoiceSource: Send + Sync {
    fn next_choice(&mut self) -> Choice;
}

/// Uniform pick over the three choices.
pub struct RandomOpponent {
    rng: StdRng,
}

impl RandomOpponent {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ChoiceSource for RandomOpponent {
    fn next_choice(&mut self) -> Choice {
        self.rng.gen()
    }
}

/// Plays a fixed sequence, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ScriptedOpponent {
    script: Vec<Choice>,
    cursor: usize,
}

impl ScriptedOpponent {
    /// Returns `None` for an empty script.
    pub fn new(script: impl IntoIterator<Item = Choice>) -> Option<Self> {
        let script: Vec<Choice> = script.into_iter().collect();
        if script.is_empty() {
            return None;
        }
        Some(Self { script, cursor: 0 })
    }
}

impl ChoiceSource for ScriptedOpponent {
    fn next_choice(&mut self) -> Choice {
        let choice = self.script[self.cursor % self.script.len()];
        self.cursor = (self.cursor + 1) % self.script.len();
        choice
    }
}
