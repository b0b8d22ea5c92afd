use std::fmt;
use std::str::FromStr;

use bevy::prelude::*;
use rand::distributions::{Distribution, Standard};
use rand::Rng;
use thiserror::Error;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl Choice {
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    /// The choice this one defeats: Rock > Scissors > Paper > Rock.
    pub fn beats(&self) -> Choice {
        match *self {
            Choice::Rock => Choice::Scissors,
            Choice::Paper => Choice::Rock,
            Choice::Scissors => Choice::Paper,
        }
    }

    pub fn label(&self) -> &'static str {
        match *self {
            Choice::Rock => "Rock",
            Choice::Paper => "Paper",
            Choice::Scissors => "Scissors",
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown choice {0:?}, expected rock, paper or scissors")]
pub struct ParseChoiceError(pub String);

impl FromStr for Choice {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rock" => Ok(Choice::Rock),
            "paper" => Ok(Choice::Paper),
            "scissors" => Ok(Choice::Scissors),
            _ => Err(ParseChoiceError(s.to_string())),
        }
    }
}

impl Distribution<Choice> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Choice {
        Choice::ALL[rng.gen_range(0..Choice::ALL.len())]
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    Win,
    Lose,
    Draw,
}

/// Outcome from the user's point of view.
pub fn resolve(user: Choice, computer: Choice) -> Outcome {
    if user == computer {
        Outcome::Draw
    } else if user.beats() == computer {
        Outcome::Win
    } else {
        Outcome::Lose
    }
}

/// One of the two presentation positions in the scene.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Slot {
    User,
    Computer,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::User, Slot::Computer];

    pub fn anchor_x(&self) -> f32 {
        match *self {
            Slot::User => -1.5,
            Slot::Computer => 1.5,
        }
    }

    /// Where the camera sits when it frames this slot's model.
    pub fn camera_focus(&self) -> Vec3 {
        Vec3::new(self.anchor_x(), 0.0, 3.0)
    }

    /// Slot holding the winning model, none on a draw.
    pub fn for_outcome(outcome: Outcome) -> Option<Slot> {
        match outcome {
            Outcome::Win => Some(Slot::User),
            Outcome::Lose => Some(Slot::Computer),
            Outcome::Draw => None,
        }
    }
}
