use std::time::Duration;

use bevy::prelude::*;

use super::opponent::ChoiceSource;
use super::scheduler::Scheduler;
use crate::domain::audio::Cue;
use crate::domain::rules::{resolve, Choice, Outcome, Slot};
use crate::domain::scene::SceneRequest;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Phase {
    #[default]
    Idle,
    AwaitingComputer,
    Resolved,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct RoundState {
    pub user_choice: Option<Choice>,
    pub computer_choice: Option<Choice>,
    pub active: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Scoreboard {
    pub user: u32,
    pub computer: u32,
    pub draws: u32,
}

impl Scoreboard {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.user += 1,
            Outcome::Lose => self.computer += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    pub fn rounds(&self) -> u32 {
        self.user + self.computer + self.draws
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Tone {
    #[default]
    None,
    Win,
    Lose,
    Draw,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct StatusLine {
    pub message: &'static str,
    pub tone: Tone,
}

impl StatusLine {
    pub const PROMPT: StatusLine = StatusLine {
        message: "Choose your move!",
        tone: Tone::None,
    };
    pub const THINKING: StatusLine = StatusLine {
        message: "Computer is thinking...",
        tone: Tone::None,
    };

    pub fn for_outcome(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Win => StatusLine {
                message: "You win!",
                tone: Tone::Win,
            },
            Outcome::Lose => StatusLine {
                message: "You lose!",
                tone: Tone::Lose,
            },
            Outcome::Draw => StatusLine {
                message: "It's a draw!",
                tone: Tone::Draw,
            },
        }
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::PROMPT
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RoundTiming {
    pub computer_delay: Duration,
    pub cooldown: Duration,
}

impl Default for RoundTiming {
    fn default() -> Self {
        Self {
            computer_delay: Duration::from_millis(1000),
            cooldown: Duration::from_millis(3000),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum RoundTask {
    RevealComputer,
    Unlock,
}

/// Side effects requested by the session, drained once per frame.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum RoundEffect {
    Scene(SceneRequest),
    Cue(Cue),
    Status(StatusLine),
    Scores(Scoreboard),
    Highlight(Option<Choice>),
}

/// One play session: round state machine, scores and the timers that pace
/// a round. The only writer of scores and round state.
#[derive(Resource)]
pub struct Session {
    phase: Phase,
    round: RoundState,
    scores: Scoreboard,
    status: StatusLine,
    timing: RoundTiming,
    timers: Scheduler<RoundTask>,
    opponent: Box<dyn ChoiceSource>,
    outbox: Vec<RoundEffect>,
}

impl Session {
    pub fn new(timing: RoundTiming, opponent: Box<dyn ChoiceSource>) -> Self {
        Self {
            phase: Phase::Idle,
            round: RoundState::default(),
            scores: Scoreboard::default(),
            status: StatusLine::PROMPT,
            timing,
            timers: Scheduler::default(),
            opponent,
            outbox: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> RoundState {
        self.round
    }

    pub fn scores(&self) -> Scoreboard {
        self.scores
    }

    pub fn status(&self) -> StatusLine {
        self.status
    }

    pub fn timing(&self) -> RoundTiming {
        self.timing
    }

    pub fn is_active(&self) -> bool {
        self.round.active
    }

    /// Takes effect at the next scheduled transition.
    pub fn set_timing(&mut self, timing: RoundTiming) {
        self.timing = timing;
    }

    /// Starts a round. Returns false, changing nothing, while a round is
    /// already in flight.
    pub fn choose(&mut self, choice: Choice) -> bool {
        if self.round.active {
            debug!("round in progress, dropping {choice}");
            return false;
        }

        self.round = RoundState {
            user_choice: Some(choice),
            computer_choice: None,
            active: true,
        };
        self.phase = Phase::AwaitingComputer;

        self.emit(RoundEffect::Cue(Cue::Click));
        self.emit(RoundEffect::Highlight(Some(choice)));
        self.emit(RoundEffect::Scene(SceneRequest::Present {
            choice,
            slot: Slot::User,
        }));
        self.set_status(StatusLine::THINKING);
        self.timers
            .schedule(RoundTask::RevealComputer, self.timing.computer_delay);
        true
    }

    /// Moves the round clock forward by one frame, running every
    /// transition that falls due.
    pub fn advance(&mut self, delta: Duration) {
        let deadline = self.timers.now() + delta;
        while let Some(task) = self.timers.pop_due(deadline) {
            match task {
                RoundTask::RevealComputer => self.reveal_computer(),
                RoundTask::Unlock => self.unlock(),
            }
        }
        self.timers.settle(deadline);
    }

    /// Zeroes the scores and returns to the prompt. Pending round timers
    /// are cancelled so a stale reveal cannot score against the new game.
    pub fn reset(&mut self) {
        if self.round.active {
            info!("reset during an active round, cancelling pending transitions");
        }
        self.timers.cancel_all();
        self.round = RoundState::default();
        self.phase = Phase::Idle;
        self.scores = Scoreboard::default();

        self.emit(RoundEffect::Cue(Cue::Click));
        self.emit(RoundEffect::Scores(self.scores));
        self.emit(RoundEffect::Highlight(None));
        self.set_status(StatusLine::PROMPT);
        self.emit(RoundEffect::Scene(SceneRequest::ResetCamera));
        self.emit(RoundEffect::Scene(SceneRequest::Clear));
    }

    pub fn has_effects(&self) -> bool {
        !self.outbox.is_empty()
    }

    pub fn drain_effects(&mut self) -> std::vec::Drain<'_, RoundEffect> {
        self.outbox.drain(..)
    }

    fn reveal_computer(&mut self) {
        let Some(user) = self.round.user_choice else {
            warn!("computer reveal fired without a user choice");
            return;
        };

        let computer = self.opponent.next_choice();
        self.round.computer_choice = Some(computer);
        self.phase = Phase::Resolved;
        self.emit(RoundEffect::Scene(SceneRequest::Present {
            choice: computer,
            slot: Slot::Computer,
        }));

        let outcome = resolve(user, computer);
        info!("{user} vs {computer}: {outcome:?}");
        self.apply_outcome(outcome);

        self.timers.schedule(RoundTask::Unlock, self.timing.cooldown);
    }

    fn apply_outcome(&mut self, outcome: Outcome) {
        self.scores.record(outcome);
        self.emit(RoundEffect::Scores(self.scores));

        let cue = match outcome {
            Outcome::Win => Cue::Win,
            Outcome::Lose => Cue::Lose,
            Outcome::Draw => Cue::Draw,
        };
        self.emit(RoundEffect::Cue(cue));

        if let Some(winner) = Slot::for_outcome(outcome) {
            self.emit(RoundEffect::Scene(SceneRequest::Celebrate(winner)));
        }
        if outcome == Outcome::Win {
            self.emit(RoundEffect::Scene(SceneRequest::Fanfare(Slot::User)));
        }
        self.set_status(StatusLine::for_outcome(outcome));
    }

    fn unlock(&mut self) {
        self.round.active = false;
        self.phase = Phase::Idle;
        self.emit(RoundEffect::Scene(SceneRequest::ResetCamera));
    }

    fn set_status(&mut self, status: StatusLine) {
        self.status = status;
        self.emit(RoundEffect::Status(status));
    }

    fn emit(&mut self, effect: RoundEffect) {
        self.outbox.push(effect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::round::opponent::ScriptedOpponent;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn session_against(script: &[Choice]) -> Session {
        let opponent = ScriptedOpponent::new(script.iter().copied()).expect("non-empty script");
        Session::new(RoundTiming::default(), Box::new(opponent))
    }

    fn effects(session: &mut Session) -> Vec<RoundEffect> {
        session.drain_effects().collect()
    }

    /// Runs one full round in 100 ms frames.
    fn play(session: &mut Session, choice: Choice) {
        assert!(session.choose(choice));
        for _ in 0..40 {
            session.advance(ms(100));
        }
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn win_scores_and_unlocks_after_cooldown() {
        let mut session = session_against(&[Choice::Scissors]);

        assert!(session.choose(Choice::Rock));
        assert_eq!(session.phase(), Phase::AwaitingComputer);
        assert_eq!(session.status(), StatusLine::THINKING);

        session.advance(ms(999));
        assert_eq!(session.phase(), Phase::AwaitingComputer);
        assert_eq!(session.round().computer_choice, None);

        session.advance(ms(1));
        assert_eq!(session.phase(), Phase::Resolved);
        assert_eq!(session.round().computer_choice, Some(Choice::Scissors));
        assert_eq!(session.scores().user, 1);
        assert_eq!(session.status(), StatusLine::for_outcome(Outcome::Win));

        session.advance(ms(2999));
        assert!(session.is_active());
        session.advance(ms(1));
        assert!(!session.is_active());
        assert_eq!(session.phase(), Phase::Idle);

        assert!(session.choose(Choice::Paper));
    }

    #[test]
    fn win_effects_in_order() {
        let mut session = session_against(&[Choice::Scissors]);
        session.choose(Choice::Rock);
        assert_eq!(
            effects(&mut session),
            [
                RoundEffect::Cue(Cue::Click),
                RoundEffect::Highlight(Some(Choice::Rock)),
                RoundEffect::Scene(SceneRequest::Present {
                    choice: Choice::Rock,
                    slot: Slot::User
                }),
                RoundEffect::Status(StatusLine::THINKING),
            ]
        );

        session.advance(ms(1000));
        let scores = Scoreboard {
            user: 1,
            computer: 0,
            draws: 0,
        };
        assert_eq!(
            effects(&mut session),
            [
                RoundEffect::Scene(SceneRequest::Present {
                    choice: Choice::Scissors,
                    slot: Slot::Computer
                }),
                RoundEffect::Scores(scores),
                RoundEffect::Cue(Cue::Win),
                RoundEffect::Scene(SceneRequest::Celebrate(Slot::User)),
                RoundEffect::Scene(SceneRequest::Fanfare(Slot::User)),
                RoundEffect::Status(StatusLine::for_outcome(Outcome::Win)),
            ]
        );

        session.advance(ms(3000));
        assert_eq!(
            effects(&mut session),
            [RoundEffect::Scene(SceneRequest::ResetCamera)]
        );
    }

    #[test]
    fn lose_celebrates_the_computer_without_fanfare() {
        let mut session = session_against(&[Choice::Rock]);
        session.choose(Choice::Scissors);
        session.advance(ms(1000));
        let fx = effects(&mut session);
        assert!(fx.contains(&RoundEffect::Cue(Cue::Lose)));
        assert!(fx.contains(&RoundEffect::Scene(SceneRequest::Celebrate(Slot::Computer))));
        assert!(!fx
            .iter()
            .any(|e| matches!(e, RoundEffect::Scene(SceneRequest::Fanfare(_)))));
        assert_eq!(session.scores().computer, 1);
    }

    #[test]
    fn draw_leaves_scores_alone() {
        let mut session = session_against(&[Choice::Paper]);
        session.choose(Choice::Paper);
        session.advance(ms(1000));

        let scores = session.scores();
        assert_eq!((scores.user, scores.computer, scores.draws), (0, 0, 1));
        assert_eq!(session.status().tone, Tone::Draw);
        let fx = effects(&mut session);
        assert!(fx.contains(&RoundEffect::Cue(Cue::Draw)));
        assert!(!fx
            .iter()
            .any(|e| matches!(e, RoundEffect::Scene(SceneRequest::Celebrate(_)))));
    }

    #[test]
    fn second_choice_in_active_window_is_dropped() {
        let mut session = session_against(&[Choice::Scissors]);
        assert!(session.choose(Choice::Rock));
        let before = session.round();
        effects(&mut session);

        session.advance(ms(300));
        assert!(!session.choose(Choice::Paper));
        assert_eq!(session.round(), before);
        assert!(!session.has_effects());

        // still rejected while resolved and cooling down
        session.advance(ms(1500));
        let resolved = session.round();
        assert!(!session.choose(Choice::Scissors));
        assert_eq!(session.round(), resolved);
        assert_eq!(resolved.user_choice, Some(Choice::Rock));
    }

    #[test]
    fn one_long_frame_runs_both_transitions() {
        let mut session = session_against(&[Choice::Rock]);
        session.choose(Choice::Rock);
        session.advance(ms(5000));
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.scores().draws, 1);
    }

    #[test]
    fn score_total_matches_rounds_played() {
        let script = [Choice::Rock, Choice::Paper, Choice::Scissors, Choice::Paper];
        let mut session = session_against(&script);
        let picks = [Choice::Rock, Choice::Scissors, Choice::Rock, Choice::Paper, Choice::Paper];

        let mut last = session.scores();
        for (n, pick) in picks.into_iter().enumerate() {
            play(&mut session, pick);
            let scores = session.scores();
            assert!(scores.user >= last.user && scores.computer >= last.computer);
            assert_eq!(scores.rounds(), n as u32 + 1);
            last = scores;
        }
    }

    #[test]
    fn reset_is_idempotent() {
        let mut session = session_against(&[Choice::Scissors]);
        play(&mut session, Choice::Rock);

        session.reset();
        let once = (session.phase(), session.round(), session.scores(), session.status());
        session.reset();
        let twice = (session.phase(), session.round(), session.scores(), session.status());

        assert_eq!(once, twice);
        assert_eq!(session.scores(), Scoreboard::default());
        assert_eq!(session.status(), StatusLine::PROMPT);
    }

    #[test]
    fn reset_mid_round_cancels_the_pending_reveal() {
        let mut session = session_against(&[Choice::Scissors]);
        session.choose(Choice::Rock);
        session.advance(ms(500));

        session.reset();
        assert!(!session.is_active());
        assert_eq!(session.phase(), Phase::Idle);

        session.advance(ms(5000));
        assert_eq!(session.scores(), Scoreboard::default());
        assert!(session.choose(Choice::Paper));
    }

    #[test]
    fn reset_emits_clear_and_camera_reset() {
        let mut session = session_against(&[Choice::Rock]);
        session.reset();
        let fx = effects(&mut session);
        assert!(fx.contains(&RoundEffect::Scene(SceneRequest::ResetCamera)));
        assert!(fx.contains(&RoundEffect::Scene(SceneRequest::Clear)));
        assert!(fx.contains(&RoundEffect::Highlight(None)));
        assert!(fx.contains(&RoundEffect::Status(StatusLine::PROMPT)));
    }

    #[test]
    fn timing_changes_apply_to_the_next_round() {
        let mut session = session_against(&[Choice::Rock]);
        session.set_timing(RoundTiming {
            computer_delay: ms(200),
            cooldown: ms(300),
        });
        session.choose(Choice::Rock);
        session.advance(ms(200));
        assert_eq!(session.phase(), Phase::Resolved);
        session.advance(ms(300));
        assert_eq!(session.phase(), Phase::Idle);
    }
}
