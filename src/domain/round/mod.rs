//! Round pacing: the session state machine and the systems that feed it
//! input, advance its timers each frame and publish its side effects.

mod opponent;
mod scheduler;
mod session;

use bevy::prelude::*;

pub use opponent::{ChoiceSource, RandomOpponent, ScriptedOpponent};
pub use session::{Phase, RoundEffect, RoundTiming, Scoreboard, Session, StatusLine, Tone};

use crate::domain::audio::PlayCue;
use crate::domain::rules::Choice;
use crate::domain::scene::SceneRequest;
use crate::domain::settings::GameSettings;

#[derive(Event, Clone, Copy, Debug)]
pub struct ChoiceRequested(pub Choice);

#[derive(Event, Default, Clone, Copy, Debug)]
pub struct ResetRequested;

/// What the HUD shows. Written only from session effects.
#[derive(Resource, Default, Debug, Clone)]
pub struct Hud {
    pub status: StatusLine,
    pub scores: Scoreboard,
    pub highlighted: Option<Choice>,
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoundSystems;

pub struct RoundPlugin;
impl Plugin for RoundPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameSettings>()
            .init_resource::<Hud>()
            .add_event::<ChoiceRequested>()
            .add_event::<ResetRequested>()
            .add_event::<SceneRequest>()
            .add_event::<PlayCue>()
            .add_systems(Startup, init_session)
            .add_systems(
                Update,
                (sync_timing, drive_round, handle_requests, dispatch_effects)
                    .chain()
                    .in_set(RoundSystems),
            );
    }
}

fn init_session(mut commands: Commands, settings: Res<GameSettings>, existing: Option<Res<Session>>) {
    if existing.is_some() {
        return;
    }
    commands.insert_resource(Session::new(
        settings.round_timing(),
        settings.opponent.build(),
    ));
}

fn sync_timing(settings: Res<GameSettings>, mut session: ResMut<Session>) {
    if !settings.is_changed() {
        return;
    }
    let timing = settings.round_timing();
    if session.timing() != timing {
        session.set_timing(timing);
    }
}

fn drive_round(time: Res<Time>, mut session: ResMut<Session>) {
    session.advance(time.delta());
}

fn handle_requests(
    mut session: ResMut<Session>,
    mut choices: EventReader<ChoiceRequested>,
    mut resets: EventReader<ResetRequested>,
) {
    for ev in choices.read() {
        session.choose(ev.0);
    }
    if resets.read().count() > 0 {
        session.reset();
    }
}

fn dispatch_effects(
    mut session: ResMut<Session>,
    mut hud: ResMut<Hud>,
    mut scene: EventWriter<SceneRequest>,
    mut cues: EventWriter<PlayCue>,
) {
    if !session.has_effects() {
        return;
    }
    for effect in session.drain_effects() {
        match effect {
            RoundEffect::Scene(request) => {
                scene.send(request);
            }
            RoundEffect::Cue(cue) => {
                cues.send(PlayCue(cue));
            }
            RoundEffect::Status(status) => hud.status = status,
            RoundEffect::Scores(scores) => hud.scores = scores,
            RoundEffect::Highlight(choice) => hud.highlighted = choice,
        }
    }
}
