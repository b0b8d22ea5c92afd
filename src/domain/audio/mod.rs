//! Audio port: short cues for clicks and round outcomes plus a quiet
//! background loop, all synthesised at startup. Playback problems never
//! reach the round logic.

mod tone;

use bevy::audio::{AddAudioSource, Volume};
use bevy::prelude::*;

pub use tone::{Note, ToneAudio};

use crate::domain::settings::GameSettings;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Cue {
    Win,
    Lose,
    Draw,
    Click,
}

#[derive(Event, Clone, Copy, Debug)]
pub struct PlayCue(pub Cue);

#[derive(Resource)]
struct CueSounds {
    win: Handle<ToneAudio>,
    lose: Handle<ToneAudio>,
    draw: Handle<ToneAudio>,
    click: Handle<ToneAudio>,
}

impl CueSounds {
    fn handle(&self, cue: Cue) -> Handle<ToneAudio> {
        match cue {
            Cue::Win => self.win.clone(),
            Cue::Lose => self.lose.clone(),
            Cue::Draw => self.draw.clone(),
            Cue::Click => self.click.clone(),
        }
    }
}

#[derive(Component)]
struct BackgroundMusic;

/// How long the background loop may go without a sink before audio output
/// is considered unavailable.
const OUTPUT_GRACE_SECS: f32 = 2.0;

#[derive(Resource)]
struct OutputWatch {
    timer: Timer,
    settled: bool,
}

impl Default for OutputWatch {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(OUTPUT_GRACE_SECS, TimerMode::Once),
            settled: false,
        }
    }
}

pub struct SoundPlugin;
impl Plugin for SoundPlugin {
    fn build(&self, app: &mut App) {
        app.add_audio_source::<ToneAudio>()
            .init_resource::<OutputWatch>()
            .add_event::<PlayCue>()
            .add_systems(Startup, setup_sounds)
            .add_systems(
                Update,
                (detect_missing_output, follow_sound_toggle, play_cues).chain(),
            );
    }
}

fn cue_tone(cue: Cue) -> ToneAudio {
    let notes = match cue {
        Cue::Win => vec![
            Note::new(523.25, 0.09),
            Note::new(659.25, 0.09),
            Note::new(783.99, 0.09),
            Note::new(1046.5, 0.22),
        ],
        Cue::Lose => vec![
            Note::new(392.0, 0.12),
            Note::new(311.13, 0.12),
            Note::new(233.08, 0.3),
        ],
        Cue::Draw => vec![
            Note::new(587.33, 0.08),
            Note::new(0.0, 0.05),
            Note::new(587.33, 0.08),
        ],
        Cue::Click => vec![Note::new(1318.5, 0.03)],
    };
    ToneAudio {
        notes,
        gain: 0.5,
        repeat: false,
    }
}

fn background_tone() -> ToneAudio {
    ToneAudio {
        notes: vec![
            Note::new(110.0, 1.6),
            Note::new(130.81, 1.6),
            Note::new(98.0, 1.6),
            Note::new(146.83, 1.6),
        ],
        gain: 0.3,
        repeat: true,
    }
}

fn setup_sounds(
    mut commands: Commands,
    mut tones: ResMut<Assets<ToneAudio>>,
    settings: Res<GameSettings>,
) {
    commands.insert_resource(CueSounds {
        win: tones.add(cue_tone(Cue::Win)),
        lose: tones.add(cue_tone(Cue::Lose)),
        draw: tones.add(cue_tone(Cue::Draw)),
        click: tones.add(cue_tone(Cue::Click)),
    });

    let mut playback = PlaybackSettings::LOOP.with_volume(Volume::new(0.3));
    playback.paused = !settings.sound_enabled;
    commands.spawn((
        AudioSourceBundle {
            source: tones.add(background_tone()),
            settings: playback,
        },
        BackgroundMusic,
    ));
}

fn play_cues(
    mut commands: Commands,
    mut events: EventReader<PlayCue>,
    sounds: Option<Res<CueSounds>>,
    settings: Res<GameSettings>,
) {
    let Some(sounds) = sounds else {
        events.clear();
        return;
    };

    for ev in events.read() {
        if !settings.sound_enabled {
            continue;
        }
        commands.spawn(AudioSourceBundle {
            source: sounds.handle(ev.0),
            settings: PlaybackSettings::DESPAWN.with_volume(Volume::new(0.5)),
        });
    }
}

/// Pauses or resumes the background loop. A missing sink (no audio device,
/// source not started yet) is ignored.
fn follow_sound_toggle(
    settings: Res<GameSettings>,
    music: Query<&AudioSink, With<BackgroundMusic>>,
) {
    if !settings.is_changed() {
        return;
    }
    let Ok(sink) = music.get_single() else {
        debug!("background music sink not ready");
        return;
    };
    if settings.sound_enabled {
        sink.play();
    } else {
        sink.pause();
    }
}

/// Turns sound off when no output device ever produced a sink for the
/// background loop, so the HUD stops claiming sound is on.
fn detect_missing_output(
    time: Res<Time>,
    mut watch: ResMut<OutputWatch>,
    mut settings: ResMut<GameSettings>,
    music: Query<Has<AudioSink>, With<BackgroundMusic>>,
) {
    if watch.settled {
        return;
    }
    if music.iter().any(|has_sink| has_sink) {
        watch.settled = true;
        return;
    }
    if watch.timer.tick(time.delta()).just_finished() {
        watch.settled = true;
        if settings.sound_enabled {
            warn!("no audio output available, muting");
            settings.sound_enabled = false;
        }
    }
}
