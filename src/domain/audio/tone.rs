use std::f32::consts::TAU;
use std::time::Duration;

use bevy::audio::{Decodable, Source};
use bevy::prelude::*;

const SAMPLE_RATE: u32 = 44_100;
/// Attack and release per note, in samples, so notes start and stop without clicks.
const EDGE_SAMPLES: u32 = 220;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub frequency: f32,
    pub seconds: f32,
}

impl Note {
    pub const fn new(frequency: f32, seconds: f32) -> Self {
        Self { frequency, seconds }
    }

    fn samples(&self) -> u32 {
        (self.seconds.max(0.0) * SAMPLE_RATE as f32).round() as u32
    }
}

/// A synthesised melody played as an audio source. A frequency of zero
/// is a rest.
#[derive(Asset, TypePath, Debug, Clone)]
pub struct ToneAudio {
    pub notes: Vec<Note>,
    pub gain: f32,
    pub repeat: bool,
}

impl Decodable for ToneAudio {
    type DecoderItem = f32;
    type Decoder = ToneDecoder;

    fn decoder(&self) -> Self::Decoder {
        ToneDecoder::new(self.clone())
    }
}

pub struct ToneDecoder {
    tone: ToneAudio,
    note: usize,
    sample: u32,
    phase: f32,
}

impl ToneDecoder {
    fn new(tone: ToneAudio) -> Self {
        Self {
            tone,
            note: 0,
            sample: 0,
            phase: 0.0,
        }
    }

    fn envelope(sample: u32, len: u32) -> f32 {
        let edge = EDGE_SAMPLES.min(len / 2).max(1) as f32;
        let from_start = sample as f32 / edge;
        let to_end = (len - sample) as f32 / edge;
        from_start.min(to_end).min(1.0)
    }
}

impl Iterator for ToneDecoder {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        loop {
            let note = match self.tone.notes.get(self.note) {
                Some(note) => *note,
                None if self.tone.repeat && self.tone.notes.iter().any(|n| n.samples() > 0) => {
                    self.note = 0;
                    continue;
                }
                None => return None,
            };
            let len = note.samples();
            if self.sample >= len {
                self.note += 1;
                self.sample = 0;
                self.phase = 0.0;
                continue;
            }

            let value = if note.frequency > 0.0 {
                self.phase = (self.phase + note.frequency / SAMPLE_RATE as f32) % 1.0;
                (TAU * self.phase).sin() * Self::envelope(self.sample, len)
            } else {
                0.0
            };
            self.sample += 1;
            return Some(value * self.tone.gain);
        }
    }
}

impl Source for ToneDecoder {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        if self.tone.repeat {
            return None;
        }
        let secs: f32 = self.tone.notes.iter().map(|note| note.seconds.max(0.0)).sum();
        Some(Duration::from_secs_f32(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(notes: Vec<Note>, repeat: bool) -> ToneAudio {
        ToneAudio {
            notes,
            gain: 0.5,
            repeat,
        }
    }

    #[test]
    fn finite_tone_ends_after_its_notes() {
        let t = tone(vec![Note::new(440.0, 0.01), Note::new(0.0, 0.01)], false);
        let samples: Vec<f32> = t.decoder().collect();
        assert_eq!(samples.len(), 2 * (SAMPLE_RATE / 100) as usize);
        assert!(samples.iter().all(|s| s.abs() <= 0.5 + 1e-6));
        // the rest is silent
        assert!(samples[samples.len() / 2..].iter().all(|s| *s == 0.0));
    }

    #[test]
    fn notes_fade_in_from_silence() {
        let t = tone(vec![Note::new(440.0, 0.1)], false);
        let first = t.decoder().next().unwrap_or(1.0);
        assert!(first.abs() < 0.01);
    }

    #[test]
    fn repeating_tone_keeps_going() {
        let t = tone(vec![Note::new(220.0, 0.001)], true);
        assert_eq!(t.decoder().take(1000).count(), 1000);
        assert_eq!(t.decoder().total_duration(), None);
    }

    #[test]
    fn empty_repeating_tone_is_silent_and_finite() {
        let t = tone(Vec::new(), true);
        assert_eq!(t.decoder().next(), None);
    }
}
