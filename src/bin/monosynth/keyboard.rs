//! QWERTY keyboard as a monophonic piano
//!
//! Two rows of letters form one chromatic octave:
//!
//! ```text
//!    W E   T Y U
//!   A S D F G H J K
//!   C D E F G A B C
//! ```
//!
//! The most recently pressed key sounds. Releasing it falls back to the
//! previous key that is still held (retuned, not re-struck); releasing the
//! last key releases the voice.
//!
//! Terminals only report key releases when they support the keyboard
//! enhancement protocol. Without it a held key shows up as a stream of
//! auto-repeat presses, so a key counts as released once its presses stop
//! arriving for a while.

use std::time::{Duration, Instant};

pub const MIN_OCTAVE: u8 = 2;
pub const MAX_OCTAVE: u8 = 6;
const DEFAULT_OCTAVE: u8 = 4;

/// Wait before the first auto-repeat. Must outlast the usual desktop repeat
/// delays (600 ms on KDE, 660 ms on X11) or a held note stutters.
const FIRST_REPEAT_TIMEOUT: Duration = Duration::from_millis(750);
/// Wait between auto-repeats once they are flowing.
const REPEAT_TIMEOUT: Duration = Duration::from_millis(120);

const KEYS: [char; 13] = [
    'a', 'w', 's', 'e', 'd', 'f', 't', 'g', 'y', 'h', 'u', 'j', 'k',
];

/// Semitone above the octave's C, or None for a non-note key.
pub fn semitone(key: char) -> Option<u8> {
    let key = key.to_ascii_lowercase();
    KEYS.iter().position(|&k| k == key).map(|i| i as u8)
}

/// What the voice should do after a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteAction {
    /// Strike a new note.
    Trigger(u8),
    /// Move the sounding note without re-striking it.
    Retune(u8),
    Release,
}

#[derive(Debug, Clone, Copy)]
struct HeldKey {
    key: char,
    note: u8,
    last_seen: Instant,
    repeating: bool,
}

#[derive(Debug)]
pub struct Keyboard {
    octave: u8,
    // oldest first; the last entry is sounding
    held: Vec<HeldKey>,
    release_events: bool,
}

impl Keyboard {
    /// `release_events`: the terminal reports key releases, so no timeout
    /// is needed.
    pub fn new(release_events: bool) -> Self {
        Self {
            octave: DEFAULT_OCTAVE,
            held: Vec::with_capacity(KEYS.len()),
            release_events,
        }
    }

    pub fn octave(&self) -> u8 {
        self.octave
    }

    pub fn octave_down(&mut self) {
        self.octave = self.octave.saturating_sub(1).max(MIN_OCTAVE);
    }

    pub fn octave_up(&mut self) {
        self.octave = (self.octave + 1).min(MAX_OCTAVE);
    }

    /// MIDI note of a key in the current octave (octave 4 puts A on 69).
    pub fn note_for(&self, key: char) -> Option<u8> {
        semitone(key).map(|s| (self.octave + 1) * 12 + s)
    }

    /// The note currently sounding, if any.
    pub fn sounding(&self) -> Option<u8> {
        self.held.last().map(|k| k.note)
    }

    /// A key went down, or auto-repeated.
    pub fn press(&mut self, key: char, now: Instant) -> Option<NoteAction> {
        let key = key.to_ascii_lowercase();
        if let Some(held) = self.held.iter_mut().find(|k| k.key == key) {
            held.last_seen = now;
            held.repeating = true;
            return None;
        }

        let note = self.note_for(key)?;
        self.held.push(HeldKey {
            key,
            note,
            last_seen: now,
            repeating: false,
        });
        Some(NoteAction::Trigger(note))
    }

    /// A key came up.
    pub fn release(&mut self, key: char) -> Option<NoteAction> {
        let key = key.to_ascii_lowercase();
        let index = self.held.iter().position(|k| k.key == key)?;
        let was_sounding = index + 1 == self.held.len();
        self.held.remove(index);

        if !was_sounding {
            return None;
        }
        Some(match self.held.last() {
            Some(previous) => NoteAction::Retune(previous.note),
            None => NoteAction::Release,
        })
    }

    /// Release keys whose auto-repeat has stopped. Does nothing when the
    /// terminal reports releases itself.
    pub fn expire(&mut self, now: Instant) -> Option<NoteAction> {
        if self.release_events {
            return None;
        }

        let mut action = None;
        loop {
            let stale = self.held.iter().find(|k| {
                let timeout = if k.repeating {
                    REPEAT_TIMEOUT
                } else {
                    FIRST_REPEAT_TIMEOUT
                };
                now.duration_since(k.last_seen) > timeout
            });
            let Some(key) = stale.map(|k| k.key) else {
                break;
            };
            action = self.release(key).or(action);
        }
        action
    }

    /// Forget every held key (after a reset).
    pub fn clear(&mut self) {
        self.held.clear();
    }
}
