//! Sound cues. A terminal cannot stream music, so tracks are modeled as
//! state and the one audible effect is the ASCII bell on victory.

use std::io::Write;

/// Which backing track the game wants right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    Menu,
    Exploring,
    Battle,
    Victory,
}

/// Audio output seam. The engine requests tracks; the sink decides what
/// that means for the hardware it has.
pub trait AudioSink {
    fn play(&mut self, track: Track);
    fn silence(&mut self);
    fn set_enabled(&mut self, enabled: bool);
    fn is_enabled(&self) -> bool;
}

/// Sink for real terminals: remembers the requested track and rings the
/// terminal bell when a victory sting is asked for.
pub struct TerminalBell {
    enabled: bool,
    current: Option<Track>,
}

impl TerminalBell {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            current: None,
        }
    }

    pub fn current(&self) -> Option<Track> {
        self.current
    }
}

impl AudioSink for TerminalBell {
    fn play(&mut self, track: Track) {
        self.current = Some(track);
        if self.enabled && track == Track::Victory {
            // BEL; errors writing a single byte to stdout are not actionable.
            std::io::stdout().write_all(b"\x07").ok();
        }
    }

    fn silence(&mut self) {
        self.current = None;
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Silent sink for tests.
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _track: Track) {}
    fn silence(&mut self) {}
    fn set_enabled(&mut self, _enabled: bool) {}
    fn is_enabled(&self) -> bool {
        false
    }
}
