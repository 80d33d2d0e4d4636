//! Event sinks a host installs to observe the machine.
//!
//! Every sink is optional and invoked synchronously from inside `step()`:
//! the trace and switch sinks right after the register write that caused
//! them, the frame sink right after a field is rendered.

use std::fmt;

use crate::Image;

pub type TraceSink = Box<dyn FnMut(&str) + Send>;
pub type FrameSink = Box<dyn FnMut(Image) + Send>;
pub type SwitchSink = Box<dyn FnMut(bool) + Send>;
pub type SpeakerSink = Box<dyn FnMut(u32) + Send>;

/// The collaborator surface of an Electron.
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use electron_emu::ElectronPorts;
///
/// let tones = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&tones);
///
/// let ports = ElectronPorts::new()
///     .with_speaker(move |hz| sink.lock().unwrap().push(hz))
///     .with_trace(|msg| eprint!("{msg}"));
///
/// assert!(!ports.has_frame_sink());
/// ```
#[derive(Default)]
pub struct ElectronPorts {
    trace: Option<TraceSink>,
    frame_completed: Option<FrameSink>,
    caps_lock: Option<SwitchSink>,
    cassette_motor: Option<SwitchSink>,
    speaker: Option<SpeakerSink>,
}

impl ElectronPorts {
    /// Ports with no sinks installed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Receives diagnostic messages about unmapped IO accesses.
    pub fn with_trace(mut self, sink: impl FnMut(&str) + Send + 'static) -> Self {
        self.trace = Some(Box::new(sink));
        self
    }

    /// Receives each rendered field. Without this sink no frame is rendered.
    pub fn with_frame_completed(mut self, sink: impl FnMut(Image) + Send + 'static) -> Self {
        self.frame_completed = Some(Box::new(sink));
        self
    }

    /// Called with the new state whenever the caps-lock LED changes.
    pub fn with_caps_lock(mut self, sink: impl FnMut(bool) + Send + 'static) -> Self {
        self.caps_lock = Some(Box::new(sink));
        self
    }

    /// Called with the new state whenever the cassette motor relay changes.
    pub fn with_cassette_motor(mut self, sink: impl FnMut(bool) + Send + 'static) -> Self {
        self.cassette_motor = Some(Box::new(sink));
        self
    }

    /// Called with a tone frequency in Hz, or 0 for silence.
    pub fn with_speaker(mut self, sink: impl FnMut(u32) + Send + 'static) -> Self {
        self.speaker = Some(Box::new(sink));
        self
    }

    pub fn has_frame_sink(&self) -> bool {
        self.frame_completed.is_some()
    }

    pub(crate) fn trace(&mut self, message: &str) {
        if let Some(sink) = self.trace.as_mut() {
            sink(message);
        }
    }

    pub(crate) fn frame_completed(&mut self, image: Image) {
        if let Some(sink) = self.frame_completed.as_mut() {
            sink(image);
        }
    }

    pub(crate) fn caps_lock(&mut self, on: bool) {
        if let Some(sink) = self.caps_lock.as_mut() {
            sink(on);
        }
    }

    pub(crate) fn cassette_motor(&mut self, on: bool) {
        if let Some(sink) = self.cassette_motor.as_mut() {
            sink(on);
        }
    }

    pub(crate) fn speaker(&mut self, frequency: u32) {
        if let Some(sink) = self.speaker.as_mut() {
            sink(frequency);
        }
    }
}

impl fmt::Debug for ElectronPorts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElectronPorts")
            .field("trace", &self.trace.is_some())
            .field("frame_completed", &self.frame_completed.is_some())
            .field("caps_lock", &self.caps_lock.is_some())
            .field("cassette_motor", &self.cassette_motor.is_some())
            .field("speaker", &self.speaker.is_some())
            .finish()
    }
}
