use super::channels::channel_index;
use smallvec::{smallvec, SmallVec};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TunerState {
    /// Static loop is (or should be) playing; no station resolved.
    #[default]
    Static,
    /// Static playing while the scan timer waits for the knob to settle.
    Scanning,
    /// A station track owns the output; static is paused.
    Tuned { channel: usize },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TunerEvent {
    KnobMoved,
    ScanSettled { angle: f32 },
    StationEnded { channel: usize },
    /// Any pointer-down on the page. `audible` reports whether either track
    /// is currently producing sound.
    UserGesture { audible: bool },
}

/// Side effects requested by a transition, executed in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    PlayStatic,
    PauseStatic,
    PauseStation,
    ArmScanTimer,
    StartStation(usize),
    ShowInfo(usize),
}

pub type Commands = SmallVec<[Command; 4]>;

/// The static/scanning/tuned state machine behind the radio's audio output.
///
/// Every pause/play decision goes through [`Tuner::handle`]; the static loop
/// is paused before a station starts and the station is paused before the
/// static loop resumes, so the two never play at once.
#[derive(Clone, Debug)]
pub struct Tuner {
    state: TunerState,
    channel_count: usize,
}

impl Tuner {
    pub fn new(channel_count: usize) -> Self {
        Self {
            state: TunerState::Static,
            channel_count,
        }
    }

    #[inline]
    pub fn state(&self) -> TunerState {
        self.state
    }

    /// Start-up autoplay attempt for the static loop.
    pub fn boot(&self) -> Commands {
        smallvec![Command::PlayStatic]
    }

    pub fn handle(&mut self, event: TunerEvent) -> Commands {
        match (self.state, event) {
            (state, TunerEvent::KnobMoved) => {
                let mut out = Commands::new();
                if matches!(state, TunerState::Tuned { .. }) {
                    out.push(Command::PauseStation);
                }
                out.push(Command::PlayStatic);
                out.push(Command::ArmScanTimer);
                self.state = TunerState::Scanning;
                out
            }
            (TunerState::Scanning, TunerEvent::ScanSettled { angle }) => {
                if self.channel_count == 0 {
                    self.state = TunerState::Static;
                    return Commands::new();
                }
                let channel = channel_index(angle, self.channel_count);
                self.state = TunerState::Tuned { channel };
                smallvec![
                    Command::PauseStatic,
                    Command::StartStation(channel),
                    Command::ShowInfo(channel),
                ]
            }
            (TunerState::Tuned { channel }, TunerEvent::StationEnded { channel: ended })
                if channel == ended =>
            {
                self.state = TunerState::Static;
                smallvec![Command::PlayStatic]
            }
            (state, TunerEvent::UserGesture { audible: false }) => {
                let mut out = Commands::new();
                if matches!(state, TunerState::Tuned { .. }) {
                    out.push(Command::PauseStation);
                    self.state = TunerState::Static;
                }
                out.push(Command::PlayStatic);
                out
            }
            _ => Commands::new(),
        }
    }
}
