// Host-side tests for the static/scanning/tuned state machine. A fake
// player executes the emitted commands so the audio exclusivity invariant
// can be checked after every step.

#![allow(dead_code)]
mod core {
    pub mod channels {
        include!("../src/core/channels.rs");
    }
    pub mod tuner {
        include!("../src/core/tuner.rs");
    }
}

use self::core::tuner::*;

#[derive(Default, Debug)]
struct FakePlayer {
    static_playing: bool,
    station: Option<usize>,
    station_playing: bool,
    // autoplay blocked until the first gesture
    blocked: bool,
    armed: usize,
    shown: Vec<usize>,
}

impl FakePlayer {
    fn run(&mut self, cmds: &[Command]) {
        for cmd in cmds {
            match *cmd {
                Command::PlayStatic => {
                    if !self.blocked {
                        self.static_playing = true;
                    }
                }
                Command::PauseStatic => self.static_playing = false,
                Command::PauseStation => self.station_playing = false,
                Command::ArmScanTimer => self.armed += 1,
                Command::StartStation(i) => {
                    self.station = Some(i);
                    self.station_playing = !self.blocked;
                }
                Command::ShowInfo(i) => self.shown.push(i),
            }
        }
    }

    fn audible(&self) -> bool {
        self.static_playing || self.station_playing
    }

    fn assert_exclusive(&self) {
        assert!(
            !(self.static_playing && self.station_playing),
            "static and station both playing: {self:?}"
        );
    }
}

fn drive(tuner: &mut Tuner, player: &mut FakePlayer, ev: TunerEvent) {
    // a natural end means the element stopped on its own
    if let TunerEvent::StationEnded { channel } = ev {
        if player.station == Some(channel) {
            player.station_playing = false;
        }
    }
    let cmds = tuner.handle(ev);
    player.run(&cmds);
    player.assert_exclusive();
}

#[test]
fn boot_requests_static() {
    let tuner = Tuner::new(6);
    assert_eq!(tuner.state(), TunerState::Static);
    assert_eq!(tuner.boot().as_slice(), &[Command::PlayStatic]);
}

#[test]
fn knob_move_enters_scanning_and_arms_timer() {
    let mut t = Tuner::new(6);
    let cmds = t.handle(TunerEvent::KnobMoved);
    assert_eq!(cmds.as_slice(), &[Command::PlayStatic, Command::ArmScanTimer]);
    assert_eq!(t.state(), TunerState::Scanning);
    // further moves just re-arm
    let cmds = t.handle(TunerEvent::KnobMoved);
    assert_eq!(cmds.as_slice(), &[Command::PlayStatic, Command::ArmScanTimer]);
}

#[test]
fn settle_at_3_4_radians_tunes_station_3() {
    let mut t = Tuner::new(6);
    t.handle(TunerEvent::KnobMoved);
    let cmds = t.handle(TunerEvent::ScanSettled { angle: 3.4 });
    assert_eq!(
        cmds.as_slice(),
        &[
            Command::PauseStatic,
            Command::StartStation(3),
            Command::ShowInfo(3)
        ]
    );
    assert_eq!(t.state(), TunerState::Tuned { channel: 3 });
}

#[test]
fn settle_at_full_turn_tunes_last_station() {
    let mut t = Tuner::new(6);
    t.handle(TunerEvent::KnobMoved);
    t.handle(TunerEvent::ScanSettled {
        angle: std::f32::consts::TAU,
    });
    assert_eq!(t.state(), TunerState::Tuned { channel: 5 });
}

#[test]
fn settle_outside_scanning_is_ignored() {
    let mut t = Tuner::new(6);
    assert!(t.handle(TunerEvent::ScanSettled { angle: 1.0 }).is_empty());
    assert_eq!(t.state(), TunerState::Static);
}

#[test]
fn moving_while_tuned_pauses_station_first() {
    let mut t = Tuner::new(6);
    t.handle(TunerEvent::KnobMoved);
    t.handle(TunerEvent::ScanSettled { angle: 0.5 });
    let cmds = t.handle(TunerEvent::KnobMoved);
    assert_eq!(
        cmds.as_slice(),
        &[
            Command::PauseStation,
            Command::PlayStatic,
            Command::ArmScanTimer
        ]
    );
    assert_eq!(t.state(), TunerState::Scanning);
}

#[test]
fn station_end_returns_to_static() {
    let mut t = Tuner::new(6);
    t.handle(TunerEvent::KnobMoved);
    t.handle(TunerEvent::ScanSettled { angle: 2.5 });
    let cmds = t.handle(TunerEvent::StationEnded { channel: 2 });
    assert_eq!(cmds.as_slice(), &[Command::PlayStatic]);
    assert_eq!(t.state(), TunerState::Static);
}

#[test]
fn stale_station_end_is_ignored() {
    let mut t = Tuner::new(6);
    t.handle(TunerEvent::KnobMoved);
    t.handle(TunerEvent::ScanSettled { angle: 2.5 });
    assert!(t.handle(TunerEvent::StationEnded { channel: 4 }).is_empty());
    t.handle(TunerEvent::KnobMoved);
    assert!(t.handle(TunerEvent::StationEnded { channel: 2 }).is_empty());
    assert_eq!(t.state(), TunerState::Scanning);
}

#[test]
fn gesture_retries_static_only_when_silent() {
    let mut t = Tuner::new(6);
    assert!(t.handle(TunerEvent::UserGesture { audible: true }).is_empty());
    assert_eq!(
        t.handle(TunerEvent::UserGesture { audible: false }).as_slice(),
        &[Command::PlayStatic]
    );
    assert_eq!(t.state(), TunerState::Static);
}

#[test]
fn blocked_autoplay_recovers_on_gesture() {
    let mut t = Tuner::new(6);
    let mut p = FakePlayer {
        blocked: true,
        ..Default::default()
    };
    p.run(&t.boot());
    assert!(!p.audible());

    p.blocked = false;
    let audible = p.audible();
    drive(&mut t, &mut p, TunerEvent::UserGesture { audible });
    assert!(p.static_playing);
}

#[test]
fn silent_tuned_station_falls_back_to_static_on_gesture() {
    let mut t = Tuner::new(6);
    let mut p = FakePlayer {
        blocked: true,
        ..Default::default()
    };
    drive(&mut t, &mut p, TunerEvent::KnobMoved);
    drive(&mut t, &mut p, TunerEvent::ScanSettled { angle: 1.2 });
    assert!(!p.audible());
    p.blocked = false;
    drive(&mut t, &mut p, TunerEvent::UserGesture { audible: false });
    assert_eq!(t.state(), TunerState::Static);
    assert!(p.static_playing && !p.station_playing);
}

#[test]
fn full_session_never_plays_both_tracks() {
    let mut t = Tuner::new(6);
    let mut p = FakePlayer::default();
    p.run(&t.boot());
    let script = [
        TunerEvent::KnobMoved,
        TunerEvent::KnobMoved,
        TunerEvent::ScanSettled { angle: 3.4 },
        TunerEvent::UserGesture { audible: true },
        TunerEvent::KnobMoved,
        TunerEvent::ScanSettled { angle: 0.1 },
        TunerEvent::StationEnded { channel: 0 },
        TunerEvent::KnobMoved,
        TunerEvent::ScanSettled { angle: 6.0 },
        TunerEvent::KnobMoved,
        TunerEvent::StationEnded { channel: 5 },
        TunerEvent::ScanSettled { angle: 6.2 },
    ];
    for ev in script {
        drive(&mut t, &mut p, ev);
    }
    assert_eq!(p.shown, vec![3, 0, 5, 5]);
    assert_eq!(p.station, Some(5));
    assert_eq!(p.armed, 5);
    assert!(p.station_playing && !p.static_playing);
}

#[test]
fn zero_channels_settles_back_to_static() {
    let mut t = Tuner::new(0);
    t.handle(TunerEvent::KnobMoved);
    assert!(t.handle(TunerEvent::ScanSettled { angle: 1.0 }).is_empty());
    assert_eq!(t.state(), TunerState::Static);
}
