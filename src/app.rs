use crate::audio::Player;
use crate::core::{
    Command, Commands, Debounce, KnobState, Tuner, TunerEvent, BANNER_HIDE_MS, CHANNELS,
    SCAN_SETTLE_MS,
};
use crate::overlay::Banner;
use crate::timer::Timeout;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub type SharedApp = Rc<RefCell<App>>;

/// All page-lifetime state, shared by every event handler and the frame loop.
pub struct App {
    this: Weak<RefCell<App>>,
    pub knob: KnobState,
    pub pointer: Vec2,
    tuner: Tuner,
    player: Player,
    scan: Debounce<Timeout>,
    banner: Banner,
}

impl App {
    pub fn new_shared(knob: KnobState, player: Player, banner: Banner) -> SharedApp {
        Rc::new_cyclic(|this| {
            RefCell::new(App {
                this: this.clone(),
                knob,
                pointer: Vec2::ZERO,
                tuner: Tuner::new(CHANNELS.len()),
                player,
                scan: Debounce::new(),
                banner,
            })
        })
    }

    pub fn boot(&mut self) {
        let cmds = self.tuner.boot();
        self.run(cmds);
    }

    pub fn on_wheel(&mut self, delta_y: f32) {
        self.knob.wheel(delta_y);
        self.dispatch(TunerEvent::KnobMoved);
    }

    pub fn on_drag_start(&mut self, cursor_y: f32) {
        self.knob.begin_drag(cursor_y);
    }

    pub fn on_drag_move(&mut self, cursor_y: f32) {
        if self.knob.drag_to(cursor_y).is_some() {
            self.dispatch(TunerEvent::KnobMoved);
        }
    }

    /// Returns whether a drag was in progress.
    pub fn on_drag_end(&mut self) -> bool {
        if !self.knob.end_drag() {
            return false;
        }
        self.dispatch(TunerEvent::KnobMoved);
        true
    }

    /// Any pointer-down on the page; retries the static loop if nothing is audible.
    pub fn on_gesture(&mut self) {
        let audible = self.player.is_audible();
        self.dispatch(TunerEvent::UserGesture { audible });
    }

    fn dispatch(&mut self, event: TunerEvent) {
        let before = self.tuner.state();
        let cmds = self.tuner.handle(event);
        let after = self.tuner.state();
        if before != after {
            log::debug!("[tuner] {:?} -> {:?} on {:?}", before, after, event);
        }
        self.run(cmds);
    }

    fn run(&mut self, cmds: Commands) {
        for cmd in cmds {
            match cmd {
                Command::PlayStatic => self.player.play_static(),
                Command::PauseStatic => self.player.pause_static(),
                Command::PauseStation => self.player.pause_station(),
                Command::ArmScanTimer => self.arm_scan_timer(),
                Command::StartStation(i) => self.start_station(i),
                Command::ShowInfo(i) => self.show_info(i),
            }
        }
    }

    fn arm_scan_timer(&mut self) {
        let this = self.this.clone();
        self.scan.arm(|generation| {
            Timeout::schedule(SCAN_SETTLE_MS, move || {
                if let Some(app) = this.upgrade() {
                    app.borrow_mut().on_scan_timer(generation);
                }
            })
        });
    }

    fn on_scan_timer(&mut self, generation: u64) {
        if !self.scan.fire(generation) {
            log::debug!(
                "[tuner] ignoring stale scan timer {} (latest {})",
                generation,
                self.scan.generation()
            );
            return;
        }
        let angle = self.knob.angle();
        self.dispatch(TunerEvent::ScanSettled { angle });
    }

    fn start_station(&mut self, channel: usize) {
        let Some(ch) = CHANNELS.get(channel) else {
            log::warn!("[tuner] no channel at index {}", channel);
            return;
        };
        let this = self.this.clone();
        self.player.start_station(channel, ch.src, move || {
            if let Some(app) = this.upgrade() {
                app.borrow_mut()
                    .dispatch(TunerEvent::StationEnded { channel });
            }
        });
    }

    fn show_info(&mut self, channel: usize) {
        let Some(ch) = CHANNELS.get(channel) else {
            return;
        };
        let this = self.this.clone();
        self.banner.show(&ch.info(), |generation| {
            Timeout::schedule(BANNER_HIDE_MS, move || {
                if let Some(app) = this.upgrade() {
                    app.borrow_mut().banner.on_hide_timer(generation);
                }
            })
        });
    }
}
