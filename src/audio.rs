use crate::constants::{STATIC_VOLUME, STATION_VOLUME};
use crate::core::STATIC_SRC;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

struct Station {
    channel: usize,
    el: web::HtmlAudioElement,
    _on_ended: Closure<dyn FnMut()>,
}

impl Station {
    fn stop(self) {
        _ = self.el.pause();
        self.el.set_onended(None);
        log::debug!("[audio] station {} released", self.channel);
    }
}

/// The looping static element plus at most one station element.
///
/// The player only executes what the tuner asks for; it never decides on its
/// own to start one track or the other.
pub struct Player {
    static_el: web::HtmlAudioElement,
    station: Option<Station>,
}

impl Player {
    pub fn new() -> anyhow::Result<Self> {
        let static_el = web::HtmlAudioElement::new_with_src(STATIC_SRC)
            .map_err(|e| anyhow::anyhow!("static audio element: {:?}", e))?;
        static_el.set_loop(true);
        static_el.set_volume(STATIC_VOLUME);
        Ok(Self {
            static_el,
            station: None,
        })
    }

    /// Whether either track is currently producing sound.
    pub fn is_audible(&self) -> bool {
        !self.static_el.paused() || self.station.as_ref().is_some_and(|s| !s.el.paused())
    }

    pub fn play_static(&self) {
        if self.static_el.paused() {
            try_play(&self.static_el, "static");
        }
    }

    pub fn pause_static(&self) {
        _ = self.static_el.pause();
    }

    pub fn pause_station(&self) {
        if let Some(s) = &self.station {
            if !s.el.paused() {
                _ = s.el.pause();
            }
        }
    }

    /// Replace the station element with a fresh one playing `src` from the start.
    pub fn start_station(&mut self, channel: usize, src: &str, on_ended: impl FnMut() + 'static) {
        if let Some(old) = self.station.take() {
            old.stop();
        }
        let el = match web::HtmlAudioElement::new_with_src(src) {
            Ok(el) => el,
            Err(e) => {
                log::error!("[audio] station {} element error: {:?}", channel, e);
                return;
            }
        };
        el.set_loop(false);
        el.set_volume(STATION_VOLUME);
        let on_ended = Closure::wrap(Box::new(on_ended) as Box<dyn FnMut()>);
        el.set_onended(Some(on_ended.as_ref().unchecked_ref()));
        try_play(&el, "station");
        log::info!("[audio] station {} -> {}", channel, src);
        self.station = Some(Station {
            channel,
            el,
            _on_ended: on_ended,
        });
    }
}

// play() is rejected until the page has seen a user gesture; that is expected
// and the next pointer-down retries the static loop.
fn try_play(el: &web::HtmlMediaElement, label: &'static str) {
    match el.play() {
        Ok(promise) => spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::info!("[audio] {} playback blocked until interaction: {:?}", label, e);
            }
        }),
        Err(e) => log::warn!("[audio] {} play() threw: {:?}", label, e),
    }
}
