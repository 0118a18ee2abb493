use std::f32::consts::TAU;

/// One fixed station: an audio source and the metadata shown when it tunes in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Channel {
    pub src: &'static str,
    pub game: &'static str,
    pub song: &'static str,
    pub artist: &'static str,
    pub rights: &'static str,
}

impl Channel {
    /// Multi-line banner text for this station.
    pub fn info(&self) -> String {
        format!(
            "Game: {}\nSong: {}\nArtist: {}\nRights: {}",
            self.game, self.song, self.artist, self.rights
        )
    }
}

pub const STATIC_SRC: &str = "Music/RadioStatic.mp3";

pub const CHANNELS: &[Channel] = &[
    Channel {
        src: "Music/SilentHill2-BlackFairy-AkiraTomaoka-Konami.mp3",
        game: "Silent Hill 2",
        song: "Black Fairy",
        artist: "Akira Tomaoka",
        rights: "Konami",
    },
    Channel {
        src: "Music/SilentHill2-WhiteNoiz-AkiraTamaoka-Konami.mp3",
        game: "Silent Hill 2",
        song: "White Noiz",
        artist: "Akira Tomaoka",
        rights: "Konami",
    },
    Channel {
        src: "Music/LuigisMansion-Mansion-KazumiTotaka-ShinobuTanaka-Nintendo.mp3",
        game: "Luigi's Mansion",
        song: "Mansion",
        artist: "Kazumi Totaka & Shinobu Tanaka",
        rights: "Nintendo",
    },
    Channel {
        src: "Music/PokemonRedAndGreen-LavenderTown-JunichiMasuda-Nintendo.mp3",
        game: "Pokemon Red and Green",
        song: "Lavender Town",
        artist: "Junichi Masuda",
        rights: "Nintendo",
    },
    Channel {
        src: "Music/HalfLife2-DistortedTrumpets-KellyBailey-Valve.mp3",
        game: "Half-Life 2",
        song: "Distorted Trumpets",
        artist: "Kelly Bailey",
        rights: "Valve",
    },
    Channel {
        src: "Music/DokiDokiLiteratureClub-Sayonara-DanSalvato-TeamSalvato.mp3",
        game: "Doki Doki Literature Club",
        song: "Sayo-nara",
        artist: "Dan Salvato",
        rights: "Team Salvato",
    },
];

/// Map a knob angle onto one of `count` equal sectors of the full circle.
///
/// The travel limit (2π) resolves to the last sector rather than wrapping
/// back to the first. Non-finite angles resolve to sector 0.
#[inline]
pub fn channel_index(angle: f32, count: usize) -> usize {
    if count == 0 || !angle.is_finite() {
        return 0;
    }
    let sector = TAU / count as f32;
    let raw = (angle.clamp(0.0, TAU) / sector).floor() as usize;
    raw.min(count - 1)
}
