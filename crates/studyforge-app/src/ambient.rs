use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;

use crate::embed;

const RAIN: [&str; 5] = [
    "https://www.youtube.com/watch?v=Qo4JIT8jMtI",
    "https://www.youtube.com/watch?v=eTeD8DAta4c",
    "https://www.youtube.com/watch?v=mPZkdNFkNps",
    "https://www.youtube.com/watch?v=6bPN0JyGfA4",
    "https://www.youtube.com/watch?v=biqyq0PTEUM",
];

const CAFE: [&str; 5] = [
    "https://www.youtube.com/watch?v=h2zkV-l_TbY",
    "https://www.youtube.com/watch?v=uiMXGIG_DQo",
    "https://www.youtube.com/watch?v=gaGrHUekGrc",
    "https://www.youtube.com/watch?v=QbXCfH7wyBQ",
    "https://www.youtube.com/watch?v=jAg6tyC9Xxc",
];

/// Looping background track, independent of the music player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmbientSound {
    #[default]
    None,
    Rain,
    Cafe,
}

impl AmbientSound {
    pub const ALL: [AmbientSound; 3] = [Self::None, Self::Rain, Self::Cafe];

    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Rain => "Rain",
            Self::Cafe => "Cafe",
        }
    }

    pub fn tracks(&self) -> &'static [&'static str] {
        match self {
            Self::None => &[],
            Self::Rain => &RAIN,
            Self::Cafe => &CAFE,
        }
    }

    /// Hidden autoplaying, looping player for a random track
    pub fn background_url(&self) -> Option<String> {
        let track = self.tracks().choose(&mut rand::thread_rng())?;
        let embed = embed::resolve(track)?;
        let video_id = embed.url.rsplit('/').next()?;
        Some(format!(
            "https://www.youtube.com/embed/{id}?autoplay=1&loop=1&playlist={id}&controls=0&showinfo=0&rel=0&iv_load_policy=3&modestbranding=1",
            id = video_id
        ))
    }
}

impl fmt::Display for AmbientSound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AmbientSound {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "off" => Ok(Self::None),
            "rain" => Ok(Self::Rain),
            "cafe" | "café" => Ok(Self::Cafe),
            other => Err(format!("unknown ambient sound: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_url_loops_a_pool_track() {
        let url = AmbientSound::Rain.background_url().unwrap();
        let id = url
            .strip_prefix("https://www.youtube.com/embed/")
            .and_then(|rest| rest.split('?').next())
            .unwrap();
        assert!(RAIN.iter().any(|t| t.ends_with(id)));
        assert!(url.contains(&format!("playlist={}", id)));
        assert!(url.contains("autoplay=1&loop=1"));
    }

    #[test]
    fn test_none_has_no_track() {
        assert!(AmbientSound::None.background_url().is_none());
        assert_eq!("Café".parse::<AmbientSound>().unwrap(), AmbientSound::Cafe);
    }
}
