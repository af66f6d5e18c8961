//! Music link to embeddable player URL rewriting.
//!
//! Rules are tried in order and the first match wins.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Player height used when only the URL is known
pub const DEFAULT_HEIGHT: u32 = 152;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    pub provider: &'static str,
    pub url: String,
    pub height: u32,
}

struct EmbedRule {
    provider: &'static str,
    pattern: Regex,
    height: u32,
    rewrite: fn(&Captures<'_>, &str) -> String,
}

impl EmbedRule {
    fn new(
        provider: &'static str,
        pattern: &str,
        height: u32,
        rewrite: fn(&Captures<'_>, &str) -> String,
    ) -> Self {
        Self {
            provider,
            pattern: Regex::new(pattern).expect("valid embed pattern"),
            height,
            rewrite,
        }
    }

    fn apply(&self, url: &str) -> Option<Embed> {
        let caps = self.pattern.captures(url)?;
        Some(Embed {
            provider: self.provider,
            url: (self.rewrite)(&caps, url),
            height: self.height,
        })
    }
}

/// Component encoding that leaves `!'()*` literal, as browsers do
fn encode_component(raw: &str) -> String {
    urlencoding::encode(raw)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

static RULES: Lazy<Vec<EmbedRule>> = Lazy::new(|| {
    vec![
        EmbedRule::new(
            "Spotify",
            r"https?://open\.spotify\.com/(playlist|album)/([a-zA-Z0-9]+)",
            152,
            |c, _| format!("https://open.spotify.com/embed/{}/{}", &c[1], &c[2]),
        ),
        EmbedRule::new(
            "YouTube",
            r"(?:https?://)?(?:www\.)?(?:youtube\.com/(?:watch\?v=|embed/)|youtu\.be/)([a-zA-Z0-9_-]{11})",
            152,
            |c, _| format!("https://www.youtube.com/embed/{}", &c[1]),
        ),
        EmbedRule::new(
            "Apple Music",
            r"https?://music\.apple\.com/(\w{2}/(?:album|playlist)/.+)",
            152,
            |c, _| format!("https://embed.music.apple.com/{}", &c[1]),
        ),
        EmbedRule::new(
            "Napster",
            r"https?://(?:www\.)?(?:us\.)?napster\.com/(album|playlist)/([a-zA-Z0-9.]+)",
            340,
            |c, _| format!("https://app.napster.com/embed/{}/{}", &c[1], &c[2]),
        ),
        EmbedRule::new(
            "SoundCloud",
            r"https?://(?:www\.)?soundcloud\.com/.+",
            166,
            |_, url| {
                format!(
                    "https://w.soundcloud.com/player/?url={}&auto_play=false&visual=true",
                    encode_component(url)
                )
            },
        ),
        EmbedRule::new(
            "Deezer",
            r"https?://(?:www\.)?deezer\.com/(?:[\w-]+/)?(playlist|album)/(\d+)",
            92,
            |c, _| format!("https://widget.deezer.com/widget/auto/{}/{}", &c[1], &c[2]),
        ),
        EmbedRule::new(
            "iHeartRadio",
            r"https?://(?:www\.)?iheart\.com/(podcast/[^/?]+)",
            152,
            |c, _| format!("https://www.iheart.com/{}/?embed=true", &c[1]),
        ),
        EmbedRule::new(
            "Mixcloud",
            r"https?://(?:www\.)?mixcloud\.com(/[a-zA-Z0-9_-]+/[a-zA-Z0-9_-]+/?)",
            120,
            |c, _| {
                format!(
                    "https://www.mixcloud.com/widget/iframe/?feed={}",
                    encode_component(&c[1])
                )
            },
        ),
        EmbedRule::new(
            "TIDAL",
            r"https?://(?:www\.)?tidal\.com/browse/(album|playlist)/([a-zA-Z0-9-]+)",
            96,
            |c, _| format!("https://embed.tidal.com/{}s/{}", &c[1], &c[2]),
        ),
    ]
});

/// Embeddable player for `url`, or `None` for unsupported links
pub fn resolve(url: &str) -> Option<Embed> {
    let url = url.trim();
    RULES.iter().find_map(|rule| rule.apply(url))
}

/// Provider names in match order
pub fn providers() -> Vec<&'static str> {
    RULES.iter().map(|rule| rule.provider).collect()
}
