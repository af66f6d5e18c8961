use std::path::{Path, PathBuf};

use studyforge_persist::SettingsRepository;

use crate::ambient::AmbientSound;
use crate::capture::audio_mime_type;
use crate::embed::{self, Embed, DEFAULT_HEIGHT};
use crate::error::{AppError, Result};

/// Audio file played from disk. Lives for the session only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalAudio {
    pub path: PathBuf,
    pub name: String,
    pub mime_type: &'static str,
}

/// Music player with three mutually exclusive sources: a provider embed, a
/// local audio file, or an ambient sound
pub struct MusicPlayer {
    settings: SettingsRepository,
    embed_url: Option<String>,
    embed_height: u32,
    local_file: Option<LocalAudio>,
    ambient: AmbientSound,
    background_url: Option<String>,
}

impl MusicPlayer {
    pub fn new(settings: SettingsRepository) -> Self {
        let embed_url = settings.music_embed_url().filter(|u| !u.is_empty());
        Self {
            settings,
            embed_url,
            embed_height: DEFAULT_HEIGHT,
            local_file: None,
            ambient: AmbientSound::None,
            background_url: None,
        }
    }

    pub fn reload(&mut self) {
        *self = Self::new(self.settings.clone());
    }

    pub fn embed_url(&self) -> Option<&str> {
        self.embed_url.as_deref()
    }

    pub fn embed_height(&self) -> u32 {
        self.embed_height
    }

    pub fn local_file(&self) -> Option<&LocalAudio> {
        self.local_file.as_ref()
    }

    pub fn ambient(&self) -> AmbientSound {
        self.ambient
    }

    pub fn background_url(&self) -> Option<&str> {
        self.background_url.as_deref()
    }

    /// Rewrites `url` into a player, remembers it, and silences ambient sound
    pub fn load_url(&mut self, url: &str) -> Result<Embed> {
        let embed = embed::resolve(url).ok_or(AppError::UnsupportedEmbed)?;
        self.settings.set_music_embed_url(Some(&embed.url))?;
        self.embed_url = Some(embed.url.clone());
        self.embed_height = embed.height;
        self.local_file = None;
        self.ambient = AmbientSound::None;
        self.background_url = None;
        tracing::info!(provider = embed.provider, "Loaded music embed");
        Ok(embed)
    }

    /// Plays an audio file from disk in place of the embed and ambient sound
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<&LocalAudio> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(AppError::AudioFile(path.display().to_string()));
        }
        self.settings.set_music_embed_url(None)?;
        self.embed_url = None;
        self.ambient = AmbientSound::None;
        self.background_url = None;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        tracing::info!(file = %name, "Loaded local audio");
        Ok(self.local_file.insert(LocalAudio {
            path: path.to_path_buf(),
            name,
            mime_type: audio_mime_type(path),
        }))
    }

    /// Switching to a sound clears the music player
    pub fn select_ambient(&mut self, sound: AmbientSound) -> Result<()> {
        self.ambient = sound;
        if sound == AmbientSound::None {
            self.background_url = None;
            return Ok(());
        }
        self.settings.set_music_embed_url(None)?;
        self.embed_url = None;
        self.local_file = None;
        self.background_url = sound.background_url();
        Ok(())
    }
}
