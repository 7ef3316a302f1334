use log::{debug, warn, Level};
use serde::Deserialize;

const CONFIG_ELEMENT_ID: &str = "landing-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose while running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Delays for every timer continuation, in milliseconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Timings {
    pub splash_hide: u32,
    pub splash_removal: u32,
    pub submit_revert: u32,
    pub icon_open: u32,
    pub icon_close: u32,
    pub scroll_nudge: u32,
    pub ripple_expand: u32,
    pub ripple_removal: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            splash_hide: 1500,
            splash_removal: 500,
            submit_revert: 1500,
            icon_open: 600,
            icon_close: 400,
            scroll_nudge: 100,
            ripple_expand: 10,
            ripple_removal: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LandingConfig {
    pub storage_key: String,
    pub timings: Timings,
    pub navbar_shade_threshold: f64,
    pub parallax_speed: f64,
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
    pub video_threshold: f64,
    pub preload_images: Vec<String>,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            storage_key: "userEmail".to_string(),
            timings: Timings::default(),
            navbar_shade_threshold: 100.0,
            parallax_speed: 0.5,
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -50px 0px".to_string(),
            video_threshold: 0.5,
            preload_images: vec![
                "https://assets.nflxext.com/ffe/siteui/acquisition/ourStory/fuji/desktop/tv.png".to_string(),
                "https://assets.nflxext.com/ffe/siteui/acquisition/ourStory/fuji/desktop/mobile-0819.jpg".to_string(),
                "https://assets.nflxext.com/ffe/siteui/acquisition/ourStory/fuji/desktop/device-pile.png".to_string(),
            ],
        }
    }
}

impl LandingConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Reads overrides from the page's `#landing-config` JSON block. Falls back
    /// to the defaults when the block is missing or unreadable.
    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match raw {
            Some(raw) if !raw.trim().is_empty() => match Self::from_json(&raw) {
                Ok(config) => {
                    debug!("Loaded landing config overrides");
                    config
                }
                Err(e) => {
                    warn!("Ignoring malformed #{}: {}", CONFIG_ELEMENT_ID, e);
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }
}
