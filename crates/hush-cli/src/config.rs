use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use hush_core::disclosure::{RevealSpeed, RevealTiming, StepRange, WindowPolicy};

/// Contents of `config.toml`. Every section is optional.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HushConfig {
    pub reveal: RevealSection,
    pub window: WindowSection,
    pub compose: ComposeSection,
    pub keychain: KeychainSection,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealSection {
    pub speed: SpeedSetting,
    /// Step delay range `[min, max)` for the fast profile, in milliseconds.
    pub fast_ms: [u64; 2],
    /// Step delay range `[min, max)` for the slow profile, in milliseconds.
    pub slow_ms: [u64; 2],
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSection {
    pub visible_sentences: usize,
    pub min_tail_chars: usize,
    pub tail_fraction: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeSection {
    pub idle_mask_seconds: u64,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeychainSection {
    pub enabled: bool,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SpeedSetting {
    #[default]
    Fast,
    Slow,
}

impl From<SpeedSetting> for RevealSpeed {
    fn from(value: SpeedSetting) -> Self {
        match value {
            SpeedSetting::Fast => RevealSpeed::Fast,
            SpeedSetting::Slow => RevealSpeed::Slow,
        }
    }
}

impl Default for RevealSection {
    fn default() -> Self {
        let timing = RevealTiming::default();
        Self {
            speed: SpeedSetting::default(),
            fast_ms: [timing.fast.min_ms, timing.fast.max_ms],
            slow_ms: [timing.slow.min_ms, timing.slow.max_ms],
        }
    }
}

impl Default for WindowSection {
    fn default() -> Self {
        let policy = WindowPolicy::default();
        Self {
            visible_sentences: policy.visible_sentences,
            min_tail_chars: policy.min_tail_chars,
            tail_fraction: policy.tail_fraction,
        }
    }
}

impl Default for ComposeSection {
    fn default() -> Self {
        Self {
            idle_mask_seconds: hush_core::disclosure::DEFAULT_IDLE_MASK.as_secs(),
        }
    }
}

impl HushConfig {
    pub fn window_policy(&self) -> WindowPolicy {
        WindowPolicy {
            visible_sentences: self.window.visible_sentences,
            min_tail_chars: self.window.min_tail_chars,
            tail_fraction: self.window.tail_fraction,
        }
    }

    pub fn reveal_timing(&self) -> RevealTiming {
        let [fast_min, fast_max] = self.reveal.fast_ms;
        let [slow_min, slow_max] = self.reveal.slow_ms;
        RevealTiming {
            fast: StepRange::new(fast_min, fast_max),
            slow: StepRange::new(slow_min, slow_max),
        }
    }

    pub fn idle_mask(&self) -> Duration {
        Duration::from_secs(self.compose.idle_mask_seconds)
    }

    /// Reject values the disclosure engine cannot honor.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.window.visible_sentences == 0 {
            return Err(anyhow::anyhow!(
                "window.visible_sentences must be at least 1"
            ));
        }
        if !(0.0..=1.0).contains(&self.window.tail_fraction) {
            return Err(anyhow::anyhow!(
                "window.tail_fraction must be between 0 and 1"
            ));
        }
        for (name, [min, max]) in [("fast_ms", self.reveal.fast_ms), ("slow_ms", self.reveal.slow_ms)]
        {
            if min > max {
                return Err(anyhow::anyhow!(
                    "reveal.{} must be [min, max] with min <= max",
                    name
                ));
            }
        }
        Ok(())
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

/// Read the config at `path`. A missing file yields the defaults.
pub fn load_config(path: &Path) -> anyhow::Result<HushConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(HushConfig::default());
    }
    read_config(path)
}

pub fn read_config(path: &Path) -> anyhow::Result<HushConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    let config: HushConfig = toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))?;
    config.validate()?;
    Ok(config)
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("hush"));
        }
    }
    Ok(home_dir()?.join(".config").join("hush"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
