//! Configuration knobs the coordination core reads.
//!
//! Only the settings this crate consumes live here; the rest of the user
//! configuration (key bindings, margins, layout selection) belongs to the
//! embedding process.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};
use thiserror::Error;

fn yes() -> bool { true }

fn default_double_click_interval() -> Duration { Duration::from_millis(350) }

pub fn config_file() -> PathBuf {
    dirs::home_dir().unwrap().join(".config").join("sash").join("config.toml")
}

#[serde_as]
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct MouseSettings {
    /// Complete a window drag by swapping with the drop target.
    #[serde(default = "yes")]
    pub swap_on_drag: bool,
    /// Turn a resize drag into a main-pane ratio recommendation.
    #[serde(default = "yes")]
    pub resize_on_drag: bool,
    /// Two clicks within this interval count as a double click.
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(default = "default_double_click_interval")]
    pub double_click_interval: Duration,
}

impl Default for MouseSettings {
    fn default() -> Self {
        MouseSettings {
            swap_on_drag: true,
            resize_on_drag: true,
            double_click_interval: default_double_click_interval(),
        }
    }
}

/// One floating rule. A window matching any rule is excluded from automatic
/// tiling placement. An empty rule matches nothing.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct FloatingRule {
    /// Application name to match exactly.
    pub app_name: Option<String>,
    /// Regular expression matched against the window title.
    pub title_regex: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub mouse: MouseSettings,
    #[serde(default)]
    pub floating: Vec<FloatingRule>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid floating rule regex {pattern:?}: {source}")]
    Rule {
        pattern: String,
        source: regex::Error,
    },
}

impl Config {
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&text)?;
        // Reject bad rules at load time rather than on first window match.
        FloatingRules::compile(&config.settings)?;
        Ok(config)
    }

    pub fn load_or_default() -> anyhow::Result<Config> {
        let path = config_file();
        if !path.exists() {
            return Ok(Config::default());
        }
        Config::load(&path).with_context(|| format!("loading {}", path.display()))
    }
}

struct CompiledRule {
    app_name: Option<String>,
    title: Option<Regex>,
}

/// Compiled floating classification, applied by target implementations to
/// derive a window's floating flag. Never stored on the window itself.
pub struct FloatingRules {
    rules: Vec<CompiledRule>,
}

impl FloatingRules {
    pub fn compile(settings: &Settings) -> Result<FloatingRules, ConfigError> {
        let mut rules = Vec::with_capacity(settings.floating.len());
        for rule in &settings.floating {
            let title = match &rule.title_regex {
                Some(pattern) => Some(Regex::new(pattern).map_err(|source| ConfigError::Rule {
                    pattern: pattern.clone(),
                    source,
                })?),
                None => None,
            };
            rules.push(CompiledRule {
                app_name: rule.app_name.clone(),
                title,
            });
        }
        Ok(FloatingRules { rules })
    }

    pub fn matches(&self, app_name: Option<&str>, title: Option<&str>) -> bool {
        self.rules.iter().any(|rule| {
            if rule.app_name.is_none() && rule.title.is_none() {
                return false;
            }
            let app_ok = match &rule.app_name {
                Some(name) => app_name == Some(name.as_str()),
                None => true,
            };
            let title_ok = match &rule.title {
                Some(regex) => title.is_some_and(|t| regex.is_match(t)),
                None => true,
            };
            app_ok && title_ok
        })
    }
}
