//! Tunable timings, thresholds, selectors and class names.
//!
//! Every field has a default matching the stock portfolio markup, so a page
//! only needs to override what differs:
//!
//! ```
//! use portfolio_fx::config::FxConfig;
//!
//! let config = FxConfig::from_json(r#"{ "timings": { "reveal_scroll_debounce_ms": 80 } }"#).unwrap();
//! assert_eq!(config.timings.reveal_scroll_debounce_ms, 80);
//! assert_eq!(config.timings.nav_scroll_debounce_ms, 10);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{PortfolioFxError, Result};

/// Top-level configuration for all page effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FxConfig {
    pub timings: Timings,
    pub thresholds: Thresholds,
    pub selectors: Selectors,
    pub classes: Classes,
    /// Anchor the skip link points at.
    pub skip_link_target: String,
    /// Minimum level passed to the console logger.
    pub log_level: LogLevel,
}

impl Default for FxConfig {
    fn default() -> Self {
        Self {
            timings: Timings::default(),
            thresholds: Thresholds::default(),
            selectors: Selectors::default(),
            classes: Classes::default(),
            skip_link_target: "#hero".to_string(),
            log_level: LogLevel::default(),
        }
    }
}

/// Debounce windows and delays, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub nav_scroll_debounce_ms: u32,
    pub reveal_scroll_debounce_ms: u32,
    pub active_section_debounce_ms: u32,
    pub scroll_top_debounce_ms: u32,
    pub cursor_inject_delay_ms: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            nav_scroll_debounce_ms: 10,
            reveal_scroll_debounce_ms: 50,
            active_section_debounce_ms: 50,
            scroll_top_debounce_ms: 100,
            cursor_inject_delay_ms: 1500,
        }
    }
}

/// Pixel thresholds and the card tilt damping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Scroll offset past which the header is "scrolled".
    pub nav_scrolled: f64,
    /// Band trimmed from the top and bottom of the viewport for reveals.
    pub reveal_offset: f64,
    /// Scroll offset past which the scroll-to-top button shows.
    pub scroll_top_visible: f64,
    /// Added to the scroll offset when probing for the current section.
    pub section_probe_offset: f64,
    /// Divisor applied to pointer offsets when tilting cards.
    pub tilt_damping: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            nav_scrolled: 50.0,
            reveal_offset: 100.0,
            scroll_top_visible: 500.0,
            section_probe_offset: 100.0,
            tilt_damping: 50.0,
        }
    }
}

/// CSS selectors the effects query at install time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub header: String,
    /// Links whose clicks become offset-aware smooth scrolls.
    pub anchor_links: String,
    /// Navigation links highlighted by the active-section tracker.
    pub nav_links: String,
    /// Element groups tagged as revealable, scanned independently.
    pub reveal_groups: Vec<String>,
    pub project_cards: String,
    pub sections: String,
    pub code_display: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            header: "header".to_string(),
            anchor_links: "a[href^=\"#\"]".to_string(),
            nav_links: ".nav-links a".to_string(),
            reveal_groups: vec![
                ".project-card".to_string(),
                ".skill-category".to_string(),
                ".highlight-item".to_string(),
                ".contact-link".to_string(),
            ],
            project_cards: ".project-card".to_string(),
            sections: "section[id]".to_string(),
            code_display: ".code-content".to_string(),
        }
    }
}

/// Class names written by the effects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Classes {
    pub header_scrolled: String,
    pub revealable: String,
    pub active: String,
    pub typing_cursor: String,
    pub scroll_top_button: String,
    pub skip_link: String,
}

impl Default for Classes {
    fn default() -> Self {
        Self {
            header_scrolled: "scrolled".to_string(),
            revealable: "reveal".to_string(),
            active: "active".to_string(),
            typing_cursor: "typing-cursor".to_string(),
            scroll_top_button: "scroll-to-top".to_string(),
            skip_link: "skip-link".to_string(),
        }
    }
}

/// Console log level, mirrored from `log::LevelFilter` so it can be
/// expressed in JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => Self::Off,
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

impl FxConfig {
    /// Parse a (possibly partial) JSON configuration and validate it.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or fails [`FxConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Decode a configuration from a plain JS object.
    ///
    /// `undefined` and `null` yield the defaults.
    #[cfg(target_arch = "wasm32")]
    pub fn from_js(value: wasm_bindgen::JsValue) -> Result<Self> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        let config: Self = serde_wasm_bindgen::from_value(value)
            .map_err(|e| PortfolioFxError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make an effect misbehave rather than no-op.
    ///
    /// # Errors
    /// Returns [`PortfolioFxError::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        let damping = self.thresholds.tilt_damping;
        if !damping.is_finite() || damping.abs() < f64::EPSILON {
            return Err(PortfolioFxError::InvalidConfig(
                "thresholds.tilt_damping must be a finite, non-zero number".to_string(),
            ));
        }

        let s = &self.selectors;
        let named = [
            ("selectors.header", &s.header),
            ("selectors.anchor_links", &s.anchor_links),
            ("selectors.nav_links", &s.nav_links),
            ("selectors.project_cards", &s.project_cards),
            ("selectors.sections", &s.sections),
            ("selectors.code_display", &s.code_display),
        ];
        for (name, value) in named {
            if value.trim().is_empty() {
                return Err(PortfolioFxError::InvalidConfig(format!(
                    "{name} must not be empty"
                )));
            }
        }
        if s.reveal_groups.iter().any(|g| g.trim().is_empty()) {
            return Err(PortfolioFxError::InvalidConfig(
                "selectors.reveal_groups must not contain empty selectors".to_string(),
            ));
        }

        let c = &self.classes;
        let classes = [
            ("classes.header_scrolled", &c.header_scrolled),
            ("classes.revealable", &c.revealable),
            ("classes.active", &c.active),
            ("classes.typing_cursor", &c.typing_cursor),
            ("classes.scroll_top_button", &c.scroll_top_button),
            ("classes.skip_link", &c.skip_link),
        ];
        for (name, value) in classes {
            if value.is_empty() || value.contains(char::is_whitespace) {
                return Err(PortfolioFxError::InvalidConfig(format!(
                    "{name} must be a single non-empty class name"
                )));
            }
        }
        Ok(())
    }
}
