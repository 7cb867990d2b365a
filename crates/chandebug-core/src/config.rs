//! Context configuration.
//!
//! Everything a [`DebugContext`](crate::DebugContext) would otherwise pick up
//! from ambient process state is an explicit field here, so tests can build
//! deterministic contexts.

use std::io::IsTerminal;
use std::str::FromStr;

use crate::colour::{ColourStrategy, DEFAULT_PALETTE};
use crate::error::DebugError;
use crate::history::DEFAULT_HISTORY_CAPACITY;

/// Environment variable holding the filter expression.
pub const ENV_FILTER: &str = "DEBUG";

/// Environment variable suppressing the date prefix when set to a truthy value.
pub const ENV_HIDE_DATE: &str = "DEBUG_HIDE_DATE";

/// Configuration for a debug context.
#[derive(Debug, Clone)]
pub struct DebugConfig {
    /// Filter expression, `None` when unset
    pub filter: Option<String>,
    /// Suppress the date prefix on non-interactive output
    pub hide_date: bool,
    /// Output goes to an interactive terminal
    pub interactive: bool,
    /// Number of history records kept
    pub history_capacity: usize,
    /// Colour codes handed out to channels
    pub palette: Vec<u8>,
    pub colour_strategy: ColourStrategy,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            filter: None,
            hide_date: false,
            interactive: false,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            palette: DEFAULT_PALETTE.to_vec(),
            colour_strategy: ColourStrategy::default(),
        }
    }
}

impl DebugConfig {
    /// Read `DEBUG`, `DEBUG_HIDE_DATE` and stdout interactivity.
    pub fn from_env() -> Self {
        Self::from_lookup(
            |key| std::env::var(key).ok(),
            std::io::stdout().is_terminal(),
        )
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F, interactive: bool) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            filter: lookup(ENV_FILTER),
            hide_date: lookup(ENV_HIDE_DATE).map(|v| is_truthy(&v)).unwrap_or(false),
            interactive,
            ..Self::default()
        }
    }

    /// Set the filter expression.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_hide_date(mut self, hide_date: bool) -> Self {
        self.hide_date = hide_date;
        self
    }

    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    pub fn with_palette(mut self, palette: Vec<u8>) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_colour_strategy(mut self, strategy: ColourStrategy) -> Self {
        self.colour_strategy = strategy;
        self
    }
}

/// Boolean-like environment value: `1`, `true`, `yes` or `on`.
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// User override for terminal detection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColourMode {
    /// Use whatever was detected
    #[default]
    Auto,
    /// Treat output as interactive
    Always,
    /// Treat output as non-interactive
    Never,
}

impl ColourMode {
    /// Resolve against the detected interactivity.
    pub fn resolve(self, detected: bool) -> bool {
        match self {
            ColourMode::Auto => detected,
            ColourMode::Always => true,
            ColourMode::Never => false,
        }
    }
}

impl FromStr for ColourMode {
    type Err = DebugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColourMode::Auto),
            "always" => Ok(ColourMode::Always),
            "never" => Ok(ColourMode::Never),
            other => Err(DebugError::Config(format!(
                "unknown colour mode '{}'. Must be one of: auto, always, never",
                other
            ))),
        }
    }
}
