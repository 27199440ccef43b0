use colored::*;
use std::env;
use std::io::IsTerminal;

use crate::scoring::{RiskTier, TierColor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,   // Detect based on terminal
    Always, // Force colors on
    Never,  // Force colors off
}

impl ColorMode {
    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmojiMode {
    Auto,
    Always,
    Never,
}

impl EmojiMode {
    pub fn should_use_emoji(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattingConfig {
    pub color: ColorMode,
    pub emoji: EmojiMode,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            emoji: EmojiMode::Auto,
        }
    }
}

impl FormattingConfig {
    pub fn new(color: ColorMode, emoji: EmojiMode) -> Self {
        Self { color, emoji }
    }

    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Resolve color settings from `NO_COLOR`, `CLICOLOR` and `CLICOLOR_FORCE`.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        // NO_COLOR disables regardless of value (no-color.org)
        if lookup("NO_COLOR").is_some() {
            config.color = ColorMode::Never;
        }

        if lookup("CLICOLOR").as_deref() == Some("0") {
            config.color = ColorMode::Never;
        }

        if lookup("CLICOLOR_FORCE").as_deref() == Some("1") {
            config.color = ColorMode::Always;
        }

        config
    }

    /// ASCII-only, no colors, no emoji
    pub fn plain() -> Self {
        Self {
            color: ColorMode::Never,
            emoji: EmojiMode::Never,
        }
    }
}

pub trait OutputFormatter {
    fn success(&self, text: &str) -> String;
    fn error(&self, text: &str) -> String;
    fn warning(&self, text: &str) -> String;
    fn header(&self, text: &str) -> String;
    fn emoji(&self, emoji: &str, fallback: &str) -> String;
    fn bold(&self, text: &str) -> String;
    fn dim(&self, text: &str) -> String;
    /// Paint `text` in the display color of `tier`.
    fn tier(&self, tier: RiskTier, text: &str) -> String;
}

pub struct ColoredFormatter {
    config: FormattingConfig,
}

impl ColoredFormatter {
    pub fn new(config: FormattingConfig) -> Self {
        colored::control::set_override(config.color.should_use_color());
        Self { config }
    }

    fn paint(&self, text: &str, style: impl FnOnce(&str) -> ColoredString) -> String {
        if self.config.color.should_use_color() {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }
}

impl OutputFormatter for ColoredFormatter {
    fn success(&self, text: &str) -> String {
        self.paint(text, |t| t.green())
    }

    fn error(&self, text: &str) -> String {
        self.paint(text, |t| t.red())
    }

    fn warning(&self, text: &str) -> String {
        self.paint(text, |t| t.yellow())
    }

    fn header(&self, text: &str) -> String {
        self.paint(text, |t| t.blue().bold())
    }

    fn emoji(&self, emoji: &str, fallback: &str) -> String {
        if self.config.emoji.should_use_emoji() {
            emoji.to_string()
        } else {
            fallback.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(text, |t| t.bold())
    }

    fn dim(&self, text: &str) -> String {
        self.paint(text, |t| t.dimmed())
    }

    fn tier(&self, tier: RiskTier, text: &str) -> String {
        self.paint(text, |t| match tier.color() {
            TierColor::Green => t.green().bold(),
            TierColor::Yellow => t.yellow().bold(),
            // no named orange in ANSI 16
            TierColor::Orange => t.truecolor(255, 140, 0).bold(),
            TierColor::Red => t.red().bold(),
        })
    }
}

pub struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn success(&self, text: &str) -> String {
        text.to_string()
    }

    fn error(&self, text: &str) -> String {
        text.to_string()
    }

    fn warning(&self, text: &str) -> String {
        text.to_string()
    }

    fn header(&self, text: &str) -> String {
        text.to_string()
    }

    fn emoji(&self, _emoji: &str, fallback: &str) -> String {
        fallback.to_string()
    }

    fn bold(&self, text: &str) -> String {
        text.to_string()
    }

    fn dim(&self, text: &str) -> String {
        text.to_string()
    }

    fn tier(&self, _tier: RiskTier, text: &str) -> String {
        text.to_string()
    }
}

/// Pick the formatter for a run; `--plain` wins over the environment.
pub fn formatter_for(plain: bool) -> Box<dyn OutputFormatter> {
    if plain {
        Box::new(PlainFormatter)
    } else {
        Box::new(ColoredFormatter::new(FormattingConfig::from_env()))
    }
}

/// Tier label with its marker, e.g. `🟠 RISCO ALTO (NÍVEL 3)` or
/// `[ALTO] RISCO ALTO (NÍVEL 3)` when emoji are off.
pub fn tier_badge(formatter: &dyn OutputFormatter, tier: RiskTier) -> String {
    let fallback = format!("[{}]", tier.name());
    let marker = formatter.emoji(tier.emoji(), &fallback);
    formatter.tier(tier, &format!("{} {}", marker, tier.label()))
}

fn detect_color_support() -> bool {
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    std::io::stdout().is_terminal()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn vars<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_no_color_disables_color() {
        let config = FormattingConfig::from_vars(vars(&[("NO_COLOR", "")]));
        assert_eq!(config.color, ColorMode::Never);
    }

    #[test]
    fn test_clicolor_force_overrides() {
        let config = FormattingConfig::from_vars(vars(&[("CLICOLOR", "0"), ("CLICOLOR_FORCE", "1")]));
        assert_eq!(config.color, ColorMode::Always);
    }

    #[test]
    fn test_unset_environment_is_auto() {
        let config = FormattingConfig::from_vars(vars(&[]));
        assert_eq!(config, FormattingConfig::default());
    }

    #[test]
    fn test_plain_badge_uses_ascii_marker() {
        assert_eq!(
            tier_badge(&PlainFormatter, RiskTier::Alto),
            "[ALTO] RISCO ALTO (NÍVEL 3)"
        );
    }

    #[test]
    fn test_colored_formatter_without_color_is_identity() {
        let formatter = ColoredFormatter::new(FormattingConfig::plain());
        assert_eq!(formatter.tier(RiskTier::Grave, "x"), "x");
        assert_eq!(formatter.emoji("🔴", "[RED]"), "[RED]");
    }
}
