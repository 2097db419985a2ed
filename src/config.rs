use clap::{ArgAction, Parser, ValueHint};
use dirs_next::home_dir;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::constants::DEFAULT_I2C_ADDRESS;

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level app configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Default)]
pub struct Config {
    pub log_level: Option<String>, // e.g., "info" | "debug"
    /// feed simulated roast readings instead of waiting on the probe task
    pub demo: Option<bool>,
    /// display-specific wiring & behavior
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Default)]
pub struct DisplayConfig {
    /// default I2C address tried first during discovery
    pub address: Option<u8>,
    pub rotate_deg: Option<u16>,
    pub skip_splash: Option<bool>,
}

impl Config {
    pub fn address(&self) -> u8 {
        self.display
            .as_ref()
            .and_then(|d| d.address)
            .unwrap_or(DEFAULT_I2C_ADDRESS)
    }

    pub fn rotate_deg(&self) -> u16 {
        self.display.as_ref().and_then(|d| d.rotate_deg).unwrap_or(0)
    }

    pub fn show_splash(&self) -> bool {
        !self
            .display
            .as_ref()
            .and_then(|d| d.skip_splash)
            .unwrap_or(false)
    }

    pub fn demo(&self) -> bool {
        self.demo.unwrap_or(false)
    }
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone)]
#[command(
    name = "croaster-display",
    about = "croaster OLED display controller",
    disable_help_flag = false
)]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    /// Default I2C address, decimal or 0x-prefixed hex
    #[arg(long, value_parser = parse_address)]
    pub address: Option<u8>,
    #[arg(long)]
    pub rotate_deg: Option<u16>,
    /// Skip the startup splash animation
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_splash: bool,
    /// Feed simulated roast readings (bench use, no probe subsystem)
    #[arg(long, action = ArgAction::SetTrue)]
    pub demo: bool,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Public entry point: parse CLI, read YAML, merge, validate.
pub fn load() -> Result<Config, ConfigError> {
    let cli = Cli::parse();
    load_with(cli)
}

fn load_with(cli: Cli) -> Result<Config, ConfigError> {
    // 1) defaults (from `Default` impl)
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, &cli);

    // 4) Validate
    validate(&cfg)?;

    if cli.dump_config {
        // Pretty YAML of effective config (nice for debugging)
        let s = serde_yaml::to_string(&cfg)?;
        println!("{s}");
        std::process::exit(0);
    }

    Ok(cfg)
}

/// Accept `60`, `0x3C`, `0x3c`.
fn parse_address(s: &str) -> Result<u8, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse::<u8>(),
    };
    parsed.map_err(|_| format!("invalid I2C address: {s}"))
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/croaster/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/croaster/config.yaml");
        if p.exists() {
            return Some(p);
        }
        let p = home.join(".config/croaster.yaml");
        if p.exists() {
            return Some(p);
        }
    }
    // project local
    for candidate in &["croaster.yaml", "config.yaml", "config/croaster.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() {
            return Some(p);
        }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    if src.log_level.is_some() {
        dst.log_level = src.log_level;
    }
    if src.demo.is_some() {
        dst.demo = src.demo;
    }
    match (&mut dst.display, src.display) {
        (None, Some(c)) => dst.display = Some(c),
        (Some(d), Some(s)) => merge_display(d, s),
        _ => {}
    }
}

fn merge_display(dst: &mut DisplayConfig, src: DisplayConfig) {
    if src.address.is_some() {
        dst.address = src.address;
    }
    if src.rotate_deg.is_some() {
        dst.rotate_deg = src.rotate_deg;
    }
    if src.skip_splash.is_some() {
        dst.skip_splash = src.skip_splash;
    }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some() {
        cfg.log_level = cli.log_level.clone();
    }
    if cli.demo {
        cfg.demo = Some(true);
    }

    let any_display = cli.address.is_some() || cli.rotate_deg.is_some() || cli.no_splash;
    if any_display && cfg.display.is_none() {
        cfg.display = Some(DisplayConfig::default());
    }
    if let Some(display) = cfg.display.as_mut() {
        if cli.address.is_some() {
            display.address = cli.address;
        }
        if cli.rotate_deg.is_some() {
            display.rotate_deg = cli.rotate_deg;
        }
        if cli.no_splash {
            display.skip_splash = Some(true);
        }
    }
}

/// Put any invariants here (required fields, ranges, etc.)
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(display) = cfg.display.as_ref() {
        if let Some(addr) = display.address {
            if addr > 0x77 {
                return Err(ConfigError::Validation(
                    "display address must be a 7-bit I2C address (<= 0x77)".into(),
                ));
            }
        }
        if let Some(rot) = display.rotate_deg {
            match rot {
                0 | 180 => {}
                _ => {
                    return Err(ConfigError::Validation(
                        "display rotate_deg must be 0|180".into(),
                    ));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_decimal_addresses() {
        assert_eq!(parse_address("0x3C").unwrap(), 0x3C);
        assert_eq!(parse_address("0x3d").unwrap(), 0x3D);
        assert_eq!(parse_address("60").unwrap(), 60);
        assert!(parse_address("oled").is_err());
    }

    #[test]
    fn defaults_apply_without_config() {
        let cfg = Config::default();
        assert_eq!(cfg.address(), DEFAULT_I2C_ADDRESS);
        assert_eq!(cfg.rotate_deg(), 0);
        assert!(cfg.show_splash());
        assert!(!cfg.demo());
    }

    #[test]
    fn cli_overrides_win() {
        let mut cfg = Config::default();
        let cli = Cli::parse_from(["croaster-display", "--address", "0x3D", "--no-splash"]);
        apply_cli_overrides(&mut cfg, &cli);
        assert_eq!(cfg.address(), 0x3D);
        assert!(!cfg.show_splash());
    }

    #[test]
    fn rejects_unsupported_rotation() {
        let cfg = Config {
            display: Some(DisplayConfig {
                rotate_deg: Some(90),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(validate(&cfg).is_err());
    }
}
