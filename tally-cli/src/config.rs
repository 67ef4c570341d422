use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tally_core::{Clock, LocalClock, SortOrder, SystemClock};

use crate::state::tally_home;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// IANA zone used to decide what "today" is; the OS zone when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    pub currency_symbol: String,
    pub default_sort: SortOrder,
    /// How many days `tally stats` lists under "top days"
    pub top_days: usize,
    /// Fallback tracing filter when RUST_LOG is not set
    pub log_level: String,
    /// Overrides $TALLY_HOME/expenses.json
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: None,
            currency_symbol: "¥".to_string(),
            default_sort: SortOrder::Latest,
            top_days: 3,
            log_level: "warn".to_string(),
            data_file: None,
        }
    }
}

impl Config {
    pub fn clock(&self) -> Result<Box<dyn Clock>> {
        match self.timezone.as_deref() {
            Some(tz) => {
                let clock = SystemClock::from_name(tz).context("check `timezone` in config.toml")?;
                Ok(Box::new(clock))
            }
            None => Ok(Box::new(LocalClock)),
        }
    }

    pub fn format_amount(&self, amount: f64) -> String {
        format!("{}{}", self.currency_symbol, group_thousands(amount))
    }
}

/// 1234567.5 -> "1,234,567.50"; whole numbers print without decimals.
pub fn group_thousands(amount: f64) -> String {
    let raw = if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else {
        format!("{amount:.2}")
    };
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (int, frac) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(tally_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn save_config_to(path: &Path, cfg: &Config) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if init_config_at(&p)? {
        println!("Wrote {}", p.display());
    } else {
        println!("Config already exists: {}", p.display());
    }
    Ok(())
}

/// Write defaults unless a file is already there. The existing file is never
/// parsed, so a broken one does not block this.
pub fn init_config_at(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    save_config_to(path, &Config::default())?;
    Ok(true)
}
