use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::models::{Category, TicketCounts};

// Top-level configuration, one section per concern
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub data: DataConfig,
    pub pricing: PricingConfig,
    pub directory: DirectoryConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(()),
        }
    }
}

// Application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub environment: String,
    pub rust_log: String,
    pub log_format: OutputFormat,
    pub report_format: OutputFormat,
}

// Where layouts and the user database live
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Layout files, auditorium 1 first.
    pub auditorium_files: Vec<PathBuf>,
    pub user_db: PathBuf,
    pub output_dir: PathBuf,
    pub save_on_exit: bool,
}

/// Ticket price per category.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PricingConfig {
    pub adult: f64,
    pub child: f64,
    pub senior: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            adult: 10.0,
            child: 5.0,
            senior: 7.5,
        }
    }
}

impl PricingConfig {
    pub fn price(&self, category: Category) -> f64 {
        match category {
            Category::Adult => self.adult,
            Category::Child => self.child,
            Category::Senior => self.senior,
            Category::Other(_) => 0.0,
        }
    }

    /// Price of a set of tickets.
    pub fn charge(&self, tickets: TicketCounts) -> f64 {
        Category::TICKET_CLASSES
            .into_iter()
            .map(|category| f64::from(tickets.get(category)) * self.price(category))
            .sum()
    }
}

// Customer directory hash table settings
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryConfig {
    pub initial_buckets: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key/value source, falling back to
    /// defaults for absent keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let auditorium_files = lookup("AUDITORIUM_FILES")
            .unwrap_or_else(|| "A1.txt,A2.txt,A3.txt".to_string())
            .split(',')
            .map(str::trim)
            .filter(|file| !file.is_empty())
            .map(PathBuf::from)
            .collect::<Vec<_>>();
        if auditorium_files.is_empty() {
            return Err(ConfigError::Invalid {
                key: "AUDITORIUM_FILES",
                value: lookup("AUDITORIUM_FILES").unwrap_or_default(),
            });
        }

        let pricing = PricingConfig {
            adult: parse_price(&lookup, "PRICE_ADULT", 10.0)?,
            child: parse_price(&lookup, "PRICE_CHILD", 5.0)?,
            senior: parse_price(&lookup, "PRICE_SENIOR", 7.5)?,
        };

        Ok(Config {
            app: AppConfig {
                environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
                rust_log: lookup("RUST_LOG").unwrap_or_else(|| "theater_seating=info".to_string()),
                log_format: parse_or(&lookup, "LOG_FORMAT", OutputFormat::Text)?,
                report_format: parse_or(&lookup, "REPORT_FORMAT", OutputFormat::Text)?,
            },
            data: DataConfig {
                auditorium_files,
                user_db: lookup("USER_DB").map_or_else(|| PathBuf::from("userdb.dat"), PathBuf::from),
                output_dir: lookup("OUTPUT_DIR").map_or_else(|| PathBuf::from("."), PathBuf::from),
                save_on_exit: parse_or(&lookup, "SAVE_ON_EXIT", false)?,
            },
            pricing,
            directory: DirectoryConfig {
                initial_buckets: parse_or(&lookup, "DIRECTORY_BUCKETS", crate::directory::DEFAULT_BUCKETS)?,
            },
        })
    }
}

fn parse_or<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { key, value }),
    }
}

fn parse_price<F>(lookup: &F, key: &'static str, default: f64) -> Result<f64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let price = parse_or(lookup, key, default)?;
    if price.is_finite() && price >= 0.0 {
        Ok(price)
    } else {
        Err(ConfigError::Invalid { key, value: price.to_string() })
    }
}
