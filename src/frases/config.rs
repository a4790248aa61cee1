//! # Configuration
//!
//! All settings come from `FRASES_*` environment variables, read exactly
//! once in `main` into an explicit [`Config`] that is passed down to the
//! components. Precedence is simple: a set variable wins, otherwise the
//! compiled default applies. There are no fallback variable chains and no
//! test-mode bypass tokens; tests construct their own `Config` (or the
//! components directly).
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `FRASES_PORT` | `8080` | TCP port to bind |
//! | `FRASES_DATASET` | `data/quotes_es.json` | Dataset snapshot path |
//! | `FRASES_QUEUE` | `data/pending_submissions.json` | Submission queue path |
//! | `FRASES_SUBMIT_TOKEN` | — (required) | Accepted submit token(s), comma-separated |
//! | `FRASES_SEARCH_CAP` | `50` | Max search results, `0` disables the cap |

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{FrasesError, Result};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATASET: &str = "data/quotes_es.json";
pub const DEFAULT_QUEUE: &str = "data/pending_submissions.json";
pub const DEFAULT_SEARCH_CAP: usize = 50;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub dataset_path: PathBuf,
    pub queue_path: PathBuf,
    pub submit_tokens: Vec<String>,
    pub search_cap: Option<usize>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = parse_var("FRASES_PORT", DEFAULT_PORT)?;
        let dataset_path =
            PathBuf::from(env::var("FRASES_DATASET").unwrap_or_else(|_| DEFAULT_DATASET.into()));
        let queue_path =
            PathBuf::from(env::var("FRASES_QUEUE").unwrap_or_else(|_| DEFAULT_QUEUE.into()));

        let submit_tokens = env::var("FRASES_SUBMIT_TOKEN")
            .map_err(|_| FrasesError::Config("FRASES_SUBMIT_TOKEN is not set".into()))?
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect::<Vec<_>>();
        if submit_tokens.is_empty() {
            return Err(FrasesError::Config(
                "FRASES_SUBMIT_TOKEN must contain at least one token".into(),
            ));
        }

        let search_cap = match parse_var("FRASES_SEARCH_CAP", DEFAULT_SEARCH_CAP)? {
            0 => None,
            cap => Some(cap),
        };

        Ok(Self {
            port,
            dataset_path,
            queue_path,
            submit_tokens,
            search_cap,
        })
    }
}

fn parse_var<T: FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: Display,
{
    match env::var(key) {
        Ok(value) => value
            .parse()
            .map_err(|e| FrasesError::Config(format!("invalid {}: {}", key, e))),
        Err(_) => Ok(default),
    }
}
