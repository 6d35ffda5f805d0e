use headsup_ai::POLICY_NAMES;
use headsup_engine::config::{BIG_BLIND, Blinds, EngineConfig, INITIAL_STACK_SIZE, SMALL_BLIND};
use serde::{Deserialize, Serialize};
use std::fs;

pub const CONFIG_ENV: &str = "HEADSUP_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub initial_stack: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub opponent: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub initial_stack: ValueSource,
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub opponent: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            initial_stack: ValueSource::Default,
            small_blind: ValueSource::Default,
            big_blind: ValueSource::Default,
            opponent: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            initial_stack: INITIAL_STACK_SIZE,
            small_blind: SMALL_BLIND,
            big_blind: BIG_BLIND,
            opponent: "baseline".into(),
        }
    }
}

impl Config {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            initial_stack: self.initial_stack,
            blinds: Blinds {
                small: self.small_blind,
                big: self.big_blind,
            },
            ..EngineConfig::default()
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

/// Defaults, then the TOML file named by `HEADSUP_CONFIG`, then `HEADSUP_*`
/// variables. Empty variables are ignored.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Some(path) = env_value(CONFIG_ENV) {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.initial_stack {
            cfg.initial_stack = v;
            sources.initial_stack = ValueSource::File;
        }
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.big_blind {
            cfg.big_blind = v;
            sources.big_blind = ValueSource::File;
        }
        if let Some(v) = f.opponent {
            cfg.opponent = v;
            sources.opponent = ValueSource::File;
        }
    }

    if let Some(seed) = env_value("HEADSUP_SEED") {
        cfg.seed = Some(parse_env("HEADSUP_SEED", &seed)?);
        sources.seed = ValueSource::Env;
    }
    if let Some(stack) = env_value("HEADSUP_INITIAL_STACK") {
        cfg.initial_stack = parse_env("HEADSUP_INITIAL_STACK", &stack)?;
        sources.initial_stack = ValueSource::Env;
    }
    if let Some(sb) = env_value("HEADSUP_SMALL_BLIND") {
        cfg.small_blind = parse_env("HEADSUP_SMALL_BLIND", &sb)?;
        sources.small_blind = ValueSource::Env;
    }
    if let Some(bb) = env_value("HEADSUP_BIG_BLIND") {
        cfg.big_blind = parse_env("HEADSUP_BIG_BLIND", &bb)?;
        sources.big_blind = ValueSource::Env;
    }
    if let Some(name) = env_value("HEADSUP_OPPONENT") {
        cfg.opponent = name;
        sources.opponent = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    initial_stack: Option<u32>,
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    opponent: Option<String>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    cfg.engine_config()
        .validate()
        .map_err(|e| ConfigError::Invalid(e.to_string()))?;
    if !POLICY_NAMES.contains(&cfg.opponent.as_str()) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: unknown opponent policy {:?}",
            cfg.opponent
        )));
    }
    Ok(())
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {:?}", key, raw)))
}
