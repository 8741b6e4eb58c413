use roller_dice::Limits;
use std::{convert::TryFrom, fmt::Display, path::Path, time::Duration};
use thiserror::Error;
use toml::{map::Map, Value};

pub const DEFAULT_NICK: &str = "Roller";
pub const DEFAULT_RNG_RESEED_S: u32 = 300;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("unable to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unable to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    pub nick: String,
    pub limits: Limits,
    pub rng_reseed: Duration,
}

impl Default for BotConfig {
    fn default() -> Self {
        BotConfig {
            nick: DEFAULT_NICK.to_string(),
            limits: Limits::default(),
            rng_reseed: Duration::from_secs(DEFAULT_RNG_RESEED_S.into()),
        }
    }
}

fn integer_or_default<T>(config: &mut Map<String, Value>, key: &str, default: T) -> T
where
    T: TryFrom<i64> + Into<i64> + Copy + Display,
{
    match config
        .get(key)
        .and_then(|v| v.as_integer())
        .and_then(|v| T::try_from(v).ok())
    {
        Some(v) => v,
        None => {
            log::warn!("unable to read {}, overwriting with {}", key, default);
            config.insert(key.to_string(), Value::from(default.into()));
            default
        }
    }
}

pub fn read_map<P: AsRef<Path>>(path: P) -> Result<Map<String, Value>, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&text)?)
}

pub fn write_map<P: AsRef<Path>>(path: P, config: &Map<String, Value>) -> Result<(), ConfigError> {
    std::fs::write(path, toml::to_string(config)?)?;
    Ok(())
}

impl BotConfig {
    /// Reads every key from `config`, inserting the default for each one that
    /// is missing or invalid. `ROLLER_NICK` takes precedence over `nick`.
    pub fn from_map(config: &mut Map<String, Value>) -> BotConfig {
        let defaults = BotConfig::default();
        let nick = match config.get("nick").and_then(|n| n.as_str()) {
            Some(n) if !n.trim().is_empty() => n.to_owned(),
            _ => {
                log::warn!("unable to read nick, overwriting with {}", DEFAULT_NICK);
                config.insert("nick".to_string(), Value::from(DEFAULT_NICK));
                DEFAULT_NICK.to_owned()
            }
        };
        let nick = std::env::var("ROLLER_NICK").unwrap_or(nick);
        let limits = Limits {
            max_count: integer_or_default(config, "max_count", defaults.limits.max_count),
            max_sides: integer_or_default(config, "max_sides", defaults.limits.max_sides),
            max_constant: integer_or_default(config, "max_constant", defaults.limits.max_constant),
        };
        let rng_reseed = Duration::from_secs(
            integer_or_default(config, "rng_reseed_s", DEFAULT_RNG_RESEED_S).into(),
        );
        BotConfig {
            nick,
            limits,
            rng_reseed,
        }
    }

    /// Loads the config file, falling back to defaults for anything that
    /// cannot be read, and writes the completed config back.
    pub fn load<P: AsRef<Path>>(path: P) -> BotConfig {
        let path = path.as_ref();
        let mut config = match read_map(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}", e);
                Map::new()
            }
        };
        let bot_config = BotConfig::from_map(&mut config);
        if let Err(e) = write_map(path, &config) {
            log::error!("Error writing config: {}", e)
        }
        bot_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_empty_map() {
        let mut config = Map::new();
        let bot_config = BotConfig::from_map(&mut config);
        assert_eq!(bot_config.limits, Limits::default());
        assert_eq!(bot_config.rng_reseed, Duration::from_secs(300));
        assert_eq!(config.get("max_count").and_then(|v| v.as_integer()), Some(1000));
        assert_eq!(config.get("max_sides").and_then(|v| v.as_integer()), Some(1_000_000));
        assert_eq!(config.get("rng_reseed_s").and_then(|v| v.as_integer()), Some(300));
        assert_eq!(config.get("nick").and_then(|v| v.as_str()), Some("Roller"));
    }

    #[test]
    fn test_reads_values() {
        let mut config: Map<String, Value> = toml::from_str(
            "nick = \"Dice\"\nmax_count = 20\nmax_sides = 100\nmax_constant = 99\nrng_reseed_s = 10\n",
        )
        .unwrap();
        let bot_config = BotConfig::from_map(&mut config);
        assert_eq!(
            bot_config.limits,
            Limits {
                max_count: 20,
                max_sides: 100,
                max_constant: 99
            }
        );
        assert_eq!(bot_config.rng_reseed, Duration::from_secs(10));
    }

    #[test]
    fn test_invalid_values_replaced() {
        let mut config: Map<String, Value> =
            toml::from_str("max_count = -4\nmax_sides = \"many\"\n").unwrap();
        let bot_config = BotConfig::from_map(&mut config);
        assert_eq!(bot_config.limits.max_count, 1000);
        assert_eq!(bot_config.limits.max_sides, 1_000_000);
        assert_eq!(config.get("max_count").and_then(|v| v.as_integer()), Some(1000));
    }

    #[test]
    fn test_load_writes_back() {
        let dir = std::env::temp_dir().join(format!("roller-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("roller.toml");
        std::fs::write(&path, "max_count = 7\n").unwrap();

        let bot_config = BotConfig::load(&path);
        assert_eq!(bot_config.limits.max_count, 7);

        let written = read_map(&path).unwrap();
        assert_eq!(written.get("max_count").and_then(|v| v.as_integer()), Some(7));
        assert_eq!(written.get("max_sides").and_then(|v| v.as_integer()), Some(1_000_000));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
