use serde::Deserialize;
use serde_with::{serde_as, DeserializeFromStr, DurationMilliSeconds};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use termion::event::Key;

use crate::cmds::Cmd;
use crate::error::{Error, ErrorKind, Result};
use crate::hebrew::{Formatter, Script};

pub type KeyMap = HashMap<Key, Cmd>;

const CONFIG_PATH_ENV_VAR: &str = "LUACH_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> io::Result<Vec<PathBuf>> {
    let home = dirs::home_dir().ok_or_else(|| {
        io::Error::new(io::ErrorKind::Other, "Unable to find home directory")
    })?;

    let config_xdg = dirs::config_dir()
        .unwrap_or_else(|| home.join(".config"))
        .join("luach")
        .join("config.toml");

    let mut locations = vec![config_xdg, home.join(".luach.toml")];

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.insert(0, PathBuf::from(path));
    }

    Ok(locations)
}

pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::from_file(path);
    }

    for location in find_configfile_locations()? {
        if location.is_file() {
            log::info!("Loading config from {}", location.display());
            return Config::from_file(&location);
        }
    }

    log::warn!("No config file found, using defaults");
    Ok(Config::default())
}

/// A key as written in the config, e.g. `"n"`, `"Left"` or `"Ctrl-n"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, DeserializeFromStr)]
pub struct KeyBinding(pub Key);

impl FromStr for KeyBinding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let single = |rest: &str| {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => None,
            }
        };

        let key = match s {
            "Left" => Some(Key::Left),
            "Right" => Some(Key::Right),
            "Up" => Some(Key::Up),
            "Down" => Some(Key::Down),
            "Home" => Some(Key::Home),
            "End" => Some(Key::End),
            "PageUp" => Some(Key::PageUp),
            "PageDown" => Some(Key::PageDown),
            "Backspace" => Some(Key::Backspace),
            "Delete" => Some(Key::Delete),
            "Esc" => Some(Key::Esc),
            "Enter" => Some(Key::Char('\n')),
            "Space" => Some(Key::Char(' ')),
            "Tab" => Some(Key::Char('\t')),
            _ => {
                if let Some(rest) = s.strip_prefix("Ctrl-") {
                    single(rest).map(Key::Ctrl)
                } else if let Some(rest) = s.strip_prefix("Alt-") {
                    single(rest).map(Key::Alt)
                } else {
                    single(s).map(Key::Char)
                }
            }
        };

        key.map(KeyBinding).ok_or_else(|| {
            Error::new(ErrorKind::ConfigError, &format!("Unknown key '{}'", s))
        })
    }
}

#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    tick_rate: Duration,
    script: Script,
    show_gregorian: bool,
    long_years: bool,
    keys: HashMap<String, KeyBinding>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        let config = Config::default();
        ConfigFile {
            tick_rate: config.tick_rate,
            script: config.script,
            show_gregorian: config.show_gregorian,
            long_years: config.long_years,
            keys: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub key_map: KeyMap,
    pub tick_rate: Duration,
    pub script: Script,
    pub show_gregorian: bool,
    pub long_years: bool,
}

impl Default for Config {
    fn default() -> Config {
        let mut config = Config {
            key_map: HashMap::new(),
            tick_rate: Duration::from_millis(500),
            script: Script::Latin,
            show_gregorian: true,
            long_years: false,
        };

        // Arrows and h/j/k/l move the cursor directly, see `ui::app`
        config.key_map.insert(Key::Char('+'), Cmd::NextDay);
        config.key_map.insert(Key::Char('-'), Cmd::PrevDay);
        config.key_map.insert(Key::Char('n'), Cmd::NextMonth);
        config.key_map.insert(Key::Char('p'), Cmd::PrevMonth);
        config.key_map.insert(Key::Char('N'), Cmd::NextYear);
        config.key_map.insert(Key::Char('P'), Cmd::PrevYear);
        config.key_map.insert(Key::Char('t'), Cmd::Today);
        config.key_map.insert(Key::Char(':'), Cmd::Command);
        config.key_map.insert(Key::Char('q'), Cmd::Exit);

        config
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Config> {
        let file: ConfigFile = toml::from_str(content)?;

        let mut config = Config {
            tick_rate: file.tick_rate,
            script: file.script,
            show_gregorian: file.show_gregorian,
            long_years: file.long_years,
            ..Config::default()
        };

        for (name, KeyBinding(key)) in file.keys {
            let cmd = Cmd::from_name(&name).ok_or_else(|| {
                Error::new(
                    ErrorKind::ConfigError,
                    &format!("Unknown command '{}' in key bindings", name),
                )
            })?;

            if let Some(previous) = config.key_map.insert(key, cmd) {
                log::debug!("Key {:?} rebound from {} to {}", key, previous, cmd);
            }
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|err| {
            Error::from(err).with_msg(&format!("Could not read {}", path.display()))
        })?;

        Config::from_toml(&content)
    }

    pub fn formatter(&self) -> Formatter {
        Formatter::new(self.script).long_years(self.long_years)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml("").unwrap();

        assert_eq!(config.tick_rate, Duration::from_millis(500));
        assert_eq!(config.script, Script::Latin);
        assert!(config.show_gregorian);
        assert_eq!(config.key_map.get(&Key::Char('n')), Some(&Cmd::NextMonth));
        assert_eq!(config.key_map.get(&Key::Char('q')), Some(&Cmd::Exit));
    }

    #[test]
    fn file_overrides_defaults() {
        let config = Config::from_toml(
            r#"
            tick_rate = 1000
            script = "hebrew"
            show_gregorian = false

            [keys]
            next_year = "Ctrl-n"
            today = "Space"
            prev_month = "n"
            "#,
        )
        .unwrap();

        assert_eq!(config.tick_rate, Duration::from_secs(1));
        assert_eq!(config.script, Script::Hebrew);
        assert!(!config.show_gregorian);
        assert_eq!(config.key_map.get(&Key::Ctrl('n')), Some(&Cmd::NextYear));
        assert_eq!(config.key_map.get(&Key::Char(' ')), Some(&Cmd::Today));
        assert_eq!(config.key_map.get(&Key::Char('n')), Some(&Cmd::PrevMonth));
    }

    #[test]
    fn bad_entries_are_rejected() {
        let unknown_cmd = Config::from_toml("[keys]\nwarp = \"w\"").unwrap_err();
        assert!(matches!(unknown_cmd.kind, ErrorKind::ConfigError));

        assert!(Config::from_toml("[keys]\ntoday = \"Ctrl-\"").is_err());
        assert!(Config::from_toml("script = \"cyrillic\"").is_err());
        assert!(Config::from_toml("colour = true").is_err());
    }

    #[test]
    fn key_names() {
        assert_eq!("Left".parse::<KeyBinding>().unwrap().0, Key::Left);
        assert_eq!("Alt-x".parse::<KeyBinding>().unwrap().0, Key::Alt('x'));
        assert_eq!("ש".parse::<KeyBinding>().unwrap().0, Key::Char('ש'));
        assert!("Hyper-x".parse::<KeyBinding>().is_err());
    }
}
