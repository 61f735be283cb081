//! Settings for a run. They come from built-in defaults, the optional
//! configuration file `/etc/multi_ir.toml`, and the command line, in increasing
//! order of precedence.

use crate::{cmdline::CMDLINE, Error};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const CONFIG_FILE: &str = "/etc/multi_ir.toml";
pub const IR_DEV_PATH: &str = "/dev/sunxi-multi-ir";
pub const KEY_LAYOUT_PATH: &str = "/system/usr/keylayout";
pub const DEFAULT_KEYLAYOUT_FILE: &str = "sunxi-ir.kl";

/// Contents of the configuration file. Every setting is optional.
#[derive(Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The multi ir chardev
    pub device: Option<PathBuf>,
    /// Directory with the default and customer key layouts
    pub keylayout_dir: Option<PathBuf>,
    /// Default key layout, `sunxi-ir.kl` in the key layout directory if not set
    pub default_layout: Option<PathBuf>,
    /// File to read the product model from
    pub cmdline: Option<PathBuf>,
    /// Product model; overrides the kernel command line
    pub model: Option<String>,
}

/// Resolved settings
#[derive(Debug, PartialEq, Eq)]
pub struct Settings {
    pub device: PathBuf,
    pub keylayout_dir: PathBuf,
    pub default_layout: PathBuf,
    pub cmdline: PathBuf,
    pub model: Option<String>,
}

impl Config {
    pub fn parse(path: &Path) -> Result<Config, Error> {
        let contents =
            fs::read_to_string(path).map_err(|e| Error::Config(path.to_owned(), e.to_string()))?;

        Config::parse_text(&contents, path)
    }

    pub fn parse_text(contents: &str, path: &Path) -> Result<Config, Error> {
        toml::from_str(contents).map_err(|e| Error::Config(path.to_owned(), e.to_string()))
    }

    /// Load the given configuration file, or the default one if it exists
    pub fn load(path: Option<&Path>) -> Result<Config, Error> {
        match path {
            Some(path) => Config::parse(path),
            None => {
                let path = Path::new(CONFIG_FILE);

                if path.exists() {
                    Config::parse(path)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }

    /// Settings in other take precedence
    pub fn merge(self, other: Config) -> Config {
        Config {
            device: other.device.or(self.device),
            keylayout_dir: other.keylayout_dir.or(self.keylayout_dir),
            default_layout: other.default_layout.or(self.default_layout),
            cmdline: other.cmdline.or(self.cmdline),
            model: other.model.or(self.model),
        }
    }

    pub fn settings(self) -> Settings {
        let keylayout_dir = self
            .keylayout_dir
            .unwrap_or_else(|| PathBuf::from(KEY_LAYOUT_PATH));

        let default_layout = self
            .default_layout
            .unwrap_or_else(|| keylayout_dir.join(DEFAULT_KEYLAYOUT_FILE));

        Settings {
            device: self.device.unwrap_or_else(|| PathBuf::from(IR_DEV_PATH)),
            default_layout,
            keylayout_dir,
            cmdline: self.cmdline.unwrap_or_else(|| PathBuf::from(CMDLINE)),
            model: self.model,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        assert_eq!(
            Config::default().settings(),
            Settings {
                device: PathBuf::from("/dev/sunxi-multi-ir"),
                keylayout_dir: PathBuf::from("/system/usr/keylayout"),
                default_layout: PathBuf::from("/system/usr/keylayout/sunxi-ir.kl"),
                cmdline: PathBuf::from("/proc/cmdline"),
                model: None,
            }
        );
    }

    #[test]
    fn parse_file() {
        let config = Config::parse(Path::new("testdata/multi_ir.toml")).unwrap();

        assert_eq!(
            config,
            Config {
                keylayout_dir: Some(PathBuf::from("testdata/keylayout")),
                model: Some(String::from("acme")),
                ..Default::default()
            }
        );

        let settings = config.settings();

        assert_eq!(
            settings.default_layout,
            PathBuf::from("testdata/keylayout/sunxi-ir.kl")
        );
        assert_eq!(settings.device, PathBuf::from("/dev/sunxi-multi-ir"));
    }

    #[test]
    fn bad_file() {
        let e = Config::parse_text("keylayout = 1\n", Path::new("x.toml")).unwrap_err();

        assert!(matches!(e, Error::Config(..)));
        assert!(e.to_string().starts_with("x.toml: "));

        let e = Config::parse_text("model = 1\n", Path::new("x.toml")).unwrap_err();
        assert!(e.to_string().starts_with("x.toml: "));

        let e = Config::load(Some(Path::new("testdata/missing.toml"))).unwrap_err();
        assert!(e.to_string().starts_with("testdata/missing.toml: "));
    }

    #[test]
    fn merge() {
        let file = Config::parse_text(
            r#"
            device = "/dev/ir0"
            cmdline = "/tmp/cmdline"
            model = "CanC"
            "#,
            Path::new("x.toml"),
        )
        .unwrap();

        let args = Config {
            device: Some(PathBuf::from("/dev/ir1")),
            default_layout: Some(PathBuf::from("/vendor/usr/keylayout/default.kl")),
            ..Default::default()
        };

        let settings = file.merge(args).settings();

        assert_eq!(
            settings,
            Settings {
                device: PathBuf::from("/dev/ir1"),
                keylayout_dir: PathBuf::from("/system/usr/keylayout"),
                default_layout: PathBuf::from("/vendor/usr/keylayout/default.kl"),
                cmdline: PathBuf::from("/tmp/cmdline"),
                model: Some(String::from("CanC")),
            }
        );
    }
}
