use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub page: PageConfig,
    pub font: FontConfig,
    pub letterhead: LetterheadConfig,
    pub footer: FooterConfig,
    pub body: BodyConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PageConfig {
    pub paper: String,
    pub margin_left: String,
    pub margin_right: String,
    pub margin_top: String,
    pub margin_bottom: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            paper: "us-letter".to_string(),
            margin_left: "2cm".to_string(),
            margin_right: "2cm".to_string(),
            margin_top: "5cm".to_string(),
            margin_bottom: "2.5cm".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct FontConfig {
    /// Font families in order of preference
    pub family: Vec<String>,
    pub size: u8,
    pub system_fonts: bool,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: vec![
                "Arial".to_string(),
                "Liberation Sans".to_string(),
                "Libertinus Serif".to_string(),
            ],
            size: 11,
            system_fonts: true,
        }
    }
}

/// One centered line of the header or footer
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TextLine {
    pub text: String,
    pub size: u8,
    pub bold: bool,
    pub family: Option<String>,
}

impl Default for TextLine {
    fn default() -> Self {
        Self {
            text: String::new(),
            size: 11,
            bold: false,
            family: None,
        }
    }
}

impl TextLine {
    fn new(text: &str, size: u8, bold: bool, family: Option<&str>) -> Self {
        Self {
            text: text.to_string(),
            size,
            bold,
            family: family.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LetterheadConfig {
    /// Seal image, relative to `assets_dir`
    pub seal: Option<String>,
    pub seal_height: String,
    pub assets_dir: PathBuf,
    pub lines: Vec<TextLine>,
}

impl Default for LetterheadConfig {
    fn default() -> Self {
        Self {
            seal: None,
            seal_height: "60pt".to_string(),
            assets_dir: PathBuf::from("."),
            lines: vec![
                TextLine::new("PRESIDENCIA DE LA REPÚBLICA", 9, true, Some("Times New Roman")),
                TextLine::new(
                    "Oficina para el Reordenamiento del Transporte",
                    16,
                    true,
                    Some("Times New Roman"),
                ),
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct FooterConfig {
    pub lines: Vec<TextLine>,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            lines: vec![
                TextLine::new(
                    "Av. Máximo Gómez esq. Av. Paseo de los Reyes Católicos, Cristo Rey, Santo Domingo, D. N., Rep. Dom.",
                    8,
                    false,
                    None,
                ),
                TextLine::new("Tels.: 809-732-2670/ 809-333-2670", 8, false, None),
                TextLine::new("RNC: 4-30-02742-1", 8, false, None),
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct BodyConfig {
    /// Sentence placed before the letter content
    pub intro: String,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            intro: "Por medio del presente oficio, solicitamos amablemente:".to_string(),
        }
    }
}

impl Config {
    /// The configuration compiled into the binary.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file, or return the compiled default if it does not exist.
    ///
    /// A relative `assets_dir` is resolved against the config file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("no config at {}, using defaults", path.display());
                return Ok(Self::compiled_default());
            }
            Err(source) => {
                return Err(Error::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let mut config: Self = toml::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;

        if config.letterhead.assets_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.letterhead.assets_dir = parent.join(&config.letterhead.assets_dir);
            }
        }

        Ok(config)
    }

    /// Absolute or config-relative path of the seal image, if one is configured.
    pub fn seal_path(&self) -> Option<PathBuf> {
        self.letterhead
            .seal
            .as_ref()
            .map(|seal| self.letterhead.assets_dir.join(seal))
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use std::path::Path;

    #[test]
    fn compiled_default_matches_code_defaults() {
        assert_eq!(Config::compiled_default(), Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str("[body]\nintro = \"Hola:\"\n").unwrap();
        assert_eq!(config.body.intro, "Hola:");
        assert_eq!(config.letterhead.lines.len(), 2);
        assert_eq!(config.footer.lines[2].text, "RNC: 4-30-02742-1");
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let config = Config::load(Path::new("/nonexistent/oficio.toml")).unwrap();
        assert_eq!(config, Config::compiled_default());
    }

    #[test]
    fn seal_path_joins_assets_dir() {
        let mut config = Config::default();
        assert_eq!(config.seal_path(), None);
        config.letterhead.seal = Some("images/escudo.png".to_string());
        config.letterhead.assets_dir = "/srv/oficio".into();
        assert_eq!(
            config.seal_path(),
            Some(Path::new("/srv/oficio/images/escudo.png").to_path_buf())
        );
    }
}
