use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{Error, Result};

/// The record a letter is generated from.
///
/// Field names follow the records produced by the correspondence system,
/// e.g. `Codigo = "..."` in a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Oficio {
    pub codigo: String,
    pub fecha_creacion: Option<NaiveDate>,
    pub departamento_remitente: Option<String>,
    pub dirigido_departamento: Option<String>,
    pub via: Option<String>,
    pub tipo_oficio: Option<String>,
    /// Rich-text body as entered by the user
    pub contenido: Option<String>,
    pub anexos: Option<String>,
    pub encargado_departamental: Option<String>,
}

impl Oficio {
    /// Read a record from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| Error::Record {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Creation date as printed on the letter (`dd/mm/yyyy`), blank when unknown.
    pub fn fecha(&self) -> String {
        self.fecha_creacion
            .map(|date| date.format("%d/%m/%Y").to_string())
            .unwrap_or_default()
    }

    pub fn has_content(&self) -> bool {
        present(&self.contenido).is_some()
    }

    pub fn annexes(&self) -> Option<&str> {
        present(&self.anexos)
    }

    pub fn via(&self) -> Option<&str> {
        present(&self.via)
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.trim().is_empty())
}
