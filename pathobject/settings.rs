use std::str::FromStr;

use crate::{Error, PathType};

/// The built-in path dialects.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[serde(alias = "posixpath")]
    Posix,
    #[serde(alias = "ntpath", alias = "windows")]
    Nt,
    /// Whatever the host uses.
    #[default]
    Native,
}

impl Dialect {
    #[must_use]
    pub fn path_type(self) -> PathType {
        match self {
            Dialect::Posix => PathType::posix(),
            Dialect::Nt => PathType::nt(),
            Dialect::Native => PathType::native(),
        }
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "posix" | "posixpath" => Ok(Dialect::Posix),
            "nt" | "ntpath" | "windows" => Ok(Dialect::Nt),
            "native" => Ok(Dialect::Native),
            _ => Err(Error::UnknownDialect(s.to_owned())),
        }
    }
}

/// Declarative description of a path type, e.g. from a configuration file:
///
/// ```toml
/// dialect = "nt"
/// name = "NTPath"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathTypeSettings {
    pub dialect: Dialect,
    /// Display name. Defaults to the dialect's own.
    pub name: Option<String>,
}

impl PathType {
    #[must_use]
    pub fn from_settings(settings: &PathTypeSettings) -> Self {
        let path_type = settings.dialect.path_type();
        match settings.name {
            Some(ref name) => path_type.with_name(name.as_str()),
            None => path_type,
        }
    }
}
