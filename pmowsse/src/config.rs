//! Configuration fichier du constructeur d'en-tête
//!
//! Le document YAML externe est fusionné sur la configuration par défaut
//! intégrée (`pmowsse.yaml`), les clés sont passées en minuscules puis les
//! variables d'environnement préfixées par `PMOWSSE__` sont appliquées.
//!
//! ```yaml
//! security:
//!   username: alice
//!   password: secret
//!   options:
//!     password_type: PasswordDigest
//!     has_timestamp: false
//! hosted_user: ~        # désactive le bloc hosted user
//! ```
//!
//! `PMOWSSE__SECURITY__OPTIONS__ACTOR=urn:actor` surcharge `security.options.actor`.

use serde::{Deserialize, Deserializer};
use serde_yaml::{Mapping, Value};
use std::{env, fs, path::Path};
use tracing::{debug, info};

use crate::addressing::Addressing;
use crate::error::{Result, WsseError};
use crate::hosted_user::HostedUser;
use crate::options::OptionsInput;
use crate::security::WsSecurity;

// Configuration par défaut intégrée
const DEFAULT_CONFIG: &str = include_str!("pmowsse.yaml");

const ENV_PREFIX: &str = "PMOWSSE__";

/// Section `security`
#[derive(Debug, Clone, Deserialize)]
pub struct SecuritySection {
    #[serde(default, deserialize_with = "scalar_string")]
    pub username: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub password: String,
    #[serde(default)]
    pub options: OptionsInput,
}

/// Accepte tout scalaire YAML (`password: 123456`) et le garde sous forme de texte
fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected a scalar credential, found {other:?}"
        ))),
    }
}

/// Configuration complète
#[derive(Debug, Clone, Deserialize)]
pub struct WsseConfig {
    pub security: SecuritySection,
    #[serde(default)]
    pub addressing: Option<Addressing>,
    #[serde(default)]
    pub hosted_user: Option<HostedUser>,
}

impl WsseConfig {
    /// Charge un document YAML fusionné sur les valeurs par défaut, sans
    /// surcharge d'environnement
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Self::build(Some(yaml), std::iter::empty())
    }

    /// Charge `path` (ou les valeurs par défaut s'il n'existe pas) et applique
    /// les variables d'environnement du processus
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_env(path, env::vars())
    }

    /// Comme [`WsseConfig::load`] avec un jeu explicite de variables
    pub fn load_with_env<I>(path: impl AsRef<Path>, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let path = path.as_ref();
        let yaml = if path.exists() {
            info!(config_file = %path.display(), "Loaded config file");
            Some(fs::read_to_string(path)?)
        } else {
            info!(config_file = %path.display(), "Config file not found, using default embedded config");
            None
        };

        Self::build(yaml.as_deref(), vars)
    }

    fn build<I>(yaml: Option<&str>, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut value = lower_keys_value(serde_yaml::from_str(DEFAULT_CONFIG)?);
        if let Some(yaml) = yaml {
            let external = lower_keys_value(serde_yaml::from_str(yaml)?);
            merge_yaml(&mut value, &external);
        }
        normalize_options(&mut value);
        apply_env_overrides(&mut value, vars)?;

        Ok(serde_yaml::from_value(value)?)
    }

    /// Construit le [`WsSecurity`] décrit par la configuration
    pub fn into_security(self) -> Result<WsSecurity> {
        if self.security.username.is_empty() {
            return Err(WsseError::MissingCredential("username"));
        }

        Ok(WsSecurity::from_input(
            self.security.username,
            self.security.password,
            self.security.options,
        )
        .with_addressing(self.addressing)
        .with_hosted_user(self.hosted_user))
    }
}

/// Fusionne `external` dans `default` : mappings fusionnés, le reste remplacé
fn merge_yaml(default: &mut Value, external: &Value) {
    match (default, external) {
        (Value::Mapping(dmap), Value::Mapping(emap)) => {
            for (k, v) in emap {
                match dmap.get_mut(k) {
                    Some(dv) => merge_yaml(dv, v),
                    None => {
                        dmap.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        (d, e) => *d = e.clone(),
    }
}

fn lower_keys_value(value: Value) -> Value {
    match value {
        Value::Mapping(map) => Value::Mapping(
            map.into_iter()
                .map(|(k, v)| {
                    let k = match k {
                        Value::String(s) => Value::String(s.to_lowercase()),
                        other => other,
                    };
                    (k, lower_keys_value(v))
                })
                .collect(),
        ),
        Value::Sequence(seq) => Value::Sequence(seq.into_iter().map(lower_keys_value).collect()),
        _ => value,
    }
}

/// `security.options: PasswordDigest` devient `{password_type: PasswordDigest}`
/// pour que les surcharges puissent cibler chaque option
fn normalize_options(config: &mut Value) {
    let Some(options) = config
        .get_mut("security")
        .and_then(|security| security.get_mut("options"))
    else {
        return;
    };

    if let Value::String(password_type) = options {
        let mut map = Mapping::new();
        map.insert(
            Value::String("password_type".to_string()),
            Value::String(std::mem::take(password_type)),
        );
        *options = Value::Mapping(map);
    }
}

fn apply_env_overrides<I>(config: &mut Value, vars: I) -> Result<()>
where
    I: IntoIterator<Item = (String, String)>,
{
    for (key, value) in vars {
        let Some(path) = key.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        let path: Vec<String> = path.split("__").map(str::to_lowercase).collect();
        debug!(variable = %key, "Applying environment override");
        let value = if is_credential_path(&path) {
            Value::String(value)
        } else {
            convert_env_value(&value)
        };
        set_value_internal(config, &path, value)?;
    }
    Ok(())
}

/// Les credentials sont pris tels quels, sans interprétation YAML
fn is_credential_path(path: &[String]) -> bool {
    matches!(
        path,
        [section, field] if section == "security" && (field == "username" || field == "password")
    )
}

fn set_value_internal(data: &mut Value, path: &[String], value: Value) -> Result<()> {
    let Some((key, rest)) = path.split_first() else {
        *data = value;
        return Ok(());
    };

    if data.is_null() {
        *data = Value::Mapping(Mapping::new());
    }
    match data {
        Value::Mapping(map) => {
            let entry = map
                .entry(Value::String(key.clone()))
                .or_insert(Value::Null);
            set_value_internal(entry, rest, value)
        }
        _ => Err(WsseError::Config(format!("{key}: parent node is not a map"))),
    }
}

/// Les nombres restent des chaînes : aucun champ numérique dans le schéma
fn convert_env_value(value: &str) -> Value {
    match serde_yaml::from_str::<Value>(value) {
        Ok(Value::Number(_)) | Err(_) => Value::String(value.to_string()),
        Ok(parsed) => parsed,
    }
}
