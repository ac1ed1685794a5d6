//! Options du UsernameToken
//!
//! Toutes les options sont résolues à la construction du [`WsSecurity`](crate::WsSecurity)
//! et ne peuvent pas échouer : un type de mot de passe inconnu est ramené à
//! [`PasswordType::PasswordText`].

use serde::Deserialize;
use std::fmt;
use tracing::warn;

use crate::ns;

/// Représentation du mot de passe dans le jeton
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum PasswordType {
    /// `Base64(SHA-1(nonce + created + SHA-1(password)))`
    PasswordDigest,
    /// Mot de passe en clair
    #[default]
    PasswordText,
}

impl PasswordType {
    /// URI émise dans l'attribut `Type` de `wsse:Password`
    pub fn uri(&self) -> &'static str {
        match self {
            PasswordType::PasswordDigest => ns::PASSWORD_DIGEST,
            PasswordType::PasswordText => ns::PASSWORD_TEXT,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PasswordType::PasswordDigest => "PasswordDigest",
            PasswordType::PasswordText => "PasswordText",
        }
    }
}

impl fmt::Display for PasswordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for PasswordType {
    fn from(value: &str) -> Self {
        match value {
            "PasswordDigest" => PasswordType::PasswordDigest,
            "PasswordText" | "" => PasswordType::PasswordText,
            other => {
                warn!(password_type = %other, "Unknown password type, falling back to PasswordText");
                PasswordType::PasswordText
            }
        }
    }
}

impl From<String> for PasswordType {
    fn from(value: String) -> Self {
        PasswordType::from(value.as_str())
    }
}

/// Options du jeton WS-Security
///
/// Les clés YAML acceptent aussi la forme historique en un seul mot
/// (`passwordtype`, `hastimestamp`, ...), ce qui couvre les noms camelCase
/// une fois les clés passées en minuscules par [`WsseConfig`](crate::WsseConfig).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SecurityOptions {
    #[serde(alias = "passwordtype")]
    pub password_type: PasswordType,

    /// Émet un `wsu:Timestamp` (par défaut : oui)
    #[serde(alias = "hastimestamp")]
    pub has_timestamp: bool,

    /// `None` : déduit du type de mot de passe
    #[serde(alias = "hasnonce")]
    pub has_nonce: Option<bool>,

    /// Émet `wsu:Created` dans le UsernameToken (par défaut : oui)
    #[serde(alias = "hastokencreated")]
    pub has_token_created: bool,

    /// Valeur de l'attribut `soap:actor`
    pub actor: Option<String>,

    /// Émet `soap:mustUnderstand="1"` si `Some(true)`
    #[serde(alias = "mustunderstand")]
    pub must_understand: Option<bool>,
}

impl Default for SecurityOptions {
    fn default() -> Self {
        Self {
            password_type: PasswordType::PasswordText,
            has_timestamp: true,
            has_nonce: None,
            has_token_created: true,
            actor: None,
            must_understand: None,
        }
    }
}

impl SecurityOptions {
    /// Le digest impose toujours un nonce, quel que soit `has_nonce`
    pub fn nonce_required(&self) -> bool {
        self.has_nonce == Some(true) || self.password_type != PasswordType::PasswordText
    }

    pub fn must_understand(&self) -> bool {
        self.must_understand == Some(true)
    }
}

/// Forme historique : une chaîne seule vaut type de mot de passe
impl From<&str> for SecurityOptions {
    fn from(password_type: &str) -> Self {
        Self {
            password_type: PasswordType::from(password_type),
            ..Default::default()
        }
    }
}

/// Options telles que fournies par l'appelant : soit un type de mot de passe
/// seul, soit la structure complète
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OptionsInput {
    PasswordType(String),
    Options(SecurityOptions),
}

impl Default for OptionsInput {
    fn default() -> Self {
        OptionsInput::Options(SecurityOptions::default())
    }
}

impl From<OptionsInput> for SecurityOptions {
    fn from(input: OptionsInput) -> Self {
        match input {
            OptionsInput::PasswordType(password_type) => SecurityOptions::from(password_type.as_str()),
            OptionsInput::Options(options) => options,
        }
    }
}
