//! Gestion des erreurs de pmowsse
//!
//! Seul le chargement de la configuration peut échouer ; la construction et le
//! rendu d'un en-tête sont infaillibles.

use thiserror::Error;

/// Type Result personnalisé pour pmowsse
pub type Result<T> = std::result::Result<T, WsseError>;

#[derive(Error, Debug)]
pub enum WsseError {
    /// Lecture du fichier de configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document YAML invalide
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Credential absent ou vide
    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),

    /// Structure de configuration inattendue
    #[error("Configuration error: {0}")]
    Config(String),
}
