//! # pmowsse - En-têtes WS-Security UsernameToken
//!
//! Ce crate génère le fragment XML d'en-tête WS-Security à insérer dans une
//! enveloppe SOAP : jeton `UsernameToken` (mot de passe en clair ou condensé
//! `PasswordDigest`), horodatage `wsu:Timestamp`, préambule WS-Addressing et
//! bloc `AMA_SecurityHostedUser`.
//!
//! ## Fonctionnalités
//!
//! - ✅ Calcul du `PasswordDigest` (SHA-1 chaîné, base64)
//! - ✅ Génération de nonce et d'horodatage à chaque rendu
//! - ✅ Options résolues à la construction avec valeurs par défaut
//! - ✅ Horloge et source d'aléa injectables pour des rendus déterministes
//! - ✅ Chargement de la configuration depuis YAML + variables d'environnement
//!
//! ## Architecture
//!
//! - [`WsSecurity`] : constructeur d'en-tête (credentials + options)
//! - [`SecurityOptions`] / [`OptionsInput`] : options du jeton
//! - [`password_digest`] : fonction de condensé WS-Security
//! - [`Clock`] / [`RandomSource`] : effets de bord injectables
//! - [`WsseConfig`] : configuration fichier
//!
//! ## Example
//!
//! ```
//! use pmowsse::{SecurityOptions, PasswordType, WsSecurity};
//!
//! let options = SecurityOptions {
//!     password_type: PasswordType::PasswordDigest,
//!     has_timestamp: false,
//!     ..Default::default()
//! };
//! let security = WsSecurity::new("u", "p", options);
//! let xml = security.to_xml();
//!
//! assert!(xml.contains("#PasswordDigest"));
//! assert!(xml.contains("<wsse:Nonce"));
//! assert!(!xml.contains("wsu:Timestamp"));
//! ```

pub mod addressing;
pub mod config;
pub mod digest;
pub mod error;
pub mod hosted_user;
pub mod nonce;
pub mod options;
pub mod security;
pub mod sources;
pub mod timestamp;

pub use addressing::Addressing;
pub use config::WsseConfig;
pub use digest::password_digest;
pub use error::{Result, WsseError};
pub use hosted_user::HostedUser;
pub use nonce::Nonce;
pub use options::{OptionsInput, PasswordType, SecurityOptions};
pub use security::WsSecurity;
pub use sources::{Clock, FixedClock, FixedRandom, RandomSource, SystemClock, ThreadRandom};
pub use timestamp::Timestamp;

/// URIs de namespaces et de profils WS-Security
pub mod ns {
    /// WS-Security secext 1.0
    pub const WSSE: &str =
        "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-secext-1.0.xsd";

    /// WS-Security utility 1.0
    pub const WSU: &str =
        "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-utility-1.0.xsd";

    /// Type de mot de passe en clair
    pub const PASSWORD_TEXT: &str = "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-username-token-profile-1.0#PasswordText";

    /// Type de mot de passe condensé
    pub const PASSWORD_DIGEST: &str = "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-username-token-profile-1.0#PasswordDigest";

    /// Encodage du nonce
    pub const BASE64_BINARY: &str = "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-soap-message-security-1.0#Base64Binary";

    /// WS-Addressing 2005/08
    pub const ADDRESSING: &str = "http://www.w3.org/2005/08/addressing";

    /// Namespace du bloc hosted user
    pub const AMA_SECURITY: &str = "http://xml.amadeus.com/2010/06/Security_v1";
}
