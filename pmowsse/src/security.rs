//! Construction de l'en-tête WS-Security
//!
//! [`WsSecurity`] conserve les credentials et les options résolues ; chaque
//! appel à [`WsSecurity::render`] recalcule horodatage, nonce et MessageID.

use quick_xml::escape::escape;
use tracing::debug;

use crate::addressing::Addressing;
use crate::digest::password_digest;
use crate::hosted_user::HostedUser;
use crate::nonce::Nonce;
use crate::ns;
use crate::options::{OptionsInput, PasswordType, SecurityOptions};
use crate::sources::{Clock, RandomSource, SystemClock, ThreadRandom};
use crate::timestamp::{Timestamp, format_instant};

/// Constructeur d'en-tête WS-Security UsernameToken
#[derive(Debug, Clone)]
pub struct WsSecurity {
    username: String,
    password: String,
    options: SecurityOptions,
    addressing: Option<Addressing>,
    hosted_user: Option<HostedUser>,
}

impl WsSecurity {
    /// Crée un constructeur avec des options complètes
    ///
    /// Le préambule WS-Addressing et le bloc hosted user prennent leurs
    /// valeurs par défaut.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        options: SecurityOptions,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            options,
            addressing: Some(Addressing::default()),
            hosted_user: Some(HostedUser::default()),
        }
    }

    /// Crée un constructeur à partir d'un type de mot de passe seul
    ///
    /// Les autres options gardent leurs valeurs par défaut ; une valeur
    /// inconnue vaut `PasswordText`.
    pub fn with_password_type(
        username: impl Into<String>,
        password: impl Into<String>,
        password_type: &str,
    ) -> Self {
        Self::new(username, password, SecurityOptions::from(password_type))
    }

    /// Crée un constructeur depuis une option chaîne ou structurée
    pub fn from_input(
        username: impl Into<String>,
        password: impl Into<String>,
        input: OptionsInput,
    ) -> Self {
        Self::new(username, password, input.into())
    }

    /// Remplace le préambule WS-Addressing (`None` pour ne pas l'émettre)
    pub fn with_addressing(mut self, addressing: Option<Addressing>) -> Self {
        self.addressing = addressing;
        self
    }

    /// Remplace le bloc hosted user (`None` pour ne pas l'émettre)
    pub fn with_hosted_user(mut self, hosted_user: Option<HostedUser>) -> Self {
        self.hosted_user = hosted_user;
        self
    }

    /// Nom d'utilisateur émis dans `wsse:Username`
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Options résolues à la construction
    pub fn options(&self) -> &SecurityOptions {
        &self.options
    }

    /// Type de mot de passe effectif (après repli éventuel)
    pub fn password_type(&self) -> PasswordType {
        self.options.password_type
    }

    /// Préambule WS-Addressing, `None` s'il est désactivé
    pub fn addressing(&self) -> Option<&Addressing> {
        self.addressing.as_ref()
    }

    /// Bloc hosted user, `None` s'il est désactivé
    pub fn hosted_user(&self) -> Option<&HostedUser> {
        self.hosted_user.as_ref()
    }

    /// Rend le fragment avec l'horloge système et l'aléa du thread courant
    pub fn to_xml(&self) -> String {
        self.render(&SystemClock, &ThreadRandom)
    }

    /// Rend le fragment XML complet
    ///
    /// Ordre : préambule WS-Addressing, `wsse:Security`, bloc hosted user.
    pub fn render(&self, clock: &dyn Clock, random: &dyn RandomSource) -> String {
        let now = clock.now();
        let created = format_instant(now);

        let timestamp_xml = if self.options.has_timestamp {
            Timestamp::at(now).to_xml()
        } else {
            String::new()
        };

        let nonce = self
            .options
            .nonce_required()
            .then(|| Nonce::derive(&created, random.nonce_seed()));

        let password_xml = self.password_xml(&created, nonce.as_ref());

        let message_id = random.message_id();
        debug!(
            password_type = %self.options.password_type,
            nonce = nonce.is_some(),
            timestamp = self.options.has_timestamp,
            %message_id,
            "Rendering WS-Security header"
        );

        let mut xml = String::new();
        if let Some(addressing) = &self.addressing {
            xml.push_str(&addressing.to_xml(&message_id));
        }
        xml.push_str(&self.security_xml(&created, &timestamp_xml, &password_xml));
        if let Some(hosted_user) = &self.hosted_user {
            xml.push_str(&hosted_user.to_xml());
        }
        xml
    }

    fn password_xml(&self, created: &str, nonce: Option<&Nonce>) -> String {
        let content = match self.options.password_type {
            PasswordType::PasswordText => escape(self.password.as_str()).into_owned(),
            PasswordType::PasswordDigest => {
                // nonce_required() garantit sa présence pour le digest
                let raw = nonce.map(Nonce::raw).unwrap_or_default();
                password_digest(raw, created, &self.password)
            }
        };

        let mut xml = format!(
            "<wsse:Password Type=\"{}\">{}</wsse:Password>",
            self.options.password_type.uri(),
            content
        );
        if let Some(nonce) = nonce {
            xml.push_str(&format!(
                "<wsse:Nonce EncodingType=\"{}\">{}</wsse:Nonce>",
                ns::BASE64_BINARY,
                nonce.encoded()
            ));
        }
        xml
    }

    fn security_xml(&self, created: &str, timestamp_xml: &str, password_xml: &str) -> String {
        let actor = self
            .options
            .actor
            .as_deref()
            .filter(|actor| !actor.is_empty())
            .map(|actor| format!("soap:actor=\"{}\" ", escape(actor)))
            .unwrap_or_default();
        let must_understand = if self.options.must_understand() {
            "soap:mustUnderstand=\"1\" "
        } else {
            ""
        };
        let token_created = if self.options.has_token_created {
            format!("<wsu:Created>{created}</wsu:Created>")
        } else {
            String::new()
        };

        format!(
            "<wsse:Security {actor}{must_understand}xmlns:wsse=\"{wsse}\" xmlns:wsu=\"{wsu}\">\
             {timestamp_xml}\
             <wsse:UsernameToken xmlns:wsu=\"{wsu}\" wsu:Id=\"SecurityToken-{created}\">\
             <wsse:Username>{username}</wsse:Username>\
             {password_xml}\
             {token_created}\
             </wsse:UsernameToken>\
             </wsse:Security>",
            wsse = ns::WSSE,
            wsu = ns::WSU,
            username = escape(self.username.as_str()),
        )
    }
}
