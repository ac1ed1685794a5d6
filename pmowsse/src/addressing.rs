//! Préambule WS-Addressing (MessageID, Action, To)

use quick_xml::escape::escape;
use serde::Deserialize;
use uuid::Uuid;

use crate::ns;

/// Action SOAP par défaut
pub const DEFAULT_ACTION: &str = "http://webservices.amadeus.com/FMPCAQ_16_3_1A";

/// Point d'accès par défaut
pub const DEFAULT_TO: &str = "https://nodeD2.test.webservices.amadeus.com/1ASIWIHAIHA";

/// En-têtes WS-Addressing émis avant `wsse:Security`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Addressing {
    pub action: String,
    pub to: String,
}

impl Default for Addressing {
    fn default() -> Self {
        Self {
            action: DEFAULT_ACTION.to_string(),
            to: DEFAULT_TO.to_string(),
        }
    }
}

impl Addressing {
    pub fn new(action: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            to: to.into(),
        }
    }

    /// Construit le préambule ; le MessageID est l'UUID en majuscules
    pub fn to_xml(&self, message_id: &Uuid) -> String {
        let message_id = message_id.to_string().to_uppercase();
        format!(
            "<ns2:MessageID xmlns:ns2=\"{ns}\">{message_id}</ns2:MessageID>\
             <ns2:Action xmlns:ns2=\"{ns}\">{action}</ns2:Action>\
             <ns2:To xmlns:ns2=\"{ns}\">{to}</ns2:To>",
            ns = ns::ADDRESSING,
            action = escape(self.action.as_str()),
            to = escape(self.to.as_str()),
        )
    }
}
