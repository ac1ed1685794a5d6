//! Bloc `AMA_SecurityHostedUser`

use quick_xml::escape::escape;
use serde::Deserialize;

use crate::ns;

/// Identité du poste émetteur, ajoutée après `wsse:Security`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HostedUser {
    pub pseudo_city_code: String,
    pub agent_duty_code: String,
    pub requestor_type: String,
    pub pos_type: String,
}

impl Default for HostedUser {
    fn default() -> Self {
        Self {
            pseudo_city_code: "YVRC4210G".to_string(),
            agent_duty_code: "SU".to_string(),
            requestor_type: "U".to_string(),
            pos_type: "1".to_string(),
        }
    }
}

impl HostedUser {
    pub fn to_xml(&self) -> String {
        format!(
            "<ns4:AMA_SecurityHostedUser xmlns:ns4=\"{ns}\">\
             <ns4:UserID xmlns:ns4=\"{ns}\" POS_Type=\"{pos_type}\" PseudoCityCode=\"{pcc}\" AgentDutyCode=\"{duty}\" RequestorType=\"{requestor}\"/>\
             </ns4:AMA_SecurityHostedUser>",
            ns = ns::AMA_SECURITY,
            pos_type = escape(self.pos_type.as_str()),
            pcc = escape(self.pseudo_city_code.as_str()),
            duty = escape(self.agent_duty_code.as_str()),
            requestor = escape(self.requestor_type.as_str()),
        )
    }
}
