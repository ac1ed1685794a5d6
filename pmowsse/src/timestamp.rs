//! Horodatage `wsu:Timestamp`

use chrono::{DateTime, Duration, Utc};

/// Durée de validité d'un horodatage (secondes)
pub const TIMESTAMP_TTL_SECS: i64 = 600;

const WSU_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Formate un instant UTC en `YYYY-MM-DDTHH:MM:SSZ` (sans fraction de seconde)
pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.format(WSU_DATE_FORMAT).to_string()
}

/// Couple Created / Expires d'un rendu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    pub created: String,
    pub expires: String,
}

impl Timestamp {
    /// Horodatage démarrant à `now` et expirant [`TIMESTAMP_TTL_SECS`] plus tard
    ///
    /// L'expiration sature à `DateTime::<Utc>::MAX_UTC`.
    pub fn at(now: DateTime<Utc>) -> Self {
        let expires = now
            .checked_add_signed(Duration::seconds(TIMESTAMP_TTL_SECS))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            created: format_instant(now),
            expires: format_instant(expires),
        }
    }

    /// Construit l'élément `wsu:Timestamp`
    pub fn to_xml(&self) -> String {
        format!(
            "<wsu:Timestamp wsu:Id=\"Timestamp-{created}\">\
             <wsu:Created>{created}</wsu:Created>\
             <wsu:Expires>{expires}</wsu:Expires>\
             </wsu:Timestamp>",
            created = self.created,
            expires = self.expires,
        )
    }
}
