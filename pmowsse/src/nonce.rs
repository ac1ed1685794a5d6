//! Nonce du UsernameToken

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use sha1::{Digest, Sha1};

/// Longueur du nonce brut (octets)
pub const NONCE_LEN: usize = 16;

/// Nonce à usage unique
///
/// Dérivé de SHA-1(created + graine aléatoire), tronqué à [`NONCE_LEN`] octets.
/// La solidité du nonce dépend entièrement de la graine fournie par la
/// [`RandomSource`](crate::RandomSource).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nonce {
    raw: Vec<u8>,
}

impl Nonce {
    /// Dérive un nonce à partir de l'horodatage et d'une graine
    pub fn derive(created: &str, seed: f64) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(created.as_bytes());
        hasher.update(seed.to_string().as_bytes());
        let hash = hasher.finalize();

        Self {
            raw: hash[..NONCE_LEN].to_vec(),
        }
    }

    /// Octets bruts, utilisés comme entrée du `PasswordDigest`
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Forme base64 émise dans `wsse:Nonce`
    pub fn encoded(&self) -> String {
        BASE64.encode(&self.raw)
    }
}
