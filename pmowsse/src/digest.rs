//! Condensé de mot de passe WS-Security (`PasswordDigest`)

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use sha1::{Digest, Sha1};

/// Calcule le `PasswordDigest` d'un UsernameToken
///
/// `Base64(SHA-1(nonce + created + SHA-1(password)))`, où `SHA-1(password)`
/// est le condensé brut (20 octets) et non sa forme hexadécimale.
///
/// # Arguments
///
/// * `nonce` - Nonce brut (non encodé)
/// * `created` - Horodatage `wsu:Created` tel qu'émis dans le jeton
/// * `password` - Mot de passe en clair
///
/// # Returns
///
/// Condensé encodé en base64 (toujours 28 caractères)
pub fn password_digest(nonce: &[u8], created: &str, password: &str) -> String {
    let password_hash = Sha1::digest(password.as_bytes());

    let mut hasher = Sha1::new();
    hasher.update(nonce);
    hasher.update(created.as_bytes());
    hasher.update(password_hash);

    BASE64.encode(hasher.finalize())
}
