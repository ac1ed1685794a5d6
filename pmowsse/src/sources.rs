//! Horloge et source d'aléa injectables
//!
//! Le rendu d'un en-tête lit l'heure courante et consomme de l'aléa (graine du
//! nonce, MessageID). Ces deux dépendances passent par les traits [`Clock`] et
//! [`RandomSource`] afin de pouvoir rendre des en-têtes reproductibles.

use chrono::{DateTime, Utc};
use rand::Rng;
use uuid::Uuid;

/// Fournit l'instant courant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Fournit l'aléa consommé par un rendu
pub trait RandomSource: Send + Sync {
    /// Graine dans `[0, 1)` utilisée pour dériver le nonce
    fn nonce_seed(&self) -> f64;

    /// Identifiant du message WS-Addressing
    fn message_id(&self) -> Uuid;
}

/// Horloge système (UTC)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Aléa du générateur thread-local de `rand` et UUID v4
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn nonce_seed(&self) -> f64 {
        rand::rng().random::<f64>()
    }

    fn message_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Horloge figée
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Aléa figé
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom {
    pub seed: f64,
    pub message_id: Uuid,
}

impl RandomSource for FixedRandom {
    fn nonce_seed(&self) -> f64 {
        self.seed
    }

    fn message_id(&self) -> Uuid {
        self.message_id
    }
}
