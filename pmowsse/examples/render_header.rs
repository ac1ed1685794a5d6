//! Affiche un en-tête WS-Security construit depuis un fichier de configuration
//!
//! Usage:
//!   cargo run --example render_header -- [config.yaml]
//!
//! Sans argument, `pmowsse.yaml` est cherché dans le répertoire courant ; les
//! variables `PMOWSSE__*` surchargent la configuration.

use anyhow::Result;
use pmowsse::WsseConfig;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Logs sur stderr pour garder stdout propre
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "pmowsse.yaml".to_string());

    let security = WsseConfig::load(&path)?.into_security()?;
    println!("{}", security.to_xml());

    Ok(())
}
