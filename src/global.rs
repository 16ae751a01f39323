//! The process-wide database.
//!
//! Registration runs once, before any reflection-consuming code, and the
//! frozen database is then installed here for the rest of the process:
//!
//! ```no_run
//! use reflex::{AccessSpecifier, NamespaceKey, global};
//!
//! global::register_with(|builder| {
//!     let game = builder.add_namespace(NamespaceKey::ROOT, "game")?;
//!     let base = builder.add_class(game, "Entity", 16)?;
//!     let player = builder.add_class(game, "Player", 32)?;
//!     builder.add_direct_parent(player, base, AccessSpecifier::Public)
//! })
//! .unwrap();
//!
//! let db = global::get().unwrap();
//! assert!(db.get_namespace_by_name("game").is_some());
//! ```

use std::sync::OnceLock;

use thiserror::Error;

use reflex_core::RegistrationError;
use reflex_registry::{Database, DatabaseBuilder};

static DATABASE: OnceLock<Database> = OnceLock::new();

/// Errors raised when installing the process-wide database.
#[derive(Debug, Error)]
pub enum InstallError {
    /// A database is already installed; the rejected one is handed back.
    #[error("a reflection database is already installed")]
    AlreadyInstalled(Box<Database>),

    /// The registration callback failed.
    #[error(transparent)]
    Registration(#[from] RegistrationError),
}

/// Install `db` as the process-wide database. Only the first call succeeds.
pub fn install(db: Database) -> Result<(), InstallError> {
    DATABASE
        .set(db)
        .map_err(|rejected| InstallError::AlreadyInstalled(Box::new(rejected)))?;
    log::info!("installed process-wide reflection database");
    Ok(())
}

/// Run `register` on a fresh builder, freeze it and install the result.
pub fn register_with<F>(register: F) -> Result<(), InstallError>
where
    F: FnOnce(&mut DatabaseBuilder) -> Result<(), RegistrationError>,
{
    let mut builder = DatabaseBuilder::with_fundamentals()?;
    register(&mut builder)?;
    install(builder.build())
}

/// The installed database, if registration has completed.
pub fn get() -> Option<&'static Database> {
    DATABASE.get()
}

pub fn is_installed() -> bool {
    DATABASE.get().is_some()
}
