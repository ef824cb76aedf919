//! Book catalog data models with a community moderation ledger.
//!
//! Every catalog entity carries an approval status. Status changes go through
//! [`moderation::ModerationLedger`], which keeps an append-only history of
//! transitions for any entity kind.

pub mod app_config;
pub mod db;
pub mod moderation;
pub mod orm;

use env_logger::Env;

/// Initialize logging. Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info")).try_init();
}
