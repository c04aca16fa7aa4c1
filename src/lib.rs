//! # homekeep - Named Homes for Game Servers
//!
//! homekeep lets players bookmark named locations ("homes") under their account and return
//! to them later, and lets operators publish shared "global homes" that everyone can visit.
//!
//! ## Features
//!
//! - **Personal homes**: per-account named locations with a configurable limit (-1 = unlimited).
//! - **Global homes**: a shared namespace managed by operators, exempt from limit and cooldown.
//! - **Cooldown**: a minimum number of seconds between personal-home teleports.
//! - **Localized replies**: every message resolves through per-locale catalogs with English fallback.
//! - **Durable storage**: JSON documents rewritten atomically under an exclusive file lock.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use homekeep::commands::{HomeService, Requester};
//! use homekeep::homes::{HomeStore, Location};
//! use homekeep::i18n::{loader, TranslationResolver};
//! use homekeep::config::HomesConfig;
//!
//! let store = HomeStore::new("./data");
//! let (registry, _summary) = store.load();
//! let resolver = TranslationResolver::new(loader::load_catalog_dir("./data/translations".as_ref()));
//! let mut service = HomeService::new(registry, store, resolver, HomesConfig::default());
//!
//! let player = Requester {
//!     account: uuid::Uuid::new_v4(),
//!     locale: "en_US".to_string(),
//!     operator: false,
//!     location: Location::at("world", 10.0, 64.0, -3.0),
//! };
//! let reply = service.execute_line(&player, "sethome base", chrono::Utc::now().timestamp_millis());
//! println!("{}", reply.messages.join("\n"));
//! ```
//!
//! ## Module Organization
//!
//! - [`homes`] - Registry, JSON codec, file store and cooldown tracker
//! - [`i18n`] - Translation catalogs and the fallback resolver
//! - [`commands`] - Command table and the service that runs commands
//! - [`config`] - TOML configuration
//! - [`logutil`] - Helpers for logging user-supplied text
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   Commands      │ ← Pre-checks, rendering, save policy
//! └─────────────────┘
//!     │         │
//! ┌────────┐ ┌──────────────┐
//! │ Homes  │ │ i18n         │ ← Registry + cooldown / catalogs
//! └────────┘ └──────────────┘
//!     │
//! ┌─────────────────┐
//! │   Store/Codec   │ ← JSON documents on disk
//! └─────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod homes;
pub mod i18n;
pub mod logutil;
