//! Test utilities & fixtures.
//! Builds a home service over a throwaway data directory.

use std::path::{Path, PathBuf};

use homekeep::commands::{HomeService, Requester};
use homekeep::config::HomesConfig;
use homekeep::homes::{HomeStore, Location};
use homekeep::i18n::{loader, TranslationResolver};
use uuid::Uuid;

/// Return the path to the shipped sample translations.
pub fn fixture_translations() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("translations")
}

/// Load a service from `data_dir`, with the sample translations.
pub fn service_in(data_dir: &Path, settings: HomesConfig) -> HomeService {
    let store = HomeStore::new(data_dir);
    let (registry, _summary) = store.load();
    let resolver = TranslationResolver::new(loader::load_catalog_dir(&fixture_translations()));
    HomeService::new(registry, store, resolver, settings)
}

#[allow(dead_code)]
pub fn player(locale: &str) -> Requester {
    Requester {
        account: Uuid::new_v4(),
        locale: locale.to_string(),
        operator: false,
        location: Location::at("world", 12.5, 64.0, -40.0),
    }
}

#[allow(dead_code)]
pub fn operator(locale: &str) -> Requester {
    Requester {
        operator: true,
        ..player(locale)
    }
}

#[allow(dead_code)]
pub fn settings(max_homes: i64, cooldown_seconds: i64) -> HomesConfig {
    HomesConfig {
        max_homes,
        cooldown_seconds,
    }
}
