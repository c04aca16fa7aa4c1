//! In-memory home registry.
//!
//! The registry is the authoritative copy of every personal and global home for the lifetime
//! of the process. It only touches its own maps; writing them back to disk is the job of
//! [`HomeStore`](crate::homes::store::HomeStore).

use std::collections::HashMap;

use log::debug;
use uuid::Uuid;

use crate::homes::errors::HomeError;
use crate::homes::types::{HomeCapacity, HomeName, Location};

pub type PersonalHomes = HashMap<Uuid, HashMap<HomeName, Location>>;
pub type GlobalHomes = HashMap<HomeName, Location>;

#[derive(Debug, Default, Clone)]
pub struct HomeRegistry {
    personal: PersonalHomes,
    global: GlobalHomes,
}

impl HomeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from previously decoded documents.
    pub fn from_parts(personal: PersonalHomes, global: GlobalHomes) -> Self {
        Self { personal, global }
    }

    pub fn personal(&self) -> &PersonalHomes {
        &self.personal
    }

    pub fn global(&self) -> &GlobalHomes {
        &self.global
    }

    /// Insert or overwrite a personal home.
    ///
    /// The capacity check runs before the insert and counts the account's current homes,
    /// so an account at its limit cannot overwrite an existing name either.
    pub fn set_personal_home(
        &mut self,
        account: Uuid,
        name: &HomeName,
        location: Location,
        capacity: HomeCapacity,
    ) -> Result<(), HomeError> {
        let current = self.personal_home_count(account);
        if capacity.is_full(current) {
            if let HomeCapacity::Limited(max) = capacity {
                return Err(HomeError::CapacityExceeded { max });
            }
        }

        self.personal
            .entry(account)
            .or_default()
            .insert(name.clone(), location);
        debug!("Set personal home '{}' for {}", name, account);
        Ok(())
    }

    /// Remove a personal home, returning the location it pointed at.
    pub fn delete_personal_home(
        &mut self,
        account: Uuid,
        name: &HomeName,
    ) -> Result<Location, HomeError> {
        let homes = self
            .personal
            .get_mut(&account)
            .ok_or_else(|| HomeError::NotFound(name.to_string()))?;
        let removed = homes
            .remove(name)
            .ok_or_else(|| HomeError::NotFound(name.to_string()))?;
        if homes.is_empty() {
            self.personal.remove(&account);
        }
        debug!("Deleted personal home '{}' for {}", name, account);
        Ok(removed)
    }

    pub fn personal_home(&self, account: Uuid, name: &HomeName) -> Result<&Location, HomeError> {
        self.personal
            .get(&account)
            .and_then(|homes| homes.get(name))
            .ok_or_else(|| HomeError::NotFound(name.to_string()))
    }

    /// Names of the account's homes in no particular order.
    pub fn personal_home_names(&self, account: Uuid) -> Vec<HomeName> {
        self.personal
            .get(&account)
            .map(|homes| homes.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn personal_home_count(&self, account: Uuid) -> usize {
        self.personal.get(&account).map_or(0, HashMap::len)
    }

    /// Number of accounts holding at least one personal home.
    pub fn account_count(&self) -> usize {
        self.personal.len()
    }

    /// Insert or overwrite a global home. Global homes have no capacity limit.
    pub fn set_global_home(&mut self, name: &HomeName, location: Location) {
        self.global.insert(name.clone(), location);
        debug!("Set global home '{}'", name);
    }

    pub fn delete_global_home(&mut self, name: &HomeName) -> Result<Location, HomeError> {
        let removed = self
            .global
            .remove(name)
            .ok_or_else(|| HomeError::NotFound(name.to_string()))?;
        debug!("Deleted global home '{}'", name);
        Ok(removed)
    }

    pub fn global_home(&self, name: &HomeName) -> Result<&Location, HomeError> {
        self.global
            .get(name)
            .ok_or_else(|| HomeError::NotFound(name.to_string()))
    }

    pub fn global_home_names(&self) -> Vec<HomeName> {
        self.global.keys().cloned().collect()
    }

    pub fn global_home_count(&self) -> usize {
        self.global.len()
    }
}
