//! Per-account teleport cooldown.
//!
//! Timestamps live in memory only and start empty on every process start.

use std::collections::HashMap;

use uuid::Uuid;

use crate::homes::errors::HomeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownStatus {
    Ready,
    /// Seconds left until the next personal teleport is allowed.
    Wait(i64),
}

impl CooldownStatus {
    pub fn into_result(self) -> Result<(), HomeError> {
        match self {
            CooldownStatus::Ready => Ok(()),
            CooldownStatus::Wait(remaining_secs) => Err(HomeError::OnCooldown { remaining_secs }),
        }
    }
}

#[derive(Debug, Default)]
pub struct CooldownTracker {
    last_use_millis: HashMap<Uuid, i64>,
}

impl CooldownTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether `account` may teleport now and record the use if so.
    ///
    /// A cooldown of zero or less disables the check and records nothing. While waiting,
    /// the stored timestamp is left alone so the window is not extended.
    pub fn check_and_record(
        &mut self,
        account: Uuid,
        cooldown_seconds: i64,
        now_millis: i64,
    ) -> CooldownStatus {
        if cooldown_seconds <= 0 {
            return CooldownStatus::Ready;
        }

        if let Some(&last) = self.last_use_millis.get(&account) {
            let remaining = (last / 1000 + cooldown_seconds) - now_millis / 1000;
            if remaining > 0 {
                return CooldownStatus::Wait(remaining);
            }
        }

        self.last_use_millis.insert(account, now_millis);
        CooldownStatus::Ready
    }

    pub fn last_use(&self, account: Uuid) -> Option<i64> {
        self.last_use_millis.get(&account).copied()
    }

    pub fn tracked_accounts(&self) -> usize {
        self.last_use_millis.len()
    }
}
