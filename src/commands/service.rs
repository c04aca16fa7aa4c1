use std::collections::HashMap;

use log::{debug, error, info, warn};
use uuid::Uuid;

use crate::commands::table::{lookup, CommandKind, CommandSpec, Namespace};
use crate::config::{cooldown_in_range, HomesConfig};
use crate::homes::{
    CooldownTracker, HomeCapacity, HomeError, HomeName, HomeRegistry, HomeStore, Location,
};
use crate::i18n::{fill, Catalog, TranslationResolver};
use crate::logutil::{quote_args, quote_user_text};

/// Who is issuing a command and where they currently stand.
#[derive(Debug, Clone)]
pub struct Requester {
    pub account: Uuid,
    /// Raw client language tag, e.g. `de_DE`.
    pub locale: String,
    pub operator: bool,
    pub location: Location,
}

/// Outcome of one command: localized lines plus side effects for the host to apply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reply {
    pub messages: Vec<String>,
    pub teleport: Option<Location>,
    /// `max_homes` or `cooldown_seconds` changed and should be written back to the config.
    pub settings_changed: bool,
}

impl Reply {
    fn say(message: String) -> Self {
        Self {
            messages: vec![message],
            ..Self::default()
        }
    }
}

/// Owns all home state and maps command names onto registry and cooldown operations.
pub struct HomeService {
    registry: HomeRegistry,
    store: HomeStore,
    cooldowns: CooldownTracker,
    resolver: TranslationResolver,
    settings: HomesConfig,
}

impl HomeService {
    pub fn new(
        registry: HomeRegistry,
        store: HomeStore,
        resolver: TranslationResolver,
        settings: HomesConfig,
    ) -> Self {
        Self {
            registry,
            store,
            cooldowns: CooldownTracker::new(),
            resolver,
            settings,
        }
    }

    pub fn registry(&self) -> &HomeRegistry {
        &self.registry
    }

    pub fn resolver(&self) -> &TranslationResolver {
        &self.resolver
    }

    pub fn settings(&self) -> HomesConfig {
        self.settings
    }

    pub fn reload_translations(&mut self, catalogs: HashMap<String, Catalog>) {
        self.resolver.replace_catalogs(catalogs);
        info!("Translations reloaded: {}", self.resolver.locales().join(", "));
    }

    /// Write both documents, e.g. on shutdown.
    pub fn save_all(&self) -> Result<(), HomeError> {
        self.store.save_personal(&self.registry)?;
        self.store.save_global(&self.registry)
    }

    fn text(&self, requester: &Requester, key: &str, args: &[(&str, String)]) -> String {
        fill(&self.resolver.resolve(&requester.locale, key), args)
    }

    /// Run a raw command line such as `/home base`.
    pub fn execute_line(&mut self, requester: &Requester, line: &str, now_millis: i64) -> Reply {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            return Reply::default();
        };
        let args: Vec<&str> = parts.collect();
        self.execute(requester, command, &args, now_millis)
    }

    /// Run one command. `now_millis` is the current time in epoch milliseconds.
    pub fn execute(
        &mut self,
        requester: &Requester,
        command: &str,
        args: &[&str],
        now_millis: i64,
    ) -> Reply {
        let Some(spec) = lookup(command) else {
            return Reply::say(self.text(
                requester,
                "unknown_command",
                &[("command", command.to_string())],
            ));
        };
        debug!("{} -> {} {}", requester.account, spec.name, quote_args(args));

        if let Some(denied) = self.precheck(requester, spec, args) {
            return denied;
        }

        match spec.kind {
            CommandKind::SetHome => self.with_name(requester, spec, args[0], Self::set_home),
            CommandKind::DelHome => self.with_name(requester, spec, args[0], Self::delete_home),
            CommandKind::Home => self.with_name(requester, spec, args[0], |svc, req, name| {
                svc.teleport_home(req, name, now_millis)
            }),
            CommandKind::Homes => self.list_homes(requester),
            CommandKind::HomeCount => self.set_max_homes(requester, args[0]),
            CommandKind::HomeCooldown => self.set_cooldown(requester, args[0]),
            CommandKind::SetGlobalHome => {
                self.with_name(requester, spec, args[0], Self::set_global_home)
            }
            CommandKind::GlobalHome => {
                self.with_name(requester, spec, args[0], Self::teleport_global)
            }
            CommandKind::GlobalHomes => self.list_global_homes(requester),
            CommandKind::DelGlobalHome => {
                self.with_name(requester, spec, args[0], Self::delete_global_home)
            }
        }
    }

    /// Privilege then arity; shared by every command.
    fn precheck(&self, requester: &Requester, spec: &CommandSpec, args: &[&str]) -> Option<Reply> {
        if spec.privileged && !requester.operator {
            info!(
                "Denied {} for non-operator {}",
                spec.name, requester.account
            );
            return Some(Reply::say(self.text(requester, "no_permission", &[])));
        }
        if args.len() != spec.arity {
            return Some(Reply::say(self.text(requester, spec.usage_key, &[])));
        }
        None
    }

    fn with_name(
        &mut self,
        requester: &Requester,
        spec: &CommandSpec,
        raw: &str,
        op: impl FnOnce(&mut Self, &Requester, HomeName) -> Reply,
    ) -> Reply {
        match HomeName::new(raw) {
            Ok(name) => op(self, requester, name),
            Err(_) => Reply::say(self.text(requester, spec.usage_key, &[])),
        }
    }

    fn persist_personal(&self) {
        if let Err(e) = self.store.save_personal(&self.registry) {
            error!("Could not save personal homes: {}", e);
        }
    }

    fn persist_global(&self) {
        if let Err(e) = self.store.save_global(&self.registry) {
            error!("Could not save global homes: {}", e);
        }
    }

    /// Refuse to store a position the documents cannot represent.
    fn reject_unstorable(&self, requester: &Requester) -> Option<Reply> {
        if requester.location.is_finite() {
            return None;
        }
        warn!(
            "{} tried to save a non-finite position {}",
            requester.account, requester.location
        );
        Some(Reply::say(self.text(requester, "location.invalid", &[])))
    }

    fn failure_reply(&self, requester: &Requester, e: &HomeError) -> Reply {
        error!("Home operation failed for {}: {}", requester.account, e);
        Reply::say(self.text(requester, "error.internal", &[]))
    }

    fn set_home(&mut self, requester: &Requester, name: HomeName) -> Reply {
        if let Some(refused) = self.reject_unstorable(requester) {
            return refused;
        }
        let capacity = HomeCapacity::from_setting(self.settings.max_homes);
        match self.registry.set_personal_home(
            requester.account,
            &name,
            requester.location.clone(),
            capacity,
        ) {
            Ok(()) => {
                self.persist_personal();
                Reply::say(self.text(requester, "home.set", &[("home", name.to_string())]))
            }
            Err(HomeError::CapacityExceeded { max }) => Reply::say(self.text(
                requester,
                "homes.limit.reached",
                &[("max", max.to_string())],
            )),
            Err(e) => self.failure_reply(requester, &e),
        }
    }

    fn delete_home(&mut self, requester: &Requester, name: HomeName) -> Reply {
        match self.registry.delete_personal_home(requester.account, &name) {
            Ok(_) => {
                self.persist_personal();
                Reply::say(self.text(requester, "home.deleted", &[("home", name.to_string())]))
            }
            Err(_) => {
                Reply::say(self.text(requester, "home.not_exist", &[("home", name.to_string())]))
            }
        }
    }

    fn teleport_home(&mut self, requester: &Requester, name: HomeName, now_millis: i64) -> Reply {
        let target = match self.registry.personal_home(requester.account, &name) {
            Ok(location) => location.clone(),
            Err(_) => {
                return Reply::say(self.text(
                    requester,
                    "home.not_exist",
                    &[("home", name.to_string())],
                ))
            }
        };

        let status = self.cooldowns.check_and_record(
            requester.account,
            self.settings.cooldown_seconds,
            now_millis,
        );
        if let Err(HomeError::OnCooldown { remaining_secs }) = status.into_result() {
            return Reply::say(self.text(
                requester,
                "home.cooldown",
                &[("time", remaining_secs.to_string())],
            ));
        }

        Reply {
            messages: vec![self.text(requester, "home.teleport", &[("home", name.to_string())])],
            teleport: Some(target),
            settings_changed: false,
        }
    }

    fn list_homes(&self, requester: &Requester) -> Reply {
        let mut names = self.registry.personal_home_names(requester.account);
        if names.is_empty() {
            return Reply::say(self.text(requester, "homes.none", &[]));
        }
        names.sort();

        let max = match HomeCapacity::from_setting(self.settings.max_homes) {
            HomeCapacity::Unlimited => self.text(requester, "homes.unlimited", &[]),
            HomeCapacity::Limited(max) => max.to_string(),
        };
        let joined = names.iter().map(HomeName::as_str).collect::<Vec<_>>().join(", ");
        Reply {
            messages: vec![
                self.text(
                    requester,
                    "homes.list.header",
                    &[("current", names.len().to_string()), ("max", max)],
                ),
                self.text(requester, "homes.list.items", &[("homes", joined)]),
            ],
            ..Reply::default()
        }
    }

    fn set_max_homes(&mut self, requester: &Requester, raw: &str) -> Reply {
        let max_homes = match raw.trim().parse::<i64>() {
            Ok(value) if value >= -1 => value,
            _ => return Reply::say(self.text(requester, "invalid_number", &[])),
        };
        self.settings.max_homes = max_homes;
        info!("{} set max homes to {}", requester.account, max_homes);
        Reply {
            messages: vec![self.text(
                requester,
                "homes.limit.set",
                &[("max", max_homes.to_string())],
            )],
            teleport: None,
            settings_changed: true,
        }
    }

    fn set_cooldown(&mut self, requester: &Requester, raw: &str) -> Reply {
        let Ok(seconds) = raw.trim().parse::<i64>() else {
            return Reply::say(self.text(requester, "invalid_number", &[]));
        };
        if !cooldown_in_range(seconds) {
            return Reply::say(self.text(requester, "cooldown.range", &[]));
        }
        self.settings.cooldown_seconds = seconds;
        info!("{} set home cooldown to {}s", requester.account, seconds);

        let message = if seconds == -1 {
            self.text(requester, "cooldown.disabled", &[])
        } else {
            self.text(requester, "cooldown.set", &[("time", seconds.to_string())])
        };
        Reply {
            messages: vec![message],
            teleport: None,
            settings_changed: true,
        }
    }

    fn set_global_home(&mut self, requester: &Requester, name: HomeName) -> Reply {
        if let Some(refused) = self.reject_unstorable(requester) {
            return refused;
        }
        self.registry
            .set_global_home(&name, requester.location.clone());
        self.persist_global();
        info!(
            "{} set global home {}",
            requester.account,
            quote_user_text(name.as_str())
        );
        Reply::say(self.text(requester, "globalhome.set", &[("home", name.to_string())]))
    }

    fn teleport_global(&mut self, requester: &Requester, name: HomeName) -> Reply {
        match self.registry.global_home(&name) {
            Ok(location) => Reply {
                messages: vec![self.text(
                    requester,
                    "globalhome.teleport",
                    &[("home", name.to_string())],
                )],
                teleport: Some(location.clone()),
                settings_changed: false,
            },
            Err(_) => Reply::say(self.text(
                requester,
                "globalhome.not_exist",
                &[("home", name.to_string())],
            )),
        }
    }

    fn list_global_homes(&self, requester: &Requester) -> Reply {
        let mut names = self.registry.global_home_names();
        if names.is_empty() {
            return Reply::say(self.text(requester, "globalhomes.none", &[]));
        }
        names.sort();
        let joined = names.iter().map(HomeName::as_str).collect::<Vec<_>>().join(", ");
        Reply {
            messages: vec![
                self.text(requester, "globalhomes.list.header", &[]),
                self.text(requester, "globalhomes.list.items", &[("homes", joined)]),
            ],
            ..Reply::default()
        }
    }

    fn delete_global_home(&mut self, requester: &Requester, name: HomeName) -> Reply {
        match self.registry.delete_global_home(&name) {
            Ok(_) => {
                self.persist_global();
                info!(
                    "{} deleted global home {}",
                    requester.account,
                    quote_user_text(name.as_str())
                );
                Reply::say(self.text(
                    requester,
                    "globalhome.deleted",
                    &[("home", name.to_string())],
                ))
            }
            Err(_) => Reply::say(self.text(
                requester,
                "globalhome.not_exist",
                &[("home", name.to_string())],
            )),
        }
    }

    /// Tab-completion candidates for the argument of `command`.
    pub fn complete(&self, requester: &Requester, command: &str, partial: &str) -> Vec<String> {
        let Some(namespace) = lookup(command).and_then(|spec| spec.completes) else {
            return Vec::new();
        };
        let names = match namespace {
            Namespace::Personal => self.registry.personal_home_names(requester.account),
            Namespace::Global => self.registry.global_home_names(),
        };
        let prefix = partial.to_lowercase();
        let mut matches: Vec<String> = names
            .into_iter()
            .filter(|name| name.as_str().starts_with(&prefix))
            .map(|name| name.to_string())
            .collect();
        matches.sort();
        matches
    }
}
