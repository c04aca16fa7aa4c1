//! The closed set of home commands and their shared pre-check metadata.

/// Which operation a command name maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    SetHome,
    DelHome,
    Home,
    Homes,
    HomeCount,
    HomeCooldown,
    SetGlobalHome,
    GlobalHome,
    GlobalHomes,
    DelGlobalHome,
}

/// Home namespace a command's argument completes against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Personal,
    Global,
}

#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub kind: CommandKind,
    /// Exact number of arguments accepted.
    pub arity: usize,
    /// Requires an operator requester.
    pub privileged: bool,
    pub usage_key: &'static str,
    pub completes: Option<Namespace>,
}

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "sethome",
        aliases: &[],
        kind: CommandKind::SetHome,
        arity: 1,
        privileged: false,
        usage_key: "usage.sethome",
        completes: None,
    },
    CommandSpec {
        name: "delhome",
        aliases: &[],
        kind: CommandKind::DelHome,
        arity: 1,
        privileged: false,
        usage_key: "usage.delhome",
        completes: Some(Namespace::Personal),
    },
    CommandSpec {
        name: "home",
        aliases: &[],
        kind: CommandKind::Home,
        arity: 1,
        privileged: false,
        usage_key: "usage.home",
        completes: Some(Namespace::Personal),
    },
    CommandSpec {
        name: "homes",
        aliases: &[],
        kind: CommandKind::Homes,
        arity: 0,
        privileged: false,
        usage_key: "usage.homes",
        completes: None,
    },
    CommandSpec {
        name: "homecount",
        aliases: &[],
        kind: CommandKind::HomeCount,
        arity: 1,
        privileged: true,
        usage_key: "usage.homecount",
        completes: None,
    },
    CommandSpec {
        name: "homecooldown",
        aliases: &[],
        kind: CommandKind::HomeCooldown,
        arity: 1,
        privileged: true,
        usage_key: "usage.homecooldown",
        completes: None,
    },
    CommandSpec {
        name: "setglobalhome",
        aliases: &[],
        kind: CommandKind::SetGlobalHome,
        arity: 1,
        privileged: true,
        usage_key: "usage.setglobalhome",
        completes: None,
    },
    CommandSpec {
        name: "globalhome",
        aliases: &[],
        kind: CommandKind::GlobalHome,
        arity: 1,
        privileged: false,
        usage_key: "usage.globalhome",
        completes: Some(Namespace::Global),
    },
    CommandSpec {
        name: "globalhomes",
        aliases: &[],
        kind: CommandKind::GlobalHomes,
        arity: 0,
        privileged: false,
        usage_key: "usage.globalhomes",
        completes: None,
    },
    CommandSpec {
        name: "delglobalhome",
        aliases: &["dgh"],
        kind: CommandKind::DelGlobalHome,
        arity: 1,
        privileged: true,
        usage_key: "usage.delglobalhome",
        completes: Some(Namespace::Global),
    },
];

/// Find a command by name or alias, ignoring case and a leading `/`.
pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    let wanted = name.trim().trim_start_matches('/').to_ascii_lowercase();
    COMMANDS
        .iter()
        .find(|spec| spec.name == wanted || spec.aliases.contains(&wanted.as_str()))
}
