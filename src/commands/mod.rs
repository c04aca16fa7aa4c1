//! Home command surface.
//!
//! Each user command maps to exactly one registry or cooldown operation through the
//! [`table::COMMANDS`] lookup. Privilege and argument count are checked once, up front, for
//! every command; the operation then runs and its outcome is rendered as localized text.
//!
//! | command          | args | operator | operation                        |
//! |------------------|------|----------|----------------------------------|
//! | `sethome`        | 1    |          | set personal home                |
//! | `delhome`        | 1    |          | delete personal home             |
//! | `home`           | 1    |          | personal teleport (cooldown)     |
//! | `homes`          | 0    |          | list personal homes              |
//! | `homecount`      | 1    | yes      | set max homes (-1 = unlimited)   |
//! | `homecooldown`   | 1    | yes      | set cooldown (-1..=60)           |
//! | `setglobalhome`  | 1    | yes      | set global home                  |
//! | `globalhome`     | 1    |          | global teleport (no cooldown)    |
//! | `globalhomes`    | 0    |          | list global homes                |
//! | `delglobalhome`  | 1    | yes      | delete global home (alias `dgh`) |

pub mod service;
pub mod table;

pub use service::{HomeService, Reply, Requester};
pub use table::{lookup, CommandKind, CommandSpec, Namespace, COMMANDS};
