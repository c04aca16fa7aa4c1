//! English catalog compiled into the binary. Installed whenever no `en` catalog is found on disk.

use super::Catalog;

pub const BUNDLED_LOCALE: &str = "en";

const CATALOG_EN: &[(&str, &str)] = &[
    ("unknown_command", "Unknown command: {command}"),
    ("no_permission", "You do not have permission to use this command."),
    ("invalid_number", "Please enter a valid number."),
    ("location.invalid", "Your current position cannot be saved as a home."),
    ("error.internal", "Something went wrong; the home was not changed."),
    ("usage.sethome", "Usage: /sethome <name>"),
    ("usage.delhome", "Usage: /delhome <name>"),
    ("usage.home", "Usage: /home <name>"),
    ("usage.homes", "Usage: /homes"),
    ("usage.homecount", "Usage: /homecount <number> (-1 for unlimited)"),
    ("usage.homecooldown", "Usage: /homecooldown <seconds> (-1 to disable)"),
    ("usage.setglobalhome", "Usage: /setglobalhome <name>"),
    ("usage.globalhome", "Usage: /globalhome <name>"),
    ("usage.globalhomes", "Usage: /globalhomes"),
    ("usage.delglobalhome", "Usage: /delglobalhome <name>"),
    ("home.set", "Home '{home}' has been set."),
    ("home.deleted", "Home '{home}' has been deleted."),
    ("home.not_exist", "Home '{home}' does not exist."),
    ("home.teleport", "Teleported to home '{home}'."),
    ("home.cooldown", "You must wait {time} more second(s) before teleporting home again."),
    ("homes.none", "You have no homes set."),
    ("homes.unlimited", "unlimited"),
    ("homes.list.header", "Your homes ({current}/{max}):"),
    ("homes.list.items", "{homes}"),
    ("homes.limit.reached", "You have reached the maximum of {max} home(s)."),
    ("homes.limit.set", "Maximum homes per player set to {max}."),
    ("cooldown.range", "The cooldown must be between -1 and 60 seconds."),
    ("cooldown.disabled", "Home cooldown disabled."),
    ("cooldown.set", "Home cooldown set to {time} second(s)."),
    ("globalhome.set", "Global home '{home}' has been set."),
    ("globalhome.deleted", "Global home '{home}' has been deleted."),
    ("globalhome.not_exist", "Global home '{home}' does not exist."),
    ("globalhome.teleport", "Teleported to global home '{home}'."),
    ("globalhomes.none", "No global homes have been set."),
    ("globalhomes.list.header", "Global homes:"),
    ("globalhomes.list.items", "{homes}"),
];

/// Build the bundled English catalog.
pub fn bundled_en() -> Catalog {
    CATALOG_EN
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect()
}
