//! Home registry core: data types, the in-memory registry, its JSON codec, file-backed
//! store and the per-account teleport cooldown.

pub mod codec;
pub mod cooldown;
pub mod errors;
pub mod registry;
pub mod store;
pub mod types;

pub use codec::{decode_global, decode_personal, encode_global, encode_personal, Decoded};
pub use cooldown::{CooldownStatus, CooldownTracker};
pub use errors::HomeError;
pub use registry::{GlobalHomes, HomeRegistry, PersonalHomes};
pub use store::{HomeStore, LoadSummary};
pub use types::{HomeCapacity, HomeName, Location};
