//! JSON codec for the two home documents.
//!
//! ```text
//! homes.json        { "<account uuid>": { "<home>": { world, x, y, z, yaw, pitch } } }
//! globalhomes.json  { "<home>": { world, x, y, z, yaw, pitch } }
//! ```
//!
//! Decoding is lenient per entry: a bad account id, an empty name or a malformed location
//! skips only that entry and is reported back in [`Decoded::skipped`].

use std::collections::HashMap;

use log::warn;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::homes::errors::HomeError;
use crate::homes::registry::{GlobalHomes, PersonalHomes};
use crate::homes::types::{HomeName, Location};

/// Result of decoding a document: everything that was readable plus what was dropped.
#[derive(Debug, Default)]
pub struct Decoded<T> {
    pub homes: T,
    pub skipped: Vec<HomeError>,
}

fn encode_location(location: &Location) -> Value {
    serde_json::json!({
        "world": location.world,
        "x": location.x,
        "y": location.y,
        "z": location.z,
        "yaw": location.yaw,
        "pitch": location.pitch,
    })
}

fn encode_homes(homes: &HashMap<HomeName, Location>) -> Map<String, Value> {
    homes
        .iter()
        .map(|(name, location)| (name.to_string(), encode_location(location)))
        .collect()
}

pub fn encode_personal(homes: &PersonalHomes) -> Value {
    let accounts: Map<String, Value> = homes
        .iter()
        .filter(|(_, named)| !named.is_empty())
        .map(|(account, named)| (account.to_string(), Value::Object(encode_homes(named))))
        .collect();
    Value::Object(accounts)
}

pub fn encode_global(homes: &GlobalHomes) -> Value {
    Value::Object(encode_homes(homes))
}

fn decode_location(path: &str, value: &Value) -> Result<Location, HomeError> {
    serde_json::from_value::<Location>(value.clone()).map_err(|e| HomeError::corrupt(path, e))
}

fn decode_homes(
    prefix: &str,
    entries: &Map<String, Value>,
    skipped: &mut Vec<HomeError>,
) -> HashMap<HomeName, Location> {
    let mut homes = HashMap::with_capacity(entries.len());
    for (raw_name, value) in entries {
        let path = if prefix.is_empty() {
            raw_name.clone()
        } else {
            format!("{}.{}", prefix, raw_name)
        };
        let decoded = HomeName::new(raw_name)
            .map_err(|e| HomeError::corrupt(path.as_str(), e))
            .and_then(|name| decode_location(&path, value).map(|loc| (name, loc)));
        match decoded {
            Ok((name, _)) if homes.contains_key(&name) => {
                // keys are compared after folding; the first spelling wins
                let e = HomeError::corrupt(
                    path.as_str(),
                    format!("duplicate of home '{}' after case folding", name),
                );
                warn!("Skipping home entry: {}", e);
                skipped.push(e);
            }
            Ok((name, location)) => {
                homes.insert(name, location);
            }
            Err(e) => {
                warn!("Skipping home entry: {}", e);
                skipped.push(e);
            }
        }
    }
    homes
}

/// Decode the personal homes document.
pub fn decode_personal(document: &Value) -> Decoded<PersonalHomes> {
    let mut out = Decoded::<PersonalHomes>::default();
    let Some(accounts) = document.as_object() else {
        let e = HomeError::corrupt("<root>", "personal homes document is not an object");
        warn!("{}", e);
        out.skipped.push(e);
        return out;
    };

    for (raw_account, entries) in accounts {
        let account = match Uuid::parse_str(raw_account) {
            Ok(id) => id,
            Err(e) => {
                let err = HomeError::corrupt(raw_account.as_str(), e);
                warn!("Skipping account: {}", err);
                out.skipped.push(err);
                continue;
            }
        };
        let Some(entries) = entries.as_object() else {
            let err = HomeError::corrupt(raw_account.as_str(), "account entry is not an object");
            warn!("Skipping account: {}", err);
            out.skipped.push(err);
            continue;
        };
        let homes = decode_homes(raw_account, entries, &mut out.skipped);
        if !homes.is_empty() {
            out.homes.entry(account).or_default().extend(homes);
        }
    }
    out
}

/// Decode the global homes document.
pub fn decode_global(document: &Value) -> Decoded<GlobalHomes> {
    let mut out = Decoded::<GlobalHomes>::default();
    match document.as_object() {
        Some(entries) => out.homes = decode_homes("", entries, &mut out.skipped),
        None => {
            let e = HomeError::corrupt("<root>", "global homes document is not an object");
            warn!("{}", e);
            out.skipped.push(e);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn name(raw: &str) -> HomeName {
        HomeName::new(raw).unwrap()
    }

    #[test]
    fn personal_round_trip_preserves_every_field() {
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let mut homes = PersonalHomes::new();
        homes.entry(alice).or_default().insert(
            name("base"),
            Location::new("world", 100.5, 64.0, -20.25, 90.0, -15.5),
        );
        homes.entry(alice).or_default().insert(
            name("mine"),
            Location::new("world_nether", -8.0, 32.0, 8.0, 180.0, 0.0),
        );
        homes
            .entry(bob)
            .or_default()
            .insert(name("farm"), Location::at("world_the_end", 0.0, 70.0, 0.0));

        let doc = encode_personal(&homes);
        let decoded = decode_personal(&doc);
        assert!(decoded.skipped.is_empty());
        assert_eq!(decoded.homes, homes);
    }

    #[test]
    fn empty_accounts_are_not_written() {
        let mut homes = PersonalHomes::new();
        homes.insert(Uuid::new_v4(), HashMap::new());
        assert_eq!(encode_personal(&homes), json!({}));
    }

    #[test]
    fn corrupt_entries_are_skipped_individually() {
        let good = Uuid::new_v4();
        let mut doc = json!({
            "not-a-uuid": { "base": { "world": "w", "x": 1.0, "y": 2.0, "z": 3.0, "yaw": 0.0, "pitch": 0.0 } }
        });
        doc.as_object_mut().unwrap().insert(
            good.to_string(),
            json!({
                "base": { "world": "w", "x": 1.0, "y": 2.0, "z": 3.0, "yaw": 0.0, "pitch": 0.0 },
                "broken": { "world": "w", "x": "east" },
                "   ": { "world": "w", "x": 1.0, "y": 2.0, "z": 3.0, "yaw": 0.0, "pitch": 0.0 }
            }),
        );
        let decoded = decode_personal(&doc);
        assert_eq!(decoded.skipped.len(), 3);
        assert!(decoded
            .skipped
            .iter()
            .all(|e| matches!(e, HomeError::CorruptRecord { .. })));
        assert_eq!(decoded.homes.len(), 1);
        assert_eq!(decoded.homes[&good].len(), 1);
        assert_eq!(
            decoded.homes[&good][&name("base")],
            Location::at("w", 1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn stored_names_are_folded_on_load() {
        let doc = json!({ "Spawn": { "world": "w", "x": 0.0, "y": 64.0, "z": 0.0, "yaw": 0.0, "pitch": 0.0 } });
        let decoded = decode_global(&doc);
        assert!(decoded.homes.contains_key(&name("spawn")));
    }

    #[test]
    fn case_folded_duplicates_are_reported() {
        let account = Uuid::new_v4();
        let mut doc = json!({});
        doc.as_object_mut().unwrap().insert(
            account.to_string(),
            json!({
                "Base": { "world": "w", "x": 1.0, "y": 2.0, "z": 3.0, "yaw": 0.0, "pitch": 0.0 },
                "base": { "world": "w", "x": 9.0, "y": 9.0, "z": 9.0, "yaw": 0.0, "pitch": 0.0 },
                " base ": { "world": "w", "x": 7.0, "y": 7.0, "z": 7.0, "yaw": 0.0, "pitch": 0.0 }
            }),
        );
        let decoded = decode_personal(&doc);
        assert_eq!(decoded.homes[&account].len(), 1);
        assert_eq!(decoded.skipped.len(), 2);
        assert!(decoded.skipped.iter().all(|e| matches!(
            e,
            HomeError::CorruptRecord { reason, .. } if reason.contains("duplicate")
        )));
    }

    /// xorshift64 mapped onto ±30000 with all 53 mantissa bits in play.
    fn coordinates(count: usize) -> Vec<f64> {
        let mut state = 0x9E37_79B9_7F4A_7C15u64;
        (0..count)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                (state >> 11) as f64 / (1u64 << 53) as f64 * 60_000.0 - 30_000.0
            })
            .collect()
    }

    #[test]
    fn full_precision_coordinates_survive_text_round_trip() {
        let account = Uuid::new_v4();
        let mut homes = PersonalHomes::new();
        let named = homes.entry(account).or_default();
        for (i, x) in coordinates(5_000).into_iter().enumerate() {
            named.insert(
                name(&format!("h{}", i)),
                Location::new("w", x, 64.0 + x / 7.0, -x / 3.0, (x / 100.0) as f32, 0.0),
            );
        }

        let text = serde_json::to_string_pretty(&encode_personal(&homes)).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        let decoded = decode_personal(&parsed);
        assert!(decoded.skipped.is_empty());
        for (home, location) in &homes[&account] {
            let back = &decoded.homes[&account][home];
            assert_eq!(back.x.to_bits(), location.x.to_bits(), "{}", home);
            assert_eq!(back.y.to_bits(), location.y.to_bits(), "{}", home);
            assert_eq!(back.z.to_bits(), location.z.to_bits(), "{}", home);
            assert_eq!(back.yaw.to_bits(), location.yaw.to_bits(), "{}", home);
        }
    }

    #[test]
    fn non_object_documents_decode_empty() {
        let decoded = decode_global(&json!(["spawn"]));
        assert!(decoded.homes.is_empty());
        assert_eq!(decoded.skipped.len(), 1);

        let decoded = decode_personal(&json!("oops"));
        assert!(decoded.homes.is_empty());
        assert_eq!(decoded.skipped.len(), 1);
    }

    #[test]
    fn global_round_trip() {
        let mut homes = GlobalHomes::new();
        homes.insert(name("spawn"), Location::new("world", 0.5, 65.0, 0.5, -90.0, 10.0));
        homes.insert(name("market"), Location::at("world", 250.0, 70.0, -40.0));
        let decoded = decode_global(&encode_global(&homes));
        assert!(decoded.skipped.is_empty());
        assert_eq!(decoded.homes, homes);
    }
}
