//! Mock client for testing and offline demos
//!
//! Serves records from memory without making real requests.
//! Failures and latency can be injected per Pokémon.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{normalize_identifier, PokemonApi};
use crate::config::DEFAULT_SPRITE_URL;
use crate::error::{PokedexError, Result};
use crate::model::{DetailRecord, ListEntry, NamedResource, Sprites, StatValue, TypeSlot};

/// In-memory PokéAPI
pub struct MockPokemonApi {
    /// Records in dex order
    records: Vec<DetailRecord>,
    /// Names whose detail request answers HTTP 500
    failing: Mutex<HashSet<String>>,
    /// Status returned by every listing request when set
    listing_status: Mutex<Option<u16>>,
    /// Artificial latency per name
    delays: Mutex<HashMap<String, Duration>>,
    /// Track all detail requests made (for assertions)
    detail_requests: Mutex<Vec<String>>,
    listing_calls: AtomicUsize,
}

impl MockPokemonApi {
    pub fn new(records: Vec<DetailRecord>) -> Self {
        Self {
            records,
            failing: Mutex::new(HashSet::new()),
            listing_status: Mutex::new(None),
            delays: Mutex::new(HashMap::new()),
            detail_requests: Mutex::new(Vec::new()),
            listing_calls: AtomicUsize::new(0),
        }
    }

    /// Bundled first-generation sample used by `--demo`
    pub fn demo() -> Self {
        Self::new(demo_records())
    }

    /// Make the detail request for `name` fail with HTTP 500
    pub fn fail_detail(&self, name: &str) {
        self.failing.lock().unwrap().insert(normalize_identifier(name));
    }

    /// Make every listing request fail with `status`
    pub fn fail_listing(&self, status: u16) {
        *self.listing_status.lock().unwrap() = Some(status);
    }

    /// Delay the detail response for `name`
    pub fn delay_detail(&self, name: &str, delay: Duration) {
        self.delays
            .lock()
            .unwrap()
            .insert(normalize_identifier(name), delay);
    }

    /// Identifiers of all detail requests made so far
    pub fn detail_requests(&self) -> Vec<String> {
        self.detail_requests.lock().unwrap().clone()
    }

    pub fn listing_calls(&self) -> usize {
        self.listing_calls.load(Ordering::SeqCst)
    }

    fn find(&self, id: &str) -> Option<&DetailRecord> {
        match id.parse::<u32>() {
            Ok(n) => self.records.iter().find(|r| r.id == n),
            Err(_) => self.records.iter().find(|r| r.name == id),
        }
    }
}

#[async_trait]
impl PokemonApi for MockPokemonApi {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_listing(&self, offset: u32, limit: u32) -> Result<Vec<ListEntry>> {
        self.listing_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(status) = *self.listing_status.lock().unwrap() {
            return Err(PokedexError::Network {
                status,
                url: format!("mock://pokemon?offset={}&limit={}", offset, limit),
            });
        }

        Ok(self
            .records
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|r| {
                ListEntry::new(
                    r.name.clone(),
                    format!("https://pokeapi.co/api/v2/pokemon/{}/", r.id),
                )
            })
            .collect())
    }

    async fn fetch_detail(&self, identifier: &str) -> Result<DetailRecord> {
        let id = normalize_identifier(identifier);
        self.detail_requests.lock().unwrap().push(id.clone());

        let delay = self.delays.lock().unwrap().get(&id).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.lock().unwrap().contains(&id) {
            return Err(PokedexError::Network {
                status: 500,
                url: format!("mock://pokemon/{}", id),
            });
        }

        self.find(&id)
            .cloned()
            .ok_or(PokedexError::NotFound { identifier: id })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Demo dataset
// ─────────────────────────────────────────────────────────────────────────────

const STAT_NAMES: [&str; 6] = [
    "hp",
    "attack",
    "defense",
    "special-attack",
    "special-defense",
    "speed",
];

fn named(name: &str) -> NamedResource {
    NamedResource {
        name: name.to_string(),
        url: String::new(),
    }
}

fn demo_record(
    id: u32,
    name: &str,
    types: &[&str],
    weight: u32,
    height: u32,
    stats: [u32; 6],
) -> DetailRecord {
    DetailRecord {
        id,
        name: name.to_string(),
        types: types
            .iter()
            .zip(1u8..)
            .map(|(t, slot)| TypeSlot {
                slot,
                kind: named(t),
            })
            .collect(),
        stats: STAT_NAMES
            .iter()
            .zip(stats)
            .map(|(stat, base_stat)| StatValue {
                base_stat,
                stat: named(stat),
            })
            .collect(),
        weight,
        height,
        sprites: Sprites {
            front_default: Some(format!("{}/{}.png", DEFAULT_SPRITE_URL, id)),
        },
    }
}

fn demo_records() -> Vec<DetailRecord> {
    vec![
        demo_record(1, "bulbasaur", &["grass", "poison"], 69, 7, [45, 49, 49, 65, 65, 45]),
        demo_record(4, "charmander", &["fire"], 85, 6, [39, 52, 43, 60, 50, 65]),
        demo_record(7, "squirtle", &["water"], 90, 5, [44, 48, 65, 50, 64, 43]),
        demo_record(25, "pikachu", &["electric"], 60, 4, [35, 55, 40, 50, 50, 90]),
        demo_record(35, "clefairy", &["fairy"], 75, 6, [70, 45, 48, 60, 65, 35]),
        demo_record(39, "jigglypuff", &["normal", "fairy"], 55, 5, [115, 45, 20, 45, 25, 20]),
        demo_record(52, "meowth", &["normal"], 42, 4, [40, 45, 35, 40, 40, 90]),
        demo_record(54, "psyduck", &["water"], 196, 8, [50, 52, 48, 65, 50, 55]),
        demo_record(66, "machop", &["fighting"], 195, 8, [70, 80, 50, 35, 35, 35]),
        demo_record(74, "geodude", &["rock", "ground"], 200, 4, [40, 80, 100, 30, 30, 20]),
        demo_record(92, "gastly", &["ghost", "poison"], 1, 13, [30, 35, 30, 100, 35, 80]),
        demo_record(95, "onix", &["rock", "ground"], 2100, 88, [35, 45, 160, 30, 45, 70]),
        demo_record(123, "scyther", &["bug", "flying"], 560, 15, [70, 110, 80, 55, 80, 105]),
        demo_record(131, "lapras", &["water", "ice"], 2200, 25, [130, 85, 80, 85, 95, 60]),
        demo_record(132, "ditto", &["normal"], 40, 3, [48, 48, 48, 48, 48, 48]),
        demo_record(133, "eevee", &["normal"], 65, 3, [55, 55, 50, 45, 65, 55]),
        demo_record(143, "snorlax", &["normal"], 4600, 21, [160, 110, 65, 65, 110, 30]),
        demo_record(147, "dratini", &["dragon"], 33, 18, [41, 64, 45, 50, 50, 50]),
        demo_record(150, "mewtwo", &["psychic"], 1220, 20, [106, 110, 90, 154, 90, 130]),
        demo_record(151, "mew", &["psychic"], 40, 4, [100, 100, 100, 100, 100, 100]),
        demo_record(197, "umbreon", &["dark"], 270, 10, [95, 65, 110, 60, 130, 65]),
        demo_record(208, "steelix", &["steel", "ground"], 4000, 92, [75, 85, 200, 55, 65, 30]),
        demo_record(248, "tyranitar", &["rock", "dark"], 2020, 20, [100, 134, 110, 95, 100, 61]),
        demo_record(448, "lucario", &["fighting", "steel"], 540, 12, [70, 110, 70, 115, 70, 90]),
        demo_record(658, "greninja", &["water", "dark"], 400, 15, [72, 95, 67, 103, 71, 122]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_records_are_valid() {
        let records = demo_records();
        assert_eq!(records.len(), 25);
        for record in &records {
            record.validate().unwrap();
            assert_eq!(record.stats.len(), 6);
        }
    }

    #[tokio::test]
    async fn test_mock_listing_pages() {
        let api = MockPokemonApi::demo();

        let first = api.fetch_listing(0, 24).await.unwrap();
        assert_eq!(first.len(), 24);
        assert_eq!(first[0].name, "bulbasaur");
        assert_eq!(first[0].id(), Some(1));

        let second = api.fetch_listing(24, 24).await.unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].name, "greninja");
        assert_eq!(api.listing_calls(), 2);
    }

    #[tokio::test]
    async fn test_mock_detail_by_name_and_id() {
        let api = MockPokemonApi::demo();

        let by_name = api.fetch_detail("DITTO").await.unwrap();
        assert_eq!(by_name.id, 132);

        let by_id = api.fetch_detail("132").await.unwrap();
        assert_eq!(by_id.name, "ditto");

        assert_eq!(api.detail_requests(), vec!["ditto", "132"]);
    }

    #[tokio::test]
    async fn test_mock_not_found() {
        let api = MockPokemonApi::demo();
        let err = api.fetch_detail("notapokemon").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_mock_injected_failures() {
        let api = MockPokemonApi::demo();
        api.fail_detail("Pikachu");
        api.fail_listing(503);

        let detail = api.fetch_detail("pikachu").await.unwrap_err();
        assert_eq!(detail.status(), Some(500));

        let listing = api.fetch_listing(0, 24).await.unwrap_err();
        assert_eq!(listing.status(), Some(503));
    }
}
