//! Normalized view of a detail record.
//!
//! Type, stat, ability and move entries arrive either wrapped the way PokeAPI
//! nests them (`{"type": {"name": ..}}`) or flattened (`{"name": ..}`). Each
//! entry kind is an untagged enum with a single adapter, so callers only ever
//! see plain names.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TypeSlot {
    Wrapped {
        #[serde(rename = "type")]
        kind: NamedResource,
    },
    Direct {
        name: String,
    },
}

impl TypeSlot {
    fn into_name(self) -> String {
        match self {
            TypeSlot::Wrapped { kind } => kind.name,
            TypeSlot::Direct { name } => name,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum StatSlot {
    Wrapped { stat: NamedResource, base_stat: u32 },
    Direct { name: String, base_stat: u32 },
}

impl StatSlot {
    fn into_value(self) -> StatValue {
        match self {
            StatSlot::Wrapped { stat, base_stat } => StatValue {
                name: stat.name,
                base_stat,
            },
            StatSlot::Direct { name, base_stat } => StatValue { name, base_stat },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum AbilitySlot {
    Wrapped { ability: NamedResource },
    Direct { name: String },
}

impl AbilitySlot {
    fn into_name(self) -> String {
        match self {
            AbilitySlot::Wrapped { ability } => ability.name,
            AbilitySlot::Direct { name } => name,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum MoveSlot {
    Wrapped {
        #[serde(rename = "move")]
        learned: NamedResource,
    },
    Direct {
        name: String,
    },
}

impl MoveSlot {
    fn into_name(self) -> String {
        match self {
            MoveSlot::Wrapped { learned } => learned.name,
            MoveSlot::Direct { name } => name,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Artwork {
    front_default: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    official_artwork: Option<Artwork>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Sprites {
    front_default: Option<String>,
    #[serde(default)]
    other: Option<OtherSprites>,
}

impl Sprites {
    /// Official artwork when available, otherwise the default front sprite.
    fn preferred(self) -> Option<String> {
        self.other
            .and_then(|other| other.official_artwork)
            .and_then(|art| art.front_default)
            .or(self.front_default)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct DetailRecord {
    id: u64,
    name: String,
    #[serde(default)]
    height: Option<u32>,
    #[serde(default)]
    weight: Option<u32>,
    #[serde(default)]
    sprites: Option<Sprites>,
    #[serde(default)]
    types: Vec<TypeSlot>,
    #[serde(default)]
    stats: Vec<StatSlot>,
    #[serde(default)]
    abilities: Vec<AbilitySlot>,
    #[serde(default)]
    moves: Vec<MoveSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatValue {
    pub name: String,
    pub base_stat: u32,
}

// == Pokemon Profile ==
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PokemonProfile {
    pub id: u64,
    pub name: String,
    pub number: u64,
    pub height: Option<u32>,
    pub weight: Option<u32>,
    pub sprite: Option<String>,
    pub types: Vec<String>,
    pub stats: Vec<StatValue>,
    pub abilities: Vec<String>,
    pub moves: Vec<String>,
}

impl PokemonProfile {
    /// Builds the profile from a raw detail record. Fails when `id` or
    /// `name` is missing or an entry matches neither shape.
    pub fn from_record(record: &Value) -> serde_json::Result<Self> {
        let raw = DetailRecord::deserialize(record)?;

        Ok(Self {
            id: raw.id,
            number: raw.id,
            name: raw.name,
            height: raw.height,
            weight: raw.weight,
            sprite: raw.sprites.and_then(Sprites::preferred),
            types: raw.types.into_iter().map(TypeSlot::into_name).collect(),
            stats: raw.stats.into_iter().map(StatSlot::into_value).collect(),
            abilities: raw.abilities.into_iter().map(AbilitySlot::into_name).collect(),
            moves: raw.moves.into_iter().map(MoveSlot::into_name).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wrapped_upstream_shape() {
        let record = json!({
            "id": 1,
            "name": "bulbasaur",
            "height": 7,
            "weight": 69,
            "abilities": [
                {"is_hidden": false, "slot": 1, "ability": {"name": "overgrow", "url": "https://pokeapi.co/api/v2/ability/65/"}},
                {"is_hidden": true, "slot": 3, "ability": {"name": "chlorophyll", "url": "https://pokeapi.co/api/v2/ability/34/"}}
            ],
            "moves": [
                {"move": {"name": "razor-wind", "url": "https://pokeapi.co/api/v2/move/13/"}, "version_group_details": []}
            ],
            "sprites": {
                "front_default": "https://example.test/1.png",
                "other": {"official-artwork": {"front_default": "https://example.test/art/1.png"}}
            },
            "stats": [
                {"base_stat": 45, "effort": 0, "stat": {"name": "hp", "url": "https://pokeapi.co/api/v2/stat/1/"}}
            ],
            "types": [
                {"slot": 1, "type": {"name": "grass", "url": "https://pokeapi.co/api/v2/type/12/"}},
                {"slot": 2, "type": {"name": "poison", "url": "https://pokeapi.co/api/v2/type/4/"}}
            ]
        });

        let profile = PokemonProfile::from_record(&record).unwrap();

        assert_eq!(profile.id, 1);
        assert_eq!(profile.number, 1);
        assert_eq!(profile.height, Some(7));
        assert_eq!(profile.types, vec!["grass", "poison"]);
        assert_eq!(profile.abilities, vec!["overgrow", "chlorophyll"]);
        assert_eq!(profile.moves, vec!["razor-wind"]);
        assert_eq!(
            profile.stats,
            vec![StatValue {
                name: "hp".into(),
                base_stat: 45
            }]
        );
        assert_eq!(profile.sprite.as_deref(), Some("https://example.test/art/1.png"));
    }

    #[test]
    fn test_direct_shape() {
        let record = json!({
            "id": 25,
            "name": "pikachu",
            "types": [{"name": "electric"}],
            "stats": [{"name": "speed", "base_stat": 90}],
            "abilities": [{"name": "static"}],
            "moves": [{"name": "thunder-shock"}],
            "sprites": {"front_default": "https://example.test/25.png"}
        });

        let profile = PokemonProfile::from_record(&record).unwrap();

        assert_eq!(profile.types, vec!["electric"]);
        assert_eq!(profile.stats[0].name, "speed");
        assert_eq!(profile.stats[0].base_stat, 90);
        assert_eq!(profile.abilities, vec!["static"]);
        assert_eq!(profile.moves, vec!["thunder-shock"]);
        assert_eq!(profile.sprite.as_deref(), Some("https://example.test/25.png"));
        assert_eq!(profile.height, None);
    }

    #[test]
    fn test_mixed_shapes_in_one_record() {
        let record = json!({
            "id": 6,
            "name": "charizard",
            "types": [{"type": {"name": "fire"}}, {"name": "flying"}]
        });

        let profile = PokemonProfile::from_record(&record).unwrap();
        assert_eq!(profile.types, vec!["fire", "flying"]);
        assert!(profile.sprite.is_none());
    }

    #[test]
    fn test_missing_identity_is_rejected() {
        assert!(PokemonProfile::from_record(&json!({"name": "nobody"})).is_err());
        assert!(PokemonProfile::from_record(&json!({"id": 1, "types": [{"slot": 1}]})).is_err());
    }
}
