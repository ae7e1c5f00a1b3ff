use serde::{Deserialize, Serialize};

/// `data` payload of the species details query.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct SpeciesQueryResult {
    #[serde(default)]
    pub species: Vec<SpeciesRecord>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct SpeciesRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub base_happiness: Option<i64>,
    #[serde(default)]
    pub is_legendary: bool,
    #[serde(default)]
    pub is_mythical: bool,
    #[serde(default)]
    pub generation: Option<Named>,
    #[serde(default)]
    pub habitat: Option<Named>,
    #[serde(default)]
    pub pokemon: Nodes<PokemonForm>,
    #[serde(default, rename = "flavorText")]
    pub flavor_text: Vec<FlavorText>,
}

impl SpeciesRecord {
    /// The single pokemon form the query asks for (`limit: 1`).
    pub fn form(&self) -> Option<&PokemonForm> {
        self.pokemon.nodes.first()
    }

    /// First usable flavor text entry, if any.
    pub fn first_flavor_text(&self) -> Option<&str> {
        self.flavor_text
            .first()
            .map(|f| f.flavor_text.as_str())
            .filter(|s| !s.trim().is_empty())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Named {
    #[serde(default)]
    pub name: String,
}

/// Hasura `*_aggregate { nodes }` wrapper.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Nodes<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

impl<T> Default for Nodes<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct PokemonForm {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub weight: Option<u32>,
    #[serde(default)]
    pub abilities: Nodes<AbilitySlot>,
    #[serde(default)]
    pub stats: Vec<Stat>,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default, rename = "levelUpMoves")]
    pub level_up_moves: Nodes<LevelUpMove>,
    #[serde(default, rename = "foundInAsManyPlaces")]
    pub encounters: EncounterAggregate,
    #[serde(default, rename = "fireRedItems")]
    pub fire_red_items: Vec<HeldItem>,
}

impl PokemonForm {
    pub fn ability_names(&self) -> Vec<&str> {
        self.abilities
            .nodes
            .iter()
            .map(|a| a.ability.name.as_str())
            .collect()
    }

    /// Type names ordered by slot.
    pub fn type_names(&self) -> Vec<&str> {
        let mut slots: Vec<&TypeSlot> = self.types.iter().collect();
        slots.sort_by_key(|t| t.slot);
        slots.into_iter().map(|t| t.kind.name.as_str()).collect()
    }

    pub fn encounter_count(&self) -> u64 {
        self.encounters.aggregate.as_ref().map_or(0, |a| a.count)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct AbilitySlot {
    #[serde(default)]
    pub ability: Named,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Stat {
    #[serde(default)]
    pub base_stat: u32,
    #[serde(default)]
    pub stat: Named,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct TypeSlot {
    #[serde(default)]
    pub slot: u32,
    #[serde(default, rename = "type")]
    pub kind: Named,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct LevelUpMove {
    #[serde(default, rename = "move")]
    pub move_: Named,
    #[serde(default)]
    pub level: Option<u32>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct EncounterAggregate {
    #[serde(default)]
    pub aggregate: Option<Count>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Count {
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct HeldItem {
    #[serde(default)]
    pub item: Item,
    #[serde(default)]
    pub rarity: Option<u32>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Item {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cost: Option<u32>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct FlavorText {
    #[serde(default)]
    pub flavor_text: String,
}

/// Shape returned by `GET /pokemon/details/{name}`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct PokemonSummary {
    pub name: String,
    #[serde(rename = "flavorText")]
    pub flavor_text: Vec<FlavorText>,
}

impl PokemonSummary {
    /// Sentinel entry served with a 404 so clients always get something to render.
    pub fn not_found(requested: &str) -> Self {
        Self {
            name: format!("Pokemon not found for name: {requested}"),
            flavor_text: vec![FlavorText::default()],
        }
    }
}

impl From<&SpeciesRecord> for PokemonSummary {
    fn from(record: &SpeciesRecord) -> Self {
        Self {
            name: record.name.clone(),
            flavor_text: record.flavor_text.clone(),
        }
    }
}
