//! Pathfinder 2e character record types.
//!
//! Mirrors the JSON export produced by the character builder. Every field is
//! optional on the wire: absent values fall back to the defaults the sheet
//! generators have always used, so a sparse record still renders.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Abilities
// ============================================================================

/// Score used for any ability missing from `abilityScores.final`.
pub const DEFAULT_ABILITY_SCORE: i64 = 10;

/// The six ability scores, in sheet order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ability {
    #[serde(rename = "STR")]
    Strength,
    #[serde(rename = "DEX")]
    Dexterity,
    #[serde(rename = "CON")]
    Constitution,
    #[serde(rename = "INT")]
    Intelligence,
    #[serde(rename = "WIS")]
    Wisdom,
    #[serde(rename = "CHA")]
    Charisma,
}

impl Ability {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Ability::Strength => "Strength",
            Ability::Dexterity => "Dexterity",
            Ability::Constitution => "Constitution",
            Ability::Intelligence => "Intelligence",
            Ability::Wisdom => "Wisdom",
            Ability::Charisma => "Charisma",
        }
    }

    pub fn all() -> [Ability; 6] {
        [
            Ability::Strength,
            Ability::Dexterity,
            Ability::Constitution,
            Ability::Intelligence,
            Ability::Wisdom,
            Ability::Charisma,
        ]
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

// ============================================================================
// Proficiency
// ============================================================================

/// Proficiency tier for saves, skills and perception.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProficiencyRank {
    #[default]
    Untrained,
    Trained,
    Expert,
    Master,
    Legendary,
}

impl ProficiencyRank {
    /// Parse a rank label. Anything unrecognized is treated as untrained.
    pub fn from_label(label: &str) -> Self {
        match label {
            "trained" => ProficiencyRank::Trained,
            "expert" => ProficiencyRank::Expert,
            "master" => ProficiencyRank::Master,
            "legendary" => ProficiencyRank::Legendary,
            _ => ProficiencyRank::Untrained,
        }
    }

    pub fn bonus(&self) -> i64 {
        match self {
            ProficiencyRank::Untrained => 0,
            ProficiencyRank::Trained => 2,
            ProficiencyRank::Expert => 4,
            ProficiencyRank::Master => 6,
            ProficiencyRank::Legendary => 8,
        }
    }
}

// ============================================================================
// Record
// ============================================================================

/// On-disk wrapper: exports nest the record under a `character` key.
#[derive(Debug, Clone, Deserialize)]
pub struct CharacterFile {
    pub character: CharacterRecord,
}

/// A complete character as exported by the builder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacterRecord {
    pub metadata: Metadata,
    pub identity: Identity,
    pub ability_scores: AbilityScoreBlock,
    pub proficiencies: Proficiencies,
    pub derived: DerivedStats,
    pub feats: Vec<FeatSelection>,
    pub equipment: Vec<Item>,
    pub notes: Notes,
    pub languages: Vec<String>,
    pub senses: Vec<String>,
}

impl CharacterRecord {
    /// Final ability score, or 10 when the record omits it.
    pub fn score(&self, ability: Ability) -> i64 {
        self.ability_scores
            .final_scores
            .get(ability.abbreviation())
            .copied()
            .unwrap_or(DEFAULT_ABILITY_SCORE)
    }

    pub fn level(&self) -> i64 {
        self.identity.level
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub name: Option<String>,
    pub player: Option<String>,
    pub campaign: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Identity {
    pub level: i64,
    pub ancestry_id: Option<String>,
    pub heritage_id: Option<String>,
    pub background_id: Option<String>,
    pub class_id: Option<String>,
    pub deity_id: Option<String>,
    pub alignment: Option<String>,
}

impl Default for Identity {
    fn default() -> Self {
        Self {
            level: 1,
            ancestry_id: None,
            heritage_id: None,
            background_id: None,
            class_id: None,
            deity_id: None,
            alignment: None,
        }
    }
}

/// `abilityScores` block. Only the final scores feed the sheet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityScoreBlock {
    #[serde(rename = "final")]
    pub final_scores: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Proficiencies {
    pub perception: Option<String>,
    pub saves: SaveRanks,
    pub skills: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveRanks {
    pub fortitude: Option<String>,
    pub reflex: Option<String>,
    pub will: Option<String>,
}

// ============================================================================
// Derived stats (computed upstream, read through)
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DerivedStats {
    pub hit_points: HitPoints,
    pub armor_class: Option<StatValue>,
    #[serde(rename = "classDC")]
    pub class_dc: Option<StatValue>,
    /// Anything other than a perception block reads as absent.
    #[serde(deserialize_with = "lenient_perception")]
    pub perception: Option<Perception>,
    pub speeds: BTreeMap<String, i64>,
    pub attacks: Vec<AttackProfile>,
    pub resistances: Vec<DamageAdjustment>,
    pub weaknesses: Vec<DamageAdjustment>,
    pub immunities: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HitPoints {
    pub current: i64,
    pub max: i64,
    pub temporary: i64,
}

/// A defense value exported either as a bare number or as a
/// `{ "value": n, "breakdown": [...] }` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Flat(i64),
    Block { value: i64 },
}

impl StatValue {
    pub fn value(&self) -> i64 {
        match self {
            StatValue::Flat(value) | StatValue::Block { value } => *value,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Perception {
    pub modifier: i64,
    pub rank: Option<String>,
}

fn lenient_perception<'de, D>(deserializer: D) -> Result<Option<Perception>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttackProfile {
    pub label: Option<String>,
    pub attack_bonus: i64,
    pub damage: Option<String>,
    pub traits: Vec<String>,
}

/// A resistance or weakness entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageAdjustment {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: i64,
    pub notes: Option<String>,
}

// ============================================================================
// Feats, equipment, notes
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatSelection {
    pub id: String,
    pub level: i64,
    pub granted_by: String,
}

impl Default for FeatSelection {
    fn default() -> Self {
        Self {
            id: String::new(),
            level: 1,
            granted_by: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    pub name: String,
    pub quantity: i64,
    pub bulk: Option<Bulk>,
    pub notes: Option<String>,
}

impl Default for Item {
    fn default() -> Self {
        Self {
            name: "Unknown".to_string(),
            quantity: 1,
            bulk: None,
            notes: None,
        }
    }
}

/// Item bulk: either a number or a symbol such as "L".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bulk {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Bulk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bulk::Number(n) => write!(f, "{n}"),
            Bulk::Text(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Notes {
    pub appearance: Option<String>,
    pub backstory: Option<String>,
    pub allies: Option<String>,
    pub campaigns: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_object_uses_defaults() {
        let record: CharacterRecord = serde_json::from_value(json!({})).unwrap();
        assert_eq!(record.level(), 1);
        assert_eq!(record.score(Ability::Wisdom), 10);
        assert!(record.feats.is_empty());
        assert!(record.derived.armor_class.is_none());
    }

    #[test]
    fn test_stat_value_accepts_both_shapes() {
        let flat: StatValue = serde_json::from_value(json!(18)).unwrap();
        let block: StatValue =
            serde_json::from_value(json!({"value": 21, "breakdown": []})).unwrap();
        assert_eq!(flat.value(), 18);
        assert_eq!(block.value(), 21);
    }

    #[test]
    fn test_odd_perception_reads_as_absent() {
        for perception in [json!(5), json!("expert"), json!(null), json!([1, 2])] {
            let derived: DerivedStats =
                serde_json::from_value(json!({"perception": perception, "armorClass": 18}))
                    .unwrap();
            assert!(derived.perception.is_none());
            assert_eq!(derived.armor_class.map(|ac| ac.value()), Some(18));
        }

        let derived: DerivedStats =
            serde_json::from_value(json!({"perception": {"modifier": 7, "rank": "expert"}}))
                .unwrap();
        let perception = derived.perception.unwrap();
        assert_eq!(perception.modifier, 7);
        assert_eq!(perception.rank.as_deref(), Some("expert"));
    }

    #[test]
    fn test_bulk_display() {
        let light: Bulk = serde_json::from_value(json!("L")).unwrap();
        let one: Bulk = serde_json::from_value(json!(1)).unwrap();
        let tenth: Bulk = serde_json::from_value(json!(0.1)).unwrap();
        assert_eq!(light.to_string(), "L");
        assert_eq!(one.to_string(), "1");
        assert_eq!(tenth.to_string(), "0.1");
    }

    #[test]
    fn test_rank_from_label() {
        assert_eq!(ProficiencyRank::from_label("master"), ProficiencyRank::Master);
        assert_eq!(ProficiencyRank::from_label("Master"), ProficiencyRank::Untrained);
        assert_eq!(ProficiencyRank::from_label("heroic"), ProficiencyRank::Untrained);
    }

    #[test]
    fn test_ability_serializes_as_abbreviation() {
        let value = serde_json::to_value(Ability::Charisma).unwrap();
        assert_eq!(value, json!("CHA"));
    }
}
