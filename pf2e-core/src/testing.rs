//! Sample characters for tests and demos.
//!
//! [`sample_record`] and [`sample_character_json`] describe the same
//! character, once as Rust values and once as the exported JSON envelope.

use crate::record::{
    AttackProfile, Bulk, CharacterRecord, DamageAdjustment, FeatSelection, HitPoints, Item,
    Perception, StatValue,
};
use serde_json::{json, Value};

/// A record with nothing filled in.
pub fn minimal_record() -> CharacterRecord {
    CharacterRecord::default()
}

/// Level 3 half-orc fighter.
pub fn sample_record() -> CharacterRecord {
    let mut record = CharacterRecord::default();

    record.metadata.name = Some("Valeros".to_string());
    record.metadata.player = Some("Sam".to_string());
    record.metadata.campaign = Some("Abomination Vaults".to_string());

    record.identity.level = 3;
    record.identity.ancestry_id = Some("ancestry.half-orc".to_string());
    record.identity.heritage_id = Some("heritage.battle-hardened".to_string());
    record.identity.background_id = Some("background.warrior".to_string());
    record.identity.class_id = Some("class.fighter".to_string());
    record.identity.deity_id = Some("deity.gorum".to_string());
    record.identity.alignment = Some("CN".to_string());

    for (ability, score) in [
        ("STR", 18),
        ("DEX", 14),
        ("CON", 14),
        ("INT", 10),
        ("WIS", 12),
        ("CHA", 10),
    ] {
        record
            .ability_scores
            .final_scores
            .insert(ability.to_string(), score);
    }

    record.proficiencies.perception = Some("expert".to_string());
    record.proficiencies.saves.fortitude = Some("expert".to_string());
    record.proficiencies.saves.reflex = Some("expert".to_string());
    record.proficiencies.saves.will = Some("trained".to_string());
    for (skill, rank) in [
        ("Athletics", "expert"),
        ("Intimidation", "trained"),
        ("Acrobatics", "trained"),
        ("Survival", "trained"),
        ("Warfare Lore", "trained"),
    ] {
        record
            .proficiencies
            .skills
            .insert(skill.to_string(), rank.to_string());
    }

    record.derived.hit_points = HitPoints {
        current: 41,
        max: 47,
        temporary: 0,
    };
    record.derived.armor_class = Some(StatValue::Block { value: 21 });
    record.derived.class_dc = Some(StatValue::Flat(19));
    record.derived.perception = Some(Perception {
        modifier: 8,
        rank: Some("expert".to_string()),
    });
    record.derived.speeds.insert("land".to_string(), 25);
    record.derived.attacks = vec![
        AttackProfile {
            label: Some("Longsword".to_string()),
            attack_bonus: 11,
            damage: Some("1d8+4 S".to_string()),
            traits: vec!["versatile P".to_string()],
        },
        AttackProfile {
            label: Some("Shortbow".to_string()),
            attack_bonus: 9,
            damage: Some("1d6 P".to_string()),
            traits: vec!["deadly d10".to_string(), "range 60 ft".to_string()],
        },
    ];
    record.derived.resistances = vec![DamageAdjustment {
        kind: "fire".to_string(),
        value: 2,
        notes: Some("from ring".to_string()),
    }];
    record.derived.weaknesses = vec![DamageAdjustment {
        kind: "cold iron".to_string(),
        value: 1,
        notes: None,
    }];

    record.feats = vec![
        feat("class-feat.sudden-charge", 1, "class"),
        feat("general-feat.shield-block", 3, "general"),
        feat("skill-feat.intimidating-glare", 1, "background"),
        feat("class-feat.power-attack", 2, "class"),
    ];

    record.equipment = vec![
        Item {
            name: "Longsword".to_string(),
            quantity: 1,
            bulk: Some(Bulk::Number(1u64.into())),
            notes: None,
        },
        Item {
            name: "Rations".to_string(),
            quantity: 5,
            bulk: Some(Bulk::Text("L".to_string())),
            notes: Some("one week".to_string()),
        },
        Item {
            name: "Signal Whistle".to_string(),
            quantity: 1,
            bulk: None,
            notes: None,
        },
    ];

    record.notes.appearance = Some("Scarred, broad-shouldered, grinning.".to_string());
    record.notes.backstory = Some("Sold his sword to every company in Absalom.".to_string());

    record.languages = vec!["Common".to_string(), "Orcish".to_string()];
    record.senses = vec!["darkvision".to_string()];

    record
}

fn feat(id: &str, level: i64, granted_by: &str) -> FeatSelection {
    FeatSelection {
        id: id.to_string(),
        level,
        granted_by: granted_by.to_string(),
    }
}

/// [`sample_record`] as the builder exports it, including fields the sheet
/// ignores.
pub fn sample_character_json() -> Value {
    json!({
        "character": {
            "metadata": {
                "id": "char-0001",
                "name": "Valeros",
                "player": "Sam",
                "campaign": "Abomination Vaults",
                "schemaVersion": "1.0.0"
            },
            "identity": {
                "level": 3,
                "ancestryId": "ancestry.half-orc",
                "heritageId": "heritage.battle-hardened",
                "backgroundId": "background.warrior",
                "classId": "class.fighter",
                "deityId": "deity.gorum",
                "alignment": "CN"
            },
            "abilityScores": {
                "base": { "STR": 10, "DEX": 10, "CON": 10, "INT": 10, "WIS": 10, "CHA": 10 },
                "final": { "STR": 18, "DEX": 14, "CON": 14, "INT": 10, "WIS": 12, "CHA": 10 }
            },
            "proficiencies": {
                "perception": "expert",
                "saves": { "fortitude": "expert", "reflex": "expert", "will": "trained" },
                "skills": {
                    "Athletics": "expert",
                    "Intimidation": "trained",
                    "Acrobatics": "trained",
                    "Survival": "trained",
                    "Warfare Lore": "trained"
                },
                "classDC": "trained"
            },
            "derived": {
                "hitPoints": { "current": 41, "max": 47 },
                "armorClass": { "value": 21, "breakdown": [] },
                "classDC": 19,
                "perception": { "modifier": 8, "rank": "expert" },
                "saves": {
                    "fortitude": { "value": 9 },
                    "reflex": { "value": 9 },
                    "will": { "value": 6 }
                },
                "speeds": { "land": 25 },
                "attacks": [
                    {
                        "label": "Longsword",
                        "attackBonus": 11,
                        "damage": "1d8+4 S",
                        "traits": ["versatile P"]
                    },
                    {
                        "label": "Shortbow",
                        "attackBonus": 9,
                        "damage": "1d6 P",
                        "traits": ["deadly d10", "range 60 ft"]
                    }
                ],
                "resistances": [{ "type": "fire", "value": 2, "notes": "from ring" }],
                "weaknesses": [{ "type": "cold iron", "value": 1 }],
                "immunities": []
            },
            "feats": [
                { "id": "class-feat.sudden-charge", "level": 1, "grantedBy": "class" },
                { "id": "general-feat.shield-block", "level": 3, "grantedBy": "general" },
                { "id": "skill-feat.intimidating-glare", "level": 1, "grantedBy": "background" },
                { "id": "class-feat.power-attack", "level": 2, "grantedBy": "class" }
            ],
            "equipment": [
                { "id": "item-1", "name": "Longsword", "quantity": 1, "bulk": 1 },
                { "id": "item-2", "name": "Rations", "quantity": 5, "bulk": "L", "notes": "one week" },
                { "id": "item-3", "name": "Signal Whistle", "quantity": 1 }
            ],
            "notes": {
                "appearance": "Scarred, broad-shouldered, grinning.",
                "backstory": "Sold his sword to every company in Absalom."
            },
            "languages": ["Common", "Orcish"],
            "senses": ["darkvision"]
        }
    })
}
