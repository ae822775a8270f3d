//! Display-ready character sheet.
//!
//! [`CharacterSheet`] is the single place where record fields become sheet
//! values. Renderers read it and never recompute modifiers, bonuses or labels
//! themselves.

use crate::labels::{label_for, signed, text_or_placeholder, title_case, PLACEHOLDER};
use crate::record::{Ability, CharacterRecord, DamageAdjustment, ProficiencyRank};
use crate::rules::{bonus_for, modifier_for, skill_ability, sorted_feats, sorted_skill_names, Save};
use serde::Serialize;

/// Land speed shown when the record lists no speeds.
pub const DEFAULT_LAND_SPEED: i64 = 25;

/// Armor class and class DC shown when the record omits them.
pub const DEFAULT_DEFENSE: i64 = 10;

/// Everything a renderer needs, computed once from a [`CharacterRecord`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterSheet {
    /// Character name, or `Character` when the record has none.
    pub name: String,
    /// Level, player and the build choices, already labelled.
    pub identity: IdentityLines,
    /// The six abilities in STR, DEX, CON, INT, WIS, CHA order.
    pub abilities: Vec<AbilityLine>,
    /// Hit points, defenses, perception and speeds.
    pub core: CoreStats,
    /// Fortitude, Reflex and Will, in that order.
    pub saves: Vec<ProficiencyLine>,
    /// Skills the record lists, sorted by name.
    pub skills: Vec<ProficiencyLine>,
    /// Feats by level, then record order.
    pub feats: Vec<FeatLine>,
    /// Inventory in record order.
    pub equipment: Vec<ItemLine>,
    /// Strikes in record order.
    pub attacks: Vec<AttackLine>,
    pub resistances: Vec<AdjustmentLine>,
    pub weaknesses: Vec<AdjustmentLine>,
    pub immunities: Vec<String>,
    pub languages: Vec<String>,
    pub senses: Vec<String>,
    /// Non-blank note sections. Empty when the record has no notes.
    pub notes: Vec<NoteSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentityLines {
    /// Character level, 1 when the record omits it.
    pub level: i64,
    /// Free-text fields below fall back to the placeholder dash when blank.
    pub player: String,
    pub campaign: String,
    /// Ancestry, heritage, background and class are labels derived from the
    /// record's identifiers, e.g. `ancestry.half-orc` becomes `Half Orc`.
    pub ancestry: String,
    pub heritage: String,
    pub background: String,
    pub class: String,
    pub deity: String,
    pub alignment: String,
}

impl IdentityLines {
    /// Labelled rows in sheet order, level first.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Level", self.level.to_string()),
            ("Player", self.player.clone()),
            ("Campaign", self.campaign.clone()),
            ("Ancestry", self.ancestry.clone()),
            ("Heritage", self.heritage.clone()),
            ("Background", self.background.clone()),
            ("Class", self.class.clone()),
            ("Deity", self.deity.clone()),
            ("Alignment", self.alignment.clone()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AbilityLine {
    pub ability: Ability,
    /// Score as recorded, 10 when missing.
    pub score: i64,
    /// `(score - 10) / 2`, rounded down.
    pub modifier: i64,
}

impl AbilityLine {
    pub fn modifier_label(&self) -> String {
        signed(self.modifier)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoreStats {
    pub hit_points: HitPointLine,
    /// Armor class, 10 when missing.
    pub armor_class: i64,
    /// Class DC, 10 when missing.
    pub class_dc: i64,
    pub perception: PerceptionLine,
    /// Land first, the rest alphabetical. Never empty.
    pub speeds: Vec<SpeedLine>,
}

impl CoreStats {
    /// `Land: 25 ft, Climb: 10 ft`.
    pub fn speed_summary(&self) -> String {
        self.speeds
            .iter()
            .map(|s| format!("{}: {} ft", s.kind, s.feet))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HitPointLine {
    pub current: i64,
    pub max: i64,
    /// Shown only when positive.
    pub temporary: i64,
}

impl HitPointLine {
    /// `12 / 20`, with temporary HP appended when present.
    pub fn display(&self) -> String {
        if self.temporary > 0 {
            format!("{} / {} (+{} temp)", self.current, self.max, self.temporary)
        } else {
            format!("{} / {}", self.current, self.max)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerceptionLine {
    /// Total perception modifier as recorded.
    pub modifier: i64,
    /// Title-cased rank, `Untrained` when missing.
    pub rank_label: String,
}

impl PerceptionLine {
    /// `+7 (Expert)`.
    pub fn display(&self) -> String {
        format!("{} ({})", signed(self.modifier), self.rank_label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedLine {
    /// Movement type, title-cased: `Land`, `Climb`, `Swim`.
    pub kind: String,
    pub feet: i64,
}

/// One save or skill row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProficiencyLine {
    pub name: String,
    /// Key ability the bonus is computed from.
    pub ability: Ability,
    /// Parsed rank. Unrecognized labels count as untrained.
    pub rank: ProficiencyRank,
    /// Title-cased rank as written in the record, e.g. `Expert`.
    pub rank_label: String,
    /// Rank bonus without level: 0, 2, 4, 6 or 8.
    pub rank_bonus: i64,
    /// Ability modifier plus level plus rank bonus.
    pub bonus: i64,
}

impl ProficiencyLine {
    fn new(name: &str, ability: Ability, rank: &str, record: &CharacterRecord) -> Self {
        let parsed = ProficiencyRank::from_label(rank);
        Self {
            name: name.to_string(),
            ability,
            rank: parsed,
            rank_label: title_case(rank),
            rank_bonus: parsed.bonus(),
            bonus: bonus_for(record.score(ability), rank, record.level()),
        }
    }

    pub fn bonus_label(&self) -> String {
        signed(self.bonus)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatLine {
    /// Label derived from the feat id.
    pub name: String,
    /// Level the feat was taken at.
    pub level: i64,
    /// What granted it, e.g. `Class` or `Ancestry`.
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemLine {
    pub name: String,
    pub quantity: i64,
    /// Numeric or symbolic bulk, the placeholder dash when unknown.
    pub bulk: String,
    /// Empty when the item has no notes.
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttackLine {
    pub label: String,
    /// Attack roll modifier as recorded.
    pub bonus: i64,
    pub damage: String,
    /// Comma-separated trait list.
    pub traits: String,
}

impl AttackLine {
    pub fn bonus_label(&self) -> String {
        signed(self.bonus)
    }
}

/// A resistance or weakness.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjustmentLine {
    /// Damage type, e.g. `fire`.
    pub kind: String,
    pub value: i64,
    /// Condition on the adjustment. Blank notes are dropped.
    pub notes: Option<String>,
}

impl AdjustmentLine {
    fn from_record(adjustment: &DamageAdjustment) -> Self {
        Self {
            kind: adjustment.kind.clone(),
            value: adjustment.value,
            notes: adjustment.notes.clone().filter(|n| !n.trim().is_empty()),
        }
    }

    /// `fire 5 - while raging`.
    pub fn display(&self) -> String {
        match &self.notes {
            Some(notes) => format!("{} {} - {}", self.kind, self.value, notes),
            None => format!("{} {}", self.kind, self.value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoteKind {
    Appearance,
    Backstory,
    Allies,
    Campaigns,
}

impl NoteKind {
    pub fn title(&self) -> &'static str {
        match self {
            NoteKind::Appearance => "Appearance",
            NoteKind::Backstory => "Backstory",
            NoteKind::Allies => "Allies & Organizations",
            NoteKind::Campaigns => "Campaign Notes",
        }
    }

    /// Shorter heading for narrow layouts.
    pub fn short_title(&self) -> &'static str {
        match self {
            NoteKind::Allies => "Allies",
            other => other.title(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteSection {
    pub kind: NoteKind,
    /// Note text as written, never blank.
    pub body: String,
}

impl CharacterSheet {
    /// Build the sheet. Never fails: every missing field has a default.
    pub fn from_record(record: &CharacterRecord) -> Self {
        let sheet = Self {
            name: record
                .metadata
                .name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| "Character".to_string()),
            identity: identity_lines(record),
            abilities: Ability::all()
                .into_iter()
                .map(|ability| {
                    let score = record.score(ability);
                    AbilityLine {
                        ability,
                        score,
                        modifier: modifier_for(score),
                    }
                })
                .collect(),
            core: core_stats(record),
            saves: save_lines(record),
            skills: skill_lines(record),
            feats: sorted_feats(&record.feats)
                .into_iter()
                .map(|feat| FeatLine {
                    name: label_for(Some(&feat.id)),
                    level: feat.level,
                    source: title_case(&feat.granted_by),
                })
                .collect(),
            equipment: record
                .equipment
                .iter()
                .map(|item| ItemLine {
                    name: item.name.clone(),
                    quantity: item.quantity,
                    bulk: item
                        .bulk
                        .as_ref()
                        .map(|b| b.to_string())
                        .unwrap_or_else(|| PLACEHOLDER.to_string()),
                    notes: item.notes.clone().unwrap_or_default(),
                })
                .collect(),
            attacks: record
                .derived
                .attacks
                .iter()
                .map(|attack| AttackLine {
                    label: text_or_placeholder(attack.label.as_deref()),
                    bonus: attack.attack_bonus,
                    damage: text_or_placeholder(attack.damage.as_deref()),
                    traits: attack.traits.join(", "),
                })
                .collect(),
            resistances: record
                .derived
                .resistances
                .iter()
                .map(AdjustmentLine::from_record)
                .collect(),
            weaknesses: record
                .derived
                .weaknesses
                .iter()
                .map(AdjustmentLine::from_record)
                .collect(),
            immunities: record.derived.immunities.clone(),
            languages: record.languages.clone(),
            senses: record.senses.clone(),
            notes: note_sections(record),
        };

        log::debug!(
            "Built sheet for {}: {} skills, {} feats, {} items",
            sheet.name,
            sheet.skills.len(),
            sheet.feats.len(),
            sheet.equipment.len()
        );
        sheet
    }

    pub fn ability(&self, ability: Ability) -> Option<&AbilityLine> {
        self.abilities.iter().find(|line| line.ability == ability)
    }

    pub fn skill(&self, name: &str) -> Option<&ProficiencyLine> {
        self.skills.iter().find(|line| line.name == name)
    }

    pub fn save(&self, save: Save) -> Option<&ProficiencyLine> {
        self.saves.iter().find(|line| line.name == save.name())
    }

    pub fn has_notes(&self) -> bool {
        !self.notes.is_empty()
    }
}

fn identity_lines(record: &CharacterRecord) -> IdentityLines {
    let identity = &record.identity;
    IdentityLines {
        level: identity.level,
        player: text_or_placeholder(record.metadata.player.as_deref()),
        campaign: text_or_placeholder(record.metadata.campaign.as_deref()),
        ancestry: label_for(identity.ancestry_id.as_deref()),
        heritage: label_for(identity.heritage_id.as_deref()),
        background: label_for(identity.background_id.as_deref()),
        class: label_for(identity.class_id.as_deref()),
        deity: label_for(identity.deity_id.as_deref()),
        alignment: text_or_placeholder(identity.alignment.as_deref()),
    }
}

fn core_stats(record: &CharacterRecord) -> CoreStats {
    let derived = &record.derived;

    let perception = match &derived.perception {
        Some(p) => PerceptionLine {
            modifier: p.modifier,
            rank_label: title_case(p.rank.as_deref().unwrap_or("untrained")),
        },
        None => PerceptionLine {
            modifier: 0,
            rank_label: title_case(
                record
                    .proficiencies
                    .perception
                    .as_deref()
                    .unwrap_or("untrained"),
            ),
        },
    };

    // Land first, then the rest alphabetically.
    let mut speeds: Vec<SpeedLine> = derived
        .speeds
        .iter()
        .map(|(kind, feet)| SpeedLine {
            kind: title_case(kind),
            feet: *feet,
        })
        .collect();
    speeds.sort_by_key(|s| s.kind != "Land");
    if speeds.is_empty() {
        speeds.push(SpeedLine {
            kind: "Land".to_string(),
            feet: DEFAULT_LAND_SPEED,
        });
    }

    CoreStats {
        hit_points: HitPointLine {
            current: derived.hit_points.current,
            max: derived.hit_points.max,
            temporary: derived.hit_points.temporary,
        },
        armor_class: derived
            .armor_class
            .map(|ac| ac.value())
            .unwrap_or(DEFAULT_DEFENSE),
        class_dc: derived
            .class_dc
            .map(|dc| dc.value())
            .unwrap_or(DEFAULT_DEFENSE),
        perception,
        speeds,
    }
}

fn save_lines(record: &CharacterRecord) -> Vec<ProficiencyLine> {
    let ranks = &record.proficiencies.saves;
    Save::all()
        .into_iter()
        .map(|save| {
            let rank = match save {
                Save::Fortitude => ranks.fortitude.as_deref(),
                Save::Reflex => ranks.reflex.as_deref(),
                Save::Will => ranks.will.as_deref(),
            };
            ProficiencyLine::new(save.name(), save.ability(), rank.unwrap_or("untrained"), record)
        })
        .collect()
}

fn skill_lines(record: &CharacterRecord) -> Vec<ProficiencyLine> {
    let skills = &record.proficiencies.skills;
    sorted_skill_names(skills)
        .into_iter()
        .map(|name| {
            let rank = skills.get(name).map(String::as_str).unwrap_or("untrained");
            ProficiencyLine::new(name, skill_ability(name), rank, record)
        })
        .collect()
}

fn note_sections(record: &CharacterRecord) -> Vec<NoteSection> {
    let notes = &record.notes;
    [
        (NoteKind::Appearance, &notes.appearance),
        (NoteKind::Backstory, &notes.backstory),
        (NoteKind::Allies, &notes.allies),
        (NoteKind::Campaigns, &notes.campaigns),
    ]
    .into_iter()
    .filter_map(|(kind, body)| {
        body.as_ref()
            .filter(|b| !b.trim().is_empty())
            .map(|b| NoteSection {
                kind,
                body: b.clone(),
            })
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{minimal_record, sample_record};

    #[test]
    fn test_athletics_end_to_end() {
        let mut record = minimal_record();
        record
            .ability_scores
            .final_scores
            .insert("STR".to_string(), 16);
        record.identity.level = 3;
        record
            .proficiencies
            .skills
            .insert("Athletics".to_string(), "trained".to_string());

        let sheet = CharacterSheet::from_record(&record);
        let athletics = sheet.skill("Athletics").unwrap();
        assert_eq!(athletics.ability, Ability::Strength);
        assert_eq!(athletics.rank_bonus, 2);
        assert_eq!(athletics.bonus, 8);
        assert_eq!(athletics.bonus_label(), "+8");
    }

    #[test]
    fn test_unknown_skill_uses_intelligence() {
        let mut record = minimal_record();
        record
            .ability_scores
            .final_scores
            .insert("INT".to_string(), 18);
        record
            .proficiencies
            .skills
            .insert("Dragon Lore".to_string(), "trained".to_string());

        let sheet = CharacterSheet::from_record(&record);
        let lore = sheet.skill("Dragon Lore").unwrap();
        assert_eq!(lore.ability, Ability::Intelligence);
        assert_eq!(lore.bonus, 4 + 2 + 1);
    }

    #[test]
    fn test_minimal_record_defaults() {
        let sheet = CharacterSheet::from_record(&minimal_record());
        assert_eq!(sheet.name, "Character");
        assert_eq!(sheet.identity.level, 1);
        assert_eq!(sheet.identity.player, "—");
        assert_eq!(sheet.identity.ancestry, "—");
        assert_eq!(sheet.core.armor_class, 10);
        assert_eq!(sheet.core.class_dc, 10);
        assert_eq!(sheet.core.speed_summary(), "Land: 25 ft");
        assert_eq!(sheet.core.perception.display(), "+0 (Untrained)");
        assert!(sheet.abilities.iter().all(|a| a.score == 10 && a.modifier == 0));
        // Untrained saves still add level.
        assert!(sheet.saves.iter().all(|s| s.bonus == 1 && s.rank_label == "Untrained"));
        assert!(sheet.skills.is_empty());
        assert!(!sheet.has_notes());
    }

    #[test]
    fn test_sample_sheet_values() {
        let sheet = CharacterSheet::from_record(&sample_record());
        assert_eq!(sheet.name, "Valeros");
        assert_eq!(sheet.identity.ancestry, "Half Orc");
        assert_eq!(sheet.identity.class, "Fighter");

        let fortitude = sheet.save(Save::Fortitude).unwrap();
        assert_eq!(fortitude.rank, ProficiencyRank::Expert);
        // CON 14 (+2) + expert 4 + level 3
        assert_eq!(fortitude.bonus, 9);

        let names: Vec<&str> = sheet.skills.iter().map(|s| s.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);

        let levels: Vec<i64> = sheet.feats.iter().map(|f| f.level).collect();
        assert_eq!(levels, vec![1, 1, 2, 3]);
        assert_eq!(sheet.feats[0].name, "Sudden Charge");
        assert_eq!(sheet.feats[1].name, "Intimidating Glare");
        assert_eq!(sheet.feats[0].source, "Class");
    }

    #[test]
    fn test_unknown_rank_label_is_kept_but_worth_nothing() {
        let mut record = minimal_record();
        record.proficiencies.saves.will = Some("heroic".to_string());
        let sheet = CharacterSheet::from_record(&record);
        let will = sheet.save(Save::Will).unwrap();
        assert_eq!(will.rank, ProficiencyRank::Untrained);
        assert_eq!(will.rank_label, "Heroic");
        assert_eq!(will.rank_bonus, 0);
    }

    #[test]
    fn test_speeds_put_land_first() {
        let mut record = minimal_record();
        record.derived.speeds.insert("climb".to_string(), 10);
        record.derived.speeds.insert("land".to_string(), 30);
        record.derived.speeds.insert("swim".to_string(), 15);
        let sheet = CharacterSheet::from_record(&record);
        assert_eq!(
            sheet.core.speed_summary(),
            "Land: 30 ft, Climb: 10 ft, Swim: 15 ft"
        );
    }

    #[test]
    fn test_notes_skip_blank_sections() {
        let mut record = minimal_record();
        record.notes.backstory = Some("Raised by wolves.".to_string());
        record.notes.allies = Some("   ".to_string());
        let sheet = CharacterSheet::from_record(&record);
        assert_eq!(sheet.notes.len(), 1);
        assert_eq!(sheet.notes[0].kind, NoteKind::Backstory);
    }

    #[test]
    fn test_build_is_deterministic() {
        let record = sample_record();
        let first = serde_json::to_string(&CharacterSheet::from_record(&record)).unwrap();
        let second = serde_json::to_string(&CharacterSheet::from_record(&record)).unwrap();
        assert_eq!(first, second);
    }
}
