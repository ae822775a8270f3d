//! Derived-stat rules shared by every sheet format.
//!
//! Everything here is a pure lookup or arithmetic mapping. Unknown inputs
//! degrade to fixed defaults instead of failing.

use crate::record::{Ability, FeatSelection, ProficiencyRank};

/// Ability modifier: `floor((score - 10) / 2)`.
///
/// Uses floor division, so 7 gives -2 rather than -1. Defined for every
/// `i64`, including absurd homebrew values.
pub fn modifier_for(score: i64) -> i64 {
    // 10 is even, so flooring before the offset is exact and cannot overflow.
    score.div_euclid(2) - 5
}

/// Flat bonus granted by a rank label. Unknown labels count as untrained.
pub fn rank_bonus(rank: &str) -> i64 {
    ProficiencyRank::from_label(rank).bonus()
}

/// Save/skill bonus: ability modifier + rank bonus + level.
///
/// Level is added at every rank, untrained included.
pub fn bonus_for(score: i64, rank: &str, level: i64) -> i64 {
    modifier_for(score)
        .saturating_add(rank_bonus(rank))
        .saturating_add(level)
}

/// Key ability for a skill. Names outside the standard sixteen (lores,
/// homebrew) use Intelligence.
pub fn skill_ability(skill: &str) -> Ability {
    match skill {
        "Athletics" => Ability::Strength,
        "Acrobatics" | "Stealth" | "Thievery" => Ability::Dexterity,
        "Arcana" | "Crafting" | "Occultism" | "Society" => Ability::Intelligence,
        "Medicine" | "Nature" | "Religion" | "Survival" => Ability::Wisdom,
        "Deception" | "Diplomacy" | "Intimidation" | "Performance" => Ability::Charisma,
        _ => Ability::Intelligence,
    }
}

/// The three saving throws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Save {
    Fortitude,
    Reflex,
    Will,
}

impl Save {
    pub fn name(&self) -> &'static str {
        match self {
            Save::Fortitude => "Fortitude",
            Save::Reflex => "Reflex",
            Save::Will => "Will",
        }
    }

    pub fn ability(&self) -> Ability {
        match self {
            Save::Fortitude => Ability::Constitution,
            Save::Reflex => Ability::Dexterity,
            Save::Will => Ability::Wisdom,
        }
    }

    pub fn all() -> [Save; 3] {
        [Save::Fortitude, Save::Reflex, Save::Will]
    }
}

/// Feats ordered by level. Stable, so same-level feats keep record order.
pub fn sorted_feats(feats: &[FeatSelection]) -> Vec<&FeatSelection> {
    let mut sorted: Vec<&FeatSelection> = feats.iter().collect();
    sorted.sort_by_key(|feat| feat.level);
    sorted
}

/// Skill names in lexicographic order.
pub fn sorted_skill_names<'a, V>(skills: impl IntoIterator<Item = (&'a String, V)>) -> Vec<&'a str> {
    let mut names: Vec<&str> = skills.into_iter().map(|(name, _)| name.as_str()).collect();
    names.sort_unstable();
    names
}
