//! Pathfinder 2e character sheet model.
//!
//! This crate provides:
//! - Typed access to exported character records
//! - The derived-stat rules (ability modifiers, proficiency bonuses)
//! - A display-ready [`CharacterSheet`] shared by every output format
//! - Loading records and atomically writing finished sheets
//!
//! # Quick Start
//!
//! ```no_run
//! use pf2e_core::{load_record, CharacterSheet};
//!
//! let record = load_record("valeros.json")?;
//! let sheet = CharacterSheet::from_record(&record);
//!
//! for skill in &sheet.skills {
//!     println!("{} {}", skill.name, skill.bonus_label());
//! }
//! # Ok::<(), pf2e_core::PersistError>(())
//! ```

pub mod labels;
pub mod persist;
pub mod record;
pub mod rules;
pub mod sheet;
pub mod testing;

pub use labels::{label_for, signed, PLACEHOLDER};
pub use persist::{load_record, parse_record, write_artifact, PersistError};
pub use record::{Ability, CharacterRecord, ProficiencyRank};
pub use rules::{bonus_for, modifier_for, rank_bonus, skill_ability, sorted_feats, sorted_skill_names, Save};
pub use sheet::CharacterSheet;
