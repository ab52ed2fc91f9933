//! Shape keys and hover-flag resolution

use crate::error::MoteError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of silhouettes the particles can form.
///
/// Declaration order is the hover precedence: when several hover flags are
/// set at once, the first key in this list wins.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKey {
    /// Lowercase "in" letterform logo
    Letter,
    /// Trunk-and-branch commit diagram logo
    Branch,
    /// Briefcase icon
    Briefcase,
    /// Kanban board icon
    Kanban,
    /// Mortarboard or diploma icon
    Education,
    /// Gear icon
    Gear,
}

impl ShapeKey {
    /// All keys, in precedence order
    pub const ALL: [ShapeKey; 6] = [
        ShapeKey::Letter,
        ShapeKey::Branch,
        ShapeKey::Briefcase,
        ShapeKey::Kanban,
        ShapeKey::Education,
        ShapeKey::Gear,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ShapeKey::Letter => "letter",
            ShapeKey::Branch => "branch",
            ShapeKey::Briefcase => "briefcase",
            ShapeKey::Kanban => "kanban",
            ShapeKey::Education => "education",
            ShapeKey::Gear => "gear",
        }
    }
}

impl fmt::Display for ShapeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKey {
    type Err = MoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKey::ALL
            .iter()
            .copied()
            .find(|key| key.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MoteError::UnknownShape {
                value: s.to_string(),
                allowed: ShapeKey::ALL.iter().map(|k| k.name().to_string()).collect(),
            })
    }
}

/// One hover flag per shape key, as reported by the host UI
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverFlags {
    pub letter: bool,
    pub branch: bool,
    pub briefcase: bool,
    pub kanban: bool,
    pub education: bool,
    pub gear: bool,
}

impl HoverFlags {
    /// No flag set: every particle drifts
    pub fn none() -> Self {
        Self::default()
    }

    /// Exactly one flag set
    pub fn only(key: ShapeKey) -> Self {
        let mut flags = Self::default();
        flags.set(key, true);
        flags
    }

    pub fn get(&self, key: ShapeKey) -> bool {
        match key {
            ShapeKey::Letter => self.letter,
            ShapeKey::Branch => self.branch,
            ShapeKey::Briefcase => self.briefcase,
            ShapeKey::Kanban => self.kanban,
            ShapeKey::Education => self.education,
            ShapeKey::Gear => self.gear,
        }
    }

    pub fn set(&mut self, key: ShapeKey, value: bool) {
        let slot = match key {
            ShapeKey::Letter => &mut self.letter,
            ShapeKey::Branch => &mut self.branch,
            ShapeKey::Briefcase => &mut self.briefcase,
            ShapeKey::Kanban => &mut self.kanban,
            ShapeKey::Education => &mut self.education,
            ShapeKey::Gear => &mut self.gear,
        };
        *slot = value;
    }

    /// The single active key, resolved by precedence
    pub fn active_key(&self) -> Option<ShapeKey> {
        ShapeKey::ALL.iter().copied().find(|key| self.get(*key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shape_key() {
        assert_eq!("gear".parse::<ShapeKey>().unwrap(), ShapeKey::Gear);
        assert_eq!(" Letter ".parse::<ShapeKey>().unwrap(), ShapeKey::Letter);
        assert!("bear".parse::<ShapeKey>().is_err());
    }

    #[test]
    fn test_active_key_precedence() {
        assert_eq!(HoverFlags::none().active_key(), None);

        let mut flags = HoverFlags::only(ShapeKey::Gear);
        assert_eq!(flags.active_key(), Some(ShapeKey::Gear));

        flags.set(ShapeKey::Kanban, true);
        assert_eq!(flags.active_key(), Some(ShapeKey::Kanban));

        flags.set(ShapeKey::Letter, true);
        assert_eq!(flags.active_key(), Some(ShapeKey::Letter));
    }

    #[test]
    fn test_hover_flags_missing_fields_default_false() {
        let flags: HoverFlags = serde_json::from_str(r#"{"branch": true}"#).unwrap();
        assert_eq!(flags.active_key(), Some(ShapeKey::Branch));
        assert!(!flags.letter);
    }
}
