//! Scripted message sequences for offline and headless runs

use crate::message::Command;
use mote_core::{MoteError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A command scheduled at a presentation frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledCommand {
    pub at_frame: u32,
    pub command: Command,
}

/// A fixed number of frames plus timed commands, loaded from TOML:
///
/// ```toml
/// frames = 240
///
/// [[events]]
/// at_frame = 10
/// command = { type = "hover", letter = true }
///
/// [[events]]
/// at_frame = 150
/// command = { type = "hover" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub frames: u32,
    #[serde(default)]
    pub events: Vec<ScheduledCommand>,
}

impl Scenario {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let mut scenario: Self = toml::from_str(s)?;
        scenario.events.sort_by_key(|e| e.at_frame);
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<()> {
        if let Some(late) = self.events.iter().find(|e| e.at_frame >= self.frames) {
            return Err(MoteError::InvalidConfig(format!(
                "event at frame {} is past the last frame {}",
                late.at_frame,
                self.frames.saturating_sub(1)
            )));
        }
        Ok(())
    }

    /// Commands due at `frame`, in file order
    pub fn commands_at(&self, frame: u32) -> impl Iterator<Item = Command> + '_ {
        self.events
            .iter()
            .filter(move |e| e.at_frame == frame)
            .map(|e| e.command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mote_core::{HoverFlags, ShapeKey};

    const SCENARIO: &str = r#"
frames = 120

[[events]]
at_frame = 60
command = { type = "hover" }

[[events]]
at_frame = 5
command = { type = "hover", gear = true }

[[events]]
at_frame = 60
command = { type = "resize", width = 640, height = 400 }
"#;

    #[test]
    fn test_parse_and_order_events() {
        let scenario = Scenario::from_toml_str(SCENARIO).unwrap();
        assert_eq!(scenario.frames, 120);
        assert_eq!(scenario.events[0].at_frame, 5);
        assert_eq!(
            scenario.commands_at(5).collect::<Vec<_>>(),
            vec![Command::Hover(HoverFlags::only(ShapeKey::Gear))]
        );
        let at_60: Vec<_> = scenario.commands_at(60).collect();
        assert_eq!(at_60.len(), 2);
        assert_eq!(at_60[0], Command::Hover(HoverFlags::none()));
        assert_eq!(scenario.commands_at(61).count(), 0);
    }

    #[test]
    fn test_rejects_events_past_the_end() {
        let err = Scenario::from_toml_str("frames = 3\n[[events]]\nat_frame = 3\ncommand = { type = \"dispose\" }\n")
            .unwrap_err();
        assert!(matches!(err, MoteError::InvalidConfig(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scenario.toml");
        std::fs::write(&path, SCENARIO).unwrap();
        assert_eq!(Scenario::load(&path).unwrap().events.len(), 3);
    }
}
