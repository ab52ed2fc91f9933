//! Per-shape style parameters
//!
//! Every style has defaults tuned for an 800×520 canvas; the `[shapes]` table
//! of a config file overrides individual fields.

use serde::{Deserialize, Serialize};

/// Most commits drawn along the trunk or a single branch
pub const MAX_COMMITS: usize = 64;

/// `value` when finite and positive, `fallback` otherwise
fn positive_or(name: &str, value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        log::warn!("{name} {value} is degenerate, using {fallback}");
        fallback
    }
}

/// Drop a non-finite position override so the canvas-relative default applies
fn finite_or_none(name: &str, value: Option<f32>) -> Option<f32> {
    match value {
        Some(v) if !v.is_finite() => {
            log::warn!("{name} {v} is not finite, using the default");
            None
        }
        other => other,
    }
}

fn capped_commits(name: &str, commits: usize) -> usize {
    if commits > MAX_COMMITS {
        log::warn!("{name} {commits} too large, using {MAX_COMMITS}");
        MAX_COMMITS
    } else {
        commits
    }
}

/// Style for the branch-diagram logo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchLogoStyle {
    /// Line thickness (px)
    pub stroke: f32,
    /// Sampling stride along lines (px)
    pub step: f32,
    /// Commit node radius (px)
    pub node_radius: f32,
    /// Sampling stride around nodes (px)
    pub node_step: f32,
    /// Trunk x position; defaults to 46% of the canvas width
    pub trunk_x: Option<f32>,
}

impl Default for BranchLogoStyle {
    fn default() -> Self {
        Self {
            stroke: 9.0,
            step: 5.0,
            node_radius: 11.0,
            node_step: 5.0,
            trunk_x: None,
        }
    }
}

impl BranchLogoStyle {
    pub fn sanitized(&self) -> Self {
        let d = Self::default();
        Self {
            stroke: positive_or("branch.stroke", self.stroke, d.stroke),
            step: positive_or("branch.step", self.step, d.step),
            node_radius: positive_or("branch.node_radius", self.node_radius, d.node_radius),
            node_step: positive_or("branch.node_step", self.node_step, d.node_step),
            trunk_x: finite_or_none("branch.trunk_x", self.trunk_x),
        }
    }
}

/// Which education icon to draw
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationStyle {
    /// Mortarboard: diamond cap, brim strip, tassel
    #[default]
    Cap,
    /// Bordered sheet with text lines and a seal
    Diploma,
}

/// Which skills icon to draw
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillsStyle {
    #[default]
    Gear,
    /// A `< >` code-bracket pair
    Brackets,
}

/// Style for the gear icon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GearStyle {
    pub variant: SkillsStyle,
    pub teeth: u32,
}

impl Default for GearStyle {
    fn default() -> Self {
        Self {
            variant: SkillsStyle::Gear,
            teeth: 8,
        }
    }
}

/// Layout side of a branch relative to the trunk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchSide {
    #[default]
    Right,
    Left,
}

/// One branch of a commit-history diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchSpec {
    /// Trunk commit index this branch forks from
    pub fork_at: usize,
    /// Number of commits along the branch
    pub commits: usize,
    /// Horizontal spacing per commit (px)
    #[serde(default = "default_branch_dx")]
    pub dx: f32,
    /// Vertical spacing per commit (px, positive is down)
    #[serde(default = "default_branch_dy")]
    pub dy: f32,
    /// Trunk commit index the branch merges back into
    #[serde(default)]
    pub merge_to_trunk_at: Option<usize>,
    #[serde(default)]
    pub side: BranchSide,
}

fn default_branch_dx() -> f32 {
    70.0
}

fn default_branch_dy() -> f32 {
    36.0
}

impl BranchSpec {
    pub fn sanitized(&self) -> Self {
        let dx = if self.dx.is_finite() { self.dx } else { default_branch_dx() };
        let dy = if self.dy.is_finite() { self.dy } else { default_branch_dy() };
        Self {
            commits: capped_commits("branch commits", self.commits),
            dx,
            dy,
            ..self.clone()
        }
    }
}

/// Style for the full commit-history diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchHistoryStyle {
    pub trunk_commits: usize,
    /// Vertical spacing between trunk commits; defaults to `max(48, 7% of height)`
    pub trunk_spacing: Option<f32>,
    /// Trunk x position; defaults to 45% of the canvas width
    pub trunk_x: Option<f32>,
    pub stroke: f32,
    pub step: f32,
    pub node_radius: f32,
    pub node_step: f32,
    pub branches: Vec<BranchSpec>,
    /// Fraction of the budget spent on commit nodes
    pub nodes_ratio: f32,
    /// Fraction of the budget spent on the trunk line
    pub lines_ratio: f32,
}

impl Default for BranchHistoryStyle {
    fn default() -> Self {
        Self {
            trunk_commits: 10,
            trunk_spacing: None,
            trunk_x: None,
            stroke: 6.0,
            step: 6.0,
            node_radius: 7.0,
            node_step: 6.0,
            branches: vec![
                BranchSpec {
                    fork_at: 2,
                    commits: 4,
                    dx: 70.0,
                    dy: 36.0,
                    merge_to_trunk_at: Some(7),
                    side: BranchSide::Right,
                },
                BranchSpec {
                    fork_at: 4,
                    commits: 3,
                    dx: 65.0,
                    dy: 40.0,
                    merge_to_trunk_at: Some(8),
                    side: BranchSide::Left,
                },
                BranchSpec {
                    fork_at: 6,
                    commits: 2,
                    dx: 80.0,
                    dy: 32.0,
                    merge_to_trunk_at: None,
                    side: BranchSide::Right,
                },
            ],
            nodes_ratio: 0.30,
            lines_ratio: 0.20,
        }
    }
}

impl BranchHistoryStyle {
    pub fn sanitized(&self) -> Self {
        let d = Self::default();
        let ratio = |name: &str, value: f32, fallback: f32| {
            if value.is_finite() {
                value.clamp(0.0, 1.0)
            } else {
                log::warn!("history.{name} {value} is not finite, using {fallback}");
                fallback
            }
        };
        Self {
            trunk_commits: capped_commits("history.trunk_commits", self.trunk_commits),
            trunk_spacing: finite_or_none("history.trunk_spacing", self.trunk_spacing),
            trunk_x: finite_or_none("history.trunk_x", self.trunk_x),
            stroke: positive_or("history.stroke", self.stroke, d.stroke),
            step: positive_or("history.step", self.step, d.step),
            node_radius: positive_or("history.node_radius", self.node_radius, d.node_radius),
            node_step: positive_or("history.node_step", self.node_step, d.node_step),
            branches: self.branches.iter().map(BranchSpec::sanitized).collect(),
            nodes_ratio: ratio("nodes_ratio", self.nodes_ratio, d.nodes_ratio),
            lines_ratio: ratio("lines_ratio", self.lines_ratio, d.lines_ratio),
        }
    }
}

/// Style parameters for every generator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeStyles {
    pub branch: BranchLogoStyle,
    pub education: EducationStyle,
    pub gear: GearStyle,
    pub history: BranchHistoryStyle,
}

impl ShapeStyles {
    /// Replace degenerate values with defaults and cap commit counts
    pub fn sanitized(&self) -> Self {
        Self {
            branch: self.branch.sanitized(),
            education: self.education,
            gear: self.gear.clone(),
            history: self.history.sanitized(),
        }
    }
}
