//! Agent configuration.
//!
//! All knobs are heuristic tuning; none of them can weaken the escape
//! safety invariant. Every field has a default, so a partial JSON document
//! (or `{}`) is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Top-level configuration for both phases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub seek: SeekConfig,
    pub collector: CollectorConfig,
}

impl AgentConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: AgentConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.collector.validate()
    }
}

// ============================================================================
// Seek
// ============================================================================

/// Order in which the exploration tries a node's unvisited neighbors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborOrder {
    /// Whatever order the environment reports.
    #[default]
    AsGiven,
    /// Smallest reported distance-to-target first; ties keep environment order.
    ClosestFirst,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeekConfig {
    pub neighbor_order: NeighborOrder,
}

// ============================================================================
// Collector
// ============================================================================

/// One breakpoint of the candidate scoring curve.
///
/// Applies to nodes whose base value is strictly greater than `above`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriorityTier {
    pub above: u32,
    pub scale: f64,
}

impl PriorityTier {
    pub const fn new(above: u32, scale: f64) -> Self {
        Self { above, scale }
    }
}

/// Scoring used to rank collection candidates.
///
/// A candidate with base value `b` at distance `d` scores
/// `-(b / d) * scale` under the first tier with `b > above`, and
/// `no_preference` when no tier applies. Lower scores are tried first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    pub no_preference: f64,
    /// Tiers used when the candidate set is first built.
    pub initial_tiers: Vec<PriorityTier>,
    /// Tiers used every time the candidate set is rebuilt after a move.
    pub replan_tiers: Vec<PriorityTier>,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            no_preference: 1000.0,
            initial_tiers: vec![
                PriorityTier::new(400, 1.0),
                PriorityTier::new(200, 1.0),
                PriorityTier::new(10, 1.0),
            ],
            replan_tiers: vec![
                PriorityTier::new(450, 8.0),
                PriorityTier::new(100, 1.0),
                PriorityTier::new(10, 1.0),
            ],
        }
    }
}

impl CollectorConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.no_preference.is_finite() {
            return Err(Error::InvalidConfig("no_preference must be finite".into()));
        }
        for tier in self.initial_tiers.iter().chain(&self.replan_tiers) {
            if !tier.scale.is_finite() || tier.scale <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "tier above {} has scale {}; scale must be positive",
                    tier.above, tier.scale
                )));
            }
        }
        Ok(())
    }
}
