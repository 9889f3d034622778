// src/progress/mod.rs

//! Player progress: XP, badges and how far the campaign is unlocked.
//!
//! The record is a plain value owned by the caller; persistence is an
//! explicit JSON round-trip.

use crate::core::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// XP between consecutive level unlocks.
pub const XP_PER_UNLOCK: u64 = 50;
/// XP for running any circuit.
pub const XP_PER_RUN: u64 = 5;
/// XP for meeting a level's goal.
pub const XP_PER_LEVEL: u64 = 20;

/// Missing keys take their defaults when loading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressRecord {
    pub xp: u64,
    /// Earned badges, in the order they were awarded.
    pub badges: Vec<String>,
    /// Index of the highest unlocked level.
    pub campaign_progress: usize,
}

impl ProgressRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn award_xp(&mut self, amount: u64) {
        self.xp = self.xp.saturating_add(amount);
    }

    /// Adds `name` unless already held. Returns whether it was new.
    pub fn award_badge(&mut self, name: &str) -> bool {
        if self.badges.iter().any(|b| b == name) {
            return false;
        }
        self.badges.push(name.to_string());
        true
    }

    pub fn has_badge(&self, name: &str) -> bool {
        self.badges.iter().any(|b| b == name)
    }

    /// Whether level `index` can be played.
    pub fn is_unlocked(&self, index: usize) -> bool {
        index <= self.campaign_progress
    }

    /// Completing the frontier level (or beyond) unlocks the next one, capped
    /// at the last of `level_count` levels. Replaying an earlier level changes nothing.
    pub fn complete_level(&mut self, index: usize, level_count: usize) {
        if index >= self.campaign_progress {
            self.campaign_progress = level_count.saturating_sub(1).min(index + 1);
        }
    }

    /// Run bookkeeping: every executed circuit earns [`XP_PER_RUN`],
    /// whether or not it met a goal.
    pub fn record_run(&mut self) {
        self.award_xp(XP_PER_RUN);
    }

    /// Success bookkeeping for level `index` named `name`: level XP, the
    /// teleportation badge where it applies, and the unlock.
    pub fn record_level_success(&mut self, index: usize, name: &str, level_count: usize) {
        self.award_xp(XP_PER_LEVEL);
        if name.contains("Teleport") {
            self.award_badge("Teleportation Wizard");
        }
        self.complete_level(index, level_count);
    }

    /// XP mark of the next unlock: `50 * (campaign_progress + 1)`, capped at the last level.
    pub fn next_unlock_threshold(&self, level_count: usize) -> u64 {
        let next = level_count.saturating_sub(1).min(self.campaign_progress + 1);
        XP_PER_UNLOCK * next as u64
    }

    /// XP still missing for the next unlock, 0 once reached.
    pub fn xp_to_next_unlock(&self, level_count: usize) -> u64 {
        self.next_unlock_threshold(level_count).saturating_sub(self.xp)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Writes the record to `path` as JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        debug!(path = %path.display(), xp = self.xp, "saved progress");
        Ok(())
    }

    /// Reads a record written by [`Self::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let record = Self::from_json(&std::fs::read_to_string(path)?)?;
        debug!(path = %path.display(), xp = record.xp, "loaded progress");
        Ok(record)
    }
}
