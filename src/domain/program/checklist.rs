//! Daily checklist: five fixed micro-tasks tracked as booleans.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One of the five daily micro-tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistItem {
    Breathing,
    Transverse,
    Vacuum,
    Rest,
    Posture,
}

impl ChecklistItem {
    /// Every item, in display order. Completing a day requires all of them.
    pub const ALL: [ChecklistItem; 5] = [
        ChecklistItem::Breathing,
        ChecklistItem::Transverse,
        ChecklistItem::Vacuum,
        ChecklistItem::Rest,
        ChecklistItem::Posture,
    ];

    /// Identifier used as key in `checklist_progress`.
    pub fn id(&self) -> &'static str {
        match self {
            ChecklistItem::Breathing => "breathing",
            ChecklistItem::Transverse => "transverse",
            ChecklistItem::Vacuum => "vacuum",
            ChecklistItem::Rest => "rest",
            ChecklistItem::Posture => "posture",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChecklistItem::Breathing => "Low breathing",
            ChecklistItem::Transverse => "Transverse activation",
            ChecklistItem::Vacuum => "Abdominal vacuum",
            ChecklistItem::Rest => "Active rest",
            ChecklistItem::Posture => "Keep a neutral posture",
        }
    }
}

impl fmt::Display for ChecklistItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Checked state per item id for the current day.
///
/// Keys are free-form strings so records written by other clients survive a
/// load; only the five fixed ids gate day completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChecklistProgress(BTreeMap<String, bool>);

impl ChecklistProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `item_id` is checked. Unknown ids read as unchecked.
    pub fn is_checked(&self, item_id: &str) -> bool {
        self.0.get(item_id).copied().unwrap_or(false)
    }

    /// Flips `item_id` and returns the new value.
    pub fn toggle(&mut self, item_id: &str) -> bool {
        let checked = !self.is_checked(item_id);
        self.0.insert(item_id.to_string(), checked);
        checked
    }

    /// True when all five fixed items are checked.
    pub fn all_required_checked(&self) -> bool {
        ChecklistItem::ALL
            .iter()
            .all(|item| self.is_checked(item.id()))
    }

    /// Number of entries currently checked.
    pub fn checked_count(&self) -> usize {
        self.0.values().filter(|checked| **checked).count()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &BTreeMap<String, bool> {
        &self.0
    }
}

impl From<BTreeMap<String, bool>> for ChecklistProgress {
    fn from(map: BTreeMap<String, bool>) -> Self {
        Self(map)
    }
}
