//! Preset maintenance.
//!
//! The one-shot functions edit a [`PresetSet`] in place. The interactive
//! manager goes through [`PresetEditor`] instead: it works on a copy and only
//! hands the result back when the session is saved, so quitting discards
//! every change made in the session.

use crate::commands::helpers::preset_position;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{AmountField, PresetCategory, PresetSet};

pub fn list(presets: &PresetSet) -> CmdResult {
    CmdResult::default().with_presets(presets.clone())
}

pub fn add(presets: &mut PresetSet, category: PresetCategory) -> CmdResult {
    let idx = presets.add(category);
    CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Added {} preset {}",
            category,
            idx + 1
        )))
        .with_presets(presets.clone())
        .mark_mutated()
}

/// `number` is 1-based, as shown by `presets list`.
pub fn set(
    presets: &mut PresetSet,
    category: PresetCategory,
    number: usize,
    field: Option<AmountField>,
    value: &str,
) -> Result<CmdResult> {
    presets.update(category, preset_position(number)?, field, value)?;
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Updated {} preset {}",
            category, number
        )))
        .with_presets(presets.clone())
        .mark_mutated())
}

pub fn remove(presets: &mut PresetSet, category: PresetCategory, number: usize) -> Result<CmdResult> {
    let removed = presets.delete(category, preset_position(number)?)?;
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Removed {} preset {}: {}",
            category, number, removed
        )))
        .with_presets(presets.clone())
        .mark_mutated())
}

/// Working copy for an interactive preset session.
#[derive(Debug, Clone)]
pub struct PresetEditor {
    working: PresetSet,
    dirty: bool,
}

impl PresetEditor {
    pub fn open(presets: &PresetSet) -> Self {
        Self {
            working: presets.clone(),
            dirty: false,
        }
    }

    pub fn presets(&self) -> &PresetSet {
        &self.working
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn add(&mut self, category: PresetCategory) -> CmdResult {
        self.dirty = true;
        add(&mut self.working, category)
    }

    pub fn set(
        &mut self,
        category: PresetCategory,
        number: usize,
        field: Option<AmountField>,
        value: &str,
    ) -> Result<CmdResult> {
        let result = set(&mut self.working, category, number, field, value)?;
        self.dirty = true;
        Ok(result)
    }

    pub fn remove(&mut self, category: PresetCategory, number: usize) -> Result<CmdResult> {
        let result = remove(&mut self.working, category, number)?;
        self.dirty = true;
        Ok(result)
    }

    /// Ends the session. `Some` only when something changed.
    pub fn finish(self) -> Option<PresetSet> {
        self.dirty.then_some(self.working)
    }
}
