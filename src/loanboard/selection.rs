//! # Selection and Drafts
//!
//! A [`Selection`] is the per-category choice made while authoring one product.
//! It holds the chosen preset *by value*: picking by index copies the preset
//! out of the current [`PresetSet`] snapshot, so later preset edits never
//! reach back into a draft.
//!
//! Reopening a stored product goes the other way ([`Selection::for_product`]):
//! each stored text is matched against the current presets by value, and when
//! nothing matches (the preset was edited or deleted since) the first preset of
//! that category is chosen instead.

use crate::error::{CatalogError, Result};
use crate::model::{AmountPreset, PresetCategory, PresetSet, Product};
use serde::Serialize;
use uuid::Uuid;

/// Shown for a category with nothing chosen.
pub const NO_SELECTION: &str = "--";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub amount: Option<AmountPreset>,
    pub procedure: Option<String>,
    pub period: Option<String>,
    pub age: Option<String>,
    pub promotion: Option<String>,
    pub discount: Option<String>,
}

impl Selection {
    /// First entry of every category.
    pub fn defaults(presets: &PresetSet) -> Self {
        Self {
            amount: presets.amounts.first().cloned(),
            procedure: presets.procedures.first().cloned(),
            period: presets.periods.first().cloned(),
            age: presets.ages.first().cloned(),
            promotion: presets.promotions.first().cloned(),
            discount: presets.discounts.first().cloned(),
        }
    }

    /// Resolves a stored product back onto the current presets.
    pub fn for_product(product: &Product, presets: &PresetSet) -> Self {
        let amount = presets
            .amounts
            .iter()
            .find(|a| a.value == product.amount && a.unit == product.unit)
            .or_else(|| presets.amounts.first())
            .cloned();

        Self {
            amount,
            procedure: match_or_first(&presets.procedures, &product.procedure),
            period: match_or_first(&presets.periods, &product.period),
            age: match_or_first(&presets.ages, &product.age),
            promotion: match_or_first(&presets.promotions, &product.promotion),
            discount: match_or_first(&presets.discounts, &product.discount),
        }
    }

    /// Chooses the preset at `index` (0-based) of the given snapshot.
    pub fn select(
        &mut self,
        presets: &PresetSet,
        category: PresetCategory,
        index: usize,
    ) -> Result<()> {
        let missing = || {
            CatalogError::NotFound(format!(
                "{} preset {} (there are {})",
                category.title(),
                index + 1,
                presets.len(category)
            ))
        };

        match category {
            PresetCategory::Amount => {
                self.amount = Some(presets.amounts.get(index).cloned().ok_or_else(missing)?);
            }
            other => {
                let value = presets
                    .texts(other)
                    .and_then(|list| list.get(index))
                    .cloned()
                    .ok_or_else(missing)?;
                if let Some(slot) = self.text_slot(other) {
                    *slot = Some(value);
                }
            }
        }
        Ok(())
    }

    fn text_slot(&mut self, category: PresetCategory) -> Option<&mut Option<String>> {
        match category {
            PresetCategory::Amount => None,
            PresetCategory::Procedure => Some(&mut self.procedure),
            PresetCategory::Period => Some(&mut self.period),
            PresetCategory::Age => Some(&mut self.age),
            PresetCategory::Promotion => Some(&mut self.promotion),
            PresetCategory::Discount => Some(&mut self.discount),
        }
    }

    fn text(&self, category: PresetCategory) -> Option<&String> {
        match category {
            PresetCategory::Amount => None,
            PresetCategory::Procedure => self.procedure.as_ref(),
            PresetCategory::Period => self.period.as_ref(),
            PresetCategory::Age => self.age.as_ref(),
            PresetCategory::Promotion => self.promotion.as_ref(),
            PresetCategory::Discount => self.discount.as_ref(),
        }
    }

    /// The confirmation string for one category.
    pub fn display(&self, category: PresetCategory) -> String {
        match category {
            PresetCategory::Amount => self
                .amount
                .as_ref()
                .map(AmountPreset::label)
                .unwrap_or_else(|| NO_SELECTION.to_string()),
            other => self
                .text(other)
                .cloned()
                .unwrap_or_else(|| NO_SELECTION.to_string()),
        }
    }

    /// Whether the preset at `index` equals the current choice.
    /// Duplicated presets all read as selected.
    pub fn is_selected(&self, presets: &PresetSet, category: PresetCategory, index: usize) -> bool {
        match category {
            PresetCategory::Amount => match (&self.amount, presets.amounts.get(index)) {
                (Some(chosen), Some(preset)) => chosen == preset,
                _ => false,
            },
            other => match (self.text(other), presets.texts(other).and_then(|l| l.get(index))) {
                (Some(chosen), Some(preset)) => chosen == preset,
                _ => false,
            },
        }
    }

    /// Picker rows for every category, used by the views.
    pub fn pickers(&self, presets: &PresetSet) -> Vec<PresetPicker> {
        PresetCategory::ALL
            .iter()
            .map(|&category| PresetPicker {
                category: category.as_str().to_string(),
                title: category.title().to_string(),
                selected: self.display(category),
                options: presets
                    .labels(category)
                    .into_iter()
                    .enumerate()
                    .map(|(i, label)| PickerOption {
                        number: i + 1,
                        label,
                        selected: self.is_selected(presets, category, i),
                    })
                    .collect(),
            })
            .collect()
    }
}

fn match_or_first(list: &[String], value: &str) -> Option<String> {
    list.iter()
        .find(|p| p.as_str() == value)
        .or_else(|| list.first())
        .cloned()
}

#[derive(Debug, Clone, Serialize)]
pub struct PresetPicker {
    pub category: String,
    pub title: String,
    pub selected: String,
    pub options: Vec<PickerOption>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PickerOption {
    pub number: usize,
    pub label: String,
    pub selected: bool,
}

/// The product form: free-text fields plus the preset selection.
///
/// `editing` names the record being overwritten; `None` appends a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub image: String,
    pub link: String,
    pub selection: Selection,
    pub editing: Option<Uuid>,
}

impl ProductDraft {
    pub fn new(presets: &PresetSet) -> Self {
        Self {
            name: String::new(),
            image: String::new(),
            link: String::new(),
            selection: Selection::defaults(presets),
            editing: None,
        }
    }

    pub fn for_product(product: &Product, presets: &PresetSet) -> Self {
        Self {
            name: product.name.clone(),
            image: product.image.clone(),
            link: product.link.clone(),
            selection: Selection::for_product(product, presets),
            editing: Some(product.id),
        }
    }

    /// Names of the required fields that are blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("image", &self.image),
            ("link", &self.link),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(k, _)| k)
        .collect()
    }

    /// Builds the record this draft would store. Empty categories save as empty text.
    pub fn to_product(&self) -> Product {
        let sel = &self.selection;
        let (amount, unit) = sel
            .amount
            .as_ref()
            .map(|a| (a.value.clone(), a.unit.clone()))
            .unwrap_or_default();

        Product {
            id: self.editing.unwrap_or_else(Uuid::new_v4),
            name: self.name.clone(),
            image: self.image.clone(),
            link: self.link.clone(),
            discount: sel.discount.clone().unwrap_or_default(),
            amount,
            unit,
            procedure: sel.procedure.clone().unwrap_or_default(),
            period: sel.period.clone().unwrap_or_default(),
            age: sel.age.clone().unwrap_or_default(),
            promotion: sel.promotion.clone().unwrap_or_default(),
        }
    }
}
