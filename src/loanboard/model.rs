use crate::error::{CatalogError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Text used for freshly added presets until the user edits them.
pub const PLACEHOLDER_PRESET: &str = "Mới";
pub const DEFAULT_AMOUNT_UNIT: &str = "Triệu";
/// Units offered by the preset manager. Amount units are free text, this is only a hint.
pub const AMOUNT_UNITS: [&str; 3] = ["Triệu", "Tỷ", "Ngàn"];
pub const REMOTE_DOCUMENT_VERSION: &str = "1.0";

/// A single catalog listing.
///
/// Every field except `id` is plain text and is stored exactly as entered.
/// Documents written before ids existed (and remote documents) are accepted:
/// missing fields default to empty text and a missing id gets a fresh one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub image: String,
    pub link: String,
    pub discount: String,
    pub amount: String,
    pub unit: String,
    pub procedure: String,
    pub period: String,
    pub age: String,
    pub promotion: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountPreset {
    pub value: String,
    pub unit: String,
}

impl AmountPreset {
    pub fn new(value: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            unit: unit.into(),
        }
    }

    pub fn label(&self) -> String {
        format!("{} {}", self.value, self.unit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetCategory {
    Amount,
    Procedure,
    Period,
    Age,
    Promotion,
    Discount,
}

impl PresetCategory {
    pub const ALL: [PresetCategory; 6] = [
        PresetCategory::Amount,
        PresetCategory::Procedure,
        PresetCategory::Period,
        PresetCategory::Age,
        PresetCategory::Promotion,
        PresetCategory::Discount,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PresetCategory::Amount => "amount",
            PresetCategory::Procedure => "procedure",
            PresetCategory::Period => "period",
            PresetCategory::Age => "age",
            PresetCategory::Promotion => "promotion",
            PresetCategory::Discount => "discount",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PresetCategory::Amount => "Amount",
            PresetCategory::Procedure => "Procedure",
            PresetCategory::Period => "Period",
            PresetCategory::Age => "Age",
            PresetCategory::Promotion => "Promotion",
            PresetCategory::Discount => "Discount",
        }
    }
}

impl fmt::Display for PresetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresetCategory {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "amount" | "amounts" => Ok(PresetCategory::Amount),
            "procedure" | "procedures" => Ok(PresetCategory::Procedure),
            "period" | "periods" => Ok(PresetCategory::Period),
            "age" | "ages" => Ok(PresetCategory::Age),
            "promotion" | "promotions" => Ok(PresetCategory::Promotion),
            "discount" | "discounts" => Ok(PresetCategory::Discount),
            other => Err(CatalogError::Api(format!(
                "Unknown preset category: {}",
                other
            ))),
        }
    }
}

/// Which half of an amount preset an update targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountField {
    Value,
    Unit,
}

impl FromStr for AmountField {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "value" => Ok(AmountField::Value),
            "unit" => Ok(AmountField::Unit),
            other => Err(CatalogError::Api(format!(
                "Unknown amount field: {} (expected value or unit)",
                other
            ))),
        }
    }
}

/// The six pick-lists offered while authoring a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetSet {
    #[serde(default)]
    pub amounts: Vec<AmountPreset>,
    #[serde(default)]
    pub procedures: Vec<String>,
    #[serde(default)]
    pub periods: Vec<String>,
    #[serde(default)]
    pub ages: Vec<String>,
    #[serde(default)]
    pub promotions: Vec<String>,
    #[serde(default)]
    pub discounts: Vec<String>,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl Default for PresetSet {
    fn default() -> Self {
        Self {
            amounts: vec![
                AmountPreset::new("1-10", "Triệu"),
                AmountPreset::new("5-50", "Triệu"),
                AmountPreset::new("1-5", "Tỷ"),
                AmountPreset::new("10-100", "Triệu"),
            ],
            procedures: strings(&["CCCD", "CMND", "Hộ chiếu"]),
            periods: strings(&["3 tháng", "6 tháng", "12 tháng"]),
            ages: strings(&["20-60", "18-55", "21-65", "25-60"]),
            promotions: strings(&["Khuyến mãi", "Ưu đãi đặc biệt", "Tặng quà", "Giảm phí"]),
            discounts: strings(&["0% lãi", "Lãi suất thấp", "Giảm 50%", "Miễn phí"]),
        }
    }
}

impl PresetSet {
    pub fn len(&self, category: PresetCategory) -> usize {
        match category {
            PresetCategory::Amount => self.amounts.len(),
            other => self.texts(other).map(|v| v.len()).unwrap_or(0),
        }
    }

    pub fn is_empty(&self, category: PresetCategory) -> bool {
        self.len(category) == 0
    }

    /// The plain-text list behind a category. `None` for amounts.
    pub fn texts(&self, category: PresetCategory) -> Option<&Vec<String>> {
        match category {
            PresetCategory::Amount => None,
            PresetCategory::Procedure => Some(&self.procedures),
            PresetCategory::Period => Some(&self.periods),
            PresetCategory::Age => Some(&self.ages),
            PresetCategory::Promotion => Some(&self.promotions),
            PresetCategory::Discount => Some(&self.discounts),
        }
    }

    fn texts_mut(&mut self, category: PresetCategory) -> Option<&mut Vec<String>> {
        match category {
            PresetCategory::Amount => None,
            PresetCategory::Procedure => Some(&mut self.procedures),
            PresetCategory::Period => Some(&mut self.periods),
            PresetCategory::Age => Some(&mut self.ages),
            PresetCategory::Promotion => Some(&mut self.promotions),
            PresetCategory::Discount => Some(&mut self.discounts),
        }
    }

    /// Display labels for a category, in order.
    pub fn labels(&self, category: PresetCategory) -> Vec<String> {
        match category {
            PresetCategory::Amount => self.amounts.iter().map(AmountPreset::label).collect(),
            other => self.texts(other).cloned().unwrap_or_default(),
        }
    }

    /// Appends a placeholder entry and returns its index.
    pub fn add(&mut self, category: PresetCategory) -> usize {
        match self.texts_mut(category) {
            Some(list) => {
                list.push(PLACEHOLDER_PRESET.to_string());
                list.len() - 1
            }
            None => {
                self.amounts
                    .push(AmountPreset::new(PLACEHOLDER_PRESET, DEFAULT_AMOUNT_UNIT));
                self.amounts.len() - 1
            }
        }
    }

    /// Overwrites one entry in place.
    ///
    /// Amount presets are structured, so `field` picks the half to change.
    /// Text categories take no field.
    pub fn update(
        &mut self,
        category: PresetCategory,
        index: usize,
        field: Option<AmountField>,
        value: impl Into<String>,
    ) -> Result<()> {
        let value = value.into();
        let len = self.len(category);
        if index >= len {
            return Err(preset_out_of_range(category, index, len));
        }

        match (category, field) {
            (PresetCategory::Amount, Some(AmountField::Value)) => {
                self.amounts[index].value = value;
            }
            (PresetCategory::Amount, Some(AmountField::Unit)) => {
                self.amounts[index].unit = value;
            }
            (PresetCategory::Amount, None) => {
                return Err(CatalogError::Api(
                    "Amount presets need a field (value or unit)".to_string(),
                ));
            }
            (_, Some(_)) => {
                return Err(CatalogError::Api(format!(
                    "{} presets are plain text and take no field",
                    category.title()
                )));
            }
            (other, None) => {
                if let Some(list) = self.texts_mut(other) {
                    list[index] = value;
                }
            }
        }
        Ok(())
    }

    /// Removes one entry; later entries shift down so indices stay dense.
    /// Returns the label of the removed entry.
    pub fn delete(&mut self, category: PresetCategory, index: usize) -> Result<String> {
        let len = self.len(category);
        if index >= len {
            return Err(preset_out_of_range(category, index, len));
        }
        let removed = match self.texts_mut(category) {
            Some(list) => list.remove(index),
            None => self.amounts.remove(index).label(),
        };
        Ok(removed)
    }
}

fn preset_out_of_range(category: PresetCategory, index: usize, len: usize) -> CatalogError {
    CatalogError::NotFound(format!(
        "{} preset {} (there are {})",
        category.title(),
        index + 1,
        len
    ))
}

/// Ordered product collection. Position is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductStore {
    products: Vec<Product>,
}

impl ProductStore {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn as_slice(&self) -> &[Product] {
        &self.products
    }

    pub fn position(&self, id: &Uuid) -> Option<usize> {
        self.products.iter().position(|p| &p.id == id)
    }

    pub fn get(&self, id: &Uuid) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn at(&self, position: usize) -> Option<&Product> {
        self.products.get(position)
    }

    pub fn append(&mut self, product: Product) {
        self.products.push(product);
    }

    /// Replaces the record carrying `product.id`, keeping its position.
    pub fn replace(&mut self, product: Product) -> Result<usize> {
        let pos = self
            .position(&product.id)
            .ok_or(CatalogError::ProductNotFound(product.id))?;
        self.products[pos] = product;
        Ok(pos)
    }

    pub fn remove(&mut self, id: &Uuid) -> Result<Product> {
        let pos = self.position(id).ok_or(CatalogError::ProductNotFound(*id))?;
        Ok(self.products.remove(pos))
    }

    /// Swaps the record with its neighbour in `direction`.
    /// Returns false, leaving the store untouched, at either boundary.
    pub fn move_by(&mut self, id: &Uuid, direction: MoveDirection) -> Result<bool> {
        let pos = self.position(id).ok_or(CatalogError::ProductNotFound(*id))?;
        let target = match direction {
            MoveDirection::Up if pos == 0 => return Ok(false),
            MoveDirection::Up => pos - 1,
            MoveDirection::Down if pos + 1 >= self.products.len() => return Ok(false),
            MoveDirection::Down => pos + 1,
        };
        self.products.swap(pos, target);
        Ok(true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

impl FromStr for MoveDirection {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "up" | "-1" => Ok(MoveDirection::Up),
            "down" | "+1" | "1" => Ok(MoveDirection::Down),
            other => Err(CatalogError::Api(format!(
                "Invalid direction: {} (expected up or down)",
                other
            ))),
        }
    }
}

/// The payload mirrored to the remote document host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteDocument {
    pub last_updated: DateTime<Utc>,
    pub version: String,
    pub products: Vec<Product>,
}

impl RemoteDocument {
    pub fn new(products: &ProductStore) -> Self {
        Self {
            last_updated: Utc::now(),
            version: REMOTE_DOCUMENT_VERSION.to_string(),
            products: products.as_slice().to_vec(),
        }
    }
}
