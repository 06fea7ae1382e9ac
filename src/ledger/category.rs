//! Category catalog and the display data attached to each category.

use std::{collections::HashSet, fmt, str::FromStr};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, StatsError};

/// Icon font families a category icon can be drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum IconSource {
    Material,
    MaterialCommunity,
    FontAwesome,
    Ionicon,
    Entypo,
    Octicon,
    Feather,
    SimpleLineIcon,
    Zocial,
    Foundation,
    EvilIcon,
    AntDesign,
}

/// Type tags as stored in associations, resolved in one place.
const ICON_SOURCE_TAGS: &[(&str, IconSource)] = &[
    ("material", IconSource::Material),
    ("material-community", IconSource::MaterialCommunity),
    ("font-awesome", IconSource::FontAwesome),
    ("ionicon", IconSource::Ionicon),
    ("entypo", IconSource::Entypo),
    ("octicon", IconSource::Octicon),
    ("feather", IconSource::Feather),
    ("simple-line-icon", IconSource::SimpleLineIcon),
    ("zocial", IconSource::Zocial),
    ("foundation", IconSource::Foundation),
    ("evilicon", IconSource::EvilIcon),
    ("antdesign", IconSource::AntDesign),
];

impl IconSource {
    pub fn from_tag(tag: &str) -> Result<Self> {
        ICON_SOURCE_TAGS
            .iter()
            .find(|(candidate, _)| *candidate == tag)
            .map(|(_, source)| *source)
            .ok_or_else(|| StatsError::UnknownIconSource(tag.to_string()))
    }

    pub fn tag(self) -> &'static str {
        ICON_SOURCE_TAGS
            .iter()
            .find(|(_, source)| *source == self)
            .map(|(tag, _)| *tag)
            .unwrap_or("material")
    }
}

impl fmt::Display for IconSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for IconSource {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_tag(s)
    }
}

impl TryFrom<String> for IconSource {
    type Error = StatsError;

    fn try_from(value: String) -> Result<Self> {
        Self::from_tag(&value)
    }
}

impl From<IconSource> for String {
    fn from(source: IconSource) -> Self {
        source.tag().to_string()
    }
}

/// Icon reference: which family plus the glyph name inside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IconDescriptor {
    #[serde(rename = "type")]
    pub source: IconSource,
    pub name: String,
}

impl IconDescriptor {
    pub fn new(source: IconSource, name: impl Into<String>) -> Self {
        Self {
            source,
            name: name.into(),
        }
    }
}

/// Display data for a category. Equality is structural over icon and color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryData {
    pub icon: IconDescriptor,
    /// Hex color without the leading `#`.
    pub color: String,
}

impl CategoryData {
    pub fn new(source: IconSource, icon_name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            icon: IconDescriptor::new(source, icon_name),
            color: color.into(),
        }
    }

    pub fn css_color(&self) -> String {
        format!("#{}", self.color)
    }
}

/// A spending or income category with its default display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub data: CategoryData,
}

impl Category {
    pub fn new(name: impl Into<String>, data: CategoryData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// Fixed, ordered set of categories known to the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCatalog {
    categories: Vec<Category>,
}

static BUILTIN: Lazy<CategoryCatalog> = Lazy::new(|| CategoryCatalog {
    categories: builtin_categories(),
});

impl CategoryCatalog {
    /// Builds a catalog, rejecting repeated names.
    pub fn new(categories: Vec<Category>) -> Result<Self> {
        let mut seen = HashSet::new();
        for category in &categories {
            if !seen.insert(category.name.as_str()) {
                return Err(StatsError::DuplicateCategory(category.name.clone()));
            }
        }
        Ok(Self { categories })
    }

    /// Catalog shipped with the application.
    pub fn builtin() -> &'static CategoryCatalog {
        &BUILTIN
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|category| category.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.name == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.categories
            .iter()
            .position(|category| category.name == name)
    }

    /// Looks up a category that must exist. A miss is a data-integrity fault.
    pub fn require(&self, name: &str) -> Result<&Category> {
        self.find(name).ok_or_else(|| unknown_category(name))
    }

    /// Catalog position of a category that must exist.
    pub fn require_position(&self, name: &str) -> Result<usize> {
        self.position(name).ok_or_else(|| unknown_category(name))
    }
}

fn unknown_category(name: &str) -> StatsError {
    tracing::error!(category = name, "category missing from catalog");
    StatsError::UnknownCategory(name.to_string())
}

fn builtin_categories() -> Vec<Category> {
    use IconSource::*;

    [
        ("Food", MaterialCommunity, "food", "e57373"),
        ("Groceries", MaterialCommunity, "cart", "f06292"),
        ("Rent", MaterialCommunity, "home", "ba68c8"),
        ("Transport", MaterialCommunity, "bus", "7986cb"),
        ("Utilities", MaterialCommunity, "flash", "4fc3f7"),
        ("Health", FontAwesome, "heartbeat", "4db6ac"),
        ("Entertainment", MaterialCommunity, "movie", "aed581"),
        ("Shopping", MaterialCommunity, "shopping", "ffd54f"),
        ("Travel", MaterialCommunity, "airplane", "ff8a65"),
        ("Education", MaterialCommunity, "school", "a1887f"),
        ("Salary", MaterialCommunity, "cash", "81c784"),
        ("Gifts", Ionicon, "md-gift", "9575cd"),
        ("Other", MaterialCommunity, "dots-horizontal", "90a4ae"),
    ]
    .into_iter()
    .map(|(name, source, icon, color)| Category::new(name, CategoryData::new(source, icon, color)))
    .collect()
}
