//! User overrides of category display data, and caching of assets derived from them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::category::{Category, CategoryCatalog, CategoryData};
use crate::errors::Result;

/// Structural equality over icon type, icon name and color.
pub fn category_data_equals(a: &CategoryData, b: &CategoryData) -> bool {
    a == b
}

/// Per-category display overrides keyed by category name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryAssociations {
    entries: BTreeMap<String, CategoryData>,
}

impl CategoryAssociations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, category: impl Into<String>, data: CategoryData) -> Option<CategoryData> {
        self.entries.insert(category.into(), data)
    }

    pub fn remove(&mut self, category: &str) -> Option<CategoryData> {
        self.entries.remove(category)
    }

    pub fn get(&self, category: &str) -> Option<&CategoryData> {
        self.entries.get(category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Override for the category, or its default display data.
    pub fn resolve<'a>(&'a self, category: &'a Category) -> &'a CategoryData {
        self.entries.get(&category.name).unwrap_or(&category.data)
    }

    /// Like [`resolve`](Self::resolve) but by name; unknown names are an error.
    pub fn resolve_name<'a>(
        &'a self,
        catalog: &'a CategoryCatalog,
        name: &str,
    ) -> Result<&'a CategoryData> {
        let category = catalog.require(name)?;
        Ok(self.resolve(category))
    }

    /// True when the key sets differ or any shared key maps to different data.
    pub fn differs_from(&self, other: &CategoryAssociations) -> bool {
        if !self.entries.keys().eq(other.entries.keys()) {
            return true;
        }
        self.entries
            .iter()
            .any(|(name, data)| match other.entries.get(name) {
                Some(previous) => !category_data_equals(data, previous),
                None => true,
            })
    }

    /// Catalog categories whose resolved display data differs between snapshots.
    pub fn changed_categories<'c>(
        &self,
        previous: &CategoryAssociations,
        catalog: &'c CategoryCatalog,
    ) -> Vec<&'c str> {
        catalog
            .iter()
            .filter(|category| {
                !category_data_equals(self.resolve(category), previous.resolve(category))
            })
            .map(|category| category.name.as_str())
            .collect()
    }
}

/// Display assets derived per category, recomputed only when associations change.
#[derive(Debug, Clone)]
pub struct AssetCache<T> {
    assets: BTreeMap<String, T>,
    snapshot: Option<CategoryAssociations>,
}

impl<T> Default for AssetCache<T> {
    fn default() -> Self {
        Self {
            assets: BTreeMap::new(),
            snapshot: None,
        }
    }
}

impl<T> AssetCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: &str) -> Option<&T> {
        self.assets.get(category)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Brings the cache in line with `associations`, returning how many assets were derived.
    pub fn refresh<F>(
        &mut self,
        catalog: &CategoryCatalog,
        associations: &CategoryAssociations,
        mut derive: F,
    ) -> usize
    where
        F: FnMut(&Category, &CategoryData) -> T,
    {
        let stale: Vec<&Category> = match &self.snapshot {
            Some(previous) if !associations.differs_from(previous) => catalog
                .iter()
                .filter(|category| !self.assets.contains_key(&category.name))
                .collect(),
            Some(previous) => catalog
                .iter()
                .filter(|category| {
                    !self.assets.contains_key(&category.name)
                        || !category_data_equals(
                            associations.resolve(category),
                            previous.resolve(category),
                        )
                })
                .collect(),
            None => catalog.iter().collect(),
        };

        for category in stale.iter().copied() {
            let asset = derive(category, associations.resolve(category));
            self.assets.insert(category.name.clone(), asset);
        }
        self.snapshot = Some(associations.clone());
        tracing::debug!(recomputed = stale.len(), "category assets refreshed");
        stale.len()
    }
}
