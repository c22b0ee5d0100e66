//! Provinces and the province registry.
//!
//! Provinces are created once, when the map asset is loaded, in document
//! order. A province's owner is a `CountryId` looked up in the
//! `CountryRegistry`; the registry alone owns the countries.

use std::collections::HashMap;

use super::country::CountryId;

/// An identifiable map region, owned by at most one country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Province {
    id: String,
    owner: Option<CountryId>,
}

impl Province {
    /// Creates an unowned province.
    pub fn new(id: impl Into<String>) -> Self {
        Province {
            id: id.into(),
            owner: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The current owner, or None if the province is neutral.
    pub fn owner(&self) -> Option<CountryId> {
        self.owner
    }

    pub(crate) fn set_owner(&mut self, owner: Option<CountryId>) {
        self.owner = owner;
    }
}

/// All provinces known to the session, with O(1) lookup by id.
///
/// Iteration follows insertion (map load) order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvinceRegistry {
    provinces: Vec<Province>,
    index: HashMap<String, usize>,
}

impl ProvinceRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        ProvinceRegistry::default()
    }

    /// Registers a new unowned province. Returns false if the id is already present.
    pub fn insert(&mut self, id: &str) -> bool {
        if self.index.contains_key(id) {
            return false;
        }
        self.index.insert(id.to_string(), self.provinces.len());
        self.provinces.push(Province::new(id));
        true
    }

    pub fn get(&self, id: &str) -> Option<&Province> {
        self.index.get(id).map(|&slot| &self.provinces[slot])
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Province> {
        match self.index.get(id) {
            Some(&slot) => Some(&mut self.provinces[slot]),
            None => None,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Provinces in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Province> {
        self.provinces.iter()
    }

    pub fn len(&self) -> usize {
        self.provinces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.provinces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_province_is_unowned() {
        let p = Province::new("TX_01");
        assert_eq!(p.id(), "TX_01");
        assert_eq!(p.owner(), None);
    }

    #[test]
    fn insert_preserves_order_and_rejects_duplicates() {
        let mut reg = ProvinceRegistry::new();
        assert!(reg.insert("b"));
        assert!(reg.insert("a"));
        assert!(!reg.insert("b"));

        let ids: Vec<&str> = reg.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn set_owner_through_lookup() {
        let mut reg = ProvinceRegistry::new();
        reg.insert("TX_01");
        reg.get_mut("TX_01").unwrap().set_owner(Some(CountryId(3)));
        assert_eq!(reg.get("TX_01").unwrap().owner(), Some(CountryId(3)));

        reg.get_mut("TX_01").unwrap().set_owner(None);
        assert_eq!(reg.get("TX_01").unwrap().owner(), None);
        assert!(reg.get_mut("missing").is_none());
    }
}
