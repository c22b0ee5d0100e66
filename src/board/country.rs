//! Countries and the country registry.
//!
//! The country population is fixed when the registry is built. Each country
//! records the ids of the provinces it currently owns; the province side of
//! the relationship lives in `ProvinceRegistry`.

use std::collections::{HashMap, HashSet};
use std::fmt;

use super::color::Color;

/// Stable identifier of a country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CountryId(pub u32);

impl fmt::Display for CountryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An owning entity with a display color and a set of owned provinces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    id: CountryId,
    name: String,
    color: Color,
    territories: HashSet<String>,
}

impl Country {
    /// Creates a country that owns nothing.
    pub fn new(id: CountryId, name: impl Into<String>, color: Color) -> Self {
        Country {
            id,
            name: name.into(),
            color,
            territories: HashSet::new(),
        }
    }

    pub fn id(&self) -> CountryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> &Color {
        &self.color
    }

    /// The ids of every province this country currently owns.
    pub fn territories(&self) -> &HashSet<String> {
        &self.territories
    }

    /// Returns true if the province is in this country's owned set.
    pub fn owns(&self, province: &str) -> bool {
        self.territories.contains(province)
    }

    /// Territory ids in sorted order, for stable reporting.
    pub fn sorted_territories(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.territories.iter().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Inserts a province id. Inserting an id that is already present is a no-op.
    pub(crate) fn add_territory(&mut self, province: &str) {
        if !self.territories.contains(province) {
            self.territories.insert(province.to_string());
        }
    }

    /// Removes a province id. Removing an absent id is a no-op.
    pub(crate) fn remove_territory(&mut self, province: &str) {
        self.territories.remove(province);
    }
}

/// Fixed set of countries with O(1) lookup by id.
///
/// Countries are kept in construction order; `index` maps an id to its slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryRegistry {
    countries: Vec<Country>,
    index: HashMap<CountryId, usize>,
}

impl CountryRegistry {
    /// Builds a registry from a list of countries.
    ///
    /// Returns the first duplicated id if two countries share one.
    pub fn new(countries: Vec<Country>) -> Result<Self, CountryId> {
        let mut index = HashMap::with_capacity(countries.len());
        for (slot, country) in countries.iter().enumerate() {
            if index.insert(country.id, slot).is_some() {
                return Err(country.id);
            }
        }
        Ok(CountryRegistry { countries, index })
    }

    /// The three-country population used when no configuration is supplied.
    pub fn standard() -> Self {
        let countries = vec![
            Country::new(CountryId(1), "Co1", Color(String::from("#FF0000"))),
            Country::new(CountryId(2), "Co2", Color(String::from("#00FF00"))),
            Country::new(CountryId(3), "Co3", Color(String::from("#0000FF"))),
        ];
        let index = countries
            .iter()
            .enumerate()
            .map(|(slot, c)| (c.id, slot))
            .collect();
        CountryRegistry { countries, index }
    }

    pub fn get(&self, id: CountryId) -> Option<&Country> {
        self.index.get(&id).map(|&slot| &self.countries[slot])
    }

    pub(crate) fn get_mut(&mut self, id: CountryId) -> Option<&mut Country> {
        match self.index.get(&id) {
            Some(&slot) => Some(&mut self.countries[slot]),
            None => None,
        }
    }

    pub fn contains(&self, id: CountryId) -> bool {
        self.index.contains_key(&id)
    }

    /// Countries in construction order.
    pub fn iter(&self) -> impl Iterator<Item = &Country> {
        self.countries.iter()
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}
