//! Map state representation.
//!
//! Pairs the country and province registries and checks the bidirectional
//! ownership invariant between them.

use super::country::{CountryId, CountryRegistry};
use super::province::ProvinceRegistry;

/// A broken link between the two sides of the ownership relationship.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("province '{province}' names owner {owner}, which is not a known country")]
    UnknownOwner { province: String, owner: CountryId },

    #[error("province '{province}' is owned by {owner} but missing from its territory set")]
    MissingFromOwner { province: String, owner: CountryId },

    #[error("country {country} lists '{province}', which is not a known province")]
    UnknownTerritory { country: CountryId, province: String },

    #[error("country {country} lists '{province}', whose owner is {actual:?}")]
    ForeignTerritory {
        country: CountryId,
        province: String,
        actual: Option<CountryId>,
    },
}

/// Complete assignment state for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapState {
    pub countries: CountryRegistry,
    pub provinces: ProvinceRegistry,
}

impl MapState {
    /// Creates a state with the given countries and no provinces.
    pub fn new(countries: CountryRegistry) -> Self {
        MapState {
            countries,
            provinces: ProvinceRegistry::new(),
        }
    }

    /// Verifies that every owner link has a matching territory entry and vice versa.
    pub fn check_invariant(&self) -> Result<(), InvariantViolation> {
        for province in self.provinces.iter() {
            let Some(owner) = province.owner() else {
                continue;
            };
            let country = self
                .countries
                .get(owner)
                .ok_or_else(|| InvariantViolation::UnknownOwner {
                    province: province.id().to_string(),
                    owner,
                })?;
            if !country.owns(province.id()) {
                return Err(InvariantViolation::MissingFromOwner {
                    province: province.id().to_string(),
                    owner,
                });
            }
        }

        for country in self.countries.iter() {
            for id in country.territories() {
                let province =
                    self.provinces
                        .get(id)
                        .ok_or_else(|| InvariantViolation::UnknownTerritory {
                            country: country.id(),
                            province: id.clone(),
                        })?;
                if province.owner() != Some(country.id()) {
                    return Err(InvariantViolation::ForeignTerritory {
                        country: country.id(),
                        province: id.clone(),
                        actual: province.owner(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Number of provinces with no owner.
    pub fn neutral_count(&self) -> usize {
        self.provinces.iter().filter(|p| p.owner().is_none()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(ids: &[&str]) -> MapState {
        let mut state = MapState::new(CountryRegistry::standard());
        for id in ids {
            state.provinces.insert(id);
        }
        state
    }

    #[test]
    fn empty_state_is_consistent() {
        let state = state_with(&["a", "b"]);
        assert_eq!(state.check_invariant(), Ok(()));
        assert_eq!(state.neutral_count(), 2);
    }

    #[test]
    fn detects_owner_without_territory() {
        let mut state = state_with(&["a"]);
        state.provinces.get_mut("a").unwrap().set_owner(Some(CountryId(1)));
        assert_eq!(
            state.check_invariant(),
            Err(InvariantViolation::MissingFromOwner {
                province: "a".to_string(),
                owner: CountryId(1),
            })
        );
    }

    #[test]
    fn detects_unknown_owner() {
        let mut state = state_with(&["a"]);
        state.provinces.get_mut("a").unwrap().set_owner(Some(CountryId(99)));
        assert!(matches!(
            state.check_invariant(),
            Err(InvariantViolation::UnknownOwner { .. })
        ));
    }

    #[test]
    fn detects_territory_without_owner() {
        let mut state = state_with(&["a"]);
        state.countries.get_mut(CountryId(2)).unwrap().add_territory("a");
        assert_eq!(
            state.check_invariant(),
            Err(InvariantViolation::ForeignTerritory {
                country: CountryId(2),
                province: "a".to_string(),
                actual: None,
            })
        );
    }

    #[test]
    fn detects_unknown_territory() {
        let mut state = state_with(&[]);
        state.countries.get_mut(CountryId(1)).unwrap().add_territory("ghost");
        assert!(matches!(
            state.check_invariant(),
            Err(InvariantViolation::UnknownTerritory { .. })
        ));
    }
}
