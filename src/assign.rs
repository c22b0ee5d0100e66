//! Province assignment.
//!
//! `assign` and `unassign` are the only operations that change ownership.
//! Both validate their inputs before touching either registry, so a rejected
//! call leaves the state exactly as it was, and a completed call always
//! leaves the province's owner and the countries' territory sets in
//! agreement.

use tracing::debug;

use crate::board::country::CountryId;
use crate::board::state::MapState;

/// Reasons an assignment request is rejected. None of them mutate state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssignError {
    #[error("unknown province '{0}'")]
    UnknownProvince(String),

    #[error("unknown country {0}")]
    UnknownCountry(CountryId),
}

/// Result of a successful `assign`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignment {
    /// The province was neutral and now belongs to `to`.
    Claimed { to: CountryId },
    /// The province moved from one country to another.
    Transferred { from: CountryId, to: CountryId },
    /// The province already belonged to the target country.
    Unchanged { owner: CountryId },
}

impl Assignment {
    /// The owner after the assignment.
    pub fn owner(self) -> CountryId {
        match self {
            Assignment::Claimed { to } => to,
            Assignment::Transferred { to, .. } => to,
            Assignment::Unchanged { owner } => owner,
        }
    }
}

/// Result of a successful `unassign`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// The province was owned by `from` and is now neutral.
    Released { from: CountryId },
    /// The province was already neutral.
    AlreadyNeutral,
}

/// Makes `country` the owner of `province`.
///
/// Any previous owner loses the province before the new owner is recorded.
/// Reassigning a province to its current owner is a no-op.
pub fn assign(
    state: &mut MapState,
    province: &str,
    country: CountryId,
) -> Result<Assignment, AssignError> {
    let previous = state
        .provinces
        .get(province)
        .ok_or_else(|| AssignError::UnknownProvince(province.to_string()))?
        .owner();
    if !state.countries.contains(country) {
        return Err(AssignError::UnknownCountry(country));
    }

    if let Some(old) = previous {
        if let Some(old_country) = state.countries.get_mut(old) {
            old_country.remove_territory(province);
        }
    }
    if let Some(target) = state.countries.get_mut(country) {
        target.add_territory(province);
    }
    if let Some(p) = state.provinces.get_mut(province) {
        p.set_owner(Some(country));
    }

    let outcome = match previous {
        None => Assignment::Claimed { to: country },
        Some(old) if old == country => Assignment::Unchanged { owner: country },
        Some(old) => Assignment::Transferred { from: old, to: country },
    };
    debug!(province, ?outcome, "assigned");
    debug_assert!(state.check_invariant().is_ok());
    Ok(outcome)
}

/// Clears the owner of `province`, removing it from the owner's territory set.
///
/// Unassigning a neutral province succeeds and changes nothing.
pub fn unassign(state: &mut MapState, province: &str) -> Result<Release, AssignError> {
    let previous = state
        .provinces
        .get(province)
        .ok_or_else(|| AssignError::UnknownProvince(province.to_string()))?
        .owner();

    let outcome = match previous {
        Some(old) => {
            if let Some(old_country) = state.countries.get_mut(old) {
                old_country.remove_territory(province);
            }
            Release::Released { from: old }
        }
        None => Release::AlreadyNeutral,
    };
    if let Some(p) = state.provinces.get_mut(province) {
        p.set_owner(None);
    }

    debug!(province, ?outcome, "unassigned");
    debug_assert!(state.check_invariant().is_ok());
    Ok(outcome)
}
