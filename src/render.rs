//! Render synchronization.
//!
//! Computes the fill of every province from the current map state and pushes
//! it to a `Painter`. The pass only reads the state, so running it any number
//! of times on the same state paints the same colors.

use std::collections::HashMap;

use crate::board::color::Color;
use crate::board::state::MapState;

/// The painting capability: set one region's fill color.
pub trait Painter {
    fn set_fill(&mut self, region: &str, color: &Color);
}

/// Returns the fill for every province, in load order.
///
/// Owned provinces take their owner's color; everything else is `neutral`.
pub fn compute_fills(state: &MapState, neutral: &Color) -> Vec<(String, Color)> {
    state
        .provinces
        .iter()
        .map(|p| {
            let color = p
                .owner()
                .and_then(|owner| state.countries.get(owner))
                .map(|c| c.color().clone())
                .unwrap_or_else(|| neutral.clone());
            (p.id().to_string(), color)
        })
        .collect()
}

/// Paints every province once. Returns the number of regions painted.
pub fn sync<P: Painter + ?Sized>(state: &MapState, neutral: &Color, painter: &mut P) -> usize {
    let fills = compute_fills(state, neutral);
    for (region, color) in &fills {
        painter.set_fill(region, color);
    }
    fills.len()
}

/// In-memory painter that records the last fill applied to each region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillTable {
    fills: HashMap<String, Color>,
    order: Vec<String>,
}

impl FillTable {
    pub fn new() -> Self {
        FillTable::default()
    }

    /// The current fill of a region, if it has ever been painted.
    pub fn get(&self, region: &str) -> Option<&Color> {
        self.fills.get(region)
    }

    /// Regions with their fills, in the order they were first painted.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Color)> {
        self.order
            .iter()
            .filter_map(|r| self.fills.get(r).map(|c| (r.as_str(), c)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Painter for FillTable {
    fn set_fill(&mut self, region: &str, color: &Color) {
        if self.fills.insert(region.to_string(), color.clone()).is_none() {
            self.order.push(region.to_string());
        }
    }
}
