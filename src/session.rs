//! Copy/cut/paste of deformation-target activation weights.
//!
//! The clipboard is an explicit session object: created by a copy or cut,
//! consumed by however many pastes the caller wants, dropped (or cleared)
//! when the session ends. There is no global copied-values store.

use crate::float_types::Real;
use crate::shape::TargetBank;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A snapshot of target-name to activation-weight pairs.
///
/// Serializes transparently as the flat name/weight mapping used by
/// [`crate::persist`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightClipboard {
    values: BTreeMap<String, Real>,
}

impl WeightClipboard {
    /// Capture every target's weight from the bank.
    pub fn copy(bank: &TargetBank) -> Self {
        Self {
            values: bank
                .iter()
                .map(|t| (t.name.clone(), t.weight))
                .collect(),
        }
    }

    /// Capture every target's weight, then zero them all.
    pub fn cut(bank: &mut TargetBank) -> Self {
        let clipboard = Self::copy(bank);
        for target in bank.iter_mut() {
            target.weight = 0.0;
        }
        clipboard
    }

    /// Restore captured weights onto same-named targets. Returns how many
    /// targets were updated; names with no match are ignored.
    pub fn paste(&self, bank: &mut TargetBank) -> usize {
        let mut pasted = 0;
        for target in bank.iter_mut() {
            if let Some(&weight) = self.values.get(&target.name) {
                target.weight = weight;
                pasted += 1;
            }
        }
        pasted
    }

    /// Number of captured weights.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Drop all captured weights.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// The captured name → weight pairs, sorted by name.
    pub fn entries(&self) -> impl Iterator<Item = (&str, Real)> {
        self.values.iter().map(|(name, &weight)| (name.as_str(), weight))
    }
}
