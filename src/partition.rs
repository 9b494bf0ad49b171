/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Splitting a state into mutually distinguishable sub-states.
//!
//! Photons are grouped greedily in encoding order: each photon joins the
//! first existing group whose representative annotation is compatible with
//! its own, and the representative becomes the merge of the two. A photon
//! compatible with no group opens a new one.
//!
//! The grouping is order-dependent and not a globally optimal clustering.
//! With `{P:H}`, untagged, `{P:V}` the untagged photon joins the `H` group,
//! after which `V` cannot, giving two groups; a different photon order could
//! give one.
//!
//! Each group becomes an annotation-free state over the full `m` modes
//! holding only that group's photons. A single group returns the original
//! state with annotations cleared.

use alloc::vec;
use alloc::vec::Vec;

use crate::annotation::Annotation;
use crate::state::FockState;

impl FockState {
    /// Partition by [`Annotation::compatible_annotation`].
    pub fn separate_state(&self) -> Vec<FockState> {
        self.separate_state_by(|group, photon| group.compatible_annotation(photon))
    }

    /// Partition with a caller-supplied merge relation.
    ///
    /// `merge(representative, photon)` returns the new representative when
    /// the photon may join the group, `None` otherwise.
    pub fn separate_state_by<F>(&self, mut merge: F) -> Vec<FockState>
    where
        F: FnMut(&Annotation, &Annotation) -> Option<Annotation>,
    {
        if self.n() == 0 {
            return vec![self.clone()];
        }

        let mut groups: Vec<(Annotation, Vec<usize>)> = Vec::new();
        for photon in 0..self.n() {
            let tag = self.annotation_of(photon);
            let joined = groups.iter_mut().find_map(|(representative, members)| {
                merge(representative, &tag).map(|merged| {
                    *representative = merged;
                    members.push(photon);
                })
            });
            if joined.is_none() {
                groups.push((tag, vec![photon]));
            }
        }
        tracing::debug!(photons = self.n(), groups = groups.len(), "separated fock state");

        if groups.len() == 1 {
            let mut state = self.clone();
            state.clear_annotations();
            return vec![state];
        }
        let code = self.modes();
        groups
            .iter()
            .map(|(_, members)| {
                let mut occupation = vec![0; self.m];
                for &photon in members {
                    occupation[code[photon]] += 1;
                }
                FockState::from_occupation(&occupation)
            })
            .collect()
    }
}
