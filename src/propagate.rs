//! Constraint propagation over per-slot candidate sets. Node consistency
//! prunes words whose length doesn't fit the slot; AC-3 prunes words that no
//! crossing slot can support at the shared cell. Domains only ever shrink
//! here, and propagation either reaches a fixed point with every domain
//! non-empty or fails the moment one empties.

use log::{debug, trace};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::crossword::{Crossword, Variable};

/// The candidate-word set for each slot.
#[derive(Debug, Clone)]
pub struct Domains {
    domains: FxHashMap<Variable, FxHashSet<String>>,
}

impl Domains {
    /// Start every slot with the full vocabulary.
    pub fn new(crossword: &Crossword, words: &[String]) -> Domains {
        let full: FxHashSet<String> = words.iter().cloned().collect();
        Domains {
            domains: crossword
                .variables()
                .iter()
                .map(|&variable| (variable, full.clone()))
                .collect(),
        }
    }

    pub fn get(&self, variable: Variable) -> &FxHashSet<String> {
        &self.domains[&variable]
    }

    pub fn len(&self, variable: Variable) -> usize {
        self.domains[&variable].len()
    }

    pub fn is_empty(&self, variable: Variable) -> bool {
        self.domains[&variable].is_empty()
    }

    /// Drop every word whose length doesn't match its slot. One pass; the
    /// unary constraint is static.
    pub fn enforce_node_consistency(&mut self) {
        for (variable, words) in self.domains.iter_mut() {
            words.retain(|word| word.len() == variable.length);
        }
    }

    /// Make `x` arc-consistent with `y`: drop every candidate of `x` that no
    /// candidate of `y` supports at the shared cell. Returns whether anything
    /// was dropped. A no-op for slots without a defined overlap.
    pub fn revise(&mut self, crossword: &Crossword, x: Variable, y: Variable) -> bool {
        let (dx, dy) = match crossword.overlap(x, y) {
            Some(offsets) => offsets,
            None => return false,
        };

        let other = &self.domains[&y];
        let kept: FxHashSet<String> = self.domains[&x]
            .iter()
            .filter(|word| match word.as_bytes().get(dx) {
                Some(&letter) => other
                    .iter()
                    .any(|candidate| candidate.as_bytes().get(dy) == Some(&letter)),
                None => false,
            })
            .cloned()
            .collect();

        let removed = self.domains[&x].len() - kept.len();
        if removed == 0 {
            return false;
        }

        trace!("revise {:?} against {:?}: removed {}", x, y, removed);
        self.domains.insert(x, kept);
        true
    }

    /// AC-3 over a worklist of directed arcs, seeded with every defined arc
    /// unless the caller restricts it. The worklist is a LIFO stack (order
    /// only affects work done, not the fixed point reached). Returns `false`
    /// as soon as any domain empties.
    pub fn ac3(
        &mut self,
        crossword: &Crossword,
        arcs: Option<Vec<(Variable, Variable)>>,
    ) -> bool {
        let mut worklist = arcs.unwrap_or_else(|| crossword.arcs());

        while let Some((x, y)) = worklist.pop() {
            if self.revise(crossword, x, y) {
                if self.domains[&x].is_empty() {
                    debug!("domain of {:?} emptied, no solution from here", x);
                    return false;
                }
                // shrinking x can invalidate arcs into x that were already
                // consistent
                for z in crossword.neighbors(x) {
                    if z != y {
                        worklist.push((z, x));
                    }
                }
            }
        }

        true
    }
}
