//! Backtracking search over partial slot-to-word assignments. Variables are
//! picked by minimum remaining values with a highest-degree tie-break, and
//! candidate words are tried least-constraining first. Domains are pruned
//! once up front; search itself only inserts and removes assignments, so
//! undoing a trial is a plain map removal.

use std::cmp::Reverse;

use log::{debug, trace};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::crossword::{Crossword, Variable};
use crate::propagate::Domains;

/// A (possibly partial) mapping from slots to words.
pub type Assignment = FxHashMap<Variable, String>;

pub struct Solver<'a> {
    crossword: &'a Crossword,
    domains: Domains,
}

impl<'a> Solver<'a> {
    pub fn new(crossword: &'a Crossword, words: &[String]) -> Solver<'a> {
        Solver {
            crossword,
            domains: Domains::new(crossword, words),
        }
    }

    pub fn domains(&self) -> &Domains {
        &self.domains
    }

    /// Prune domains, then search. `None` means no consistent complete
    /// assignment exists; it is a legitimate outcome, not an error.
    pub fn solve(&mut self) -> Option<Assignment> {
        self.domains.enforce_node_consistency();
        if self
            .crossword
            .variables()
            .iter()
            .any(|&variable| self.domains.is_empty(variable))
        {
            debug!("a slot has no word of matching length");
            return None;
        }
        if !self.domains.ac3(self.crossword, None) {
            return None;
        }

        let candidates: usize = self
            .crossword
            .variables()
            .iter()
            .map(|&variable| self.domains.len(variable))
            .sum();
        debug!(
            "propagation left {} candidates across {} slots",
            candidates,
            self.crossword.variables().len()
        );

        let mut assignment = Assignment::default();
        if self.backtrack(&mut assignment) {
            Some(assignment)
        } else {
            debug!("search space exhausted");
            None
        }
    }

    /// Does `assignment` cover every slot?
    pub fn complete(&self, assignment: &Assignment) -> bool {
        self.crossword
            .variables()
            .iter()
            .all(|variable| assignment.contains_key(variable))
    }

    /// Is `assignment` consistent? Words must fit their slots, be pairwise
    /// distinct, and agree at every shared cell.
    pub fn consistent(&self, assignment: &Assignment) -> bool {
        let mut seen = FxHashSet::default();
        for (variable, word) in assignment {
            if word.len() != variable.length {
                return false;
            }
            if !seen.insert(word.as_str()) {
                return false;
            }
        }

        for (&x, word_x) in assignment {
            for (&y, word_y) in assignment {
                if x < y {
                    if let Some((dx, dy)) = self.crossword.overlap(x, y) {
                        if word_x.as_bytes()[dx] != word_y.as_bytes()[dy] {
                            return false;
                        }
                    }
                }
            }
        }

        true
    }

    fn backtrack(&self, assignment: &mut Assignment) -> bool {
        let variable = match self.select_unassigned_variable(assignment) {
            Some(variable) => variable,
            // complete; the solution stands only if it is consistent
            None => return self.consistent(assignment),
        };

        for word in self.order_domain_values(variable, assignment) {
            trace!("trying {} at {:?}", word, variable);
            assignment.insert(variable, word);
            if self.backtrack(assignment) {
                return true;
            }
            assignment.remove(&variable);
        }

        false
    }

    /// Minimum remaining values, ties broken by highest degree, then by the
    /// slot's position so repeated runs pick identically.
    fn select_unassigned_variable(&self, assignment: &Assignment) -> Option<Variable> {
        self.crossword
            .variables()
            .iter()
            .copied()
            .filter(|variable| !assignment.contains_key(variable))
            .min_by_key(|&variable| {
                (
                    self.domains.len(variable),
                    Reverse(self.crossword.neighbors(variable).len()),
                )
            })
    }

    /// Candidates for `variable`, least constraining first: ascending by how
    /// many values each would rule out across unassigned crossing slots.
    /// Equal-cost words stay in lexicographic order.
    fn order_domain_values(&self, variable: Variable, assignment: &Assignment) -> Vec<String> {
        let unassigned_neighbors: Vec<(Variable, (usize, usize))> = self
            .crossword
            .neighbors(variable)
            .into_iter()
            .filter(|neighbor| !assignment.contains_key(neighbor))
            .filter_map(|neighbor| {
                self.crossword
                    .overlap(variable, neighbor)
                    .map(|offsets| (neighbor, offsets))
            })
            .collect();

        let mut values: Vec<String> = self.domains.get(variable).iter().cloned().collect();
        values.sort_unstable();
        values.sort_by_cached_key(|word| {
            unassigned_neighbors
                .iter()
                .map(|&(neighbor, (dv, du))| {
                    let letter = word.as_bytes().get(dv).copied();
                    self.domains
                        .get(neighbor)
                        .iter()
                        .filter(|other| other.as_bytes().get(du).copied() != letter)
                        .count()
                })
                .sum::<usize>()
        });
        values
    }
}

#[cfg(test)]
mod tests {
    use super::{Assignment, Solver};
    use crate::crossword::{Crossword, Direction, Variable};
    use crate::parse::parse_structure;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| String::from(*w)).collect()
    }

    #[test]
    fn solves_a_single_slot_puzzle() {
        let crossword = Crossword::new(vec![vec![true, true, true]]).unwrap();
        let mut solver = Solver::new(&crossword, &words(&["CAT", "DOG", "OX"]));

        let slot = crossword.variables()[0];
        let assignment = solver.solve().unwrap();

        let word = assignment.get(&slot).unwrap();
        assert!(word == "CAT" || word == "DOG");
        assert_eq!(solver.domains().len(slot), 2);
    }

    #[test]
    fn solves_a_word_square() {
        let crossword = Crossword::new(vec![vec![true; 3]; 3]).unwrap();
        let vocabulary = words(&["ABC", "DEF", "GHI", "ADG", "BEH", "CFI"]);
        let mut solver = Solver::new(&crossword, &vocabulary);

        let assignment = solver.solve().unwrap();

        assert!(solver.complete(&assignment));
        assert!(solver.consistent(&assignment));
        assert_eq!(assignment.len(), 6);
    }

    #[test]
    fn solves_a_blocked_grid() {
        let structure = parse_structure(
            "\
___#
#_##
#___",
        )
        .unwrap();
        let crossword = Crossword::new(structure).unwrap();
        let vocabulary = words(&["TWO", "ONE", "WIN", "NAG"]);
        let mut solver = Solver::new(&crossword, &vocabulary);

        let assignment = solver.solve().unwrap();

        assert!(solver.complete(&assignment));
        assert!(solver.consistent(&assignment));
    }

    #[test]
    fn reports_no_solution_when_lengths_never_match() {
        let crossword = Crossword::new(vec![vec![true, true, true]]).unwrap();
        let mut solver = Solver::new(&crossword, &words(&["OX", "HORSE"]));

        assert_eq!(solver.solve(), None);
    }

    #[test]
    fn reports_no_solution_when_slots_compete_for_one_word() {
        // two independent length-3 slots but only one length-3 word
        let structure = parse_structure(
            "\
___
###
___",
        )
        .unwrap();
        let crossword = Crossword::new(structure).unwrap();
        let mut solver = Solver::new(&crossword, &words(&["CAT", "OX"]));

        assert_eq!(solver.solve(), None);
    }

    #[test]
    fn solve_is_deterministic() {
        let crossword = Crossword::new(vec![vec![true; 3]; 3]).unwrap();
        let vocabulary = words(&[
            "ABC", "DEF", "GHI", "ADG", "BEH", "CFI", "XYZ", "CAB", "FED",
        ]);

        let first = Solver::new(&crossword, &vocabulary).solve();
        let second = Solver::new(&crossword, &vocabulary).solve();

        assert_eq!(first, second);
        assert!(first.is_some());
    }

    #[test]
    fn consistent_rejects_reused_words() {
        let structure = parse_structure("___\n###\n___").unwrap();
        let crossword = Crossword::new(structure).unwrap();
        let solver = Solver::new(&crossword, &words(&["CAT"]));

        let mut assignment = Assignment::default();
        for &variable in crossword.variables() {
            assignment.insert(variable, String::from("CAT"));
        }

        assert!(!solver.consistent(&assignment));
    }

    #[test]
    fn consistent_rejects_overlap_disagreement() {
        let structure = vec![
            vec![true, true, true],
            vec![true, false, false],
            vec![true, false, false],
        ];
        let crossword = Crossword::new(structure).unwrap();
        let across = Variable::new(0, 0, 3, Direction::Across);
        let down = Variable::new(0, 0, 3, Direction::Down);
        let solver = Solver::new(&crossword, &words(&["CAT", "DOG"]));

        let mut assignment = Assignment::default();
        assignment.insert(across, String::from("CAT"));
        assignment.insert(down, String::from("DOG"));
        assert!(!solver.consistent(&assignment));

        assignment.insert(down, String::from("CUB"));
        assert!(solver.consistent(&assignment));
    }

    #[test]
    fn consistent_rejects_wrong_length() {
        let crossword = Crossword::new(vec![vec![true, true, true]]).unwrap();
        let slot = crossword.variables()[0];
        let solver = Solver::new(&crossword, &words(&["CAT"]));

        let mut assignment = Assignment::default();
        assignment.insert(slot, String::from("OX"));

        assert!(!solver.consistent(&assignment));
    }

    #[test]
    fn partial_assignments_can_be_checked() {
        let crossword = Crossword::new(vec![vec![true; 3]; 3]).unwrap();
        let solver = Solver::new(&crossword, &words(&["ABC"]));

        let mut assignment = Assignment::default();
        assignment.insert(Variable::new(0, 0, 3, Direction::Across), String::from("ABC"));

        assert!(!solver.complete(&assignment));
        assert!(solver.consistent(&assignment));
    }

    #[test]
    fn mrv_prefers_the_smallest_domain() {
        // the down slot is length 4, the across slot length 3; give the down
        // slot a single candidate
        let structure = vec![
            vec![true, true, true],
            vec![true, false, false],
            vec![true, false, false],
            vec![true, false, false],
        ];
        let crossword = Crossword::new(structure).unwrap();
        let down = Variable::new(0, 0, 4, Direction::Down);
        let mut solver = Solver::new(&crossword, &words(&["CAT", "CAR", "COB", "CLIP"]));
        solver.domains.enforce_node_consistency();

        let picked = solver.select_unassigned_variable(&Assignment::default());
        assert_eq!(picked, Some(down));
    }

    #[test]
    fn mrv_ties_break_on_degree() {
        // column 1 crosses both across slots; the other down runs are single
        // cells, so degrees differ while every domain has the same size
        let structure = parse_structure(
            "\
__
#_
__",
        )
        .unwrap();
        let crossword = Crossword::new(structure).unwrap();
        let down = Variable::new(0, 1, 3, Direction::Down);
        let vocabulary = words(&["AB", "BA", "ABA", "BAB"]);
        let mut solver = Solver::new(&crossword, &vocabulary);
        solver.domains.enforce_node_consistency();

        // both across slots have degree 1, the down slot degree 2
        let picked = solver.select_unassigned_variable(&Assignment::default());
        assert_eq!(picked, Some(down));
    }

    #[test]
    fn least_constraining_value_orders_candidates() {
        let structure = vec![
            vec![true, true, true],
            vec![false, false, true],
            vec![false, false, true],
        ];
        let crossword = Crossword::new(structure).unwrap();
        let across = Variable::new(0, 0, 3, Direction::Across);
        let vocabulary = words(&["CAT", "CAR", "TIP", "RIM"]);
        let mut solver = Solver::new(&crossword, &vocabulary);
        solver.domains.enforce_node_consistency();

        // CAT's final T keeps TIP alive in the down slot (3 conflicts) and
        // CAR's final R keeps RIM (3 conflicts); TIP and RIM rule out all 4
        let ordered = solver.order_domain_values(across, &Assignment::default());
        assert_eq!(ordered, words(&["CAR", "CAT", "RIM", "TIP"]));
    }
}
