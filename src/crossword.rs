use rustc_hash::FxHashMap;

use crate::error::{FillError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Across,
    Down,
}

/// A word slot: a maximal run of fillable cells in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    pub row: usize,
    pub col: usize,
    pub length: usize,
    pub direction: Direction,
}

impl Variable {
    pub fn new(row: usize, col: usize, length: usize, direction: Direction) -> Variable {
        Variable {
            row,
            col,
            length,
            direction,
        }
    }

    /// The grid cell holding letter `index` of this slot's word.
    pub fn cell(&self, index: usize) -> (usize, usize) {
        match self.direction {
            Direction::Across => (self.row, self.col + index),
            Direction::Down => (self.row + index, self.col),
        }
    }
}

/// Immutable puzzle geometry: the fillable-cell grid, the slots derived from
/// it, and which pairs of slots share a cell.
#[derive(Debug, Clone)]
pub struct Crossword {
    structure: Vec<Vec<bool>>,
    height: usize,
    width: usize,
    variables: Vec<Variable>,
    overlaps: FxHashMap<(Variable, Variable), (usize, usize)>,
}

impl Crossword {
    /// Build a puzzle from a rectangular grid of fillable cells, deriving the
    /// slot set from the grid itself.
    pub fn new(structure: Vec<Vec<bool>>) -> Result<Crossword> {
        validate_shape(&structure)?;
        let variables = derive_variables(&structure);
        Crossword::with_variables(structure, variables)
    }

    /// Build a puzzle from a grid plus a caller-supplied slot set. Every slot
    /// must index cells that are fillable and in bounds.
    pub fn with_variables(structure: Vec<Vec<bool>>, variables: Vec<Variable>) -> Result<Crossword> {
        validate_shape(&structure)?;
        let height = structure.len();
        let width = structure[0].len();

        for variable in &variables {
            for index in 0..variable.length {
                let (row, col) = variable.cell(index);
                if row >= height || col >= width || !structure[row][col] {
                    return Err(FillError::SlotOutOfBounds {
                        row: variable.row,
                        col: variable.col,
                        height,
                        width,
                    });
                }
            }
        }

        let mut variables = variables;
        variables.sort_unstable();
        variables.dedup();
        let overlaps = build_overlaps(&variables);

        Ok(Crossword {
            structure,
            height,
            width,
            variables,
            overlaps,
        })
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// The shared-cell offsets for a pair of slots, or `None` if the slots
    /// don't cross (or are the same slot).
    pub fn overlap(&self, x: Variable, y: Variable) -> Option<(usize, usize)> {
        self.overlaps.get(&(x, y)).copied()
    }

    /// Slots that share a cell with `variable`, in a fixed order.
    pub fn neighbors(&self, variable: Variable) -> Vec<Variable> {
        self.variables
            .iter()
            .copied()
            .filter(|&other| self.overlaps.contains_key(&(variable, other)))
            .collect()
    }

    /// All directed arcs `(x, y)` with a defined overlap, in a fixed order.
    pub(crate) fn arcs(&self) -> Vec<(Variable, Variable)> {
        let mut result = vec![];
        for &x in &self.variables {
            for &y in &self.variables {
                if self.overlaps.contains_key(&(x, y)) {
                    result.push((x, y));
                }
            }
        }
        result
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn is_fillable(&self, row: usize, col: usize) -> bool {
        self.structure[row][col]
    }
}

fn validate_shape(structure: &[Vec<bool>]) -> Result<()> {
    if structure.is_empty() || structure[0].is_empty() {
        return Err(FillError::EmptyStructure);
    }
    let expected = structure[0].len();
    for (row, cells) in structure.iter().enumerate() {
        if cells.len() != expected {
            return Err(FillError::RaggedStructure {
                row,
                found: cells.len(),
                expected,
            });
        }
    }
    Ok(())
}

fn derive_variables(structure: &[Vec<bool>]) -> Vec<Variable> {
    let height = structure.len();
    let width = structure[0].len();
    let mut result = vec![];

    for row in 0..height {
        let mut run_start = None;
        for col in 0..=width {
            let fillable = col < width && structure[row][col];
            match (run_start, fillable) {
                (None, true) => run_start = Some(col),
                (Some(start), false) => {
                    // single cells belong to no slot
                    if col - start > 1 {
                        result.push(Variable::new(row, start, col - start, Direction::Across));
                    }
                    run_start = None;
                }
                _ => {}
            }
        }
    }

    for col in 0..width {
        let mut run_start = None;
        for row in 0..=height {
            let fillable = row < height && structure[row][col];
            match (run_start, fillable) {
                (None, true) => run_start = Some(row),
                (Some(start), false) => {
                    if row - start > 1 {
                        result.push(Variable::new(start, col, row - start, Direction::Down));
                    }
                    run_start = None;
                }
                _ => {}
            }
        }
    }

    result
}

fn build_overlaps(variables: &[Variable]) -> FxHashMap<(Variable, Variable), (usize, usize)> {
    let mut overlaps = FxHashMap::default();

    for (i, &x) in variables.iter().enumerate() {
        for &y in &variables[i + 1..] {
            let mut shared = vec![];
            for dx in 0..x.length {
                for dy in 0..y.length {
                    if x.cell(dx) == y.cell(dy) {
                        shared.push((dx, dy));
                    }
                }
            }
            // two crossing slots meet in exactly one cell; collinear slots
            // sharing a longer stretch don't constrain each other letterwise
            if shared.len() == 1 {
                let (dx, dy) = shared[0];
                overlaps.insert((x, y), (dx, dy));
                overlaps.insert((y, x), (dy, dx));
            }
        }
    }

    overlaps
}
