use crate::crossword::{Crossword, Direction};
use crate::search::Assignment;

/// Project an assignment onto the grid: letter `k` of each assigned word
/// lands `k` cells along the slot's direction from its start.
pub fn letter_grid(crossword: &Crossword, assignment: &Assignment) -> Vec<Vec<Option<char>>> {
    let (height, width) = crossword.dimensions();
    let mut letters = vec![vec![None; width]; height];

    for (variable, word) in assignment {
        for (index, &byte) in word.as_bytes().iter().enumerate() {
            let (row, col) = variable.cell(index);
            letters[row][col] = Some(byte as char);
        }
    }

    letters
}

/// The letter an assignment puts at one cell, or `None` if no assigned slot
/// covers it.
pub fn letter_at(
    crossword: &Crossword,
    assignment: &Assignment,
    row: usize,
    col: usize,
) -> Option<char> {
    if !crossword.is_fillable(row, col) {
        return None;
    }
    for (variable, word) in assignment {
        let offset = match variable.direction {
            Direction::Across if row == variable.row
                && col >= variable.col
                && col < variable.col + variable.length =>
            {
                col - variable.col
            }
            Direction::Down if col == variable.col
                && row >= variable.row
                && row < variable.row + variable.length =>
            {
                row - variable.row
            }
            _ => continue,
        };
        if let Some(&byte) = word.as_bytes().get(offset) {
            return Some(byte as char);
        }
    }
    None
}

/// Render an assignment as a text grid: blocked cells as `█`, fillable but
/// unassigned cells as spaces.
pub fn render(crossword: &Crossword, assignment: &Assignment) -> String {
    let (height, width) = crossword.dimensions();
    let letters = letter_grid(crossword, assignment);
    let mut out = String::new();

    for row in 0..height {
        for col in 0..width {
            if crossword.is_fillable(row, col) {
                out.push(letters[row][col].unwrap_or(' '));
            } else {
                out.push('█');
            }
        }
        out.push('\n');
    }

    out
}
