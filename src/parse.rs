use crate::error::{FillError, Result};

/// Parse a structure description into a grid of fillable flags. `_` marks a
/// fillable cell, any other character a blocked one. Leading and trailing
/// blank lines are ignored; the remaining rows must form a rectangle.
pub fn parse_structure(input: &str) -> Result<Vec<Vec<bool>>> {
    let lines: Vec<&str> = input
        .lines()
        .skip_while(|line| line.is_empty())
        .collect();
    let lines = match lines.iter().rposition(|line| !line.is_empty()) {
        Some(last) => &lines[..=last],
        None => return Err(FillError::EmptyStructure),
    };

    let expected = lines[0].chars().count();
    let mut structure = Vec::with_capacity(lines.len());
    for (row, line) in lines.iter().enumerate() {
        let cells: Vec<bool> = line.chars().map(|c| c == '_').collect();
        if cells.len() != expected {
            return Err(FillError::RaggedStructure {
                row,
                found: cells.len(),
                expected,
            });
        }
        structure.push(cells);
    }

    Ok(structure)
}

/// Parse a word list: one word per line, uppercased, blank lines skipped.
pub fn parse_words(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_uppercase)
        .collect()
}
