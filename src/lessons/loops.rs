//! Loop demonstrations: a multiplication table, a fruit list report and the
//! countdown line format.

use std::fmt::Write as _;

use super::text::capitalize;
use crate::scheduler::Tick;

/// Fruits processed by [`fruit_report`] when the caller has none of its own
pub const FRUITS: &[&str] = &[
    "apple",
    "banana",
    "cherry",
    "date",
    "elderberry",
    "fig",
    "grape",
];

/// Render `number × 1` through `number × rows`
pub fn multiplication_table(number: i64, rows: u32) -> String {
    let mut output = format!("Multiplication Table for {number}:\n\n");
    // i64 × u32 always fits in i128
    let wide = i128::from(number);
    for i in 1..=rows {
        let _ = writeln!(output, "{number} × {i} = {}", wide * i128::from(i));
    }
    output
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FruitReport {
    /// `"1. Apple (5 letters)"` style lines
    pub lines: Vec<String>,
    pub total: usize,
    pub longest: Option<String>,
    pub shortest: Option<String>,
}

/// Number and capitalize each fruit, then pick the longest and shortest
/// names. Ties go to the later fruit.
pub fn fruit_report(fruits: &[&str]) -> FruitReport {
    let lines = fruits
        .iter()
        .enumerate()
        .map(|(index, fruit)| {
            format!(
                "{}. {} ({} letters)",
                index + 1,
                capitalize(fruit),
                fruit.chars().count()
            )
        })
        .collect();

    let letters = |name: &str| name.chars().count();
    let longest = fruits
        .iter()
        .copied()
        .reduce(|a, b| if letters(a) > letters(b) { a } else { b });
    let shortest = fruits
        .iter()
        .copied()
        .reduce(|a, b| if letters(a) < letters(b) { a } else { b });

    FruitReport {
        lines,
        total: fruits.len(),
        longest: longest.map(str::to_string),
        shortest: shortest.map(str::to_string),
    }
}

impl std::fmt::Display for FruitReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Processing fruits:\n")?;
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        write!(f, "\nTotal fruits processed: {}", self.total)?;
        if let (Some(longest), Some(shortest)) = (&self.longest, &self.shortest) {
            write!(f, "\nLongest fruit name: {longest}")?;
            write!(f, "\nShortest fruit name: {shortest}")?;
        }
        Ok(())
    }
}

/// Text shown for one countdown tick
pub fn countdown_line(tick: Tick) -> String {
    if tick.is_terminal {
        "🚀 BLAST OFF!".to_string()
    } else {
        format!("Counting down: {}", tick.value)
    }
}
