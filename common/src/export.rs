use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::{solver::Solution, SolveError};

/// Write one row per solution: its 1-based index, then every move as a
/// `start-end` token. All rows have as many move columns as the longest
/// solution, shorter ones are padded with empty cells.
pub fn write_delimited(
    mut writer: impl Write,
    solutions: &[Solution],
    delimiter: char,
) -> Result<(), SolveError> {
    let columns = solutions.iter().map(Solution::len).max().unwrap_or(0);

    write!(writer, "solution")?;
    for i in 1..=columns {
        write!(writer, "{delimiter}move_{i}")?;
    }
    writeln!(writer)?;

    for (idx, solution) in solutions.iter().enumerate() {
        write!(writer, "{}", idx + 1)?;
        for mv in solution.moves() {
            write!(writer, "{delimiter}{mv}")?;
        }
        for _ in solution.len()..columns {
            write!(writer, "{delimiter}")?;
        }
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}

pub fn save_delimited(path: impl AsRef<Path>, solutions: &[Solution]) -> Result<(), SolveError> {
    let file = File::create(path)?;
    write_delimited(BufWriter::new(file), solutions, ',')
}

pub fn save_json(path: impl AsRef<Path>, solutions: &[Solution]) -> Result<(), SolveError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, solutions)?;
    writer.flush()?;
    Ok(())
}

pub fn load_json(path: impl AsRef<Path>) -> Result<Vec<Solution>, SolveError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
}
