//! Text format of world files.
//!
//! The first line holds `width height`. Each of the next `height` lines is a row
//! of cells, `*` meaning alive. Rows are accepted in two forms:
//!
//! * plain: cell `k` is byte `k` of the line (`" * *"`);
//! * piped, as produced by [`write_world`]: the line starts with `|` and cell `k`
//!   is byte `2k + 1` (`"| |*| |*|"`).
//!
//! Any byte other than `*` is a dead cell. Trailing whitespace is ignored and
//! short rows are padded with dead cells. Content after the last row is ignored.
//!
//! The header is read as `width height`, so the first number is the row length.
//! Files from tools that put the row count first are read transposed; when such
//! a world is not square its rows overflow or run short and loading fails with a
//! [`LifeError::Parse`].

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::{Grid, LifeError, NiceInt, Result};

const ALIVE: u8 = b'*';
const DEAD: u8 = b' ';
const SEPARATOR: u8 = b'|';

fn parse_error(line: usize, message: impl Into<String>) -> LifeError {
    LifeError::Parse {
        line,
        message: message.into(),
    }
}

fn parse_header(line: &[u8]) -> Result<(usize, usize)> {
    let text = std::str::from_utf8(line).map_err(|_| parse_error(1, "header is not text"))?;
    let mut fields = text.split_whitespace();
    let mut next_number = |what: &str| -> Result<usize> {
        let field = fields
            .next()
            .ok_or_else(|| parse_error(1, format!("missing {}", what)))?;
        field
            .parse()
            .map_err(|_| parse_error(1, format!("invalid {} {:?}", what, field)))
    };
    let width = next_number("width")?;
    let height = next_number("height")?;
    if let Some(extra) = fields.next() {
        return Err(parse_error(1, format!("unexpected {:?} after dimensions", extra)));
    }
    Ok((width, height))
}

/// Alive flags of one row, in the order they appear on the line.
fn row_cells(line: &[u8]) -> impl Iterator<Item = bool> + '_ {
    let end = line
        .iter()
        .rposition(|c| !c.is_ascii_whitespace())
        .map_or(0, |i| i + 1);
    let line = &line[..end];
    let (skip, step) = if line.first() == Some(&SEPARATOR) {
        (1, 2)
    } else {
        (0, 1)
    };
    line.iter().skip(skip).step_by(step).map(|&c| c == ALIVE)
}

/// Parses a world; the returned grid holds it in the current generation.
pub fn read_world<R: BufRead>(reader: R) -> Result<Grid> {
    let mut lines = reader.split(b'\n');
    let header = lines
        .next()
        .transpose()?
        .ok_or_else(|| parse_error(1, "missing header"))?;
    let (width, height) = parse_header(&header)?;
    let mut grid = Grid::blank(width, height)?;

    for y in 0..height {
        let line_no = y + 2;
        let line = lines
            .next()
            .transpose()?
            .ok_or_else(|| parse_error(line_no, format!("expected {} rows, found {}", height, y)))?;
        for (x, alive) in row_cells(&line).enumerate() {
            if x >= width {
                return Err(parse_error(
                    line_no,
                    format!("row is longer than {} cells", width),
                ));
            }
            grid.set(x, y, alive);
        }
    }
    Ok(grid)
}

/// Writes the current generation in the piped form.
pub fn write_world<W: Write>(grid: &Grid, mut writer: W) -> Result<()> {
    let (width, height) = grid.size();
    writeln!(writer, "{} {}", width, height)?;
    let mut row = Vec::with_capacity(2 * width + 2);
    for y in 0..height {
        row.clear();
        for x in 0..width {
            row.push(SEPARATOR);
            row.push(if grid.get(x, y) { ALIVE } else { DEAD });
        }
        row.extend_from_slice(b"|\n");
        writer.write_all(&row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn load_world(path: &Path) -> Result<Grid> {
    let file = File::open(path).map_err(|source| LifeError::FileOpen {
        kind: "input",
        path: path.to_path_buf(),
        source,
    })?;
    let grid = read_world(BufReader::new(file))?;
    let (w, h) = grid.size();
    log::info!(
        "Loaded {}x{} world from {} (population {})",
        w,
        h,
        path.display(),
        NiceInt::from_usize(grid.population())
    );
    Ok(grid)
}

pub fn save_world(grid: &Grid, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| LifeError::FileOpen {
        kind: "output",
        path: path.to_path_buf(),
        source,
    })?;
    write_world(grid, BufWriter::new(file))?;
    log::info!("Saved world to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Grid> {
        read_world(text.as_bytes())
    }

    fn render(grid: &Grid) -> String {
        let mut out = Vec::new();
        write_world(grid, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_write_format() {
        let mut grid = Grid::blank(3, 2).unwrap();
        grid.set(0, 0, true);
        grid.set(2, 1, true);
        assert_eq!(render(&grid), "3 2\n|*| | |\n| | |*|\n");
    }

    #[test]
    fn test_plain_and_piped_agree() {
        let plain = parse("4 3\n*  *\n ** \n   *\n").unwrap();
        let piped = parse("4 3\n|*| | |*|\n| |*|*| |\n| | | |*|\n").unwrap();
        assert_eq!(plain.size(), (4, 3));
        assert_eq!(plain.get_cells(), piped.get_cells());
        assert_eq!(plain.population(), 5);
        assert!(plain.get(3, 2));
        assert!(!plain.get(0, 2));
    }

    #[test]
    fn test_short_rows_and_crlf() {
        let grid = parse("3 3\r\n*\r\n\r\n|*| |*\r\n").unwrap();
        assert_eq!(
            grid.get_cells(),
            [true, false, false, false, false, false, true, false, true]
        );
    }

    #[test]
    fn test_non_star_bytes_are_dead() {
        let grid = parse("3 1\nx.o\n").unwrap();
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_reread_written_world() {
        let grid = Grid::random(13, 9, Some(42), 0.35).unwrap();
        let reread = parse(&render(&grid)).unwrap();
        assert_eq!(reread.size(), grid.size());
        assert_eq!(reread.get_cells(), grid.get_cells());
    }

    #[test]
    fn test_trailing_content_is_ignored() {
        let grid = parse("2 1\n**\nwhatever\n").unwrap();
        assert_eq!(grid.population(), 2);
    }

    #[test]
    fn test_bad_header() {
        for (text, line) in [("", 1), ("3\n", 1), ("3 x\n", 1), ("3 3 3\n", 1)] {
            match parse(text) {
                Err(LifeError::Parse { line: l, .. }) => assert_eq!(l, line, "{:?}", text),
                _ => panic!("{:?} must not parse", text),
            }
        }
        assert!(matches!(
            parse("0 4\n"),
            Err(LifeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_missing_row() {
        assert!(matches!(
            parse("2 3\n**\n**\n"),
            Err(LifeError::Parse { line: 4, .. })
        ));
    }

    #[test]
    fn test_long_row() {
        assert!(matches!(
            parse("2 2\n**\n***\n"),
            Err(LifeError::Parse { line: 3, .. })
        ));
        assert!(matches!(
            parse("2 1\n|*|*|*|\n"),
            Err(LifeError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let path = Path::new("/nonexistent/dir/world.txt");
        match load_world(path) {
            Err(err @ LifeError::FileOpen { .. }) => {
                assert!(err.to_string().starts_with("error opening input file"));
                assert!(matches!(err, LifeError::FileOpen { kind: "input", path: p, .. } if p == path));
            }
            _ => panic!("opening a missing file must fail"),
        }
    }

    #[test]
    fn test_unwritable_output() {
        let grid = Grid::blank(2, 2).unwrap();
        let path = Path::new("/nonexistent/dir/out.txt");
        match save_world(&grid, path) {
            Err(err @ LifeError::FileOpen { kind: "output", .. }) => {
                assert!(err.to_string().contains("output file /nonexistent/dir/out.txt"));
            }
            _ => panic!("creating a file in a missing directory must fail"),
        }
    }

    #[test]
    fn test_rows_first_header_is_rejected() {
        // 2 rows of 3 cells, declared with the row count first
        assert!(matches!(
            parse("2 3\n|*| |*|\n| |*| |\n"),
            Err(LifeError::Parse { line: 2, .. })
        ));
    }
}
