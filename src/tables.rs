//! Readers for the two descriptive CSV tables: hole adjacency and
//! spatial layout.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

use common::Vertex;
use common::geometry::Point;

/// Read the adjacency table: one row per hole, one column per board
/// direction. Each cell is either empty (no neighbour that way) or the
/// id of the adjacent hole. The row count fixes the number of holes.
pub fn read_adjacency(path: &Path) -> Result<Vec<Vec<Option<Vertex>>>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading board file {}", path.display()))?;

    let mut rows = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let mut row = Vec::new();
        for (col, cell) in line.split(',').enumerate() {
            let cell = cell.trim();
            if cell.is_empty() {
                row.push(None);
            } else {
                let neighbour: Vertex = cell.parse().with_context(|| {
                    format!(
                        "board file {}: row {}, column {} is not a hole id",
                        path.display(),
                        line_no + 1,
                        col + 1
                    )
                })?;
                row.push(Some(neighbour));
            }
        }
        rows.push(row);
    }

    if rows.is_empty() {
        bail!("board file {} contains no rows", path.display());
    }

    Ok(rows)
}

/// Read the layout table: one row per hole, columns `x,y`.
pub fn read_layout_points(path: &Path) -> Result<Vec<Point>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading layout file {}", path.display()))?;

    let mut points = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let mut cells = line.split(',').map(str::trim);
        let (Some(x), Some(y)) = (cells.next(), cells.next()) else {
            bail!(
                "layout file {}: row {} needs two columns",
                path.display(),
                line_no + 1
            );
        };

        let x: f64 = x.parse().with_context(|| {
            format!(
                "layout file {}: row {} has a bad x value",
                path.display(),
                line_no + 1
            )
        })?;
        let y: f64 = y.parse().with_context(|| {
            format!(
                "layout file {}: row {} has a bad y value",
                path.display(),
                line_no + 1
            )
        })?;

        points.push(Point { x, y });
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn temp_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn adjacency_with_gaps() {
        let file = temp_csv("1,\n2,0\n,1\n");
        let rows = read_adjacency(file.path()).unwrap();
        assert_eq!(
            rows,
            vec![
                vec![Some(1), None],
                vec![Some(2), Some(0)],
                vec![None, Some(1)],
            ]
        );
    }

    #[test]
    fn adjacency_rejects_junk_cells() {
        let file = temp_csv("1,x\n0,\n");
        assert!(read_adjacency(file.path()).is_err());
    }

    #[test]
    fn adjacency_rejects_empty_files() {
        let file = temp_csv("\n\n");
        assert!(read_adjacency(file.path()).is_err());
    }

    #[test]
    fn layout_points() {
        let file = temp_csv("0,0\n1.5,-2\n0.25,3\n");
        let points = read_layout_points(file.path()).unwrap();
        assert_eq!(
            points,
            vec![
                Point { x: 0.0, y: 0.0 },
                Point { x: 1.5, y: -2.0 },
                Point { x: 0.25, y: 3.0 },
            ]
        );
    }

    #[test]
    fn layout_rejects_short_rows() {
        let file = temp_csv("0,0\n1\n");
        assert!(read_layout_points(file.path()).is_err());
    }
}
