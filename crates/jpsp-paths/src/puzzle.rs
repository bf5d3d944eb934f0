//! Text formats read and written by the command-line front end.
//!
//! Input is whitespace-separated, so line breaks are not significant:
//!
//! - map: `width height` followed by `height` rows of `width` characters;
//! - search: `width height`, `source_col source_row`, `goal_col goal_row`,
//!   then either an open-tile count and that many
//!   `col row N NE E SE S SW W NW` rows, or `height` map rows.

use std::fmt;
use std::str::SplitWhitespace;

use jpsp_core::{Direction, Point};

use crate::error::{GridError, ParseError};
use crate::grid::{DistanceMap, Grid, PrecomputedTile};

struct Tokens<'a> {
    iter: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            iter: input.split_whitespace(),
        }
    }

    fn word(&mut self, expected: &'static str) -> Result<&'a str, ParseError> {
        self.iter
            .next()
            .ok_or(ParseError::UnexpectedEnd { expected })
    }

    fn int<T: std::str::FromStr>(&mut self, expected: &'static str) -> Result<T, ParseError> {
        let token = self.word(expected)?;
        token.parse().map_err(|_| ParseError::InvalidNumber {
            expected,
            token: token.to_string(),
        })
    }

    fn point(&mut self, expected: &'static str) -> Result<Point, ParseError> {
        let x = self.int(expected)?;
        let y = self.int(expected)?;
        Ok(Point::new(x, y))
    }

    fn map_rows(&mut self, width: usize, height: usize) -> Result<Vec<&'a str>, ParseError> {
        let rows = (0..height)
            .map(|_| self.word("map row"))
            .collect::<Result<Vec<_>, _>>()?;
        if let Some((row, found)) = rows
            .iter()
            .map(|r| r.chars().count())
            .enumerate()
            .find(|&(_, n)| n != width)
        {
            return Err(GridError::RaggedRow {
                row,
                expected: width,
                found,
            }
            .into());
        }
        Ok(rows)
    }
}

/// Read a map block and build its grid.
pub fn parse_map(input: &str) -> Result<Grid, ParseError> {
    let mut tokens = Tokens::new(input);
    let width: usize = tokens.int("map width")?;
    let height: usize = tokens.int("map height")?;
    let rows = tokens.map_rows(width, height)?;
    Ok(Grid::from_rows(&rows)?)
}

/// Where a search input's grid comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridSource {
    Precomputed(Vec<PrecomputedTile>),
    Map(Vec<String>),
}

/// A parsed search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchInput {
    pub width: usize,
    pub height: usize,
    pub source: Point,
    pub goal: Point,
    pub grid: GridSource,
}

impl SearchInput {
    pub fn build_grid(&self) -> Result<Grid, GridError> {
        match &self.grid {
            GridSource::Precomputed(rows) => Grid::from_precomputed(self.width, self.height, rows),
            GridSource::Map(rows) => {
                if rows.len() != self.height {
                    return Err(GridError::RowCount {
                        width: self.width,
                        height: self.height,
                        rows: rows.len(),
                    });
                }
                Grid::from_rows(rows)
            }
        }
    }
}

/// Read a search block.
pub fn parse_search(input: &str) -> Result<SearchInput, ParseError> {
    let mut tokens = Tokens::new(input);
    let width: usize = tokens.int("map width")?;
    let height: usize = tokens.int("map height")?;
    let source = tokens.point("source coordinate")?;
    let goal = tokens.point("goal coordinate")?;

    let grid = match table_len(tokens.iter.clone(), width, height) {
        Some(count) => {
            tokens.iter.next();
            let mut rows = Vec::with_capacity(count);
            for _ in 0..count {
                let pos = tokens.point("tile coordinate")?;
                let mut values = [0i32; 8];
                for v in &mut values {
                    *v = tokens.int("jump distance")?;
                }
                rows.push(PrecomputedTile {
                    pos,
                    distances: DistanceMap::from_rose(values),
                });
            }
            GridSource::Precomputed(rows)
        }
        _ => {
            let rows = tokens.map_rows(width, height)?;
            GridSource::Map(rows.into_iter().map(str::to_string).collect())
        }
    };

    Ok(SearchInput {
        width,
        height,
        source,
        goal,
        grid,
    })
}

/// The open-tile count if the rest of the input is a distance table rather
/// than map rows.
///
/// Wall glyphs may be digits, so a numeric first token alone does not decide
/// it: rest shaped exactly like the map is read as the map, unless it is also
/// exactly one full table.
fn table_len(rest: SplitWhitespace<'_>, width: usize, height: usize) -> Option<usize> {
    let rest: Vec<&str> = rest.collect();
    let count = rest.first()?.parse::<usize>().ok()?;
    let map_shaped = rest.len() == height && rest.iter().all(|row| row.chars().count() == width);
    let full_table = count.checked_mul(10).and_then(|n| n.checked_add(1)) == Some(rest.len());
    (!map_shaped || full_table).then_some(count)
}

/// Precomputation output: one `col row N NE E SE S SW W NW` line per
/// passable tile, in row-major order.
pub struct DistanceTable<'a>(pub &'a Grid);

impl fmt::Display for DistanceTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (p, distances) in self.0.passable_tiles() {
            write!(f, "{} {}", p.col(), p.row())?;
            for d in Direction::ROSE {
                write!(f, " {}", distances[d])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pathfinder;

    const MAP: &str = "\
4 3
....
.#..
....
";

    #[test]
    fn map_block_builds_grid() {
        let grid = parse_map(MAP).unwrap();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert!(grid.tile(Point::new(1, 1)).is_wall());
    }

    #[test]
    fn map_block_checks_declared_width() {
        let err = parse_map("3 2\n...\n....\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::Grid(GridError::RaggedRow {
                row: 1,
                expected: 3,
                found: 4
            })
        );
    }

    #[test]
    fn short_input_reports_what_is_missing() {
        assert_eq!(
            parse_map("3 2\n...\n").unwrap_err(),
            ParseError::UnexpectedEnd {
                expected: "map row"
            }
        );
        assert_eq!(
            parse_map("x 2").unwrap_err(),
            ParseError::InvalidNumber {
                expected: "map width",
                token: "x".into()
            }
        );
    }

    #[test]
    fn table_lists_passable_tiles_in_rose_order() {
        let grid = parse_map("3 1\n.#.\n").unwrap();
        assert_eq!(
            DistanceTable(&grid).to_string(),
            "0 0 0 0 0 0 0 0 0 0\n2 0 0 0 0 0 0 0 0 0\n"
        );
        let grid = parse_map("3 1\n...\n").unwrap();
        assert_eq!(
            DistanceTable(&grid).to_string(),
            "0 0 0 0 -2 0 0 0 0 0\n1 0 0 0 -1 0 0 0 -1 0\n2 0 0 0 0 0 0 0 -2 0\n"
        );
    }

    #[test]
    fn search_block_with_table_round_trips() {
        let grid = parse_map(MAP).unwrap();
        let table = DistanceTable(&grid).to_string();
        let input = format!("4 3\n0 0\n3 2\n{}\n{}", grid.passable_count(), table);
        let parsed = parse_search(&input).unwrap();
        assert_eq!(parsed.source, Point::new(0, 0));
        assert_eq!(parsed.goal, Point::new(3, 2));
        let loaded = parsed.build_grid().unwrap();

        let a = Pathfinder::new(&grid)
            .search(parsed.source, parsed.goal)
            .unwrap();
        let b = Pathfinder::new(&loaded)
            .search(parsed.source, parsed.goal)
            .unwrap();
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn search_block_with_map_rows() {
        let parsed = parse_search("4 3\n0 0 3 2\n....\n.#..\n....\n").unwrap();
        let GridSource::Map(rows) = &parsed.grid else {
            panic!("expected map rows, got {:?}", parsed.grid);
        };
        assert_eq!(rows.len(), 3);
        let grid = parsed.build_grid().unwrap();
        assert_eq!(grid, parse_map(MAP).unwrap());
    }

    #[test]
    fn digit_walls_are_read_as_map_rows() {
        let parsed = parse_search("3 2\n0 1 2 1\n111\n...\n").unwrap();
        assert_eq!(
            parsed.grid,
            GridSource::Map(vec!["111".to_string(), "...".to_string()])
        );
        let grid = parsed.build_grid().unwrap();
        assert!(grid.tile(Point::new(1, 0)).is_wall());
        let report = Pathfinder::new(&grid)
            .search(parsed.source, parsed.goal)
            .unwrap();
        assert_eq!(report.path().map(|p| p.cost()), Some(2.0));

        let one_row = parse_search("3 1\n0 0 2 0\n123\n").unwrap();
        assert_eq!(one_row.grid, GridSource::Map(vec!["123".to_string()]));
    }

    #[test]
    fn search_block_with_inconsistent_table_fails_to_build() {
        // (0, 0) claims a jump point one step east, but (1, 0) is unlisted.
        let parsed = parse_search("2 2 0 0 0 1 1 0 0 0 0 1 0 0 0 0 0").unwrap();
        let GridSource::Precomputed(rows) = &parsed.grid else {
            panic!("expected a distance table, got {:?}", parsed.grid);
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(
            parsed.build_grid().unwrap_err(),
            GridError::BlockedJump {
                pos: Point::new(0, 0),
                dir: Direction::E,
                distance: 1
            }
        );
    }

    #[test]
    fn search_block_rejects_truncated_table() {
        let err = parse_search("2 2 0 0 1 1 4 0 0 0 0 0 0 0 0 0 0").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedEnd {
                expected: "tile coordinate"
            }
        );
    }
}
