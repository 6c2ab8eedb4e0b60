//! Tile grid generation and queries
//!
//! A square grid of solid/empty cells, generated once per run and
//! immutable until reset. The border ring is always solid so nothing
//! can leave the arena.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::SOLID_DENSITY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Empty,
    Solid,
}

impl Tile {
    #[inline]
    pub fn is_solid(self) -> bool {
        self == Tile::Solid
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileGrid {
    dimension: usize,
    cells: Vec<Tile>,
}

impl TileGrid {
    /// Generate a fresh grid: border forced solid, interior solid with
    /// probability [`SOLID_DENSITY`].
    pub fn generate(dimension: usize, rng: &mut impl Rng) -> Self {
        let cells = (0..dimension * dimension)
            .map(|i| {
                let x = i % dimension;
                let y = i / dimension;
                let border = x == 0 || y == 0 || x == dimension - 1 || y == dimension - 1;
                if border || rng.random_bool(SOLID_DENSITY) {
                    Tile::Solid
                } else {
                    Tile::Empty
                }
            })
            .collect();
        Self { dimension, cells }
    }

    /// Build a grid from rows of `#` (solid) and spaces, for scripted
    /// levels and tests. Rows must be `dimension` strings of equal length.
    pub fn from_rows(rows: &[&str]) -> Self {
        let dimension = rows.len();
        let cells = rows
            .iter()
            .flat_map(|row| {
                assert_eq!(row.len(), dimension, "level rows must form a square");
                row.chars()
                    .map(|c| if c == ' ' { Tile::Empty } else { Tile::Solid })
            })
            .collect();
        Self { dimension, cells }
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    #[inline]
    pub fn tile(&self, x: usize, y: usize) -> Tile {
        self.cells[y * self.dimension + x]
    }

    /// Neighbor query; anything out of bounds reads as solid, so
    /// edge-adjacency logic never special-cases the map boundary.
    pub fn neighbor(&self, x: usize, y: usize, dx: i32, dy: i32) -> Tile {
        let nx = x as i32 + dx;
        let ny = y as i32 + dy;
        if nx < 0 || ny < 0 || nx >= self.dimension as i32 || ny >= self.dimension as i32 {
            return Tile::Solid;
        }
        self.tile(nx as usize, ny as usize)
    }

    /// Rejection-sample a random empty cell. The interior solid density
    /// is low, so this terminates quickly for any generated grid.
    pub fn random_empty_cell(&self, rng: &mut impl Rng) -> (usize, usize) {
        loop {
            let x = rng.random_range(0..self.dimension);
            let y = rng.random_range(0..self.dimension);
            if self.tile(x, y) == Tile::Empty {
                return (x, y);
            }
        }
    }

    /// All solid tile coordinates. Brute force is fine at dimension 20;
    /// a spatial lookup would only pay off on much larger grids.
    pub fn solid_tiles(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, tile)| tile.is_solid())
            .map(|(i, _)| (i % self.dimension, i / self.dimension))
    }
}
