//! Distance sweeps run once while a [`Grid`] is built.
//!
//! The four cardinal sweeps are independent of each other. The two diagonal
//! sweeps read cardinal distances, and each layer reads the layer before it,
//! so they must run after all cardinal sweeps.

use jpsp_core::{Direction, Point};

use crate::grid::{Grid, Tile};

impl Grid {
    /// Corner from which a sweep along `main` starts, and the direction in
    /// which successive lines are taken.
    fn sweep_origin(&self, main: Direction) -> (Point, Direction) {
        let cross = match main {
            Direction::N | Direction::S => Direction::E,
            _ => Direction::S,
        };
        let x = if main == Direction::W { self.width() - 1 } else { 0 };
        let y = if main == Direction::N { self.height() - 1 } else { 0 };
        (Point::new(x, y), cross)
    }

    /// Walk every line parallel to `main`, writing `distance[main.back()]`.
    ///
    /// The counter measures how far the last wall or jump point is behind the
    /// current tile, so the value stored under `main.back()` is the jump
    /// distance when travelling the other way.
    pub(crate) fn cardinal_sweep(&mut self, main: Direction) {
        debug_assert!(main.is_cardinal());
        let back = main.back();
        let (mut start, cross) = self.sweep_origin(main);

        while self.rng.contains(start) {
            let mut count: i32 = -1;
            let mut jp_seen = false;
            let mut p = start;
            while let Some(i) = self.rng.index(p) {
                match &mut self.tiles[i] {
                    Tile::Wall { distances } => {
                        count = -1;
                        jp_seen = false;
                        distances[back] = 0;
                    }
                    Tile::Empty {
                        jump_points,
                        distances,
                    } => {
                        count += 1;
                        distances[back] = if jp_seen { count } else { -count };
                        if jump_points.contains(back) {
                            count = 0;
                            jp_seen = true;
                        }
                    }
                    // never stored
                    Tile::Border => {}
                }
                p = p + main.delta();
            }
            start = start + cross.delta();
        }
    }

    /// Fill the two diagonals behind `main` layer by layer.
    ///
    /// With `main = S` this writes NE and NW, with `main = N` it writes SW
    /// and SE. Each tile extends the run of its diagonal neighbour in the
    /// previous layer.
    pub(crate) fn diagonal_sweep(&mut self, main: Direction) {
        debug_assert!(main == Direction::N || main == Direction::S);
        let (mut layer, cross) = self.sweep_origin(main);

        while self.rng.contains(layer) {
            let mut p = layer;
            while let Some(i) = self.rng.index(p) {
                if self.tiles[i].is_passable() {
                    let left_back = self.diagonal_run(p, main, main.left_back(), main.left());
                    let right_back = self.diagonal_run(p, main, main.right_back(), main.right());
                    if let Tile::Empty { distances, .. } = &mut self.tiles[i] {
                        distances[main.left_back()] = left_back;
                        distances[main.right_back()] = right_back;
                    }
                }
                p = p + cross.delta();
            }
            layer = layer + main.delta();
        }
    }

    /// Distance from `p` travelling diagonally in `diag`, whose cardinal
    /// components are `main.back()` and `side`.
    fn diagonal_run(&self, p: Point, main: Direction, diag: Direction, side: Direction) -> i32 {
        let back = main.back();
        let (
            Tile::Empty { .. },
            Tile::Empty {
                distances: next, ..
            },
            Tile::Empty { .. },
        ) = (
            self.neighbor(p, back),
            self.neighbor(p, diag),
            self.neighbor(p, side),
        )
        else {
            // blocked one step away
            return 0;
        };
        if next[back] > 0 || next[side] > 0 {
            // the diagonal neighbour sees a straight jump point
            return 1;
        }
        let run = next[diag];
        run + if run > 0 { 1 } else { -1 }
    }
}
