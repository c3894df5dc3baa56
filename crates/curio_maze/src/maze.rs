//! Grid maze model and textual layout parsing.
//!
//! A layout is a rectangular text grid: `*` is a solid wall cell, `S` the
//! start, `G` the goal, anything else open floor. Width is the longest line;
//! shorter lines are open floor beyond their end. The model is built once
//! and never mutated.

use std::collections::HashSet;

use crate::error::{MazeError, Result};

/// Episode length used when the caller does not override it.
pub const DEFAULT_TIMESTEPS: usize = 400;

/// Static maze description.
#[derive(Clone, Debug)]
pub struct Maze {
    /// Grid width in cells.
    pub width: usize,
    /// Grid height in cells.
    pub height: usize,
    /// Solid cells, keyed by integer grid coordinates.
    pub walls: HashSet<(i64, i64)>,
    /// Robot spawn position.
    pub start: (f64, f64),
    /// Goal position.
    pub goal: (f64, f64),
    /// Default episode length for simulations on this maze.
    pub timesteps: usize,
}

impl Maze {
    /// Parses a textual layout. Exactly one `S` and one `G` are required.
    pub fn parse(layout: &str) -> Result<Self> {
        let lines: Vec<&str> = layout.lines().collect();
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        if width == 0 {
            return Err(MazeError::Empty);
        }
        let height = lines.len();

        let mut walls = HashSet::new();
        let mut start = None;
        let mut goal = None;
        for (y, line) in lines.iter().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                match ch {
                    '*' => {
                        walls.insert((x as i64, y as i64));
                    }
                    'S' => {
                        if start.replace((x as f64, y as f64)).is_some() {
                            return Err(MazeError::DuplicateStart);
                        }
                    }
                    'G' => {
                        if goal.replace((x as f64, y as f64)).is_some() {
                            return Err(MazeError::DuplicateGoal);
                        }
                    }
                    _ => {}
                }
            }
        }

        let maze = Self {
            width,
            height,
            walls,
            start: start.ok_or(MazeError::MissingStart)?,
            goal: goal.ok_or(MazeError::MissingGoal)?,
            timesteps: DEFAULT_TIMESTEPS,
        };
        tracing::debug!(
            width = maze.width,
            height = maze.height,
            walls = maze.walls.len(),
            "parsed maze layout"
        );
        Ok(maze)
    }

    /// Whether `cell` is solid.
    #[must_use]
    pub fn is_wall(&self, cell: (i64, i64)) -> bool {
        self.walls.contains(&cell)
    }

    /// Whether a continuous position lies inside `[0,width) x [0,height)`.
    #[must_use]
    pub fn in_bounds(&self, x: f64, y: f64) -> bool {
        x >= 0.0 && x < self.width as f64 && y >= 0.0 && y < self.height as f64
    }

    /// Built-in 20x12 layout with a mid-length detour between start and
    /// goal. Start at (3, 8), goal at (17, 3).
    #[must_use]
    pub fn medium() -> Self {
        Self::parse(MEDIUM_LAYOUT).unwrap_or_else(|e| panic!("built-in medium layout: {e}"))
    }

    /// Built-in 20x12 layout with dead ends and a walled-off goal pocket.
    /// Start at (3, 2), goal at (6, 10).
    #[must_use]
    pub fn hard() -> Self {
        Self::parse(HARD_LAYOUT).unwrap_or_else(|e| panic!("built-in hard layout: {e}"))
    }
}

const MEDIUM_LAYOUT: &str = "\
********************
*                  *
*   ****    ***    *
*      *      *  G *
*      *   ****    *
*  *****           *
*      *   *       *
*      *   *****   *
*  S   *       *   *
*      ****    *   *
*              *   *
********************";

const HARD_LAYOUT: &str = "\
********************
*      *       *   *
*  S   *  ***  *   *
*      *  * *      *
*  *****  * ****   *
*         *        *
*****  ****  *******
*          *       *
*  *****  *****    *
*  *      *   *    *
*  *  G   *   *    *
********************";
