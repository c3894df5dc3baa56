//! Robot sensor suite: bias, rangefinders, goal radar.
//!
//! Per-step input vector, 11 elements:
//! 0. bias, always 1.0
//! 1-6. rangefinders at relative angles -90, -45, 0, 45, 90, -180 degrees,
//!      each the ray-cast distance to the nearest wall divided by
//!      `MAX_RANGE` (1.0 when nothing is in range)
//! 7-10. goal radar: one bit per 90-degree quadrant of the goal bearing
//!       relative to heading (front-right, front-left, back-left,
//!       back-right), wrapping cleanly at the 0/360 boundary

use crate::geometry::{self, Vec2};
use crate::maze::Maze;

/// Total sensor inputs fed to a controller.
pub const NUM_INPUTS: usize = 11;

/// Rangefinder reach in grid units; readings are normalized against it.
pub const MAX_RANGE: f64 = 100.0;

/// Rangefinder directions relative to heading, degrees.
pub const RANGEFINDER_ANGLES: [f64; 6] = [-90.0, -45.0, 0.0, 45.0, 90.0, -180.0];

/// Builds the full input vector for a robot at `position` facing `heading`.
#[must_use]
pub fn sense(maze: &Maze, position: Vec2, heading: f64) -> [f64; NUM_INPUTS] {
    let mut inputs = [0.0; NUM_INPUTS];
    inputs[0] = 1.0;

    for (i, rel) in RANGEFINDER_ANGLES.iter().enumerate() {
        let angle = heading + rel.to_radians();
        inputs[1 + i] = geometry::raycast(position, angle, MAX_RANGE, &maze.walls) / MAX_RANGE;
    }

    let goal = Vec2::new(maze.goal.0, maze.goal.1);
    inputs[7 + radar_quadrant(position, heading, goal)] = 1.0;

    inputs
}

/// Which 90-degree quadrant the goal bearing falls into, relative to
/// heading: 0 front-right, 1 front-left, 2 back-left, 3 back-right.
#[must_use]
pub fn radar_quadrant(position: Vec2, heading: f64, goal: Vec2) -> usize {
    let bearing = (goal.y - position.y).atan2(goal.x - position.x);
    // Normalize the relative bearing to [0, 360) so the quadrant cut wraps
    // at the 0/360 boundary instead of splitting the front sector.
    let mut relative = (bearing - heading).to_degrees() % 360.0;
    if relative < 0.0 {
        relative += 360.0;
    }
    ((relative / 90.0) as usize).min(3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn open_maze() -> Maze {
        // 9x5 room, goal far right.
        Maze::parse("*********\n*       *\n*S     G*\n*       *\n*********").unwrap()
    }

    #[test]
    fn test_sense_bias_is_constant_one() {
        let maze = open_maze();
        let inputs = sense(&maze, Vec2::new(4.0, 2.0), 0.0);
        assert_eq!(inputs[0], 1.0);
    }

    #[test]
    fn test_sense_rangefinders_normalized() {
        let maze = open_maze();
        let inputs = sense(&maze, Vec2::new(4.0, 2.0), 0.0);
        // Forward (+x) from (4,2): wall cell at x=8, near edge 7.5, 3.5 away.
        assert!((inputs[3] - 3.5 / MAX_RANGE).abs() < 1e-9);
        // Rear (-x): wall cell at x=0, near edge 0.5, 3.5 away.
        assert!((inputs[6] - 3.5 / MAX_RANGE).abs() < 1e-9);
        // Left (-90 deg, -y): wall row at y=0, near edge 0.5, 1.5 away.
        assert!((inputs[1] - 1.5 / MAX_RANGE).abs() < 1e-9);
        for reading in &inputs[1..7] {
            assert!((0.0..=1.0).contains(reading));
        }
    }

    #[test]
    fn test_radar_goal_dead_ahead_is_front_right() {
        let q = radar_quadrant(Vec2::new(0.0, 0.0), 0.0, Vec2::new(10.0, 0.0));
        assert_eq!(q, 0, "bearing 0 wraps into the front-right quadrant");
    }

    #[test]
    fn test_radar_goal_behind() {
        let q = radar_quadrant(Vec2::new(0.0, 0.0), 0.0, Vec2::new(-10.0, 0.1));
        assert_eq!(q, 1, "just under 180 degrees sits at the top of slice 1");
        let q = radar_quadrant(Vec2::new(0.0, 0.0), 0.0, Vec2::new(-10.0, -0.1));
        assert_eq!(q, 2, "just past 180 degrees rolls into slice 2");
    }

    #[test]
    fn test_radar_follows_heading() {
        // Goal due +x; robot facing +y puts it 90 degrees clockwise, i.e.
        // relative bearing 270 -> back-right.
        let q = radar_quadrant(Vec2::new(0.0, 0.0), FRAC_PI_2, Vec2::new(10.0, 0.0));
        assert_eq!(q, 3);
        // Facing -x puts the goal dead astern minus epsilon.
        let q = radar_quadrant(Vec2::new(0.0, 0.0), PI, Vec2::new(10.0, 0.0));
        assert_eq!(q, 2);
    }

    #[test]
    fn test_radar_wraparound_boundary() {
        // Goal slightly clockwise of dead ahead: relative bearing just
        // below 360 must land in back-right, just above 0 in front-right.
        let q = radar_quadrant(Vec2::new(0.0, 0.0), 0.0, Vec2::new(10.0, -0.1));
        assert_eq!(q, 3);
        let q = radar_quadrant(Vec2::new(0.0, 0.0), 0.0, Vec2::new(10.0, 0.1));
        assert_eq!(q, 0);
    }

    #[test]
    fn test_sense_exactly_one_radar_bit() {
        let maze = open_maze();
        for heading in [0.0, 1.0, -2.5, 3.0] {
            let inputs = sense(&maze, Vec2::new(2.0, 2.0), heading);
            let active: usize = inputs[7..11].iter().filter(|v| **v == 1.0).count();
            assert_eq!(active, 1, "heading {}", heading);
        }
    }
}
