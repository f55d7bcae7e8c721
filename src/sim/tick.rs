//! Per-tick motion resolution
//!
//! The ball's displacement for a tick is split into equal sub-steps. Each
//! sub-step probes the obstacles in a fixed order (paddle, pipes, nearby
//! bricks). The first hit bends the ball's direction and the same sub-step is
//! retried; a clean probe advances the ball. A per-tick collision cap
//! guarantees termination when the ball is wedged.

use glam::Vec2;

use super::aabb::Side;
use super::collision::{CircleCollider, Contact};
use super::grid::SpatialGrid;
use super::state::{Ball, BoardLayout, GameBoard, Paddle, Walls};
use super::vector::Vec2Ext;
use crate::consts::{BRICK_SEARCH_RADIUS, MAX_COLLISIONS, SUB_STEPS};

/// Bounds on a single resolver run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverLimits {
    /// Equal slices the tick displacement is split into
    pub sub_steps: u32,
    /// Hits allowed before the rest of the tick is dropped
    pub max_collisions: u32,
}

impl Default for ResolverLimits {
    fn default() -> Self {
        Self {
            sub_steps: SUB_STEPS,
            max_collisions: MAX_COLLISIONS,
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Toggle the round on/off
    pub start: bool,
}

/// What the ball hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Paddle,
    /// Index into `Walls::colliders`
    Wall(usize),
    /// Grid cell of the brick and whether this hit destroyed it
    Brick { x: usize, y: usize, destroyed: bool },
}

/// One positive probe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub contact: Contact,
    pub surface: Surface,
    /// Replacement direction angle; `None` means reflect on the contact side
    pub steer: Option<f32>,
}

impl Hit {
    /// Bend `direction` according to this hit
    pub fn deflect(&self, direction: &mut Vec2) {
        match self.steer {
            Some(angle) => {
                direction.set_from_angle(angle);
            }
            None if self.contact.side().is_horizontal() => {
                direction.reflect_x();
            }
            None => {
                direction.reflect_y();
            }
        }
    }
}

/// A group of obstacles the resolver can probe
pub trait CandidateSource {
    /// First contact between `circle` centered at `center` and this source
    fn probe(&mut self, circle: &CircleCollider, center: Vec2) -> Option<Hit>;

    /// Bring the source back to a consistent state between sub-steps
    fn settle(&mut self) {}
}

impl CandidateSource for Paddle {
    fn probe(&mut self, circle: &CircleCollider, center: Vec2) -> Option<Hit> {
        let contact = circle.check_box(&self.collider, center)?;
        // Only a clean landing on the top edge uses the zone table
        let steer = (contact == Contact::Edge(Side::Top)).then(|| self.bounce_angle(center.x));
        Some(Hit {
            contact,
            surface: Surface::Paddle,
            steer,
        })
    }
}

impl CandidateSource for Walls {
    fn probe(&mut self, circle: &CircleCollider, center: Vec2) -> Option<Hit> {
        self.colliders.iter().enumerate().find_map(|(i, wall)| {
            circle.check_box(wall, center).map(|contact| Hit {
                contact,
                surface: Surface::Wall(i),
                steer: None,
            })
        })
    }
}

/// Bricks near the ball, found through the grid
pub struct BrickField<'a> {
    pub grid: &'a mut SpatialGrid,
    pub layout: &'a BoardLayout,
}

impl CandidateSource for BrickField<'_> {
    fn probe(&mut self, circle: &CircleCollider, center: Vec2) -> Option<Hit> {
        let (cx, cy) = self.layout.local_to_cell(center)?;
        let window = self.grid.window(cx, cy, BRICK_SEARCH_RADIUS)?;

        for (x, y) in window.cells() {
            let Some(brick) = self.grid.get_mut(x, y) else {
                continue;
            };
            if brick.destroyed {
                continue;
            }
            if let Some(contact) = circle.check_box(&brick.collider, center) {
                let destroyed = brick.damage();
                return Some(Hit {
                    contact,
                    surface: Surface::Brick { x, y, destroyed },
                    steer: None,
                });
            }
        }
        None
    }

    fn settle(&mut self) {
        let removed = self.grid.purge_destroyed();
        if removed > 0 {
            log::debug!("purged {} destroyed bricks", removed);
        }
    }
}

/// Everything the ball can run into, in probe order
pub struct Obstacles<'a> {
    pub paddle: &'a mut Paddle,
    pub walls: &'a mut Walls,
    pub bricks: BrickField<'a>,
}

impl Obstacles<'_> {
    /// Sources in probe order, ready for `resolve_motion`
    pub fn sources(&mut self) -> [&mut dyn CandidateSource; 3] {
        [&mut *self.paddle, &mut *self.walls, &mut self.bricks]
    }
}

/// Outcome of one resolver run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MotionReport {
    /// Sub-steps that advanced the ball
    pub sub_steps: u32,
    pub collisions: u32,
    pub hits: Vec<Hit>,
    /// The collision cap ended the run early
    pub capped: bool,
}

/// Move `ball` for `delta` seconds against `sources`, probed in slice order
pub fn resolve_motion(
    ball: &mut Ball,
    sources: &mut [&mut dyn CandidateSource],
    delta: f32,
    limits: ResolverLimits,
) -> MotionReport {
    let mut report = MotionReport::default();
    ball.collider.update(ball.position);

    let total = ball.speed * delta;
    if !total.is_finite() || total <= 0.0 || limits.sub_steps == 0 {
        return report;
    }
    let step = total / limits.sub_steps as f32;

    let mut remaining = limits.sub_steps;
    let mut dirty: Vec<usize> = Vec::new();

    while remaining > 0 && report.collisions < limits.max_collisions {
        for i in dirty.drain(..) {
            sources[i].settle();
        }

        let next = ball.position + ball.direction * step;
        let center = ball.collider.center_at(next);

        let hit = sources
            .iter_mut()
            .enumerate()
            .find_map(|(i, source)| source.probe(&ball.collider, center).map(|hit| (i, hit)));

        match hit {
            Some((i, hit)) => {
                hit.deflect(&mut ball.direction);
                report.collisions += 1;
                log::debug!(
                    "{:?} hit {:?} at ({:.1}, {:.1}), direction now ({:.3}, {:.3})",
                    hit.contact,
                    hit.surface,
                    center.x,
                    center.y,
                    ball.direction.x,
                    ball.direction.y
                );
                if !dirty.contains(&i) {
                    dirty.push(i);
                }
                report.hits.push(hit);
            }
            None => {
                ball.position = next;
                ball.collider.update(ball.position);
                remaining -= 1;
                report.sub_steps += 1;
            }
        }
    }

    for i in dirty {
        sources[i].settle();
    }

    if remaining > 0 {
        report.capped = true;
        log::warn!(
            "collision cap ({}) reached with {} of {} sub-steps left; ball held at ({:.1}, {:.1})",
            limits.max_collisions,
            remaining,
            limits.sub_steps,
            ball.position.x,
            ball.position.y
        );
    }

    report
}

/// Clamp a wall-clock frame delta to `[0, max]`; non-finite deltas become 0
pub fn clamp_frame_delta(raw: f32, max: f32) -> f32 {
    if !raw.is_finite() {
        return 0.0;
    }
    raw.clamp(0.0, max.max(0.0))
}

/// Summary of one board tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub sub_steps: u32,
    pub collisions: u32,
    pub bricks_hit: u32,
    pub bricks_destroyed: u32,
    pub capped: bool,
}

/// Advance the board by one frame
pub fn tick(board: &mut GameBoard, input: &TickInput, delta: f32) -> TickReport {
    let dt = clamp_frame_delta(delta, board.max_frame_delta);
    if dt != delta {
        log::debug!("frame delta {} clamped to {}", delta, dt);
    }

    if input.start {
        board.started = !board.started;
        log::info!("round {}", if board.started { "started" } else { "paused" });
    }
    if !board.started {
        return TickReport::default();
    }

    let direction = f32::from(input.move_right as u8) - f32::from(input.move_left as u8);
    board.paddle.slide(direction, dt);

    let mut obstacles = Obstacles {
        paddle: &mut board.paddle,
        walls: &mut board.walls,
        bricks: BrickField {
            grid: &mut board.grid,
            layout: &board.layout,
        },
    };
    let motion = resolve_motion(&mut board.ball, &mut obstacles.sources(), dt, board.limits);

    let mut report = TickReport {
        sub_steps: motion.sub_steps,
        collisions: motion.collisions,
        capped: motion.capped,
        ..Default::default()
    };
    for hit in &motion.hits {
        if let Surface::Brick { destroyed, .. } = hit.surface {
            report.bricks_hit += 1;
            report.bricks_destroyed += u32::from(destroyed);
        }
    }
    report
}

impl GameBoard {
    pub fn tick(&mut self, input: &TickInput, delta: f32) -> TickReport {
        tick(self, input, delta)
    }
}
