//! Pipe Breaker entry point
//!
//! Headless native run: builds a board from settings and a level, then
//! drives it at a fixed 60 Hz with the paddle chasing the ball.
//!
//! Usage: `pipe-breaker [settings.json] [level.json]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::Path;

    use pipe_breaker::level::{self, decode_tiles};
    use pipe_breaker::sim::{GameBoard, SpatialGrid, TickInput, TickReport};
    use pipe_breaker::{Result, Settings};

    const FRAME_DT: f32 = 1.0 / 60.0;
    const FRAMES: u32 = 60 * 60;
    /// Paddle holds still while the ball is this close to its center
    const TRACK_DEADZONE: f32 = 4.0;

    pub fn run(settings_path: &str, level_path: Option<&str>) -> Result<()> {
        let settings = Settings::load(settings_path)?;

        let tiles = match level_path {
            Some(path) => {
                log::info!("Loading level from {}", Path::new(path).display());
                decode_tiles(&std::fs::read_to_string(path)?)?
            }
            None => level::generate(
                &settings.layout,
                &settings.brick_sheet,
                settings.seed,
                settings.brick_density,
            ),
        };
        let grid = SpatialGrid::from_records(&settings.layout, tiles)?;
        let mut board = GameBoard::new(&settings, grid)?;
        let bricks_at_start = board.grid.brick_count();

        let mut totals = TickReport::default();
        let mut capped_frames = 0;
        for frame in 0..FRAMES {
            let offset = board.ball.center().x - board.paddle.center().x;
            let input = TickInput {
                move_left: offset < -TRACK_DEADZONE,
                move_right: offset > TRACK_DEADZONE,
                start: frame == 0,
            };

            let report = board.tick(&input, FRAME_DT);
            totals.collisions += report.collisions;
            totals.bricks_hit += report.bricks_hit;
            totals.bricks_destroyed += report.bricks_destroyed;
            capped_frames += u32::from(report.capped);

            if board.ball.position.y > board.layout.height() {
                log::info!("Ball left the board on frame {}", frame);
                break;
            }
            if board.grid.brick_count() == 0 {
                log::info!("Board cleared on frame {}", frame);
                break;
            }
        }

        log::info!(
            "Ball at ({:.1}, {:.1}); {} collisions, {} brick hits, {}/{} bricks destroyed, {} capped frames",
            board.ball.position.x,
            board.ball.position.y,
            totals.collisions,
            totals.bricks_hit,
            totals.bricks_destroyed,
            bricks_at_start,
            capped_frames
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pipe Breaker (native) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let settings_path = args.first().map_or("settings.json", String::as_str);
    let level_path = args.get(1).map(String::as_str);

    if let Err(e) = native::run(settings_path, level_path) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
