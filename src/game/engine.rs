use super::{
    config::GameConfig,
    direction::Direction,
    state::{CollisionType, GameState, Position, Snake},
};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use tracing::{debug, info};

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// The head was on the apple, so the snake grew
    pub ate_apple: bool,
    /// Set on the tick the snake dies
    pub collision: Option<CollisionType>,
    /// The game is over (either just now or earlier)
    pub terminated: bool,
}

impl TickOutcome {
    fn idle() -> Self {
        Self {
            ate_apple: false,
            collision: None,
            terminated: true,
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create a new game engine with an entropy-seeded RNG
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Engine whose apple placement is reproducible
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    /// Build the starting state: a short snake heading right and one apple
    pub fn new_game(&mut self) -> GameState {
        let snake = Snake::new(
            Position::new(self.config.start_x, self.config.start_y),
            Direction::Right,
            self.config.initial_snake_length,
            self.cell_size(),
        );

        let apple = self.locate_apple(&snake);

        GameState::new(
            snake,
            apple,
            self.config.board_width,
            self.config.board_height,
            self.config.cell_size,
        )
    }

    /// Advance the simulation by one frame.
    ///
    /// Order matters: the apple check sees the head where the last tick left
    /// it, the collision check runs on the grown snake, and only a live snake
    /// moves. Once the snake is dead this does nothing.
    pub fn tick(&mut self, state: &mut GameState) -> TickOutcome {
        if !state.is_alive {
            return TickOutcome::idle();
        }

        state.ticks += 1;

        let ate_apple = self.check_apple(state);

        if let Some(collision) = self.check_collision(state) {
            state.is_alive = false;
            info!(
                ?collision,
                length = state.snake.len(),
                ticks = state.ticks,
                head = ?state.snake.head(),
                "snake died"
            );

            return TickOutcome {
                ate_apple,
                collision: Some(collision),
                terminated: true,
            };
        }

        if let Some(direction) = state.pending_direction.take() {
            state.snake.direction = direction;
        }
        state.snake.advance(self.cell_size());

        TickOutcome {
            ate_apple,
            collision: None,
            terminated: false,
        }
    }

    /// Pick a new apple cell.
    ///
    /// Each axis is an independent draw over `[0, cells - 1)`, scaled by the
    /// cell size. Unless `apple_avoids_snake` is set the snake body is not
    /// excluded.
    pub fn locate_apple(&mut self, snake: &Snake) -> Position {
        let columns = self.config.random_column_bound().max(1) as i32;
        let rows = self.config.random_row_bound().max(1) as i32;
        let cell = self.cell_size();

        if self.config.apple_avoids_snake {
            let free: Vec<Position> = (0..rows)
                .flat_map(|r| (0..columns).map(move |c| Position::new(c * cell, r * cell)))
                .filter(|pos| !snake.occupies(*pos))
                .collect();

            if let Some(pos) = free.choose(&mut self.rng) {
                return *pos;
            }
        }

        let x = self.rng.gen_range(0..columns) * cell;
        let y = self.rng.gen_range(0..rows) * cell;
        Position::new(x, y)
    }

    fn check_apple(&mut self, state: &mut GameState) -> bool {
        if state.snake.head() != state.apple {
            return false;
        }

        state.snake.grow();
        state.apple = self.locate_apple(&state.snake);
        debug!(
            length = state.snake.len(),
            apple = ?state.apple,
            "apple eaten"
        );
        true
    }

    fn check_collision(&self, state: &GameState) -> Option<CollisionType> {
        if state.snake.head_hits_body() {
            return Some(CollisionType::SelfCollision);
        }

        if !state.is_in_bounds(state.snake.head()) {
            return Some(CollisionType::Wall);
        }

        None
    }

    fn cell_size(&self) -> i32 {
        self.config.cell_size as i32
    }
}
