use super::config::NECK_LENGTH;
use super::direction::Direction;

/// A position on the board, in units (always a multiple of the cell size)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move one cell of `cell_size` units in a direction
    pub fn stepped(&self, direction: Direction, cell_size: i32) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx * cell_size, dy * cell_size)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Committed direction of movement
    pub direction: Direction,
    /// Cell the tail vacated on the last move; growth reclaims it
    pub trailing: Position,
}

impl Snake {
    /// Create a snake whose body trails straight behind the head.
    /// The snake always has at least its head.
    pub fn new(head: Position, direction: Direction, length: usize, cell_size: i32) -> Self {
        let back = direction.opposite();
        let mut body = vec![head];

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.stepped(back, cell_size));
        }

        let trailing = body[body.len() - 1].stepped(back, cell_size);

        Self {
            body,
            direction,
            trailing,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Extend by one segment. The new slot holds the vacated cell until the
    /// next shift overwrites it with the current tail.
    pub fn grow(&mut self) {
        self.body.push(self.trailing);
    }

    /// Check if a position is covered by any segment, head included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Self-collision test: does any segment past the neck sit on the head?
    pub fn head_hits_body(&self) -> bool {
        let head = self.head();
        self.body
            .iter()
            .skip(NECK_LENGTH + 1)
            .any(|segment| *segment == head)
    }

    /// Shift every segment into the slot ahead of it, tail first, then step
    /// the head one cell in the committed direction.
    pub fn advance(&mut self, cell_size: i32) {
        self.trailing = self.tail();

        for i in (1..self.body.len()).rev() {
            self.body[i] = self.body[i - 1];
        }

        self.body[0] = self.body[0].stepped(self.direction, cell_size);
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState<'a> {
    pub segments: &'a [Position],
    pub head_index: usize,
    pub apple: Position,
    pub is_alive: bool,
    pub board_width: u32,
    pub board_height: u32,
    pub cell_size: u32,
    pub ticks: u32,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// Latest accepted turn, committed on the next tick
    pub pending_direction: Option<Direction>,
    pub apple: Position,
    pub board_width: u32,
    pub board_height: u32,
    pub cell_size: u32,
    pub ticks: u32,
    pub is_alive: bool,
}

impl GameState {
    /// Create a new game state
    pub fn new(
        snake: Snake,
        apple: Position,
        board_width: u32,
        board_height: u32,
        cell_size: u32,
    ) -> Self {
        Self {
            snake,
            pending_direction: None,
            apple,
            board_width,
            board_height,
            cell_size,
            ticks: 0,
            is_alive: true,
        }
    }

    /// Request a turn. Reversing onto the committed direction is ignored.
    /// Returns whether the request was accepted.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if self.snake.direction.is_opposite(requested) {
            return false;
        }

        self.pending_direction = Some(requested);
        true
    }

    /// Committed direction; a pending turn does not show up here until the next tick
    pub fn direction(&self) -> Direction {
        self.snake.direction
    }

    /// Check if a position is within the board bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.board_width as i32
            && pos.y >= 0
            && pos.y < self.board_height as i32
    }

    pub fn render_state(&self) -> RenderState<'_> {
        RenderState {
            segments: &self.snake.body,
            head_index: 0,
            apple: self.apple,
            is_alive: self.is_alive,
            board_width: self.board_width,
            board_height: self.board_height,
            cell_size: self.cell_size,
            ticks: self.ticks,
        }
    }
}
