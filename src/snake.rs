use crate::Coords;
use Direction::*;
use MoveResult::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// Unit step on the grid, y growing downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfCollision,
}

#[derive(Debug, PartialEq, Eq)]
pub enum MoveResult {
    Moved { new_head: Coords },
    Crashed(Collision)
}

/// Body is stored head-first. Every segment is a multiple of `step`.
#[derive(Clone, Debug)]
pub struct Snake {
    body: Vec<Coords>,
    direction: Direction,
    step: i32,
    grow_next_move: bool,
}

impl Snake {
    /// Lays `size` segments out behind `head`, opposite to `direction`.
    pub fn new(head: Coords, size: usize, direction: Direction, step: i32) -> Self {
        let (dx, dy) = direction.delta();

        let body = (0..size as i32)
            .map(|i| (head.0 - dx * step * i, head.1 - dy * step * i))
            .collect();
        Snake { body, direction, step, grow_next_move: false }
    }

    #[cfg(test)]
    pub fn from_body(body: Vec<Coords>, direction: Direction, step: i32) -> Self {
        assert!(!body.is_empty());
        Snake { body, direction, step, grow_next_move: false }
    }

    pub fn body(&self) -> &[Coords] {
        &self.body
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn contains(&self, pos: &Coords) -> bool {
        self.body.contains(pos)
    }

    /// Advances one cell inside a `width` x `height` area. On a crash the body
    /// is left where it was.
    pub fn move_step(&mut self, width: i32, height: i32) -> MoveResult {
        let old_head = self.head();
        let (dx, dy) = self.direction.delta();
        let new_head = (old_head.0 + dx * self.step, old_head.1 + dy * self.step);

        if new_head.0 < 0 || new_head.1 < 0 || new_head.0 >= width || new_head.1 >= height {
            return Crashed(Collision::Wall);
        }

        // The tail cell is vacated this tick unless the snake is growing
        let occupied = if self.grow_next_move {
            &self.body[..]
        } else {
            &self.body[..self.body.len() - 1]
        };

        if occupied.contains(&new_head) {
            return Crashed(Collision::SelfCollision);
        }

        self.body.insert(0, new_head);

        if self.grow_next_move {
            self.grow_next_move = false;
        } else {
            self.body.pop();
        }

        Moved { new_head }
    }

    pub fn set_direction(&mut self, new_direction: Direction) {
        self.direction = new_direction;
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    pub fn grow(&mut self) {
        self.grow_next_move = true;
    }

    #[cfg(test)]
    pub fn is_growing(&self) -> bool {
        self.grow_next_move
    }

    pub fn head_char(&self) -> char {
        match self.direction {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_lays_body_behind_head() {
        let snake = Snake::new((280, 200), 3, Left, 20);
        assert_eq!(snake.body(), &[(280, 200), (300, 200), (320, 200)]);

        let snake = Snake::new((100, 100), 3, Down, 20);
        assert_eq!(snake.body(), &[(100, 100), (100, 80), (100, 60)]);
    }

    #[test]
    fn test_move_drops_tail() {
        let mut snake = Snake::new((280, 200), 3, Left, 20);
        let res = snake.move_step(600, 400);

        assert_eq!(res, Moved { new_head: (260, 200) });
        assert_eq!(snake.body(), &[(260, 200), (280, 200), (300, 200)]);
    }

    #[test]
    fn test_grow_keeps_tail_once() {
        let mut snake = Snake::new((280, 200), 3, Left, 20);
        snake.grow();

        assert_eq!(snake.move_step(600, 400), Moved { new_head: (260, 200) });
        assert_eq!(snake.body(), &[(260, 200), (280, 200), (300, 200), (320, 200)]);
        assert!(!snake.is_growing());

        snake.move_step(600, 400);
        assert_eq!(snake.body().len(), 4);
    }

    #[test]
    fn test_wall_crash_leaves_body() {
        let mut snake = Snake::new((0, 200), 3, Left, 20);
        assert_eq!(snake.move_step(600, 400), Crashed(Collision::Wall));
        assert_eq!(snake.body(), &[(0, 200), (20, 200), (40, 200)]);

        let mut snake = Snake::new((580, 0), 1, Up, 20);
        assert_eq!(snake.move_step(600, 400), Crashed(Collision::Wall));
        snake.set_direction(Right);
        assert_eq!(snake.move_step(600, 400), Crashed(Collision::Wall));
    }

    #[test]
    fn test_reversal_hits_neck() {
        let mut snake = Snake::new((280, 200), 3, Left, 20);
        snake.set_direction(Right);
        assert_eq!(snake.move_step(600, 400), Crashed(Collision::SelfCollision));
    }

    #[test]
    fn test_following_tail_is_not_a_crash() {
        // A 2x2 loop: the head moves into the cell the tail leaves
        let mut snake = Snake::from_body(vec![(20, 0), (20, 20), (0, 20), (0, 0)], Left, 20);
        assert_eq!(snake.move_step(100, 100), Moved { new_head: (0, 0) });
        assert_eq!(snake.body(), &[(0, 0), (20, 0), (20, 20), (0, 20)]);
    }

    #[test]
    fn test_growing_into_tail_is_a_crash() {
        let mut snake = Snake::from_body(vec![(20, 0), (20, 20), (0, 20), (0, 0)], Left, 20);
        snake.grow();
        assert_eq!(snake.move_step(100, 100), Crashed(Collision::SelfCollision));
    }

    #[test]
    fn test_head_char() {
        let mut snake = Snake::new((100, 100), 1, Up, 20);
        assert_eq!(snake.head_char(), '^');
        snake.set_direction(Right);
        assert_eq!(snake.head_char(), '>');
        assert_eq!(snake.get_direction(), Right);
    }
}
