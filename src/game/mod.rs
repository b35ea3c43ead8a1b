//! Game session state for two-paddle tennis.
//!
//! Everything the simulation mutates lives in [`GameSession`]. The submodules
//! add behaviour to it: `input` samples keys into paddle directions, `motion`
//! runs one tick, `score` handles goals and `layout` sizes and places the
//! objects for the current field. Nothing here draws or reads the terminal.

pub mod input;
pub mod layout;
pub mod motion;
pub mod score;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Waiting for a direction key.
    Stopped,
    Playing,
    /// Between a miss and the re-layout.
    Goal,
    /// A side reached the max score; reset follows immediately.
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Up,
    #[default]
    Idle,
    Down,
}

impl Direction {
    /// Screen coordinates grow downwards, so up is negative.
    pub fn sign(self) -> f32 {
        match self {
            Direction::Up => -1.0,
            Direction::Idle => 0.0,
            Direction::Down => 1.0,
        }
    }

    pub fn is_moving(self) -> bool {
        self != Direction::Idle
    }
}

/// Size of the playing surface, in the same units as every position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True before the surface has been measured, or when it has collapsed.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Paddle {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub left: f32,
    pub top: f32,
    pub size: f32,
    /// Unit signs only; magnitude comes from `speed`.
    pub dir_x: f32,
    pub dir_y: f32,
    pub speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

/// What a tick or a goal produced, for the caller to present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Rebound(Side),
    /// A point was scored against `conceded`; play waits for a key.
    Point { conceded: Side, score: Score },
    /// `final_score` is the score before the match reset.
    MatchWon { winner: Side, final_score: Score },
}

pub struct GameSession {
    config: Config,
    field: Field,
    left: Paddle,
    right: Paddle,
    ball: Ball,
    score: Score,
    state: GameState,
    last_failed: Option<Side>,
    rng: StdRng,
}

impl GameSession {
    /// A fresh session on an unmeasured field. Call [`GameSession::resize`]
    /// once the surface size is known.
    pub fn new(config: Config, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let ball = Ball {
            left: 0.0,
            top: 0.0,
            size: 0.0,
            dir_x: 1.0,
            dir_y: 1.0,
            speed: config.initial_speed,
        };
        let mut session = Self {
            config,
            field: Field::default(),
            left: Paddle::default(),
            right: Paddle::default(),
            ball,
            score: Score::default(),
            state: GameState::Stopped,
            last_failed: None,
            rng,
        };
        session.reset_layout();
        session
    }

    /// The surface changed size: re-layout without touching score or state.
    pub fn resize(&mut self, field: Field) {
        self.field = field;
        self.reset_layout();
    }

    /// One clock tick. Paddles move in every state, the ball only while playing.
    pub fn tick(&mut self) -> Option<Outcome> {
        self.step_paddle(Side::Left);
        self.step_paddle(Side::Right);
        self.step_ball()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn last_failed_side(&self) -> Option<Side> {
        self.last_failed
    }

    fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Paddle width doubles as the distance unit for everything that moves.
    fn unit(&self) -> f32 {
        self.left.width
    }

    /// Distance covered in one tick at the current speed.
    fn move_coef(&self) -> f32 {
        self.ball.speed * self.config.tick_ms * self.unit()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub const EPS: f32 = 1e-4;

    pub fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    /// 200x60 field: unit 2, paddle 2x20, ball 2.
    pub fn session() -> GameSession {
        let mut session = GameSession::new(Config::default(), Some(7));
        session.resize(Field::new(200.0, 60.0));
        session
    }

    impl GameSession {
        pub fn set_state(&mut self, state: GameState) {
            self.state = state;
        }

        pub fn set_score(&mut self, score: Score) {
            self.score = score;
        }

        pub fn set_last_failed(&mut self, side: Option<Side>) {
            self.last_failed = side;
        }

        pub fn ball_mut(&mut self) -> &mut Ball {
            &mut self.ball
        }

        pub fn paddle_at(&mut self, side: Side, top: f32) {
            self.paddle_mut(side).top = top;
        }

        pub fn set_direction(&mut self, side: Side, direction: Direction) {
            self.paddle_mut(side).direction = direction;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn new_session_waits_for_a_key() {
        let s = session();
        assert_eq!(s.state(), GameState::Stopped);
        assert_eq!(s.score(), Score::default());
        assert!(approx(s.ball().speed, 0.03));
        assert!(s.last_failed_side().is_some());
    }

    #[test]
    fn idle_tick_moves_nothing() {
        let mut s = session();
        let ball = *s.ball();
        let left = *s.paddle(Side::Left);
        assert_eq!(s.tick(), None);
        assert_eq!(*s.ball(), ball);
        assert_eq!(*s.paddle(Side::Left), left);
    }

    #[test]
    fn side_helpers() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.label(), "right");
        assert_eq!(Direction::Up.sign(), -1.0);
        assert!(!Direction::Idle.is_moving());
    }

    #[test]
    fn degenerate_fields() {
        assert!(Field::default().is_degenerate());
        assert!(Field::new(-3.0, 10.0).is_degenerate());
        assert!(Field::new(f32::NAN, 10.0).is_degenerate());
        assert!(!Field::new(1.0, 1.0).is_degenerate());
    }

    #[test]
    fn same_seed_same_first_serve() {
        let a = GameSession::new(Config::default(), Some(42));
        let b = GameSession::new(Config::default(), Some(42));
        assert_eq!(a.last_failed_side(), b.last_failed_side());
    }
}
