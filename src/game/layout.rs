use log::{debug, log, Level};
use rand::Rng;

use super::{Field, GameSession, Paddle, Side};

/// An unmeasured field is the normal state before the first resize.
fn collapse_level(field: Field) -> Level {
    if field == Field::default() {
        Level::Debug
    } else {
        Level::Warn
    }
}

impl GameSession {
    /// Size everything from the field width and put paddles and ball at
    /// their serve positions. Runs on every resize and after every goal.
    ///
    /// The ball is placed next to the side that conceded last; the very
    /// first serve side is picked at random. Ball direction and speed are
    /// left alone.
    pub fn reset_layout(&mut self) {
        let serve = match self.last_failed {
            Some(side) => side,
            None => {
                let side = if self.rng.gen_bool(0.5) {
                    Side::Left
                } else {
                    Side::Right
                };
                self.last_failed = Some(side);
                side
            }
        };

        let field = self.field;
        if field.is_degenerate() {
            log!(
                collapse_level(field),
                "field {}x{} is degenerate, objects collapsed",
                field.width,
                field.height
            );
            self.left = Paddle {
                direction: self.left.direction,
                ..Paddle::default()
            };
            self.right = Paddle {
                direction: self.right.direction,
                ..Paddle::default()
            };
            self.ball.left = 0.0;
            self.ball.top = 0.0;
            self.ball.size = 0.0;
            return;
        }

        let unit = field.width / self.config.paddle_width_divisor;
        let height = unit * self.config.paddle_height_factor;
        let ball_size = unit;
        // A field shorter than a paddle pins it to the top.
        let paddle_top = (field.height / 2.0 - height / 2.0).max(0.0);

        self.left = Paddle {
            left: unit,
            top: paddle_top,
            width: unit,
            height,
            direction: self.left.direction,
        };
        self.right = Paddle {
            left: field.width - unit * 2.0,
            top: paddle_top,
            width: unit,
            height,
            direction: self.right.direction,
        };

        self.ball.size = ball_size;
        self.ball.left = match serve {
            Side::Left => ball_size * 2.0,
            Side::Right => field.width - ball_size * 3.0,
        };
        self.ball.top = (field.height / 2.0 - ball_size / 2.0).max(0.0);

        debug!(
            "layout {}x{}: unit {:.2}, serve from {}",
            field.width,
            field.height,
            unit,
            serve.label()
        );
    }
}
