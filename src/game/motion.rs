use log::debug;

use super::{GameSession, GameState, Outcome, Side};

impl GameSession {
    pub(super) fn step_paddle(&mut self, side: Side) {
        let coef = self.move_coef();
        let threshold = self.config.move_threshold;
        let field_height = self.field.height;
        let paddle = self.paddle_mut(side);
        if !paddle.direction.is_moving() {
            return;
        }
        let max_top = (field_height - paddle.height).max(0.0);
        let new_top = (paddle.top + paddle.direction.sign() * coef).clamp(0.0, max_top);
        if (new_top - paddle.top).abs() > threshold {
            paddle.top = new_top;
        }
    }

    /// Vertical move with wall bounces, then horizontal move with paddle
    /// rebounds or a goal. A goal ends the step without moving the ball.
    pub(super) fn step_ball(&mut self) -> Option<Outcome> {
        if self.state != GameState::Playing {
            return None;
        }
        let coef = self.move_coef();
        let threshold = self.config.move_threshold;
        let unit = self.unit();
        let size = self.ball.size;

        let max_top = (self.field.height - size).max(0.0);
        let mut new_top = self.ball.top + self.ball.dir_y * coef;
        if new_top <= 0.0 {
            new_top = 0.0;
            self.ball.dir_y = 1.0;
        }
        if new_top >= max_top {
            new_top = max_top;
            self.ball.dir_y = -1.0;
        }
        if (new_top - self.ball.top).abs() > threshold {
            self.ball.top = new_top;
        }

        let mut new_left = self.ball.left + self.ball.dir_x * coef;
        let mut rebound = None;

        let left_line = unit * 2.0;
        if new_left < left_line {
            if !self.ball_inside_paddle(new_top, Side::Left) {
                return Some(self.register_goal(Side::Left));
            }
            new_left = left_line;
            self.ball.dir_x = 1.0;
            self.speed_up();
            rebound = Some(Side::Left);
        }

        let right_line = self.field.width - size - unit * 2.0;
        if new_left > right_line {
            if !self.ball_inside_paddle(new_top, Side::Right) {
                return Some(self.register_goal(Side::Right));
            }
            new_left = right_line;
            self.ball.dir_x = -1.0;
            self.speed_up();
            rebound = Some(Side::Right);
        }

        if (new_left - self.ball.left).abs() > threshold {
            self.ball.left = new_left;
        }
        rebound.map(Outcome::Rebound)
    }

    /// Whether a ball whose top edge is at `top` is covered by the paddle.
    /// Only the vertical band is checked; both bounds are exclusive.
    pub fn ball_inside_paddle(&self, top: f32, side: Side) -> bool {
        let paddle = self.paddle(side);
        top > paddle.top - self.ball.size && top < paddle.top + paddle.height
    }

    fn speed_up(&mut self) {
        self.ball.speed *= self.config.speed_multiplier;
        debug!("rebound, speed now {:.4}", self.ball.speed);
    }
}
