use log::info;

use super::{GameSession, GameState, Outcome, Score, Side};

impl Score {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn award(&mut self, side: Side) -> u32 {
        let points = match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };
        *points += 1;
        *points
    }
}

impl GameSession {
    /// The ball got past `conceded`'s paddle: the other side scores.
    ///
    /// Below the max score this is a plain point. Reaching it ends the
    /// match, and both scores go back to zero before returning. Either way
    /// speed resets, the ball is re-served next to `conceded` and the
    /// session waits for a key again.
    pub fn register_goal(&mut self, conceded: Side) -> Outcome {
        let scorer = conceded.opposite();
        let points = self.score.award(scorer);
        self.last_failed = Some(conceded);

        let outcome = if points < self.config.max_score {
            self.state = GameState::Goal;
            info!(
                "goal for {}: {} - {}",
                scorer.label(),
                self.score.left,
                self.score.right
            );
            Outcome::Point {
                conceded,
                score: self.score,
            }
        } else {
            self.state = GameState::Finished;
            let final_score = self.score;
            info!(
                "match won by {}: {} - {}",
                scorer.label(),
                final_score.left,
                final_score.right
            );
            self.score = Score::default();
            Outcome::MatchWon {
                winner: scorer,
                final_score,
            }
        };

        self.ball.speed = self.config.initial_speed;
        self.reset_layout();
        self.state = GameState::Stopped;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn goal_adds_one_to_the_scorer() {
        let mut s = session();
        s.register_goal(Side::Right);
        assert_eq!(s.score(), Score { left: 1, right: 0 });
        s.register_goal(Side::Left);
        s.register_goal(Side::Left);
        assert_eq!(s.score(), Score { left: 1, right: 2 });
        assert_eq!(s.score().get(Side::Right), 2);
        assert_eq!(s.state(), GameState::Stopped);
    }

    #[test]
    fn goal_resets_speed() {
        let mut s = session();
        s.set_state(GameState::Playing);
        s.ball_mut().speed = 0.08;
        s.register_goal(Side::Left);
        assert!(approx(s.ball().speed, 0.03));
    }

    #[test]
    fn serve_follows_the_conceding_side() {
        let mut s = session();
        s.register_goal(Side::Right);
        assert_eq!(s.last_failed_side(), Some(Side::Right));
        assert!(s.ball().left > s.field().width / 2.0);
        s.register_goal(Side::Left);
        assert_eq!(s.last_failed_side(), Some(Side::Left));
        assert!(s.ball().left < s.field().width / 2.0);
    }

    #[test]
    fn tenth_point_ends_the_match() {
        let mut s = session();
        s.set_score(Score { left: 4, right: 9 });
        let outcome = s.register_goal(Side::Left);
        assert_eq!(
            outcome,
            Outcome::MatchWon {
                winner: Side::Right,
                final_score: Score { left: 4, right: 10 }
            }
        );
        assert_eq!(s.score(), Score::default());
        assert_eq!(s.state(), GameState::Stopped);
        assert!(approx(s.ball().speed, 0.03));
    }

    #[test]
    fn full_match_from_zero() {
        let mut s = session();
        let mut won = None;
        for n in 1..=10 {
            match s.register_goal(Side::Right) {
                Outcome::Point { score, .. } => {
                    assert!(n < 10);
                    assert_eq!(score.left, n);
                    assert_eq!(score.right, 0);
                }
                Outcome::MatchWon { winner, final_score } => {
                    assert_eq!(n, 10);
                    assert_eq!(final_score, Score { left: 10, right: 0 });
                    won = Some(winner);
                }
                Outcome::Rebound(_) => unreachable!(),
            }
        }
        assert_eq!(won, Some(Side::Left));
        assert_eq!(s.score(), Score::default());
    }
}
