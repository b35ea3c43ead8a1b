use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, info};
use ratatui::layout::Rect;

use crate::game::input::{Key, KeyTracker};
use crate::game::{Field, GameSession, Outcome, Side};
use crate::ui;

/// Fixed bindings: W/S for the left paddle, arrows for the right.
fn logical_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::LeftUp),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::LeftDown),
        KeyCode::Up => Some(Key::RightUp),
        KeyCode::Down => Some(Key::RightDown),
        _ => None,
    }
}

pub fn winner_message(winner: Side) -> String {
    format!("Game over, the {} player wins", winner.label())
}

pub struct App {
    pub should_quit: bool,
    pub session: GameSession,
    keys: KeyTracker,
    /// End-of-match message. While set, ticks and paddle keys are ignored.
    pub announcement: Option<String>,
}

impl App {
    pub fn new(session: GameSession, keys: KeyTracker) -> Self {
        Self {
            should_quit: false,
            session,
            keys,
            announcement: None,
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        if self.announcement.is_some() {
            return;
        }
        if self.keys.expire(now) {
            self.resample();
        }
        if let Some(outcome) = self.session.tick() {
            self.on_outcome(outcome);
        }
    }

    pub fn on_key(&mut self, key: KeyEvent, now: Instant) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.announcement.is_some() {
            if key.kind == KeyEventKind::Press
                && matches!(key.code, KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Esc)
            {
                self.dismiss_announcement();
            }
            return;
        }

        if let Some(logical) = logical_key(key.code) {
            match key.kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    self.keys.press(logical, now);
                }
                KeyEventKind::Release => {
                    self.keys.release(logical);
                }
            }
            self.resample();
            return;
        }

        if key.kind != KeyEventKind::Press {
            return;
        }
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) {
            self.should_quit = true;
        }
    }

    /// Terminal resized to `width` x `height` cells.
    pub fn on_resize(&mut self, width: u16, height: u16) {
        let court = ui::court_area(Rect::new(0, 0, width, height));
        self.session
            .resize(Field::new(court.width as f32, court.height as f32));
        let field = self.session.field();
        debug!("court resized to {}x{}", field.width, field.height);
    }

    fn resample(&mut self) {
        self.session.sample_input(self.keys.keys());
    }

    fn dismiss_announcement(&mut self) {
        self.announcement = None;
        // Releases during the announcement were swallowed.
        self.keys.clear();
        self.resample();
    }

    fn on_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Rebound(side) => debug!("{} paddle returned the ball", side.label()),
            Outcome::Point { conceded, score } => {
                debug!(
                    "{} conceded, {} - {}, waiting for serve",
                    conceded.label(),
                    score.left,
                    score.right
                );
            }
            Outcome::MatchWon { winner, final_score } => {
                info!(
                    "announcing winner {} ({} - {})",
                    winner.label(),
                    final_score.left,
                    final_score.right
                );
                self.announcement = Some(winner_message(winner));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::Config;
    use crate::game::input::Hold;
    use crate::game::{Direction, GameState, Score};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
    }

    fn new_app(hold: Option<Hold>) -> App {
        let mut app = App::new(
            GameSession::new(Config::default(), Some(11)),
            KeyTracker::new(hold),
        );
        // court 198 x 56
        app.on_resize(200, 60);
        app
    }

    #[test]
    fn resize_sets_field_to_court() {
        let app = new_app(None);
        let field = app.session.field();
        assert_eq!(field.width, 198.0);
        assert_eq!(field.height, 56.0);
    }

    #[test]
    fn key_press_starts_play_and_release_stops_paddle() {
        let now = Instant::now();
        let mut app = new_app(None);
        app.on_key(press(KeyCode::Char('w')), now);
        assert_eq!(app.session.state(), GameState::Playing);
        assert_eq!(app.session.paddle(Side::Left).direction, Direction::Up);

        app.on_key(press(KeyCode::Down), now);
        assert_eq!(app.session.paddle(Side::Right).direction, Direction::Down);

        app.on_key(release(KeyCode::Char('w')), now);
        assert_eq!(app.session.paddle(Side::Left).direction, Direction::Idle);
        assert_eq!(app.session.state(), GameState::Playing);
    }

    #[test]
    fn opposite_keys_cancel() {
        let now = Instant::now();
        let mut app = new_app(None);
        app.on_key(press(KeyCode::Up), now);
        app.on_key(press(KeyCode::Down), now);
        assert_eq!(app.session.paddle(Side::Right).direction, Direction::Idle);
    }

    #[test]
    fn held_key_expires_without_release_events() {
        let now = Instant::now();
        let ms = Duration::from_millis;
        let mut app = new_app(Some(Hold {
            first: ms(100),
            repeat: ms(40),
        }));
        app.on_key(press(KeyCode::Char('s')), now);
        assert_eq!(app.session.paddle(Side::Left).direction, Direction::Down);
        app.on_tick(now + ms(50));
        assert_eq!(app.session.paddle(Side::Left).direction, Direction::Down);
        app.on_tick(now + ms(150));
        assert_eq!(app.session.paddle(Side::Left).direction, Direction::Idle);
    }

    #[test]
    fn held_key_survives_the_auto_repeat_delay() {
        let now = Instant::now();
        let ms = Duration::from_millis;
        let mut app = new_app(Some(Hold::default()));
        app.on_key(press(KeyCode::Char('s')), now);
        for t in [50, 100, 150, 200, 250] {
            app.on_tick(now + ms(t));
            assert_eq!(
                app.session.paddle(Side::Left).direction,
                Direction::Down,
                "at {t} ms"
            );
        }
        // repeats then keep it down
        for t in (300..=1500).step_by(50) {
            app.on_key(press(KeyCode::Char('s')), now + ms(t));
            app.on_tick(now + ms(t + 25));
        }
        assert_eq!(app.session.paddle(Side::Left).direction, Direction::Down);
    }

    #[test]
    fn release_event_disables_hold_timeout() {
        let now = Instant::now();
        let mut app = new_app(Some(Hold::default()));
        app.on_key(press(KeyCode::Up), now);
        app.on_key(release(KeyCode::Up), now);
        app.on_key(press(KeyCode::Up), now);
        app.on_tick(now + Duration::from_secs(5));
        assert_eq!(app.session.paddle(Side::Right).direction, Direction::Up);
    }

    #[test]
    fn match_point_opens_announcement_and_pauses() {
        let now = Instant::now();
        let mut app = new_app(None);
        app.session.set_score(Score { left: 9, right: 3 });
        app.session.set_state(GameState::Playing);
        app.session.paddle_at(Side::Right, 0.0);
        {
            let ball = app.session.ball_mut();
            ball.left = 190.0;
            ball.top = 40.0;
            ball.dir_x = 1.0;
        }
        app.on_tick(now);
        assert_eq!(
            app.announcement.as_deref(),
            Some("Game over, the left player wins")
        );
        assert_eq!(app.session.score(), Score::default());
        assert_eq!(app.session.state(), GameState::Stopped);

        // paddle keys and ticks are ignored while the message is up
        app.on_key(press(KeyCode::Char('w')), now);
        assert_eq!(app.session.state(), GameState::Stopped);
        let left = *app.session.paddle(Side::Left);
        app.on_tick(now);
        assert_eq!(*app.session.paddle(Side::Left), left);

        app.on_key(press(KeyCode::Enter), now);
        assert!(app.announcement.is_none());
        assert_eq!(app.session.state(), GameState::Stopped);
        app.on_key(press(KeyCode::Char('w')), now);
        assert_eq!(app.session.state(), GameState::Playing);
    }

    #[test]
    fn quit_keys() {
        let now = Instant::now();
        let mut app = new_app(None);
        app.on_key(release(KeyCode::Char('q')), now);
        assert!(!app.should_quit);
        app.on_key(press(KeyCode::Char('q')), now);
        assert!(app.should_quit);

        let mut app = new_app(None);
        app.on_key(
            KeyEvent::new_with_kind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Press),
            now,
        );
        assert!(app.should_quit);
    }
}
