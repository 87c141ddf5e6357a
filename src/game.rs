//! Game controller tying a session to its front end
//!
//! [`Game`] holds the options, the current [`GameSession`], the random
//! source and the last feedback shown. It replaces the session wholesale
//! on every new game, translates outcomes into feedback and pushes
//! everything a view needs through a [`Tunnel`].

use derive_where::derive_where;
use garde::Validate;
use thiserror::Error;

use super::{SyncMessage, UpdateMessage};
use crate::{
    config::{self, Options},
    easter_egg::{ACTIVATION_MESSAGE, Key, KonamiTracker},
    feedback::{Feedback, Progress},
    rng::RandomSource,
    session::{self, GameSession, GuessOutcome},
    tunnel::Tunnel,
};

/// Errors that can occur while driving a game
#[derive(Error, Debug)]
pub enum Error {
    /// The options were rejected
    #[error(transparent)]
    Config(#[from] config::Error),
    /// The session rejected the operation
    #[error(transparent)]
    Session(#[from] session::Error),
}

/// A number guessing game as seen by a front end
#[derive_where(Debug)]
pub struct Game<R> {
    /// Options applied to every new session
    options: Options,
    /// The session being played
    session: GameSession,
    /// Feedback currently on display
    feedback: Feedback,
    /// Easter egg progress for this game
    konami: KonamiTracker,
    #[derive_where(skip)]
    rng: R,
}

impl<R: RandomSource> Game<R> {
    /// Creates a game and starts its first session
    ///
    /// Nothing is sent to a front end yet; call [`Game::send_sync`] once
    /// one is attached.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the options are invalid.
    pub fn new(options: Options, mut rng: R) -> Result<Self, Error> {
        options.validate().map_err(config::Error::from)?;
        let session = GameSession::start_new_game(options.range_max(), &mut rng)?;

        Ok(Self {
            options,
            session,
            feedback: Feedback::new_game(),
            konami: KonamiTracker::default(),
            rng,
        })
    }

    /// Replaces the session with a fresh one over the configured range
    ///
    /// # Errors
    ///
    /// Returns [`Error::Session`] if the configured range cannot hold a game.
    pub fn start_new_game<T: Tunnel>(&mut self, tunnel: &T) -> Result<(), Error> {
        self.session = GameSession::start_new_game(self.options.range_max(), &mut self.rng)?;
        self.feedback = Feedback::new_game();

        tunnel.send_message(&UpdateMessage::NewGame {
            range_max: self.session.range_max(),
            attempts_max: self.session.attempts_max(),
        });
        tunnel.send_message(&self.feedback.clone().into());
        self.send_progress(tunnel);
        tunnel.send_message(&UpdateMessage::InputLocked(false));

        Ok(())
    }

    /// Changes the upper bound of the range and starts a new game with it
    ///
    /// On error the current session and options are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `range_max` is below 2.
    pub fn set_range_max<T: Tunnel>(&mut self, range_max: u32, tunnel: &T) -> Result<(), Error> {
        self.options = Options::new(range_max)?;
        self.start_new_game(tunnel)
    }

    /// Checks partially typed input and tells the front end whether it
    /// may be submitted
    ///
    /// Nothing about the session changes.
    pub fn check_input<T: Tunnel>(&self, input: &str, tunnel: &T) -> bool {
        let valid = self.session.accepts_input(input);
        tunnel.send_message(&UpdateMessage::InputValid(valid));
        valid
    }

    /// Submits raw player input as a guess
    ///
    /// # Errors
    ///
    /// Returns [`Error::Session`] if the game has already ended.
    pub fn submit_input<T: Tunnel>(
        &mut self,
        input: &str,
        tunnel: &T,
    ) -> Result<GuessOutcome, Error> {
        let outcome = self.session.submit_input(input)?;
        self.report(outcome, tunnel);
        Ok(outcome)
    }

    /// Submits a numeric guess
    ///
    /// # Errors
    ///
    /// Returns [`Error::Session`] if the game has already ended.
    pub fn submit_guess<T: Tunnel>(
        &mut self,
        guess: i64,
        tunnel: &T,
    ) -> Result<GuessOutcome, Error> {
        let outcome = self.session.submit_guess(guess)?;
        self.report(outcome, tunnel);
        Ok(outcome)
    }

    fn report<T: Tunnel>(&mut self, outcome: GuessOutcome, tunnel: &T) {
        self.feedback = Feedback::for_outcome(outcome, self.session.range_max(), &mut self.rng);
        tunnel.send_message(&self.feedback.clone().into());

        if outcome.consumed_attempt() {
            self.send_progress(tunnel);
        }
        if outcome.is_final() {
            tunnel.send_message(&UpdateMessage::InputLocked(true));
        }
    }

    fn send_progress<T: Tunnel>(&self, tunnel: &T) {
        let progress = self.progress();
        tunnel.send_message(&UpdateMessage::Progress {
            progress,
            band: progress.band(),
        });
    }

    /// Feeds a key press to the easter egg tracker
    ///
    /// Returns `true` and notifies the front end when the Konami code is
    /// completed.
    pub fn key_pressed<T: Tunnel>(&mut self, key: Key, tunnel: &T) -> bool {
        let activated = self.konami.press(key);
        if activated {
            tunnel.send_message(&UpdateMessage::EasterEgg(ACTIVATION_MESSAGE.to_owned()));
        }
        activated
    }

    /// Full state of the game for redrawing a view
    pub fn sync_message(&self) -> SyncMessage {
        let progress = self.progress();
        SyncMessage {
            session: self.session.snapshot(),
            feedback: self.feedback.clone(),
            progress,
            band: progress.band(),
            input_locked: self.session.is_finished(),
        }
    }

    /// Sends the full state of the game through `tunnel`
    pub fn send_sync<T: Tunnel>(&self, tunnel: &T) {
        tunnel.send_state(&self.sync_message());
    }

    /// The session being played
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Options applied to new sessions
    pub fn options(&self) -> Options {
        self.options
    }

    /// Feedback currently on display
    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    /// Attempts used against the budget
    pub fn progress(&self) -> Progress {
        Progress::new(self.session.attempts_used(), self.session.attempts_max())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{
        feedback::{ProgressBand, Tone},
        rng::FixedSource,
        session::{Direction, Status},
    };

    #[derive(Debug, Clone, Default)]
    struct MockTunnel {
        messages: Rc<RefCell<Vec<UpdateMessage>>>,
        states: Rc<RefCell<Vec<SyncMessage>>>,
    }

    impl MockTunnel {
        fn take_messages(&self) -> Vec<UpdateMessage> {
            self.messages.borrow_mut().drain(..).collect()
        }
    }

    impl Tunnel for MockTunnel {
        fn send_message(&self, message: &UpdateMessage) {
            self.messages.borrow_mut().push(message.clone());
        }

        fn send_state(&self, state: &SyncMessage) {
            self.states.borrow_mut().push(state.clone());
        }

        fn close(self) {}
    }

    fn fixed_game(range_max: u32, secret: u32) -> Game<FixedSource> {
        Game::new(Options::new(range_max).unwrap(), FixedSource::new(secret)).unwrap()
    }

    #[test]
    fn test_new_game_initial_state() {
        let game = fixed_game(100, 42);

        assert_eq!(game.session().secret(), 42);
        assert_eq!(game.session().status(), Status::InProgress);
        assert_eq!(game.feedback(), &Feedback::new_game());
        assert_eq!(game.progress(), Progress::new(0, 10));
        assert_eq!(game.options().range_max(), 100);
    }

    #[test]
    fn test_new_rejects_invalid_options() {
        let options: Options = serde_json::from_str(r#"{"range_max": 1}"#).unwrap();
        let result = Game::new(options, FixedSource::new(1));

        assert!(matches!(result, Err(Error::Config(config::Error::Invalid(_)))));
    }

    #[test]
    fn test_wrong_guess_messages() {
        let mut game = fixed_game(100, 42);
        let tunnel = MockTunnel::default();

        let outcome = game.submit_input("50", &tunnel).unwrap();
        assert_eq!(
            outcome,
            GuessOutcome::Incorrect {
                direction: Direction::TooHigh,
                remaining: 9
            }
        );

        let messages = tunnel.take_messages();
        assert_eq!(messages.len(), 2);
        assert!(matches!(&messages[0], UpdateMessage::Feedback(f) if f.tone == Tone::Warning));
        assert_eq!(
            messages[1],
            UpdateMessage::Progress {
                progress: Progress::new(1, 10),
                band: ProgressBand::Calm
            }
        );
    }

    #[test]
    fn test_out_of_range_sends_no_progress() {
        let mut game = fixed_game(100, 42);
        let tunnel = MockTunnel::default();

        for input in ["abc", "0", "101"] {
            assert_eq!(
                game.submit_input(input, &tunnel).unwrap(),
                GuessOutcome::OutOfRange
            );
        }

        let messages = tunnel.take_messages();
        assert_eq!(messages.len(), 3);
        assert!(
            messages
                .iter()
                .all(|m| matches!(m, UpdateMessage::Feedback(f) if f.tone == Tone::Error))
        );
        assert_eq!(game.session().attempts_used(), 0);
    }

    #[test]
    fn test_check_input() {
        let game = fixed_game(100, 42);
        let tunnel = MockTunnel::default();

        let results: Vec<bool> = ["", "0", "101", "42abc", "100"]
            .iter()
            .map(|input| game.check_input(input, &tunnel))
            .collect();

        assert_eq!(results, vec![false, false, false, true, true]);
        assert_eq!(
            tunnel.take_messages(),
            results
                .into_iter()
                .map(UpdateMessage::InputValid)
                .collect::<Vec<_>>()
        );
        assert_eq!(game.session().attempts_used(), 0);
    }

    #[test]
    fn test_check_input_follows_range_change() {
        let mut game = fixed_game(100, 42);
        let tunnel = MockTunnel::default();
        assert!(game.check_input("50", &tunnel));

        game.set_range_max(20, &tunnel).unwrap();

        assert!(!game.check_input("50", &tunnel));
        assert!(game.check_input("20", &tunnel));
    }

    #[test]
    fn test_set_range_max_above_one_million() {
        let mut game = fixed_game(100, 42);
        let tunnel = MockTunnel::default();

        game.set_range_max(2_000_000, &tunnel).unwrap();

        assert_eq!(game.session().range_max(), 2_000_000);
        assert!(game.check_input("1500000", &tunnel));
    }

    #[test]
    fn test_win_locks_input() {
        let mut game = fixed_game(100, 42);
        let tunnel = MockTunnel::default();

        game.submit_guess(42, &tunnel).unwrap();

        let messages = tunnel.take_messages();
        assert_eq!(messages.last(), Some(&UpdateMessage::InputLocked(true)));
        assert_eq!(game.feedback().tone, Tone::Success);
        assert!(game.sync_message().input_locked);
    }

    #[test]
    fn test_guess_after_game_over_is_rejected() {
        let mut game = fixed_game(10, 5);
        let tunnel = MockTunnel::default();

        for guess in [1, 2, 3, 4, 6, 7, 8, 9, 10] {
            game.submit_guess(guess, &tunnel).unwrap();
        }
        assert_eq!(
            game.submit_guess(1, &tunnel).unwrap(),
            GuessOutcome::GameOver { secret: 5 }
        );
        assert_eq!(game.progress().band(), ProgressBand::Danger);
        tunnel.take_messages();

        let result = game.submit_guess(5, &tunnel);
        assert!(matches!(
            result,
            Err(Error::Session(session::Error::InvalidState))
        ));
        assert!(tunnel.take_messages().is_empty());
        assert_eq!(game.session().status(), Status::Lost);
    }

    #[test]
    fn test_start_new_game_resets() {
        let mut game = fixed_game(10, 5);
        let tunnel = MockTunnel::default();
        game.submit_guess(5, &tunnel).unwrap();
        tunnel.take_messages();

        game.start_new_game(&tunnel).unwrap();

        assert_eq!(game.session().status(), Status::InProgress);
        assert_eq!(game.session().attempts_used(), 0);
        assert_eq!(game.feedback(), &Feedback::new_game());
        assert_eq!(
            tunnel.take_messages(),
            vec![
                UpdateMessage::NewGame {
                    range_max: 10,
                    attempts_max: 10
                },
                UpdateMessage::Feedback(Feedback::new_game()),
                UpdateMessage::Progress {
                    progress: Progress::new(0, 10),
                    band: ProgressBand::Calm
                },
                UpdateMessage::InputLocked(false),
            ]
        );
    }

    #[test]
    fn test_set_range_max_starts_new_game() {
        let mut game = fixed_game(100, 42);
        let tunnel = MockTunnel::default();
        game.submit_guess(50, &tunnel).unwrap();

        game.set_range_max(20, &tunnel).unwrap();

        assert_eq!(game.options().range_max(), 20);
        assert_eq!(game.session().range_max(), 20);
        assert_eq!(game.session().secret(), 20);
        assert_eq!(game.session().attempts_used(), 0);
    }

    #[test]
    fn test_set_range_max_rejects_invalid() {
        let mut game = fixed_game(100, 42);
        let tunnel = MockTunnel::default();
        game.submit_guess(50, &tunnel).unwrap();
        tunnel.take_messages();

        let result = game.set_range_max(1, &tunnel);

        assert!(matches!(result, Err(Error::Config(_))));
        assert_eq!(game.options().range_max(), 100);
        assert_eq!(game.session().attempts_used(), 1);
        assert!(tunnel.take_messages().is_empty());
    }

    #[test]
    fn test_konami_code() {
        let mut game = fixed_game(100, 42);
        let tunnel = MockTunnel::default();
        let sequence = [
            Key::Up,
            Key::Up,
            Key::Down,
            Key::Down,
            Key::Left,
            Key::Right,
            Key::Left,
            Key::Right,
            Key::B,
        ];

        for key in sequence {
            assert!(!game.key_pressed(key, &tunnel));
        }
        assert!(game.key_pressed(Key::A, &tunnel));
        assert_eq!(
            tunnel.take_messages(),
            vec![UpdateMessage::EasterEgg(ACTIVATION_MESSAGE.to_owned())]
        );
    }

    #[test]
    fn test_send_sync() {
        let mut game = fixed_game(100, 42);
        let tunnel = MockTunnel::default();
        game.submit_guess(10, &tunnel).unwrap();

        game.send_sync(&tunnel);

        let states = tunnel.states.borrow();
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].session.attempts_used, 1);
        assert_eq!(states[0].session.secret, None);
        assert!(!states[0].input_locked);
        assert_eq!(
            states[0].feedback.message,
            "Too low! Try a higher number. 9 attempts left."
        );
    }

    #[test]
    fn test_seeded_game_is_playable() {
        let mut game = Game::new(Options::default(), fastrand::Rng::with_seed(11)).unwrap();
        let tunnel = MockTunnel::default();
        let secret = game.session().secret();

        assert!((1..=100).contains(&secret));
        assert!(matches!(
            game.submit_guess(i64::from(secret), &tunnel),
            Ok(GuessOutcome::Correct { attempts: 1, .. })
        ));
    }
}
