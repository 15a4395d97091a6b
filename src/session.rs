//! Game session driver
//!
//! Sits between the platform (frame callbacks, taps, navigation) and the
//! engine. It advances the engine on a fixed 16 ms timestep, forwards taps
//! as commits, keeps the persisted high score current and plays feedback
//! cues according to the user's settings.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, TICK_DT};
use crate::feedback::{Cue, Feedback, FeedbackSink};
use crate::highscores::HighScore;
use crate::persistence::{KeyValueStore, Storage};
use crate::settings::{Settings, Toggle};
use crate::sim::{GameConfig, GameEngine, GameEvent, GameState};

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Main,
    Game,
    Settings,
}

/// One running app instance
pub struct Session<S: KeyValueStore, F: FeedbackSink> {
    engine: GameEngine,
    storage: Storage<S>,
    settings: Settings,
    high_score: HighScore,
    feedback: Feedback<F>,
    screen: Screen,
    accumulator: f32,
    /// Engine ticks run since the session opened
    ticks: u64,
}

impl<S: KeyValueStore, F: FeedbackSink> Session<S, F> {
    /// Open a session: load persisted state and greet the player
    pub fn open(config: GameConfig, seed: u64, storage: Storage<S>, sink: F) -> Self {
        let settings = storage.settings().unwrap_or_default();
        let high_score = HighScore::load(&storage);

        let mut engine = GameEngine::new(config, seed);
        engine.merge_high_score(high_score.best());

        let mut feedback = Feedback::new(sink);
        feedback.set_enabled(settings.feedback_enabled());
        feedback.play(Cue::Welcome);

        log::info!("Session opened with seed {}", seed);
        Self {
            engine,
            storage,
            settings,
            high_score,
            feedback,
            screen: Screen::Main,
            accumulator: 0.0,
            ticks: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        self.engine.state()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Best score known to the session (persisted value merged with play)
    pub fn high_score(&self) -> u32 {
        self.high_score.best()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn storage(&self) -> &Storage<S> {
        &self.storage
    }

    pub fn feedback(&self) -> &Feedback<F> {
        &self.feedback
    }

    /// Switch screens. Entering the game screen starts a game if none is
    /// running; leaving it abandons the current game.
    pub fn navigate(&mut self, screen: Screen) {
        if screen == Screen::Game {
            if !self.engine.state().is_playing() {
                self.start_game();
            }
            self.screen = Screen::Game;
            return;
        }
        if self.screen == Screen::Game {
            self.engine.reset();
            self.accumulator = 0.0;
        }
        log::debug!("Navigate {:?} -> {:?}", self.screen, screen);
        self.screen = screen;
    }

    /// Start a fresh game on the game screen
    pub fn start_game(&mut self) {
        self.engine.start();
        self.accumulator = 0.0;
        self.screen = Screen::Game;
    }

    /// Restart after game over (or mid-game)
    pub fn restart(&mut self) {
        log::info!("Restarting at score {}", self.engine.state().score);
        self.start_game();
    }

    /// Feed elapsed frame time; runs whole ticks and returns how many ran
    pub fn update(&mut self, dt: f32) -> u32 {
        if !self.engine.state().is_playing() {
            self.accumulator = 0.0;
            return 0;
        }
        if !dt.is_finite() {
            log::warn!("Ignoring non-finite frame time {}", dt);
            return 0;
        }
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= TICK_DT && substeps < MAX_SUBSTEPS {
            self.engine.advance();
            self.accumulator -= TICK_DT;
            substeps += 1;
        }
        self.ticks += u64::from(substeps);
        substeps
    }

    /// Player tapped the play area
    pub fn tap(&mut self) -> Option<GameEvent> {
        if self.screen != Screen::Game || !self.engine.state().is_playing() {
            return None;
        }
        self.engine.commit();
        let event = self.engine.last_event()?;

        match event {
            GameEvent::Placed { perfect, score, .. } => {
                self.high_score.observe(score);
                self.high_score.save(&mut self.storage);
                self.feedback
                    .play(if perfect { Cue::Success } else { Cue::Click });
            }
            GameEvent::Missed { .. } => {
                self.accumulator = 0.0;
                self.feedback.play(Cue::Fail);
            }
            GameEvent::Started | GameEvent::Reset => {}
        }
        Some(event)
    }

    /// Replace settings and persist them
    pub fn update_settings(&mut self, settings: Settings) {
        self.feedback.set_enabled(settings.feedback_enabled());
        self.storage.save_settings(&settings);
        self.settings = settings;
    }

    /// Flip one setting and persist
    pub fn toggle(&mut self, toggle: Toggle) -> bool {
        let mut settings = self.settings.clone();
        let value = settings.toggle(toggle);
        self.update_settings(settings);
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::RecordingSink;
    use crate::persistence::MemoryStore;

    fn session_with(storage: Storage<MemoryStore>) -> Session<MemoryStore, RecordingSink> {
        Session::open(
            GameConfig::with_screen(400.0, 800.0),
            17,
            storage,
            RecordingSink::default(),
        )
    }

    fn session() -> Session<MemoryStore, RecordingSink> {
        session_with(Storage::new(MemoryStore::new()))
    }

    /// Tick until the moving block lines up with the tower top, then tap
    fn tap_aligned(session: &mut Session<MemoryStore, RecordingSink>) -> Option<GameEvent> {
        for _ in 0..1_000 {
            let state = session.state();
            let top = state.top()?.x;
            let moving = state.current_block.as_ref()?;
            if (moving.x - top).abs() <= moving.speed / 2.0 {
                return session.tap();
            }
            session.update(TICK_DT);
        }
        None
    }

    #[test]
    fn test_open_loads_persisted_values() {
        let mut storage = Storage::new(MemoryStore::new());
        storage.save_high_score(42);
        let settings = Settings {
            vibration_enabled: false,
            ..Default::default()
        };
        storage.save_settings(&settings);

        let session = session_with(storage);
        assert_eq!(session.high_score(), 42);
        assert_eq!(session.state().high_score, 42);
        assert_eq!(session.settings(), &settings);
        assert!(!session.feedback().is_enabled());
        assert!(session.feedback().sink().cues.is_empty());
        assert_eq!(session.screen(), Screen::Main);
    }

    #[test]
    fn test_welcome_cue() {
        let session = session();
        assert_eq!(session.feedback().sink().cues, vec![Cue::Welcome]);
    }

    #[test]
    fn test_navigate_to_game_starts() {
        let mut session = session();
        session.navigate(Screen::Game);
        assert_eq!(session.screen(), Screen::Game);
        assert!(session.state().is_playing());
        assert_eq!(session.state().tower.len(), 1);
    }

    #[test]
    fn test_navigate_away_resets() {
        let mut session = session();
        session.navigate(Screen::Game);
        session.navigate(Screen::Settings);
        assert_eq!(session.screen(), Screen::Settings);
        assert!(!session.state().is_playing());
        assert!(session.state().tower.is_empty());
    }

    #[test]
    fn test_update_fixed_timestep() {
        let mut session = session();
        assert_eq!(session.update(0.05), 0);

        session.navigate(Screen::Game);
        let x0 = session.state().current_block.as_ref().unwrap().x;
        assert_eq!(session.update(0.01), 0);
        assert_eq!(session.update(0.01), 1);
        assert_ne!(session.state().current_block.as_ref().unwrap().x, x0);

        // Long frames are capped
        assert!(session.update(5.0) <= MAX_SUBSTEPS);
    }

    #[test]
    fn test_update_skips_non_finite_frames() {
        let mut session = session();
        session.navigate(Screen::Game);

        assert_eq!(session.update(f32::NAN), 0);
        assert_eq!(session.update(f32::INFINITY), 0);
        assert_eq!(session.update(f32::NEG_INFINITY), 0);
        assert_eq!(session.ticks(), 0);

        // The accumulator is still usable afterwards
        assert!(session.update(0.05) > 0);
        assert!(session.ticks() > 0);
    }

    #[test]
    fn test_tap_outside_game_ignored() {
        let mut session = session();
        assert_eq!(session.tap(), None);
    }

    #[test]
    fn test_perfect_tap_saves_high_score() {
        let mut session = session();
        session.navigate(Screen::Game);
        let event = tap_aligned(&mut session).unwrap();
        assert!(matches!(
            event,
            GameEvent::Placed {
                perfect: true,
                score: 3,
                ..
            }
        ));
        assert_eq!(session.high_score(), 3);
        assert_eq!(session.storage().high_score(), 3);
        assert_eq!(
            session.feedback().sink().cues,
            vec![Cue::Welcome, Cue::Success]
        );
    }

    #[test]
    fn test_miss_plays_fail_and_stops_ticking() {
        // On an 800 wide screen the base spans 300..500 and a fresh block
        // starts at 0 or 600, so tapping right away always misses.
        let mut session = Session::open(
            GameConfig::with_screen(800.0, 800.0),
            5,
            Storage::new(MemoryStore::new()),
            RecordingSink::default(),
        );
        session.navigate(Screen::Game);
        let event = session.tap().unwrap();
        assert!(matches!(event, GameEvent::Missed { .. }));

        assert!(session.state().is_game_over());
        assert_eq!(session.feedback().sink().cues.last(), Some(&Cue::Fail));
        assert_eq!(session.storage().high_score(), 0);
        assert_eq!(session.update(1.0), 0);
        assert_eq!(session.tap(), None);

        session.restart();
        assert!(session.state().is_playing());
        assert_eq!(session.state().score, 0);
    }

    #[test]
    fn test_toggle_persists_and_gates_feedback() {
        let mut session = session();
        assert!(!session.toggle(Toggle::Vibration));
        assert!(!session.feedback().is_enabled());
        assert_eq!(
            session.storage().settings().map(|s| s.vibration_enabled),
            Some(false)
        );

        session.navigate(Screen::Game);
        tap_aligned(&mut session).unwrap();
        assert_eq!(session.feedback().sink().cues, vec![Cue::Welcome]);
    }
}
