use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info};

use crate::game::{DifficultyChange, GameConfig, GameEvent, GameLoop};
use crate::input::{InputHandler, KeyAction};
use crate::render::Renderer;
use crate::schedule::TickTimer;
use crate::store::KeyValueStore;

/// Interactive keyboard session in the terminal
pub struct HumanMode {
    game: GameLoop,
    timer: TickTimer,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    message: Option<String>,
}

impl HumanMode {
    /// The timer is created disarmed; it starts with [`HumanMode::run`]
    pub fn new(config: GameConfig, store: Box<dyn KeyValueStore>) -> Result<Self> {
        Ok(Self::with_game(GameLoop::new(config, store)?))
    }

    pub fn with_game(game: GameLoop) -> Self {
        let timer = TickTimer::stopped(game.tick_interval());

        Self {
            game,
            timer,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            message: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        if self.game.is_running() {
            self.timer.restart(self.game.tick_interval());
        }

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        info!(
            difficulty = %self.game.difficulty(),
            boundary = %self.game.config().boundary,
            "session started"
        );

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                Some(_) = self.timer.tick(), if self.timer.is_active() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    let view = self.game.view();
                    let message = self.message.as_deref();
                    let renderer = &self.renderer;
                    terminal.draw(|frame| {
                        renderer.render(frame, &view, message);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        // Deregister input and stop ticking before the terminal is handed back
        drop(event_stream);
        self.timer.cancel();
        info!(
            score = self.game.score(),
            high_score = self.game.high_score(),
            "session ended"
        );

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            let action = self.input_handler.handle_key_event(key);
            self.apply(action);
        }
    }

    fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Turn(direction) => {
                if !self.game.change_direction(direction) {
                    debug!(?direction, "turn rejected");
                }
            }
            KeyAction::Restart => self.reset_game(),
            KeyAction::SelectDifficulty(difficulty) => {
                let change = self.game.set_difficulty(difficulty);
                self.on_difficulty_change(change);
            }
            KeyAction::CycleDifficulty => {
                let change = self.game.set_difficulty(self.game.difficulty().next());
                self.on_difficulty_change(change);
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        for event in self.game.tick() {
            self.message = Some(describe(event));

            if let GameEvent::GameOver { .. } = event {
                self.timer.cancel();
            }
        }
    }

    fn reset_game(&mut self) {
        self.game.restart();
        self.timer.restart(self.game.tick_interval());
        self.message = Some("New game".to_string());
    }

    fn on_difficulty_change(&mut self, change: DifficultyChange) {
        // Re-selecting the running pace must not push the next tick back
        let pace_changed = change.tick_interval != self.timer.period();
        if change.restarted || (self.timer.is_active() && pace_changed) {
            self.timer.restart(change.tick_interval);
        }
        self.message = Some(format!(
            "Difficulty: {} ({} ms per tick)",
            change.difficulty,
            change.tick_interval.as_millis()
        ));
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Status line text for a game event
fn describe(event: GameEvent) -> String {
    match event {
        GameEvent::FoodEaten { score } => format!("Yum! Score {}", score),
        GameEvent::NewHighScore { score } => format!("New high score: {}!", score),
        GameEvent::GameOver { score, collision } => {
            format!("Crashed ({:?}) with {} points", collision, score)
        }
    }
}
