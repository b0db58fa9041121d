use matching::{Catalog, GameError, GameSnapshot, MatchingGame};
use rand::Rng;
use uuid::Uuid;

use crate::commands::{Command, HELP};

/// What the view should show after a command.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionReply {
    /// Game state after the command (possibly unchanged).
    Snapshot(GameSnapshot),
    /// Informational text; game state untouched.
    Info(String),
    /// The engine refused the command; game state untouched.
    Rejected(String),
    Quit,
}

/// One player's game session. Owns the engine exclusively.
pub struct Session<R> {
    session_id: String,
    game: MatchingGame<R>,
    level: String,
}

impl<R: Rng> Session<R> {
    /// Create a session and deal the first round.
    ///
    /// `level` defaults to the catalog's first level.
    pub fn start(catalog: Catalog, level: Option<&str>, rng: R) -> Result<Self, GameError> {
        let level = level
            .unwrap_or(&catalog.default_level().name)
            .to_string();
        let mut game = MatchingGame::with_rng(catalog, rng);
        game.reset_round(&level)?;

        let session_id = Uuid::new_v4().to_string();
        tracing::info!(%session_id, %level, "Session started");

        Ok(Self {
            session_id,
            game,
            level,
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn level(&self) -> &str {
        &self.level
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }

    pub fn apply(&mut self, command: Command) -> SessionReply {
        match command {
            Command::NewRound { level } => {
                let level = level.unwrap_or_else(|| self.level.clone());
                match self.game.reset_round(&level) {
                    Ok(()) => {
                        if level != self.level {
                            tracing::info!(
                                session_id = %self.session_id,
                                from = %self.level,
                                to = %level,
                                "Level changed"
                            );
                        }
                        self.level = level;
                        SessionReply::Snapshot(self.game.snapshot())
                    }
                    Err(e) => self.rejected(e),
                }
            }
            Command::Mix => match self.game.reshuffle_unmatched() {
                Ok(()) => SessionReply::Snapshot(self.game.snapshot()),
                Err(e) => self.rejected(e),
            },
            Command::Tap(position) => match self.game.tap(position) {
                Ok(_) => SessionReply::Snapshot(self.game.snapshot()),
                Err(e) => self.rejected(e),
            },
            Command::Levels => SessionReply::Info(self.level_list()),
            Command::Help => SessionReply::Info(HELP.to_string()),
            Command::Quit => {
                tracing::info!(session_id = %self.session_id, "Session ended");
                SessionReply::Quit
            }
        }
    }

    fn rejected(&self, err: GameError) -> SessionReply {
        tracing::warn!(session_id = %self.session_id, "Command rejected: {}", err);
        SessionReply::Rejected(err.to_string())
    }

    fn level_list(&self) -> String {
        self.game
            .catalog()
            .levels()
            .iter()
            .map(|l| {
                let marker = if l.name == self.level { "*" } else { " " };
                format!("{} {:<10} {}", marker, l.name, l.label)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
