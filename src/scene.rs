//! Scene flow: menu, the four levels in order, credits.

use crate::entities::Session;
use crate::levels::LevelId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scene {
    Menu,
    Level(LevelId),
    Credits,
}

impl Scene {
    /// Where the game goes once `level` is complete.
    pub fn after_level(level: LevelId) -> Scene {
        match level.next() {
            Some(next) => Scene::Level(next),
            None => Scene::Credits,
        }
    }

    /// Leaving the menu starts the first level with a fresh session.
    pub fn start_game() -> (Scene, Session) {
        (Scene::Level(LevelId::FIRST), Session::default())
    }

    /// Restarting from the credits resets score and hits.
    pub fn restart_from_credits() -> (Scene, Session) {
        Self::start_game()
    }
}
