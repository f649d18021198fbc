use wasm_bindgen::prelude::*;

use crate::ai::{RandomMoveSelector, play_random_moves};
use crate::config::Settings;
use crate::game::Game;
use crate::persist::SavedGame;

const PLAYER1_NAME: &str = "Black";
const PLAYER2_NAME: &str = "White";

/// Browser-facing handle around a [`Game`].
#[wasm_bindgen]
pub struct WasmGame {
    game: Game,
    settings: Settings,
}

#[wasm_bindgen]
impl WasmGame {
    /// Starts a new game. `settings_json` may be omitted to use defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(settings_json: Option<String>) -> Result<WasmGame, JsError> {
        let settings = load_settings(settings_json.as_deref())?;
        let game = Game::with_names(PLAYER1_NAME, PLAYER2_NAME, settings.geometry()?)?;
        Ok(Self { game, settings })
    }

    /// Restores a game saved by [`WasmGame::save`].
    pub fn restore(settings_json: Option<String>, saved_json: &str) -> Result<WasmGame, JsError> {
        let settings = load_settings(settings_json.as_deref())?;
        let saved = SavedGame::from_json(saved_json)?;
        let game = Game::restore(&saved, settings.geometry()?)?;
        Ok(Self { game, settings })
    }

    /// Proposes a move and returns its capture waves. Call `commitMove` after
    /// the waves have been consumed.
    #[wasm_bindgen(js_name = playMove)]
    pub fn play_move(&mut self, index: usize) -> Result<JsValue, JsError> {
        let waves = self.game.play_move(index)?;
        Ok(serde_wasm_bindgen::to_value(&waves)?)
    }

    #[wasm_bindgen(js_name = commitMove)]
    pub fn commit_move(&mut self) -> Result<(), JsError> {
        self.game.commit_move()?;
        Ok(())
    }

    pub fn undo(&mut self) -> bool {
        self.game.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.game.redo()
    }

    pub fn reset(&mut self) {
        self.game.reset();
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.game.view())?)
    }

    pub fn settings(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.settings)?)
    }

    /// Saved-game JSON, or `undefined` before the first move.
    pub fn save(&self) -> Result<Option<String>, JsError> {
        if !self.game.should_save() {
            return Ok(None);
        }
        Ok(Some(self.game.to_saved().to_json()?))
    }

    /// Plays up to `count` uniformly random moves. Returns how many were played.
    #[wasm_bindgen(js_name = randomMoves)]
    pub fn random_moves(&mut self, count: usize, seed: u64) -> usize {
        let mut selector = RandomMoveSelector::with_seed(seed);
        play_random_moves(&mut self.game, &mut selector, count)
    }
}

fn load_settings(json: Option<&str>) -> Result<Settings, JsError> {
    match json {
        Some(json) => Ok(Settings::from_json(json)?),
        None => Ok(Settings::default()),
    }
}
