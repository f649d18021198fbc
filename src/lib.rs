//! Rules engine for a Reversi-style game with chain captures on a square
//! board of configurable even size.
//!
//! A move flips the opponent runs it closes, then every flipped cell is
//! scanned again and any run it now closes is flipped too, wave after wave.
//! [`game::Game`] drives turns, turn skipping, win detection and
//! undo/redo; [`wasm::WasmGame`] exposes it to a browser UI.

use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod geometry;
pub mod persist;
pub mod player;
pub mod types;
pub mod wasm;

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
