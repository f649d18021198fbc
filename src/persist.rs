//! Saved-game model.
//!
//! Only the live position is stored; history depth is not persisted, so a
//! restored game starts with a single-snapshot history.

use serde::{Deserialize, Serialize};

use crate::error::{PlayerError, RestoreError};
use crate::geometry::Geometry;
use crate::player::Player;
use crate::types::{Cell, PlayerId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPlayer {
    pub id: u8,
    pub name: String,
    #[serde(default)]
    pub is_computer: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGame {
    pub player1: SavedPlayer,
    pub player2: SavedPlayer,
    pub board: Vec<u8>,
    pub current_player: u8,
}

impl SavedGame {
    pub fn from_json(json: &str) -> Result<Self, RestoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl SavedPlayer {
    pub fn from_player(player: &Player) -> Self {
        Self {
            id: player.id().into(),
            name: player.name().to_string(),
            is_computer: player.is_computer(),
        }
    }

    /// Rebuilds the player stored in `slot` (1 or 2).
    pub fn to_player(&self, slot: PlayerId) -> Result<Player, RestoreError> {
        let slot_number = u8::from(slot);
        let fail = |source| RestoreError::Player {
            slot: slot_number,
            source,
        };
        let id = PlayerId::try_from(self.id).map_err(fail)?;
        if id != slot {
            return Err(fail(PlayerError::WrongSlot {
                slot: slot_number,
                found: self.id,
            }));
        }
        Player::new(id, self.name.clone(), self.is_computer).map_err(fail)
    }
}

pub(crate) fn encode_cells(cells: &[Cell]) -> Vec<u8> {
    cells.iter().map(|&cell| cell.into()).collect()
}

pub(crate) fn decode_cells(raw: &[u8], geometry: &Geometry) -> Result<Vec<Cell>, RestoreError> {
    if raw.len() != geometry.cell_count() {
        return Err(RestoreError::BoardSize {
            expected: geometry.cell_count(),
            found: raw.len(),
        });
    }
    raw.iter()
        .enumerate()
        .map(|(index, &value)| {
            Cell::from_u8(value).ok_or(RestoreError::InvalidCell { index, value })
        })
        .collect()
}
