//! Deterministic grid placement for states created without a position.

use super::state::Position;
use serde::{Deserialize, Serialize};

/// Row-major grid: `columns` states per row, `spacing` apart, offset by `origin`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub columns: usize,
    pub spacing: f32,
    pub origin: f32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            columns: 5,
            spacing: 100.0,
            origin: 10.0,
        }
    }
}

impl GridLayout {
    /// Position of the state at `index`.
    pub fn position(&self, index: usize) -> Position {
        let columns = self.columns.max(1);
        let col = (index % columns) as f32;
        let row = (index / columns) as f32;
        Position::new(
            self.origin + col * self.spacing,
            self.origin + row * self.spacing,
        )
    }
}
