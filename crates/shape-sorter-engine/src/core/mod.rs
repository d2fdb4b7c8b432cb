pub use self::{board::*, shape::*};

pub(crate) mod board;
pub(crate) mod shape;

/// Width and height of the square playing grid.
pub const BOARD_SIZE: usize = 6;
