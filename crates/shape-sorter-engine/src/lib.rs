pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Reason a shape drop was rejected.
///
/// Rejections are a normal outcome of play; the board and the turn state are
/// left untouched whenever one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlacementError {
    #[display("game is already over")]
    GameOver,
    #[display("shape extends outside the board")]
    OutOfBounds,
    #[display("shape overlaps a filled cell")]
    Overlap,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SeedParseError {
    #[display("seed must not be empty")]
    Empty,
    #[display("seed is {len} characters long, at most {max} are allowed")]
    TooLong { len: usize, max: usize },
    #[display("seed contains invalid character {ch:?}")]
    InvalidChar { ch: char },
}
