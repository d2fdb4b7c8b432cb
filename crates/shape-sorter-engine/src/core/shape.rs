use std::fmt;

use serde::{Deserialize, Serialize};

use super::BOARD_SIZE;

/// Color token attached to a shape and to every cell it fills.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum ShapeColor {
    #[display("red")]
    Red,
    #[display("orange")]
    Orange,
    #[display("yellow")]
    Yellow,
    #[display("green")]
    Green,
    #[display("teal")]
    Teal,
    #[display("blue")]
    Blue,
    #[display("indigo")]
    Indigo,
    #[display("purple")]
    Purple,
    #[display("pink")]
    Pink,
}

impl ShapeColor {
    /// Number of color tokens.
    pub const LEN: usize = 9;

    pub const ALL: [Self; Self::LEN] = [
        Self::Red,
        Self::Orange,
        Self::Yellow,
        Self::Green,
        Self::Teal,
        Self::Blue,
        Self::Indigo,
        Self::Purple,
        Self::Pink,
    ];

    /// Returns the `(r, g, b)` triple used when drawing this color.
    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Red => (0xef, 0x44, 0x44),
            Self::Orange => (0xf9, 0x73, 0x16),
            Self::Yellow => (0xea, 0xb3, 0x08),
            Self::Green => (0x22, 0xc5, 0x5e),
            Self::Teal => (0x14, 0xb8, 0xa6),
            Self::Blue => (0x3b, 0x82, 0xf6),
            Self::Indigo => (0x63, 0x66, 0xf1),
            Self::Purple => (0xa8, 0x55, 0xf7),
            Self::Pink => (0xec, 0x48, 0x99),
        }
    }
}

/// Reason a textual mask was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MaskError {
    #[display("mask has no rows or more rows than the board")]
    BadHeight,
    #[display("mask row is empty or wider than the board")]
    BadWidth,
    #[display("mask rows have different lengths")]
    Ragged,
    #[display("mask contains a character other than '#' or '.'")]
    BadChar,
    #[display("mask has an empty border row or column")]
    LooseBounds,
}

/// Rectangular occupancy mask of a shape.
///
/// Each row is stored as a bit set where bit `x` marks column `x` as occupied.
/// A mask never exceeds the board in either dimension, and its bounding box is
/// tight: the first and last rows and columns each contain an occupied cell.
///
/// Masks are written as rows of `#` (occupied) and `.` (empty):
///
/// ```
/// use shape_sorter_engine::ShapeMask;
///
/// const T: ShapeMask = ShapeMask::from_rows(&["###", ".#."]);
/// assert_eq!((T.width(), T.height()), (3, 2));
/// assert!(T.is_occupied(1, 1));
/// assert!(!T.is_occupied(0, 1));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMask {
    width: u8,
    height: u8,
    rows: [u8; BOARD_SIZE],
}

impl ShapeMask {
    /// Builds a mask in `const` context, failing compilation on a malformed mask.
    #[must_use]
    pub const fn from_rows(rows: &[&str]) -> Self {
        match Self::try_from_rows(rows) {
            Ok(mask) => mask,
            Err(_) => panic!("malformed shape mask"),
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub const fn try_from_rows(rows: &[&str]) -> Result<Self, MaskError> {
        let height = rows.len();
        if height == 0 || height > BOARD_SIZE {
            return Err(MaskError::BadHeight);
        }
        let width = rows[0].len();
        if width == 0 || width > BOARD_SIZE {
            return Err(MaskError::BadWidth);
        }

        let mut bits = [0; BOARD_SIZE];
        let mut columns = 0;
        let mut y = 0;
        while y < height {
            let row = rows[y].as_bytes();
            if row.len() != width {
                return Err(MaskError::Ragged);
            }
            let mut x = 0;
            while x < width {
                match row[x] {
                    b'#' => bits[y] |= 1 << x,
                    b'.' => {}
                    _ => return Err(MaskError::BadChar),
                }
                x += 1;
            }
            columns |= bits[y];
            y += 1;
        }

        let tight = bits[0] != 0
            && bits[height - 1] != 0
            && columns & 1 != 0
            && columns & (1 << (width - 1)) != 0;
        if !tight {
            return Err(MaskError::LooseBounds);
        }

        Ok(Self {
            width: width as u8,
            height: height as u8,
            rows: bits,
        })
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width as usize
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height as usize
    }

    /// Returns whether the mask cell at column `x`, row `y` is occupied.
    ///
    /// Positions outside the mask are reported as unoccupied.
    #[must_use]
    pub const fn is_occupied(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height() && self.rows[y] & (1 << x) != 0
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(|row| row.count_ones() as usize).sum()
    }

    /// Returns an iterator over `(dx, dy)` offsets of the occupied cells, row by row.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height()).flat_map(move |dy| {
            (0..self.width())
                .filter(move |&dx| self.is_occupied(dx, dy))
                .map(move |dx| (dx, dy))
        })
    }

    fn to_row_strings(self) -> Vec<String> {
        (0..self.height())
            .map(|y| {
                (0..self.width())
                    .map(|x| if self.is_occupied(x, y) { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }
}

impl fmt::Debug for ShapeMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ShapeMask")
            .field(&self.to_row_strings())
            .finish()
    }
}

// Serialized as row strings, e.g. `["###", ".#."]`.
impl Serialize for ShapeMask {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_row_strings().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ShapeMask {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let rows = Vec::<String>::deserialize(deserializer)?;
        let rows = rows.iter().map(String::as_str).collect::<Vec<_>>();
        Self::try_from_rows(&rows)
            .map_err(|e| serde::de::Error::custom(format!("invalid shape mask {rows:?}: {e}")))
    }
}

/// A piece offered to the player: an occupancy mask plus a color.
///
/// Shapes are plain values; two shapes with the same mask and color are
/// interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Shape {
    mask: ShapeMask,
    color: ShapeColor,
}

impl Shape {
    #[must_use]
    pub const fn new(mask: ShapeMask, color: ShapeColor) -> Self {
        Self { mask, color }
    }

    #[must_use]
    pub const fn mask(&self) -> &ShapeMask {
        &self.mask
    }

    #[must_use]
    pub const fn color(&self) -> ShapeColor {
        self.color
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.mask.width()
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.mask.height()
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.mask.cell_count()
    }

    pub fn occupied_positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.mask.occupied_positions()
    }
}
