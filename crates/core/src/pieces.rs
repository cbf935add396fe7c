//! Pieces module - triomino shape catalog and rotation
//!
//! Every piece is three boxes. Box offsets are relative to the piece origin and
//! always normalized so the smallest x and the smallest y are both 0.
//!
//! Catalog:
//! - **Straight**: 2 templates (horizontal, vertical)
//! - **Bent**: 8 ordered templates. As cell sets they cover the 4 L orientations;
//!   some orientations appear with more than one box ordering, which only changes
//!   how randomly drawn colors land on cells.

use std::fmt;

use crate::types::{Cell, Color, Position, Rotation, ShapeKind, BOXES_PER_PIECE};

/// Offset of a single box relative to the piece origin
pub type BoxOffset = (i8, i8);

/// One catalog entry: the ordered box offsets of a triomino
pub type Template = [BoxOffset; BOXES_PER_PIECE];

const STRAIGHT_TEMPLATES: [Template; 2] = [
    [(0, 0), (1, 0), (2, 0)],
    [(0, 0), (0, 1), (0, 2)],
];

const BENT_TEMPLATES: [Template; 8] = [
    [(0, 0), (1, 0), (1, 1)],
    [(0, 0), (0, 1), (1, 1)],
    [(0, 0), (1, 0), (0, 1)],
    [(1, 0), (0, 1), (1, 1)],
    [(0, 1), (1, 0), (1, 1)],
    [(0, 0), (0, 1), (1, 0)],
    [(1, 0), (0, 0), (0, 1)],
    [(0, 0), (1, 1), (1, 0)],
];

/// Get the rotation templates for a shape kind
pub fn templates(kind: ShapeKind) -> &'static [Template] {
    match kind {
        ShapeKind::Straight => &STRAIGHT_TEMPLATES,
        ShapeKind::Bent => &BENT_TEMPLATES,
    }
}

/// Piece identity
///
/// Spawned pieces carry a serial number from their generator. Catalog variants
/// carry a deterministic identity derived from shape, color, and index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceId {
    Serial(u32),
    Variant {
        shape: ShapeKind,
        color: Color,
        index: u16,
    },
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceId::Serial(n) => write!(f, "piece_{n}"),
            PieceId::Variant {
                shape,
                color,
                index,
            } => write!(f, "{}_{}_{}", shape.as_str(), color.as_str(), index),
        }
    }
}

/// A unit box of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceBox {
    /// Offset from the piece origin
    pub offset: Position,
    pub color: Color,
}

/// A falling (or previewed) triomino
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub id: PieceId,
    pub shape: ShapeKind,
    pub boxes: [PieceBox; BOXES_PER_PIECE],
    /// Board position of the piece origin
    pub position: Position,
    pub rotation: Rotation,
}

impl Piece {
    /// Build a piece from a template, pairing each offset with a color
    pub fn from_template(
        id: PieceId,
        shape: ShapeKind,
        template: &Template,
        colors: [Color; BOXES_PER_PIECE],
        position: Position,
    ) -> Self {
        let boxes = std::array::from_fn(|i| PieceBox {
            offset: Position::new(template[i].0, template[i].1),
            color: colors[i],
        });
        Self {
            id,
            shape,
            boxes,
            position,
            rotation: Rotation::North,
        }
    }

    /// Absolute board cells occupied by this piece at its own position
    pub fn cells(&self) -> impl Iterator<Item = (Position, Color)> + '_ {
        self.cells_at(self.position)
    }

    /// Absolute board cells this piece would occupy with its origin at `origin`
    pub fn cells_at(&self, origin: Position) -> impl Iterator<Item = (Position, Color)> + '_ {
        self.boxes
            .iter()
            .map(move |b| (origin + b.offset, b.color))
    }

    /// Color of the box at a relative offset, if any
    pub fn color_at_offset(&self, offset: Position) -> Cell {
        self.boxes
            .iter()
            .find(|b| b.offset == offset)
            .map(|b| b.color)
    }

    /// Bounding box width in cells
    pub fn width(&self) -> i8 {
        self.boxes.iter().map(|b| b.offset.x).max().unwrap_or(0) + 1
    }

    /// Bounding box height in cells
    pub fn height(&self) -> i8 {
        self.boxes.iter().map(|b| b.offset.y).max().unwrap_or(0) + 1
    }

    /// Same piece moved so its origin sits at `position`
    pub fn with_position(self, position: Position) -> Self {
        Self { position, ..self }
    }

    /// Rotated copy (see [`rotate`])
    pub fn rotated(&self) -> Self {
        rotate(self)
    }
}

/// Rotate a piece 90° clockwise about its origin
///
/// Each offset maps `(x, y) -> (y, -x)` and the result is shifted back so the
/// minimum x and y are 0 again. Colors travel with their boxes. The piece
/// position is unchanged; the rotation advances one quarter turn. The input is
/// not modified.
pub fn rotate(piece: &Piece) -> Piece {
    let turned = piece.boxes.map(|b| PieceBox {
        offset: Position::new(b.offset.y, -b.offset.x),
        color: b.color,
    });

    let min_x = turned.iter().map(|b| b.offset.x).min().unwrap_or(0);
    let min_y = turned.iter().map(|b| b.offset.y).min().unwrap_or(0);

    let boxes = turned.map(|b| PieceBox {
        offset: b.offset.offset(-min_x, -min_y),
        color: b.color,
    });

    Piece {
        boxes,
        rotation: piece.rotation.rotate_cw(),
        ..*piece
    }
}

/// Check that a template is a valid triomino: distinct, edge-connected,
/// non-negative, and touching both axes.
pub fn is_well_formed(template: &Template) -> bool {
    let distinct = (0..BOXES_PER_PIECE)
        .all(|i| (i + 1..BOXES_PER_PIECE).all(|j| template[i] != template[j]));
    let non_negative = template.iter().all(|&(x, y)| x >= 0 && y >= 0);
    let touches_axes = template.iter().any(|&(x, _)| x == 0) && template.iter().any(|&(_, y)| y == 0);

    // Three cells are connected iff at least two distinct adjacent pairs exist.
    let adjacent = |a: BoxOffset, b: BoxOffset| (a.0 - b.0).abs() + (a.1 - b.1).abs() == 1;
    let mut links = 0;
    for i in 0..BOXES_PER_PIECE {
        for j in i + 1..BOXES_PER_PIECE {
            if adjacent(template[i], template[j]) {
                links += 1;
            }
        }
    }

    distinct && non_negative && touches_axes && links >= 2
}
