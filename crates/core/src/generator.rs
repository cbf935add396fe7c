//! Generator module - random and enumerated piece creation
//!
//! The generator owns its RNG and its id counter, so two generators never share
//! state and a seeded generator replays the same piece sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::pieces::{templates, Piece, PieceId};
use crate::types::{Color, Position, ShapeKind, BOXES_PER_PIECE, SPAWN_X, SPAWN_Y};

/// Source of new pieces
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: StdRng,
    next_id: u32,
}

impl PieceGenerator {
    /// Create a deterministic generator with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            next_id: 0,
        }
    }

    /// Create a generator seeded from the operating system
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            next_id: 0,
        }
    }

    /// Number of pieces created so far
    pub fn created(&self) -> u32 {
        self.next_id
    }

    /// Create a random piece at the spawn position
    ///
    /// Shape is uniform over the catalog, template uniform over the shape's
    /// templates, and each box color is drawn independently.
    pub fn create_random(&mut self) -> Piece {
        let shape = ShapeKind::ALL[self.rng.random_range(0..ShapeKind::ALL.len())];
        let options = templates(shape);
        let template = &options[self.rng.random_range(0..options.len())];

        let mut colors = [Color::Red; BOXES_PER_PIECE];
        for color in &mut colors {
            *color = Color::ALL[self.rng.random_range(0..Color::ALL.len())];
        }

        self.next_id = self.next_id.wrapping_add(1);

        Piece::from_template(
            PieceId::Serial(self.next_id),
            shape,
            template,
            colors,
            Position::new(SPAWN_X, SPAWN_Y),
        )
    }

    /// One single-colored piece per (shape, color, template), at the origin
    ///
    /// Order is shape, then color, then template. Ids are derived from the
    /// shape, the color, and the running index, so the output never varies.
    pub fn enumerate_all_variants() -> Vec<Piece> {
        let mut variants = Vec::new();
        for shape in ShapeKind::ALL {
            for color in Color::ALL {
                for template in templates(shape) {
                    let id = PieceId::Variant {
                        shape,
                        color,
                        index: variants.len() as u16,
                    };
                    variants.push(Piece::from_template(
                        id,
                        shape,
                        template,
                        [color; BOXES_PER_PIECE],
                        Position::default(),
                    ));
                }
            }
        }
        variants
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rotation;

    #[test]
    fn test_generator_deterministic() {
        let mut g1 = PieceGenerator::new(12345);
        let mut g2 = PieceGenerator::new(12345);

        for _ in 0..100 {
            assert_eq!(g1.create_random(), g2.create_random());
        }
    }

    #[test]
    fn test_random_piece_spawns_top_center() {
        let mut g = PieceGenerator::new(9);
        for _ in 0..50 {
            let p = g.create_random();
            assert_eq!(p.position, Position::new(3, 0));
            assert_eq!(p.rotation, Rotation::North);
            assert!(templates(p.shape)
                .iter()
                .any(|t| t.iter().zip(p.boxes.iter()).all(|(&(x, y), b)| b.offset == Position::new(x, y))));
        }
    }

    #[test]
    fn test_ids_unique_per_generator() {
        let mut g = PieceGenerator::new(1);
        let a = g.create_random();
        let b = g.create_random();
        assert_ne!(a.id, b.id);
        assert_eq!(a.id, PieceId::Serial(1));
        assert_eq!(b.id, PieceId::Serial(2));
        assert_eq!(g.created(), 2);
    }

    #[test]
    fn test_both_shapes_and_colors_appear() {
        let mut g = PieceGenerator::new(42);
        let pieces: Vec<_> = (0..200).map(|_| g.create_random()).collect();

        for shape in ShapeKind::ALL {
            assert!(pieces.iter().any(|p| p.shape == shape), "missing {shape:?}");
        }
        for color in Color::ALL {
            assert!(pieces
                .iter()
                .flat_map(|p| p.boxes.iter())
                .any(|b| b.color == color));
        }
    }

    #[test]
    fn test_enumerate_all_variants() {
        let variants = PieceGenerator::enumerate_all_variants();
        // (2 straight + 8 bent) templates x 2 colors
        assert_eq!(variants.len(), 20);

        assert_eq!(variants[0].id.to_string(), "straight_red_0");
        assert_eq!(variants[2].id.to_string(), "straight_blue_2");
        assert_eq!(variants[4].id.to_string(), "bent_red_4");
        assert_eq!(variants[19].id.to_string(), "bent_blue_19");

        for v in &variants {
            let first = v.boxes[0].color;
            assert!(v.boxes.iter().all(|b| b.color == first));
            assert_eq!(v.position, Position::default());
        }

        assert_eq!(variants, PieceGenerator::enumerate_all_variants());
    }
}
