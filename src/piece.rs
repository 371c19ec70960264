use std::fmt;

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Serialize;

/// The shape of a piece, one of the seven standard tetrominoes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PieceKind {
    I,
    O,
    T,
    L,
    S,
    Z,
    J,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::L,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
    ];

    pub fn symbol(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::L => 'L',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// An upcoming piece.
///
/// Pieces are only created by a [`PieceGenerator`], which guarantees that
/// every `id` is unique. Displayed as the kind followed by the id, e.g. `T3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Piece {
    kind: PieceKind,
    id: u64,
}

impl Piece {
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind, self.id)
    }
}

/// Produces pieces of random kind with increasing ids.
///
/// The id counter starts at 0 and is advanced exactly once per generated
/// piece. It is never reset, so ids stay dense no matter what happens to the
/// pieces afterwards.
#[derive(Debug, Clone)]
pub struct PieceGenerator<R = StdRng> {
    rng: R,
    next_id: u64,
}

impl PieceGenerator<StdRng> {
    /// Creates a generator whose kinds are reproducible for a given `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Creates a generator seeded once from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> PieceGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng, next_id: 0 }
    }

    pub fn generate(&mut self) -> Piece {
        let kind = PieceKind::ALL[self.rng.random_range(0..PieceKind::ALL.len())];
        let id = self.next_id;
        self.next_id += 1;

        Piece { kind, id }
    }

    /// Returns how many pieces have been generated so far.
    pub fn generated(&self) -> u64 {
        self.next_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_dense_from_zero() {
        let mut generator = PieceGenerator::seeded(7);

        for expected in 0..100 {
            assert_eq!(generator.generate().id(), expected);
        }
        assert_eq!(generator.generated(), 100);
    }

    #[test]
    fn same_seed_gives_same_kinds() {
        let mut a = PieceGenerator::seeded(42);
        let mut b = PieceGenerator::seeded(42);

        for _ in 0..50 {
            assert_eq!(a.generate(), b.generate());
        }
    }

    #[test]
    fn every_kind_shows_up() {
        let mut generator = PieceGenerator::seeded(1);
        let mut seen = std::collections::HashSet::new();

        for _ in 0..1_000 {
            seen.insert(generator.generate().kind());
        }
        assert_eq!(seen.len(), PieceKind::ALL.len());
    }

    #[test]
    fn kinds_are_roughly_uniform() {
        let mut generator = PieceGenerator::seeded(9);
        let mut counts = std::collections::HashMap::new();

        for _ in 0..7_000 {
            *counts.entry(generator.generate().kind()).or_insert(0) += 1;
        }

        // 1000 expected per kind
        for kind in PieceKind::ALL {
            let count = counts.get(&kind).copied().unwrap_or(0);
            assert!((700..=1330).contains(&count), "{kind}: {count}");
        }
    }

    #[test]
    fn display_is_kind_then_id() {
        let piece = Piece {
            kind: PieceKind::T,
            id: 3,
        };

        assert_eq!(piece.to_string(), "T3");
    }

    #[test]
    fn serializes_kind_as_letter() {
        let piece = Piece {
            kind: PieceKind::Z,
            id: 12,
        };

        assert_eq!(
            serde_json::to_string(&piece).unwrap(),
            r#"{"kind":"Z","id":12}"#
        );
    }
}
