use std::sync::OnceLock;

use super::Square;

/// One of the 8 sliding-piece ray directions or 8 knight leaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,

    NorthNorthEast,
    NorthEastEast,
    SouthEastEast,
    SouthSouthEast,
    SouthSouthWest,
    SouthWestWest,
    NorthWestWest,
    NorthNorthWest,
}

impl Direction {
    pub const RAYS: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    pub const KNIGHT_LEAPS: [Direction; 8] = [
        Direction::NorthNorthEast,
        Direction::NorthEastEast,
        Direction::SouthEastEast,
        Direction::SouthSouthEast,
        Direction::SouthSouthWest,
        Direction::SouthWestWest,
        Direction::NorthWestWest,
        Direction::NorthNorthWest,
    ];

    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::North => (1, 0),
            Direction::South => (-1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
            Direction::NorthEast => (1, 1),
            Direction::NorthWest => (1, -1),
            Direction::SouthEast => (-1, 1),
            Direction::SouthWest => (-1, -1),

            Direction::NorthNorthEast => (2, 1),
            Direction::NorthEastEast => (1, 2),
            Direction::SouthEastEast => (-1, 2),
            Direction::SouthSouthEast => (-2, 1),
            Direction::SouthSouthWest => (-2, -1),
            Direction::SouthWestWest => (-1, -2),
            Direction::NorthWestWest => (1, -2),
            Direction::NorthNorthWest => (2, -1),
        }
    }

    pub const fn is_ray(self) -> bool {
        matches!(
            self,
            Direction::North
                | Direction::South
                | Direction::East
                | Direction::West
                | Direction::NorthEast
                | Direction::NorthWest
                | Direction::SouthEast
                | Direction::SouthWest
        )
    }

    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::NorthEast | Direction::NorthWest | Direction::SouthEast | Direction::SouthWest
        )
    }

    pub const fn is_orthogonal(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::South | Direction::East | Direction::West
        )
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::NorthEast => Direction::SouthWest,
            Direction::NorthWest => Direction::SouthEast,
            Direction::SouthEast => Direction::NorthWest,
            Direction::SouthWest => Direction::NorthEast,

            Direction::NorthNorthEast => Direction::SouthSouthWest,
            Direction::NorthEastEast => Direction::SouthWestWest,
            Direction::SouthEastEast => Direction::NorthWestWest,
            Direction::SouthSouthEast => Direction::NorthNorthWest,
            Direction::SouthSouthWest => Direction::NorthNorthEast,
            Direction::SouthWestWest => Direction::NorthEastEast,
            Direction::NorthWestWest => Direction::SouthEastEast,
            Direction::NorthNorthWest => Direction::SouthSouthEast,
        }
    }

    pub fn step(self, from: Square) -> Option<Square> {
        let (dr, df) = self.delta();
        from.offset(dr, df)
    }
}

struct DirectionTable {
    /// `table[from.index()][to.index()]`.
    table: Box<[[Option<Direction>; 64]; 64]>,
}

impl DirectionTable {
    fn build() -> Self {
        let mut table = Box::new([[None; 64]; 64]);

        for from in 0..64u8 {
            for to in 0..64u8 {
                if from == to {
                    continue;
                }
                let from_sq = Square::from_index(from);
                let to_sq = Square::from_index(to);
                table[from as usize][to as usize] = direction_between_slow(from_sq, to_sq);
            }
        }

        Self { table }
    }

    fn instance() -> &'static Self {
        static INSTANCE: OnceLock<DirectionTable> = OnceLock::new();
        INSTANCE.get_or_init(Self::build)
    }
}

fn direction_between_slow(from: Square, to: Square) -> Option<Direction> {
    let dr = to.rank() as i8 - from.rank() as i8;
    let df = to.file() as i8 - from.file() as i8;

    if dr == 0 && df != 0 {
        return Some(if df > 0 { Direction::East } else { Direction::West });
    }
    if df == 0 && dr != 0 {
        return Some(if dr > 0 { Direction::North } else { Direction::South });
    }
    if dr != 0 && dr.abs() == df.abs() {
        return Some(match (dr > 0, df > 0) {
            (true, true) => Direction::NorthEast,
            (true, false) => Direction::NorthWest,
            (false, true) => Direction::SouthEast,
            (false, false) => Direction::SouthWest,
        });
    }

    Direction::KNIGHT_LEAPS
        .into_iter()
        .find(|d| d.delta() == (dr, df))
}

/// The unique direction that joins `from` to `to`, if any, computed once and
/// cached in a lazily-built 64x64 table.
pub fn direction_between(from: Square, to: Square) -> Option<Direction> {
    DirectionTable::instance().table[from.index()][to.index()]
}

/// Successive squares stepping from `from` along `dir`, stopping before the
/// step that would leave the board. Excludes `from` itself.
pub fn ray(from: Square, dir: Direction) -> impl Iterator<Item = Square> {
    let mut cursor = Some(from);
    std::iter::from_fn(move || {
        let next = dir.step(cursor?);
        cursor = next;
        next
    })
}

/// Squares strictly between `from` (exclusive) and `to` (inclusive).
///
/// Empty if `from` and `to` are not joined by a direction.
pub fn closed_path(from: Square, to: Square) -> impl Iterator<Item = Square> {
    match direction_between(from, to) {
        Some(dir) => {
            let stop_after = to;
            let mut cursor = Some(from);
            let mut done = false;
            EitherIter::A(std::iter::from_fn(move || {
                if done {
                    return None;
                }
                let next = dir.step(cursor?)?;
                cursor = Some(next);
                if next == stop_after {
                    done = true;
                }
                Some(next)
            }))
        }
        None => EitherIter::B(std::iter::empty()),
    }
}

/// Squares strictly between `from` and `to`, excluding both endpoints.
pub fn open_path(from: Square, to: Square) -> impl Iterator<Item = Square> {
    closed_path(from, to).filter(move |&sq| sq != to)
}

enum EitherIter<A, B> {
    A(A),
    B(B),
}

impl<T, A: Iterator<Item = T>, B: Iterator<Item = T>> Iterator for EitherIter<A, B> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        match self {
            EitherIter::A(a) => a.next(),
            EitherIter::B(b) => b.next(),
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn direction_between_ray() {
        assert_eq!(direction_between(Square::A1, Square::A8), Some(Direction::North));
        assert_eq!(direction_between(Square::H1, Square::A1), Some(Direction::West));
        assert_eq!(direction_between(Square::A1, Square::H8), Some(Direction::NorthEast));
    }

    #[test]
    fn direction_between_knight() {
        assert_eq!(
            direction_between(Square::E4, Square::F6),
            Some(Direction::NorthNorthEast)
        );
    }

    #[test]
    fn direction_between_unrelated_is_none() {
        assert_eq!(direction_between(Square::A1, Square::B3), None);
    }

    #[test]
    fn open_path_excludes_both_ends() {
        let squares: Vec<_> = open_path(Square::A1, Square::A4).collect();
        assert_eq!(squares, vec![Square::A2, Square::A3]);
    }

    #[test]
    fn closed_path_includes_destination() {
        let squares: Vec<_> = closed_path(Square::A1, Square::A4).collect();
        assert_eq!(squares, vec![Square::A2, Square::A3, Square::A4]);
    }

    #[test]
    fn ray_stops_at_edge() {
        let squares: Vec<_> = ray(Square::A1, Direction::East).collect();
        assert_eq!(squares.len(), 7);
        assert_eq!(squares.last(), Some(&Square::H1));
    }
}
