use std::fmt::Display;
use std::str::FromStr;

use paste::paste;
use seq_macro::seq;
use thiserror::Error;

/// A square on the board, encoded as `rank * 8 + file`.
///
/// There is no sentinel "off-board" value of this type; absence is
/// represented with `Option<Square>` at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    pub const COUNT: usize = 64;

    /// Constructs a square from rank and file, each in `0..8`.
    ///
    /// Returns `None` if either coordinate is out of range.
    pub const fn new(rank: i8, file: i8) -> Option<Self> {
        if rank < 0 || rank > 7 || file < 0 || file > 7 {
            None
        } else {
            Some(Self((rank as u8) * 8 + file as u8))
        }
    }

    /// Constructs a square from an already-valid index in `0..64`.
    ///
    /// Panics (in debug builds) if out of range.
    pub const fn from_index(index: u8) -> Self {
        debug_assert!(index < 64);
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// Mirrors both rank and file: `(rank,file) -> (7-rank,7-file)`.
    pub const fn flip(self) -> Self {
        Self::new(7 - self.rank() as i8, 7 - self.file() as i8).expect("flip stays on board")
    }

    /// Steps by `(d_rank, d_file)`, returning `None` if the result would
    /// leave the board.
    pub const fn offset(self, d_rank: i8, d_file: i8) -> Option<Self> {
        Self::new(self.rank() as i8 + d_rank, self.file() as i8 + d_file)
    }

    pub const fn parity(self) -> bool {
        (self.rank() + self.file()) % 2 == 0
    }
}

/// Board square aliases, e.g. `Square::E4`.
#[allow(clippy::eq_op, clippy::char_lit_as_u8)]
impl Square {
    seq!(RANK in 1..=8 {
        seq!(FILE in 'A'..='H' {
            paste! {
                pub const [<FILE RANK>]: Square =
                    match Square::new(RANK - 1, FILE as u8 as i8 - b'A' as i8) {
                        Some(sq) => sq,
                        None => panic!("square alias out of range"),
                    };
            }
        });
    });
}

impl Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let file = (b'a' + self.file()) as char;
        let rank = (b'1' + self.rank()) as char;
        write!(f, "{file}{rank}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseSquareError {
    #[error("square string {0:?} has the wrong length")]
    WrongLength(String),
    #[error("invalid file character {0:?}")]
    InvalidFile(char),
    #[error("invalid rank character {0:?}")]
    InvalidRank(char),
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(ParseSquareError::WrongLength(s.to_string()));
        }

        let file = bytes[0];
        if !(b'a'..=b'h').contains(&file) {
            return Err(ParseSquareError::InvalidFile(file as char));
        }

        let rank = bytes[1];
        if !(b'1'..=b'8').contains(&rank) {
            return Err(ParseSquareError::InvalidRank(rank as char));
        }

        Ok(Square::new((rank - b'1') as i8, (file - b'a') as i8).expect("checked above"))
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn new_rejects_out_of_range() {
        assert_eq!(Square::new(-1, 0), None);
        assert_eq!(Square::new(0, 8), None);
        assert_eq!(Square::new(8, 0), None);
    }

    #[test]
    fn index_round_trips() {
        for i in 0..64u8 {
            let sq = Square::from_index(i);
            assert_eq!(sq.index(), i as usize);
        }
    }

    #[test]
    fn display_matches_algebraic() {
        assert_eq!(Square::E4.to_string(), "e4");
        assert_eq!(Square::A1.to_string(), "a1");
        assert_eq!(Square::H8.to_string(), "h8");
    }

    #[test]
    fn from_str_round_trips() {
        for rank in 0..8i8 {
            for file in 0..8i8 {
                let sq = Square::new(rank, file).unwrap();
                let parsed: Square = sq.to_string().parse().unwrap();
                assert_eq!(parsed, sq);
            }
        }
    }

    #[test]
    fn from_str_rejects_garbage() {
        assert!("".parse::<Square>().is_err());
        assert!("e".parse::<Square>().is_err());
        assert!("i4".parse::<Square>().is_err());
        assert!("e9".parse::<Square>().is_err());
    }

    #[test]
    fn flip_mirrors_both_axes() {
        assert_eq!(Square::A1.flip(), Square::H8);
        assert_eq!(Square::E4.flip(), Square::D5);
    }
}
