//! Position initialization record.
//!
//! A [`PositionRecord`] is the structured form of a FEN string: the piece placement rank by
//! rank, the side to move, four castling flags and an optional en passant target. Parsing only
//! splits the text into fields; placement is checked when the record is turned into a
//! [`Position`](crate::Position).
use std::{fmt, str::FromStr};

use crate::{error::ChessError, piece::Color, square::Square};

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionRecord {
    /// Ranks from 8 down to 1, each in FEN rank syntax ("rnbqkbnr", "3p4", "8")
    pub placement: Vec<String>,
    pub side: Color,
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
    pub en_passant: Option<Square>,
    pub halfmoves: usize,
    /// Starts at 1 and grows after every black move
    pub fullmoves: usize,
}

/// Split a FEN string into a record. Move counters are optional.
impl FromStr for PositionRecord {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fen: Vec<&str> = s.split_whitespace().collect();
        if fen.len() < 4 || fen.len() > 6 {
            let msg = format!("expected 4 to 6 fields, found {}", fen.len());
            return Err(ChessError::Fen(msg));
        }

        let placement = fen[0].split('/').map(String::from).collect();

        let side = match fen[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(ChessError::Fen(format!("invalid side to move {other:?}"))),
        };

        let mut record = PositionRecord {
            placement,
            side,
            white_kingside: false,
            white_queenside: false,
            black_kingside: false,
            black_queenside: false,
            en_passant: None,
            halfmoves: 0,
            fullmoves: 1,
        };

        if fen[2] != "-" {
            for token in fen[2].chars() {
                let flag = match token {
                    'K' => &mut record.white_kingside,
                    'Q' => &mut record.white_queenside,
                    'k' => &mut record.black_kingside,
                    'q' => &mut record.black_queenside,
                    _ => {
                        let msg = format!("invalid castling rights {:?}", fen[2]);
                        return Err(ChessError::Fen(msg));
                    }
                };
                *flag = true;
            }
        }

        if fen[3] != "-" {
            record.en_passant = Some(
                fen[3]
                    .parse()
                    .map_err(|_| ChessError::InvalidEnPassant(fen[3].to_string()))?,
            );
        }

        if let Some(hm) = fen.get(4) {
            record.halfmoves = hm
                .parse()
                .map_err(|_| ChessError::Fen(format!("invalid halfmove count {hm:?}")))?;
        }

        if let Some(fm) = fen.get(5) {
            record.fullmoves = fm
                .parse::<usize>()
                .ok()
                .filter(|&count| count > 0)
                .ok_or_else(|| ChessError::Fen(format!("invalid fullmove count {fm:?}")))?;
        }

        Ok(record)
    }
}

/// Prints the record in FEN format
impl fmt::Display for PositionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut castle = String::new();
        for (flag, c) in [
            (self.white_kingside, 'K'),
            (self.white_queenside, 'Q'),
            (self.black_kingside, 'k'),
            (self.black_queenside, 'q'),
        ] {
            if flag {
                castle.push(c);
            }
        }
        if castle.is_empty() {
            castle.push('-');
        }

        let side = match self.side {
            Color::White => 'w',
            Color::Black => 'b',
        };
        let ep = self
            .en_passant
            .map_or(String::from("-"), |square| square.to_string());

        write!(
            f,
            "{} {side} {castle} {ep} {} {}",
            self.placement.join("/"),
            self.halfmoves,
            self.fullmoves
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_parse() {
        let record: PositionRecord = START_FEN.parse().unwrap();

        assert_eq!(record.placement.len(), 8);
        assert_eq!(record.placement[0], "rnbqkbnr");
        assert_eq!(record.side, Color::White);
        assert!(record.white_kingside && record.black_queenside);
        assert_eq!(record.en_passant, None);
        assert_eq!(record.to_string(), START_FEN);
    }

    #[test]
    fn test_record_fields() {
        let record: PositionRecord = "8/8/1k6/2b5/2pP4/8/5K2/8 b - d3".parse().unwrap();

        assert_eq!(record.side, Color::Black);
        assert!(!record.white_kingside);
        assert_eq!(record.en_passant, Some(Square::D3));
        assert_eq!(record.halfmoves, 0);
        assert_eq!(record.fullmoves, 1);
    }

    #[test]
    fn test_move_counters() {
        let fen = "r6r/1b2k1bq/8/8/7B/8/8/R3K2R b KQ - 3 42";
        let record: PositionRecord = fen.parse().unwrap();

        assert_eq!((record.halfmoves, record.fullmoves), (3, 42));
        assert_eq!(record.to_string(), fen);

        for bad in ["8/8/8/8/8/8/8/8 w - - 0 xyz", "8/8/8/8/8/8/8/8 w - - 0 0"] {
            assert!(matches!(bad.parse::<PositionRecord>(), Err(ChessError::Fen(_))));
        }
    }

    #[test]
    fn test_record_errors() {
        assert!(matches!(
            "8/8/8/8 x - -".parse::<PositionRecord>(),
            Err(ChessError::Fen(_))
        ));
        assert!(matches!(
            "8/8/8/8/8/8/8/8 w KX -".parse::<PositionRecord>(),
            Err(ChessError::Fen(_))
        ));
        assert!(matches!(
            "8/8/8/8/8/8/8/8 w - z9".parse::<PositionRecord>(),
            Err(ChessError::InvalidEnPassant(_))
        ));
        assert!(matches!("8/8/8/8".parse::<PositionRecord>(), Err(ChessError::Fen(_))));
    }
}
