//! 局面表現
//!
//! 局面は両手番の占有マスク `(p1, p2)` の組で、常に `p1 & p2 == 0` を満たす。
//! 着手は局面を書き換えず、1ビット増えた新しい局面を返す。

use crate::error::PositionError;
use crate::eval::has_line;
use crate::types::{Bitboard, Cell, Side};

/// 局面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    masks: [Bitboard; Side::NUM],
}

impl Position {
    /// 初期局面（全マス空き）
    pub const EMPTY: Position = Position {
        masks: [Bitboard::EMPTY; Side::NUM],
    };

    /// 両手番のマスクから局面を作る
    ///
    /// 同じマスが両方に含まれていれば `PositionError::Overlap`。
    pub fn new(p1: u64, p2: u64) -> Result<Position, PositionError> {
        let overlap = p1 & p2;
        if overlap != 0 {
            return Err(PositionError::Overlap(overlap));
        }
        Ok(Position {
            masks: [Bitboard::new(p1), Bitboard::new(p2)],
        })
    }

    /// 手番 `side` の占有マス
    #[inline]
    pub fn mask(&self, side: Side) -> Bitboard {
        self.masks[side.index()]
    }

    #[inline]
    pub fn p1(&self) -> Bitboard {
        self.masks[Side::P1.index()]
    }

    #[inline]
    pub fn p2(&self) -> Bitboard {
        self.masks[Side::P2.index()]
    }

    /// 占有済みのマス
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.p1() | self.p2()
    }

    /// 空きマス
    #[inline]
    pub fn empty(&self) -> Bitboard {
        !self.occupied()
    }

    /// 置かれている石の数
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.occupied().count()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.occupied() == Bitboard::ALL
    }

    #[inline]
    pub fn is_empty_cell(&self, cell: Cell) -> bool {
        !self.occupied().contains(cell)
    }

    /// `side` が `cell` に置いた局面（探索用、検査は debug ビルドのみ）
    #[inline]
    #[must_use]
    pub fn play(self, cell: Cell, side: Side) -> Position {
        debug_assert!(self.is_empty_cell(cell), "cell {cell} is occupied");
        let mut next = self;
        next.masks[side.index()] = self.masks[side.index()].with(cell);
        next
    }

    /// `side` が `cell` に置いた局面（入力検査あり）
    pub fn try_play(self, cell: Cell, side: Side) -> Result<Position, PositionError> {
        if !self.is_empty_cell(cell) {
            return Err(PositionError::CellOccupied(cell));
        }
        Ok(self.play(cell, side))
    }

    /// ラインを完成させている手番
    ///
    /// 到達可能な局面では高々一方だけが該当する。
    pub fn winner(&self) -> Option<Side> {
        [Side::P1, Side::P2].into_iter().find(|&side| has_line(self.mask(side)))
    }
}
