//! マス（Cell）
//!
//! 4×4×4 の立方体の各マスを 0..64 のインデックスで表す。
//! 座標との対応は `index = y * 16 + z * 4 + x`（x, y, z ∈ 0..4）。

use std::fmt;

use crate::error::PositionError;

/// マス
///
/// 内部値は常に 0..64 に収まる。座標との変換は全単射。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Cell(u8);

impl Cell {
    /// マスの数
    pub const NUM: usize = 64;
    /// 1辺のマス数
    pub const SIDE: u8 = 4;

    /// インデックスから生成（範囲外なら `None`）
    #[inline]
    pub const fn new(index: u8) -> Option<Cell> {
        if (index as usize) < Self::NUM { Some(Cell(index)) } else { None }
    }

    /// 範囲チェックなしで生成（テーブル構築など、範囲が自明な箇所専用）
    #[inline]
    pub(crate) const fn from_index_unchecked(index: u8) -> Cell {
        debug_assert!((index as usize) < Self::NUM);
        Cell(index)
    }

    /// 座標から生成（いずれかが 0..4 を外れれば `None`）
    #[inline]
    pub const fn from_coords(x: u8, y: u8, z: u8) -> Option<Cell> {
        if x < Self::SIDE && y < Self::SIDE && z < Self::SIDE {
            Some(Cell(y * 16 + z * 4 + x))
        } else {
            None
        }
    }

    /// インデックス（配列アクセス用）
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// 生の値
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn x(self) -> u8 {
        self.0 % 4
    }

    #[inline]
    pub const fn y(self) -> u8 {
        self.0 / 16
    }

    #[inline]
    pub const fn z(self) -> u8 {
        (self.0 / 4) % 4
    }

    /// (x, y, z)
    #[inline]
    pub const fn coords(self) -> (u8, u8, u8) {
        (self.x(), self.y(), self.z())
    }

    /// このマスだけが立った 64bit マスク
    #[inline]
    pub const fn bit(self) -> u64 {
        1u64 << self.0
    }

    /// 全マスをインデックス順に列挙
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..Self::NUM as u8).map(Cell)
    }
}

impl TryFrom<u8> for Cell {
    type Error = PositionError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Cell::new(index).ok_or(PositionError::CellOutOfRange(index))
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> u8 {
        cell.0
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y, z) = self.coords();
        write!(f, "({x},{y},{z})")
    }
}
