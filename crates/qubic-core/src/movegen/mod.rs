//! 指し手生成
//!
//! 空きマスを「立方体の中心 (1.5, 1.5, 1.5) からのマンハッタン距離が小さい順」に返す。
//! 順序表は起動時に一度だけ作り、呼び出しごとには占有マスを除くだけにする。
//! 距離が同じマスはインデックスの昇順（安定ソート）。

mod movelist;

pub use movelist::MoveList;

use crate::position::Position;
use crate::types::{Bitboard, Cell};

/// 中心寄りの着手順序表
#[derive(Debug, Clone)]
pub struct MoveOrder {
    order: [Cell; Cell::NUM],
}

/// 中心からのマンハッタン距離の2倍（整数で扱うため）
#[inline]
pub fn center_distance2(cell: Cell) -> u8 {
    let (x, y, z) = cell.coords();
    let d = |v: u8| (2 * v as i8 - 3).unsigned_abs();
    d(x) + d(y) + d(z)
}

impl MoveOrder {
    /// 順序表を構築する
    pub fn generate() -> Self {
        let mut cells: Vec<Cell> = Cell::all().collect();
        // sort_by_key は安定ソートなので同距離はインデックス順のまま
        cells.sort_by_key(|&c| center_distance2(c));

        let mut order = [Cell::from_index_unchecked(0); Cell::NUM];
        order.copy_from_slice(&cells);
        Self { order }
    }

    /// 全64マスの順序
    #[inline]
    pub fn cells(&self) -> &[Cell; Cell::NUM] {
        &self.order
    }

    /// 空きマスを順序表の順に返す
    pub fn available_moves(&self, p1: Bitboard, p2: Bitboard) -> MoveList {
        let occupied = p1 | p2;
        let mut list = MoveList::new();
        for &cell in &self.order {
            if !occupied.contains(cell) {
                list.push(cell);
            }
        }
        list
    }

    /// `available_moves` の局面版
    #[inline]
    pub fn moves(&self, pos: &Position) -> MoveList {
        self.available_moves(pos.p1(), pos.p2())
    }
}

impl Default for MoveOrder {
    fn default() -> Self {
        Self::generate()
    }
}
