//! エラー型
//!
//! 呼び出し側の契約違反（不正なマスク、範囲外のマス、不正な深さ）だけをエラーとして扱う。
//! 合法手なし・時間切れはエラーではなく、探索結果として返す。

use thiserror::Error;

use crate::types::Cell;

/// 局面・指し手の入力エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    /// 両手番のマスクが同じマスを占有している
    #[error("player masks overlap on cells {0:#018x}")]
    Overlap(u64),

    /// マスのインデックスが 0..64 を外れている
    #[error("cell index {0} is out of range (expected 0..64)")]
    CellOutOfRange(u8),

    /// 既に埋まっているマスへの着手
    #[error("cell {0} is already occupied")]
    CellOccupied(Cell),
}

/// 探索エントリポイントの入力エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// 探索深さが範囲外
    #[error("search depth {depth} is out of range (expected 1..={max})")]
    InvalidDepth { depth: u8, max: u8 },

    #[error(transparent)]
    Position(#[from] PositionError),
}
