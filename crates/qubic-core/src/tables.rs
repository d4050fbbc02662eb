//! 事前計算テーブル
//!
//! 勝ちラインと着手順序はプロセス中で不変なので、一度だけ構築して参照で受け渡す。
//! 探索・評価の各関数は `&WinningLines` / `&MoveOrder` を引数に取り、
//! グローバルを暗黙に参照しない。

use std::sync::LazyLock;

use crate::lines::WinningLines;
use crate::movegen::MoveOrder;

/// 探索が参照する不変テーブル一式
#[derive(Debug, Clone)]
pub struct Tables {
    pub lines: WinningLines,
    pub move_order: MoveOrder,
}

static SHARED: LazyLock<Tables> = LazyLock::new(Tables::new);

impl Tables {
    /// テーブルを構築する
    pub fn new() -> Self {
        Self {
            lines: WinningLines::generate(),
            move_order: MoveOrder::generate(),
        }
    }

    /// プロセス共有のテーブル（初回アクセス時に構築）
    pub fn shared() -> &'static Tables {
        &SHARED
    }
}

impl Default for Tables {
    fn default() -> Self {
        Self::new()
    }
}
