//! 探索モジュール
//!
//! - `alpha_beta`: 深さ制限付き negamax + αβ枝刈り（置換表、時間切れ検出）
//! - `driver`: 1深さ分のルート探索 `search_depth` と反復深化 `think`
//!
//! 探索は単一スレッドで動く。締切とホストからの停止要求は `TimeControl` で受け取る。

mod alpha_beta;
mod driver;
mod stats;


pub use driver::Searcher;
pub use stats::SearchStats;

use std::time::Duration;

use crate::time::StopHandle;
use crate::types::{Cell, Value};

/// 探索の制限
#[derive(Debug, Clone, Default)]
pub struct SearchLimits {
    /// 最大深さ（`None` なら設定値）
    pub max_depth: Option<u8>,
    /// 持ち時間（`None` なら無制限）
    pub time_limit: Option<Duration>,
    /// ホストからの停止要求
    pub stop: Option<StopHandle>,
}

impl SearchLimits {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn max_depth(mut self, depth: u8) -> Self {
        self.max_depth = Some(depth);
        self
    }

    #[must_use]
    pub fn time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    #[must_use]
    pub fn time_limit_ms(self, ms: u64) -> Self {
        self.time_limit(Duration::from_millis(ms))
    }

    #[must_use]
    pub fn stop_handle(mut self, stop: StopHandle) -> Self {
        self.stop = Some(stop);
        self
    }
}

/// 最善手とその評価
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestMove {
    pub cell: Cell,
    /// 手番側から見た評価値
    pub score: Value,
    /// この手が確定した深さ（0 は探索前の仮の手）
    pub depth: u8,
}

/// 1深さ分のルート探索の結果
#[derive(Debug, Clone, Copy)]
pub struct DepthResult {
    /// 合法手が無ければ `None`。打ち切られた場合の値は使わないこと
    pub best: Option<BestMove>,
    /// 締切・停止要求で打ち切られたか
    pub aborted: bool,
    pub stats: SearchStats,
}

/// 1ノードからの探索結果（`Searcher::search_score`）
#[derive(Debug, Clone, Copy)]
pub struct ScoreResult {
    pub value: Value,
    pub aborted: bool,
    pub stats: SearchStats,
}

/// 反復深化の最終結果
#[derive(Debug, Clone, Copy)]
pub struct SearchOutcome {
    /// 最後に完了した深さの最善手。合法手が無ければ `None`
    pub best: Option<BestMove>,
    /// 完了した最大の深さ（0 なら仮の手のまま）
    pub completed_depth: u8,
    /// 締切・停止要求で終了したか
    pub aborted: bool,
    pub elapsed: Duration,
    pub stats: SearchStats,
}

impl SearchOutcome {
    /// 最善手の評価値（手が無ければ 0）
    pub fn score(&self) -> Value {
        self.best.map_or(Value::ZERO, |b| b.score)
    }
}

/// 深さ1つ分の探索が完了するたびに通知される進捗
#[derive(Debug, Clone, Copy)]
pub struct SearchProgress {
    pub depth: u8,
    pub score: Value,
    pub best: Cell,
    pub nodes: u64,
    pub elapsed: Duration,
}
