//! 探索統計
//!
//! ノード数と置換表の利用状況を数える。`search-stats` feature 有効時は
//! 深さごとにトレースログへ出力する。

/// 探索統計カウンタ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// 総ノード数（探索関数の呼び出し回数）
    pub nodes: u64,
    /// ルートで実際に探索した手の数
    pub root_moves: u64,
    /// TTプローブ数
    pub tt_probes: u64,
    /// TTヒット数
    pub tt_hits: u64,
    /// TTカットオフ数（Exact、または窓が閉じたヒット）
    pub tt_cutoffs: u64,
    /// TT書き込み数
    pub tt_stores: u64,
}

impl SearchStats {
    /// 別の統計を加算する
    pub fn merge(&mut self, other: &SearchStats) {
        self.nodes += other.nodes;
        self.root_moves += other.root_moves;
        self.tt_probes += other.tt_probes;
        self.tt_hits += other.tt_hits;
        self.tt_cutoffs += other.tt_cutoffs;
        self.tt_stores += other.tt_stores;
    }

    /// TTヒット率（%）
    pub fn tt_hit_rate(&self) -> f64 {
        if self.tt_probes == 0 {
            0.0
        } else {
            self.tt_hits as f64 * 100.0 / self.tt_probes as f64
        }
    }
}
