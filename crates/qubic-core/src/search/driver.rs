//! 探索ドライバ
//!
//! - `search_depth`: 1深さ分のルート探索（締切付き、打ち切りを報告）
//! - `think`: 反復深化。深さ1から順に `search_depth` を呼び、完了した深さの結果だけを採用する
//!
//! 外部のオーケストレータが反復深化を自前で回す場合は `search_depth` を直接使う。
//! どちらも締切・打ち切りの扱いは同じ。

use crate::config::{SearchConfig, validate_depth};
use crate::error::SearchError;
use crate::position::Position;
use crate::tables::Tables;
use crate::time::TimeControl;
use crate::tt::TranspositionTable;
use crate::types::{Side, Value};

use super::alpha_beta::SearchContext;
use super::{BestMove, DepthResult, ScoreResult, SearchLimits, SearchOutcome, SearchProgress, SearchStats};

/// 探索器
///
/// 置換表を所有し、同じ対局の中で探索をまたいで再利用する。
/// 新しい対局では `clear_tt` を呼ぶこと。
#[derive(Debug)]
pub struct Searcher {
    config: SearchConfig,
    tables: &'static Tables,
    tt: TranspositionTable,
    use_tt: bool,
}

impl Searcher {
    /// 設定を検査して探索器を作る
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            config,
            tables: Tables::shared(),
            tt: TranspositionTable::with_capacity(config.tt_capacity),
            use_tt: true,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[inline]
    pub(super) fn tables(&self) -> &'static Tables {
        self.tables
    }

    /// 置換表
    #[inline]
    pub fn tt(&self) -> &TranspositionTable {
        &self.tt
    }

    #[inline]
    pub(super) fn tt_mut(&mut self) -> &mut TranspositionTable {
        &mut self.tt
    }

    #[inline]
    pub(super) fn use_tt(&self) -> bool {
        self.use_tt
    }

    /// 置換表の使用を切り替える（結果は変わらず、速度だけが変わる）
    pub fn set_use_tt(&mut self, enabled: bool) {
        self.use_tt = enabled;
    }

    /// 置換表をクリア
    pub fn clear_tt(&mut self) {
        log::debug!("clearing transposition table ({} entries)", self.tt.len());
        self.tt.clear();
    }

    /// `side` から見た `pos` の評価値を全窓で求める
    pub fn search_score(
        &mut self,
        pos: &Position,
        side: Side,
        depth: u8,
        time: &TimeControl,
    ) -> ScoreResult {
        let mut ctx = SearchContext::new(time);
        let value = self.alpha_beta(&mut ctx, *pos, side, depth, -Value::INFINITE, Value::INFINITE);
        ScoreResult {
            value,
            aborted: ctx.aborted,
            stats: ctx.stats,
        }
    }

    /// 深さ `depth` のルート探索
    ///
    /// ルートの手は着手順序表の順に調べ、評価値が真に上回ったときだけ最善手を更新する
    /// （同点なら先に調べた手）。勝ちが見つかった時点で残りの手は調べない。
    /// `aborted` が立っている結果は不完全なので採用しないこと。
    pub fn search_depth(
        &mut self,
        pos: &Position,
        side: Side,
        depth: u8,
        time: &TimeControl,
    ) -> Result<DepthResult, SearchError> {
        validate_depth(depth)?;

        let mut ctx = SearchContext::new(time);
        let mut best: Option<BestMove> = None;
        let mut alpha = -Value::INFINITE;

        let moves = self.tables.move_order.moves(pos);
        for cell in moves.iter() {
            ctx.stats.root_moves += 1;
            let child = pos.play(cell, side);
            let score = -self.alpha_beta(&mut ctx, child, !side, depth - 1, -Value::INFINITE, -alpha);
            if ctx.aborted {
                break;
            }

            if best.is_none_or(|b| score > b.score) {
                best = Some(BestMove { cell, score, depth });
                alpha = score;
            }
            if score.is_win() {
                break;
            }
        }

        Ok(DepthResult {
            best,
            aborted: ctx.aborted,
            stats: ctx.stats,
        })
    }

    /// 反復深化で最善手を探す
    ///
    /// 合法手が無ければ `best == None`。時間切れ・停止要求のときは最後に完了した深さの手を返す。
    /// 深さ1は時計を見ないので必ず完了する。`on_progress` は深さが完了するたびに呼ばれる。
    pub fn think<F>(
        &mut self,
        pos: &Position,
        side: Side,
        limits: &SearchLimits,
        mut on_progress: F,
    ) -> Result<SearchOutcome, SearchError>
    where
        F: FnMut(&SearchProgress),
    {
        let max_depth = limits.max_depth.unwrap_or(self.config.max_depth);
        validate_depth(max_depth)?;

        let time = TimeControl::new(limits.time_limit).with_stop(limits.stop.clone());
        let mut stats = SearchStats::default();

        let Some(first) = self.tables.move_order.moves(pos).first() else {
            log::debug!("no legal moves; board is full");
            return Ok(SearchOutcome {
                best: None,
                completed_depth: 0,
                aborted: false,
                elapsed: time.elapsed(),
                stats,
            });
        };

        // 深さ1も完了しなかった場合の仮の手
        let mut best = BestMove {
            cell: first,
            score: Value::ZERO,
            depth: 0,
        };
        let mut completed_depth = 0;
        let mut aborted = false;

        for depth in 1..=max_depth {
            if depth >= 2 && time.is_time_up() {
                aborted = true;
                break;
            }

            let result = self.search_depth(pos, side, depth, &time)?;
            stats.merge(&result.stats);

            #[cfg(feature = "search-stats")]
            log::trace!(
                "depth {depth}: nodes={} root_moves={} tt_probes={} tt_hit_rate={:.1}% tt_cutoffs={} tt_stores={} tt_len={}",
                result.stats.nodes,
                result.stats.root_moves,
                result.stats.tt_probes,
                result.stats.tt_hit_rate(),
                result.stats.tt_cutoffs,
                result.stats.tt_stores,
                self.tt.len(),
            );

            if result.aborted {
                log::debug!("depth {depth} aborted after {} ms; keeping depth {completed_depth}", time.elapsed().as_millis());
                aborted = true;
                break;
            }
            let Some(found) = result.best else {
                break;
            };

            best = found;
            completed_depth = depth;
            log::debug!(
                "depth {depth} done: best={} score={} nodes={} time={}ms",
                found.cell,
                found.score,
                stats.nodes,
                time.elapsed().as_millis()
            );
            on_progress(&SearchProgress {
                depth,
                score: found.score,
                best: found.cell,
                nodes: stats.nodes,
                elapsed: time.elapsed(),
            });

            if found.score.is_win() {
                break;
            }
        }

        Ok(SearchOutcome {
            best: Some(best),
            completed_depth,
            aborted,
            elapsed: time.elapsed(),
            stats,
        })
    }
}
