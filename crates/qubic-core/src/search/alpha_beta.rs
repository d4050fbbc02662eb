//! αβ探索（negamax, fail-soft）

use crate::eval::{evaluate, has_line};
use crate::position::Position;
use crate::time::TimeControl;
use crate::tt::{TTEntry, TTKey};
use crate::types::{Bound, Cell, Side, Value};

use super::driver::Searcher;
use super::stats::SearchStats;

/// 1回の探索呼び出しの間だけ生きる状態
pub(super) struct SearchContext<'a> {
    time: &'a TimeControl,
    poll_count: u64,
    /// 時間切れ・停止要求を検出したら立つ。以降の値はすべて捨てる
    pub(super) aborted: bool,
    pub(super) stats: SearchStats,
}

impl<'a> SearchContext<'a> {
    pub(super) fn new(time: &'a TimeControl) -> Self {
        Self {
            time,
            poll_count: 0,
            aborted: false,
            stats: SearchStats::default(),
        }
    }

    /// 内部ノードの入口で呼ぶ。`poll_mask + 1` 回に1回だけ時計を読む
    #[inline]
    fn check_abort(&mut self) -> bool {
        if self.aborted {
            return true;
        }
        self.poll_count += 1;
        if self.poll_count & self.time.poll_mask() == 0 && self.time.is_time_up() {
            self.aborted = true;
        }
        self.aborted
    }
}

impl Searcher {
    /// `side` から見た `pos` の評価値（残り深さ `depth`、窓 `(alpha, beta)`）
    ///
    /// 打ち切られた場合は 0 を返し `ctx.aborted` を立てる。この値は使わないこと。
    pub(super) fn alpha_beta(
        &mut self,
        ctx: &mut SearchContext<'_>,
        pos: Position,
        side: Side,
        depth: u8,
        mut alpha: Value,
        mut beta: Value,
    ) -> Value {
        ctx.stats.nodes += 1;

        let me = pos.mask(side);
        let opp = pos.mask(!side);

        // 既に決着している局面は深さに関係なく確定値
        if has_line(me) {
            return Value::win_in(depth);
        }
        if has_line(opp) {
            return Value::lost_in(depth);
        }

        if depth == 0 {
            return evaluate(&self.tables().lines, me, opp);
        }

        // 葉（depth 0）では時計を見ない
        if ctx.check_abort() {
            return Value::ZERO;
        }

        let mut moves = self.tables().move_order.moves(&pos);
        if moves.is_empty() {
            return Value::DRAW;
        }

        let key = TTKey::new(&pos, side, depth);
        if self.use_tt() {
            ctx.stats.tt_probes += 1;
            if let Some(entry) = self.tt().probe(&key) {
                ctx.stats.tt_hits += 1;
                match entry.bound {
                    Bound::Exact => {
                        ctx.stats.tt_cutoffs += 1;
                        return entry.value;
                    }
                    Bound::Lower => alpha = alpha.max(entry.value),
                    Bound::Upper => beta = beta.min(entry.value),
                    Bound::None => {}
                }
                if alpha >= beta {
                    ctx.stats.tt_cutoffs += 1;
                    return entry.value;
                }
            }
            if let Some(hint) = self.tt().best_move_hint(&key) {
                moves.move_to_front(hint);
            }
        }

        // 置換表で狭めた後の窓を基準に境界を判定する
        let (window_alpha, window_beta) = (alpha, beta);
        let mut best_value = -Value::INFINITE;
        let mut best_move: Option<Cell> = None;

        for cell in moves.iter() {
            let child = pos.play(cell, side);
            let value = -self.alpha_beta(ctx, child, !side, depth - 1, -beta, -alpha);
            if ctx.aborted {
                return Value::ZERO;
            }

            if value > best_value {
                best_value = value;
                best_move = Some(cell);
            }
            if best_value > alpha {
                alpha = best_value;
            }
            if alpha >= beta {
                break;
            }
        }

        if self.use_tt() {
            let bound = Bound::classify(best_value, window_alpha, window_beta);
            self.tt_mut().store(
                key,
                TTEntry {
                    value: best_value,
                    bound,
                    best_move,
                },
            );
            ctx.stats.tt_stores += 1;
        }

        best_value
    }
}
