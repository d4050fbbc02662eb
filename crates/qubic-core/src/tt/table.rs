//! TranspositionTable本体
//!
//! - probe/store操作
//! - 前回反復の最善応手の参照（手の順序付け用）

use std::collections::HashMap;

use crate::position::Position;
use crate::types::{Bound, Cell, Side, Value};

/// 置換表のキー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TTKey {
    p1: u64,
    p2: u64,
    depth: u8,
    side: Side,
}

impl TTKey {
    #[inline]
    pub fn new(pos: &Position, side: Side, depth: u8) -> Self {
        Self {
            p1: pos.p1().bits(),
            p2: pos.p2().bits(),
            depth,
            side,
        }
    }

    /// 同じ局面・手番で深さだけ違うキー
    #[inline]
    fn with_depth(self, depth: u8) -> Self {
        Self { depth, ..self }
    }
}

/// 置換表エントリ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    /// 探索結果（手番側から見た値）
    pub value: Value,
    /// `value` が正確な値か、上界/下界か
    pub bound: Bound,
    /// このノードで最善だった応手
    pub best_move: Option<Cell>,
}

/// 置換表
///
/// 1回の探索セッションに属し、同じスレッドからのみ読み書きされる。
#[derive(Debug, Default)]
pub struct TranspositionTable {
    entries: HashMap<TTKey, TTEntry>,
}

impl TranspositionTable {
    /// 空の置換表を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// エントリ数の目安を指定して作成
    pub fn with_capacity(entries: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(entries),
        }
    }

    /// 置換表を検索
    #[inline]
    pub fn probe(&self, key: &TTKey) -> Option<TTEntry> {
        self.entries.get(key).copied()
    }

    /// 探索結果を保存（同じキーは上書き）
    ///
    /// 時間切れで打ち切られた探索の値は正確でないので、呼び出し側で保存しないこと。
    #[inline]
    pub fn store(&mut self, key: TTKey, entry: TTEntry) {
        self.entries.insert(key, entry);
    }

    /// 手の順序付けに使う最善応手
    ///
    /// 同じ深さのエントリを優先し、無ければ1つ浅い深さ（前回の反復）を見る。
    pub fn best_move_hint(&self, key: &TTKey) -> Option<Cell> {
        self.probe(key)
            .and_then(|e| e.best_move)
            .or_else(|| {
                let shallower = key.depth.checked_sub(1)?;
                self.probe(&key.with_depth(shallower))?.best_move
            })
    }

    /// クリア
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// 格納済みエントリ数
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(v: i32, bound: Bound, mv: u8) -> TTEntry {
        TTEntry {
            value: Value::new(v),
            bound,
            best_move: Cell::new(mv),
        }
    }

    #[test]
    fn test_probe_store() {
        let mut tt = TranspositionTable::new();
        let pos = Position::new(0b1, 0b10).unwrap();
        let key = TTKey::new(&pos, Side::P1, 3);
        assert_eq!(tt.probe(&key), None);

        tt.store(key, entry(42, Bound::Exact, 5));
        assert_eq!(tt.probe(&key), Some(entry(42, Bound::Exact, 5)));
        assert_eq!(tt.len(), 1);
    }

    #[test]
    fn test_key_distinguishes_depth_and_side() {
        let mut tt = TranspositionTable::new();
        let pos = Position::new(0b1, 0b10).unwrap();
        tt.store(TTKey::new(&pos, Side::P1, 3), entry(1, Bound::Exact, 5));

        assert_eq!(tt.probe(&TTKey::new(&pos, Side::P1, 2)), None);
        assert_eq!(tt.probe(&TTKey::new(&pos, Side::P2, 3)), None);
        let swapped = Position::new(0b10, 0b1).unwrap();
        assert_eq!(tt.probe(&TTKey::new(&swapped, Side::P1, 3)), None);
    }

    #[test]
    fn test_best_move_hint_falls_back_to_shallower_depth() {
        let mut tt = TranspositionTable::new();
        let pos = Position::EMPTY;
        tt.store(TTKey::new(&pos, Side::P1, 2), entry(0, Bound::Lower, 21));

        assert_eq!(tt.best_move_hint(&TTKey::new(&pos, Side::P1, 3)), Cell::new(21));
        assert_eq!(tt.best_move_hint(&TTKey::new(&pos, Side::P1, 2)), Cell::new(21));
        assert_eq!(tt.best_move_hint(&TTKey::new(&pos, Side::P1, 1)), None);
        assert_eq!(tt.best_move_hint(&TTKey::new(&pos, Side::P1, 0)), None);
    }

    #[test]
    fn test_clear() {
        let mut tt = TranspositionTable::with_capacity(16);
        tt.store(TTKey::new(&Position::EMPTY, Side::P2, 1), entry(0, Bound::Upper, 0));
        assert!(!tt.is_empty());
        tt.clear();
        assert!(tt.is_empty());
    }
}
