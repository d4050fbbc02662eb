//! 置換表モジュール
//!
//! 探索済みの局面の評価値をキャッシュする置換表（Transposition Table）。
//!
//! - `TTKey`: (p1, p2, 残り深さ, 手番)。深さと手番で正しい値が変わるのでキーに含める
//! - `TTEntry`: 評価値・境界種別・最善応手
//! - `TranspositionTable`: テーブル本体
//!
//! 世代管理や自動的な無効化は行わない。局面の履歴が比較できなくなったら
//! （新しい対局など）呼び出し側が `clear` すること。

mod table;

pub use table::{TTEntry, TTKey, TranspositionTable};
