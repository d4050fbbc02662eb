//! 基本型
//!
//! - `Cell`: マス（0..64）と座標変換
//! - `Side`: 手番
//! - `Bitboard`: 片方の手番の占有マス
//! - `Value`: 評価値（確定勝敗の帯域を含む）
//! - `Bound`: 置換表の境界値種別

mod bitboard;
mod bound;
mod cell;
mod side;
mod value;

pub use bitboard::{Bitboard, BitboardIter};
pub use bound::Bound;
pub use cell::Cell;
pub use side::Side;
pub use value::Value;
