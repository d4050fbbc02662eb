//! 評価値（Value）
//!
//! 勝ち/負けが確定した局面は `±(WIN + 残り深さ)` の帯域で表し、
//! 静的評価の最大値（76ライン × 10,000 = 760,000）とは重ならない。

/// 評価値
///
/// 通常の静的評価と、確定勝ち/負けのスコアを同一の整数スケールで扱う。
/// 残り深さが大きいほど早い勝ちなので、`win_in` は深さを加算する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Value(i32);

impl Value {
    /// ゼロ
    pub const ZERO: Value = Value(0);
    /// 引き分け
    pub const DRAW: Value = Value(0);
    /// 確定勝ちの閾値
    pub const WIN: Value = Value(1_000_000);
    /// 無限大（探索窓の初期値）。深さバイアスを含むどの勝ちスコアよりも大きい
    pub const INFINITE: Value = Value(1_001_000);

    /// 値から生成
    #[inline]
    pub const fn new(v: i32) -> Value {
        Value(v)
    }

    /// 残り深さ `depth` で確定した勝ち
    #[inline]
    pub const fn win_in(depth: u8) -> Value {
        Value(Self::WIN.0 + depth as i32)
    }

    /// 残り深さ `depth` で確定した負け
    #[inline]
    pub const fn lost_in(depth: u8) -> Value {
        Value(-Self::WIN.0 - depth as i32)
    }

    /// 勝ちスコアかどうか
    #[inline]
    pub const fn is_win(self) -> bool {
        self.0 >= Self::WIN.0
    }

    /// 負けスコアかどうか
    #[inline]
    pub const fn is_loss(self) -> bool {
        self.0 <= -Self::WIN.0
    }

    /// 確定スコア（勝ちまたは負け）かどうか
    #[inline]
    pub const fn is_decisive(self) -> bool {
        self.is_win() || self.is_loss()
    }

    /// 生の値を取得
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }
}

impl std::ops::Neg for Value {
    type Output = Value;

    #[inline]
    fn neg(self) -> Value {
        Value(-self.0)
    }
}

impl std::ops::Add for Value {
    type Output = Value;

    #[inline]
    fn add(self, rhs: Value) -> Value {
        Value(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Value {
    type Output = Value;

    #[inline]
    fn sub(self, rhs: Value) -> Value {
        Value(self.0 - rhs.0)
    }
}

impl std::ops::AddAssign for Value {
    #[inline]
    fn add_assign(&mut self, rhs: Value) {
        self.0 += rhs.0;
    }
}

impl std::ops::SubAssign for Value {
    #[inline]
    fn sub_assign(&mut self, rhs: Value) {
        self.0 -= rhs.0;
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Value {
        Value(v)
    }
}

impl From<Value> for i32 {
    fn from(v: Value) -> i32 {
        v.0
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
