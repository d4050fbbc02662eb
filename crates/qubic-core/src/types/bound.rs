//! 境界値種別（Bound）

use super::Value;

/// 境界値種別（置換表に格納する値の種類）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Bound {
    /// なし
    #[default]
    None = 0,
    /// 上界（fail-low: 真の値はこれ以下）
    Upper = 1,
    /// 下界（fail-high: 真の値はこれ以上）
    Lower = 2,
    /// 正確な値
    Exact = 3,
}

impl Bound {
    /// 探索窓 `(alpha, beta)` に対する結果 `value` の種別を決める
    ///
    /// `alpha` は子ノード展開前の値を渡すこと。
    #[inline]
    pub fn classify(value: Value, alpha: Value, beta: Value) -> Bound {
        if value <= alpha {
            Bound::Upper
        } else if value >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_classify() {
        let alpha = Value::new(-10);
        let beta = Value::new(10);
        assert_eq!(Bound::classify(Value::new(-10), alpha, beta), Bound::Upper);
        assert_eq!(Bound::classify(Value::new(-50), alpha, beta), Bound::Upper);
        assert_eq!(Bound::classify(Value::new(10), alpha, beta), Bound::Lower);
        assert_eq!(Bound::classify(Value::new(3), alpha, beta), Bound::Exact);
    }

    #[test]
    fn test_bound_default() {
        assert_eq!(Bound::default(), Bound::None);
    }
}
