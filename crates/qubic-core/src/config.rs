//! 探索設定

use crate::error::SearchError;

/// 指定できる最大探索深さ
pub const MAX_DEPTH: u8 = 20;

/// 探索設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// 反復深化の最大深さ（1..=MAX_DEPTH）
    pub max_depth: u8,
    /// 要求に持ち時間が無いときの既定値（ミリ秒）
    pub default_time_limit_ms: u64,
    /// 置換表のエントリ数の目安
    pub tt_capacity: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 10,
            default_time_limit_ms: 3000,
            tt_capacity: 1 << 16,
        }
    }
}

impl SearchConfig {
    /// 設定値の範囲を検査する
    pub fn validate(&self) -> Result<(), SearchError> {
        validate_depth(self.max_depth)
    }
}

/// 探索深さが 1..=MAX_DEPTH に収まっているか
pub fn validate_depth(depth: u8) -> Result<(), SearchError> {
    if (1..=MAX_DEPTH).contains(&depth) {
        Ok(())
    } else {
        Err(SearchError::InvalidDepth {
            depth,
            max: MAX_DEPTH,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SearchConfig::default();
        assert_eq!(config.max_depth, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_depth_bounds() {
        assert!(validate_depth(1).is_ok());
        assert!(validate_depth(MAX_DEPTH).is_ok());
        assert_eq!(validate_depth(0), Err(SearchError::InvalidDepth { depth: 0, max: MAX_DEPTH }));
        assert!(validate_depth(MAX_DEPTH + 1).is_err());
    }
}
