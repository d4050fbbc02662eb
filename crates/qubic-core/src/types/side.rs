//! 手番（Side）

/// 手番（先手 = P1 / 後手 = P2）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Side {
    P1 = 0,
    P2 = 1,
}

impl Side {
    /// 手番の数
    pub const NUM: usize = 2;

    /// `true` なら P1
    #[inline]
    pub const fn from_is_p1(is_p1: bool) -> Side {
        if is_p1 { Side::P1 } else { Side::P2 }
    }

    /// 相手番を返す
    #[inline]
    pub const fn opponent(self) -> Side {
        match self {
            Side::P1 => Side::P2,
            Side::P2 => Side::P1,
        }
    }

    /// インデックスとして使用（配列アクセス用）
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl std::ops::Not for Side {
    type Output = Side;

    #[inline]
    fn not(self) -> Side {
        self.opponent()
    }
}
