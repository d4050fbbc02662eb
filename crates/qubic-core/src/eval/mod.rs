//! 静的評価と勝ち判定
//!
//! - `evaluate`: 76本のラインを走査するヒューリスティック評価
//! - `check_win`: テーブル走査による勝ち判定
//! - `has_line`: ビット並列の勝ち判定（探索のホットパス用、`check_win` と等価）

use crate::lines::WinningLines;
use crate::types::{Bitboard, Value};

/// 相手の石が無いラインに自分の石が n 個あるときの点数
///
/// 段ごとに2桁離して、近い脅威の完成/阻止が位置的な利得より常に優先されるようにする。
/// 76本すべてが3個でも 760,000 で、`Value::WIN` には届かない。
const LINE_SCORE: [i32; 4] = [0, 1, 100, 10_000];

/// `me` から見た局面評価
///
/// どちらかがラインを完成させていれば `±Value::WIN` を返す。
/// それ以外は、相手の石が混じっていないラインごとに石数に応じた点数を足し引きする。
/// `evaluate(lines, a, b) == -evaluate(lines, b, a)`。
pub fn evaluate(lines: &WinningLines, me: Bitboard, opp: Bitboard) -> Value {
    let mut score = 0i32;
    for &line in lines.iter() {
        let mine = (me & line).count() as usize;
        let theirs = (opp & line).count() as usize;

        if mine == 4 {
            return Value::WIN;
        }
        if theirs == 4 {
            return -Value::WIN;
        }

        // 両者の石が混じったラインはもう誰も完成できない
        if theirs == 0 {
            score += LINE_SCORE[mine];
        } else if mine == 0 {
            score -= LINE_SCORE[theirs];
        }
    }
    Value::new(score)
}

/// `mask` がいずれかの勝ちラインを完全に含むか（テーブル走査）
#[inline]
pub fn check_win(lines: &WinningLines, mask: Bitboard) -> bool {
    lines.any_complete(mask)
}

/// y方向の各層（16bit、bit = z*4 + x）に分けたマスク
#[inline(always)]
fn planes(mask: Bitboard) -> [u16; 4] {
    let bits = mask.bits();
    [bits as u16, (bits >> 16) as u16, (bits >> 32) as u16, (bits >> 48) as u16]
}

/// 1層（XZ平面）内の行・列・対角線 10本の判定
#[inline(always)]
fn plane_has_line(m: u16) -> bool {
    // x方向の行: bit z*4 から4連続
    let t = m & (m >> 1);
    if t & (t >> 2) & 0x1111 != 0 {
        return true;
    }
    // z方向の列: bit x, x+4, x+8, x+12
    let t = m & (m >> 4);
    if t & (t >> 8) & 0x000F != 0 {
        return true;
    }
    // 対角線 (i, i) と (3-i, i)
    let t = m & (m >> 5);
    if t & (t >> 10) & 0x0001 != 0 {
        return true;
    }
    let t = m & (m >> 3);
    t & (t >> 6) & 0x0008 != 0
}

/// 層をまたぐライン（柱・XY/YZ平面の対角線・空間対角線、計36本）
///
/// 層 k のビットを `k * step` だけ右にずらして4層の AND を取ると、
/// 層ごとに一定量ずれていくラインの始点 bit が残る。`anchor` は始点になり得る bit。
const CROSS_PLANE: [(i32, u16); 9] = [
    (0, 0xFFFF),  // 柱 (x, i, z)
    (1, 0x1111),  // (i, i, z)
    (-1, 0x8888), // (3-i, i, z)
    (4, 0x000F),  // (x, i, i)
    (-4, 0xF000), // (x, i, 3-i)
    (5, 0x0001),  // (i, i, i)
    (3, 0x0008),  // (3-i, i, i)
    (-3, 0x1000), // (i, i, 3-i)
    (-5, 0x8000), // (3-i, i, 3-i)
];

#[inline(always)]
fn shift(p: u16, by: i32) -> u16 {
    if by >= 0 { p >> by } else { p << -by }
}

/// `mask` がいずれかの勝ちラインを完全に含むか（ビット並列版）
///
/// テーブルを参照しない分 `check_win` より速い。結果は常に一致する。
#[inline]
pub fn has_line(mask: Bitboard) -> bool {
    if mask.count() < 4 {
        return false;
    }
    let p = planes(mask);
    if p.iter().any(|&m| plane_has_line(m)) {
        return true;
    }
    CROSS_PLANE.iter().any(|&(step, anchor)| {
        let acc = p
            .iter()
            .enumerate()
            .fold(0xFFFFu16, |acc, (k, &m)| acc & shift(m, step * k as i32));
        acc & anchor != 0
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;
    use proptest::prelude::*;

    fn lines() -> WinningLines {
        WinningLines::generate()
    }

    fn bb(cells: &[(u8, u8, u8)]) -> Bitboard {
        cells
            .iter()
            .fold(Bitboard::EMPTY, |acc, &(x, y, z)| acc.with(Cell::from_coords(x, y, z).unwrap()))
    }

    #[test]
    fn test_evaluate_empty_is_zero() {
        assert_eq!(evaluate(&lines(), Bitboard::EMPTY, Bitboard::EMPTY), Value::ZERO);
    }

    #[test]
    fn test_evaluate_single_stone_counts_lines() {
        let l = lines();
        // 中心寄りのマスは7本、辺のマスは4本のラインに乗る
        assert_eq!(evaluate(&l, bb(&[(1, 1, 1)]), Bitboard::EMPTY), Value::new(7));
        assert_eq!(evaluate(&l, bb(&[(1, 0, 0)]), Bitboard::EMPTY), Value::new(4));
        assert_eq!(evaluate(&l, Bitboard::EMPTY, bb(&[(1, 1, 1)])), Value::new(-7));
    }

    #[test]
    fn test_evaluate_tiers() {
        let l = lines();
        // (0,3,0) 起点の x 行に3個。同じ行の3マスがそれぞれ他のラインにも1個ずつ寄与する
        let three = bb(&[(0, 3, 0), (1, 3, 0), (2, 3, 0)]);
        let score = evaluate(&l, three, Bitboard::EMPTY);
        assert!(score.raw() >= 10_000 && score.raw() < 11_000, "got {score}");

        // 相手が同じ行に1個置くと3個の行は死ぬ
        let blocked = evaluate(&l, three, bb(&[(3, 3, 0)]));
        assert!(blocked.raw() < 1_000, "got {blocked}");
    }

    #[test]
    fn test_evaluate_win_short_circuits() {
        let l = lines();
        let row = bb(&[(0, 0, 0), (1, 0, 0), (2, 0, 0), (3, 0, 0)]);
        assert_eq!(evaluate(&l, row, Bitboard::EMPTY), Value::WIN);
        assert_eq!(evaluate(&l, Bitboard::EMPTY, row), -Value::WIN);
    }

    #[test]
    fn test_check_win_and_has_line_on_every_line() {
        let l = lines();
        assert!(!check_win(&l, Bitboard::EMPTY));
        assert!(!has_line(Bitboard::EMPTY));
        for &line in l.iter() {
            assert!(check_win(&l, line));
            assert!(has_line(line), "bit-parallel check missed line {:#x}", line.bits());
            // 1マス欠けたら不成立
            for cell in line.iter() {
                let partial = Bitboard::new(line.bits() & !cell.bit());
                assert!(!check_win(&l, partial));
                assert!(!has_line(partial));
            }
        }
        assert!(has_line(Bitboard::ALL));
    }

    #[test]
    fn test_heuristic_bounded_below_win() {
        // 理論上の最大値 76 * 10,000 でも WIN 未満
        assert!(76 * LINE_SCORE[3] < Value::WIN.raw());
    }

    fn disjoint_masks() -> impl Strategy<Value = (Bitboard, Bitboard)> {
        (any::<u64>(), any::<u64>()).prop_map(|(a, split)| {
            (Bitboard::new(a & split), Bitboard::new(a & !split))
        })
    }

    /// 各6マス前後。完成ラインが無いケースが多く、ライン点の合計まで届く
    fn sparse_disjoint_masks() -> impl Strategy<Value = (Bitboard, Bitboard)> {
        (any::<u64>(), any::<u64>(), any::<u64>()).prop_map(|(a, b, split)| {
            let stones = a & b & (a.rotate_left(17) | b.rotate_right(29));
            (Bitboard::new(stones & split), Bitboard::new(stones & !split))
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 512, .. ProptestConfig::default() })]

        #[test]
        fn prop_evaluate_is_zero_sum((a, b) in disjoint_masks()) {
            let l = lines();
            prop_assert_eq!(evaluate(&l, a, b), -evaluate(&l, b, a));
        }

        #[test]
        fn prop_sparse_evaluate_is_zero_sum((a, b) in sparse_disjoint_masks()) {
            let l = lines();
            prop_assert_eq!(evaluate(&l, a, b), -evaluate(&l, b, a));
        }

        #[test]
        fn prop_has_line_matches_table(mask in any::<u64>()) {
            let l = lines();
            let mask = Bitboard::new(mask);
            prop_assert_eq!(has_line(mask), check_win(&l, mask));
        }

        #[test]
        fn prop_sparse_has_line_matches_table(a in any::<u64>(), b in any::<u64>()) {
            // ランダムな u64 はほぼ必ずラインを含むので、疎なマスクも検査する
            let l = lines();
            let mask = Bitboard::new(a & b);
            prop_assert_eq!(has_line(mask), check_win(&l, mask));
        }
    }
}
