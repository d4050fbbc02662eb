//! 勝ちラインテーブル
//!
//! 4×4×4 の立方体上で一直線に並ぶ4マスの組（76本）を生成する。
//!
//! | 種類 | 本数 |
//! |------|------|
//! | x方向の行 | 16 |
//! | z方向の列 | 16 |
//! | y方向の柱 | 16 |
//! | XZ平面の対角線（y固定） | 8 |
//! | XY平面の対角線（z固定） | 8 |
//! | YZ平面の対角線（x固定） | 8 |
//! | 空間対角線 | 4 |
//!
//! テーブルは一度だけ構築し、以後は参照のみ。

use crate::types::{Bitboard, Cell};

/// 勝ちラインの本数
pub const NUM_LINES: usize = 76;

/// 勝ちライン76本と、各マスを通るラインの索引
#[derive(Debug, Clone)]
pub struct WinningLines {
    masks: [Bitboard; NUM_LINES],
    /// `through[cell]` の bit i が立っていれば、ライン i が cell を通る
    through: [u128; Cell::NUM],
}

type Vec3 = (i8, i8, i8);

/// `start` から `step` 方向に4マス進んだラインのマスク
fn line_mask(start: Vec3, step: Vec3) -> Bitboard {
    let mut bb = Bitboard::EMPTY;
    for i in 0..4i8 {
        let (x, y, z) = (start.0 + step.0 * i, start.1 + step.1 * i, start.2 + step.2 * i);
        // 始点と方向はすべて立方体内に収まるように選んでいる
        debug_assert!((0..4).contains(&x) && (0..4).contains(&y) && (0..4).contains(&z));
        bb |= Bitboard::new(1u64 << (y * 16 + z * 4 + x) as u32);
    }
    bb
}

impl WinningLines {
    /// テーブルを構築する
    pub fn generate() -> Self {
        let mut masks = [Bitboard::EMPTY; NUM_LINES];
        let mut n = 0;
        let mut push = |start: Vec3, step: Vec3| {
            masks[n] = line_mask(start, step);
            n += 1;
        };

        // 軸に平行なライン
        for y in 0..4 {
            for z in 0..4 {
                push((0, y, z), (1, 0, 0));
            }
        }
        for y in 0..4 {
            for x in 0..4 {
                push((x, y, 0), (0, 0, 1));
            }
        }
        for x in 0..4 {
            for z in 0..4 {
                push((x, 0, z), (0, 1, 0));
            }
        }

        // 平面対角線
        for y in 0..4 {
            push((0, y, 0), (1, 0, 1));
            push((3, y, 0), (-1, 0, 1));
        }
        for z in 0..4 {
            push((0, 0, z), (1, 1, 0));
            push((0, 3, z), (1, -1, 0));
        }
        for x in 0..4 {
            push((x, 0, 0), (0, 1, 1));
            push((x, 0, 3), (0, 1, -1));
        }

        // 空間対角線
        push((0, 0, 0), (1, 1, 1));
        push((3, 0, 0), (-1, 1, 1));
        push((0, 0, 3), (1, 1, -1));
        push((3, 0, 3), (-1, 1, -1));

        debug_assert_eq!(n, NUM_LINES);

        let mut through = [0u128; Cell::NUM];
        for (i, line) in masks.iter().enumerate() {
            for cell in line.iter() {
                through[cell.index()] |= 1u128 << i;
            }
        }

        Self { masks, through }
    }

    /// 76本すべてのライン
    #[inline]
    pub fn masks(&self) -> &[Bitboard; NUM_LINES] {
        &self.masks
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Bitboard> {
        self.masks.iter()
    }

    /// `cell` を通るラインの番号を昇順に列挙
    pub fn lines_through(&self, cell: Cell) -> impl Iterator<Item = usize> + '_ {
        let mut bits = self.through[cell.index()];
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let i = bits.trailing_zeros() as usize;
            bits &= bits - 1;
            Some(i)
        })
    }

    /// `mask` が完成させているラインがあるか（テーブル走査版）
    #[inline]
    pub fn any_complete(&self, mask: Bitboard) -> bool {
        self.masks.iter().any(|&line| line.is_subset_of(mask))
    }
}

/// プロセス共有の勝ちラインテーブル
pub fn winning_lines() -> &'static WinningLines {
    &crate::tables::Tables::shared().lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_line_count_and_shape() {
        let lines = WinningLines::generate();
        assert_eq!(lines.masks().len(), NUM_LINES);

        let unique: HashSet<u64> = lines.iter().map(|l| l.bits()).collect();
        assert_eq!(unique.len(), NUM_LINES, "duplicate winning lines");

        for line in lines.iter() {
            assert_eq!(line.count(), 4, "line {:#x} does not have 4 cells", line.bits());
        }
    }

    #[test]
    fn test_lines_are_collinear() {
        // 4点の差分ベクトルが一定であることを確認
        let lines = WinningLines::generate();
        for line in lines.iter() {
            let pts: Vec<(i32, i32, i32)> = line
                .iter()
                .map(|c| (c.x() as i32, c.y() as i32, c.z() as i32))
                .collect();
            let mut sorted = pts.clone();
            sorted.sort();
            let d = (sorted[1].0 - sorted[0].0, sorted[1].1 - sorted[0].1, sorted[1].2 - sorted[0].2);
            for w in sorted.windows(2) {
                assert_eq!((w[1].0 - w[0].0, w[1].1 - w[0].1, w[1].2 - w[0].2), d);
            }
        }
    }

    #[test]
    fn test_lines_through_counts() {
        let lines = WinningLines::generate();
        let corner = Cell::from_coords(0, 0, 0).unwrap();
        let center = Cell::from_coords(1, 1, 1).unwrap();
        let edge = Cell::from_coords(1, 0, 0).unwrap();
        let face = Cell::from_coords(1, 1, 0).unwrap();
        assert_eq!(lines.lines_through(corner).count(), 7);
        assert_eq!(lines.lines_through(center).count(), 7);
        assert_eq!(lines.lines_through(edge).count(), 4);
        assert_eq!(lines.lines_through(face).count(), 4);

        // 各ラインは4マスを通るので、合計は 76 * 4
        let total: usize = Cell::all().map(|c| lines.lines_through(c).count()).sum();
        assert_eq!(total, NUM_LINES * 4);
    }

    #[test]
    fn test_shared_table_matches_generated() {
        assert_eq!(winning_lines().masks(), WinningLines::generate().masks());
    }

    #[test]
    fn test_any_complete() {
        let lines = WinningLines::generate();
        assert!(!lines.any_complete(Bitboard::EMPTY));
        for &line in lines.iter() {
            assert!(lines.any_complete(line));
        }
    }
}
