//! 固定長の指し手リスト

use crate::types::Cell;

/// 指し手リスト（最大64手、ヒープ確保なし）
#[derive(Clone, Copy)]
pub struct MoveList {
    cells: [Cell; Cell::NUM],
    len: usize,
}

impl MoveList {
    pub(crate) fn new() -> Self {
        Self {
            cells: [Cell::from_index_unchecked(0); Cell::NUM],
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, cell: Cell) {
        debug_assert!(self.len < Cell::NUM);
        self.cells[self.len] = cell;
        self.len += 1;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Cell] {
        &self.cells[..self.len]
    }

    #[inline]
    pub fn first(&self) -> Option<Cell> {
        self.as_slice().first().copied()
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        self.as_slice().contains(&cell)
    }

    #[inline]
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, Cell>> {
        self.as_slice().iter().copied()
    }

    /// `cell` を先頭に移動する（他の手の相対順序は保つ）
    ///
    /// リストに無ければ何もしない。
    pub fn move_to_front(&mut self, cell: Cell) {
        if let Some(pos) = self.as_slice().iter().position(|&c| c == cell) {
            self.cells[..=pos].rotate_right(1);
        }
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = Cell;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Cell>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
