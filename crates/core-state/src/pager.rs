//! Pagination cursor over a [`MatchList`].
//!
//! The window is four positions into the list:
//! * `curr`: first item of the visible page.
//! * `next`: first item past the visible page (`None` on the last page).
//! * `prev`: first item of the page before `curr`. On the first page this
//!   is `curr` itself, so paging backward from the first page re-anchors the
//!   highlight on the head instead of failing.
//! * `sel`: highlighted item, always inside `[curr, next)`.
//!
//! All four are `None` exactly when the list is empty.
//!
//! Page extent is decided by a cost walk: starting at `curr`, item costs are
//! accumulated until the running total would exceed the layout budget. In the
//! grid layout each item costs one row height and the budget is
//! `rows * columns * row_height`, giving a fixed item count per page. In the
//! strip layout each item costs its display width capped at the budget, so a
//! single oversized item still fits on a page of its own.
//!
//! Navigation entry points return `true` when anything moved, `false` when
//! the request hit a boundary (a no-op, never an error).

use core_items::ItemId;
use core_match::MatchList;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Column-major grid of `rows` x `columns`.
    Grid {
        rows: u32,
        columns: u32,
        row_height: u32,
    },
    /// Single horizontal row bounded by a width budget.
    Strip { budget: u32 },
}

impl Layout {
    pub fn budget(&self) -> u32 {
        match *self {
            Layout::Grid {
                rows,
                columns,
                row_height,
            } => rows.saturating_mul(columns).saturating_mul(row_height),
            Layout::Strip { budget } => budget,
        }
    }

    fn cost(&self, width: u32) -> u32 {
        match *self {
            Layout::Grid { row_height, .. } => row_height,
            Layout::Strip { budget } => width.min(budget),
        }
    }

    pub fn is_grid(&self) -> bool {
        matches!(self, Layout::Grid { .. })
    }

    /// Rows per column in grid mode, 0 in strip mode.
    pub fn rows(&self) -> u32 {
        match *self {
            Layout::Grid { rows, .. } => rows,
            Layout::Strip { .. } => 0,
        }
    }

    pub fn columns(&self) -> u32 {
        match *self {
            Layout::Grid { columns, .. } => columns,
            Layout::Strip { .. } => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageWindow {
    pub prev: Option<ItemId>,
    pub curr: Option<ItemId>,
    pub next: Option<ItemId>,
    pub sel: Option<ItemId>,
}

/// Display width lookup used by the strip layout's cost walk.
pub type WidthFn<'a> = &'a dyn Fn(ItemId) -> u32;

#[derive(Debug, Clone)]
pub struct Pager {
    layout: Layout,
    window: PageWindow,
}

impl Pager {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            window: PageWindow::default(),
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn window(&self) -> PageWindow {
        self.window
    }

    pub fn sel(&self) -> Option<ItemId> {
        self.window.sel
    }

    /// Items on the visible page, in list order.
    pub fn visible(&self, list: &MatchList) -> Vec<ItemId> {
        let next = self.window.next;
        list.iter_from(self.window.curr)
            .take_while(|&id| Some(id) != next)
            .collect()
    }

    /// Anchor `curr` and `sel` at the list head and recompute. Called after
    /// every match rebuild.
    pub fn reset(&mut self, list: &MatchList, width: WidthFn<'_>) {
        self.window.curr = list.head();
        self.window.sel = list.head();
        self.recompute(list, width);
    }

    /// Swap the layout and start the page at the highlighted item so a resize
    /// keeps the highlight. Falls back to [`Pager::reset`] without one.
    pub fn relayout(&mut self, layout: Layout, list: &MatchList, width: WidthFn<'_>) {
        self.layout = layout;
        match self.window.sel {
            Some(sel) if list.contains(sel) => {
                self.window.curr = Some(sel);
                self.recompute(list, width);
            }
            _ => self.reset(list, width),
        }
    }

    /// Recompute `prev`/`next` around the current `curr`.
    pub fn recompute(&mut self, list: &MatchList, width: WidthFn<'_>) {
        let budget = self.layout.budget();
        let cost = |id: ItemId| self.layout.cost(width(id));

        let mut total = 0u32;
        let mut next = self.window.curr;
        while let Some(id) = next {
            total = total.saturating_add(cost(id));
            if total > budget {
                break;
            }
            next = list.right(id);
        }

        let mut total = 0u32;
        let mut prev = self.window.curr;
        while let Some(left) = prev.and_then(|id| list.left(id)) {
            total = total.saturating_add(cost(left));
            if total > budget {
                break;
            }
            prev = Some(left);
        }

        self.window.next = next;
        self.window.prev = prev;
        trace!(
            target: "state.pager",
            budget,
            curr = ?self.window.curr,
            next = ?self.window.next,
            prev = ?self.window.prev,
            "page_recomputed"
        );
    }

    pub fn page_next(&mut self, list: &MatchList, width: WidthFn<'_>) -> bool {
        let Some(next) = self.window.next else {
            return false;
        };
        self.window.curr = Some(next);
        self.window.sel = Some(next);
        self.recompute(list, width);
        true
    }

    pub fn page_prev(&mut self, list: &MatchList, width: WidthFn<'_>) -> bool {
        let Some(prev) = self.window.prev else {
            return false;
        };
        self.window.curr = Some(prev);
        self.window.sel = Some(prev);
        self.recompute(list, width);
        true
    }

    /// Jump to the first page with the head highlighted.
    pub fn home(&mut self, list: &MatchList, width: WidthFn<'_>) -> bool {
        if list.is_empty() {
            return false;
        }
        self.reset(list, width);
        true
    }

    /// Jump to the last page with the tail highlighted.
    ///
    /// The last page is found by laying out a page backward from the tail and
    /// then sliding forward one item at a time until no `next` remains, so the
    /// final page is as full as the budget allows.
    pub fn end(&mut self, list: &MatchList, width: WidthFn<'_>) -> bool {
        if list.is_empty() {
            return false;
        }
        if self.window.next.is_some() {
            self.window.curr = list.tail();
            self.recompute(list, width);
            self.window.curr = self.window.prev;
            self.recompute(list, width);
            while self.window.next.is_some() {
                let Some(right) = self.window.curr.and_then(|id| list.right(id)) else {
                    break;
                };
                self.window.curr = Some(right);
                self.recompute(list, width);
            }
        }
        self.window.sel = list.tail();
        true
    }

    /// Move the highlight one item toward the head, paging back when it
    /// leaves the visible page.
    pub fn up(&mut self, list: &MatchList, width: WidthFn<'_>) -> bool {
        let Some(left) = self.window.sel.and_then(|id| list.left(id)) else {
            return false;
        };
        self.window.sel = Some(left);
        if list.right(left) == self.window.curr {
            self.window.curr = self.window.prev;
            self.recompute(list, width);
        }
        true
    }

    /// Move the highlight one item toward the tail, paging forward when it
    /// reaches `next`.
    pub fn down(&mut self, list: &MatchList, width: WidthFn<'_>) -> bool {
        let Some(right) = self.window.sel.and_then(|id| list.right(id)) else {
            return false;
        };
        self.window.sel = Some(right);
        if Some(right) == self.window.next {
            self.window.curr = self.window.next;
            self.recompute(list, width);
        }
        true
    }

    /// Move one column left in the grid: `rows` steps toward the head. Refuses
    /// (returns `false`) when any step would run off the list or find a link
    /// whose mirror does not point back.
    pub fn grid_left(&mut self, list: &MatchList, width: WidthFn<'_>) -> bool {
        let Some(mut target) = self.window.sel else {
            return false;
        };
        let mut offscreen = false;
        for _ in 0..self.layout.rows() {
            let Some(left) = list.left(target) else {
                return false;
            };
            if list.right(left) != Some(target) {
                return false;
            }
            if Some(target) == self.window.curr {
                offscreen = true;
            }
            target = left;
        }
        self.window.sel = Some(target);
        if offscreen {
            self.window.curr = self.window.prev;
            self.recompute(list, width);
        }
        true
    }

    /// Move one column right in the grid: `rows` steps toward the tail.
    pub fn grid_right(&mut self, list: &MatchList, width: WidthFn<'_>) -> bool {
        let Some(mut target) = self.window.sel else {
            return false;
        };
        let mut offscreen = false;
        for _ in 0..self.layout.rows() {
            let Some(right) = list.right(target) else {
                return false;
            };
            if list.left(right) != Some(target) {
                return false;
            }
            target = right;
            if Some(target) == self.window.next {
                offscreen = true;
            }
        }
        self.window.sel = Some(target);
        if offscreen {
            self.window.curr = self.window.next;
            self.recompute(list, width);
        }
        true
    }

    /// 1-based rank of the last visible item counted from the head, 0 when
    /// the list is empty.
    pub fn position(&self, list: &MatchList) -> usize {
        let Some(curr) = self.window.curr else {
            return 0;
        };
        let first = list.rank(curr).unwrap_or(0);
        let shown = self.visible(list).len();
        (first + shown).saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn list_of(n: usize) -> MatchList {
        let mut list = MatchList::with_capacity(n);
        for id in 0..n {
            list.push_back(id, 0.0);
        }
        list
    }

    fn grid(rows: u32, columns: u32) -> Layout {
        Layout::Grid {
            rows,
            columns,
            row_height: 1,
        }
    }

    fn unit(_: ItemId) -> u32 {
        1
    }

    #[test]
    fn empty_list_yields_empty_window() {
        let list = MatchList::with_capacity(0);
        let mut p = Pager::new(grid(3, 1));
        p.reset(&list, &unit);
        assert_eq!(p.window(), PageWindow::default());
        assert_eq!(p.position(&list), 0);
        assert!(!p.down(&list, &unit));
        assert!(!p.end(&list, &unit));
        assert!(!p.page_next(&list, &unit));
    }

    #[test]
    fn grid_pages_hold_rows_times_columns() {
        let list = list_of(10);
        let mut p = Pager::new(grid(2, 2));
        p.reset(&list, &unit);
        assert_eq!(p.visible(&list), vec![0, 1, 2, 3]);
        assert_eq!(p.window().next, Some(4));
        // First page: prev anchors on curr.
        assert_eq!(p.window().prev, Some(0));
        assert_eq!(p.position(&list), 4);

        assert!(p.page_next(&list, &unit));
        assert_eq!(p.visible(&list), vec![4, 5, 6, 7]);
        assert_eq!(p.window().prev, Some(0));
        assert_eq!(p.sel(), Some(4));

        assert!(p.page_next(&list, &unit));
        assert_eq!(p.visible(&list), vec![8, 9]);
        assert_eq!(p.window().next, None);
        assert_eq!(p.position(&list), 10);
        assert!(!p.page_next(&list, &unit));

        assert!(p.page_prev(&list, &unit));
        assert_eq!(p.visible(&list), vec![4, 5, 6, 7]);
    }

    #[test]
    fn strip_costs_are_capped_at_budget() {
        let list = list_of(4);
        let widths = [30u32, 5, 5, 5];
        let width = |id: ItemId| widths[id];
        let mut p = Pager::new(Layout::Strip { budget: 10 });
        p.reset(&list, &width);
        // The oversized head still gets a page to itself.
        assert_eq!(p.visible(&list), vec![0]);
        assert!(p.page_next(&list, &width));
        assert_eq!(p.visible(&list), vec![1, 2]);
        assert!(p.page_next(&list, &width));
        assert_eq!(p.visible(&list), vec![3]);
    }

    #[test]
    fn down_and_up_shift_pages_at_edges() {
        let list = list_of(5);
        let mut p = Pager::new(grid(2, 1));
        p.reset(&list, &unit);
        assert!(p.down(&list, &unit));
        assert_eq!(p.sel(), Some(1));
        assert_eq!(p.window().curr, Some(0));
        assert!(p.down(&list, &unit));
        assert_eq!(p.sel(), Some(2));
        assert_eq!(p.visible(&list), vec![2, 3]);
        assert!(p.up(&list, &unit));
        assert_eq!(p.sel(), Some(1));
        assert_eq!(p.visible(&list), vec![0, 1]);
        assert!(p.up(&list, &unit));
        assert!(!p.up(&list, &unit));
    }

    #[test]
    fn relayout_keeps_the_highlight() {
        let list = list_of(10);
        let mut p = Pager::new(grid(2, 2));
        p.reset(&list, &unit);
        for _ in 0..3 {
            assert!(p.down(&list, &unit));
        }
        assert_eq!(p.sel(), Some(3));

        p.relayout(grid(2, 1), &list, &unit);
        assert_eq!(p.sel(), Some(3));
        assert_eq!(p.visible(&list), vec![3, 4]);
        assert!(p.up(&list, &unit));
        assert_eq!(p.sel(), Some(2));
        assert_eq!(p.visible(&list), vec![1, 2]);

        let empty = MatchList::with_capacity(0);
        p.relayout(grid(3, 1), &empty, &unit);
        assert_eq!(p.window(), PageWindow::default());
    }

    #[test]
    fn end_fills_last_page_and_selects_tail() {
        let list = list_of(7);
        let mut p = Pager::new(grid(3, 1));
        p.reset(&list, &unit);
        assert!(p.end(&list, &unit));
        assert_eq!(p.sel(), Some(6));
        assert_eq!(p.visible(&list), vec![4, 5, 6]);
        assert_eq!(p.window().next, None);
        assert!(p.home(&list, &unit));
        assert_eq!(p.visible(&list), vec![0, 1, 2]);
        assert_eq!(p.sel(), Some(0));
    }

    #[test]
    fn end_on_single_page_only_moves_highlight() {
        let list = list_of(3);
        let mut p = Pager::new(grid(5, 1));
        p.reset(&list, &unit);
        assert!(p.end(&list, &unit));
        assert_eq!(p.sel(), Some(2));
        assert_eq!(p.window().curr, Some(0));
    }

    #[test]
    fn grid_lateral_moves_by_rows() {
        let list = list_of(7);
        let mut p = Pager::new(grid(2, 2));
        p.reset(&list, &unit);
        assert!(p.grid_right(&list, &unit));
        assert_eq!(p.sel(), Some(2));
        // Crossing into the next page shifts the window.
        assert!(p.grid_right(&list, &unit));
        assert_eq!(p.sel(), Some(4));
        assert_eq!(p.visible(&list), vec![4, 5, 6]);
        // Ragged final column: 4 + 2 = 6 exists, 6 + 2 does not.
        assert!(p.grid_right(&list, &unit));
        assert_eq!(p.sel(), Some(6));
        assert!(!p.grid_right(&list, &unit));
        assert!(p.grid_left(&list, &unit));
        assert_eq!(p.sel(), Some(4));
        assert!(p.grid_left(&list, &unit));
        assert_eq!(p.sel(), Some(2));
        assert_eq!(p.visible(&list), vec![0, 1, 2, 3]);
        assert!(p.grid_left(&list, &unit));
        assert!(!p.grid_left(&list, &unit));
    }
}
