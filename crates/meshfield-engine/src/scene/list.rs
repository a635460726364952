use super::{DrawCmd, SortKey, ZIndex};

/// A single draw item: sort key + command.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
}

/// Recorded draw stream for a frame.
///
/// Performance characteristics:
/// - `push()` is O(1)
/// - paint-order iteration reuses an internal index buffer; no per-frame
///   allocation once warmed
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_dirty = true;
        self.sorted_indices.clear();
    }

    /// Returns items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    /// Pushes a draw command with the given z-index.
    #[inline]
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.items.push(DrawItem {
            key: SortKey::new(z, order),
            cmd,
        });

        self.sorted_dirty = true;
    }

    /// Iterates items in paint order (back-to-front) without cloning draw
    /// commands. Insertion order breaks ties within a z-layer.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }

        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());

        // Stable ordering is ensured by SortKey including insertion order.
        self.sorted_indices
            .sort_by(|&a, &b| self.items[a].key.cmp(&self.items[b].key));

        self.sorted_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;
    use crate::paint::Color;

    fn z(v: i32) -> ZIndex {
        ZIndex::new(v)
    }

    #[test]
    fn paint_order_sorts_by_z_then_insertion() {
        let mut dl = DrawList::new();
        let c = Color::from_premul(1.0, 1.0, 1.0, 1.0);
        dl.push_rect(z(1), Rect::new(0.0, 0.0, 1.0, 1.0), c); // on top
        dl.push_rect(z(0), Rect::new(1.0, 0.0, 1.0, 1.0), c); // below
        dl.push_rect(z(0), Rect::new(2.0, 0.0, 1.0, 1.0), c); // below, later

        let order: Vec<u32> = dl.iter_in_paint_order().map(|i| i.key.order).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn clear_resets_insertion_order() {
        let mut dl = DrawList::new();
        let c = Color::from_premul(0.0, 0.0, 0.0, 1.0);
        dl.push_rect(z(0), Rect::new(0.0, 0.0, 1.0, 1.0), c);
        dl.clear();
        assert!(dl.items().is_empty());

        dl.push_rect(z(0), Rect::new(0.0, 0.0, 1.0, 1.0), c);
        assert_eq!(dl.items()[0].key.order, 0);
    }
}
