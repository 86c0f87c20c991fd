use super::{DrawCmd, ZIndex};

/// A single draw item: z-layer, insertion order, command.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub z: ZIndex,
    pub order: u32,
    pub cmd: DrawCmd,
}

/// Recorded draw stream for a frame.
///
/// Paint order sets the instance order inside each renderer's batch. Batches
/// themselves are drawn renderer by renderer, so across shape kinds the call
/// order of the renderers decides what ends up on top.
///
/// The overlay rebuilds the list from scratch every frame; [`clear`](Self::clear)
/// keeps the allocations for reuse.
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

    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_indices.clear();
        self.sorted_dirty = true;
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
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
        self.items.push(DrawItem { z, order, cmd });
        self.sorted_dirty = true;
    }

    /// Iterates items in paint order (back-to-front) without cloning commands.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }
        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());

        let items = &self.items;
        self.sorted_indices
            .sort_by_key(|&i| (items[i].z, items[i].order));

        self.sorted_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;

    fn ring_at(x: f32) -> DrawCmd {
        DrawCmd::Ring(crate::scene::shapes::ring::RingCmd::new(
            Vec2::new(x, 0.0),
            10.0,
            2.0,
            Color::WHITE,
        ))
    }

    fn xs(list: &mut DrawList) -> Vec<f32> {
        list.iter_in_paint_order()
            .map(|item| match &item.cmd {
                DrawCmd::Ring(r) => r.center.x,
                DrawCmd::Text(t) => t.origin.x,
            })
            .collect()
    }

    #[test]
    fn equal_z_keeps_insertion_order() {
        let mut list = DrawList::new();
        list.push(ZIndex(0), ring_at(1.0));
        list.push(ZIndex(0), ring_at(2.0));
        list.push(ZIndex(0), ring_at(3.0));
        assert_eq!(xs(&mut list), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn higher_z_paints_last() {
        let mut list = DrawList::new();
        list.push(ZIndex(5), ring_at(1.0));
        list.push(ZIndex(-1), ring_at(2.0));
        list.push(ZIndex(0), ring_at(3.0));
        assert_eq!(xs(&mut list), vec![2.0, 3.0, 1.0]);
    }

    #[test]
    fn clear_resets_the_stream() {
        let mut list = DrawList::new();
        list.push(ZIndex(0), ring_at(1.0));
        list.clear();
        assert!(list.is_empty());
        assert!(xs(&mut list).is_empty());
        list.push(ZIndex(0), ring_at(4.0));
        assert_eq!(list.items()[0].order, 0);
    }
}
