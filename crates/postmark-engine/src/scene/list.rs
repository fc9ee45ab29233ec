use crate::coords::Mat3;

use super::{DrawCmd, SortKey, ZIndex};

/// A single draw item: sort key, command and the transform it is drawn under.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
    /// Maps the command's local coordinates to screen logical pixels.
    pub transform: Mat3,
}

/// Recorded draw stream for a frame.
///
/// Paint-order iteration reuses an internal index buffer, so a warmed-up list
/// does not allocate per frame.
///
/// # Transforms
///
/// [`push_transform`](Self::push_transform) composes with the current top of
/// the stack; every command pushed until the matching
/// [`pop_transform`](Self::pop_transform) is drawn through it.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,

    /// Effective transforms, already composed with every parent.
    transform_stack: Vec<Mat3>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears items and the transform stack, keeping capacity.
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_dirty = true;
        self.sorted_indices.clear();
        self.transform_stack.clear();
    }

    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Transform new items are recorded under.
    #[inline]
    pub fn current_transform(&self) -> Mat3 {
        self.transform_stack.last().copied().unwrap_or(Mat3::IDENTITY)
    }

    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.items.push(DrawItem {
            key: SortKey::new(z, order),
            cmd,
            transform: self.current_transform(),
        });
        self.sorted_dirty = true;
    }

    /// Begins a transformed group. Must be balanced with [`pop_transform`](Self::pop_transform).
    pub fn push_transform(&mut self, local: Mat3) {
        let effective = self.current_transform() * local;
        self.transform_stack.push(effective);
    }

    pub fn pop_transform(&mut self) {
        debug_assert!(
            !self.transform_stack.is_empty(),
            "pop_transform called without matching push_transform"
        );
        self.transform_stack.pop();
    }

    /// Iterates items back-to-front without cloning commands.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }
        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());
        self.sorted_indices
            .sort_by(|&a, &b| self.items[a].key.cmp(&self.items[b].key));
        self.sorted_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Rect, Vec2};
    use crate::paint::Color;
    use crate::scene::shapes::shape::ShapeKind;

    fn rect() -> Rect {
        Rect::new(0.0, 0.0, 10.0, 10.0)
    }

    fn paint_order(list: &mut DrawList) -> Vec<u32> {
        list.iter_in_paint_order().map(|item| item.key.order).collect()
    }

    // ── ordering ──────────────────────────────────────────────────────────

    #[test]
    fn higher_z_paints_later() {
        let mut list = DrawList::new();
        list.push_shape(ZIndex(5), rect(), ShapeKind::Ellipse, Color::WHITE);
        list.push_shape(ZIndex(1), rect(), ShapeKind::Ellipse, Color::WHITE);
        list.push_shape(ZIndex(3), rect(), ShapeKind::Ellipse, Color::WHITE);
        assert_eq!(paint_order(&mut list), vec![1, 2, 0]);
    }

    #[test]
    fn equal_z_keeps_insertion_order() {
        let mut list = DrawList::new();
        for _ in 0..4 {
            list.push_shape(ZIndex(0), rect(), ShapeKind::Ellipse, Color::WHITE);
        }
        assert_eq!(paint_order(&mut list), vec![0, 1, 2, 3]);
    }

    #[test]
    fn clear_resets_order_counter() {
        let mut list = DrawList::new();
        list.push_shape(ZIndex(0), rect(), ShapeKind::Ellipse, Color::WHITE);
        list.clear();
        assert!(list.is_empty());
        list.push_shape(ZIndex(0), rect(), ShapeKind::Ellipse, Color::WHITE);
        assert_eq!(list.items()[0].key.order, 0);
    }

    // ── transform stack ───────────────────────────────────────────────────

    #[test]
    fn nested_transforms_compose_parent_first() {
        let mut list = DrawList::new();
        list.push_transform(Mat3::translate(100.0, 0.0));
        list.push_transform(Mat3::scale(2.0, 2.0));
        list.push_shape(ZIndex(0), rect(), ShapeKind::Ellipse, Color::WHITE);
        list.pop_transform();
        list.push_shape(ZIndex(0), rect(), ShapeKind::Ellipse, Color::WHITE);
        list.pop_transform();
        list.push_shape(ZIndex(0), rect(), ShapeKind::Ellipse, Color::WHITE);

        let items = list.items();
        let p = Vec2::new(1.0, 1.0);
        assert_eq!(items[0].transform.map_point(p), Some(Vec2::new(102.0, 2.0)));
        assert_eq!(items[1].transform.map_point(p), Some(Vec2::new(101.0, 1.0)));
        assert!(items[2].transform.is_identity());
    }

    #[test]
    fn clear_drops_unbalanced_transforms() {
        let mut list = DrawList::new();
        list.push_transform(Mat3::translate(5.0, 5.0));
        list.clear();
        assert!(list.current_transform().is_identity());
    }
}
