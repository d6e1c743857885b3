use super::Rect;

/// Index of a node in the [`PlacementTree`] arena
pub type NodeId = usize;

/// Direction in which the canvas is extended when nothing fits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowDirection {
    /// Add a full-height column to the right of the canvas
    Right,
    /// Add a full-width row below the canvas
    Down,
}

#[derive(Debug, Clone)]
struct Node {
    /// Region covered by this node
    rect: Rect,
    /// Whether the node's top-left corner holds a placed rectangle
    occupied: bool,
    /// Sub-regions carved out of this node
    children: Vec<NodeId>,
}

impl Node {
    fn leaf(rect: Rect) -> Self {
        Self {
            rect,
            occupied: false,
            children: Vec::new(),
        }
    }

    fn is_free(&self) -> bool {
        !self.occupied && self.children.is_empty()
    }
}

/// Growing binary partition of a working canvas.
///
/// Nodes live in an arena and own their children by index, so the tree has no
/// back-references. Free leaves are pairwise disjoint and together with the
/// occupied rectangles they tile the canvas exactly.
#[derive(Debug, Clone)]
pub struct PlacementTree {
    nodes: Vec<Node>,
    root: NodeId,
    width: u32,
    height: u32,
}

impl PlacementTree {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            nodes: vec![Node::leaf(Rect::new(0, 0, width, height))],
            root: 0,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Place a `width` x `height` rectangle in the best-fitting free node.
    /// Returns the placed rectangle, or `None` if no free node is large enough.
    pub fn insert(&mut self, width: u32, height: u32) -> Option<Rect> {
        let id = self.find_free(width, height)?;
        Some(self.occupy(id, width, height))
    }

    /// Find the free node with the least leftover area that fits the rectangle.
    ///
    /// Ties go to the node reached first in a depth-first pre-order walk, with
    /// children visited in creation order.
    pub fn find_free(&self, width: u32, height: u32) -> Option<NodeId> {
        let needed = u64::from(width) * u64::from(height);
        let mut best: Option<(u64, NodeId)> = None;
        let mut stack = vec![self.root];

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if node.is_free() {
                if node.rect.fits(width, height) {
                    let slack = node.rect.area() - needed;
                    if best.is_none_or(|(best_slack, _)| slack < best_slack) {
                        best = Some((slack, id));
                    }
                }
                continue;
            }
            stack.extend(node.children.iter().rev());
        }

        best.map(|(_, id)| id)
    }

    /// Occupy the top-left corner of a free node and split the leftover space.
    ///
    /// The larger leftover dimension gets the strip that spans the whole node:
    /// if more width than height is left over, the right strip is full height
    /// and the bottom strip is only as wide as the placed rectangle; otherwise
    /// the bottom strip is full width and the right strip is only as tall as the
    /// placed rectangle.
    fn occupy(&mut self, id: NodeId, width: u32, height: u32) -> Rect {
        let region = self.nodes[id].rect;
        let leftover_w = region.width - width;
        let leftover_h = region.height - height;

        let (right, bottom) = if leftover_w >= leftover_h {
            (
                Rect::new(region.x + width, region.y, leftover_w, region.height),
                Rect::new(region.x, region.y + height, width, leftover_h),
            )
        } else {
            (
                Rect::new(region.x + width, region.y, leftover_w, height),
                Rect::new(region.x, region.y + height, region.width, leftover_h),
            )
        };

        let children = self.push_leaves([right, bottom]);
        let node = &mut self.nodes[id];
        node.occupied = true;
        node.children = children;

        Rect::new(region.x, region.y, width, height)
    }

    /// Extend the canvas to `width` x `height`.
    ///
    /// The added L-shaped area becomes two free regions: a primary strip along
    /// the growth direction that spans the full new extent, and a secondary strip
    /// covering the rest. The previous root is kept as the first child of a new
    /// root, so existing regions keep their traversal priority.
    pub fn grow(&mut self, width: u32, height: u32, direction: GrowDirection) {
        let (old_w, old_h) = (self.width, self.height);
        let (new_w, new_h) = (width.max(old_w), height.max(old_h));

        let strips = match direction {
            GrowDirection::Right => [
                Rect::new(old_w, 0, new_w - old_w, new_h),
                Rect::new(0, old_h, old_w, new_h - old_h),
            ],
            GrowDirection::Down => [
                Rect::new(0, old_h, new_w, new_h - old_h),
                Rect::new(old_w, 0, new_w - old_w, old_h),
            ],
        };

        let mut children = vec![self.root];
        children.extend(self.push_leaves(strips));

        let root = self.nodes.len();
        self.nodes.push(Node {
            rect: Rect::new(0, 0, new_w, new_h),
            occupied: false,
            children,
        });

        self.root = root;
        self.width = new_w;
        self.height = new_h;
    }

    /// All free regions in traversal order
    pub fn free_regions(&self) -> Vec<Rect> {
        let mut regions = Vec::new();
        let mut stack = vec![self.root];

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if node.is_free() {
                regions.push(node.rect);
            } else {
                stack.extend(node.children.iter().rev());
            }
        }

        regions
    }

    fn push_leaves(&mut self, rects: [Rect; 2]) -> Vec<NodeId> {
        let mut ids = Vec::with_capacity(2);
        for rect in rects.into_iter().filter(|r| !r.is_empty()) {
            ids.push(self.nodes.len());
            self.nodes.push(Node::leaf(rect));
        }
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_disjoint(rects: &[Rect]) {
        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                assert!(!a.intersects(b), "{:?} overlaps {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_single_insert() {
        let mut tree = PlacementTree::new(100, 100);
        let rect = tree.insert(50, 50).unwrap();

        assert_eq!(rect, Rect::new(0, 0, 50, 50));
    }

    #[test]
    fn test_split_larger_leftover_width() {
        // 70 wide leftover vs 20 high leftover: right strip spans the full height
        let mut tree = PlacementTree::new(100, 50);
        tree.insert(30, 30).unwrap();

        assert_eq!(
            tree.free_regions(),
            vec![Rect::new(30, 0, 70, 50), Rect::new(0, 30, 30, 20)]
        );
    }

    #[test]
    fn test_split_larger_leftover_height() {
        let mut tree = PlacementTree::new(50, 100);
        tree.insert(30, 30).unwrap();

        assert_eq!(
            tree.free_regions(),
            vec![Rect::new(30, 0, 20, 30), Rect::new(0, 30, 50, 70)]
        );
    }

    #[test]
    fn test_exact_fit_leaves_no_free_regions() {
        let mut tree = PlacementTree::new(40, 40);
        tree.insert(40, 40).unwrap();

        assert!(tree.free_regions().is_empty());
        assert!(tree.insert(1, 1).is_none());
    }

    #[test]
    fn test_multiple_inserts_are_disjoint() {
        let mut tree = PlacementTree::new(100, 100);
        let placed: Vec<_> = (0..4).map(|_| tree.insert(50, 50).unwrap()).collect();

        assert_disjoint(&placed);
        assert!(tree.insert(1, 1).is_none());
    }

    #[test]
    fn test_best_fit_prefers_smallest_slack() {
        // Free regions after the split: right 60x100 and bottom 40x10
        let mut tree = PlacementTree::new(100, 100);
        tree.insert(40, 90).unwrap();

        let rect = tree.insert(30, 10).unwrap();
        assert_eq!(rect, Rect::new(0, 90, 30, 10));
    }

    #[test]
    fn test_too_large() {
        let mut tree = PlacementTree::new(100, 100);
        assert!(tree.insert(150, 50).is_none());
    }

    #[test]
    fn test_grow_right_adds_column_and_row() {
        let mut tree = PlacementTree::new(10, 10);
        tree.insert(10, 10).unwrap();
        tree.grow(30, 20, GrowDirection::Right);

        assert_eq!((tree.width(), tree.height()), (30, 20));
        assert_eq!(
            tree.free_regions(),
            vec![Rect::new(10, 0, 20, 20), Rect::new(0, 10, 10, 10)]
        );
    }

    #[test]
    fn test_grow_down_adds_row_and_column() {
        let mut tree = PlacementTree::new(10, 10);
        tree.insert(10, 10).unwrap();
        tree.grow(20, 30, GrowDirection::Down);

        assert_eq!(
            tree.free_regions(),
            vec![Rect::new(0, 10, 20, 20), Rect::new(10, 0, 10, 10)]
        );
    }

    #[test]
    fn test_grow_keeps_old_regions_first() {
        let mut tree = PlacementTree::new(20, 10);
        tree.insert(10, 10).unwrap();
        tree.grow(40, 10, GrowDirection::Right);

        // The old 10x10 hole and the new 20x10 column both fit a 10x10;
        // the old hole has less slack.
        assert_eq!(tree.insert(10, 10).unwrap(), Rect::new(10, 0, 10, 10));
        assert_eq!(tree.insert(10, 10).unwrap(), Rect::new(20, 0, 10, 10));
    }

    #[test]
    fn test_free_regions_tile_the_canvas() {
        let mut tree = PlacementTree::new(64, 64);
        let mut placed = Vec::new();
        for (w, h) in [(30, 20), (10, 40), (25, 25), (8, 8)] {
            placed.push(tree.insert(w, h).unwrap());
        }
        tree.grow(128, 64, GrowDirection::Right);
        placed.push(tree.insert(60, 60).unwrap());

        let free = tree.free_regions();
        let mut all = placed.clone();
        all.extend(free.iter().copied());
        assert_disjoint(&all);

        let covered: u64 = all.iter().map(Rect::area).sum();
        assert_eq!(covered, 128 * 64);
    }
}
