//! Depth-bounded bucket octree.
//!
//! Each item is stored with its bounding box in the deepest node whose box
//! fully contains it. Children are created lazily, all eight at once, the
//! first time an item descends into a node.

use crate::geometry::{Aabb, Ray};

#[derive(Debug, Clone)]
struct Node {
    bounds: Aabb,
    depth: usize,
    /// Index of the first of eight consecutive children.
    children: Option<usize>,
    items: Vec<usize>,
}

impl Node {
    fn new(bounds: Aabb, depth: usize) -> Self {
        Self {
            bounds,
            depth,
            children: None,
            items: Vec::new(),
        }
    }
}

/// An octree bucketing items of type `T` by bounding box.
#[derive(Debug, Clone)]
pub struct Octree<T> {
    nodes: Vec<Node>,
    items: Vec<(Aabb, T)>,
    max_depth: usize,
}

impl<T> Octree<T> {
    /// Create an empty octree rooted at `bounds`.
    ///
    /// A `max_depth` of zero keeps every item in the root.
    pub fn new(bounds: Aabb, max_depth: usize) -> Self {
        Self {
            nodes: vec![Node::new(bounds, 0)],
            items: Vec::new(),
            max_depth,
        }
    }

    /// Bounds of the root node.
    pub fn bounds(&self) -> &Aabb {
        &self.nodes[0].bounds
    }

    /// Maximum node depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the octree holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove every item and collapse the tree to its root.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.nodes[0].children = None;
        self.nodes[0].items.clear();
        self.items.clear();
    }

    /// Insert `item` with bounding box `aabb`.
    ///
    /// Items not contained by the root box are kept in the root.
    pub fn insert(&mut self, aabb: Aabb, item: T) {
        let slot = self.items.len();
        self.items.push((aabb, item));

        let mut node = 0;
        loop {
            if self.nodes[node].depth >= self.max_depth {
                break;
            }
            let bounds = self.nodes[node].bounds;
            let Some(octant) = (0..8).find(|&i| bounds.octant(i).contains(&aabb)) else {
                break;
            };
            node = self.child(node, octant);
        }
        self.nodes[node].items.push(slot);
    }

    fn child(&mut self, node: usize, octant: usize) -> usize {
        if let Some(first) = self.nodes[node].children {
            return first + octant;
        }
        let first = self.nodes.len();
        let bounds = self.nodes[node].bounds;
        let depth = self.nodes[node].depth + 1;
        for i in 0..8 {
            self.nodes.push(Node::new(bounds.octant(i), depth));
        }
        self.nodes[node].children = Some(first);
        first + octant
    }

    /// Visit every item whose box intersects `aabb`.
    pub fn query_aabb<F>(&self, aabb: &Aabb, mut visit: F)
    where
        F: FnMut(&T),
    {
        self.walk(
            |bounds| bounds.intersects(aabb),
            |item_box| item_box.intersects(aabb),
            &mut visit,
        );
    }

    /// Visit every item whose box is pierced by `ray`.
    pub fn query_ray<F>(&self, ray: &Ray, mut visit: F)
    where
        F: FnMut(&T),
    {
        self.walk(
            |bounds| ray.intersect_aabb(bounds).is_some(),
            |item_box| ray.intersect_aabb(item_box).is_some(),
            &mut visit,
        );
    }

    /// Collect the items whose box intersects `aabb`.
    pub fn collect_aabb(&self, aabb: &Aabb) -> Vec<&T> {
        let mut found = Vec::new();
        self.walk(
            |bounds| bounds.intersects(aabb),
            |item_box| item_box.intersects(aabb),
            &mut |item| found.push(item),
        );
        found
    }

    fn walk<'a, N, I, F>(&'a self, enter: N, accept: I, visit: &mut F)
    where
        N: Fn(&Aabb) -> bool,
        I: Fn(&Aabb) -> bool,
        F: FnMut(&'a T),
    {
        // The root is always entered so items lying outside it are still found
        let mut stack = vec![0usize];
        while let Some(node) = stack.pop() {
            let node = &self.nodes[node];
            for &slot in &node.items {
                let (item_box, item) = &self.items[slot];
                if accept(item_box) {
                    visit(item);
                }
            }
            if let Some(first) = node.children {
                for child in first..first + 8 {
                    if enter(&self.nodes[child].bounds) {
                        stack.push(child);
                    }
                }
            }
        }
    }
}
