//! Quadtree - Adaptive image region decomposition
//!
//! A [`Quadtree`] recursively divides an image into four quadrants (see
//! [`Region::split`]) wherever more detail is wanted. Every node is either a
//! leaf carrying one flat color or an internal node owning exactly four
//! children whose regions tile its own.
//!
//! # Storage
//!
//! Nodes live in an arena indexed by [`NodeId`]; the root is always
//! `NodeId(0)` and ids are handed out in creation order. Nothing points back
//! up the tree, so dropping the `Quadtree` frees every node at once and all
//! traversals are iterative.
//!
//! Trees come from two places: [`crate::QuadtreeBuilder`] grows one from
//! image statistics, and `quadpix-codec` reconstructs one from bytes. Both
//! produce this same type.

use quadpix_core::{Region, Rgb};

use crate::error::{RegionError, RegionResult};

/// Index of a node inside its [`Quadtree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The root node of every tree.
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub(crate) const fn new(index: u32) -> Self {
        NodeId(index)
    }

    /// Position in the arena (and in creation order).
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One quadtree cell
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    region: Region,
    color: Rgb,
    detail: f64,
    children: Option<[NodeId; 4]>,
}

impl Node {
    fn leaf(region: Region, color: Rgb, detail: f64) -> Self {
        Self {
            region,
            color,
            detail,
            children: None,
        }
    }

    /// Pixel rectangle covered by this node
    #[inline]
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Flat color of a leaf. For internal nodes this is the color the node
    /// had before it was split (or, for reconstructed trees, the area
    /// weighted mean of its children); rendering never reads it.
    #[inline]
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Detail score recorded at creation. Always `0.0` for reconstructed trees.
    #[inline]
    pub fn detail(&self) -> f64 {
        self.detail
    }

    /// Whether this node has been split
    #[inline]
    pub fn is_subdivided(&self) -> bool {
        self.children.is_some()
    }

    /// Whether this node is a leaf
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Children in top-left, top-right, bottom-left, bottom-right order
    #[inline]
    pub fn children(&self) -> Option<[NodeId; 4]> {
        self.children
    }
}

/// Quadtree over a `width` x `height` image
#[derive(Debug, Clone, PartialEq)]
pub struct Quadtree {
    width: u32,
    height: u32,
    nodes: Vec<Node>,
}

impl Quadtree {
    /// Create a single-leaf tree covering a whole image.
    ///
    /// # Errors
    ///
    /// Returns `DegenerateInput` if either dimension is zero.
    pub fn with_root(width: u32, height: u32, color: Rgb, detail: f64) -> RegionResult<Self> {
        let region = Region::full(width, height)?;
        Ok(Self {
            width,
            height,
            nodes: vec![Node::leaf(region, color, detail)],
        })
    }

    /// Image width
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Root node id
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Look up a node
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// All nodes in creation order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Total number of nodes (internal and leaf)
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaves. Each split turns one leaf into four, so this is
    /// always `1 + 3 * internal_count`.
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Number of internal nodes
    pub fn internal_count(&self) -> usize {
        self.nodes.len() - self.leaf_count()
    }

    /// Split a leaf into four children with the given colors and detail
    /// scores, in split order.
    ///
    /// Returns the new child ids.
    ///
    /// # Errors
    ///
    /// Fails with [`RegionError::InvalidParameters`] if `id` is unknown or
    /// already subdivided, and with `InvalidRegion` if the leaf is too thin
    /// to split.
    pub fn subdivide(
        &mut self,
        id: NodeId,
        samples: [(Rgb, f64); 4],
    ) -> RegionResult<[NodeId; 4]> {
        let node = self
            .nodes
            .get(id.index())
            .ok_or_else(|| RegionError::InvalidParameters(format!("unknown node {id:?}")))?;
        if node.is_subdivided() {
            return Err(RegionError::InvalidParameters(format!(
                "node {id:?} is already subdivided"
            )));
        }
        let region = node.region;
        let regions = region.split().ok_or(quadpix_core::Error::InvalidRegion {
            x: region.x(),
            y: region.y(),
            w: region.width(),
            h: region.height(),
            reason: "too small to split",
        })?;

        let first = u32::try_from(self.nodes.len())
            .map_err(|_| RegionError::InvalidParameters("node arena is full".into()))?;
        let ids = [
            NodeId::new(first),
            NodeId::new(first + 1),
            NodeId::new(first + 2),
            NodeId::new(first + 3),
        ];
        for (child_region, (color, detail)) in regions.into_iter().zip(samples) {
            self.nodes.push(Node::leaf(child_region, color, detail));
        }
        self.nodes[id.index()].children = Some(ids);
        Ok(ids)
    }

    /// Set the color of a leaf.
    ///
    /// # Errors
    ///
    /// Fails with [`RegionError::InvalidParameters`] if `id` is unknown or
    /// names an internal node.
    pub fn set_leaf_color(&mut self, id: NodeId, color: Rgb) -> RegionResult<()> {
        match self.nodes.get_mut(id.index()) {
            Some(node) if node.is_leaf() => {
                node.color = color;
                Ok(())
            }
            Some(_) => Err(RegionError::InvalidParameters(format!(
                "node {id:?} is not a leaf"
            ))),
            None => Err(RegionError::InvalidParameters(format!("unknown node {id:?}"))),
        }
    }

    /// Iterate over all nodes in preorder: a node, then each of its four
    /// children's subtrees in split order.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: vec![NodeId::ROOT],
        }
    }

    /// Iterate over leaves in preorder.
    pub fn leaves(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.preorder().filter(|(_, node)| node.is_leaf())
    }

    /// Maximum depth of any leaf (root is depth 0).
    pub fn depth(&self) -> u32 {
        let mut depths = vec![0u32; self.nodes.len()];
        let mut max = 0;
        for (i, node) in self.nodes.iter().enumerate() {
            if let Some(children) = node.children {
                for child in children {
                    depths[child.index()] = depths[i] + 1;
                    max = max.max(depths[i] + 1);
                }
            }
        }
        max
    }

    /// Rebuild internal-node colors as the area-weighted mean of their
    /// children, rounded to nearest.
    ///
    /// Children always have larger ids than their parent, so one reverse
    /// pass over the arena settles every level.
    pub fn synthesize_internal_colors(&mut self) {
        for i in (0..self.nodes.len()).rev() {
            let Some(children) = self.nodes[i].children else {
                continue;
            };
            let mut sums = [0u64; 3];
            let mut area = 0u64;
            for child in children {
                let node = &self.nodes[child.index()];
                let a = node.region.area();
                for (sum, c) in sums.iter_mut().zip(node.color.channels()) {
                    *sum += u64::from(c) * a;
                }
                area += a;
            }
            self.nodes[i].color = crate::integral::mean_from_sums(&sums, area);
        }
    }
}

/// Preorder traversal over a [`Quadtree`]
pub struct Preorder<'a> {
    tree: &'a Quadtree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = &self.tree.nodes[id.index()];
        if let Some(children) = node.children {
            self.stack.extend(children.iter().rev());
        }
        Some((id, node))
    }
}
