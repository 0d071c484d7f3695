//! Adaptive quadtree construction
//!
//! [`QuadtreeBuilder`] grows a [`Quadtree`] greedily: each step splits the
//! leaf whose region is currently worst approximated by its flat color, as
//! measured by the detail score (see [`crate::integral`]).
//!
//! # Ordering
//!
//! Candidate leaves sit in a max-heap keyed by `(score, creation order)`.
//! The highest score is split first; among equal scores, the node created
//! earliest wins. The order depends only on the scores, so calling
//! [`QuadtreeBuilder::add_detail`] with `a` then `b` produces the same tree
//! as a single call with `a + b`.
//!
//! # Eligibility
//!
//! A leaf enters the heap only if its region can be split (at least 2x2)
//! and its score is above [`BuildOptions::detail_threshold`]. A uniform
//! region scores exactly `0.0` and is never queued.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use quadpix_core::{Image, Region, Rgb};
use tracing::{debug, trace};

use crate::error::{RegionError, RegionResult};
use crate::integral::{RegionSample, RegionStats};
use crate::quadtree::{NodeId, Quadtree};

/// Options for adaptive quadtree construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildOptions {
    /// Leaves scoring at or below this value are never split
    pub detail_threshold: f64,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            detail_threshold: 0.0,
        }
    }
}

impl BuildOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the detail threshold
    pub fn with_detail_threshold(mut self, threshold: f64) -> Self {
        self.detail_threshold = threshold;
        self
    }

    fn validate(&self) -> RegionResult<()> {
        if !self.detail_threshold.is_finite() || self.detail_threshold < 0.0 {
            return Err(RegionError::InvalidParameters(format!(
                "detail_threshold must be finite and non-negative, got {}",
                self.detail_threshold
            )));
        }
        Ok(())
    }
}

/// Heap entry: a leaf waiting to be split.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    score: f64,
    id: NodeId,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| Reverse(self.id).cmp(&Reverse(other.id)))
    }
}

/// Incremental quadtree builder
///
/// Holds the statistics tables, the tree being grown and the candidate
/// heap, so successive [`add_detail`](Self::add_detail) calls resume where
/// the previous one stopped.
///
/// # Examples
///
/// ```
/// use quadpix_core::{Image, Rgb};
/// use quadpix_region::{BuildOptions, QuadtreeBuilder};
///
/// let image = Image::filled(8, 8, Rgb::new(255, 0, 0)).unwrap();
/// let mut builder = QuadtreeBuilder::new(&image, BuildOptions::default()).unwrap();
/// assert_eq!(builder.add_detail(1000).unwrap(), 0);
/// assert_eq!(builder.tree().leaf_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct QuadtreeBuilder {
    stats: RegionStats,
    tree: Quadtree,
    heap: BinaryHeap<Candidate>,
    options: BuildOptions,
    subdivisions: usize,
}

impl QuadtreeBuilder {
    /// Precompute statistics for `image` and create the root leaf.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidParameters`] for a negative or
    /// non-finite detail threshold.
    pub fn new(image: &Image, options: BuildOptions) -> RegionResult<Self> {
        options.validate()?;
        let stats = RegionStats::new(image);
        let region = stats.full_region()?;
        let sample = stats.query(&region)?;
        let tree = Quadtree::with_root(
            image.width(),
            image.height(),
            sample.mean,
            sample.detail_score(),
        )?;

        let mut builder = Self {
            stats,
            tree,
            heap: BinaryHeap::new(),
            options,
            subdivisions: 0,
        };
        builder.offer(NodeId::ROOT, &region, sample.detail_score());
        debug!(
            width = image.width(),
            height = image.height(),
            score = sample.detail_score(),
            queued = builder.heap.len(),
            "initialized quadtree builder"
        );
        Ok(builder)
    }

    /// Queue a leaf if it is eligible for splitting.
    fn offer(&mut self, id: NodeId, region: &Region, score: f64) {
        if region.is_splittable() && score > self.options.detail_threshold {
            self.heap.push(Candidate { score, id });
        }
    }

    /// Split up to `iterations` leaves, highest score first.
    ///
    /// Stops early, without error, once no eligible leaf remains. Returns
    /// the number of splits actually performed; the tree gains exactly
    /// three leaves per split.
    pub fn add_detail(&mut self, iterations: usize) -> RegionResult<usize> {
        let mut performed = 0;
        while performed < iterations {
            let Some(candidate) = self.heap.pop() else {
                break;
            };
            self.split(candidate)?;
            performed += 1;
        }
        self.subdivisions += performed;
        debug!(
            requested = iterations,
            performed,
            leaves = self.tree.leaf_count(),
            pending = self.heap.len(),
            "added detail"
        );
        Ok(performed)
    }

    fn split(&mut self, candidate: Candidate) -> RegionResult<()> {
        let node = self.tree.node(candidate.id).ok_or_else(|| {
            RegionError::InvalidParameters(format!("unknown node {:?}", candidate.id))
        })?;
        let region = *node.region();
        let regions = region.split().ok_or(quadpix_core::Error::InvalidRegion {
            x: region.x(),
            y: region.y(),
            w: region.width(),
            h: region.height(),
            reason: "too small to split",
        })?;

        let samples = self.sample_children(&regions)?;
        let ids = self.tree.subdivide(
            candidate.id,
            samples.map(|s| (s.mean, s.detail_score())),
        )?;
        trace!(node = candidate.id.index(), score = candidate.score, %region, "subdivided");

        for ((id, child), sample) in ids.into_iter().zip(regions).zip(samples) {
            self.offer(id, &child, sample.detail_score());
        }
        Ok(())
    }

    fn sample_children(&self, regions: &[Region; 4]) -> RegionResult<[RegionSample; 4]> {
        Ok([
            self.stats.query(&regions[0])?,
            self.stats.query(&regions[1])?,
            self.stats.query(&regions[2])?,
            self.stats.query(&regions[3])?,
        ])
    }

    /// The tree grown so far
    pub fn tree(&self) -> &Quadtree {
        &self.tree
    }

    /// Consume the builder, keeping only the tree
    pub fn into_tree(self) -> Quadtree {
        self.tree
    }

    /// Statistics tables for the source image
    pub fn stats(&self) -> &RegionStats {
        &self.stats
    }

    /// Options the builder was created with
    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Total splits performed across all `add_detail` calls
    pub fn subdivisions(&self) -> usize {
        self.subdivisions
    }

    /// Number of leaves still eligible for splitting
    pub fn pending(&self) -> usize {
        self.heap.len()
    }

    /// Whether no further split is possible
    pub fn is_exhausted(&self) -> bool {
        self.heap.is_empty()
    }

    /// Score of the next leaf to be split, if any
    pub fn peek_score(&self) -> Option<f64> {
        self.heap.peek().map(|c| c.score)
    }

    /// Color the root was initialized with (the whole-image mean)
    pub fn mean_color(&self) -> Rgb {
        self.tree
            .node(NodeId::ROOT)
            .map(|n| n.color())
            .unwrap_or_default()
    }
}
