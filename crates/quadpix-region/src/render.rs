//! Rasterize a quadtree into an image
//!
//! Every leaf paints its region with its flat color. Leaf regions tile the
//! image, so each pixel is written exactly once; internal nodes are only
//! walked through.

use quadpix_core::{Image, Region, Rgb};

use crate::error::RegionResult;
use crate::quadtree::Quadtree;

/// Render a quadtree to an image of the tree's dimensions.
///
/// Works for built and reconstructed trees alike; the tree is not modified.
///
/// # Errors
///
/// Returns `InvalidRegion` if a leaf reaches outside the image, which a
/// well-formed tree never does.
pub fn render(tree: &Quadtree) -> RegionResult<Image> {
    let mut out = Image::new(tree.width(), tree.height())?.to_mut();
    for (_, leaf) in tree.leaves() {
        out.fill_region(leaf.region(), leaf.color())?;
    }
    Ok(out.into())
}

/// Render only the leaves at or above `max_depth`, painting deeper subtrees
/// with the color their ancestor at `max_depth` carries.
///
/// `render_to_depth(tree, 0)` paints the whole image with the root color.
pub fn render_to_depth(tree: &Quadtree, max_depth: u32) -> RegionResult<Image> {
    let mut out = Image::new(tree.width(), tree.height())?.to_mut();
    let mut stack = vec![(tree.root(), 0u32)];
    while let Some((id, depth)) = stack.pop() {
        let Some(node) = tree.node(id) else {
            continue;
        };
        match node.children() {
            Some(children) if depth < max_depth => {
                stack.extend(children.iter().rev().map(|&c| (c, depth + 1)));
            }
            _ => out.fill_region(node.region(), node.color())?,
        }
    }
    Ok(out.into())
}

/// Paint the outline of every leaf region with `color` on top of `image`.
///
/// Useful for visualizing where detail was spent.
pub fn draw_leaf_outlines(image: &Image, tree: &Quadtree, color: Rgb) -> RegionResult<Image> {
    let mut out = image.to_mut();
    for (_, leaf) in tree.leaves() {
        let r = leaf.region();
        let top = Region::new(r.x(), r.y(), r.width(), 1)?;
        let left = Region::new(r.x(), r.y(), 1, r.height())?;
        out.fill_region(&top, color)?;
        out.fill_region(&left, color)?;
    }
    Ok(out.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quadtree::NodeId;

    #[test]
    fn test_render_single_leaf() {
        let tree = Quadtree::with_root(3, 5, Rgb::new(9, 8, 7), 0.0).unwrap();
        let image = render(&tree).unwrap();
        assert_eq!(image, Image::filled(3, 5, Rgb::new(9, 8, 7)).unwrap());
    }

    #[test]
    fn test_render_odd_split() {
        let mut tree = Quadtree::with_root(3, 3, Rgb::BLACK, 0.0).unwrap();
        let colors = [
            Rgb::new(1, 0, 0),
            Rgb::new(2, 0, 0),
            Rgb::new(3, 0, 0),
            Rgb::new(4, 0, 0),
        ];
        tree.subdivide(NodeId::ROOT, colors.map(|c| (c, 0.0))).unwrap();
        let image = render(&tree).unwrap();
        // split at 1: tl 1x1, tr 2x1, bl 1x2, br 2x2
        let expected = [[1, 2, 2], [3, 4, 4], [3, 4, 4]];
        for (y, row) in expected.iter().enumerate() {
            for (x, &r) in row.iter().enumerate() {
                assert_eq!(image.get_rgb(x as u32, y as u32).unwrap().r, r);
            }
        }
    }

    #[test]
    fn test_render_to_depth() {
        let mut tree = Quadtree::with_root(2, 2, Rgb::WHITE, 0.0).unwrap();
        tree.subdivide(NodeId::ROOT, [(Rgb::BLACK, 0.0); 4]).unwrap();
        let shallow = render_to_depth(&tree, 0).unwrap();
        assert_eq!(shallow, Image::filled(2, 2, Rgb::WHITE).unwrap());
        let full = render_to_depth(&tree, 5).unwrap();
        assert_eq!(full, render(&tree).unwrap());
    }

    #[test]
    fn test_draw_leaf_outlines() {
        let mut tree = Quadtree::with_root(4, 4, Rgb::BLACK, 0.0).unwrap();
        tree.subdivide(NodeId::ROOT, [(Rgb::BLACK, 0.0); 4]).unwrap();
        let base = render(&tree).unwrap();
        let outlined = draw_leaf_outlines(&base, &tree, Rgb::WHITE).unwrap();
        assert_eq!(outlined.get_rgb(2, 3), Some(Rgb::WHITE));
        assert_eq!(outlined.get_rgb(1, 1), Some(Rgb::BLACK));
        assert_eq!(outlined.get_rgb(3, 3), Some(Rgb::BLACK));
    }
}
