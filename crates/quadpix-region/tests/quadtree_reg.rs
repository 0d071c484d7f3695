//! Adaptive quadtree regression test
//!
//! Exercises the builder on synthetic images of awkward sizes and checks
//! the structural guarantees after every stage of refinement: children
//! tile their parent, leaves tile the image, growth is exactly three
//! leaves per subdivision and refinement is reproducible.

use quadpix_core::{Image, Region, Rgb};
use quadpix_region::{BuildOptions, Quadtree, QuadtreeBuilder, RegionStats, render};
use quadpix_test::{RegParams, checkerboard_image, gradient_image, noise_image, solid_image};

/// Children of every internal node exactly tile the parent.
fn children_tile_parents(tree: &Quadtree) -> bool {
    tree.preorder().all(|(_, node)| {
        let Some(children) = node.children() else {
            return true;
        };
        let regions: Vec<&Region> = children
            .iter()
            .filter_map(|&id| tree.node(id).map(|n| n.region()))
            .collect();
        let area: u64 = regions.iter().map(|r| r.area()).sum();
        regions.len() == 4
            && area == node.region().area()
            && regions.iter().all(|r| node.region().contains_region(r))
            && (0..4).all(|i| (i + 1..4).all(|j| !regions[i].overlaps(regions[j])))
    })
}

/// Every pixel is covered by exactly one leaf.
fn leaves_tile_image(tree: &Quadtree) -> bool {
    let (w, h) = (tree.width() as usize, tree.height() as usize);
    let mut cover = vec![0u8; w * h];
    for (_, leaf) in tree.leaves() {
        let r = leaf.region();
        for y in r.y()..r.bottom() {
            for x in r.x()..r.right() {
                cover[y as usize * w + x as usize] += 1;
            }
        }
    }
    cover.iter().all(|&c| c == 1)
}

fn refine(image: &Image, iterations: usize) -> Quadtree {
    let mut builder = QuadtreeBuilder::new(image, BuildOptions::default()).expect("builder");
    builder.add_detail(iterations).expect("add_detail");
    builder.into_tree()
}

#[test]
fn quadtree_reg() {
    let mut rp = RegParams::new("quadtree");

    // Test 1: tiling and growth at every stage on odd sizes
    eprintln!("=== Test 1: tiling on odd dimensions ===");
    for (w, h) in [(1, 1), (1, 9), (3, 2), (7, 5), (13, 31), (33, 17)] {
        let image = noise_image(w, h, u64::from(w * 1000 + h)).expect("noise");
        let mut builder = QuadtreeBuilder::new(&image, BuildOptions::default()).expect("builder");
        for _ in 0..6 {
            let before = builder.tree().leaf_count();
            let performed = builder.add_detail(5).expect("add_detail");
            let tree = builder.tree();
            rp.check(performed <= 5, "at most n subdivisions");
            rp.compare_values((before + 3 * performed) as f64, tree.leaf_count() as f64, 0.0);
            rp.check(children_tile_parents(tree), "children tile parent");
            rp.check(leaves_tile_image(tree), "leaves tile image");
        }
    }

    // Test 2: add_detail(0) is a no-op
    eprintln!("=== Test 2: zero iterations ===");
    let image = gradient_image(20, 12).expect("gradient");
    let mut builder = QuadtreeBuilder::new(&image, BuildOptions::default()).expect("builder");
    rp.compare_values(0.0, builder.add_detail(0).expect("add_detail") as f64, 0.0);
    rp.compare_values(1.0, builder.tree().node_count() as f64, 0.0);

    // Test 3: exhaustion renders the source exactly
    eprintln!("=== Test 3: exhaustive refinement ===");
    let image = noise_image(8, 8, 3).expect("noise");
    let mut builder = QuadtreeBuilder::new(&image, BuildOptions::default()).expect("builder");
    builder.add_detail(10_000).expect("add_detail");
    rp.check(builder.is_exhausted(), "queue drains on noise");
    rp.compare_images(&image, &render(builder.tree()).expect("render"));

    // Test 4: split calls add up to one big call
    eprintln!("=== Test 4: additive calls ===");
    let image = noise_image(40, 24, 11).expect("noise");
    let whole = refine(&image, 50);
    let mut builder = QuadtreeBuilder::new(&image, BuildOptions::default()).expect("builder");
    for n in [1, 0, 20, 29] {
        builder.add_detail(n).expect("add_detail");
    }
    let pieces = builder.into_tree();
    rp.compare_values(whole.node_count() as f64, pieces.node_count() as f64, 0.0);
    rp.compare_images(
        &render(&whole).expect("render"),
        &render(&pieces).expect("render"),
    );

    // Test 5: determinism across independent runs
    eprintln!("=== Test 5: determinism ===");
    let board = checkerboard_image(24, 24, 3).expect("checkerboard");
    let a = refine(&board, 37);
    let b = refine(&board, 37);
    let same_shape = a
        .preorder()
        .zip(b.preorder())
        .all(|((_, x), (_, y))| x.region() == y.region() && x.color() == y.color());
    rp.check(same_shape && a.node_count() == b.node_count(), "identical trees");

    // Test 6: uniform image never splits
    eprintln!("=== Test 6: uniform image ===");
    let flat = solid_image(31, 17, Rgb::new(12, 200, 99)).expect("solid");
    for n in [0, 1, 1000] {
        let tree = refine(&flat, n);
        rp.compare_values(1.0, tree.node_count() as f64, 0.0);
        rp.compare_images(&flat, &render(&tree).expect("render"));
    }

    // Test 7: O(1) statistics agree with a direct scan
    eprintln!("=== Test 7: region statistics ===");
    let image = noise_image(23, 19, 5).expect("noise");
    let stats = RegionStats::new(&image);
    let region = Region::new(3, 4, 11, 9).expect("region");
    let sample = stats.query(&region).expect("query");
    let mut sums = [0u64; 3];
    for y in region.y()..region.bottom() {
        for x in region.x()..region.right() {
            let c = image.get_rgb(x, y).expect("pixel").channels();
            for ch in 0..3 {
                sums[ch] += u64::from(c[ch]);
            }
        }
    }
    let n = region.area() as f64;
    let expected = sample.mean.channels();
    for ch in 0..3 {
        rp.compare_values(sums[ch] as f64 / n, f64::from(expected[ch]), 0.5);
    }
    rp.compare_values(sample.combined_std() * n, sample.detail_score(), 1e-6);

    assert!(rp.cleanup());
}
