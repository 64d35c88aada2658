//! Octree quantization regression test
//!
//! Checks the pixel bookkeeping of the tree, the bounds on palette size,
//! exact reproduction of single colors, and the banding of a gray ramp.

use rgbquant_octree::rgbquant_core::RgbQuad;
use rgbquant_octree::{OctreeOptions, OctreeQuantizer, QuantError};
use rgbquant_test::{RegParams, color_blocks, color_gradient, gray_ramp, pseudo_random_pixels};

fn quantizer_with(depth: u32, pixels: &[[u8; 3]]) -> OctreeQuantizer {
    let mut q = OctreeQuantizer::new();
    q.set_depth(depth).unwrap();
    q.insert_slice(pixels).unwrap();
    q
}

/// Own pixels of a node plus those of every child still attached to it.
fn reachable_pixels(q: &OctreeQuantizer, level: u32, index: u32) -> u64 {
    let node = q.node(level, index).unwrap();
    let mut total = node.own_pixels as u64;
    for octant in 0..8u32 {
        if node.child_mask & (1 << octant) != 0 {
            total += reachable_pixels(q, level + 1, (index << 3) + octant);
        }
    }
    total
}

fn check_base_counts(rp: &mut RegParams, depth: u32, pixels: &[[u8; 3]]) {
    let q = quantizer_with(depth, pixels);
    let base = depth - 1;
    let total: u64 = (0..1u32 << (3 * base))
        .map(|index| q.node(base, index).unwrap().own_pixels as u64)
        .sum();
    rp.compare_values(pixels.len() as f64, total as f64, 0.0);
    rp.compare_values(pixels.len() as f64, q.pixel_count() as f64, 0.0);
}

fn check_surviving_nodes(rp: &mut RegParams, depth: u32, pixels: &[[u8; 3]], max_colors: u32) {
    let mut q = quantizer_with(depth, pixels);
    let count = q.build_palette(max_colors).unwrap().len();
    rp.compare_values(count as f64, q.colors_in_tree() as f64, 0.0);

    let survivors = q.surviving_nodes().to_vec();
    let mut own_total = 0u64;
    for loc in &survivors {
        let node = q.node(loc.level, loc.index).unwrap();
        own_total += node.own_pixels as u64;
        rp.check(node.own_pixels > 0, "surviving node holds pixels");
        rp.compare_values(
            node.descendant_pixels as f64,
            reachable_pixels(&q, loc.level, loc.index) as f64,
            0.0,
        );
    }
    rp.compare_values(pixels.len() as f64, own_total as f64, 0.0);
    rp.compare_values(
        pixels.len() as f64,
        q.node(0, 0).unwrap().descendant_pixels as f64,
        0.0,
    );
}

fn check_palette_bounds(rp: &mut RegParams, name: &str, pixels: &[[u8; 3]]) {
    eprintln!("  Testing '{}': {} pixels", name, pixels.len());
    let mut q = quantizer_with(5, pixels);
    q.build_palette(256).unwrap();
    let unique = q.unique_colors();

    for &max_colors in &[1u32, 2, 16, 64, 128, 200, 256] {
        q.clear().unwrap();
        q.insert_slice(pixels).unwrap();
        let count = q.build_palette(max_colors).unwrap().len();
        rp.check(count <= max_colors as usize, "palette within max_colors");
        rp.compare_values(unique.min(max_colors as usize) as f64, count as f64, 0.0);
        rp.compare_values(unique as f64, q.unique_colors() as f64, 0.0);
    }
}

#[test]
fn octree_quant_reg() {
    let mut rp = RegParams::new("octree_quant");

    let gradient = color_gradient(200, 150);
    let noise = pseudo_random_pixels(20_000, 42);

    // Every insert lands in exactly one base node
    for depth in [2, 4, 6] {
        check_base_counts(&mut rp, depth, &gradient);
        check_base_counts(&mut rp, depth, &noise);
    }

    // Surviving nodes account for every pixel
    for (depth, max_colors) in [(5, 16), (5, 255), (6, 64), (3, 7), (4, 1)] {
        check_surviving_nodes(&mut rp, depth, &noise, max_colors);
        check_surviving_nodes(&mut rp, depth, &gradient, max_colors);
    }

    // Palette size never exceeds the request and equals it when reducing
    check_palette_bounds(&mut rp, "gradient", &gradient);
    check_palette_bounds(&mut rp, "noise", &noise);

    // Few colors pass through unchanged
    {
        let colors = [[255, 0, 0], [0, 255, 0], [0, 0, 255], [12, 34, 56]];
        let mut q = quantizer_with(6, &color_blocks(&colors, 25));
        let palette = q.build_palette(16).unwrap();
        rp.compare_values(4.0, palette.len() as f64, 0.0);
        for [r, g, b] in colors {
            rp.check(
                palette.colors().contains(&RgbQuad::new(r, g, b)),
                "exact color survives",
            );
        }
    }

    assert!(rp.cleanup(), "octree_quant regression test failed");
}

#[test]
fn octree_single_color_reg() {
    let mut rp = RegParams::new("octree_single_color");

    for depth in [2, 5, 8] {
        let mut q = OctreeQuantizer::new();
        q.set_depth(depth).unwrap();
        for _ in 0..1000 {
            q.insert(200, 50, 10).unwrap();
        }
        let palette = q.build_palette(16).unwrap();
        rp.compare_values(1.0, palette.len() as f64, 0.0);
        rp.check(
            palette.get_rgb(0) == Some((200, 50, 10)),
            "single color reproduced exactly",
        );
    }

    // Two colors sharing a coarse cube average with rounding half up
    {
        let mut q = OctreeQuantizer::new();
        q.set_depth(2).unwrap();
        q.insert(10, 10, 10).unwrap();
        q.insert(11, 13, 12).unwrap();
        let palette = q.build_palette(4).unwrap();
        rp.check(palette.get_rgb(0) == Some((11, 12, 11)), "rounded average");
    }

    assert!(rp.cleanup(), "octree_single_color regression test failed");
}

#[test]
fn octree_gray_ramp_reg() {
    let mut rp = RegParams::new("octree_gray_ramp");

    let ramp = gray_ramp();
    let mut q = quantizer_with(8, &ramp);
    let palette = q.build_palette(16).unwrap().clone();
    rp.compare_values(16.0, palette.len() as f64, 0.0);
    rp.check(palette.is_grayscale(), "gray input gives gray palette");

    // Bands of 16 consecutive grays, brightest band first
    for (slot, entry) in palette.colors().iter().enumerate() {
        rp.compare_values(248.0 - 16.0 * slot as f64, entry.red as f64, 0.0);
    }

    for i in 0..=255u8 {
        let index = q.nearest_color_index(i, i, i).unwrap().unwrap();
        let (r, _, _) = palette.get_rgb(index).unwrap();
        let band_center = (i as u32 / 16) * 16 + 8;
        rp.compare_values(band_center as f64, r as f64, 0.0);
    }

    assert!(rp.cleanup(), "octree_gray_ramp regression test failed");
}

#[test]
fn octree_reuse_reg() {
    let mut rp = RegParams::new("octree_reuse");

    let first = pseudo_random_pixels(5000, 3);
    let second = color_gradient(64, 64);
    let options = OctreeOptions {
        depth: 6,
        max_colors: 32,
        ..Default::default()
    };

    let mut q = OctreeQuantizer::from_options(&options).unwrap();
    q.insert_slice(&first).unwrap();
    q.build_palette(options.max_colors).unwrap();
    q.clear().unwrap();
    q.insert_slice(&second).unwrap();
    let reused = q.build_palette(options.max_colors).unwrap().clone();

    let mut fresh = OctreeQuantizer::from_options(&options).unwrap();
    fresh.insert_slice(&second).unwrap();
    let expected = fresh.build_palette(options.max_colors).unwrap();
    rp.compare_strings(&expected.to_bgrx_bytes(), &reused.to_bgrx_bytes());

    // Reconfiguring after a build needs an explicit clear
    rp.check(
        matches!(q.set_depth(4), Err(QuantError::InvalidPhase { .. })),
        "depth change after build rejected",
    );
    q.clear().unwrap();
    rp.check(q.set_depth(4).is_ok(), "depth change after clear");
    rp.compare_values(4.0, q.depth().unwrap_or(0) as f64, 0.0);

    assert!(rp.cleanup(), "octree_reuse regression test failed");
}

/// Red sums of 9M x 255 fit one node; two such nodes merged do not.
fn fill_white_and_red(q: &mut OctreeQuantizer) -> bool {
    (0..9_000_000).all(|_| {
        q.try_insert(255, 255, 255).is_ok() && q.try_insert(255, 0, 0).is_ok()
    })
}

#[test]
fn octree_weight_overflow_reg() {
    let mut rp = RegParams::new("octree_weight_overflow");

    let mut q = OctreeQuantizer::new();
    q.set_depth(2).unwrap();
    rp.check(fill_white_and_red(&mut q), "checked inserts accepted");
    rp.check(
        matches!(q.build_palette(1), Err(QuantError::WeightOverflow { level: 0, .. })),
        "merge past 2^32 reported",
    );
    rp.compare_values(0.0, q.pixel_count() as f64, 0.0);
    rp.check(q.palette().is_none(), "no palette after failed build");

    // Without merging, both colors come back exactly
    rp.check(fill_white_and_red(&mut q), "checked inserts accepted after reset");
    let palette = q.build_palette(2).unwrap();
    rp.check(palette.get_rgb(0) == Some((255, 255, 255)), "white kept");
    rp.check(palette.get_rgb(1) == Some((255, 0, 0)), "red kept");

    assert!(rp.cleanup(), "octree_weight_overflow regression test failed");
}
