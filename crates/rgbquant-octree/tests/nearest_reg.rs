//! Nearest-color regression test
//!
//! Checks the resolver against a brute-force scan, the one-entry cache,
//! and the buffer-level pipeline built on top of it.

use rgbquant_octree::rgbquant_core::RgbQuad;
use rgbquant_octree::{ChannelWeights, OctreeOptions, OctreeQuantizer, QuantError, quantize_rgb};
use rgbquant_test::{RegParams, color_gradient, pseudo_random_pixels};

/// Lowest index of the entries at minimal weighted distance
fn brute_force(colors: &[RgbQuad], weights: ChannelWeights, px: [u8; 3]) -> usize {
    let dist = |entry: &RgbQuad| {
        let d = |a: u8, b: u8| (a as i64 - b as i64).pow(2);
        d(entry.red, px[0]) * weights.red as i64
            + d(entry.green, px[1]) * weights.green as i64
            + d(entry.blue, px[2]) * weights.blue as i64
    };
    let mut best = 0;
    for (index, entry) in colors.iter().enumerate() {
        if dist(entry) < dist(&colors[best]) {
            best = index;
        }
    }
    best
}

fn check_against_scan(rp: &mut RegParams, weights: ChannelWeights, max_colors: u32) {
    let pixels = pseudo_random_pixels(8000, 17);
    let mut q = OctreeQuantizer::with_weights(weights);
    q.set_depth(5).unwrap();
    q.insert_slice(&pixels).unwrap();
    let colors = q.build_palette(max_colors).unwrap().colors().to_vec();
    rp.compare_values(max_colors as f64, colors.len() as f64, 0.0);

    let queries = pseudo_random_pixels(2000, 23);
    let mut mismatches = 0;
    for &px in &queries {
        let index = q.nearest_color_index(px[0], px[1], px[2]).unwrap();
        if index != Some(brute_force(&colors, weights, px)) {
            mismatches += 1;
        }
    }
    rp.compare_values(0.0, mismatches as f64, 0.0);
}

#[test]
fn nearest_reg() {
    let mut rp = RegParams::new("nearest");

    eprintln!("  Testing against a full scan");
    check_against_scan(&mut rp, ChannelWeights::FAST, 64);
    check_against_scan(&mut rp, ChannelWeights::LUMA, 16);
    check_against_scan(&mut rp, ChannelWeights::FAST, 255);

    eprintln!("  Testing the last-query cache");
    {
        let mut q = OctreeQuantizer::new();
        q.set_depth(4).unwrap();
        q.insert_slice(&color_gradient(32, 32)).unwrap();
        q.build_palette(8).unwrap();

        let first = q.nearest_color_index(10, 200, 90).unwrap();
        let second = q.nearest_color_index(10, 200, 90).unwrap();
        rp.check(first == second, "repeated query returns same index");
        let stats = q.nearest_stats();
        rp.compare_values(2.0, stats.queries as f64, 0.0);
        rp.compare_values(1.0, stats.cache_hits as f64, 0.0);

        // A different color misses, and so does the first color again
        q.nearest_color_index(11, 200, 90).unwrap();
        q.nearest_color_index(10, 200, 90).unwrap();
        rp.compare_values(1.0, q.nearest_stats().cache_hits as f64, 0.0);

        // A rebuilt palette must not be answered from the old cache
        q.clear().unwrap();
        q.insert_slice(&[[0, 0, 0], [255, 255, 255]]).unwrap();
        q.build_palette(2).unwrap();
        let white = q.nearest_color_index(250, 250, 250).unwrap();
        rp.check(white == Some(0), "white maps to white after rebuild");
        let hits = q.nearest_stats().cache_hits;
        q.nearest_color_index(250, 250, 250).unwrap();
        rp.compare_values((hits + 1) as f64, q.nearest_stats().cache_hits as f64, 0.0);
    }

    assert!(rp.cleanup(), "nearest regression test failed");
}

#[test]
fn nearest_pipeline_reg() {
    let mut rp = RegParams::new("nearest_pipeline");

    let pixels = color_gradient(120, 80);
    for max_colors in [2u32, 16, 128, 256] {
        let options = OctreeOptions {
            max_colors,
            ..Default::default()
        };
        let result = quantize_rgb(&pixels, &options).unwrap();
        rp.check(
            result.palette.len() <= max_colors as usize,
            "palette within max_colors",
        );
        rp.compare_values(pixels.len() as f64, result.indices.len() as f64, 0.0);

        let colors = result.palette.colors();
        let out_of_range = result
            .indices
            .iter()
            .filter(|&&index| index as usize >= colors.len())
            .count();
        rp.compare_values(0.0, out_of_range as f64, 0.0);

        let mut mismatches = 0;
        for (px, &index) in pixels.iter().zip(&result.indices).step_by(37) {
            if index as usize != brute_force(colors, options.weights, *px) {
                mismatches += 1;
            }
        }
        rp.compare_values(0.0, mismatches as f64, 0.0);
    }

    rp.check(
        matches!(
            quantize_rgb(&[], &OctreeOptions::default()),
            Err(QuantError::EmptyInput)
        ),
        "empty input rejected",
    );

    assert!(rp.cleanup(), "nearest_pipeline regression test failed");
}
