use image::{GrayImage, Luma};
use region_irregularity::{
    LabelBuffer, MarkerConfig, analyze,
    heatmap::render_heatmap,
    irregularity::{IrregularityConfig, score_regions},
    labels::{BACKGROUND, BOUNDARY, FIRST_REGION, UNKNOWN, is_region},
    markers::generate_markers,
    region_growing::grow_regions,
    segment,
};

fn disks(width: u32, height: u32, disks: &[(i64, i64, i64)]) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| {
        let inside = disks.iter().any(|&(cx, cy, r)| {
            let (dx, dy) = (x as i64 - cx, y as i64 - cy);
            dx * dx + dy * dy <= r * r
        });
        Luma([if inside { 255 } else { 0 }])
    })
}

#[test]
fn single_blob_yields_one_region_without_boundary() {
    let mask = disks(80, 80, &[(40, 40, 18)]);
    let result = segment(&mask, &MarkerConfig::default()).unwrap();

    assert_eq!(result.region_count, 1);
    assert_eq!(result.labels.region_labels(), vec![FIRST_REGION]);
    assert_eq!(result.labels.count(BOUNDARY), 0);
    assert_eq!(result.labels.count(UNKNOWN), 0);
}

#[test]
fn distant_blobs_never_touch() {
    let mask = disks(120, 60, &[(25, 30, 12), (95, 30, 12)]);
    let result = segment(&mask, &MarkerConfig::default()).unwrap();

    assert_eq!(result.region_count, 2);
    assert_eq!(result.labels.count(BOUNDARY), 0);
}

#[test]
fn close_blobs_are_split_by_a_boundary() {
    // Three background columns between the disks; the dilated bands overlap.
    let mask = disks(70, 40, &[(20, 20, 10), (44, 20, 10)]);
    let result = segment(&mask, &MarkerConfig::default()).unwrap();

    assert_eq!(result.region_count, 2);
    assert!(result.labels.count(BOUNDARY) > 0);
    assert_eq!(result.labels.get(20, 20), 2);
    assert_eq!(result.labels.get(44, 20), 3);
}

#[test]
fn growth_keeps_seeds_and_invents_nothing() {
    let mask = disks(70, 40, &[(20, 20, 10), (44, 20, 10)]);
    let markers = generate_markers(&mask, &MarkerConfig::default()).unwrap();
    let grown = grow_regions(markers.labels.clone());

    let before = markers.labels.region_labels();
    for label in grown.labels.region_labels() {
        assert!(before.contains(&label));
    }
    for (x, y, label) in markers.labels.iter() {
        let after = grown.labels.get(x, y);
        if is_region(label) {
            assert!(after == label || after == BOUNDARY, "({x}, {y}) {label} -> {after}");
        }
        if label == BACKGROUND {
            assert_eq!(after, BACKGROUND);
        }
    }
}

#[test]
fn growing_twice_changes_nothing() {
    let mask = disks(90, 60, &[(20, 20, 10), (44, 22, 11), (30, 42, 9), (70, 40, 14)]);
    let once = segment(&mask, &MarkerConfig::default()).unwrap();
    let twice = grow_regions(once.labels.clone());
    assert_eq!(once, twice);
}

#[test]
fn rasterized_disk_is_nearly_circular() {
    let mask = disks(100, 100, &[(50, 50, 25)]);
    let analysis = analyze(&mask, &MarkerConfig::default(), &IrregularityConfig::default())
        .unwrap();

    assert_eq!(analysis.scores.len(), 1);
    assert!(
        (analysis.scores[0] - 1.0).abs() < 0.05,
        "index {}",
        analysis.scores[0]
    );
}

#[test]
fn equal_scores_paint_every_region_blue() {
    let mask = disks(120, 40, &[(20, 20, 10), (60, 20, 10), (100, 20, 10)]);
    let result = segment(&mask, &MarkerConfig::default()).unwrap();
    assert_eq!(result.region_count, 3);

    let image = render_heatmap(&result.labels, &[1.0, 1.0, 1.0]).unwrap();
    for (x, y) in [(20, 20), (60, 20), (100, 20)] {
        assert_eq!(image.get_pixel(x, y).0, [0, 0, 255]);
    }
    assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0]);
}

#[test]
fn blank_mask_runs_end_to_end() {
    let mask = GrayImage::new(100, 100);
    let markers = generate_markers(&mask, &MarkerConfig::default()).unwrap();
    assert_eq!(markers.region_count, 0);

    let grown = grow_regions(markers.labels.clone());
    assert_eq!(grown, markers);

    let scores = score_regions(&grown.labels, &IrregularityConfig::default());
    assert!(scores.is_empty());

    let heatmap = render_heatmap(&grown.labels, &scores).unwrap();
    assert_eq!(heatmap.dimensions(), (100, 100));
    assert!(heatmap.pixels().all(|p| p.0 == [0, 0, 0]));
}

#[test]
fn hand_built_buffers_are_accepted() {
    let labels = LabelBuffer::from_rows(&[[2, 0, 0, 3], [1, 0, 0, 1]]).unwrap();
    let grown = grow_regions(labels);
    assert_eq!(grown.region_count, 2);
    assert_eq!(grown.labels.count(UNKNOWN), 0);
}
