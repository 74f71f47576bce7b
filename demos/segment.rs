use std::path::PathBuf;

use argh::FromArgs;
use image::Rgb;
use region_irregularity::{
    MarkerConfig, analyze,
    distance_transform::DistanceMask,
    export::save_scores_csv,
    heatmap::render_heatmap,
    irregularity::IrregularityConfig,
    preprocess::{PreprocessConfig, binary_mask},
    region_labelling::{colorize_regions, draw_region_indices_mut, overlay_regions},
};

#[derive(FromArgs)]
/// Segment an image into objects and score how irregular each outline is
struct Args {
    /// path to an input image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// directory for the rendered outputs (default: current directory)
    #[argh(option, short = 'o', default = "PathBuf::from(\".\")")]
    output_dir: PathBuf,

    /// fraction of the largest distance used to find object cores (default: 0.4)
    #[argh(option, short = 'f', default = "0.4")]
    foreground_fraction: f64,

    /// background dilation iterations (default: 3)
    #[argh(option, default = "3")]
    dilation: u8,

    /// distance transform mask size, 3 or 5 (default: 5)
    #[argh(option, default = "5")]
    mask_size: u8,

    /// optional TTF/OTF font used to print region indices on the colorized output
    #[argh(option)]
    font: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let image = image::open(&args.image_path)?.to_rgb8();
    println!(
        "Loaded {} ({}x{})",
        args.image_path.display(),
        image.width(),
        image.height()
    );

    let mask = binary_mask(&image, &PreprocessConfig::default());
    mask.save(args.output_dir.join("mask.png"))?;

    let distance_mask = DistanceMask::from_size(args.mask_size)
        .ok_or_else(|| format!("unsupported mask size {}", args.mask_size))?;
    let config = MarkerConfig::new()
        .with_foreground_fraction(args.foreground_fraction)
        .with_background_dilation(args.dilation)
        .with_distance_mask(distance_mask);

    let analysis = analyze(&mask, &config, &IrregularityConfig::default())?;
    println!("Found {} regions", analysis.region_count);

    let mut colorized = colorize_regions(&analysis.labels);
    if let Some(path) = &args.font {
        let font = ab_glyph::FontVec::try_from_vec(std::fs::read(path)?)?;
        draw_region_indices_mut(
            &mut colorized.image,
            &colorized.annotations,
            &font,
            16.0,
            Rgb([255, 255, 255]),
        );
    }
    colorized.image.save(args.output_dir.join("regions.png"))?;

    overlay_regions(&image, &analysis.labels, 0.5)?.save(args.output_dir.join("overlay.png"))?;

    render_heatmap(&analysis.labels, &analysis.scores)?
        .save(args.output_dir.join("irregularity.png"))?;

    save_scores_csv(args.output_dir.join("irregularity.csv"), &analysis.scores)?;
    for (i, score) in analysis.scores.iter().enumerate() {
        println!("{i:>4}  {score:.4}");
    }

    Ok(())
}
