use image::Rgb;
use palette::{FromColor, Hsl, Srgb};

/// Generates `n` visually distinct, contrasting RGB colors.
///
/// Hues are spread evenly around the color wheel starting at `hue_offset` degrees.
pub(crate) fn generate_contrasting_colors(n: usize, hue_offset: f32) -> Vec<Rgb<u8>> {
    let mut colors = Vec::with_capacity(n);

    for i in 0..n {
        let hue = (hue_offset + (i as f32 * 360.0) / n as f32).rem_euclid(360.0);

        let saturation = 0.9;
        let lightness = 0.5;

        let hsl_color = Hsl::new(hue, saturation, lightness);
        let srgb_linear = Srgb::from_color(hsl_color);
        let srgb_u8: Srgb<u8> = srgb_linear.into_format();

        colors.push(Rgb([srgb_u8.red, srgb_u8.green, srgb_u8.blue]));
    }

    colors
}

/// Blue-to-red gradient: `t = 0` is pure blue, `t = 1` pure red, green stays off.
///
/// `t` is clamped to `[0, 1]`.
pub(crate) fn heat_color(t: f64) -> Rgb<u8> {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let red = (255.0 * t).round() as u8;
    let blue = (255.0 * (1.0 - t)).round() as u8;
    Rgb([red, 0, blue])
}
