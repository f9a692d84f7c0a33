use crate::math::Color;

/// Reinhard tone mapping operated on luminance only (rather than per
/// channel), which compresses bright areas toward white without desaturating
/// hue the way a per-channel Reinhard does.
fn reinhard_luminance(c: Color) -> Color {
    let luminance = 0.2126 * c.x + 0.7152 * c.y + 0.0722 * c.z;
    if luminance <= 0.0 {
        return Color::zero();
    }
    let mapped_luminance = luminance / (1.0 + luminance);
    c * (mapped_luminance / luminance)
}

/// sRGB opto-electronic transfer function (linear -> display-referred).
fn srgb_oetf(x: f64) -> f64 {
    let x = x.clamp(0.0, 1.0);
    if x <= 0.0031308 {
        x * 12.92
    } else {
        1.055 * x.powf(1.0 / 2.4) - 0.055
    }
}

/// Converts one linear-radiance pixel to an 8-bit sRGB triple. When
/// `tone_map` is false the pixel is clamped directly to [0, 1] rather than
/// compressed — useful for inspecting a still-converging, low-sample-count
/// render without the nonlinearity of Reinhard fighting the noise.
pub fn to_ldr(c: Color, tone_map: bool) -> [u8; 3] {
    let mapped = if tone_map { reinhard_luminance(c) } else { c };
    let r = srgb_oetf(mapped.x.max(0.0));
    let g = srgb_oetf(mapped.y.max(0.0));
    let b = srgb_oetf(mapped.z.max(0.0));
    [quantize(r), quantize(g), quantize(b)]
}

fn quantize(v: f64) -> u8 {
    (v * 255.999).floor().clamp(0.0, 255.0) as u8
}
