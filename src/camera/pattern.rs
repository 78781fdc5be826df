//! Synthetic preview pattern for the mock camera.

/// Simple pseudo-random number generator (LCG) for reproducible noise.
#[inline]
fn prng(seed: u64) -> u64 {
    seed.wrapping_mul(1103515245).wrapping_add(12345) & 0x7fffffff
}

/// Generates an animated RGB8 preview pattern.
///
/// The pattern is meant to stand in for a live view of a plate of food:
/// - a warm diagonal gradient background with per-frame noise
/// - a bright "plate" disc in the center
/// - a highlight that orbits the plate so motion is visible in the preview
/// - frame-counter dots in the top-left corner
///
/// # Arguments
/// * `width` - Frame width in pixels
/// * `height` - Frame height in pixels
/// * `frame_num` - Frame number (drives the animation)
///
/// # Returns
/// A tightly packed RGB8 buffer of `width * height * 3` bytes.
pub fn generate_preview_pattern(width: u32, height: u32, frame_num: u64) -> Vec<u8> {
    let w = width as usize;
    let h = height as usize;
    let mut buffer = vec![0u8; w * h * 3];

    let cx = w as f64 / 2.0;
    let cy = h as f64 / 2.0;
    let plate_radius = (w.min(h) as f64) * 0.35;

    // Highlight orbits the plate with a period of ~90 frames.
    let angle = frame_num as f64 * 0.07;
    let spot_x = cx + plate_radius * 0.6 * angle.cos();
    let spot_y = cy + plate_radius * 0.6 * angle.sin();
    let spot_sigma = plate_radius * 0.25;

    let frame_seed = frame_num.wrapping_mul(2654435761);

    for y in 0..h {
        for x in 0..w {
            let idx = (y * w + x) * 3;

            // Warm gradient background with a little per-frame noise.
            let t = (x + y) as f64 / (w + h) as f64;
            let noise = (prng(frame_seed ^ ((y * w + x) as u64)) & 0x1F) as f64 - 16.0;
            let mut r = 90.0 + 80.0 * t + noise;
            let mut g = 60.0 + 50.0 * t + noise;
            let mut b = 40.0 + 30.0 * t + noise;

            // Plate disc.
            let dx = x as f64 - cx;
            let dy = y as f64 - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist < plate_radius {
                let rim = ((plate_radius - dist) / plate_radius).min(1.0);
                r = 200.0 + 40.0 * rim;
                g = 190.0 + 40.0 * rim;
                b = 180.0 + 40.0 * rim;
            }

            // Orbiting highlight (additive Gaussian).
            let sx = x as f64 - spot_x;
            let sy = y as f64 - spot_y;
            let gaussian = (-(sx * sx + sy * sy) / (2.0 * spot_sigma * spot_sigma)).exp();
            r += 50.0 * gaussian;
            g += 45.0 * gaussian;
            b += 30.0 * gaussian;

            buffer[idx] = r.clamp(0.0, 255.0) as u8;
            buffer[idx + 1] = g.clamp(0.0, 255.0) as u8;
            buffer[idx + 2] = b.clamp(0.0, 255.0) as u8;
        }
    }

    // Frame-counter dots: low 4 bits of the frame number, top-left corner.
    let dot_radius = (w.min(h) / 60).max(2) as i32;
    let dot_spacing = dot_radius * 3;
    for bit in 0i32..4 {
        let dot_x = dot_spacing + bit * dot_spacing;
        let dot_y = dot_spacing;
        let on = (frame_num >> bit) & 1 == 1;
        let value = if on { 255 } else { 30 };
        for y in (dot_y - dot_radius).max(0)..(dot_y + dot_radius).min(h as i32) {
            for x in (dot_x - dot_radius).max(0)..(dot_x + dot_radius).min(w as i32) {
                let dx = x - dot_x;
                let dy = y - dot_y;
                if dx * dx + dy * dy <= dot_radius * dot_radius {
                    let idx = (y as usize * w + x as usize) * 3;
                    buffer[idx] = value;
                    buffer[idx + 1] = value;
                    buffer[idx + 2] = value;
                }
            }
        }
    }

    buffer
}
