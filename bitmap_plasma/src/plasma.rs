//! Fixed point plasma effect rendered into RGB565 pixels.

use std::f64::consts::PI;

use once_cell::sync::Lazy;

/// 16.16 fixed point.
type Fixed = i32;

const FIXED_BITS: u32 = 16;
const FIXED_ONE: Fixed = 1 << FIXED_BITS;

const ANGLE_BITS: u32 = 9;
const ANGLE_2PI: i32 = 1 << ANGLE_BITS;
const ANGLE_PI: i32 = 1 << (ANGLE_BITS - 1);

const PALETTE_BITS: u32 = 8;
const PALETTE_SIZE: usize = 1 << PALETTE_BITS;

// Wraps instead of saturating, only the low bits matter to the angle lookup.
fn fixed_from_float(x: f64) -> Fixed {
    (x * FIXED_ONE as f64) as i64 as Fixed
}

struct Tables {
    sin: [Fixed; ANGLE_2PI as usize + 1],
    palette: [u16; PALETTE_SIZE],
}

static TABLES: Lazy<Tables> = Lazy::new(|| {
    let mut sin = [0; ANGLE_2PI as usize + 1];
    for (n, value) in sin.iter_mut().enumerate() {
        let radians = n as f64 * PI / ANGLE_PI as f64;
        *value = fixed_from_float(radians.sin());
    }
    Tables {
        sin,
        palette: make_palette(),
    }
});

pub fn make_565(red: i32, green: i32, blue: i32) -> u16 {
    (((red << 8) & 0xf800) | ((green << 3) & 0x07e0) | ((blue >> 3) & 0x001f)) as u16
}

/// Four gradients: magenta to yellow, yellow to cyan, cyan to blue and
/// blue to magenta.
fn make_palette() -> [u16; PALETTE_SIZE] {
    let mut palette = [0u16; PALETTE_SIZE];
    let quarter = PALETTE_SIZE / 4;
    for (n, entry) in palette.iter_mut().enumerate() {
        let j = ((n % quarter) * 4 * 255 / PALETTE_SIZE) as i32;
        *entry = match n / quarter {
            0 => make_565(255, j, 255 - j),
            1 => make_565(255 - j, 255, j),
            2 => make_565(0, 255 - j, 255),
            _ => make_565(j, 0, 255),
        };
    }
    palette
}

pub fn palette() -> &'static [u16] {
    &TABLES.palette
}

fn angle_sin(angle: i32) -> Fixed {
    TABLES.sin[(angle & (ANGLE_2PI - 1)) as usize]
}

fn fixed_sin(f: Fixed) -> Fixed {
    angle_sin(f >> (FIXED_BITS - ANGLE_BITS))
}

fn palette_from_fixed(x: Fixed) -> u16 {
    let x = x.saturating_abs().min(FIXED_ONE - 1);
    let index = (x & (FIXED_ONE - 1)) >> (FIXED_BITS - PALETTE_BITS);
    TABLES.palette[index as usize & (PALETTE_SIZE - 1)]
}

/// Fills `height` rows of `width` RGB565 pixels with the plasma for time
/// `t` (milliseconds). Rows are `stride` bytes apart; bytes past
/// `width * 2` in a row are left untouched, as are rows that don't fit in
/// `pixels`.
pub fn fill_plasma(pixels: &mut [u8], width: usize, height: usize, stride: usize, t: f64) {
    let yt_incr = (fixed_from_float(1.0 / 100.0), fixed_from_float(1.0 / 163.0));
    let xt_incr = (fixed_from_float(1.0 / 173.0), fixed_from_float(1.0 / 242.0));

    let mut yt1 = fixed_from_float(t / 1230.0);
    let mut yt2 = yt1;
    let xt10 = fixed_from_float(t / 3000.0);
    let xt20 = xt10;

    let row_bytes = width * 2;
    if stride < row_bytes {
        return;
    }
    for row in pixels.chunks_mut(stride).take(height) {
        let Some(row) = row.get_mut(..row_bytes) else {
            break;
        };
        let base = fixed_sin(yt1).wrapping_add(fixed_sin(yt2));
        let mut xt1 = xt10;
        let mut xt2 = xt20;
        yt1 = yt1.wrapping_add(yt_incr.0);
        yt2 = yt2.wrapping_add(yt_incr.1);

        for pixel in row.chunks_exact_mut(2) {
            let ii = base + fixed_sin(xt1) + fixed_sin(xt2);
            xt1 = xt1.wrapping_add(xt_incr.0);
            xt2 = xt2.wrapping_add(xt_incr.1);
            pixel.copy_from_slice(&palette_from_fixed(ii >> 2).to_ne_bytes());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_565() {
        assert_eq!(make_565(255, 255, 255), 0xffff);
        assert_eq!(make_565(255, 0, 0), 0xf800);
        assert_eq!(make_565(0, 255, 0), 0x07e0);
        assert_eq!(make_565(0, 0, 255), 0x001f);
    }

    #[test]
    fn test_palette_quarters() {
        let palette = palette();
        assert_eq!(palette.len(), 256);
        assert_eq!(palette[0], make_565(255, 0, 255));
        assert_eq!(palette[64], make_565(255, 255, 0));
        assert_eq!(palette[128], make_565(0, 255, 255));
        assert_eq!(palette[192], make_565(0, 0, 255));
        assert_eq!(palette[255], make_565(251, 0, 255));
    }

    #[test]
    fn test_sin_table() {
        assert_eq!(angle_sin(0), 0);
        assert_eq!(angle_sin(ANGLE_PI / 2), FIXED_ONE);
        assert_eq!(angle_sin(ANGLE_PI + ANGLE_PI / 2), -FIXED_ONE);
        // Angles wrap at 2 pi.
        assert_eq!(angle_sin(ANGLE_2PI + 10), angle_sin(10));
        assert_eq!(fixed_sin(FIXED_ONE / 4), FIXED_ONE);
    }

    #[test]
    fn test_palette_from_fixed_clamps() {
        assert_eq!(palette_from_fixed(0), palette()[0]);
        assert_eq!(palette_from_fixed(-FIXED_ONE / 2), palette()[128]);
        assert_eq!(palette_from_fixed(FIXED_ONE * 3), palette()[255]);
        assert_eq!(palette_from_fixed(i32::MIN), palette()[255]);
    }

    #[test]
    fn test_fill_is_deterministic() {
        let mut a = vec![0u8; 64 * 48 * 2];
        let mut b = vec![0u8; 64 * 48 * 2];
        fill_plasma(&mut a, 64, 48, 128, 1234.0);
        fill_plasma(&mut b, 64, 48, 128, 1234.0);
        assert_eq!(a, b);

        let mut c = vec![0u8; 64 * 48 * 2];
        fill_plasma(&mut c, 64, 48, 128, 5678.0);
        assert_ne!(a, c);
    }

    #[test]
    fn test_fill_uses_palette() {
        let mut pixels = vec![0u8; 16 * 16 * 2];
        fill_plasma(&mut pixels, 16, 16, 32, 0.0);
        let palette = palette();
        for pixel in pixels.chunks_exact(2) {
            let value = u16::from_ne_bytes([pixel[0], pixel[1]]);
            assert!(palette.contains(&value));
        }
    }

    #[test]
    fn test_fill_respects_stride() {
        let width = 10;
        let height = 4;
        let stride = 24;
        let mut pixels = vec![0xaau8; stride * height];
        fill_plasma(&mut pixels, width, height, stride, 500.0);

        let mut packed = vec![0u8; width * 2 * height];
        fill_plasma(&mut packed, width, height, width * 2, 500.0);

        for (row, packed_row) in pixels.chunks(stride).zip(packed.chunks(width * 2)) {
            assert_eq!(&row[..width * 2], packed_row);
            assert!(row[width * 2..].iter().all(|b| *b == 0xaa));
        }
    }

    #[test]
    fn test_fill_ignores_short_buffers() {
        let mut pixels = vec![0u8; 10];
        fill_plasma(&mut pixels, 10, 10, 4, 0.0);
        assert!(pixels.iter().all(|b| *b == 0));
        // Only the first row fits.
        let mut pixels = vec![0u8; 30];
        fill_plasma(&mut pixels, 10, 10, 20, 0.0);
        assert!(pixels[20..].iter().all(|b| *b == 0));
    }
}
