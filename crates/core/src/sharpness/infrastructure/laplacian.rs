use std::collections::TryReserveError;

use crate::shared::frame::Frame;

/// Applies the discrete 3x3 Laplacian to a grayscale frame, saturating the
/// response to u8.
///
/// Kernel:
/// ```text
/// [ 0  1  0 ]
/// [ 1 -4  1 ]
/// [ 0  1  0 ]
/// ```
///
/// Borders are handled with reflect-101 mirroring (`gfedcb|abcdefgh|gfedcba`),
/// so edge pixels see their interior neighbors reflected rather than a padded
/// constant. Negative responses clamp to 0, responses above 255 to 255.
pub fn laplacian_u8(gray: &Frame) -> Result<Frame, TryReserveError> {
    debug_assert_eq!(gray.channels(), 1, "laplacian_u8 expects a grayscale frame");

    let w = gray.width() as i64;
    let h = gray.height() as i64;
    let src = gray.data();

    let mut data = Vec::new();
    data.try_reserve_exact(src.len())?;

    let at = |x: i64, y: i64| -> i32 { src[(reflect(y, h) * w + reflect(x, w)) as usize] as i32 };

    for y in 0..h {
        for x in 0..w {
            let response =
                at(x, y - 1) + at(x, y + 1) + at(x - 1, y) + at(x + 1, y) - 4 * at(x, y);
            data.push(response.clamp(0, 255) as u8);
        }
    }

    Ok(Frame::new(
        data,
        gray.width(),
        gray.height(),
        1,
        gray.index(),
    ))
}

/// Reflect-101 index mirroring: -1 maps to 1, `n` maps to `n - 2`.
/// Dimensions of 1 collapse to index 0.
fn reflect(i: i64, n: i64) -> i64 {
    if n == 1 {
        return 0;
    }
    if i < 0 {
        -i
    } else if i >= n {
        2 * n - 2 - i
    } else {
        i
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(data: Vec<u8>, w: u32, h: u32) -> Frame {
        Frame::new(data, w, h, 1, 0)
    }

    #[test]
    fn test_flat_image_has_zero_response() {
        let out = laplacian_u8(&gray(vec![90u8; 25], 5, 5)).unwrap();
        assert!(out.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_bright_dot_lights_up_neighbors() {
        // Single white pixel at the center of a 5x5 black frame.
        let mut data = vec![0u8; 25];
        data[12] = 255;
        let out = laplacian_u8(&gray(data, 5, 5)).unwrap();

        // Center response is -4*255, clamped to 0.
        assert_eq!(out.data()[12], 0);
        // The four neighbors each see the white pixel once.
        assert_eq!(out.data()[7], 255);
        assert_eq!(out.data()[11], 255);
        assert_eq!(out.data()[13], 255);
        assert_eq!(out.data()[17], 255);
        // Diagonals are untouched by the 4-connected kernel.
        assert_eq!(out.data()[6], 0);
        assert_eq!(out.data()[8], 0);
    }

    #[test]
    fn test_step_edge_response() {
        // 4x1 step: 0 0 255 255
        let out = laplacian_u8(&gray(vec![0, 0, 255, 255], 4, 1)).unwrap();
        // x=1: left 0 + right 255 + mirrored vertical (2*center=0) - 4*0 = 255
        assert_eq!(out.data()[1], 255);
        // x=2: 0 + 255 + 2*255 - 4*255 < 0 -> clamped
        assert_eq!(out.data()[2], 0);
    }

    #[test]
    fn test_reflect_101_mirroring() {
        assert_eq!(reflect(-1, 10), 1);
        assert_eq!(reflect(0, 10), 0);
        assert_eq!(reflect(9, 10), 9);
        assert_eq!(reflect(10, 10), 8);
        assert_eq!(reflect(-1, 1), 0);
        assert_eq!(reflect(1, 1), 0);
    }

    #[test]
    fn test_border_uses_mirrored_interior() {
        // 3x3 with a bright left column: the left border's out-of-range
        // neighbor mirrors to the interior column, not to zero padding.
        let out = laplacian_u8(&gray(vec![200, 0, 0, 200, 0, 0, 200, 0, 0], 3, 3)).unwrap();
        // Pixel (0,1): up 200 + down 200 + left (mirror of x=1 -> 0) + right 0
        // - 4*200 < 0 -> 0
        assert_eq!(out.data()[3], 0);
        // Pixel (1,1): up 0 + down 0 + left 200 + right 0 - 0 = 200
        assert_eq!(out.data()[4], 200);
    }

    #[test]
    fn test_output_shape_matches_input() {
        let out = laplacian_u8(&gray(vec![0u8; 12], 4, 3)).unwrap();
        assert_eq!(out.width(), 4);
        assert_eq!(out.height(), 3);
        assert_eq!(out.channels(), 1);
    }
}
