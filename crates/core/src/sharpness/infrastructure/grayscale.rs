use std::collections::TryReserveError;

use crate::shared::frame::Frame;

/// Converts an RGBA frame to a single-channel luminance frame.
///
/// Integer BT.601 weights in 8.8 fixed point: `y = (77r + 150g + 29b) >> 8`
/// with rounding. Alpha is ignored.
pub fn to_luminance(frame: &Frame) -> Result<Frame, TryReserveError> {
    debug_assert_eq!(frame.channels(), 4, "to_luminance expects an RGBA frame");

    let mut data = Vec::new();
    data.try_reserve_exact(frame.width() as usize * frame.height() as usize)?;

    for px in frame.data().chunks_exact(4) {
        let (r, g, b) = (px[0] as u32, px[1] as u32, px[2] as u32);
        data.push(((77 * r + 150 * g + 29 * b + 128) >> 8) as u8);
    }

    Ok(Frame::new(
        data,
        frame.width(),
        frame.height(),
        1,
        frame.index(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn solid(r: u8, g: u8, b: u8) -> Frame {
        Frame::new(vec![r, g, b, 255], 1, 1, 4, 0)
    }

    #[rstest]
    #[case::white(255, 255, 255, 255)]
    #[case::black(0, 0, 0, 0)]
    #[case::red(255, 0, 0, 77)]
    #[case::green(0, 255, 0, 150)]
    #[case::blue(0, 0, 255, 29)]
    fn test_primary_weights(#[case] r: u8, #[case] g: u8, #[case] b: u8, #[case] expected: u8) {
        let gray = to_luminance(&solid(r, g, b)).unwrap();
        assert_eq!(gray.data(), &[expected]);
    }

    #[test]
    fn test_output_is_single_channel() {
        let frame = Frame::new(vec![128u8; 3 * 2 * 4], 3, 2, 4, 7);
        let gray = to_luminance(&frame).unwrap();
        assert_eq!(gray.channels(), 1);
        assert_eq!(gray.width(), 3);
        assert_eq!(gray.height(), 2);
        assert_eq!(gray.index(), 7);
        assert_eq!(gray.data().len(), 6);
    }

    #[test]
    fn test_uniform_gray_maps_to_itself() {
        let frame = Frame::new(vec![100, 100, 100, 255], 1, 1, 4, 0);
        let gray = to_luminance(&frame).unwrap();
        assert_eq!(gray.data(), &[100]);
    }

    #[test]
    fn test_alpha_ignored() {
        let opaque = to_luminance(&Frame::new(vec![60, 70, 80, 255], 1, 1, 4, 0)).unwrap();
        let transparent = to_luminance(&Frame::new(vec![60, 70, 80, 0], 1, 1, 4, 0)).unwrap();
        assert_eq!(opaque.data(), transparent.data());
    }
}
