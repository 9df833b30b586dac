use super::*;

#[test]
fn filled_frame_has_expected_size() {
    let f = FrameRGBA::filled(3, 2, [1, 2, 3, 255]);
    assert_eq!(f.data.len(), 3 * 2 * 4);
    assert!(f.data.chunks_exact(4).all(|px| px == [1, 2, 3, 255]));
}

#[test]
fn opaque_pixels_are_unchanged_by_unpremultiply() {
    let f = FrameRGBA::filled(1, 1, [50, 50, 50, 255]);
    assert_eq!(f.to_straight_rgba8(), vec![50, 50, 50, 255]);
}

#[test]
fn translucent_pixels_are_unpremultiplied() {
    let f = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![64, 32, 0, 128, 9, 9, 9, 0],
    };
    let straight = f.to_straight_rgba8();
    assert_eq!(&straight[..4], &[128, 64, 0, 128]);
    assert_eq!(&straight[4..], &[0, 0, 0, 0]);
}
