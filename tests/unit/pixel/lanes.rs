use super::*;

#[test]
fn expand_alpha_broadcasts_lane_three_per_pixel() {
    let mut lanes = [0u16; 16];
    for (i, v) in lanes.iter_mut().enumerate() {
        *v = i as u16;
    }
    let e = U16Lanes(lanes).expand_alpha();
    assert_eq!(&e.0[0..4], &[3, 3, 3, 3]);
    assert_eq!(&e.0[12..16], &[15, 15, 15, 15]);
}

#[test]
fn invert_colors_keeps_alpha_and_green() {
    let p = U16x4::from([1, 2, 3, 4]);
    assert_eq!(p.invert_colors(), U16x4::from([3, 2, 1, 4]));
}

#[test]
fn negate_and_adds_stay_in_channel_range() {
    let p = U16x4::from([0, 1, 254, 255]);
    assert_eq!(p.negate(), U16x4::from([255, 254, 1, 0]));
    assert_eq!(p.adds(U16x4::splat(200)), U16x4::from([200, 201, 255, 255]));
}

#[test]
fn mul_round_uses_bias_and_unit() {
    let p = U16x4::from([255, 128, 1, 0]).mul_round(U16x4::splat(128));
    assert_eq!(p, U16x4::from([128, 64, 1, 0]));
}

#[test]
fn broadcast_and_pixel_round_trip() {
    let p = U16x4::from([9, 8, 7, 6]);
    let wide = U16x16::broadcast(p);
    for i in 0..4 {
        assert_eq!(wide.pixel(i), p);
    }
    assert_eq!(U16x16::from_alphas([1, 2, 3, 4]).pixel(2), U16x4::splat(3));
}
