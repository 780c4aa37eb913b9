use super::*;

#[test]
fn premultiply_round_matches_div255_rounding() {
    for c in 0..=255u32 {
        for a in 0..=255u32 {
            let exact = (c * a + 127) / 255;
            assert_eq!(u32::from(premultiply_round(c as u8, a as u8)), exact, "{c} * {a}");
        }
    }
}

#[test]
fn premultiply_round_identities() {
    for c in 0..=255u8 {
        assert_eq!(premultiply_round(c, 0xff), c);
        assert_eq!(premultiply_round(c, 0), 0);
    }
    assert_eq!(premultiply_round(0x80, 0x80), 0x40);
}

#[test]
fn divide_and_round_rounds_half_up() {
    assert_eq!(divide_and_round(0, 7), 0);
    assert_eq!(divide_and_round(7, 7), 0xff);
    assert_eq!(divide_and_round(1, 2), 128);
    // 127 * 255 / 254 = 127.5 exactly, rounds up.
    assert_eq!(divide_and_round(127, 254), 128);
    assert_eq!(divide_and_round(200, 100), 0xff);
    assert_eq!(divide_and_round(3, 0), 0xff);
}

#[test]
fn clamped_add_saturates() {
    assert_eq!(clamped_add(200, 100), 255);
    assert_eq!(clamped_add(100, 100), 200);
}

#[test]
fn channel_helpers_operate_per_byte() {
    assert_eq!(mul_un8x4_un8(0xff80_4020, 0x80), 0x8040_2010);
    assert_eq!(add_un8x4(0xf0f0_0001, 0x2010_ff01), 0xffff_ff02);
    assert_eq!(mul_un8x4(0xffff_ffff, 0x0080_ff00), 0x0080_ff00);
}
