use super::*;

#[test]
fn over_skips_transparent_and_copies_opaque() {
    let mut dst = [0x8011_2233u32; 11];
    let mut src = [0u32; 11];
    src[3] = 0xff44_5566;
    src[8] = 0xff00_0000;
    over_u(&mut dst, &src, None);
    for (i, d) in dst.iter().enumerate() {
        match i {
            3 => assert_eq!(*d, 0xff44_5566),
            8 => assert_eq!(*d, 0xff00_0000),
            _ => assert_eq!(*d, 0x8011_2233),
        }
    }
}

#[test]
fn over_with_zero_mask_leaves_destination() {
    let mut dst = [0x1234_5678u32; 8];
    let src = [0xffff_ffffu32; 8];
    let mask = [0x00ff_ffffu32; 8];
    over_u(&mut dst, &src, Some(&mask));
    assert_eq!(dst, [0x1234_5678; 8]);
}

#[test]
fn add_saturates_channels() {
    let mut dst = [0x80c0_4001u32; 6];
    let src = [0x9050_c0ffu32; 6];
    add_u(&mut dst, &src, None);
    assert_eq!(dst, [0xffff_ffff; 6]);
}

#[test]
fn saturate_matches_add_within_headroom() {
    // dest alpha 0x40 leaves 0xbf of headroom
    let mut sat = [0x4010_1010u32; 7];
    let mut add = sat;
    let src = [0xbf20_3040u32; 7];
    saturate_u(&mut sat, &src, None);
    add_u(&mut add, &src, None);
    assert_eq!(sat, add);
}

#[test]
fn saturate_scales_source_beyond_headroom() {
    let mut dst = [0x8000_0000u32; 5];
    let src = [0xff00_00ffu32; 5];
    saturate_u(&mut dst, &src, None);
    // headroom 0x7f: source scaled by 0x7f/0xff
    for d in dst {
        assert_eq!(d >> 24, 0xff);
        assert_eq!(d & 0xff, 0x7f);
    }
}

#[test]
fn in_and_out_partition_the_source() {
    let dst = [0x8000_0000u32; 4];
    let src = [0xffff_ffffu32; 4];
    let mut inside = dst;
    let mut outside = dst;
    in_u(&mut inside, &src, None);
    out_u(&mut outside, &src, None);
    assert_eq!(inside[0], 0x8080_8080);
    assert_eq!(outside[0], 0x7f7f_7f7f);
}

#[test]
fn src_copies_or_scales_by_mask_alpha() {
    let mut dst = [0u32; 5];
    let src = [0xff80_4020u32; 5];
    src_u(&mut dst, &src, None);
    assert_eq!(dst, src);
    let mask = [0x8000_0000u32; 5];
    src_u(&mut dst, &src, Some(&mask));
    assert_eq!(dst, [0x8040_2010; 5]);
}

#[test]
fn xor_of_opaque_pixels_is_clear() {
    let mut dst = [0xff12_3456u32; 9];
    let src = [0xff65_4321u32; 9];
    xor_u(&mut dst, &src, None);
    assert_eq!(dst, [0; 9]);
}
