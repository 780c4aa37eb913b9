use super::*;
use crate::foundation::core::{Operator, PixelFormat};
use crate::image::Image;
use crate::scale::{Filter, composite_scaled};

const SRC: [u32; 8] = [
    0xff10_2030,
    0x8040_0020,
    0x0000_0000,
    0xfffe_fdfc,
    0x7f7f_7f7f,
    0xff00_ff00,
    0x1008_0402,
    0xc0c0_0000,
];

fn run(
    op: Operator,
    format: PixelFormat,
    src_words: &[u32],
    mask: Option<&Image<'_>>,
    params: ScaleParams,
    (width, height): (u32, u32),
    background: u32,
) -> Vec<u32> {
    let src = Bits::new(format, 4, 2, 4, src_words).unwrap();
    let mut words = vec![background; (width * height) as usize];
    let mut dest =
        BitsMut::new(PixelFormat::A8R8G8B8, width, height, width as usize, &mut words).unwrap();
    composite_scaled(
        op,
        Filter::Bilinear,
        &src,
        mask,
        &mut dest,
        &CompositeRect::new(width, height),
        &params,
    )
    .unwrap();
    words
}

#[test]
fn equal_neighbours_interpolate_to_themselves() {
    for p in SRC {
        for (wt, dx) in [(128, 0), (64, 64), (1, 127), (100, 3)] {
            assert_eq!(interpolate(p, p, p, p, wt, 128 - wt, dx), p);
        }
    }
}

#[test]
fn midpoint_rounds_down() {
    let white = 0xffff_ffff;
    assert_eq!(interpolate(0, white, 0, white, 64, 64, 64), 0x7f7f_7f7f);
    assert_eq!(interpolate(0, 0, white, white, 0, 128, 0), white);
}

#[test]
fn weights_take_the_top_fraction_bits() {
    assert_eq!(weight(0x8000), 64);
    assert_eq!(weight(0x3_0000), 0);
    assert_eq!(weight(0x1_ffff), 127);
    assert_eq!(weight(-0x8000), 64);
}

#[test]
fn bounds_mark_straddling_pixels() {
    let b = bilinear_bounds(4, -0x8000, 0x1_0000, 6);
    assert_eq!(
        b,
        BilinearBounds {
            left_pad: 0,
            left_tz: 1,
            width: 3,
            right_tz: 1,
            right_pad: 1
        }
    );
    let b = bilinear_bounds(4, 0, 0x1_0000, 4);
    assert_eq!((b.width, b.right_tz, b.right_pad), (3, 1, 0));
}

#[test]
fn identity_scale_reproduces_the_source() {
    for repeat in [Repeat::None, Repeat::Pad, Repeat::Normal] {
        let params = ScaleParams::default().with_repeat(repeat);
        let out = run(
            Operator::Src,
            PixelFormat::A8R8G8B8,
            &SRC,
            None,
            params,
            (4, 2),
            0xdead_beef,
        );
        assert_eq!(out, SRC, "{repeat:?}");
    }
}

#[test]
fn x888_sources_come_out_opaque() {
    let out = run(
        Operator::Src,
        PixelFormat::X8R8G8B8,
        &SRC,
        None,
        ScaleParams::default(),
        (4, 2),
        0,
    );
    let expect: Vec<u32> = SRC.iter().map(|p| p | 0xff00_0000).collect();
    assert_eq!(out, expect);
}

#[test]
fn halving_averages_each_block() {
    let (a, b, c, d) = (0xff00_0000, 0xff40_4040, 0xff80_8080, 0xffc0_c0c0);
    let src = [a, b, a, b, c, d, c, d];
    let params = ScaleParams::new(Fixed::from_int(2), Fixed::from_int(2));
    let out = run(Operator::Src, PixelFormat::A8R8G8B8, &src, None, params, (2, 1), 0);
    assert_eq!(out, [0xff60_6060, 0xff60_6060]);
}

#[test]
fn samples_outside_the_source_are_transparent() {
    let far_left = ScaleParams::default().with_offset(Fixed::from_int(-10), Fixed(0));
    let out = run(
        Operator::Src,
        PixelFormat::A8R8G8B8,
        &SRC,
        None,
        far_left,
        (4, 2),
        0xdead_beef,
    );
    assert!(out.iter().all(|&p| p == 0));

    let below = ScaleParams::default().with_offset(Fixed(0), Fixed::from_int(10));
    let out = run(
        Operator::Over,
        PixelFormat::A8R8G8B8,
        &SRC,
        None,
        below,
        (4, 2),
        0xdead_beef,
    );
    assert!(out.iter().all(|&p| p == 0xdead_beef));
}

#[test]
fn a8_mask_selects_pixels() {
    let opaque = [0xff11_2233u32; 8];
    let mask_words = [u32::from_le_bytes([0xff, 0, 0xff, 0]), 0];
    let mask = Image::Bits(Bits::new(PixelFormat::A8, 4, 2, 1, &mask_words).unwrap());
    let out = run(
        Operator::Over,
        PixelFormat::A8R8G8B8,
        &opaque,
        Some(&mask),
        ScaleParams::default(),
        (4, 2),
        0xff00_0000,
    );
    assert_eq!(
        out,
        [
            0xff11_2233,
            0xff00_0000,
            0xff11_2233,
            0xff00_0000,
            0xff00_0000,
            0xff00_0000,
            0xff00_0000,
            0xff00_0000
        ]
    );
}

#[test]
fn solid_mask_scales_the_source() {
    let blue = [0xff00_00ffu32; 8];
    let mask = Image::solid(0x8000_0000);
    let out = run(
        Operator::Over,
        PixelFormat::A8R8G8B8,
        &blue,
        Some(&mask),
        ScaleParams::default(),
        (4, 2),
        0,
    );
    assert!(out.iter().all(|&p| p == 0x8000_0080));
}
