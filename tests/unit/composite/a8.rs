use super::*;
use crate::composite::{CompositeFn, CompositeRect};
use crate::foundation::core::{Operator, PixelFormat};
use crate::image::{Bits, Image};

const STRIDE: usize = 12;
const WIDTH: u32 = 48;

fn bytes(seed: u32) -> Vec<u32> {
    let mut x = seed;
    (0..STRIDE * 2)
        .map(|i| {
            x = x.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            match i % 5 {
                0 => 0,
                1 => u32::MAX,
                _ => x,
            }
        })
        .collect()
}

fn check(
    routine: CompositeFn,
    src: Image<'_>,
    mask: Option<Image<'_>>,
    expect: impl Fn(Option<u8>, Option<u8>, u8) -> u8,
) {
    let words = bytes(11);
    let mut out = words.clone();
    let rect = CompositeRect::new(37, 2).src_at(3, 0).mask_at(2, 0).dest_at(5, 0);
    {
        let mut dest = BitsMut::new(PixelFormat::A8, WIDTH, 2, STRIDE, &mut out).unwrap();
        routine(&CompositeInfo::new(Operator::In, &src, mask.as_ref(), &rect), &mut dest);
    }
    let before: &[u8] = bytemuck::cast_slice(&words);
    let after: &[u8] = bytemuck::cast_slice(&out);
    let at = |img: &Image<'_>, x: u32, y: u32| img.bits().map(|b| b.raw_pixel(x, y) as u8);
    for y in 0..2u32 {
        for x in 0..WIDTH {
            let i = (y * WIDTH + x) as usize;
            let want = if (5..42).contains(&x) {
                let s = at(&src, x - 2, y);
                let m = mask.as_ref().and_then(|m| at(m, x - 3, y));
                expect(s, m, before[i])
            } else {
                before[i]
            };
            assert_eq!(after[i], want, "({x}, {y})");
        }
    }
}

fn a8(words: &[u32]) -> Image<'_> {
    Image::Bits(Bits::new(PixelFormat::A8, WIDTH, 2, STRIDE, words).unwrap())
}

#[test]
fn in_routines_multiply_alpha() {
    let src = bytes(1);
    let mask = bytes(2);
    check(in_8_8, a8(&src), None, |s, _, d| premultiply_round(s.unwrap(), d));
    check(in_n_8_8, Image::solid(0x9000_0000), Some(a8(&mask)), |_, m, d| {
        premultiply_round(premultiply_round(0x90, m.unwrap()), d)
    });
    check(in_n_8, Image::solid(0x4000_0000), None, |_, _, d| premultiply_round(0x40, d));
}

#[test]
fn in_n_8_extremes() {
    check(in_n_8, Image::solid(0xff12_3456), None, |_, _, d| d);
    check(in_n_8, Image::solid(0x0012_3456), None, |_, _, _| 0);
}

#[test]
fn add_routines_saturate() {
    let src = bytes(3);
    let mask = bytes(4);
    check(add_8_8, a8(&src), None, |s, _, d| clamped_add(s.unwrap(), d));
    check(add_n_8_8, Image::solid(0x7000_0000), Some(a8(&mask)), |_, m, d| {
        clamped_add(premultiply_round(0x70, m.unwrap()), d)
    });
    check(add_n_8, Image::solid(0x2100_0000), None, |_, _, d| clamped_add(0x21, d));
}

#[test]
fn add_n_8_extremes() {
    check(add_n_8, Image::solid(0x00ff_ffff), None, |_, _, d| d);
    check(add_n_8, Image::solid(0xff00_0000), None, |_, _, _| 0xff);
}
