use super::*;
use crate::combine::reference::unified_pixel;
use crate::composite::general::premultiply;
use crate::composite::{CompositeFn, CompositeInfo, CompositeRect};
use crate::fetch::to_argb;
use crate::foundation::core::{Operator, PixelFormat};
use crate::image::{Bits, Image, Solid};
use crate::pixel::pack::expand565;

const STRIDE: usize = 12;
const ROWS: u32 = 3;

fn surface_width(format: PixelFormat) -> u32 {
    STRIDE as u32 * 32 / format.bpp()
}

/// Words mixing zero, opaque and arbitrary values.
fn noise(seed: u64, n: usize) -> Vec<u32> {
    let mut x = seed;
    (0..n)
        .map(|_| {
            x = x
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let r = (x >> 32) as u32;
            match x >> 62 {
                0 => 0,
                1 => 0xff00_0000 | r,
                _ => r,
            }
        })
        .collect()
}

fn check(
    routine: CompositeFn,
    src: Image<'_>,
    mask: Option<Image<'_>>,
    dest_format: PixelFormat,
    rect: CompositeRect,
    expect: impl Fn(u32, Option<u32>, u32) -> u32,
) {
    let dest_words = noise(99, STRIDE * ROWS as usize);
    let width = surface_width(dest_format);
    let before = Bits::new(dest_format, width, ROWS, STRIDE, &dest_words).unwrap();
    let mut out = dest_words.clone();
    {
        let mut dest = BitsMut::new(dest_format, width, ROWS, STRIDE, &mut out).unwrap();
        let info = CompositeInfo::new(Operator::Over, &src, mask.as_ref(), &rect);
        routine(&info, &mut dest);
    }
    let after = Bits::new(dest_format, width, ROWS, STRIDE, &out).unwrap();
    let raw = |img: &Image<'_>, x: u32, y: u32| match img {
        Image::Solid(Solid(c)) => *c,
        Image::Bits(b) => b.raw_pixel(x, y),
    };

    for y in 0..ROWS {
        for x in 0..width {
            let inside = (rect.dest_x..rect.dest_x + rect.width).contains(&x)
                && (rect.dest_y..rect.dest_y + rect.height).contains(&y);
            let want = if inside {
                let (dx, dy) = (x - rect.dest_x, y - rect.dest_y);
                let s = raw(&src, rect.src_x + dx, rect.src_y + dy);
                let m = mask.as_ref().map(|m| raw(m, rect.mask_x + dx, rect.mask_y + dy));
                expect(s, m, before.raw_pixel(x, y))
            } else {
                before.raw_pixel(x, y)
            };
            assert_eq!(after.raw_pixel(x, y), want, "pixel ({x}, {y})");
        }
    }
}

fn bits<'a>(format: PixelFormat, words: &'a [u32]) -> Image<'a> {
    Image::Bits(Bits::new(format, surface_width(format), ROWS, STRIDE, words).unwrap())
}

fn rect32() -> CompositeRect {
    CompositeRect::new(9, 3).src_at(1, 0).mask_at(2, 0).dest_at(3, 0)
}

fn rect16() -> CompositeRect {
    CompositeRect::new(12, 3).dest_at(3, 0)
}

fn over(s: u32, m: Option<u32>, d: u32) -> u32 {
    unified_pixel(Operator::Over, s, m, d)
}

fn over565(s: u32, d: u32) -> u32 {
    u32::from(pack565_32(over(s, None, expand565(d as u16))))
}

#[test]
fn over_and_add_8888_match_reference() {
    let words = noise(1, STRIDE * 3);
    check(over_8888_8888, bits(PixelFormat::A8R8G8B8, &words), None, PixelFormat::A8R8G8B8, rect32(), |s, _, d| over(s, None, d));
    check(add_8888_8888, bits(PixelFormat::A8R8G8B8, &words), None, PixelFormat::A8R8G8B8, rect32(), |s, _, d| {
        unified_pixel(Operator::Add, s, None, d)
    });
}

#[test]
fn over_8888_0565_matches_reference() {
    let words = noise(2, STRIDE * 3);
    let rect = CompositeRect::new(11, 3).src_at(1, 0).dest_at(7, 0);
    check(over_8888_0565, bits(PixelFormat::A8R8G8B8, &words), None, PixelFormat::R5G6B5, rect, |s, _, d| over565(s, d));
}

#[test]
fn solid_mask_routines_match_reference() {
    let words = noise(3, STRIDE * 3);
    for m in [0u32, 0x80ff_ffff, 0xff00_0000] {
        check(
            over_8888_n_8888,
            bits(PixelFormat::A8R8G8B8, &words),
            Some(Image::solid(m)),
            PixelFormat::A8R8G8B8,
            rect32(),
            |s, m, d| over(s, m, d),
        );
        check(
            over_x888_n_8888,
            bits(PixelFormat::X8R8G8B8, &words),
            Some(Image::solid(m)),
            PixelFormat::X8R8G8B8,
            rect32(),
            |s, m, d| over(s | 0xff00_0000, m, d),
        );
    }
}

#[test]
fn a8_mask_routines_match_reference() {
    let words = noise(4, STRIDE * 3);
    let mask = noise(5, STRIDE * 3);
    check(
        over_8888_8_8888,
        bits(PixelFormat::A8R8G8B8, &words),
        Some(bits(PixelFormat::A8, &mask)),
        PixelFormat::A8R8G8B8,
        rect32(),
        |s, m, d| over(s, m.map(|m| m << 24), d),
    );
    check(
        over_x888_8_8888,
        bits(PixelFormat::X8R8G8B8, &words),
        Some(bits(PixelFormat::A8, &mask)),
        PixelFormat::A8R8G8B8,
        rect32(),
        |s, m, d| over(s | 0xff00_0000, m.map(|m| m << 24), d),
    );
}

#[test]
fn argb_mask_uses_alpha_only() {
    let words = noise(6, STRIDE * 3);
    let mask = noise(7, STRIDE * 3);
    check(
        over_8888_8888_8888,
        bits(PixelFormat::A8R8G8B8, &words),
        Some(bits(PixelFormat::A8R8G8B8, &mask)),
        PixelFormat::A8R8G8B8,
        rect32(),
        |s, m, d| over(s, m.map(|m| m & 0xff00_0000), d),
    );
}

#[test]
fn src_conversions_force_alpha_and_truncate() {
    let words = noise(8, STRIDE * 3);
    check(src_x888_8888, bits(PixelFormat::X8R8G8B8, &words), None, PixelFormat::A8R8G8B8, rect32(), |s, _, _| s | 0xff00_0000);
    check(src_x888_0565, bits(PixelFormat::X8R8G8B8, &words), None, PixelFormat::R5G6B5, rect16(), |s, _, _| {
        u32::from(pack565_32(s))
    });
}

#[test]
fn pixbuf_sources_premultiply_and_swap() {
    let words = noise(9, STRIDE * 3);
    let pixbuf = || {
        Image::Bits(
            Bits::new(PixelFormat::A8B8G8R8, 12, ROWS, STRIDE, &words)
                .unwrap()
                .with_premultiplied(false),
        )
    };
    let straight = |s: u32| premultiply(to_argb(PixelFormat::A8B8G8R8, s));
    check(over_pixbuf_8888, pixbuf(), None, PixelFormat::A8R8G8B8, rect32(), |s, _, d| over(straight(s), None, d));
    check(over_pixbuf_0565, pixbuf(), None, PixelFormat::R5G6B5, rect16(), |s, _, d| over565(straight(s), d));
}

#[test]
fn pixbuf_half_red_premultiplies() {
    // straight red at half alpha, stored A8B8G8R8
    let words = vec![0x8000_00ffu32; STRIDE * 3];
    let mut out = vec![0u32; STRIDE * 3];
    let src = Image::Bits(
        Bits::new(PixelFormat::A8B8G8R8, 12, ROWS, STRIDE, &words)
            .unwrap()
            .with_premultiplied(false),
    );
    let mut dest = BitsMut::new(PixelFormat::A8R8G8B8, 12, ROWS, STRIDE, &mut out).unwrap();
    let info = CompositeInfo::new(Operator::Over, &src, None, &CompositeRect::new(12, 3));
    over_pixbuf_8888(&info, &mut dest);
    assert!(out.iter().all(|&p| p == 0x8080_0000));
}
