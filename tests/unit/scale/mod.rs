use super::*;
use crate::foundation::core::Rect;

#[test]
fn origin_samples_pixel_centres() {
    let p = ScaleParams::default();
    assert_eq!(p.origin(0, 0), (0x8000, 0x8000));
    assert_eq!(p.origin(3, 1), (0x3_8000, 0x1_8000));

    let p = ScaleParams::new(Fixed::from_int(2), Fixed::HALF).with_offset(Fixed::from_int(-1), Fixed(0));
    assert_eq!(p.origin(0, 0), (0, 0x4000));
    assert_eq!(p.origin(2, 2), (0x4_0000, 0x1_4000));
}

#[test]
fn pad_bounds_split_left_inside_right() {
    let b = pad_repeat_bounds(4, -2 * 0x1_0000, 0x1_0000, 10);
    assert_eq!(
        b,
        ScanlineBounds {
            left_pad: 2,
            width: 4,
            right_pad: 4
        }
    );

    let b = pad_repeat_bounds(4, 0x8000, 0x2_0000, 5);
    assert_eq!(
        b,
        ScanlineBounds {
            left_pad: 0,
            width: 2,
            right_pad: 3
        }
    );

    // everything left of the row
    let b = pad_repeat_bounds(4, -100 * 0x1_0000, 0x1_0000, 6);
    assert_eq!(b.left_pad, 6);
    assert_eq!(b.width + b.right_pad, 0);
}

#[test]
fn pad_bounds_with_zero_step() {
    assert_eq!(pad_repeat_bounds(4, -1, 0, 3).left_pad, 3);
    assert_eq!(pad_repeat_bounds(4, 0x2_0000, 0, 3).width, 3);
    assert_eq!(pad_repeat_bounds(4, 0x4_0000, 0, 3).right_pad, 3);
}

fn surfaces() -> (Vec<u32>, Vec<u32>) {
    (vec![0xff10_2030u32; 16], vec![0u32; 16])
}

#[test]
fn rejects_unsupported_combinations() {
    let (src_words, mut dst_words) = surfaces();
    let src = Bits::new(PixelFormat::A8R8G8B8, 4, 4, 4, &src_words).unwrap();
    let mut dest = BitsMut::new(PixelFormat::A8R8G8B8, 4, 4, 4, &mut dst_words).unwrap();
    let rect = CompositeRect::new(4, 4);
    let params = ScaleParams::default();

    let err = composite_scaled(Operator::Xor, Filter::Nearest, &src, None, &mut dest, &rect, &params)
        .unwrap_err();
    assert!(matches!(err, BlendError::Unsupported(_)));

    let mirrored = ScaleParams::new(Fixed(-0x1_0000), Fixed::ONE);
    let err = composite_scaled(Operator::Over, Filter::Nearest, &src, None, &mut dest, &rect, &mirrored)
        .unwrap_err();
    assert!(matches!(err, BlendError::Unsupported(_)));

    let a8_words = [0u32; 4];
    let a8 = Image::Bits(Bits::new(PixelFormat::A8, 4, 4, 1, &a8_words).unwrap());
    let err = composite_scaled(Operator::Over, Filter::Nearest, &src, Some(&a8), &mut dest, &rect, &params)
        .unwrap_err();
    assert!(matches!(err, BlendError::Unsupported(_)));

    let straight = src.with_premultiplied(false);
    let err = composite_scaled(Operator::Over, Filter::Bilinear, &straight, None, &mut dest, &rect, &params)
        .unwrap_err();
    assert!(matches!(err, BlendError::Unsupported(_)));
}

#[test]
fn rejects_out_of_bounds_rectangles() {
    let (src_words, mut dst_words) = surfaces();
    let src = Bits::new(PixelFormat::A8R8G8B8, 4, 4, 4, &src_words).unwrap();
    let mut dest = BitsMut::new(PixelFormat::A8R8G8B8, 4, 4, 4, &mut dst_words).unwrap();
    let rect = CompositeRect::new(3, 3).dest_at(2, 0);
    let err = composite_scaled(
        Operator::Src,
        Filter::Bilinear,
        &src,
        None,
        &mut dest,
        &rect,
        &ScaleParams::default(),
    )
    .unwrap_err();
    assert!(matches!(err, BlendError::Validation(_)));
    assert_eq!(Rect::new(2, 0, 3, 3), rect.dest_rect());
}

#[test]
fn dest_format_must_be_32_bit() {
    let src_words = vec![0u32; 16];
    let mut dst_words = vec![0u32; 8];
    let src = Bits::new(PixelFormat::A8R8G8B8, 4, 4, 4, &src_words).unwrap();
    let mut dest = BitsMut::new(PixelFormat::R5G6B5, 4, 4, 2, &mut dst_words).unwrap();
    let err = composite_scaled(
        Operator::Over,
        Filter::Nearest,
        &src,
        None,
        &mut dest,
        &CompositeRect::new(4, 4),
        &ScaleParams::default(),
    )
    .unwrap_err();
    assert!(err.to_string().starts_with("unsupported operation"));
}
