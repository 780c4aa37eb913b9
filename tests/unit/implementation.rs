use super::*;
use crate::foundation::core::{Fixed, PixelFormat};

#[test]
fn flags_accept_common_spellings() {
    for on in ["1", "true", "TRUE", " yes ", "Yes"] {
        assert!(parse_flag(on), "{on:?}");
    }
    for off in ["", "0", "false", "no", "on", "2"] {
        assert!(!parse_flag(off), "{off:?}");
    }
}

#[test]
fn opts_builders_and_serde() {
    let opts = ImplementationOpts::default()
        .with_force_scalar(true)
        .with_fast_paths(false);
    assert!(opts.force_scalar);
    assert!(opts.disable_fast_paths);
    assert!(!opts.with_fast_paths(true).disable_fast_paths);

    let json = serde_json::to_string(&opts).unwrap();
    let back: ImplementationOpts = serde_json::from_str(&json).unwrap();
    assert_eq!(back, opts);

    let partial: ImplementationOpts = serde_json::from_str(r#"{"force_scalar":true}"#).unwrap();
    assert_eq!(partial, ImplementationOpts::default().with_force_scalar(true));
}

#[test]
fn disabling_fast_paths_empties_the_table() {
    assert!(!Implementation::default().fast_paths().is_empty());
    let general_only = Implementation::new(ImplementationOpts::default().with_fast_paths(false));
    assert!(general_only.fast_paths().is_empty());
    assert_eq!(general_only.constants(), &Constants::STANDARD);
}

#[test]
fn combine_checks_row_lengths() {
    let imp = Implementation::default();
    let mut dst = [0u32; 4];
    let err = imp
        .combine(Operator::Over, CoverageMode::Uniform, &mut dst, &[0; 3], None)
        .unwrap_err();
    assert!(matches!(err, BlendError::Validation(_)));
    let err = imp
        .combine(Operator::Over, CoverageMode::Uniform, &mut dst, &[0; 4], Some(&[0u32; 2][..]))
        .unwrap_err();
    assert!(err.to_string().contains("mask row"));

    imp.combine(Operator::Add, CoverageMode::Uniform, &mut dst, &[0x0102_0304; 6], None)
        .unwrap();
    assert_eq!(dst, [0x0102_0304; 4]);
}

#[test]
fn scalar_and_vector_combiners_agree() {
    let src: Vec<u32> = (0..37u32).map(|i| i.wrapping_mul(0x9e37_79b9)).collect();
    let mask: Vec<u32> = (0..37u32).map(|i| i.wrapping_mul(0x7f4a_7c15)).collect();
    let base: Vec<u32> = (0..37u32).map(|i| i.wrapping_mul(0x3c6e_f372)).collect();
    let vector = Implementation::default();
    let scalar = Implementation::new(ImplementationOpts::default().with_force_scalar(true));
    for op in Operator::ALL {
        for mode in [CoverageMode::Uniform, CoverageMode::Component] {
            let mut a = base.clone();
            let mut b = base.clone();
            vector.combine(op, mode, &mut a, &src, Some(&mask)).unwrap();
            scalar.combine(op, mode, &mut b, &src, Some(&mask)).unwrap();
            assert_eq!(a, b, "{op:?} {mode:?}");
        }
    }
}

#[test]
fn fill_and_blt_validate_rectangles() {
    let imp = Implementation::default();
    let mut words = [0u32; 16];
    let mut dest = BitsMut::new(PixelFormat::A8R8G8B8, 4, 4, 4, &mut words).unwrap();
    assert!(imp.fill(&mut dest, Rect::new(3, 3, 2, 1), 1).is_err());
    assert!(imp.fill(&mut dest, Rect::new(1, 1, 2, 2), 7).unwrap());

    let src_words = [9u32; 4];
    let src = Bits::new(PixelFormat::A8R8G8B8, 2, 2, 2, &src_words).unwrap();
    assert!(imp.blt(&src, &mut dest, Rect::new(1, 0, 2, 1), 0, 0).is_err());
    assert!(imp.blt(&src, &mut dest, Rect::new(0, 0, 2, 2), 3, 0).is_err());
    assert!(imp.blt(&src, &mut dest, Rect::new(0, 0, 2, 2), 0, 2).unwrap());

    assert_eq!(words, [0, 0, 0, 0, 0, 7, 7, 0, 9, 9, 7, 0, 9, 9, 0, 0]);
}

#[test]
fn composite_validates_every_operand() {
    let imp = Implementation::default();
    let src_words = [0xff00_00ffu32; 4];
    let src = Image::Bits(Bits::new(PixelFormat::A8R8G8B8, 2, 2, 2, &src_words).unwrap());
    let mut words = [0u32; 16];
    let mut dest = BitsMut::new(PixelFormat::A8R8G8B8, 4, 4, 4, &mut words).unwrap();

    let too_wide = CompositeRect::new(5, 1);
    assert!(imp.composite(Operator::Over, &src, None, &mut dest, &too_wide).is_err());
    let past_source = CompositeRect::new(2, 2).src_at(1, 0);
    assert!(imp.composite(Operator::Over, &src, None, &mut dest, &past_source).is_err());

    // solids cover the whole plane
    let solid = Image::solid(0xff00_ff00);
    let mask = Image::solid(0xff00_0000);
    let anywhere = CompositeRect::new(4, 4).src_at(1000, 1000).mask_at(7, 7);
    imp.composite(Operator::Src, &solid, Some(&mask), &mut dest, &anywhere)
        .unwrap();
    assert!(words.iter().all(|&p| p == 0xff00_ff00));
}

#[test]
fn empty_rectangles_write_nothing() {
    let imp = Implementation::default();
    let mut words = [5u32; 4];
    let mut dest = BitsMut::new(PixelFormat::A8R8G8B8, 2, 2, 2, &mut words).unwrap();
    imp.composite(
        Operator::Src,
        &Image::solid(0),
        None,
        &mut dest,
        &CompositeRect::new(0, 2),
    )
    .unwrap();
    assert_eq!(words, [5; 4]);
}

#[test]
fn general_path_matches_fast_paths() {
    let src_words: Vec<u32> = (0..64u32)
        .map(|i| {
            let a = (i * 37) & 0xff;
            let c = a / 2;
            a << 24 | c << 16 | (c / 3) << 8 | (a - c)
        })
        .collect();
    let dest_words: Vec<u32> = (0..64u32).map(|i| 0xff00_0000 | i.wrapping_mul(0x0003_0507)).collect();
    let src = Image::Bits(Bits::new(PixelFormat::A8R8G8B8, 8, 8, 8, &src_words).unwrap());
    let solid = Image::solid(0xc040_2010);
    let rect = CompositeRect::new(6, 5).src_at(1, 2).dest_at(2, 1);

    for op in [Operator::Over, Operator::Add, Operator::Src] {
        for source in [&src, &solid] {
            let run = |imp: Implementation| {
                let mut words = dest_words.clone();
                let mut dest = BitsMut::new(PixelFormat::A8R8G8B8, 8, 8, 8, &mut words).unwrap();
                imp.composite(op, source, None, &mut dest, &rect).unwrap();
                words
            };
            let fast = run(Implementation::default());
            let general = run(Implementation::new(
                ImplementationOpts::default().with_fast_paths(false),
            ));
            assert_eq!(fast, general, "{op:?}");
        }
    }
}

#[test]
fn scaled_composite_delegates() {
    let imp = Implementation::default();
    let src_words = [0xff12_3456u32; 4];
    let src = Bits::new(PixelFormat::A8R8G8B8, 2, 2, 2, &src_words).unwrap();
    let mut words = [0u32; 16];
    let mut dest = BitsMut::new(PixelFormat::A8R8G8B8, 4, 4, 4, &mut words).unwrap();
    let params = ScaleParams::new(Fixed::HALF, Fixed::HALF);
    imp.composite_scaled(
        Operator::Over,
        Filter::Nearest,
        &src,
        None,
        &mut dest,
        &CompositeRect::new(4, 4),
        &params,
    )
    .unwrap();
    assert!(words.iter().all(|&p| p == 0xff12_3456));
}
