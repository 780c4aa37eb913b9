use super::*;

#[test]
fn composite_rect_builders_place_each_operand() {
    let r = CompositeRect::new(4, 3).src_at(1, 2).mask_at(3, 4).dest_at(5, 6);
    assert_eq!(r.src_rect(), Rect::new(1, 2, 4, 3));
    assert_eq!(r.mask_rect(), Rect::new(3, 4, 4, 3));
    assert_eq!(r.dest_rect(), Rect::new(5, 6, 4, 3));
    assert!(!r.is_empty());
    assert!(CompositeRect::new(0, 3).is_empty());
    assert!(CompositeRect::new(3, 0).is_empty());
}

#[test]
fn info_copies_the_placement() {
    let src = Image::solid(0xff00_00ff);
    let rect = CompositeRect::new(7, 2).src_at(1, 1).dest_at(3, 4);
    let info = CompositeInfo::new(Operator::Over, &src, None, &rect);
    assert_eq!(info.dest_rect(), Rect::new(3, 4, 7, 2));
    assert_eq!(info.size(), (7, 2));
    assert_eq!((info.src_x, info.src_y), (1, 1));
    assert_eq!(info.solid_mask_alpha(), 0xff);
    assert_eq!(info.solid_src(PixelFormat::A8R8G8B8), 0xff00_00ff);
    assert_eq!(info.solid_src(PixelFormat::X8B8G8R8), 0xffff_0000);
}

#[test]
fn solid_mask_alpha_reads_the_mask_color() {
    let src = Image::solid(0xffff_ffff);
    let mask = Image::solid(0x80ff_ffff);
    let info = CompositeInfo::new(Operator::Over, &src, Some(&mask), &CompositeRect::new(1, 1));
    assert_eq!(info.solid_mask_alpha(), 0x80);
}

#[test]
fn drive_dest_visits_every_pixel_once() {
    for len in 0..23usize {
        for offset in 0..4usize {
            let mut buf = vec![0u32; len + offset];
            drive_dest::<u32, 4>(
                &mut buf[offset..],
                |i, d| *d += i as u32 + 1,
                |i, d| {
                    for (k, v) in d.iter_mut().enumerate() {
                        *v += (i + k) as u32 + 1;
                    }
                },
            );
            let want: Vec<u32> = (1..=len as u32).collect();
            assert_eq!(&buf[offset..], &want[..], "len {len} offset {offset}");
        }
    }
}

#[test]
fn rows_take_the_width_prefix_of_each_stride() {
    let line: Vec<u32> = (0..20).collect();
    let got: Vec<&[u32]> = rows(&line, 6, 3, 3).collect();
    assert_eq!(got, vec![&[0u32, 1, 2][..], &[6, 7, 8][..], &[12, 13, 14][..]]);

    let mut line = vec![0u8; 12];
    for r in rows_mut(&mut line, 4, 2, 3) {
        r.fill(9);
    }
    assert_eq!(line, vec![9, 9, 0, 0, 9, 9, 0, 0, 9, 9, 0, 0]);
}

#[test]
fn gather_and_mask_word() {
    assert_eq!(gather::<u32, 3>(&[1, 2, 3, 4, 5], 1), [2, 3, 4]);
    assert_eq!(mask_word([0xff; 4]), u32::MAX);
    assert_eq!(mask_word([0, 0, 0, 1]), 0x0100_0000);
    assert_eq!(mask_word([0; 4]), 0);
}

#[test]
fn rgb565_batches_survive_widening() {
    let p: [u16; 8] = [0xf800, 0x07e0, 0x001f, 0xffff, 0, 0x1234, 0x8410, 0x7bef];
    assert_eq!(pack565x8(unpack565x8(&p)), p);
}
