use super::*;

#[test]
fn split_aligned_covers_row_exactly() {
    let mut storage = vec![0u32; 64];
    for offset in 0..4 {
        for len in 0..40 {
            let row = &mut storage[offset..offset + len];
            let base = row.as_ptr() as usize;
            let (head, body, tail) = split_aligned::<u32, 4>(row);
            assert!(head.len() < 4 || len < 4);
            assert_eq!(head.len() + body.len() * 4 + tail.len(), len);
            if !body.is_empty() {
                let body_addr = body.as_ptr() as usize;
                assert_eq!(body_addr % VECTOR_BYTES, 0);
                assert_eq!(body_addr - base, head.len() * 4);
            }
            assert!(tail.len() < 4);
        }
    }
}

#[test]
fn drive_row_visits_every_pixel_once() {
    let mut storage = vec![0u32; 48];
    let src: Vec<u32> = (0..48).collect();
    for offset in 0..4 {
        storage.fill(0);
        let dst = &mut storage[offset..offset + 37];
        drive_row::<4>(
            dst,
            &src,
            None,
            |d, s, _| d + s + 1,
            |d, s, _| {
                for (d, s) in d.iter_mut().zip(s) {
                    *d += s + 1;
                }
            },
        );
        for (i, v) in storage[offset..offset + 37].iter().enumerate() {
            assert_eq!(*v, i as u32 + 1);
        }
    }
}

#[test]
fn lookups_cover_both_modes() {
    for op in Operator::ALL {
        for mode in [CoverageMode::Uniform, CoverageMode::Component] {
            let mut a = [0x8040_2010u32; 9];
            let mut b = a;
            let src = [0x4020_1008u32; 9];
            combiner(op, mode)(&mut a, &src, None);
            reference_combiner(op, mode)(&mut b, &src, None);
            assert_eq!(a, b, "{op:?} {mode:?}");
        }
    }
}
