use super::*;

#[test]
fn gradient_starts_transparent_and_is_monotonic() {
    for &(w, h) in &[(1u32, 1u32), (3, 7), (16, 210), (5, 1000)] {
        let g = build_gradient(w, h);
        assert_eq!((g.width(), g.height()), (w, h));
        assert_eq!(g.alpha_at(0, 0), Some(0));

        let mut prev = 0u8;
        for y in 0..h {
            let a = g.alpha_at(w - 1, y).unwrap();
            assert!(a >= prev, "row {y} alpha {a} < {prev}");
            prev = a;
        }
        let expected_last = (180u64 * u64::from(h - 1) / u64::from(h)) as u8;
        assert_eq!(g.alpha_at(0, h - 1), Some(expected_last));
    }
}

#[test]
fn gradient_pixels_are_black() {
    let g = build_gradient(2, 10);
    let px = g.pixel(1, 9).unwrap();
    assert_eq!(&px[..3], &[0, 0, 0]);
    assert_eq!(px[3], 162);
}

#[test]
fn gradient_zero_height_is_empty() {
    let g = build_gradient(10, 0);
    assert_eq!(g.height(), 0);
    assert!(g.as_bytes().is_empty());
}

#[test]
fn faded_line_ramps_and_plateau() {
    let w = 200i64;
    let line = build_faded_line(w, 3);
    assert_eq!((line.width(), line.height()), (200, 3));

    assert_eq!(line.alpha_at(0, 0), Some(0));
    assert_eq!(line.alpha_at(100, 2), Some(FADED_LINE_MAX_ALPHA));
    // fade width = floor(200 * 0.15) = 30
    assert_eq!(line.alpha_at(15, 0), Some(102));
    assert_eq!(line.alpha_at(30, 0), Some(204));
    assert_eq!(line.alpha_at(170, 0), Some(204));
    assert_eq!(line.alpha_at(199, 0), Some(6));

    let px = line.pixel(100, 0).unwrap();
    assert_eq!(px, [204, 204, 204, 204]);
}

#[test]
fn faded_line_is_symmetric_within_one_step() {
    for &w in &[8i64, 33, 120, 481] {
        let line = build_faded_line(w, 1);
        let fade = faded_line_fade_width(w);
        let step = (204 / fade) as i32 + 1;
        assert_eq!(line.alpha_at((w / 2) as u32, 0), Some(204));
        for x in 0..w as u32 {
            let a = i32::from(line.alpha_at(x, 0).unwrap());
            let b = i32::from(line.alpha_at(w as u32 - 1 - x, 0).unwrap());
            assert!((a - b).abs() <= step, "w={w} x={x}: {a} vs {b}");
        }
    }
}

#[test]
fn faded_line_degenerate_widths() {
    assert_eq!(build_faded_line(0, 4).width(), 0);
    assert_eq!(build_faded_line(-12, 4).width(), 0);

    let one = build_faded_line(1, 1);
    assert_eq!(one.width(), 1);
    assert_eq!(one.alpha_at(0, 0), Some(0));
    assert_eq!(faded_line_fade_width(3), 1);
}
