use hough_lines_core::edges::{detect_edges, edge_response_at};
use hough_lines_core::{Grid, Kernel};

fn impulse(size: usize, value: u8) -> Grid {
    let mut g = Grid::new(size, size);
    g.data[(size / 2) * size + size / 2] = value;
    g
}

fn interior_3x3(out: &Grid) -> [[u8; 3]; 3] {
    let mut m = [[0u8; 3]; 3];
    for (y, row) in m.iter_mut().enumerate() {
        for (x, v) in row.iter_mut().enumerate() {
            *v = out.at(x + 1, y + 1);
        }
    }
    m
}

#[test]
fn impulse_response_matches_golden_set() {
    let img = impulse(5, 255);
    let golden = [
        (
            Kernel::Laplace,
            [[0, 255, 0], [255, 255, 255], [0, 255, 0]],
        ),
        (
            Kernel::SobelHorizontal,
            [[255, 0, 255], [255, 0, 255], [255, 0, 255]],
        ),
        (
            Kernel::SobelVertical,
            [[255, 255, 255], [0, 0, 0], [255, 255, 255]],
        ),
        (
            Kernel::SobelCombined,
            [[255, 255, 255], [255, 0, 255], [255, 255, 255]],
        ),
    ];

    for (kernel, expected) in golden {
        let out = detect_edges(&img, kernel).unwrap();
        assert_eq!(out.dimensions(), (5, 5));
        assert_eq!(interior_3x3(&out), expected, "kernel {kernel}");

        // corners and edges of the 5x5 grid are never computed
        for i in 0..5 {
            assert_eq!(out.at(i, 0), 0);
            assert_eq!(out.at(i, 4), 0);
            assert_eq!(out.at(0, i), 0);
            assert_eq!(out.at(4, i), 0);
        }
    }
}

#[test]
fn weak_impulse_keeps_relative_strength_below_saturation() {
    let img = impulse(5, 20);
    assert_eq!(edge_response_at(&img, 2, 2, Kernel::Laplace), Some(-80));
    assert_eq!(edge_response_at(&img, 2, 1, Kernel::Laplace), Some(20));

    let out = detect_edges(&img, Kernel::Laplace).unwrap();
    assert_eq!(out.at(2, 2), 80);
    assert_eq!(out.at(2, 1), 20);

    let sobel = detect_edges(&img, Kernel::SobelCombined).unwrap();
    // hypot(20, 20) = 28.28
    assert_eq!(sobel.at(1, 1), 28);
    assert_eq!(sobel.at(1, 2), 40);
}

#[test]
fn input_grid_is_left_untouched() {
    let img = impulse(7, 99);
    let before = img.clone();
    for kernel in Kernel::ALL {
        detect_edges(&img, kernel).unwrap();
    }
    assert_eq!(img, before);
}
