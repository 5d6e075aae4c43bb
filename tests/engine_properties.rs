use battlesteg::carrier::raster_coordinates;
use battlesteg::{
    Coordinate, Density, FilterKind, ParameterError, Password, Quirks, StegError, StegOptions,
    build_sequence, capacity, embed, extract,
};
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::collections::HashSet;

const FILTERS: [Option<FilterKind>; 5] = [
    None,
    Some(FilterKind::Gradient),
    Some(FilterKind::GradientStrict),
    Some(FilterKind::Laplace),
    Some(FilterKind::LaplaceStrict),
];

fn noisy_image(width: u32, height: u32, seed: u64) -> RgbImage {
    let mut rng = StdRng::seed_from_u64(seed);
    RgbImage::from_fn(width, height, |_, _| Rgb([rng.random(), rng.random(), rng.random()]))
}

fn options(density: u8, filter: Option<FilterKind>, battlesteg: bool) -> StegOptions {
    StegOptions {
        density: Density::new(density).unwrap(),
        password: Password::from("property"),
        filter,
        battlesteg,
        quirks: Quirks::default(),
    }
}

/// 所有密度、过滤器与 battlesteg 组合都能完整往返
#[test]
fn round_trip_every_combination() {
    let mut payload = vec![0u8; 40];
    StdRng::seed_from_u64(7).fill_bytes(&mut payload);

    let mut checked = 0;
    for density in 1..=8u8 {
        for filter in FILTERS {
            for battlesteg in [false, true] {
                let opts = options(density, filter, battlesteg);
                if opts.validate().is_err() {
                    continue;
                }
                let mut img = noisy_image(48, 48, density as u64);
                let room = capacity(&img, &opts).unwrap();
                if room.bytes < payload.len() as i64 {
                    assert!(matches!(
                        embed(&mut img, &payload, &opts),
                        Err(StegError::InsufficientCapacity { .. })
                    ));
                    continue;
                }

                embed(&mut img, &payload, &opts).unwrap();
                assert_eq!(
                    extract(&img, &opts).unwrap(),
                    payload,
                    "density {density}, {filter:?}, battlesteg {battlesteg}"
                );
                checked += 1;
            }
        }
    }
    assert!(checked >= 60, "only {checked} combinations had capacity");
}

/// 修正后的清零方式在高对比度图像上同样可以往返
#[test]
fn round_trip_with_corrected_quirks() {
    let mut img = RgbImage::from_fn(32, 32, |x, y| {
        if (x + y) % 2 == 0 { Rgb([250, 250, 250]) } else { Rgb([4, 4, 4]) }
    });
    let opts = StegOptions {
        filter: Some(FilterKind::Laplace),
        quirks: Quirks::corrected(),
        ..options(1, None, false)
    };
    assert_eq!(build_sequence(&img, &opts).unwrap().len(), 30 * 30);

    embed(&mut img, b"corrected", &opts).unwrap();
    assert_eq!(extract(&img, &opts).unwrap(), b"corrected");
}

/// 旧版工具的收尾缺陷在不使用过滤器时仍能往返
#[test]
fn round_trip_with_reference_quirks() {
    for density in 1..=8 {
        let mut img = noisy_image(20, 20, 99);
        let opts = StegOptions {
            quirks: Quirks::reference(),
            ..options(density, None, false)
        };
        embed(&mut img, b"legacy flush", &opts).unwrap();
        assert_eq!(extract(&img, &opts).unwrap(), b"legacy flush");
    }
}

/// 相同输入总得到相同序列
#[test]
fn sequences_are_deterministic() {
    let img = noisy_image(30, 25, 3);
    for filter in FILTERS {
        for battlesteg in [false, true] {
            let mut opts = options(2, filter, battlesteg);
            if opts.validate().is_err() {
                continue;
            }
            assert_eq!(build_sequence(&img, &opts), build_sequence(&img, &opts));
            opts.password = Password::default();
            assert_eq!(build_sequence(&img, &opts), build_sequence(&img, &opts));
        }
    }
}

/// 不使用过滤器时，序列是全部坐标的一个置换
#[test]
fn unfiltered_sequence_is_a_permutation() {
    let img = noisy_image(17, 11, 5);
    let mut seq = build_sequence(&img, &options(1, None, false)).unwrap();
    seq.sort();
    let mut all = raster_coordinates(17, 11);
    all.sort();
    assert_eq!(seq, all);
}

/// battlesteg 序列覆盖全部坐标且不重复
#[test]
fn battlesteg_sequence_covers_image() {
    let img = noisy_image(26, 19, 11);
    let seq = build_sequence(&img, &options(2, Some(FilterKind::Gradient), true)).unwrap();
    assert_eq!(seq.len(), 26 * 19);
    assert_eq!(seq.iter().collect::<HashSet<_>>().len(), 26 * 19);
}

/// 过滤器永远不会选中边框上的坐标
#[test]
fn filters_never_select_the_border() {
    let img = noisy_image(21, 14, 8);
    for filter in FILTERS.into_iter().flatten() {
        for density in 1..=7 {
            let seq = build_sequence(&img, &options(density, Some(filter), false)).unwrap();
            assert!(!seq.is_empty() || density > 5);
            for c in seq {
                assert!(c.x != 0 && c.x != 20 && c.y != 0 && c.y != 13, "{c:?}");
            }
        }
    }
}

/// 超出容量一个字节时被拒绝，且没有像素被修改
#[test]
fn one_byte_over_capacity_is_rejected_untouched() {
    let mut img = noisy_image(16, 16, 1);
    let opts = options(2, None, false);
    let room = capacity(&img, &opts).unwrap().bytes as usize;
    let before = img.clone();

    let result = embed(&mut img, &vec![0x5A; room + 1], &opts);
    assert_eq!(
        result,
        Err(StegError::InsufficientCapacity {
            capacity: room as i64,
            requested: room + 1
        })
    );
    assert_eq!(img, before);

    embed(&mut img, &vec![0x5A; room], &opts).unwrap();
    assert_eq!(extract(&img, &opts).unwrap(), vec![0x5A; room]);
}

/// 8x8 纯色图像、密度 1、无过滤器、无密码，隐藏单个字节 'A'
#[test]
fn solid_eight_by_eight_single_byte() {
    let mut img = RgbImage::from_pixel(8, 8, Rgb([130, 131, 132]));
    let before = img.clone();
    let opts = StegOptions::default();

    assert_eq!(capacity(&img, &opts).unwrap().bytes, 21);

    let report = embed(&mut img, &[0x41], &opts).unwrap();
    // 8 个长度坐标 + ceil(8 / 3) 个负载坐标
    assert_eq!(report.coordinates_used, 11);
    assert_eq!(extract(&img, &opts).unwrap(), vec![0x41]);

    let used: HashSet<Coordinate> = build_sequence(&before, &opts).unwrap()[..11]
        .iter()
        .copied()
        .collect();
    for (x, y, px) in img.enumerate_pixels() {
        if px != before.get_pixel(x, y) {
            assert!(used.contains(&Coordinate::new(x, y)));
        }
    }
}

#[test]
fn battlesteg_without_filter_is_invalid() {
    let mut img = noisy_image(8, 8, 2);
    let before = img.clone();
    let result = embed(&mut img, b"x", &options(1, None, true));
    assert_eq!(
        result,
        Err(StegError::InvalidParameters(ParameterError::BattlestegWithoutFilter))
    );
    assert_eq!(img, before);
}

#[test]
fn density_eight_with_gradient_is_invalid() {
    let mut img = noisy_image(8, 8, 2);
    let result = embed(&mut img, b"x", &options(8, Some(FilterKind::Gradient), false));
    assert_eq!(
        result,
        Err(StegError::InvalidParameters(ParameterError::DensityTooHighForFilter(8)))
    );
}

/// alpha 通道在嵌入后保持不变
#[test]
fn rgba_alpha_is_untouched() {
    let mut img = RgbaImage::from_fn(24, 24, |x, y| Rgba([(x * 9) as u8, (y * 5) as u8, 77, (x + y) as u8]));
    let alphas: Vec<u8> = img.pixels().map(|p| p.0[3]).collect();
    let opts = options(4, None, false);

    embed(&mut img, b"alpha stays", &opts).unwrap();
    assert_eq!(extract(&img, &opts).unwrap(), b"alpha stays");
    assert_eq!(img.pixels().map(|p| p.0[3]).collect::<Vec<_>>(), alphas);
}

/// 用错误的密度提取：要么报错，要么得到不同的内容
#[test]
fn wrong_density_does_not_recover() {
    let mut img = noisy_image(40, 40, 12);
    embed(&mut img, b"density matters", &options(3, None, false)).unwrap();
    match extract(&img, &options(2, None, false)) {
        Ok(payload) => assert_ne!(payload, b"density matters"),
        Err(e) => assert!(matches!(
            e,
            StegError::MalformedLength { .. } | StegError::SequenceExhausted { .. }
        )),
    }
}
