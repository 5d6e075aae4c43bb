//! # 边缘过滤器
//!
//! 只使用未承载数据的高位，计算每个内部像素的梯度或拉普拉斯幅值，
//! 保留幅值超过阈值的坐标。嵌入前后高位不变，因此两端选出的坐标集合一致。

use crate::carrier::{Carrier, Coordinate};
use crate::constants::{MAX_FILTER_DENSITY, THRESHOLD_BASE};
use crate::error::{ParameterError, Result};
use crate::options::{Density, FilterKind};
use crate::steganography::strip_used_bits;

/// 过滤阈值随密度变化：密度越高，被清除的位越多，阈值越低。
///
/// 非严格阈值使用整数除法 (500, 250, 125, 62, ...)。
pub fn threshold(kind: FilterKind, density: Density) -> f64 {
    let scale = 2f64.powi(density.bits() as i32);
    match kind {
        FilterKind::Gradient | FilterKind::Laplace => {
            (THRESHOLD_BASE >> density.bits()) as f64
        }
        FilterKind::GradientStrict => THRESHOLD_BASE as f64 / (0.5 * scale),
        FilterKind::LaplaceStrict => THRESHOLD_BASE as f64 / (0.1 * scale),
    }
}

/// 选出噪声足够大的内部坐标 (排除四周 1 像素的边框)。
///
/// 扫描顺序为外层 x、内层 y。
pub fn select<C: Carrier + ?Sized>(
    carrier: &C,
    kind: FilterKind,
    density: Density,
    six_bit_strip: bool,
) -> Result<Vec<Coordinate>> {
    if density.bits() > MAX_FILTER_DENSITY {
        return Err(ParameterError::DensityTooHighForFilter(density.bits()).into());
    }

    let (width, height) = (carrier.width(), carrier.height());
    let limit = threshold(kind, density);
    let laplace = matches!(kind, FilterKind::Laplace | FilterKind::LaplaceStrict);
    let strip = |px: [u8; 3]| px.map(|v| strip_used_bits(v, density.bits(), six_bit_strip));

    let mut selected = Vec::new();
    for x in 1..width.saturating_sub(1) {
        for y in 1..height.saturating_sub(1) {
            let center = strip(carrier.pixel(x, y));
            let left = strip(carrier.pixel(x - 1, y));
            let right = strip(carrier.pixel(x + 1, y));
            let up = strip(carrier.pixel(x, y - 1));
            let down = strip(carrier.pixel(x, y + 1));

            let sum_of_squares: i64 = (0..3)
                .map(|c| {
                    let (dx, dy) = if laplace {
                        (
                            right[c] + left[c] - 2 * center[c],
                            down[c] + up[c] - 2 * center[c],
                        )
                    } else {
                        (
                            (right[c] - left[c]).div_euclid(2),
                            (down[c] - up[c]).div_euclid(2),
                        )
                    };
                    (dx as i64).pow(2) + (dy as i64).pow(2)
                })
                .sum();

            if (sum_of_squares as f64).sqrt() > limit {
                selected.push(Coordinate::new(x, y));
            }
        }
    }

    log::debug!(
        "{kind:?} filter kept {} of {} interior pixels (threshold {limit})",
        selected.len(),
        width.saturating_sub(2) as usize * height.saturating_sub(2) as usize
    );
    Ok(selected)
}
