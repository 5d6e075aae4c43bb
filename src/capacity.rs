//! # 容量计算
//!
//! 给定坐标序列长度与密度，计算可承载的最大负载字节数。

use crate::constants::{CHANNELS, LENGTH_BITS_PER_DENSITY, LENGTH_FIELD_PIXELS};
use crate::error::{Result, StegError};
use crate::options::Density;

/// 长度字段可表示的最大值，`2^(24 * density) - 1`，超过 `u64` 时取 `i64::MAX`。
pub fn length_field_limit(density: Density) -> i64 {
    let width = LENGTH_BITS_PER_DENSITY as u32 * density.bits() as u32;
    if width >= 63 {
        i64::MAX
    } else {
        (1i64 << width) - 1
    }
}

/// 原始容量，可能为零或负数。
///
/// `min(2^(24d) - 1, floor(3dN / 8) - 8 - (3d - 8))`
pub fn capacity(coordinates: usize, density: Density) -> i64 {
    let d = density.bits() as i64;
    let total_bits = coordinates as i64 * d * CHANNELS as i64;
    let by_bits = total_bits / 8 - LENGTH_FIELD_PIXELS as i64 - (CHANNELS as i64 * d - 8);

    by_bits.min(length_field_limit(density))
}

/// 确认容量为正且能容纳 `requested` 字节，返回容量。
pub fn ensure_fits(coordinates: usize, density: Density, requested: usize) -> Result<usize> {
    let capacity = capacity(coordinates, density);
    if capacity <= 0 || requested as i64 > capacity {
        return Err(StegError::InsufficientCapacity {
            capacity,
            requested,
        });
    }
    Ok(capacity as usize)
}
