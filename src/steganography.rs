//! # 通道位编解码
//!
//! 8 位通道值与其低位之间的纯函数转换。
//! 约定：位切片的第 `i` 个元素对应通道值的第 `i` 位 (第 0 位为最低位)，
//! 因此调用者最先产生的位落在最低位上。`read_bits` 与 `write_bits` 互逆。

use crate::constants::LEGACY_STRIP_WIDTH;

/// 用 `bits` 替换 `value` 的低 `bits.len()` 位，高位保持不变。
///
/// `bits` 的长度必须在 [1, 8] 之间。
pub fn write_bits(value: u8, bits: &[bool]) -> u8 {
    debug_assert!((1..=8).contains(&bits.len()));

    let mask = low_mask(bits.len() as u32);
    let low = bits
        .iter()
        .enumerate()
        .fold(0u8, |acc, (i, &bit)| acc | ((bit as u8) << i));

    (value & !mask) | low
}

/// 读取 `value` 的低 `num_bits` 位，顺序与 `write_bits` 一致。
pub fn read_bits(value: u8, num_bits: usize) -> Vec<bool> {
    debug_assert!((1..=8).contains(&num_bits));

    (0..num_bits).map(|i| (value >> i) & 1 == 1).collect()
}

/// 清除用于承载数据的低位，只留下过滤器比较所需的高位。
///
/// `six_bit_strip` 为真时保留旧版行为：去掉 `density` 个低位后补上固定的 6 个零位，
/// 即 `(value >> density) << 6`；否则恰好清零 `density` 个低位。
pub fn strip_used_bits(value: u8, density: u8, six_bit_strip: bool) -> i32 {
    debug_assert!((1..=7).contains(&density));

    let high = (value >> density) as i32;
    if six_bit_strip {
        high << LEGACY_STRIP_WIDTH
    } else {
        high << density
    }
}

fn low_mask(width: u32) -> u8 {
    // 宽度为 8 时 1u8 << 8 会溢出
    ((1u16 << width) - 1) as u8
}
