//! # LSB 可视化
//!
//! 把每个通道的最低位放大为 0 或 255，便于肉眼观察隐写痕迹。

use crate::carrier::Carrier;
use crate::steganography::read_bits;

/// 原地改写载体：最低位为 0 的通道置 0，为 1 的通道置 255。
pub fn amplify_lsb<C: Carrier + ?Sized>(carrier: &mut C) {
    for x in 0..carrier.width() {
        for y in 0..carrier.height() {
            let rgb = carrier
                .pixel(x, y)
                .map(|v| if read_bits(v, 1)[0] { 255 } else { 0 });
            carrier.set_pixel(x, y, rgb);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn thresholds_each_channel() {
        let mut img = RgbImage::from_pixel(3, 2, Rgb([0b1010, 0b0111, 255]));
        amplify_lsb(&mut img);
        assert!(img.pixels().all(|p| p.0 == [0, 255, 255]));
    }
}
