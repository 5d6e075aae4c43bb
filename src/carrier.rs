//! # 载体图像访问
//!
//! 核心只通过 [`Carrier`] 读写像素，图像的解码与编码由调用方负责。

use image::{Rgb, RgbImage, Rgba, RgbaImage};

/// 像素坐标 `(x, y)`，满足 `x < width`、`y < height`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub x: u32,
    pub y: u32,
}

impl Coordinate {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// 按行优先展开后的下标。
    pub(crate) fn index(self, width: u32) -> usize {
        self.y as usize * width as usize + self.x as usize
    }
}

impl From<(u32, u32)> for Coordinate {
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y }
    }
}

/// 图像访问能力：尺寸以及按 RGB 三元组读写像素。
///
/// 越界访问属于调用方的前置条件违例，实现可以直接 panic。
pub trait Carrier {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn pixel(&self, x: u32, y: u32) -> [u8; 3];
    fn set_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]);

    fn pixel_at(&self, at: Coordinate) -> [u8; 3] {
        self.pixel(at.x, at.y)
    }

    fn set_pixel_at(&mut self, at: Coordinate, rgb: [u8; 3]) {
        self.set_pixel(at.x, at.y, rgb)
    }
}

impl Carrier for RgbImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.get_pixel(x, y).0
    }

    fn set_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        self.put_pixel(x, y, Rgb(rgb));
    }
}

/// 带 alpha 通道的图像：alpha 永不参与隐写，写入时保持原值。
impl Carrier for RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let [r, g, b, _] = self.get_pixel(x, y).0;
        [r, g, b]
    }

    fn set_pixel(&mut self, x: u32, y: u32, [r, g, b]: [u8; 3]) {
        let alpha = self.get_pixel(x, y).0[3];
        self.put_pixel(x, y, Rgba([r, g, b, alpha]));
    }
}

/// 全部坐标的光栅顺序：外层为 y，内层为 x。
pub fn raster_coordinates(width: u32, height: u32) -> Vec<Coordinate> {
    (0..height)
        .flat_map(|y| (0..width).map(move |x| Coordinate::new(x, y)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raster_order_is_row_major() {
        let coords = raster_coordinates(3, 2);
        let expected: Vec<Coordinate> = [(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]
            .into_iter()
            .map(Coordinate::from)
            .collect();
        assert_eq!(coords, expected);
    }

    #[test]
    fn index_matches_raster_position() {
        let coords = raster_coordinates(5, 4);
        for (i, c) in coords.iter().enumerate() {
            assert_eq!(c.index(5), i);
        }
    }

    #[test]
    fn rgba_keeps_alpha() {
        let mut img = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 77]));
        img.set_pixel(1, 1, [1, 2, 3]);
        assert_eq!(img.get_pixel(1, 1).0, [1, 2, 3, 77]);
        assert_eq!(Carrier::pixel(&img, 1, 1), [1, 2, 3]);
    }

    #[test]
    fn rgb_round_trip() {
        let mut img = RgbImage::new(4, 3);
        assert_eq!(Carrier::width(&img), 4);
        assert_eq!(Carrier::height(&img), 3);
        img.set_pixel_at(Coordinate::new(3, 2), [9, 8, 7]);
        assert_eq!(img.pixel_at(Coordinate::new(3, 2)), [9, 8, 7]);
    }
}
