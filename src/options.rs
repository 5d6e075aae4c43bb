//! # 调用参数
//!
//! 密度、过滤器种类、兼容性开关以及一次嵌入/提取所需的全部设置。

use crate::constants::{DEFAULT_DENSITY, MAX_DENSITY, MAX_FILTER_DENSITY};
use crate::error::ParameterError;
use std::fmt::{self, Debug, Formatter};

/// 每个通道使用的低位数，范围 [1, 8]。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Density(u8);

impl Density {
    pub fn new(bits: u8) -> Result<Self, ParameterError> {
        if (1..=MAX_DENSITY).contains(&bits) {
            Ok(Self(bits))
        } else {
            Err(ParameterError::DensityOutOfRange(bits))
        }
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    /// 每个像素承载的位数。
    pub fn bits_per_pixel(self) -> usize {
        self.0 as usize * crate::constants::CHANNELS
    }
}

impl Default for Density {
    fn default() -> Self {
        Self(DEFAULT_DENSITY)
    }
}

impl TryFrom<u8> for Density {
    type Error = ParameterError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        Self::new(bits)
    }
}

/// 边缘过滤器的种类。不使用过滤器时以 `None` 表示。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Gradient,
    GradientStrict,
    Laplace,
    LaplaceStrict,
}

/// 与旧版工具逐位兼容所需的两个怪癖，可分别开关。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quirks {
    /// 清除低位时补固定 6 个零位，而不是 `density` 个。过滤器阈值以此为准标定。
    pub six_bit_strip: bool,
    /// 收尾时若三个缓冲区都非空，蓝色通道基于绿色通道的原值写入。
    pub blue_from_green_flush: bool,
}

impl Quirks {
    /// 与旧版工具逐位一致。
    pub const fn reference() -> Self {
        Self {
            six_bit_strip: true,
            blue_from_green_flush: true,
        }
    }

    /// 两个怪癖都修正。
    pub const fn corrected() -> Self {
        Self {
            six_bit_strip: false,
            blue_from_green_flush: false,
        }
    }
}

impl Default for Quirks {
    fn default() -> Self {
        Self {
            six_bit_strip: true,
            blue_from_green_flush: false,
        }
    }
}

/// 密码仅用于播种坐标置换，调试输出中不显示明文。
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Password(Option<String>);

impl Password {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl Debug for Password {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(password) => write!(f, "Password({})", "*".repeat(password.len())),
            None => write!(f, "Password(None)"),
        }
    }
}

impl From<Option<String>> for Password {
    fn from(password: Option<String>) -> Self {
        Self(password)
    }
}

impl From<&str> for Password {
    fn from(password: &str) -> Self {
        Self(Some(password.to_string()))
    }
}

/// 一次嵌入或提取的完整设置。嵌入与提取必须使用相同的设置。
#[derive(Debug, Clone, Default)]
pub struct StegOptions {
    pub density: Density,
    pub password: Password,
    pub filter: Option<FilterKind>,
    pub battlesteg: bool,
    pub quirks: Quirks,
}

impl StegOptions {
    /// 检查参数组合，不触碰图像。
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.battlesteg && self.filter.is_none() {
            return Err(ParameterError::BattlestegWithoutFilter);
        }
        if self.filter.is_some() && self.density.bits() > MAX_FILTER_DENSITY {
            return Err(ParameterError::DensityTooHighForFilter(self.density.bits()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_bounds() {
        assert!(Density::new(0).is_err());
        assert!(Density::new(9).is_err());
        assert_eq!(Density::new(8).map(Density::bits), Ok(8));
        assert_eq!(Density::default().bits(), 1);
        assert_eq!(Density::try_from(3).map(Density::bits_per_pixel), Ok(9));
    }

    #[test]
    fn battlesteg_requires_filter() {
        let opts = StegOptions {
            battlesteg: true,
            ..Default::default()
        };
        assert_eq!(opts.validate(), Err(ParameterError::BattlestegWithoutFilter));
    }

    #[test]
    fn filter_caps_density() {
        let mut opts = StegOptions {
            filter: Some(FilterKind::Gradient),
            density: Density::new(8).unwrap(),
            ..Default::default()
        };
        assert_eq!(
            opts.validate(),
            Err(ParameterError::DensityTooHighForFilter(8))
        );
        opts.density = Density::new(7).unwrap();
        assert!(opts.validate().is_ok());
        opts.filter = None;
        opts.density = Density::new(8).unwrap();
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn password_debug_is_masked() {
        assert_eq!(format!("{:?}", Password::from("secret")), "Password(******)");
        assert_eq!(format!("{:?}", Password::default()), "Password(None)");
    }
}
