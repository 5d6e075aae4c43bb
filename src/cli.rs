//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::constants::{DEFAULT_DENSITY, MAX_DENSITY};
use crate::error::ParameterError;
use crate::options::{Density, FilterKind, Password, Quirks, StegOptions};
use clap::{Args, Parser, ValueEnum};
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，按密码置换像素顺序，并可只使用图像中噪声较大的区域。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在无损格式图像 (如 PNG, BMP) 中隐藏或恢复数据。\n像素的使用顺序由密码决定；可选的边缘过滤器与 battlesteg 策略让数据集中在噪声较大的区域。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 在无损格式图像 (如 PNG, BMP) 中隐藏文件内容。
    Hide(HideArgs),

    /// 从经过隐写的图像中恢复隐藏的内容。
    Recover(RecoverArgs),

    /// 显示图像在给定设置下可隐藏的最大字节数。
    Capacity(CapacityArgs),

    /// 把每个通道的最低位放大为黑白，生成分析图像。
    Analyze(AnalyzeArgs),
}

/// 可选的边缘过滤器。
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FilterChoice {
    /// 使用全部像素。
    #[default]
    None,
    /// 梯度幅值过滤。
    Gradient,
    /// 更严格的梯度过滤。
    #[value(alias = "gradient_strict")]
    GradientStrict,
    /// 拉普拉斯过滤。
    Laplace,
    /// 更严格的拉普拉斯过滤。
    #[value(alias = "laplace_strict")]
    LaplaceStrict,
}

impl From<FilterChoice> for Option<FilterKind> {
    fn from(choice: FilterChoice) -> Self {
        match choice {
            FilterChoice::None => None,
            FilterChoice::Gradient => Some(FilterKind::Gradient),
            FilterChoice::GradientStrict => Some(FilterKind::GradientStrict),
            FilterChoice::Laplace => Some(FilterKind::Laplace),
            FilterChoice::LaplaceStrict => Some(FilterKind::LaplaceStrict),
        }
    }
}

/// 隐藏与恢复共用的隐写设置。两端必须完全一致。
#[derive(Args, Debug, Clone)]
pub struct StegArgs {
    /// 每个颜色通道使用的低位数 (1-8，启用过滤器时最多 7)。
    #[arg(short, long, default_value_t = DEFAULT_DENSITY, value_parser = clap::value_parser!(u8).range(1..=MAX_DENSITY as i64))]
    pub density: u8,

    /// 决定像素使用顺序的密码。不提供时由图像尺寸派生。
    #[arg(short, long)]
    pub password: Option<String>,

    /// 只使用噪声较大的像素。
    #[arg(short, long, value_enum, default_value_t = FilterChoice::None)]
    pub filter: FilterChoice,

    /// 使用 battlesteg 策略优先遍历噪声区域 (需要同时指定过滤器)。
    #[arg(short, long)]
    pub battlesteg: bool,

    /// 收尾写入时重现旧版工具的蓝色通道缺陷。
    #[arg(long)]
    pub legacy_flush: bool,

    /// 过滤器比较时只清除 density 个低位，而不是旧版工具的固定 6 位补零。
    #[arg(long)]
    pub exact_strip: bool,
}

impl Default for StegArgs {
    fn default() -> Self {
        Self {
            density: DEFAULT_DENSITY,
            password: None,
            filter: FilterChoice::None,
            battlesteg: false,
            legacy_flush: false,
            exact_strip: false,
        }
    }
}

impl StegArgs {
    /// 转换为核心库的设置并校验参数组合。
    pub fn to_options(&self) -> Result<StegOptions, ParameterError> {
        let options = StegOptions {
            density: Density::new(self.density)?,
            password: Password::from(self.password.clone()),
            filter: self.filter.into(),
            battlesteg: self.battlesteg,
            quirks: Quirks {
                six_bit_strip: !self.exact_strip,
                blue_from_green_flush: self.legacy_flush,
            },
        };
        options.validate()?;
        Ok(options)
    }
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct HideArgs {
    /// 用于隐写的输入图像文件路径 (如 PNG, BMP)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的内容的文件路径。
    #[arg(short, long)]
    pub text: PathBuf,

    /// 隐写完成后，保存结果图像的输出路径。默认为输入图像旁的 `doctored_<文件名>`。
    #[arg(short = 'o', long)]
    pub dest: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(long)]
    pub force: bool,

    #[command(flatten)]
    pub steg: StegArgs,
}

/// 'recover' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct RecoverArgs {
    /// 已隐藏数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复内容后的保存路径。默认为图像旁的 `recovered_<文件名>.txt`。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(long)]
    pub force: bool,

    #[command(flatten)]
    pub steg: StegArgs,
}

/// 'capacity' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct CapacityArgs {
    /// 要评估的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    #[command(flatten)]
    pub steg: StegArgs,
}

/// 'analyze' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// 要分析的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 分析图像的输出路径。默认为输入图像旁的 `analysis_<文件名>`。
    #[arg(short = 'o', long)]
    pub dest: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(long)]
    pub force: bool,
}
