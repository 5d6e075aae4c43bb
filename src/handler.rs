//! # 命令处理逻辑模块
//!
//! 包含处理各子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、图像解码与编码、调用核心隐写引擎以及向用户报告结果。

use crate::analysis::amplify_lsb;
use crate::carrier::Carrier;
use crate::cli::{AnalyzeArgs, CapacityArgs, HideArgs, RecoverArgs};
use crate::engine;
use crate::error::StegError;
use anyhow::{Context, Result};
use colored::Colorize;
use image::{DynamicImage, RgbImage, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};

/// 允许作为输出的无损图像扩展名。
const LOSSLESS_EXTENSIONS: [&str; 6] = ["png", "bmp", "tiff", "tif", "webp", "qoi"];

/// 解码后的载体。带 alpha 通道的图像保持 RGBA，alpha 不参与隐写。
enum CarrierImage {
    Rgb(RgbImage),
    Rgba(RgbaImage),
}

impl CarrierImage {
    fn open(path: &Path) -> Result<Self> {
        let decoded = image::open(path).with_context(|| {
            format!(
                "Unable to read image file: {}",
                path.to_string_lossy().red().bold()
            )
        })?;
        Ok(match decoded {
            DynamicImage::ImageRgb8(rgb) => Self::Rgb(rgb),
            other if other.color().has_alpha() => Self::Rgba(other.to_rgba8()),
            other => Self::Rgb(other.to_rgb8()),
        })
    }

    fn carrier(&self) -> &dyn Carrier {
        match self {
            Self::Rgb(img) => img,
            Self::Rgba(img) => img,
        }
    }

    fn carrier_mut(&mut self) -> &mut dyn Carrier {
        match self {
            Self::Rgb(img) => img,
            Self::Rgba(img) => img,
        }
    }

    fn save(&self, path: &Path) -> Result<()> {
        let saved = match self {
            Self::Rgb(img) => img.save(path),
            Self::Rgba(img) => img.save(path),
        };
        saved.with_context(|| {
            format!(
                "Unable to write to target image file: {}",
                path.to_string_lossy().red().bold()
            )
        })
    }
}

/// 在输入文件旁生成 `<prefix>_<文件名>` 形式的默认输出路径。
fn sibling_path(input: &Path, prefix: &str, file_name: &str) -> PathBuf {
    input.with_file_name(format!("{prefix}_{file_name}"))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image.png".to_string())
}

/// 检查输出路径：已存在时除非 `force`，否则拒绝覆盖。
fn ensure_writable(dest: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !dest.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        dest.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 输出图像必须是无损格式，否则隐藏的低位会被压缩破坏。
fn ensure_lossless(dest: &Path) -> Result<()> {
    let extension = dest
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    anyhow::ensure!(
        LOSSLESS_EXTENSIONS.contains(&extension.as_str()),
        "Output image must use a lossless format ({}): {}",
        LOSSLESS_EXTENSIONS.join(", "),
        dest.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取图像和内容文件、检查隐写空间是否足够、调用隐写引擎写入长度与内容，
/// 最后将结果写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径与隐写设置的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 隐写参数组合无效 (例如 battlesteg 未配合过滤器)。
/// * 无法读取输入的图像或内容文件，或内容文件为空。
/// * 输出文件已存在且未指定 `--force`，或输出格式不是无损格式。
/// * 图像没有足够的空间来隐藏内容。
/// * 坐标中途耗尽，只隐藏了部分内容 (此时不写出图像)。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let options = args
        .steg
        .to_options()
        .context("Invalid steganography settings.")?;

    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| sibling_path(&args.image, "doctored", &file_name(&args.image)));
    ensure_writable(&dest, args.force)?;
    ensure_lossless(&dest)?;

    let mut picture = CarrierImage::open(&args.image)?;

    let text = fs::read(&args.text).with_context(|| {
        format!(
            "Unable to read text file: {}",
            args.text.to_string_lossy().red().bold()
        )
    })?;
    anyhow::ensure!(
        !text.is_empty(),
        "Text file is empty: {}",
        args.text.to_string_lossy().red().bold()
    );

    let report = match engine::embed(picture.carrier_mut(), &text, &options) {
        Ok(report) => report,
        Err(StegError::InsufficientCapacity { capacity, requested }) => anyhow::bail!(
            "Not enough space in the image to hide the text. \nRequired: {}, Available: {}",
            requested.to_string().red().bold(),
            capacity.max(0).to_string().green().bold()
        ),
        Err(StegError::SequenceExhausted { completed, expected }) => anyhow::bail!(
            "Only {} bytes were hidden; {} bytes were NOT hidden. \nThe image was not saved.",
            completed.to_string().green().bold(),
            (expected - completed).to_string().red().bold()
        ),
        Err(e) => {
            return Err(e).with_context(|| {
                format!(
                    "Failed to hide the message in: {}",
                    args.image.to_string_lossy().red().bold()
                )
            });
        }
    };

    picture.save(&dest)?;

    println!(
        "{} bytes (of a possible {}) have been successfully hidden and saved: {}",
        report.bytes_embedded.to_string().green().bold(),
        report.capacity,
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像文件、按相同设置重建坐标序列并读出内容，
/// 最后将恢复的内容写入目标文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径与隐写设置的 `RecoverArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 隐写参数组合无效。
/// * 无法读取输入的图像文件。
/// * 长度字段不合理或坐标耗尽 (通常是密码、过滤器或密度不匹配)。
/// * 输出文件已存在且未指定 `--force`，或无法写入。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let options = args
        .steg
        .to_options()
        .context("Invalid steganography settings.")?;

    let dest = args.text.clone().unwrap_or_else(|| {
        let stem = args
            .image
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        sibling_path(&args.image, "recovered", &format!("{stem}.txt"))
    });
    ensure_writable(&dest, args.force)?;

    let picture = CarrierImage::open(&args.image)?;

    let text = engine::extract(picture.carrier(), &options).with_context(|| {
        format!(
            "Failed to recover the message from '{}'. \nThe image may not contain a hidden message, or the password, filter or density do not match.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    fs::write(&dest, text).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The text has been successfully recovered and saved: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Capacity' 命令：报告图像在给定设置下可隐藏的最大字节数。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let options = args
        .steg
        .to_options()
        .context("Invalid steganography settings.")?;
    let picture = CarrierImage::open(&args.image)?;

    let report = engine::capacity(picture.carrier(), &options)?;
    if report.bytes > 0 {
        println!(
            "This image can hold a message of up to {} bytes ({} usable pixels at density {}).",
            report.bytes.to_string().green().bold(),
            report.coordinates,
            report.density.bits()
        );
    } else {
        println!(
            "{} Try changing the settings, or use a larger image with fewer areas of flat color.",
            "This image cannot hold a message with the current settings.".red().bold()
        );
    }
    Ok(())
}

/// 处理 'Analyze' 命令：生成最低位的可视化图像。
pub fn handle_analyze(args: AnalyzeArgs) -> Result<()> {
    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| sibling_path(&args.image, "analysis", &file_name(&args.image)));
    ensure_writable(&dest, args.force)?;
    ensure_lossless(&dest)?;

    let mut picture = CarrierImage::open(&args.image)?;
    amplify_lsb(picture.carrier_mut());
    picture.save(&dest)?;

    println!(
        "Analysis complete: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}
