//! # 隐写引擎
//!
//! 串联整个流程：构建 (或过滤) 坐标列表 → battlesteg 重排或按密码置换 →
//! 计算容量 → 沿序列写入或读出负载。所有检查都在修改任何像素之前完成。

use crate::battlesteg;
use crate::capacity::{capacity as raw_capacity, ensure_fits};
use crate::carrier::{Carrier, Coordinate, raster_coordinates};
use crate::error::Result;
use crate::filter;
use crate::options::{Density, StegOptions};
use crate::payload::{pack, unpack};
use crate::sequencer::{default_sequence_password, shuffle};

/// 某组设置下载体的容量信息，供调用方决定如何提示或失败。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityReport {
    pub coordinates: usize,
    pub density: Density,
    /// 可承载的最大负载字节数，可能为零或负数。
    pub bytes: i64,
}

/// 嵌入结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedReport {
    pub bytes_embedded: usize,
    pub coordinates_used: usize,
    pub capacity: usize,
}

/// 按设置生成坐标序列。嵌入与提取对同一设置得到完全相同的序列。
pub fn build_sequence<C: Carrier + ?Sized>(
    carrier: &C,
    options: &StegOptions,
) -> Result<Vec<Coordinate>> {
    options.validate()?;

    let (width, height) = (carrier.width(), carrier.height());
    let password = options.password.as_deref();
    let sequence_password = || {
        password
            .map(str::to_owned)
            .unwrap_or_else(|| default_sequence_password(width, height))
    };

    let sequence = match options.filter {
        None => shuffle(raster_coordinates(width, height), &sequence_password()),
        Some(kind) => {
            let targets = filter::select(
                carrier,
                kind,
                options.density,
                options.quirks.six_bit_strip,
            )?;
            if options.battlesteg {
                battlesteg::reorder(&targets, password, width, height)
            } else {
                shuffle(targets, &sequence_password())
            }
        }
    };

    log::debug!(
        "built a sequence of {} coordinates for a {width}x{height} carrier ({options:?})",
        sequence.len()
    );
    Ok(sequence)
}

/// 计算容量。参数无效时报错，容量不足不视为错误。
pub fn capacity<C: Carrier + ?Sized>(carrier: &C, options: &StegOptions) -> Result<CapacityReport> {
    let sequence = build_sequence(carrier, options)?;
    Ok(CapacityReport {
        coordinates: sequence.len(),
        density: options.density,
        bytes: raw_capacity(sequence.len(), options.density),
    })
}

/// 把负载嵌入载体。
///
/// 参数无效或容量不足时返回错误，此时载体未被修改。
pub fn embed<C: Carrier + ?Sized>(
    carrier: &mut C,
    payload: &[u8],
    options: &StegOptions,
) -> Result<EmbedReport> {
    let sequence = build_sequence(&*carrier, options)?;
    let capacity = ensure_fits(sequence.len(), options.density, payload.len())?;

    let report = pack(
        carrier,
        &sequence,
        options.density,
        payload,
        options.quirks.blue_from_green_flush,
    )?;

    log::info!(
        "embedded {} bytes across {} coordinates (capacity {capacity})",
        report.bytes_embedded,
        report.coordinates_used
    );
    Ok(EmbedReport {
        bytes_embedded: report.bytes_embedded,
        coordinates_used: report.coordinates_used,
        capacity,
    })
}

/// 从载体中提取负载。
pub fn extract<C: Carrier + ?Sized>(carrier: &C, options: &StegOptions) -> Result<Vec<u8>> {
    let sequence = build_sequence(carrier, options)?;
    let payload = unpack(carrier, &sequence, options.density)?;
    log::info!("extracted {} bytes", payload.len());
    Ok(payload)
}
