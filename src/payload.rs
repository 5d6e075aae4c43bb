//! # 负载打包协议
//!
//! 负载以 `24 * density` 位的大端长度字段开头，随后是每个字节的 8 位 (高位在前)。
//! 位流依次填入红、绿、蓝三个各容纳 `density` 位的缓冲区，三个缓冲区都满时
//! 写入序列中的下一个坐标。长度字段恰好占用 8 个坐标，之后负载沿用同一缓冲状态。
//! 负载结束时若缓冲区中仍有残余位，写入当前坐标中非空的通道，其余通道保持原值。

use crate::capacity::capacity;
use crate::carrier::{Carrier, Coordinate};
use crate::constants::{LENGTH_BITS_PER_DENSITY, LENGTH_FIELD_PIXELS};
use crate::error::{Result, StegError};
use crate::options::Density;
use crate::steganography::{read_bits, write_bits};

/// 一次成功打包的统计。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackReport {
    pub bytes_embedded: usize,
    pub coordinates_used: usize,
}

/// 坐标耗尽标记，由调用者转换成带进度的错误。
struct Exhausted;

struct Packer<'a, C: ?Sized> {
    carrier: &'a mut C,
    sequence: std::slice::Iter<'a, Coordinate>,
    density: usize,
    channels: [Vec<bool>; 3],
    bits_written: usize,
    coordinates_used: usize,
}

impl<'a, C: Carrier + ?Sized> Packer<'a, C> {
    fn new(carrier: &'a mut C, sequence: &'a [Coordinate], density: Density) -> Self {
        let density = density.bits() as usize;
        Self {
            carrier,
            sequence: sequence.iter(),
            density,
            channels: std::array::from_fn(|_| Vec::with_capacity(density)),
            bits_written: 0,
            coordinates_used: 0,
        }
    }

    fn push(&mut self, bit: bool) -> std::result::Result<(), Exhausted> {
        let density = self.density;
        if let Some(channel) = self.channels.iter_mut().find(|c| c.len() < density) {
            channel.push(bit);
        }
        if self.channels[2].len() == density {
            self.commit(false)?;
        }
        Ok(())
    }

    fn next_coordinate(&mut self) -> std::result::Result<Coordinate, Exhausted> {
        let at = self.sequence.next().copied().ok_or(Exhausted)?;
        self.coordinates_used += 1;
        Ok(at)
    }

    /// 把缓冲区写入下一个坐标并清空。空缓冲区对应的通道保持原值。
    fn commit(&mut self, blue_from_green: bool) -> std::result::Result<(), Exhausted> {
        let at = self.next_coordinate()?;
        let original = self.carrier.pixel_at(at);
        let mut rgb = original;
        for (c, bits) in self.channels.iter().enumerate() {
            if bits.is_empty() {
                continue;
            }
            let base = if c == 2 && blue_from_green {
                original[1]
            } else {
                original[c]
            };
            rgb[c] = write_bits(base, bits);
        }
        self.carrier.set_pixel_at(at, rgb);

        self.bits_written += self.channels.iter().map(Vec::len).sum::<usize>();
        self.channels.iter_mut().for_each(Vec::clear);
        Ok(())
    }

    fn flush(&mut self, blue_from_green: bool) -> std::result::Result<(), Exhausted> {
        if self.channels[0].is_empty() {
            return Ok(());
        }
        self.commit(blue_from_green)
    }
}

/// 长度字段的第 `i` 位 (从最高位数起)。超出 64 位的高位恒为 0。
fn length_bit(len: u64, width: usize, i: usize) -> bool {
    let position = width - 1 - i;
    position < 64 && (len >> position) & 1 == 1
}

/// 沿坐标序列写入带长度前缀的负载。
///
/// 调用前应已通过容量检查；坐标中途耗尽时返回 [`StegError::SequenceExhausted`]，
/// 其中 `completed` 为已完整写入像素的负载字节数。
pub fn pack<C: Carrier + ?Sized>(
    carrier: &mut C,
    sequence: &[Coordinate],
    density: Density,
    payload: &[u8],
    blue_from_green_flush: bool,
) -> Result<PackReport> {
    let length_width = LENGTH_BITS_PER_DENSITY * density.bits() as usize;
    let mut packer = Packer::new(carrier, sequence, density);

    let length_bits = (0..length_width).map(|i| length_bit(payload.len() as u64, length_width, i));
    let payload_bits = payload
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |i| (byte >> i) & 1 == 1));

    let outcome = length_bits
        .chain(payload_bits)
        .try_for_each(|bit| packer.push(bit))
        .and_then(|()| packer.flush(blue_from_green_flush));

    let bytes_embedded = packer.bits_written.saturating_sub(length_width) / 8;
    match outcome {
        Ok(()) => Ok(PackReport {
            bytes_embedded: payload.len(),
            coordinates_used: packer.coordinates_used,
        }),
        Err(Exhausted) => {
            log::warn!(
                "ran out of coordinates after {bytes_embedded} of {} bytes",
                payload.len()
            );
            Err(StegError::SequenceExhausted {
                completed: bytes_embedded.min(payload.len()),
                expected: payload.len(),
            })
        }
    }
}

/// 沿坐标序列读出负载。
///
/// 长度字段超出序列容量时返回 [`StegError::MalformedLength`]。
pub fn unpack<C: Carrier + ?Sized>(
    carrier: &C,
    sequence: &[Coordinate],
    density: Density,
) -> Result<Vec<u8>> {
    let bits = density.bits() as usize;
    let read_pixel = |at: Coordinate| {
        carrier
            .pixel_at(at)
            .into_iter()
            .flat_map(move |value| read_bits(value, bits))
    };

    if sequence.len() < LENGTH_FIELD_PIXELS {
        return Err(StegError::SequenceExhausted {
            completed: 0,
            expected: 0,
        });
    }
    let (header, body) = sequence.split_at(LENGTH_FIELD_PIXELS);

    let mut declared = 0u64;
    for bit in header.iter().flat_map(|&at| read_pixel(at)) {
        declared = declared
            .checked_mul(2)
            .map(|v| v | bit as u64)
            .unwrap_or(u64::MAX);
    }

    let capacity = capacity(sequence.len(), density);
    if declared > capacity.max(0) as u64 {
        return Err(StegError::MalformedLength { declared, capacity });
    }

    let expected = declared as usize;
    let mut payload = Vec::with_capacity(expected);
    let mut byte = 0u8;
    let mut filled = 0;
    let mut body = body.iter();
    while payload.len() < expected {
        let at = body.next().copied().ok_or(StegError::SequenceExhausted {
            completed: payload.len(),
            expected,
        })?;
        for bit in read_pixel(at) {
            byte = (byte << 1) | bit as u8;
            filled += 1;
            if filled == 8 {
                payload.push(byte);
                (byte, filled) = (0, 0);
                if payload.len() == expected {
                    break;
                }
            }
        }
    }

    Ok(payload)
}
