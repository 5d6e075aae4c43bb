//! # 坐标置换
//!
//! 用密码播种的 Fisher-Yates 洗牌。密码经 SHA-256 得到 32 字节种子，
//! 驱动 ChaCha20 伪随机数生成器；嵌入与提取使用相同密码即可得到相同顺序。
//!
//! 洗牌时随机下标一律按 `u32` 抽取，`usize` 在 32 位与 64 位平台上消耗的熵不同，
//! 会导致置换不一致。

use crate::carrier::Coordinate;
use crate::constants::{BATTLESTEG_PASSWORD_PREFIX, SEQUENCE_PASSWORD_PREFIX};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::{Digest, Sha256};

/// 由密码字符串派生的确定性随机源。
pub fn seeded_rng(password: &str) -> ChaCha20Rng {
    let seed: [u8; 32] = Sha256::digest(password.as_bytes()).into();
    ChaCha20Rng::from_seed(seed)
}

/// 原地洗牌，可移植的 Fisher-Yates。
pub fn shuffle_with<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=(i as u32)) as usize;
        items.swap(i, j);
    }
}

/// 按密码置换坐标列表。
pub fn shuffle(mut coords: Vec<Coordinate>, password: &str) -> Vec<Coordinate> {
    shuffle_with(&mut coords, &mut seeded_rng(password));
    coords
}

/// 未提供密码时坐标置换使用的默认密码，只取决于图像宽度与像素总数。
pub fn default_sequence_password(width: u32, height: u32) -> String {
    format!(
        "{SEQUENCE_PASSWORD_PREFIX}:{width}:{}",
        width as u64 * height as u64
    )
}

/// 未提供密码时 battlesteg 使用的默认密码，只取决于目标集合的大小。
pub fn default_battlesteg_password(targets: usize) -> String {
    format!("{BATTLESTEG_PASSWORD_PREFIX}:{targets}")
}
