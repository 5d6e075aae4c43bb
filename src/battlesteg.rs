//! # battlesteg 自适应遍历
//!
//! 像“海战棋”一样随机开火：按密码置换后的全图坐标依次射击，
//! 一旦命中过滤器选出的噪声坐标，就在其周围 `±WITHIN_RANGE` 内追加
//! `EXTRA_SHOTS` 次探测。结果包含全部坐标，只是噪声区域及其邻域被排在前面。
//!
//! 坐标池用“游标 + 已取标记”表示，不做真实的列表删除。

use crate::carrier::{Coordinate, raster_coordinates};
use crate::constants::{EXTRA_SHOTS, WITHIN_RANGE};
use crate::sequencer::{default_battlesteg_password, seeded_rng, shuffle_with};
use rand::Rng;

/// 按 battlesteg 策略重排全图坐标。
///
/// 洗牌与探测共用同一个随机源，因此相同的 `(targets, password, width, height)`
/// 总得到相同的序列。
pub fn reorder(
    targets: &[Coordinate],
    password: Option<&str>,
    width: u32,
    height: u32,
) -> Vec<Coordinate> {
    let password = password
        .map(str::to_owned)
        .unwrap_or_else(|| default_battlesteg_password(targets.len()));
    let mut rng = seeded_rng(&password);

    let mut pool = raster_coordinates(width, height);
    shuffle_with(&mut pool, &mut rng);

    let cells = pool.len();
    let mut taken = vec![false; cells];
    let mut target = vec![false; cells];
    for c in targets {
        target[c.index(width)] = true;
    }

    let mut sequence = Vec::with_capacity(cells);
    let mut hits = 0usize;
    for &shot in &pool {
        let idx = shot.index(width);
        if taken[idx] {
            continue;
        }
        taken[idx] = true;
        sequence.push(shot);

        if !target[idx] {
            continue;
        }
        target[idx] = false;
        hits += 1;

        for _ in 0..EXTRA_SHOTS {
            let probe = Coordinate::new(
                probe_axis(&mut rng, shot.x, width),
                probe_axis(&mut rng, shot.y, height),
            );
            let pidx = probe.index(width);
            if !taken[pidx] {
                taken[pidx] = true;
                target[pidx] = false;
                sequence.push(probe);
            }
        }
    }

    log::debug!(
        "battlesteg ordered {} coordinates with {hits} direct hits on {} targets",
        sequence.len(),
        targets.len()
    );
    sequence
}

fn probe_axis<R: Rng + ?Sized>(rng: &mut R, center: u32, size: u32) -> u32 {
    let low = center.saturating_sub(WITHIN_RANGE);
    let high = (center + WITHIN_RANGE).min(size - 1);
    rng.random_range(low..=high)
}
