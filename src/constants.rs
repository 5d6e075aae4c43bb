/// 长度字段固定占用的坐标 (像素) 数。
/// 长度字段共 `24 * density` 位，每个像素承载 `3 * density` 位，
/// 因此无论密度为多少，恰好需要 8 个像素。
pub const LENGTH_FIELD_PIXELS: usize = 8;

/// 长度字段中每单位密度对应的位数。
pub const LENGTH_BITS_PER_DENSITY: usize = 24;

/// 每个像素参与隐写的颜色通道数 (R, G, B)。
pub const CHANNELS: usize = 3;

/// 未指定时使用的默认密度 (每个通道的低位数)。
pub const DEFAULT_DENSITY: u8 = 1;

/// 不启用过滤器时允许的最大密度。
pub const MAX_DENSITY: u8 = 8;

/// 启用过滤器时允许的最大密度。
/// 密度为 8 时，过滤器比较的高位全部被清空，无法区分噪声。
pub const MAX_FILTER_DENSITY: u8 = 7;

/// battlesteg 每次命中后额外发射的探测次数。
pub const EXTRA_SHOTS: usize = 15;

/// battlesteg 探测相对命中点在每个轴上的最大偏移。
pub const WITHIN_RANGE: u32 = 5;

/// 未提供密码时，坐标置换默认密码的前缀。
pub const SEQUENCE_PASSWORD_PREFIX: &str = "battlesteg";

/// 未提供密码时，battlesteg 默认密码的前缀。
pub const BATTLESTEG_PASSWORD_PREFIX: &str = "battlesteg-targets";

/// 过滤器阈值的基准值。
pub const THRESHOLD_BASE: u32 = 1000;

/// 旧版清零方式追加的固定零位宽度。
pub const LEGACY_STRIP_WIDTH: u32 = 6;
