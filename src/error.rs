//! # 错误类型模块
//!
//! 核心隐写引擎的所有失败情形。CLI 层通过 `anyhow` 为这些错误附加上下文。

use thiserror::Error;

/// 调用参数不合法的具体原因。
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterError {
    /// 密度不在 [1, 8] 范围内。
    #[error("density must be between 1 and 8, got {0}")]
    DensityOutOfRange(u8),

    /// 启用过滤器时密度超过 7。
    #[error("density cannot exceed 7 while using a filter, got {0}")]
    DensityTooHighForFilter(u8),

    /// 请求 battlesteg 却没有选择过滤器。
    #[error("to perform a battlesteg algorithm, a filter must also be selected")]
    BattlestegWithoutFilter,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StegError {
    /// 参数组合无效，在触碰图像之前即被拒绝。
    #[error("invalid parameters: {0}")]
    InvalidParameters(#[from] ParameterError),

    /// 容量不足 (容量 <= 0 或负载超出容量)。任何像素被修改之前报告。
    #[error("insufficient capacity: the payload is {requested} bytes but the image can hold {capacity}")]
    InsufficientCapacity { capacity: i64, requested: usize },

    /// 坐标序列在打包或解包中途耗尽。
    /// `completed` 为已完整写入 (或读出) 的负载字节数。
    #[error("coordinate sequence exhausted after {completed} of {expected} payload bytes")]
    SequenceExhausted { completed: usize, expected: usize },

    /// 解出的长度字段与图像容量不符，通常意味着密码、过滤器或密度错误。
    #[error("declared payload length {declared} exceeds the carrier capacity of {capacity} bytes (wrong password, filter or density?)")]
    MalformedLength { declared: u64, capacity: i64 },
}

pub type Result<T> = std::result::Result<T, StegError>;
