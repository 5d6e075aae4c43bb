//! # battlesteg 库
//!
//! 本库包含 LSB 隐写工具的核心逻辑：按密码置换像素坐标、可选的边缘过滤与
//! battlesteg 自适应遍历，以及带长度前缀的负载打包协议。

// 声明库包含的所有模块。

pub mod analysis;
pub mod battlesteg;
pub mod capacity;
pub mod carrier;
pub mod cli;
pub mod constants;
pub mod engine;
pub mod error;
pub mod filter;
pub mod handler;
pub mod options;
pub mod payload;
pub mod sequencer;
pub mod steganography;

pub use carrier::{Carrier, Coordinate};
pub use engine::{CapacityReport, EmbedReport, build_sequence, capacity, embed, extract};
pub use error::{ParameterError, StegError};
pub use options::{Density, FilterKind, Password, Quirks, StegOptions};
