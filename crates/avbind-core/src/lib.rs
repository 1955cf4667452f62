//! # avbind-core
//!
//! avbind 核心值类型, 对应 FFmpeg 的 libavutil 中被绑定层直接暴露的部分:
//! 有理数、错误码、媒体类型、像素/采样格式与声道布局.
//!
//! 这些类型都是纯值类型, 不依赖任何外部引擎.

pub mod channel_layout;
pub mod cursor;
pub mod error;
pub mod media_type;
pub mod pixel_format;
pub mod rational;
pub mod sample_format;

// 重导出常用类型
pub use channel_layout::{ChannelLayout, ChannelMask};
pub use cursor::Cursor;
pub use error::{AvError, AvResult, ErrorCode, check};
pub use media_type::MediaType;
pub use pixel_format::PixelFormat;
pub use rational::Rational;
pub use sample_format::SampleFormat;
