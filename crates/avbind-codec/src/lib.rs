//! # avbind-codec
//!
//! avbind 编解码器绑定, 对标 FFmpeg libavcodec 的查询与解析接口.
//!
//! - 编解码器描述符与 [`Codec`] 句柄 (`AVCodec`)
//! - 可注入的注册表 [`CodecCatalog`] 与基于游标的遍历 (`av_codec_iterate`)
//! - 码流解析器 [`CodecParser`] (`av_parser_*`)
//!
//! ## 使用示例
//!
//! ```rust
//! use avbind_codec::{CodecCatalog, CodecId, builtin_codecs};
//!
//! let catalog = builtin_codecs();
//! let decoder = catalog.find_decoder(CodecId::H264).unwrap();
//! assert!(decoder.is_decoder());
//!
//! let encoder = catalog.find_encoder_by_name("h264_nvenc").unwrap();
//! assert!(encoder.is_hardware());
//! ```

pub mod builtin;
pub mod codec;
pub mod codec_id;
pub mod hwaccel;
pub mod packet;
pub mod parser;
pub mod registry;

// 重导出常用类型
pub use builtin::builtin_codecs;
pub use codec::{Codec, CodecCapabilities, CodecDescriptor, CodecKind, Profile};
pub use codec_id::CodecId;
pub use hwaccel::{HwConfig, HwConfigMethods, HwDeviceType};
pub use packet::{NOPTS_VALUE, Packet};
pub use parser::{CodecParser, ParserEngine, ParserOutput, ParserRegistry, builtin_parsers};
pub use registry::{CodecCatalog, Codecs, StaticCodecCatalog, iter_codecs};
