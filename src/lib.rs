//! # avbind
//!
//! FFmpeg 风格多媒体库的类型化绑定层.
//!
//! - **有理数**: 帧率、时间基等精确分数运算
//! - **编解码器**: 描述符查询、硬件加速配置
//! - **封装格式**: 封装器查询与输出格式猜测
//! - **滤镜**: 滤镜描述与端口信息
//! - **码流解析器**: 把原始基本流切分为完整编码单元
//!
//! 底层引擎通过 trait 注入, [`Library`] 把一套引擎打包在一起显式传递,
//! 不依赖进程级全局状态.
//!
//! # 快速开始
//!
//! ```rust
//! use avbind::Library;
//! use avbind::codec::{CodecCatalog, CodecId};
//! use avbind::core::Rational;
//!
//! let lib = Library::builtin();
//! let decoder = lib.codecs().find_decoder(CodecId::H264).unwrap();
//! assert_eq!(decoder.name(), "h264");
//!
//! let frame_rate = Rational::new(30000, 1001).unwrap();
//! println!("帧率: {frame_rate} ({:.2} fps)", frame_rate.to_f64());
//! ```
//!
//! # Crate 结构
//!
//! | Crate | 功能 |
//! |-------|------|
//! | `avbind-core` | 有理数、错误码与基础枚举 |
//! | `avbind-codec` | 编解码器描述符与码流解析器 |
//! | `avbind-format` | 封装器描述符与格式猜测 |
//! | `avbind-filter` | 滤镜描述符 |
//! | `avbind-ffi` | C ABI 导出 |

use std::fmt;

use avbind_codec::{CodecCatalog, CodecId, CodecParser, ParserRegistry};
use avbind_core::AvResult;
use avbind_filter::FilterCatalog;
use avbind_format::FormatCatalog;

pub mod logging;

/// 核心类型 (对标 libavutil)
pub use avbind_core as core;

/// 编解码器 (对标 libavcodec)
pub use avbind_codec as codec;

/// 封装格式 (对标 libavformat)
pub use avbind_format as format;

/// 滤镜 (对标 libavfilter)
pub use avbind_filter as filter;

pub use avbind_core::{AvError, ErrorCode, Rational};

/// 获取 avbind 版本号
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// 一套引擎: 编解码器、滤镜、封装器注册表与解析引擎注册表
pub struct Library {
    codecs: Box<dyn CodecCatalog>,
    filters: Box<dyn FilterCatalog>,
    formats: Box<dyn FormatCatalog>,
    parsers: ParserRegistry,
}

impl Library {
    /// 由各注册表组装
    pub fn new(
        codecs: Box<dyn CodecCatalog>,
        filters: Box<dyn FilterCatalog>,
        formats: Box<dyn FormatCatalog>,
        parsers: ParserRegistry,
    ) -> Self {
        Self {
            codecs,
            filters,
            formats,
            parsers,
        }
    }

    /// 内置引擎
    pub fn builtin() -> Self {
        log::debug!("加载内置引擎 avbind {}", version());
        Self::new(
            Box::new(*avbind_codec::builtin_codecs()),
            Box::new(*avbind_filter::builtin_filters()),
            Box::new(*avbind_format::builtin_formats()),
            avbind_codec::builtin_parsers(),
        )
    }

    pub fn codecs(&self) -> &dyn CodecCatalog {
        self.codecs.as_ref()
    }

    pub fn filters(&self) -> &dyn FilterCatalog {
        self.filters.as_ref()
    }

    pub fn formats(&self) -> &dyn FormatCatalog {
        self.formats.as_ref()
    }

    pub fn parsers(&self) -> &ParserRegistry {
        &self.parsers
    }

    /// 为指定编解码器创建码流解析器
    pub fn parser(&self, codec_id: CodecId) -> AvResult<CodecParser> {
        CodecParser::init(&self.parsers, codec_id)
    }
}

impl Default for Library {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("parsers", &self.parsers.list())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use avbind_codec::iter_codecs;
    use avbind_format::iter_muxers;

    #[test]
    fn test_内置引擎() {
        let lib = Library::builtin();
        assert!(iter_codecs(lib.codecs()).count() > 0);
        assert!(iter_muxers(lib.formats()).any(|f| f.name() == "mp4"));
        assert!(lib.filters().get_by_name("scale").is_some());
        assert!(lib.parser(CodecId::Aac).is_ok());
        let err = lib.parser(CodecId::Vp9).err().unwrap();
        assert_eq!(err.code(), ErrorCode::ENOSYS);
    }

    #[test]
    fn test_版本号() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
