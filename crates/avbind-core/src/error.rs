//! 统一错误类型与引擎错误码.
//!
//! 错误码空间与 FFmpeg 的 `AVERROR(e)` / `FFERRTAG` 保持一致,
//! 便于与原生库互通, 也便于 C ABI 层直接返回负整数.

use std::fmt;

use thiserror::Error;

/// 按 FFmpeg 的 `FFERRTAG` 规则由四个字节生成负错误码
const fn err_tag(a: u8, b: u8, c: u8, d: u8) -> i32 {
    -((a as i32) | ((b as i32) << 8) | ((c as i32) << 16) | ((d as i32) << 24))
}

/// 引擎状态码
///
/// 非负值表示成功, 负值为错误. 取值与 FFmpeg 的错误码一一对应.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(pub i32);

impl ErrorCode {
    /// 资源暂时不可用, 需要更多输入 (`AVERROR(EAGAIN)`)
    pub const EAGAIN: Self = Self(-11);
    /// 内存不足 (`AVERROR(ENOMEM)`)
    pub const ENOMEM: Self = Self(-12);
    /// 无效参数 (`AVERROR(EINVAL)`)
    pub const EINVAL: Self = Self(-22);
    /// 数值超出范围 (`AVERROR(ERANGE)`)
    pub const ERANGE: Self = Self(-34);
    /// 功能未实现 (`AVERROR(ENOSYS)`)
    pub const ENOSYS: Self = Self(-38);
    /// 流结束
    pub const EOF: Self = Self(err_tag(b'E', b'O', b'F', b' '));
    /// 无效数据
    pub const INVALIDDATA: Self = Self(err_tag(b'I', b'N', b'D', b'A'));
    /// 内部错误
    pub const BUG: Self = Self(err_tag(b'B', b'U', b'G', b'!'));
    /// 未找到解码器
    pub const DECODER_NOT_FOUND: Self = Self(err_tag(0xF8, b'D', b'E', b'C'));
    /// 未找到编码器
    pub const ENCODER_NOT_FOUND: Self = Self(err_tag(0xF8, b'E', b'N', b'C'));
    /// 未找到滤镜
    pub const FILTER_NOT_FOUND: Self = Self(err_tag(0xF8, b'F', b'I', b'L'));
    /// 未找到封装器
    pub const MUXER_NOT_FOUND: Self = Self(err_tag(0xF8, b'M', b'U', b'X'));
    /// 尚未支持
    pub const PATCHWELCOME: Self = Self(err_tag(b'P', b'A', b'W', b'E'));

    /// 原始整数值
    pub const fn value(self) -> i32 {
        self.0
    }

    /// 是否为错误 (负值)
    pub const fn is_error(self) -> bool {
        self.0 < 0
    }

    /// 错误码的描述文本
    pub fn description(self) -> &'static str {
        match self {
            Self::EAGAIN => "资源暂时不可用",
            Self::ENOMEM => "内存不足",
            Self::EINVAL => "无效参数",
            Self::ERANGE => "数值超出范围",
            Self::ENOSYS => "功能未实现",
            Self::EOF => "已到达流末尾",
            Self::INVALIDDATA => "无效数据",
            Self::BUG => "内部错误",
            Self::DECODER_NOT_FOUND => "未找到解码器",
            Self::ENCODER_NOT_FOUND => "未找到编码器",
            Self::FILTER_NOT_FOUND => "未找到滤镜",
            Self::MUXER_NOT_FOUND => "未找到封装器",
            Self::PATCHWELCOME => "尚未支持",
            Self(code) if code >= 0 => "成功",
            _ => "未知错误",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.0)
    }
}

/// avbind 统一错误类型
#[derive(Debug, Error)]
pub enum AvError {
    /// 无效参数
    #[error("无效参数: {0}")]
    InvalidArgument(String),

    /// 除数为零
    #[error("除数为零: {0}")]
    DivisionByZero(String),

    /// 数值溢出
    #[error("数值溢出: {0}")]
    Overflow(String),

    /// 无效数据 (损坏的码流等)
    #[error("无效数据: {0}")]
    InvalidData(String),

    /// 解析器已关闭后仍被使用
    #[error("解析器已关闭")]
    ParserClosed,

    /// 引擎返回的错误码
    #[error("{context}: {code}")]
    Native {
        /// 错误码
        code: ErrorCode,
        /// 出错的调用位置
        context: String,
    },

    /// I/O 错误
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),
}

impl AvError {
    /// 由错误码构造错误
    pub fn native(code: ErrorCode, context: impl Into<String>) -> Self {
        Self::Native {
            code,
            context: context.into(),
        }
    }

    /// 映射到引擎错误码空间
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidArgument(_) | Self::DivisionByZero(_) | Self::ParserClosed => {
                ErrorCode::EINVAL
            }
            Self::Overflow(_) => ErrorCode::ERANGE,
            Self::InvalidData(_) => ErrorCode::INVALIDDATA,
            Self::Native { code, .. } => *code,
            Self::Io(e) => e
                .raw_os_error()
                .map(|errno| ErrorCode(-errno))
                .unwrap_or(ErrorCode::BUG),
        }
    }
}

/// avbind 统一 Result 类型
pub type AvResult<T> = Result<T, AvError>;

/// 将引擎返回的状态码转换为 `Result`
///
/// 非负值原样返回, 负值转换为 [`AvError::Native`].
pub fn check(ret: i32, context: &str) -> AvResult<u32> {
    if ret >= 0 {
        Ok(ret as u32)
    } else {
        Err(AvError::native(ErrorCode(ret), context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_错误码与ffmpeg一致() {
        assert_eq!(ErrorCode::EOF.value(), -541_478_725);
        assert_eq!(ErrorCode::INVALIDDATA.value(), -1_094_995_529);
        assert_eq!(ErrorCode::DECODER_NOT_FOUND.value(), -1_128_613_112);
        assert_eq!(ErrorCode::EINVAL.value(), -22);
    }

    #[test]
    fn test_check_非负值透传() {
        assert_eq!(check(0, "parse").unwrap(), 0);
        assert_eq!(check(188, "parse").unwrap(), 188);
    }

    #[test]
    fn test_check_负值转为错误() {
        let err = check(ErrorCode::ENOMEM.value(), "av_parser_init").unwrap_err();
        assert_eq!(err.code(), ErrorCode::ENOMEM);
        assert!(err.to_string().contains("av_parser_init"));
    }

    #[test]
    fn test_错误变体映射错误码() {
        assert_eq!(AvError::ParserClosed.code(), ErrorCode::EINVAL);
        assert_eq!(AvError::Overflow("x".into()).code(), ErrorCode::ERANGE);
        assert_eq!(
            AvError::InvalidData("x".into()).code(),
            ErrorCode::INVALIDDATA
        );
    }

    #[test]
    fn test_未知错误码描述() {
        assert_eq!(ErrorCode(-9999).description(), "未知错误");
        assert_eq!(ErrorCode(0).description(), "成功");
    }
}
