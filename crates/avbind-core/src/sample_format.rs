//! 音频采样格式定义.
//!
//! 对应 FFmpeg 的 `AVSampleFormat`.

use std::fmt;

/// 音频采样格式
///
/// - 交错 (Interleaved): 所有声道的采样点交替排列, 如 LRLRLR...
/// - 平面 (Planar): 每个声道独立存储, 如 LLL...RRR...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum SampleFormat {
    /// 未指定
    None,
    /// 无符号 8 位整数, 交错
    U8,
    /// 有符号 16 位整数, 交错
    S16,
    /// 有符号 32 位整数, 交错
    S32,
    /// 32 位浮点, 交错
    Flt,
    /// 64 位浮点, 交错
    Dbl,
    /// 无符号 8 位整数, 平面
    U8p,
    /// 有符号 16 位整数, 平面
    S16p,
    /// 有符号 32 位整数, 平面
    S32p,
    /// 32 位浮点, 平面
    Fltp,
    /// 64 位浮点, 平面
    Dblp,
}

impl SampleFormat {
    /// 所有已知采样格式
    pub const ALL: &[SampleFormat] = &[
        Self::U8,
        Self::S16,
        Self::S32,
        Self::Flt,
        Self::Dbl,
        Self::U8p,
        Self::S16p,
        Self::S32p,
        Self::Fltp,
        Self::Dblp,
    ];

    /// 与 `av_get_sample_fmt_name` 相同的名称
    pub const fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::U8 => "u8",
            Self::S16 => "s16",
            Self::S32 => "s32",
            Self::Flt => "flt",
            Self::Dbl => "dbl",
            Self::U8p => "u8p",
            Self::S16p => "s16p",
            Self::S32p => "s32p",
            Self::Fltp => "fltp",
            Self::Dblp => "dblp",
        }
    }

    /// 按名称查找采样格式
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().find(|sf| sf.name() == name).copied()
    }

    /// 每个采样点占用的字节数
    pub const fn bytes_per_sample(&self) -> u32 {
        match self {
            Self::None => 0,
            Self::U8 | Self::U8p => 1,
            Self::S16 | Self::S16p => 2,
            Self::S32 | Self::S32p | Self::Flt | Self::Fltp => 4,
            Self::Dbl | Self::Dblp => 8,
        }
    }

    /// 是否为平面格式
    pub const fn is_planar(&self) -> bool {
        matches!(
            self,
            Self::U8p | Self::S16p | Self::S32p | Self::Fltp | Self::Dblp
        )
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
