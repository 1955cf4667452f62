//! 媒体类型定义.
//!
//! 对应 FFmpeg 的 `AVMediaType`.

use std::fmt;

/// 媒体流类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    /// 未知类型
    Unknown,
    /// 视频流
    Video,
    /// 音频流
    Audio,
    /// 数据流 (如时间码)
    Data,
    /// 字幕流
    Subtitle,
    /// 附件流 (如封面图片、字体)
    Attachment,
}

impl MediaType {
    /// 与 `av_get_media_type_string` 相同的短名称
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Data => "data",
            Self::Subtitle => "subtitle",
            Self::Attachment => "attachment",
        }
    }

    /// `ffmpeg -codecs` 风格的单字符标记
    pub const fn letter(&self) -> char {
        match self {
            Self::Video => 'V',
            Self::Audio => 'A',
            Self::Data => 'D',
            Self::Subtitle => 'S',
            Self::Attachment => 'T',
            Self::Unknown => '?',
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
