//! 编解码器标识符.
//!
//! 对应 FFmpeg 的 `AVCodecID`, 为每种编解码算法分配唯一标识.

use std::fmt;

use avbind_core::MediaType;

/// 编解码器标识符
///
/// 唯一标识一种编解码算法, 与具体实现 (编码器/解码器) 和容器格式无关.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CodecId {
    /// 未知编解码器
    None,

    // ========================
    // 视频编解码器
    // ========================
    /// H.264 / AVC / MPEG-4 Part 10
    H264,
    /// H.265 / HEVC
    Hevc,
    /// VP8
    Vp8,
    /// VP9
    Vp9,
    /// AV1
    Av1,
    /// MPEG-2 Video
    Mpeg2Video,
    /// MPEG-4 Part 2
    Mpeg4,
    /// Motion JPEG
    Mjpeg,
    /// PNG
    Png,
    /// Raw 视频
    RawVideo,

    // ========================
    // 音频编解码器
    // ========================
    /// AAC
    Aac,
    /// MP3
    Mp3,
    /// Opus
    Opus,
    /// Vorbis
    Vorbis,
    /// FLAC
    Flac,
    /// AC-3
    Ac3,
    /// PCM 有符号 16 位小端
    PcmS16le,

    // ========================
    // 字幕编解码器
    // ========================
    /// SubRip
    Subrip,
    /// ASS / SSA
    Ass,
    /// WebVTT
    Webvtt,
    /// MOV text (tx3g)
    MovText,
}

impl CodecId {
    /// 所有已知标识 (不含 `None`)
    pub const ALL: &[CodecId] = &[
        Self::H264,
        Self::Hevc,
        Self::Vp8,
        Self::Vp9,
        Self::Av1,
        Self::Mpeg2Video,
        Self::Mpeg4,
        Self::Mjpeg,
        Self::Png,
        Self::RawVideo,
        Self::Aac,
        Self::Mp3,
        Self::Opus,
        Self::Vorbis,
        Self::Flac,
        Self::Ac3,
        Self::PcmS16le,
        Self::Subrip,
        Self::Ass,
        Self::Webvtt,
        Self::MovText,
    ];

    /// 获取编解码器对应的媒体类型
    pub const fn media_type(&self) -> MediaType {
        match self {
            Self::None => MediaType::Unknown,

            Self::H264
            | Self::Hevc
            | Self::Vp8
            | Self::Vp9
            | Self::Av1
            | Self::Mpeg2Video
            | Self::Mpeg4
            | Self::Mjpeg
            | Self::Png
            | Self::RawVideo => MediaType::Video,

            Self::Aac
            | Self::Mp3
            | Self::Opus
            | Self::Vorbis
            | Self::Flac
            | Self::Ac3
            | Self::PcmS16le => MediaType::Audio,

            Self::Subrip | Self::Ass | Self::Webvtt | Self::MovText => MediaType::Subtitle,
        }
    }

    /// 与 `avcodec_get_name` 相同的名称
    pub const fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::H264 => "h264",
            Self::Hevc => "hevc",
            Self::Vp8 => "vp8",
            Self::Vp9 => "vp9",
            Self::Av1 => "av1",
            Self::Mpeg2Video => "mpeg2video",
            Self::Mpeg4 => "mpeg4",
            Self::Mjpeg => "mjpeg",
            Self::Png => "png",
            Self::RawVideo => "rawvideo",
            Self::Aac => "aac",
            Self::Mp3 => "mp3",
            Self::Opus => "opus",
            Self::Vorbis => "vorbis",
            Self::Flac => "flac",
            Self::Ac3 => "ac3",
            Self::PcmS16le => "pcm_s16le",
            Self::Subrip => "subrip",
            Self::Ass => "ass",
            Self::Webvtt => "webvtt",
            Self::MovText => "mov_text",
        }
    }

    /// 按名称查找标识, 未知名称返回 `None`
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().find(|id| id.name() == name).copied()
    }
}

impl fmt::Display for CodecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_名称往返() {
        for id in CodecId::ALL {
            assert_eq!(CodecId::from_name(id.name()), Some(*id));
        }
        assert_eq!(CodecId::from_name("h265"), None);
    }

    #[test]
    fn test_媒体类型() {
        assert_eq!(CodecId::Hevc.media_type(), MediaType::Video);
        assert_eq!(CodecId::Opus.media_type(), MediaType::Audio);
        assert_eq!(CodecId::MovText.media_type(), MediaType::Subtitle);
        assert_eq!(CodecId::None.media_type(), MediaType::Unknown);
    }
}
