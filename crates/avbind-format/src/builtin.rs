//! 内置引擎的封装器表.

use avbind_codec::CodecId;

use crate::output_format::{FormatFlags, OutputFormatDescriptor as Desc};
use crate::registry::StaticFormatCatalog;

const T: Desc = Desc::TEMPLATE;

/// 原始基本流的公共标志
const RAW: FormatFlags = FormatFlags::NOTIMESTAMPS;

static MUXERS: [Desc; 22] = [
    // ========================
    // 通用容器
    // ========================
    Desc {
        name: "mp4",
        long_name: "MP4 (MPEG-4 Part 14)",
        mime_type: Some("video/mp4"),
        extensions: &["mp4"],
        audio_codec: CodecId::Aac,
        video_codec: CodecId::H264,
        subtitle_codec: CodecId::MovText,
        flags: FormatFlags::GLOBALHEADER
            .union(FormatFlags::ALLOW_FLUSH)
            .union(FormatFlags::TS_NEGATIVE),
        codecs: &[
            CodecId::Hevc,
            CodecId::Av1,
            CodecId::Vp9,
            CodecId::Mpeg4,
            CodecId::Mp3,
            CodecId::Opus,
            CodecId::Flac,
            CodecId::Ac3,
        ],
        ..T
    },
    Desc {
        name: "mov",
        long_name: "QuickTime / MOV",
        extensions: &["mov"],
        audio_codec: CodecId::Aac,
        video_codec: CodecId::H264,
        subtitle_codec: CodecId::MovText,
        flags: FormatFlags::GLOBALHEADER
            .union(FormatFlags::ALLOW_FLUSH)
            .union(FormatFlags::TS_NEGATIVE),
        codecs: &[
            CodecId::Hevc,
            CodecId::Mpeg4,
            CodecId::Mjpeg,
            CodecId::Png,
            CodecId::RawVideo,
            CodecId::PcmS16le,
            CodecId::Mp3,
            CodecId::Ac3,
        ],
        ..T
    },
    Desc {
        name: "ipod",
        long_name: "iPod H.264 MP4 (MPEG-4 Part 14)",
        extensions: &["m4v", "m4a", "m4b"],
        audio_codec: CodecId::Aac,
        video_codec: CodecId::H264,
        flags: FormatFlags::GLOBALHEADER
            .union(FormatFlags::ALLOW_FLUSH)
            .union(FormatFlags::TS_NEGATIVE),
        ..T
    },
    Desc {
        name: "matroska",
        long_name: "Matroska",
        mime_type: Some("video/x-matroska"),
        extensions: &["mkv"],
        audio_codec: CodecId::Vorbis,
        video_codec: CodecId::H264,
        subtitle_codec: CodecId::Ass,
        flags: FormatFlags::GLOBALHEADER
            .union(FormatFlags::VARIABLE_FPS)
            .union(FormatFlags::TS_NONSTRICT)
            .union(FormatFlags::ALLOW_FLUSH),
        codecs: &[
            CodecId::Hevc,
            CodecId::Vp8,
            CodecId::Vp9,
            CodecId::Av1,
            CodecId::Mpeg2Video,
            CodecId::Mpeg4,
            CodecId::Mjpeg,
            CodecId::Aac,
            CodecId::Mp3,
            CodecId::Opus,
            CodecId::Flac,
            CodecId::Ac3,
            CodecId::PcmS16le,
            CodecId::Subrip,
            CodecId::Webvtt,
        ],
        ..T
    },
    Desc {
        name: "matroska",
        long_name: "Matroska Audio",
        mime_type: Some("audio/x-matroska"),
        extensions: &["mka"],
        audio_codec: CodecId::Vorbis,
        flags: FormatFlags::GLOBALHEADER.union(FormatFlags::TS_NONSTRICT),
        codecs: &[
            CodecId::Aac,
            CodecId::Mp3,
            CodecId::Opus,
            CodecId::Flac,
            CodecId::Ac3,
        ],
        ..T
    },
    Desc {
        name: "webm",
        long_name: "WebM",
        mime_type: Some("video/webm"),
        extensions: &["webm"],
        audio_codec: CodecId::Opus,
        video_codec: CodecId::Vp9,
        subtitle_codec: CodecId::Webvtt,
        flags: FormatFlags::GLOBALHEADER
            .union(FormatFlags::VARIABLE_FPS)
            .union(FormatFlags::TS_NONSTRICT)
            .union(FormatFlags::ALLOW_FLUSH),
        codecs: &[CodecId::Vp8, CodecId::Av1, CodecId::Vorbis],
        ..T
    },
    Desc {
        name: "avi",
        long_name: "AVI (Audio Video Interleaved)",
        mime_type: Some("video/x-msvideo"),
        extensions: &["avi"],
        audio_codec: CodecId::Mp3,
        video_codec: CodecId::Mpeg4,
        codecs: &[
            CodecId::H264,
            CodecId::Mjpeg,
            CodecId::RawVideo,
            CodecId::Ac3,
            CodecId::PcmS16le,
        ],
        ..T
    },
    Desc {
        name: "flv",
        long_name: "FLV (Flash Video)",
        mime_type: Some("video/x-flv"),
        extensions: &["flv"],
        audio_codec: CodecId::Aac,
        video_codec: CodecId::H264,
        flags: FormatFlags::GLOBALHEADER
            .union(FormatFlags::VARIABLE_FPS)
            .union(FormatFlags::NODIMENSIONS),
        codecs: &[CodecId::Mp3],
        ..T
    },
    Desc {
        name: "mpegts",
        long_name: "MPEG-TS (MPEG-2 Transport Stream)",
        mime_type: Some("video/MP2T"),
        extensions: &["ts", "m2t", "m2ts", "mts"],
        audio_codec: CodecId::Aac,
        video_codec: CodecId::Mpeg2Video,
        flags: FormatFlags::ALLOW_FLUSH.union(FormatFlags::VARIABLE_FPS),
        codecs: &[
            CodecId::H264,
            CodecId::Hevc,
            CodecId::Mp3,
            CodecId::Ac3,
            CodecId::Opus,
        ],
        ..T
    },
    Desc {
        name: "ogg",
        long_name: "Ogg",
        mime_type: Some("application/ogg"),
        extensions: &["ogg"],
        audio_codec: CodecId::Vorbis,
        flags: FormatFlags::TS_NEGATIVE
            .union(FormatFlags::TS_NONSTRICT)
            .union(FormatFlags::ALLOW_FLUSH),
        codecs: &[CodecId::Flac, CodecId::Opus],
        ..T
    },
    Desc {
        name: "opus",
        long_name: "Ogg Opus",
        mime_type: Some("audio/ogg"),
        extensions: &["opus"],
        audio_codec: CodecId::Opus,
        flags: FormatFlags::TS_NEGATIVE
            .union(FormatFlags::TS_NONSTRICT)
            .union(FormatFlags::ALLOW_FLUSH),
        ..T
    },
    Desc {
        name: "wav",
        long_name: "WAV / WAVE (Waveform Audio)",
        mime_type: Some("audio/x-wav"),
        extensions: &["wav"],
        audio_codec: CodecId::PcmS16le,
        flags: FormatFlags::TS_NONSTRICT,
        codecs: &[CodecId::Mp3, CodecId::Ac3],
        ..T
    },
    // ========================
    // 原始基本流
    // ========================
    Desc {
        name: "mp3",
        long_name: "MP3 (MPEG audio layer 3)",
        mime_type: Some("audio/mpeg"),
        extensions: &["mp3"],
        audio_codec: CodecId::Mp3,
        flags: RAW,
        ..T
    },
    Desc {
        name: "adts",
        long_name: "ADTS AAC (Advanced Audio Coding)",
        mime_type: Some("audio/aac"),
        extensions: &["aac", "adts"],
        audio_codec: CodecId::Aac,
        flags: RAW,
        ..T
    },
    Desc {
        name: "flac",
        long_name: "raw FLAC",
        mime_type: Some("audio/x-flac"),
        extensions: &["flac"],
        audio_codec: CodecId::Flac,
        flags: RAW,
        ..T
    },
    Desc {
        name: "h264",
        long_name: "raw H.264 video",
        extensions: &["h264", "264"],
        video_codec: CodecId::H264,
        flags: RAW,
        ..T
    },
    Desc {
        name: "hevc",
        long_name: "raw HEVC video",
        extensions: &["hevc", "h265", "265"],
        video_codec: CodecId::Hevc,
        flags: RAW,
        ..T
    },
    Desc {
        name: "rawvideo",
        long_name: "raw video",
        extensions: &["yuv", "rgb"],
        video_codec: CodecId::RawVideo,
        flags: RAW,
        ..T
    },
    Desc {
        name: "image2",
        long_name: "image2 sequence",
        extensions: &["bmp", "jpeg", "jpg", "png", "ppm", "tiff"],
        video_codec: CodecId::Mjpeg,
        flags: FormatFlags::NOTIMESTAMPS
            .union(FormatFlags::NODIMENSIONS)
            .union(FormatFlags::NOFILE),
        codecs: &[CodecId::Png],
        ..T
    },
    // ========================
    // 字幕
    // ========================
    Desc {
        name: "srt",
        long_name: "SubRip subtitle",
        mime_type: Some("application/x-subrip"),
        extensions: &["srt"],
        subtitle_codec: CodecId::Subrip,
        flags: RAW,
        ..T
    },
    Desc {
        name: "webvtt",
        long_name: "WebVTT subtitle",
        mime_type: Some("text/vtt"),
        extensions: &["vtt"],
        subtitle_codec: CodecId::Webvtt,
        flags: RAW,
        ..T
    },
    // ========================
    // 特殊
    // ========================
    Desc {
        name: "null",
        long_name: "raw null video",
        audio_codec: CodecId::PcmS16le,
        video_codec: CodecId::RawVideo,
        flags: FormatFlags::NOFILE
            .union(FormatFlags::VARIABLE_FPS)
            .union(FormatFlags::NOTIMESTAMPS),
        ..T
    },
];

static CATALOG: StaticFormatCatalog = StaticFormatCatalog::new(&MUXERS);

/// 内置引擎的封装器注册表
pub fn builtin_formats() -> &'static StaticFormatCatalog {
    &CATALOG
}
