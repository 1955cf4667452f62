//! 内置编解码器描述符表.
//!
//! 这张表描述一个典型 FFmpeg 构建所暴露的编解码器集合,
//! 作为没有链接原生库时的默认注册表.

use avbind_core::{ChannelLayout, PixelFormat, Rational, SampleFormat};

use crate::codec::{CodecCapabilities as Cap, CodecDescriptor, CodecKind, Profile};
use crate::codec_id::CodecId;
use crate::hwaccel::{HwConfig, HwConfigMethods, HwDeviceType};
use crate::registry::StaticCodecCatalog;

const DEVICE_CTX: HwConfigMethods = HwConfigMethods::HW_DEVICE_CTX;
const DEVICE_OR_FRAMES: HwConfigMethods =
    HwConfigMethods::HW_DEVICE_CTX.union(HwConfigMethods::HW_FRAMES_CTX);

const fn hw(pixel_format: PixelFormat, methods: HwConfigMethods, device_type: HwDeviceType) -> HwConfig {
    HwConfig {
        pixel_format,
        methods,
        device_type,
    }
}

static H264_HW: [HwConfig; 5] = [
    hw(PixelFormat::Vaapi, DEVICE_OR_FRAMES, HwDeviceType::Vaapi),
    hw(PixelFormat::Cuda, DEVICE_CTX, HwDeviceType::Cuda),
    hw(PixelFormat::VideoToolbox, DEVICE_CTX, HwDeviceType::VideoToolbox),
    hw(PixelFormat::D3d11, DEVICE_OR_FRAMES, HwDeviceType::D3d11va),
    hw(PixelFormat::Vulkan, DEVICE_OR_FRAMES, HwDeviceType::Vulkan),
];

static HEVC_HW: [HwConfig; 3] = [
    hw(PixelFormat::Vaapi, DEVICE_OR_FRAMES, HwDeviceType::Vaapi),
    hw(PixelFormat::Cuda, DEVICE_CTX, HwDeviceType::Cuda),
    hw(PixelFormat::VideoToolbox, DEVICE_CTX, HwDeviceType::VideoToolbox),
];

static CUVID_HW: [HwConfig; 1] = [hw(
    PixelFormat::Cuda,
    DEVICE_OR_FRAMES.union(HwConfigMethods::INTERNAL),
    HwDeviceType::Cuda,
)];

static VAAPI_ENC_HW: [HwConfig; 1] = [hw(PixelFormat::Vaapi, DEVICE_OR_FRAMES, HwDeviceType::Vaapi)];

static NVENC_HW: [HwConfig; 1] = [hw(PixelFormat::Cuda, DEVICE_OR_FRAMES, HwDeviceType::Cuda)];

static H264_PROFILES: [Profile; 5] = [
    Profile { id: 66, name: "Baseline" },
    Profile { id: 77, name: "Main" },
    Profile { id: 88, name: "Extended" },
    Profile { id: 100, name: "High" },
    Profile { id: 110, name: "High 10" },
];

static HEVC_PROFILES: [Profile; 3] = [
    Profile { id: 1, name: "Main" },
    Profile { id: 2, name: "Main 10" },
    Profile { id: 3, name: "Main Still Picture" },
];

static AAC_PROFILES: [Profile; 3] = [
    Profile { id: 1, name: "LC" },
    Profile { id: 4, name: "HE-AAC" },
    Profile { id: 28, name: "HE-AACv2" },
];

static X264_PIX_FMTS: [PixelFormat; 6] = [
    PixelFormat::Yuv420p,
    PixelFormat::Yuvj420p,
    PixelFormat::Yuv422p,
    PixelFormat::Yuv444p,
    PixelFormat::Nv12,
    PixelFormat::Yuv420p10le,
];
static X265_PIX_FMTS: [PixelFormat; 4] = [
    PixelFormat::Yuv420p,
    PixelFormat::Yuv422p,
    PixelFormat::Yuv444p,
    PixelFormat::Yuv420p10le,
];
static NVENC_PIX_FMTS: [PixelFormat; 4] = [
    PixelFormat::Yuv420p,
    PixelFormat::Nv12,
    PixelFormat::P010le,
    PixelFormat::Cuda,
];
static VAAPI_PIX_FMTS: [PixelFormat; 1] = [PixelFormat::Vaapi];
static YUV420P_ONLY: [PixelFormat; 1] = [PixelFormat::Yuv420p];
static MJPEG_PIX_FMTS: [PixelFormat; 2] = [PixelFormat::Yuvj420p, PixelFormat::Yuv420p];
static PNG_PIX_FMTS: [PixelFormat; 3] = [PixelFormat::Rgb24, PixelFormat::Rgba, PixelFormat::Gray8];

static MPEG2_FRAME_RATES: [Rational; 8] = [
    Rational::new_const(24000, 1001),
    Rational::new_const(24, 1),
    Rational::new_const(25, 1),
    Rational::new_const(30000, 1001),
    Rational::new_const(30, 1),
    Rational::new_const(50, 1),
    Rational::new_const(60000, 1001),
    Rational::new_const(60, 1),
];

static FLTP_ONLY: [SampleFormat; 1] = [SampleFormat::Fltp];
static S16_ONLY: [SampleFormat; 1] = [SampleFormat::S16];
static FLAC_SAMPLE_FMTS: [SampleFormat; 2] = [SampleFormat::S16, SampleFormat::S32];
static OPUS_SAMPLE_FMTS: [SampleFormat; 2] = [SampleFormat::S16, SampleFormat::Flt];

static AAC_SAMPLE_RATES: [u32; 13] = [
    96000, 88200, 64000, 48000, 44100, 32000, 24000, 22050, 16000, 12000, 11025, 8000, 7350,
];
static OPUS_SAMPLE_RATES: [u32; 5] = [48000, 24000, 16000, 12000, 8000];
static AC3_SAMPLE_RATES: [u32; 3] = [48000, 44100, 32000];

static AC3_LAYOUTS: [ChannelLayout; 4] = [
    ChannelLayout::MONO,
    ChannelLayout::STEREO,
    ChannelLayout::QUAD,
    ChannelLayout::SURROUND_5_1,
];

const DEC: CodecDescriptor = CodecDescriptor {
    kind: CodecKind::Decoder,
    ..CodecDescriptor::TEMPLATE
};

const ENC: CodecDescriptor = CodecDescriptor {
    kind: CodecKind::Encoder,
    ..CodecDescriptor::TEMPLATE
};

const VIDEO_DEC_CAPS: Cap = Cap::DR1
    .union(Cap::DELAY)
    .union(Cap::FRAME_THREADS)
    .union(Cap::SLICE_THREADS);

static CODECS: [CodecDescriptor; 44] = [
    // ========================
    // 视频解码器
    // ========================
    CodecDescriptor {
        name: "h264",
        long_name: "H.264 / AVC / MPEG-4 AVC / MPEG-4 part 10",
        id: CodecId::H264,
        capabilities: VIDEO_DEC_CAPS,
        profiles: &H264_PROFILES,
        hw_configs: &H264_HW,
        ..DEC
    },
    CodecDescriptor {
        name: "h264_cuvid",
        long_name: "Nvidia CUVID H264 decoder",
        id: CodecId::H264,
        capabilities: Cap::DELAY.union(Cap::AVOID_PROBING).union(Cap::HARDWARE),
        wrapper_name: Some("cuvid"),
        pixel_formats: Some(&NVENC_PIX_FMTS),
        hw_configs: &CUVID_HW,
        ..DEC
    },
    CodecDescriptor {
        name: "hevc",
        long_name: "HEVC (High Efficiency Video Coding)",
        id: CodecId::Hevc,
        capabilities: VIDEO_DEC_CAPS,
        profiles: &HEVC_PROFILES,
        hw_configs: &HEVC_HW,
        ..DEC
    },
    CodecDescriptor {
        name: "vp8",
        long_name: "On2 VP8",
        id: CodecId::Vp8,
        capabilities: Cap::DR1.union(Cap::FRAME_THREADS).union(Cap::SLICE_THREADS),
        ..DEC
    },
    CodecDescriptor {
        name: "vp9",
        long_name: "Google VP9",
        id: CodecId::Vp9,
        capabilities: VIDEO_DEC_CAPS,
        ..DEC
    },
    CodecDescriptor {
        name: "libdav1d",
        long_name: "dav1d AV1 decoder by VideoLAN",
        id: CodecId::Av1,
        capabilities: Cap::DELAY.union(Cap::OTHER_THREADS),
        wrapper_name: Some("libdav1d"),
        ..DEC
    },
    CodecDescriptor {
        name: "mpeg2video",
        long_name: "MPEG-2 video",
        id: CodecId::Mpeg2Video,
        capabilities: Cap::DR1.union(Cap::DELAY).union(Cap::SLICE_THREADS),
        ..DEC
    },
    CodecDescriptor {
        name: "mpeg4",
        long_name: "MPEG-4 part 2",
        id: CodecId::Mpeg4,
        capabilities: Cap::DR1.union(Cap::DELAY).union(Cap::FRAME_THREADS),
        ..DEC
    },
    CodecDescriptor {
        name: "mjpeg",
        long_name: "MJPEG (Motion JPEG)",
        id: CodecId::Mjpeg,
        capabilities: Cap::DR1,
        ..DEC
    },
    CodecDescriptor {
        name: "png",
        long_name: "PNG (Portable Network Graphics) image",
        id: CodecId::Png,
        capabilities: Cap::DR1.union(Cap::FRAME_THREADS),
        ..DEC
    },
    CodecDescriptor {
        name: "rawvideo",
        long_name: "raw video",
        id: CodecId::RawVideo,
        capabilities: Cap::PARAM_CHANGE,
        ..DEC
    },
    // ========================
    // 音频解码器
    // ========================
    CodecDescriptor {
        name: "aac",
        long_name: "AAC (Advanced Audio Coding)",
        id: CodecId::Aac,
        capabilities: Cap::DR1.union(Cap::CHANNEL_CONF),
        sample_formats: Some(&FLTP_ONLY),
        profiles: &AAC_PROFILES,
        ..DEC
    },
    CodecDescriptor {
        name: "mp3float",
        long_name: "MP3 (MPEG audio layer 3)",
        id: CodecId::Mp3,
        capabilities: Cap::DR1,
        sample_formats: Some(&FLTP_ONLY),
        ..DEC
    },
    CodecDescriptor {
        name: "opus",
        long_name: "Opus",
        id: CodecId::Opus,
        capabilities: Cap::DR1.union(Cap::DELAY).union(Cap::CHANNEL_CONF),
        sample_formats: Some(&FLTP_ONLY),
        ..DEC
    },
    CodecDescriptor {
        name: "vorbis",
        long_name: "Vorbis",
        id: CodecId::Vorbis,
        capabilities: Cap::DR1.union(Cap::CHANNEL_CONF),
        sample_formats: Some(&FLTP_ONLY),
        ..DEC
    },
    CodecDescriptor {
        name: "flac",
        long_name: "FLAC (Free Lossless Audio Codec)",
        id: CodecId::Flac,
        capabilities: Cap::DR1.union(Cap::FRAME_THREADS),
        sample_formats: Some(&FLAC_SAMPLE_FMTS),
        ..DEC
    },
    CodecDescriptor {
        name: "ac3",
        long_name: "ATSC A/52A (AC-3)",
        id: CodecId::Ac3,
        capabilities: Cap::DR1.union(Cap::CHANNEL_CONF),
        sample_formats: Some(&FLTP_ONLY),
        ..DEC
    },
    CodecDescriptor {
        name: "pcm_s16le",
        long_name: "PCM signed 16-bit little-endian",
        id: CodecId::PcmS16le,
        capabilities: Cap::DR1.union(Cap::PARAM_CHANGE),
        sample_formats: Some(&S16_ONLY),
        ..DEC
    },
    // ========================
    // 字幕解码器
    // ========================
    CodecDescriptor {
        name: "subrip",
        long_name: "SubRip subtitle",
        id: CodecId::Subrip,
        ..DEC
    },
    CodecDescriptor {
        name: "ass",
        long_name: "ASS (Advanced SubStation Alpha) subtitle",
        id: CodecId::Ass,
        ..DEC
    },
    CodecDescriptor {
        name: "webvtt",
        long_name: "WebVTT subtitle",
        id: CodecId::Webvtt,
        ..DEC
    },
    CodecDescriptor {
        name: "mov_text",
        long_name: "3GPP Timed Text subtitle",
        id: CodecId::MovText,
        ..DEC
    },
    // ========================
    // 视频编码器
    // ========================
    CodecDescriptor {
        name: "libx264",
        long_name: "libx264 H.264 / AVC / MPEG-4 AVC / MPEG-4 part 10",
        id: CodecId::H264,
        capabilities: Cap::DELAY.union(Cap::OTHER_THREADS).union(Cap::ENCODER_FLUSH),
        wrapper_name: Some("libx264"),
        pixel_formats: Some(&X264_PIX_FMTS),
        profiles: &H264_PROFILES,
        ..ENC
    },
    CodecDescriptor {
        name: "h264_nvenc",
        long_name: "NVIDIA NVENC H.264 encoder",
        id: CodecId::H264,
        capabilities: Cap::DELAY.union(Cap::HARDWARE).union(Cap::ENCODER_FLUSH),
        wrapper_name: Some("nvenc"),
        pixel_formats: Some(&NVENC_PIX_FMTS),
        profiles: &H264_PROFILES,
        hw_configs: &NVENC_HW,
        ..ENC
    },
    CodecDescriptor {
        name: "h264_vaapi",
        long_name: "H.264/AVC (VAAPI)",
        id: CodecId::H264,
        capabilities: Cap::DELAY.union(Cap::HARDWARE),
        pixel_formats: Some(&VAAPI_PIX_FMTS),
        hw_configs: &VAAPI_ENC_HW,
        ..ENC
    },
    CodecDescriptor {
        name: "libx265",
        long_name: "libx265 H.265 / HEVC",
        id: CodecId::Hevc,
        capabilities: Cap::DELAY.union(Cap::OTHER_THREADS),
        wrapper_name: Some("libx265"),
        pixel_formats: Some(&X265_PIX_FMTS),
        profiles: &HEVC_PROFILES,
        ..ENC
    },
    CodecDescriptor {
        name: "hevc_nvenc",
        long_name: "NVIDIA NVENC hevc encoder",
        id: CodecId::Hevc,
        capabilities: Cap::DELAY.union(Cap::HARDWARE).union(Cap::ENCODER_FLUSH),
        wrapper_name: Some("nvenc"),
        pixel_formats: Some(&NVENC_PIX_FMTS),
        profiles: &HEVC_PROFILES,
        hw_configs: &NVENC_HW,
        ..ENC
    },
    CodecDescriptor {
        name: "libvpx-vp9",
        long_name: "libvpx VP9",
        id: CodecId::Vp9,
        capabilities: Cap::DELAY.union(Cap::OTHER_THREADS),
        wrapper_name: Some("libvpx"),
        pixel_formats: Some(&X265_PIX_FMTS),
        ..ENC
    },
    CodecDescriptor {
        name: "libaom-av1",
        long_name: "libaom AV1",
        id: CodecId::Av1,
        capabilities: Cap::DELAY.union(Cap::OTHER_THREADS),
        wrapper_name: Some("libaom"),
        pixel_formats: Some(&X265_PIX_FMTS),
        ..ENC
    },
    CodecDescriptor {
        name: "mpeg2video",
        long_name: "MPEG-2 video",
        id: CodecId::Mpeg2Video,
        capabilities: Cap::DELAY.union(Cap::SLICE_THREADS),
        pixel_formats: Some(&YUV420P_ONLY),
        frame_rates: Some(&MPEG2_FRAME_RATES),
        ..ENC
    },
    CodecDescriptor {
        name: "mpeg4",
        long_name: "MPEG-4 part 2",
        id: CodecId::Mpeg4,
        capabilities: Cap::DELAY.union(Cap::SLICE_THREADS),
        pixel_formats: Some(&YUV420P_ONLY),
        ..ENC
    },
    CodecDescriptor {
        name: "mjpeg",
        long_name: "MJPEG (Motion JPEG)",
        id: CodecId::Mjpeg,
        capabilities: Cap::SLICE_THREADS.union(Cap::FRAME_THREADS),
        pixel_formats: Some(&MJPEG_PIX_FMTS),
        ..ENC
    },
    CodecDescriptor {
        name: "png",
        long_name: "PNG (Portable Network Graphics) image",
        id: CodecId::Png,
        capabilities: Cap::FRAME_THREADS,
        pixel_formats: Some(&PNG_PIX_FMTS),
        ..ENC
    },
    CodecDescriptor {
        name: "rawvideo",
        long_name: "raw video",
        id: CodecId::RawVideo,
        capabilities: Cap::FRAME_THREADS,
        ..ENC
    },
    // ========================
    // 音频编码器
    // ========================
    CodecDescriptor {
        name: "aac",
        long_name: "AAC (Advanced Audio Coding)",
        id: CodecId::Aac,
        capabilities: Cap::DELAY.union(Cap::SMALL_LAST_FRAME),
        sample_formats: Some(&FLTP_ONLY),
        sample_rates: Some(&AAC_SAMPLE_RATES),
        profiles: &AAC_PROFILES,
        ..ENC
    },
    CodecDescriptor {
        name: "opus",
        long_name: "Opus",
        id: CodecId::Opus,
        capabilities: Cap::DELAY.union(Cap::SMALL_LAST_FRAME).union(Cap::EXPERIMENTAL),
        sample_formats: Some(&FLTP_ONLY),
        sample_rates: Some(&[48000]),
        ..ENC
    },
    CodecDescriptor {
        name: "libopus",
        long_name: "libopus Opus",
        id: CodecId::Opus,
        capabilities: Cap::DELAY.union(Cap::SMALL_LAST_FRAME),
        wrapper_name: Some("libopus"),
        sample_formats: Some(&OPUS_SAMPLE_FMTS),
        sample_rates: Some(&OPUS_SAMPLE_RATES),
        ..ENC
    },
    CodecDescriptor {
        name: "vorbis",
        long_name: "Vorbis",
        id: CodecId::Vorbis,
        capabilities: Cap::DELAY.union(Cap::EXPERIMENTAL),
        sample_formats: Some(&FLTP_ONLY),
        ..ENC
    },
    CodecDescriptor {
        name: "libvorbis",
        long_name: "libvorbis",
        id: CodecId::Vorbis,
        capabilities: Cap::DELAY.union(Cap::SMALL_LAST_FRAME),
        wrapper_name: Some("libvorbis"),
        sample_formats: Some(&FLTP_ONLY),
        ..ENC
    },
    CodecDescriptor {
        name: "flac",
        long_name: "FLAC (Free Lossless Audio Codec)",
        id: CodecId::Flac,
        capabilities: Cap::DELAY.union(Cap::SMALL_LAST_FRAME),
        sample_formats: Some(&FLAC_SAMPLE_FMTS),
        ..ENC
    },
    CodecDescriptor {
        name: "ac3",
        long_name: "ATSC A/52A (AC-3)",
        id: CodecId::Ac3,
        sample_formats: Some(&FLTP_ONLY),
        sample_rates: Some(&AC3_SAMPLE_RATES),
        channel_layouts: Some(&AC3_LAYOUTS),
        ..ENC
    },
    CodecDescriptor {
        name: "pcm_s16le",
        long_name: "PCM signed 16-bit little-endian",
        id: CodecId::PcmS16le,
        capabilities: Cap::VARIABLE_FRAME_SIZE,
        sample_formats: Some(&S16_ONLY),
        ..ENC
    },
    // ========================
    // 字幕编码器
    // ========================
    CodecDescriptor {
        name: "subrip",
        long_name: "SubRip subtitle",
        id: CodecId::Subrip,
        ..ENC
    },
    CodecDescriptor {
        name: "webvtt",
        long_name: "WebVTT subtitle",
        id: CodecId::Webvtt,
        ..ENC
    },
];

static BUILTIN: StaticCodecCatalog = StaticCodecCatalog::new(&CODECS);

/// 内置编解码器注册表
pub fn builtin_codecs() -> &'static StaticCodecCatalog {
    &BUILTIN
}
