//! 硬件加速配置.
//!
//! 对应 FFmpeg 的 `AVCodecHWConfig` 与 `AVHWDeviceType`.

use std::fmt;

use avbind_core::PixelFormat;
use bitflags::bitflags;

/// 硬件设备类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum HwDeviceType {
    /// VDPAU
    Vdpau,
    /// NVIDIA CUDA
    Cuda,
    /// VA-API
    Vaapi,
    /// DXVA2
    Dxva2,
    /// Intel Quick Sync
    Qsv,
    /// Apple VideoToolbox
    VideoToolbox,
    /// Direct3D 11 Video
    D3d11va,
    /// Linux DRM
    Drm,
    /// Android MediaCodec
    MediaCodec,
    /// Vulkan
    Vulkan,
}

impl HwDeviceType {
    /// 与 `av_hwdevice_get_type_name` 相同的名称
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Vdpau => "vdpau",
            Self::Cuda => "cuda",
            Self::Vaapi => "vaapi",
            Self::Dxva2 => "dxva2",
            Self::Qsv => "qsv",
            Self::VideoToolbox => "videotoolbox",
            Self::D3d11va => "d3d11va",
            Self::Drm => "drm",
            Self::MediaCodec => "mediacodec",
            Self::Vulkan => "vulkan",
        }
    }
}

impl fmt::Display for HwDeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

bitflags! {
    /// 硬件配置的可用接入方式 (`AV_CODEC_HW_CONFIG_METHOD_*`)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct HwConfigMethods: u32 {
        /// 通过 hw_device_ctx 接入
        const HW_DEVICE_CTX = 0x01;
        /// 通过 hw_frames_ctx 接入
        const HW_FRAMES_CTX = 0x02;
        /// 编解码器内部自行管理
        const INTERNAL      = 0x04;
        /// 旧式临时接入方式
        const AD_HOC        = 0x08;
    }
}

/// 一条硬件加速配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HwConfig {
    /// 硬件表面像素格式
    pub pixel_format: PixelFormat,
    /// 可用的接入方式
    pub methods: HwConfigMethods,
    /// 设备类型
    pub device_type: HwDeviceType,
}

impl HwConfig {
    /// 是否支持通过设备上下文接入
    pub fn supports_device_ctx(&self) -> bool {
        self.methods.contains(HwConfigMethods::HW_DEVICE_CTX)
    }
}
