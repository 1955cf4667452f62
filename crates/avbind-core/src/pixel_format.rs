//! 像素格式定义.
//!
//! 对应 FFmpeg 的 `AVPixelFormat`. 除软件格式外还包含硬件表面格式,
//! 供编解码器描述符的硬件加速配置引用.

use std::fmt;

/// 像素格式
///
/// 命名规则: 颜色空间 + 位深 + 排列方式 (P=Planar, LE/BE=字节序).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PixelFormat {
    /// 未指定
    None,

    // ========================
    // YUV 平面格式 (Planar)
    // ========================
    /// YUV 4:2:0 平面格式, 8 位
    Yuv420p,
    /// YUV 4:2:2 平面格式, 8 位
    Yuv422p,
    /// YUV 4:4:4 平面格式, 8 位
    Yuv444p,
    /// YUV 4:2:0 平面格式, 10 位小端
    Yuv420p10le,
    /// YUV 4:2:2 平面格式, 10 位小端
    Yuv422p10le,
    /// YUV 4:4:4 平面格式, 10 位小端
    Yuv444p10le,
    /// YUVJ 4:2:0 (全范围, MJPEG 使用)
    Yuvj420p,

    // ========================
    // 半平面 / 打包格式
    // ========================
    /// NV12: Y 平面 + UV 交错
    Nv12,
    /// P010: 10 位 NV12
    P010le,
    /// RGB 各 8 位, 打包
    Rgb24,
    /// RGBA 各 8 位, 打包
    Rgba,
    /// BGRA 各 8 位, 打包
    Bgra,
    /// 灰度 8 位
    Gray8,

    // ========================
    // 硬件表面格式
    // ========================
    /// VA-API 表面
    Vaapi,
    /// CUDA 设备内存
    Cuda,
    /// Intel Quick Sync 表面
    Qsv,
    /// macOS VideoToolbox 像素缓冲
    VideoToolbox,
    /// Direct3D 11 纹理
    D3d11,
    /// Vulkan 图像
    Vulkan,
}

impl PixelFormat {
    /// 所有已知像素格式
    pub const ALL: &[PixelFormat] = &[
        Self::Yuv420p,
        Self::Yuv422p,
        Self::Yuv444p,
        Self::Yuv420p10le,
        Self::Yuv422p10le,
        Self::Yuv444p10le,
        Self::Yuvj420p,
        Self::Nv12,
        Self::P010le,
        Self::Rgb24,
        Self::Rgba,
        Self::Bgra,
        Self::Gray8,
        Self::Vaapi,
        Self::Cuda,
        Self::Qsv,
        Self::VideoToolbox,
        Self::D3d11,
        Self::Vulkan,
    ];

    /// 与 `av_get_pix_fmt_name` 相同的名称
    pub const fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Yuv420p => "yuv420p",
            Self::Yuv422p => "yuv422p",
            Self::Yuv444p => "yuv444p",
            Self::Yuv420p10le => "yuv420p10le",
            Self::Yuv422p10le => "yuv422p10le",
            Self::Yuv444p10le => "yuv444p10le",
            Self::Yuvj420p => "yuvj420p",
            Self::Nv12 => "nv12",
            Self::P010le => "p010le",
            Self::Rgb24 => "rgb24",
            Self::Rgba => "rgba",
            Self::Bgra => "bgra",
            Self::Gray8 => "gray",
            Self::Vaapi => "vaapi",
            Self::Cuda => "cuda",
            Self::Qsv => "qsv",
            Self::VideoToolbox => "videotoolbox_vld",
            Self::D3d11 => "d3d11",
            Self::Vulkan => "vulkan",
        }
    }

    /// 按名称查找像素格式, 未找到返回 `None`
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().find(|pf| pf.name() == name).copied()
    }

    /// 是否为硬件表面格式 (`AV_PIX_FMT_FLAG_HWACCEL`)
    pub const fn is_hwaccel(&self) -> bool {
        matches!(
            self,
            Self::Vaapi | Self::Cuda | Self::Qsv | Self::VideoToolbox | Self::D3d11 | Self::Vulkan
        )
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
