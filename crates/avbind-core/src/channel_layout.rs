//! 音频声道布局定义.
//!
//! 对应 FFmpeg 的 `AVChannelLayout` / `AV_CH_LAYOUT_*`.

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// 声道位掩码, 每个位代表一个扬声器位置 (与 `AV_CH_*` 取值一致)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ChannelMask: u64 {
        /// 前方左声道
        const FRONT_LEFT            = 1 << 0;
        /// 前方右声道
        const FRONT_RIGHT           = 1 << 1;
        /// 前方中央声道
        const FRONT_CENTER          = 1 << 2;
        /// 低频效果 (LFE)
        const LOW_FREQUENCY         = 1 << 3;
        /// 后方左声道
        const BACK_LEFT             = 1 << 4;
        /// 后方右声道
        const BACK_RIGHT            = 1 << 5;
        /// 后方中央声道
        const BACK_CENTER           = 1 << 8;
        /// 侧方左声道
        const SIDE_LEFT             = 1 << 9;
        /// 侧方右声道
        const SIDE_RIGHT            = 1 << 10;
    }
}

/// 声道布局
///
/// 标准布局由位掩码描述; 非标准布局只记录声道数, 掩码为空.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelLayout {
    /// 声道数量
    pub channels: u32,
    /// 声道位掩码
    pub mask: ChannelMask,
}

impl ChannelLayout {
    /// 单声道
    pub const MONO: Self = Self::from_mask(ChannelMask::FRONT_CENTER);

    /// 立体声
    pub const STEREO: Self =
        Self::from_mask(ChannelMask::FRONT_LEFT.union(ChannelMask::FRONT_RIGHT));

    /// 2.1
    pub const SURROUND_2_1: Self = Self::from_mask(
        ChannelMask::FRONT_LEFT
            .union(ChannelMask::FRONT_RIGHT)
            .union(ChannelMask::LOW_FREQUENCY),
    );

    /// 四声道 (quad)
    pub const QUAD: Self = Self::from_mask(
        ChannelMask::FRONT_LEFT
            .union(ChannelMask::FRONT_RIGHT)
            .union(ChannelMask::BACK_LEFT)
            .union(ChannelMask::BACK_RIGHT),
    );

    /// 5.1 环绕声 (侧方)
    pub const SURROUND_5_1: Self = Self::from_mask(
        ChannelMask::FRONT_LEFT
            .union(ChannelMask::FRONT_RIGHT)
            .union(ChannelMask::FRONT_CENTER)
            .union(ChannelMask::LOW_FREQUENCY)
            .union(ChannelMask::SIDE_LEFT)
            .union(ChannelMask::SIDE_RIGHT),
    );

    /// 7.1 环绕声
    pub const SURROUND_7_1: Self = Self::from_mask(
        ChannelMask::FRONT_LEFT
            .union(ChannelMask::FRONT_RIGHT)
            .union(ChannelMask::FRONT_CENTER)
            .union(ChannelMask::LOW_FREQUENCY)
            .union(ChannelMask::BACK_LEFT)
            .union(ChannelMask::BACK_RIGHT)
            .union(ChannelMask::SIDE_LEFT)
            .union(ChannelMask::SIDE_RIGHT),
    );

    /// 由位掩码创建布局, 声道数为置位数量
    pub const fn from_mask(mask: ChannelMask) -> Self {
        Self {
            channels: mask.bits().count_ones(),
            mask,
        }
    }

    /// 根据声道数创建默认布局
    pub fn from_channels(channels: u32) -> Self {
        match channels {
            1 => Self::MONO,
            2 => Self::STEREO,
            3 => Self::SURROUND_2_1,
            4 => Self::QUAD,
            6 => Self::SURROUND_5_1,
            8 => Self::SURROUND_7_1,
            n => Self {
                channels: n,
                mask: ChannelMask::empty(),
            },
        }
    }

    /// 标准布局名称, 非标准布局返回 `None`
    pub fn name(&self) -> Option<&'static str> {
        match *self {
            Self::MONO => Some("mono"),
            Self::STEREO => Some("stereo"),
            Self::SURROUND_2_1 => Some("2.1"),
            Self::QUAD => Some("quad"),
            Self::SURROUND_5_1 => Some("5.1(side)"),
            Self::SURROUND_7_1 => Some("7.1"),
            _ => None,
        }
    }
}

impl fmt::Display for ChannelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "{} channels", self.channels),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_掩码决定声道数() {
        assert_eq!(ChannelLayout::SURROUND_5_1.channels, 6);
        assert_eq!(ChannelLayout::SURROUND_7_1.channels, 8);
        assert_eq!(ChannelLayout::MONO.channels, 1);
    }

    #[test]
    fn test_按声道数创建() {
        assert_eq!(ChannelLayout::from_channels(2), ChannelLayout::STEREO);
        let odd = ChannelLayout::from_channels(5);
        assert_eq!(odd.channels, 5);
        assert!(odd.mask.is_empty());
        assert_eq!(odd.to_string(), "5 channels");
        assert_eq!(ChannelLayout::SURROUND_5_1.to_string(), "5.1(side)");
    }
}
