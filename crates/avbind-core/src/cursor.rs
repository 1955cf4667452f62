//! 注册表遍历游标.
//!
//! 对应 FFmpeg 中 `av_codec_iterate(void **opaque)` 一类接口的不透明游标:
//! 从 "未开始" 状态出发, 在连续调用之间传递, 直到注册表返回空值.

/// 不透明遍历游标
///
/// 游标内部状态只由提供遍历的引擎解释, 调用方只负责创建和传递.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cursor {
    state: Option<usize>,
}

impl Cursor {
    /// 创建处于起点的游标
    pub const fn new() -> Self {
        Self { state: None }
    }

    /// 是否尚未产出任何元素
    pub fn is_start(&self) -> bool {
        self.state.is_none()
    }

    /// 引擎读取游标状态
    pub fn state(&self) -> Option<usize> {
        self.state
    }

    /// 引擎推进游标
    pub fn advance_to(&mut self, state: usize) {
        self.state = Some(state);
    }

    /// 顺序表遍历的通用推进: 返回下一个下标并更新游标
    ///
    /// 下标越界时游标保持不动, 之后的调用继续返回 `None`.
    pub fn next_index(&mut self, len: usize) -> Option<usize> {
        let next = self.state.map_or(0, |i| i + 1);
        if next < len {
            self.state = Some(next);
            Some(next)
        } else {
            None
        }
    }
}
