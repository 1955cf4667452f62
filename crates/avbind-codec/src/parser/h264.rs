//! H.264 Annex B 访问单元解析引擎.
//!
//! Annex B 使用起始码分隔 NAL 单元:
//! - 3 字节起始码: `00 00 01`
//! - 4 字节起始码: `00 00 00 01`
//!
//! 访问单元边界判定 (已出现 VCL NAL 之后):
//! - 遇到 AUD / SPS / PPS / SEI 或 14..=18 类型的 NAL
//! - 遇到 `first_mb_in_slice == 0` 的切片, 即切片头首位为 1
//!
//! 4 字节起始码的前导零归属下一个访问单元.

use std::fmt;

use avbind_core::AvResult;

use super::ParserEngine;

/// NAL 单元类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NalUnitType {
    /// 非 IDR 图像切片
    Slice,
    /// 数据分区 A
    SliceDpa,
    /// 数据分区 B
    SliceDpb,
    /// 数据分区 C
    SliceDpc,
    /// IDR 图像切片
    SliceIdr,
    /// 增补增强信息 (SEI)
    Sei,
    /// 序列参数集 (SPS)
    Sps,
    /// 图像参数集 (PPS)
    Pps,
    /// 访问单元分隔符 (AUD)
    Aud,
    /// 序列结束
    EndOfSequence,
    /// 流结束
    EndOfStream,
    /// 填充数据
    FillerData,
    /// 其它类型
    Other(u8),
}

impl NalUnitType {
    /// 从 NAL 头部字节解析类型
    pub fn from_header(header: u8) -> Self {
        match header & 0x1F {
            1 => Self::Slice,
            2 => Self::SliceDpa,
            3 => Self::SliceDpb,
            4 => Self::SliceDpc,
            5 => Self::SliceIdr,
            6 => Self::Sei,
            7 => Self::Sps,
            8 => Self::Pps,
            9 => Self::Aud,
            10 => Self::EndOfSequence,
            11 => Self::EndOfStream,
            12 => Self::FillerData,
            other => Self::Other(other),
        }
    }

    /// 是否为 VCL NAL
    pub fn is_vcl(&self) -> bool {
        matches!(
            self,
            Self::Slice | Self::SliceDpa | Self::SliceDpb | Self::SliceDpc | Self::SliceIdr
        )
    }

    /// 是否携带切片头 (可读取 first_mb_in_slice)
    fn has_slice_header(&self) -> bool {
        matches!(self, Self::Slice | Self::SliceDpa | Self::SliceIdr)
    }

    /// 出现在 VCL 之后时是否开启新的访问单元
    fn opens_access_unit(&self) -> bool {
        match self {
            Self::Sei | Self::Sps | Self::Pps | Self::Aud => true,
            Self::Other(id) => (14..=18).contains(id),
            _ => false,
        }
    }
}

impl fmt::Display for NalUnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slice => write!(f, "Slice"),
            Self::SliceDpa => write!(f, "SliceDPA"),
            Self::SliceDpb => write!(f, "SliceDPB"),
            Self::SliceDpc => write!(f, "SliceDPC"),
            Self::SliceIdr => write!(f, "IDR"),
            Self::Sei => write!(f, "SEI"),
            Self::Sps => write!(f, "SPS"),
            Self::Pps => write!(f, "PPS"),
            Self::Aud => write!(f, "AUD"),
            Self::EndOfSequence => write!(f, "EndOfSeq"),
            Self::EndOfStream => write!(f, "EndOfStream"),
            Self::FillerData => write!(f, "Filler"),
            Self::Other(id) => write!(f, "Other({id})"),
        }
    }
}

/// 查找所有 3 字节起始码 `00 00 01` 的位置
pub fn find_start_codes(data: &[u8]) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut i = 0;
    while i + 3 <= data.len() {
        if data[i] == 0 && data[i + 1] == 0 && data[i + 2] == 1 {
            positions.push(i);
            i += 3;
        } else {
            i += 1;
        }
    }
    positions
}

/// H.264 访问单元解析引擎
#[derive(Debug, Default)]
pub struct H264Parser {
    /// 当前访问单元 (可能带有下一单元的前缀)
    buf: Vec<u8>,
    /// 下次扫描起点
    scan_pos: usize,
    /// 当前访问单元是否已包含 VCL NAL
    has_vcl: bool,
}

impl H264Parser {
    /// 创建引擎
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 `scan_pos` 起扫描, 返回下一访问单元在缓冲区中的起点
    fn find_boundary(&mut self) -> Option<usize> {
        let buf = &self.buf;
        let mut i = self.scan_pos;
        while i + 3 <= buf.len() {
            if !(buf[i] == 0 && buf[i + 1] == 0 && buf[i + 2] == 1) {
                i += 1;
                continue;
            }
            // 需要 NAL 头部与切片头首字节
            if i + 5 > buf.len() {
                break;
            }
            let nal_type = NalUnitType::from_header(buf[i + 3]);
            let first_mb_zero = buf[i + 4] & 0x80 != 0;
            let new_picture = nal_type.has_slice_header() && first_mb_zero;
            if self.has_vcl && (nal_type.opens_access_unit() || new_picture) {
                self.scan_pos = i;
                let start = if i > 0 && buf[i - 1] == 0 { i - 1 } else { i };
                return Some(start);
            }
            if nal_type.is_vcl() {
                self.has_vcl = true;
            }
            i += 3;
        }
        self.scan_pos = i;
        None
    }

    fn reset_scan(&mut self) {
        self.scan_pos = 0;
        self.has_vcl = false;
    }
}

impl ParserEngine for H264Parser {
    fn name(&self) -> &str {
        "h264"
    }

    fn parse(&mut self, data: &[u8], out: &mut Vec<u8>) -> AvResult<usize> {
        let old_len = self.buf.len();
        self.buf.extend_from_slice(data);

        let Some(start) = self.find_boundary() else {
            return Ok(data.len());
        };

        // 边界之后的新输入由调用方重新送入
        let consumed = start.saturating_sub(old_len);
        let carry_end = start.max(old_len);
        let carry = self.buf[start..carry_end].to_vec();
        self.buf.truncate(start);
        out.clear();
        out.append(&mut self.buf);
        self.buf = carry;
        self.reset_scan();
        log::trace!("H.264 访问单元: {} 字节", out.len());
        Ok(consumed)
    }

    fn flush(&mut self, out: &mut Vec<u8>) {
        out.clear();
        if find_start_codes(&self.buf).is_empty() {
            if !self.buf.is_empty() {
                log::debug!("H.264 丢弃 {} 字节无起始码数据", self.buf.len());
            }
            self.buf.clear();
        } else {
            out.append(&mut self.buf);
        }
        self.reset_scan();
    }

    fn has_pending(&self) -> bool {
        !self.buf.is_empty()
    }

    fn is_keyframe(&self, unit: &[u8]) -> bool {
        find_start_codes(unit).into_iter().any(|pos| {
            unit.get(pos + 3)
                .is_some_and(|&b| NalUnitType::from_header(b) == NalUnitType::SliceIdr)
        })
    }
}
