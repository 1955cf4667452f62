//! AAC ADTS 帧解析引擎.
//!
//! # ADTS 头部 (7 字节, 含 CRC 时 9 字节)
//! ```text
//! syncword(12) | id(1) | layer(2) | protection_absent(1)
//! profile(2) | sf_index(4) | private(1) | channel_cfg(3)
//! orig(1) | home(1) | copyright_id(1) | copyright_start(1)
//! frame_length(13) | buffer_fullness(11) | raw_blocks(2)
//! ```
//!
//! `frame_length` 包含头部本身. 同步字丢失时逐字节重新同步.

use avbind_core::AvResult;

use super::ParserEngine;

/// 不含 CRC 的头部长度
const HEADER_SIZE: usize = 7;

/// AAC ADTS 帧解析引擎
#[derive(Debug, Default)]
pub struct AdtsParser {
    /// 当前帧已收到的字节 (总以同步字开头)
    buf: Vec<u8>,
    /// 当前帧的总长度, 头部完整之前为 0
    frame_len: usize,
}

impl AdtsParser {
    /// 创建引擎
    pub fn new() -> Self {
        Self::default()
    }

    /// 检查完整头部, 返回帧长度
    fn validate_header(header: &[u8]) -> Option<usize> {
        if header[0] != 0xFF || header[1] & 0xF6 != 0xF0 {
            return None;
        }
        let frame_len = (usize::from(header[3] & 0x03) << 11)
            | (usize::from(header[4]) << 3)
            | usize::from(header[5] >> 5);
        let protection_absent = header[1] & 0x01 != 0;
        let min_len = if protection_absent {
            HEADER_SIZE
        } else {
            HEADER_SIZE + 2
        };
        (frame_len >= min_len).then_some(frame_len)
    }

    /// 头部无效时丢弃首字节, 在剩余数据中重新同步
    fn resync(&mut self) {
        let tail = self.buf.split_off(1);
        log::warn!("ADTS 头部无效, 重新同步");
        self.buf.clear();
        if let Some(start) = find_sync(&tail) {
            self.buf.extend_from_slice(&tail[start..]);
        }
        self.frame_len = 0;
    }
}

/// 查找同步字位置, 末尾单独的 0xFF 也视为候选
fn find_sync(data: &[u8]) -> Option<usize> {
    (0..data.len()).find(|&i| {
        data[i] == 0xFF && data.get(i + 1).is_none_or(|b| b & 0xF6 == 0xF0)
    })
}

impl ParserEngine for AdtsParser {
    fn name(&self) -> &str {
        "aac"
    }

    fn parse(&mut self, data: &[u8], out: &mut Vec<u8>) -> AvResult<usize> {
        let mut consumed = 0;

        if self.buf.is_empty() {
            match find_sync(data) {
                Some(start) => {
                    if start > 0 {
                        log::debug!("ADTS 跳过 {start} 字节非同步数据");
                    }
                    consumed = start;
                }
                None => {
                    log::debug!("ADTS 输入中没有同步字, 丢弃 {} 字节", data.len());
                    return Ok(data.len());
                }
            }
        }

        // 补齐头部
        while self.frame_len == 0 {
            let rest = &data[consumed..];
            let need = HEADER_SIZE.saturating_sub(self.buf.len());
            let take = need.min(rest.len());
            self.buf.extend_from_slice(&rest[..take]);
            consumed += take;
            if self.buf.len() < HEADER_SIZE {
                return Ok(consumed);
            }
            match Self::validate_header(&self.buf) {
                Some(len) => self.frame_len = len,
                None => {
                    self.resync();
                    if self.buf.is_empty() {
                        return Ok(consumed);
                    }
                }
            }
        }

        let rest = &data[consumed..];
        let take = (self.frame_len - self.buf.len()).min(rest.len());
        self.buf.extend_from_slice(&rest[..take]);
        consumed += take;

        if self.buf.len() == self.frame_len {
            out.clear();
            out.append(&mut self.buf);
            self.frame_len = 0;
        }
        Ok(consumed)
    }

    fn flush(&mut self, _out: &mut Vec<u8>) {
        if !self.buf.is_empty() {
            log::warn!("ADTS 流在帧中间结束, 丢弃 {} 字节", self.buf.len());
        }
        self.buf.clear();
        self.frame_len = 0;
    }

    fn has_pending(&self) -> bool {
        !self.buf.is_empty()
    }

    fn is_keyframe(&self, _unit: &[u8]) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 构造一个总长为 `len` 的 ADTS 帧 (无 CRC, AAC LC, 44100Hz, 立体声)
    fn adts_frame(len: usize, fill: u8) -> Vec<u8> {
        let mut frame = vec![
            0xFF,
            0xF1,
            (1 << 6) | (4 << 2),
            (2 << 6) | ((len >> 11) & 0x03) as u8,
            ((len >> 3) & 0xFF) as u8,
            (((len & 0x07) as u8) << 5) | 0x1F,
            0xFC,
        ];
        frame.resize(len, fill);
        frame
    }

    fn feed(parser: &mut AdtsParser, data: &[u8]) -> Vec<Vec<u8>> {
        let mut frames = Vec::new();
        let mut offset = 0;
        while offset < data.len() {
            let mut out = Vec::new();
            let consumed = parser.parse(&data[offset..], &mut out).unwrap();
            offset += consumed;
            if !out.is_empty() {
                frames.push(out);
            } else if consumed == 0 {
                break;
            }
        }
        frames
    }

    #[test]
    fn test_按帧长度切分() {
        let mut stream = adts_frame(20, 0x11);
        stream.extend(adts_frame(33, 0x22));
        let mut parser = AdtsParser::new();
        let frames = feed(&mut parser, &stream);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].len(), 20);
        assert_eq!(frames[1].len(), 33);
        assert_eq!(frames[1][32], 0x22);
    }

    #[test]
    fn test_头部跨越输入块() {
        let frame = adts_frame(16, 0x33);
        let mut parser = AdtsParser::new();
        let mut out = Vec::new();
        assert_eq!(parser.parse(&frame[..3], &mut out).unwrap(), 3);
        assert!(out.is_empty());
        assert_eq!(parser.parse(&frame[3..10], &mut out).unwrap(), 7);
        assert!(out.is_empty());
        assert_eq!(parser.parse(&frame[10..], &mut out).unwrap(), 6);
        assert_eq!(out, frame);
    }

    #[test]
    fn test_跳过垃圾数据重新同步() {
        let mut stream = vec![0x00, 0x12, 0xFF, 0x00];
        stream.extend(adts_frame(12, 0x44));
        let mut parser = AdtsParser::new();
        let frames = feed(&mut parser, &stream);
        assert_eq!(frames, vec![adts_frame(12, 0x44)]);
    }

    #[test]
    fn test_无效帧长度触发重新同步() {
        // 帧长度 3 小于头部长度
        let mut stream = adts_frame(7, 0);
        stream[4] = 0;
        stream[5] = (3 << 5) | 0x1F;
        stream.extend(adts_frame(10, 0x55));
        let mut parser = AdtsParser::new();
        let frames = feed(&mut parser, &stream);
        assert_eq!(frames, vec![adts_frame(10, 0x55)]);
    }

    #[test]
    fn test_结束时丢弃不完整帧() {
        let frame = adts_frame(30, 0x66);
        let mut parser = AdtsParser::new();
        let mut out = Vec::new();
        parser.parse(&frame[..12], &mut out).unwrap();
        parser.flush(&mut out);
        assert!(out.is_empty());
        // 之后可以正常解析新帧
        assert_eq!(feed(&mut parser, &frame), vec![frame.clone()]);
    }
}
