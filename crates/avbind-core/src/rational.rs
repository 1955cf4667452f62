//! 有理数类型, 用于时间基 (time_base)、帧率、宽高比等场景.
//!
//! 与 FFmpeg 的 `AVRational` 内存布局兼容. 四则运算采用交叉乘法,
//! 结果保持未约分形式; 相等比较同样使用交叉乘法, 不经过浮点.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::{AvError, AvResult};

/// 有理数, 由分子和分母组成
///
/// 例如: 时间基 1/90000 表示 90kHz 时钟, 帧率 30000/1001 表示 29.97fps.
/// 分母在构造时保证不为 0, 之后不可变.
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct Rational {
    num: i32,
    den: i32,
}

impl Rational {
    /// 零值
    pub const ZERO: Self = Self { num: 0, den: 1 };

    /// 单位值
    pub const ONE: Self = Self { num: 1, den: 1 };

    /// 常用时间基: 微秒 (1/1_000_000)
    pub const MICRO: Self = Self {
        num: 1,
        den: 1_000_000,
    };

    /// 常用时间基: 毫秒 (1/1_000)
    pub const MILLI: Self = Self { num: 1, den: 1_000 };

    /// 创建新的有理数
    ///
    /// # 参数
    /// - `num`: 分子
    /// - `den`: 分母, 为 0 时返回 `AvError::InvalidArgument`
    pub fn new(num: i32, den: i32) -> AvResult<Self> {
        if den == 0 {
            return Err(AvError::InvalidArgument(format!(
                "有理数分母不能为 0, num={num}"
            )));
        }
        Ok(Self { num, den })
    }

    /// 常量上下文中创建有理数, 用于静态描述符表
    ///
    /// 在 const 上下文中分母为 0 会导致编译失败.
    pub const fn new_const(num: i32, den: i32) -> Self {
        assert!(den != 0, "有理数分母不能为 0");
        Self { num, den }
    }

    /// 分子
    pub const fn num(&self) -> i32 {
        self.num
    }

    /// 分母
    pub const fn den(&self) -> i32 {
        self.den
    }

    /// 加法: (a.num*b.den + b.num*a.den) / (a.den*b.den), 不约分
    #[allow(clippy::should_implement_trait)]
    pub fn add(self, other: Self) -> AvResult<Self> {
        let a = i64::from(self.num) * i64::from(other.den);
        let b = i64::from(other.num) * i64::from(self.den);
        let den = i64::from(self.den) * i64::from(other.den);
        Self::narrow(a + b, den, "add")
    }

    /// 减法: (a.num*b.den - b.num*a.den) / (a.den*b.den), 不约分
    #[allow(clippy::should_implement_trait)]
    pub fn sub(self, other: Self) -> AvResult<Self> {
        let a = i64::from(self.num) * i64::from(other.den);
        let b = i64::from(other.num) * i64::from(self.den);
        let den = i64::from(self.den) * i64::from(other.den);
        Self::narrow(a - b, den, "sub")
    }

    /// 乘法: (a.num*b.num) / (a.den*b.den), 不约分
    #[allow(clippy::should_implement_trait)]
    pub fn mul(self, other: Self) -> AvResult<Self> {
        let num = i64::from(self.num) * i64::from(other.num);
        let den = i64::from(self.den) * i64::from(other.den);
        Self::narrow(num, den, "mul")
    }

    /// 除法: (a.num*b.den) / (a.den*b.num), 不约分
    ///
    /// 除数分子为 0 时返回 `AvError::DivisionByZero`.
    #[allow(clippy::should_implement_trait)]
    pub fn div(self, other: Self) -> AvResult<Self> {
        if other.num == 0 {
            return Err(AvError::DivisionByZero(format!("{self} / {other}")));
        }
        let num = i64::from(self.num) * i64::from(other.den);
        let den = i64::from(self.den) * i64::from(other.num);
        Self::narrow(num, den, "div")
    }

    /// 求倒数
    ///
    /// 分子为 0 时返回 `AvError::DivisionByZero`.
    pub fn inv(self) -> AvResult<Self> {
        if self.num == 0 {
            return Err(AvError::DivisionByZero(format!("1 / ({self})")));
        }
        Ok(Self {
            num: self.den,
            den: self.num,
        })
    }

    /// 值相等比较 (交叉乘法), 与 `==` 等价
    pub fn equals(&self, other: &Self) -> bool {
        i64::from(self.num) * i64::from(other.den) == i64::from(other.num) * i64::from(self.den)
    }

    /// 转换为 f64 浮点数 (有损)
    pub fn to_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// 对有理数进行约分, 并保证分母为正
    ///
    /// 约分并规范符号后若分子或分母超出 i32 (仅当涉及 `i32::MIN` 时,
    /// 如 `1/i32::MIN` 与 `i32::MIN/-1`), 原样返回, 此时分母仍可能为负.
    pub fn reduce(self) -> Self {
        let (num, den) = reduced_parts(self.num, self.den);
        // 约分后的值不超过原值的绝对值, 唯一例外是 i32::MIN 取反
        match (i32::try_from(num), i32::try_from(den)) {
            (Ok(num), Ok(den)) => Self { num, den },
            _ => self,
        }
    }

    /// 将 `value` 从时间基 `from` 重缩放到 `to`, 四舍五入
    ///
    /// 计算 value * from / to, 使用 i128 中间值避免溢出.
    pub fn rescale(value: i64, from: Self, to: Self) -> AvResult<i64> {
        if to.num == 0 {
            return Err(AvError::DivisionByZero(format!("rescale 目标时间基 {to}")));
        }
        let num = i128::from(value) * i128::from(from.num) * i128::from(to.den);
        let mut den = i128::from(from.den) * i128::from(to.num);
        let mut num = num;
        if den < 0 {
            num = -num;
            den = -den;
        }
        let half = den / 2;
        let rounded = if num >= 0 {
            (num + half) / den
        } else {
            (num - half) / den
        };
        i64::try_from(rounded)
            .map_err(|_| AvError::Overflow(format!("rescale {value} {from} -> {to}")))
    }

    fn narrow(num: i64, den: i64, op: &str) -> AvResult<Self> {
        match (i32::try_from(num), i32::try_from(den)) {
            (Ok(num), Ok(den)) => Ok(Self { num, den }),
            _ => Err(AvError::Overflow(format!(
                "有理数 {op} 结果超出 i32 范围: {num}/{den}"
            ))),
        }
    }
}

/// 约分并规范符号 (分母为正), 在 i64 中计算以容纳 i32::MIN
fn reduced_parts(num: i32, den: i32) -> (i64, i64) {
    let (mut num, mut den) = (i64::from(num), i64::from(den));
    let g = gcd(num.unsigned_abs(), den.unsigned_abs());
    if g > 1 {
        // g 不超过 |den| <= 2^31
        let g = g as i64;
        num /= g;
        den /= g;
    }
    if den < 0 {
        num = -num;
        den = -den;
    }
    (num, den)
}

/// 求最大公约数 (欧几里得算法)
fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

impl PartialEq for Rational {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for Rational {}

impl Hash for Rational {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // 与 Eq 保持一致: 等值的不同表示哈希相同
        reduced_parts(self.num, self.den).hash(state);
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = i64::from(self.num) * i64::from(other.den);
        let rhs = i64::from(other.num) * i64::from(self.den);
        let ord = lhs.cmp(&rhs);
        // 分母乘积为负时不等号方向翻转
        if (self.den < 0) != (other.den < 0) {
            ord.reverse()
        } else {
            ord
        }
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

impl FromStr for Rational {
    type Err = AvError;

    /// 解析 "30000/1001"、"16:9" 或纯整数 "25"
    fn from_str(s: &str) -> AvResult<Self> {
        let s = s.trim();
        let parse = |part: &str| {
            part.trim()
                .parse::<i32>()
                .map_err(|e| AvError::InvalidArgument(format!("无法解析有理数 '{s}': {e}")))
        };
        match s.split_once(['/', ':']) {
            Some((num, den)) => Self::new(parse(num)?, parse(den)?),
            None => Self::new(parse(s)?, 1),
        }
    }
}

impl TryFrom<(i32, i32)> for Rational {
    type Error = AvError;

    fn try_from((num, den): (i32, i32)) -> AvResult<Self> {
        Self::new(num, den)
    }
}

impl From<i32> for Rational {
    fn from(num: i32) -> Self {
        Self { num, den: 1 }
    }
}
