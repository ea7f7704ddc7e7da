//! 面部 Profile 定义
//!
//! 表情和口型是两套独立的命名体系，每套各有三种方言。
//! 一个角色或动画剪辑使用的方言组合就是它的 Profile。

use std::fmt;

/// 表情方言
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ExpressionProfile {
    #[default]
    None,
    Standard,
    ExtendedPlus,
    Extended,
}

impl ExpressionProfile {
    /// 简写名称（用于日志）
    pub fn short_name(self) -> &'static str {
        match self {
            ExpressionProfile::None => "None",
            ExpressionProfile::Standard => "Std",
            ExpressionProfile::ExtendedPlus => "ExPlus",
            ExpressionProfile::Extended => "Ext",
        }
    }

    fn to_bits(self) -> u32 {
        match self {
            ExpressionProfile::None => 0,
            ExpressionProfile::Standard => 1,
            ExpressionProfile::ExtendedPlus => 2,
            ExpressionProfile::Extended => 3,
        }
    }

    fn from_bits(bits: u32) -> Self {
        match bits {
            1 => ExpressionProfile::Standard,
            2 => ExpressionProfile::ExtendedPlus,
            3 => ExpressionProfile::Extended,
            _ => ExpressionProfile::None,
        }
    }
}

/// 口型方言
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VisemeProfile {
    #[default]
    None,
    PairsV1,
    PairsV2,
    Direct,
}

impl VisemeProfile {
    /// 简写名称（用于日志）
    pub fn short_name(self) -> &'static str {
        match self {
            VisemeProfile::None => "None",
            VisemeProfile::PairsV1 => "PairsV1",
            VisemeProfile::PairsV2 => "PairsV2",
            VisemeProfile::Direct => "Direct",
        }
    }

    fn to_bits(self) -> u32 {
        match self {
            VisemeProfile::None => 0,
            VisemeProfile::PairsV1 => 1,
            VisemeProfile::PairsV2 => 2,
            VisemeProfile::Direct => 3,
        }
    }

    fn from_bits(bits: u32) -> Self {
        match bits {
            1 => VisemeProfile::PairsV1,
            2 => VisemeProfile::PairsV2,
            3 => VisemeProfile::Direct,
            _ => VisemeProfile::None,
        }
    }
}

/// 面部 Profile：表情方言 + 口型方言 + 是否带有命名缺陷
///
/// `corrections` 为 true 表示该角色来自会输出错误 blend shape 名称的导出管线，
/// 不参与 Profile 相等性比较。
#[derive(Clone, Copy, Debug, Default)]
pub struct FacialProfile {
    pub expression: ExpressionProfile,
    pub viseme: VisemeProfile,
    pub corrections: bool,
}

impl FacialProfile {
    pub fn new(expression: ExpressionProfile, viseme: VisemeProfile) -> Self {
        Self {
            expression,
            viseme,
            corrections: false,
        }
    }

    /// 带命名缺陷标记的 Profile
    pub fn with_corrections(mut self, corrections: bool) -> Self {
        self.corrections = corrections;
        self
    }

    /// 方言组合是否相同（忽略 corrections）
    pub fn is_same_profile(&self, other: &FacialProfile) -> bool {
        self.expression == other.expression && self.viseme == other.viseme
    }

    /// 是否包含任意面部 blend shape
    pub fn has_facial_shapes(&self) -> bool {
        self.expression != ExpressionProfile::None || self.viseme != VisemeProfile::None
    }

    /// 打包为整数：bit 0-3 表情，bit 4-7 口型，bit 8 corrections
    pub fn to_bits(&self) -> u32 {
        self.expression.to_bits() | (self.viseme.to_bits() << 4) | ((self.corrections as u32) << 8)
    }

    /// 从整数解包，未知取值视为 None
    pub fn from_bits(bits: u32) -> Self {
        Self {
            expression: ExpressionProfile::from_bits(bits & 0xF),
            viseme: VisemeProfile::from_bits((bits >> 4) & 0xF),
            corrections: (bits >> 8) & 1 != 0,
        }
    }
}

impl fmt::Display for FacialProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}{}/{})",
            self.expression.short_name(),
            if self.corrections { "*" } else { "" },
            self.viseme.short_name()
        )
    }
}
