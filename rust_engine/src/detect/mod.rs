//! 面部 Profile 检测
//!
//! 通过特征形状名称推断动画剪辑或角色网格使用的方言。
//! 每条轴独立判定，高优先级的结果不会被低优先级覆盖。
//! 没有任何特征形状的轴结果为 None，这是启发式检测本身的限制。

use crate::config::get_config;
use crate::profile::{ExpressionProfile, FacialProfile, VisemeProfile};
use crate::rig::CharacterNode;

/// ExtendedPlus 特征形状
const EXTENDED_PLUS_SIGNATURES: &[&str] = &[
    "A01_Brow_Inner_Up",
    "A06_Eye_Look_Up_Left",
    "A15_Eye_Blink_Right",
    "A25_Jaw_Open",
    "A37_Mouth_Close",
];

/// Extended 特征形状
const EXTENDED_SIGNATURES: &[&str] = &[
    "Ear_Up_L",
    "Ear_Up_R",
    "Eyelash_Upper_Up_L",
    "Eyelash_Upper_Up_R",
    "Eye_L_Look_L",
    "Eye_R_Look_R",
];

/// Standard 特征形状
const STANDARD_SIGNATURES: &[&str] = &[
    "Mouth_L",
    "Mouth_R",
    "Eye_Wide_L",
    "Eye_Wide_R",
    "Mouth_Smile",
    "Eye_Blink",
];

const PAIRS_V2_SIGNATURES: &[&str] = &["V_Open", "V_Tight", "V_Tongue_up", "V_Tongue_Raise"];
const PAIRS_V1_SIGNATURES: &[&str] = &["Open", "Tight", "Tongue_up", "Tongue_Raise"];
const DIRECT_SIGNATURES: &[&str] = &["AE", "EE", "Er", "Oh"];

/// 带命名缺陷的导出管线特有的错误名称
const CORRECTION_SIGNATURES: &[&str] = &[
    "Brow_Raise_Inner_Left",
    "Brow_Raise_Outer_Left",
    "Brow_Drop_Left",
    "Brow_Raise_Right",
];

/// 检测状态，逐个名称累积
#[derive(Default)]
struct ProfileGuess {
    expression: ExpressionProfile,
    viseme: VisemeProfile,
    corrections: bool,
}

impl ProfileGuess {
    fn observe(&mut self, name: &str) {
        if EXTENDED_PLUS_SIGNATURES.contains(&name) {
            self.expression = ExpressionProfile::ExtendedPlus;
        } else if EXTENDED_SIGNATURES.contains(&name) {
            if matches!(self.expression, ExpressionProfile::None | ExpressionProfile::Standard) {
                self.expression = ExpressionProfile::Extended;
            }
        } else if STANDARD_SIGNATURES.contains(&name) {
            if self.expression == ExpressionProfile::None {
                self.expression = ExpressionProfile::Standard;
            }
        } else if PAIRS_V2_SIGNATURES.contains(&name) {
            self.viseme = VisemeProfile::PairsV2;
        } else if PAIRS_V1_SIGNATURES.contains(&name) {
            if matches!(self.viseme, VisemeProfile::None | VisemeProfile::Direct) {
                self.viseme = VisemeProfile::PairsV1;
            }
        } else if DIRECT_SIGNATURES.contains(&name) {
            if self.viseme == VisemeProfile::None {
                self.viseme = VisemeProfile::Direct;
            }
        } else if CORRECTION_SIGNATURES.contains(&name) {
            self.corrections = true;
        }
    }

    fn finish(self) -> FacialProfile {
        FacialProfile::new(self.expression, self.viseme).with_corrections(self.corrections)
    }
}

/// 根据形状名称集合检测 Profile
///
/// 名称顺序无关，允许重复；空输入返回默认 Profile。
pub fn detect_profile<I, S>(names: I) -> FacialProfile
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut guess = ProfileGuess::default();
    for name in names {
        guess.observe(name.as_ref());
    }
    guess.finish()
}

/// 根据动画剪辑的曲线属性名检测 Profile
///
/// 只处理带 blend shape 前缀的属性，前缀见 [`crate::config::MapperConfig`]。
pub fn detect_clip_profile<I, S>(property_names: I) -> FacialProfile
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let prefix = get_config().clip_property_prefix;
    let mut guess = ProfileGuess::default();
    for property in property_names {
        if let Some(name) = property.as_ref().strip_prefix(prefix.as_str()) {
            guess.observe(name);
        }
    }
    guess.finish()
}

/// 根据角色层级中所有网格的 blend shape 检测 Profile（包含根节点）
pub fn detect_character_profile(root: &CharacterNode) -> FacialProfile {
    let mut guess = ProfileGuess::default();
    for renderer in root.renderers() {
        if let Some(mesh) = renderer.mesh() {
            for name in mesh.shape_names() {
                guess.observe(name);
            }
        }
    }
    guess.finish()
}

/// 角色是否带有可识别的面部 blend shape
pub fn character_has_facial_blend_shapes(root: &CharacterNode) -> bool {
    detect_character_profile(root).has_facial_shapes()
}
