//! 静态对照表
//!
//! 数据在进程生命周期内只读，行顺序即缓存未命中时的扫描顺序。

use std::collections::HashSet;

use crate::profile::{ExpressionProfile, VisemeProfile};
use crate::{FacialError, Result};

use super::{ExpressionMapping, MappingCorrection, VisemeMapping};

/// 表情对照表（Standard / ExtendedPlus / Extended）
///
/// Standard 和 Extended 中带 `_L/R`、`_Up/Down` 的是合并形状，
/// 映射到更细的方言时需要展开，见 [`super::multi_shape_names`]。
pub static EXPRESSION_MAPPINGS: &[ExpressionMapping] = &[
    ExpressionMapping::new("Brow_Raise_Inner_L/R", "A01_Brow_Inner_Up", "Brow_Raise_Inner_L/R"),
    ExpressionMapping::new("Brow_Drop_L", "A02_Brow_Down_Left", "Brow_Drop_L"),
    ExpressionMapping::new("Brow_Drop_R", "A03_Brow_Down_Right", "Brow_Drop_R"),
    ExpressionMapping::new("Brow_Raise_Outer_L", "A04_Brow_Outer_Up_Left", "Brow_Raise_Outer_L"),
    ExpressionMapping::new("Brow_Raise_Outer_R", "A05_Brow_Outer_Up_Right", "Brow_Raise_Outer_R"),
    ExpressionMapping::new("", "A06_Eye_Look_Up_Left", "Eye_L_Look_Up"),
    ExpressionMapping::new("", "A07_Eye_Look_Up_Right", "Eye_R_Look_Up"),
    ExpressionMapping::new("", "A08_Eye_Look_Down_Left", "Eye_L_Look_Down"),
    ExpressionMapping::new("", "A09_Eye_Look_Down_Right", "Eye_R_Look_Down"),
    ExpressionMapping::new("", "A10_Eye_Look_Out_Left", "Eye_L_Look_L"),
    ExpressionMapping::new("", "A11_Eye_Look_In_Left", "Eye_L_Look_R"),
    ExpressionMapping::new("", "A12_Eye_Look_In_Right", "Eye_R_Look_L"),
    ExpressionMapping::new("", "A13_Eye_Look_Out_Right", "Eye_R_Look_R"),
    ExpressionMapping::new("Eye_Blink", "Eye_Blink", "Eyes_Blink"),
    ExpressionMapping::new("Eye_Blink_L", "A14_Eye_Blink_Left", "Eye_Blink_L"),
    ExpressionMapping::new("Eye_Blink_R", "A15_Eye_Blink_Right", "Eye_Blink_R"),
    ExpressionMapping::new("Eye_Squint_L", "A16_Eye_Squint_Left", "Eye_Squint_L"),
    ExpressionMapping::new("Eye_Squint_R", "A17_Eye_Squint_Right", "Eye_Squint_R"),
    ExpressionMapping::new("Eye_Wide_L", "A18_Eye_Wide_Left", "Eye_Wide_L"),
    ExpressionMapping::new("Eye_Wide_R", "A19_Eye_Wide_Right", "Eye_Wide_R"),
    ExpressionMapping::new("Cheek_Puff_L/R", "A20_Cheek_Puff", "Cheek_Puff_L/R"),
    ExpressionMapping::new("Cheek_Raise_L", "A21_Cheek_Squint_Left", "Cheek_Raise_L"),
    ExpressionMapping::new("Cheek_Raise_R", "A22_Cheek_Squint_Right", "Cheek_Raise_R"),
    ExpressionMapping::new("Nose_Flank_Raise_L", "A23_Nose_Sneer_Left", "Nose_Sneer_L"),
    ExpressionMapping::new("Nose_Flank_Raise_R", "A24_Nose_Sneer_Right", "Nose_Sneer_R"),
    ExpressionMapping::new("", "A25_Jaw_Open", "Jaw_Open"),
    ExpressionMapping::new("", "A26_Jaw_Forward", "Jaw_Forward"),
    ExpressionMapping::new("", "A27_Jaw_Left", "Jaw_L"),
    ExpressionMapping::new("", "A28_Jaw_Right", "Jaw_R"),
    ExpressionMapping::new("Mouth_Pucker_Open", "A29_Mouth_Funnel", "Mouth_Funnel_Up/Down_L/R"),
    ExpressionMapping::new("Mouth_Pucker", "A30_Mouth_Pucker", "Mouth_Pucker_Up/Down_L/R"),
    ExpressionMapping::new("Mouth_L", "A31_Mouth_Left", "Mouth_L"),
    ExpressionMapping::new("Mouth_R", "A32_Mouth_Right", "Mouth_R"),
    ExpressionMapping::new("Mouth_Top_Lip_Under", "A33_Mouth_Roll_Upper", "Mouth_Roll_Out_Upper_L/R"),
    ExpressionMapping::new("Mouth_Bottom_Lip_Under", "A34_Mouth_Roll_Lower", "Mouth_Roll_Out_Lower_L/R"),
    ExpressionMapping::new("Mouth_Top_Lip_Up", "A35_Mouth_Shrug_Upper", "Mouth_Shrug_Upper"),
    ExpressionMapping::new("", "A36_Mouth_Shrug_Lower", "Mouth_Shrug_Lower"),
    ExpressionMapping::new("", "A37_Mouth_Close", "Mouth_Close"),
    ExpressionMapping::new("Mouth_Smile_L", "A38_Mouth_Smile_Left", "Mouth_Smile_L"),
    ExpressionMapping::new("Mouth_Smile_R", "A39_Mouth_Smile_Right", "Mouth_Smile_R"),
    ExpressionMapping::new("Mouth_Frown_L", "A40_Mouth_Frown_Left", "Mouth_Frown_L"),
    ExpressionMapping::new("Mouth_Frown_R", "A41_Mouth_Frown_Right", "Mouth_Frown_R"),
    ExpressionMapping::new("Mouth_Dimple_L", "A42_Mouth_Dimple_Left", "Mouth_Dimple_L"),
    ExpressionMapping::new("Mouth_Dimple_R", "A43_Mouth_Dimple_Right", "Mouth_Dimple_R"),
    ExpressionMapping::new("", "A44_Mouth_Upper_Up_Left", "Mouth_Up_Upper_L"),
    ExpressionMapping::new("", "A45_Mouth_Upper_Up_Right", "Mouth_Up_Upper_R"),
    ExpressionMapping::new("", "A46_Mouth_Lower_Down_Left", "Mouth_Down_Lower_L"),
    ExpressionMapping::new("", "A47_Mouth_Lower_Down_Right", "Mouth_Down_Lower_R"),
    ExpressionMapping::new("", "A48_Mouth_Press_Left", "Mouth_Press_L"),
    ExpressionMapping::new("", "A49_Mouth_Press_Right", "Mouth_Press_R"),
    ExpressionMapping::new("", "A50_Mouth_Stretch_Left", "Mouth_Stretch_L"),
    ExpressionMapping::new("", "A51_Mouth_Stretch_Right", "Mouth_Stretch_R"),
    ExpressionMapping::new("", "A52_Tongue_Out", "Tongue_Out"),
    ExpressionMapping::new("", "T01_Tongue_Up", "Tongue_Up"),
    ExpressionMapping::new("", "T02_Tongue_Down", "Tongue_Down"),
    ExpressionMapping::new("", "T03_Tongue_Left", "Tongue_L"),
    ExpressionMapping::new("", "T04_Tongue_Right", "Tongue_R"),
    ExpressionMapping::new("", "T05_Tongue_Roll", "Tongue_Roll"),
    ExpressionMapping::new("", "T06_Tongue_Tip_Up", "Tongue_Tip_Up"),
    ExpressionMapping::new("", "T07_Tongue_Tip_Down", "Tongue_Tip_Down"),
    ExpressionMapping::new("", "T08_Tongue_Width", "Tongue_Wide"),
    ExpressionMapping::new("", "T09_Tongue_Thickness", "Tongue_Narrow"),
    ExpressionMapping::new("", "T10_Tongue_Bulge_Left", "Tongue_Bulge_L"),
    ExpressionMapping::new("", "T11_Tongue_Bulge_Right", "Tongue_Bulge_R"),
];

/// 口型对照表（PairsV1 / PairsV2 / Direct）
pub static VISEME_MAPPINGS: &[VisemeMapping] = &[
    VisemeMapping::new("Open", "V_Open", ""),
    VisemeMapping::new("Explosive", "V_Explosive", ""),
    VisemeMapping::new("Dental_Lip", "V_Dental_Lip", ""),
    VisemeMapping::new("Tight-O", "V_Tight_O", ""),
    VisemeMapping::new("Tight", "V_Tight", ""),
    VisemeMapping::new("Wide", "V_Wide", ""),
    VisemeMapping::new("Affricate", "V_Affricate", ""),
    VisemeMapping::new("Lip_Open", "V_Lip_Open", ""),
    VisemeMapping::new("Tongue_up", "V_Tongue_up", ""),
    VisemeMapping::new("Tongue_Raise", "V_Tongue_Raise", ""),
    VisemeMapping::new("Tongue_Out", "V_Tongue_Out", ""),
    VisemeMapping::new("Tongue_Narrow", "V_Tongue_Narrow", ""),
    VisemeMapping::new("Tongue_Lower", "V_Tongue_Lower", ""),
    VisemeMapping::new("Tongue_Curl-U", "V_Tongue_Curl_U", ""),
    VisemeMapping::new("Tongue_Curl-D", "V_Tongue_Curl_D", ""),
];

/// 命名缺陷对照表（正确名称, 错误名称）
pub static MAPPING_CORRECTIONS: &[MappingCorrection] = &[
    MappingCorrection::new("Brow_Raise_Inner_L", "Brow_Raise_Inner_Left"),
    MappingCorrection::new("Brow_Raise_Inner_R", "Brow_Raise_Inner_Right"),
    MappingCorrection::new("Brow_Raise_Outer_L", "Brow_Raise_Outer_Left"),
    MappingCorrection::new("Brow_Raise_Outer_R", "Brow_Raise_Outer_Right"),
    MappingCorrection::new("Brow_Drop_L", "Brow_Drop_Left"),
    MappingCorrection::new("Brow_Drop_R", "Brow_Drop_Right"),
    MappingCorrection::new("Brow_Raise_L", "Brow_Raise_Left"),
    MappingCorrection::new("Brow_Raise_R", "Brow_Raise_Right"),
];

/// 错误名称 -> 正确名称
pub fn find_correction(name: &str) -> Option<&'static str> {
    MAPPING_CORRECTIONS
        .iter()
        .find(|c| c.incorrect == name)
        .map(|c| c.correct)
}

/// 正确名称 -> 错误名称
pub fn find_incorrection(name: &str) -> Option<&'static str> {
    MAPPING_CORRECTIONS
        .iter()
        .find(|c| c.correct == name)
        .map(|c| c.incorrect)
}

/// 检查内置对照表，返回全部数据冲突
pub fn table_integrity_issues() -> Vec<FacialError> {
    integrity_issues(EXPRESSION_MAPPINGS, VISEME_MAPPINGS, MAPPING_CORRECTIONS)
}

/// 检查给定的对照表，返回全部数据冲突
///
/// 同一方言列中一个名称只能出现在一行，修正表中正确/错误名称各自唯一。
pub fn integrity_issues(
    expressions: &[ExpressionMapping],
    visemes: &[VisemeMapping],
    corrections: &[MappingCorrection],
) -> Vec<FacialError> {
    let mut issues = Vec::new();

    for dialect in [
        ExpressionProfile::Standard,
        ExpressionProfile::ExtendedPlus,
        ExpressionProfile::Extended,
    ] {
        let mut seen = HashSet::new();
        for row in expressions {
            if let Some(name) = row.get_mapping(dialect) {
                if !seen.insert(name) {
                    issues.push(FacialError::DuplicateExpressionName {
                        dialect,
                        name: name.to_string(),
                    });
                }
            }
        }
    }

    for dialect in [VisemeProfile::PairsV1, VisemeProfile::PairsV2, VisemeProfile::Direct] {
        let mut seen = HashSet::new();
        for row in visemes {
            if let Some(name) = row.get_mapping(dialect) {
                if !seen.insert(name) {
                    issues.push(FacialError::DuplicateVisemeName {
                        dialect,
                        name: name.to_string(),
                    });
                }
            }
        }
    }

    let mut correct = HashSet::new();
    let mut incorrect = HashSet::new();
    for c in corrections {
        if !correct.insert(c.correct) {
            issues.push(FacialError::DuplicateCorrection(c.correct.to_string()));
        }
        if !incorrect.insert(c.incorrect) {
            issues.push(FacialError::DuplicateCorrection(c.incorrect.to_string()));
        }
    }

    issues
}

/// 校验对照表，返回第一个冲突
pub fn validate_tables() -> Result<()> {
    first_issue(table_integrity_issues())
}

fn first_issue(issues: Vec<FacialError>) -> Result<()> {
    match issues.into_iter().next() {
        Some(issue) => Err(issue),
        None => Ok(()),
    }
}
