//! 运行时 blend shape 权重读写
//!
//! 只遍历根节点的直接子节点，不创建也不删除渲染器。

use crate::mapping::{multi_shape_names, FacialProfileMapper};
use crate::profile::FacialProfile;

use super::CharacterNode;

/// 读取结果：多个渲染器的平均权重和参与平均的渲染器数量
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BlendShapeWeight {
    pub value: f32,
    pub count: usize,
}

impl BlendShapeWeight {
    pub fn found(&self) -> bool {
        self.count > 0
    }
}

/// 设置角色的 blend shape 权重
///
/// 名称先从 `from` 转换到 `to`，合并形状展开后逐个设置。
/// 至少设置了一个形状时返回 true；角色没有该形状不是错误。
pub fn set_character_blend_shape(
    root: &mut CharacterNode,
    shape_name: &str,
    from: FacialProfile,
    to: FacialProfile,
    weight: f32,
) -> bool {
    let profile_shape_name = FacialProfileMapper::global().translate(shape_name, from, to);
    if profile_shape_name.is_empty() {
        return false;
    }
    let names = multi_shape_names(&profile_shape_name);

    let mut res = false;
    for child in &mut root.children {
        let Some(renderer) = child.renderer.as_mut() else {
            continue;
        };
        if !renderer.has_blend_shapes() {
            continue;
        }
        for name in &names {
            if let Some(index) = renderer.blend_shape_index(name) {
                renderer.set_blend_shape_weight(index, weight);
                res = true;
            }
        }
    }
    res
}

/// 读取角色的 blend shape 权重
///
/// 只做名称转换不做展开，读取方要求目标名称已经是具体形状。
/// 没有匹配时 `count` 为 0，`value` 为 0.0。
pub fn get_character_blend_shape_weight(
    root: &CharacterNode,
    shape_name: &str,
    from: FacialProfile,
    to: FacialProfile,
) -> BlendShapeWeight {
    let profile_shape_name = FacialProfileMapper::global().translate(shape_name, from, to);
    if profile_shape_name.is_empty() {
        return BlendShapeWeight::default();
    }

    let mut total = 0.0;
    let mut count = 0;
    for renderer in root.children.iter().filter_map(|c| c.renderer.as_ref()) {
        if !renderer.has_blend_shapes() {
            continue;
        }
        let weight = renderer
            .blend_shape_index(&profile_shape_name)
            .and_then(|index| renderer.get_blend_shape_weight(index));
        if let Some(weight) = weight {
            total += weight;
            count += 1;
        }
    }

    if count == 0 {
        return BlendShapeWeight::default();
    }
    BlendShapeWeight {
        value: total / count as f32,
        count,
    }
}

/// 把直接子节点上所有渲染器的权重归零
pub fn reset_character_blend_shapes(root: &mut CharacterNode) {
    for renderer in root.children.iter_mut().filter_map(|c| c.renderer.as_mut()) {
        renderer.reset_weights();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{ExpressionProfile, VisemeProfile};
    use crate::rig::{BlendShapeMesh, SkinnedMeshRenderer};

    fn mesh_node(name: &str, shapes: &[&str]) -> CharacterNode {
        CharacterNode::new(name).with_renderer(SkinnedMeshRenderer::new(BlendShapeMesh::new(
            name,
            shapes.iter().copied(),
        )))
    }

    fn weight_of(node: &CharacterNode, shape: &str) -> Option<f32> {
        let renderer = node.renderer.as_ref()?;
        renderer.get_blend_shape_weight(renderer.blend_shape_index(shape)?)
    }

    fn extended_character() -> CharacterNode {
        let mut root = CharacterNode::new("Character");
        root.add_child(mesh_node(
            "Body",
            &[
                "Jaw_Open",
                "Mouth_Funnel_Up_L",
                "Mouth_Funnel_Up_R",
                "Mouth_Funnel_Down_L",
                "Mouth_Funnel_Down_R",
                "Brow_Raise_Inner_L",
                "Brow_Raise_Inner_R",
            ],
        ));
        root.add_child(mesh_node("Teeth", &["Jaw_Open"]));
        root.add_child(CharacterNode::new("Bones"));
        root
    }

    #[test]
    fn test_set_weight_expands_combined_shapes() {
        let mut root = extended_character();
        let from = FacialProfile::new(ExpressionProfile::ExtendedPlus, VisemeProfile::None);
        let to = FacialProfile::new(ExpressionProfile::Extended, VisemeProfile::None);

        assert!(set_character_blend_shape(&mut root, "A29_Mouth_Funnel", from, to, 80.0));
        let body = &root.children[0];
        for shape in [
            "Mouth_Funnel_Up_L",
            "Mouth_Funnel_Up_R",
            "Mouth_Funnel_Down_L",
            "Mouth_Funnel_Down_R",
        ] {
            assert_eq!(weight_of(body, shape), Some(80.0));
        }
        assert_eq!(weight_of(body, "Jaw_Open"), Some(0.0));

        assert!(set_character_blend_shape(&mut root, "A01_Brow_Inner_Up", from, to, 20.0));
        assert_eq!(weight_of(&root.children[0], "Brow_Raise_Inner_L"), Some(20.0));
        assert_eq!(weight_of(&root.children[0], "Brow_Raise_Inner_R"), Some(20.0));
    }

    #[test]
    fn test_set_weight_on_every_renderer() {
        let mut root = extended_character();
        let from = FacialProfile::new(ExpressionProfile::ExtendedPlus, VisemeProfile::None);
        let to = FacialProfile::new(ExpressionProfile::Extended, VisemeProfile::None);

        assert!(set_character_blend_shape(&mut root, "A25_Jaw_Open", from, to, 50.0));
        assert_eq!(weight_of(&root.children[0], "Jaw_Open"), Some(50.0));
        assert_eq!(weight_of(&root.children[1], "Jaw_Open"), Some(50.0));
    }

    #[test]
    fn test_no_match_mutates_nothing() {
        let mut root = extended_character();
        let before = root.clone();
        let profile = FacialProfile::new(ExpressionProfile::Extended, VisemeProfile::None);

        assert!(!set_character_blend_shape(&mut root, "Custom_Sculpt", profile, profile, 100.0));
        assert!(!set_character_blend_shape(&mut root, "", profile, profile, 100.0));
        for (a, b) in root.children.iter().zip(before.children.iter()) {
            assert_eq!(weight_of(a, "Jaw_Open"), weight_of(b, "Jaw_Open"));
        }

        let weight = get_character_blend_shape_weight(&root, "Custom_Sculpt", profile, profile);
        assert_eq!(weight, BlendShapeWeight { value: 0.0, count: 0 });
        assert!(!weight.found());
    }

    #[test]
    fn test_root_and_grandchildren_are_ignored() {
        let mut root = mesh_node("Root", &["Jaw_Open"]);
        let mut body = CharacterNode::new("Body");
        body.add_child(mesh_node("Head", &["Jaw_Open"]));
        root.add_child(body);
        let profile = FacialProfile::new(ExpressionProfile::Extended, VisemeProfile::None);

        assert!(!set_character_blend_shape(&mut root, "Jaw_Open", profile, profile, 1.0));
        assert!(!get_character_blend_shape_weight(&root, "Jaw_Open", profile, profile).found());
    }

    #[test]
    fn test_get_weight_averages_renderers() {
        let mut root = extended_character();
        root.children[0].renderer.as_mut().unwrap().set_blend_shape_weight(0, 40.0);
        root.children[1].renderer.as_mut().unwrap().set_blend_shape_weight(0, 60.0);
        let from = FacialProfile::new(ExpressionProfile::ExtendedPlus, VisemeProfile::None);
        let to = FacialProfile::new(ExpressionProfile::Extended, VisemeProfile::None);

        let weight = get_character_blend_shape_weight(&root, "A25_Jaw_Open", from, to);
        assert_eq!(weight.count, 2);
        assert!((weight.value - 50.0).abs() < 1e-5);

        // 匹配到但权重为 0
        let weight = get_character_blend_shape_weight(&root, "Brow_Raise_Inner_L", to, to);
        assert!(weight.found());
        assert_eq!(weight.value, 0.0);
    }

    #[test]
    fn test_get_weight_does_not_expand() {
        let root = extended_character();
        let from = FacialProfile::new(ExpressionProfile::ExtendedPlus, VisemeProfile::None);
        let to = FacialProfile::new(ExpressionProfile::Extended, VisemeProfile::None);
        // 转换结果是合并名称，网格上不存在
        assert!(!get_character_blend_shape_weight(&root, "A29_Mouth_Funnel", from, to).found());
    }

    #[test]
    fn test_reset_clears_set_weights() {
        let mut root = extended_character();
        let profile = FacialProfile::new(ExpressionProfile::Extended, VisemeProfile::None);
        assert!(set_character_blend_shape(&mut root, "Jaw_Open", profile, profile, 70.0));
        assert!((get_character_blend_shape_weight(&root, "Jaw_Open", profile, profile).value - 70.0).abs() < 1e-5);

        reset_character_blend_shapes(&mut root);
        let weight = get_character_blend_shape_weight(&root, "Jaw_Open", profile, profile);
        assert_eq!(weight, BlendShapeWeight { value: 0.0, count: 2 });
    }

    #[test]
    fn test_weight_to_defective_rig() {
        let mut root = CharacterNode::new("Character");
        root.add_child(mesh_node("Body", &["Brow_Drop_Left", "Brow_Drop_L"]));
        let from = FacialProfile::new(ExpressionProfile::ExtendedPlus, VisemeProfile::None);
        let to = FacialProfile::new(ExpressionProfile::Extended, VisemeProfile::None).with_corrections(true);

        assert!(set_character_blend_shape(&mut root, "A02_Brow_Down_Left", from, to, 30.0));
        assert_eq!(weight_of(&root.children[0], "Brow_Drop_Left"), Some(30.0));
        assert_eq!(weight_of(&root.children[0], "Brow_Drop_L"), Some(0.0));
    }
}
