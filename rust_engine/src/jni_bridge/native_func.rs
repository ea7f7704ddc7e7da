//! JNI 原生函数实现
//!
//! 名称列表以换行分隔的字符串传递，Profile 以 `FacialProfile::to_bits` 整数传递。
//! 使用标准 jni 0.21 API

use jni::objects::{JClass, JString};
use jni::sys::{jboolean, jfloat, jint, jlong, jstring};
use jni::JNIEnv;
use std::ptr;

use crate::detect::{detect_character_profile, detect_clip_profile, detect_profile};
use crate::mapping::{multi_shape_names, translate};
use crate::profile::FacialProfile;
use crate::rig::{
    get_character_blend_shape_weight, reset_character_blend_shapes, set_character_blend_shape,
    BlendShapeMesh, BlendShapeWeight, CharacterNode, SkinnedMeshRenderer,
};
use crate::Result;

use super::{get_character, register_character, split_names, unregister_character};

const VERSION: &str = "Rust-20261018";

/// 读取 Java 字符串
fn read_string(env: &mut JNIEnv, value: &JString) -> Result<String> {
    Ok(env.get_string(value)?.into())
}

/// 创建 Java 字符串，失败时返回 null
fn new_string(env: &JNIEnv, value: &str) -> jstring {
    env.new_string(value)
        .map(|s| s.into_raw())
        .unwrap_or(ptr::null_mut())
}

fn profile_from(bits: jint) -> FacialProfile {
    FacialProfile::from_bits(bits as u32)
}

/// 读取角色权重，句柄无效时视为没有匹配
fn read_character_weight(
    env: &mut JNIEnv,
    character: jlong,
    shape_name: &JString,
    from: jint,
    to: jint,
) -> BlendShapeWeight {
    let shape = match read_string(env, shape_name) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("读取形状名称失败: {}", e);
            return BlendShapeWeight::default();
        }
    };
    match get_character(character) {
        Ok(character_arc) => {
            let root = character_arc.lock().unwrap_or_else(|e| e.into_inner());
            get_character_blend_shape_weight(&root, &shape, profile_from(from), profile_from(to))
        }
        Err(e) => {
            log::warn!("{}", e);
            BlendShapeWeight::default()
        }
    }
}

// ============================================================================
// 基础函数
// ============================================================================

/// 获取版本号
#[no_mangle]
pub extern "system" fn Java_com_facialrig_mapper_NativeFunc_GetVersion(
    env: JNIEnv,
    _class: JClass,
) -> jstring {
    new_string(&env, VERSION)
}

// ============================================================================
// Profile 检测
// ============================================================================

/// 根据形状名称列表检测 Profile
#[no_mangle]
pub extern "system" fn Java_com_facialrig_mapper_NativeFunc_DetectProfile(
    mut env: JNIEnv,
    _class: JClass,
    names: JString,
) -> jint {
    match read_string(&mut env, &names) {
        Ok(names) => detect_profile(split_names(&names)).to_bits() as jint,
        Err(e) => {
            log::warn!("读取形状名称列表失败: {}", e);
            0
        }
    }
}

/// 根据动画曲线属性名列表检测 Profile
#[no_mangle]
pub extern "system" fn Java_com_facialrig_mapper_NativeFunc_DetectClipProfile(
    mut env: JNIEnv,
    _class: JClass,
    property_names: JString,
) -> jint {
    match read_string(&mut env, &property_names) {
        Ok(names) => detect_clip_profile(split_names(&names)).to_bits() as jint,
        Err(e) => {
            log::warn!("读取曲线属性列表失败: {}", e);
            0
        }
    }
}

// ============================================================================
// 名称转换
// ============================================================================

/// 转换形状名称，失败时原样返回
#[no_mangle]
pub extern "system" fn Java_com_facialrig_mapper_NativeFunc_TranslateName(
    mut env: JNIEnv,
    _class: JClass,
    name: JString,
    from: jint,
    to: jint,
) -> jstring {
    let name_str = match read_string(&mut env, &name) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("读取形状名称失败: {}", e);
            return new_string(&env, "");
        }
    };
    let mapped = translate(&name_str, profile_from(from), profile_from(to));
    new_string(&env, &mapped)
}

/// 展开合并形状名称（换行分隔）
#[no_mangle]
pub extern "system" fn Java_com_facialrig_mapper_NativeFunc_ExpandShapeName(
    mut env: JNIEnv,
    _class: JClass,
    name: JString,
) -> jstring {
    let name_str = match read_string(&mut env, &name) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("读取形状名称失败: {}", e);
            return new_string(&env, "");
        }
    };
    new_string(&env, &multi_shape_names(&name_str).join("\n"))
}

// ============================================================================
// 角色
// ============================================================================

/// 创建空角色，返回句柄
#[no_mangle]
pub extern "system" fn Java_com_facialrig_mapper_NativeFunc_CreateCharacter(
    mut env: JNIEnv,
    _class: JClass,
    name: JString,
) -> jlong {
    let name_str = match read_string(&mut env, &name) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("读取角色名称失败，使用空名称: {}", e);
            String::new()
        }
    };
    register_character(CharacterNode::new(name_str))
}

/// 删除角色
#[no_mangle]
pub extern "system" fn Java_com_facialrig_mapper_NativeFunc_DeleteCharacter(
    _env: JNIEnv,
    _class: JClass,
    character: jlong,
) {
    unregister_character(character);
}

/// 为角色添加一个带网格的子节点，返回子节点索引（失败返回 -1）
#[no_mangle]
pub extern "system" fn Java_com_facialrig_mapper_NativeFunc_AddCharacterMesh(
    mut env: JNIEnv,
    _class: JClass,
    character: jlong,
    node_name: JString,
    shape_names: JString,
) -> jint {
    let (node, shapes) = match (
        read_string(&mut env, &node_name),
        read_string(&mut env, &shape_names),
    ) {
        (Ok(node), Ok(shapes)) => (node, shapes),
        (Err(e), _) | (_, Err(e)) => {
            log::warn!("读取网格参数失败: {}", e);
            return -1;
        }
    };

    match get_character(character) {
        Ok(character_arc) => {
            let mut root = character_arc.lock().unwrap_or_else(|e| e.into_inner());
            let mesh = BlendShapeMesh::new(node.as_str(), split_names(&shapes));
            log::info!("角色 {} 添加网格 {}: {} 个形状", root.name, node, mesh.blend_shape_count());
            let child = CharacterNode::new(node).with_renderer(SkinnedMeshRenderer::new(mesh));
            root.add_child(child) as jint
        }
        Err(e) => {
            log::warn!("{}", e);
            -1
        }
    }
}

/// 检测角色 Profile
#[no_mangle]
pub extern "system" fn Java_com_facialrig_mapper_NativeFunc_GetCharacterProfile(
    _env: JNIEnv,
    _class: JClass,
    character: jlong,
) -> jint {
    match get_character(character) {
        Ok(character_arc) => {
            let root = character_arc.lock().unwrap_or_else(|e| e.into_inner());
            detect_character_profile(&root).to_bits() as jint
        }
        Err(e) => {
            log::warn!("{}", e);
            0
        }
    }
}

/// 设置角色 blend shape 权重
#[no_mangle]
pub extern "system" fn Java_com_facialrig_mapper_NativeFunc_SetCharacterBlendShape(
    mut env: JNIEnv,
    _class: JClass,
    character: jlong,
    shape_name: JString,
    from: jint,
    to: jint,
    weight: jfloat,
) -> jboolean {
    let shape = match read_string(&mut env, &shape_name) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("读取形状名称失败: {}", e);
            return 0;
        }
    };

    match get_character(character) {
        Ok(character_arc) => {
            let mut root = character_arc.lock().unwrap_or_else(|e| e.into_inner());
            set_character_blend_shape(&mut root, &shape, profile_from(from), profile_from(to), weight)
                as jboolean
        }
        Err(e) => {
            log::warn!("{}", e);
            0
        }
    }
}

/// 把角色所有 blend shape 权重归零
#[no_mangle]
pub extern "system" fn Java_com_facialrig_mapper_NativeFunc_ResetCharacterBlendShapes(
    _env: JNIEnv,
    _class: JClass,
    character: jlong,
) {
    match get_character(character) {
        Ok(character_arc) => {
            let mut root = character_arc.lock().unwrap_or_else(|e| e.into_inner());
            reset_character_blend_shapes(&mut root);
        }
        Err(e) => log::warn!("{}", e),
    }
}

/// 读取角色 blend shape 平均权重（没有匹配返回 0）
#[no_mangle]
pub extern "system" fn Java_com_facialrig_mapper_NativeFunc_GetCharacterBlendShapeWeight(
    mut env: JNIEnv,
    _class: JClass,
    character: jlong,
    shape_name: JString,
    from: jint,
    to: jint,
) -> jfloat {
    read_character_weight(&mut env, character, &shape_name, from, to).value
}

/// 读取参与平均的渲染器数量，用于区分"没有匹配"和"权重为 0"
#[no_mangle]
pub extern "system" fn Java_com_facialrig_mapper_NativeFunc_GetCharacterBlendShapeCount(
    mut env: JNIEnv,
    _class: JClass,
    character: jlong,
    shape_name: JString,
    from: jint,
    to: jint,
) -> jint {
    read_character_weight(&mut env, character, &shape_name, from, to).count as jint
}
