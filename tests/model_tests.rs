// Host-side tests for glTF loading, knob lookup and posing.

#![allow(dead_code)]
mod model {
    include!("../src/model.rs");
}

use glam::{Mat4, Quat, Vec3};
use model::*;
use std::f32::consts::FRAC_PI_2;

const WITH_KNOB: &[u8] = include_bytes!("fixtures/radio_knob.gltf");
const WITHOUT_KNOB: &[u8] = include_bytes!("fixtures/radio_no_knob.gltf");
const NO_MESHES: &[u8] = include_bytes!("fixtures/empty.gltf");
const TEXTURED: &[u8] = include_bytes!("fixtures/radio_textured.gltf");

fn close(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-4
}

#[test]
fn loads_parts_and_finds_knob_baseline() {
    let m = RadioModel::from_slice(WITH_KNOB).expect("fixture parses");
    assert_eq!(m.nodes.len(), 2);
    assert_eq!(m.roots, vec![0]);
    assert_eq!(m.parts.len(), 2);
    let knob = m.knob.expect("knob node");
    assert_eq!(knob.node, 1);
    let expected = Quat::from_rotation_z(FRAC_PI_2);
    assert!(knob.baseline.abs_diff_eq(expected, 1e-5), "{:?}", knob.baseline);
    assert_eq!(m.parts[0].base_color, [0.5, 0.25, 0.125, 1.0]);
}

#[test]
fn missing_normals_are_generated_facing_plus_z() {
    let m = RadioModel::from_slice(WITH_KNOB).expect("fixture parses");
    let part = &m.parts[0];
    assert_eq!(part.normals.len(), part.positions.len());
    assert_eq!(part.indices, vec![0, 1, 2]);
    for n in &part.normals {
        assert!(close(Vec3::from(*n), Vec3::Z));
    }
}

#[test]
fn center_is_the_rest_pose_bounds_midpoint() {
    // body spans (0,0,0)-(2,2,0); knob is the same triangle turned 90 deg about Z at z=1
    let m = RadioModel::from_slice(WITH_KNOB).expect("fixture parses");
    assert!(close(m.center, Vec3::new(0.0, 1.0, 0.5)), "{:?}", m.center);

    let plain = RadioModel::from_slice(WITHOUT_KNOB).expect("fixture parses");
    assert!(close(plain.center, Vec3::new(1.0, 1.0, 0.5)), "{:?}", plain.center);
}

#[test]
fn root_transform_moves_center_to_origin() {
    let m = RadioModel::from_slice(WITH_KNOB).expect("fixture parses");
    let root = m.root_transform(0.0, 0.0, 0.0);
    assert!(close(root.transform_point3(m.center), Vec3::ZERO));
    let bobbed = m.root_transform(0.05, 0.0, 0.0);
    assert!(close(bobbed.transform_point3(m.center), Vec3::new(0.0, 0.05, 0.0)));
}

#[test]
fn knob_angle_is_applied_on_top_of_baseline() {
    let m = RadioModel::from_slice(WITH_KNOB).expect("fixture parses");
    let rest = m.world_matrices(Mat4::IDENTITY, 0.0);
    let local_rest = m.nodes[1].local.matrix();
    assert!(rest[1].abs_diff_eq(local_rest, 1e-5));

    let turned = m.world_matrices(Mat4::IDENTITY, FRAC_PI_2);
    // +X turns to -Z about the knob's own Y axis, then the baseline and offset apply
    let p = turned[1].transform_point3(Vec3::X);
    assert!(close(p, Vec3::new(0.0, 0.0, 0.0)), "{:?}", p);
    // the body is untouched
    assert!(turned[0].abs_diff_eq(rest[0], 1e-6));
}

#[test]
fn children_inherit_parent_transform() {
    let m = RadioModel::from_slice(WITH_KNOB).expect("fixture parses");
    let lift = Mat4::from_translation(Vec3::new(0.0, 3.0, 0.0));
    let w = m.world_matrices(lift, 0.0);
    let origin = w[1].transform_point3(Vec3::ZERO);
    assert!(close(origin, Vec3::new(0.0, 3.0, 1.0)));
}

#[test]
fn model_without_knob_still_loads() {
    let m = RadioModel::from_slice(WITHOUT_KNOB).expect("fixture parses");
    assert!(m.knob.is_none());
    // knob angle has no effect without a knob node
    let a = m.world_matrices(Mat4::IDENTITY, 0.0);
    let b = m.world_matrices(Mat4::IDENTITY, 2.0);
    assert!(a[1].abs_diff_eq(b[1], 1e-6));
}

#[test]
fn asset_without_geometry_is_rejected() {
    match RadioModel::from_slice(NO_MESHES) {
        Err(ModelError::NoGeometry) => {}
        other => panic!("expected NoGeometry, got {:?}", other.map(|m| m.parts.len())),
    }
}

#[test]
fn garbage_bytes_are_a_decode_error() {
    assert!(matches!(
        RadioModel::from_slice(b"not a gltf"),
        Err(ModelError::Gltf(_))
    ));
}

#[test]
fn vertex_normals_skip_out_of_range_indices() {
    let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
    let n = vertex_normals(&positions, &[0, 1, 2, 0, 1, 9]);
    assert_eq!(n.len(), 3);
    assert!(close(Vec3::from(n[2]), Vec3::Z));
}

#[test]
fn textured_part_keeps_uvs_and_decoded_image() {
    let m = RadioModel::from_slice(TEXTURED).expect("fixture parses");
    let part = &m.parts[0];
    assert_eq!(part.uvs, vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
    assert_eq!(part.base_color_texture, Some(0));
    let img = m.images[0].as_ref().expect("png decodes");
    assert_eq!((img.width, img.height), (2, 1));
    // stored as RGB, widened to opaque RGBA
    assert_eq!(img.rgba, vec![255, 0, 0, 255, 0, 255, 0, 255]);
}

#[test]
fn untextured_parts_get_zero_uvs_and_no_texture() {
    let m = RadioModel::from_slice(WITH_KNOB).expect("fixture parses");
    assert!(m.images.is_empty());
    for part in &m.parts {
        assert_eq!(part.uvs.len(), part.positions.len());
        assert!(part.uvs.iter().all(|uv| *uv == [0.0, 0.0]));
        assert_eq!(part.base_color_texture, None);
    }
}

#[test]
fn eight_bit_formats_widen_and_others_are_skipped() {
    use gltf::image::Format;
    assert_eq!(rgba8_from(Format::R8, &[7]), Some(vec![7, 7, 7, 255]));
    assert_eq!(rgba8_from(Format::R8G8, &[7, 9]), Some(vec![7, 7, 7, 9]));
    assert_eq!(rgba8_from(Format::R16G16B16A16, &[0; 8]), None);
}
