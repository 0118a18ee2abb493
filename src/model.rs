use glam::{Mat4, Quat, Vec3};

/// Node names searched, in order, for the rotatable tuning knob.
pub const KNOB_NODE_NAMES: &[&str] = &["Knob", "Plane.002"];

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("glTF decode failed: {0}")]
    Gltf(#[from] gltf::Error),
    #[error("glTF contains no triangle primitives")]
    NoGeometry,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalTransform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl LocalTransform {
    #[inline]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

#[derive(Clone, Debug)]
pub struct SceneNode {
    pub name: Option<String>,
    pub local: LocalTransform,
    pub children: Vec<usize>,
}

/// One triangle-list primitive attached to a node.
#[derive(Clone, Debug)]
pub struct MeshPart {
    pub node: usize,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    /// Texture coordinates for the base colour texture; zeroed when absent.
    pub uvs: Vec<[f32; 2]>,
    pub base_color: [f32; 4],
    /// Index into [`RadioModel::images`].
    pub base_color_texture: Option<usize>,
}

/// A decoded image widened to tightly packed RGBA8.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// The knob node and its rest rotation; knob angles are applied on top of it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KnobBinding {
    pub node: usize,
    pub baseline: Quat,
}

/// A flattened glTF scene ready for upload and per-frame posing.
#[derive(Clone, Debug)]
pub struct RadioModel {
    pub nodes: Vec<SceneNode>,
    pub roots: Vec<usize>,
    pub parts: Vec<MeshPart>,
    /// Indexed like the asset's images; `None` for formats that cannot be sampled as RGBA8.
    pub images: Vec<Option<TextureImage>>,
    pub center: Vec3,
    pub knob: Option<KnobBinding>,
}

impl RadioModel {
    /// Parse a `.glb` or embedded `.gltf` asset.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        let (doc, buffers, images) = gltf::import_slice(bytes)?;
        let images: Vec<Option<TextureImage>> = images.iter().map(TextureImage::from_gltf).collect();

        let nodes: Vec<SceneNode> = doc
            .nodes()
            .map(|n| {
                let (t, r, s) = n.transform().decomposed();
                SceneNode {
                    name: n.name().map(str::to_owned),
                    local: LocalTransform {
                        translation: Vec3::from(t),
                        rotation: Quat::from_array(r),
                        scale: Vec3::from(s),
                    },
                    children: n.children().map(|c| c.index()).collect(),
                }
            })
            .collect();

        let roots: Vec<usize> = match doc.default_scene().or_else(|| doc.scenes().next()) {
            Some(scene) => scene.nodes().map(|n| n.index()).collect(),
            None => parentless(&nodes),
        };

        let mut parts = Vec::new();
        for node in doc.nodes() {
            let Some(mesh) = node.mesh() else { continue };
            for prim in mesh.primitives() {
                if prim.mode() != gltf::mesh::Mode::Triangles {
                    continue;
                }
                let reader = prim.reader(|buffer| buffers.get(buffer.index()).map(|d| d.0.as_slice()));
                let Some(positions) = reader.read_positions() else {
                    continue;
                };
                let positions: Vec<[f32; 3]> = positions.collect();
                let indices: Vec<u32> = match reader.read_indices() {
                    Some(ix) => ix.into_u32().collect(),
                    None => (0..positions.len() as u32).collect(),
                };
                let normals: Vec<[f32; 3]> = match reader.read_normals() {
                    Some(ns) => ns.collect(),
                    None => vertex_normals(&positions, &indices),
                };
                if indices.len() < 3 || normals.len() != positions.len() {
                    continue;
                }
                let pbr = prim.material().pbr_metallic_roughness();
                let texture = pbr.base_color_texture();
                let uv_set = texture.as_ref().map_or(0, |info| info.tex_coord());
                let uvs: Vec<[f32; 2]> = match reader.read_tex_coords(uv_set) {
                    Some(tc) => tc.into_f32().collect(),
                    None => Vec::new(),
                };
                let uvs = if uvs.len() == positions.len() {
                    uvs
                } else {
                    vec![[0.0, 0.0]; positions.len()]
                };
                let base_color_texture = texture
                    .map(|info| info.texture().source().index())
                    .filter(|&i| matches!(images.get(i), Some(Some(_))));
                parts.push(MeshPart {
                    node: node.index(),
                    positions,
                    normals,
                    indices,
                    uvs,
                    base_color: pbr.base_color_factor(),
                    base_color_texture,
                });
            }
        }
        if parts.is_empty() {
            return Err(ModelError::NoGeometry);
        }

        let knob = find_knob(&nodes);
        let mut model = Self {
            nodes,
            roots,
            parts,
            images,
            center: Vec3::ZERO,
            knob,
        };
        model.center = model.rest_bounds_center();
        Ok(model)
    }

    /// World matrix for every node, indexed like `nodes`.
    ///
    /// `knob_angle` rotates the knob node about its local Y axis relative to
    /// its rest rotation; it is ignored when the model has no knob.
    pub fn world_matrices(&self, root: Mat4, knob_angle: f32) -> Vec<Mat4> {
        let mut out = vec![Mat4::IDENTITY; self.nodes.len()];
        let mut stack: Vec<(usize, Mat4)> = self.roots.iter().rev().map(|&r| (r, root)).collect();
        while let Some((index, parent)) = stack.pop() {
            let Some(node) = self.nodes.get(index) else { continue };
            let mut local = node.local;
            if let Some(knob) = self.knob.filter(|k| k.node == index) {
                local.rotation = knob.baseline * Quat::from_rotation_y(knob_angle);
            }
            let world = parent * local.matrix();
            out[index] = world;
            for &child in node.children.iter().rev() {
                stack.push((child, world));
            }
        }
        out
    }

    /// Root transform that puts the model center at the origin before the
    /// idle bob and pointer-driven tilt are applied.
    pub fn root_transform(&self, bob: f32, pitch: f32, yaw: f32) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, bob, 0.0))
            * Mat4::from_rotation_x(pitch)
            * Mat4::from_rotation_y(yaw)
            * Mat4::from_translation(-self.center)
    }

    fn rest_bounds_center(&self) -> Vec3 {
        let worlds = self.world_matrices(Mat4::IDENTITY, 0.0);
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for part in &self.parts {
            let m = worlds[part.node];
            for p in &part.positions {
                let w = m.transform_point3(Vec3::from(*p));
                min = min.min(w);
                max = max.max(w);
            }
        }
        if min.x > max.x {
            return Vec3::ZERO;
        }
        (min + max) * 0.5
    }
}

impl TextureImage {
    fn from_gltf(data: &gltf::image::Data) -> Option<Self> {
        let rgba = rgba8_from(data.format, &data.pixels)?;
        if rgba.len() != data.width as usize * data.height as usize * 4 {
            log::warn!("[model] image pixel count does not match {}x{}", data.width, data.height);
            return None;
        }
        Some(Self {
            width: data.width,
            height: data.height,
            rgba,
        })
    }
}

/// Widen 8-bit channel layouts to RGBA8. Grey fills RGB; missing alpha is opaque.
pub fn rgba8_from(format: gltf::image::Format, pixels: &[u8]) -> Option<Vec<u8>> {
    use gltf::image::Format;
    let rgba = match format {
        Format::R8G8B8A8 => pixels.to_vec(),
        Format::R8G8B8 => pixels
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        Format::R8G8 => pixels
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        Format::R8 => pixels.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        other => {
            log::warn!("[model] unsupported texture format {:?}; using base colour only", other);
            return None;
        }
    };
    Some(rgba)
}

fn find_knob(nodes: &[SceneNode]) -> Option<KnobBinding> {
    KNOB_NODE_NAMES.iter().find_map(|wanted| {
        nodes
            .iter()
            .position(|n| n.name.as_deref() == Some(*wanted))
            .map(|node| KnobBinding {
                node,
                baseline: nodes[node].local.rotation,
            })
    })
}

fn parentless(nodes: &[SceneNode]) -> Vec<usize> {
    let mut has_parent = vec![false; nodes.len()];
    for n in nodes {
        for &c in &n.children {
            if let Some(flag) = has_parent.get_mut(c) {
                *flag = true;
            }
        }
    }
    (0..nodes.len()).filter(|&i| !has_parent[i]).collect()
}

/// Area-weighted vertex normals for primitives that ship without them.
pub fn vertex_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut acc = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        let pa = Vec3::from(positions[a]);
        let n = (Vec3::from(positions[b]) - pa).cross(Vec3::from(positions[c]) - pa);
        acc[a] += n;
        acc[b] += n;
        acc[c] += n;
    }
    acc.into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Z).to_array())
        .collect()
}
