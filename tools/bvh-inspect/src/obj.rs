//! Minimal Wavefront OBJ reader: `v` and `f` records only.

use std::path::Path;

use anyhow::{Context, bail, ensure};
use glam::Vec3;
use mesh_bvh::MeshData;

pub fn load(path: &Path) -> anyhow::Result<MeshData> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse(&text).with_context(|| format!("failed to parse {}", path.display()))
}

/// Polygons are fan-triangulated. Vertex normals are the normalized sum of
/// the (area weighted) normals of every triangle touching the vertex; `vn`
/// records are ignored.
pub fn parse(text: &str) -> anyhow::Result<MeshData> {
    let mut mesh = MeshData::default();
    let mut face = Vec::new();

    for (line_idx, line) in text.lines().enumerate() {
        let line_no = line_idx + 1;
        let mut parts = line.split_whitespace();

        match parts.next() {
            Some("v") => {
                let mut coords = [0.0f32; 3];
                for coord in &mut coords {
                    let token = parts
                        .next()
                        .with_context(|| format!("line {line_no}: vertex needs three coordinates"))?;
                    *coord = token
                        .parse()
                        .with_context(|| format!("line {line_no}: bad coordinate {token:?}"))?;
                }
                mesh.positions.push(Vec3::from_array(coords));
            }
            Some("f") => {
                face.clear();
                for token in parts {
                    face.push(resolve_index(token, mesh.positions.len(), line_no)?);
                }
                ensure!(face.len() >= 3, "line {line_no}: face needs at least three vertices");

                for i in 1..face.len() - 1 {
                    mesh.indices.extend([face[0], face[i], face[i + 1]]);
                }
            }
            _ => {}
        }
    }

    mesh.normals = vertex_normals(&mesh.positions, &mesh.indices)?;
    mesh.as_mesh()?;

    Ok(mesh)
}

/// `v`, `v/vt`, `v//vn` or `v/vt/vn`; negative indices count back from the
/// most recent vertex.
fn resolve_index(token: &str, vertex_count: usize, line_no: usize) -> anyhow::Result<u32> {
    let raw = token.split('/').next().unwrap_or_default();
    let index: i64 = raw
        .parse()
        .with_context(|| format!("line {line_no}: bad face index {token:?}"))?;

    let resolved = match index {
        0 => bail!("line {line_no}: face indices start at 1"),
        1.. => index - 1,
        _ => i64::try_from(vertex_count)? + index,
    };

    ensure!(
        resolved >= 0,
        "line {line_no}: index {index} reaches before the first vertex"
    );
    u32::try_from(resolved).with_context(|| format!("line {line_no}: index {index} is too large"))
}

fn vertex_normals(positions: &[Vec3], indices: &[u32]) -> anyhow::Result<Vec<Vec3>> {
    let mut normals = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let corners = [tri[0], tri[1], tri[2]].map(|i| i as usize);
        let [a, b, c] = corners.map(|i| positions.get(i).copied());
        let (Some(a), Some(b), Some(c)) = (a, b, c) else {
            bail!("face references a vertex that does not exist");
        };

        let face_normal = (b - a).cross(c - a);
        for i in corners {
            normals[i] += face_normal;
        }
    }

    Ok(normals.into_iter().map(Vec3::normalize_or_zero).collect())
}
