use glam::Vec3;
use orbitview_render::{Geometry, Vertex};

use crate::pack::encode_normal_rgba8;

/// Signed-normalized 1.0.
const UV_ONE: i16 = i16::MAX;

/// Faces as (normal, u axis, v axis), with `u x v == normal`.
const FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    (Vec3::X, Vec3::NEG_Z, Vec3::Y),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    (Vec3::Y, Vec3::X, Vec3::NEG_Z),
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
];

/// Unit cube centred on the origin: 24 vertices, 36 indices, one texture
/// per face, counter-clockwise winding seen from outside.
pub fn cube_geometry() -> Geometry {
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, u, v) in FACES {
        let base = vertices.len() as u16;
        let packed_normal = encode_normal_rgba8(normal.x, normal.y, normal.z, 0.0);
        let packed_tangent = encode_normal_rgba8(u.x, u.y, u.z, 0.0);
        let corners = [
            (-u - v, [0, 0]),
            (u - v, [UV_ONE, 0]),
            (u + v, [UV_ONE, UV_ONE]),
            (-u + v, [0, UV_ONE]),
        ];
        for (offset, uv) in corners {
            let p = (normal + offset) * 0.5;
            vertices.push(Vertex {
                position: p.to_array(),
                normal: packed_normal,
                tangent: packed_tangent,
                uv,
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    Geometry { vertices, indices }
}
