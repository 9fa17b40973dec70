use std::f32::consts::TAU;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Vertex layout consumed by the torus pipeline.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Triangulated torus surface.
#[derive(Debug, Clone, PartialEq)]
pub struct TorusMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl TorusMesh {
    /// Generates a torus of `radius` with a tube of `tube_radius`.
    ///
    /// The parametrization sweeps the tube cross-section (radial) along
    /// the ring (tubular); vertices are duplicated along both seams so the
    /// grid is (radial + 1) x (tubular + 1).
    pub fn generate(
        radius: f32,
        tube_radius: f32,
        radial_segments: u32,
        tubular_segments: u32,
    ) -> Self {
        let ring_stride = tubular_segments + 1;
        let mut vertices =
            Vec::with_capacity(((radial_segments + 1) * ring_stride) as usize);

        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32 * TAU;
            for i in 0..=tubular_segments {
                let u = i as f32 / tubular_segments as f32 * TAU;

                let ring_center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
                let position = Vec3::new(
                    (radius + tube_radius * v.cos()) * u.cos(),
                    (radius + tube_radius * v.cos()) * u.sin(),
                    tube_radius * v.sin(),
                );
                let normal = (position - ring_center).normalize();

                vertices.push(Vertex {
                    position: position.to_array(),
                    normal: normal.to_array(),
                });
            }
        }

        let mut indices =
            Vec::with_capacity((radial_segments * tubular_segments * 6) as usize);
        for j in 1..=radial_segments {
            for i in 1..=tubular_segments {
                let a = ring_stride * j + i - 1;
                let b = ring_stride * (j - 1) + i - 1;
                let c = ring_stride * (j - 1) + i;
                let d = ring_stride * j + i;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self { vertices, indices }
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_and_index_counts_follow_the_grid() {
        let mesh = TorusMesh::generate(1.0, 0.3, 8, 12);
        assert_eq!(mesh.vertices.len(), (8 + 1) * (12 + 1));
        assert_eq!(mesh.indices.len(), 8 * 12 * 6);
    }

    #[test]
    fn all_indices_are_in_range() {
        let mesh = TorusMesh::generate(1.0, 0.3, 5, 7);
        let count = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < count));
    }

    #[test]
    fn normals_are_unit_length() {
        let mesh = TorusMesh::generate(1.0, 0.3, 6, 6);
        for vertex in &mesh.vertices {
            let length = Vec3::from_array(vertex.normal).length();
            assert!((length - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn positions_stay_on_the_torus_surface() {
        let radius = 1.0;
        let tube = 0.3;
        let mesh = TorusMesh::generate(radius, tube, 10, 10);
        for vertex in &mesh.vertices {
            let p = Vec3::from_array(vertex.position);
            // Distance from the ring circle must equal the tube radius.
            let ring_distance = (p.truncate().length() - radius).hypot(p.z);
            assert!((ring_distance - tube).abs() < 1e-4);
        }
    }
}
