//! # Mesh Export
//!
//! Flattens the store into a non-indexed quad-vertex stream: four vertices
//! per face, in face order and edge order within each face. The stream is
//! handed to a [`MeshSink`] in memory or written as a `.mesh` file.
//!
//! ## File layout
//!
//! A little-endian `u32` vertex count, then per vertex twelve
//! little-endian `f32`: position (3), normal (3), uv (2), color (4). There
//! is no header and no padding.

use crate::error::{MeshGenError, Result};
use crate::mesh::QuadMesh;
use crate::session::MeshGen;
use config::constants::{snap_to_zero, MESH_VERTEX_BYTES, MESH_VERTEX_FLOATS};
use glam::{Vec2, Vec3, Vec4};
use log::debug;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Receiver of a flattened vertex stream.
pub trait MeshSink {
    /// Accepts one vertex.
    fn add(&mut self, position: Vec3, normal: Vec3, uv: Vec2, color: Vec4);
}

/// One exported vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
    pub color: Vec4,
}

impl MeshVertex {
    /// Returns the twelve floats of this vertex in file order.
    pub fn to_floats(&self) -> [f32; MESH_VERTEX_FLOATS] {
        let mut out = [0.0; MESH_VERTEX_FLOATS];
        out[0..3].copy_from_slice(&self.position.to_array());
        out[3..6].copy_from_slice(&self.normal.to_array());
        out[6..8].copy_from_slice(&self.uv.to_array());
        out[8..12].copy_from_slice(&self.color.to_array());
        out
    }

    /// Builds a vertex from twelve floats in file order.
    pub fn from_floats(floats: &[f32; MESH_VERTEX_FLOATS]) -> Self {
        Self {
            position: Vec3::from_slice(&floats[0..3]),
            normal: Vec3::from_slice(&floats[3..6]),
            uv: Vec2::from_slice(&floats[6..8]),
            color: Vec4::from_slice(&floats[8..12]),
        }
    }
}

impl MeshSink for Vec<MeshVertex> {
    fn add(&mut self, position: Vec3, normal: Vec3, uv: Vec2, color: Vec4) {
        self.push(MeshVertex {
            position,
            normal,
            uv,
            color,
        });
    }
}

fn snap(v: Vec3) -> Vec3 {
    Vec3::new(snap_to_zero(v.x), snap_to_zero(v.y), snap_to_zero(v.z))
}

impl QuadMesh {
    /// Recalculates normals, then streams every face corner into `sink`.
    ///
    /// Positions and normals are snapped to zero per component.
    pub fn build<S: MeshSink + ?Sized>(&mut self, sink: &mut S) {
        self.recalculate_normals();
        for face in &self.faces {
            let mut edge = face.edge;
            for _ in 0..4 {
                let e = self.edges[edge as usize];
                let position = self.vertices[e.vertex as usize];
                sink.add(snap(position), snap(face.normal), e.uv, face.color);
                edge = e.next;
            }
        }
    }

    /// Collects the vertex stream of [`QuadMesh::build`].
    pub fn to_vertices(&mut self) -> Vec<MeshVertex> {
        let mut vertices = Vec::with_capacity(self.faces.len() * 4);
        self.build(&mut vertices);
        vertices
    }
}

/// Writes a vertex stream in the `.mesh` layout.
pub fn write_mesh<W: Write>(mut writer: W, vertices: &[MeshVertex]) -> Result<()> {
    let count = u32::try_from(vertices.len())
        .map_err(|_| MeshGenError::invalid_mesh_file("too many vertices for a u32 count"))?;
    writer.write_all(&count.to_le_bytes())?;
    for vertex in vertices {
        for value in vertex.to_floats() {
            writer.write_all(&value.to_le_bytes())?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Reads a vertex stream in the `.mesh` layout.
///
/// A stream that ends before the announced vertex count is an
/// [`MeshGenError::InvalidMeshFile`].
pub fn read_mesh_from<R: Read>(mut reader: R) -> Result<Vec<MeshVertex>> {
    let mut count_buf = [0u8; 4];
    reader
        .read_exact(&mut count_buf)
        .map_err(|e| truncated(e, "missing vertex count"))?;
    let count = u32::from_le_bytes(count_buf);

    let mut vertices = Vec::new();
    let mut record = [0u8; MESH_VERTEX_BYTES];
    for i in 0..count {
        reader
            .read_exact(&mut record)
            .map_err(|e| truncated(e, &format!("expected {count} vertices, got {i}")))?;
        let mut floats = [0.0f32; MESH_VERTEX_FLOATS];
        for (slot, bytes) in floats.iter_mut().zip(record.chunks_exact(4)) {
            *slot = f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        }
        vertices.push(MeshVertex::from_floats(&floats));
    }
    Ok(vertices)
}

fn truncated(error: std::io::Error, message: &str) -> MeshGenError {
    if error.kind() == std::io::ErrorKind::UnexpectedEof {
        MeshGenError::invalid_mesh_file(message)
    } else {
        MeshGenError::Io(error)
    }
}

/// Reads a `.mesh` file.
pub fn read_mesh(path: impl AsRef<Path>) -> Result<Vec<MeshVertex>> {
    let file = File::open(path.as_ref())?;
    read_mesh_from(BufReader::new(file))
}

impl MeshGen {
    /// Streams the mesh into `sink`. Normals are recalculated first.
    pub fn build<S: MeshSink + ?Sized>(&mut self, sink: &mut S) {
        self.mesh_mut().build(sink);
    }

    /// Writes the mesh to `<mesh_dir>/<name>.mesh` and returns the path.
    pub fn save_mesh(&mut self, name: &str) -> Result<PathBuf> {
        let path = self.config().mesh_path(name);
        self.save_mesh_to(&path)?;
        Ok(path)
    }

    /// Writes the mesh to `path`, creating parent directories.
    pub fn save_mesh_to(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let vertices = self.mesh_mut().to_vertices();
        let file = File::create(path)?;
        write_mesh(BufWriter::new(file), &vertices)?;
        debug!("wrote {} vertices to {}", vertices.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_streams_four_vertices_per_face() {
        let mut mesh = QuadMesh::new();
        mesh.add_cube(Vec3::ZERO, Vec3::ONE);
        let vertices = mesh.to_vertices();
        assert_eq!(vertices.len(), 24);
        // first corner of the front face, in edge order
        assert_eq!(vertices[0].position, Vec3::splat(-0.5));
        assert_eq!(vertices[0].normal, Vec3::NEG_Z);
        assert_eq!(vertices[2].uv, Vec2::ONE);
        assert_eq!(vertices[5].color, Vec4::ONE);
    }

    #[test]
    fn test_build_snaps_near_zero() {
        let mut mesh = QuadMesh::new();
        mesh.add_face([
            Vec3::new(1e-8, 0.0, 0.0),
            Vec3::new(1.0, -1e-9, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ]);
        let vertices = mesh.to_vertices();
        assert_eq!(vertices[0].position.x, 0.0);
        assert_eq!(vertices[1].position.y, 0.0);
    }

    #[test]
    fn test_build_refreshes_stale_normals() {
        let mut mesh = QuadMesh::new();
        let face = mesh.add_face([Vec3::ZERO, Vec3::X, Vec3::X + Vec3::Y, Vec3::Y]);
        for v in mesh.face_vertex_ids(face).unwrap() {
            let p = mesh.vertex(v).unwrap();
            mesh.set_vertex(v, Vec3::new(p.x, 0.0, p.y));
        }
        let vertices = mesh.to_vertices();
        assert_eq!(vertices[0].normal, Vec3::NEG_Y);
    }

    #[test]
    fn test_write_then_read_in_memory() {
        let mut mesh = QuadMesh::new();
        mesh.add_color_cube(Vec3::ONE, Vec3::splat(2.0), Vec4::new(0.5, 0.25, 1.0, 1.0));
        let vertices = mesh.to_vertices();

        let mut bytes = Vec::new();
        write_mesh(&mut bytes, &vertices).unwrap();
        assert_eq!(bytes.len(), 4 + 24 * MESH_VERTEX_BYTES);
        assert_eq!(&bytes[0..4], &24u32.to_le_bytes());
        assert_eq!(read_mesh_from(bytes.as_slice()).unwrap(), vertices);
    }

    #[test]
    fn test_read_truncated() {
        let mut bytes = Vec::new();
        write_mesh(&mut bytes, &[MeshVertex {
            position: Vec3::ONE,
            normal: Vec3::Y,
            uv: Vec2::ZERO,
            color: Vec4::ONE,
        }])
        .unwrap();
        bytes.truncate(bytes.len() - 1);
        let err = read_mesh_from(bytes.as_slice()).unwrap_err();
        assert!(matches!(err, MeshGenError::InvalidMeshFile { .. }));
        assert!(matches!(
            read_mesh_from(&[1u8, 0][..]).unwrap_err(),
            MeshGenError::InvalidMeshFile { .. }
        ));
    }

    #[test]
    fn test_empty_mesh_writes_zero_count() {
        let mut bytes = Vec::new();
        write_mesh(&mut bytes, &QuadMesh::new().to_vertices()).unwrap();
        assert_eq!(bytes, vec![0, 0, 0, 0]);
    }
}
