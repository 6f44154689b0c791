//! Triangle mesh geometry.
//!
//! A [`Mesh`] owns its positions, texture coordinates and the two parallel
//! index lists that stitch them into triangles. Positions stay in mesh space;
//! the camera transform is applied per frame by the render pass.

use std::path::Path;
use std::sync::Arc;

use crate::error::{MeshError, RenderError};
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::texture::Texture;

/// A textured triangle mesh.
///
/// Triangle `i` takes its corners from `positions[triangles[i][k]]` and its
/// texture coordinates from `uvs[uv_triangles[i][k]]`.
#[derive(Debug, Clone)]
pub struct Mesh {
    name: String,
    positions: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
    uvs: Vec<Vec2>,
    uv_triangles: Vec<[u32; 3]>,
    texture: Option<Arc<Texture>>,
}

impl Mesh {
    /// Build a mesh from loader output.
    ///
    /// Only the structural invariant is checked here (one UV triple per
    /// position triple). Index ranges are checked when the mesh is drawn, or
    /// up front with [`Mesh::validate`].
    pub fn new(
        name: impl Into<String>,
        positions: Vec<Vec3>,
        triangles: Vec<[u32; 3]>,
        uvs: Vec<Vec2>,
        uv_triangles: Vec<[u32; 3]>,
    ) -> Result<Self, MeshError> {
        let name = name.into();
        if triangles.len() != uv_triangles.len() {
            return Err(MeshError::TriangleCountMismatch {
                mesh: name,
                triangles: triangles.len(),
                uv_triangles: uv_triangles.len(),
            });
        }
        Ok(Self {
            name,
            positions,
            triangles,
            uvs,
            uv_triangles,
            texture: None,
        })
    }

    /// Attach a texture. The same texture can be shared by several meshes.
    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn set_texture(&mut self, texture: Option<Arc<Texture>>) {
        self.texture = texture;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    pub fn uv_triangles(&self) -> &[[u32; 3]] {
        &self.uv_triangles
    }

    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_deref()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Corner positions of triangle `index`, bounds-checked.
    pub fn triangle_positions(&self, index: usize) -> Result<[Vec3; 3], RenderError> {
        let tri = self.triangle_at(&self.triangles, index)?;
        let fetch = |i: u32| {
            self.positions
                .get(i as usize)
                .copied()
                .ok_or_else(|| RenderError::PositionIndexOutOfBounds {
                    mesh: self.name.clone(),
                    triangle: index,
                    index: i,
                    len: self.positions.len(),
                })
        };
        Ok([fetch(tri[0])?, fetch(tri[1])?, fetch(tri[2])?])
    }

    /// Corner texture coordinates of triangle `index`, bounds-checked.
    pub fn triangle_uvs(&self, index: usize) -> Result<[Vec2; 3], RenderError> {
        let tri = self.triangle_at(&self.uv_triangles, index)?;
        let fetch = |i: u32| {
            self.uvs
                .get(i as usize)
                .copied()
                .ok_or_else(|| RenderError::UvIndexOutOfBounds {
                    mesh: self.name.clone(),
                    triangle: index,
                    index: i,
                    len: self.uvs.len(),
                })
        };
        Ok([fetch(tri[0])?, fetch(tri[1])?, fetch(tri[2])?])
    }

    fn triangle_at(&self, list: &[[u32; 3]], index: usize) -> Result<[u32; 3], RenderError> {
        list.get(index)
            .copied()
            .ok_or_else(|| RenderError::TriangleOutOfBounds {
                mesh: self.name.clone(),
                triangle: index,
                count: list.len(),
            })
    }

    /// Check every index, reporting the first out-of-range one.
    pub fn validate(&self) -> Result<(), RenderError> {
        for i in 0..self.triangle_count() {
            self.triangle_positions(i)?;
            self.triangle_uvs(i)?;
        }
        Ok(())
    }

    /// Load every object in an OBJ file as a separate mesh.
    ///
    /// Polygons are triangulated. Objects without texture coordinates get a
    /// single `(0, 0)` coordinate shared by every corner.
    pub fn load_all_from_obj<P: AsRef<Path>>(path: P) -> Result<Vec<Mesh>, MeshError> {
        let path = path.as_ref();
        let options = tobj::LoadOptions {
            triangulate: true,
            single_index: false,
            ..Default::default()
        };
        let (models, _materials) = tobj::load_obj(path, &options)?;

        let meshes = models
            .into_iter()
            .map(Self::from_tobj)
            .collect::<Result<Vec<_>, _>>()?;

        log::info!(
            "Loaded {} mesh(es), {} triangles from {}",
            meshes.len(),
            meshes.iter().map(Mesh::triangle_count).sum::<usize>(),
            path.display()
        );
        Ok(meshes)
    }

    fn from_tobj(model: tobj::Model) -> Result<Mesh, MeshError> {
        let name = model.name;
        let mesh = model.mesh;

        let positions = mesh
            .positions
            .chunks_exact(3)
            .map(|p| Vec3::new(p[0], p[1], p[2]))
            .collect();
        let triangles = Self::triples(&name, &mesh.indices)?;

        let (uvs, uv_triangles) = if mesh.texcoords.is_empty() {
            (vec![Vec2::ZERO], vec![[0; 3]; triangles.len()])
        } else {
            let uvs = mesh
                .texcoords
                .chunks_exact(2)
                .map(|t| Vec2::new(t[0], t[1]))
                .collect();
            let indices = if mesh.texcoord_indices.is_empty() {
                &mesh.indices
            } else {
                &mesh.texcoord_indices
            };
            (uvs, Self::triples(&name, indices)?)
        };

        let mesh = Mesh::new(name, positions, triangles, uvs, uv_triangles)?;
        mesh.validate()?;
        Ok(mesh)
    }

    fn triples(name: &str, indices: &[u32]) -> Result<Vec<[u32; 3]>, MeshError> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::IncompleteTriangle {
                mesh: name.to_string(),
                len: indices.len(),
            });
        }
        Ok(indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]]).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn quad() -> Mesh {
        Mesh::new(
            "quad",
            vec![
                Vec3::new(-1.0, -1.0, 0.0),
                Vec3::new(1.0, -1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(-1.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
        .unwrap()
    }

    #[test]
    fn fetches_triangle_corners() {
        let mesh = quad();
        assert_eq!(mesh.triangle_count(), 2);
        let [a, b, c] = mesh.triangle_positions(1).unwrap();
        assert_eq!(a, Vec3::new(-1.0, -1.0, 0.0));
        assert_eq!(b, Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(c, Vec3::new(-1.0, 1.0, 0.0));
        assert_eq!(mesh.triangle_uvs(1).unwrap()[2], Vec2::new(0.0, 1.0));
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn mismatched_triangle_lists_are_rejected() {
        let err = Mesh::new("bad", vec![], vec![[0, 0, 0]], vec![], vec![]).unwrap_err();
        assert!(matches!(
            err,
            MeshError::TriangleCountMismatch {
                triangles: 1,
                uv_triangles: 0,
                ..
            }
        ));
    }

    #[test]
    fn out_of_range_indices_name_mesh_and_triangle() {
        let mesh = Mesh::new(
            "broken",
            vec![Vec3::ZERO; 3],
            vec![[0, 1, 2], [0, 1, 7]],
            vec![Vec2::ZERO],
            vec![[0, 0, 0], [0, 0, 0]],
        )
        .unwrap();
        assert_eq!(
            mesh.validate(),
            Err(RenderError::PositionIndexOutOfBounds {
                mesh: "broken".into(),
                triangle: 1,
                index: 7,
                len: 3,
            })
        );

        let mesh = Mesh::new(
            "broken-uv",
            vec![Vec3::ZERO; 3],
            vec![[0, 1, 2]],
            vec![Vec2::ZERO],
            vec![[0, 3, 0]],
        )
        .unwrap();
        assert!(matches!(
            mesh.triangle_uvs(0),
            Err(RenderError::UvIndexOutOfBounds { index: 3, len: 1, .. })
        ));
    }

    #[test]
    fn triangle_past_the_end_is_an_error() {
        let mesh = quad();
        let expected = RenderError::TriangleOutOfBounds {
            mesh: "quad".into(),
            triangle: 2,
            count: 2,
        };
        assert_eq!(mesh.triangle_positions(2), Err(expected.clone()));
        assert_eq!(mesh.triangle_uvs(2), Err(expected));
    }

    #[test]
    fn shares_texture_between_meshes() {
        let texture = Arc::new(Texture::solid(2, 2, 0xFF).unwrap());
        let a = quad().with_texture(Arc::clone(&texture));
        let b = quad().with_texture(Arc::clone(&texture));
        assert_eq!(Arc::strong_count(&texture), 3);
        assert_eq!(a.texture(), b.texture());
        drop(a);
        drop(b);
        assert_eq!(Arc::strong_count(&texture), 1);
    }

    #[test]
    fn loads_obj_with_separate_uv_indices() {
        let path = std::env::temp_dir().join(format!("pinhole-raster-{}.obj", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "o square\n\
             v -1 -1 0\nv 1 -1 0\nv 1 1 0\nv -1 1 0\n\
             vt 0 0\nvt 1 1\n\
             f 1/1 2/1 3/2 4/2"
        )
        .unwrap();
        drop(file);

        let meshes = Mesh::load_all_from_obj(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(meshes.len(), 1);
        let mesh = &meshes[0];
        assert_eq!(mesh.name(), "square");
        assert_eq!(mesh.positions().len(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.uvs().len(), 2);
        assert_eq!(mesh.triangle_uvs(0).unwrap()[2], Vec2::new(1.0, 1.0));
    }

    #[test]
    fn obj_without_texcoords_gets_placeholder_uv() {
        let path =
            std::env::temp_dir().join(format!("pinhole-raster-nouv-{}.obj", std::process::id()));
        std::fs::write(&path, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();

        let meshes = Mesh::load_all_from_obj(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let mesh = &meshes[0];
        assert_eq!(mesh.uvs(), &[Vec2::ZERO]);
        assert_eq!(mesh.uv_triangles(), &[[0, 0, 0]]);
    }

    #[test]
    fn missing_obj_is_an_error() {
        assert!(matches!(
            Mesh::load_all_from_obj("/nonexistent/model.obj"),
            Err(MeshError::Obj(_))
        ));
    }
}
