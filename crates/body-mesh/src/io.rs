//! OBJ export of the silhouette solid, and re-parsing of exported files.
//!
//! Export writes positions (`v`) and triangles (`f`, 1-based) only: no
//! normals, no texture coordinates, and never the indicator curves.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::error::{SilhouetteError, SilhouetteResult};
use crate::types::{Mesh, Vertex};

/// Product name used when the caller does not supply one.
pub const DEFAULT_PRODUCT_NAME: &str = "Body";

/// Download file name: `<ProductName>_Scan.obj`.
///
/// Whitespace and path separators in the product name become underscores;
/// an empty name falls back to [`DEFAULT_PRODUCT_NAME`].
pub fn export_file_name(product_name: &str) -> String {
    let cleaned: String = product_name
        .trim()
        .chars()
        .map(|c| {
            if c.is_whitespace() || matches!(c, '/' | '\\' | ':') {
                '_'
            } else {
                c
            }
        })
        .collect();
    let name = if cleaned.is_empty() {
        DEFAULT_PRODUCT_NAME
    } else {
        cleaned.as_str()
    };
    format!("{}_Scan.obj", name)
}

/// Write `mesh` as OBJ text.
pub fn write_obj<W: Write>(mesh: &Mesh, mut writer: W) -> std::io::Result<()> {
    writeln!(writer, "# Body silhouette")?;
    writeln!(writer, "# Vertices: {}", mesh.vertex_count())?;
    writeln!(writer, "# Faces: {}", mesh.face_count())?;
    writeln!(writer)?;

    for v in &mesh.vertices {
        writeln!(
            writer,
            "v {:.6} {:.6} {:.6}",
            v.position.x, v.position.y, v.position.z
        )?;
    }
    for [a, b, c] in &mesh.faces {
        writeln!(writer, "f {} {} {}", a + 1, b + 1, c + 1)?;
    }
    writer.flush()
}

/// OBJ text of `mesh`.
pub fn to_obj_string(mesh: &Mesh) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_obj(mesh, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Save `mesh` to `path` as OBJ.
pub fn save_obj<P: AsRef<Path>>(mesh: &Mesh, path: P) -> SilhouetteResult<()> {
    let path = path.as_ref();
    if mesh.is_empty() {
        return Err(SilhouetteError::empty_mesh("refusing to export an empty mesh"));
    }
    info!(
        target: "body_mesh::io",
        path = %path.display(),
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "Exporting OBJ"
    );

    let file = File::create(path).map_err(|e| SilhouetteError::io_write(path, e))?;
    write_obj(mesh, BufWriter::new(file)).map_err(|e| SilhouetteError::io_write(path, e))
}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    }
}

/// Load an OBJ file.
pub fn load_obj<P: AsRef<Path>>(path: P) -> SilhouetteResult<Mesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| SilhouetteError::io_read(path, e))?;
    let (models, _materials) =
        tobj::load_obj_buf(&mut BufReader::new(file), &load_options(), |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })
        .map_err(|e| SilhouetteError::parse_error(path, e.to_string()))?;
    merge_models(&models, path)
}

/// Parse OBJ text.
pub fn parse_obj_str(text: &str) -> SilhouetteResult<Mesh> {
    let (models, _materials) =
        tobj::load_obj_buf(&mut text.as_bytes(), &load_options(), |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })
        .map_err(|e| SilhouetteError::parse_error("<memory>", e.to_string()))?;
    merge_models(&models, Path::new("<memory>"))
}

fn merge_models(models: &[tobj::Model], path: &Path) -> SilhouetteResult<Mesh> {
    if models.is_empty() {
        return Err(SilhouetteError::empty_mesh(format!(
            "{} contains no models",
            path.display()
        )));
    }

    let mut mesh = Mesh::new();
    for model in models {
        let offset = mesh.vertices.len() as u32;
        let obj = &model.mesh;
        mesh.vertices.extend(
            obj.positions
                .chunks_exact(3)
                .map(|p| Vertex::from_coords(p[0] as f64, p[1] as f64, p[2] as f64)),
        );
        mesh.faces.extend(
            obj.indices
                .chunks_exact(3)
                .map(|f| [f[0] + offset, f[1] + offset, f[2] + offset]),
        );
    }

    debug!(
        target: "body_mesh::io",
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        models = models.len(),
        "Parsed OBJ"
    );
    Ok(mesh)
}
