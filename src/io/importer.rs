// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! File importers for parameter lines and in-memory mesh dumps

use crate::geometry::MeshBuffers;
use crate::scene::ParameterLine;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Read a parameter line file
pub fn load_parameter_lines(path: impl AsRef<Path>) -> Result<Vec<ParameterLine>> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read parameter line file: {}", path.display()))?;

    super::parse_parameter_lines(&source)
        .with_context(|| format!("Can't parse file with lines: {}", path.display()))
}

/// Read mesh buffers serialized as JSON
pub fn load_mesh_json(path: impl AsRef<Path>) -> Result<MeshBuffers> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read mesh file: {}", path.display()))?;

    let mesh: MeshBuffers = serde_json::from_str(&source)
        .with_context(|| format!("Failed to parse mesh file: {}", path.display()))?;
    mesh.view()
        .with_context(|| format!("Inconsistent mesh buffers in {}", path.display()))?;
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Primitive;
    use nalgebra::Vector3;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_parameter_lines() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "s 0 1 0 0 1 0")?;
        writeln!(file, "m 0 0 0 1 0 0")?;

        let lines = load_parameter_lines(file.path())?;
        assert_eq!(lines.len(), 2);
        Ok(())
    }

    #[test]
    fn test_load_parameter_lines_reports_path() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "q 1 2 3")?;

        let err = load_parameter_lines(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Can't parse file with lines"));
        Ok(())
    }

    #[test]
    fn test_load_mesh_json_roundtrip() -> Result<()> {
        let mesh = Primitive::cube(Vector3::new(1.0, 1.0, 1.0), false).to_mesh();
        let mut file = NamedTempFile::new()?;
        file.write_all(serde_json::to_string(&mesh)?.as_bytes())?;

        let loaded = load_mesh_json(file.path())?;
        assert_eq!(loaded.coordinates, mesh.coordinates);
        assert_eq!(loaded.elements, mesh.elements);
        Ok(())
    }

    #[test]
    fn test_load_mesh_json_rejects_bad_indices() -> Result<()> {
        let mut mesh = Primitive::pyramid(1.0, 1.0).to_mesh();
        mesh.elements[0] = 99;
        let mut file = NamedTempFile::new()?;
        file.write_all(serde_json::to_string(&mesh)?.as_bytes())?;

        assert!(load_mesh_json(file.path()).is_err());
        Ok(())
    }
}
