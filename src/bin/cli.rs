// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! obbkit CLI

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use nalgebra::{Point3, Vector3};
use obbkit::geometry::BoundingBox;
use obbkit::{io, BoundedModel, BoxBuilder, BuildConfig, MeshBuffers, OrientedBox, Primitive};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "obbkit")]
#[command(about = "Oriented bounding boxes and line picking for triangle meshes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Build configuration file (defaults to ./obbkit.toml plus OBBKIT_* overrides)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the oriented box of a mesh
    Build {
        #[command(flatten)]
        source: MeshSource,

        /// Print a JSON report instead of text
        #[arg(long)]
        json: bool,
    },

    /// Build a box, place it and test a line against it
    Pick {
        #[command(flatten)]
        source: MeshSource,

        /// Point on the line
        #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true, required = true)]
        point: Vec<f32>,

        /// Line direction
        #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true, required = true)]
        dir: Vec<f32>,

        /// Translate the model before picking
        #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
        translate: Option<Vec<f32>>,

        /// Add to the model scale before picking
        #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
        scale: Option<Vec<f32>>,

        /// Parameter line file to attach to the model
        #[arg(long, value_name = "FILE")]
        lines: Option<PathBuf>,

        /// Drag parameter line INDEX by AMOUNT along its direction
        #[arg(long, num_args = 2, value_names = ["INDEX", "AMOUNT"], allow_hyphen_values = true, requires = "lines")]
        drag: Option<Vec<String>>,
    },

    /// Write the default configuration file
    Config {
        /// Output path
        #[arg(short, long, default_value = obbkit::config::CONFIG_FILE)]
        output: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct MeshSource {
    /// Built-in primitive (cube, pyramid, sphere)
    #[arg(value_name = "PRIMITIVE", conflicts_with = "mesh")]
    primitive: Option<String>,

    /// JSON mesh file with coordinates, normals and elements
    #[arg(long, value_name = "FILE")]
    mesh: Option<PathBuf>,
}

#[derive(Serialize)]
struct BoxReport {
    vertices: Vec<[f32; 3]>,
    elements: Vec<u32>,
    normals: Vec<[f32; 3]>,
    center: [f32; 3],
    volume: f32,
    aabb_volume: f32,
}

impl BoxReport {
    fn new(obb: &OrientedBox, mesh: &MeshBuffers) -> Self {
        let aabb = BoundingBox::from_points(
            mesh.coordinates
                .chunks_exact(3)
                .map(|c| Point3::new(c[0], c[1], c[2])),
        );

        Self {
            vertices: obb.world_vertices().iter().map(|v| [v.x, v.y, v.z]).collect(),
            elements: OrientedBox::elements().to_vec(),
            normals: obb.normals().iter().map(|n| [n.x, n.y, n.z]).collect(),
            center: {
                let c = obb.center();
                [c.x, c.y, c.z]
            },
            volume: obb.volume(),
            aabb_volume: aabb.volume(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Build { source, json } => {
            let config = load_config(cli.config.as_ref())?;
            build_command(source, *json, &config, cli.verbose)?;
        }
        Commands::Pick {
            source,
            point,
            dir,
            translate,
            scale,
            lines,
            drag,
        } => {
            let config = load_config(cli.config.as_ref())?;
            let placement = Placement {
                translate: translate.as_deref().map(to_vector).transpose()?,
                scale: scale.as_deref().map(to_vector).transpose()?,
                lines: lines.clone(),
                drag: drag.as_deref().map(parse_drag).transpose()?,
            };
            pick_command(source, &to_point(point)?, &to_vector(dir)?, &placement, &config)?;
        }
        Commands::Config { output } => {
            BuildConfig::default().save(output)?;
            println!("Wrote default configuration to {}", output.display());
        }
        Commands::Version => {
            println!("obbkit v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let default = if verbose { "obbkit=debug" } else { "obbkit=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<BuildConfig> {
    match path {
        Some(path) => BuildConfig::from_file(path),
        None => BuildConfig::load(),
    }
}

fn load_mesh(source: &MeshSource) -> Result<MeshBuffers> {
    match (&source.primitive, &source.mesh) {
        (_, Some(path)) => io::load_mesh_json(path),
        (Some(name), None) => match Primitive::from_name(name) {
            Some(primitive) => Ok(primitive.to_mesh()),
            None => bail!("Unknown primitive: {name} (expected cube, pyramid or sphere)"),
        },
        (None, None) => bail!("Either a primitive name or --mesh is required"),
    }
}

fn build_command(source: &MeshSource, json: bool, config: &BuildConfig, verbose: bool) -> Result<()> {
    let mesh = load_mesh(source)?;
    if verbose {
        println!("Vertices: {}", mesh.vertex_count());
        println!("Triangles: {}", mesh.triangle_count());
    }

    let start = std::time::Instant::now();
    let builder = BoxBuilder::new(config.clone());
    let obb = builder.build(&mesh.view()?)?;
    let build_time = start.elapsed();

    let report = BoxReport::new(&obb, &mesh);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for (i, v) in report.vertices.iter().enumerate() {
        println!("v{i}: {:>10.4} {:>10.4} {:>10.4}", v[0], v[1], v[2]);
    }
    for (i, n) in report.normals.iter().enumerate() {
        println!("n{i}: {:>10.4} {:>10.4} {:>10.4}", n[0], n[1], n[2]);
    }
    println!("Volume: {:.6} (axis-aligned {:.6})", report.volume, report.aabb_volume);

    if verbose {
        println!("Built in {build_time:.2?}");
    }

    Ok(())
}

struct Placement {
    translate: Option<Vector3<f32>>,
    scale: Option<Vector3<f32>>,
    lines: Option<PathBuf>,
    drag: Option<(usize, f32)>,
}

fn pick_command(
    source: &MeshSource,
    point: &Point3<f32>,
    dir: &Vector3<f32>,
    placement: &Placement,
    config: &BuildConfig,
) -> Result<()> {
    let dir = match dir.try_normalize(f32::EPSILON) {
        Some(dir) => dir,
        None => bail!("Line direction must be non-zero"),
    };

    let mesh = load_mesh(source)?;
    let mut model = BoundedModel::new(mesh, &BoxBuilder::new(config.clone()))?;

    if let Some(path) = &placement.lines {
        model = model.with_lines(io::load_parameter_lines(path)?);
    }
    if let Some(delta) = &placement.translate {
        model.move_by(delta);
    }
    if let Some(delta) = &placement.scale {
        model.scale_by(delta);
    }
    if let Some((index, amount)) = placement.drag {
        let line = model
            .lines()
            .get(index)
            .copied()
            .with_context(|| format!("No parameter line {index} (model has {})", model.lines().len()))?;
        line.trigger_along(&mut model, amount);
    }

    let result = model.intersects_line(point, &dir);
    if result.hit {
        println!("{}", "HIT".green().bold());
    } else {
        println!("{}", "MISS".red().bold());
    }

    if result.hit && !result.all_on_same_side {
        println!("{} box is behind the line origin", "note:".yellow());
    }

    Ok(())
}

fn to_vector(values: &[f32]) -> Result<Vector3<f32>> {
    match values {
        [x, y, z] => Ok(Vector3::new(*x, *y, *z)),
        _ => bail!("Expected 3 components, got {}", values.len()),
    }
}

fn to_point(values: &[f32]) -> Result<Point3<f32>> {
    to_vector(values).map(Point3::from)
}

fn parse_drag(values: &[String]) -> Result<(usize, f32)> {
    match values {
        [index, amount] => Ok((
            index.parse().with_context(|| format!("Bad line index: {index}"))?,
            amount.parse().with_context(|| format!("Bad drag amount: {amount}"))?,
        )),
        _ => bail!("Expected INDEX AMOUNT"),
    }
}
