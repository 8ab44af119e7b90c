// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - parameter line parsing and file importers

mod importer;
mod parser;

pub use importer::{load_mesh_json, load_parameter_lines};
pub use parser::parse_parameter_lines;
