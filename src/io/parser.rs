// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Parameter line parser using pest

use crate::scene::{ParameterLine, ParameterLineKind};
use anyhow::{anyhow, bail, Context, Result};
use nalgebra::Vector3;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "io/lines.pest"]
struct LinesParser;

/// Parse parameter line source into handles, in file order
pub fn parse_parameter_lines(source: &str) -> Result<Vec<ParameterLine>> {
    let file = LinesParser::parse(Rule::file, source)
        .context("Failed to parse parameter lines")?
        .next()
        .ok_or_else(|| anyhow!("Empty parameter line source"))?;

    file.into_inner()
        .filter(|pair| pair.as_rule() == Rule::line)
        .map(parse_line)
        .collect()
}

fn parse_line(pair: Pair<'_, Rule>) -> Result<ParameterLine> {
    let (line_no, _) = pair.line_col();
    let mut inner = pair.into_inner();

    let kind = match inner.next().map(|p| p.as_str()) {
        Some(tag) => ParameterLineKind::from_tag(tag)
            .ok_or_else(|| anyhow!("Unknown parameter line kind {tag:?} on line {line_no}"))?,
        None => bail!("Missing parameter line kind on line {line_no}"),
    };

    let origin = parse_triple(inner.next(), line_no).context("Invalid line position")?;
    let direction = parse_triple(inner.next(), line_no).context("Invalid line direction")?;

    Ok(ParameterLine::new(kind, origin, direction))
}

fn parse_triple(pair: Option<Pair<'_, Rule>>, line_no: usize) -> Result<Vector3<f32>> {
    let pair = pair.ok_or_else(|| anyhow!("Missing coordinates on line {line_no}"))?;

    let mut coords = [0.0_f32; 3];
    for (slot, number) in coords.iter_mut().zip(pair.into_inner()) {
        *slot = number
            .as_str()
            .parse()
            .with_context(|| format!("Bad number {:?} on line {line_no}", number.as_str()))?;
    }

    Ok(Vector3::from(coords))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scale_and_move() -> Result<()> {
        let lines = parse_parameter_lines("s 0 1 0 0 1 0\nm 1.5 -2 .5 1e0 0 0\n")?;
        assert_eq!(lines.len(), 2);

        assert_eq!(lines[0].kind, ParameterLineKind::Scale);
        assert_eq!(lines[0].origin, Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(lines[1].kind, ParameterLineKind::Move);
        assert_eq!(lines[1].origin, Vector3::new(1.5, -2.0, 0.5));
        assert_eq!(lines[1].direction, Vector3::new(1.0, 0.0, 0.0));
        Ok(())
    }

    #[test]
    fn test_comments_and_blank_lines() -> Result<()> {
        let source = "# cube handles\n\n  s 0 0 0 1 0 0   # x\n\nm 0 0 0 0 0 1";
        let lines = parse_parameter_lines(source)?;
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].direction, Vector3::z());
        Ok(())
    }

    #[test]
    fn test_empty_source() -> Result<()> {
        assert!(parse_parameter_lines("")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_malformed_lines_fail() {
        assert!(parse_parameter_lines("s 0 0 0 1 0").is_err());
        assert!(parse_parameter_lines("x 0 0 0 1 0 0").is_err());
        assert!(parse_parameter_lines("s 0 0 0 1 0 0 7").is_err());
        assert!(parse_parameter_lines("s0 0 0 1 0 0").is_err());
    }

    #[test]
    fn test_numbers_need_separators() -> Result<()> {
        assert!(parse_parameter_lines("s 0 1-2 3 0 1 0").is_err());
        assert!(parse_parameter_lines("m 0 0 0 1 0 0-1").is_err());
        assert!(parse_parameter_lines("m 0 0 0 1 0 0\ts 1+2 0 0 0 0 1").is_err());

        let lines = parse_parameter_lines("m\t0  -1\t2 1 0 0#tail")?;
        assert_eq!(lines[0].origin, Vector3::new(0.0, -1.0, 2.0));
        Ok(())
    }
}
