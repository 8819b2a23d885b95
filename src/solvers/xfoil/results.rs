use std::path::Path;

use crate::components::{Polar, PolarHeader, PolarPoint};
use crate::utils::{SolverError, SolverKind};

const SEPARATOR: &str = "------";

fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok()
}

/// Reads the header lines preceding the column separator.
///
/// Every field is optional; only the aerofoil name line is always expected.
fn parse_header(lines: &[&str]) -> PolarHeader {
    let mut header = PolarHeader::default();
    for line in lines {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [_, "Version", version, ..] => header.version = parse_number(version),
            _ if line.contains("Calculated polar for:") => {
                header.aerofoil = line
                    .split_once(':')
                    .map(|(_, name)| name.trim().to_string())
                    .unwrap_or_default();
            }
            ["xtrf", "=", top, _, bottom, ..] => {
                header.xtr_top = parse_number(top);
                header.xtr_bottom = parse_number(bottom);
            }
            ["Mach", "=", mach, rest @ ..] => {
                header.mach = parse_number(mach);
                let re_start = rest.iter().position(|t| *t == "=").map(|i| i + 1);
                let re_end = rest.iter().position(|t| *t == "Ncrit");
                if let (Some(start), Some(end)) = (re_start, re_end) {
                    if start < end {
                        header.reynolds_number = parse_number(&rest[start..end].concat());
                    }
                }
                header.ncrit = rest.last().and_then(|t| parse_number(t));
            }
            _ => {}
        }
    }
    header
}

/// Parses an accumulated polar file.
///
/// Rows follow the dashed separator with columns alpha, cl, cd, cdp, cm and
/// optional transition locations; cdp is discarded. `reynolds_number` is the
/// value the sweep was requested at and is kept even when the header echoes
/// a rounded one.
pub fn parse_polar(content: &str, path: &Path, reynolds_number: f64) -> Result<Polar, SolverError> {
    let error = |field: &str, reason: String| SolverError::parse(SolverKind::Viscous, path, field, reason);

    let lines: Vec<&str> = content.lines().collect();
    let separator = lines
        .iter()
        .position(|line| line.trim_start().starts_with(SEPARATOR))
        .ok_or_else(|| error("table", "no column separator".to_string()))?;

    let header = parse_header(&lines[..separator]);

    let mut points = Vec::new();
    for (offset, line) in lines[separator + 1..].iter().enumerate() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        if tokens.len() < 5 {
            return Err(error(
                "row",
                format!("line {} has {} columns", separator + offset + 2, tokens.len()),
            ));
        }
        let column = |index: usize, name: &str| {
            parse_number(tokens[index]).ok_or_else(|| error(name, format!("'{}'", tokens[index])))
        };
        points.push(PolarPoint::new(
            column(0, "alpha")?,
            column(1, "cl")?,
            column(2, "cd")?,
            column(4, "cm")?,
        ));
    }

    Ok(Polar::new(reynolds_number, points).with_header(header))
}
