use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A 2D aerofoil profile as an ordered list of (x, y) coordinates.
///
/// Equality and hashing compare the exact bit patterns of the coordinates,
/// so two sections built from the same profile share one viscous solve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aerofoil {
    /// Name written to the first line of the coordinate file.
    pub name: String,
    /// Profile coordinates, usually trailing edge over the upper surface and back.
    pub points: Vec<[f64; 2]>,
}

impl Aerofoil {
    pub fn new(name: impl Into<String>, points: Vec<[f64; 2]>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    /// Parses the plain-text coordinate format: a name line followed by `x y` pairs.
    pub fn from_dat_str(content: &str) -> Option<Self> {
        let mut lines = content.lines().filter(|line| !line.trim().is_empty());
        let name = lines.next()?.trim().to_string();
        let mut points = Vec::new();
        for line in lines {
            let mut values = line.split_whitespace().map(str::parse::<f64>);
            match (values.next(), values.next()) {
                (Some(Ok(x)), Some(Ok(y))) => points.push([x, y]),
                _ => return None,
            }
        }
        Some(Self { name, points })
    }

    /// Renders the plain-text coordinate format read by `from_dat_str`.
    pub fn to_dat_string(&self) -> String {
        let mut content = format!("{}\n", self.name);
        for [x, y] in &self.points {
            content.push_str(&format!("{} {}\n", x, y));
        }
        content
    }
}

impl PartialEq for Aerofoil {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.points.len() == other.points.len()
            && self
                .points
                .iter()
                .zip(&other.points)
                .all(|(a, b)| a[0].to_bits() == b[0].to_bits() && a[1].to_bits() == b[1].to_bits())
    }
}

impl Eq for Aerofoil {}

impl Hash for Aerofoil {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        for [x, y] in &self.points {
            x.to_bits().hash(state);
            y.to_bits().hash(state);
        }
    }
}
