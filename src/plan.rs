//! Fixture plans: which circles go into which file.
//!
//! Plans are read from JSON, for example
//!
//! ```json
//! [{
//!     "file": "shift.txt",
//!     "description": "a circle and a shifted copy",
//!     "count": 1000,
//!     "polygons": [{ "name": "a" }, { "name": "b", "translate": [0.5, 0] }],
//!     "commands": [
//!         { "op": "intersection", "result": "ab", "a": "a", "b": "b" },
//!         { "op": "draw", "file": "shift.png", "names": ["a", "b", "ab"] }
//!     ]
//! }]
//! ```
use crate::*;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FixturePlan {
    /// File name, relative to the output directory.
    pub file: String,
    pub description: String,
    /// Points per polygon; the caller's default when absent.
    #[serde(default)]
    pub count: Option<usize>,
    pub polygons: Vec<CircleParams>,
    #[serde(default)]
    pub commands: Vec<PlanCommand>,
}

/// Commands which follow the polygon declarations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PlanCommand {
    Intersection { result: String, a: String, b: String },
    Union { result: String, a: String, b: String },
    Setcol { name: String, color: Rgb },
    Bbox { result: String, names: Vec<String> },
    Draw { file: String, names: Vec<String> },
}

impl From<&PlanCommand> for Command {
    fn from(c: &PlanCommand) -> Self {
        match c.clone() {
            PlanCommand::Intersection { result, a, b } => Command::Intersection { result, a, b },
            PlanCommand::Union { result, a, b } => Command::Union { result, a, b },
            PlanCommand::Setcol { name, color } => Command::SetCol { name, color },
            PlanCommand::Bbox { result, names } => Command::Bbox { result, names },
            PlanCommand::Draw { file, names } => Command::Draw { file, names },
        }
    }
}

impl FixturePlan {
    pub fn count(&self, default: usize) -> usize {
        self.count.unwrap_or(default)
    }

    /// Generate the fixture, with the header recording the point count used.
    pub fn build(&self, default_count: usize) -> Result<Fixture> {
        let count = self.count(default_count);
        let mut fixture = Fixture::new(Header::new(self.description.clone(), count));
        for p in &self.polygons {
            fixture.push(Command::Polygon(p.record(count)?));
        }
        for c in &self.commands {
            fixture.push(c.into());
        }
        Ok(fixture)
    }
}

/// Parse a JSON list of plans.
pub fn from_json(text: &str) -> Result<Vec<FixturePlan>> {
    Ok(serde_json::from_str(text)?)
}

/// A circle and a rotation of it by a quarter of the angular step.
pub fn rotation(count: usize) -> FixturePlan {
    FixturePlan {
        file: "test.txt".into(),
        description: "a circle and a small rotation thereof".into(),
        count: Some(count),
        polygons: vec![
            CircleParams::new("circ"),
            CircleParams::new("circ-rot").phase(quarter_step(count)),
        ],
        commands: Vec::new(),
    }
}

/// A circle and a copy shifted by its radius, with their intersection and union.
pub fn translation(count: usize) -> FixturePlan {
    FixturePlan {
        file: "translation.txt".into(),
        description: "a circle and a copy translated by its radius".into(),
        count: Some(count),
        polygons: vec![
            CircleParams::new("circ"),
            CircleParams::new("circ-shift").translate([1.0, 0.0]),
        ],
        commands: vec![
            PlanCommand::Intersection {
                result: "circ-int".into(),
                a: "circ".into(),
                b: "circ-shift".into(),
            },
            PlanCommand::Union {
                result: "circ-union".into(),
                a: "circ".into(),
                b: "circ-shift".into(),
            },
        ],
    }
}

/// As [`rotation`] with coordinates scaled for fixed point parsing.
pub fn scaled(count: usize) -> FixturePlan {
    FixturePlan {
        file: "scaled.txt".into(),
        description: "a fixed point scaled circle and a small rotation thereof".into(),
        count: Some(count),
        polygons: vec![
            CircleParams::new("circ").scale(FIXED_POINT_SCALE),
            CircleParams::new("circ-rot")
                .phase(quarter_step(count))
                .scale(FIXED_POINT_SCALE),
        ],
        commands: Vec::new(),
    }
}

/// Two overlapping coloured circles, their intersection and bounding box, drawn.
pub fn draw(count: usize) -> FixturePlan {
    let color = |r, g, b| Rgb::new(r, g, b).expect("colour channels within [0, 1]");
    FixturePlan {
        file: "draw.txt".into(),
        description: "two overlapping circles with their intersection and bounding box".into(),
        count: Some(count),
        polygons: vec![
            CircleParams::new("a"),
            CircleParams::new("b").translate([0.5, 0.5]),
        ],
        commands: vec![
            PlanCommand::Intersection {
                result: "ab".into(),
                a: "a".into(),
                b: "b".into(),
            },
            PlanCommand::Bbox {
                result: "box".into(),
                names: names(&["a", "b"]),
            },
            PlanCommand::Setcol {
                name: "a".into(),
                color: color(1.0, 0.0, 0.0),
            },
            PlanCommand::Setcol {
                name: "b".into(),
                color: color(0.0, 0.0, 1.0),
            },
            PlanCommand::Setcol {
                name: "ab".into(),
                color: color(0.0, 1.0, 0.0),
            },
            PlanCommand::Draw {
                file: "draw.png".into(),
                names: names(&["box", "a", "b", "ab"]),
            },
        ],
    }
}

fn names(ns: &[&str]) -> Vec<String> {
    ns.iter().map(|n| n.to_string()).collect()
}

fn quarter_step(count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        PI / count as f64 / 4.0
    }
}
