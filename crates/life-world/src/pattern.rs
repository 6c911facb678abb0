//! Starting configurations and seeding.

use crate::alive_set::AliveSet;
use life_core::{Cell, Error, PatternSource, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

const BUILTINS: &[(&str, &str)] = &[
    ("block", "x = 2, y = 2\n2o$2o!"),
    ("blinker", "x = 1, y = 3\no$o$o!"),
    ("toad", "x = 4, y = 2\nb3o$3o!"),
    ("beacon", "x = 4, y = 4\n2o2b$2o2b$2b2o$2b2o!"),
    ("glider", "x = 3, y = 3\nbo$2bo$3o!"),
    ("lwss", "x = 5, y = 4\nbo2bo$o4b$o3bo$4o!"),
    ("r-pentomino", "x = 3, y = 3\nb2o$2o$bo!"),
    ("acorn", "x = 7, y = 3\nbo5b$3bo3b$2o2b3o!"),
    ("diehard", "x = 8, y = 3\n6bob$2o6b$bo3b3o!"),
    (
        "pulsar",
        "x = 13, y = 13, rule = B3/S23\n\
         2b3o3b3o2b2$o4bobo4bo$o4bobo4bo$o4bobo4bo$2b3o3b3o2b2$\
         2b3o3b3o2b$o4bobo4bo$o4bobo4bo$o4bobo4bo2$2b3o3b3o!",
    ),
    (
        "gosper-glider-gun",
        "x = 36, y = 9, rule = B3/S23\n\
         24bo11b$22bobo11b$12b2o6b2o12b2o$11bo3bo4b2o12b2o$\
         2o8bo5bo3b2o14b$2o8bo3bob2o4bobo11b$10bo5bo7bo11b$\
         11bo3bo20b$12b2o!",
    ),
];

/// A named shape given as coordinates relative to a declared center
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub name: String,
    pub cells: Vec<Cell>,
    pub center: Cell,
}

impl Pattern {
    pub fn new(name: impl Into<String>, cells: Vec<Cell>, center: Cell) -> Self {
        Self {
            name: name.into(),
            cells,
            center,
        }
    }

    /// Pattern whose center is the midpoint of its bounding box
    pub fn centered(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        let center = bounding_center(&cells);
        Self::new(name, cells, center)
    }

    /// Names accepted by [`Pattern::builtin`]
    pub fn builtin_names() -> impl Iterator<Item = &'static str> {
        BUILTINS.iter().map(|(name, _)| *name)
    }

    /// Look up a built-in pattern by name (case-insensitive)
    pub fn builtin(name: &str) -> Result<Self> {
        let (canonical, rle) = BUILTINS
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownPattern(name.to_string()))?;
        Self::from_rle(*canonical, rle)
    }

    /// Resolve a configured pattern source, reading files if needed
    pub fn load(source: &PatternSource) -> Result<Self> {
        match source {
            PatternSource::Builtin { name } => Self::builtin(name),
            PatternSource::RleFile { path } => {
                let text = std::fs::read_to_string(path)?;
                Self::from_rle(file_stem(path), &text)
            }
            PatternSource::PlaintextFile { path } => {
                let text = std::fs::read_to_string(path)?;
                Self::from_plaintext(file_stem(path), &text)
            }
        }
    }

    /// Parse a run-length encoded pattern. A `#N` line overrides `name`.
    pub fn from_rle(name: impl Into<String>, text: &str) -> Result<Self> {
        let mut name = name.into();
        let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

        let header = loop {
            match lines.next() {
                Some(line) if line.starts_with('#') => {
                    if let Some(n) = line.strip_prefix("#N") {
                        name = n.trim().to_string();
                    }
                }
                Some(line) => break line,
                None => return Err(Error::Pattern("missing RLE header".to_string())),
            }
        };
        let (width, height) = parse_rle_header(header)?;

        let mut cells = Vec::new();
        let (mut x, mut y) = (0i64, 0i64);
        let mut run: Option<i64> = None;

        'body: for line in lines {
            for ch in line.chars() {
                match ch {
                    '0'..='9' => {
                        let digit = i64::from(ch as u8 - b'0');
                        let next = run
                            .unwrap_or(0)
                            .checked_mul(10)
                            .and_then(|n| n.checked_add(digit))
                            .ok_or_else(|| Error::Pattern("run count overflow".to_string()))?;
                        run = Some(next);
                    }
                    'b' | '.' => {
                        x = advance(x, run.take().unwrap_or(1))?;
                        if x > width {
                            return Err(outside_header(x, y, width, height));
                        }
                    }
                    'o' => {
                        let end = advance(x, run.take().unwrap_or(1))?;
                        if end > width || y >= height {
                            return Err(outside_header(end, y, width, height));
                        }
                        cells.extend((x..end).map(|cx| Cell::new(cx, y)));
                        x = end;
                    }
                    '$' => {
                        y = advance(y, run.take().unwrap_or(1))?;
                        if y > height {
                            return Err(outside_header(x, y, width, height));
                        }
                        x = 0;
                    }
                    '!' => break 'body,
                    c if c.is_whitespace() => {}
                    c => {
                        return Err(Error::Pattern(format!("unexpected RLE symbol '{}'", c)));
                    }
                }
            }
        }

        debug!(pattern = %name, cells = cells.len(), "Parsed RLE pattern");
        Ok(Self::centered(name, cells))
    }

    /// Parse a plain-text pattern (`O` or `*` alive, `.` dead, `!` comments)
    pub fn from_plaintext(name: impl Into<String>, text: &str) -> Result<Self> {
        let mut name = name.into();
        let mut cells = Vec::new();
        let mut y = 0i64;

        for line in text.lines() {
            if let Some(comment) = line.strip_prefix('!') {
                if let Some(n) = comment.strip_prefix("Name:") {
                    name = n.trim().to_string();
                }
                continue;
            }
            for (x, ch) in line.trim_end().chars().enumerate() {
                match ch {
                    'O' | '*' => {
                        let x = i64::try_from(x)
                            .map_err(|_| Error::Pattern("line too long".to_string()))?;
                        cells.push(Cell::new(x, y));
                    }
                    '.' => {}
                    c => {
                        return Err(Error::Pattern(format!(
                            "unexpected plaintext symbol '{}'",
                            c
                        )));
                    }
                }
            }
            y = advance(y, 1)?;
        }

        debug!(pattern = %name, cells = cells.len(), "Parsed plaintext pattern");
        Ok(Self::centered(name, cells))
    }

    /// Absolute positions, `relative - center`
    pub fn absolute_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().map(move |&c| c - self.center)
    }

    /// Clear `alive` and fill it with this pattern
    pub fn seed(&self, alive: &mut AliveSet) {
        alive.clear();
        alive.extend(self.absolute_cells());
    }
}

fn bounding_center(cells: &[Cell]) -> Cell {
    let Some(first) = cells.first() else {
        return Cell::ORIGIN;
    };
    let (min, max) = cells.iter().fold((*first, *first), |(min, max), c| {
        (
            Cell::new(min.x.min(c.x), min.y.min(c.y)),
            Cell::new(max.x.max(c.x), max.y.max(c.y)),
        )
    });
    let mid = |a: i64, b: i64| ((a as i128 + b as i128).div_euclid(2)) as i64;
    Cell::new(mid(min.x, max.x), mid(min.y, max.y))
}

fn advance(pos: i64, by: i64) -> Result<i64> {
    pos.checked_add(by)
        .ok_or_else(|| Error::Pattern("pattern exceeds coordinate range".to_string()))
}

fn outside_header(x: i64, y: i64, width: i64, height: i64) -> Error {
    Error::Pattern(format!(
        "RLE body reaches ({}, {}) outside the declared {}x{} area",
        x, y, width, height
    ))
}

/// Declared `(width, height)` of an RLE header line
fn parse_rle_header(header: &str) -> Result<(i64, i64)> {
    let mut width = None;
    let mut height = None;

    for field in header.split(',') {
        let Some((key, value)) = field.split_once('=') else {
            return Err(Error::Pattern(format!("malformed RLE header: {}", header)));
        };
        let value = value.trim();
        match key.trim() {
            key @ ("x" | "y") => {
                let size = value
                    .parse::<u32>()
                    .map_err(|_| Error::Pattern(format!("invalid RLE size: {}", value)))?;
                if key == "x" {
                    width = Some(i64::from(size));
                } else {
                    height = Some(i64::from(size));
                }
            }
            "rule" => {
                let rule = value.to_ascii_uppercase();
                if rule != "B3/S23" && rule != "23/3" {
                    return Err(Error::Pattern(format!("unsupported rule: {}", value)));
                }
            }
            _ => {}
        }
    }

    match (width, height) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(Error::Pattern(format!("malformed RLE header: {}", header))),
    }
}

fn file_stem(path: &std::path::Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "pattern".to_string())
}
