//! Writing fixture files for the polygon tool.
//!
//! A fixture file is line oriented:
//!
//! ```text
//! # comment lines
//! polygon <name> <x0> <y0> ... <xn> <yn>
//!
//! intersection <result> <a> <b>
//!
//! setcol <name> <r> <g> <b>
//!
//! draw <file.png> <name...>
//! ```
//!
//! Coordinates and colour channels are written with exactly 3 decimal places.
use crate::*;
use crate::polygon::check_name;
use chrono::{DateTime, Utc};
use std::{fmt, io::Write};

/// Keywords understood by the polygon tool.
pub mod kw {
    pub const POLYGON: &str = "polygon";
    pub const INTERSECTION: &str = "intersection";
    pub const UNION: &str = "union";
    pub const SETCOL: &str = "setcol";
    pub const BBOX: &str = "bbox";
    pub const DRAW: &str = "draw";
}

/// Write a single `polygon` line followed by a blank line.
pub fn write_polygon<W, I>(output: &mut W, name: &str, points: I) -> std::io::Result<()>
where
    W: Write + ?Sized,
    I: IntoIterator<Item = Point2>,
{
    write!(output, "{} {}", kw::POLYGON, name)?;
    for [x, y] in points {
        write!(output, " {:.3} {:.3}", x, y)?;
    }
    output.write_all(b"\n\n")
}

/// Write the provenance comment block followed by a blank line.
///
/// Fails with [`std::io::ErrorKind::InvalidInput`] if the generator or description
/// contains a line break.
pub fn write_header<W: Write + ?Sized>(output: &mut W, header: &Header) -> std::io::Result<()> {
    if let Err(e) = header.check() {
        return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
    }
    writeln!(
        output,
        "# test file automatically created by {} ({})",
        header.generator,
        header.created.format("%Y-%m-%d %H:%M:%S%.6f")
    )?;
    writeln!(output, "# description: {}", header.description)?;
    writeln!(output, "# config: n = {}", header.count)?;
    writeln!(output)
}

/// Generation metadata recorded at the top of a fixture file.
///
/// Only informational; the polygon tool ignores comments.
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    pub generator: String,
    pub created: DateTime<Utc>,
    pub description: String,
    /// Number of points used for the polygons in the file.
    pub count: usize,
}

impl Header {
    /// Header stamped with this crate as generator and the current time.
    pub fn new(description: impl Into<String>, count: usize) -> Self {
        Self {
            generator: concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION")).into(),
            created: Utc::now(),
            description: description.into(),
            count,
        }
    }

    /// Both text fields must fit on a comment line.
    pub fn check(&self) -> Result<()> {
        check_comment(&self.generator)?;
        check_comment(&self.description)
    }
}

/// Text written after `#` must not contain a line break.
fn check_comment(text: &str) -> Result<()> {
    if text.contains(&['\n', '\r'][..]) {
        Err(Error::MultilineComment(text.to_string()))
    } else {
        Ok(())
    }
}

/// A single fixture command.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Comment(String),
    Polygon(PolygonRecord),
    Intersection { result: String, a: String, b: String },
    Union { result: String, a: String, b: String },
    SetCol { name: String, color: Rgb },
    Bbox { result: String, names: Vec<String> },
    Draw { file: String, names: Vec<String> },
}

impl Command {
    pub fn intersection(result: &str, a: &str, b: &str) -> Self {
        Command::Intersection {
            result: result.into(),
            a: a.into(),
            b: b.into(),
        }
    }

    pub fn union(result: &str, a: &str, b: &str) -> Self {
        Command::Union {
            result: result.into(),
            a: a.into(),
            b: b.into(),
        }
    }

    pub fn setcol(name: &str, color: Rgb) -> Self {
        Command::SetCol {
            name: name.into(),
            color,
        }
    }

    pub fn bbox<'a, I: IntoIterator<Item = &'a str>>(result: &str, names: I) -> Self {
        Command::Bbox {
            result: result.into(),
            names: names.into_iter().map(String::from).collect(),
        }
    }

    pub fn draw<'a, I: IntoIterator<Item = &'a str>>(file: &str, names: I) -> Self {
        Command::Draw {
            file: file.into(),
            names: names.into_iter().map(String::from).collect(),
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Command::Comment(_) => "#",
            Command::Polygon(_) => kw::POLYGON,
            Command::Intersection { .. } => kw::INTERSECTION,
            Command::Union { .. } => kw::UNION,
            Command::SetCol { .. } => kw::SETCOL,
            Command::Bbox { .. } => kw::BBOX,
            Command::Draw { .. } => kw::DRAW,
        }
    }

    /// The polygon name this command introduces, if any.
    pub fn defines(&self) -> Option<&str> {
        match self {
            Command::Polygon(p) => Some(p.name()),
            Command::Intersection { result, .. }
            | Command::Union { result, .. }
            | Command::Bbox { result, .. } => Some(result.as_str()),
            _ => None,
        }
    }

    /// The polygon names this command requires to be already defined.
    pub fn references(&self) -> Vec<&str> {
        match self {
            Command::Comment(_) | Command::Polygon(_) => Vec::new(),
            Command::Intersection { a, b, .. } | Command::Union { a, b, .. } => {
                vec![a.as_str(), b.as_str()]
            }
            Command::SetCol { name, .. } => vec![name.as_str()],
            Command::Bbox { names, .. } | Command::Draw { names, .. } => {
                names.iter().map(String::as_str).collect()
            }
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fn list(f: &mut fmt::Formatter, names: &[String]) -> fmt::Result {
            names.iter().try_for_each(|n| write!(f, " {}", n))
        }

        match self {
            Command::Comment(c) => write!(f, "# {}", c),
            Command::Polygon(p) => {
                write!(f, "{} {}", kw::POLYGON, p.name())?;
                p.iter()
                    .try_for_each(|[x, y]| write!(f, " {:.3} {:.3}", x, y))
            }
            Command::Intersection { result, a, b } => {
                write!(f, "{} {} {} {}", kw::INTERSECTION, result, a, b)
            }
            Command::Union { result, a, b } => write!(f, "{} {} {} {}", kw::UNION, result, a, b),
            Command::SetCol { name, color } => write!(f, "{} {} {}", kw::SETCOL, name, color),
            Command::Bbox { result, names } => {
                write!(f, "{} {}", kw::BBOX, result)?;
                list(f, names)
            }
            Command::Draw { file, names } => {
                write!(f, "{} {}", kw::DRAW, file)?;
                list(f, names)
            }
        }
    }
}

/// Writes commands to an output, checking names as it goes.
///
/// Each name may be introduced once, and must be introduced before it is referenced.
pub struct FixtureWriter<W> {
    out: W,
    defined: HashSet<String>,
}

impl<W: Write> FixtureWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            defined: HashSet::default(),
        }
    }

    pub fn header(&mut self, header: &Header) -> Result<()> {
        header.check()?;
        write_header(&mut self.out, header)?;
        Ok(())
    }

    /// Declare a polygon directly from a point sequence.
    pub fn polygon<I>(&mut self, name: &str, points: I) -> Result<()>
    where
        I: IntoIterator<Item = Point2>,
    {
        let name = check_name(name.to_string())?;
        self.define(&name)?;
        write_polygon(&mut self.out, &name, points)?;
        Ok(())
    }

    pub fn command(&mut self, cmd: &Command) -> Result<()> {
        log::debug!("writing {} command", cmd.keyword());

        for name in cmd.references() {
            if !self.defined.contains(name) {
                return Err(Error::UndefinedId(name.to_string()));
            }
        }

        match cmd {
            Command::Comment(c) => {
                check_comment(c)?;
                writeln!(self.out, "# {}", c)?;
            }
            Command::Polygon(p) => {
                self.define(p.name())?;
                write_polygon(&mut self.out, p.name(), p.iter())?;
            }
            Command::Draw { file, .. } => {
                check_name(file.clone())?;
                writeln!(self.out, "{}\n", cmd)?;
            }
            _ => {
                if let Some(name) = cmd.defines() {
                    check_name(name.to_string())?;
                    self.define(name)?;
                }
                writeln!(self.out, "{}\n", cmd)?;
            }
        }

        Ok(())
    }

    fn define(&mut self, name: &str) -> Result<()> {
        if self.defined.insert(name.to_string()) {
            Ok(())
        } else {
            Err(Error::DuplicateName(name.to_string()))
        }
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// A complete fixture file: header then commands.
#[derive(Clone, Debug, PartialEq)]
pub struct Fixture {
    pub header: Header,
    pub commands: Vec<Command>,
}

impl Fixture {
    pub fn new(header: Header) -> Self {
        Self {
            header,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, cmd: Command) -> &mut Self {
        self.commands.push(cmd);
        self
    }

    pub fn write_to<W: Write>(&self, out: W) -> Result<W> {
        let mut w = FixtureWriter::new(out);
        w.header(&self.header)?;
        for cmd in &self.commands {
            w.command(cmd)?;
        }
        w.flush()?;
        Ok(w.into_inner())
    }

    /// Render into an in-memory string.
    pub fn to_text(&self) -> Result<String> {
        let buf = self.write_to(Vec::new())?;
        // only ever written from `str`s
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn header(count: usize) -> Header {
        Header {
            generator: "fixture-tests".into(),
            created: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
            description: "a circle and a small rotation thereof".into(),
            count,
        }
    }

    fn polygon_text(name: &str, points: &[Point2]) -> String {
        let mut buf = Vec::new();
        write_polygon(&mut buf, name, points.iter().copied()).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn polygon_line_format() {
        let s = polygon_text("sq", &[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.12345, -2.5]]);
        assert_eq!(
            s,
            "polygon sq 0.000 0.000 1.000 0.000 1.000 1.000 0.123 -2.500\n\n"
        );
    }

    #[test]
    fn empty_polygon_line() {
        assert_eq!(polygon_text("nothing", &[]), "polygon nothing\n\n");
    }

    #[quickcheck]
    fn polygon_parses_back(pts: Vec<(i32, i32)>) -> bool {
        let pts = pts
            .into_iter()
            .map(|(x, y)| [x as f64 / 997.0, y as f64 / 991.0])
            .collect::<Vec<_>>();
        let s = polygon_text("p", &pts);
        let mut tokens = s.split_whitespace();
        if tokens.next() != Some("polygon") || tokens.next() != Some("p") {
            return false;
        }
        let nums = tokens.map(|t| t.parse::<f64>().unwrap()).collect::<Vec<_>>();
        nums.len() == pts.len() * 2
            && nums
                .chunks(2)
                .zip(&pts)
                .all(|(n, p)| {
                    let [x, y] = round_to(*p, 3);
                    (n[0] - x).abs() < 1e-6 && (n[1] - y).abs() < 1e-6
                })
    }

    #[test]
    fn header_lines() {
        let mut buf = Vec::new();
        write_header(&mut buf, &header(10000)).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert_eq!(
            s,
            "# test file automatically created by fixture-tests (2024-03-01 12:30:00.000000)\n\
             # description: a circle and a small rotation thereof\n\
             # config: n = 10000\n\n"
        );
    }

    #[test]
    fn header_count_is_per_fixture() {
        let a = Fixture::new(header(10)).to_text().unwrap();
        let b = Fixture::new(header(20)).to_text().unwrap();
        assert!(a.contains("# config: n = 10\n"));
        assert!(b.contains("# config: n = 20\n"));
    }

    #[test]
    fn command_rendering() {
        let c = Rgb::new(1.0, 0.0, 0.5).unwrap();
        assert_eq!(Command::setcol("a", c).to_string(), "setcol a 1.000 0.000 0.500");
        assert_eq!(
            Command::intersection("ab", "a", "b").to_string(),
            "intersection ab a b"
        );
        assert_eq!(Command::union("u", "a", "b").to_string(), "union u a b");
        assert_eq!(Command::bbox("box", ["a", "b"]).to_string(), "bbox box a b");
        assert_eq!(
            Command::draw("out.png", ["a", "ab"]).to_string(),
            "draw out.png a ab"
        );
        assert_eq!(Command::Comment("hi".into()).to_string(), "# hi");
    }

    #[test]
    fn polygon_command_matches_write_polygon() {
        let rec = PolygonRecord::new("tri", make_points(3, 0.1, [1.0, 1.0])).unwrap();
        let line = format!("{}\n\n", Command::Polygon(rec.clone()));
        assert_eq!(line, polygon_text("tri", rec.pts()));
    }

    #[test]
    fn duplicate_names_rejected() {
        let mut w = FixtureWriter::new(Vec::new());
        w.polygon("circ", make_points(3, 0.0, [0.0, 0.0])).unwrap();
        assert!(matches!(
            w.polygon("circ", make_points(3, 0.0, [0.0, 0.0])),
            Err(Error::DuplicateName(n)) if n == "circ"
        ));
        assert!(matches!(
            w.command(&Command::intersection("circ", "circ", "circ")),
            Err(Error::DuplicateName(_))
        ));
    }

    #[test]
    fn undefined_references_rejected() {
        let mut w = FixtureWriter::new(Vec::new());
        w.polygon("a", make_points(3, 0.0, [0.0, 0.0])).unwrap();
        assert!(matches!(
            w.command(&Command::intersection("ab", "a", "b")),
            Err(Error::UndefinedId(n)) if n == "b"
        ));
        assert!(matches!(
            w.command(&Command::draw("x.png", ["zzz"])),
            Err(Error::UndefinedId(_))
        ));
        // nothing written for the failed commands
        let s = String::from_utf8(w.into_inner()).unwrap();
        assert_eq!(s.lines().filter(|l| !l.is_empty()).count(), 1);
    }

    #[test]
    fn whole_fixture() {
        let mut f = Fixture::new(header(4));
        f.push(Command::Polygon(
            PolygonRecord::new("a", make_points(4, 0.0, [0.0, 0.0])).unwrap(),
        ))
        .push(Command::Polygon(
            PolygonRecord::new("b", make_points(4, 0.0, [1.0, 0.0])).unwrap(),
        ))
        .push(Command::intersection("ab", "a", "b"))
        .push(Command::setcol("ab", Rgb::new(1.0, 0.0, 0.0).unwrap()))
        .push(Command::draw("ab.png", ["a", "b", "ab"]));

        let s = f.to_text().unwrap();
        let body = s.lines().skip(4).collect::<Vec<_>>();
        assert_eq!(
            body,
            [
                "polygon a 1.000 0.000 0.000 1.000 -1.000 0.000 -0.000 -1.000",
                "",
                "polygon b 2.000 0.000 1.000 1.000 0.000 0.000 1.000 -1.000",
                "",
                "intersection ab a b",
                "",
                "setcol ab 1.000 0.000 0.000",
                "",
                "draw ab.png a b ab",
                "",
            ]
        );
    }

    #[test]
    fn identical_parameters_identical_polygons() {
        let write = || {
            let mut w = FixtureWriter::new(Vec::new());
            w.polygon("circ", make_points(500, 0.0, [0.0, 0.0]).scaled())
                .unwrap();
            w.polygon("circ-rot", make_points(500, std::f64::consts::PI / 2000.0, [0.0, 0.0]).scaled())
                .unwrap();
            w.into_inner()
        };
        assert_eq!(write(), write());
    }

    #[test]
    fn comments_stay_on_one_line() {
        let mut h = header(3);
        h.description = "x\npolygon injected 0 0".into();
        let err = Fixture::new(h.clone()).to_text().unwrap_err();
        assert!(matches!(err, Error::MultilineComment(t) if t.starts_with("x\n")));

        let mut buf = Vec::new();
        let err = write_header(&mut buf, &h).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
        assert!(buf.is_empty());

        let mut f = Fixture::new(header(3));
        f.push(Command::Comment("c\r\nbogus line".into()));
        assert!(matches!(f.to_text(), Err(Error::MultilineComment(_))));

        let mut f = Fixture::new(header(3));
        f.push(Command::Comment("one line".into()));
        assert!(f.to_text().unwrap().ends_with("\n# one line\n"));
    }
}
