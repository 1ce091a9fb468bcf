use super::*;
use crate::fixture::{kw, Command, Fixture};
use nom::{
    bytes::complete::take_till1,
    character::complete::space0,
    multi::{many0, many1},
    number::complete::double,
    sequence::{preceded, tuple},
    IResult, Parser,
};

/// Write `fixture` to `path`, creating parent directories.
///
/// The fixture is rendered before the file is created, so a fixture which fails
/// name checks leaves nothing behind.
pub fn write_file(path: &Path, fixture: &Fixture) -> Result<()> {
    let text = fixture.to_text()?;
    let mut out = create(path)?;
    out.write_all(text.as_bytes())?;
    out.flush()?;
    log::info!(
        "wrote {} command(s) to {}",
        fixture.commands.len(),
        path.display()
    );
    Ok(())
}

/// Read the commands of a fixture file.
pub fn read_file(path: &Path) -> Result<Vec<Command>> {
    from_str(&fs::read_to_string(path)?)
}

/// Parse fixture text into commands. Comments and blank lines are skipped.
pub fn from_str(text: &str) -> Result<Vec<Command>> {
    text.lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'))
        .map(|(line, l)| command(l).map_err(|reason| Error::Syntax { line, reason }))
        .collect()
}

/// The polygon declaration lines of a fixture file.
///
/// This is the deterministic part of a file; the header carries a timestamp.
pub fn polygon_lines(text: &str) -> Vec<&str> {
    text.lines()
        .filter(|l| l.split_whitespace().next() == Some(kw::POLYGON))
        .collect()
}

type Res<'a, O> = IResult<&'a str, O, ()>;

fn token(i: &str) -> Res<&str> {
    preceded(space0, take_till1(char::is_whitespace))(i)
}

fn number(i: &str) -> Res<f64> {
    preceded(space0, double)(i)
}

/// Run `parser` over the whole of `i`.
fn all<'a, O, P>(mut parser: P, i: &'a str, what: &str) -> std::result::Result<O, String>
where
    P: Parser<&'a str, O, ()>,
{
    match parser.parse(i) {
        Ok((rest, o)) if rest.trim().is_empty() => Ok(o),
        _ => Err(format!("expecting {}", what)),
    }
}

fn command(line: &str) -> std::result::Result<Command, String> {
    let (args, keyword) = token(line).map_err(|_| "missing command".to_string())?;

    let cmd = match keyword {
        kw::POLYGON => {
            let (name, coords) = all(tuple((token, many0(number))), args, "a name and coordinates")?;
            if coords.len() % 2 != 0 {
                return Err(format!("odd number of coordinates for polygon {}", name));
            }
            let points = coords.chunks(2).map(|c| [c[0], c[1]]);
            Command::Polygon(PolygonRecord::new(name, points).map_err(|e| e.to_string())?)
        }
        kw::INTERSECTION | kw::UNION => {
            let (result, a, b) = all(tuple((token, token, token)), args, "three names")?;
            if keyword == kw::UNION {
                Command::union(result, a, b)
            } else {
                Command::intersection(result, a, b)
            }
        }
        kw::SETCOL => {
            let (name, r, g, b) = all(
                tuple((token, number, number, number)),
                args,
                "a name and three colour channels",
            )?;
            Command::setcol(name, Rgb::new(r, g, b).map_err(|e| e.to_string())?)
        }
        kw::BBOX => {
            let (result, names) = all(tuple((token, many1(token))), args, "a result and names")?;
            Command::bbox(result, names)
        }
        kw::DRAW => {
            let (file, names) = all(tuple((token, many1(token))), args, "a file and names")?;
            Command::draw(file, names)
        }
        x => return Err(format!("unrecognized command {:?}", x)),
    };

    Ok(cmd)
}
