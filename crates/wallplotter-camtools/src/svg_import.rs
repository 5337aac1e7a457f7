//! SVG Import
//!
//! Extracts `<path d="...">` elements from an SVG document and turns them
//! into continuous [`CurvePath`]s. Every move-to starts a new curve, so a
//! path element with disconnected pieces yields several curves.
//!
//! Supported path commands: `M L H V C S Q T A Z`, absolute and relative.
//! Transforms, styles and non-path shapes are ignored.

use crate::curve::{CurvePath, CurveSegment};
use lyon::geom::{point, vector, Angle, ArcFlags, SvgArc};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, info};
use wallplotter_core::{FileFormatError, Result, SourcePoint};

/// The `viewBox` attribute of the root element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

/// Curves imported from one SVG document. Every curve has at least one
/// segment.
#[derive(Debug, Clone, Default)]
pub struct SvgDocument {
    pub view_box: Option<ViewBox>,
    pub curves: Vec<CurvePath>,
}

struct Patterns {
    svg: Regex,
    view_box: Regex,
    path: Regex,
    d: Regex,
}

fn patterns() -> std::result::Result<&'static Patterns, FileFormatError> {
    static PATTERNS: OnceLock<std::result::Result<Patterns, String>> = OnceLock::new();
    PATTERNS
        .get_or_init(|| {
            let build = |re: &str| Regex::new(re).map_err(|e| e.to_string());
            Ok(Patterns {
                svg: build(r"<svg[\s>]")?,
                view_box: build(r#"viewBox\s*=\s*["']([^"']+)["']"#)?,
                path: build(r"<path\s([^>]+)>")?,
                d: build(r#"(?:^|\s)d\s*=\s*["']([^"']*)["']"#)?,
            })
        })
        .as_ref()
        .map_err(|e| FileFormatError::SvgParse(format!("invalid pattern: {e}")))
}

/// Read and parse an SVG file.
pub fn load_svg(path: &Path) -> Result<SvgDocument> {
    info!(file = %path.display(), "Parsing SVG file");
    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Err(FileFormatError::EmptyFile(path.display().to_string()).into());
    }
    let document = parse_svg(&content)?;
    info!(
        file = %path.display(),
        curves = document.curves.len(),
        "Parsing SVG file - done"
    );
    Ok(document)
}

/// Parse SVG text into continuous curves.
pub fn parse_svg(content: &str) -> std::result::Result<SvgDocument, FileFormatError> {
    let patterns = patterns()?;
    if !patterns.svg.is_match(content) {
        return Err(FileFormatError::SvgParse(
            "document has no <svg> element".to_string(),
        ));
    }

    let view_box = patterns
        .view_box
        .captures(content)
        .map(|caps| parse_view_box(&caps[1]))
        .transpose()?;

    let mut curves = Vec::new();
    for (index, cap) in patterns.path.captures_iter(content).enumerate() {
        let Some(d) = patterns.d.captures(&cap[1]) else {
            debug!(element = index, "Skipping <path> without d attribute");
            continue;
        };
        let parsed = parse_path_data(&d[1]).map_err(|e| match e {
            FileFormatError::SvgParse(msg) => {
                FileFormatError::SvgParse(format!("path element {}: {}", index + 1, msg))
            }
            other => other,
        })?;
        debug!(element = index, curves = parsed.len(), "Parsed path element");
        curves.extend(parsed);
    }

    Ok(SvgDocument { view_box, curves })
}

fn parse_view_box(value: &str) -> std::result::Result<ViewBox, FileFormatError> {
    let numbers: Vec<f64> = value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| FileFormatError::SvgParse(format!("invalid viewBox '{value}'")))?;

    match numbers.as_slice() {
        [min_x, min_y, width, height] => Ok(ViewBox {
            min_x: *min_x,
            min_y: *min_y,
            width: *width,
            height: *height,
        }),
        _ => Err(FileFormatError::SvgParse(format!(
            "viewBox needs 4 numbers, got '{value}'"
        ))),
    }
}

/// Lexer over path data. Numbers may be glued together (`10-5`, `.5.5`,
/// `1e-3`) and arc flags may be written without separators.
struct PathLexer<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> PathLexer<'a> {
    fn new(data: &'a str) -> Self {
        Self {
            bytes: data.as_bytes(),
            pos: 0,
        }
    }

    fn skip_separators(&mut self) {
        while let Some(&b) = self.bytes.get(self.pos) {
            if b.is_ascii_whitespace() || b == b',' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_separators();
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn number(&mut self) -> std::result::Result<f64, FileFormatError> {
        self.skip_separators();
        let start = self.pos;
        let mut seen_dot = false;
        let mut seen_exp = false;

        if matches!(self.bytes.get(self.pos), Some(b'-' | b'+')) {
            self.pos += 1;
        }
        while let Some(&b) = self.bytes.get(self.pos) {
            match b {
                b'0'..=b'9' => self.pos += 1,
                b'.' if !seen_dot && !seen_exp => {
                    seen_dot = true;
                    self.pos += 1;
                }
                b'e' | b'E' if !seen_exp => {
                    seen_exp = true;
                    self.pos += 1;
                    if matches!(self.bytes.get(self.pos), Some(b'-' | b'+')) {
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }

        let text = std::str::from_utf8(&self.bytes[start..self.pos]).unwrap_or_default();
        text.parse::<f64>().map_err(|_| {
            FileFormatError::SvgParse(format!("expected a number at offset {start}"))
        })
    }

    fn flag(&mut self) -> std::result::Result<bool, FileFormatError> {
        match self.peek() {
            Some(b'0') => {
                self.pos += 1;
                Ok(false)
            }
            Some(b'1') => {
                self.pos += 1;
                Ok(true)
            }
            _ => Err(FileFormatError::SvgParse(format!(
                "expected an arc flag at offset {}",
                self.pos
            ))),
        }
    }

    fn pair(&mut self) -> std::result::Result<(f64, f64), FileFormatError> {
        Ok((self.number()?, self.number()?))
    }
}

/// Builder state while walking path data.
struct Walker {
    curves: Vec<CurvePath>,
    current: Option<CurvePath>,
    cursor: SourcePoint,
    subpath_start: SourcePoint,
    /// Second control point of the previous cubic, for `S`
    last_cubic_ctrl: Option<SourcePoint>,
    /// Control point of the previous quadratic, for `T`
    last_quad_ctrl: Option<SourcePoint>,
}

impl Walker {
    fn new() -> Self {
        let origin = SourcePoint::new(0.0, 0.0);
        Self {
            curves: Vec::new(),
            current: None,
            cursor: origin,
            subpath_start: origin,
            last_cubic_ctrl: None,
            last_quad_ctrl: None,
        }
    }

    fn resolve(&self, relative: bool, x: f64, y: f64) -> SourcePoint {
        if relative {
            SourcePoint::new(self.cursor.x + x, self.cursor.y + y)
        } else {
            SourcePoint::new(x, y)
        }
    }

    fn finish_curve(&mut self) {
        if let Some(curve) = self.current.take() {
            if !curve.is_empty() {
                self.curves.push(curve);
            }
        }
    }

    fn move_to(&mut self, to: SourcePoint) {
        self.finish_curve();
        self.current = Some(CurvePath::new(to));
        self.cursor = to;
        self.subpath_start = to;
    }

    fn push(&mut self, segment: CurveSegment, to: SourcePoint) {
        let cursor = self.cursor;
        self.current
            .get_or_insert_with(|| CurvePath::new(cursor))
            .push(segment);
        self.cursor = to;
    }

    fn line_to(&mut self, to: SourcePoint) {
        self.push(CurveSegment::line(self.cursor, to), to);
        self.last_cubic_ctrl = None;
        self.last_quad_ctrl = None;
    }

    fn cubic_to(&mut self, ctrl1: SourcePoint, ctrl2: SourcePoint, to: SourcePoint) {
        self.push(CurveSegment::cubic(self.cursor, ctrl1, ctrl2, to), to);
        self.last_cubic_ctrl = Some(ctrl2);
        self.last_quad_ctrl = None;
    }

    fn quadratic_to(&mut self, ctrl: SourcePoint, to: SourcePoint) {
        self.push(CurveSegment::quadratic(self.cursor, ctrl, to), to);
        self.last_quad_ctrl = Some(ctrl);
        self.last_cubic_ctrl = None;
    }

    fn reflect(&self, ctrl: Option<SourcePoint>) -> SourcePoint {
        match ctrl {
            Some(c) => SourcePoint::new(2.0 * self.cursor.x - c.x, 2.0 * self.cursor.y - c.y),
            None => self.cursor,
        }
    }

    fn arc_to(
        &mut self,
        radii: (f64, f64),
        rotation_deg: f64,
        large: bool,
        sweep: bool,
        to: SourcePoint,
    ) {
        self.last_cubic_ctrl = None;
        self.last_quad_ctrl = None;
        if to == self.cursor {
            return;
        }
        let arc = SvgArc {
            from: point(self.cursor.x, self.cursor.y),
            to: point(to.x, to.y),
            radii: vector(radii.0.abs(), radii.1.abs()),
            x_rotation: Angle::degrees(rotation_deg),
            flags: ArcFlags {
                large_arc: large,
                sweep,
            },
        };
        self.push(CurveSegment::svg_arc(arc), to);
    }

    fn close(&mut self) {
        if self.cursor != self.subpath_start {
            self.line_to(self.subpath_start);
        }
        self.cursor = self.subpath_start;
        self.last_cubic_ctrl = None;
        self.last_quad_ctrl = None;
    }
}

/// Parse the `d` attribute of one path element.
pub fn parse_path_data(data: &str) -> std::result::Result<Vec<CurvePath>, FileFormatError> {
    let mut lexer = PathLexer::new(data);
    let mut walker = Walker::new();
    let mut command: Option<u8> = None;

    while let Some(next) = lexer.peek() {
        let cmd = if next.is_ascii_alphabetic() {
            lexer.bump();
            next
        } else {
            // Repeated parameters reuse the previous command; after a
            // move-to they are implicit line-tos.
            match command {
                Some(b'M') => b'L',
                Some(b'm') => b'l',
                Some(c) if !matches!(c, b'Z' | b'z') => c,
                _ => {
                    return Err(FileFormatError::SvgParse(format!(
                        "unexpected '{}' at offset {}",
                        next as char, lexer.pos
                    )))
                }
            }
        };
        let relative = cmd.is_ascii_lowercase();

        match cmd.to_ascii_uppercase() {
            b'M' => {
                let (x, y) = lexer.pair()?;
                let to = walker.resolve(relative, x, y);
                walker.move_to(to);
            }
            b'L' => {
                let (x, y) = lexer.pair()?;
                let to = walker.resolve(relative, x, y);
                walker.line_to(to);
            }
            b'H' => {
                let x = lexer.number()?;
                let x = if relative { walker.cursor.x + x } else { x };
                walker.line_to(SourcePoint::new(x, walker.cursor.y));
            }
            b'V' => {
                let y = lexer.number()?;
                let y = if relative { walker.cursor.y + y } else { y };
                walker.line_to(SourcePoint::new(walker.cursor.x, y));
            }
            b'C' => {
                let (x1, y1) = lexer.pair()?;
                let (x2, y2) = lexer.pair()?;
                let (x, y) = lexer.pair()?;
                let c1 = walker.resolve(relative, x1, y1);
                let c2 = walker.resolve(relative, x2, y2);
                let to = walker.resolve(relative, x, y);
                walker.cubic_to(c1, c2, to);
            }
            b'S' => {
                let (x2, y2) = lexer.pair()?;
                let (x, y) = lexer.pair()?;
                let c1 = walker.reflect(walker.last_cubic_ctrl);
                let c2 = walker.resolve(relative, x2, y2);
                let to = walker.resolve(relative, x, y);
                walker.cubic_to(c1, c2, to);
            }
            b'Q' => {
                let (x1, y1) = lexer.pair()?;
                let (x, y) = lexer.pair()?;
                let c = walker.resolve(relative, x1, y1);
                let to = walker.resolve(relative, x, y);
                walker.quadratic_to(c, to);
            }
            b'T' => {
                let (x, y) = lexer.pair()?;
                let c = walker.reflect(walker.last_quad_ctrl);
                let to = walker.resolve(relative, x, y);
                walker.quadratic_to(c, to);
            }
            b'A' => {
                let radii = lexer.pair()?;
                let rotation = lexer.number()?;
                let large = lexer.flag()?;
                let sweep = lexer.flag()?;
                let (x, y) = lexer.pair()?;
                let to = walker.resolve(relative, x, y);
                walker.arc_to(radii, rotation, large, sweep, to);
            }
            b'Z' => walker.close(),
            _ => {
                return Err(FileFormatError::SvgParse(format!(
                    "unsupported path command '{}'",
                    cmd as char
                )))
            }
        }

        command = Some(cmd);
    }

    walker.finish_curve();
    Ok(walker.curves)
}
