//! HTML/SVG dump of the simplification process
//!
//! One table row is written per merge: the facets facing the same way as the
//! vertex being kept, the edge about to collapse, and the same view after the
//! merge. Only the x/y plane is drawn. Write failures are logged once and
//! disable further output; they never interrupt simplification.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use facetmesh_core::{same_orientation, Drawable, Error, Mesh, Result, Vector3f};
use tracing::warn;

const SVG_SIZE: f32 = 500.0;
const HEADER: &str = "<html>\n<body>\n";
const FOOTER: &str = "</body>\n</html>\n";

/// Maps mesh x/y onto the SVG canvas, y pointing up
#[derive(Debug, Clone, Copy)]
struct Projection {
    min_x: f32,
    min_y: f32,
    scale: f32,
}

impl Projection {
    fn fit(mesh: &Mesh) -> Self {
        let (min, max) = mesh.bounding_box();
        let extent = (max.x - min.x).max(max.y - min.y);
        let scale = if extent > 0.0 { SVG_SIZE / extent } else { 1.0 };
        Self {
            min_x: min.x,
            min_y: min.y,
            scale,
        }
    }

    fn x(&self, x: f32) -> f32 {
        (x - self.min_x) * self.scale
    }

    fn y(&self, y: f32) -> f32 {
        SVG_SIZE - (y - self.min_y) * self.scale
    }
}

/// Scoped debug document; closed on [`DebugDump::finish`] or drop
pub struct DebugDump<W: Write> {
    out: Option<W>,
    operation: usize,
    projection: Option<Projection>,
    error: Option<io::Error>,
}

impl DebugDump<BufWriter<File>> {
    /// Open a dump file, truncating any existing one
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> DebugDump<W> {
    /// Start a dump document on `writer`
    pub fn new(mut writer: W) -> Result<Self> {
        writer.write_all(HEADER.as_bytes())?;
        Ok(Self {
            out: Some(writer),
            operation: 0,
            projection: None,
            error: None,
        })
    }

    /// Merge operations recorded so far
    pub fn operations(&self) -> usize {
        self.operation
    }

    pub fn begin_simplify(&mut self, mesh: &Mesh) {
        let projection = Projection::fit(mesh);
        self.projection = Some(projection);
        self.emit(|out| {
            write!(
                out,
                "<h2>Mesh Simplify</h2>\n<p>Starting with {} facets and {} vertexes.</p>\n<table>\n",
                mesh.facet_count(),
                mesh.vertex_count()
            )
        });
    }

    /// Row header and diagram before `end` is merged into `start`
    pub fn before_merge(&mut self, mesh: &Mesh, start: usize, end: usize) {
        let projection = self.projection(mesh);
        let operation = self.operation;
        self.operation += 1;
        self.emit(|out| {
            write!(
                out,
                "<tr><th>Operation {} Removing {}->{}</th>",
                operation, start, end
            )?;
            write_diagram(out, mesh, &projection, start, Some(end))
        });
    }

    /// Diagram after the merge, closing the row
    pub fn after_merge(&mut self, mesh: &Mesh, start: usize) {
        let projection = self.projection(mesh);
        self.emit(|out| {
            write_diagram(out, mesh, &projection, start, None)?;
            out.write_all(b"</tr>\n")
        });
    }

    pub fn end_simplify(&mut self) {
        self.emit(|out| out.write_all(b"</table>\n"));
    }

    /// Write the final mesh section, close the document and hand back the writer
    pub fn finish(mut self, mesh: &Mesh) -> Result<W> {
        let projection = self.projection(mesh);
        self.emit(|out| {
            write!(
                out,
                "<h2>Final mesh</h2>\n<p>Final mesh had {} facets and {} vertexes.</p>\n",
                mesh.facet_count(),
                mesh.vertex_count()
            )?;
            out.write_all(b"<p>Mesh of all facets with common normal</p>\n")?;
            write_svg_open(out)?;
            if let Some(first) = mesh.facets().first() {
                write_facets(out, mesh, &projection, first.normal())?;
            }
            out.write_all(b"</svg>\n")?;
            out.write_all(FOOTER.as_bytes())?;
            out.flush()
        });

        let out = self
            .out
            .take()
            .ok_or_else(|| Error::Algorithm("Debug dump already closed".to_string()))?;
        match self.error.take() {
            Some(e) => Err(Error::Io(e)),
            None => Ok(out),
        }
    }

    fn projection(&mut self, mesh: &Mesh) -> Projection {
        *self.projection.get_or_insert_with(|| Projection::fit(mesh))
    }

    fn emit(&mut self, write: impl FnOnce(&mut W) -> io::Result<()>) {
        if self.error.is_some() {
            return;
        }
        if let Some(out) = self.out.as_mut() {
            if let Err(e) = write(out) {
                warn!(error = %e, "Debug dump write failed, disabling dump");
                self.error = Some(e);
            }
        }
    }
}

impl<W: Write> Drop for DebugDump<W> {
    fn drop(&mut self) {
        if let Some(mut out) = self.out.take() {
            if self.error.is_none() {
                let _ = out.write_all(FOOTER.as_bytes());
            }
            let _ = out.flush();
        }
    }
}

fn write_svg_open<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "<svg width=\"{0}\" height=\"{0}\" xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\">",
        SVG_SIZE
    )
}

/// Lime polygons for each facet facing along `reference`, labelled by position
fn write_facets<W: Write>(
    out: &mut W,
    mesh: &Mesh,
    projection: &Projection,
    reference: &Vector3f,
) -> io::Result<()> {
    for (position, facet) in mesh.facets().iter().enumerate() {
        if !same_orientation(facet.normal(), reference) {
            continue;
        }
        let [a, b, c] = facet.corners();
        writeln!(
            out,
            "<polygon points=\"{:.1},{:.1} {:.1},{:.1} {:.1},{:.1}\" style=\"fill:lime;stroke:black;stroke-width:1\"/>",
            projection.x(a.x),
            projection.y(a.y),
            projection.x(b.x),
            projection.y(b.y),
            projection.x(c.x),
            projection.y(c.y)
        )?;
        let centroid = facet.centroid();
        writeln!(
            out,
            "<text x=\"{:.1}\" y=\"{:.1}\" fill=\"blue\">{}</text>",
            projection.x(centroid.x),
            projection.y(centroid.y),
            position
        )?;
    }
    Ok(())
}

fn write_diagram<W: Write>(
    out: &mut W,
    mesh: &Mesh,
    projection: &Projection,
    start: usize,
    end: Option<usize>,
) -> io::Result<()> {
    let Some(kept) = mesh.vertex(start) else {
        return Ok(());
    };

    out.write_all(b"<td>")?;
    write_svg_open(out)?;

    if let Some(reference) = kept.facets().first().and_then(|&id| mesh.facet(id)) {
        write_facets(out, mesh, projection, reference.normal())?;
    }

    let (sx, sy) = (projection.x(kept.position().x), projection.y(kept.position().y));
    if let Some(removed) = end.and_then(|e| mesh.vertex(e).map(|v| (e, v))) {
        let (index, vertex) = removed;
        let (ex, ey) = (projection.x(vertex.position().x), projection.y(vertex.position().y));
        writeln!(
            out,
            "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" style=\"stroke:red;stroke-width:5\"/>",
            sx, sy, ex, ey
        )?;
        writeln!(
            out,
            "<text x=\"{:.1}\" y=\"{:.1}\" fill=\"black\">{}</text>",
            ex + 5.0,
            ey + 5.0,
            index
        )?;
    }

    writeln!(
        out,
        "<circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"10\" fill=\"blue\"/>",
        sx, sy
    )?;
    writeln!(
        out,
        "<text x=\"{:.1}\" y=\"{:.1}\" fill=\"black\">{}</text>",
        sx + 10.0,
        sy + 5.0,
        start
    )?;
    out.write_all(b"</svg></td>")
}
