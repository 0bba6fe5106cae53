//! Headless board renderer producing SVG snapshots.

use std::f32::consts::FRAC_PI_4;

use gridbox_core::{BoardRenderer, GridLayout, PlacedBox, Point3, Rgb};
use xmlwriter::{Indent, Options, XmlWriter};

pub const CANVAS_SIZE: f32 = 800.0;
const BACKGROUND: Rgb = Rgb(30, 30, 30);
const FOREGROUND: Rgb = Rgb(255, 255, 255);
const FONT_SIZE: f32 = 20.0;

/// Turn of the board about the vertical axis.
const YAW: f32 = FRAC_PI_4;
/// Tilt toward the viewer, 30 degrees.
const PITCH: f32 = -std::f32::consts::FRAC_PI_6;

/// Share of light every face gets regardless of orientation.
const AMBIENT: f32 = 0.35;
/// Direction toward the light, up and slightly to the left and front.
const LIGHT: Point3 = (-0.27, 0.9, 0.34);

/// Screen position plus depth, larger depth being closer to the viewer.
type Projected = (f32, f32, f32);

fn rotate((x, y, z): Point3) -> Projected {
    let (sin_yaw, cos_yaw) = YAW.sin_cos();
    let x1 = x * cos_yaw + z * sin_yaw;
    let z1 = -x * sin_yaw + z * cos_yaw;

    // screen y grows downward
    let y_down = -y;
    let (sin_pitch, cos_pitch) = PITCH.sin_cos();
    let y2 = y_down * cos_pitch - z1 * sin_pitch;
    let z2 = y_down * sin_pitch + z1 * cos_pitch;
    (x1, y2, z2)
}

/// Orthographic projection of a board point onto the canvas.
pub fn project(point: Point3) -> Projected {
    let (x, y, depth) = rotate(point);
    let center = CANVAS_SIZE / 2.0;
    (center + x, center + y, depth)
}

fn dot(a: Point3, b: Point3) -> f32 {
    a.0 * b.0 + a.1 * b.1 + a.2 * b.2
}

fn shade(color: Rgb, normal: Point3) -> Rgb {
    let len = dot(LIGHT, LIGHT).sqrt();
    let diffuse = (dot(normal, LIGHT) / len).max(0.0);
    let factor = AMBIENT + (1.0 - AMBIENT) * diffuse;
    let scale = |channel: u8| (f32::from(channel) * factor).round().clamp(0.0, 255.0) as u8;
    Rgb(scale(color.0), scale(color.1), scale(color.2))
}

fn css(Rgb(r, g, b): Rgb) -> String {
    format!("rgb({r},{g},{b})")
}

/// One cube face: outward normal and its four corners as offsets from the cube center in
/// half-edge units.
struct Face {
    normal: Point3,
    corners: [Point3; 4],
}

const FACES: [Face; 6] = [
    Face {
        normal: (0.0, 1.0, 0.0),
        corners: [(-1.0, 1.0, -1.0), (1.0, 1.0, -1.0), (1.0, 1.0, 1.0), (-1.0, 1.0, 1.0)],
    },
    Face {
        normal: (0.0, -1.0, 0.0),
        corners: [(-1.0, -1.0, -1.0), (-1.0, -1.0, 1.0), (1.0, -1.0, 1.0), (1.0, -1.0, -1.0)],
    },
    Face {
        normal: (1.0, 0.0, 0.0),
        corners: [(1.0, -1.0, -1.0), (1.0, -1.0, 1.0), (1.0, 1.0, 1.0), (1.0, 1.0, -1.0)],
    },
    Face {
        normal: (-1.0, 0.0, 0.0),
        corners: [(-1.0, -1.0, -1.0), (-1.0, 1.0, -1.0), (-1.0, 1.0, 1.0), (-1.0, -1.0, 1.0)],
    },
    Face {
        normal: (0.0, 0.0, 1.0),
        corners: [(-1.0, -1.0, 1.0), (-1.0, 1.0, 1.0), (1.0, 1.0, 1.0), (1.0, -1.0, 1.0)],
    },
    Face {
        normal: (0.0, 0.0, -1.0),
        corners: [(-1.0, -1.0, -1.0), (1.0, -1.0, -1.0), (1.0, 1.0, -1.0), (-1.0, 1.0, -1.0)],
    },
];

/// A face that survived culling, ready to be painted.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub points: [(f32, f32); 4],
    pub fill: Rgb,
}

/// Faces of `placed` that point toward the viewer.
pub fn visible_faces(placed: &PlacedBox) -> Vec<Polygon> {
    let (cx, cy, cz) = placed.center();
    let half = placed.edge_length() / 2.0;
    FACES
        .iter()
        .filter(|face| rotate(face.normal).2 > 0.0)
        .map(|face| Polygon {
            points: face.corners.map(|(dx, dy, dz)| {
                let (x, y, _) = project((cx + dx * half, cy + dy * half, cz + dz * half));
                (x, y)
            }),
            fill: shade(placed.color(), face.normal),
        })
        .collect()
}

/// Keeps the most recent frame so it can be written out as a snapshot.
#[derive(Clone, Debug, Default)]
pub struct SvgCanvas {
    layout: Option<GridLayout>,
    boxes: Vec<PlacedBox>,
}

impl SvgCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn box_count(&self) -> usize {
        self.boxes.len()
    }

    /// Boxes back to front; within one cell the bigger box is painted last so it hides the
    /// smaller one.
    fn paint_order(&self) -> Vec<&PlacedBox> {
        let mut ordered: Vec<_> = self.boxes.iter().collect();
        ordered.sort_by(|a, b| {
            let depth_a = project(a.center()).2;
            let depth_b = project(b.center()).2;
            depth_a
                .total_cmp(&depth_b)
                .then(a.edge_length().total_cmp(&b.edge_length()))
        });
        ordered
    }

    pub fn to_svg(&self) -> String {
        let mut w = XmlWriter::new(Options {
            indent: Indent::None,
            ..Options::default()
        });
        w.start_element("svg");
        w.write_attribute("xmlns", "http://www.w3.org/2000/svg");
        w.write_attribute("width", &CANVAS_SIZE);
        w.write_attribute("height", &CANVAS_SIZE);
        w.write_attribute_fmt("viewBox", format_args!("0 0 {CANVAS_SIZE} {CANVAS_SIZE}"));

        w.start_element("rect");
        w.write_attribute("width", "100%");
        w.write_attribute("height", "100%");
        w.write_attribute("fill", &css(BACKGROUND));
        w.end_element();

        if let Some(layout) = &self.layout {
            write_grid(&mut w, layout);
        }

        w.start_element("g");
        w.write_attribute("stroke", "none");
        for placed in self.paint_order() {
            for polygon in visible_faces(placed) {
                let points = polygon
                    .points
                    .iter()
                    .map(|(x, y)| format!("{x:.2},{y:.2}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                w.start_element("polygon");
                w.write_attribute("points", &points);
                w.write_attribute("fill", &css(polygon.fill));
                w.end_element();
            }
        }
        w.end_element();

        w.end_document()
    }
}

fn write_grid(w: &mut XmlWriter, layout: &GridLayout) {
    w.start_element("g");
    w.write_attribute("stroke", &css(FOREGROUND));
    w.write_attribute("stroke-width", "2");
    for segment in layout.grid_lines() {
        let (x1, y1, _) = project((segment.from.0, 0.0, segment.from.1));
        let (x2, y2, _) = project((segment.to.0, 0.0, segment.to.1));
        w.start_element("line");
        w.write_attribute_fmt("x1", format_args!("{x1:.2}"));
        w.write_attribute_fmt("y1", format_args!("{y1:.2}"));
        w.write_attribute_fmt("x2", format_args!("{x2:.2}"));
        w.write_attribute_fmt("y2", format_args!("{y2:.2}"));
        w.end_element();
    }
    w.end_element();

    w.start_element("g");
    w.write_attribute("fill", &css(FOREGROUND));
    w.write_attribute("font-size", &FONT_SIZE);
    w.write_attribute("font-family", "sans-serif");
    w.write_attribute("text-anchor", "middle");
    w.write_attribute("dominant-baseline", "middle");
    for label in layout.labels() {
        let (x, y, _) = project((label.position.0, 0.0, label.position.1));
        w.start_element("text");
        w.write_attribute_fmt("x", format_args!("{x:.2}"));
        w.write_attribute_fmt("y", format_args!("{y:.2}"));
        w.write_text(&label.text);
        w.end_element();
    }
    w.end_element();
}

impl BoardRenderer for SvgCanvas {
    fn begin_frame(&mut self) {
        self.layout = None;
        self.boxes.clear();
    }

    fn draw_grid(&mut self, layout: &GridLayout) {
        self.layout = Some(*layout);
    }

    fn draw_box(&mut self, placed: &PlacedBox) {
        self.boxes.push(placed.clone());
    }
}
