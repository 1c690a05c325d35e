//! A diagnostic picture of a sweep.
//!
//! [`SvgTrace`] is an [`Observer`] that remembers what the sweep did, and
//! draws it afterwards:
//!
//! - every disk, in translucent black;
//! - crossings occluded by a later disk, as red dots with a yellow line to
//!   the occluding center;
//! - crossings rejected because an earlier disk covered them, as red dots
//!   with a green line to the covering center;
//! - emitted crossings, as blue dots;
//! - standalone disks, as purple dots at their centers.

use kurbo::{Point, Rect};
use svg::{
    node::element::{Circle as SvgCircle, Group, Line},
    Document,
};

use crate::{BoundaryEvent, Circle, Observer, Radius};

/// Records a sweep for drawing.
#[derive(Clone, Debug, Default)]
pub struct SvgTrace {
    radius: f64,
    disks: Vec<Point>,
    occluded: Vec<(Point, Point)>,
    rejected: Vec<(Point, Point)>,
    emitted: Vec<Point>,
    standalone: Vec<Point>,
}

impl Observer for SvgTrace {
    fn circle_inserted(&mut self, circle: &Circle, radius: &Radius) {
        self.radius = radius.get();
        self.disks.push(circle.center);
    }

    fn crossing_occluded(&mut self, point: Point, by: &Circle) {
        self.occluded.push((point, by.center));
    }

    fn crossing_rejected(&mut self, point: Point, by: &Circle) {
        self.rejected.push((point, by.center));
    }

    fn event_emitted(&mut self, event: &BoundaryEvent) {
        match event {
            BoundaryEvent::Crossing { point, .. } => self.emitted.push(*point),
            BoundaryEvent::Standalone { center, .. } => self.standalone.push(*center),
        }
    }
}

fn dot(p: Point, r: f64, color: &str) -> SvgCircle {
    SvgCircle::new()
        .set("cx", p.x)
        .set("cy", p.y)
        .set("r", r)
        .set("fill", color)
}

fn line(p: Point, q: Point, width: f64, color: &str) -> Line {
    Line::new()
        .set("x1", p.x)
        .set("y1", p.y)
        .set("x2", q.x)
        .set("y2", q.y)
        .set("stroke", color)
        .set("stroke-width", width)
}

impl SvgTrace {
    /// Creates an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of disks seen so far.
    pub fn disk_count(&self) -> usize {
        self.disks.len()
    }

    /// The region covered by the disks, or `None` if there weren't any.
    pub fn bounding_box(&self) -> Option<Rect> {
        let first = self.disks.first()?;
        let bbox = self
            .disks
            .iter()
            .fold(Rect::from_points(*first, *first), |bbox, p| {
                bbox.union_pt(*p)
            });
        Some(bbox.inflate(self.radius, self.radius))
    }

    /// Draws everything recorded so far.
    pub fn document(&self) -> Document {
        let bbox = self
            .bounding_box()
            .unwrap_or_else(|| Rect::new(0.0, 0.0, 1.0, 1.0));
        let dot_r = self.radius / 5.0;
        let stroke_width = self.radius / 25.0;

        let mut disks = Group::new().set("opacity", 0.5);
        for &p in &self.disks {
            disks = disks.add(dot(p, self.radius, "black"));
        }

        let mut discarded = Group::new();
        for &(p, by) in &self.occluded {
            discarded = discarded
                .add(line(p, by, stroke_width, "yellow"))
                .add(dot(p, dot_r, "red"));
        }
        for &(p, by) in &self.rejected {
            discarded = discarded
                .add(line(p, by, stroke_width, "green"))
                .add(dot(p, dot_r, "red"));
        }

        let mut emitted = Group::new();
        for &p in &self.emitted {
            emitted = emitted.add(dot(p, dot_r, "blue"));
        }
        for &p in &self.standalone {
            emitted = emitted.add(dot(p, dot_r, "purple"));
        }

        Document::new()
            .set(
                "viewBox",
                (bbox.min_x(), bbox.min_y(), bbox.width(), bbox.height()),
            )
            .add(disks)
            .add(discarded)
            .add(emitted)
    }
}
