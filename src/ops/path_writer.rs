// Copyright 2014 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use tiny_pathops_path::{Path, PathBuilder};

use crate::path64::{Curve64, Point64};

/// Writes result curves into a path (SkPathWriter).
///
/// Lines are deferred, so a run of collinear lines becomes a single one,
/// and the line that returns to the contour start is replaced by a close.
pub struct PathWriter {
    builder: PathBuilder,
    first: Point64,
    last: Point64,
    deferred: Option<(Point64, Point64)>,
    move_pending: bool,
}

impl PathWriter {
    pub fn new() -> Self {
        PathWriter {
            builder: PathBuilder::new(),
            first: Point64::zero(),
            last: Point64::zero(),
            deferred: None,
            move_pending: false,
        }
    }

    /// Starts a new contour at `pt`.
    pub fn start(&mut self, pt: Point64) {
        self.first = pt;
        self.last = pt;
        self.deferred = None;
        self.move_pending = true;
    }

    /// Appends a curve, starting at the current point.
    pub fn curve(&mut self, curve: &Curve64) {
        let p = curve.points();
        match curve {
            Curve64::Line(_) => self.line_to(curve.end()),
            _ if curve.collapsed() => {}
            Curve64::Quad(_) => {
                self.flush();
                self.builder
                    .quad_to(p[1].x as f32, p[1].y as f32, p[2].x as f32, p[2].y as f32);
                self.last = p[2];
            }
            Curve64::Conic(c) => {
                self.flush();
                self.builder.conic_to(
                    p[1].x as f32,
                    p[1].y as f32,
                    p[2].x as f32,
                    p[2].y as f32,
                    c.weight as f32,
                );
                self.last = p[2];
            }
            Curve64::Cubic(_) => {
                self.flush();
                self.builder.cubic_to(
                    p[1].x as f32,
                    p[1].y as f32,
                    p[2].x as f32,
                    p[2].y as f32,
                    p[3].x as f32,
                    p[3].y as f32,
                );
                self.last = p[3];
            }
        }
    }

    pub fn line_to(&mut self, pt: Point64) {
        if pt.to_point() == self.last.to_point() {
            return;
        }

        if let Some((start, end)) = self.deferred {
            let prev = end - start;
            let next = pt - end;
            if prev.cross(next) == 0.0 && prev.dot(next) > 0.0 {
                self.deferred = Some((start, pt));
                self.last = pt;
                return;
            }

            self.flush();
        }

        self.deferred = Some((self.last, pt));
        self.last = pt;
    }

    fn flush(&mut self) {
        if self.move_pending {
            self.builder.move_to(self.first.x as f32, self.first.y as f32);
            self.move_pending = false;
        }

        if let Some((_, end)) = self.deferred.take() {
            self.builder.line_to(end.x as f32, end.y as f32);
        }
    }

    /// Closes the current contour.
    pub fn close(&mut self) {
        if let Some((_, end)) = self.deferred {
            if end.to_point() == self.first.to_point() {
                self.deferred = None;
            }
        }

        if self.move_pending && self.deferred.is_none() {
            return;
        }

        self.flush();
        self.builder.close();
        self.last = self.first;
    }

    pub fn finish(self) -> Option<Path> {
        self.builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path64::{Line64, Quad64};
    use alloc::format;

    fn pt(x: f64, y: f64) -> Point64 {
        Point64::from_xy(x, y)
    }

    #[test]
    fn collinear_lines_are_merged() {
        let mut writer = PathWriter::new();
        writer.start(pt(0.0, 0.0));
        writer.line_to(pt(1.0, 0.0));
        writer.line_to(pt(3.0, 0.0));
        writer.line_to(pt(3.0, 0.0));
        writer.line_to(pt(3.0, 2.0));
        writer.line_to(pt(0.0, 2.0));
        writer.line_to(pt(0.0, 0.0));
        writer.close();
        let path = writer.finish().unwrap();
        assert_eq!(
            format!("{:?}", path),
            "Path { segments: \"M 0 0 L 3 0 L 3 2 L 0 2 Z\", \
             bounds: Rect { left: 0.0, top: 0.0, right: 3.0, bottom: 2.0 } }"
        );
    }

    #[test]
    fn backtracking_line_is_kept() {
        let mut writer = PathWriter::new();
        writer.start(pt(0.0, 0.0));
        writer.line_to(pt(2.0, 0.0));
        writer.line_to(pt(1.0, 0.0));
        writer.line_to(pt(1.0, 1.0));
        writer.close();
        let path = writer.finish().unwrap();
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn curves() {
        let mut writer = PathWriter::new();
        writer.start(pt(0.0, 0.0));
        writer.curve(&Curve64::Quad(Quad64::new([pt(0.0, 0.0), pt(2.0, 2.0), pt(2.0, 0.0)])));
        writer.curve(&Curve64::Quad(Quad64::new([pt(2.0, 0.0), pt(2.0, 0.0), pt(2.0, 0.0)])));
        writer.curve(&Curve64::Line(Line64::new(pt(2.0, 0.0), pt(0.0, 0.0))));
        writer.close();
        let path = writer.finish().unwrap();
        assert_eq!(
            format!("{:?}", path),
            "Path { segments: \"M 0 0 Q 2 2 2 0 Z\", \
             bounds: Rect { left: 0.0, top: 0.0, right: 2.0, bottom: 2.0 } }"
        );
    }

    #[test]
    fn nothing_written() {
        let mut writer = PathWriter::new();
        writer.start(pt(1.0, 1.0));
        writer.line_to(pt(1.0, 1.0));
        assert!(writer.finish().is_none());
    }
}
