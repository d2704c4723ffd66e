use tiny_pathops_path::*;

fn rect(l: f32, t: f32, r: f32, b: f32) -> Rect {
    Rect::from_ltrb(l, t, r, b).unwrap()
}

#[test]
fn empty() {
    let pb = PathBuilder::new();
    assert!(pb.finish().is_none());
}

#[test]
fn line() {
    let mut pb = PathBuilder::new();
    pb.move_to(10.0, 20.0);
    pb.line_to(30.0, 40.0);
    let path = pb.finish().unwrap();

    assert_eq!(path.bounds(), rect(10.0, 20.0, 30.0, 40.0));
    assert_eq!(
        path.segments().collect::<Vec<_>>(),
        &[
            PathSegment::MoveTo(Point::from_xy(10.0, 20.0)),
            PathSegment::LineTo(Point::from_xy(30.0, 40.0)),
        ]
    );

    assert_eq!(
        format!("{:?}", path),
        "Path { segments: \"M 10 20 L 30 40\", \
         bounds: Rect { left: 10.0, top: 20.0, right: 30.0, bottom: 40.0 } }"
    );
}

#[test]
fn implicit_move_to_origin() {
    let mut line = PathBuilder::new();
    line.line_to(30.0, 40.0);

    let mut cubic = PathBuilder::new();
    cubic.cubic_to(40.0, 30.0, 60.0, 75.0, 33.0, 66.0);

    for (pb, bounds) in vec![(line, rect(0.0, 0.0, 30.0, 40.0)), (cubic, rect(0.0, 0.0, 60.0, 75.0))] {
        let path = pb.finish().unwrap();
        assert_eq!(path.bounds(), bounds);
        assert_eq!(path.points()[0], Point::zero());
        assert_eq!(path.verbs()[0], PathVerb::Move);
        assert_eq!(path.len(), 2);
    }
}

#[test]
fn no_move_before_close() {
    let mut pb = PathBuilder::new();
    pb.close();
    assert!(pb.finish().is_none());
}

#[test]
fn double_close() {
    let mut pb = PathBuilder::new();
    pb.move_to(10.0, 10.0);
    pb.line_to(20.0, 10.0);
    pb.line_to(20.0, 20.0);
    pb.close();
    pb.close();
    let path = pb.finish().unwrap();

    assert_eq!(path.len(), 4);
    assert_eq!(path.segments().last(), Some(PathSegment::Close));
}

#[test]
fn repeated_moves_collapse() {
    let mut pb = PathBuilder::new();
    pb.move_to(10.0, 20.0);
    pb.move_to(30.0, 40.0);
    assert_eq!(pb.len(), 1);
    assert_eq!(pb.last_point(), Some(Point::from_xy(30.0, 40.0)));

    pb.line_to(20.0, 10.0);
    let path = pb.finish().unwrap();
    assert_eq!(path.bounds(), rect(20.0, 10.0, 30.0, 40.0));
}

#[test]
fn line_after_close() {
    let mut pb = PathBuilder::new();
    pb.move_to(10.0, 20.0);
    pb.line_to(30.0, 40.0);
    pb.close();
    pb.line_to(20.0, 20.0);
    let path = pb.finish().unwrap();

    assert_eq!(path.contours_count(), 2);
    assert_eq!(
        path.segments().collect::<Vec<_>>(),
        &[
            PathSegment::MoveTo(Point::from_xy(10.0, 20.0)),
            PathSegment::LineTo(Point::from_xy(30.0, 40.0)),
            PathSegment::Close,
            PathSegment::MoveTo(Point::from_xy(10.0, 20.0)),
            PathSegment::LineTo(Point::from_xy(20.0, 20.0)),
        ]
    );
}

#[test]
fn conic_weights() {
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.conic_to(10.0, 0.0, 10.0, 10.0, 0.5);
    // A unit weight is a quad and a zero weight is a line.
    pb.conic_to(0.0, 10.0, 0.0, 0.0, 1.0);
    pb.conic_to(5.0, 5.0, 5.0, 0.0, 0.0);
    let path = pb.finish().unwrap();

    assert_eq!(path.verbs(), &[PathVerb::Move, PathVerb::Conic, PathVerb::Quad, PathVerb::Line]);
    assert_eq!(path.conic_weights(), &[0.5]);
}

#[test]
fn circle() {
    let path = PathBuilder::from_circle(10.0, 10.0, 5.0).unwrap();
    assert_eq!(path.bounds(), rect(5.0, 5.0, 15.0, 15.0));
    assert_eq!(path.contours_count(), 1);
    assert_eq!(path.conic_weights().len(), 4);
    assert!(PathBuilder::from_circle(10.0, 10.0, 0.0).is_none());
}

#[test]
fn push_path() {
    let square = PathBuilder::from_rect(rect(0.0, 0.0, 2.0, 2.0));
    let mut pb = PathBuilder::new();
    pb.push_path(&square);
    pb.push_rect(5.0, 5.0, 1.0, 1.0);
    let path = pb.finish().unwrap();

    assert_eq!(path.contours_count(), 2);
    assert_eq!(path.bounds(), rect(0.0, 0.0, 6.0, 6.0));
}
