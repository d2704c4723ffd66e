use tiny_pathops::*;

fn rect(l: f32, t: f32, r: f32, b: f32) -> Path {
    PathBuilder::from_rect(Rect::from_ltrb(l, t, r, b).unwrap())
}

fn to_svg(path: &Path) -> String {
    let mut parts = Vec::new();
    for segment in path.segments() {
        parts.push(match segment {
            PathSegment::MoveTo(p) => format!("M {} {}", p.x, p.y),
            PathSegment::LineTo(p) => format!("L {} {}", p.x, p.y),
            PathSegment::QuadTo(p1, p) => format!("Q {} {} {} {}", p1.x, p1.y, p.x, p.y),
            PathSegment::ConicTo(p1, p, w) => format!("K {} {} {} {} {}", p1.x, p1.y, p.x, p.y, w),
            PathSegment::CubicTo(p1, p2, p) => {
                format!("C {} {} {} {} {} {}", p1.x, p1.y, p2.x, p2.y, p.x, p.y)
            }
            PathSegment::Close => "Z".to_string(),
        });
    }

    parts.join(" ")
}

fn run(a: &Path, b: &Path, path_op: PathOp) -> Option<String> {
    op(a, FillRule::Winding, b, FillRule::Winding, path_op)
        .unwrap()
        .map(|path| to_svg(&path))
}

fn count_verbs(path: &Path, verb: PathVerb) -> usize {
    path.verbs().iter().filter(|v| **v == verb).count()
}

#[test]
fn union_of_overlapping_rects() {
    let a = rect(0.0, 0.0, 2.0, 2.0);
    let b = rect(1.0, 1.0, 3.0, 3.0);
    assert_eq!(
        run(&a, &b, PathOp::Union).unwrap(),
        "M 0 0 L 2 0 L 2 1 L 3 1 L 3 3 L 1 3 L 1 2 L 0 2 Z"
    );
}

#[test]
fn intersect_of_overlapping_rects() {
    let a = rect(0.0, 0.0, 2.0, 2.0);
    let b = rect(1.0, 1.0, 3.0, 3.0);
    assert_eq!(
        run(&a, &b, PathOp::Intersect).unwrap(),
        "M 1 1 L 2 1 L 2 2 L 1 2 Z"
    );
}

#[test]
fn difference_of_overlapping_rects() {
    let a = rect(0.0, 0.0, 2.0, 2.0);
    let b = rect(1.0, 1.0, 3.0, 3.0);
    assert_eq!(
        run(&a, &b, PathOp::Difference).unwrap(),
        "M 0 0 L 2 0 L 2 1 L 1 1 L 1 2 L 0 2 Z"
    );
    assert_eq!(
        run(&a, &b, PathOp::ReverseDifference).unwrap(),
        "M 2 1 L 3 1 L 3 3 L 1 3 L 1 2 L 2 2 Z"
    );
}

#[test]
fn xor_of_overlapping_rects() {
    let a = rect(0.0, 0.0, 2.0, 2.0);
    let b = rect(1.0, 1.0, 3.0, 3.0);
    assert_eq!(
        run(&a, &b, PathOp::Xor).unwrap(),
        "M 0 0 L 2 0 L 2 1 L 1 1 L 1 2 L 0 2 Z M 2 1 L 3 1 L 3 3 L 1 3 L 1 2 L 2 2 Z"
    );
}

#[test]
fn union_with_coincident_edges() {
    let a = rect(0.0, 0.0, 2.0, 2.0);
    let b = rect(1.0, 0.0, 3.0, 2.0);
    assert_eq!(run(&a, &b, PathOp::Union).unwrap(), "M 0 0 L 3 0 L 3 2 L 0 2 Z");
}

#[test]
fn same_rect() {
    let a = rect(0.0, 0.0, 2.0, 2.0);
    assert_eq!(run(&a, &a, PathOp::Union).unwrap(), "M 0 0 L 2 0 L 2 2 L 0 2 Z");
    assert_eq!(run(&a, &a, PathOp::Intersect).unwrap(), "M 0 0 L 2 0 L 2 2 L 0 2 Z");
    assert_eq!(run(&a, &a, PathOp::Difference), None);
    assert_eq!(run(&a, &a, PathOp::Xor), None);
}

#[test]
fn disjoint_rects() {
    let a = rect(0.0, 0.0, 2.0, 2.0);
    let b = rect(5.0, 5.0, 6.0, 6.0);
    assert_eq!(run(&a, &b, PathOp::Intersect), None);
    assert_eq!(run(&a, &b, PathOp::Difference).unwrap(), "M 0 0 L 2 0 L 2 2 L 0 2 Z");
    assert_eq!(
        run(&a, &b, PathOp::Union).unwrap(),
        "M 0 0 L 2 0 L 2 2 L 0 2 Z M 5 5 L 6 5 L 6 6 L 5 6 Z"
    );
}

#[test]
fn degree_is_reduced() {
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.quad_to(1.0, 0.0, 2.0, 0.0);
    pb.quad_to(2.0, 1.0, 2.0, 2.0);
    pb.cubic_to(1.5, 2.0, 0.5, 2.0, 0.0, 2.0);
    pb.quad_to(0.0, 1.0, 0.0, 0.0);
    pb.close();
    let a = pb.finish().unwrap();
    let b = rect(1.0, 1.0, 3.0, 3.0);
    assert_eq!(
        run(&a, &b, PathOp::Union).unwrap(),
        "M 0 0 L 2 0 L 2 1 L 3 1 L 3 3 L 1 3 L 1 2 L 0 2 Z"
    );
}

#[test]
fn circle_and_rect() {
    let circle = PathBuilder::from_circle(5.0, 5.0, 5.0).unwrap();
    let quadrant = rect(5.0, 5.0, 15.0, 15.0);
    let path = op(
        &circle,
        FillRule::Winding,
        &quadrant,
        FillRule::Winding,
        PathOp::Intersect,
    )
    .unwrap()
    .unwrap();

    let bounds = path.bounds();
    assert_eq!(
        (bounds.left(), bounds.top(), bounds.right(), bounds.bottom()),
        (5.0, 5.0, 10.0, 10.0)
    );
    assert_eq!(count_verbs(&path, PathVerb::Conic), 1);
    assert_eq!(path.contours_count(), 1);
}

#[test]
fn circle_with_itself() {
    let circle = PathBuilder::from_circle(0.0, 0.0, 10.0).unwrap();
    let path = op(
        &circle,
        FillRule::Winding,
        &circle,
        FillRule::Winding,
        PathOp::Union,
    )
    .unwrap()
    .unwrap();

    assert_eq!(path.bounds(), circle.bounds());
    assert_eq!(count_verbs(&path, PathVerb::Conic), 4);
}

#[test]
fn cubic_is_preserved() {
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.cubic_to(10.0, -5.0, 20.0, 5.0, 30.0, 0.0);
    pb.line_to(30.0, 20.0);
    pb.line_to(0.0, 20.0);
    pb.close();
    let shape = pb.finish().unwrap();

    let path = simplify(&shape, FillRule::Winding).unwrap().unwrap();
    assert_eq!(count_verbs(&path, PathVerb::Cubic), 1);
    assert_eq!(path.contours_count(), 1);

    // Cut in the middle of the cubic.
    let clip = rect(0.0, -10.0, 15.0, 30.0);
    let path = op(&shape, FillRule::Winding, &clip, FillRule::Winding, PathOp::Intersect)
        .unwrap()
        .unwrap();
    assert_eq!(count_verbs(&path, PathVerb::Cubic), 1);
    assert!((path.bounds().right() - 15.0).abs() < 1e-3);
    assert_eq!(path.bounds().bottom(), 20.0);
}

#[test]
fn nearly_coincident_cubics_are_rejected() {
    let (sin, cos) = 1e-5f32.sin_cos();
    let turn = |x: f32, y: f32| {
        let (dx, dy) = (x - 500.0, y - 500.0);
        (500.0 + cos * dx - sin * dy, 500.0 + sin * dx + cos * dy)
    };

    let shape = |f: &dyn Fn(f32, f32) -> (f32, f32)| {
        let p = [
            (0.0, 500.0),
            (250.0, 1000.0),
            (750.0, 0.0),
            (1000.0, 500.0),
            (1000.0, 1500.0),
            (0.0, 1500.0),
        ]
        .iter()
        .map(|&(x, y)| f(x, y))
        .collect::<Vec<_>>();
        let mut pb = PathBuilder::new();
        pb.move_to(p[0].0, p[0].1);
        pb.cubic_to(p[1].0, p[1].1, p[2].0, p[2].1, p[3].0, p[3].1);
        pb.line_to(p[4].0, p[4].1);
        pb.line_to(p[5].0, p[5].1);
        pb.close();
        pb.finish().unwrap()
    };

    let a = shape(&|x, y| (x, y));
    let b = shape(&turn);
    // A partial intersection would silently produce the wrong outline.
    assert!(op(&a, FillRule::Winding, &b, FillRule::Winding, PathOp::Union).is_err());
}

#[test]
fn simplify_bow_tie() {
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.line_to(2.0, 2.0);
    pb.line_to(2.0, 0.0);
    pb.line_to(0.0, 2.0);
    pb.close();
    let path = simplify(&pb.finish().unwrap(), FillRule::Winding)
        .unwrap()
        .unwrap();
    assert_eq!(path.contours_count(), 2);
    assert_eq!(count_verbs(&path, PathVerb::Line), 4);
}

#[test]
fn simplify_nested_squares() {
    let mut pb = PathBuilder::new();
    pb.push_rect(0.0, 0.0, 10.0, 10.0);
    pb.push_rect(2.0, 2.0, 4.0, 4.0);
    let path = pb.finish().unwrap();

    let winding = simplify(&path, FillRule::Winding).unwrap().unwrap();
    assert_eq!(to_svg(&winding), "M 0 0 L 10 0 L 10 10 L 0 10 Z");

    let even_odd = simplify(&path, FillRule::EvenOdd).unwrap().unwrap();
    assert_eq!(
        to_svg(&even_odd),
        "M 0 0 L 10 0 L 10 10 L 0 10 Z M 2 2 L 2 6 L 6 6 L 6 2 Z"
    );
}

#[test]
fn even_odd_operand() {
    let mut pb = PathBuilder::new();
    pb.push_rect(0.0, 0.0, 10.0, 10.0);
    pb.push_rect(2.0, 2.0, 4.0, 4.0);
    let ring = pb.finish().unwrap();
    let inner = rect(3.0, 3.0, 5.0, 5.0);

    // The inner square lies in the hole of the ring.
    let path = op(&ring, FillRule::EvenOdd, &inner, FillRule::Winding, PathOp::Intersect).unwrap();
    assert!(path.is_none());

    let path = op(&ring, FillRule::Winding, &inner, FillRule::Winding, PathOp::Intersect)
        .unwrap()
        .unwrap();
    assert_eq!(to_svg(&path), "M 3 3 L 5 3 L 5 5 L 3 5 Z");
}

#[test]
fn empty_simplify() {
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.line_to(5.0, 0.0);
    pb.close();
    assert!(simplify(&pb.finish().unwrap(), FillRule::Winding).unwrap().is_none());
}
