use nbezier_viz::Point2D;
use once_cell::sync::Lazy;

/// Points generated randomly
/// ```python
/// from random import random
/// for i in range(10):
///     print(f"Point2D::new({(random()-0.5)*i*100}, {(random()-0.5)*i*100}),")
/// ```
pub static POINTS: Lazy<[Point2D; 10]> = Lazy::new(|| {
    [
        Point2D::new(0.0, 0.0),
        Point2D::new(-29.734, 44.984),
        Point2D::new(-52.560, 42.885),
        Point2D::new(142.777, -2.652),
        Point2D::new(198.032, -67.824),
        Point2D::new(44.863, -91.328),
        Point2D::new(-251.139, -79.100),
        Point2D::new(-310.479, -59.318),
        Point2D::new(-116.022, -295.591),
        Point2D::new(-107.946, 78.888),
    ]
});

pub static CONTROLS: Lazy<Controls> = Lazy::new(Controls::new);
#[allow(non_snake_case)]
pub struct Controls {
    pub QUADRATIC: Vec<Vec<Point2D>>,
    pub CUBIC: Vec<Vec<Point2D>>,
    pub HIGHER: Vec<Vec<Point2D>>,
}
impl Controls {
    pub fn new() -> Controls {
        let pick = |indices: &[usize]| indices.iter().map(|&i| POINTS[i]).collect::<Vec<_>>();
        Controls {
            QUADRATIC: vec![
                pick(&[0, 1, 2]),
                pick(&[2, 3, 4]),
                pick(&[4, 6, 8]),
                pick(&[1, 3, 5]),
                pick(&[5, 7, 9]),
            ],
            CUBIC:     vec![
                pick(&[0, 1, 2, 3]),
                pick(&[2, 3, 4, 5]),
                pick(&[4, 5, 6, 7]),
                pick(&[6, 7, 8, 9]),
                pick(&[0, 4, 2, 6]),
            ],
            HIGHER:    vec![
                pick(&[0, 1, 2, 3, 4]),
                pick(&[2, 3, 4, 5, 6, 7]),
                pick(&[4, 8, 6, 0, 2, 9, 1]),
                pick(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]),
            ],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item=&Vec<Point2D>> {
        self.QUADRATIC.iter()
            .chain(self.CUBIC.iter())
            .chain(self.HIGHER.iter())
    }
}
