/// One face found in an image: bounding box in frame coordinates
/// (`[x1, y1, x2, y2]`), optional 5-point landmarks, and an identity
/// embedding usable for compositing.
#[derive(Clone, Debug)]
pub struct DetectedFace {
    pub bbox: [f64; 4],
    pub landmarks: Option<[(f64, f64); 5]>,
    pub embedding: Vec<f32>,
}

impl DetectedFace {
    pub fn width(&self) -> f64 {
        (self.bbox[2] - self.bbox[0]).max(0.0)
    }

    pub fn height(&self) -> f64 {
        (self.bbox[3] - self.bbox[1]).max(0.0)
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }
}

/// Policy for choosing the canonical face when an image contains several.
/// Returns the index of the chosen face, or `None` for an empty slice.
pub type FaceSelector = fn(&[DetectedFace]) -> Option<usize>;

/// Default selection policy: the face with the largest bounding-box area.
pub fn largest_face(faces: &[DetectedFace]) -> Option<usize> {
    faces
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| {
            a.area()
                .partial_cmp(&b.area())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn face(x1: f64, y1: f64, x2: f64, y2: f64) -> DetectedFace {
        DetectedFace {
            bbox: [x1, y1, x2, y2],
            landmarks: None,
            embedding: vec![0.0; 4],
        }
    }

    #[test]
    fn test_area() {
        let f = face(10.0, 20.0, 110.0, 70.0);
        assert_relative_eq!(f.width(), 100.0);
        assert_relative_eq!(f.height(), 50.0);
        assert_relative_eq!(f.area(), 5000.0);
    }

    #[test]
    fn test_area_degenerate_box_is_zero() {
        // Inverted coordinates clamp to zero rather than going negative
        let f = face(100.0, 100.0, 50.0, 50.0);
        assert_relative_eq!(f.area(), 0.0);
    }

    #[test]
    fn test_largest_face_empty() {
        assert_eq!(largest_face(&[]), None);
    }

    #[test]
    fn test_largest_face_single() {
        let faces = vec![face(0.0, 0.0, 10.0, 10.0)];
        assert_eq!(largest_face(&faces), Some(0));
    }

    #[rstest]
    #[case::largest_last(vec![face(0.0, 0.0, 10.0, 10.0), face(0.0, 0.0, 100.0, 100.0)], 1)]
    #[case::largest_first(vec![face(0.0, 0.0, 100.0, 100.0), face(0.0, 0.0, 10.0, 10.0)], 0)]
    #[case::largest_middle(
        vec![face(0.0, 0.0, 10.0, 10.0), face(0.0, 0.0, 50.0, 50.0), face(0.0, 0.0, 20.0, 20.0)],
        1
    )]
    fn test_largest_face_picks_max_area(#[case] faces: Vec<DetectedFace>, #[case] expected: usize) {
        assert_eq!(largest_face(&faces), Some(expected));
    }

    #[test]
    fn test_largest_face_tie_keeps_later() {
        // max_by keeps the last of equal elements; the policy only promises
        // a deterministic pick, not which of two equal-area faces wins
        let faces = vec![face(0.0, 0.0, 10.0, 10.0), face(5.0, 5.0, 15.0, 15.0)];
        assert_eq!(largest_face(&faces), Some(1));
    }
}
