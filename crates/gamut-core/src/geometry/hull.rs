//! Convex hull of chroma-plane points via Andrew's monotone chain.
//!
//! Points are sorted by `a` then `b`. Two chains are built, one scanning
//! left → right and one right → left; a point is popped while the last
//! three make a non-left turn. The `>=` turn test drops collinear points,
//! so the result holds only true corners.
//!
//! ```text
//!   sort ──→ upper chain (→) ──→ lower chain (←) ──→ concat
//! ```
//!
//! `O(n log n)` overall, dominated by the sort.

use tracing::trace;

use super::ab::Ab;

/// Compute the convex hull of `points`.
///
/// - empty input → empty hull
/// - one point, or all points coincident → that single point
/// - two distinct points → both points
/// - otherwise the hull corners in consistent winding order
pub fn convex_hull(points: &[Ab]) -> Vec<Ab> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|p, q| p.a.total_cmp(&q.a).then(p.b.total_cmp(&q.b)));
    let hull = convex_hull_presorted(&sorted);
    trace!(input = points.len(), hull = hull.len(), "convex hull");
    hull
}

/// Hull of points already sorted by `(a, b)`. Runs in `O(n)`.
pub fn convex_hull_presorted(points: &[Ab]) -> Vec<Ab> {
    if points.len() <= 1 {
        return points.to_vec();
    }

    let mut upper = chain(points.iter());
    upper.pop();

    let mut lower = chain(points.iter().rev());
    lower.pop();

    if upper.len() == 1 && lower.len() == 1 && upper[0] == lower[0] {
        return upper;
    }
    upper.extend(lower);
    upper
}

fn chain<'a>(points: impl Iterator<Item = &'a Ab>) -> Vec<Ab> {
    let mut out: Vec<Ab> = Vec::new();
    for &p in points {
        while let [.., r, q] = out[..] {
            if (q.a - r.a) * (p.b - r.b) >= (q.b - r.b) * (p.a - r.a) {
                out.pop();
            } else {
                break;
            }
        }
        out.push(p);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ab(a: f32, b: f32) -> Ab {
        Ab::new(a, b)
    }

    #[test]
    fn test_hull_square_drops_center_and_collinear_midpoint() {
        let points = [
            ab(0.5, 0.5),
            ab(1.0, 1.0),
            ab(0.0, 0.0),
            ab(0.5, 0.0),
            ab(1.0, 0.0),
            ab(0.0, 1.0),
        ];
        let hull = convex_hull(&points);
        assert_eq!(
            hull,
            vec![ab(0.0, 0.0), ab(0.0, 1.0), ab(1.0, 1.0), ab(1.0, 0.0)]
        );
    }

    #[test]
    fn test_hull_winding_is_consistent() {
        let points = [ab(0.0, 0.0), ab(2.0, 0.0), ab(2.0, 1.0), ab(0.0, 1.0), ab(1.0, 3.0)];
        let hull = convex_hull(&points);
        assert_eq!(hull.len(), 5);
        let n = hull.len();
        let signs: Vec<bool> = (0..n)
            .map(|i| {
                let (r, q, p) = (hull[i], hull[(i + 1) % n], hull[(i + 2) % n]);
                (q.a - r.a) * (p.b - r.b) - (q.b - r.b) * (p.a - r.a) < 0.0
            })
            .collect();
        assert!(signs.iter().all(|&s| s == signs[0]), "mixed winding: {hull:?}");
    }

    #[test]
    fn test_hull_empty_input() {
        assert!(convex_hull(&[]).is_empty());
    }

    #[test]
    fn test_hull_single_point() {
        assert_eq!(convex_hull(&[ab(0.1, -0.2)]), vec![ab(0.1, -0.2)]);
    }

    #[test]
    fn test_hull_coincident_points_collapse() {
        let p = ab(0.05, 0.05);
        assert_eq!(convex_hull(&[p, p]), vec![p]);
        assert_eq!(convex_hull(&[p, p, p, p]), vec![p]);
    }

    #[test]
    fn test_hull_two_distinct_points() {
        let hull = convex_hull(&[ab(0.2, 0.0), ab(-0.1, 0.1)]);
        assert_eq!(hull, vec![ab(-0.1, 0.1), ab(0.2, 0.0)]);
    }

    #[test]
    fn test_hull_collinear_points_keep_endpoints() {
        let hull = convex_hull(&[ab(1.0, 0.0), ab(0.0, 0.0), ab(2.0, 0.0)]);
        assert_eq!(hull, vec![ab(0.0, 0.0), ab(2.0, 0.0)]);
    }

    #[test]
    fn test_hull_is_deterministic_under_input_order() {
        let points = [ab(0.3, 0.1), ab(-0.2, 0.2), ab(0.0, -0.3), ab(0.05, 0.0), ab(0.1, 0.25)];
        let mut reversed = points;
        reversed.reverse();
        assert_eq!(convex_hull(&points), convex_hull(&reversed));
    }
}
