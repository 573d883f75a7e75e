//! Region a route overlay occupies, for viewport fitting.

use serde::Serialize;

use crate::model::RouteData;
use crate::polyline::Coordinate;

/// Every polyline vertex and explicit step location, in step order.
pub fn compute_bounds(route: &RouteData) -> Vec<Coordinate> {
    let mut points = Vec::new();
    for step in &route.steps {
        points.extend_from_slice(step.polyline.points());
        if let Some(location) = step.location() {
            points.push(location);
        }
    }
    points
}

/// Axis-aligned box enclosing a set of points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl Bounds {
    /// Returns `None` for an empty point set.
    pub fn from_points(points: &[Coordinate]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Self {
            south_west: *first,
            north_east: *first,
        };
        for point in rest {
            bounds.south_west.lat = bounds.south_west.lat.min(point.lat);
            bounds.south_west.lng = bounds.south_west.lng.min(point.lng);
            bounds.north_east.lat = bounds.north_east.lat.max(point.lat);
            bounds.north_east.lng = bounds.north_east.lng.max(point.lng);
        }
        Some(bounds)
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }

    pub fn contains(&self, point: Coordinate) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RouteStep, StepKind};

    #[test]
    fn test_collects_polylines_then_locations() {
        let route = RouteData::from_steps(vec![
            RouteStep::new(StepKind::Walk {
                to: None,
                location: Some((5.0, 5.0).into()),
            })
            .with_polyline(vec![(1.0, 1.0), (2.0, 2.0)]),
            RouteStep::new(StepKind::Arrive {
                at: Some("End".into()),
                location: Some((3.0, -1.0).into()),
            }),
        ]);

        assert_eq!(
            compute_bounds(&route),
            vec![
                Coordinate::new(1.0, 1.0),
                Coordinate::new(2.0, 2.0),
                Coordinate::new(5.0, 5.0),
                Coordinate::new(3.0, -1.0),
            ]
        );
    }

    #[test]
    fn test_box_of_points() {
        let points = [Coordinate::new(1.0, 4.0), Coordinate::new(-2.0, 3.0), Coordinate::new(0.0, 7.0)];
        let bounds = Bounds::from_points(&points).unwrap();
        assert_eq!(bounds.south_west, Coordinate::new(-2.0, 3.0));
        assert_eq!(bounds.north_east, Coordinate::new(1.0, 7.0));
        assert_eq!(bounds.center(), Coordinate::new(-0.5, 5.0));
        assert!(points.iter().all(|p| bounds.contains(*p)));
        assert_eq!(Bounds::from_points(&[]), None);
    }
}
