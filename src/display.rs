//! Route display lifecycle on one map surface.
//!
//! A surface is either idle or displaying exactly one route. Showing a route
//! draws its overlay right away and schedules a single viewport fit a short
//! delay later; the host's event loop drives that timer through
//! [`RouteDisplay::poll`]. Clearing or replacing the route cancels a fit that
//! has not run yet, so the camera never jumps to a route that is gone.

use std::time::Instant;

use crate::model::RouteData;
use crate::overlay::{RouteOverlay, SurfaceStyle};
use crate::traits::{MapViewport, OverlaySink};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    Idle,
    Displaying,
}

#[derive(Debug, Clone, Copy)]
struct PendingFit {
    generation: u64,
    due: Instant,
}

#[derive(Debug)]
struct Shown {
    route: RouteData,
    overlay: RouteOverlay,
    generation: u64,
}

pub struct RouteDisplay<V: MapViewport, S: OverlaySink> {
    viewport: V,
    sink: S,
    style: SurfaceStyle,
    shown: Option<Shown>,
    pending_fit: Option<PendingFit>,
    generation: u64,
}

impl<V: MapViewport, S: OverlaySink> RouteDisplay<V, S> {
    pub fn new(viewport: V, sink: S, style: SurfaceStyle) -> Self {
        Self {
            viewport,
            sink,
            style,
            shown: None,
            pending_fit: None,
            generation: 0,
        }
    }

    pub fn state(&self) -> DisplayState {
        match self.shown {
            Some(_) => DisplayState::Displaying,
            None => DisplayState::Idle,
        }
    }

    pub fn route(&self) -> Option<&RouteData> {
        self.shown.as_ref().map(|shown| &shown.route)
    }

    pub fn overlay(&self) -> Option<&RouteOverlay> {
        self.shown.as_ref().map(|shown| &shown.overlay)
    }

    /// Displays `route`, replacing whatever was shown before.
    pub fn show(&mut self, route: RouteData, now: Instant) {
        self.generation += 1;
        let overlay = RouteOverlay::build(&route, &self.style);

        tracing::info!(
            generation = self.generation,
            steps = route.steps.len(),
            stops = overlay.stops.len(),
            replaced = self.shown.is_some(),
            "displaying route"
        );

        self.sink.clear();
        self.sink.render(&overlay);

        self.pending_fit = if overlay.bounds.is_empty() {
            None
        } else {
            Some(PendingFit {
                generation: self.generation,
                due: now + self.style.fit_delay,
            })
        };

        self.shown = Some(Shown {
            route,
            overlay,
            generation: self.generation,
        });
    }

    /// Draws the current overlay again without refitting the viewport.
    pub fn redraw(&mut self) {
        if let Some(shown) = &self.shown {
            self.sink.clear();
            self.sink.render(&shown.overlay);
        }
    }

    /// Returns to idle. A pending viewport fit is dropped.
    pub fn clear(&mut self) {
        if self.shown.take().is_some() {
            tracing::info!(generation = self.generation, "route cleared");
            self.sink.clear();
        }
        self.pending_fit = None;
    }

    /// When the host loop should next call [`poll`](Self::poll).
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending_fit.map(|fit| fit.due)
    }

    /// Runs the scheduled viewport fit once it is due. Returns whether the
    /// viewport was fitted.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(fit) = self.pending_fit else {
            return false;
        };
        if now < fit.due {
            return false;
        }
        self.pending_fit = None;

        match &self.shown {
            Some(shown) if shown.generation == fit.generation => {
                tracing::debug!(
                    generation = fit.generation,
                    points = shown.overlay.bounds.len(),
                    "fitting viewport to route"
                );
                self.viewport.fit_bounds(&shown.overlay.bounds, self.style.fit);
                true
            }
            _ => {
                tracing::debug!(generation = fit.generation, "dropping stale viewport fit");
                false
            }
        }
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::model::{RouteStep, StepKind};
    use crate::polyline::Coordinate;
    use crate::traits::FitOptions;

    #[derive(Default)]
    struct Camera {
        fits: Vec<(Vec<Coordinate>, FitOptions)>,
        zoom: i32,
    }

    impl MapViewport for Camera {
        fn fit_bounds(&mut self, points: &[Coordinate], options: FitOptions) {
            self.fits.push((points.to_vec(), options));
        }

        fn zoom_in(&mut self) {
            self.zoom += 1;
        }

        fn zoom_out(&mut self) {
            self.zoom -= 1;
        }
    }

    #[derive(Default)]
    struct Layer {
        rendered: usize,
        cleared: usize,
    }

    impl OverlaySink for Layer {
        fn render(&mut self, _overlay: &RouteOverlay) {
            self.rendered += 1;
        }

        fn clear(&mut self) {
            self.cleared += 1;
        }
    }

    fn route_at(lat: f64) -> RouteData {
        RouteData::from_steps(vec![RouteStep::new(StepKind::Arrive {
            at: Some("End".into()),
            location: Some((lat, 0.0).into()),
        })])
    }

    fn display() -> RouteDisplay<Camera, Layer> {
        RouteDisplay::new(Camera::default(), Layer::default(), SurfaceStyle::live_map())
    }

    #[test]
    fn test_fit_waits_for_delay_and_runs_once() {
        let mut display = display();
        let start = Instant::now();
        display.show(route_at(1.0), start);

        assert_eq!(display.state(), DisplayState::Displaying);
        assert!(!display.poll(start + Duration::from_millis(100)));
        assert!(display.poll(start + Duration::from_millis(300)));
        assert!(!display.poll(start + Duration::from_secs(5)));

        let fits = &display.viewport().fits;
        assert_eq!(fits.len(), 1);
        assert_eq!(fits[0].1.padding, Some((50, 50)));
        assert_eq!(fits[0].1.max_zoom, Some(16));
    }

    #[test]
    fn test_clear_cancels_pending_fit() {
        let mut display = display();
        let start = Instant::now();
        display.show(route_at(1.0), start);
        display.clear();

        assert_eq!(display.state(), DisplayState::Idle);
        assert_eq!(display.next_deadline(), None);
        assert!(!display.poll(start + Duration::from_secs(1)));
        assert!(display.viewport().fits.is_empty());
    }

    #[test]
    fn test_replacing_route_fits_only_the_new_one() {
        let mut display = display();
        let start = Instant::now();
        display.show(route_at(1.0), start);
        display.show(route_at(2.0), start + Duration::from_millis(200));

        assert!(!display.poll(start + Duration::from_millis(300)));
        assert!(display.poll(start + Duration::from_millis(500)));
        let fits = &display.viewport().fits;
        assert_eq!(fits.len(), 1);
        assert_eq!(fits[0].0, vec![Coordinate::new(2.0, 0.0)]);
    }

    #[test]
    fn test_route_without_coordinates_schedules_no_fit() {
        let mut display = display();
        display.show(RouteData::from_steps(Vec::new()), Instant::now());
        assert_eq!(display.next_deadline(), None);
        assert_eq!(display.sink().rendered, 1);
    }

    #[test]
    fn test_redraw_does_not_refit() {
        let mut display = display();
        let start = Instant::now();
        display.show(route_at(1.0), start);
        display.poll(start + Duration::from_secs(1));
        display.redraw();

        assert_eq!(display.sink().rendered, 2);
        assert_eq!(display.next_deadline(), None);
        assert_eq!(display.viewport().fits.len(), 1);
    }

    #[test]
    fn test_zoom_forwards_to_viewport() {
        let mut display = display();
        display.zoom_in();
        display.zoom_in();
        display.zoom_out();
        assert_eq!(display.viewport().zoom, 1);
    }
}
