//! Poster session
//!
//! Wires the search box, the map and the parameter reducer together the
//! way the poster page does. Single-threaded: events are method calls, and
//! the only suspension points are provider lookups and timer waits.

use crate::config::Config;
use crate::coord::{Coordinates, MapViewport};
use crate::error::Result;
use crate::geo::{LocationCandidate, Resolver};
use crate::map::{HeadlessMap, MapView, MapWidget};
use crate::poster::{GenerateRequest, GenerationParameters, Layer, PaperSize, PosterApi, PosterArtifact, Synchronizer};
use crate::search::{CaptureRegion, PagePoint, QueryController, ResolveRequest, SearchSettings};
use crate::timer::{TimerEvent, TimerQueue};
use std::time::Duration;
use tracing::debug;

/// One poster being composed
#[derive(Debug)]
pub struct PosterSession<R, W = HeadlessMap> {
    resolver: R,
    timers: TimerQueue<TimerEvent>,
    search: QueryController,
    sync: Synchronizer,
    map: MapView<W>,
    width_px: u32,
}

impl<R: Resolver> PosterSession<R, HeadlessMap> {
    /// Session backed by an in-memory map sized for the default paper
    pub fn headless(resolver: R, config: &Config) -> Self {
        let paper = config.defaults.paper_size.parse::<PaperSize>().unwrap_or_default();
        let width = config.map.width_px;
        let widget = HeadlessMap::new(width, paper.height_for_width(width));
        Self::new(resolver, widget, config)
    }

    /// Simulate a drag by a pixel offset, ending in a move-end
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.map.widget_mut().pan_by(dx, dy);
        self.on_move_end();
    }

    /// Simulate a zoom, ending in a zoom-end
    pub fn zoom_to(&mut self, zoom: u8) {
        self.map.widget_mut().set_zoom(zoom);
        self.on_zoom_end();
    }
}

impl<R: Resolver, W: MapWidget> PosterSession<R, W> {
    pub fn new(resolver: R, widget: W, config: &Config) -> Self {
        let initial = Coordinates::new(config.map.initial_lat, config.map.initial_lng);
        Self {
            resolver,
            timers: TimerQueue::new(),
            search: QueryController::new(SearchSettings::from_config(config)),
            sync: Synchronizer::from_config(config),
            map: MapView::mount(widget, initial, config.map.initial_zoom, config.map.resize_delay()),
            width_px: config.map.width_px,
        }
    }

    pub fn search(&self) -> &QueryController {
        &self.search
    }

    pub fn parameters(&self) -> &GenerationParameters {
        self.sync.parameters()
    }

    pub fn viewport(&self) -> MapViewport {
        self.map.viewport()
    }

    pub fn map(&self) -> &MapView<W> {
        &self.map
    }

    /// Poster shown in place of the map, if any
    pub fn artifact(&self) -> Option<&PosterArtifact> {
        self.sync.artifact()
    }

    /// Virtual time elapsed
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Whether timers are waiting to fire
    pub fn is_idle(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn set_search_region(&mut self, region: CaptureRegion) {
        self.search.set_region(region);
    }

    pub fn type_text(&mut self, text: &str) {
        self.search.on_text_changed(text, &mut self.timers);
    }

    /// Advance virtual time; returns the resolve requests that came due
    pub fn advance(&mut self, by: Duration) -> Vec<ResolveRequest> {
        let mut requests = Vec::new();
        for event in self.timers.advance(by) {
            match event {
                TimerEvent::Debounce(query) => requests.push(self.search.on_debounce_elapsed(query)),
                TimerEvent::Resize => self.on_resize_elapsed(),
            }
        }
        requests
    }

    /// Run a resolve request and feed the result back
    pub async fn fulfill(&mut self, request: ResolveRequest) -> bool {
        let candidates = self.resolver.resolve(&request.query).await;
        self.search.on_resolved(request.id, candidates)
    }

    /// Wait on the tokio clock until no timers remain, resolving as they fire
    pub async fn settle(&mut self) {
        while let Some(delay) = self.timers.next_delay() {
            tokio::time::sleep(delay).await;
            for request in self.advance(delay) {
                self.fulfill(request).await;
            }
        }
    }

    pub fn suggestions(&self) -> &[LocationCandidate] {
        self.search.suggestions()
    }

    /// Pick a candidate: close the panel and navigate to it
    pub fn select(&mut self, candidate: &LocationCandidate) {
        let chosen = self.search.on_select(candidate, &mut self.timers);
        self.go_to(&chosen);
    }

    /// Pick the `index`th suggestion
    pub fn select_suggestion(&mut self, index: usize) -> Option<LocationCandidate> {
        let candidate = self.search.suggestions().get(index)?.clone();
        self.select(&candidate);
        Some(candidate)
    }

    /// Explicit "go there"; returns false when there is nowhere to go
    pub fn navigate(&mut self, candidate: Option<&LocationCandidate>) -> bool {
        match self.search.on_navigate_requested(candidate) {
            Some(target) => {
                self.go_to(&target);
                true
            }
            None => false,
        }
    }

    /// Re-center on `target`; the widget reports the move like any other
    fn go_to(&mut self, target: &LocationCandidate) {
        let command = self.sync.apply_selection(target);
        self.map.apply(command);
        self.on_move_end();
    }

    /// Current request body, as [`PosterSession::submit`] would send it
    pub fn submission(&self) -> Result<GenerateRequest> {
        self.sync.submission()
    }

    pub fn pointer_down(&mut self, point: PagePoint) -> bool {
        self.search.on_pointer_down(point)
    }

    pub fn focus_lost(&mut self) {
        self.search.on_focus_lost();
    }

    /// Forward a move-end from the widget
    pub fn on_move_end(&mut self) {
        let viewport = self.map.on_move_end();
        self.sync.apply_viewport_change(&viewport);
    }

    /// Forward a zoom-end from the widget
    pub fn on_zoom_end(&mut self) {
        let viewport = self.map.on_zoom_end();
        self.sync.apply_viewport_change(&viewport);
    }

    fn on_resize_elapsed(&mut self) {
        self.map.on_resize_elapsed();
        // The resized map reports a new extent; keep the radius in step once
        // a location is in play, but don't invent one from the initial view
        if self.sync.parameters().center().is_some() {
            self.on_move_end();
        }
    }

    pub fn set_theme(&mut self, theme: &str) {
        self.sync.set_theme(theme);
    }

    pub fn set_layers(&mut self, layers: Vec<Layer>) {
        self.sync.set_layers(layers);
    }

    pub fn set_distance(&mut self, meters: u32) {
        self.sync.set_distance(meters);
    }

    /// Change the paper; the map container takes the new aspect ratio and
    /// the widget is resized once layout settles
    pub fn set_paper_size(&mut self, paper: PaperSize) {
        if self.sync.set_paper_size(paper) {
            debug!(%paper, "container aspect changed");
            let height = paper.height_for_width(self.width_px);
            self.map.widget_mut().resize_container(self.width_px, height);
            self.map.on_container_resized(&mut self.timers);
        }
    }

    /// Submit the current parameters and show the result
    pub async fn submit(&mut self, api: &PosterApi) -> Result<PosterArtifact> {
        let request = self.submission()?;
        let artifact = api.generate(&request).await?;
        self.sync.show_artifact(artifact.clone());
        Ok(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::{haversine_distance, viewport_radius};
    use crate::error::Error;
    use crate::geo::test_support::{candidate, spawn};
    use axum::{routing::post, Json, Router};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Resolver answering from a fixed table
    struct TableResolver {
        table: HashMap<String, Vec<LocationCandidate>>,
        calls: Arc<AtomicUsize>,
    }

    impl TableResolver {
        fn new(entries: Vec<(&str, Vec<LocationCandidate>)>) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let resolver = Self {
                table: entries.into_iter().map(|(q, c)| (q.to_string(), c)).collect(),
                calls: calls.clone(),
            };
            (resolver, calls)
        }
    }

    impl Resolver for TableResolver {
        async fn resolve(&self, query: &str) -> Vec<LocationCandidate> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.table.get(query).cloned().unwrap_or_default()
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn paris() -> LocationCandidate {
        candidate("Paris", "France", 48.8566, 2.3522)
    }

    fn session() -> (PosterSession<TableResolver>, Arc<AtomicUsize>) {
        let (resolver, calls) = TableResolver::new(vec![
            ("Paris", vec![paris(), candidate("Paris", "United States", 33.66, -95.55)]),
            ("Tokyo", vec![candidate("Tokyo", "Japan", 35.6762, 139.6503)]),
        ]);
        (PosterSession::headless(resolver, &Config::default()), calls)
    }

    #[tokio::test]
    async fn test_typing_to_suggestions() {
        let (mut s, calls) = session();

        s.type_text("P");
        s.type_text("Pa");
        s.type_text("Paris");
        assert!(s.advance(ms(299)).is_empty());

        let requests = s.advance(ms(1));
        assert_eq!(requests.len(), 1);
        assert!(s.search().is_loading());

        for request in requests {
            assert!(s.fulfill(request).await);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(s.suggestions().len(), 2);
        assert!(s.search().is_open());
        assert!(!s.search().is_loading());
    }

    #[tokio::test]
    async fn test_settle_drives_timers() {
        let (mut s, _) = session();

        s.type_text("Tokyo");
        s.settle().await;

        assert!(s.is_idle());
        assert_eq!(s.suggestions()[0].city(), "Tokyo");
        assert_eq!(s.now(), ms(300));
    }

    #[tokio::test]
    async fn test_short_query_never_resolves() {
        let (mut s, calls) = session();

        s.type_text("T");
        assert!(s.advance(ms(1000)).is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_selection_drives_map_and_parameters() {
        let (mut s, _) = session();

        s.type_text("Paris");
        s.settle().await;
        let chosen = s.select_suggestion(0).unwrap();

        assert_eq!(chosen, paris());
        assert!(!s.search().is_open());
        assert_eq!(s.viewport().center, Coordinates::new(48.8566, 2.3522));
        assert_eq!(s.viewport().zoom, 13);
        assert_eq!(s.parameters().center(), Some(Coordinates::new(48.8566, 2.3522)));
        assert_eq!(s.parameters().city(), "Paris");
        assert_eq!(s.parameters().distance_meters(), viewport_radius(&s.viewport()));
    }

    #[test]
    fn test_pan_and_zoom_recompute_radius() {
        let (mut s, _) = session();
        s.select(&paris());

        s.zoom_to(11);
        let viewport = s.viewport();
        let north = Coordinates::new(viewport.bounds.north(), viewport.center.lng);
        let expected = haversine_distance(viewport.center, north).round() as u32;
        assert_eq!(s.parameters().distance_meters(), expected);

        s.pan_by(200.0, 0.0);
        let params = s.parameters();
        assert!(params.lng().unwrap() > 2.3522);
        assert_eq!(params.distance_meters(), viewport_radius(&s.viewport()));
        assert_eq!(params.city(), "Paris");
    }

    #[test]
    fn test_navigate_uses_last_selection() {
        let (mut s, _) = session();
        assert!(!s.navigate(None));

        s.select(&paris());
        s.pan_by(500.0, 500.0);
        assert_ne!(s.viewport().center, paris().coordinates());

        assert!(s.navigate(None));
        assert_eq!(s.viewport().center, paris().coordinates());
        assert_eq!(s.viewport().zoom, 13);
    }

    #[test]
    fn test_click_outside_closes_panel() {
        let (mut s, _) = session();
        s.set_search_region(CaptureRegion::new(0.0, 0.0, 320.0, 48.0));
        // Closed panel: nothing to close
        assert!(!s.pointer_down(PagePoint::new(400.0, 400.0)));
        s.focus_lost();
        assert!(!s.search().is_open());
    }

    #[test]
    fn test_paper_change_resizes_after_delay() {
        let (mut s, _) = session();
        s.select(&paris());
        s.zoom_to(13);
        let before = s.parameters().distance_meters();

        s.set_paper_size(PaperSize::Square);
        assert_eq!(s.map().widget().size(), (600, 800));

        s.advance(ms(99));
        assert_eq!(s.map().widget().size(), (600, 800));

        s.advance(ms(1));
        assert_eq!(s.map().widget().size(), (600, 600));
        assert!(s.parameters().distance_meters() < before);
    }

    #[test]
    fn test_same_aspect_does_not_resize() {
        let (mut s, _) = session();
        s.set_paper_size(PaperSize::ThreeFour);
        assert!(s.is_idle());
    }

    #[test]
    fn test_resize_before_selection_keeps_center_unset() {
        let (mut s, _) = session();
        s.set_paper_size(PaperSize::Phone);
        s.advance(ms(100));

        assert_eq!(s.parameters().center(), None);
        assert_eq!(s.map().widget().invalidations(), 1);
    }

    #[tokio::test]
    async fn test_submit_without_location_is_blocked() {
        let (mut s, _) = session();
        // Nothing listens here; the error must come before any request
        let api = PosterApi::new(reqwest::Client::new(), "http://127.0.0.1:9");

        assert!(matches!(s.submit(&api).await, Err(Error::MissingCoordinates)));
    }

    #[tokio::test]
    async fn test_selection_clears_displayed_poster() {
        let router = Router::new().route(
            "/api/generate",
            post(|| async {
                Json(serde_json::json!({
                    "url": "/api/posters/img/paris.png",
                    "filename": "paris.png"
                }))
            }),
        );
        let base = spawn(router).await;
        let api = PosterApi::new(reqwest::Client::new(), &base);

        let (mut s, _) = session();
        s.select(&paris());
        let artifact = s.submit(&api).await.unwrap();
        assert_eq!(s.artifact(), Some(&artifact));

        let tokyo = candidate("Tokyo", "Japan", 35.6762, 139.6503);
        s.select(&tokyo);

        assert!(s.artifact().is_none());
        assert_eq!(s.viewport().center, tokyo.coordinates());
        assert_eq!(s.viewport().zoom, 13);
    }
}
