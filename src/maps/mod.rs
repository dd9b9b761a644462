//! Opens coordinates in a map viewer, either as browser tabs or as inline
//! iframes handed to a display sink.

mod items;
mod options;
mod sink;
mod url;

pub use items::{CoordItem, Coords, Geometry, GeometryTable, Point};
pub use options::{InlineMode, LaunchOptions, OpenIn};
pub use sink::{DisplaySink, InlineFrame, SystemBrowser, UrlOpener};
pub use url::{embed_url, search_url};

use crate::error::LaunchError;
use crate::geo::Coordinate;

/// Most coordinates opened by a single call.
pub const MAX_COORDS: usize = 50;

pub struct MapLauncher {
    options: LaunchOptions,
    opener: Box<dyn UrlOpener>,
    display: Option<Box<dyn DisplaySink>>,
}

impl MapLauncher {
    /// Launcher that opens browser tabs through the system handler.
    pub fn new(options: LaunchOptions) -> Self {
        Self::with_opener(options, Box::new(SystemBrowser::default()))
    }

    pub fn with_opener(options: LaunchOptions, opener: Box<dyn UrlOpener>) -> Self {
        Self {
            options,
            opener,
            display: None,
        }
    }

    /// Attaches the host's inline display capability.
    pub fn with_display(mut self, display: Box<dyn DisplaySink>) -> Self {
        self.display = Some(display);
        self
    }

    pub fn options(&self) -> &LaunchOptions {
        &self.options
    }

    /// Opens every coordinate in `coords`. All items are checked before
    /// anything is opened; an open failure stops the remaining items.
    pub fn open(&mut self, coords: impl Into<Coords>) -> Result<(), LaunchError> {
        let coords = coords.into().resolve()?;
        self.open_all(&coords)
    }

    /// Opens each point of the configured geometry column.
    pub fn open_geometry_table(&mut self, table: &GeometryTable) -> Result<(), LaunchError> {
        let coords = table.points(&self.options.geometry_column)?;
        self.open_all(&coords)
    }

    fn open_all(&mut self, coords: &[Coordinate]) -> Result<(), LaunchError> {
        if coords.len() > MAX_COORDS {
            return Err(LaunchError::CapacityExceeded {
                requested: coords.len(),
                limit: MAX_COORDS,
            });
        }
        if self.options.open_in == OpenIn::Inline && self.display.is_none() {
            return Err(LaunchError::DisplayUnavailable);
        }
        for &coord in coords {
            self.open_one(coord)?;
        }
        Ok(())
    }

    fn open_one(&mut self, coord: Coordinate) -> Result<(), LaunchError> {
        match self.options.open_in {
            OpenIn::Browser => {
                let url = search_url(coord);
                tracing::debug!(%url, "opening map in browser");
                self.opener
                    .open(&url)
                    .map_err(|source| LaunchError::Open { url, source })
            }
            OpenIn::Inline => {
                let display = self.display.as_mut().ok_or(LaunchError::DisplayUnavailable)?;
                let api_key = self.options.api_key.as_deref();
                if api_key.map_or(true, str::is_empty) {
                    tracing::warn!(
                        "no api key set, keyless embed may be refused by the map service"
                    );
                }
                let frame = match self.options.inline_mode {
                    InlineMode::Iframe => InlineFrame::new(embed_url(coord, api_key)),
                };
                tracing::debug!(url = %frame.src, "displaying inline map");
                display.display(&frame).map_err(|source| LaunchError::Open {
                    url: frame.src.clone(),
                    source,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder {
        urls: Rc<RefCell<Vec<String>>>,
        fail_after: Option<usize>,
    }

    impl UrlOpener for Recorder {
        fn open(&mut self, url: &str) -> io::Result<()> {
            let mut urls = self.urls.borrow_mut();
            if self.fail_after == Some(urls.len()) {
                return Err(io::Error::new(io::ErrorKind::NotFound, "no browser"));
            }
            urls.push(url.to_owned());
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct Frames(Rc<RefCell<Vec<InlineFrame>>>);

    impl DisplaySink for Frames {
        fn display(&mut self, frame: &InlineFrame) -> io::Result<()> {
            self.0.borrow_mut().push(frame.clone());
            Ok(())
        }
    }

    fn browser() -> (MapLauncher, Recorder) {
        let recorder = Recorder::default();
        let launcher =
            MapLauncher::with_opener(LaunchOptions::default(), Box::new(recorder.clone()));
        (launcher, recorder)
    }

    #[test]
    fn opens_single_pair() {
        let (mut launcher, recorder) = browser();
        launcher.open((51.5, -0.1)).unwrap();
        assert_eq!(
            *recorder.urls.borrow(),
            vec!["https://www.google.com/maps/search/?api=1&query=51.5,-0.1"]
        );
    }

    #[test]
    fn opens_point_as_lat_lon() {
        let (mut launcher, recorder) = browser();
        launcher.open(Point::new(2.3522, 48.8566)).unwrap();
        assert_eq!(
            *recorder.urls.borrow(),
            vec!["https://www.google.com/maps/search/?api=1&query=48.8566,2.3522"]
        );
    }

    #[test]
    fn opens_mixed_collection_in_order() {
        let (mut launcher, recorder) = browser();
        let items: Vec<CoordItem> = vec![(1.0, 2.0).into(), Point::new(4.0, 3.0).into()];
        launcher.open(items).unwrap();
        assert_eq!(
            *recorder.urls.borrow(),
            vec![
                "https://www.google.com/maps/search/?api=1&query=1,2",
                "https://www.google.com/maps/search/?api=1&query=3,4",
            ]
        );
    }

    #[test]
    fn refuses_more_than_fifty() {
        let (mut launcher, recorder) = browser();
        let many: Vec<(f64, f64)> = (0..51).map(|i| (i as f64, 0.0)).collect();
        let err = launcher.open(many).unwrap_err();
        assert!(matches!(err, LaunchError::CapacityExceeded { requested: 51, limit: 50 }));
        assert!(recorder.urls.borrow().is_empty());

        let fifty: Vec<(f64, f64)> = (0..50).map(|i| (i as f64, 0.0)).collect();
        launcher.open(fifty).unwrap();
        assert_eq!(recorder.urls.borrow().len(), 50);
    }

    #[test]
    fn unsupported_item_opens_nothing() {
        let (mut launcher, recorder) = browser();
        let items = vec![
            CoordItem::from((1.0, 2.0)),
            CoordItem::Unsupported { type_name: "number".into() },
            CoordItem::from((3.0, 4.0)),
        ];
        let err = launcher.open(items).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported coordinate item: number");
        assert!(recorder.urls.borrow().is_empty());
    }

    #[test]
    fn open_failure_stops_remaining() {
        let recorder = Recorder {
            fail_after: Some(1),
            ..Recorder::default()
        };
        let mut launcher =
            MapLauncher::with_opener(LaunchOptions::default(), Box::new(recorder.clone()));
        let err = launcher.open(vec![(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]).unwrap_err();
        assert!(matches!(err, LaunchError::Open { ref url, .. } if url.ends_with("query=2,2")));
        assert_eq!(recorder.urls.borrow().len(), 1);
    }

    #[test]
    fn inline_without_display_fails() {
        let recorder = Recorder::default();
        let mut launcher =
            MapLauncher::with_opener(LaunchOptions::inline(None), Box::new(recorder.clone()));
        assert!(matches!(launcher.open((1.0, 2.0)), Err(LaunchError::DisplayUnavailable)));
        assert!(recorder.urls.borrow().is_empty());
    }

    #[test]
    fn inline_displays_keyed_frames() {
        let recorder = Recorder::default();
        let frames = Frames::default();
        let options = LaunchOptions::inline(Some("secret"));
        let mut launcher = MapLauncher::with_opener(options, Box::new(recorder.clone()))
            .with_display(Box::new(frames.clone()));
        launcher.open(vec![(51.5, -0.1), (48.8566, 2.3522)]).unwrap();

        let shown = frames.0.borrow();
        assert_eq!(shown.len(), 2);
        assert_eq!(
            shown[0].src,
            "https://www.google.com/maps/embed/v1/place?key=secret&q=51.5,-0.1"
        );
        assert_eq!((shown[1].width, shown[1].height), (900, 600));
        assert!(recorder.urls.borrow().is_empty());
    }

    #[test]
    fn inline_without_key_uses_keyless_embed() {
        let recorder = Recorder::default();
        let frames = Frames::default();
        let mut launcher =
            MapLauncher::with_opener(LaunchOptions::inline(None), Box::new(recorder.clone()))
                .with_display(Box::new(frames.clone()));
        launcher.open(Point::new(2.3522, 48.8566)).unwrap();

        assert_eq!(
            *frames.0.borrow(),
            vec![InlineFrame::new(
                "https://www.google.com/maps?q=48.8566,2.3522&output=embed".into()
            )]
        );
        assert!(recorder.urls.borrow().is_empty());
    }

    #[test]
    fn geometry_table_uses_configured_column() {
        let recorder = Recorder::default();
        let options = LaunchOptions {
            geometry_column: "geom".into(),
            ..LaunchOptions::default()
        };
        let mut launcher = MapLauncher::with_opener(options, Box::new(recorder.clone()));
        let table = GeometryTable::new()
            .with_column("geom", vec![Geometry::Point(Point::new(-0.1, 51.5))]);
        launcher.open_geometry_table(&table).unwrap();
        assert_eq!(
            *recorder.urls.borrow(),
            vec!["https://www.google.com/maps/search/?api=1&query=51.5,-0.1"]
        );

        let missing = GeometryTable::new().with_column("geometry", vec![]);
        assert!(matches!(
            launcher.open_geometry_table(&missing),
            Err(LaunchError::MissingColumn(c)) if c == "geom"
        ));
    }

    #[test]
    fn geometry_table_capacity() {
        let (mut launcher, recorder) = browser();
        let points = (0..51).map(|i| Geometry::Point(Point::new(0.0, i as f64))).collect();
        let table = GeometryTable::new().with_column("geometry", points);
        assert!(matches!(
            launcher.open_geometry_table(&table),
            Err(LaunchError::CapacityExceeded { .. })
        ));
        assert!(recorder.urls.borrow().is_empty());
    }
}
