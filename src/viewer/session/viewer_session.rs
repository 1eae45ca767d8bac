use std::borrow::Cow;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, instrument, warn};

use crate::viewer::analysis::{
    Direction, ProfileOptions, ProfileResult, extract, histogram, hsv_at, measure, value_at,
};
use crate::viewer::buffer::PixelBuffer;
use crate::viewer::color::{ChannelMode, PixelTransform, hsv_or_raw, project};
use crate::viewer::common::error::{Result, ViewerError};
use crate::viewer::common::geometry::{Point, Rect};
use crate::viewer::config::{MAX_GRID, ViewerConfig};
use crate::viewer::io::{
    ImageCatalog, ImageReader, ImageWriter, PageMove, RasterImageReader, StandardTiffWriter,
};
use crate::viewer::overlay::{Annotation, Color};
use crate::viewer::selection::{CropPolicy, DragOutcome, RegionSelector, SelectionState};
use crate::viewer::session::types::{HistogramReport, InteractionMode, PointInfo, ViewerEvent};
use crate::viewer::timing::{RenderStep, RenderTimings, Timer};
use crate::viewer::viewport::{CoordinateMapper, FitTransform, fit, resize};

/// Display frame `(height, width)` used until the caller reports its own.
pub const DEFAULT_FRAME_SIZE: (usize, usize) = (720, 1280);

/// One image on the current page, from decoded source to display buffer.
struct Tile {
    index: usize,
    path: PathBuf,
    source: PixelBuffer,
    /// Transformed and projected, never cropped; analyses read this
    native: PixelBuffer,
    transform: FitTransform,
    /// Fitted display buffer before overlays
    fitted: PixelBuffer,
    display: PixelBuffer,
}

/// Overlay state shared by every tile of a redraw.
#[derive(Clone, Copy)]
struct Overlays {
    annotation: Option<Annotation>,
    outline: Option<Rect>,
    thickness: usize,
    color: Color,
}

impl Overlays {
    fn apply(&self, fitted: &PixelBuffer, mapper: &CoordinateMapper) -> PixelBuffer {
        let mut out = fitted.clone();
        if let Some(annotation) = self.annotation {
            out = annotation.render(&out, mapper, self.thickness, self.color);
        }
        if let Some(rect) = self.outline {
            out = Annotation::Rectangle(rect).render(&out, mapper, self.thickness, self.color);
        }
        out
    }
}

/// Explicit state of one viewer: what is loaded, how it is shown and what the
/// pointer currently does.
pub struct ViewerSession<R: ImageReader = RasterImageReader, W: ImageWriter = StandardTiffWriter> {
    reader: R,
    writer: W,
    config: ViewerConfig,
    catalog: ImageCatalog,
    channel_mode: ChannelMode,
    transform: Option<Box<dyn PixelTransform>>,
    mode: InteractionMode,
    zoom: RegionSelector,
    gesture: RegionSelector,
    annotation: Option<Annotation>,
    frame: (usize, usize),
    tiles: Vec<Option<Tile>>,
}

impl ViewerSession<RasterImageReader, StandardTiffWriter> {
    /// Session reading any raster format `image` supports and saving TIFF.
    pub fn new(config: ViewerConfig) -> Self {
        Self::with_custom(RasterImageReader, StandardTiffWriter, config)
    }

    /// Returns the session held in `slot`, creating it on first use.
    pub fn reuse_or_create(slot: &mut Option<Self>, config: ViewerConfig) -> &mut Self {
        if slot.is_some() {
            debug!("Reusing existing viewer session");
        }
        slot.get_or_insert_with(|| Self::new(config))
    }
}

impl<R: ImageReader> ViewerSession<R, StandardTiffWriter> {
    pub fn with_reader(reader: R, config: ViewerConfig) -> Self {
        Self::with_custom(reader, StandardTiffWriter, config)
    }
}

impl<R: ImageReader, W: ImageWriter> ViewerSession<R, W> {
    pub fn with_custom(reader: R, writer: W, config: ViewerConfig) -> Self {
        let zoom = RegionSelector::new(config.drag_interval, config.min_selection_extent);
        let gesture = RegionSelector::new(config.drag_interval, 1);
        Self {
            reader,
            writer,
            config,
            catalog: ImageCatalog::default(),
            channel_mode: ChannelMode::default(),
            transform: None,
            mode: InteractionMode::default(),
            zoom,
            gesture,
            annotation: None,
            frame: DEFAULT_FRAME_SIZE,
            tiles: Vec::new(),
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ImageCatalog {
        &self.catalog
    }

    pub fn channel_mode(&self) -> ChannelMode {
        self.channel_mode
    }

    pub fn interaction_mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn annotation(&self) -> Option<Annotation> {
        self.annotation
    }

    pub fn zoom_state(&self) -> SelectionState {
        self.zoom.state()
    }

    /// Native rectangle currently applied to every tile.
    pub fn crop_region(&self) -> Option<Rect> {
        self.zoom.crop_region()
    }

    pub fn frame_size(&self) -> (usize, usize) {
        self.frame
    }

    /// Number of tiles shown per page.
    pub fn tile_count(&self) -> usize {
        self.config.layout().tile_count()
    }

    pub fn display(&self, tile: usize) -> Option<&PixelBuffer> {
        self.slot(tile).map(|t| &t.display)
    }

    pub fn native(&self, tile: usize) -> Option<&PixelBuffer> {
        self.slot(tile).map(|t| &t.native)
    }

    pub fn fit_transform(&self, tile: usize) -> Option<FitTransform> {
        self.slot(tile).map(|t| t.transform)
    }

    pub fn tile_path(&self, tile: usize) -> Option<&Path> {
        self.slot(tile).map(|t| t.path.as_path())
    }

    /// Scans `dir` with the configured pattern and shows the first page.
    #[instrument(skip(self, dir), fields(dir = %dir.as_ref().display()))]
    pub fn open_dir(&mut self, dir: impl AsRef<Path>) -> Result<usize> {
        let catalog = ImageCatalog::scan(dir, &self.config.pattern)?;
        let count = catalog.len();
        self.set_catalog(catalog);
        Ok(count)
    }

    /// Shows the given files, in order.
    pub fn open_files(&mut self, paths: Vec<PathBuf>) {
        self.set_catalog(ImageCatalog::from_paths(paths));
    }

    pub fn set_catalog(&mut self, catalog: ImageCatalog) {
        self.catalog = catalog;
        self.load_page();
    }

    pub fn next_page(&mut self) -> PageMove {
        let step = self.tile_count();
        let outcome = self.catalog.next_page(step);
        if outcome == PageMove::Moved {
            self.load_page();
        } else {
            info!("End of images");
        }
        outcome
    }

    pub fn prev_page(&mut self) -> PageMove {
        let step = self.tile_count();
        let outcome = self.catalog.prev_page(step);
        if outcome == PageMove::First {
            info!("First image");
        }
        self.load_page();
        outcome
    }

    /// Changes the tile grid; each dimension is clamped to `1..=3`.
    pub fn set_grid(&mut self, rows: usize, cols: usize) {
        self.config.rows = rows.clamp(1, MAX_GRID);
        self.config.cols = cols.clamp(1, MAX_GRID);
        info!("Grid set to {}x{}", self.config.rows, self.config.cols);
        self.load_page();
    }

    pub fn resize_frame(&mut self, height: usize, width: usize) {
        self.frame = (height.max(1), width.max(1));
        debug!(height, width, "Frame resized");
        self.rebuild();
    }

    pub fn set_channel_mode(&mut self, mode: ChannelMode) {
        if self.channel_mode == mode {
            return;
        }
        info!("Channel mode set to {}", mode);
        self.channel_mode = mode;
        self.rebuild();
    }

    /// Registers a processing step run on every loaded image before projection.
    pub fn set_transform(&mut self, transform: impl PixelTransform + 'static) {
        info!("Pixel transform set");
        self.transform = Some(Box::new(transform));
        self.rebuild();
    }

    pub fn clear_transform(&mut self) {
        if self.transform.take().is_some() {
            info!("Pixel transform cleared");
            self.rebuild();
        }
    }

    /// Switches what pointer gestures do. Clears the annotation and the crop region.
    pub fn set_interaction_mode(&mut self, mode: InteractionMode) {
        info!("Interaction mode set to {}", mode);
        self.mode = mode;
        self.annotation = None;
        self.zoom.clear();
        self.gesture.clear();
        self.rebuild();
    }

    /// Re-applies the last committed zoom rectangle.
    pub fn set_zoom(&mut self) {
        let before = self.zoom.state();
        self.zoom.set_zoom();
        if self.zoom.state() != before {
            info!(region = ?self.zoom.crop_region(), "Zoom set");
            self.rebuild();
        }
    }

    pub fn unset_zoom(&mut self) {
        let before = self.zoom.state();
        self.zoom.unset_zoom();
        if self.zoom.state() != before {
            info!("Zoom unset");
            self.rebuild();
        }
    }

    pub fn pointer_press(&mut self, tile: usize, dx: i64, dy: i64, now: Instant) -> Result<ViewerEvent> {
        let point = self.native_point(tile, dx, dy)?;

        match self.mode {
            InteractionMode::Info => {
                self.zoom.press(point, now);
                Ok(ViewerEvent::Ignored)
            }
            InteractionMode::ProfileHorizontal => self.profile(tile, point, Direction::Horizontal),
            InteractionMode::ProfileVertical => self.profile(tile, point, Direction::Vertical),
            InteractionMode::Cross => {
                debug!(x = point.x, y = point.y, "Cross placed");
                self.annotation = Some(Annotation::cross(point));
                self.redraw_overlays();
                Ok(ViewerEvent::Redraw)
            }
            InteractionMode::Histogram | InteractionMode::HistogramHsv => {
                self.gesture.clear();
                self.gesture.press(point, now);
                Ok(ViewerEvent::Ignored)
            }
        }
    }

    pub fn pointer_drag(&mut self, tile: usize, dx: i64, dy: i64, now: Instant) -> Result<ViewerEvent> {
        let point = self.native_point(tile, dx, dy)?;

        match self.mode {
            InteractionMode::Info => match self.zoom.drag(point, now) {
                DragOutcome::PreviewRedraw(_) => {
                    self.redraw_overlays();
                    Ok(ViewerEvent::PreviewRedraw)
                }
                DragOutcome::Ignored => Ok(ViewerEvent::Ignored),
            },
            mode if mode.is_histogram() => match self.gesture.drag(point, now) {
                DragOutcome::PreviewRedraw(rect) => {
                    self.annotation = Some(Annotation::Rectangle(rect));
                    self.redraw_overlays();
                    Ok(ViewerEvent::PreviewRedraw)
                }
                DragOutcome::Ignored => Ok(ViewerEvent::Ignored),
            },
            _ => Ok(ViewerEvent::Ignored),
        }
    }

    pub fn pointer_release(&mut self, tile: usize, dx: i64, dy: i64) -> Result<ViewerEvent> {
        let point = self.native_point(tile, dx, dy)?;

        match self.mode {
            InteractionMode::Info => {
                if self.zoom.state() != SelectionState::Selecting {
                    return Ok(ViewerEvent::Ignored);
                }
                match self.zoom.release(point) {
                    Some(rect) => {
                        info!(?rect, "Zoom region committed");
                        self.rebuild();
                    }
                    None => self.redraw_overlays(),
                }
                Ok(ViewerEvent::Redraw)
            }
            mode if mode.is_histogram() => {
                if self.gesture.state() != SelectionState::Selecting {
                    return Ok(ViewerEvent::Ignored);
                }
                let Some(rect) = self.gesture.release(point) else {
                    self.annotation = None;
                    self.redraw_overlays();
                    return Ok(ViewerEvent::Redraw);
                };
                self.gesture.clear();
                self.annotation = Some(Annotation::Rectangle(rect));
                self.redraw_overlays();
                let report = self.histogram_report(tile, rect)?;
                Ok(ViewerEvent::Histogram(report))
            }
            _ => Ok(ViewerEvent::Ignored),
        }
    }

    /// Point info under the pointer, with the distance to the cross-hair in
    /// `Cross` mode.
    pub fn pointer_move(&self, tile: usize, dx: i64, dy: i64) -> Result<PointInfo> {
        let mut info = self.inspect(tile, dx, dy)?;
        if self.mode == InteractionMode::Cross {
            if let Some(Annotation::Cross { x, y }) = self.annotation {
                info.measurement = Some(measure(
                    Point::new(x, y),
                    Point::new(info.x, info.y),
                    self.config.pixel_pitch,
                ));
            }
        }
        Ok(info)
    }

    /// File and pixel information for the native pixel under display `(dx, dy)`.
    pub fn inspect(&self, tile: usize, dx: i64, dy: i64) -> Result<PointInfo> {
        let t = self.tile(tile)?;
        let point = t.transform.mapper().to_native(dx, dy);

        let dir = t
            .path
            .parent()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file = t
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(PointInfo {
            path: t.path.clone(),
            dir,
            file,
            index: t.index,
            tile,
            ratio: t.transform.ratio,
            x: point.x,
            y: point.y,
            value: value_at(&t.native, point.x, point.y),
            hsv: hsv_at(&t.native, point.x, point.y),
            width: t.native.width(),
            height: t.native.height(),
            measurement: None,
        })
    }

    /// Writes the display buffer of `tile`, overlays included.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save_display(&self, tile: usize, path: impl AsRef<Path>) -> Result<()> {
        let t = self.tile(tile)?;
        let path = path.as_ref();
        let mut file = File::create(path)
            .map_err(|e| ViewerError::OutputWriteError(format!("{}: {}", path.display(), e)))?;
        self.writer.write_image(&t.display, &mut file, self.config.compression)?;
        info!("Saved tile {} to {}", tile, path.display());
        Ok(())
    }

    fn slot(&self, tile: usize) -> Option<&Tile> {
        self.tiles.get(tile).and_then(Option::as_ref)
    }

    fn tile(&self, tile: usize) -> Result<&Tile> {
        self.slot(tile).ok_or(ViewerError::EmptyTile(tile))
    }

    fn native_point(&self, tile: usize, dx: i64, dy: i64) -> Result<Point> {
        Ok(self.tile(tile)?.transform.mapper().to_native(dx, dy))
    }

    fn profile(&self, tile: usize, point: Point, direction: Direction) -> Result<ViewerEvent> {
        let t = self.tile(tile)?;
        let options = ProfileOptions {
            width: self.config.profile_width,
            ..ProfileOptions::default()
        };
        let result: ProfileResult = extract(&t.native, point.x, point.y, direction, &options);
        debug!(tile, ?direction, len = result.len(), "Profile extracted");
        Ok(ViewerEvent::Profile(result))
    }

    fn histogram_report(&self, tile: usize, rect: Rect) -> Result<HistogramReport> {
        let t = self.tile(tile)?;

        let (buffer, hsv) = if self.mode == InteractionMode::HistogramHsv {
            hsv_or_raw(&t.native)
        } else {
            (Cow::Borrowed(&t.native), false)
        };

        let corners = |p: usize, q: usize| (p as i64, q as i64);
        let result = histogram(&buffer, corners(rect.x0, rect.y0), corners(rect.x1, rect.y1))?;
        Ok(HistogramReport::new(result, hsv))
    }

    fn overlays(&self) -> Overlays {
        let outline = match (self.zoom.state(), self.config.crop_policy) {
            (SelectionState::Selecting, _) => self.zoom.draft(),
            (SelectionState::Active, CropPolicy::DrawOnly) => self.zoom.crop_region(),
            _ => None,
        };
        Overlays {
            annotation: self.annotation,
            outline,
            thickness: self.config.overlay_thickness,
            color: self.config.overlay_color,
        }
    }

    /// Reads every image of the current page into its tile.
    #[instrument(skip(self), fields(page_start = self.catalog.page_start()))]
    fn load_page(&mut self) {
        let page: Vec<(usize, PathBuf)> = self
            .catalog
            .page(self.tile_count())
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, path)| (self.catalog.page_start() + i, path))
            .collect();

        self.tiles = page
            .into_iter()
            .map(|(index, path)| match self.load_tile(index, &path) {
                Ok(tile) => Some(tile),
                Err(e) => {
                    warn!("Tile for {} left empty: {}", path.display(), e);
                    None
                }
            })
            .collect();

        info!("Loaded {} tiles", self.tiles.iter().flatten().count());
    }

    /// Re-renders every loaded tile from its decoded source.
    fn rebuild(&mut self) {
        let tiles = std::mem::take(&mut self.tiles);
        self.tiles = tiles
            .into_iter()
            .map(|slot| {
                let tile = slot?;
                let mut timings = RenderTimings::new();
                match self.render(tile.index, tile.path.clone(), tile.source, &mut timings) {
                    Ok(tile) => Some(tile),
                    Err(e) => {
                        warn!("Tile for {} left empty: {}", tile.path.display(), e);
                        None
                    }
                }
            })
            .collect();
    }

    fn redraw_overlays(&mut self) {
        let overlays = self.overlays();
        for tile in self.tiles.iter_mut().flatten() {
            tile.display = overlays.apply(&tile.fitted, &tile.transform.mapper());
        }
    }

    fn load_tile(&self, index: usize, path: &Path) -> Result<Tile> {
        let _span = tracing::info_span!("load_tile", index).entered();
        let mut timings = RenderTimings::new();

        let timer = Timer::start(RenderStep::Load);
        let bytes = std::fs::read(path)
            .map_err(|e| ViewerError::InputReadError(format!("{}: {}", path.display(), e)))?;
        let source = self
            .reader
            .read_image(&bytes)
            .map_err(|e| ViewerError::InvalidImage(format!("{}: {}", path.display(), e)))?;
        timings.record(timer);

        self.render(index, path.to_path_buf(), source, &mut timings)
    }

    /// transform -> project -> crop -> fit -> overlays
    fn render(&self, index: usize, path: PathBuf, source: PixelBuffer, timings: &mut RenderTimings) -> Result<Tile> {
        let _span = tracing::debug_span!("render_tile", index).entered();

        let timer = Timer::start(RenderStep::Transform);
        let transformed = match &self.transform {
            Some(transform) => match transform.apply(&source) {
                Ok(buffer) => Some(buffer),
                Err(e) => {
                    warn!("Pixel transform failed on {}, showing it unprocessed: {}", path.display(), e);
                    None
                }
            },
            None => None,
        };
        timings.record(timer);

        let timer = Timer::start(RenderStep::Project);
        let native = project(transformed.as_ref().unwrap_or(&source), self.channel_mode);
        timings.record(timer);

        let timer = Timer::start(RenderStep::Crop);
        let cropped = self.crop(&native);
        let (view, offset) = match &cropped {
            Some((buffer, origin)) => (buffer, *origin),
            None => (&native, Point::default()),
        };
        timings.record(timer);

        let timer = Timer::start(RenderStep::Resize);
        let (box_h, box_w) = self.config.layout().tile_box(self.frame.0, self.frame.1);
        let fitted_dims = fit(view.height(), view.width(), box_h, box_w)?;
        let fitted = resize(view, fitted_dims.display_height, fitted_dims.display_width)?;
        timings.record(timer);

        let transform = FitTransform {
            ratio: fitted_dims.ratio,
            offset,
            native_width: native.width(),
            native_height: native.height(),
            display_width: fitted.width(),
            display_height: fitted.height(),
        };

        let timer = Timer::start(RenderStep::Overlay);
        let display = self.overlays().apply(&fitted, &transform.mapper());
        timings.record(timer);

        timings.log_summary(index);

        Ok(Tile {
            index,
            path,
            source,
            native,
            transform,
            fitted,
            display,
        })
    }

    /// Slice of `native` under the active crop region, with its origin.
    fn crop(&self, native: &PixelBuffer) -> Option<(PixelBuffer, Point)> {
        if self.config.crop_policy != CropPolicy::Crop {
            return None;
        }
        let region = self.zoom.crop_region()?.clamp_to(native.width(), native.height());
        match native.crop(&region) {
            Ok(buffer) => Some((buffer, region.origin())),
            Err(e) => {
                warn!("Crop region does not fit the image, showing it whole: {}", e);
                None
            }
        }
    }
}
