//! Session state: one template being designed and filled.

use cardpress_core::asset::AssetSlot;
use cardpress_core::canvas::Canvas;
use cardpress_core::config::{ConfigError, EditorConfig};
use cardpress_core::field::{Field, FieldId};
use cardpress_core::fill::FillSession;
use cardpress_core::interaction::{GestureOutcome, Mode};
use cardpress_core::registry::FieldError;
use cardpress_render::{
    AssetError, ExportError, ExportedDocument, RasterRenderer, RenderContext, Renderer, RendererError, Surface,
    decode_asset, export_pdf,
};
use kurbo::{Point, Size};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error(transparent)]
    Render(#[from] RendererError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// The canvas plus the externally supplied inputs it is rendered with.
///
/// Pointer events are in screen coordinates and go through the canvas
/// viewport. Rendering always reads the current state; nothing is cached
/// between calls except decoded pixmaps inside the renderer.
pub struct Session {
    canvas: Canvas,
    background: AssetSlot,
    fill: FillSession,
    renderer: RasterRenderer,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a new session with default configuration.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// Create a new session with custom configuration.
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            canvas: Canvas::with_config(config),
            background: AssetSlot::Empty,
            fill: FillSession::new(),
            renderer: RasterRenderer::new(),
        }
    }

    /// Create a session from a (possibly partial) JSON configuration.
    pub fn from_config_json(json: &str) -> SessionResult<Self> {
        Ok(Self::with_config(EditorConfig::from_json_str(json)?))
    }

    pub fn config(&self) -> &EditorConfig {
        self.canvas.config()
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Mutable canvas access, e.g. for the viewport.
    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn background(&self) -> &AssetSlot {
        &self.background
    }

    pub fn fill(&self) -> &FillSession {
        &self.fill
    }

    // --- Assets ---

    /// Mark the background as loading.
    pub fn set_background_pending(&mut self) {
        self.background = AssetSlot::Pending;
    }

    /// Decode and install a background image. Returns its pixel size.
    ///
    /// Field coordinates are kept as they are, even if the new image has a
    /// different size. On a decode error the previous background stays.
    pub fn load_background(&mut self, bytes: &[u8]) -> SessionResult<(u32, u32)> {
        let asset = decode_asset(bytes).inspect_err(|e| log::warn!("Background rejected: {}", e))?;
        let size = (asset.width(), asset.height());
        log::info!("Loaded background {}x{}", size.0, size.1);
        self.background = AssetSlot::Ready(asset);
        Ok(size)
    }

    pub fn clear_background(&mut self) {
        self.background = AssetSlot::Empty;
    }

    /// Mark the fill photo as loading.
    pub fn set_photo_pending(&mut self) {
        self.fill.set_photo_pending();
    }

    /// Decode and install the fill photo.
    pub fn load_photo(&mut self, bytes: &[u8]) -> SessionResult<()> {
        let asset = decode_asset(bytes).inspect_err(|e| log::warn!("Photo rejected: {}", e))?;
        log::info!("Loaded photo {}x{}", asset.width(), asset.height());
        self.fill.set_photo(asset);
        Ok(())
    }

    pub fn clear_photo(&mut self) {
        self.fill.clear_photo();
    }

    // --- Fill values ---

    /// Set the value for a text field label.
    pub fn set_value(&mut self, label: &str, value: &str) {
        self.fill.set_value(label, value);
    }

    pub fn value(&self, label: &str) -> &str {
        self.fill.value(label)
    }

    pub fn clear_values(&mut self) {
        self.fill.clear_values();
    }

    // --- Fields ---

    pub fn fields(&self) -> &[Field] {
        self.canvas.fields()
    }

    pub fn add_text_field(&mut self, label: &str) -> SessionResult<FieldId> {
        Ok(self.canvas.add_text_field(label)?)
    }

    pub fn add_photo_field(&mut self) -> SessionResult<FieldId> {
        Ok(self.canvas.add_photo_field()?)
    }

    pub fn remove_field(&mut self, id: FieldId) -> Option<Field> {
        self.canvas.remove_field(id)
    }

    /// Labels the fill form asks values for.
    pub fn text_labels(&self) -> Vec<&str> {
        self.canvas.registry().text_labels()
    }

    // --- Mode and input ---

    pub fn mode(&self) -> Mode {
        self.canvas.mode()
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.canvas.set_mode(mode);
    }

    /// Fit the ready background into a view of `view` pixels.
    /// Returns false, leaving the viewport alone, if no background is ready.
    pub fn fit_view(&mut self, view: Size) -> bool {
        let Some(asset) = self.background.ready() else {
            return false;
        };
        let image = Size::new(asset.width() as f64, asset.height() as f64);
        self.canvas.fit_viewport(image, view);
        true
    }

    pub fn pointer_down(&mut self, screen_point: Point) {
        self.canvas.pointer_down(screen_point);
    }

    pub fn pointer_move(&mut self, screen_point: Point) {
        self.canvas.pointer_move(screen_point);
    }

    pub fn pointer_up(&mut self) -> GestureOutcome {
        self.canvas.pointer_up()
    }

    pub fn cancel_gesture(&mut self) {
        self.canvas.cancel_gesture();
    }

    // --- Output ---

    /// Render in the current mode, with selection and gesture preview.
    pub fn render(&mut self) -> SessionResult<Option<Surface>> {
        let ctx = RenderContext::from_canvas(&self.canvas, &self.background).with_fill(&self.fill);
        Ok(self.renderer.render(&ctx)?)
    }

    /// Render in fill mode with no decorations, whatever the current mode.
    pub fn render_for_export(&mut self) -> SessionResult<Option<Surface>> {
        let ctx = RenderContext::from_canvas(&self.canvas, &self.background)
            .with_fill(&self.fill)
            .with_mode(Mode::Fill)
            .with_selection(None)
            .with_preview(None);
        Ok(self.renderer.render(&ctx)?)
    }

    /// Build the export document under the configured file name.
    pub fn export(&mut self) -> SessionResult<ExportedDocument> {
        let surface = self.render_for_export()?;
        let mut document = export_pdf(surface.as_ref())?;
        document.file_name = self.config().export_file_name.clone();
        Ok(document)
    }

    /// Export and write the document into `dir`. Returns the written path.
    pub fn save_export(&mut self, dir: &Path) -> SessionResult<PathBuf> {
        let document = self.export()?;
        let path = dir.join(&document.file_name);
        std::fs::write(&path, &document.bytes)?;
        log::info!("Saved export to {:?}", path);
        Ok(path)
    }

    /// PNG of the export surface.
    pub fn export_png(&mut self) -> SessionResult<Vec<u8>> {
        let surface = self.render_for_export()?.ok_or(ExportError::NoSurface)?;
        Ok(surface.to_png()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use tempfile::tempdir;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    fn session_with_background() -> Session {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut session = Session::new();
        session.load_background(&png_bytes(300, 200)).unwrap();
        session
    }

    #[test]
    fn test_render_without_background() {
        let mut session = Session::new();
        assert!(session.render().unwrap().is_none());
        session.set_background_pending();
        assert!(session.render().unwrap().is_none());
    }

    #[test]
    fn test_export_without_background_fails() {
        let mut session = Session::new();
        session.add_text_field("NOME").unwrap();
        assert!(matches!(
            session.export(),
            Err(SessionError::Export(ExportError::NoSurface))
        ));
    }

    #[test]
    fn test_failed_background_load_keeps_previous() {
        let mut session = session_with_background();
        assert!(matches!(session.load_background(b"junk"), Err(SessionError::Asset(_))));
        assert!(session.background().is_ready());
    }

    #[test]
    fn test_text_field_requires_label() {
        let mut session = Session::new();
        assert!(matches!(
            session.add_text_field("  "),
            Err(SessionError::Field(FieldError::InvalidFieldCreation))
        ));
        assert!(session.fields().is_empty());
    }

    #[test]
    fn test_design_then_fill_flow() {
        let mut session = session_with_background();
        let id = session.add_text_field("cpf").unwrap();
        assert_eq!(session.text_labels(), vec!["CPF"]);

        session.pointer_down(Point::new(55.0, 55.0));
        session.pointer_move(Point::new(125.0, 85.0));
        assert_eq!(session.pointer_up(), GestureOutcome::Moved(id));

        session.set_mode(Mode::Fill);
        session.set_value("CPF", "123.456.789-00");
        let surface = session.render().unwrap().unwrap();
        assert_eq!((surface.width(), surface.height()), (300, 200));
        assert_eq!(session.value("CPF"), "123.456.789-00");
    }

    #[test]
    fn test_export_ignores_design_decorations() {
        let mut session = session_with_background();
        let id = session.add_photo_field().unwrap();
        session.canvas_mut().select(id);
        assert_eq!(session.mode(), Mode::Design);

        let exported = session.render_for_export().unwrap().unwrap();
        assert!(exported.rgba().iter().all(|&c| c == 255));
        // Exporting does not change the session's mode or selection.
        assert_eq!(session.mode(), Mode::Design);
        assert!(session.canvas().is_selected(id));
    }

    #[test]
    fn test_background_swap_keeps_coordinates() {
        let mut session = session_with_background();
        let id = session.add_photo_field().unwrap();
        session.load_background(&png_bytes(40, 40)).unwrap();
        let field = session.canvas().field(id).unwrap();
        assert_eq!(field.position, Point::new(50.0, 50.0));
        assert_eq!(field.size, Size::new(100.0, 130.0));
    }

    #[test]
    fn test_fill_mode_rejects_new_fields() {
        let mut session = session_with_background();
        session.set_mode(Mode::Fill);
        assert!(matches!(
            session.add_photo_field(),
            Err(SessionError::Field(FieldError::ReadOnly))
        ));
        assert!(session.fields().is_empty());
    }

    #[test]
    fn test_fit_view_uses_background_size() {
        let mut session = Session::new();
        assert!(!session.fit_view(Size::new(800.0, 400.0)));

        session.load_background(&png_bytes(300, 200)).unwrap();
        let id = session.add_text_field("NOME").unwrap();
        assert!(session.fit_view(Size::new(800.0, 400.0)));

        // Zoom 2 with the card centred: image (50, 50) is screen (200, 100).
        session.pointer_down(Point::new(204.0, 104.0));
        session.pointer_move(Point::new(224.0, 124.0));
        assert_eq!(session.pointer_up(), GestureOutcome::Moved(id));
        assert_eq!(session.canvas().field(id).unwrap().position, Point::new(60.0, 60.0));
    }

    #[test]
    fn test_save_export_writes_named_file() {
        let mut session = session_with_background();
        let dir = tempdir().unwrap();
        let path = session.save_export(dir.path()).unwrap();

        assert_eq!(path.file_name().unwrap(), "carteirinha-oab.pdf");
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_configured_file_name() {
        let mut session = Session::from_config_json(r#"{"export_file_name": "card.pdf"}"#).unwrap();
        session.load_background(&png_bytes(20, 30)).unwrap();
        let doc = session.export().unwrap();
        assert_eq!(doc.file_name, "card.pdf");
        assert_eq!((doc.width_px, doc.height_px), (20, 30));
    }

    #[test]
    fn test_bad_config_json() {
        assert!(matches!(Session::from_config_json("{"), Err(SessionError::Config(_))));
    }

    #[test]
    fn test_export_png_roundtrips_size() {
        let mut session = session_with_background();
        let png = session.export_png().unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (300, 200));
    }
}
