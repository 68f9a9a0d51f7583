//! CardPress Render Library
//!
//! Turns a template (background, fields, mode, fill values) into a scene,
//! rasterizes it on the CPU with tiny-skia, and wraps the result as a PDF.

pub mod assets;
pub mod export;
mod raster;
mod renderer;
pub mod scene;
mod surface;
pub mod text;

pub use assets::{AssetError, decode_asset};
pub use export::{DEFAULT_FILE_NAME, ExportError, ExportedDocument, Orientation, export_pdf};
pub use raster::RasterRenderer;
pub use renderer::{RenderContext, RenderResult, RenderStyle, Renderer, RendererError};
pub use scene::{ImageLayer, Scene, SceneBuilder, SceneItem};
pub use surface::Surface;
