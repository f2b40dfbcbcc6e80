//! vitae is a resume builder core: a document model, interchangeable layout templates, and a
//! CPU export pipeline that turns a rendered layout into a paginated A4 PDF.
//!
//! # Pipeline overview
//!
//! 1. **Edit**: [`Edit`] events mutate a single [`Document`] through an [`EditorSession`], in
//!    order, one field at a time.
//! 2. **Render**: [`render`] maps `Document + TemplateId` to a [`Layout`] block tree at a fixed
//!    794px page width. Rendering is pure and never drops a populated field.
//! 3. **Export**: [`ExportPipeline`] clones the layout onto an offscreen [`Stage`], waits for the
//!    font and photo to decode, rasterizes at 2x with `vello_cpu`, slices the bitmap into A4
//!    pages, and embeds them into a PDF named after the title.
//!
//! Unauthenticated sessions keep their work in a [`DraftStore`]; saving through a
//! [`PersistenceService`] with an explicit [`IdentityContext`] promotes the draft.
#![forbid(unsafe_code)]

mod document;
mod draft;
mod editor;
mod export;
mod foundation;
mod persistence;
mod share;
mod template;

pub use document::edit::{Edit, EducationField, ExperienceField, ListSection, ProjectField};
pub use document::image_input::{InlineImage, PictureFormat, ProfilePicture, parse_data_url};
pub use document::model::{
    DEFAULT_TITLE, Document, Education, Experience, PersonalField, PersonalInfo, Project,
    SectionName, TemplateId,
};
pub use document::normalize::{normalize_document, normalize_json};
pub use document::period::{PRESENT, format_date, format_period};
pub use draft::kv::{FileStore, KeyValueStore, MemoryStore};
pub use draft::store::{DRAFT_KEY, DraftStore};
pub use editor::session::{EditorSession, ExportGuard, Preview};
pub use export::assets::{
    DecodedImage, FontFace, SettledAssets, decode_photo, resolve_font, settle_blocking,
};
pub use export::offscreen::{OffscreenTarget, Stage};
pub use export::paginate::paginate;
pub use export::pdf::{FALLBACK_FILE_STEM, PdfArtifact, download_name};
pub use export::pipeline::ExportPipeline;
pub use export::raster::Bitmap;
pub use foundation::config::{Config, DEFAULT_MAX_PROFILE_PICTURE_BYTES, ExportOpts, Pagination};
pub use foundation::core::{
    Align, Edges, LOGICAL_DPI, PAGE_WIDTH_PX, PaperSize, Point, Rect, Rgba8, align_offset,
};
pub use foundation::error::{VitaeError, VitaeResult};
pub use persistence::memory::InMemoryPersistence;
pub use persistence::service::PersistenceService;
pub use persistence::{DocumentId, IdentityContext, UserId};
pub use share::{SharedResume, open_shared};
pub use template::layout::{
    Block, Column, EntryItem, HeaderBlock, Item, Layout, Photo, Row, Rule, SectionBlock,
    TagsItem, Text, TextStyle,
};
pub use template::{render, render_tag, render_with};
