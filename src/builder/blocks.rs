//! Editors behind the text and image blocks.
//!
//! Editors own only their transient state (the editing buffer, the upload
//! status). Everything that matters to the page leaves as a [`BlockEvent`],
//! which the page builder applies.

use std::sync::OnceLock;

use ammonia::{Builder, UrlRelative};
use regex::Regex;

use crate::api::PageStore;
use crate::common::{ApiError, BuilderError, UploadRejection};
use crate::log_err;
use crate::models::{Block, BlockKind};
use crate::types::{ImageFile, UploadedImage};

/// Largest accepted image, in bytes.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockEvent {
    Changed { block_id: String, content: String },
    Deleted { block_id: String },
}

impl BlockEvent {
    pub fn block_id(&self) -> &str {
        match self {
            Self::Changed { block_id, .. } | Self::Deleted { block_id } => block_id,
        }
    }
}

/// Contract shared by every block editor.
pub trait BlockRenderer {
    fn id(&self) -> &str;

    fn kind(&self) -> BlockKind;

    /// Content the editor was opened with.
    fn initial_content(&self) -> &str;

    /// Content as it stands after local edits.
    fn content(&self) -> &str;

    fn delete(&self) -> BlockEvent {
        BlockEvent::Deleted {
            block_id: self.id().to_string(),
        }
    }
}

/// Elements the editor toolbar and contenteditable produce.
const ALLOWED_TAGS: [&str; 12] = [
    "p", "h1", "h2", "h3", "strong", "em", "u", "a", "ul", "ol", "li", "br",
];

fn wrapper() -> Option<&'static Regex> {
    static WRAPPER: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

    WRAPPER
        .get_or_init(|| Regex::new(r"(?is)^\s*<(p|h[1-6])>(.*)</(p|h[1-6])>\s*$"))
        .as_ref()
        .ok()
}

/// Reduces rich text to the markup the editor itself produces. Anything
/// else is dropped: other elements, every attribute but `a[href]`, links
/// that are not absolute http(s) URLs, and the contents of `<script>` and
/// `<style>`.
pub fn sanitize_html(raw: &str) -> String {
    Builder::empty()
        .add_tags(ALLOWED_TAGS)
        .add_tag_attributes("a", ["href"])
        .add_url_schemes(["http", "https"])
        .url_relative(UrlRelative::Deny)
        .link_rel(None)
        .add_clean_content_tags(["script", "style"])
        .clean(raw)
        .to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    Paragraph,
    H1,
    H2,
    H3,
}

impl TextFormat {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Paragraph => "p",
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Paragraph => "P",
            Self::H1 => "H1",
            Self::H2 => "H2",
            Self::H3 => "H3",
        }
    }

    pub const TOOLBAR: [TextFormat; 3] = [Self::H1, Self::H2, Self::H3];
}

pub struct TextBlockEditor {
    id: String,
    initial: String,
    buffer: String,
}

impl TextBlockEditor {
    pub fn new(block: &Block) -> Self {
        Self {
            id: block.id.clone(),
            initial: block.content.clone(),
            buffer: sanitize_html(&block.content),
        }
    }

    /// Replaces the buffer with the editor's serialized markup and flushes
    /// it upward.
    pub fn edit(&mut self, raw: &str) -> BlockEvent {
        self.buffer = sanitize_html(raw);
        self.changed()
    }

    /// Rewraps the buffer in the block element for `format`.
    pub fn apply_format(&mut self, format: TextFormat) -> BlockEvent {
        let inner = wrapper()
            .and_then(|w| w.captures(&self.buffer))
            .and_then(|caps| caps.get(2))
            .map(|m| m.as_str())
            .filter(|inner| !inner.contains("</"))
            .map(str::to_string)
            .unwrap_or_else(|| self.buffer.clone());

        self.buffer = sanitize_html(&format!("<{tag}>{inner}</{tag}>", tag = format.tag()));
        self.changed()
    }

    fn changed(&self) -> BlockEvent {
        BlockEvent::Changed {
            block_id: self.id.clone(),
            content: self.buffer.clone(),
        }
    }
}

impl BlockRenderer for TextBlockEditor {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> BlockKind {
        BlockKind::Text
    }

    fn initial_content(&self) -> &str {
        &self.initial
    }

    fn content(&self) -> &str {
        &self.buffer
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadState {
    #[default]
    Idle,
    Uploading,
    Failed(BuilderError),
}

/// Image block: content is the URL of the uploaded image.
///
/// A new selection while an upload is in flight is not refused; whichever
/// upload finishes last sets the URL.
pub struct ImageBlockEditor {
    id: String,
    initial: String,
    url: String,
    state: UploadState,
}

impl ImageBlockEditor {
    pub fn new(block: &Block) -> Self {
        Self {
            id: block.id.clone(),
            initial: block.content.clone(),
            url: block.content.clone(),
            state: UploadState::Idle,
        }
    }

    pub fn validate(file: &ImageFile) -> Result<(), UploadRejection> {
        if !file.mime_type.starts_with("image/") {
            return Err(UploadRejection::NotAnImage);
        }
        if file.size() > MAX_IMAGE_BYTES {
            return Err(UploadRejection::TooLarge { size: file.size() });
        }
        Ok(())
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    pub fn is_uploading(&self) -> bool {
        self.state == UploadState::Uploading
    }

    pub fn error(&self) -> Option<&BuilderError> {
        match &self.state {
            UploadState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Validates `file` and marks the upload as started. A rejected file
    /// leaves the block in the failed state with the reason.
    pub fn begin_upload(&mut self, file: &ImageFile) -> Result<(), BuilderError> {
        match Self::validate(file) {
            Ok(()) => {
                self.state = UploadState::Uploading;
                Ok(())
            }
            Err(rejection) => {
                let err = BuilderError::from(rejection);
                self.state = UploadState::Failed(err.clone());
                Err(err)
            }
        }
    }

    /// Applies the upload outcome. Only a success changes the content.
    pub fn finish_upload(
        &mut self,
        result: Result<UploadedImage, ApiError>,
    ) -> Option<BlockEvent> {
        match result {
            Ok(uploaded) => {
                self.state = UploadState::Idle;
                self.url = uploaded.file_url;
                Some(BlockEvent::Changed {
                    block_id: self.id.clone(),
                    content: self.url.clone(),
                })
            }
            Err(e) => {
                log_err!(e, "image upload failed for block {}", self.id);
                self.state =
                    UploadState::Failed(BuilderError::upload(BuilderError::UPLOAD_MESSAGE));
                None
            }
        }
    }

    pub async fn upload(&mut self, store: &dyn PageStore, file: ImageFile) -> Option<BlockEvent> {
        self.begin_upload(&file).ok()?;
        let result = store.upload_image(&file).await;
        self.finish_upload(result)
    }
}

impl BlockRenderer for ImageBlockEditor {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> BlockKind {
        BlockKind::Image
    }

    fn initial_content(&self) -> &str {
        &self.initial
    }

    fn content(&self) -> &str {
        &self.url
    }
}

pub enum BlockEditor {
    Text(TextBlockEditor),
    Image(ImageBlockEditor),
}

impl BlockEditor {
    pub fn from_block(block: &Block) -> Self {
        match block.kind {
            BlockKind::Text => Self::Text(TextBlockEditor::new(block)),
            BlockKind::Image => Self::Image(ImageBlockEditor::new(block)),
        }
    }

    fn renderer(&self) -> &dyn BlockRenderer {
        match self {
            Self::Text(editor) => editor,
            Self::Image(editor) => editor,
        }
    }
}

impl BlockRenderer for BlockEditor {
    fn id(&self) -> &str {
        self.renderer().id()
    }

    fn kind(&self) -> BlockKind {
        self.renderer().kind()
    }

    fn initial_content(&self) -> &str {
        self.renderer().initial_content()
    }

    fn content(&self) -> &str {
        self.renderer().content()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_block(content: &str) -> Block {
        let mut block = Block::new(BlockKind::Text, 0);
        block.content = content.to_string();
        block
    }

    #[test]
    fn sanitize_removes_scripts_and_handlers() {
        let dirty = r#"<p onclick="steal()">Hi<script>alert(1)</script></p><style>p{}</style><a href="javascript:void(0)">x</a>"#;
        assert_eq!(sanitize_html(dirty), "<p>Hi</p><a>x</a>");
    }

    #[test]
    fn sanitize_keeps_ordinary_markup() {
        let clean = r#"<h2>Title</h2><p><strong>bold</strong> <a href="https://example.com">link</a></p>"#;
        assert_eq!(sanitize_html(clean), clean);
    }

    #[test]
    fn sanitize_leaves_text_mentioning_handlers() {
        let text = "<p>Sign up online = free</p>";
        assert_eq!(sanitize_html(text), text);
        assert_eq!(
            sanitize_html(r#"<p>a<img src="a.png" onload="x()" onerror='y()'></p>"#),
            "<p>a</p>"
        );
    }

    #[test]
    fn sanitize_drops_handlers_without_leading_space() {
        assert_eq!(sanitize_html("<svg/onload=alert(1)>"), "");
        assert_eq!(sanitize_html("<p/onclick=alert(1)>hi</p>"), "<p>hi</p>");
    }

    #[test]
    fn sanitize_drops_handlers_after_quoted_angle_bracket() {
        assert_eq!(
            sanitize_html(r#"<img title="a>" src=x onerror=alert(1)>"#),
            ""
        );
        assert_eq!(
            sanitize_html(r#"<a title="a>b" onclick="x()" href="https://example.com">go</a>"#),
            r#"<a href="https://example.com">go</a>"#
        );
    }

    #[test]
    fn sanitize_decodes_entities_before_checking_links() {
        assert_eq!(
            sanitize_html(r#"<a href="jav&#x61;script:alert(1)">x</a>"#),
            "<a>x</a>"
        );
        assert_eq!(
            sanitize_html(r#"<a href="&#106;avascript:alert(1)">x</a>"#),
            "<a>x</a>"
        );
        assert_eq!(sanitize_html(r#"<a href="/relative">x</a>"#), "<a>x</a>");
    }

    #[test]
    fn editor_sanitizes_stored_content() {
        let editor = TextBlockEditor::new(&text_block("<p>hi<svg/onload=alert(1)></p>"));
        assert_eq!(editor.initial_content(), "<p>hi<svg/onload=alert(1)></p>");
        assert_eq!(editor.content(), "<p>hi</p>");
    }

    #[test]
    fn sanitize_drops_unterminated_script_tag() {
        assert_eq!(sanitize_html("<p>a<script src=x.js></p>"), "<p>a</p>");
    }

    #[test]
    fn text_edit_overwrites_buffer_and_emits_change() {
        let block = text_block("<p>old</p>");
        let mut editor = TextBlockEditor::new(&block);

        let event = editor.edit("<p>new</p>");
        assert_eq!(
            event,
            BlockEvent::Changed {
                block_id: block.id.clone(),
                content: "<p>new</p>".into()
            }
        );
        assert_eq!(editor.initial_content(), "<p>old</p>");
        assert_eq!(editor.content(), "<p>new</p>");
    }

    #[test]
    fn heading_format_rewraps_buffer() {
        let mut editor = TextBlockEditor::new(&text_block("<p>Hello</p>"));
        editor.apply_format(TextFormat::H2);
        assert_eq!(editor.content(), "<h2>Hello</h2>");

        editor.apply_format(TextFormat::H1);
        assert_eq!(editor.content(), "<h1>Hello</h1>");

        let mut plain = TextBlockEditor::new(&text_block("Hello"));
        plain.apply_format(TextFormat::H3);
        assert_eq!(plain.content(), "<h3>Hello</h3>");

        let mut mixed = TextBlockEditor::new(&text_block("<p>a</p><p>b</p>"));
        mixed.apply_format(TextFormat::H1);
        assert_eq!(mixed.content(), "<h1><p>a</p><p>b</p></h1>");
    }

    #[test]
    fn delete_emits_block_id() {
        let block = Block::new(BlockKind::Image, 3);
        let editor = BlockEditor::from_block(&block);
        assert_eq!(editor.kind(), BlockKind::Image);
        assert_eq!(
            editor.delete(),
            BlockEvent::Deleted {
                block_id: block.id.clone()
            }
        );
    }

    #[test]
    fn validate_rejects_non_images_and_large_files() {
        let pdf = ImageFile::new("a.pdf", "application/pdf", vec![0; 10]);
        assert_eq!(ImageBlockEditor::validate(&pdf), Err(UploadRejection::NotAnImage));

        let huge = ImageFile::new("a.png", "image/png", vec![0; MAX_IMAGE_BYTES + 1]);
        assert!(matches!(
            ImageBlockEditor::validate(&huge),
            Err(UploadRejection::TooLarge { .. })
        ));

        let ok = ImageFile::new("a.png", "image/png", vec![0; MAX_IMAGE_BYTES]);
        assert_eq!(ImageBlockEditor::validate(&ok), Ok(()));
    }

    #[test]
    fn rejected_file_sets_upload_error() {
        let mut editor = ImageBlockEditor::new(&Block::new(BlockKind::Image, 0));
        let err = editor
            .begin_upload(&ImageFile::new("a.txt", "text/plain", vec![1]))
            .unwrap_err();

        assert_eq!(err.kind, "upload-error");
        assert_eq!(err.message, "Please select an image file");
        assert_eq!(editor.error(), Some(&err));
    }

    #[test]
    fn failed_upload_keeps_content() {
        let mut block = Block::new(BlockKind::Image, 0);
        block.content = "https://cdn.example.com/old.png".into();
        let mut editor = ImageBlockEditor::new(&block);

        editor
            .begin_upload(&ImageFile::new("a.png", "image/png", vec![1]))
            .unwrap();
        assert!(editor.is_uploading());

        let event = editor.finish_upload(Err(ApiError::Status {
            status: 500,
            message: "boom".into(),
        }));
        assert_eq!(event, None);
        assert_eq!(editor.content(), "https://cdn.example.com/old.png");
        assert_eq!(
            editor.error().map(|e| e.message.as_str()),
            Some(BuilderError::UPLOAD_MESSAGE)
        );
    }

    #[test]
    fn successful_upload_replaces_url() {
        let mut editor = ImageBlockEditor::new(&Block::new(BlockKind::Image, 0));
        editor
            .begin_upload(&ImageFile::new("a.png", "image/png", vec![1]))
            .unwrap();

        let event = editor.finish_upload(Ok(UploadedImage {
            file_url: "https://cdn.example.com/a.png".into(),
        }));

        assert!(matches!(event, Some(BlockEvent::Changed { ref content, .. }) if content == "https://cdn.example.com/a.png"));
        assert_eq!(editor.state(), &UploadState::Idle);
    }
}
