//! PDF Document wrapper

use crate::font::{FontHandle, PdfFont};
use crate::overlay::Overlay;
use crate::text::TextRun;
use crate::{Align, PdfError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::path::Path;
use tracing::debug;

/// A4 width in points, used when a page has no usable box
const A4_WIDTH: f64 = 595.28;
/// A4 height in points
const A4_HEIGHT: f64 = 841.89;

/// Depth limit when following `/Parent` links
const MAX_INHERITANCE_DEPTH: usize = 32;

/// A page bounding box in default user space units (points)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl PageBox {
    /// Create a box from two corners, normalized so that x0/y0 is the lower-left
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Portrait A4
    pub fn a4() -> Self {
        Self::new(0.0, 0.0, A4_WIDTH, A4_HEIGHT)
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Parse a `[x0 y0 x1 y1]` rectangle array
    fn from_array(array: &[Object]) -> Result<Self> {
        if array.len() < 4 {
            return Err(PdfError::ParseError("Invalid MediaBox format".to_string()));
        }

        let mut values = [0.0f64; 4];
        for (value, object) in values.iter_mut().zip(array) {
            *value = number(object)
                .ok_or_else(|| PdfError::ParseError("Invalid MediaBox entry".to_string()))?;
        }

        Ok(Self::new(values[0], values[1], values[2], values[3]))
    }
}

/// Read an integer or real object as f64
fn number(object: &Object) -> Option<f64> {
    match object {
        Object::Integer(value) => Some(*value as f64),
        Object::Real(value) => Some(*value as f64),
        _ => None,
    }
}

/// A font registered with the document
struct RegisteredFont {
    font: PdfFont,
    /// Object id reserved for the font dictionary
    object_id: ObjectId,
    /// Set once an overlay references the font
    used: bool,
}

/// PDF Document wrapper providing high-level operations
pub struct PdfDocument {
    /// The underlying lopdf document
    inner: Document,
    /// Fonts available to overlays
    fonts: Vec<RegisteredFont>,
    /// Current font
    current_font: Option<FontHandle>,
    /// Current font size
    current_font_size: f32,
}

impl PdfDocument {
    fn from_inner(inner: Document) -> Self {
        Self {
            inner,
            fonts: Vec::new(),
            current_font: None,
            current_font_size: 12.0,
        }
    }

    /// Open a PDF document from a file path
    ///
    /// # Example
    /// ```ignore
    /// let doc = PdfDocument::open("report.pdf")?;
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let inner = Document::load(path)
            .map_err(|e| PdfError::OpenError(format!("{}: {e}", path.display())))?;

        Ok(Self::from_inner(inner))
    }

    /// Open a PDF document from bytes
    pub fn open_from_bytes(data: &[u8]) -> Result<Self> {
        let inner = Document::load_mem(data).map_err(|e| PdfError::OpenError(e.to_string()))?;

        Ok(Self::from_inner(inner))
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.inner.get_pages().len()
    }

    /// Register a font for drawing on overlays
    ///
    /// The font dictionary is only written if some overlay uses the font.
    pub fn add_font(&mut self, font: PdfFont) -> FontHandle {
        let object_id = self.inner.new_object_id();
        self.fonts.push(RegisteredFont {
            font,
            object_id,
            used: false,
        });
        FontHandle(self.fonts.len() - 1)
    }

    /// Access a registered font
    pub fn font(&self, handle: FontHandle) -> Result<&PdfFont> {
        self.fonts
            .get(handle.0)
            .map(|registered| &registered.font)
            .ok_or_else(|| PdfError::FontNotFound(format!("font handle {}", handle.0)))
    }

    /// Set the current font and size
    ///
    /// # Example
    /// ```ignore
    /// let helvetica = doc.add_font(PdfFont::Standard(StandardFont::Helvetica));
    /// doc.set_font(helvetica, 13.0)?;
    /// ```
    pub fn set_font(&mut self, font: FontHandle, size: f32) -> Result<()> {
        self.font(font)?;
        self.current_font = Some(font);
        self.current_font_size = size;
        Ok(())
    }

    fn current_font(&self) -> Result<FontHandle> {
        self.current_font
            .ok_or_else(|| PdfError::FontNotFound("No font set".to_string()))
    }

    /// Draw text on an overlay with the current font
    ///
    /// # Arguments
    /// * `overlay` - Overlay to draw on
    /// * `text` - Text to draw
    /// * `x` - X anchor in points, from the left edge of the page box
    /// * `y` - Baseline in points, from the bottom edge of the page box
    /// * `align` - How the text sits relative to `x`
    pub fn draw_text(
        &mut self,
        overlay: &mut Overlay,
        text: &str,
        x: f64,
        y: f64,
        align: Align,
    ) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }

        let handle = self.current_font()?;
        let font_size = self.current_font_size;

        let registered = self
            .fonts
            .get_mut(handle.0)
            .ok_or_else(|| PdfError::FontNotFound(format!("font handle {}", handle.0)))?;
        registered.used = true;

        let encoded = registered.font.encode_text_hex(text);
        let font = overlay.font_resource(handle);
        let run = TextRun {
            font: &font,
            size: font_size,
            encoded: &encoded,
            width: registered.font.text_width_points(text, font_size) as f64,
        };
        run.write_to(overlay.content_mut(), x, y, align)?;

        Ok(())
    }

    /// Merge an overlay onto a page
    ///
    /// The page's existing content is wrapped in `q ... Q` so that any
    /// graphics state it leaves behind does not affect the overlay, then the
    /// overlay is painted on top as a Form XObject.
    ///
    /// # Arguments
    /// * `page` - Page number (1-indexed)
    /// * `overlay` - The overlay to merge
    pub fn merge_overlay(&mut self, page: usize, overlay: Overlay) -> Result<()> {
        let page_id = self.page_id(page)?;

        for handle in overlay.fonts() {
            self.font(handle)?;
        }
        let xobject = overlay.to_form_xobject(|handle| {
            self.fonts
                .get(handle.0)
                .map(|registered| registered.object_id)
        })?;
        let xobject_id = self.inner.add_object(xobject);

        let mut resources = self.page_resources(page_id)?;
        let mut xobjects = match resources.get(b"XObject") {
            Ok(object) => self.resolve(object)?.as_dict().cloned().unwrap_or_default(),
            Err(_) => Dictionary::new(),
        };

        let xobject_name = unused_name(&xobjects, "Ftr");
        xobjects.set(xobject_name.as_bytes().to_vec(), Object::Reference(xobject_id));
        resources.set("XObject", Object::Dictionary(xobjects));

        let mut contents = self.page_contents(page_id)?;
        let paint = format!("q /{xobject_name} Do Q\n").into_bytes();
        if contents.is_empty() {
            contents.push(self.add_content_stream(paint));
        } else {
            let mut closing = b"Q\n".to_vec();
            closing.extend_from_slice(&paint);
            contents.insert(0, self.add_content_stream(b"q\n".to_vec()));
            contents.push(self.add_content_stream(closing));
        }

        let mut page_dict = self.page_dict(page_id)?.clone();
        page_dict.set("Resources", Object::Dictionary(resources));
        page_dict.set("Contents", Object::Array(contents));
        self.inner.objects.insert(page_id, page_dict.into());

        debug!(page, xobject = %xobject_name, "merged overlay");
        Ok(())
    }

    /// Save the document to a file
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.embed_fonts()?;

        self.inner
            .save(path)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;
        Ok(())
    }

    /// Save the document to bytes
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.embed_fonts()?;

        let mut buffer = Vec::new();
        self.inner
            .save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;

        Ok(buffer)
    }

    /// Write the dictionaries of all used fonts at their reserved ids
    ///
    /// Runs at save time, when every character drawn with an embedded
    /// font is known. Embedded fonts are only rewritten when glyphs were
    /// drawn since the last save, and always at the same object ids.
    fn embed_fonts(&mut self) -> Result<()> {
        for registered in self.fonts.iter_mut().filter(|registered| registered.used) {
            let dict = match &mut registered.font {
                PdfFont::Standard(font) => font.to_pdf_dict(),
                PdfFont::TrueType(font) if font.is_embedded() => continue,
                PdfFont::TrueType(font) => font.embed(&mut self.inner)?,
            };

            self.inner
                .objects
                .insert(registered.object_id, Object::Dictionary(dict));
            debug!(font = registered.font.name(), "embedded font");
        }

        Ok(())
    }

    /// Get the bounding box of a page
    ///
    /// Uses the MediaBox, following `/Parent` inheritance, then the CropBox.
    /// Pages with neither are treated as A4.
    pub fn page_box(&self, page: usize) -> Result<PageBox> {
        let page_id = self.page_id(page)?;

        for key in [b"MediaBox".as_slice(), b"CropBox".as_slice()] {
            if let Some(object) = self.get_inherited(page_id, key)? {
                let array = self.resolve(object)?.as_array().map_err(|_| {
                    PdfError::ParseError("MediaBox is not an array".to_string())
                })?;
                return PageBox::from_array(array);
            }
        }

        debug!(page, "page has no MediaBox, assuming A4");
        Ok(PageBox::a4())
    }

    fn page_id(&self, page: usize) -> Result<ObjectId> {
        let pages = self.inner.get_pages();
        if page == 0 || page > pages.len() {
            return Err(PdfError::InvalidPage(page, pages.len()));
        }

        pages
            .get(&(page as u32))
            .copied()
            .ok_or(PdfError::InvalidPage(page, pages.len()))
    }

    fn page_dict(&self, page_id: ObjectId) -> Result<&Dictionary> {
        self.inner
            .get_object(page_id)?
            .as_dict()
            .map_err(|_| PdfError::ParseError("Page object is not a dictionary".to_string()))
    }

    /// Follow a reference to the object it points at
    fn resolve<'a>(&'a self, object: &'a Object) -> Result<&'a Object> {
        match object {
            Object::Reference(id) => Ok(self.inner.get_object(*id)?),
            other => Ok(other),
        }
    }

    /// Look up a page attribute, following the `/Parent` chain
    fn get_inherited(&self, page_id: ObjectId, key: &[u8]) -> Result<Option<&Object>> {
        let mut current_id = page_id;

        for _ in 0..MAX_INHERITANCE_DEPTH {
            let dict = self
                .inner
                .get_object(current_id)?
                .as_dict()
                .map_err(|_| PdfError::ParseError("Object is not a dictionary".to_string()))?;

            if let Ok(value) = dict.get(key) {
                return Ok(Some(value));
            }

            match dict.get(b"Parent") {
                Ok(Object::Reference(parent_id)) => current_id = *parent_id,
                _ => break,
            }
        }

        Ok(None)
    }

    /// Effective Resources dictionary of a page, with inheritance resolved
    fn page_resources(&self, page_id: ObjectId) -> Result<Dictionary> {
        match self.get_inherited(page_id, b"Resources")? {
            Some(object) => Ok(self.resolve(object)?.as_dict().cloned().unwrap_or_default()),
            None => Ok(Dictionary::new()),
        }
    }

    /// The page's content streams as a list of references
    fn page_contents(&mut self, page_id: ObjectId) -> Result<Vec<Object>> {
        let contents = match self.page_dict(page_id)?.get(b"Contents") {
            Ok(contents) => contents.clone(),
            Err(_) => return Ok(Vec::new()),
        };

        let list = match contents {
            Object::Reference(id) => match self.inner.get_object(id)? {
                Object::Array(array) => array.clone(),
                _ => vec![Object::Reference(id)],
            },
            Object::Array(array) => array,
            Object::Stream(stream) => vec![Object::Reference(self.inner.add_object(stream))],
            _ => Vec::new(),
        };

        let mut references = Vec::with_capacity(list.len());
        for object in list {
            match object {
                Object::Reference(_) => references.push(object),
                Object::Stream(stream) => {
                    references.push(Object::Reference(self.inner.add_object(stream)))
                }
                _ => {}
            }
        }

        Ok(references)
    }

    fn add_content_stream(&mut self, content: Vec<u8>) -> Object {
        Object::Reference(self.inner.add_object(Stream::new(Dictionary::new(), content)))
    }
}

/// First `<prefix><n>` key not present in a dictionary
fn unused_name(dict: &Dictionary, prefix: &str) -> String {
    (1..)
        .map(|n| format!("{prefix}{n}"))
        .find(|name| !dict.has(name.as_bytes()))
        .unwrap_or_else(|| prefix.to_string())
}
