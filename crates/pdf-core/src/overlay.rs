//! Transparent single-page drawing surfaces
//!
//! An [`Overlay`] collects content operators in the coordinate space of a
//! page (origin at the lower-left corner of its page box). When merged it
//! becomes a Form XObject whose BBox covers the page and whose Matrix moves
//! it to the page box origin. Nothing is painted outside the drawn text, so
//! the original page stays visible underneath.

use crate::document::PageBox;
use crate::font::FontHandle;
use crate::{PdfError, Result};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::{Dictionary, Object, ObjectId, Stream};
use std::io::Write;

/// A transparent drawing surface sized to one page
#[derive(Debug, Clone)]
pub struct Overlay {
    page_box: PageBox,
    content: Vec<u8>,
    /// Font resources used on this overlay (resource name, font)
    fonts: Vec<(String, FontHandle)>,
}

impl Overlay {
    /// Create an empty overlay matching a page box
    pub fn new(page_box: PageBox) -> Self {
        Self {
            page_box,
            content: Vec::new(),
            fonts: Vec::new(),
        }
    }

    pub fn width(&self) -> f64 {
        self.page_box.width()
    }

    pub fn height(&self) -> f64 {
        self.page_box.height()
    }

    /// Raw content operators drawn so far
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// True when nothing has been drawn
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Get or create the resource name (e.g. "F1") for a font
    pub(crate) fn font_resource(&mut self, font: FontHandle) -> String {
        if let Some((name, _)) = self.fonts.iter().find(|(_, handle)| *handle == font) {
            return name.clone();
        }

        let name = format!("F{}", self.fonts.len() + 1);
        self.fonts.push((name.clone(), font));
        name
    }

    /// Content stream being drawn into
    pub(crate) fn content_mut(&mut self) -> &mut Vec<u8> {
        &mut self.content
    }

    /// Fonts referenced by this overlay
    pub(crate) fn fonts(&self) -> impl Iterator<Item = FontHandle> + '_ {
        self.fonts.iter().map(|(_, handle)| *handle)
    }

    /// Build the Form XObject for this overlay
    ///
    /// # Arguments
    /// * `font_object` - Resolves a font handle to its font dictionary object
    pub(crate) fn to_form_xobject<F>(&self, font_object: F) -> Result<Stream>
    where
        F: Fn(FontHandle) -> Option<ObjectId>,
    {
        let mut font_dict = Dictionary::new();
        for (name, handle) in &self.fonts {
            let object_id = font_object(*handle)
                .ok_or_else(|| PdfError::FontNotFound(format!("font handle {}", handle.0)))?;
            font_dict.set(name.as_bytes().to_vec(), Object::Reference(object_id));
        }

        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(font_dict));

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&self.content)?;
        let compressed = encoder.finish()?;

        let bbox = vec![
            Object::Real(0.0),
            Object::Real(0.0),
            Object::Real(self.width() as f32),
            Object::Real(self.height() as f32),
        ];
        let matrix = vec![
            Object::Integer(1),
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(1),
            Object::Real(self.page_box.x0 as f32),
            Object::Real(self.page_box.y0 as f32),
        ];

        let dict = Dictionary::from_iter(vec![
            ("Type", "XObject".into()),
            ("Subtype", "Form".into()),
            ("FormType", 1.into()),
            ("BBox", Object::Array(bbox)),
            ("Matrix", Object::Array(matrix)),
            ("Resources", Object::Dictionary(resources)),
            ("Filter", "FlateDecode".into()),
        ]);

        Ok(Stream::new(dict, compressed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_overlay_is_empty() {
        let overlay = Overlay::new(PageBox::new(0.0, 0.0, 612.0, 792.0));
        assert!(overlay.is_empty());
        assert_eq!(overlay.width(), 612.0);
        assert_eq!(overlay.height(), 792.0);
    }

    #[test]
    fn test_font_resource_names_are_stable() {
        let mut overlay = Overlay::new(PageBox::a4());

        assert_eq!(overlay.font_resource(FontHandle(3)), "F1");
        assert_eq!(overlay.font_resource(FontHandle(0)), "F2");
        assert_eq!(overlay.font_resource(FontHandle(3)), "F1");
        assert_eq!(overlay.fonts().count(), 2);
    }

    #[test]
    fn test_form_xobject_dictionary() {
        let mut overlay = Overlay::new(PageBox::new(10.0, 20.0, 310.0, 420.0));
        let name = overlay.font_resource(FontHandle(0));
        overlay
            .content_mut()
            .extend_from_slice(format!("BT /{name} 12 Tf ET\n").as_bytes());

        let stream = overlay
            .to_form_xobject(|_| Some((7, 0)))
            .expect("Failed to build XObject");

        assert_eq!(stream.dict.get(b"Subtype").unwrap().as_name().unwrap(), b"Form");

        let bbox = stream.dict.get(b"BBox").unwrap().as_array().unwrap();
        assert_eq!(bbox[2].as_float().unwrap(), 300.0);
        assert_eq!(bbox[3].as_float().unwrap(), 400.0);

        let matrix = stream.dict.get(b"Matrix").unwrap().as_array().unwrap();
        assert_eq!(matrix[4].as_float().unwrap(), 10.0);
        assert_eq!(matrix[5].as_float().unwrap(), 20.0);

        let resources = stream.dict.get(b"Resources").unwrap().as_dict().unwrap();
        let fonts = resources.get(b"Font").unwrap().as_dict().unwrap();
        assert_eq!(fonts.get(b"F1").unwrap().as_reference().unwrap(), (7, 0));

        let content = stream.decompressed_content().unwrap();
        assert_eq!(content, b"BT /F1 12 Tf ET\n");
    }

    #[test]
    fn test_form_xobject_unknown_font() {
        let mut overlay = Overlay::new(PageBox::a4());
        overlay.font_resource(FontHandle(1));

        let result = overlay.to_form_xobject(|_| None);
        assert!(matches!(result, Err(PdfError::FontNotFound(_))));
    }
}
