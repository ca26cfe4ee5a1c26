//! Embedded TrueType fonts
//!
//! Text is written as 2-byte glyph ids (Identity-H encoding with an identity
//! CIDToGIDMap), so any character the font covers can be drawn, including
//! Devanagari. Only the glyphs that were drawn are embedded: glyphs get
//! subset ids in the order they are first drawn, and the font program is
//! cut down to those glyphs with `subsetter` when the document is saved.

use crate::{PdfError, Result};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::BTreeMap;
use std::io::Write;
use std::sync::Arc;
use subsetter::GlyphRemapper;
use ttf_parser::{Face, GlyphId};

/// PDF glyph space units per em
const GLYPH_SPACE: i64 = 1000;

/// Maximum entries per `beginbfchar` section
const BFCHAR_LIMIT: usize = 100;

const CMAP_HEADER: &str = "/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def
/CMapName /Adobe-Identity-UCS def
/CMapType 2 def
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
";

const CMAP_TRAILER: &str = "endcmap
CMapName currentdict /CMap defineresource pop
end
end
";

/// Object ids the font's embedded objects live at
///
/// Reserved on the first save and overwritten on later ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EmbeddedObjects {
    program: ObjectId,
    descriptor: ObjectId,
    cid_font: ObjectId,
    to_unicode: ObjectId,
    /// Number of subset glyphs written at these ids
    glyph_count: usize,
}

/// A TrueType font to embed in the output
#[derive(Debug, Clone)]
pub struct TrueTypeFont {
    name: String,
    program: Arc<[u8]>,
    units_per_em: u16,
    ascender: i16,
    descender: i16,
    cap_height: i16,
    bbox: [i16; 4],
    /// Original glyph ids indexed by subset glyph id; `.notdef` stays at 0
    glyphs: Vec<u16>,
    /// Characters drawn so far and their subset glyph ids
    used: BTreeMap<char, u16>,
    embedded: Option<EmbeddedObjects>,
}

impl TrueTypeFont {
    /// Parse a TrueType font program
    ///
    /// # Arguments
    /// * `name` - Name used for `/BaseFont`
    /// * `program` - Contents of the `.ttf` file
    pub fn from_ttf(name: &str, program: &[u8]) -> Result<Self> {
        let face = Face::parse(program, 0)
            .map_err(|e| PdfError::FontParseError(format!("{name}: {e}")))?;
        let bbox = face.global_bounding_box();

        Ok(Self {
            name: name.to_string(),
            units_per_em: face.units_per_em(),
            ascender: face.ascender(),
            descender: face.descender(),
            cap_height: face.capital_height().unwrap_or_else(|| face.ascender()),
            bbox: [bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max],
            glyphs: vec![0],
            used: BTreeMap::new(),
            embedded: None,
            program: Arc::from(program),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn face(&self) -> Option<Face<'_>> {
        Face::parse(&self.program, 0).ok()
    }

    /// Subset id for an original glyph id, allocating the next one if new
    fn subset_id(&mut self, glyph: u16) -> u16 {
        match self.glyphs.iter().position(|&known| known == glyph) {
            Some(index) => index as u16,
            None => {
                self.glyphs.push(glyph);
                (self.glyphs.len() - 1) as u16
            }
        }
    }

    pub fn text_width_points(&self, text: &str, font_size: f32) -> f32 {
        let Some(face) = self.face() else {
            return 0.0;
        };

        let units: u32 = text
            .chars()
            .filter_map(|c| face.glyph_index(c))
            .filter_map(|glyph| face.glyph_hor_advance(glyph))
            .map(u32::from)
            .sum();
        units as f32 * font_size / self.units_per_em as f32
    }

    /// Encode text as `<gid gid ...>` subset glyph ids for the Tj operator
    ///
    /// Characters the font lacks are drawn with `.notdef`.
    pub fn encode_text_hex(&mut self, text: &str) -> String {
        let program = Arc::clone(&self.program);
        let face = Face::parse(&program, 0).ok();

        let mut hex = String::with_capacity(text.len() * 4 + 2);
        hex.push('<');
        for c in text.chars() {
            let glyph = face
                .as_ref()
                .and_then(|face| face.glyph_index(c))
                .map_or(0, |glyph| glyph.0);
            let id = self.subset_id(glyph);
            self.used.insert(c, id);
            hex.push_str(&format!("{id:04X}"));
        }
        hex.push('>');
        hex
    }

    /// Font units to glyph space
    fn scale(&self, units: i32) -> i64 {
        units as i64 * GLYPH_SPACE / self.units_per_em.max(1) as i64
    }

    /// Name safe to use as a PDF name object
    fn postscript_name(&self) -> String {
        self.name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect()
    }

    /// `/W` array for the subset: `[1 [w1 w2 ...]]`
    ///
    /// Subset ids are consecutive, so one run covers every drawn glyph.
    fn widths(&self) -> Vec<Object> {
        let Some(face) = self.face() else {
            return Vec::new();
        };

        let advances: Vec<Object> = self
            .glyphs
            .iter()
            .skip(1)
            .map(|&glyph| {
                let advance = face
                    .glyph_hor_advance(GlyphId(glyph))
                    .map_or(GLYPH_SPACE, |advance| self.scale(advance as i32));
                Object::Integer(advance)
            })
            .collect();

        if advances.is_empty() {
            Vec::new()
        } else {
            vec![Object::Integer(1), Object::Array(advances)]
        }
    }

    /// ToUnicode CMap so drawn text can be searched and copied
    fn to_unicode_cmap(&self) -> String {
        let mut by_glyph: BTreeMap<u16, char> = BTreeMap::new();
        for (&c, &glyph) in &self.used {
            if glyph != 0 {
                by_glyph.entry(glyph).or_insert(c);
            }
        }
        let entries: Vec<(u16, char)> = by_glyph.into_iter().collect();

        let mut cmap = String::from(CMAP_HEADER);
        for chunk in entries.chunks(BFCHAR_LIMIT) {
            cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
            for (glyph, c) in chunk {
                let mut buffer = [0u16; 2];
                let utf16: String = c
                    .encode_utf16(&mut buffer)
                    .iter()
                    .map(|unit| format!("{unit:04X}"))
                    .collect();
                cmap.push_str(&format!("<{glyph:04X}> <{utf16}>\n"));
            }
            cmap.push_str("endbfchar\n");
        }
        cmap.push_str(CMAP_TRAILER);
        cmap
    }

    /// Font program reduced to the drawn glyphs, numbered by subset id
    fn subset_program(&self) -> Result<Vec<u8>> {
        let mut remapper = GlyphRemapper::new();
        for &glyph in &self.glyphs {
            remapper.remap(glyph);
        }

        subsetter::subset(&self.program, 0, &remapper)
            .map_err(|e| PdfError::FontParseError(format!("{}: subsetting failed: {e:?}", self.name)))
    }

    /// True when the objects written by the last [`embed`](Self::embed)
    /// still cover every drawn glyph
    pub(crate) fn is_embedded(&self) -> bool {
        self.embedded
            .is_some_and(|embedded| embedded.glyph_count == self.glyphs.len())
    }

    /// Write the font program, descriptor, CID font and ToUnicode map to `doc`
    ///
    /// The objects are written at the same ids on every call, so saving a
    /// document twice leaves no stale copies behind. Returns the Type0 font
    /// dictionary that pages refer to.
    pub(crate) fn embed(&mut self, doc: &mut Document) -> Result<Dictionary> {
        let mut ids = match self.embedded {
            Some(embedded) => embedded,
            None => EmbeddedObjects {
                program: doc.new_object_id(),
                descriptor: doc.new_object_id(),
                cid_font: doc.new_object_id(),
                to_unicode: doc.new_object_id(),
                glyph_count: 0,
            },
        };
        let base_font = Object::Name(self.postscript_name().into_bytes());

        let program = self.subset_program()?;
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&program)?;
        doc.objects.insert(
            ids.program,
            Object::Stream(Stream::new(
                Dictionary::from_iter(vec![
                    ("Length1", Object::Integer(program.len() as i64)),
                    ("Filter", Object::Name(b"FlateDecode".to_vec())),
                ]),
                encoder.finish()?,
            )),
        );

        let bbox = self
            .bbox
            .iter()
            .map(|&v| Object::Integer(self.scale(v as i32)))
            .collect();
        doc.objects.insert(
            ids.descriptor,
            Object::Dictionary(Dictionary::from_iter(vec![
                ("Type", Object::Name(b"FontDescriptor".to_vec())),
                ("FontName", base_font.clone()),
                // Symbolic
                ("Flags", Object::Integer(4)),
                ("FontBBox", Object::Array(bbox)),
                ("ItalicAngle", Object::Integer(0)),
                ("Ascent", Object::Integer(self.scale(self.ascender as i32))),
                ("Descent", Object::Integer(self.scale(self.descender as i32))),
                ("CapHeight", Object::Integer(self.scale(self.cap_height as i32))),
                ("StemV", Object::Integer(80)),
                ("FontFile2", Object::Reference(ids.program)),
            ])),
        );

        let system_info = Dictionary::from_iter(vec![
            ("Registry", Object::string_literal("Adobe")),
            ("Ordering", Object::string_literal("Identity")),
            ("Supplement", Object::Integer(0)),
        ]);
        doc.objects.insert(
            ids.cid_font,
            Object::Dictionary(Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Font".to_vec())),
                ("Subtype", Object::Name(b"CIDFontType2".to_vec())),
                ("BaseFont", base_font.clone()),
                ("CIDSystemInfo", Object::Dictionary(system_info)),
                ("FontDescriptor", Object::Reference(ids.descriptor)),
                ("CIDToGIDMap", Object::Name(b"Identity".to_vec())),
                ("DW", Object::Integer(GLYPH_SPACE)),
                ("W", Object::Array(self.widths())),
            ])),
        );

        doc.objects.insert(
            ids.to_unicode,
            Object::Stream(Stream::new(
                Dictionary::new(),
                self.to_unicode_cmap().into_bytes(),
            )),
        );

        ids.glyph_count = self.glyphs.len();
        self.embedded = Some(ids);

        Ok(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Font".to_vec())),
            ("Subtype", Object::Name(b"Type0".to_vec())),
            ("BaseFont", base_font),
            ("Encoding", Object::Name(b"Identity-H".to_vec())),
            (
                "DescendantFonts",
                Object::Array(vec![Object::Reference(ids.cid_font)]),
            ),
            ("ToUnicode", Object::Reference(ids.to_unicode)),
        ]))
    }
}
