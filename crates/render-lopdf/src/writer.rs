use folio_render_core::RenderError;
use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};

/// Builds a PDF object graph page by page and serializes it once finished.
///
/// No info dictionary or timestamps are written, so identical input yields
/// identical bytes.
pub struct PdfBuilder {
    document: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    font_id: ObjectId,
    page_width: f32,
    page_height: f32,
}

impl PdfBuilder {
    /// Resource name under which Helvetica is available to every page.
    pub const FONT_NAME: &'static str = "F1";

    pub fn new(page_width: f32, page_height: f32) -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        let font_id = document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        Self {
            document,
            pages_id,
            page_ids: Vec::new(),
            font_id,
            page_width,
            page_height,
        }
    }

    pub fn page_width(&self) -> f32 {
        self.page_width
    }

    pub fn page_height(&self) -> f32 {
        self.page_height
    }

    /// Adds a JPEG image XObject and returns its id.
    pub fn add_jpeg(&mut self, jpeg: Vec<u8>, width: u32, height: u32) -> ObjectId {
        let dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        };
        // Already compressed; must not be re-encoded.
        let stream = Stream::new(dict, jpeg).with_compression(false);
        self.document.add_object(stream)
    }

    /// Appends a page drawing `content`, with `xobjects` available by name.
    pub fn add_page(
        &mut self,
        content: Content,
        xobjects: &[(&str, ObjectId)],
    ) -> Result<ObjectId, RenderError> {
        let content_id = self
            .document
            .add_object(Stream::new(dictionary! {}, content.encode()?));

        let mut resources = dictionary! {
            "Font" => dictionary! { Self::FONT_NAME => self.font_id },
        };
        if !xobjects.is_empty() {
            let mut xobject_dict = Dictionary::new();
            for (name, id) in xobjects {
                xobject_dict.set(name.as_bytes(), Object::Reference(*id));
            }
            resources.set("XObject", xobject_dict);
        }

        let page_id = self.document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), self.page_width.into(), self.page_height.into()],
            "Contents" => content_id,
            "Resources" => resources,
        });
        self.page_ids.push(page_id);
        Ok(page_id)
    }

    pub fn finish(mut self) -> Result<Vec<u8>, RenderError> {
        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::from(*id)).collect();
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => self.page_ids.len() as i64,
        };
        self.document
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_id = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.document.trailer.set("Root", catalog_id);

        let mut out = Vec::new();
        self.document.save_to(&mut out)?;
        Ok(out)
    }
}
