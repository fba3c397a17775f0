//! Serializes a report into the HTML payload sent to the PDF converter.
//!
//! Every report page becomes exactly one `<section class="report-page">`, in
//! page order. Editor chrome is dropped and all text is escaped.

use folio_idf::{IRNode, InlineNode, Mark, RichText};
use folio_layout::photo_grid;
use folio_types::{EmbeddedImage, PageType, PhysicalPageSize, ReportHeader, ReportPage};

/// Class carried by each page section.
pub const PAGE_CLASS: &str = "report-page";

#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Embed the print stylesheet in `<head>`.
    pub embed_styles: bool,
    pub page_size: PhysicalPageSize,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            embed_styles: true,
            page_size: PhysicalPageSize::LETTER,
        }
    }
}

/// Renders the whole report as a standalone HTML document.
pub fn render_document_html(
    header: &ReportHeader,
    pages: &[ReportPage],
    options: &HtmlOptions,
) -> String {
    let mut ctx = EmitContext::new();

    ctx.write("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>");
    ctx.write_escaped(&header.document_title);
    ctx.write("</title>\n");
    if options.embed_styles {
        ctx.write("<style>\n");
        ctx.write(&print_stylesheet(options.page_size));
        ctx.write("</style>\n");
    }
    ctx.write("</head>\n<body>\n");

    for (index, page) in pages.iter().enumerate() {
        emit_page(header, page, index + 1, &mut ctx);
    }

    ctx.write("</body>\n</html>\n");
    ctx.output
}

fn print_stylesheet(size: PhysicalPageSize) -> String {
    format!(
        "@page {{ size: {w}in {h}in; margin: 0; }}\n\
         body {{ margin: 0; font-family: Helvetica, Arial, sans-serif; }}\n\
         .{PAGE_CLASS} {{ width: {w}in; min-height: {h}in; box-sizing: border-box; \
         padding: 0.5in; break-after: page; }}\n\
         .{PAGE_CLASS}:last-of-type {{ break-after: auto; }}\n\
         .report-header {{ border-bottom: 1px solid #444; margin-bottom: 12pt; }}\n\
         .photo-appendix {{ padding: 0.25in; }}\n\
         .photo-row {{ display: flex; gap: 12pt; margin-bottom: 12pt; }}\n\
         .photo-row figure {{ flex: 1; margin: 0; }}\n\
         figure img {{ max-width: 100%; height: auto; }}\n",
        w = size.width_in,
        h = size.height_in,
    )
}

struct EmitContext {
    output: String,
}

impl EmitContext {
    fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn write_escaped(&mut self, text: &str) {
        self.output.push_str(&escape_html(text));
    }
}

fn emit_page(header: &ReportHeader, page: &ReportPage, number: usize, ctx: &mut EmitContext) {
    let type_class = match page.page_type {
        PageType::Standard => "standard",
        PageType::PhotoAppendix => "photo-appendix",
    };
    ctx.write(&format!(
        "<section class=\"{PAGE_CLASS} {type_class}\" data-page-id=\"{}\" data-page-number=\"{number}\">\n",
        escape_attr(page.id.as_str())
    ));
    emit_header(header, ctx);

    let content = page.content.without_interactive();
    if !content.is_empty() {
        ctx.write("<div class=\"report-content\">\n");
        emit_nodes(&content.nodes, ctx);
        ctx.write("</div>\n");
    }

    if !page.images.is_empty() {
        match page.page_type {
            PageType::PhotoAppendix => emit_photo_grid(&page.images, ctx),
            PageType::Standard => {
                ctx.write("<div class=\"report-images\">\n");
                for image in &page.images {
                    emit_figure(image, ctx);
                }
                ctx.write("</div>\n");
            }
        }
    }

    ctx.write("</section>\n");
}

fn emit_header(header: &ReportHeader, ctx: &mut EmitContext) {
    ctx.write("<header class=\"report-header\">\n<div class=\"company\">");
    ctx.write_escaped(&header.company_name);
    ctx.write("</div>\n<h1 class=\"title\">");
    ctx.write_escaped(&header.document_title);
    ctx.write("</h1>\n<div class=\"meta\"><span class=\"project\">");
    ctx.write_escaped(&header.project_number);
    ctx.write("</span><span class=\"issue-date\">");
    ctx.write_escaped(&header.formatted_issue_date());
    ctx.write("</span></div>\n</header>\n");
}

fn emit_photo_grid(images: &[EmbeddedImage], ctx: &mut EmitContext) {
    let grid = photo_grid(PageType::PhotoAppendix, images.len());
    ctx.write("<div class=\"photo-grid\">\n");
    let mut current_row = None;
    for slot in &grid.slots {
        let row = (slot.page, slot.row);
        if current_row != Some(row) {
            if current_row.is_some() {
                ctx.write("</div>\n");
            }
            ctx.write("<div class=\"photo-row\">\n");
            current_row = Some(row);
        }
        if let Some(image) = images.get(slot.image_index) {
            emit_figure(image, ctx);
        }
    }
    if current_row.is_some() {
        ctx.write("</div>\n");
    }
    ctx.write("</div>\n");
}

fn emit_figure(image: &EmbeddedImage, ctx: &mut EmitContext) {
    let caption = image.description.as_deref().unwrap_or("");
    ctx.write(&format!(
        "<figure><img src=\"{}\" width=\"{}\" height=\"{}\" alt=\"{}\">",
        escape_attr(&image.image_ref),
        image.width,
        image.height,
        escape_attr(caption)
    ));
    if !caption.is_empty() {
        ctx.write("<figcaption>");
        ctx.write_escaped(caption);
        ctx.write("</figcaption>");
    }
    ctx.write("</figure>\n");
}

fn emit_nodes(nodes: &[IRNode], ctx: &mut EmitContext) {
    for node in nodes {
        emit_node(node, ctx);
    }
}

fn emit_node(node: &IRNode, ctx: &mut EmitContext) {
    match node {
        IRNode::Block { children, .. } => {
            ctx.write("<div>");
            emit_nodes(children, ctx);
            ctx.write("</div>\n");
        }
        IRNode::Paragraph { children, .. } => {
            ctx.write("<p>");
            emit_inlines(children, ctx);
            ctx.write("</p>\n");
        }
        IRNode::Heading { level, children, .. } => {
            let level = (*level).clamp(1, 6);
            ctx.write(&format!("<h{level}>"));
            emit_inlines(children, ctx);
            ctx.write(&format!("</h{level}>\n"));
        }
        IRNode::Image { src, alt, .. } => {
            ctx.write(&format!(
                "<img src=\"{}\" alt=\"{}\">\n",
                escape_attr(src),
                escape_attr(alt.as_deref().unwrap_or(""))
            ));
        }
        IRNode::List {
            ordered, children, ..
        } => {
            let tag = if *ordered { "ol" } else { "ul" };
            ctx.write(&format!("<{tag}>\n"));
            emit_nodes(children, ctx);
            ctx.write(&format!("</{tag}>\n"));
        }
        IRNode::ListItem { children, .. } => {
            ctx.write("<li>");
            emit_nodes(children, ctx);
            ctx.write("</li>\n");
        }
        // Pages break only between report pages
        IRNode::PageBreak | IRNode::Control { .. } => {}
    }
}

fn emit_inlines(children: &[InlineNode], ctx: &mut EmitContext) {
    for child in children {
        match child {
            InlineNode::Text { text } => ctx.write_escaped(text),
            InlineNode::Styled { marks, children } => {
                for mark in marks {
                    ctx.write(&format!("<{}>", mark_tag(*mark)));
                }
                emit_inlines(children, ctx);
                for mark in marks.iter().rev() {
                    ctx.write(&format!("</{}>", mark_tag(*mark)));
                }
            }
            InlineNode::Hyperlink { href, children } => {
                ctx.write(&format!("<a href=\"{}\">", escape_attr(href)));
                emit_inlines(children, ctx);
                ctx.write("</a>");
            }
            // Editor highlights carry no print styling.
            InlineNode::Highlight { children } => emit_inlines(children, ctx),
            InlineNode::LineBreak => ctx.write("<br>"),
        }
    }
}

fn mark_tag(mark: Mark) -> &'static str {
    match mark {
        Mark::Bold => "strong",
        Mark::Italic => "em",
        Mark::Underline => "u",
        Mark::Strike => "s",
    }
}

/// Escape text content.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape attribute values.
fn escape_attr(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Counts the page sections in an HTML payload.
pub fn count_page_sections(html: &str) -> usize {
    html.matches(&format!("<section class=\"{PAGE_CLASS}")).count()
}

/// Convenience for callers holding loose content rather than pages.
pub fn render_rich_text(content: &RichText) -> String {
    let mut ctx = EmitContext::new();
    emit_nodes(&content.without_interactive().nodes, &mut ctx);
    ctx.output
}
