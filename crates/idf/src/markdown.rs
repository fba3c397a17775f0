//! A small line-oriented reader for markdown-style drafts.
//!
//! Supports ATX headings (`#` .. `######`), bullet items (`-`, `*`),
//! numbered items (`1.`) and paragraphs separated by blank lines. Consecutive
//! text lines are joined with a single space. Inline markup is kept verbatim.

use crate::{IRNode, NodeMetadata, RichText};

pub fn from_markdown(source: &str) -> RichText {
    let mut reader = Reader::default();
    for line in source.lines() {
        reader.line(line.trim_end());
    }
    reader.finish()
}

#[derive(Default)]
struct Reader {
    nodes: Vec<IRNode>,
    paragraph: Vec<String>,
    list: Option<(bool, Vec<IRNode>)>,
}

impl Reader {
    fn line(&mut self, line: &str) {
        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            self.flush_paragraph();
            self.flush_list();
            return;
        }

        if let Some((level, text)) = parse_heading(trimmed) {
            self.flush_paragraph();
            self.flush_list();
            self.nodes.push(IRNode::heading(level, text));
            return;
        }

        if let Some((ordered, text)) = parse_list_item(trimmed) {
            self.flush_paragraph();
            if matches!(self.list, Some((kind, _)) if kind != ordered) {
                self.flush_list();
            }
            let (_, items) = self.list.get_or_insert_with(|| (ordered, Vec::new()));
            items.push(IRNode::ListItem {
                meta: NodeMetadata::default(),
                children: vec![IRNode::paragraph(text)],
            });
            return;
        }

        self.flush_list();
        self.paragraph.push(trimmed.to_string());
    }

    fn flush_paragraph(&mut self) {
        if !self.paragraph.is_empty() {
            let text = self.paragraph.join(" ");
            self.paragraph.clear();
            self.nodes.push(IRNode::paragraph(text));
        }
    }

    fn flush_list(&mut self) {
        if let Some((ordered, children)) = self.list.take() {
            self.nodes.push(IRNode::List {
                meta: NodeMetadata::default(),
                ordered,
                children,
            });
        }
    }

    fn finish(mut self) -> RichText {
        self.flush_paragraph();
        self.flush_list();
        RichText::from_nodes(self.nodes)
    }
}

fn parse_heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = &line[hashes..];
    if rest.is_empty() {
        return Some((hashes as u8, ""));
    }
    rest.strip_prefix(' ')
        .map(|text| (hashes as u8, text.trim()))
}

fn parse_list_item(line: &str) -> Option<(bool, &str)> {
    if let Some(text) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return Some((false, text.trim()));
    }
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        return line[digits..]
            .strip_prefix(". ")
            .map(|text| (true, text.trim()));
    }
    None
}
