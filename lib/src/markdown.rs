use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

/// A block of flattened text ready for layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    Paragraph(String),
    ListItem { depth: usize, text: String },
    Code(String),
    Rule,
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[derive(Default)]
struct Collector {
    blocks: Vec<Block>,
    text: String,
    depth: usize,
    in_code: bool,
}

impl Collector {
    fn take_text(&mut self) -> String {
        let text = self.text.trim().to_string();
        self.text.clear();
        text
    }

    /// Emits the text gathered so far for the enclosing list item.
    fn flush_item(&mut self) {
        let text = self.take_text();
        if !text.is_empty() {
            self.blocks.push(Block::ListItem {
                depth: self.depth,
                text,
            });
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => self.in_code = true,
            Event::End(TagEnd::CodeBlock) => {
                self.in_code = false;
                let code = self.text.trim_end_matches('\n').to_string();
                self.text.clear();
                self.blocks.push(Block::Code(code));
            }
            Event::Start(Tag::List(_)) => {
                if self.depth > 0 {
                    self.flush_item();
                }
                self.depth += 1;
            }
            Event::End(TagEnd::List(_)) => self.depth = self.depth.saturating_sub(1),
            Event::End(TagEnd::Item) => self.flush_item(),
            Event::End(TagEnd::Paragraph) => {
                if self.depth > 0 {
                    self.text.push(' ');
                } else {
                    let text = self.take_text();
                    if !text.is_empty() {
                        self.blocks.push(Block::Paragraph(text));
                    }
                }
            }
            Event::End(TagEnd::Heading(level)) => {
                let text = self.take_text();
                self.blocks.push(Block::Heading {
                    level: heading_level(level),
                    text,
                });
            }
            Event::Text(text) | Event::Code(text) => self.text.push_str(&text),
            Event::SoftBreak => self.text.push(' '),
            Event::HardBreak => self.text.push('\n'),
            Event::Rule => self.blocks.push(Block::Rule),
            _ => {}
        }
    }
}

pub fn parse(markdown: &str) -> Vec<Block> {
    let mut collector = Collector::default();
    for event in Parser::new(markdown) {
        collector.event(event);
    }
    collector.blocks
}
