//! Markdown lexer: folds the `pulldown-cmark` event stream into the
//! block-token sequence consumed by the layout pipeline.
//!
//! Inline markup (emphasis, code spans, strikethrough, links) is stripped to
//! plain text runs here, so the block renderer never sees markup syntax.
//! Block kinds the renderer has no drawing rule for (code fences, block
//! quotes) degrade to paragraphs instead of being dropped.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use super::inline::InlineText;
use super::tokens::{Block, List, ListItem, Table};

/// Lex a markdown string into block tokens in reading order.
pub fn lex(source: &str) -> Vec<Block> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut lexer = Lexer::default();
    for event in Parser::new_ext(source, options) {
        lexer.handle(event);
    }
    lexer.finish()
}

#[derive(Default)]
struct Lexer {
    blocks: Vec<Block>,
    inline: InlineText,
    list_stack: Vec<List>,
    item_stack: Vec<ListItem>,
    table: Option<TableBuilder>,
    in_code_block: bool,
}

#[derive(Default)]
struct TableBuilder {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    current: Vec<String>,
    in_head: bool,
}

impl Lexer {
    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.inline.push_run(&text),
            Event::Code(code) => self.inline.push_run(&code),
            Event::SoftBreak | Event::HardBreak => {
                if self.in_code_block {
                    self.inline.push_run("\n");
                } else {
                    self.inline.push_break();
                }
            }
            Event::Rule => {
                // Rules nested in list items have no layout slot; skip them.
                if self.item_stack.is_empty() {
                    self.blocks.push(Block::Rule);
                }
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::List(start) => {
                self.flush_into_item();
                self.list_stack.push(match start {
                    Some(n) => List::ordered(n),
                    None => List::unordered(),
                });
            }
            Tag::Item => self.item_stack.push(ListItem::new("")),
            Tag::Table(_) => self.table = Some(TableBuilder::default()),
            Tag::TableHead => {
                if let Some(table) = self.table.as_mut() {
                    table.in_head = true;
                }
            }
            Tag::CodeBlock(_) => self.in_code_block = true,
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(level) => {
                let text = self.inline.take();
                if !text.is_empty() {
                    self.blocks.push(Block::Heading {
                        depth: (level as u8).clamp(1, 6),
                        text,
                    });
                }
            }
            TagEnd::Paragraph => {
                if !self.item_stack.is_empty() {
                    self.flush_into_item();
                } else {
                    let text = self.inline.take();
                    if !text.is_empty() {
                        self.blocks.push(Block::Paragraph { text });
                    }
                }
            }
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                if !self.item_stack.is_empty() {
                    self.flush_into_item();
                } else {
                    let text = self.inline.take();
                    if !text.is_empty() {
                        self.blocks.push(Block::Paragraph { text });
                    }
                }
            }
            TagEnd::Item => {
                self.flush_into_item();
                if let Some(item) = self.item_stack.pop() {
                    if let Some(list) = self.list_stack.last_mut() {
                        list.items.push(item);
                    }
                }
            }
            TagEnd::List(_) => {
                if let Some(list) = self.list_stack.pop() {
                    if list.items.is_empty() {
                        return;
                    }
                    match self.item_stack.last_mut() {
                        Some(item) => match item.nested.as_mut() {
                            Some(nested) => nested.items.extend(list.items),
                            None => item.nested = Some(list),
                        },
                        None => self.blocks.push(Block::List(list)),
                    }
                }
            }
            TagEnd::TableCell => {
                if let Some(table) = self.table.as_mut() {
                    table.current.push(self.inline.take());
                }
            }
            TagEnd::TableHead => {
                if let Some(table) = self.table.as_mut() {
                    table.header = std::mem::take(&mut table.current);
                    table.in_head = false;
                }
            }
            TagEnd::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    table.rows.push(std::mem::take(&mut table.current));
                }
            }
            TagEnd::Table => {
                if let Some(builder) = self.table.take() {
                    let table = Table {
                        header: builder.header,
                        rows: builder.rows,
                    };
                    if !table.is_empty() {
                        self.blocks.push(Block::Table(table));
                    }
                }
            }
            _ => {}
        }
    }

    /// Move any pending inline text into the innermost open list item.
    fn flush_into_item(&mut self) {
        if self.inline.is_empty() {
            self.inline.take();
            return;
        }
        if let Some(item) = self.item_stack.last_mut() {
            let text = self.inline.take();
            if item.text.is_empty() {
                item.text = text;
            } else {
                item.text.push(' ');
                item.text.push_str(&text);
            }
        }
    }

    fn finish(mut self) -> Vec<Block> {
        // Loose text outside any block container becomes a trailing paragraph.
        let text = self.inline.take();
        if !text.is_empty() {
            self.blocks.push(Block::Paragraph { text });
        }
        self.blocks
    }
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::tokens::{kind_sequence, BlockKind};

    #[test]
    fn test_lex_heading_and_paragraph() {
        let blocks = lex("# Title\n\nBody text here.\n");
        assert_eq!(blocks.len(), 2);
        assert_eq!(
            blocks[0],
            Block::Heading {
                depth: 1,
                text: "Title".into()
            }
        );
        assert_eq!(
            blocks[1],
            Block::Paragraph {
                text: "Body text here.".into()
            }
        );
    }

    #[test]
    fn test_lex_heading_depths() {
        let blocks = lex("## Two\n\n###### Six\n");
        assert_eq!(
            blocks,
            vec![
                Block::Heading {
                    depth: 2,
                    text: "Two".into()
                },
                Block::Heading {
                    depth: 6,
                    text: "Six".into()
                },
            ]
        );
    }

    #[test]
    fn test_inline_markup_is_stripped() {
        let blocks = lex("Some **bold**, *italic*, `code`, ~~gone~~ and [link](http://x) text.\n");
        assert_eq!(
            blocks,
            vec![Block::Paragraph {
                text: "Some bold, italic, code, gone and link text.".into()
            }]
        );
    }

    #[test]
    fn test_lex_unordered_list() {
        let blocks = lex("- one\n- two\n- three\n");
        let Block::List(list) = &blocks[0] else {
            panic!("expected a list");
        };
        assert!(!list.ordered);
        assert_eq!(list.items.len(), 3);
        assert_eq!(list.items[1].text, "two");
    }

    #[test]
    fn test_lex_ordered_list_start() {
        let blocks = lex("4. four\n5. five\n");
        let Block::List(list) = &blocks[0] else {
            panic!("expected a list");
        };
        assert!(list.ordered);
        assert_eq!(list.start, 4);
        assert_eq!(list.items.len(), 2);
    }

    #[test]
    fn test_lex_nested_list() {
        let blocks = lex("- outer\n    - inner one\n    - inner two\n- next\n");
        let Block::List(list) = &blocks[0] else {
            panic!("expected a list");
        };
        assert_eq!(list.items.len(), 2);
        assert_eq!(list.items[0].text, "outer");
        let nested = list.items[0].nested.as_ref().expect("nested list");
        assert_eq!(nested.items.len(), 2);
        assert_eq!(nested.items[1].text, "inner two");
        assert!(list.items[1].nested.is_none());
    }

    #[test]
    fn test_lex_table() {
        let src = "| Term | Definition |\n| --- | --- |\n| BRD | Business doc |\n| FRS | Functional doc |\n";
        let blocks = lex(src);
        let Block::Table(table) = &blocks[0] else {
            panic!("expected a table");
        };
        assert_eq!(table.header, vec!["Term", "Definition"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1][0], "FRS");
    }

    #[test]
    fn test_lex_rule() {
        let blocks = lex("before\n\n---\n\nafter\n");
        assert_eq!(
            kind_sequence(&blocks),
            vec![BlockKind::Paragraph, BlockKind::Rule, BlockKind::Paragraph]
        );
    }

    #[test]
    fn test_code_fence_degrades_to_paragraph() {
        let blocks = lex("```rust\nlet x = 1;\n```\n");
        assert_eq!(kind_sequence(&blocks), vec![BlockKind::Paragraph]);
    }

    #[test]
    fn test_block_quote_degrades_to_paragraph() {
        let blocks = lex("> quoted text\n");
        assert_eq!(
            blocks,
            vec![Block::Paragraph {
                text: "quoted text".into()
            }]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(lex("").is_empty());
        assert!(lex("   \n\n  \n").is_empty());
    }
}
