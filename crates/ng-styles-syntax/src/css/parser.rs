//! Lossless stylesheet parser.
//!
//! Every byte of the input lands in a node field or a raw, so
//! [`super::stringify`] reproduces accepted input exactly. Node end positions
//! point one past the node's last character.

use super::ast::{
    AtRule, AtRuleRaws, BlockRaws, Comment, CommentRaws, DeclRaws, Declaration, Node, Root,
    RootRaws, Rule,
};
use super::CssSyntaxError;
use crate::{LineIndex, Range};

type Result<T> = std::result::Result<T, CssSyntaxError>;

/// What ended a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    Semicolon,
    OpenBrace,
    CloseBrace,
    Eof,
}

/// Contents of a container plus the raws that close it
struct Block {
    nodes: Vec<Node>,
    after: String,
    semicolon: bool,
}

pub(crate) struct Parser<'a> {
    css: &'a str,
    file: Option<&'a str>,
    index: LineIndex<'a>,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(css: &'a str, file: Option<&'a str>) -> Self {
        Self {
            css,
            file,
            index: LineIndex::new(css),
            pos: 0,
        }
    }

    pub(crate) fn parse(mut self) -> Result<Root> {
        let block = self.block(None)?;

        Ok(Root {
            nodes: block.nodes,
            raws: RootRaws {
                after: block.after,
                semicolon: block.semicolon,
            },
            source: Range::new(self.index.position(0), self.index.position(self.css.len())),
        })
    }

    /// Parse children until `}` (when `opened_at` is set) or end of input.
    fn block(&mut self, opened_at: Option<usize>) -> Result<Block> {
        let mut nodes = Vec::new();
        let mut semicolon = false;

        loop {
            let before_start = self.pos;
            self.skip_spacing();
            let before = self.css[before_start..self.pos].to_string();

            let rest = &self.css[self.pos..];
            if rest.is_empty() {
                if let Some(open) = opened_at {
                    return Err(self.error("Unclosed block", open, None));
                }
                return Ok(Block {
                    nodes,
                    after: before,
                    semicolon,
                });
            }

            if rest.starts_with('}') {
                if opened_at.is_none() {
                    return Err(self.error("Unexpected }", self.pos, None));
                }
                self.pos += 1;
                return Ok(Block {
                    nodes,
                    after: before,
                    semicolon,
                });
            }

            let (node, own_semicolon) = if rest.starts_with("/*") {
                (self.comment(before)?, false)
            } else if rest.starts_with('@') {
                self.at_rule(before)?
            } else {
                self.rule_or_decl(before)?
            };

            semicolon = own_semicolon;
            nodes.push(node);
        }
    }

    /// Skip whitespace and stray semicolons; both end up in `before` raws.
    fn skip_spacing(&mut self) {
        let skipped = self.css[self.pos..]
            .find(|ch: char| !ch.is_whitespace() && ch != ';')
            .unwrap_or(self.css.len() - self.pos);
        self.pos += skipped;
    }

    fn comment(&mut self, before: String) -> Result<Node> {
        let start = self.pos;
        let close = self.comment_end(start)?;
        let inner = &self.css[start + 2..close - 2];
        self.pos = close;

        let text = inner.trim();
        let (left, right) = if text.is_empty() {
            (inner.to_string(), String::new())
        } else {
            let left_len = inner.len() - inner.trim_start().len();
            let right_start = inner.trim_end().len();
            (
                inner[..left_len].to_string(),
                inner[right_start..].to_string(),
            )
        };

        Ok(Node::Comment(Comment {
            text: text.to_string(),
            raws: CommentRaws {
                before,
                left,
                right,
            },
            source: self.range(start, close),
        }))
    }

    fn at_rule(&mut self, before: String) -> Result<(Node, bool)> {
        let start = self.pos;
        let name_start = start + 1;
        let name_len = self.css[name_start..]
            .find(|ch: char| ch.is_whitespace() || "{};\"'(/".contains(ch))
            .unwrap_or(self.css.len() - name_start);
        let name = self.css[name_start..name_start + name_len].to_string();

        let params_start = {
            let after = &self.css[name_start + name_len..];
            name_start + name_len + (after.len() - after.trim_start().len())
        };
        let after_name = self.css[name_start + name_len..params_start].to_string();

        let (end, terminator) = self.scan_statement(params_start)?;
        let text = &self.css[params_start..end];
        let params = text.trim_end().to_string();

        let mut raws = AtRuleRaws {
            before,
            after_name,
            ..AtRuleRaws::default()
        };

        let (nodes, own_semicolon) = match terminator {
            Terminator::OpenBrace => {
                raws.between = text[params.len()..].to_string();
                self.pos = end + 1;
                let block = self.block(Some(start))?;
                raws.after = block.after;
                raws.semicolon = block.semicolon;
                (Some(block.nodes), false)
            }
            Terminator::Semicolon => {
                raws.between = text[params.len()..].to_string();
                self.pos = end + 1;
                (None, true)
            }
            Terminator::CloseBrace | Terminator::Eof => {
                self.pos = params_start + params.len();
                (None, false)
            }
        };

        let node = Node::AtRule(AtRule {
            name,
            params,
            nodes,
            raws,
            source: self.range(start, self.pos),
        });
        Ok((node, own_semicolon))
    }

    fn rule_or_decl(&mut self, before: String) -> Result<(Node, bool)> {
        let start = self.pos;
        let (end, terminator) = self.scan_statement(start)?;
        let text = &self.css[start..end];
        let trimmed = text.trim_end();

        if terminator == Terminator::OpenBrace {
            let between = text[trimmed.len()..].to_string();
            let selector = trimmed.to_string();
            self.pos = end + 1;
            let block = self.block(Some(start))?;

            let node = Node::Rule(Rule {
                selector,
                nodes: block.nodes,
                raws: BlockRaws {
                    before,
                    between,
                    after: block.after,
                    semicolon: block.semicolon,
                },
                source: self.range(start, self.pos),
            });
            return Ok((node, false));
        }

        let colon = find_colon(trimmed)
            .filter(|&colon| !trimmed[..colon].trim().is_empty())
            .ok_or_else(|| self.error("Unknown word", start, Some(start + trimmed.len())))?;

        let prop = trimmed[..colon].trim_end();
        let value_start = {
            let after = &trimmed[colon + 1..];
            colon + 1 + (after.len() - after.trim_start().len())
        };

        let own_semicolon = terminator == Terminator::Semicolon;
        let trailing = if own_semicolon {
            self.pos = end + 1;
            text[trimmed.len()..].to_string()
        } else {
            self.pos = start + trimmed.len();
            String::new()
        };

        let node = Node::Decl(Declaration {
            prop: prop.to_string(),
            value: trimmed[value_start..].to_string(),
            raws: DeclRaws {
                before,
                between: trimmed[prop.len()..value_start].to_string(),
                trailing,
            },
            source: self.range(start, self.pos),
        });
        Ok((node, own_semicolon))
    }

    /// Find the end of the statement starting at `from`, skipping strings,
    /// comments, escapes, and bracketed groups.
    fn scan_statement(&self, from: usize) -> Result<(usize, Terminator)> {
        let bytes = self.css.as_bytes();
        let mut depth = 0usize;
        let mut group_start = from;
        let mut i = from;

        while i < bytes.len() {
            match bytes[i] {
                b'\\' => {
                    i += 2;
                    continue;
                }
                b'"' | b'\'' => {
                    i = self.string_end(i)?;
                    continue;
                }
                b'/' if bytes.get(i + 1) == Some(&b'*') => {
                    i = self.comment_end(i)?;
                    continue;
                }
                b'(' | b'[' => {
                    if depth == 0 {
                        group_start = i;
                    }
                    depth += 1;
                }
                b')' | b']' => depth = depth.saturating_sub(1),
                b';' if depth == 0 => return Ok((i, Terminator::Semicolon)),
                b'{' if depth == 0 => return Ok((i, Terminator::OpenBrace)),
                b'}' if depth == 0 => return Ok((i, Terminator::CloseBrace)),
                _ => {}
            }
            i += 1;
        }

        if depth > 0 {
            return Err(self.error("Unclosed bracket", group_start, None));
        }
        Ok((bytes.len(), Terminator::Eof))
    }

    /// Offset just past the closing quote of the string opening at `start`
    fn string_end(&self, start: usize) -> Result<usize> {
        let bytes = self.css.as_bytes();
        let quote = bytes[start];
        let mut i = start + 1;

        while i < bytes.len() {
            match bytes[i] {
                b'\\' => i += 2,
                b if b == quote => return Ok(i + 1),
                _ => i += 1,
            }
        }

        Err(self.error("Unclosed string", start, None))
    }

    /// Offset just past the `*/` closing the comment opening at `start`
    fn comment_end(&self, start: usize) -> Result<usize> {
        self.css[start + 2..]
            .find("*/")
            .map(|idx| start + 2 + idx + 2)
            .ok_or_else(|| self.error("Unclosed comment", start, None))
    }

    fn range(&self, start: usize, end: usize) -> Range {
        Range::new(self.index.position(start), self.index.position(end))
    }

    fn error(&self, reason: &str, start: usize, end: Option<usize>) -> CssSyntaxError {
        CssSyntaxError::new(
            reason,
            self.file,
            self.index.position(start),
            end.map(|end| self.index.position(end)),
            self.css,
        )
    }
}

/// Byte offset of the first `:` outside strings, comments, and brackets
fn find_colon(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) => {
                if b == b'\\' {
                    i += 1;
                } else if b == q {
                    quote = None;
                }
            }
            None => match b {
                b'\\' => i += 1,
                b'"' | b'\'' => quote = Some(b),
                b'/' if bytes.get(i + 1) == Some(&b'*') => {
                    i = text[i + 2..].find("*/").map_or(bytes.len(), |idx| i + 2 + idx + 1);
                }
                b'(' | b'[' => depth += 1,
                b')' | b']' => depth = depth.saturating_sub(1),
                b':' if depth == 0 => return Some(i),
                _ => {}
            },
        }
        i += 1;
    }

    None
}
