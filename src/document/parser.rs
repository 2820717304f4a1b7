//! Terminal rendition of markdown with comrak.
//!
//! Uses the same comrak extensions as the HTML converter so the preview
//! pane shows the structure the HTML would have.

use anyhow::Result;
use comrak::nodes::{AstNode, ListDelimType, ListType, NodeValue, TableAlignment};
use comrak::{Arena, Options, parse_document};
use unicode_width::UnicodeWidthStr;

use super::convert::configure_options;
use super::types::{
    Document, HeadingRef, InlineSpan, InlineStyle, LineType, ParsedDocument, RenderedLine,
};

const CODE_RIGHT_PADDING: usize = 2;

impl Document {
    /// Parse markdown source at the default width of 80 columns.
    ///
    /// # Example
    ///
    /// ```
    /// use mdpreview::document::Document;
    ///
    /// let doc = Document::parse("# Hello\n\nWorld").unwrap();
    /// assert_eq!(doc.headings()[0].text, "Hello");
    /// ```
    pub fn parse(source: &str) -> Result<Self> {
        parse(source)
    }

    pub fn parse_with_layout(source: &str, width: u16) -> Result<Self> {
        parse_with_layout(source, width)
    }
}

/// Parse markdown source into a Document.
pub fn parse(source: &str) -> Result<Document> {
    parse_with_layout(source, 80)
}

/// Parse markdown source into a Document wrapped to `width` columns.
pub fn parse_with_layout(source: &str, width: u16) -> Result<Document> {
    let _scope = crate::perf::scope("document.parse");
    let arena = Arena::new();
    let mut options = Options::default();
    configure_options(&mut options);
    let root = parse_document(&arena, source, &options);

    let mut renderer = Renderer {
        out: ParsedDocument::default(),
        wrap_width: usize::from(width.max(1)),
    };
    renderer.block(root, 0, None);
    trim_trailing_empty(&mut renderer.out.lines);

    Ok(Document::from_parsed(renderer.out))
}

struct Renderer {
    out: ParsedDocument,
    wrap_width: usize,
}

impl Renderer {
    fn push(&mut self, content: String, line_type: LineType) {
        self.out.lines.push(RenderedLine::new(content, line_type));
    }

    fn push_blank(&mut self) {
        self.push(String::new(), LineType::Empty);
    }

    fn push_wrapped(&mut self, spans: &[InlineSpan], line_type: LineType, first: &str, next: &str) {
        for line_spans in wrap_spans(spans, self.wrap_width, first, next) {
            let content = spans_to_string(&line_spans);
            self.out
                .lines
                .push(RenderedLine::with_spans(content, line_type, line_spans));
        }
    }

    fn block<'a>(&mut self, node: &'a AstNode<'a>, depth: usize, list_marker: Option<String>) {
        match &node.data.borrow().value {
            NodeValue::Document => {
                for child in node.children() {
                    self.block(child, depth, None);
                }
            }

            NodeValue::Heading(heading) => {
                let text = extract_text(node);
                ensure_trailing_empty_lines(&mut self.out.lines, 1);
                self.out.headings.push(HeadingRef {
                    level: heading.level,
                    text: text.clone(),
                    line: self.out.lines.len(),
                });
                let underline = match heading.level {
                    1 => Some('═'),
                    2 => Some('─'),
                    _ => None,
                };
                let width = text.width().min(self.wrap_width).max(1);
                self.push(text, LineType::Heading(heading.level));
                if let Some(ch) = underline {
                    self.push(ch.to_string().repeat(width), LineType::Heading(heading.level));
                }
                self.push_blank();
            }

            NodeValue::Paragraph => {
                let images = paragraph_only_images(node);
                if images.is_empty() {
                    let spans = collect_inline_spans(node);
                    self.push_wrapped(&spans, LineType::Paragraph, "", "");
                } else {
                    for (alt, src) in images {
                        let label = if alt.is_empty() { &src } else { &alt };
                        self.push(format!("[Image: {label}]"), LineType::Image);
                    }
                }
                self.push_blank();
            }

            NodeValue::CodeBlock(code_block) => {
                let language = code_block
                    .info
                    .split_whitespace()
                    .next()
                    .filter(|s| !s.is_empty())
                    .map(ToString::to_string);
                let literal = code_block.literal.clone();
                self.code_block(language.as_deref(), &literal);
                self.push_blank();
            }

            NodeValue::List(list) => {
                let delimiter = match list.delimiter {
                    ListDelimType::Paren => ')',
                    ListDelimType::Period => '.',
                };
                let count = node.children().count();
                let number_width = (list.start + count.saturating_sub(1)).to_string().len();
                for (index, child) in node.children().enumerate() {
                    let marker = match list.list_type {
                        ListType::Bullet => "• ".to_string(),
                        ListType::Ordered => format!(
                            "{:>width$}{delimiter} ",
                            list.start + index,
                            width = number_width
                        ),
                    };
                    self.block(child, depth + 1, Some(marker));
                }
                if depth == 0 {
                    self.push_blank();
                }
            }

            NodeValue::Item(_) => {
                let marker = list_marker.unwrap_or_else(|| "• ".to_string());
                self.list_item(node, depth, &marker);
            }

            NodeValue::TaskItem(symbol) => {
                let marker = if symbol.is_some() { "✓ " } else { "□ " };
                self.list_item(node, depth, marker);
            }

            NodeValue::BlockQuote => {
                self.blockquote(node, 1);
                self.push_blank();
            }

            NodeValue::ThematicBreak => {
                self.push("─".repeat(self.wrap_width), LineType::HorizontalRule);
                self.push_blank();
            }

            NodeValue::Table(_) => {
                for line in render_table(node, self.wrap_width) {
                    self.push(line, LineType::Table);
                }
                self.push_blank();
            }

            NodeValue::HtmlBlock(html) => {
                for raw in html.literal.lines() {
                    self.push(raw.to_string(), LineType::Html);
                }
                self.push_blank();
            }

            _ => {
                for child in node.children() {
                    self.block(child, depth, list_marker.clone());
                }
            }
        }
    }

    fn list_item<'a>(&mut self, node: &'a AstNode<'a>, depth: usize, marker: &str) {
        let indent = "  ".repeat(depth.saturating_sub(1));
        let first = format!("{indent}{marker}");
        let next = format!("{indent}{}", " ".repeat(marker.chars().count()));
        let mut rendered_any = false;

        for child in node.children() {
            let is_paragraph = matches!(child.data.borrow().value, NodeValue::Paragraph);
            let is_list = matches!(child.data.borrow().value, NodeValue::List(_));
            if is_paragraph {
                let spans = collect_inline_spans(child);
                let prefix = if rendered_any { &next } else { &first };
                self.push_wrapped(&spans, LineType::ListItem(depth), prefix, &next);
                rendered_any = true;
            } else if is_list {
                self.block(child, depth, None);
            } else {
                if !rendered_any {
                    self.push(first.clone(), LineType::ListItem(depth));
                    rendered_any = true;
                }
                self.block(child, depth, None);
            }
        }

        if !rendered_any {
            self.push(first, LineType::ListItem(depth));
        }
    }

    fn blockquote<'a>(&mut self, node: &'a AstNode<'a>, quote_depth: usize) {
        let prefix = "│ ".repeat(quote_depth);
        for child in node.children() {
            let is_quote = matches!(child.data.borrow().value, NodeValue::BlockQuote);
            let is_paragraph = matches!(child.data.borrow().value, NodeValue::Paragraph);
            if is_quote {
                self.blockquote(child, quote_depth + 1);
            } else if is_paragraph {
                let spans = collect_inline_spans(child);
                self.push_wrapped(&spans, LineType::BlockQuote, &prefix, &prefix);
            } else {
                let text = extract_text(child);
                for raw in text.lines() {
                    let spans = [InlineSpan::new(raw.to_string(), InlineStyle::default())];
                    self.push_wrapped(&spans, LineType::BlockQuote, &prefix, &prefix);
                }
            }
        }
    }

    fn code_block(&mut self, language: Option<&str>, literal: &str) {
        let content_width = literal
            .lines()
            .map(UnicodeWidthStr::width)
            .max()
            .unwrap_or(0)
            .min(self.wrap_width.saturating_sub(4 + CODE_RIGHT_PADDING).max(1));
        let inner_width = content_width + 2 + CODE_RIGHT_PADDING;
        let label: String = format!(" {} ", language.unwrap_or("code"))
            .chars()
            .take(inner_width)
            .collect();
        let top = format!(
            "┌{label}{}┐",
            "─".repeat(inner_width.saturating_sub(label.chars().count()))
        );
        self.push(top, LineType::CodeBlock);

        for spans in crate::highlight::highlight_code(language, literal) {
            let body = truncate_spans(&spans, content_width);
            let used: usize = body.iter().map(|s| s.text().width()).sum();
            let mut line_spans = vec![InlineSpan::new("│ ".to_string(), InlineStyle::default())];
            line_spans.extend(body);
            line_spans.push(InlineSpan::new(
                format!(
                    "{}│",
                    " ".repeat(content_width.saturating_sub(used) + CODE_RIGHT_PADDING)
                ),
                InlineStyle::default(),
            ));
            let content = spans_to_string(&line_spans);
            self.out
                .lines
                .push(RenderedLine::with_spans(content, LineType::CodeBlock, line_spans));
        }

        self.push(format!("└{}┘", "─".repeat(inner_width)), LineType::CodeBlock);
    }
}

fn ensure_trailing_empty_lines(lines: &mut Vec<RenderedLine>, count: usize) {
    if lines.is_empty() {
        return;
    }
    let existing = lines
        .iter()
        .rev()
        .take_while(|line| matches!(line.line_type(), LineType::Empty))
        .count();
    for _ in existing..count {
        lines.push(RenderedLine::new(String::new(), LineType::Empty));
    }
}

fn trim_trailing_empty(lines: &mut Vec<RenderedLine>) {
    while lines
        .last()
        .is_some_and(|line| matches!(line.line_type(), LineType::Empty))
    {
        lines.pop();
    }
}

/// Images of a paragraph that holds nothing but images and whitespace.
fn paragraph_only_images<'a>(node: &'a AstNode<'a>) -> Vec<(String, String)> {
    let mut images = Vec::new();
    for child in node.children() {
        match &child.data.borrow().value {
            NodeValue::Image(image) => images.push((extract_text(child), image.url.clone())),
            NodeValue::SoftBreak | NodeValue::LineBreak => {}
            NodeValue::Text(t) if t.trim().is_empty() => {}
            _ => return Vec::new(),
        }
    }
    images
}

fn extract_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    extract_text_recursive(node, &mut text);
    text
}

fn extract_text_recursive<'a>(node: &'a AstNode<'a>, text: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(t) => text.push_str(t),
        NodeValue::Code(c) => text.push_str(&c.literal),
        NodeValue::HtmlInline(html) => text.push_str(html),
        NodeValue::SoftBreak | NodeValue::LineBreak => text.push('\n'),
        NodeValue::CodeBlock(block) => text.push_str(&block.literal),
        _ => {
            for child in node.children() {
                extract_text_recursive(child, text);
            }
        }
    }
}

fn collect_inline_spans<'a>(node: &'a AstNode<'a>) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    collect_inline_spans_recursive(node, InlineStyle::default(), &mut spans);
    spans
}

fn collect_inline_spans_recursive<'a>(
    node: &'a AstNode<'a>,
    style: InlineStyle,
    spans: &mut Vec<InlineSpan>,
) {
    let mut next = style;
    match &node.data.borrow().value {
        NodeValue::List(_) | NodeValue::Item(_) | NodeValue::TaskItem(_) => return,
        NodeValue::Text(t) => {
            spans.push(InlineSpan::new(t.clone(), style));
            return;
        }
        NodeValue::Code(code) => {
            let code_style = InlineStyle {
                code: true,
                ..InlineStyle::default()
            };
            spans.push(InlineSpan::new(code.literal.clone(), code_style));
            return;
        }
        NodeValue::HtmlInline(html) => {
            spans.push(InlineSpan::new(html.clone(), style));
            return;
        }
        NodeValue::Image(_) => {
            let alt = extract_text(node);
            spans.push(InlineSpan::new(format!("[Image: {alt}]"), style));
            return;
        }
        // Line breaks are hard: every newline in a paragraph starts a new row.
        NodeValue::SoftBreak | NodeValue::LineBreak => {
            spans.push(InlineSpan::new("\n".to_string(), style));
            return;
        }
        NodeValue::Emph => next.emphasis = true,
        NodeValue::Strong => next.strong = true,
        NodeValue::Strikethrough => next.strikethrough = true,
        NodeValue::Link(_) => next.link = true,
        _ => {}
    }
    for child in node.children() {
        collect_inline_spans_recursive(child, next, spans);
    }
}

fn wrap_spans(
    spans: &[InlineSpan],
    width: usize,
    prefix_first: &str,
    prefix_next: &str,
) -> Vec<Vec<InlineSpan>> {
    let tokens: Vec<InlineSpan> = spans.iter().flat_map(split_inline_tokens).collect();

    let mut lines: Vec<Vec<InlineSpan>> = Vec::new();
    let mut current: Vec<InlineSpan> = Vec::new();
    let mut current_len = 0usize;
    let mut has_word = false;

    let start_line = |prefix: &str, current: &mut Vec<InlineSpan>, len: &mut usize| {
        current.clear();
        *len = prefix.width();
        if !prefix.is_empty() {
            current.push(InlineSpan::new(prefix.to_string(), InlineStyle::default()));
        }
    };

    start_line(prefix_first, &mut current, &mut current_len);

    for token in tokens {
        if token.text() == "\n" {
            if has_word {
                trim_trailing_whitespace(&mut current);
            }
            lines.push(std::mem::take(&mut current));
            start_line(prefix_next, &mut current, &mut current_len);
            has_word = false;
            continue;
        }

        let token_len = token.text().width();
        let token_is_ws = token.text().chars().all(char::is_whitespace);

        if current_len + token_len > width && has_word {
            trim_trailing_whitespace(&mut current);
            lines.push(std::mem::take(&mut current));
            start_line(prefix_next, &mut current, &mut current_len);
            has_word = false;
        }

        // Drop leading whitespace at line starts.
        if token_is_ws && !has_word {
            continue;
        }

        current_len += token_len;
        current.push(token);
        has_word = true;
    }

    if has_word {
        trim_trailing_whitespace(&mut current);
    }
    lines.push(current);
    lines
}

fn trim_trailing_whitespace(line: &mut Vec<InlineSpan>) {
    while line.len() > 1
        && line
            .last()
            .is_some_and(|span| span.text().chars().all(char::is_whitespace))
    {
        line.pop();
    }
}

fn split_inline_tokens(span: &InlineSpan) -> Vec<InlineSpan> {
    if span.text() == "\n" {
        return vec![span.clone()];
    }
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut ws_state: Option<bool> = None;

    for ch in span.text().chars() {
        let is_ws = ch.is_whitespace();
        if ws_state.is_some_and(|state| state != is_ws) {
            out.push(InlineSpan::new(std::mem::take(&mut buf), span.style()));
        }
        buf.push(ch);
        ws_state = Some(is_ws);
    }

    if !buf.is_empty() {
        out.push(InlineSpan::new(buf, span.style()));
    }
    out
}

fn spans_to_string(spans: &[InlineSpan]) -> String {
    spans.iter().map(InlineSpan::text).collect()
}

fn truncate_spans(spans: &[InlineSpan], max_width: usize) -> Vec<InlineSpan> {
    let mut out = Vec::new();
    let mut remaining = max_width;
    for span in spans {
        if remaining == 0 {
            break;
        }
        let mut taken = String::new();
        for ch in span.text().chars() {
            let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
            if w > remaining {
                remaining = 0;
                break;
            }
            remaining -= w;
            taken.push(ch);
        }
        if !taken.is_empty() {
            out.push(InlineSpan::new(taken, span.style()));
        }
    }
    out
}

fn render_table<'a>(table_node: &'a AstNode<'a>, wrap_width: usize) -> Vec<String> {
    let alignments = match &table_node.data.borrow().value {
        NodeValue::Table(table) => table.alignments.clone(),
        _ => Vec::new(),
    };
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut has_header = false;
    for row in table_node.children() {
        if let NodeValue::TableRow(header) = row.data.borrow().value {
            has_header |= header;
            rows.push(row.children().map(|cell| extract_text(cell).replace('\n', " ")).collect());
        }
    }
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    if columns == 0 {
        return Vec::new();
    }

    let mut widths = vec![1usize; columns];
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }
    // Borders take 3 columns per cell plus one.
    let budget = wrap_width.saturating_sub(3 * columns + 1).max(columns);
    while widths.iter().sum::<usize>() > budget {
        let Some(widest) = widths.iter_mut().max() else { break };
        if *widest <= 1 {
            break;
        }
        *widest -= 1;
    }

    let border = |left: char, middle: char, right: char| {
        let inner: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{left}{}{right}", inner.join(&middle.to_string()))
    };

    let mut out = vec![border('┌', '┬', '┐')];
    for (index, row) in rows.iter().enumerate() {
        let cells: Vec<String> = (0..columns)
            .map(|i| {
                let text = row.get(i).map_or("", String::as_str);
                let alignment = alignments.get(i).cloned().unwrap_or(TableAlignment::None);
                align_cell(text, widths[i], alignment)
            })
            .collect();
        out.push(format!("│ {} │", cells.join(" │ ")));
        if index == 0 && has_header {
            out.push(border('├', '┼', '┤'));
        }
    }
    out.push(border('└', '┴', '┘'));
    out
}

fn align_cell(text: &str, width: usize, alignment: TableAlignment) -> String {
    let spans = [InlineSpan::new(text.to_string(), InlineStyle::default())];
    let text = spans_to_string(&truncate_spans(&spans, width));
    let pad = width.saturating_sub(text.width());
    match alignment {
        TableAlignment::Right => format!("{}{text}", " ".repeat(pad)),
        TableAlignment::Center => {
            let left = pad / 2;
            format!("{}{text}{}", " ".repeat(left), " ".repeat(pad - left))
        }
        TableAlignment::Left | TableAlignment::None => format!("{text}{}", " ".repeat(pad)),
    }
}
