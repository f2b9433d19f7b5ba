#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::MessageType;

#[derive(PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Right,
}

pub struct Bubble<'a> {
    alignment: BubbleAlignment,
    message: &'a Message,
    window_max_width: usize,
}

pub struct BubbleConfig {
    /// Border characters and inner padding around a line of text.
    pub border_elements_length: usize,
    /// Column reserved for the scrollbar.
    pub scrollbar_length: usize,
    pub outer_padding_percentage: f32,
}

fn char_len(text: &str) -> usize {
    return text.chars().count();
}

fn repeat(text: &str, count: usize) -> String {
    return [text].repeat(count).join("");
}

/// Splits a line into chunks no wider than `max`, breaking on spaces and
/// hard-splitting words that are wider than a whole line.
fn wrap_line(line: &str, max: usize) -> Vec<String> {
    if max == 0 || char_len(line) <= max {
        return vec![line.to_string()];
    }

    let mut lines: Vec<String> = vec![];
    let mut current = String::new();

    for word in line.split(' ') {
        let mut word = word.to_string();
        while char_len(&word) > max {
            if !current.is_empty() {
                lines.push(current);
                current = String::new();
            }
            let head = word.chars().take(max).collect::<String>();
            word = word.chars().skip(max).collect::<String>();
            lines.push(head);
        }

        let sep = if current.is_empty() { 0 } else { 1 };
        if char_len(&current) + sep + char_len(&word) > max {
            lines.push(current);
            current = word;
        } else {
            if sep == 1 {
                current.push(' ');
            }
            current.push_str(&word);
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    return lines;
}

/// Label for an image attached to a message. The size is worked out from the
/// base64 length, so the payload is never decoded.
pub fn attachment_label(image: &str) -> String {
    if image.is_empty() || image.len() % 4 != 0 {
        return "[image attached]".to_string();
    }

    let padding = image.bytes().rev().take_while(|e| return *e == b'=').count();
    if padding > 2 {
        return "[image attached]".to_string();
    }

    let bytes = image.len() / 4 * 3 - padding;
    return format!("[image attached, {:.1} KB]", bytes as f64 / 1024.0);
}

impl<'a> Bubble<'a> {
    pub fn new(
        message: &'a Message,
        alignment: BubbleAlignment,
        window_max_width: usize,
    ) -> Bubble<'a> {
        return Bubble {
            alignment,
            message,
            window_max_width,
        };
    }

    pub fn style_config() -> BubbleConfig {
        return BubbleConfig {
            // "│ " + text + " │"
            border_elements_length: 4,
            scrollbar_length: 1,
            outer_padding_percentage: 0.04,
        };
    }

    fn header(&self) -> String {
        return format!(
            "{} · {}",
            self.message.author.to_string(),
            self.message.timestamp
        );
    }

    pub fn as_lines(&self) -> Vec<Line<'static>> {
        let max_line_length = self.get_max_line_length();
        let mut lines: Vec<Line<'static>> = vec![];

        for line in self.message.text.lines() {
            for wrapped in wrap_line(line, max_line_length) {
                let span = Span::styled(wrapped, self.text_style());
                lines.push(self.spans_to_line(vec![span], max_line_length));
            }
        }

        if let Some(image) = &self.message.attached_image {
            let span = Span::styled(
                attachment_label(image),
                Style {
                    fg: Some(Color::Yellow),
                    ..Style::default()
                },
            );
            lines.push(self.spans_to_line(vec![span], max_line_length));
        }

        return self.wrap_lines_in_bubble(lines, max_line_length);
    }

    fn text_style(&self) -> Style {
        if self.message.message_type() == MessageType::Thinking {
            return Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC);
        }

        return Style::default();
    }

    fn outer_padding(&self, bubble_length: usize) -> String {
        let used = bubble_length + Bubble::style_config().scrollbar_length;
        return repeat(" ", self.window_max_width.saturating_sub(used));
    }

    fn spans_to_line(
        &self,
        mut spans: Vec<Span<'static>>,
        max_line_length: usize,
    ) -> Line<'static> {
        let line_str_len: usize = spans.iter().map(|e| return char_len(&e.content)).sum();
        let fill = repeat(" ", max_line_length.saturating_sub(line_str_len));
        let outer_bubble_padding =
            self.outer_padding(max_line_length + Bubble::style_config().border_elements_length);

        let mut wrapped_spans = vec![self.highlight_span("│ ".to_string())];
        wrapped_spans.append(&mut spans);
        wrapped_spans.push(self.highlight_span(format!("{fill} │")));

        if self.alignment == BubbleAlignment::Left {
            wrapped_spans.push(Span::from(outer_bubble_padding));
            return Line::from(wrapped_spans);
        }

        let mut line_spans = vec![Span::from(outer_bubble_padding)];
        line_spans.extend(wrapped_spans);

        return Line::from(line_spans);
    }

    fn get_max_line_length(&self) -> usize {
        let style_config = Bubble::style_config();
        // Add a minimum 4% of padding on the side.
        let min_bubble_padding_length = ((self.window_max_width as f32
            * style_config.outer_padding_percentage)
            .ceil()) as usize;

        let line_border_width = style_config.border_elements_length
            + style_config.scrollbar_length
            + min_bubble_padding_length;

        let mut max_line_length = self
            .message
            .text
            .lines()
            .map(|line| {
                return char_len(line);
            })
            .max()
            .unwrap_or(0);

        if let Some(image) = &self.message.attached_image {
            max_line_length = max_line_length.max(char_len(&attachment_label(image)));
        }

        let available = self.window_max_width.saturating_sub(line_border_width);
        if max_line_length > available {
            max_line_length = available;
        }

        // The header is drawn into the top border, which is 2 wider than a line.
        let header_length = char_len(&self.header());
        if max_line_length + 2 < header_length {
            max_line_length = header_length.saturating_sub(2);
        }

        return max_line_length;
    }

    fn wrap_lines_in_bubble(
        &self,
        lines: Vec<Line<'static>>,
        max_line_length: usize,
    ) -> Vec<Line<'static>> {
        let header = self.header();
        // Add 2 for the spaces next to the vertical bars.
        let inner_length = max_line_length + 2;
        let top_bar = format!(
            "╭{header}{}╮",
            repeat("─", inner_length.saturating_sub(char_len(&header)))
        );
        let bottom_bar = format!("╰{}╯", repeat("─", inner_length));
        let bar_bubble_padding =
            self.outer_padding(max_line_length + Bubble::style_config().border_elements_length);

        let mut res = vec![];
        if self.alignment == BubbleAlignment::Left {
            res.push(self.highlight_line(format!("{top_bar}{bar_bubble_padding}")));
            res.extend(lines);
            res.push(self.highlight_line(format!("{bottom_bar}{bar_bubble_padding}")));
        } else {
            res.push(self.highlight_line(format!("{bar_bubble_padding}{top_bar}")));
            res.extend(lines);
            res.push(self.highlight_line(format!("{bar_bubble_padding}{bottom_bar}")));
        }

        return res;
    }

    fn highlight_span(&self, text: String) -> Span<'static> {
        match self.message.message_type() {
            MessageType::Error => {
                return Span::styled(
                    text,
                    Style {
                        fg: Some(Color::Red),
                        ..Style::default()
                    },
                );
            }
            MessageType::Thinking => {
                return Span::styled(
                    text,
                    Style {
                        fg: Some(Color::DarkGray),
                        ..Style::default()
                    },
                );
            }
            MessageType::Normal => {
                if self.message.author == Author::Assistant {
                    return Span::styled(
                        text,
                        Style {
                            fg: Some(Color::Cyan),
                            ..Style::default()
                        },
                    );
                }

                return Span::from(text);
            }
        }
    }

    fn highlight_line(&self, text: String) -> Line<'static> {
        return Line::from(self.highlight_span(text));
    }
}
