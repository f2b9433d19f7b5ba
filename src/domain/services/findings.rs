#[cfg(test)]
#[path = "findings_test.rs"]
mod tests;

use ratatui::prelude::Alignment;
use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Frame;

use super::attachment_label;
use crate::domain::models::Detection;

pub const NO_FINDINGS_YET: &str = "No findings yet";
pub const NO_OBJECTS_DETECTED: &str = "No objects detected";
pub const ANALYZING_IMAGE: &str = "Analyzing image...";

/// Side panels showing the uploaded image and what was detected in it.
pub struct FindingsPanel<'a> {
    image: &'a Option<String>,
    detections: &'a Option<Vec<Detection>>,
    analyzing: bool,
}

impl<'a> FindingsPanel<'a> {
    pub fn new(image: &'a Option<String>, detections: &'a Option<Vec<Detection>>) -> FindingsPanel<'a> {
        return FindingsPanel {
            image,
            detections,
            analyzing: false,
        };
    }

    /// Marks an upload as in flight, which takes over the image panel.
    pub fn analyzing(mut self, analyzing: bool) -> FindingsPanel<'a> {
        self.analyzing = analyzing;
        return self;
    }

    pub fn image_title(&self) -> &'static str {
        if self.analyzing {
            return "Analyzing";
        }

        if self.image.is_some() {
            return "Uploaded Image";
        }

        return "Upload Medical Image";
    }

    pub fn image_lines(&self) -> Vec<String> {
        if self.analyzing {
            return vec![ANALYZING_IMAGE.to_string()];
        }

        match self.image {
            Some(image) => {
                return vec![
                    attachment_label(image),
                    "".to_string(),
                    "/clear to remove it.".to_string(),
                ];
            }
            None => {
                return vec![
                    "/upload PATH".to_string(),
                    "".to_string(),
                    "PNG, JPG, JPEG, GIF or BMP, up to 16MB.".to_string(),
                ];
            }
        }
    }

    pub fn count(&self) -> usize {
        return self
            .detections
            .as_ref()
            .map(|detections| return detections.len())
            .unwrap_or(0);
    }

    pub fn findings_title(&self) -> String {
        return format!("Findings ({})", self.count());
    }

    /// One row per detection, or the empty state.
    pub fn rows(&self, width: usize) -> Vec<(String, String)> {
        match self.detections {
            None => return vec![(NO_FINDINGS_YET.to_string(), "".to_string())],
            Some(detections) if detections.is_empty() => {
                return vec![(NO_OBJECTS_DETECTED.to_string(), "".to_string())];
            }
            Some(detections) => {
                return detections
                    .iter()
                    .map(|detection| {
                        let confidence = detection.confidence_percent();
                        let room = width.saturating_sub(confidence.len() + 1);
                        let mut class = detection.class.to_string();
                        if class.chars().count() > room {
                            class = class.chars().take(room).collect::<String>();
                        }

                        return (class, confidence);
                    })
                    .collect();
            }
        }
    }

    fn block(title: String, border_type: BorderType) -> Block<'a> {
        return Block::default()
            .borders(Borders::ALL)
            .border_type(border_type)
            .title(title)
            .padding(Padding::new(1, 1, 0, 0));
    }

    pub fn render_image<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect) {
        let lines = self
            .image_lines()
            .into_iter()
            .map(|line| return Line::from(line))
            .collect::<Vec<Line>>();

        let mut paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        if self.analyzing {
            paragraph = paragraph
                .block(FindingsPanel::block(
                    self.image_title().to_string(),
                    BorderType::Double,
                ))
                .alignment(Alignment::Center);
        } else {
            paragraph = paragraph.block(FindingsPanel::block(
                self.image_title().to_string(),
                BorderType::Rounded,
            ));
        }

        frame.render_widget(paragraph, rect);
    }

    pub fn render_findings<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect) {
        // Borders and padding.
        let width = (rect.width as usize).saturating_sub(4);
        let empty = self.count() == 0;

        let lines = self
            .rows(width)
            .into_iter()
            .map(|(class, confidence)| {
                if empty {
                    return Line::from(Span::styled(
                        class,
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::ITALIC),
                    ));
                }

                let fill = " ".repeat(
                    width.saturating_sub(class.chars().count() + confidence.chars().count()),
                );
                return Line::from(vec![
                    Span::from(class),
                    Span::from(fill),
                    Span::styled(confidence, Style::default().fg(Color::Green)),
                ]);
            })
            .collect::<Vec<Line>>();

        frame.render_widget(
            Paragraph::new(lines).block(FindingsPanel::block(
                self.findings_title(),
                BorderType::Rounded,
            )),
            rect,
        );
    }
}
