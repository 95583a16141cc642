//! Positioned page description produced by every template variant.
//!
//! Coordinates are PDF points (1/72 in) with the origin at the top-left of the
//! page box. The box is always 595 wide and at least 842 tall; nothing here
//! depends on a viewport, which is what lets export snapshot it verbatim.

use serde::Serialize;

use crate::render::font_metrics::{sans, FontWeight};
use crate::render::palette::{Color, Palette};
use crate::render::view::ResumeView;
use crate::templates::TemplateId;

/// A4 width in points.
pub const PAGE_WIDTH_PT: f32 = 595.0;
/// A4 height in points. Layouts may grow past it, never shrink below it.
pub const PAGE_MIN_HEIGHT_PT: f32 = 842.0;

const LINE_HEIGHT_FACTOR: f32 = 1.4;

// ────────────────────────────────────────────────────────────────────────────
// Node types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[cfg(test)]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    pub size_pt: f32,
    pub weight: FontWeight,
    pub color: Color,
    /// Extra space after each character, in em.
    pub tracking_em: f32,
}

impl TextStyle {
    pub fn new(size_pt: f32, weight: FontWeight, color: Color) -> Self {
        Self {
            size_pt,
            weight,
            color,
            tracking_em: 0.0,
        }
    }

    pub fn tracked(mut self, tracking_em: f32) -> Self {
        self.tracking_em = tracking_em;
        self
    }

    pub fn line_height(&self) -> f32 {
        self.size_pt * LINE_HEIGHT_FACTOR
    }

    pub fn measure(&self, text: &str) -> f32 {
        sans().measure_pt(text, self.size_pt, self.weight, self.tracking_em)
    }

    pub fn wrap(&self, text: &str, max_width_pt: f32) -> Vec<String> {
        sans().wrap(text, self.size_pt, self.weight, self.tracking_em, max_width_pt)
    }
}

/// What a piece of text means, so consumers can find it without re-deriving
/// the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRole {
    Name,
    Contact,
    SectionTitle,
    EntryTitle,
    EntrySubtitle,
    EntryPeriod,
    Skill,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Rect {
        frame: Frame,
        fill: Color,
    },
    Circle {
        cx: f32,
        cy: f32,
        radius: f32,
        fill: Color,
    },
    /// Horizontal rule.
    Rule {
        x: f32,
        y: f32,
        width: f32,
        thickness: f32,
        color: Color,
    },
    /// A single line of text; `frame` is the line box.
    Text {
        frame: Frame,
        text: String,
        style: TextStyle,
        role: TextRole,
    },
    /// Pill-shaped skill badge.
    Chip {
        frame: Frame,
        label: String,
        fill: Color,
        style: TextStyle,
    },
}

impl Node {
    pub fn bottom(&self) -> f32 {
        match self {
            Node::Rect { frame, .. } | Node::Text { frame, .. } | Node::Chip { frame, .. } => {
                frame.bottom()
            }
            Node::Circle { cy, radius, .. } => cy + radius,
            Node::Rule { y, thickness, .. } => y + thickness,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page layout
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageLayout {
    pub template: TemplateId,
    pub width: f32,
    pub height: f32,
    pub palette: Palette,
    pub view: ResumeView,
    pub nodes: Vec<Node>,
}

impl PageLayout {
    pub fn texts(&self, role: TextRole) -> Vec<&str> {
        self.nodes
            .iter()
            .filter_map(|n| match n {
                Node::Text { text, role: r, .. } if *r == role => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn chip_labels(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter_map(|n| match n {
                Node::Chip { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The first filled rectangle at the top of the page, if any.
    pub fn header_fill(&self) -> Option<Color> {
        self.nodes.iter().find_map(|n| match n {
            Node::Rect { frame, fill } if frame.y == 0.0 => Some(*fill),
            _ => None,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Builder
// ────────────────────────────────────────────────────────────────────────────

/// Accumulates nodes for one page. Variants drive it through `Column` cursors.
#[derive(Debug, Default)]
pub struct LayoutBuilder {
    nodes: Vec<Node>,
    reserved_bottom: f32,
}

impl LayoutBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Keeps the page at least `y` tall (bottom padding).
    pub fn reserve(&mut self, y: f32) {
        self.reserved_bottom = self.reserved_bottom.max(y);
    }

    /// Moves every node of `other` down by `dy` and appends it.
    pub fn append_shifted(&mut self, other: LayoutBuilder, dy: f32) {
        for mut node in other.nodes {
            match &mut node {
                Node::Rect { frame, .. } | Node::Text { frame, .. } | Node::Chip { frame, .. } => {
                    frame.y += dy
                }
                Node::Circle { cy, .. } => *cy += dy,
                Node::Rule { y, .. } => *y += dy,
            }
            self.nodes.push(node);
        }
        self.reserve(other.reserved_bottom + dy);
    }

    /// Lowest point reached by any node so far.
    pub fn content_bottom(&self) -> f32 {
        self.nodes
            .iter()
            .map(Node::bottom)
            .fold(self.reserved_bottom, f32::max)
    }

    /// Stretches any full-height backdrop (`height == 0` placeholders) to the
    /// final page height, then seals the page.
    pub fn finish(mut self, template: TemplateId, palette: Palette, view: ResumeView) -> PageLayout {
        let height = self.content_bottom().max(PAGE_MIN_HEIGHT_PT).ceil();

        for node in &mut self.nodes {
            if let Node::Rect { frame, .. } = node {
                if frame.height == 0.0 {
                    frame.height = height - frame.y;
                }
            }
        }

        PageLayout {
            template,
            width: PAGE_WIDTH_PT,
            height,
            palette,
            view,
            nodes: self.nodes,
        }
    }
}

/// A vertical flow cursor over one column of the page.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub x: f32,
    pub width: f32,
    pub y: f32,
}

impl Column {
    pub fn new(x: f32, width: f32, y: f32) -> Self {
        Self { x, width, y }
    }

    pub fn gap(&mut self, pt: f32) {
        self.y += pt;
    }

    /// Wrapped text, one node per line.
    pub fn text(&mut self, out: &mut LayoutBuilder, text: &str, style: TextStyle, role: TextRole) {
        for line in style.wrap(text, self.width) {
            let width = style.measure(&line);
            out.push(Node::Text {
                frame: Frame::new(self.x, self.y, width, style.line_height()),
                text: line,
                style,
                role,
            });
            self.y += style.line_height();
        }
    }

    /// Section heading followed by a full-width rule `rule_gap` below it.
    pub fn heading(
        &mut self,
        out: &mut LayoutBuilder,
        title: &str,
        style: TextStyle,
        rule: Option<(f32, f32, Color)>,
    ) {
        self.text(out, title, style, TextRole::SectionTitle);
        if let Some((rule_gap, thickness, color)) = rule {
            self.y += rule_gap;
            out.push(Node::Rule {
                x: self.x,
                y: self.y,
                width: self.width,
                thickness,
                color,
            });
            self.y += thickness;
        }
    }

    /// Title on the left, period right-aligned on the same line. The title wraps
    /// in whatever width the period leaves free.
    pub fn title_with_period(
        &mut self,
        out: &mut LayoutBuilder,
        title: &str,
        title_style: TextStyle,
        period: &str,
        period_style: TextStyle,
    ) {
        const PERIOD_GUTTER: f32 = 8.0;
        let period_width = period_style.measure(period).min(self.width / 2.0);
        let top = self.y;

        let mut title_column = Column::new(self.x, self.width - period_width - PERIOD_GUTTER, top);
        title_column.text(out, title, title_style, TextRole::EntryTitle);

        // Vertically centre the period against the first title line.
        let offset = (title_style.line_height() - period_style.line_height()).max(0.0) / 2.0;
        out.push(Node::Text {
            frame: Frame::new(
                self.x + self.width - period_width,
                top + offset,
                period_width,
                period_style.line_height(),
            ),
            text: period.to_string(),
            style: period_style,
            role: TextRole::EntryPeriod,
        });

        self.y = title_column.y.max(top + period_style.line_height());
    }

    /// Flex-wrapped pills.
    pub fn chips(
        &mut self,
        out: &mut LayoutBuilder,
        labels: &[String],
        style: TextStyle,
        fill: Color,
        padding: (f32, f32),
        spacing: f32,
    ) {
        let (pad_x, pad_y) = padding;
        let chip_height = style.line_height() + pad_y * 2.0;
        let mut cursor_x = self.x;
        let mut rows = 0;

        for label in labels {
            let chip_width = (style.measure(label) + pad_x * 2.0).min(self.width);
            if rows == 0 {
                rows = 1;
            } else if cursor_x + chip_width > self.x + self.width {
                cursor_x = self.x;
                self.y += chip_height + spacing;
                rows += 1;
            }
            out.push(Node::Chip {
                frame: Frame::new(cursor_x, self.y, chip_width, chip_height),
                label: label.clone(),
                fill,
                style,
            });
            cursor_x += chip_width + spacing;
        }

        if rows > 0 {
            self.y += chip_height;
        }
    }

    /// Items laid out left to right separated by `spacing`, wrapping as needed.
    pub fn inline_row(
        &mut self,
        out: &mut LayoutBuilder,
        items: &[&str],
        style: TextStyle,
        role: TextRole,
        spacing: f32,
    ) {
        let mut cursor_x = self.x;
        let mut placed = false;

        for item in items {
            let width = style.measure(item).min(self.width);
            if placed && cursor_x + width > self.x + self.width {
                cursor_x = self.x;
                self.y += style.line_height();
            }
            out.push(Node::Text {
                frame: Frame::new(cursor_x, self.y, width, style.line_height()),
                text: item.to_string(),
                style,
                role,
            });
            cursor_x += width + spacing;
            placed = true;
        }

        if placed {
            self.y += style.line_height();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::palette::{FOREGROUND, TEMPLATE_BLUE};

    fn body() -> TextStyle {
        TextStyle::new(14.0, FontWeight::Regular, FOREGROUND)
    }

    #[test]
    fn test_text_advances_cursor_per_line() {
        let mut out = LayoutBuilder::new();
        let mut col = Column::new(10.0, 80.0, 0.0);
        col.text(&mut out, "one two three four five six", body(), TextRole::Skill);
        let lines = out.nodes.len() as f32;
        assert!(lines > 1.0);
        assert!((col.y - lines * body().line_height()).abs() < 1e-3);
    }

    #[test]
    fn test_chips_wrap_to_next_row() {
        let mut out = LayoutBuilder::new();
        let mut col = Column::new(0.0, 100.0, 0.0);
        let labels: Vec<String> = ["Kubernetes", "Terraform", "Go"].iter().map(|s| s.to_string()).collect();
        col.chips(&mut out, &labels, body(), TEMPLATE_BLUE, (12.0, 4.0), 8.0);
        let frames: Vec<Frame> = out
            .nodes
            .iter()
            .filter_map(|n| match n {
                Node::Chip { frame, .. } => Some(*frame),
                _ => None,
            })
            .collect();
        assert_eq!(frames.len(), 3);
        assert!(frames[1].y > frames[0].y);
        assert!(frames.iter().all(|f| f.right() <= 100.0 + 1e-3));
    }

    #[test]
    fn test_no_chips_leaves_cursor_alone() {
        let mut out = LayoutBuilder::new();
        let mut col = Column::new(0.0, 100.0, 42.0);
        col.chips(&mut out, &[], body(), TEMPLATE_BLUE, (12.0, 4.0), 8.0);
        assert_eq!(col.y, 42.0);
    }

    #[test]
    fn test_finish_enforces_minimum_height_and_stretches_backdrops() {
        let mut out = LayoutBuilder::new();
        out.push(Node::Rect {
            frame: Frame::new(0.0, 0.0, 200.0, 0.0),
            fill: TEMPLATE_BLUE,
        });
        let view = crate::render::view::ResumeView::from_document(&Default::default());
        let page = out.finish(TemplateId::Creative, Palette::for_template(TemplateId::Creative), view);
        assert_eq!(page.width, PAGE_WIDTH_PT);
        assert_eq!(page.height, PAGE_MIN_HEIGHT_PT);
        match &page.nodes[0] {
            Node::Rect { frame, .. } => assert_eq!(frame.height, PAGE_MIN_HEIGHT_PT),
            other => panic!("unexpected node {other:?}"),
        }
    }

    #[test]
    fn test_finish_grows_with_content() {
        let mut out = LayoutBuilder::new();
        out.push(Node::Rule {
            x: 0.0,
            y: 1000.0,
            width: 10.0,
            thickness: 1.0,
            color: FOREGROUND,
        });
        let view = crate::render::view::ResumeView::from_document(&Default::default());
        let page = out.finish(TemplateId::Classic, Palette::for_template(TemplateId::Classic), view);
        assert_eq!(page.height, 1001.0);
    }
}
