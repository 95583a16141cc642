use crate::render::font_metrics::FontWeight;
use crate::render::layout::{
    Column, Frame, LayoutBuilder, Node, PageLayout, TextRole, TextStyle, PAGE_WIDTH_PT,
};
use crate::render::palette::{Palette, BORDER, FOREGROUND, MUTED_FOREGROUND, PRIMARY_FOREGROUND};
use crate::render::variants::ProjectLayout;
use crate::render::view::{EntryRow, ResumeView};
use crate::templates::TemplateId;

const PADDING: f32 = 24.0;
const AVATAR_DIAMETER: f32 = 80.0;
const AVATAR_GAP: f32 = 16.0;
const SECTION_SPACING: f32 = 24.0;

/// Coloured header band above a single stacked body. Classic and Modern differ
/// only in the palette.
#[derive(Debug, Clone, Copy)]
pub struct Banded {
    template: TemplateId,
}

impl Banded {
    pub fn new(template: TemplateId) -> Self {
        Self { template }
    }
}

impl ProjectLayout for Banded {
    fn project(&self, view: &ResumeView) -> PageLayout {
        let palette = Palette::for_template(self.template);
        let mut out = LayoutBuilder::new();

        let header_height = header(&mut out, view, &palette);

        let mut body = Column::new(PADDING, PAGE_WIDTH_PT - PADDING * 2.0, header_height + PADDING);
        section_rows(&mut out, &mut body, "Work Experience", &view.experience, &palette);
        body.gap(SECTION_SPACING);
        section_rows(&mut out, &mut body, "Education", &view.education, &palette);
        body.gap(SECTION_SPACING);

        body.heading(&mut out, "Key Skills", heading_style(&palette), Some((4.0, 1.0, BORDER)));
        body.gap(12.0);
        body.chips(
            &mut out,
            &view.skills,
            TextStyle::new(14.0, FontWeight::Regular, PRIMARY_FOREGROUND),
            palette.accent_bg,
            (12.0, 4.0),
            8.0,
        );
        out.reserve(body.y + PADDING);

        out.finish(self.template, palette, view.clone())
    }
}

/// Lays out the band and returns its height.
fn header(out: &mut LayoutBuilder, view: &ResumeView, palette: &Palette) -> f32 {
    let text_x = PADDING + AVATAR_DIAMETER + AVATAR_GAP;
    let text_width = PAGE_WIDTH_PT - text_x - PADDING;

    // Text block is built at y = 0 and then centred against the avatar.
    let mut text = LayoutBuilder::new();
    let mut col = Column::new(text_x, text_width, 0.0);
    col.text(
        &mut text,
        &view.full_name,
        TextStyle::new(24.0, FontWeight::Bold, palette.header_text),
        TextRole::Name,
    );
    let contacts = view.contacts();
    if !contacts.is_empty() {
        col.gap(8.0);
        col.inline_row(
            &mut text,
            &contacts,
            TextStyle::new(14.0, FontWeight::Regular, palette.header_text),
            TextRole::Contact,
            16.0,
        );
    }
    let text_height = col.y;

    let inner_height = text_height.max(AVATAR_DIAMETER);
    let band_height = inner_height + PADDING * 2.0;

    out.push(Node::Rect {
        frame: Frame::new(0.0, 0.0, PAGE_WIDTH_PT, band_height),
        fill: palette.header_bg,
    });
    out.push(Node::Circle {
        cx: PADDING + AVATAR_DIAMETER / 2.0,
        cy: PADDING + inner_height / 2.0,
        radius: AVATAR_DIAMETER / 2.0,
        fill: PRIMARY_FOREGROUND.over(palette.header_bg, 0.2),
    });
    out.append_shifted(text, PADDING + (inner_height - text_height) / 2.0);

    band_height
}

fn heading_style(palette: &Palette) -> TextStyle {
    TextStyle::new(18.0, FontWeight::Semibold, palette.accent)
}

fn section_rows(
    out: &mut LayoutBuilder,
    col: &mut Column,
    title: &str,
    rows: &[EntryRow],
    palette: &Palette,
) {
    col.heading(out, title, heading_style(palette), Some((4.0, 1.0, BORDER)));
    col.gap(12.0);
    for row in rows {
        col.title_with_period(
            out,
            &row.title,
            TextStyle::new(16.0, FontWeight::Semibold, FOREGROUND),
            &row.period,
            TextStyle::new(14.0, FontWeight::Regular, MUTED_FOREGROUND),
        );
        col.text(
            out,
            &row.subtitle,
            TextStyle::new(14.0, FontWeight::Regular, MUTED_FOREGROUND),
            TextRole::EntrySubtitle,
        );
        col.gap(16.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResumeDocument;
    use crate::render::palette::{TEMPLATE_BLUE, TEMPLATE_MAROON};

    fn view() -> ResumeView {
        let mut doc = ResumeDocument::default();
        doc.personal_info.first_name = "Jane".into();
        doc.personal_info.email = "jane@example.com".into();
        doc.skills = vec!["Go".into(), "Testing".into()];
        ResumeView::from_document(&doc)
    }

    #[test]
    fn test_classic_and_modern_share_geometry() {
        let classic = Banded::new(TemplateId::Classic).project(&view());
        let modern = Banded::new(TemplateId::Modern).project(&view());
        assert_eq!(classic.nodes.len(), modern.nodes.len());
        assert_eq!(classic.header_fill(), Some(TEMPLATE_BLUE));
        assert_eq!(modern.header_fill(), Some(TEMPLATE_MAROON));
        assert_eq!(classic.height, modern.height);
    }

    #[test]
    fn test_body_starts_below_band() {
        let page = Banded::new(TemplateId::Classic).project(&view());
        let band_bottom = match &page.nodes[0] {
            Node::Rect { frame, .. } => frame.bottom(),
            other => panic!("expected band first, got {other:?}"),
        };
        for node in &page.nodes {
            if let Node::Chip { frame, .. } = node {
                assert!(frame.y > band_bottom);
            }
        }
        assert_eq!(page.texts(TextRole::SectionTitle), vec!["Work Experience", "Education", "Key Skills"]);
    }
}
