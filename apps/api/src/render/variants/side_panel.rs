use crate::render::font_metrics::FontWeight;
use crate::render::layout::{
    Column, Frame, LayoutBuilder, Node, PageLayout, TextRole, TextStyle, PAGE_WIDTH_PT,
};
use crate::render::palette::{Palette, BORDER, FOREGROUND, MUTED_FOREGROUND, PRIMARY_FOREGROUND};
use crate::render::variants::ProjectLayout;
use crate::render::view::{EntryRow, ResumeView};
use crate::templates::TemplateId;

const PANEL_WIDTH: f32 = PAGE_WIDTH_PT / 3.0;
const PANEL_PADDING: f32 = 24.0;
const MAIN_PADDING: f32 = 32.0;
const AVATAR_DIAMETER: f32 = 96.0;

/// Creative: coloured side panel with contact and skills, main column with
/// name and history. Skills are a plain list here, never chips.
#[derive(Debug, Clone, Copy, Default)]
pub struct SidePanel;

impl ProjectLayout for SidePanel {
    fn project(&self, view: &ResumeView) -> PageLayout {
        let palette = Palette::for_template(TemplateId::Creative);
        let mut out = LayoutBuilder::new();

        // Zero height: stretched to the final page height by `finish`.
        out.push(Node::Rect {
            frame: Frame::new(0.0, 0.0, PANEL_WIDTH, 0.0),
            fill: palette.header_bg,
        });
        out.push(Node::Circle {
            cx: PANEL_WIDTH / 2.0,
            cy: PANEL_PADDING + AVATAR_DIAMETER / 2.0,
            radius: AVATAR_DIAMETER / 2.0,
            fill: PRIMARY_FOREGROUND.over(palette.header_bg, 0.2),
        });

        let panel_bottom = side_panel(&mut out, view, &palette);
        let main_bottom = main_column(&mut out, view, &palette);
        out.reserve(panel_bottom.max(main_bottom));

        out.finish(TemplateId::Creative, palette, view.clone())
    }
}

fn side_panel(out: &mut LayoutBuilder, view: &ResumeView, palette: &Palette) -> f32 {
    let label = TextStyle::new(12.0, FontWeight::Semibold, palette.header_text).tracked(0.05);
    let item = TextStyle::new(12.0, FontWeight::Regular, palette.header_text);

    let mut col = Column::new(
        PANEL_PADDING,
        PANEL_WIDTH - PANEL_PADDING * 2.0,
        PANEL_PADDING + AVATAR_DIAMETER + 16.0,
    );

    col.heading(out, "CONTACT", label, None);
    col.gap(8.0);
    for contact in view.contacts() {
        col.text(out, contact, item, TextRole::Contact);
        col.gap(4.0);
    }

    col.gap(16.0);
    col.heading(out, "SKILLS", label, None);
    col.gap(8.0);
    for skill in &view.skills {
        col.text(out, skill, item, TextRole::Skill);
        col.gap(4.0);
    }

    col.y + PANEL_PADDING
}

fn main_column(out: &mut LayoutBuilder, view: &ResumeView, palette: &Palette) -> f32 {
    let x = PANEL_WIDTH + MAIN_PADDING;
    let mut col = Column::new(x, PAGE_WIDTH_PT - x - MAIN_PADDING, MAIN_PADDING);

    col.text(
        out,
        &view.full_name,
        TextStyle::new(30.0, FontWeight::Bold, palette.accent),
        TextRole::Name,
    );

    col.gap(32.0);
    section(out, &mut col, "Experience", &view.experience, palette);
    col.gap(24.0);
    section(out, &mut col, "Education", &view.education, palette);

    col.y + MAIN_PADDING
}

fn section(out: &mut LayoutBuilder, col: &mut Column, title: &str, rows: &[EntryRow], palette: &Palette) {
    col.heading(
        out,
        title,
        TextStyle::new(18.0, FontWeight::Semibold, palette.accent),
        Some((8.0, 1.0, BORDER)),
    );
    col.gap(16.0);
    for row in rows {
        col.text(
            out,
            &row.title,
            TextStyle::new(16.0, FontWeight::Semibold, FOREGROUND),
            TextRole::EntryTitle,
        );
        col.text(
            out,
            &row.subtitle,
            TextStyle::new(14.0, FontWeight::Regular, MUTED_FOREGROUND),
            TextRole::EntrySubtitle,
        );
        col.text(
            out,
            &row.period,
            TextStyle::new(12.0, FontWeight::Regular, MUTED_FOREGROUND),
            TextRole::EntryPeriod,
        );
        col.gap(16.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResumeDocument;

    fn sample() -> ResumeView {
        let mut doc = ResumeDocument::default();
        doc.personal_info.email = "a.really.long.email.address@example-company.com".into();
        doc.personal_info.city = "Austin".into();
        doc.skills = vec!["Go".into(), "".into(), "Testing".into()];
        ResumeView::from_document(&doc)
    }

    #[test]
    fn test_skills_live_in_panel_as_list() {
        let page = SidePanel.project(&sample());
        assert!(page.chip_labels().is_empty());
        assert_eq!(page.texts(TextRole::Skill), vec!["Go", "Testing"]);
        for node in &page.nodes {
            if let Node::Text { frame, role: TextRole::Skill, .. } = node {
                assert!(frame.right() <= PANEL_WIDTH);
            }
        }
    }

    #[test]
    fn test_long_email_wraps_inside_panel() {
        let page = SidePanel.project(&sample());
        let email_lines: Vec<&Node> = page
            .nodes
            .iter()
            .filter(|n| matches!(n, Node::Text { role: TextRole::Contact, text, .. } if text != "Austin"))
            .collect();
        assert!(email_lines.len() > 1);
        for node in email_lines {
            if let Node::Text { frame, .. } = node {
                assert!(frame.right() <= PANEL_WIDTH - PANEL_PADDING + 1e-3);
            }
        }
    }

    #[test]
    fn test_panel_spans_full_page_height() {
        let page = SidePanel.project(&sample());
        match &page.nodes[0] {
            Node::Rect { frame, .. } => assert_eq!(frame.height, page.height),
            other => panic!("expected panel backdrop, got {other:?}"),
        }
        assert_eq!(page.texts(TextRole::SectionTitle), vec!["CONTACT", "SKILLS", "Experience", "Education"]);
    }
}
