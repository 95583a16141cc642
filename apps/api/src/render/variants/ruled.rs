use crate::render::font_metrics::FontWeight;
use crate::render::layout::{Column, LayoutBuilder, Node, PageLayout, TextRole, TextStyle, PAGE_WIDTH_PT};
use crate::render::palette::{Palette, MUTED_FOREGROUND};
use crate::render::variants::ProjectLayout;
use crate::render::view::{EntryRow, ResumeView};
use crate::templates::TemplateId;

const PADDING: f32 = 32.0;
const SKILL_SEPARATOR: &str = " •";

/// Minimal: no band, name and contacts as plain text over a heavy rule,
/// skills as an inline bullet-separated run.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ruled;

impl ProjectLayout for Ruled {
    fn project(&self, view: &ResumeView) -> PageLayout {
        let palette = Palette::for_template(TemplateId::Minimal);
        let mut out = LayoutBuilder::new();
        let mut col = Column::new(PADDING, PAGE_WIDTH_PT - PADDING * 2.0, PADDING);

        col.text(
            &mut out,
            &view.full_name.to_uppercase(),
            TextStyle::new(30.0, FontWeight::Bold, palette.accent).tracked(0.05),
            TextRole::Name,
        );
        let contacts = view.contacts();
        if !contacts.is_empty() {
            col.gap(8.0);
            col.inline_row(
                &mut out,
                &contacts,
                TextStyle::new(14.0, FontWeight::Regular, MUTED_FOREGROUND),
                TextRole::Contact,
                16.0,
            );
        }
        col.gap(16.0);
        out.push(Node::Rule {
            x: col.x,
            y: col.y,
            width: col.width,
            thickness: 2.0,
            color: palette.accent,
        });
        col.gap(2.0 + 24.0);

        section(&mut out, &mut col, "EXPERIENCE", &view.experience, &palette);
        col.gap(24.0);
        section(&mut out, &mut col, "EDUCATION", &view.education, &palette);
        col.gap(24.0);

        col.heading(&mut out, "SKILLS", heading_style(&palette), None);
        col.gap(12.0);
        let items = joined_skills(&view.skills);
        let items: Vec<&str> = items.iter().map(String::as_str).collect();
        col.inline_row(
            &mut out,
            &items,
            TextStyle::new(14.0, FontWeight::Regular, palette.accent),
            TextRole::Skill,
            8.0,
        );
        out.reserve(col.y + PADDING);

        out.finish(TemplateId::Minimal, palette, view.clone())
    }
}

/// Every skill but the last carries a trailing bullet.
fn joined_skills(skills: &[String]) -> Vec<String> {
    let last = skills.len().saturating_sub(1);
    skills
        .iter()
        .enumerate()
        .map(|(i, s)| {
            if i < last {
                format!("{s}{SKILL_SEPARATOR}")
            } else {
                s.clone()
            }
        })
        .collect()
}

fn heading_style(palette: &Palette) -> TextStyle {
    TextStyle::new(14.0, FontWeight::Bold, palette.accent).tracked(0.1)
}

fn section(out: &mut LayoutBuilder, col: &mut Column, title: &str, rows: &[EntryRow], palette: &Palette) {
    col.heading(out, title, heading_style(palette), None);
    col.gap(12.0);
    for row in rows {
        col.title_with_period(
            out,
            &row.title,
            TextStyle::new(16.0, FontWeight::Semibold, palette.accent),
            &row.period,
            TextStyle::new(14.0, FontWeight::Regular, MUTED_FOREGROUND),
        );
        col.text(
            out,
            &row.subtitle,
            TextStyle::new(14.0, FontWeight::Regular, MUTED_FOREGROUND),
            TextRole::EntrySubtitle,
        );
        col.gap(12.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResumeDocument;

    #[test]
    fn test_joined_skills_bullets_all_but_last() {
        let skills = vec!["Go".to_string(), "Testing".to_string(), "SQL".to_string()];
        assert_eq!(joined_skills(&skills), vec!["Go •", "Testing •", "SQL"]);
        assert!(joined_skills(&[]).is_empty());
    }

    #[test]
    fn test_minimal_has_no_band_and_no_chips() {
        let mut doc = ResumeDocument::default();
        doc.personal_info.first_name = "Jane".into();
        doc.personal_info.last_name = "Doe".into();
        doc.skills = vec!["Go".into(), "Testing".into()];
        let page = Ruled.project(&ResumeView::from_document(&doc));
        assert_eq!(page.header_fill(), None);
        assert!(page.chip_labels().is_empty());
        assert_eq!(page.texts(TextRole::Name), vec!["JANE DOE"]);
        assert_eq!(page.texts(TextRole::Skill), vec!["Go •", "Testing"]);
        assert!(page.nodes.iter().any(|n| matches!(n, Node::Rule { thickness, .. } if *thickness == 2.0)));
    }
}
