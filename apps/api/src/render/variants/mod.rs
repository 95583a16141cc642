//! The structural layouts. Classic and Modern share `Banded`; each layout
//! turns a `ResumeView` into a positioned page.

mod banded;
mod ruled;
mod side_panel;

pub use banded::Banded;
pub use ruled::Ruled;
pub use side_panel::SidePanel;

use crate::render::layout::PageLayout;
use crate::render::view::ResumeView;

pub trait ProjectLayout {
    fn project(&self, view: &ResumeView) -> PageLayout;
}
