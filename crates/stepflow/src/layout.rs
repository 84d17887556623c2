//! Canvas geometry of a diagram.
//!
//! The layout is computed in one top-to-bottom pass before anything is
//! drawn. Sections are processed in order by the same loop: each reserves its
//! header line, then stacks its ovals with an arrow-sized gap between
//! consecutive ones, and a fixed spacing separates one section from the next.
//! Empty sections still reserve their header and the spacing after them.

use log::trace;

use stepflow_core::geometry::{Bounds, Point, Size};

use crate::{
    config::LayoutConfig,
    request::{DiagramRequest, SectionKind},
};

/// Height of the canvas needed for the given step counts.
///
/// This is the closed form of the layout pass:
///
/// ```text
/// padding_top + 2 * header + section(manual) + section_spacing + section(automation) + padding_bottom
/// section(n) = n * oval_height + max(0, n - 1) * step_margin
/// ```
///
/// Saturates at `u64::MAX` for step counts no surface could hold.
///
/// ```
/// use stepflow::{canvas_height, config::LayoutConfig};
///
/// let layout = LayoutConfig::default();
/// assert_eq!(canvas_height(1, 0, &layout), 80 + 80 + 80 + 60 + 40);
/// assert_eq!(canvas_height(0, 0, &layout), 260);
/// ```
pub fn canvas_height(manual_steps: usize, automation_steps: usize, config: &LayoutConfig) -> u64 {
    let headers = 2 * u64::from(config.section_header_height());
    u64::from(config.padding_top())
        .saturating_add(headers)
        .saturating_add(section_height(manual_steps, config))
        .saturating_add(u64::from(config.section_spacing()))
        .saturating_add(section_height(automation_steps, config))
        .saturating_add(u64::from(config.padding_bottom()))
}

fn section_height(steps: usize, config: &LayoutConfig) -> u64 {
    let steps = u64::try_from(steps).unwrap_or(u64::MAX);
    let ovals = steps.saturating_mul(u64::from(config.oval_height()));
    let gaps = steps
        .saturating_sub(1)
        .saturating_mul(u64::from(config.step_margin()));
    ovals.saturating_add(gaps)
}

/// One oval: the step it shows and where it sits.
#[derive(Debug, Clone)]
pub(crate) struct StepPlacement<'a> {
    pub label: &'a str,
    pub bounds: Bounds,
}

/// One arrow between consecutive ovals: the top of its shaft and its length.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ArrowPlacement {
    pub start: Point,
    pub length: f32,
}

/// Placement of one section's header, ovals, and arrows.
#[derive(Debug, Clone)]
pub(crate) struct SectionLayout<'a> {
    pub kind: SectionKind,
    pub header_anchor: Point,
    pub steps: Vec<StepPlacement<'a>>,
    pub arrows: Vec<ArrowPlacement>,
}

/// Geometry of a whole diagram.
#[derive(Debug, Clone)]
pub(crate) struct LayoutGeometry<'a> {
    pub width: u32,
    pub height: u64,
    pub title_anchor: Point,
    pub sections: Vec<SectionLayout<'a>>,
}

impl<'a> LayoutGeometry<'a> {
    /// Positions every element of `request` on the canvas.
    pub fn compute(request: &'a DiagramRequest, config: &LayoutConfig) -> Self {
        let center_x = config.canvas_width() as f32 / 2.0;
        let oval_size = Size::new(config.oval_width() as f32, config.oval_height() as f32);
        let oval_left = config.left_padding() as f32;

        let mut cursor = u64::from(config.padding_top());
        let mut sections = Vec::with_capacity(2);

        for (index, (kind, labels)) in request.sections().into_iter().enumerate() {
            if index > 0 {
                cursor += u64::from(config.section_spacing());
            }

            let header_anchor = Point::new(config.header_left_margin() as f32, cursor as f32);
            cursor += u64::from(config.section_header_height());

            let mut steps = Vec::with_capacity(labels.len());
            let mut arrows = Vec::with_capacity(labels.len().saturating_sub(1));
            for (position, label) in labels.iter().enumerate() {
                let top_left = Point::new(oval_left, cursor as f32);
                steps.push(StepPlacement {
                    label: label.as_str(),
                    bounds: Bounds::new_from_top_left(top_left, oval_size),
                });
                cursor += u64::from(config.oval_height());

                if position + 1 < labels.len() {
                    arrows.push(ArrowPlacement {
                        start: Point::new(center_x, cursor as f32),
                        length: config.step_margin() as f32,
                    });
                    cursor += u64::from(config.step_margin());
                }
            }

            trace!(
                section = kind.label(),
                steps = steps.len(),
                end = cursor;
                "Section laid out"
            );
            sections.push(SectionLayout {
                kind,
                header_anchor,
                steps,
                arrows,
            });
        }

        Self {
            width: config.canvas_width(),
            height: cursor + u64::from(config.padding_bottom()),
            title_anchor: Point::new(center_x, config.title_baseline() as f32),
            sections,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn request(manual: usize, automation: usize) -> DiagramRequest {
        DiagramRequest::new(
            "Title",
            (0..manual).map(|i| format!("manual {i}")).collect(),
            (0..automation).map(|i| format!("automation {i}")).collect(),
        )
    }

    #[test]
    fn test_single_manual_step_height() {
        let config = LayoutConfig::default();
        let req = request(1, 0);
        let geometry = LayoutGeometry::compute(&req, &config);
        assert_eq!(geometry.height, 80 + 80 + 80 + 60 + 40);
        assert_eq!(canvas_height(1, 0, &config), geometry.height);
    }

    #[test]
    fn test_empty_request_reserves_headers_and_spacing() {
        let config = LayoutConfig::default();
        let req = request(0, 0);
        let geometry = LayoutGeometry::compute(&req, &config);
        assert_eq!(geometry.height, 260);
        assert_eq!(geometry.sections.len(), 2);
        assert!(geometry.sections.iter().all(|s| s.steps.is_empty()));
        assert!(geometry.sections.iter().all(|s| s.arrows.is_empty()));
    }

    #[test]
    fn test_header_and_first_oval_positions() {
        let config = LayoutConfig::default();
        let req = request(2, 1);
        let geometry = LayoutGeometry::compute(&req, &config);

        let manual = &geometry.sections[0];
        assert_eq!(manual.kind, SectionKind::Manual);
        assert_approx_eq!(f32, manual.header_anchor.x(), 50.0);
        assert_approx_eq!(f32, manual.header_anchor.y(), 80.0);
        assert_approx_eq!(f32, manual.steps[0].bounds.min_y(), 120.0);
        assert_approx_eq!(f32, manual.steps[1].bounds.min_y(), 240.0);

        // 320 (end of manual ovals) + 60 spacing.
        let automation = &geometry.sections[1];
        assert_eq!(automation.kind, SectionKind::Automation);
        assert_approx_eq!(f32, automation.header_anchor.y(), 380.0);
        assert_approx_eq!(f32, automation.steps[0].bounds.min_y(), 420.0);
        assert_eq!(geometry.height, 540);
    }

    #[test]
    fn test_ovals_are_horizontally_centered() {
        let config = LayoutConfig::default();
        let req = request(3, 2);
        let geometry = LayoutGeometry::compute(&req, &config);
        for step in geometry.sections.iter().flat_map(|s| &s.steps) {
            assert_approx_eq!(f32, step.bounds.min_x(), 150.0);
            assert_approx_eq!(f32, step.bounds.width(), 500.0);
            assert_approx_eq!(f32, step.bounds.center().x(), 400.0);
        }
    }

    #[test]
    fn test_arrows_span_gaps_between_ovals() {
        let config = LayoutConfig::default();
        let req = request(3, 0);
        let geometry = LayoutGeometry::compute(&req, &config);
        let manual = &geometry.sections[0];

        assert_eq!(manual.arrows.len(), 2);
        for (arrow, pair) in manual.arrows.iter().zip(manual.steps.windows(2)) {
            assert_approx_eq!(f32, arrow.start.x(), 400.0);
            assert_approx_eq!(f32, arrow.start.y(), pair[0].bounds.max_y());
            assert_approx_eq!(f32, arrow.start.y() + arrow.length, pair[1].bounds.min_y());
        }
    }

    #[test]
    fn test_title_anchor() {
        let config = LayoutConfig::default();
        let req = request(0, 0);
        let geometry = LayoutGeometry::compute(&req, &config);
        assert_approx_eq!(f32, geometry.title_anchor.x(), 400.0);
        assert_approx_eq!(f32, geometry.title_anchor.y(), 40.0);
        assert_eq!(geometry.width, 800);
    }

    #[test]
    fn test_step_labels_keep_order() {
        let config = LayoutConfig::default();
        let req = request(2, 2);
        let geometry = LayoutGeometry::compute(&req, &config);
        let labels: Vec<&str> = geometry
            .sections
            .iter()
            .flat_map(|s| s.steps.iter().map(|step| step.label))
            .collect();
        assert_eq!(labels, ["manual 0", "manual 1", "automation 0", "automation 1"]);
    }

    #[test]
    fn test_canvas_height_saturates() {
        let config = LayoutConfig::default();
        assert_eq!(canvas_height(usize::MAX, usize::MAX, &config), u64::MAX);
    }

    proptest! {
        #[test]
        fn prop_layout_height_matches_closed_form(manual in 0usize..60, automation in 0usize..60) {
            let config = LayoutConfig::default();
            let req = request(manual, automation);
            let geometry = LayoutGeometry::compute(&req, &config);

            let m = manual as u64;
            let a = automation as u64;
            let expected = 80 + 2 * 40
                + (m * 80 + m.saturating_sub(1) * 40)
                + 60
                + (a * 80 + a.saturating_sub(1) * 40)
                + 40;
            prop_assert_eq!(geometry.height, expected);
            prop_assert_eq!(canvas_height(manual, automation, &config), expected);
        }

        #[test]
        fn prop_ovals_never_overlap_and_keep_step_margin(
            manual in 0usize..30,
            automation in 0usize..30,
            step_margin in 0u32..100,
            section_spacing in 0u32..100,
        ) {
            let mut config = LayoutConfig::default();
            config.set_step_margin(step_margin);
            config.set_section_spacing(section_spacing);
            let req = request(manual, automation);
            let geometry = LayoutGeometry::compute(&req, &config);

            for section in &geometry.sections {
                for pair in section.steps.windows(2) {
                    prop_assert!(!pair[0].bounds.overlaps_vertically(&pair[1].bounds));
                    let gap = pair[1].bounds.min_y() - pair[0].bounds.max_y();
                    prop_assert!((gap - step_margin as f32).abs() < f32::EPSILON);
                }
            }
            prop_assert_eq!(geometry.height, canvas_height(manual, automation, &config));
        }
    }
}
