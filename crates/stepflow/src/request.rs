//! The input of a render: a title and two ordered step lists.

use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// The two fixed sections of a diagram, in drawing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Manual,
    Automation,
}

impl SectionKind {
    /// Header text drawn above the section.
    pub fn label(self) -> &'static str {
        match self {
            Self::Manual => "Manual Steps",
            Self::Automation => "Automation Steps",
        }
    }
}

/// A diagram to render.
///
/// Serializes with the field names `title`, `manualSteps`, and
/// `automationSteps`. Either step list may be empty; order within a list is
/// the top-to-bottom drawing order.
///
/// # Examples
///
/// ```
/// use stepflow::DiagramRequest;
///
/// let request = DiagramRequest::new(
///     "Customer Onboarding Process",
///     vec!["Receive customer application".to_string()],
///     vec!["Send automated welcome email".to_string()],
/// );
/// assert!(request.validate().is_ok());
/// assert_eq!(request.output_file_name(), "Customer_Onboarding_Process_workflow.png");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramRequest {
    pub title: String,
    pub manual_steps: Vec<String>,
    pub automation_steps: Vec<String>,
}

impl DiagramRequest {
    pub fn new(
        title: impl Into<String>,
        manual_steps: Vec<String>,
        automation_steps: Vec<String>,
    ) -> Self {
        Self {
            title: title.into(),
            manual_steps,
            automation_steps,
        }
    }

    /// Checks the request can be rendered.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidInput`] if the title is empty or only whitespace.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.title.trim().is_empty() {
            return Err(RenderError::InvalidInput(
                "title must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the step lists paired with their section, in drawing order.
    pub fn sections(&self) -> [(SectionKind, &[String]); 2] {
        [
            (SectionKind::Manual, self.manual_steps.as_slice()),
            (SectionKind::Automation, self.automation_steps.as_slice()),
        ]
    }

    /// Suggested file name for the rendered image.
    ///
    /// Whitespace runs in the title become `_`, and path separators are
    /// replaced so the result is always a single file name.
    pub fn output_file_name(&self) -> String {
        let stem = self
            .title
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
            .replace(['/', '\\'], "_");
        format!("{stem}_workflow.png")
    }
}

/// Splits text holding one step per line into a step list.
///
/// Lines are trimmed and blank lines dropped.
///
/// ```
/// use stepflow::parse_steps;
///
/// let steps = parse_steps("Review documents\n\n  Verify identity  \n");
/// assert_eq!(steps, ["Review documents", "Verify identity"]);
/// ```
pub fn parse_steps(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_blank_title() {
        for title in ["", "   ", "\t\n"] {
            let request = DiagramRequest::new(title, vec![], vec![]);
            assert!(matches!(request.validate(), Err(RenderError::InvalidInput(_))));
        }
    }

    #[test]
    fn test_validate_accepts_empty_step_lists() {
        let request = DiagramRequest::new("Empty", vec![], vec![]);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_sections_are_manual_then_automation() {
        let request = DiagramRequest::new("T", vec!["a".into()], vec!["b".into(), "c".into()]);
        let sections = request.sections();
        assert_eq!(sections[0].0, SectionKind::Manual);
        assert_eq!(sections[0].1, ["a"]);
        assert_eq!(sections[1].0, SectionKind::Automation);
        assert_eq!(sections[1].1, ["b", "c"]);
    }

    #[test]
    fn test_section_labels() {
        assert_eq!(SectionKind::Manual.label(), "Manual Steps");
        assert_eq!(SectionKind::Automation.label(), "Automation Steps");
    }

    #[test]
    fn test_output_file_name() {
        let request = DiagramRequest::new("  Order   to\tcash / refunds ", vec![], vec![]);
        assert_eq!(request.output_file_name(), "Order_to_cash___refunds_workflow.png");
    }

    #[test]
    fn test_parse_steps_drops_blank_lines() {
        assert_eq!(parse_steps("a\r\n \r\nb\n"), ["a", "b"]);
        assert!(parse_steps("\n\n  \n").is_empty());
    }

    #[test]
    fn test_request_uses_camel_case_fields() {
        let json = r#"{
            "title": "Process Name",
            "manualSteps": ["Step 1", "Step 2"],
            "automationSteps": ["Auto Step 1"]
        }"#;
        let request: DiagramRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.title, "Process Name");
        assert_eq!(request.manual_steps, ["Step 1", "Step 2"]);
        assert_eq!(request.automation_steps, ["Auto Step 1"]);
    }

    #[test]
    fn test_request_requires_step_arrays() {
        let json = r#"{ "title": "Process Name", "manualSteps": "Step 1" }"#;
        assert!(serde_json::from_str::<DiagramRequest>(json).is_err());
    }
}
