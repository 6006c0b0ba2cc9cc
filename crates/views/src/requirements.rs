use crate::text::{capitalize, punctuate};
use lazy_static::lazy_static;
use log::debug;
use models::{Requirements, course::course_path};
use regex::Regex;
use scraper::{ElementRef, Html, Node};
use std::fmt::{Display, Formatter, Result as FmtResult};

lazy_static! {
    /// Catalogue links look like `.../courses/comp-250`
    static ref CATALOGUE_HREF: Regex = Regex::new(r"courses/(.+)-(.+)").unwrap();
    /// Four letter subject, three digit code, optional `D1` style suffix
    static ref COURSE_CODE: Regex = Regex::new(r"([A-Z]{4}) ([0-9]{3}(?:[A-Z][0-9])?)").unwrap();
    /// Opening or closing tag, comment or doctype
    static ref MARKUP: Regex = Regex::new(r"<[A-Za-z/!]").unwrap();
}

/// A renderable piece of a requirement description
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReqNode {
    /// Plain text, rendered as a span
    Text(String),
    /// Link to a course page inside the application
    Link { to: String, text: String },
    /// Link leaving the application
    External { href: String, text: String },
}

impl ReqNode {
    fn text(text: impl Into<String>) -> Self {
        ReqNode::Text(text.into())
    }

    /// The visible text of the node
    pub fn as_str(&self) -> &str {
        match self {
            ReqNode::Text(text) => text,
            ReqNode::Link { text, .. } | ReqNode::External { text, .. } => text,
        }
    }

    fn capitalize(&mut self) {
        let (ReqNode::Text(text) | ReqNode::Link { text, .. } | ReqNode::External { text, .. }) =
            self;
        *text = capitalize(text);
    }
}

impl Display for ReqNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Drops a leading `Label:` prefix, as long as the colon is not part of the markup
fn strip_label(html: &str) -> &str {
    match html.split_once(':') {
        Some((label, rest)) if !label.contains('<') => rest,
        _ => html,
    }
}

/// Converts an HTML requirement fragment into renderable nodes
///
/// Anchors pointing at catalogue pages (`.../courses/<subject>-<code>`) become
/// internal course links, other anchors stay external links, any other
/// element or text node becomes plain text and comments are dropped.
///
/// # Arguments
/// * `html` - The fragment, optionally prefixed with a `Label:` segment
///
/// # Returns
/// The top-level nodes of the fragment in document order
pub fn transform_html(html: &str) -> Vec<ReqNode> {
    let cleaned = punctuate(strip_label(html).trim());
    let fragment = Html::parse_fragment(&cleaned);

    if !fragment.errors.is_empty() {
        debug!("requirement fragment parsed with errors: {:?}", fragment.errors);
    }

    let mut nodes: Vec<ReqNode> = fragment
        .root_element()
        .children()
        .filter_map(|node| match node.value() {
            Node::Text(text) => Some(ReqNode::text(&**text)),
            Node::Element(element) => {
                let inner_text = ElementRef::wrap(node)
                    .map(|element| element.text().collect::<String>())
                    .unwrap_or_default();

                if element.name() != "a" {
                    return Some(ReqNode::Text(inner_text));
                }

                let Some(href) = element.attr("href") else {
                    return Some(ReqNode::Text(inner_text));
                };

                Some(match CATALOGUE_HREF.captures(href) {
                    Some(captures) => ReqNode::Link {
                        to: format!("/course/{}-{}", &captures[1], &captures[2]),
                        text: inner_text,
                    },
                    None => ReqNode::External {
                        href: href.to_string(),
                        text: inner_text,
                    },
                })
            }
            _ => None,
        })
        .collect();

    // First visible word, even when it sits inside a leading tag
    if let Some(first) = nodes.iter_mut().find(|node| !node.as_str().trim().is_empty()) {
        first.capitalize();
    }

    nodes
}

/// Wraps every course code mentioned in plain text in a course link
///
/// Matches are found left to right without overlap; the text between them is
/// kept verbatim.
pub fn transform_text(text: &str) -> Vec<ReqNode> {
    let mut nodes = Vec::new();
    let mut last = 0;

    for captures in COURSE_CODE.captures_iter(text) {
        let Some(whole) = captures.get(0) else {
            continue;
        };

        if whole.start() > last {
            nodes.push(ReqNode::text(&text[last..whole.start()]));
        }

        nodes.push(ReqNode::Link {
            to: course_path(&format!("{}{}", &captures[1], &captures[2])),
            text: whole.as_str().to_string(),
        });

        last = whole.end();
    }

    if last < text.len() {
        nodes.push(ReqNode::text(&text[last..]));
    }

    nodes
}

/// Picks the HTML transform for marked-up input and the text transform otherwise
///
/// A bare `<`, as in `GPA < 3.0`, is not markup.
pub fn linkify(text: &str) -> Vec<ReqNode> {
    if MARKUP.is_match(text) {
        transform_html(text)
    } else {
        transform_text(text)
    }
}

/// Content of one requirement block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockBody {
    Nodes(Vec<ReqNode>),
    /// Shown when the course has nothing of this kind
    Placeholder(String),
}

/// A titled requirement section such as "Prerequisites"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementBlock {
    pub title: String,
    pub body: BlockBody,
}

impl RequirementBlock {
    /// A block whose text is linkified
    pub fn new(title: &str, text: Option<&str>) -> Self {
        Self::with_body(title, text, linkify)
    }

    /// A block whose text is shown as given, in a single text node
    pub fn verbatim(title: &str, text: Option<&str>) -> Self {
        Self::with_body(title, text, |text| vec![ReqNode::text(text)])
    }

    fn with_body<F>(title: &str, text: Option<&str>, render: F) -> Self
    where
        F: FnOnce(&str) -> Vec<ReqNode>,
    {
        let body = match text.map(str::trim) {
            Some(text) if !text.is_empty() => BlockBody::Nodes(render(text)),
            _ => BlockBody::Placeholder(format!(
                "This course has no {}.",
                title.to_lowercase()
            )),
        };

        Self {
            title: title.to_string(),
            body,
        }
    }
}

impl Display for RequirementBlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "{}", self.title)?;
        match &self.body {
            BlockBody::Nodes(nodes) => nodes.iter().try_for_each(|node| write!(f, "{node}")),
            BlockBody::Placeholder(message) => f.write_str(message),
        }
    }
}

/// The requirement panel of a course page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRequirements {
    pub prerequisites: RequirementBlock,
    pub corequisites: RequirementBlock,
    pub restrictions: RequirementBlock,
}

impl From<&Requirements> for CourseRequirements {
    fn from(requirements: &Requirements) -> Self {
        Self {
            prerequisites: RequirementBlock::new(
                "Prerequisites",
                requirements.prerequisites_text.as_deref(),
            ),
            corequisites: RequirementBlock::new(
                "Corequisites",
                requirements.corequisites_text.as_deref(),
            ),
            restrictions: RequirementBlock::verbatim(
                "Restrictions",
                requirements.restrictions.as_deref(),
            ),
        }
    }
}

impl CourseRequirements {
    pub fn blocks(&self) -> [&RequirementBlock; 3] {
        [&self.prerequisites, &self.corequisites, &self.restrictions]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_mode_links_course_codes() {
        let nodes = transform_text("COMP 202 and COMP 250");

        assert_eq!(
            nodes,
            vec![
                ReqNode::Link {
                    to: "/course/comp-202".into(),
                    text: "COMP 202".into()
                },
                ReqNode::Text(" and ".into()),
                ReqNode::Link {
                    to: "/course/comp-250".into(),
                    text: "COMP 250".into()
                },
            ]
        );
    }

    #[test]
    fn test_text_mode_keeps_surrounding_text() {
        let text = "Corequisite: MATH 262D1, or permission of the instructor.";
        let nodes = transform_text(text);

        assert_eq!(nodes.len(), 3);
        assert_eq!(
            nodes[1],
            ReqNode::Link {
                to: "/course/math-262d1".into(),
                text: "MATH 262D1".into()
            }
        );

        let rendered: String = nodes.iter().map(ReqNode::to_string).collect();
        assert_eq!(rendered, text);
    }

    #[test]
    fn test_text_mode_without_codes() {
        assert_eq!(
            transform_text("Not open to U0 students"),
            vec![ReqNode::Text("Not open to U0 students".into())]
        );
        assert!(transform_text("").is_empty());
    }

    #[test]
    fn test_html_mode_links() {
        let html = r#"Prerequisite: <a href="https://www.mcgill.ca/study/2023-2024/courses/comp-250">COMP 250</a> or <a href="https://example.com/other">a placement test</a>"#;
        let nodes = transform_html(html);

        assert_eq!(
            nodes,
            vec![
                ReqNode::Link {
                    to: "/course/comp-250".into(),
                    text: "COMP 250".into()
                },
                ReqNode::Text(" or ".into()),
                ReqNode::External {
                    href: "https://example.com/other".into(),
                    text: "a placement test".into()
                },
                ReqNode::Text(".".into()),
            ]
        );
    }

    #[test]
    fn test_html_mode_capitalizes_and_drops_comments() {
        let nodes = transform_html("Prerequisites: one of <b>these</b><!-- hidden -->");

        assert_eq!(
            nodes,
            vec![
                ReqNode::Text("One of ".into()),
                ReqNode::Text("these".into()),
                ReqNode::Text(".".into()),
            ]
        );
    }

    #[test]
    fn test_html_mode_anchor_without_href() {
        let nodes = transform_html("<a>COMP 250</a>");
        assert_eq!(nodes[0], ReqNode::Text("COMP 250".into()));
    }

    #[test]
    fn test_colon_inside_markup_is_not_a_label() {
        let nodes = transform_html(r#"<a href="https://example.com/courses/math-133">MATH 133</a>"#);
        assert_eq!(
            nodes[0],
            ReqNode::Link {
                to: "/course/math-133".into(),
                text: "MATH 133".into()
            }
        );
    }

    #[test]
    fn test_missing_text_renders_placeholder() {
        let block = RequirementBlock::new("Corequisites", None);
        assert_eq!(
            block.body,
            BlockBody::Placeholder("This course has no corequisites.".into())
        );

        let block = RequirementBlock::new("Prerequisites", Some("   "));
        assert_eq!(
            block.body,
            BlockBody::Placeholder("This course has no prerequisites.".into())
        );
    }

    #[test]
    fn test_course_requirements_blocks() {
        let requirements = Requirements {
            prerequisites_text: Some(
                r#"Prerequisite: <a href="/courses/comp-206">COMP 206</a>"#.into(),
            ),
            corequisites_text: None,
            restrictions: Some("Not open to students who have taken COMP 250.".into()),
        };

        let panel = CourseRequirements::from(&requirements);
        let [prerequisites, corequisites, restrictions] = panel.blocks();

        assert!(matches!(&prerequisites.body, BlockBody::Nodes(nodes) if nodes.len() == 2));
        assert!(matches!(corequisites.body, BlockBody::Placeholder(_)));
        assert_eq!(
            restrictions.body,
            BlockBody::Nodes(vec![ReqNode::Text(
                "Not open to students who have taken COMP 250.".into()
            )])
        );
    }

    #[test]
    fn test_restrictions_are_verbatim() {
        let restrictions = "Restriction: <b>not</b> open to students who have taken COMP 250";
        let panel = CourseRequirements::from(&Requirements {
            restrictions: Some(restrictions.into()),
            ..Default::default()
        });

        assert_eq!(
            panel.restrictions.body,
            BlockBody::Nodes(vec![ReqNode::Text(restrictions.into())])
        );

        let panel = CourseRequirements::from(&Requirements::default());
        assert_eq!(
            panel.restrictions.body,
            BlockBody::Placeholder("This course has no restrictions.".into())
        );
    }

    #[test]
    fn test_less_than_sign_is_not_markup() {
        let nodes = linkify("GPA < 3.0: COMP 250");

        assert_eq!(
            nodes,
            vec![
                ReqNode::Text("GPA < 3.0: ".into()),
                ReqNode::Link {
                    to: "/course/comp-250".into(),
                    text: "COMP 250".into()
                },
            ]
        );
    }

    #[test]
    fn test_html_mode_capitalizes_inside_leading_tag() {
        let nodes = transform_html("<b>one of</b> COMP 202 or COMP 250");

        assert_eq!(nodes[0], ReqNode::Text("One of".into()));
        assert_eq!(nodes.last(), Some(&ReqNode::Text(" COMP 202 or COMP 250.".into())));
    }
}
