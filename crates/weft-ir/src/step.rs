//! Design steps and flattening.

use serde::{Deserialize, Serialize};

use crate::config::{CrossSectionUpdate, ExtruderUpdate, PrinterUpdate};
use crate::event::Event;
use crate::Point;

/// A leaf of a design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Element {
    /// Move to a point.
    Point(Point),
    /// Printer speed fragment.
    Printer(PrinterUpdate),
    /// Extruder configuration fragment.
    Extruder(ExtruderUpdate),
    /// Cross-section fragment.
    CrossSection(CrossSectionUpdate),
    /// State-change event.
    Event(Event),
}

impl Element {
    /// Element kind, used in errors and diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Point(_) => "Point",
            Element::Printer(_) => "Printer",
            Element::Extruder(_) => "Extruder",
            Element::CrossSection(_) => "CrossSection",
            Element::Event(e) => e.kind(),
        }
    }

    /// The point, if this element is one.
    pub fn as_point(&self) -> Option<&Point> {
        match self {
            Element::Point(p) => Some(p),
            _ => None,
        }
    }
}

/// A node of a (possibly nested) design.
///
/// In JSON a group is an array and an element is a tagged object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Step {
    /// Ordered sub-sequence.
    Group(Vec<Step>),
    /// Single element.
    Element(Element),
}

/// Flatten a nested design into a single ordered element stream.
///
/// Order is depth-first, so a design and its fully flattened form
/// produce identical streams.
pub fn flatten(steps: &[Step]) -> Vec<Element> {
    let mut out = Vec::with_capacity(steps.len());
    flatten_into(steps, &mut out);
    out
}

fn flatten_into(steps: &[Step], out: &mut Vec<Element>) {
    for step in steps {
        match step {
            Step::Group(inner) => flatten_into(inner, out),
            Step::Element(e) => out.push(e.clone()),
        }
    }
}

impl From<Element> for Step {
    fn from(e: Element) -> Self {
        Step::Element(e)
    }
}

impl From<Point> for Step {
    fn from(p: Point) -> Self {
        Step::Element(Element::Point(p))
    }
}

impl From<Event> for Step {
    fn from(e: Event) -> Self {
        Step::Element(Element::Event(e))
    }
}

impl From<PrinterUpdate> for Step {
    fn from(u: PrinterUpdate) -> Self {
        Step::Element(Element::Printer(u))
    }
}

impl From<ExtruderUpdate> for Step {
    fn from(u: ExtruderUpdate) -> Self {
        Step::Element(Element::Extruder(u))
    }
}

impl From<CrossSectionUpdate> for Step {
    fn from(u: CrossSectionUpdate) -> Self {
        Step::Element(Element::CrossSection(u))
    }
}

impl From<Vec<Step>> for Step {
    fn from(steps: Vec<Step>) -> Self {
        Step::Group(steps)
    }
}

impl From<Vec<Point>> for Step {
    fn from(points: Vec<Point>) -> Self {
        Step::Group(points.into_iter().map(Step::from).collect())
    }
}
