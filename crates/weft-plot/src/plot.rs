//! Plot emitter: paths split at every extruder toggle.

use serde::{Deserialize, Serialize};
use tracing::debug;
use weft_engine::{
    Action, CommandTable, Engine, InitializationData, MachineState, Renderer, Transformed,
};
use weft_ir::{Position, Step};

use crate::bounds::BoundingBox;
use crate::color::{
    print_sequence, print_sequence_fluctuating, z_gradient, ColorType, Rgb, MANUAL_DEFAULT_COLOR,
    TRAVEL_COLOR,
};

/// A continuous run of vertices with one extruder state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotPath {
    /// X of each vertex.
    pub xvals: Vec<f64>,
    /// Y of each vertex.
    pub yvals: Vec<f64>,
    /// Z of each vertex.
    pub zvals: Vec<f64>,
    /// Color of each vertex.
    pub colors: Vec<Rgb>,
    /// Bead width at each vertex.
    pub widths: Vec<f64>,
    /// Bead height at each vertex.
    pub heights: Vec<f64>,
    /// Whether this path extrudes.
    pub extruder_on: bool,
}

/// Labelled marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotAnnotation {
    /// Marker text.
    pub label: String,
    /// X position.
    pub x: f64,
    /// Y position.
    pub y: f64,
    /// Z position.
    pub z: f64,
}

/// Complete plot output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotData {
    /// Paths in visitation order.
    pub paths: Vec<PlotPath>,
    /// Box around every visited position.
    pub bounding_box: BoundingBox,
    /// Markers in stream order.
    pub annotations: Vec<PlotAnnotation>,
}

#[derive(Debug, Clone, Copy)]
struct Vertex {
    position: Position,
    width: f64,
    height: f64,
    color: Option<Rgb>,
}

#[derive(Debug, Clone, Default)]
struct RawPath {
    extruder_on: bool,
    vertices: Vec<Vertex>,
}

/// Collects visited positions into [`PlotData`].
#[derive(Debug, Clone, Default)]
pub struct PlotRenderer {
    color_type: ColorType,
    hide_travel: bool,
    paths: Vec<RawPath>,
    visited: Vec<Position>,
    annotations: Vec<PlotAnnotation>,
}

impl PlotRenderer {
    /// Create a renderer using `color_type`.
    pub fn new(color_type: ColorType) -> Self {
        Self {
            color_type,
            ..Default::default()
        }
    }

    /// Drop non-extruding paths from the output.
    pub fn hide_travel(mut self, hide: bool) -> Self {
        self.hide_travel = hide;
        self
    }

    fn vertex(position: Position, state: &MachineState) -> Vertex {
        let (width, height) = state.cross_section.extent();
        Vertex {
            position,
            width,
            height,
            color: state.color,
        }
    }

    fn start_path(&mut self, state: &MachineState) {
        let mut path = RawPath {
            extruder_on: state.extruder.on,
            vertices: Vec::new(),
        };
        if let Some(position) = state.position {
            path.vertices.push(Self::vertex(position, state));
        }
        self.paths.push(path);
    }

    fn visit(&mut self, position: Position, state: &MachineState) {
        if self.paths.is_empty() {
            self.start_path(state);
            self.visited.push(position);
            return;
        }
        self.visited.push(position);
        if let Some(path) = self.paths.last_mut() {
            path.vertices.push(Self::vertex(position, state));
        }
    }
}

impl Renderer for PlotRenderer {
    type Output = PlotData;

    fn render(&mut self, action: &Action<'_>, state: &MachineState) {
        match action {
            Action::Move(mv) => self.visit(mv.to, state),
            Action::ExtruderToggled { .. } => {
                if state.position.is_some() {
                    self.start_path(state);
                }
            }
            Action::Annotation { label, position } => self.annotations.push(PlotAnnotation {
                label: label.to_string(),
                x: position.x,
                y: position.y,
                z: position.z,
            }),
            _ => {}
        }
    }

    fn finish(self, _state: &MachineState) -> PlotData {
        let bounding_box = BoundingBox::from_positions(&self.visited);
        let hide_travel = self.hide_travel;
        let kept: Vec<RawPath> = self
            .paths
            .into_iter()
            .filter(|p| p.vertices.len() > 1 && (p.extruder_on || !hide_travel))
            .collect();

        let path_count = kept.len();
        let vertex_count: usize = kept.iter().map(|p| p.vertices.len()).sum();
        let mut vertex_index = 0;
        let mut paths = Vec::with_capacity(path_count);
        for (path_index, raw) in kept.into_iter().enumerate() {
            let mut path = PlotPath {
                extruder_on: raw.extruder_on,
                ..Default::default()
            };
            for v in raw.vertices {
                let color = match (self.color_type, raw.extruder_on) {
                    (ColorType::Manual, _) => v.color.unwrap_or(MANUAL_DEFAULT_COLOR),
                    (_, false) => TRAVEL_COLOR,
                    (ColorType::ZGradient, true) => {
                        z_gradient(v.position.z, bounding_box.minz, bounding_box.rangez)
                    }
                    (ColorType::PrintSequence, true) => print_sequence(path_index, path_count),
                    (ColorType::PrintSequenceFluctuating, true) => {
                        print_sequence_fluctuating(vertex_index, vertex_count, 5)
                    }
                };
                path.xvals.push(v.position.x);
                path.yvals.push(v.position.y);
                path.zvals.push(v.position.z);
                path.colors.push(color);
                path.widths.push(v.width);
                path.heights.push(v.height);
                vertex_index += 1;
            }
            paths.push(path);
        }
        debug!(paths = paths.len(), vertices = vertex_count, "plot finished");

        PlotData {
            paths,
            bounding_box,
            annotations: self.annotations,
        }
    }
}

/// Transform a design into plot data.
pub fn generate_plot(
    steps: &[Step],
    commands: &dyn CommandTable,
    init: InitializationData,
    renderer: PlotRenderer,
) -> weft_engine::Result<Transformed<PlotData>> {
    Engine::new(commands).with_initialization(init).run(steps, renderer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use weft_engine::generic_commands;
    use weft_ir::{CrossSectionUpdate, Event, Point};

    fn plot(steps: &[Step], renderer: PlotRenderer) -> PlotData {
        generate_plot(steps, &generic_commands(), InitializationData::default(), renderer)
            .unwrap()
            .output
    }

    fn square() -> Vec<Step> {
        vec![
            CrossSectionUpdate::rectangle(0.4, 0.2).into(),
            Point::new(50.0, 50.0, 0.2).into(),
            Event::ExtruderToggle { on: true }.into(),
            vec![
                Point::new(70.0, 50.0, 0.2),
                Point::new(70.0, 70.0, 0.2),
                Point::new(50.0, 70.0, 0.2),
                Point::new(50.0, 50.0, 0.2),
            ]
            .into(),
        ]
    }

    #[test]
    fn test_square_bounding_box() {
        let data = plot(&square(), PlotRenderer::default());
        let b = data.bounding_box;
        assert_eq!((b.minx, b.maxx, b.midx, b.rangex), (50.0, 70.0, 60.0, 20.0));
        assert_eq!((b.miny, b.maxy, b.midy, b.rangey), (50.0, 70.0, 60.0, 20.0));
        assert_eq!(b.rangez, 0.0);
        assert_eq!(data.paths.len(), 1);
        assert_eq!(data.paths[0].xvals.len(), 5);
        assert_eq!(data.paths[0].widths[0], 0.4);
    }

    fn two_segments() -> Vec<Step> {
        vec![
            CrossSectionUpdate::rectangle(0.4, 0.2).into(),
            Point::new(0.0, 0.0, 0.2).into(),
            Point::new(10.0, 0.0, 0.2).with_extrude(true).into(),
            Point::new(20.0, 0.0, 0.2).with_extrude(false).into(),
            Point::new(30.0, 0.0, 0.4).with_extrude(true).into(),
        ]
    }

    #[test]
    fn test_paths_split_on_toggle() {
        let data = plot(&two_segments(), PlotRenderer::default());
        let flags: Vec<_> = data.paths.iter().map(|p| p.extruder_on).collect();
        assert_eq!(flags, [true, false, true]);
        // each new path starts where the previous one ended
        assert_eq!(data.paths[1].xvals, [10.0, 20.0]);
        assert_eq!(data.paths[1].colors[0], TRAVEL_COLOR);
    }

    #[test]
    fn test_hide_travel() {
        let data = plot(&two_segments(), PlotRenderer::default().hide_travel(true));
        assert_eq!(data.paths.len(), 2);
        assert!(data.paths.iter().all(|p| p.extruder_on));
        // travel vertices still count toward the box
        assert_eq!(data.bounding_box.maxx, 30.0);
    }

    #[test]
    fn test_z_gradient_colors() {
        let data = plot(&two_segments(), PlotRenderer::new(ColorType::ZGradient));
        let last = &data.paths[2];
        assert_eq!(last.colors[0], [0.0, 0.0, 1.0]);
        assert_relative_eq!(last.colors[1][1], 1.0);
    }

    #[test]
    fn test_print_sequence_colors() {
        let data = plot(&two_segments(), PlotRenderer::new(ColorType::PrintSequence));
        assert_eq!(data.paths[0].colors[0], [0.8, 0.0, 1.0]);
        assert_eq!(data.paths[2].colors[0], print_sequence(2, 3));
    }

    #[test]
    fn test_manual_colors_persist_until_changed() {
        let design: Vec<Step> = vec![
            CrossSectionUpdate::rectangle(0.4, 0.2).into(),
            Point::new(0.0, 0.0, 0.2).into(),
            Point::new(10.0, 0.0, 0.2).with_extrude(true).with_color([1.0, 0.0, 0.0]).into(),
            Point::new(20.0, 0.0, 0.2).with_extrude(false).into(),
            Point::new(30.0, 0.0, 0.2).with_color([0.0, 1.0, 0.0]).into(),
        ];
        let data = plot(&design, PlotRenderer::new(ColorType::Manual));
        let blue = MANUAL_DEFAULT_COLOR;
        let red = [1.0, 0.0, 0.0];
        let green = [0.0, 1.0, 0.0];
        assert_eq!(data.paths[0].colors, [blue, red]);
        // travel keeps the manual color instead of the travel color
        assert_eq!(data.paths[1].colors, [red, red, green]);

        let data = plot(&design, PlotRenderer::new(ColorType::ZGradient));
        assert_eq!(data.paths[1].colors[2], TRAVEL_COLOR);
    }

    #[test]
    fn test_annotations() {
        let mut design = square();
        design.push(
            Event::Annotation {
                label: "seam".into(),
                point: None,
            }
            .into(),
        );
        let data = plot(&design, PlotRenderer::default());
        assert_eq!(
            data.annotations,
            [PlotAnnotation {
                label: "seam".into(),
                x: 50.0,
                y: 50.0,
                z: 0.2
            }]
        );
    }

    #[test]
    fn test_json_shape() {
        let data = plot(&square(), PlotRenderer::default());
        let v = serde_json::to_value(&data).unwrap();
        assert_eq!(v["boundingBox"]["midx"], 60.0);
        assert_eq!(v["paths"][0]["extruderOn"], true);
        assert!(v["annotations"].as_array().unwrap().is_empty());
    }
}
