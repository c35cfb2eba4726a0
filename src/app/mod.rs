use eframe::egui::{Context, Vec2};

use crate::scene::SceneGraph;

mod graph;
mod layout;
mod render_utils;
mod ui;

const COMPACT_WIDTH_THRESHOLD: f32 = 700.0;

pub struct SceneAtlasApp {
    model: ViewModel,
}

impl SceneAtlasApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        graph: SceneGraph,
        source_label: String,
        device_override: Option<DeviceClass>,
    ) -> Self {
        Self {
            model: ViewModel::new(graph, source_label, device_override),
        }
    }
}

impl eframe::App for SceneAtlasApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.model.show(ctx);
    }
}

/// Screen-class switch for the layout constants. Desktop gives the simulation
/// a wide virtual area and a tight clamp; compact screens get a smaller area,
/// looser bounds, and more aggressive spacing since users pan freely there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceClass {
    Desktop,
    Compact,
}

impl DeviceClass {
    fn area_multiplier(self) -> f32 {
        match self {
            Self::Desktop => 3.0,
            Self::Compact => 1.8,
        }
    }

    fn spacing_multiplier(self) -> f32 {
        match self {
            Self::Desktop => 1.0,
            Self::Compact => 1.3,
        }
    }

    fn relaxation_passes(self) -> usize {
        match self {
            Self::Desktop => 4,
            Self::Compact => 8,
        }
    }

    fn min_distance_scale(self) -> f32 {
        match self {
            Self::Desktop => 1.0,
            Self::Compact => 1.2,
        }
    }

    fn initial_zoom(self) -> f32 {
        match self {
            Self::Desktop => 1.15,
            Self::Compact => 2.0,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Compact => "compact",
        }
    }
}

/// The six live-tunable layout knobs plus the jitter seed. Changing any of
/// them and re-running produces a different but reproducible arrangement.
#[derive(Clone, Copy, Debug, PartialEq)]
struct LayoutParams {
    repulsion: f32,
    attraction: f32,
    gravity: f32,
    same_type_repel: f32,
    min_distance: f32,
    iterations: usize,
    seed: u64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            repulsion: 0.03,
            attraction: 0.8,
            gravity: 0.5,
            same_type_repel: 0.55,
            min_distance: 40.0,
            iterations: 270,
            seed: 0x5eed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Camera {
    scale: f32,
    offset: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Vec2::ZERO,
        }
    }
}

/// Per-kind visibility toggles. Unknown kinds count as visible, so every flag
/// starts enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct KindToggles {
    performer: bool,
    dj: bool,
    other_person: bool,
    place: bool,
    genre: bool,
    collective: bool,
}

impl Default for KindToggles {
    fn default() -> Self {
        Self {
            performer: true,
            dj: true,
            other_person: true,
            place: true,
            genre: true,
            collective: true,
        }
    }
}

/// Output of the visibility filter. `render` marks nodes eligible for drawing
/// and hit-testing, `layout` the (superset) participating in the simulation,
/// and `edges` parallels `SceneGraph::resolved_edges`.
struct VisibleSet {
    render: Vec<bool>,
    layout: Vec<bool>,
    edges: Vec<bool>,
    render_count: usize,
    edge_count: usize,
}

impl VisibleSet {
    fn empty() -> Self {
        Self {
            render: Vec::new(),
            layout: Vec::new(),
            edges: Vec::new(),
            render_count: 0,
            edge_count: 0,
        }
    }
}

/// Working state of one layout run, rebuilt from scratch every time and
/// returned by the engine so callers and tests can inspect what the run saw.
struct LayoutSession {
    nodes: Vec<usize>,
    forces: Vec<Vec2>,
    degrees: Vec<usize>,
    max_degree: usize,
    area: Vec2,
}

impl LayoutSession {
    fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            forces: Vec::new(),
            degrees: Vec::new(),
            max_degree: 0,
            area: Vec2::ZERO,
        }
    }
}

/// Debounce handle for an automatic layout run; replacing it supersedes the
/// previously scheduled run.
#[derive(Clone, Copy, Debug)]
struct PendingLayout {
    due_at: f64,
    iteration_cap: Option<usize>,
}

#[derive(Clone, Copy, Debug)]
enum DragState {
    Idle,
    Pan {
        press: eframe::egui::Pos2,
        origin_offset: Vec2,
    },
    Node {
        index: usize,
        grab_offset: Vec2,
        press: eframe::egui::Pos2,
    },
}

struct ViewModel {
    graph: SceneGraph,
    source_label: String,
    device_override: Option<DeviceClass>,
    params: LayoutParams,
    toggles: KindToggles,
    search: String,
    show_list_view: bool,
    selected: Option<usize>,
    camera: Camera,
    visible: VisibleSet,
    filter_dirty: bool,
    pending_layout: Option<PendingLayout>,
    input_cooldown_until: Option<f64>,
    drag: DragState,
    canvas_size: Vec2,
}

impl ViewModel {
    fn device_class(&self, canvas_width: f32) -> DeviceClass {
        self.device_override.unwrap_or({
            if canvas_width > 0.0 && canvas_width < COMPACT_WIDTH_THRESHOLD {
                DeviceClass::Compact
            } else {
                DeviceClass::Desktop
            }
        })
    }
}
