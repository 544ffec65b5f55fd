#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Mission description adapter for the block-world simulator.
//!
//! Translates generated draw operations and agent spawns into the
//! simulator's XML mission format. The adapter only reads layout data and
//! never calls back into the generation systems.

use hideseek_core::{CellCoord, DrawOp, PLAY_LEVEL};
use serde::Deserialize;

/// XML namespace of simulator mission documents.
pub const MISSION_NAMESPACE: &str = "http://ProjectMalmo.microsoft.com";

/// Generator string of the flat world the arena is drawn onto.
pub const FLAT_WORLD_GENERATOR: &str = "3;7,2;1;";

/// Height the observer hovers at above an empty arena.
pub const OBSERVER_BASE_HEIGHT: u32 = 10;

/// Settings that shape the mission around a generated arena.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MissionSettings {
    /// Summary shown by the simulator.
    pub summary: String,
    /// World time at mission start, in ticks.
    pub start_time: u32,
    /// Weather of the mission.
    pub weather: String,
    /// Mission time limit in milliseconds; `None` runs until an agent quits.
    pub time_limit_ms: Option<u64>,
    /// Number of spawned agents playing the seeker role; the rest hide.
    pub seekers: u32,
    /// Adds a spectator looking down onto the arena.
    pub observer: bool,
}

impl Default for MissionSettings {
    fn default() -> Self {
        Self {
            summary: "Multi Agent Hide and Seek".to_owned(),
            start_time: 12_000,
            weather: "clear".to_owned(),
            time_limit_ms: Some(50_000),
            seekers: 1,
            observer: true,
        }
    }
}

/// Names the agent spawned at position `index` of the spawn list.
///
/// The first `seekers` spawns become seekers, numbered from one, and the
/// remaining spawns become hiders with their own numbering.
#[must_use]
pub fn agent_name(index: usize, seekers: u32) -> String {
    let seekers = usize::try_from(seekers).unwrap_or(usize::MAX);
    if index < seekers {
        format!("Seeker {}", index + 1)
    } else {
        format!("Hider {}", index - seekers + 1)
    }
}

/// Renders the operations as the body of a `DrawingDecorator`, one element per line.
#[must_use]
pub fn render_drawing_decorator(ops: &[DrawOp]) -> String {
    let mut xml = String::from("<DrawingDecorator>\n");
    for op in ops {
        xml.push_str("  ");
        xml.push_str(&render_op(op));
        xml.push('\n');
    }
    xml.push_str("</DrawingDecorator>");
    xml
}

fn render_op(op: &DrawOp) -> String {
    match op {
        DrawOp::FillRegion { shape, material } => format!(
            "<DrawCuboid x1=\"{}\" y1=\"{}\" z1=\"{}\" x2=\"{}\" y2=\"{}\" z2=\"{}\" type=\"{}\"/>",
            shape.x1,
            shape.y1,
            shape.z1,
            shape.x2,
            shape.y2,
            shape.z2,
            material.block_type()
        ),
        DrawOp::PlaceItem { cell, material } => format!(
            "<DrawBlock x=\"{}\" y=\"{}\" z=\"{}\" type=\"{}\"/>",
            cell.column(),
            PLAY_LEVEL,
            cell.row(),
            material.block_type()
        ),
    }
}

/// Renders a complete mission document for a generated arena.
#[must_use]
pub fn render_mission(
    arena_size: u32,
    ops: &[DrawOp],
    spawns: &[CellCoord],
    settings: &MissionSettings,
) -> String {
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\" ?>\n");
    xml.push_str(&format!(
        "<Mission xmlns=\"{MISSION_NAMESPACE}\" xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">\n"
    ));
    xml.push_str(&format!(
        "<About>\n  <Summary>{}</Summary>\n</About>\n",
        escape(&settings.summary)
    ));

    xml.push_str("<ServerSection>\n<ServerInitialConditions>\n<Time>\n");
    xml.push_str(&format!(
        "  <StartTime>{}</StartTime>\n  <AllowPassageOfTime>false</AllowPassageOfTime>\n",
        settings.start_time
    ));
    xml.push_str("</Time>\n");
    xml.push_str(&format!(
        "<Weather>{}</Weather>\n</ServerInitialConditions>\n",
        escape(&settings.weather)
    ));
    xml.push_str("<ServerHandlers>\n");
    xml.push_str(&format!(
        "<FlatWorldGenerator generatorString=\"{FLAT_WORLD_GENERATOR}\"/>\n"
    ));
    xml.push_str(&render_drawing_decorator(ops));
    xml.push('\n');
    if let Some(limit) = settings.time_limit_ms {
        xml.push_str(&format!(
            "<ServerQuitFromTimeUp description=\"\" timeLimitMs=\"{limit}\"/>\n"
        ));
    }
    xml.push_str("<ServerQuitWhenAnyAgentFinishes/>\n</ServerHandlers>\n</ServerSection>\n");

    for (index, spawn) in spawns.iter().enumerate() {
        xml.push_str(&render_agent(&agent_name(index, settings.seekers), *spawn));
    }

    if settings.observer {
        xml.push_str(&render_observer(arena_size));
    }

    xml.push_str("</Mission>\n");
    xml
}

fn render_agent(name: &str, spawn: CellCoord) -> String {
    format!(
        "<AgentSection mode=\"Survival\">\n\
         <Name>{}</Name>\n\
         <AgentStart>\n  <Placement x=\"{}.5\" y=\"{PLAY_LEVEL}\" z=\"{}.5\"/>\n</AgentStart>\n\
         <AgentHandlers>\n\
         \x20 <ContinuousMovementCommands turnSpeedDegs=\"360\"/>\n\
         \x20 <ChatCommands/>\n\
         \x20 <MissionQuitCommands/>\n\
         \x20 <ObservationFromFullStats/>\n\
         \x20 <ObservationFromRay/>\n\
         \x20 <ObservationFromGrid>\n\
         \x20   <Grid name=\"floorAll\">\n\
         \x20     <min x=\"-2\" y=\"-1\" z=\"-2\"/>\n\
         \x20     <max x=\"2\" y=\"0\" z=\"2\"/>\n\
         \x20   </Grid>\n\
         \x20 </ObservationFromGrid>\n\
         </AgentHandlers>\n\
         </AgentSection>\n",
        escape(name),
        spawn.column(),
        spawn.row(),
    )
}

fn render_observer(arena_size: u32) -> String {
    let centre = f64::from(arena_size) / 2.0;
    let height = OBSERVER_BASE_HEIGHT + arena_size / 3;
    format!(
        "<AgentSection mode=\"Spectator\">\n\
         <Name>TopDownView</Name>\n\
         <AgentStart>\n  <Placement x=\"{centre}\" y=\"{height}\" z=\"{centre}\" pitch=\"90\" yaw=\"180\"/>\n</AgentStart>\n\
         <AgentHandlers>\n\
         \x20 <ObservationFromFullStats/>\n\
         \x20 <ContinuousMovementCommands turnSpeedDegs=\"180\"/>\n\
         </AgentHandlers>\n\
         </AgentSection>\n"
    )
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
