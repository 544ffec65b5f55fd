use hideseek_core::{CellCoord, Cuboid, DrawOp, LayoutRequest, Material};
use hideseek_mission::{render_drawing_decorator, render_mission, MissionSettings};
use hideseek_system_layout::generate_layout;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn drawing_elements(xml: &str) -> Vec<&str> {
    xml.lines()
        .map(str::trim)
        .filter(|line| line.starts_with("<DrawCuboid") || line.starts_with("<DrawBlock"))
        .collect()
}

#[test]
fn mission_draws_every_operation_in_order() {
    let request = LayoutRequest::default();
    let mut rng = ChaCha8Rng::seed_from_u64(31);
    let layout = generate_layout(&request, &mut rng).expect("layout");

    let xml = render_mission(
        request.arena_size,
        layout.draw_ops(),
        layout.agent_spawns(),
        &MissionSettings::default(),
    );
    let elements = drawing_elements(&xml);

    assert_eq!(elements.len(), layout.draw_ops().len());
    for (element, op) in elements.iter().zip(layout.draw_ops()) {
        match op {
            DrawOp::FillRegion { material, .. } => {
                assert!(element.starts_with("<DrawCuboid"));
                assert!(element.contains(&format!("type=\"{}\"", material.block_type())));
            }
            DrawOp::PlaceItem { cell, material } => {
                assert!(element.starts_with("<DrawBlock"));
                assert!(element.contains(&format!("x=\"{}\"", cell.column())));
                assert!(element.contains(&format!("z=\"{}\"", cell.row())));
                assert!(element.contains(&format!("type=\"{}\"", material.block_type())));
            }
        }
    }
    assert!(elements[0].contains("type=\"grass\""));
}

#[test]
fn mission_declares_one_agent_per_spawn() {
    let spawns = [CellCoord::new(1, 2), CellCoord::new(7, 8), CellCoord::new(4, 0)];
    let settings = MissionSettings {
        seekers: 1,
        ..MissionSettings::default()
    };
    let xml = render_mission(10, &[], &spawns, &settings);

    assert_eq!(xml.matches("<AgentSection mode=\"Survival\">").count(), 3);
    assert_eq!(xml.matches("<AgentSection mode=\"Spectator\">").count(), 1);
    assert!(xml.contains("<Name>Seeker 1</Name>"));
    assert!(xml.contains("<Name>Hider 1</Name>"));
    assert!(xml.contains("<Name>Hider 2</Name>"));
    assert!(xml.contains("<Placement x=\"2.5\" y=\"2\" z=\"1.5\"/>"));
    assert!(xml.contains("<Placement x=\"8.5\" y=\"2\" z=\"7.5\"/>"));

    let seeker = xml.find("Seeker 1").expect("seeker section");
    let hider = xml.find("Hider 1").expect("hider section");
    assert!(seeker < hider);
}

#[test]
fn settings_shape_the_server_section() {
    let settings: MissionSettings = toml::from_str(
        r#"
        summary = "Night & Day"
        start_time = 18000
        observer = false
        "#,
    )
    .expect("settings parse");
    assert_eq!(settings.weather, "clear");
    assert_eq!(settings.time_limit_ms, Some(50_000));

    let xml = render_mission(8, &[], &[], &settings);
    assert!(xml.contains("<Summary>Night &amp; Day</Summary>"));
    assert!(xml.contains("<StartTime>18000</StartTime>"));
    assert!(xml.contains("timeLimitMs=\"50000\""));
    assert!(xml.contains("<FlatWorldGenerator generatorString=\"3;7,2;1;\"/>"));
    assert!(!xml.contains("Spectator"));
    assert!(xml.trim_end().ends_with("</Mission>"));
}

#[test]
fn untimed_missions_only_quit_when_an_agent_finishes() {
    let settings = MissionSettings {
        time_limit_ms: None,
        ..MissionSettings::default()
    };
    let xml = render_mission(8, &[], &[], &settings);
    assert!(!xml.contains("ServerQuitFromTimeUp"));
    assert!(xml.contains("<ServerQuitWhenAnyAgentFinishes/>"));
}

#[test]
fn decorator_wraps_operations() {
    let ops = [
        DrawOp::FillRegion {
            shape: Cuboid::spanning(0..=3, 1..=1, 0..=3),
            material: Material::IronBlock,
        },
        DrawOp::PlaceItem {
            cell: CellCoord::new(2, 1),
            material: Material::Planks,
        },
    ];
    let xml = render_drawing_decorator(&ops);
    let lines: Vec<&str> = xml.lines().map(str::trim).collect();
    assert_eq!(
        lines,
        vec![
            "<DrawingDecorator>",
            "<DrawCuboid x1=\"0\" y1=\"1\" z1=\"0\" x2=\"3\" y2=\"1\" z2=\"3\" type=\"iron_block\"/>",
            "<DrawBlock x=\"1\" y=\"2\" z=\"2\" type=\"planks\"/>",
            "</DrawingDecorator>",
        ]
    );
}
