//! Scene layouts: fixed geometry plus the bodies present at (re)start.
//!
//! | Layout | Fixtures | Initial bodies | Spawning |
//! |--------|----------|----------------|----------|
//! | [`SceneLayout::FallingShapes`] | 60×60 ground plane at y = -5 | none | on |
//! | [`SceneLayout::BouncingSpheres`] | floor at y = 0 | three spheres of differing mass/bounce | off |
//! | [`SceneLayout::FluidTank`] | five-walled open tank | 200 small particle spheres | off |

use crate::body::{BodyDesc, BodyKind, Shape};
use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Which scene to build.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum SceneLayout {
    #[default]
    FallingShapes,
    BouncingSpheres,
    FluidTank,
}

/// One body placed by a layout.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutBody {
    pub label: String,
    pub desc: BodyDesc,
}

impl LayoutBody {
    fn new(label: impl Into<String>, desc: BodyDesc) -> Self {
        Self {
            label: label.into(),
            desc,
        }
    }
}

const FLUID_PARTICLES: usize = 200;
const FLUID_COLUMNS: usize = 10;
const FLUID_SPACING: f32 = 0.2;
const FLUID_RADIUS: f32 = 0.1;

impl SceneLayout {
    /// Kebab-case name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            SceneLayout::FallingShapes => "falling-shapes",
            SceneLayout::BouncingSpheres => "bouncing-spheres",
            SceneLayout::FluidTank => "fluid-tank",
        }
    }

    /// Whether the timed spawner runs in this scene unless configured otherwise.
    pub fn spawns_by_default(&self) -> bool {
        matches!(self, SceneLayout::FallingShapes)
    }

    /// Everything the layout places, fixtures first.
    pub fn bodies(&self) -> Vec<LayoutBody> {
        match self {
            SceneLayout::FallingShapes => falling_shapes(),
            SceneLayout::BouncingSpheres => bouncing_spheres(),
            SceneLayout::FluidTank => fluid_tank(),
        }
    }
}

fn falling_shapes() -> Vec<LayoutBody> {
    vec![LayoutBody::new(
        "ground",
        BodyDesc::fixed(
            Shape::Plane {
                width: 60.0,
                length: 60.0,
            },
            Vec3::new(0.0, -5.0, 0.0),
            Vec4::new(0.6, 0.4, 0.2, 1.0),
        ),
    )]
}

fn bouncing_spheres() -> Vec<LayoutBody> {
    let floor = LayoutBody::new(
        "floor",
        BodyDesc::fixed(
            Shape::Plane {
                width: 100.0,
                length: 100.0,
            },
            Vec3::ZERO,
            Vec4::new(0.5, 0.5, 0.5, 1.0),
        ),
    );

    // (label, x, colour, mass, restitution)
    let spheres = [
        ("red-sphere", -2.0, Vec4::new(1.0, 0.0, 0.0, 1.0), 1.0, 0.9),
        ("blue-sphere", 0.0, Vec4::new(0.0, 0.0, 1.0, 1.0), 2.0, 0.7),
        ("green-sphere", 2.0, Vec4::new(0.0, 1.0, 0.0, 1.0), 5.0, 0.3),
    ];

    std::iter::once(floor)
        .chain(spheres.into_iter().map(|(label, x, color, mass, restitution)| {
            LayoutBody::new(
                label,
                BodyDesc {
                    shape: Shape::Sphere { radius: 0.5 },
                    kind: BodyKind::Dynamic,
                    mass,
                    restitution,
                    friction: 0.5,
                    color,
                    material: None,
                    position: Vec3::new(x, 5.0, 0.0),
                },
            )
        }))
        .collect()
}

fn fluid_tank() -> Vec<LayoutBody> {
    let (w, h, l, t) = (5.0_f32, 3.0_f32, 2.0_f32, 0.1_f32);
    let lowered = h / 2.0 - 3.5;
    let glass = Vec4::new(1.0, 1.0, 1.0, 0.1);

    let walls = [
        ("tank-bottom", Vec3::new(w, t, l), Vec3::new(0.0, -h, 0.0)),
        ("tank-back", Vec3::new(w, h, t), Vec3::new(0.0, -h / 2.0, -l / 2.0)),
        ("tank-front", Vec3::new(w, h, t), Vec3::new(0.0, -h / 2.0, l / 2.0)),
        ("tank-left", Vec3::new(t, h, l), Vec3::new(-w / 2.0, -h / 2.0, 0.0)),
        ("tank-right", Vec3::new(t, h, l), Vec3::new(w / 2.0, -h / 2.0, 0.0)),
    ];

    let mut bodies: Vec<LayoutBody> = walls
        .into_iter()
        .map(|(label, size, position)| {
            let mut desc = BodyDesc::fixed(
                Shape::Box { size, chamfer: 0.0 },
                position + Vec3::new(0.0, lowered, 0.0),
                glass,
            );
            desc.restitution = 0.0;
            desc.friction = 0.5;
            LayoutBody::new(label, desc)
        })
        .collect();

    bodies.extend((0..FLUID_PARTICLES).map(|i| {
        let row = (i / FLUID_COLUMNS) as f32;
        let col = (i % FLUID_COLUMNS) as f32;
        LayoutBody::new(
            format!("fluid-{}", i),
            BodyDesc {
                shape: Shape::Sphere {
                    radius: FLUID_RADIUS,
                },
                kind: BodyKind::Dynamic,
                mass: 0.1,
                restitution: 0.0,
                friction: 0.3,
                color: Vec4::new(0.2, 0.5, 1.0, 0.8),
                material: None,
                position: Vec3::new(col * FLUID_SPACING - 1.0, row * FLUID_SPACING + 4.0, 0.0),
            },
        )
    }));

    bodies
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(layout: SceneLayout) -> (usize, usize) {
        let bodies = layout.bodies();
        let dynamic = bodies.iter().filter(|b| b.desc.is_dynamic()).count();
        (bodies.len() - dynamic, dynamic)
    }

    #[test]
    fn test_layout_body_counts() {
        assert_eq!(counts(SceneLayout::FallingShapes), (1, 0));
        assert_eq!(counts(SceneLayout::BouncingSpheres), (1, 3));
        assert_eq!(counts(SceneLayout::FluidTank), (5, 200));
    }

    #[test]
    fn test_fixtures_come_first() {
        for layout in [
            SceneLayout::FallingShapes,
            SceneLayout::BouncingSpheres,
            SceneLayout::FluidTank,
        ] {
            let bodies = layout.bodies();
            let first_dynamic = bodies.iter().position(|b| b.desc.is_dynamic());
            if let Some(i) = first_dynamic {
                assert!(bodies[i..].iter().all(|b| b.desc.is_dynamic()));
            }
        }
    }

    #[test]
    fn test_sphere_presets() {
        let bodies = SceneLayout::BouncingSpheres.bodies();
        let green = bodies.iter().find(|b| b.label == "green-sphere").unwrap();
        assert_eq!(green.desc.mass, 5.0);
        assert_eq!(green.desc.restitution, 0.3);
        assert_eq!(green.desc.position, Vec3::new(2.0, 5.0, 0.0));
    }

    #[test]
    fn test_fluid_grid() {
        let bodies = SceneLayout::FluidTank.bodies();
        let last = bodies.last().unwrap();
        assert_eq!(last.label, "fluid-199");
        // Row 19, column 9.
        assert!((last.desc.position.x - 0.8).abs() < 1e-5);
        assert!((last.desc.position.y - 7.8).abs() < 1e-5);

        let bottom = &bodies[0];
        assert_eq!(bottom.label, "tank-bottom");
        assert!((bottom.desc.position.y - -5.0).abs() < 1e-5);
    }

    #[test]
    fn test_only_falling_shapes_spawns() {
        assert!(SceneLayout::FallingShapes.spawns_by_default());
        assert!(!SceneLayout::BouncingSpheres.spawns_by_default());
        assert!(!SceneLayout::FluidTank.spawns_by_default());
    }
}
