//! Spawnable body templates and the static catalog.
//!
//! A [`BodySpec`] is the immutable recipe for one kind of spawnable object:
//! its shape, material, mass, bounciness and where it may appear. The
//! [`catalog`] builds the default set once at startup; the scheduler only
//! ever reads it.
//!
//! # Shapes
//!
//! | Shape | Parameters |
//! |-------|------------|
//! | [`Shape::Sphere`] | radius |
//! | [`Shape::Box`] | full size per axis, edge chamfer |
//! | [`Shape::Pyramid`] | base width/length, height |
//! | [`Shape::Plane`] | width/length (static geometry only) |
//!
//! Turning a `Shape` into collision geometry is the physics world's job;
//! this crate only describes it.

use crate::error::SpecError;
use glam::{Vec2, Vec3, Vec4};
use rand::Rng;

/// Geometry of a body, tagged by kind with its parameters inline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Sphere centred on the body position.
    Sphere {
        /// Sphere radius.
        radius: f32,
    },
    /// Axis-aligned box with optionally rounded edges.
    Box {
        /// Full extent along each axis.
        size: Vec3,
        /// Edge rounding radius.
        chamfer: f32,
    },
    /// Square-based pyramid, apex up.
    Pyramid {
        /// Base extent along X.
        width: f32,
        /// Apex height.
        height: f32,
        /// Base extent along Z.
        length: f32,
    },
    /// Flat horizontal plane. Used for ground geometry.
    Plane {
        /// Extent along X.
        width: f32,
        /// Extent along Z.
        length: f32,
    },
}

/// The tag of a [`Shape`], without its parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Sphere,
    Box,
    Pyramid,
    Plane,
}

impl Shape {
    /// The unit-ish spawnable shapes used by the default catalog.
    pub const SPAWNABLE: [Shape; 3] = [
        Shape::Sphere { radius: 1.0 },
        Shape::Box {
            size: Vec3::splat(2.0),
            chamfer: 0.1,
        },
        Shape::Pyramid {
            width: 2.0,
            height: 2.0,
            length: 2.0,
        },
    ];

    /// The shape's tag.
    #[inline]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Sphere { .. } => ShapeKind::Sphere,
            Shape::Box { .. } => ShapeKind::Box,
            Shape::Pyramid { .. } => ShapeKind::Pyramid,
            Shape::Plane { .. } => ShapeKind::Plane,
        }
    }
}

impl ShapeKind {
    /// Lowercase name, as used in catalog spec names.
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Sphere => "sphere",
            ShapeKind::Box => "box",
            ShapeKind::Pyramid => "pyramid",
            ShapeKind::Plane => "plane",
        }
    }
}

/// Material presets for spawnable bodies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Material {
    Glass,
    Wood,
    Metal,
}

/// Physical and visual properties of a [`Material`].
///
/// `reflectivity` and `roughness` are passed through untouched for the
/// renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialProps {
    pub mass: f32,
    pub color: Vec4,
    pub reflectivity: f32,
    pub roughness: f32,
}

impl Material {
    /// Every material, in catalog order.
    pub const ALL: [Material; 3] = [Material::Glass, Material::Wood, Material::Metal];

    /// Mass, colour and surface values of the preset.
    pub fn props(&self) -> MaterialProps {
        match self {
            Material::Glass => MaterialProps {
                mass: 0.5,
                color: Vec4::new(0.0, 1.0, 1.0, 0.5),
                reflectivity: 0.5,
                roughness: 0.1,
            },
            Material::Wood => MaterialProps {
                mass: 1.0,
                color: Vec4::new(0.6, 0.4, 0.2, 1.0),
                reflectivity: 0.1,
                roughness: 0.8,
            },
            Material::Metal => MaterialProps {
                mass: 2.0,
                color: Vec4::new(0.5, 0.5, 0.5, 1.0),
                reflectivity: 0.8,
                roughness: 0.2,
            },
        }
    }

    /// Lowercase name, as used in catalog spec names.
    pub fn name(&self) -> &'static str {
        match self {
            Material::Glass => "glass",
            Material::Wood => "wood",
            Material::Metal => "metal",
        }
    }
}

/// Horizontal rectangle (in X/Z) plus a fixed height where bodies appear.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnBounds {
    /// Minimum corner as `(x, z)`.
    min: Vec2,
    /// Maximum corner as `(x, z)`.
    max: Vec2,
    /// Spawn height (Y).
    height: f32,
}

impl SpawnBounds {
    /// Rectangle from `min` to `max` (as `(x, z)`) at `height`.
    ///
    /// Corners and height must be finite, `min <= max` on both axes, and
    /// the extent `max - min` must itself be representable.
    pub fn new(min: Vec2, max: Vec2, height: f32) -> Result<Self, SpecError> {
        if !(min.is_finite() && max.is_finite() && height.is_finite()) {
            return Err(SpecError::NonFiniteBounds);
        }
        if min.x > max.x || min.y > max.y {
            return Err(SpecError::InvertedBounds);
        }
        if !(max - min).is_finite() {
            return Err(SpecError::NonFiniteBounds);
        }
        Ok(Self { min, max, height })
    }

    /// Square of half-size `half_extent` centred on the origin.
    pub fn square(half_extent: f32, height: f32) -> Self {
        let h = half_extent.abs();
        Self {
            min: Vec2::splat(-h),
            max: Vec2::splat(h),
            height,
        }
    }

    /// Minimum corner as `(x, z)`.
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.min
    }

    /// Maximum corner as `(x, z)`.
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.max
    }

    /// Spawn height (Y).
    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Whether `p` lies inside the rectangle at exactly the spawn height.
    pub fn contains(&self, p: Vec3) -> bool {
        p.y == self.height
            && p.x >= self.min.x
            && p.x <= self.max.x
            && p.z >= self.min.y
            && p.z <= self.max.y
    }

    /// Draw a placement: X and Z uniform within the rectangle, Y fixed.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        Vec3::new(
            sample_axis(rng, self.min.x, self.max.x),
            self.height,
            sample_axis(rng, self.min.y, self.max.y),
        )
    }
}

impl Default for SpawnBounds {
    fn default() -> Self {
        Self::square(25.0, 10.0)
    }
}

// Uniform in `[lo, hi]`. Empty, NaN and overflowing spans collapse to `lo`.
fn sample_axis<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    let span = hi - lo;
    if !(lo < hi && span.is_finite()) {
        return lo;
    }
    (lo + span * rng.gen::<f32>()).min(hi)
}

/// Immutable template for a spawnable body.
///
/// # Example
///
/// ```
/// use tumble::{BodySpec, Material, Shape};
///
/// let spec = BodySpec::from_material("heavy-ball", Shape::Sphere { radius: 1.0 }, Material::Metal);
/// assert_eq!(spec.mass(), 2.0);
/// assert!(BodySpec::try_new("bad", Shape::Sphere { radius: 1.0 }, Material::Wood, 0.0, 0.5).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BodySpec {
    name: String,
    shape: Shape,
    material: Material,
    mass: f32,
    restitution: f32,
    color: Vec4,
    spawn_bounds: SpawnBounds,
}

/// Restitution used when a spec does not say otherwise.
pub const DEFAULT_RESTITUTION: f32 = 0.5;

impl BodySpec {
    /// Spec that takes mass and colour from the material preset.
    pub fn from_material(name: impl Into<String>, shape: Shape, material: Material) -> Self {
        let props = material.props();
        Self {
            name: name.into(),
            shape,
            material,
            mass: props.mass,
            restitution: DEFAULT_RESTITUTION,
            color: props.color,
            spawn_bounds: SpawnBounds::default(),
        }
    }

    /// Spec with explicit mass and restitution, checked against the invariants.
    pub fn try_new(
        name: impl Into<String>,
        shape: Shape,
        material: Material,
        mass: f32,
        restitution: f32,
    ) -> Result<Self, SpecError> {
        check_mass(mass)?;
        check_restitution(restitution)?;
        Ok(Self {
            mass,
            restitution,
            ..Self::from_material(name, shape, material)
        })
    }

    /// Override the material colour.
    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = color;
        self
    }

    /// Spawn inside `bounds` instead of the default square.
    pub fn with_spawn_bounds(mut self, bounds: SpawnBounds) -> Self {
        self.spawn_bounds = bounds;
        self
    }

    /// Spec name, also the label of every body spawned from it.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Geometry with its parameters.
    #[inline]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Geometry tag.
    #[inline]
    pub fn shape_kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// Material preset.
    #[inline]
    pub fn material(&self) -> Material {
        self.material
    }

    /// Mass, always positive.
    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Bounciness in `[0, 1]`.
    #[inline]
    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    /// RGBA colour used when colours are not randomised.
    #[inline]
    pub fn color(&self) -> Vec4 {
        self.color
    }

    /// Where instances appear.
    #[inline]
    pub fn spawn_bounds(&self) -> &SpawnBounds {
        &self.spawn_bounds
    }

    /// Describe a dynamic instance of this spec at `position`.
    pub fn instantiate(&self, position: Vec3, color: Vec4) -> BodyDesc {
        BodyDesc {
            shape: self.shape,
            kind: BodyKind::Dynamic,
            mass: self.mass,
            restitution: self.restitution,
            friction: DEFAULT_FRICTION,
            color,
            material: Some(self.material),
            position,
        }
    }
}

fn check_mass(mass: f32) -> Result<(), SpecError> {
    if mass.is_finite() && mass > 0.0 {
        Ok(())
    } else {
        Err(SpecError::NonPositiveMass(mass))
    }
}

fn check_restitution(restitution: f32) -> Result<(), SpecError> {
    if (0.0..=1.0).contains(&restitution) {
        Ok(())
    } else {
        Err(SpecError::RestitutionOutOfRange(restitution))
    }
}

/// The default spawn catalog: every spawnable shape in every material.
///
/// Order is shape-major and stable across calls.
pub fn catalog() -> Vec<BodySpec> {
    Shape::SPAWNABLE
        .iter()
        .flat_map(|shape| {
            Material::ALL.iter().map(move |material| {
                let name = format!("{}-{}", material.name(), shape.kind().name());
                BodySpec::from_material(name, *shape, *material)
            })
        })
        .collect()
}

/// Whether the world should simulate a body or treat it as fixed geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Static,
    Dynamic,
}

/// Friction applied when nothing more specific is configured.
pub const DEFAULT_FRICTION: f32 = 0.5;

/// Everything a [`PhysicsWorld`](crate::PhysicsWorld) needs to create a body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyDesc {
    pub shape: Shape,
    pub kind: BodyKind,
    /// Ignored for static bodies.
    pub mass: f32,
    pub restitution: f32,
    pub friction: f32,
    pub color: Vec4,
    pub material: Option<Material>,
    pub position: Vec3,
}

impl BodyDesc {
    /// Fixed geometry at `position`.
    pub fn fixed(shape: Shape, position: Vec3, color: Vec4) -> Self {
        Self {
            shape,
            kind: BodyKind::Static,
            mass: 0.0,
            restitution: DEFAULT_RESTITUTION,
            friction: DEFAULT_FRICTION,
            color,
            material: None,
            position,
        }
    }

    /// Whether the world should simulate the body.
    #[inline]
    pub fn is_dynamic(&self) -> bool {
        self.kind == BodyKind::Dynamic
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_catalog_covers_shapes_and_materials() {
        let specs = catalog();
        assert_eq!(specs.len(), 9);
        for kind in [ShapeKind::Sphere, ShapeKind::Box, ShapeKind::Pyramid] {
            assert_eq!(specs.iter().filter(|s| s.shape_kind() == kind).count(), 3);
        }
        assert_eq!(specs[0].name(), "glass-sphere");
        assert_eq!(specs[8].name(), "metal-pyramid");
    }

    #[test]
    fn test_catalog_specs_hold_invariants() {
        for spec in catalog() {
            assert!(spec.mass() > 0.0);
            assert!((0.0..=1.0).contains(&spec.restitution()));
        }
    }

    #[test]
    fn test_material_masses() {
        assert_eq!(Material::Glass.props().mass, 0.5);
        assert_eq!(Material::Wood.props().mass, 1.0);
        assert_eq!(Material::Metal.props().mass, 2.0);
    }

    #[test]
    fn test_try_new_rejects_bad_values() {
        let sphere = Shape::Sphere { radius: 1.0 };
        assert_eq!(
            BodySpec::try_new("a", sphere, Material::Wood, -1.0, 0.5),
            Err(SpecError::NonPositiveMass(-1.0))
        );
        assert!(BodySpec::try_new("b", sphere, Material::Wood, f32::NAN, 0.5).is_err());
        assert_eq!(
            BodySpec::try_new("c", sphere, Material::Wood, 1.0, 1.5),
            Err(SpecError::RestitutionOutOfRange(1.5))
        );
        let ok = BodySpec::try_new("d", sphere, Material::Wood, 3.0, 1.0).unwrap();
        assert_eq!(ok.mass(), 3.0);
        assert_eq!(ok.restitution(), 1.0);
    }

    #[test]
    fn test_spawn_bounds_sampling() {
        let bounds = SpawnBounds::square(25.0, 10.0);
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..200 {
            assert!(bounds.contains(bounds.sample(&mut rng)));
        }
    }

    #[test]
    fn test_degenerate_bounds_sample_to_corner() {
        let bounds = SpawnBounds::new(Vec2::new(1.0, -2.0), Vec2::new(1.0, -2.0), 3.0).unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(bounds.sample(&mut rng), Vec3::new(1.0, 3.0, -2.0));
    }

    #[test]
    fn test_unrepresentable_bounds_rejected() {
        let huge = SpawnBounds::new(Vec2::splat(-f32::MAX), Vec2::splat(f32::MAX), 10.0);
        assert_eq!(huge, Err(SpecError::NonFiniteBounds));

        let infinite = SpawnBounds::new(Vec2::splat(f32::NEG_INFINITY), Vec2::ZERO, 10.0);
        assert_eq!(infinite, Err(SpecError::NonFiniteBounds));

        let nan = SpawnBounds::new(Vec2::new(f32::NAN, 0.0), Vec2::ONE, 10.0);
        assert_eq!(nan, Err(SpecError::NonFiniteBounds));

        assert_eq!(
            SpawnBounds::new(Vec2::ZERO, Vec2::ONE, f32::INFINITY),
            Err(SpecError::NonFiniteBounds)
        );
        let quarter = Vec2::splat(f32::MAX / 4.0);
        assert!(SpawnBounds::new(-quarter, quarter, 0.0).is_ok());
    }

    #[test]
    fn test_overflowing_square_samples_without_panic() {
        // `square` skips validation, so sampling must cope on its own.
        let bounds = SpawnBounds::square(f32::MAX, 10.0);
        let mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..20 {
            let p = bounds.sample(&mut rng);
            assert_eq!(p, Vec3::new(-f32::MAX, 10.0, -f32::MAX));
        }

        let wide = SpawnBounds::square(f32::MAX / 4.0, 10.0);
        for _ in 0..20 {
            assert!(wide.contains(wide.sample(&mut rng)));
        }
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        assert_eq!(
            SpawnBounds::new(Vec2::ONE, Vec2::ZERO, 0.0),
            Err(SpecError::InvertedBounds)
        );
    }

    #[test]
    fn test_instantiate_is_dynamic() {
        let spec = BodySpec::from_material("w", Shape::Sphere { radius: 1.0 }, Material::Wood);
        let desc = spec.instantiate(Vec3::Y, spec.color());
        assert!(desc.is_dynamic());
        assert_eq!(desc.mass, 1.0);
        assert_eq!(desc.material, Some(Material::Wood));
    }
}
