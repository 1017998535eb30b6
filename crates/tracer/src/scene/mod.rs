//! The scene: primitive instances, the materials they share and the background.
//!
//! A scene goes through two states. A [`SceneBuilder`] collects shapes, materials and
//! instances; [`SceneBuilder::build`] consumes it, builds the spatial index and returns an
//! immutable [`Scene`] that any number of threads may query at once. There is no way to add
//! anything to a built scene, nor to query one that isn't built.

use glam::Vec3;

use crate::{
    aggregate::{Accelerator, Aggregate},
    color::{linear, Rgb},
    error::ConfigError,
    material::{Material, MaterialDescriptor, MaterialId},
    math::{axis::Axis, bounds::Bounds, point::Point},
    ray::Ray,
    shape::{Shape, ShapeId, Uv},
};

/// Margin added around instance bounds, so that flat shapes still enclose some volume
pub const BOUNDS_PADDING: f32 = 1e-4;

/// A shape placed in the world with a material
#[derive(Debug, Clone)]
pub struct PrimitiveInstance {
    pub axis: Axis,
    pub shape: ShapeId,
    pub material: MaterialId,
    pub label: Option<String>,
}

impl PrimitiveInstance {
    pub fn new(axis: Axis, shape: ShapeId, material: MaterialId) -> Self {
        Self {
            axis,
            shape,
            material,
            label: None,
        }
    }

    pub fn with_label(self, label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(pub usize);

/// A ray hitting an instance, expressed in that instance's local frame
#[derive(Debug, Clone, Copy)]
pub struct Intersect<'a> {
    pub t: f32,
    pub position: Point,
    /// Unit normal, on the side the ray came from
    pub normal: Vec3,
    pub uv: Uv,
    /// The incoming ray, in the local frame
    pub ray: Ray,
    /// The ray hit the back of the surface, i.e. it was travelling inside the shape
    pub inside: bool,
    pub instance: &'a PrimitiveInstance,
}

impl<'a> Intersect<'a> {
    pub fn axis(&self) -> &'a Axis {
        &self.instance.axis
    }

    pub fn world_position(&self) -> Point {
        self.axis().transform_from(self.position)
    }
}

/// Shapes and the instances placing them, without any acceleration structure
#[derive(Default)]
pub struct Geometry {
    shapes: Vec<Box<dyn Shape>>,
    instances: Vec<PrimitiveInstance>,
}

impl Geometry {
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn instance_ids(&self) -> impl Iterator<Item = InstanceId> {
        (0..self.instances.len()).map(InstanceId)
    }

    pub fn instance(&self, id: InstanceId) -> &PrimitiveInstance {
        &self.instances[id.0]
    }

    /// World space bounding box of an instance, slightly padded
    pub fn instance_bounds(&self, id: InstanceId) -> Bounds {
        let instance = self.instance(id);
        instance
            .axis
            .bounds_from(&self.shapes[instance.shape.0].bounds())
            .padded(BOUNDS_PADDING)
    }

    /// Test a single instance. `ray` is in world space.
    pub fn intersect_instance(&self, id: InstanceId, ray: &Ray) -> Option<Intersect<'_>> {
        let instance = self.instance(id);
        let local = instance.axis.ray_to(ray);
        let hit = self.shapes[instance.shape.0].intersect(&local)?;

        let inside = local.direction.dot(hit.normal) > 0.0;
        Some(Intersect {
            t: hit.t,
            position: hit.position,
            normal: if inside { -hit.normal } else { hit.normal },
            uv: hit.uv,
            ray: local,
            inside,
            instance,
        })
    }
}

/// What a ray that hits nothing sees
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Background {
    Constant(Rgb),
    /// Vertical blend, from `horizon` for rays going down to `zenith` for rays going up
    Gradient { horizon: Rgb, zenith: Rgb },
}

impl Default for Background {
    fn default() -> Self {
        Background::Constant(linear::GREY)
    }
}

impl Background {
    pub fn color(&self, ray: &Ray) -> Rgb {
        match *self {
            Background::Constant(c) => c,
            Background::Gradient { horizon, zenith } => {
                let a = 0.5 * (ray.direction.y.clamp(-1.0, 1.0) + 1.0);
                (1.0 - a) * horizon + a * zenith
            }
        }
    }
}

#[derive(Default)]
pub struct SceneBuilder {
    geometry: Geometry,
    materials: Vec<MaterialDescriptor>,
    background: Background,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a material and returns the Material ID associated with this material
    pub fn insert_material<M: Material + 'static>(
        &mut self,
        label: Option<String>,
        material: M,
    ) -> MaterialId {
        self.materials.push(MaterialDescriptor {
            label,
            material: Box::new(material),
        });
        MaterialId(self.materials.len() - 1)
    }

    pub fn insert_shape<S: Shape + 'static>(&mut self, shape: S) -> ShapeId {
        self.geometry.shapes.push(Box::new(shape));
        ShapeId(self.geometry.shapes.len() - 1)
    }

    pub fn insert_instance(
        &mut self,
        instance: PrimitiveInstance,
    ) -> Result<InstanceId, ConfigError> {
        if instance.material.0 >= self.materials.len() {
            return Err(ConfigError::UnknownMaterial(instance.material));
        }
        if instance.shape.0 >= self.geometry.shapes.len() {
            return Err(ConfigError::UnknownShape(instance.shape));
        }
        self.geometry.instances.push(instance);
        Ok(InstanceId(self.geometry.instances.len() - 1))
    }

    pub fn with_background(self, background: Background) -> Self {
        Self { background, ..self }
    }

    /// Freeze the scene and build its spatial index
    pub fn build(self, accelerator: Accelerator) -> Result<Scene, ConfigError> {
        log::info!(
            "Building scene: {} instances, {} shapes, {} materials, {accelerator}",
            self.geometry.instance_count(),
            self.geometry.shapes.len(),
            self.materials.len(),
        );
        let index = accelerator.build(&self.geometry)?;

        Ok(Scene {
            geometry: self.geometry,
            materials: self.materials,
            background: self.background,
            accelerator,
            index,
        })
    }
}

pub struct Scene {
    geometry: Geometry,
    materials: Vec<MaterialDescriptor>,
    background: Background,
    accelerator: Accelerator,
    index: Box<dyn Aggregate>,
}

impl Scene {
    /// Closest hit along `ray`, within its bounds
    pub fn hit(&self, ray: &Ray) -> Option<Intersect<'_>> {
        self.index.hit(&self.geometry, ray)
    }

    pub fn miss_color(&self, ray: &Ray) -> Rgb {
        self.background.color(ray)
    }

    pub fn material(&self, id: MaterialId) -> &dyn Material {
        &*self.materials[id.0].material
    }

    pub fn instance_count(&self) -> usize {
        self.geometry.instance_count()
    }

    pub fn accelerator(&self) -> Accelerator {
        self.accelerator
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }
}
