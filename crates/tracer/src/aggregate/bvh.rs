use std::cmp::Ordering;

use crate::{
    math::{bounds::Bounds, point::Point},
    ray::Ray,
    scene::{Geometry, InstanceId, Intersect},
};

use super::Aggregate;

/// Bounding volume hierarchy over the instances of a scene.
///
/// Built top down: the centroids of a node's instances are split at the middle of their own
/// bounding box, along its longest side. If every centroid falls on the same side of that
/// plane, the instances are split in two halves by centroid instead, so the recursion always
/// terminates.
#[derive(Debug)]
pub struct Bvh {
    root: Option<BvhNode>,
    node_count: usize,
}

#[derive(Debug)]
struct BvhNode {
    bounds: Bounds,
    primitives: Vec<InstanceId>,
    children: Option<Box<(BvhNode, BvhNode)>>,
}

struct Entry {
    id: InstanceId,
    bounds: Bounds,
    centroid: Point,
}

impl Bvh {
    pub fn build(geometry: &Geometry, leaf_threshold: usize) -> Self {
        let entries: Vec<Entry> = geometry
            .instance_ids()
            .map(|id| {
                let bounds = geometry.instance_bounds(id);
                Entry {
                    id,
                    bounds,
                    centroid: bounds.centroid(),
                }
            })
            .collect();

        if entries.is_empty() {
            return Self {
                root: None,
                node_count: 0,
            };
        }

        let mut node_count = 0;
        let root = BvhNode::build(entries, leaf_threshold.max(1), &mut node_count);
        log::debug!("BVH built with {node_count} nodes");
        Self {
            root: Some(root),
            node_count,
        }
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn bounds(&self) -> Bounds {
        self.root.as_ref().map_or(Bounds::EMPTY, |root| root.bounds)
    }
}

impl BvhNode {
    fn build(entries: Vec<Entry>, leaf_threshold: usize, node_count: &mut usize) -> Self {
        *node_count += 1;
        let bounds = entries
            .iter()
            .fold(Bounds::EMPTY, |acc, e| acc.union(&e.bounds));

        if entries.len() <= leaf_threshold {
            return Self {
                bounds,
                primitives: entries.into_iter().map(|e| e.id).collect(),
                children: None,
            };
        }

        let centroids = entries
            .iter()
            .fold(Bounds::EMPTY, |acc, e| acc.grow(e.centroid));
        let axis = centroids.dominant_axis();
        let middle = centroids.centroid().vec()[axis];
        let (mut left, mut right): (Vec<_>, Vec<_>) = entries
            .into_iter()
            .partition(|e| e.centroid.vec()[axis] < middle);

        if left.is_empty() || right.is_empty() {
            let mut all = if left.is_empty() { right } else { left };
            all.sort_by(|a, b| {
                a.centroid.vec()[axis]
                    .partial_cmp(&b.centroid.vec()[axis])
                    .unwrap_or(Ordering::Equal)
            });
            right = all.split_off(all.len() / 2);
            left = all;
        }

        Self {
            bounds,
            primitives: Vec::new(),
            children: Some(Box::new((
                Self::build(left, leaf_threshold, node_count),
                Self::build(right, leaf_threshold, node_count),
            ))),
        }
    }

    fn hit<'a>(&self, geometry: &'a Geometry, ray: &mut Ray, closest: &mut Option<Intersect<'a>>) {
        if !self.bounds.hit(ray) {
            return;
        }

        for &id in &self.primitives {
            if let Some(hit) = geometry.intersect_instance(id, ray) {
                ray.bounds.1 = hit.t;
                *closest = Some(hit);
            }
        }

        if let Some(children) = &self.children {
            children.0.hit(geometry, ray, closest);
            children.1.hit(geometry, ray, closest);
        }
    }
}

impl Aggregate for Bvh {
    fn hit<'a>(&self, geometry: &'a Geometry, ray: &Ray) -> Option<Intersect<'a>> {
        let root = self.root.as_ref()?;
        let mut ray = *ray;
        let mut closest = None;
        root.hit(geometry, &mut ray, &mut closest);
        closest
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use rand::{distributions::Uniform, prelude::Distribution, SeedableRng};

    use super::Bvh;
    use crate::{
        aggregate::{Accelerator, Aggregate, LinearScan},
        color::linear,
        material::Diffuse,
        math::{axis::Axis, distributions::UniformUnitBall3, point::Point},
        ray::Ray,
        scene::{PrimitiveInstance, Scene, SceneBuilder},
        shape::{Cuboid, Disc, Sphere},
        Rng,
    };

    fn random_scene(rng: &mut Rng, n: usize, accelerator: Accelerator) -> Scene {
        let mut builder = SceneBuilder::new();
        let material = builder.insert_material(None, Diffuse::new(linear::WHITE));
        let small = builder.insert_shape(Sphere::new(0.5));
        let big = builder.insert_shape(Sphere::new(2.0));
        let disc = builder.insert_shape(Disc::new(1.0));
        let cube = builder.insert_shape(Cuboid::new(Vec3::new(0.5, 1.0, 0.2)));
        let shapes = [small, big, disc, cube];

        let coord = Uniform::new(-20.0f32, 20.0);
        let angle = Uniform::new(0.0f32, std::f32::consts::TAU);
        for i in 0..n {
            let origin = Point::new(coord.sample(rng), coord.sample(rng), coord.sample(rng));
            let axis = Axis::euler_zyx(angle.sample(rng), angle.sample(rng), angle.sample(rng), origin);
            builder
                .insert_instance(PrimitiveInstance::new(axis, shapes[i % shapes.len()], material))
                .unwrap();
        }
        builder.build(accelerator).unwrap()
    }

    #[test]
    fn bvh_matches_linear_scan() {
        let scene = random_scene(&mut Rng::seed_from_u64(42), 300, Accelerator::Linear);
        let geometry = scene.geometry();
        let bvh = Bvh::build(geometry, 4);

        let mut rng = Rng::seed_from_u64(1);
        let coord = Uniform::new(-30.0f32, 30.0);
        let mut hits = 0;
        for _ in 0..2000 {
            let origin = Point::new(coord.sample(&mut rng), coord.sample(&mut rng), coord.sample(&mut rng));
            let direction = UniformUnitBall3.sample(&mut rng);
            if direction.length() < 1e-3 {
                continue;
            }
            let ray = Ray::new(origin, direction);

            match (LinearScan.hit(geometry, &ray), bvh.hit(geometry, &ray)) {
                (None, None) => {}
                (Some(a), Some(b)) => {
                    hits += 1;
                    assert_eq!(a.t, b.t);
                    assert!(std::ptr::eq(a.instance, b.instance));
                }
                (a, b) => panic!("linear: {:?}, bvh: {:?}", a.map(|h| h.t), b.map(|h| h.t)),
            }
        }
        assert!(hits > 100, "only {hits} rays hit something");
    }

    #[test]
    fn shrunk_ray_skips_far_hits() {
        let scene = random_scene(&mut Rng::seed_from_u64(5), 50, Accelerator::default());
        let ray = Ray::new_with_range(Point::new(0.0, 0.0, -100.0), Vec3::Z, 0.0..1.0);
        assert!(scene.hit(&ray).is_none());
    }

    #[test]
    fn split_follows_the_centroids() {
        let mut builder = SceneBuilder::new();
        let material = builder.insert_material(None, Diffuse::new(linear::WHITE));
        let giant = builder.insert_shape(Sphere::new(100.0));
        let small = builder.insert_shape(Sphere::new(0.1));
        builder
            .insert_instance(PrimitiveInstance::new(Axis::IDENTITY, giant, material))
            .unwrap();
        for x in [1.0, 2.0, 3.0, 10.0] {
            builder
                .insert_instance(PrimitiveInstance::new(
                    Axis::translation(Point::new(x, 0.0, 0.0)),
                    small,
                    material,
                ))
                .unwrap();
        }
        let scene = builder.build(Accelerator::Linear).unwrap();

        // Centroids span [0; 10] on x: the cut at 5 leaves the one at 10 alone. Cutting at the
        // middle of the giant sphere's box would have needed the object median (2 + 3).
        let bvh = Bvh::build(scene.geometry(), 4);
        let root = bvh.root.as_ref().unwrap();
        let (left, right) = root.children.as_deref().unwrap();
        assert_eq!(left.primitives.len(), 4);
        assert_eq!(right.primitives.len(), 1);
        assert_eq!(bvh.node_count(), 3);
    }

    #[test]
    fn tree_structure() {
        let mut builder = SceneBuilder::new();
        let material = builder.insert_material(None, Diffuse::new(linear::WHITE));
        let sphere = builder.insert_shape(Sphere::new(1.0));
        // everything at the same place: spatial split is impossible
        for _ in 0..10 {
            builder
                .insert_instance(PrimitiveInstance::new(Axis::IDENTITY, sphere, material))
                .unwrap();
        }
        let scene = builder.build(Accelerator::Linear).unwrap();

        let bvh = Bvh::build(scene.geometry(), 2);
        // 10 -> 5 + 5 -> (2 + 3) * 2 -> 3 splits into 1 + 2
        assert_eq!(bvh.node_count(), 1 + 2 + 4 + 4);
        assert!(bvh.bounds().contains(Point::new(1.0, 0.0, 0.0)));
        assert!(bvh
            .hit(scene.geometry(), &Ray::new(Point::new(0.0, 0.0, -5.0), Vec3::Z))
            .is_some());
    }
}
