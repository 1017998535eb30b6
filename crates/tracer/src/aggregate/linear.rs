use crate::{
    ray::Ray,
    scene::{Geometry, Intersect},
};

use super::Aggregate;

/// Tests every instance, shrinking the ray to the closest hit found so far
#[derive(Debug, Default, Clone, Copy)]
pub struct LinearScan;

impl Aggregate for LinearScan {
    fn hit<'a>(&self, geometry: &'a Geometry, ray: &Ray) -> Option<Intersect<'a>> {
        let mut ray = *ray;
        let mut closest = None;
        for id in geometry.instance_ids() {
            if let Some(hit) = geometry.intersect_instance(id, &ray) {
                ray.bounds.1 = hit.t;
                closest = Some(hit);
            }
        }
        closest
    }
}
