//! Demo scenes.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use itertools::iproduct;
use tracer::{
    camera::SimpleCamera,
    color::{linear, Rgb},
    error::ConfigError,
    material::{texture::Mandelbrot, Diffuse, Glass, Light, Metal, SurfaceNormal},
    math::{axis::Axis, point::Point},
    scene::{Background, PrimitiveInstance, SceneBuilder},
    shape::{
        marched::{DisplacedSphere, Mandelbulb, SdfRoundBox, SdfTorus},
        Cuboid, Disc, Marched, Rectangle, Sphere,
    },
};

use crate::cli::AvailableScene;

/// A scene ready to be built, and the camera looking at it
pub struct DemoScene {
    pub builder: SceneBuilder,
    pub camera: SimpleCamera,
}

impl AvailableScene {
    pub fn create(self) -> Result<DemoScene, ConfigError> {
        match self {
            AvailableScene::Ring => ring(),
            AvailableScene::Marched => marched(),
            AvailableScene::Normals => normals(),
        }
    }
}

fn default_camera() -> SimpleCamera {
    SimpleCamera::new(
        Point::new(0.0, 60.0, 200.0),
        Vec3::Y,
        Point::new(0.0, 5.0, 0.0),
        60.0,
        1.5,
        120.0,
    )
}

/// 200 spheres on a wavy ring, sharing three shapes, lit from above
fn ring() -> Result<DemoScene, ConfigError> {
    let mut scene = SceneBuilder::new();

    let materials = [
        scene.insert_material(Some("Red".into()), Diffuse::new(Rgb::from_array([0.9, 0.1, 0.1]))),
        scene.insert_material(Some("Green".into()), Diffuse::new(Rgb::from_array([0.1, 0.9, 0.1]))),
        scene.insert_material(Some("Blue".into()), Diffuse::new(Rgb::from_array([0.1, 0.1, 0.9]))),
    ];
    let shapes = [
        scene.insert_shape(Sphere::new(4.0)),
        scene.insert_shape(Sphere::new(4.0)),
        scene.insert_shape(Sphere::new(4.0)),
    ];

    let light = scene.insert_material(Some("Light".into()), Light { color: Rgb::splat(10.0) });
    let light_shape = scene.insert_shape(Sphere::new(30.0));
    scene.insert_instance(
        PrimitiveInstance::new(Axis::translation(Point::new(0.0, 200.0, 100.0)), light_shape, light)
            .with_label("Light"),
    )?;

    let n = 200;
    for i in 0..n {
        let a = i as f32 / n as f32;
        let origin = Point::new(
            100.0 * f32::sin(a * TAU),
            20.0 * (f32::cos(a * 16.0 * PI) + 1.0),
            100.0 * f32::cos(a * TAU),
        );
        scene.insert_instance(PrimitiveInstance::new(
            Axis::translation(origin),
            shapes[i % shapes.len()],
            materials[i % materials.len()],
        ))?;
    }

    Ok(DemoScene {
        builder: scene,
        camera: default_camera(),
    })
}

/// Sphere marched shapes over a checkered floor, with a mirror in the middle
fn marched() -> Result<DemoScene, ConfigError> {
    let mut scene = SceneBuilder::new();

    let floor = scene.insert_material(
        Some("Floor".into()),
        Diffuse::checkered(linear::WHITE, Rgb::from_array([1.0, 0.4, 0.2]), 0.04),
    );
    let glass = scene.insert_material(
        Some("Glass".into()),
        Glass {
            color: Rgb::splat(0.95),
            fuzz: 0.01,
            ior: 1.8,
        },
    );
    let mirror = scene.insert_material(
        Some("Mirror".into()),
        Metal {
            color: Rgb::splat(0.95),
            fuzz: 0.02,
        },
    );
    let glow = scene.insert_material(
        Some("Glow".into()),
        Diffuse {
            texture: Box::new(Mandelbrot {
                base: Rgb::from_array([0.9, 0.6, 0.2]),
                max_iterations: 64,
            }),
        },
    );
    let light = scene.insert_material(Some("Light".into()), Light { color: Rgb::splat(30.0) });

    let disc = scene.insert_shape(Disc::new(500.0));
    let rectangle = scene.insert_shape(Rectangle::new(200.0, 200.0));
    let lamp = scene.insert_shape(Sphere::new(30.0));
    let bulb = scene.insert_shape(Marched::new(Mandelbulb {
        scale: 30.0,
        ..Default::default()
    }));
    let bumpy = scene.insert_shape(Marched::new(DisplacedSphere {
        radius: 30.0,
        amplitude: 1.5,
        frequency: 0.3,
    }));
    let torus = scene.insert_shape(Marched::new(SdfTorus {
        major_radius: 25.0,
        minor_radius: 8.0,
    }));
    let rounded = scene.insert_shape(Marched::new(SdfRoundBox {
        half_size: Vec3::splat(12.0),
        radius: 4.0,
    }));

    scene.insert_instance(PrimitiveInstance::new(Axis::IDENTITY, disc, floor).with_label("Floor"))?;
    scene.insert_instance(
        PrimitiveInstance::new(Axis::translation(Point::new(0.0, 1.0, 0.0)), rectangle, mirror)
            .with_label("Mirror"),
    )?;
    scene.insert_instance(PrimitiveInstance::new(
        Axis::translation(Point::new(0.0, 200.0, 100.0)),
        lamp,
        light,
    ))?;
    scene.insert_instance(
        PrimitiveInstance::new(Axis::euler_zyx(0.0, 1.0, 0.0, Point::new(-50.0, 45.0, 50.0)), bulb, glow)
            .with_label("Mandelbulb"),
    )?;
    scene.insert_instance(
        PrimitiveInstance::new(Axis::euler_zyx(0.0, 1.0, 0.0, Point::new(50.0, 45.0, 50.0)), bumpy, glass)
            .with_label("Bumpy sphere"),
    )?;
    scene.insert_instance(
        PrimitiveInstance::new(Axis::euler_zyx(0.0, 0.0, 0.4, Point::new(0.0, 45.0, -50.0)), torus, mirror)
            .with_label("Torus"),
    )?;
    scene.insert_instance(
        PrimitiveInstance::new(Axis::euler_zyx(0.6, 0.6, 0.0, Point::new(0.0, 30.0, 40.0)), rounded, glass)
            .with_label("Rounded box"),
    )?;

    Ok(DemoScene {
        builder: scene,
        camera: default_camera(),
    })
}

/// A grid of explicit and marched shapes colored by their normals
fn normals() -> Result<DemoScene, ConfigError> {
    let mut scene = SceneBuilder::new().with_background(Background::Gradient {
        horizon: linear::WHITE,
        zenith: Rgb::from_array([0.5, 0.7, 1.0]),
    });

    let outside = scene.insert_material(Some("Normals".into()), SurfaceNormal { inside: false });
    let shapes = [
        scene.insert_shape(Sphere::new(15.0)),
        scene.insert_shape(Cuboid::new(Vec3::new(12.0, 8.0, 12.0))),
        scene.insert_shape(Marched::new(SdfTorus {
            major_radius: 14.0,
            minor_radius: 5.0,
        })),
        scene.insert_shape(Marched::new(DisplacedSphere {
            radius: 14.0,
            amplitude: 1.0,
            frequency: 0.5,
        })),
        scene.insert_shape(Marched::new(SdfRoundBox {
            half_size: Vec3::splat(10.0),
            radius: 3.0,
        })),
        scene.insert_shape(Disc::new(15.0)),
    ];

    for ((row, col), shape) in iproduct!(0..2, 0..3).zip(shapes) {
        let origin = Point::new(-50.0 + 50.0 * col as f32, 15.0 + 45.0 * row as f32, 0.0);
        scene.insert_instance(PrimitiveInstance::new(
            Axis::euler_zyx(0.3, 0.5, 0.7, origin),
            shape,
            outside,
        ))?;
    }

    Ok(DemoScene {
        builder: scene,
        camera: default_camera(),
    })
}
