/// Scene-description serializer and parser
///
/// Serializes cameras, lights and meshes into the textual grammar consumed
/// by the ray-tracer collaborator, one block per entity, and parses the
/// same grammar back for validation and round-trip testing. Serialization
/// is a standalone function over the scene model, not behavior of the
/// entity types.
use std::fmt::Write as _;

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::multispace0,
    combinator::all_consuming,
    multi::{many0, many1, separated_list1},
    number::complete::double,
    sequence::{delimited, preceded, terminated, tuple},
    IResult,
};

use crate::error::{SceneError, SceneResult};
use crate::geometry::{Material, Mesh, Triangle};
use crate::math::{vec3_from_slice, Vec3};
use crate::scene::{Camera, Light, Scene};

/// `<a, b, c>` vector literal.
pub fn vector_literal(v: &Vec3) -> String {
    format!("<{}, {}, {}>", v.x, v.y, v.z)
}

pub fn camera_block(camera: &Camera) -> String {
    let kind = match camera.projection {
        crate::scene::Projection::Perspective => "perspective",
        crate::scene::Projection::Orthographic { .. } => "orthographic",
    };
    format!(
        "camera {{\n\t{kind}\n\tlocation {}\n\tlook_at {}\n\tangle {}\n\tup <0, 1, 0>\n\tright <1, 0, 0>\n}}\n",
        vector_literal(&camera.position),
        vector_literal(&camera.look_at),
        camera.fov,
    )
}

pub fn light_block(light: &Light) -> String {
    format!(
        "light_source {{ {} color rgb {} }}\n",
        vector_literal(&light.position),
        vector_literal(&light.color),
    )
}

/// One `mesh { ... }` block: local-space triangles followed by pigment,
/// transform directives and the finish coefficients.
pub fn mesh_block(mesh: &Mesh) -> String {
    let mut out = String::from("mesh {\n");
    for t in mesh.triangles() {
        let _ = writeln!(
            out,
            "\ttriangle {{{}, {}, {}}}",
            vector_literal(&t.vertices[0]),
            vector_literal(&t.vertices[1]),
            vector_literal(&t.vertices[2]),
        );
    }
    let _ = writeln!(out, "\tpigment {{ rgb {} }}", vector_literal(&mesh.color()));
    let _ = writeln!(out, "\trotate {}", vector_literal(&mesh.transform.rotation));
    let _ = writeln!(out, "\tscale {}", vector_literal(&mesh.transform.scale));
    let _ = writeln!(
        out,
        "\ttranslate {}",
        vector_literal(&mesh.transform.translation)
    );
    let _ = writeln!(
        out,
        "\tfinish {{\n\t\tdiffuse {}\n\t\tambient {}\n\t}}",
        mesh.material().diffuse(),
        mesh.material().ambient(),
    );
    out.push_str("}\n");
    out
}

/// The full description: camera, then lights, then meshes.
pub fn scene_description(scene: &Scene) -> String {
    let mut out = camera_block(scene.camera);
    for light in scene.lights {
        out.push_str(&light_block(light));
    }
    for mesh in &scene.meshes {
        out.push_str(&mesh_block(mesh));
    }
    out
}

// Parsed-but-unconverted entities; vector arity and material coefficients
// are checked in a second pass so those failures surface as Dimension and
// InvalidMaterial rather than grammar errors.
struct RawCamera {
    orthographic: bool,
    location: Vec<f64>,
    look_at: Vec<f64>,
    fov: f64,
}

struct RawLight {
    position: Vec<f64>,
    color: Vec<f64>,
}

struct RawMesh {
    triangles: Vec<[Vec<f64>; 3]>,
    pigment: Vec<f64>,
    rotate: Vec<f64>,
    scale: Vec<f64>,
    translate: Vec<f64>,
    diffuse: f64,
    ambient: f64,
}

/// Parse a full scene description back into model types.
///
/// The grammar does not carry orthographic near/far planes, so an
/// orthographic camera parses back with the default [0, 1] depth band.
pub fn parse_scene(input: &str) -> SceneResult<(Camera, Vec<Light>, Vec<Mesh>)> {
    let (_, (raw_camera, raw_lights, raw_meshes)) = all_consuming(terminated(
        tuple((parse_camera, many0(parse_light), many0(parse_mesh))),
        multispace0,
    ))(input)
    .map_err(|e| SceneError::Parse(format!("{e:?}")))?;

    let mut camera = Camera::perspective(
        vec3_from_slice(&raw_camera.location)?,
        vec3_from_slice(&raw_camera.look_at)?,
    );
    camera.fov = raw_camera.fov;
    if raw_camera.orthographic {
        camera = camera.with_orthographic(0.0, 1.0);
    }

    let lights = raw_lights
        .iter()
        .map(|l| {
            Ok(Light::with_color(
                vec3_from_slice(&l.position)?,
                vec3_from_slice(&l.color)?,
            ))
        })
        .collect::<SceneResult<Vec<Light>>>()?;

    let meshes = raw_meshes
        .iter()
        .map(|raw| {
            let triangles = raw
                .triangles
                .iter()
                .map(|[a, b, c]| {
                    Ok(Triangle::new(
                        vec3_from_slice(a)?,
                        vec3_from_slice(b)?,
                        vec3_from_slice(c)?,
                    ))
                })
                .collect::<SceneResult<Vec<Triangle>>>()?;
            let mut mesh = Mesh::from_triangles(triangles);
            mesh.set_color(vec3_from_slice(&raw.pigment)?);
            mesh.set_rotation(vec3_from_slice(&raw.rotate)?);
            mesh.set_scale(vec3_from_slice(&raw.scale)?);
            mesh.set_translation(vec3_from_slice(&raw.translate)?);
            mesh.set_material(Material::from_coefficients(raw.ambient, raw.diffuse)?);
            Ok(mesh)
        })
        .collect::<SceneResult<Vec<Mesh>>>()?;

    Ok((camera, lights, meshes))
}

fn token<'a>(t: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    preceded(multispace0, tag(t))
}

fn number(input: &str) -> IResult<&str, f64> {
    preceded(multispace0, double)(input)
}

fn vector(input: &str) -> IResult<&str, Vec<f64>> {
    delimited(
        token("<"),
        separated_list1(token(","), number),
        token(">"),
    )(input)
}

fn parse_camera(input: &str) -> IResult<&str, RawCamera> {
    let (input, _) = token("camera")(input)?;
    let (input, _) = token("{")(input)?;
    let (input, kind) = preceded(multispace0, alt((tag("perspective"), tag("orthographic"))))(input)?;
    let (input, _) = token("location")(input)?;
    let (input, location) = vector(input)?;
    let (input, _) = token("look_at")(input)?;
    let (input, look_at) = vector(input)?;
    let (input, _) = token("angle")(input)?;
    let (input, fov) = number(input)?;
    let (input, _) = token("up")(input)?;
    let (input, _) = vector(input)?;
    let (input, _) = token("right")(input)?;
    let (input, _) = vector(input)?;
    let (input, _) = token("}")(input)?;

    Ok((
        input,
        RawCamera {
            orthographic: kind == "orthographic",
            location,
            look_at,
            fov,
        },
    ))
}

fn parse_light(input: &str) -> IResult<&str, RawLight> {
    let (input, _) = token("light_source")(input)?;
    let (input, _) = token("{")(input)?;
    let (input, position) = vector(input)?;
    let (input, _) = token("color")(input)?;
    let (input, _) = token("rgb")(input)?;
    let (input, color) = vector(input)?;
    let (input, _) = token("}")(input)?;

    Ok((input, RawLight { position, color }))
}

fn parse_triangle(input: &str) -> IResult<&str, [Vec<f64>; 3]> {
    let (input, _) = token("triangle")(input)?;
    let (input, _) = token("{")(input)?;
    let (input, a) = vector(input)?;
    let (input, _) = token(",")(input)?;
    let (input, b) = vector(input)?;
    let (input, _) = token(",")(input)?;
    let (input, c) = vector(input)?;
    let (input, _) = token("}")(input)?;

    Ok((input, [a, b, c]))
}

fn parse_mesh(input: &str) -> IResult<&str, RawMesh> {
    let (input, _) = token("mesh")(input)?;
    let (input, _) = token("{")(input)?;
    let (input, triangles) = many1(parse_triangle)(input)?;
    let (input, _) = token("pigment")(input)?;
    let (input, _) = token("{")(input)?;
    let (input, _) = token("rgb")(input)?;
    let (input, pigment) = vector(input)?;
    let (input, _) = token("}")(input)?;
    let (input, _) = token("rotate")(input)?;
    let (input, rotate) = vector(input)?;
    let (input, _) = token("scale")(input)?;
    let (input, scale) = vector(input)?;
    let (input, _) = token("translate")(input)?;
    let (input, translate) = vector(input)?;
    let (input, _) = token("finish")(input)?;
    let (input, _) = token("{")(input)?;
    let (input, _) = token("diffuse")(input)?;
    let (input, diffuse) = number(input)?;
    let (input, _) = token("ambient")(input)?;
    let (input, ambient) = number(input)?;
    let (input, _) = token("}")(input)?;
    let (input, _) = token("}")(input)?;

    Ok((
        input,
        RawMesh {
            triangles,
            pigment,
            rotate,
            scale,
            translate,
            diffuse,
            ambient,
        },
    ))
}
