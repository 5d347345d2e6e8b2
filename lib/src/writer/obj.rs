use crate::error::{InvariantError, Result};
use crate::geometry::{ColorRGB, Elements, Shape};
use crate::materials::{Material, Texture};
use crate::scene::{Handle, Scene};
use cgmath::Matrix4;
use std::io::Write;

fn texture_path<'a>(scene: &'a Scene, texture: Handle<Texture>, owner: &str) -> Result<&'a str> {
    let path = scene.textures.key(texture).ok_or_else(|| {
        InvariantError::dangling("texture", format!("{owner}#{}", texture.index()))
    })?;
    Ok(path)
}

fn write_matrix<W: Write>(out: &mut W, m: &Matrix4<f32>) -> std::io::Result<()> {
    let m: &[f32; 16] = m.as_ref();
    for v in m {
        write!(out, " {v}")?;
    }
    writeln!(out)
}

fn write_color<W: Write>(out: &mut W, tag: &str, c: ColorRGB) -> std::io::Result<()> {
    writeln!(out, "{tag} {} {} {}", c.r, c.g, c.b)
}

/// Writes the material library of `scene`.
pub fn write_mtl<W: Write>(out: &mut W, scene: &Scene) -> Result<()> {
    for (_, name, material) in scene.materials.iter() {
        let Material {
            kind,
            emission,
            diffuse,
            specular,
            transmission,
            roughness,
            opacity,
            ..
        } = material;
        writeln!(out, "newmtl {name}")?;
        if let Some(kind) = kind {
            writeln!(out, "# kind {kind}")?;
        }
        write_color(out, "Ke", *emission)?;
        write_color(out, "Kd", *diffuse)?;
        write_color(out, "Ks", *specular)?;
        write_color(out, "Kt", *transmission)?;
        writeln!(out, "Pr {roughness}")?;
        writeln!(out, "d {opacity}")?;
        let maps = [
            ("map_Ke", material.emission_texture),
            ("map_Kd", material.diffuse_texture),
            ("map_Ks", material.specular_texture),
            ("map_Kt", material.transmission_texture),
            ("norm", material.normal_texture),
        ];
        for (tag, texture) in maps {
            if let Some(texture) = texture {
                writeln!(out, "{tag} {}", texture_path(scene, texture, name)?)?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Writes vertices and elements of `shape`. Indices are offset by `base`, the amount of vertices
/// already written.
fn write_shape<W: Write>(out: &mut W, shape: &Shape, base: usize) -> std::io::Result<()> {
    let vertices = &shape.vertices;
    for p in &vertices.pos {
        writeln!(out, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for n in &vertices.norm {
        writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
    }
    for t in &vertices.texcoord {
        writeln!(out, "vt {} {}", t.x, t.y)?;
    }
    let id = |i: u32| base + i as usize + 1;
    match &shape.elements {
        Elements::Points(points) => {
            for p in points {
                writeln!(out, "p {}", id(*p))?;
            }
        }
        Elements::Lines(lines) => {
            for [a, b] in lines {
                writeln!(out, "l {}/{} {}/{}", id(*a), id(*a), id(*b), id(*b))?;
            }
        }
        Elements::Triangles(triangles) => {
            for t in triangles {
                let [a, b, c] = t.map(id);
                writeln!(out, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
            }
        }
    }
    Ok(())
}

/// Writes the geometry, cameras, environments and instances of `scene`.
///
/// Cameras (`c`), environments (`e`) and instances (`i`) are extension statements followed by
/// a column-major matrix.
pub fn write_obj<W: Write>(out: &mut W, scene: &Scene, mtllib: &str) -> Result<()> {
    writeln!(out, "mtllib {mtllib}")?;
    for (_, name, camera) in scene.cameras.iter() {
        write!(
            out,
            "c {name} {} {} {} {} {}",
            u8::from(camera.ortho),
            camera.yfov,
            camera.aspect,
            camera.aperture,
            camera.focus
        )?;
        write_matrix(out, &camera.frame)?;
    }
    for (_, name, env) in scene.environments.iter() {
        let material = scene
            .materials
            .key(env.material)
            .ok_or_else(|| InvariantError::dangling("material", name))?;
        write!(out, "e {name} {material}")?;
        write_matrix(out, &env.frame)?;
    }
    let mut base = 0;
    for (_, name, mesh) in scene.meshes.iter() {
        writeln!(out, "o {name}")?;
        for part in &mesh.parts {
            if let Some(material) = part.material {
                let material = scene
                    .materials
                    .key(material)
                    .ok_or_else(|| InvariantError::dangling("material", &part.name))?;
                writeln!(out, "usemtl {material}")?;
            }
            write_shape(out, &part.shape, base)?;
            base += part.shape.vertex_count();
        }
    }
    for (_, name, instance) in scene.instances.iter() {
        let mesh = scene
            .meshes
            .key(instance.mesh)
            .ok_or_else(|| InvariantError::dangling("mesh", name))?;
        write!(out, "i {name} {mesh}")?;
        write_matrix(out, &instance.placement.to_matrix())?;
    }
    Ok(())
}
