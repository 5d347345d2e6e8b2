use super::{Elements, Shape};
use crate::error::InvariantError;

/// Appends `src` to `dst`, offsetting every `src` index by the pre-merge vertex count of `dst`.
///
/// An empty `dst` adopts the topology kind of `src`. Coincident vertices are not deduplicated.
/// Optional buffers (color, radius) survive only if both sides populate them.
pub fn merge(dst: &mut Shape, src: &Shape) -> Result<(), InvariantError> {
    let offset = dst.vertex_count() as u32;
    let dst_empty = dst.vertices.is_empty() && dst.elements.is_empty();
    if dst_empty {
        dst.elements = src.elements.empty_like();
    }
    match (&mut dst.elements, &src.elements) {
        (Elements::Points(d), Elements::Points(s)) => d.extend(s.iter().map(|i| i + offset)),
        (Elements::Lines(d), Elements::Lines(s)) => {
            d.extend(s.iter().map(|l| [l[0] + offset, l[1] + offset]))
        }
        (Elements::Triangles(d), Elements::Triangles(s)) => d.extend(
            s.iter()
                .map(|t| [t[0] + offset, t[1] + offset, t[2] + offset]),
        ),
        (d, s) => {
            return Err(InvariantError::MismatchedTopology {
                dst: d.name(),
                src: s.name(),
            })
        }
    }
    let dv = &mut dst.vertices;
    let sv = &src.vertices;
    if dst_empty {
        dv.color = sv.color.clone();
        dv.radius = sv.radius.clone();
    } else {
        if dv.color.is_empty() || sv.color.is_empty() {
            dv.color.clear();
        } else {
            dv.color.extend_from_slice(&sv.color);
        }
        if dv.radius.is_empty() || sv.radius.is_empty() {
            dv.radius.clear();
        } else {
            dv.radius.extend_from_slice(&sv.radius);
        }
    }
    dv.pos.extend_from_slice(&sv.pos);
    dv.norm.extend_from_slice(&sv.norm);
    dv.texcoord.extend_from_slice(&sv.texcoord);
    Ok(())
}

/// Merges every shape of the iterator into a single one, in order.
pub fn merge_all<'a>(
    shapes: impl IntoIterator<Item = &'a Shape>,
) -> Result<Shape, InvariantError> {
    let mut iter = shapes.into_iter();
    let mut merged = match iter.next() {
        Some(first) => first.clone(),
        None => return Ok(Shape::empty(Elements::Triangles(Vec::new()))),
    };
    for shape in iter {
        merge(&mut merged, shape)?;
    }
    Ok(merged)
}
