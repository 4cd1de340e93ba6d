/// Trait for types that can detect collisions between `Self` and `T`.
///
/// Between two areas, a collision means their interiors intersect: rectangles that merely share an edge do not collide.
/// Between an area and a point, the boundary counts as part of the area.
pub trait CollidesWith<T> {
    fn collides_with(&self, other: &T) -> bool;
}
