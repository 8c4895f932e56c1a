pub mod aabb;
pub mod bounding_box;
