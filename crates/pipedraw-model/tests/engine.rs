#[path = "engine/bend_geometry.rs"]
mod bend_geometry;
#[path = "engine/drawing.rs"]
mod drawing;
#[path = "engine/scale.rs"]
mod scale;
