use clap::{Parser, ValueEnum};

use two_triangles::shape::Shape;

#[derive(Debug, Parser)]
pub struct Args {
    /// Geometry to draw
    #[arg(value_enum, default_value_t = ShapeArg::Adjacent)]
    pub shape: ShapeArg,
    /// Draw filled polygons instead of wireframe
    #[arg(short, long)]
    pub fill: bool,
    /// Log filter, overrides RUST_LOG (e.g. "debug")
    #[arg(short, long)]
    pub log: Option<String>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum ShapeArg {
    Adjacent,
    Triangle,
    Rectangle,
}

impl From<ShapeArg> for Shape {
    fn from(s: ShapeArg) -> Self {
        match s {
            ShapeArg::Adjacent => Self::AdjacentTriangles,
            ShapeArg::Triangle => Self::Triangle,
            ShapeArg::Rectangle => Self::Rectangle,
        }
    }
}
