pub mod ring;
pub mod text;
